use neighborly_domain::ProviderKind;
use tracing::warn;

use crate::generation_ports::{ProviderError, ProviderRequest};
use crate::provider_client::{ProviderClient, RawCandidate};

mod events;
mod feedback;

/// Generation orchestrator: provider first, deterministic templates second.
///
/// Holds no mutable state; identical input without a provider always yields
/// an identical outcome.
#[derive(Clone, Default)]
pub struct GenerationService {
    provider_client: ProviderClient,
}

/// Result of one provider attempt before validation.
enum Attempt<C> {
    /// The provider answered with the required fields.
    Candidate(C),
    /// The fallback must be used; carries the failure when a provider was tried.
    Fallback(Option<String>),
}

impl GenerationService {
    /// Creates an orchestrator around a provider client.
    #[must_use]
    pub fn new(provider_client: ProviderClient) -> Self {
        Self { provider_client }
    }

    /// Returns the configured provider family.
    #[must_use]
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        self.provider_client.kind()
    }

    async fn attempt<C>(
        &self,
        request: &ProviderRequest,
        required_fields: &str,
        extract: impl FnOnce(&RawCandidate) -> Option<C>,
    ) -> Attempt<C> {
        let candidate = match self.provider_client.call(request).await {
            Ok(candidate) => candidate,
            Err(ProviderError::NoProvider) => return Attempt::Fallback(None),
            Err(error) => {
                warn!(
                    provider = self.provider_kind().map(|kind| kind.as_str()),
                    %error,
                    "generation provider failed, using fallback"
                );
                return Attempt::Fallback(Some(error.to_string()));
            }
        };

        match extract(&candidate) {
            Some(candidate) => Attempt::Candidate(candidate),
            None => {
                let failure = format!("provider response is missing {required_fields}");
                warn!(
                    provider = self.provider_kind().map(|kind| kind.as_str()),
                    %failure,
                    "generation provider answer unusable, using fallback"
                );
                Attempt::Fallback(Some(failure))
            }
        }
    }
}

#[cfg(test)]
mod tests;
