use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use neighborly_core::AppError;
use neighborly_domain::ProviderKind;
use neighborly_infrastructure::{
    GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL, OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL,
};
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Connection settings for one hosted language-model API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationProviderConfig {
    /// No key available; every request uses the template path.
    Disabled,
    OpenAi(HttpProviderConfig),
    Gemini(HttpProviderConfig),
}

impl GenerationProviderConfig {
    pub fn kind(&self) -> Option<ProviderKind> {
        match self {
            Self::Disabled => None,
            Self::OpenAi(_) => Some(ProviderKind::OpenAi),
            Self::Gemini(_) => Some(ProviderKind::Gemini),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub generation_provider: GenerationProviderConfig,
    pub request_timeout: Duration,
    pub production: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = optional("DATABASE_URL");
        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = optional("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let request_timeout = match optional("AI_REQUEST_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "AI_REQUEST_TIMEOUT_SECS must be a positive number of seconds, got '{value}'"
                    ))
                })?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let production = optional("APP_ENV")
            .is_some_and(|value| value.eq_ignore_ascii_case("production"));

        let generation_provider = generation_provider_config(&optional)?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            generation_provider,
            request_timeout,
            production,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

fn generation_provider_config(
    optional: &impl Fn(&str) -> Option<String>,
) -> Result<GenerationProviderConfig, AppError> {
    let openai_key = optional("OPENAI_API_KEY");
    let gemini_key = optional("GEMINI_API_KEY");

    let requested = optional("AI_PROVIDER").map(|value| value.to_ascii_lowercase());
    let kind = match requested.as_deref() {
        None | Some("auto") => {
            if openai_key.is_some() {
                Some(ProviderKind::OpenAi)
            } else if gemini_key.is_some() {
                Some(ProviderKind::Gemini)
            } else {
                None
            }
        }
        Some("template" | "none") => None,
        Some(other) => Some(ProviderKind::from_str(other).map_err(|_| {
            AppError::Validation(format!(
                "AI_PROVIDER must be one of 'auto', 'openai', 'gemini', or 'template', got '{other}'"
            ))
        })?),
    };

    match kind {
        Some(ProviderKind::OpenAi) => match openai_key {
            Some(api_key) => Ok(GenerationProviderConfig::OpenAi(HttpProviderConfig {
                api_key,
                model: optional("OPENAI_MODEL").unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_owned()),
                base_url: base_url(optional, "OPENAI_BASE_URL", OPENAI_DEFAULT_BASE_URL)?,
            })),
            None => Ok(GenerationProviderConfig::Disabled),
        },
        Some(ProviderKind::Gemini) => match gemini_key {
            Some(api_key) => Ok(GenerationProviderConfig::Gemini(HttpProviderConfig {
                api_key,
                model: optional("GEMINI_MODEL").unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_owned()),
                base_url: base_url(optional, "GEMINI_BASE_URL", GEMINI_DEFAULT_BASE_URL)?,
            })),
            None => Ok(GenerationProviderConfig::Disabled),
        },
        None => Ok(GenerationProviderConfig::Disabled),
    }
}

fn base_url(
    optional: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<Url, AppError> {
    let value = optional(name).unwrap_or_else(|| default.to_owned());
    let url = Url::parse(&value)
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "{name} must use http or https, got '{value}'"
        )));
    }

    Ok(url)
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
