use neighborly_application::CommunityAiService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub community_ai_service: CommunityAiService,
    pub production: bool,
}
