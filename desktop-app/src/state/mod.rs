use crate::api_client::ApiClient;
use crate::auth::{AuthBroker, AuthState};
use std::sync::Arc;

pub mod interview;
pub mod ui_state;

pub use interview::*;
pub use ui_state::*;

fn default_api_client() -> ApiClient {
    ApiClient::new(crate::config::DesktopConfig::default().api.base_url)
}

/// Centralized application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppState {
    // Configuration
    pub config: crate::config::DesktopConfig,

    // UI state
    pub ui_state: UiState,

    // Authentication state (explicit context, re-resolved every launch)
    #[serde(skip)]
    pub auth: AuthState,

    // Live interview view state. Never persisted: a restart loses turn
    // history and the backend stays the source of truth.
    #[serde(skip)]
    pub interview: Option<InterviewState>,

    // Profile data
    #[serde(skip)]
    pub stats: Option<prepdeck_models::UserStats>,

    // Runtime state (not serialized)
    #[serde(skip, default = "default_api_client")]
    pub api: ApiClient,
    #[serde(skip)]
    pub auth_broker: Arc<AuthBroker>,
    #[serde(skip)]
    pub auth_gate: Option<tokio::task::JoinHandle<()>>,

    #[serde(skip)]
    pub resolving_auth: bool,
    #[serde(skip)]
    pub signing_in: bool,
    #[serde(skip)]
    pub starting_session: bool,
    #[serde(skip)]
    pub completing_session: bool,
    #[serde(skip)]
    pub loading_stats: bool,

    #[serde(skip)]
    pub auth_result: Arc<std::sync::Mutex<Option<AuthState>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub sign_in_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::AuthSession, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub start_session_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::StartSessionResponse, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub next_question_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::NextQuestionResponse, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub submit_answer_result: Arc<std::sync::Mutex<Option<Result<(), String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub followup_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::FollowupResponse, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub followup_answer_result: Arc<std::sync::Mutex<Option<Result<(), String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub feedback_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::FeedbackResponse, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub complete_result:
        Arc<std::sync::Mutex<Option<Result<prepdeck_models::CompleteSessionResponse, String>>>>,
    #[serde(skip)]
    #[allow(clippy::type_complexity)]
    pub stats_result: Arc<std::sync::Mutex<Option<Result<prepdeck_models::UserStats, String>>>>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = crate::config::DesktopConfig::default();
        let api = ApiClient::new(config.api.base_url.clone());
        Self {
            config,
            ui_state: UiState::default(),
            auth: AuthState::default(),
            interview: None,
            stats: None,
            api,
            auth_broker: Arc::new(AuthBroker::new()),
            auth_gate: None,
            resolving_auth: false,
            signing_in: false,
            starting_session: false,
            completing_session: false,
            loading_stats: false,
            auth_result: Arc::new(std::sync::Mutex::new(None)),
            sign_in_result: Arc::new(std::sync::Mutex::new(None)),
            start_session_result: Arc::new(std::sync::Mutex::new(None)),
            next_question_result: Arc::new(std::sync::Mutex::new(None)),
            submit_answer_result: Arc::new(std::sync::Mutex::new(None)),
            followup_result: Arc::new(std::sync::Mutex::new(None)),
            followup_answer_result: Arc::new(std::sync::Mutex::new(None)),
            feedback_result: Arc::new(std::sync::Mutex::new(None)),
            complete_result: Arc::new(std::sync::Mutex::new(None)),
            stats_result: Arc::new(std::sync::Mutex::new(None)),
        }
    }
}
