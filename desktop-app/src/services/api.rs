use crate::api_client::ApiError;
use crate::auth::{self, AuthState, SessionCache};
use crate::sequencer::Command;
use crate::state::AppState;
use prepdeck_models::AuthSession;
use std::sync::Arc;
use std::time::Duration;

/// Bounded window the startup auth gate waits for the cached session to
/// re-verify before treating it as absent.
const AUTH_RESOLVE_DEADLINE: Duration = Duration::from_secs(5);

pub struct ApiService;

impl ApiService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiService {
    // Authentication

    /// Starts the startup auth gate: restore the cached session in the
    /// background and wait for it with a bounded deadline. The stored
    /// `JoinHandle` is the cancellation handle.
    pub fn resolve_auth(&self, state: &mut AppState) {
        if state.resolving_auth {
            return;
        }
        state.resolving_auth = true;
        state.auth = AuthState::Resolving;
        state.auth_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let broker = Arc::clone(&state.auth_broker);
        let mut watch = state.auth_broker.watch();
        let result_clone = Arc::clone(&state.auth_result);

        let gate = tokio::spawn(async move {
            tokio::spawn(auth::restore_session(api, broker));
            let resolved = watch.resolved(AUTH_RESOLVE_DEADLINE).await;
            let mut auth_result = result_clone.lock().unwrap();
            *auth_result = Some(resolved);
        });
        state.auth_gate = Some(gate);
    }

    pub fn sign_in(&self, state: &mut AppState) {
        if state.signing_in {
            return;
        }
        let email = state.ui_state.email_input.trim().to_string();
        let password = state.ui_state.password_input.clone();
        if email.is_empty() || password.is_empty() {
            state.ui_state.auth_error = Some("Email and password are required".to_string());
            return;
        }

        state.signing_in = true;
        state.ui_state.auth_error = None;
        state.sign_in_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let signup_mode = state.ui_state.signup_mode;
        let result_clone = Arc::clone(&state.sign_in_result);

        tokio::spawn(async move {
            let result = async {
                if signup_mode {
                    api.signup(&email, &password).await?;
                }
                let login = api.login(&email, &password).await?;
                let mut authed = api.clone();
                authed.set_access_token(Some(login.token.clone()));
                let verified = authed.verify().await?;
                Ok::<AuthSession, ApiError>(AuthSession {
                    access_token: login.token,
                    user: verified.user,
                })
            }
            .await;
            let mut sign_in_result = result_clone.lock().unwrap();
            *sign_in_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    pub fn sign_out(&self, state: &mut AppState) {
        if let Some(gate) = state.auth_gate.take() {
            gate.abort();
        }
        state.resolving_auth = false;
        if let Err(e) = SessionCache::clear() {
            tracing::warn!("Could not clear session cache: {}", e);
        }
        state.api.set_access_token(None);
        state.auth = AuthState::SignedOut;
        state.auth_broker.publish(AuthState::SignedOut);
        state.interview = None;
        state.stats = None;
        state.ui_state.current_page = crate::state::Page::SignIn;
        tracing::info!("Signed out");
    }

    // Interview session

    pub fn start_session(&self, state: &mut AppState) {
        if state.starting_session || state.auth.session().is_none() {
            return;
        }
        let role = state.ui_state.role_input.trim().to_string();
        let company = state.ui_state.company_input.trim().to_string();
        if role.is_empty() || company.is_empty() {
            state.ui_state.notice = Some("Enter both a role and a company".to_string());
            return;
        }

        state.starting_session = true;
        state.start_session_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.start_session_result);

        tokio::spawn(async move {
            let result = api.start_session(&role, &company).await;
            let mut start_result = result_clone.lock().unwrap();
            *start_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    /// Dispatches a sequencer command as the matching remote call.
    pub fn run_command(&self, state: &mut AppState, command: Command) {
        match command {
            Command::FetchNextQuestion => self.fetch_next_question(state),
            Command::SubmitAnswer {
                question_number,
                answer,
            } => self.submit_answer(state, question_number, answer),
            Command::FetchFollowup => self.fetch_followup(state),
            Command::SubmitFollowupAnswer { answer } => {
                self.submit_followup_answer(state, answer)
            }
            Command::FetchFeedback => self.fetch_feedback(state),
        }
    }

    fn fetch_next_question(&self, state: &mut AppState) {
        let Some(interview) = state.interview.as_ref() else {
            return;
        };
        let session_id = interview.session_id.clone();
        state.next_question_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.next_question_result);

        tokio::spawn(async move {
            let result = api.next_question(&session_id).await;
            let mut question_result = result_clone.lock().unwrap();
            *question_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    fn submit_answer(&self, state: &mut AppState, question_number: u32, answer: String) {
        let Some(interview) = state.interview.as_mut() else {
            return;
        };
        interview.pending_answer = Some(answer.clone());
        let session_id = interview.session_id.clone();
        state.submit_answer_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.submit_answer_result);

        tokio::spawn(async move {
            let result = api
                .submit_answer(&session_id, question_number, &answer)
                .await;
            let mut answer_result = result_clone.lock().unwrap();
            *answer_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    fn fetch_followup(&self, state: &mut AppState) {
        let Some(interview) = state.interview.as_ref() else {
            return;
        };
        let session_id = interview.session_id.clone();
        state.followup_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.followup_result);

        tokio::spawn(async move {
            let result = api.followup(&session_id).await;
            let mut followup_result = result_clone.lock().unwrap();
            *followup_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    fn submit_followup_answer(&self, state: &mut AppState, answer: String) {
        let Some(interview) = state.interview.as_mut() else {
            return;
        };
        interview.pending_answer = Some(answer.clone());
        let session_id = interview.session_id.clone();
        state.followup_answer_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.followup_answer_result);

        tokio::spawn(async move {
            let result = api.submit_followup_answer(&session_id, &answer).await;
            let mut answer_result = result_clone.lock().unwrap();
            *answer_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    fn fetch_feedback(&self, state: &mut AppState) {
        let Some(interview) = state.interview.as_ref() else {
            return;
        };
        let session_id = interview.session_id.clone();
        state.feedback_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.feedback_result);

        tokio::spawn(async move {
            let result = api.feedback(&session_id).await;
            let mut feedback_result = result_clone.lock().unwrap();
            *feedback_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    pub fn complete_session(&self, state: &mut AppState) {
        if state.completing_session {
            return;
        }
        let Some(interview) = state.interview.as_ref() else {
            return;
        };
        let session_id = interview.session_id.clone();

        state.completing_session = true;
        state.complete_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.complete_result);

        tokio::spawn(async move {
            let result = api.complete_session(&session_id).await;
            let mut complete_result = result_clone.lock().unwrap();
            *complete_result = Some(result.map_err(|e| e.to_string()));
        });
    }

    // Profile

    pub fn refresh_stats(&self, state: &mut AppState) {
        if state.loading_stats || state.auth.session().is_none() {
            return;
        }
        state.loading_stats = true;
        state.stats_result = Arc::new(std::sync::Mutex::new(None));

        let api = state.api.clone();
        let result_clone = Arc::clone(&state.stats_result);

        tokio::spawn(async move {
            let result = api.user_stats().await;
            let mut stats_result = result_clone.lock().unwrap();
            *stats_result = Some(result.map_err(|e| e.to_string()));
        });
    }
}
