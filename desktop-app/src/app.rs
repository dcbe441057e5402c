use crate::auth::{AuthState, SessionCache};
use crate::components::{Sidebar, StatusBar};
use crate::pages::{
    InterviewPage, Page as PageView, PracticePage, ProfilePage, SettingsPage, SignInPage,
};
use crate::sequencer::Command;
use crate::services::ApiService;
use crate::state::{AppState, InterviewState, Page, TranscriptEntry};

/// The application shell: owns the state, polls settled async results each
/// frame, dispatches sequencer commands, and renders the current page.
pub struct DesktopApp {
    state: AppState,
    signin_page: SignInPage,
    practice_page: PracticePage,
    interview_page: InterviewPage,
    profile_page: ProfilePage,
    settings_page: SettingsPage,
    sidebar: Sidebar,
    status_bar: StatusBar,
}

impl DesktopApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut state: AppState = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        state.config = crate::config::DesktopConfig::load().unwrap_or_default();
        state.api = crate::api_client::ApiClient::new(state.config.api.base_url.clone());
        state.ui_state.base_url_input = state.config.api.base_url.clone();

        // A restart never resumes into a live session: the backend owns
        // session state and local turn history is gone by design.
        if state.ui_state.current_page == Page::Interview {
            state.ui_state.current_page = Page::Practice;
        }

        // Kick off the startup auth gate.
        ApiService::new().resolve_auth(&mut state);

        Self {
            state,
            signin_page: SignInPage::new(),
            practice_page: PracticePage::new(),
            interview_page: InterviewPage::new(),
            profile_page: ProfilePage::new(),
            settings_page: SettingsPage::new(),
            sidebar: Sidebar::new(),
            status_bar: StatusBar::new(),
        }
    }

    /// Drains every settled async result into the state and collects the
    /// sequencer commands that fall out of them.
    fn poll_results(&mut self) {
        let mut commands: Vec<Command> = Vec::new();
        let mut should_refresh_stats = false;

        // Check for auth gate resolution
        if let Ok(mut result) = self.state.auth_result.try_lock() {
            if let Some(resolved) = result.take() {
                self.state.resolving_auth = false;
                if let AuthState::SignedIn(session) = &resolved {
                    self.state
                        .api
                        .set_access_token(Some(session.access_token.clone()));
                    tracing::info!("Session restored for {}", session.user.email);
                }
                self.state.auth = resolved;
            }
        }

        // Check for sign-in results
        if let Ok(mut result) = self.state.sign_in_result.try_lock() {
            if let Some(sign_in_result) = result.take() {
                self.state.signing_in = false;
                match sign_in_result {
                    Ok(session) => {
                        tracing::info!("Signed in as {}", session.user.email);
                        let cache = SessionCache {
                            access_token: Some(session.access_token.clone()),
                        };
                        if let Err(e) = cache.save() {
                            tracing::warn!("Could not cache session token: {}", e);
                        }
                        self.state
                            .api
                            .set_access_token(Some(session.access_token.clone()));
                        self.state
                            .auth_broker
                            .publish(AuthState::SignedIn(session.clone()));
                        self.state.auth = AuthState::SignedIn(session);
                        self.state.ui_state.password_input.clear();
                        self.state.ui_state.current_page = Page::Practice;
                    }
                    Err(e) => {
                        tracing::error!("Sign-in failed: {}", e);
                        self.state.ui_state.auth_error = Some(e);
                    }
                }
            }
        }

        // Check for session start results
        if let Ok(mut result) = self.state.start_session_result.try_lock() {
            if let Some(start_result) = result.take() {
                self.state.starting_session = false;
                match start_result {
                    Ok(response) => {
                        tracing::info!("Started session {}", response.session_id);
                        let role = self.state.ui_state.role_input.trim().to_string();
                        let company = self.state.ui_state.company_input.trim().to_string();
                        let mut interview =
                            InterviewState::new(response.session_id, role, company);
                        if let Some(command) = interview.sequencer.start() {
                            commands.push(command);
                        }
                        self.state.interview = Some(interview);
                        self.state.ui_state.answer_input.clear();
                        self.state.ui_state.notice = None;
                        self.state.ui_state.current_page = Page::Interview;
                    }
                    Err(e) => {
                        tracing::error!("Failed to start session: {}", e);
                        self.state.ui_state.notice =
                            Some(format!("Failed to start session: {}", e));
                    }
                }
            }
        }

        // Check for next question results
        if let Ok(mut result) = self.state.next_question_result.try_lock() {
            if let Some(question_result) = result.take() {
                if let Some(interview) = self.state.interview.as_mut() {
                    match question_result {
                        Ok(question) => {
                            interview.sequencer.question_received(&question);
                            interview.transcript.push(TranscriptEntry::recruiter(
                                &question.question,
                                question.audio_b64.as_deref(),
                            ));
                            self.state.ui_state.notice = None;
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch question: {}", e);
                            interview.sequencer.request_failed();
                            self.state.ui_state.notice =
                                Some(format!("Failed to fetch question: {}", e));
                        }
                    }
                }
            }
        }

        // Check for answer submission results
        if let Ok(mut result) = self.state.submit_answer_result.try_lock() {
            if let Some(answer_result) = result.take() {
                if let Some(interview) = self.state.interview.as_mut() {
                    match answer_result {
                        Ok(()) => {
                            if let Some(answer) = interview.pending_answer.take() {
                                interview.transcript.push(TranscriptEntry::candidate(answer));
                            }
                            self.state.ui_state.answer_input.clear();
                            self.state.ui_state.notice = None;
                            if let Some(command) = interview.sequencer.answer_accepted() {
                                commands.push(command);
                            }
                        }
                        Err(e) => {
                            // The draft stays in the editor for manual resubmission.
                            tracing::error!("Failed to submit answer: {}", e);
                            interview.pending_answer = None;
                            interview.sequencer.request_failed();
                            self.state.ui_state.notice =
                                Some(format!("Could not submit answer: {}", e));
                        }
                    }
                }
            }
        }

        // Check for follow-up question results
        if let Ok(mut result) = self.state.followup_result.try_lock() {
            if let Some(followup_result) = result.take() {
                if let Some(interview) = self.state.interview.as_mut() {
                    match followup_result {
                        Ok(followup) => {
                            interview.sequencer.followup_received();
                            interview.transcript.push(TranscriptEntry::recruiter(
                                &followup.follow_up,
                                followup.audio_b64.as_deref(),
                            ));
                            self.state.ui_state.notice = None;
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch follow-up: {}", e);
                            interview.sequencer.request_failed();
                            self.state.ui_state.notice =
                                Some(format!("Failed to fetch follow-up: {}", e));
                        }
                    }
                }
            }
        }

        // Check for follow-up answer results
        if let Ok(mut result) = self.state.followup_answer_result.try_lock() {
            if let Some(answer_result) = result.take() {
                if let Some(interview) = self.state.interview.as_mut() {
                    match answer_result {
                        Ok(()) => {
                            if let Some(answer) = interview.pending_answer.take() {
                                interview.transcript.push(TranscriptEntry::candidate(answer));
                            }
                            self.state.ui_state.answer_input.clear();
                            self.state.ui_state.notice = None;
                            if let Some(command) = interview.sequencer.followup_answer_accepted()
                            {
                                commands.push(command);
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to submit follow-up answer: {}", e);
                            interview.pending_answer = None;
                            interview.sequencer.request_failed();
                            self.state.ui_state.notice =
                                Some(format!("Could not submit answer: {}", e));
                        }
                    }
                }
            }
        }

        // Check for feedback results
        if let Ok(mut result) = self.state.feedback_result.try_lock() {
            if let Some(feedback_result) = result.take() {
                if let Some(interview) = self.state.interview.as_mut() {
                    match feedback_result {
                        Ok(feedback) => {
                            tracing::info!("Feedback received, score {}", feedback.score);
                            interview.sequencer.feedback_received();
                            interview.feedback = Some(feedback);
                            self.state.ui_state.notice = None;
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch feedback: {}", e);
                            interview.sequencer.request_failed();
                            self.state.ui_state.notice =
                                Some(format!("Failed to fetch feedback: {}", e));
                        }
                    }
                }
            }
        }

        // Check for session completion results
        if let Ok(mut result) = self.state.complete_result.try_lock() {
            if let Some(complete_result) = result.take() {
                self.state.completing_session = false;
                match complete_result {
                    Ok(_) => {
                        tracing::info!("Session completed");
                        self.state.interview = None;
                        self.state.stats = None;
                        self.state.ui_state.notice = None;
                        self.state.ui_state.current_page = Page::Profile;
                        should_refresh_stats = true;
                    }
                    Err(e) => {
                        tracing::error!("Failed to complete session: {}", e);
                        self.state.ui_state.notice =
                            Some(format!("Could not complete session: {}", e));
                    }
                }
            }
        }

        // Check for profile stats results
        if let Ok(mut result) = self.state.stats_result.try_lock() {
            if let Some(stats_result) = result.take() {
                self.state.loading_stats = false;
                match stats_result {
                    Ok(stats) => {
                        tracing::info!("Loaded stats for {} sessions", stats.total_sessions);
                        self.state.stats = Some(stats);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load stats: {}", e);
                        self.state.ui_state.notice = Some(format!("Failed to load stats: {}", e));
                    }
                }
            }
        }

        for command in commands {
            ApiService::new().run_command(&mut self.state, command);
        }
        if should_refresh_stats {
            ApiService::new().refresh_stats(&mut self.state);
        }
    }
}

impl eframe::App for DesktopApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Async results land in slots; keep polling while otherwise idle.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));

        self.poll_results();

        // Auth gate: a protected page renders nothing when signed out, and
        // navigation to sign-in happens within the bounded resolve window.
        if self.state.ui_state.current_page.requires_auth()
            && self.state.auth == AuthState::SignedOut
        {
            self.state.ui_state.current_page = Page::SignIn;
        }
        if self.state.ui_state.current_page == Page::SignIn
            && matches!(self.state.auth, AuthState::SignedIn(_))
        {
            self.state.ui_state.current_page = Page::Practice;
        }

        self.status_bar.ui(ctx, &self.state);
        self.sidebar.ui(ctx, &mut self.state);

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.ui_state.current_page {
                Page::SignIn => self.signin_page.ui(ctx, ui, &mut self.state),
                Page::Practice => self.practice_page.ui(ctx, ui, &mut self.state),
                Page::Interview => self.interview_page.ui(ctx, ui, &mut self.state),
                Page::Profile => self.profile_page.ui(ctx, ui, &mut self.state),
                Page::Settings => self.settings_page.ui(ctx, ui, &mut self.state),
            }
        });
    }
}
