use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Page {
    #[default]
    SignIn,
    Practice,
    Interview,
    Profile,
    Settings,
}

impl Page {
    /// Pages that require a signed-in identity session before rendering.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Practice | Page::Interview | Page::Profile)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    pub current_page: Page,

    // Sign-in form
    pub email_input: String,
    #[serde(skip)]
    pub password_input: String,
    pub signup_mode: bool,
    #[serde(skip)]
    pub auth_error: Option<String>,

    // Practice form
    pub role_input: String,
    pub company_input: String,

    // Interview answer draft (session-scoped, never persisted)
    #[serde(skip)]
    pub answer_input: String,

    // Settings form
    #[serde(skip)]
    pub base_url_input: String,

    /// Transient notice shown in the status bar, cleared on the next
    /// settled operation.
    #[serde(skip)]
    pub notice: Option<String>,
}
