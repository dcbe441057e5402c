use prepdeck_models::{
    ApiErrorBody, CompleteSessionResponse, FeedbackResponse, FollowupResponse, LoginResponse,
    NextQuestionResponse, SignupResponse, StartSessionResponse, UserStats, VerifyResponse,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            access_token: None,
        }
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }

    /// Attaches the bearer token. An authenticated operation without a
    /// token at call time is a hard failure: the request is never sent.
    fn add_auth_header(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self.access_token.as_ref().ok_or(ApiError::MissingToken)?;
        Ok(request.header("Authorization", format!("Bearer {}", token)))
    }

    /// Maps a non-success status to `ApiError::HttpStatus`, keeping the
    /// backend's `detail` message when the error body parses.
    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
            .map(|body| body.detail);
        Err(ApiError::HttpStatus { status, detail })
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let url = format!(
            "{}/auth/signup?email={}&password={}",
            self.base_url,
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        let response = self
            .client()
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let signup_response: SignupResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(signup_response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!(
            "{}/auth/login?email={}&password={}",
            self.base_url,
            urlencoding::encode(email),
            urlencoding::encode(password)
        );
        let response = self
            .client()
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let login_response: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(login_response)
    }

    pub async fn verify(&self) -> Result<VerifyResponse, ApiError> {
        let url = format!("{}/auth/verify", self.base_url);
        let request = self.add_auth_header(self.client().get(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let verify_response: VerifyResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(verify_response)
    }

    pub async fn start_session(
        &self,
        role: &str,
        company: &str,
    ) -> Result<StartSessionResponse, ApiError> {
        let url = format!(
            "{}/session/start?role={}&company={}",
            self.base_url,
            urlencoding::encode(role),
            urlencoding::encode(company)
        );
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let start_response: StartSessionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(start_response)
    }

    pub async fn next_question(
        &self,
        session_id: &str,
    ) -> Result<NextQuestionResponse, ApiError> {
        let url = format!("{}/session/{}/next", self.base_url, session_id);
        let request = self.add_auth_header(self.client().get(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let question_response: NextQuestionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(question_response)
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        question_number: u32,
        answer: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/session/{}/answer?question_number={}&answer={}",
            self.base_url,
            session_id,
            question_number,
            urlencoding::encode(answer)
        );
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        Self::error_for_status(response).await?;

        Ok(())
    }

    pub async fn followup(&self, session_id: &str) -> Result<FollowupResponse, ApiError> {
        let url = format!("{}/session/{}/followup", self.base_url, session_id);
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let followup_response: FollowupResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(followup_response)
    }

    pub async fn submit_followup_answer(
        &self,
        session_id: &str,
        answer: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/session/{}/followup-answer?answer={}",
            self.base_url,
            session_id,
            urlencoding::encode(answer)
        );
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        Self::error_for_status(response).await?;

        Ok(())
    }

    pub async fn feedback(&self, session_id: &str) -> Result<FeedbackResponse, ApiError> {
        let url = format!("{}/session/{}/feedback", self.base_url, session_id);
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let feedback_response: FeedbackResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(feedback_response)
    }

    pub async fn complete_session(
        &self,
        session_id: &str,
    ) -> Result<CompleteSessionResponse, ApiError> {
        let url = format!("{}/session/{}/complete", self.base_url, session_id);
        let request = self.add_auth_header(self.client().post(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let complete_response: CompleteSessionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(complete_response)
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        let url = format!("{}/user/stats", self.base_url);
        let request = self.add_auth_header(self.client().get(&url))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let response = Self::error_for_status(response).await?;

        let stats: UserStats = response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))?;

        Ok(stats)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No authentication token available")]
    MissingToken,
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error {status}: {}", .detail.as_deref().unwrap_or("request rejected"))]
    HttpStatus {
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
    #[error("Parse failed: {0}")]
    ParseFailed(String),
}

impl ApiError {
    /// Check if this error is a 401 Unauthorized error (needs authentication)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::HttpStatus { status, .. } if status == &reqwest::StatusCode::UNAUTHORIZED)
    }

    /// Check if this error is a 403 Forbidden error (permission denied)
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::HttpStatus { status, .. } if status == &reqwest::StatusCode::FORBIDDEN)
    }

    /// Check if this is an authentication-related error (401 or 403)
    pub fn is_auth_error(&self) -> bool {
        self.is_unauthorized() || self.is_forbidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let mut client = ApiClient::new("http://localhost:8000/api".to_string());
        assert!(client.access_token().is_none());
        client.set_access_token(Some("tok".to_string()));
        assert_eq!(client.access_token().as_deref(), Some("tok"));
    }

    #[test]
    fn unauthorized_classification() {
        let err = ApiError::HttpStatus {
            status: reqwest::StatusCode::UNAUTHORIZED,
            detail: Some("Invalid token".to_string()),
        };
        assert!(err.is_unauthorized());
        assert!(err.is_auth_error());
        assert!(!err.is_forbidden());
    }

    #[test]
    fn http_error_display_includes_detail() {
        let err = ApiError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            detail: Some("Session not found".to_string()),
        };
        assert!(err.to_string().contains("Session not found"));
    }
}
