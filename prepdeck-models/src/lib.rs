use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Shared models for the prepdeck backend API and desktop-app

/// Error envelope returned by the backend on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Identity session issued by the auth provider: the bearer token attached
/// to every interview request plus the resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub message: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub questions: Vec<String>,
}

/// One scripted question handed out by the backend.
///
/// `question_number` is 1-based and echoed back when the answer is
/// submitted. `audio_b64`, when present, carries synthesized speech for the
/// question text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestionResponse {
    pub question_number: u32,
    pub question: String,
    pub is_last_question: bool,
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default)]
    pub audio_b64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowupResponse {
    pub follow_up: String,
    #[serde(default)]
    pub audio_b64: Option<String>,
}

/// Per-criterion sub-scores, each graded 0-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRubric {
    pub clarity: u8,
    pub structure: u8,
    pub relevance: u8,
    pub conciseness: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub score: i32,
    #[serde(default)]
    pub rubric: Option<FeedbackRubric>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteSessionResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub role: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total_sessions: u32,
    pub average_score: f64,
    pub best_score: i32,
    pub recent_sessions: Vec<SessionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_question_without_audio() {
        let payload = r#"{
            "question_number": 2,
            "question": "What interests you most about our company?",
            "is_last_question": false
        }"#;
        let parsed: NextQuestionResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.question_number, 2);
        assert!(!parsed.is_last_question);
        assert!(parsed.is_complete.is_none());
        assert!(parsed.audio_b64.is_none());
    }

    #[test]
    fn feedback_with_rubric() {
        let payload = r#"{
            "feedback": "Solid structure, tighten the closing.",
            "score": 7,
            "rubric": {"clarity": 4, "structure": 3, "relevance": 5, "conciseness": 3}
        }"#;
        let parsed: FeedbackResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.score, 7);
        let rubric = parsed.rubric.unwrap();
        assert_eq!(rubric.relevance, 5);
    }

    #[test]
    fn feedback_without_rubric() {
        let payload = r#"{"feedback": "Good answers overall.", "score": 8}"#;
        let parsed: FeedbackResponse = serde_json::from_str(payload).unwrap();
        assert!(parsed.rubric.is_none());
    }

    #[test]
    fn user_stats_payload_parses() {
        let payload = r#"{
            "total_sessions": 4,
            "average_score": 6.5,
            "best_score": 9,
            "recent_sessions": [
                {
                    "id": "sess-1",
                    "role": "SWE Intern",
                    "company": "Google",
                    "created_at": "2026-08-01T14:30:00Z",
                    "score": 9
                },
                {
                    "id": "sess-2",
                    "role": "Data Analyst",
                    "company": "Stripe",
                    "created_at": "2026-08-03T09:00:00Z",
                    "score": null
                }
            ]
        }"#;
        let parsed: UserStats = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.total_sessions, 4);
        assert_eq!(parsed.recent_sessions.len(), 2);
        assert_eq!(parsed.recent_sessions[1].score, None);
    }

    #[test]
    fn error_body_detail() {
        let payload = r#"{"detail": "Session not found"}"#;
        let parsed: ApiErrorBody = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.detail, "Session not found");
    }
}
