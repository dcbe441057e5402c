use crate::sequencer::TurnSequencer;
use base64::Engine;
use prepdeck_models::FeedbackResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Recruiter,
    Candidate,
}

/// One entry in the on-screen dialogue transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Decoded synthesized speech for recruiter entries, when the backend
    /// sent one.
    pub voice: Option<Vec<u8>>,
}

impl TranscriptEntry {
    pub fn recruiter(text: impl Into<String>, audio_b64: Option<&str>) -> Self {
        let voice = audio_b64.and_then(|encoded| {
            match base64::engine::general_purpose::STANDARD.decode(encoded) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!("Discarding undecodable question audio: {}", e);
                    None
                }
            }
        });
        Self {
            speaker: Speaker::Recruiter,
            text: text.into(),
            voice,
        }
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Candidate,
            text: text.into(),
            voice: None,
        }
    }
}

/// View state for the live practice session. Owned by the interview page
/// for its lifetime; dropped wholesale when the session ends.
#[derive(Debug)]
pub struct InterviewState {
    pub session_id: String,
    pub role: String,
    pub company: String,
    pub sequencer: TurnSequencer,
    pub transcript: Vec<TranscriptEntry>,
    pub feedback: Option<FeedbackResponse>,
    /// Answer text of the submission currently in flight; appended to the
    /// transcript only once the backend accepts it.
    pub pending_answer: Option<String>,
}

impl InterviewState {
    pub fn new(session_id: String, role: String, company: String) -> Self {
        Self {
            session_id,
            role,
            company,
            sequencer: TurnSequencer::new(),
            transcript: Vec::new(),
            feedback: None,
            pending_answer: None,
        }
    }
}
