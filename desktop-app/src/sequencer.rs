//! Turn-taking state machine for a practice interview session.
//!
//! The sequencer is pure: settled request results and UI events feed it, and
//! it hands back the next remote call to issue as a [`Command`]. The app
//! layer dispatches commands through the API service and routes the results
//! back in. Keeping the I/O outside is what makes the dialogue rules
//! testable without a backend.

use prepdeck_models::NextQuestionResponse;

/// Number of scripted questions before the free-form follow-up.
pub const SCRIPTED_QUESTION_COUNT: u32 = 3;

/// Phase of the interview dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A scripted question fetch is due or in flight.
    AwaitingQuestion,
    /// The candidate is composing an answer to a scripted question.
    AwaitingAnswer,
    /// The follow-up question fetch is due or in flight.
    AwaitingFollowup,
    /// The candidate is composing the follow-up answer.
    AwaitingFollowupAnswer,
    /// The feedback fetch is due or in flight.
    AwaitingFeedback,
    /// Terminal: feedback received, no further requests are ever issued.
    Complete,
}

/// Remote request the app layer should issue next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchNextQuestion,
    SubmitAnswer { question_number: u32, answer: String },
    FetchFollowup,
    SubmitFollowupAnswer { answer: String },
    FetchFeedback,
}

#[derive(Debug)]
pub struct TurnSequencer {
    phase: Phase,
    answers_accepted: u32,
    request_pending: bool,
    current_question_number: u32,
}

impl TurnSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingQuestion,
            answers_accepted: 0,
            request_pending: false,
            current_question_number: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Answers accepted so far. Increments by exactly one per accepted
    /// answer and never decreases.
    pub fn answers_accepted(&self) -> u32 {
        self.answers_accepted
    }

    pub fn request_pending(&self) -> bool {
        self.request_pending
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Whether the submit control should be enabled: an answer phase with
    /// nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.request_pending
            && matches!(self.phase, Phase::AwaitingAnswer | Phase::AwaitingFollowupAnswer)
    }

    /// Whether a fetch stalled (failed and settled) and can be re-attempted.
    pub fn can_retry(&self) -> bool {
        !self.request_pending
            && matches!(
                self.phase,
                Phase::AwaitingQuestion | Phase::AwaitingFollowup | Phase::AwaitingFeedback
            )
    }

    fn command(&mut self, command: Command) -> Option<Command> {
        self.request_pending = true;
        Some(command)
    }

    /// Kicks off the dialogue by requesting the first scripted question.
    pub fn start(&mut self) -> Option<Command> {
        if self.phase != Phase::AwaitingQuestion || self.request_pending {
            return None;
        }
        self.command(Command::FetchNextQuestion)
    }

    /// Re-issues the fetch for the current phase after a failed attempt.
    /// There is no automatic retry; this backs the manual control.
    pub fn retry(&mut self) -> Option<Command> {
        if !self.can_retry() {
            return None;
        }
        match self.phase {
            Phase::AwaitingQuestion => self.command(Command::FetchNextQuestion),
            Phase::AwaitingFollowup => self.command(Command::FetchFollowup),
            Phase::AwaitingFeedback => self.command(Command::FetchFeedback),
            _ => None,
        }
    }

    /// A scripted question arrived.
    ///
    /// The local counter is authoritative for phase transitions; the
    /// backend's `is_last_question` flag is only checked for agreement.
    pub fn question_received(&mut self, question: &NextQuestionResponse) {
        if self.phase != Phase::AwaitingQuestion {
            tracing::warn!(phase = ?self.phase, "Dropping question received outside fetch phase");
            return;
        }
        self.request_pending = false;
        self.current_question_number = question.question_number;

        let locally_last = self.answers_accepted + 1 == SCRIPTED_QUESTION_COUNT;
        if locally_last != question.is_last_question {
            tracing::warn!(
                question_number = question.question_number,
                backend_last = question.is_last_question,
                local_last = locally_last,
                "Backend last-question flag disagrees with local turn counter"
            );
        }

        self.phase = Phase::AwaitingAnswer;
    }

    /// The candidate submitted the current draft. Returns the submission
    /// command for whichever answer phase is active, or `None` while a
    /// request is pending, the draft is empty, or the phase takes no input.
    pub fn submit(&mut self, answer: &str) -> Option<Command> {
        if !self.can_submit() || answer.trim().is_empty() {
            return None;
        }
        let answer = answer.trim().to_string();
        match self.phase {
            Phase::AwaitingAnswer => {
                let question_number = self.current_question_number;
                self.command(Command::SubmitAnswer {
                    question_number,
                    answer,
                })
            }
            Phase::AwaitingFollowupAnswer => {
                self.command(Command::SubmitFollowupAnswer { answer })
            }
            _ => None,
        }
    }

    /// A scripted answer was accepted by the backend. Exactly here the turn
    /// counter increments; hitting the threshold swaps the next fetch from
    /// a scripted question to the follow-up.
    pub fn answer_accepted(&mut self) -> Option<Command> {
        if self.phase != Phase::AwaitingAnswer || !self.request_pending {
            return None;
        }
        self.request_pending = false;
        self.answers_accepted += 1;

        if self.answers_accepted == SCRIPTED_QUESTION_COUNT {
            self.phase = Phase::AwaitingFollowup;
            self.command(Command::FetchFollowup)
        } else {
            self.phase = Phase::AwaitingQuestion;
            self.command(Command::FetchNextQuestion)
        }
    }

    /// The follow-up question arrived.
    pub fn followup_received(&mut self) {
        if self.phase != Phase::AwaitingFollowup {
            tracing::warn!(phase = ?self.phase, "Dropping follow-up received outside fetch phase");
            return;
        }
        self.request_pending = false;
        self.phase = Phase::AwaitingFollowupAnswer;
    }

    /// The follow-up answer was accepted; feedback is requested exactly once,
    /// from this transition only.
    pub fn followup_answer_accepted(&mut self) -> Option<Command> {
        if self.phase != Phase::AwaitingFollowupAnswer || !self.request_pending {
            return None;
        }
        self.request_pending = false;
        self.phase = Phase::AwaitingFeedback;
        self.command(Command::FetchFeedback)
    }

    /// Feedback arrived; the session is complete and the machine is inert
    /// from here on.
    pub fn feedback_received(&mut self) {
        if self.phase != Phase::AwaitingFeedback {
            tracing::warn!(phase = ?self.phase, "Dropping feedback received outside fetch phase");
            return;
        }
        self.request_pending = false;
        self.phase = Phase::Complete;
    }

    /// The in-flight request settled with an error. The phase and counter
    /// are untouched so the user can re-attempt; the UI keeps the draft.
    pub fn request_failed(&mut self) {
        self.request_pending = false;
    }
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(number: u32, is_last: bool) -> NextQuestionResponse {
        NextQuestionResponse {
            question_number: number,
            question: format!("Question {}", number),
            is_last_question: is_last,
            is_complete: None,
            audio_b64: None,
        }
    }

    /// Runs the scripted portion up to (not including) the third accept.
    fn answered_twice() -> TurnSequencer {
        let mut seq = TurnSequencer::new();
        assert_eq!(seq.start(), Some(Command::FetchNextQuestion));
        for n in 1..=2 {
            seq.question_received(&question(n, false));
            assert!(seq.submit("an answer").is_some());
            assert_eq!(seq.answer_accepted(), Some(Command::FetchNextQuestion));
            assert_eq!(seq.answers_accepted(), n);
        }
        seq
    }

    #[test]
    fn full_session_flow() {
        let mut seq = TurnSequencer::new();
        assert_eq!(seq.start(), Some(Command::FetchNextQuestion));
        assert!(seq.request_pending());

        for n in 1..=3 {
            seq.question_received(&question(n, n == 3));
            assert_eq!(seq.phase(), Phase::AwaitingAnswer);
            assert!(seq.can_submit());

            let command = seq.submit("I built a Rust project last summer.");
            assert_eq!(
                command,
                Some(Command::SubmitAnswer {
                    question_number: n,
                    answer: "I built a Rust project last summer.".to_string(),
                })
            );
            assert!(!seq.can_submit());

            let next = seq.answer_accepted();
            assert_eq!(seq.answers_accepted(), n);
            if n < 3 {
                assert_eq!(next, Some(Command::FetchNextQuestion));
            } else {
                assert_eq!(next, Some(Command::FetchFollowup));
            }
        }

        seq.followup_received();
        assert_eq!(seq.phase(), Phase::AwaitingFollowupAnswer);

        let command = seq.submit("Yes, I would relocate.");
        assert_eq!(
            command,
            Some(Command::SubmitFollowupAnswer {
                answer: "Yes, I would relocate.".to_string(),
            })
        );

        assert_eq!(seq.followup_answer_accepted(), Some(Command::FetchFeedback));
        assert_eq!(seq.phase(), Phase::AwaitingFeedback);

        seq.feedback_received();
        assert!(seq.is_complete());
        assert_eq!(seq.answers_accepted(), 3);
    }

    #[test]
    fn counter_increments_once_per_accepted_answer() {
        let mut seq = TurnSequencer::new();
        seq.start();
        seq.question_received(&question(1, false));
        assert_eq!(seq.answers_accepted(), 0);
        seq.submit("answer");
        assert_eq!(seq.answers_accepted(), 0);
        seq.answer_accepted();
        assert_eq!(seq.answers_accepted(), 1);
        // A second settle for the same submission is ignored.
        assert_eq!(seq.answer_accepted(), None);
        assert_eq!(seq.answers_accepted(), 1);
    }

    #[test]
    fn followup_fires_exactly_on_third_accept() {
        let mut seq = answered_twice();
        seq.question_received(&question(3, true));
        seq.submit("final scripted answer");
        assert_eq!(seq.answer_accepted(), Some(Command::FetchFollowup));
        assert_eq!(seq.phase(), Phase::AwaitingFollowup);
        // No path back into the scripted loop.
        assert_eq!(seq.answer_accepted(), None);
        assert!(seq.submit("extra").is_none());
    }

    #[test]
    fn feedback_only_after_followup_answer() {
        let mut seq = answered_twice();
        seq.question_received(&question(3, true));
        seq.submit("answer three");
        seq.answer_accepted();
        // Feedback cannot be reached while the follow-up is unanswered.
        assert_eq!(seq.followup_answer_accepted(), None);
        seq.followup_received();
        seq.submit("followup answer");
        assert_eq!(seq.followup_answer_accepted(), Some(Command::FetchFeedback));
    }

    #[test]
    fn complete_is_terminal() {
        let mut seq = answered_twice();
        seq.question_received(&question(3, true));
        seq.submit("answer three");
        seq.answer_accepted();
        seq.followup_received();
        seq.submit("followup answer");
        seq.followup_answer_accepted();
        seq.feedback_received();
        assert!(seq.is_complete());

        assert_eq!(seq.start(), None);
        assert_eq!(seq.submit("more input"), None);
        assert_eq!(seq.retry(), None);
        assert_eq!(seq.answer_accepted(), None);
        assert!(!seq.can_submit());
    }

    #[test]
    fn submission_disabled_while_request_in_flight() {
        let mut seq = TurnSequencer::new();
        seq.start();
        assert!(!seq.can_submit());
        seq.question_received(&question(1, false));
        assert!(seq.can_submit());
        seq.submit("first");
        assert!(!seq.can_submit());
        assert_eq!(seq.submit("second"), None);
    }

    #[test]
    fn failed_submission_preserves_counter_and_phase() {
        let mut seq = TurnSequencer::new();
        seq.start();
        seq.question_received(&question(1, false));
        seq.submit("draft answer");
        seq.request_failed();

        assert_eq!(seq.answers_accepted(), 0);
        assert_eq!(seq.phase(), Phase::AwaitingAnswer);
        // The user can resubmit the same draft manually.
        assert!(seq.submit("draft answer").is_some());
    }

    #[test]
    fn failed_fetch_can_be_retried() {
        let mut seq = TurnSequencer::new();
        seq.start();
        seq.request_failed();
        assert!(seq.can_retry());
        assert_eq!(seq.retry(), Some(Command::FetchNextQuestion));

        // Same for the follow-up fetch.
        let mut seq = answered_twice();
        seq.question_received(&question(3, true));
        seq.submit("answer three");
        seq.answer_accepted();
        seq.request_failed();
        assert_eq!(seq.retry(), Some(Command::FetchFollowup));
    }

    #[test]
    fn local_counter_overrides_backend_last_flag() {
        let mut seq = TurnSequencer::new();
        seq.start();
        // Backend claims the first question is the last one.
        seq.question_received(&question(1, true));
        seq.submit("answer one");
        // The local counter still drives the transition: one accepted
        // answer means another scripted question, not the follow-up.
        assert_eq!(seq.answer_accepted(), Some(Command::FetchNextQuestion));
    }

    #[test]
    fn empty_answer_is_not_submitted() {
        let mut seq = TurnSequencer::new();
        seq.start();
        seq.question_received(&question(1, false));
        assert_eq!(seq.submit("   "), None);
        assert!(seq.can_submit());
    }
}
