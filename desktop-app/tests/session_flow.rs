//! Drives a full scripted session through the real client and sequencer
//! against a mock backend: three question/answer round-trips, one follow-up
//! round-trip, then feedback.

use mockito::Matcher;
use prepdeck_desktop_app::api_client::ApiClient;
use prepdeck_desktop_app::sequencer::{Command, TurnSequencer};

fn authed_client(base_url: String) -> ApiClient {
    let mut client = ApiClient::new(base_url);
    client.set_access_token(Some("token-123".to_string()));
    client
}

#[tokio::test]
async fn scripted_session_runs_to_completion() {
    let mut server = mockito::Server::new_async().await;

    let question_mock = server
        .mock("GET", "/session/sess-1/next")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"question_number":1,"question":"Tell me about yourself","is_last_question":false}"#,
        )
        .expect(3)
        .create_async()
        .await;

    let answer_mock = server
        .mock("POST", "/session/sess-1/answer")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Answer saved"}"#)
        .expect(3)
        .create_async()
        .await;

    let followup_mock = server
        .mock("POST", "/session/sess-1/followup")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"follow_up":"When could you start?"}"#)
        .expect(1)
        .create_async()
        .await;

    let followup_answer_mock = server
        .mock("POST", "/session/sess-1/followup-answer")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Answer saved"}"#)
        .expect(1)
        .create_async()
        .await;

    let feedback_mock = server
        .mock("POST", "/session/sess-1/feedback")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"feedback":"Strong answers, watch the rambling.","score":8,
                "rubric":{"clarity":4,"structure":4,"relevance":5,"conciseness":3}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let complete_mock = server
        .mock("POST", "/session/sess-1/complete")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Session completed"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let session_id = "sess-1";
    let mut seq = TurnSequencer::new();
    let mut transcript: Vec<String> = Vec::new();
    let mut final_score = None;

    let mut command = seq.start();
    let mut steps = 0;
    while let Some(current) = command.take() {
        steps += 1;
        assert!(steps <= 9, "sequencer issued more commands than the dialogue needs");
        match current {
            Command::FetchNextQuestion => {
                let question = client.next_question(session_id).await.unwrap();
                transcript.push(format!("Q: {}", question.question));
                seq.question_received(&question);
                command = seq.submit("I led a team project in my systems course.");
            }
            Command::SubmitAnswer {
                question_number,
                answer,
            } => {
                client
                    .submit_answer(session_id, question_number, &answer)
                    .await
                    .unwrap();
                transcript.push(format!("A: {}", answer));
                command = seq.answer_accepted();
            }
            Command::FetchFollowup => {
                let followup = client.followup(session_id).await.unwrap();
                transcript.push(format!("Q: {}", followup.follow_up));
                seq.followup_received();
                command = seq.submit("I am available starting June.");
            }
            Command::SubmitFollowupAnswer { answer } => {
                client
                    .submit_followup_answer(session_id, &answer)
                    .await
                    .unwrap();
                transcript.push(format!("A: {}", answer));
                command = seq.followup_answer_accepted();
            }
            Command::FetchFeedback => {
                let feedback = client.feedback(session_id).await.unwrap();
                final_score = Some(feedback.score);
                seq.feedback_received();
                command = None;
            }
        }
    }

    assert!(seq.is_complete());
    assert_eq!(seq.answers_accepted(), 3);
    // 3 scripted Q/A pairs plus the follow-up pair.
    assert_eq!(transcript.len(), 8);
    assert_eq!(final_score, Some(8));

    client.complete_session(session_id).await.unwrap();

    question_mock.assert_async().await;
    answer_mock.assert_async().await;
    followup_mock.assert_async().await;
    followup_answer_mock.assert_async().await;
    feedback_mock.assert_async().await;
    complete_mock.assert_async().await;
}

#[tokio::test]
async fn rejected_answer_leaves_the_turn_open() {
    let mut server = mockito::Server::new_async().await;

    let _question_mock = server
        .mock("GET", "/session/sess-2/next")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"question_number":1,"question":"Why this company?","is_last_question":false}"#,
        )
        .create_async()
        .await;

    let failing_answer_mock = server
        .mock("POST", "/session/sess-2/answer")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"grader unavailable"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = authed_client(server.url());
    let mut seq = TurnSequencer::new();

    assert_eq!(seq.start(), Some(Command::FetchNextQuestion));
    let question = client.next_question("sess-2").await.unwrap();
    seq.question_received(&question);

    let command = seq.submit("Because of the mentorship culture.");
    let Some(Command::SubmitAnswer {
        question_number,
        answer,
    }) = command
    else {
        panic!("expected a submission command");
    };

    let error = client
        .submit_answer("sess-2", question_number, &answer)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("grader unavailable"));
    seq.request_failed();

    // The counter did not move and the same draft can be resubmitted.
    assert_eq!(seq.answers_accepted(), 0);
    assert!(seq.can_submit());
    assert!(seq.submit(&answer).is_some());

    failing_answer_mock.assert_async().await;
}
