//! End-to-end session flow against a mock interview service

use interview_core::error::{Error, SessionError};
use interview_core::output::{BufferedOutput, SessionEvent};
use interview_core::{
    EndReason, ResolvedClientConfig, RespondOutcome, Role, ScoreBand, SessionBuilder,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_interview(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/interview/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "abc123",
            "message": "Welcome! Tell me about yourself.",
            "stage": "introduction"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/interview/respond"))
        .and(body_json(json!({
            "session_id": "abc123",
            "response": "I build distributed systems."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "Describe a hard bug you fixed.",
            "stage": "technical",
            "evaluation": {
                "stage": "introduction",
                "detailed_scores": {"relevance": 8, "depth": 7, "clarity": 9, "technical": 7},
                "overall_score": 7.75,
                "feedback": "Clear and relevant."
            }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/interview/respond"))
        .and(body_json(json!({
            "session_id": "abc123",
            "response": "A race in our cache invalidation."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "Thank you, that concludes our interview.",
            "stage": "closing",
            "evaluation": {
                "stage": "technical",
                "detailed_scores": {"relevance": 9, "depth": 8, "clarity": 8, "technical": 9},
                "overall_score": 8.5,
                "feedback": "Strong technical depth."
            }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/interview/abc123/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "overall_score": 8.1,
            "stage_scores": {"technical": 8.5, "introduction": 7.75},
            "detailed_scores": [],
            "summary": "A well-rounded candidate."
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_interview_runs_to_closing_summary() {
    let server = MockServer::start().await;
    mount_interview(&server).await;

    let output = Arc::new(BufferedOutput::new());
    let mut session = SessionBuilder::new(ResolvedClientConfig::new(server.uri()))
        .with_output(output.clone())
        .build()
        .unwrap();

    session.start().await.unwrap();
    assert_eq!(session.session_id(), Some("abc123"));

    let outcome = session
        .respond("I build distributed systems.")
        .await
        .unwrap();
    assert!(matches!(outcome, RespondOutcome::Continue(_)));

    let outcome = session
        .respond("A race in our cache invalidation.")
        .await
        .unwrap();
    let summary = match outcome {
        RespondOutcome::Closing { summary, .. } => summary.unwrap(),
        other => panic!("expected closing, got {:?}", other),
    };

    assert!((0.0..=10.0).contains(&summary.overall_score));
    assert_eq!(summary.band(), ScoreBand::Excellent);
    assert_eq!(
        summary.stage_scores_in_order(),
        vec![("introduction", 7.75), ("technical", 8.5)]
    );
    assert_eq!(session.state().end_reason(), Some(EndReason::Closing));

    let roles: Vec<Role> = session
        .transcript()
        .messages()
        .iter()
        .map(|m| m.role)
        .collect();
    assert_eq!(
        roles,
        vec![
            Role::Interviewer,
            Role::Candidate,
            Role::Interviewer,
            Role::Candidate,
            Role::Interviewer
        ]
    );
    assert_eq!(session.transcript().evaluations().count(), 2);

    let err = session.respond("Anything else?").await.unwrap_err();
    assert!(matches!(err, Error::Session(SessionError::Ended { .. })));

    let ended = SessionEvent::SessionEnded {
        session_id: "abc123".to_string(),
        reason: EndReason::Closing,
    };
    assert!(output.take().contains(&ended));
}

#[tokio::test]
async fn test_attached_session_can_be_ended() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/interview/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Interview ended"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = SessionBuilder::new(ResolvedClientConfig::new(server.uri()))
        .attach("abc123")
        .unwrap();

    assert_eq!(session.end().await.unwrap(), None);
    assert_eq!(session.state().end_reason(), Some(EndReason::Terminated));
}
