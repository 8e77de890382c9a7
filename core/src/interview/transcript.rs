//! Append-only interview transcript

use super::evaluation::Evaluation;
use super::message::{Message, Role};
use serde::{Deserialize, Serialize};

/// Ordered list of interview messages
///
/// Messages are only ever appended. The one permitted change to an existing
/// entry is filling the empty evaluation slot of a candidate message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Attach an evaluation to the candidate message at `index`
    ///
    /// Returns `false` without changing anything when the entry is missing,
    /// belongs to the interviewer, or already carries an evaluation.
    pub fn attach_evaluation(&mut self, index: usize, evaluation: Evaluation) -> bool {
        match self.messages.get_mut(index) {
            Some(message) if message.role == Role::Candidate && message.evaluation.is_none() => {
                message.evaluation = Some(evaluation);
                true
            }
            _ => false,
        }
    }

    /// All messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate over the evaluations attached so far, oldest first
    pub fn evaluations(&self) -> impl Iterator<Item = &Evaluation> {
        self.messages.iter().filter_map(|m| m.evaluation.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::{DetailedScores, Stage};

    fn evaluation() -> Evaluation {
        Evaluation {
            stage: Stage::from("introduction"),
            question: None,
            detailed_scores: DetailedScores::default(),
            overall_score: 6.0,
            feedback: "ok".to_string(),
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Message::interviewer("Hello"));
        let idx = transcript.push(Message::candidate("Hi"));

        assert_eq!(idx, 1);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "Hello");
        assert_eq!(transcript.last().unwrap().role, Role::Candidate);
    }

    #[test]
    fn test_evaluation_only_attaches_to_candidate_once() {
        let mut transcript = Transcript::new();
        let interviewer = transcript.push(Message::interviewer("Question?"));
        let candidate = transcript.push(Message::candidate("Answer"));

        assert!(!transcript.attach_evaluation(interviewer, evaluation()));
        assert!(transcript.attach_evaluation(candidate, evaluation()));
        assert!(!transcript.attach_evaluation(candidate, evaluation()));
        assert!(!transcript.attach_evaluation(42, evaluation()));

        assert!(transcript.messages()[interviewer].evaluation.is_none());
        assert_eq!(transcript.evaluations().count(), 1);
    }
}
