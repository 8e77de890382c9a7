//! Interview domain model: stages, evaluations, messages and the transcript

pub mod evaluation;
pub mod message;
pub mod stage;
pub mod transcript;

pub use evaluation::{score_in_range, DetailedScores, Evaluation, ScoreBand, Summary, MAX_SCORE};
pub use message::{Message, Role};
pub use stage::{capitalize, Stage, CLOSING_STAGE, KNOWN_STAGES};
pub use transcript::Transcript;
