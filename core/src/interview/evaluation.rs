//! Evaluation and summary structures returned by the interview service

use super::stage::{Stage, KNOWN_STAGES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of every score
pub const MAX_SCORE: f64 = 10.0;

/// Whether a score lies in `[0, 10]`
pub fn score_in_range(score: f64) -> bool {
    (0.0..=MAX_SCORE).contains(&score)
}

/// Per-criterion scores of a single response
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailedScores {
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub clarity: f64,
    #[serde(default)]
    pub technical: f64,
}

impl DetailedScores {
    /// Criteria in display order
    pub fn criteria(&self) -> [(&'static str, f64); 4] {
        [
            ("relevance", self.relevance),
            ("depth", self.depth),
            ("clarity", self.clarity),
            ("technical", self.technical),
        ]
    }

    /// Whether every criterion lies in `[0, 10]`
    pub fn is_within_bounds(&self) -> bool {
        self.criteria()
            .iter()
            .all(|(_, score)| score_in_range(*score))
    }
}

/// Structured scoring of one candidate response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Stage the response was given in
    pub stage: Stage,

    /// Question the response answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    /// Per-criterion scores
    pub detailed_scores: DetailedScores,

    /// Weighted overall score
    pub overall_score: f64,

    /// Short feedback text
    #[serde(default)]
    pub feedback: String,
}

impl Evaluation {
    /// Whether the overall score and every criterion lie in `[0, 10]`
    pub fn is_within_bounds(&self) -> bool {
        score_in_range(self.overall_score) && self.detailed_scores.is_within_bounds()
    }

    /// Display band of the overall score
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}

/// Aggregate end-of-interview report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Stage-weighted overall score
    pub overall_score: f64,

    /// Average score per stage
    #[serde(default)]
    pub stage_scores: BTreeMap<String, f64>,

    /// Every scored response, in the order it was given
    #[serde(default)]
    pub detailed_scores: Vec<Evaluation>,

    /// Narrative summary text
    #[serde(default)]
    pub summary: String,
}

impl Summary {
    /// Stage scores ordered by interview progression
    ///
    /// Known stages come first in walk order, unknown ones follow by name.
    pub fn stage_scores_in_order(&self) -> Vec<(&str, f64)> {
        let mut ordered: Vec<(&str, f64)> = self
            .stage_scores
            .iter()
            .map(|(stage, score)| (stage.as_str(), *score))
            .collect();
        ordered.sort_by_key(|(stage, _)| {
            let rank = KNOWN_STAGES.iter().position(|known| known == stage);
            (rank.unwrap_or(KNOWN_STAGES.len()), stage.to_string())
        });
        ordered
    }

    /// Whether every score in the summary lies in `[0, 10]`
    pub fn is_within_bounds(&self) -> bool {
        score_in_range(self.overall_score)
            && self.stage_scores.values().copied().all(score_in_range)
            && self.detailed_scores.iter().all(|e| e.is_within_bounds())
    }

    /// Display band of the overall score
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}

/// Display classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    /// Classify a 0-10 score
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Excellent
        } else if score >= 6.0 {
            ScoreBand::Good
        } else if score >= 4.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}
