//! Terminal formatting for evaluations and summaries

use colored::{ColoredString, Colorize};
use interview_core::interview::{capitalize, Evaluation, ScoreBand, Stage, Summary};

/// Color a summary score according to its band
pub fn color_score(text: String, score: f64) -> ColoredString {
    match ScoreBand::from_score(score) {
        ScoreBand::Excellent => text.green().bold(),
        ScoreBand::Good => text.cyan(),
        ScoreBand::Fair => text.yellow(),
        ScoreBand::Poor => text.red(),
    }
}

/// Color a per-response score: green from 7, yellow from 5, red below
pub fn color_response_score(text: String, score: f64) -> ColoredString {
    if score >= 7.0 {
        text.green()
    } else if score >= 5.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Render a 0-10 score as `7.5/10`
pub fn format_score(score: f64) -> String {
    format!("{:.1}/10", score)
}

/// Formatter for per-response evaluation cards
pub struct EvaluationFormatter;

impl EvaluationFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format one evaluation as an indented card
    pub fn format(&self, evaluation: &Evaluation) -> String {
        let mut lines = Vec::new();
        let overall = evaluation.overall_score;
        lines.push(format!(
            "  ⎿  {} {} ({})",
            "Score".bold(),
            color_response_score(format_score(overall), overall),
            evaluation.band().label()
        ));

        let criteria = evaluation
            .detailed_scores
            .criteria()
            .iter()
            .map(|(name, score)| {
                format!(
                    "{} {}",
                    capitalize(name).dimmed(),
                    color_response_score(format!("{:.1}", score), *score)
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("     {}", criteria));

        if !evaluation.feedback.trim().is_empty() {
            lines.push(format!("     {}", evaluation.feedback.trim().italic()));
        }

        lines.join("\n")
    }
}

impl Default for EvaluationFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Formatter for the aggregate interview summary
pub struct SummaryFormatter {
    evaluations: EvaluationFormatter,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self {
            evaluations: EvaluationFormatter::new(),
        }
    }

    /// Format a full summary: overall score, stage breakdown, per-question details
    pub fn format(&self, summary: &Summary) -> String {
        let mut out = Vec::new();
        out.push(format!("{}", "Interview Summary".bold().underline()));
        let overall = summary.overall_score;
        out.push(format!(
            "Overall: {} ({})",
            color_score(format_score(overall), overall),
            summary.band().label()
        ));

        let stages = summary.stage_scores_in_order();
        if !stages.is_empty() {
            out.push(String::new());
            out.push(format!("{}", "Stage scores".bold()));
            for (stage, score) in stages {
                out.push(format!(
                    "  {:<14} {}",
                    Stage::from(stage).display_name(),
                    color_score(format_score(score), score)
                ));
            }
        }

        if !summary.detailed_scores.is_empty() {
            out.push(String::new());
            out.push(format!("{}", "Responses".bold()));
            for (index, evaluation) in summary.detailed_scores.iter().enumerate() {
                let question = evaluation
                    .question
                    .as_deref()
                    .map(|q| format!(": {}", q))
                    .unwrap_or_default();
                out.push(format!(
                    "{}. [{}]{}",
                    index + 1,
                    evaluation.stage.display_name(),
                    question
                ));
                out.push(self.evaluations.format(evaluation));
            }
        }

        if !summary.summary.trim().is_empty() {
            out.push(String::new());
            out.push(summary.summary.trim().to_string());
        }

        out.join("\n")
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}
