use crate::aggregate::{totals_by_label, TotalsByLabel};
use crate::models::QuestionResult;

/// One student's results for a single assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    full_name: String,
    preferred_name: String,
    results: Vec<QuestionResult>,
}

impl Student {
    pub fn new(surname: &str, first_name: &str, results: Vec<QuestionResult>) -> Self {
        Self {
            full_name: format!("{}, {}", surname.trim(), first_name.trim()),
            preferred_name: preferred_name(first_name),
            results,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn preferred_name(&self) -> &str {
        &self.preferred_name
    }

    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    pub fn total_score(&self) -> f64 {
        self.results.iter().map(|result| result.score).sum()
    }

    pub fn by_question(&self) -> TotalsByLabel {
        totals_by_label(
            self.results
                .iter()
                .map(|result| (result.question.as_str(), result.score)),
        )
    }

    pub fn totals_by_topic(&self) -> TotalsByLabel {
        totals_by_label(
            self.results
                .iter()
                .map(|result| (result.topic.as_str(), result.score)),
        )
    }

    pub fn totals_by_type(&self) -> TotalsByLabel {
        totals_by_label(
            self.results
                .iter()
                .map(|result| (result.question_type.as_str(), result.score)),
        )
    }
}

/// Extracts a parenthesised nickname, e.g. "Robert (Bob)" gives "Bob".
pub fn preferred_name(first_name: &str) -> String {
    let trimmed = first_name.trim();

    let nickname = trimmed.split_once('(').and_then(|(_, rest)| {
        let inner = rest.split(')').next().unwrap_or(rest).trim();
        (!inner.is_empty()).then_some(inner)
    });

    match nickname {
        Some(name) => name.to_string(),
        None => trimmed.to_string(),
    }
}
