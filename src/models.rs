use serde::Serialize;

/// One row of the setup sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupRow {
    pub question: String,
    pub topic: String,
    pub question_type: String,
    pub total: f64,
}

impl SetupRow {
    pub fn new(question: &str, topic: &str, question_type: &str, total: f64) -> Self {
        Self {
            question: question.to_string(),
            topic: topic.to_string(),
            question_type: question_type.to_string(),
            total,
        }
    }
}

/// One row of the students sheet. Scores are in setup question order.
///
/// `row` is the 1-based data row in the sheet, counting blank rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub row: usize,
    pub surname: String,
    pub first_name: String,
    pub scores: Vec<f64>,
}

impl StudentRow {
    pub fn new(row: usize, surname: &str, first_name: &str, scores: Vec<f64>) -> Self {
        Self {
            row,
            surname: surname.to_string(),
            first_name: first_name.to_string(),
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub index: usize,
    pub label: String,
    pub topic: String,
    pub question_type: String,
    pub max_score: f64,
}

/// A student's score on a single question, tagged with that question's labels.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question: String,
    pub topic: String,
    pub question_type: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub fullname: String,
    pub report: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub topic: String,
    pub possible: f64,
    pub mean_score: f64,
    pub mean_ratio: f64,
}
