use crate::aggregate::{totals_by_label, TotalsByLabel};
use crate::classify::QuestionType;
use crate::error::ReportError;
use crate::models::{Question, SetupRow};

/// Validated setup for one assessment with its maximum totals per topic and type.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    questions: Vec<Question>,
    topic_totals: TotalsByLabel,
    type_totals: TotalsByLabel,
}

impl Assessment {
    /// Type labels are stored as their canonical "r"/"nr" codes.
    pub fn from_setup(rows: &[SetupRow]) -> Result<Self, ReportError> {
        if rows.is_empty() {
            return Err(ReportError::EmptyAssessment);
        }

        let questions = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let question_type = QuestionType::from_code(&row.question_type).ok_or_else(|| {
                    ReportError::UnknownQuestionType {
                        question: row.question.clone(),
                        label: row.question_type.clone(),
                    }
                })?;

                Ok(Question {
                    index,
                    label: row.question.trim().to_string(),
                    topic: row.topic.trim().to_string(),
                    question_type: question_type.code().to_string(),
                    max_score: row.total,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        let topic_totals = totals_by_label(
            questions
                .iter()
                .map(|question| (question.topic.as_str(), question.max_score)),
        );
        let type_totals = totals_by_label(
            questions
                .iter()
                .map(|question| (question.question_type.as_str(), question.max_score)),
        );

        Ok(Self {
            questions,
            topic_totals,
            type_totals,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn topic_totals(&self) -> &TotalsByLabel {
        &self.topic_totals
    }

    pub fn type_totals(&self) -> &TotalsByLabel {
        &self.type_totals
    }

    pub fn total_possible(&self) -> f64 {
        self.questions.iter().map(|question| question.max_score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_setup() -> Vec<SetupRow> {
        vec![
            SetupRow::new("Q1", "Algebra", "r", 10.0),
            SetupRow::new("Q2", "Algebra", "nr", 10.0),
            SetupRow::new("Q3", "Geometry", "R", 10.0),
        ]
    }

    #[test]
    fn totals_cover_every_question_once() {
        let assessment = Assessment::from_setup(&sample_setup()).expect("valid setup");

        assert_eq!(assessment.topic_totals().get("Algebra"), Some(20.0));
        assert_eq!(assessment.topic_totals().get("Geometry"), Some(10.0));
        assert_eq!(assessment.type_totals().get("r"), Some(20.0));
        assert_eq!(assessment.type_totals().get("nr"), Some(10.0));
        assert_eq!(assessment.topic_totals().sum(), assessment.total_possible());
        assert_eq!(assessment.type_totals().sum(), assessment.total_possible());
    }

    #[test]
    fn questions_keep_setup_order() {
        let assessment = Assessment::from_setup(&sample_setup()).expect("valid setup");
        let labels: Vec<&str> = assessment
            .questions()
            .iter()
            .map(|question| question.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(assessment.questions()[2].index, 2);
        assert_eq!(assessment.questions()[2].question_type, "r");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let rows = vec![SetupRow::new("Q1", "Algebra", "essay", 5.0)];
        match Assessment::from_setup(&rows) {
            Err(ReportError::UnknownQuestionType { question, label }) => {
                assert_eq!(question, "Q1");
                assert_eq!(label, "essay");
            }
            other => panic!("expected unknown type, got {other:?}"),
        }
    }

    #[test]
    fn empty_setup_is_rejected() {
        assert!(matches!(
            Assessment::from_setup(&[]),
            Err(ReportError::EmptyAssessment)
        ));
    }
}
