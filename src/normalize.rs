use crate::error::ReportError;
use crate::models::{Question, QuestionResult, StudentRow};
use crate::student::Student;

/// Zips every student's scores against the setup questions, preserving column order.
pub fn build_students(
    questions: &[Question],
    rows: &[StudentRow],
) -> Result<Vec<Student>, ReportError> {
    rows.iter().map(|row| build_student(questions, row)).collect()
}

fn build_student(questions: &[Question], row: &StudentRow) -> Result<Student, ReportError> {
    if row.scores.len() != questions.len() {
        return Err(ReportError::ShapeMismatch {
            row: row.row,
            student: format!("{}, {}", row.surname.trim(), row.first_name.trim()),
            expected: questions.len(),
            found: row.scores.len(),
        });
    }

    let results = questions
        .iter()
        .zip(row.scores.iter())
        .map(|(question, score)| QuestionResult {
            question: question.label.clone(),
            topic: question.topic.clone(),
            question_type: question.question_type.clone(),
            score: *score,
        })
        .collect();

    Ok(Student::new(&row.surname, &row.first_name, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Assessment;
    use crate::models::SetupRow;

    fn sample_assessment() -> Assessment {
        Assessment::from_setup(&[
            SetupRow::new("Q1", "Algebra", "r", 10.0),
            SetupRow::new("Q2", "Algebra", "nr", 10.0),
            SetupRow::new("Q3", "Geometry", "r", 10.0),
        ])
        .expect("valid setup")
    }

    #[test]
    fn scores_align_with_questions() {
        let assessment = sample_assessment();
        let rows = vec![StudentRow::new(1, "Smith", "Jane", vec![10.0, 10.0, 3.0])];

        let students = build_students(assessment.questions(), &rows).expect("shapes match");
        assert_eq!(students.len(), 1);

        let results = students[0].results();
        assert_eq!(results[2].question, "Q3");
        assert_eq!(results[2].topic, "Geometry");
        assert_eq!(results[2].question_type, "r");
        assert_eq!(results[2].score, 3.0);
    }

    #[test]
    fn short_row_reports_shape_mismatch() {
        let assessment = sample_assessment();
        let rows = vec![
            StudentRow::new(1, "Smith", "Jane", vec![10.0, 10.0, 3.0]),
            StudentRow::new(4, "Lee", "Avery", vec![4.0, 5.0]),
        ];

        match build_students(assessment.questions(), &rows) {
            Err(ReportError::ShapeMismatch {
                row,
                student,
                expected,
                found,
            }) => {
                assert_eq!(row, 4);
                assert_eq!(student, "Lee, Avery");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn no_student_rows_gives_no_students() {
        let assessment = sample_assessment();
        let students = build_students(assessment.questions(), &[]).expect("nothing to check");
        assert!(students.is_empty());
    }
}
