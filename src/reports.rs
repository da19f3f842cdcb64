use tracing::debug;

use crate::aggregate::percentages;
use crate::assessment::Assessment;
use crate::classify::{classify_topics, classify_types};
use crate::error::ReportError;
use crate::models::{SetupRow, StudentReport, StudentRow};
use crate::narrative::{compose, UnhandledPolicy};
use crate::normalize::build_students;
use crate::student::Student;

/// Produces one report per student row, in input order.
pub fn generate_reports(
    setup: &[SetupRow],
    students: &[StudentRow],
    policy: UnhandledPolicy,
) -> Result<Vec<StudentReport>, ReportError> {
    let assessment = Assessment::from_setup(setup)?;
    let students = build_students(assessment.questions(), students)?;

    students
        .iter()
        .map(|student| {
            Ok(StudentReport {
                fullname: student.full_name().to_string(),
                report: report_for(&assessment, student, policy)?,
            })
        })
        .collect()
}

pub fn report_for(
    assessment: &Assessment,
    student: &Student,
    policy: UnhandledPolicy,
) -> Result<String, ReportError> {
    let topic_ratios = percentages(&student.totals_by_topic(), assessment.topic_totals())?;
    let type_ratios = percentages(&student.totals_by_type(), assessment.type_totals())?;

    let groups = classify_topics(&topic_ratios);
    let descriptors = classify_types(&type_ratios)?;

    let report = compose(student, &groups, descriptors, policy)?;
    debug!(
        student = student.full_name(),
        routine = descriptors.routine.label(),
        non_routine = descriptors.non_routine.label(),
        "composed report"
    );
    Ok(report)
}
