use std::fmt::Write;

use crate::aggregate::TotalsByLabel;
use crate::assessment::Assessment;
use crate::models::TopicSummary;
use crate::student::Student;

pub fn summarize_by_topic(assessment: &Assessment, students: &[Student]) -> Vec<TopicSummary> {
    let student_totals: Vec<TotalsByLabel> =
        students.iter().map(Student::totals_by_topic).collect();

    assessment
        .topic_totals()
        .iter()
        .map(|(topic, possible)| {
            let achieved: f64 = student_totals
                .iter()
                .map(|totals| totals.get(topic).unwrap_or(0.0))
                .sum();
            let mean_score = if student_totals.is_empty() {
                0.0
            } else {
                achieved / student_totals.len() as f64
            };

            TopicSummary {
                topic: topic.to_string(),
                possible,
                mean_score,
                mean_ratio: if possible == 0.0 {
                    0.0
                } else {
                    mean_score / possible
                },
            }
        })
        .collect()
}

pub fn build_breakdown(assessment: &Assessment, students: &[Student]) -> String {
    let summaries = summarize_by_topic(assessment, students);
    let mut output = String::new();

    let _ = writeln!(output, "# Assessment Breakdown");
    let _ = writeln!(
        output,
        "{} questions, {} marks available, {} students",
        assessment.questions().len(),
        format_amount(assessment.total_possible()),
        students.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Questions");
    for question in assessment.questions() {
        let _ = writeln!(
            output,
            "{}. {} ({}, {}): {}",
            question.index + 1,
            question.label,
            question.topic,
            question.question_type,
            format_amount(question.max_score)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Marks by Topic");
    write_totals(&mut output, assessment.topic_totals());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Marks by Question Type");
    write_totals(&mut output, assessment.type_totals());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Class Averages");

    if students.is_empty() {
        let _ = writeln!(output, "No students recorded for this assessment.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {:.1} of {} ({})",
                summary.topic,
                summary.mean_score,
                format_amount(summary.possible),
                format_ratio(summary.mean_ratio)
            );
        }
    }

    for student in students {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", student.full_name());
        write_achieved(
            &mut output,
            &student.totals_by_topic(),
            assessment.topic_totals(),
        );
        write_achieved(
            &mut output,
            &student.totals_by_type(),
            assessment.type_totals(),
        );
    }

    output
}

fn write_totals(output: &mut String, totals: &TotalsByLabel) {
    for (label, total) in totals.iter() {
        let _ = writeln!(output, "- {}: {}", label, format_amount(total));
    }
}

fn write_achieved(output: &mut String, achieved: &TotalsByLabel, possible: &TotalsByLabel) {
    for (label, total) in possible.iter() {
        let score = achieved.get(label).unwrap_or(0.0);
        let ratio = if total == 0.0 { 0.0 } else { score / total };
        let _ = writeln!(
            output,
            "- {}: {} of {} ({})",
            label,
            format_amount(score),
            format_amount(total),
            format_ratio(ratio)
        );
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn format_ratio(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
