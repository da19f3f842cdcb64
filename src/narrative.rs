use tracing::warn;

use crate::classify::{TopicGroups, TypeBand, TypeDescriptors};
use crate::error::ReportError;
use crate::student::Student;

pub const CLOSING: &str = "Keep reviewing your feedback from this assessment and bring any questions to class so we can work through them together.";

/// What to do when the routine/non-routine pair has no commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnhandledPolicy {
    #[default]
    Reject,
    Omit,
}

impl UnhandledPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" | "error" => Some(UnhandledPolicy::Reject),
            "omit" | "skip" => Some(UnhandledPolicy::Omit),
            _ => None,
        }
    }
}

/// Commentary on how the student handled routine versus non-routine questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNarrative {
    RoutineWeak,
    BothModerate,
    NovelStrongRoutineWeak,
    RoutineStrongNovelWeak,
    BothStrong,
}

impl TypeNarrative {
    /// Picks the commentary for a (routine, non-routine) pair.
    ///
    /// A strong non-routine result over a "some" routine result reads as
    /// novel-strong-routine-weak. Only a "some" routine result over a "limited"
    /// non-routine result has no commentary.
    pub fn select(descriptors: TypeDescriptors) -> Result<Self, ReportError> {
        match (descriptors.routine, descriptors.non_routine) {
            (TypeBand::Limited, TypeBand::Limited | TypeBand::Moderate) => {
                Ok(TypeNarrative::RoutineWeak)
            }
            (TypeBand::Limited | TypeBand::Moderate, TypeBand::High) => {
                Ok(TypeNarrative::NovelStrongRoutineWeak)
            }
            (TypeBand::Moderate, TypeBand::Moderate) => Ok(TypeNarrative::BothModerate),
            (TypeBand::High, TypeBand::Limited | TypeBand::Moderate) => {
                Ok(TypeNarrative::RoutineStrongNovelWeak)
            }
            (TypeBand::High, TypeBand::High) => Ok(TypeNarrative::BothStrong),
            (TypeBand::Moderate, TypeBand::Limited) => {
                Err(ReportError::UnhandledTypeCombination {
                    routine: descriptors.routine.label(),
                    non_routine: descriptors.non_routine.label(),
                })
            }
        }
    }

    pub fn paragraph(self) -> &'static str {
        match self {
            TypeNarrative::RoutineWeak => {
                "Your results on routine questions show that some of the core skills are not yet secure. Practise the standard procedures from class until you can complete them accurately without notes, as these skills are the foundation for the harder problems."
            }
            TypeNarrative::BothModerate => {
                "You showed some success on both routine and non-routine questions. To improve, make sure each standard procedure is completely reliable, then practise applying those procedures to unfamiliar problems by identifying what the question is really asking before you begin."
            }
            TypeNarrative::NovelStrongRoutineWeak => {
                "You handled the non-routine problems well, which shows good reasoning, but marks were lost on routine questions. Take more care with the standard procedures by checking each step of your working, as careless errors are costing you marks you are clearly capable of earning."
            }
            TypeNarrative::RoutineStrongNovelWeak => {
                "You have a high level of skill with routine questions, but found the non-routine problems more challenging. Work on applying what you know to unfamiliar situations by breaking problems into smaller steps and explaining your reasoning as you go."
            }
            TypeNarrative::BothStrong => {
                "You achieved highly on both routine and non-routine questions, showing that you can apply your skills accurately and flexibly. Continue to challenge yourself with extension problems and focus on communicating your reasoning clearly and concisely."
            }
        }
    }
}

/// Joins items as "X", "X, and Y" or "X, Y, and Z".
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|item| item.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

pub fn topic_summary(preferred_name: &str, groups: &TopicGroups) -> String {
    let clauses: Vec<String> = groups
        .iter()
        .map(|(band, topics)| {
            format!(
                "{} {} understanding of {}",
                band.article(),
                band.label(),
                join_list(topics)
            )
        })
        .collect();

    format!(
        "{}, you have demonstrated {}.",
        preferred_name,
        join_list(&clauses)
    )
}

/// Builds the full report: topic summary, type commentary, closing sentence.
pub fn compose(
    student: &Student,
    groups: &TopicGroups,
    descriptors: TypeDescriptors,
    policy: UnhandledPolicy,
) -> Result<String, ReportError> {
    let mut sentences = vec![topic_summary(student.preferred_name(), groups)];

    match TypeNarrative::select(descriptors) {
        Ok(narrative) => sentences.push(narrative.paragraph().to_string()),
        Err(err) if policy == UnhandledPolicy::Omit => {
            warn!(
                student = student.full_name(),
                routine = descriptors.routine.label(),
                non_routine = descriptors.non_routine.label(),
                "omitting type commentary: {err}"
            );
        }
        Err(err) => return Err(err),
    }

    sentences.push(CLOSING.to_string());
    Ok(sentences.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::LabelRatio;
    use crate::classify::classify_topics;

    fn groups(entries: &[(&str, f64)]) -> TopicGroups {
        let ratios: Vec<LabelRatio> = entries
            .iter()
            .map(|(label, ratio)| LabelRatio {
                label: label.to_string(),
                ratio: *ratio,
            })
            .collect();
        classify_topics(&ratios)
    }

    fn descriptors(routine: TypeBand, non_routine: TypeBand) -> TypeDescriptors {
        TypeDescriptors {
            routine,
            non_routine,
        }
    }

    #[test]
    fn join_list_uses_serial_comma() {
        assert_eq!(join_list::<&str>(&[]), "");
        assert_eq!(join_list(&["Algebra"]), "Algebra");
        assert_eq!(join_list(&["Algebra", "Geometry"]), "Algebra, and Geometry");
        assert_eq!(
            join_list(&["Algebra", "Geometry", "Statistics"]),
            "Algebra, Geometry, and Statistics"
        );
    }

    #[test]
    fn single_band_summary() {
        let summary = topic_summary("Jane", &groups(&[("Algebra", 0.6)]));
        assert_eq!(
            summary,
            "Jane, you have demonstrated a satisfactory understanding of Algebra."
        );
    }

    #[test]
    fn multiple_bands_are_joined_weakest_first() {
        let summary = topic_summary(
            "Jane",
            &groups(&[("Algebra", 1.0), ("Geometry", 0.3), ("Statistics", 0.75)]),
        );
        assert_eq!(
            summary,
            "Jane, you have demonstrated a poor understanding of Geometry, an advanced understanding of Statistics, and an exceptional understanding of Algebra."
        );
    }

    #[test]
    fn every_type_pair_is_decided() {
        let bands = [TypeBand::Limited, TypeBand::Moderate, TypeBand::High];
        let mut handled = 0;

        for routine in bands {
            for non_routine in bands {
                match TypeNarrative::select(descriptors(routine, non_routine)) {
                    Ok(_) => handled += 1,
                    Err(ReportError::UnhandledTypeCombination { .. }) => {}
                    Err(other) => panic!("unexpected error {other:?}"),
                }
            }
        }

        assert_eq!(handled, 8);
    }

    #[test]
    fn selected_narratives_match_pairs() {
        assert_eq!(
            TypeNarrative::select(descriptors(TypeBand::High, TypeBand::High)).ok(),
            Some(TypeNarrative::BothStrong)
        );
        assert_eq!(
            TypeNarrative::select(descriptors(TypeBand::Limited, TypeBand::High)).ok(),
            Some(TypeNarrative::NovelStrongRoutineWeak)
        );
        assert_eq!(
            TypeNarrative::select(descriptors(TypeBand::Moderate, TypeBand::High)).ok(),
            Some(TypeNarrative::NovelStrongRoutineWeak)
        );
        assert_eq!(
            TypeNarrative::select(descriptors(TypeBand::High, TypeBand::Limited)).ok(),
            Some(TypeNarrative::RoutineStrongNovelWeak)
        );
        assert_eq!(
            TypeNarrative::select(descriptors(TypeBand::Moderate, TypeBand::Moderate)).ok(),
            Some(TypeNarrative::BothModerate)
        );
    }

    #[test]
    fn compose_joins_three_sentences() {
        let student = Student::new("Smith", "Jane", Vec::new());
        let report = compose(
            &student,
            &groups(&[("Algebra", 0.9)]),
            descriptors(TypeBand::High, TypeBand::High),
            UnhandledPolicy::Reject,
        )
        .expect("handled pair");

        assert_eq!(
            report,
            format!(
                "Jane, you have demonstrated an exceptional understanding of Algebra. {} {}",
                TypeNarrative::BothStrong.paragraph(),
                CLOSING
            )
        );
    }

    #[test]
    fn unhandled_pair_is_rejected_by_default() {
        let student = Student::new("Smith", "Jane", Vec::new());
        let result = compose(
            &student,
            &groups(&[("Algebra", 0.6)]),
            descriptors(TypeBand::Moderate, TypeBand::Limited),
            UnhandledPolicy::default(),
        );

        match result {
            Err(ReportError::UnhandledTypeCombination {
                routine,
                non_routine,
            }) => {
                assert_eq!(routine, "some");
                assert_eq!(non_routine, "limited");
            }
            other => panic!("expected unhandled combination, got {other:?}"),
        }
    }

    #[test]
    fn omit_policy_drops_only_the_commentary() {
        let student = Student::new("Smith", "Jane", Vec::new());
        let report = compose(
            &student,
            &groups(&[("Algebra", 0.6)]),
            descriptors(TypeBand::Moderate, TypeBand::Limited),
            UnhandledPolicy::Omit,
        )
        .expect("omitted commentary");

        assert_eq!(
            report,
            format!("Jane, you have demonstrated a satisfactory understanding of Algebra. {CLOSING}")
        );
    }

    #[test]
    fn policy_parses_known_values() {
        assert_eq!(UnhandledPolicy::parse("Reject"), Some(UnhandledPolicy::Reject));
        assert_eq!(UnhandledPolicy::parse(" omit "), Some(UnhandledPolicy::Omit));
        assert_eq!(UnhandledPolicy::parse("ignore"), None);
    }
}
