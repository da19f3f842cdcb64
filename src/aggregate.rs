use std::collections::BTreeMap;

use crate::error::ReportError;

/// Summed amounts keyed by topic or type label, iterated in ascending label order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsByLabel(BTreeMap<String, f64>);

impl TotalsByLabel {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, total)| (label.as_str(), *total))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Achievement ratio for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRatio {
    pub label: String,
    pub ratio: f64,
}

/// Sums each amount under its label. Used for assessment maxima and student scores alike.
pub fn totals_by_label<'a, I>(pairs: I) -> TotalsByLabel
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut totals = BTreeMap::new();

    for (label, amount) in pairs {
        *totals.entry(label.to_string()).or_insert(0.0) += amount;
    }

    TotalsByLabel(totals)
}

/// Divides achieved by possible for every label of `possible`, in its key order.
///
/// Labels absent from `achieved` count as zero achieved.
pub fn percentages(
    achieved: &TotalsByLabel,
    possible: &TotalsByLabel,
) -> Result<Vec<LabelRatio>, ReportError> {
    possible
        .iter()
        .map(|(label, total)| {
            if total == 0.0 {
                return Err(ReportError::DivisionByZero {
                    label: label.to_string(),
                });
            }

            Ok(LabelRatio {
                label: label.to_string(),
                ratio: achieved.get(label).unwrap_or(0.0) / total,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_per_label_in_sorted_order() {
        let totals = totals_by_label(vec![
            ("Geometry", 4.0),
            ("Algebra", 10.0),
            ("Geometry", 6.0),
            ("Algebra", 2.5),
        ]);

        let labels: Vec<&str> = totals.labels().collect();
        assert_eq!(labels, vec!["Algebra", "Geometry"]);
        assert_eq!(totals.get("Algebra"), Some(12.5));
        assert_eq!(totals.get("Geometry"), Some(10.0));
        assert!((totals.sum() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_empty_totals() {
        let totals = totals_by_label(Vec::<(&str, f64)>::new());
        assert!(totals.is_empty());
        assert_eq!(totals.sum(), 0.0);
    }

    #[test]
    fn percentages_are_tagged_with_their_label() {
        let possible = totals_by_label(vec![("Algebra", 20.0), ("Geometry", 10.0)]);
        let achieved = totals_by_label(vec![("Geometry", 3.0), ("Algebra", 20.0)]);

        let ratios = percentages(&achieved, &possible).expect("non-zero totals");
        assert_eq!(
            ratios,
            vec![
                LabelRatio {
                    label: "Algebra".to_string(),
                    ratio: 1.0
                },
                LabelRatio {
                    label: "Geometry".to_string(),
                    ratio: 0.3
                },
            ]
        );
    }

    #[test]
    fn missing_achieved_label_counts_as_zero() {
        let possible = totals_by_label(vec![("Algebra", 20.0), ("Statistics", 5.0)]);
        let achieved = totals_by_label(vec![("Algebra", 10.0)]);

        let ratios = percentages(&achieved, &possible).expect("non-zero totals");
        assert_eq!(ratios[1].label, "Statistics");
        assert_eq!(ratios[1].ratio, 0.0);
    }

    #[test]
    fn zero_possible_total_is_rejected() {
        let possible = totals_by_label(vec![("Algebra", 10.0), ("Bonus", 0.0)]);
        let achieved = totals_by_label(vec![("Algebra", 5.0)]);

        match percentages(&achieved, &possible) {
            Err(ReportError::DivisionByZero { label }) => assert_eq!(label, "Bonus"),
            other => panic!("expected division by zero, got {other:?}"),
        }
    }
}
