use std::path::PathBuf;

/// Failures raised while turning the two input tables into reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(
        "student row {row} ({student}) has {found} score columns but the setup defines {expected} questions"
    )]
    ShapeMismatch {
        row: usize,
        student: String,
        expected: usize,
        found: usize,
    },
    #[error("{sheet} sheet is missing the required '{column}' column")]
    MissingColumn {
        sheet: &'static str,
        column: &'static str,
    },
    #[error("'{label}' has a total possible score of zero")]
    DivisionByZero { label: String },
    #[error("no narrative defined for routine '{routine}' with non-routine '{non_routine}'")]
    UnhandledTypeCombination {
        routine: &'static str,
        non_routine: &'static str,
    },
    #[error("question '{question}' has type '{label}'; expected 'r' or 'nr'")]
    UnknownQuestionType { question: String, label: String },
    #[error("the assessment has no questions of type '{code}'")]
    MissingQuestionType { code: &'static str },
    #[error("the setup sheet defines no questions")]
    EmptyAssessment,
}

/// Failures reading or writing the CSV sheets.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("unable to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{sheet} row {row}, column '{column}': '{value}' is not a number")]
    InvalidScore {
        sheet: &'static str,
        row: usize,
        column: String,
        value: String,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}
