use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::error::{ReportError, SheetError};
use crate::models::{SetupRow, StudentReport, StudentRow};

const SETUP_SHEET: &str = "Setup";
const STUDENTS_SHEET: &str = "Students";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Csv => "reports.csv",
            OutputFormat::Json => "reports.json",
        }
    }
}

pub fn read_setup(path: &Path) -> Result<Vec<SetupRow>, SheetError> {
    read_setup_from(open(path)?)
}

pub fn read_students(path: &Path) -> Result<Vec<StudentRow>, SheetError> {
    read_students_from(open(path)?)
}

pub fn read_setup_from<R: Read>(reader: R) -> Result<Vec<SetupRow>, SheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let question = column(&headers, SETUP_SHEET, "Question")?;
    let topic = column(&headers, SETUP_SHEET, "Topic")?;
    let question_type = column(&headers, SETUP_SHEET, "Type")?;
    let total = column(&headers, SETUP_SHEET, "Total")?;

    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let row = index + 1;
        rows.push(SetupRow {
            question: field(&record, question).to_string(),
            topic: field(&record, topic).to_string(),
            question_type: field(&record, question_type).to_string(),
            total: parse_number(SETUP_SHEET, row, "Total", field(&record, total))?,
        });
    }

    debug!(questions = rows.len(), "read setup sheet");
    Ok(rows)
}

/// Every column other than the two name columns is read as a score, in file order.
///
/// Columns with a blank header and no values anywhere, as left by spreadsheet
/// exports, are skipped. Row numbers count blank rows so they match the sheet.
pub fn read_students_from<R: Read>(reader: R) -> Result<Vec<StudentRow>, SheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let surname = column(&headers, STUDENTS_SHEET, "Surname")?;
    let first_name = column(&headers, STUDENTS_SHEET, "FirstName")?;

    let records = csv_reader
        .records()
        .enumerate()
        .map(|(index, record)| record.map(|record| (index + 1, record)))
        .collect::<Result<Vec<_>, _>>()?;

    let width = records
        .iter()
        .map(|(_, record)| record.len())
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    let score_columns: Vec<usize> = (0..width)
        .filter(|&position| position != surname && position != first_name)
        .filter(|&position| !is_padding_column(&headers, &records, position))
        .collect();

    let mut rows = Vec::new();

    for (row, record) in records.iter() {
        if is_blank(record) {
            continue;
        }

        let mut scores = Vec::new();

        for &position in score_columns.iter() {
            let Some(value) = record.get(position) else {
                continue;
            };

            let header = headers
                .get(position)
                .filter(|header| !header.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("column {}", position + 1));
            scores.push(parse_number(STUDENTS_SHEET, *row, &header, value)?);
        }

        rows.push(StudentRow {
            row: *row,
            surname: field(record, surname).to_string(),
            first_name: field(record, first_name).to_string(),
            scores,
        });
    }

    debug!(students = rows.len(), "read students sheet");
    Ok(rows)
}

pub fn write_reports_csv<W: Write>(writer: W, reports: &[StudentReport]) -> Result<(), SheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer.serialize(report)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_reports_json<W: Write>(
    writer: W,
    reports: &[StudentReport],
) -> Result<(), SheetError> {
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

pub fn write_reports(
    path: &Path,
    reports: &[StudentReport],
    format: OutputFormat,
) -> Result<(), SheetError> {
    let file = File::create(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        OutputFormat::Csv => write_reports_csv(file, reports),
        OutputFormat::Json => write_reports_json(file, reports),
    }
}

fn open(path: &Path) -> Result<File, SheetError> {
    File::open(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn column(
    headers: &StringRecord,
    sheet: &'static str,
    name: &'static str,
) -> Result<usize, ReportError> {
    let wanted = header_key(name);
    headers
        .iter()
        .position(|header| header_key(header) == wanted)
        .ok_or(ReportError::MissingColumn {
            sheet,
            column: name,
        })
}

// "First Name", "first_name" and "FirstName" all match.
fn header_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn is_padding_column(
    headers: &StringRecord,
    records: &[(usize, StringRecord)],
    position: usize,
) -> bool {
    headers.get(position).unwrap_or("").trim().is_empty()
        && records
            .iter()
            .all(|(_, record)| record.get(position).unwrap_or("").trim().is_empty())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

fn parse_number(
    sheet: &'static str,
    row: usize,
    column: &str,
    value: &str,
) -> Result<f64, SheetError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        warn!(sheet, row, column, "blank cell read as zero");
        return Ok(0.0);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| SheetError::InvalidScore {
            sheet,
            row,
            column: column.to_string(),
            value: trimmed.to_string(),
        })
}
