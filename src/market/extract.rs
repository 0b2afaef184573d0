use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, DataType, Reader};
use serde_json::Value;
use tracing::debug;

use crate::market::MarketError;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls"];
const DELIMITED_EXTENSIONS: &[&str] = &["csv"];

/// Lower-cased text of the first sheet of an uploaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCorpus(String);

impl TextCorpus {
    pub fn from_text(text: &str) -> Self {
        TextCorpus(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Spreadsheet,
    Delimited,
}

fn document_kind(file_name: &str) -> Result<DocumentKind, MarketError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        Ok(DocumentKind::Spreadsheet)
    } else if DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(DocumentKind::Delimited)
    } else {
        Err(MarketError::UnsupportedFormat {
            file_name: file_name.to_string(),
        })
    }
}

fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn cell_to_value(cell: &DataType) -> Value {
    match cell {
        DataType::Empty => Value::Null,
        DataType::Int(value) => Value::from(*value),
        DataType::Float(value) => number_value(*value),
        DataType::Bool(value) => Value::Bool(*value),
        DataType::String(value) => Value::String(value.clone()),
        _ => Value::String(cell.to_string()),
    }
}

fn read_spreadsheet_rows(bytes: &[u8]) -> Result<Vec<Vec<Value>>, MarketError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| MarketError::Parse(format!("Unable to open the spreadsheet: {err}")))?;

    let sheet_name = workbook
        .sheet_names()
        .get(0)
        .cloned()
        .ok_or_else(|| MarketError::Parse("The workbook does not contain any worksheets.".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| MarketError::Parse(format!("Unable to read the worksheet named '{sheet_name}'.")))?
        .map_err(|err| MarketError::Parse(format!("Unable to read the worksheet data: {err}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect())
}

fn field_to_value(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match text.parse::<f64>() {
        Ok(number) if number.is_finite() => number_value(number),
        _ => Value::String(text.to_string()),
    }
}

fn read_delimited_rows(bytes: &[u8]) -> Result<Vec<Vec<Value>>, MarketError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record
            .map_err(|err| MarketError::Parse(format!("Unable to read spreadsheet rows: {err}")))?;
        let values = record
            .iter()
            .map(|field| field_to_value(&String::from_utf8_lossy(field)))
            .collect();
        rows.push(values);
    }
    Ok(rows)
}

/// Reads the first sheet of `bytes` and flattens every cell into one lower-cased
/// JSON text. Fails without side effects when the document cannot be read.
pub fn extract_corpus(file_name: &str, bytes: &[u8]) -> Result<TextCorpus, MarketError> {
    let rows = match document_kind(file_name)? {
        DocumentKind::Spreadsheet => read_spreadsheet_rows(bytes)?,
        DocumentKind::Delimited => read_delimited_rows(bytes)?,
    };

    let text = serde_json::to_string(&rows)
        .map_err(|err| MarketError::Parse(format!("Unable to serialize sheet contents: {err}")))?;
    debug!(
        "Extracted corpus from {}: rows={}, bytes={}",
        file_name,
        rows.len(),
        text.len()
    );
    Ok(TextCorpus::from_text(&text))
}
