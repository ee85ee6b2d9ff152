//! Structured per-sequence records.
//!
//! The annotation tool emits tab-separated rows under a single header
//! line. Nothing here knows what individual columns mean; records are
//! plain field maps keyed by whatever column names the tool emitted.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column used to key records in an [`AnnotationOutput`].
pub const SEQUENCE_ID_FIELD: &str = "sequence_id";

/// Errors that can occur while parsing tool output.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("missing header line")]
    MissingHeader,

    #[error("row {row} has {got} fields, header has {expected}")]
    FieldCount {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// One annotated sequence as a field map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationRecord {
    fields: HashMap<String, String>,
}

impl AnnotationRecord {
    /// Field value by column name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The record's sequence id, when the tool emitted one.
    pub fn sequence_id(&self) -> Option<&str> {
        self.get(SEQUENCE_ID_FIELD)
    }

    /// All fields.
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

/// Parsed output of one annotation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationOutput {
    columns: Vec<String>,
    records: Vec<AnnotationRecord>,
}

impl AnnotationOutput {
    /// Parse header-plus-rows TSV from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut lines = BufReader::new(reader).lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(RecordError::MissingHeader),
            }
        };
        let columns: Vec<String> = header.split('\t').map(str::to_string).collect();

        let mut records = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let values: Vec<&str> = line.split('\t').collect();
            if values.len() != columns.len() {
                return Err(RecordError::FieldCount {
                    row: index + 2,
                    got: values.len(),
                    expected: columns.len(),
                });
            }

            let fields = columns
                .iter()
                .cloned()
                .zip(values.iter().map(|v| v.to_string()))
                .collect();
            records.push(AnnotationRecord { fields });
        }

        Ok(Self { columns, records })
    }

    /// Column names in the order the tool emitted them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in emission order.
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    /// Records keyed by sequence id; records without one are dropped.
    pub fn into_map(self) -> HashMap<String, AnnotationRecord> {
        self.records
            .into_iter()
            .filter_map(|record| {
                let id = record.sequence_id()?.to_string();
                Some((id, record))
            })
            .collect()
    }

    /// Serialize all records as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "sequence_id\tv_call\tj_call\n\
        seq1\tIGHV1-2*01\tIGHJ4*02\n\
        seq2\tIGHV3-23*01\tIGHJ6*01\n";

    #[test]
    fn test_parse_records() {
        let output = AnnotationOutput::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(output.columns(), &["sequence_id", "v_call", "j_call"]);
        assert_eq!(output.len(), 2);
        assert_eq!(output.records()[0].get("v_call"), Some("IGHV1-2*01"));
        assert_eq!(output.records()[1].sequence_id(), Some("seq2"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = format!("\n{}\n\n", SAMPLE);
        let output = AnnotationOutput::from_reader(text.as_bytes()).unwrap();
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_into_map_keys_by_sequence_id() {
        let output = AnnotationOutput::from_reader(SAMPLE.as_bytes()).unwrap();
        let map = output.into_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["seq1"].get("j_call"), Some("IGHJ4*02"));
    }

    #[test]
    fn test_missing_header() {
        let err = AnnotationOutput::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, RecordError::MissingHeader));
    }

    #[test]
    fn test_field_count_mismatch() {
        let text = "sequence_id\tv_call\nseq1\n";
        let err = AnnotationOutput::from_reader(text.as_bytes()).unwrap_err();
        match err {
            RecordError::FieldCount { row, got, expected } => {
                assert_eq!(row, 2);
                assert_eq!(got, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_to_json_roundtrip() {
        let output = AnnotationOutput::from_reader(SAMPLE.as_bytes()).unwrap();
        let json = output.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|row| row["v_call"] == "IGHV1-2*01"));
    }
}
