//! Result sink: serializes query results as a JSON document.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use subpath_core::{PathEntry, QueryResult};

use crate::error::{Error, Result};

/// Destination name that selects stdout instead of a file.
pub const STDOUT: &str = "-";

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub id: usize,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub email: String,
    pub created_at: String,
}

impl From<&PathEntry> for PathStep {
    fn from(entry: &PathEntry) -> Self {
        Self {
            email: entry.email.clone(),
            created_at: entry.created.clone(),
        }
    }
}

impl From<&QueryResult> for ResultRecord {
    fn from(result: &QueryResult) -> Self {
        Self {
            id: result.id,
            from: result.from.clone(),
            to: result.to.clone(),
            path: result.path.iter().map(PathStep::from).collect(),
        }
    }
}

pub fn to_records(results: &[QueryResult]) -> Vec<ResultRecord> {
    results.iter().map(ResultRecord::from).collect()
}

/// Write `records` as an indented JSON array followed by a newline.
pub fn write_results<W: Write>(mut writer: W, records: &[ResultRecord]) -> io::Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `records` to `dest`, or to stdout when `dest` is `-`.
pub fn save_results(dest: &Path, records: &[ResultRecord]) -> Result<()> {
    let name = dest.display().to_string();
    let written = if dest.as_os_str() == STDOUT {
        write_results(io::stdout().lock(), records)
    } else {
        File::create(dest).and_then(|file| write_results(BufWriter::new(file), records))
    };

    written.map_err(|source| Error::OutputUnwritable { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use subpath_core::QueryStatus;

    fn result(id: usize, path: &[(&str, &str)]) -> QueryResult {
        QueryResult {
            id,
            from: "a@x".to_string(),
            to: "c@x".to_string(),
            path: path
                .iter()
                .map(|&(email, created)| PathEntry {
                    email: email.to_string(),
                    created: created.to_string(),
                })
                .collect(),
            status: QueryStatus::NoPath,
        }
    }

    fn render(records: &[ResultRecord]) -> String {
        let mut buf = Vec::new();
        write_results(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_path_omitted() {
        let out = render(&to_records(&[result(1, &[])]));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["from"], "a@x");
        assert_eq!(value[0]["to"], "c@x");
        assert!(value[0].get("path").is_none());
    }

    #[test]
    fn test_path_fields() {
        let out = render(&to_records(&[result(3, &[("b@x", "2021"), ("d@x", "2019")])]));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let path = value[0]["path"].as_array().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0]["email"], "b@x");
        assert_eq!(path[0]["created_at"], "2021");
        assert_eq!(path[1]["email"], "d@x");
    }

    #[test]
    fn test_layout() {
        let out = render(&to_records(&[result(1, &[])]));
        let expected = "[\n    {\n        \"id\": 1,\n        \"from\": \"a@x\",\n        \"to\": \"c@x\"\n    }\n]\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&[]), "[]\n");
    }

    #[test]
    fn test_save_unwritable() {
        let err = save_results(Path::new("/nonexistent-dir/out.json"), &[]).unwrap_err();
        assert!(matches!(err, Error::OutputUnwritable { .. }));
    }
}
