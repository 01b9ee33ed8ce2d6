// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flat-file output: detail files, the summary table, and message dumps.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HarvestError, HarvestResult};
use crate::record::{Detail, Record, SUMMARY_HEADER};

/// Characters that are not allowed in a detail filename.
pub const FORBIDDEN_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace every forbidden filename character with `_`.
pub fn sanitize_filename(title: &str) -> String {
    title.replace(FORBIDDEN_FILENAME_CHARS, "_")
}

/// Writes the detail files of one run, one file per record.
///
/// The file is named after the sanitized title, or the ID when the title is
/// blank. A title already used in this run gets the ID appended.
#[derive(Debug)]
pub struct DetailWriter {
    dir: PathBuf,
    written: HashSet<PathBuf>,
}

impl DetailWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: HashSet::new(),
        }
    }

    /// Path the next detail for `record` would be written to.
    pub fn path_for(&self, record: &Record) -> PathBuf {
        let stem = detail_stem(record);
        let path = self.dir.join(format!("{stem}.txt"));
        if !self.written.contains(&path) {
            return path;
        }
        let id = sanitize_filename(record.id.trim());
        let mut candidate = self.dir.join(format!("{stem}_{id}.txt"));
        let mut n = 2;
        while self.written.contains(&candidate) {
            candidate = self.dir.join(format!("{stem}_{id}_{n}.txt"));
            n += 1;
        }
        candidate
    }

    /// Write `detail` for `record`, creating the directory if needed.
    pub fn write(&mut self, record: &Record, detail: &Detail) -> HarvestResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| HarvestError::file(&self.dir, e))?;
        let path = self.path_for(record);
        if path != self.dir.join(format!("{}.txt", detail_stem(record))) {
            debug!(id = %record.id, path = %path.display(), "title already used, adding ID");
        }
        fs::write(&path, detail.render()).map_err(|e| HarvestError::file(&path, e))?;
        self.written.insert(path.clone());
        Ok(path)
    }

    /// Number of files written so far.
    pub fn count(&self) -> usize {
        self.written.len()
    }
}

fn detail_stem(record: &Record) -> String {
    let title = sanitize_filename(record.title.trim());
    if title.is_empty() {
        sanitize_filename(record.id.trim())
    } else {
        title
    }
}

/// Render records as a tab-separated table with a header row.
pub fn summary_table(records: &[Record]) -> String {
    let mut out = SUMMARY_HEADER.join("\t");
    out.push('\n');
    for record in records {
        let row: Vec<String> = record.fields().iter().map(|f| tsv_cell(f)).collect();
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Write the summary table to `path`.
pub fn write_summary(path: &Path, records: &[Record]) -> HarvestResult<()> {
    ensure_parent(path)?;
    fs::write(path, summary_table(records)).map_err(|e| HarvestError::file(path, e))
}

/// Write messages separated by blank lines.
pub fn write_messages(path: &Path, messages: &[String]) -> HarvestResult<()> {
    ensure_parent(path)?;
    let body: String = messages.iter().map(|m| format!("{m}\n\n")).collect();
    fs::write(path, body).map_err(|e| HarvestError::file(path, e))
}

/// Write a JSON document, pretty-printed.
pub fn write_json(path: &Path, value: &serde_json::Value) -> HarvestResult<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).map_err(|e| HarvestError::file(path, e))
}

/// Detail files (`*.txt`) in a directory, sorted by name.
pub fn list_detail_files(dir: &Path) -> HarvestResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(HarvestError::file(dir, e)),
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| HarvestError::file(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// One record per line: cell text must not contain the separators.
fn tsv_cell(field: &str) -> String {
    field
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

fn ensure_parent(path: &Path) -> HarvestResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| HarvestError::file(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> Record {
        Record {
            id: id.into(),
            title: title.into(),
            company: "Acme".into(),
            division: "R&D".into(),
            position_type: "Co-op".into(),
            location: "Remote".into(),
            applied: "No".into(),
            deadline: "Jan 1".into(),
        }
    }

    #[test]
    fn test_sanitize_filename() {
        let cleaned = sanitize_filename(r#"Dev/Ops: "Lead" <QA> | C:\tmp*?"#);
        assert_eq!(cleaned, "Dev_Ops_ _Lead_ _QA_ _ C__tmp__");
        assert!(!cleaned.contains(FORBIDDEN_FILENAME_CHARS));
    }

    #[test]
    fn test_summary_table_shape() {
        let table = summary_table(&[record("1", "A"), record("2", "B\tC")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "ID\tTitle\tCompany\tDivision\tPosition Type\tLocation\tApplied\tDeadline"
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].split('\t').count(), 8);
        assert!(lines[2].starts_with("2\tB C\t"));
    }

    #[test]
    fn test_write_detail_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("job_desc");
        let mut writer = DetailWriter::new(&dir);
        let path = writer
            .write(&record("7", "QA/Test"), &Detail::new(None, None))
            .unwrap();
        assert_eq!(path, dir.join("QA_Test.txt"));
        let body = fs::read_to_string(path).unwrap();
        assert!(body.starts_with("--- Job Description ---\n"));
    }

    #[test]
    fn test_repeated_title_gets_id_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = DetailWriter::new(tmp.path());
        let first = Detail::new(Some("Acme job".into()), None);
        let second = Detail::new(Some("Globex job".into()), None);

        let a = writer.write(&record("1", "Software Developer"), &first).unwrap();
        let b = writer.write(&record("2", "Software Developer"), &second).unwrap();
        let c = writer.write(&record("2", "Software Developer"), &second).unwrap();

        assert_eq!(a, tmp.path().join("Software Developer.txt"));
        assert_eq!(b, tmp.path().join("Software Developer_2.txt"));
        assert_eq!(c, tmp.path().join("Software Developer_2_2.txt"));
        assert_eq!(writer.count(), 3);
        assert!(fs::read_to_string(a).unwrap().contains("Acme job"));
        assert!(fs::read_to_string(b).unwrap().contains("Globex job"));
    }

    #[test]
    fn test_blank_title_uses_id() {
        let writer = DetailWriter::new("job_desc");
        assert_eq!(
            writer.path_for(&record("4411", "   ")),
            PathBuf::from("job_desc/4411.txt")
        );
    }

    #[test]
    fn test_list_detail_files_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("resume.pdf"), "pdf").unwrap();
        let files = list_detail_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert!(list_detail_files(&tmp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_write_messages() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/reports.txt");
        write_messages(&path, &["one".into(), "two".into()]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "one\n\ntwo\n\n");
    }
}
