//! CSV export of the catalog
//!
//! Produces a flat comma-separated document: one header row, then one line per
//! record in catalog order. Fields are written as-is; the dataset is controlled
//! and contains no commas, so no quoting or escaping is applied.

use crate::catalog::LocalityRecord;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Default download filename
pub const DEFAULT_FILENAME: &str = "communes_haute_corse.csv";

/// MIME type served with the document
pub const CSV_MIME: &str = "text/csv; charset=utf-8";

const FIELD_HEADER: [&str; 6] = [
    "id",
    "name",
    "foundedYear",
    "dissolvedLabel",
    "latitude",
    "longitude",
];

const LABEL_HEADER: [&str; 6] = [
    "Code INSEE",
    "Nom",
    "Création",
    "Suppression",
    "Latitude",
    "Longitude",
];

/// Which column names to put in the header row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Field identifiers: `id,name,foundedYear,...`
    #[default]
    Fields,
    /// French display labels: `Code INSEE,Nom,Création,...`
    Labels,
}

impl HeaderStyle {
    /// Parse header style from config (unknown values fall back to fields)
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "labels" => Self::Labels,
            _ => Self::Fields,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Labels => "labels",
        }
    }
}

/// Serialize records with the default field-name header
///
/// Lines are joined with `\n`; there is no trailing newline.
pub fn export_csv(records: &[LocalityRecord]) -> String {
    render(records, &FIELD_HEADER)
}

/// Serialize records with the given header style
pub fn export_csv_with(records: &[LocalityRecord], header: HeaderStyle) -> String {
    match header {
        HeaderStyle::Fields => export_csv(records),
        HeaderStyle::Labels => render(records, &LABEL_HEADER),
    }
}

fn render(records: &[LocalityRecord], columns: &[&str; 6]) -> String {
    let mut out = columns.join(",");
    for record in records {
        out.push('\n');
        write_record(&mut out, record);
    }
    out
}

fn write_record(out: &mut String, r: &LocalityRecord) {
    // Writing into a String cannot fail
    let _ = write!(
        out,
        "{},{},{},{},{},{}",
        r.id,
        r.name,
        r.founded_year,
        r.dissolved_label.as_deref().unwrap_or(""),
        r.latitude,
        r.longitude
    );
}

/// A ready-to-download export
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDocument {
    pub filename: String,
    pub body: String,
}

impl CsvDocument {
    pub fn build(records: &[LocalityRecord], header: HeaderStyle, filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            body: export_csv_with(records, header),
        }
    }

    /// Value for the `Content-Disposition` header
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Write `doc` into `dir` (created if missing) and return the file path
pub fn write_export(dir: &Path, doc: &CsvDocument) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(&doc.filename);
    std::fs::write(&path, &doc.body)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = doc.body.len(), "Catalog exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn dissolved() -> LocalityRecord {
        LocalityRecord {
            id: "2B999".to_string(),
            name: "Ancienne".to_string(),
            founded_year: 1790,
            dissolved_label: Some("1852".to_string()),
            latitude: 42.0,
            longitude: 9.25,
        }
    }

    #[test]
    fn full_catalog_has_header_plus_one_line_per_record() {
        let catalog = Catalog::load();
        let csv = export_csv(catalog.records());
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(
            lines[0],
            "id,name,foundedYear,dissolvedLabel,latitude,longitude"
        );
        assert_eq!(lines[1], "2B002,Aghione,1864,,42.1125,9.40138888889");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn every_line_has_header_field_count() {
        let catalog = Catalog::load();
        let csv = export_csv(catalog.records());
        let mut lines = csv.lines();
        let width = lines.next().unwrap().split(',').count();
        for line in lines {
            assert_eq!(line.split(',').count(), width, "line: {line}");
        }
    }

    #[test]
    fn missing_dissolved_label_is_empty_not_null() {
        let catalog = Catalog::load();
        let csv = export_csv(catalog.records());
        assert!(!csv.contains("null"));
        for line in csv.lines().skip(1) {
            assert_eq!(line.split(',').nth(3), Some(""));
        }
    }

    #[test]
    fn present_dissolved_label_is_written() {
        let csv = export_csv(&[dissolved()]);
        assert_eq!(csv.lines().nth(1), Some("2B999,Ancienne,1790,1852,42,9.25"));
    }

    #[test]
    fn numbers_use_plain_decimal_form() {
        let catalog = Catalog::load();
        let csv = export_csv(catalog.records());
        assert!(csv.contains("2B033,Bastia,1500,,42.697283,9.450881"));
        assert!(csv.contains("2B121,Galéria,1864,,42.41,8.64916666667"));
    }

    #[test]
    fn empty_input_is_header_only() {
        let csv = export_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn label_header_uses_display_names() {
        let csv = export_csv_with(&[dissolved()], HeaderStyle::Labels);
        assert_eq!(
            csv.lines().next(),
            Some("Code INSEE,Nom,Création,Suppression,Latitude,Longitude")
        );
    }

    #[test]
    fn default_header_path_matches_export_csv() {
        let catalog = Catalog::load();
        assert_eq!(
            export_csv_with(catalog.records(), HeaderStyle::default()),
            export_csv(catalog.records())
        );
        let doc = CsvDocument::build(catalog.records(), HeaderStyle::Fields, DEFAULT_FILENAME);
        assert_eq!(doc.body, export_csv(catalog.records()));
    }

    #[test]
    fn header_style_parsing() {
        assert_eq!(HeaderStyle::from_str("labels"), HeaderStyle::Labels);
        assert_eq!(HeaderStyle::from_str("LABELS"), HeaderStyle::Labels);
        assert_eq!(HeaderStyle::from_str("fields"), HeaderStyle::Fields);
        assert_eq!(HeaderStyle::from_str("whatever"), HeaderStyle::Fields);
    }

    #[test]
    fn document_carries_filename() {
        let catalog = Catalog::load();
        let doc = CsvDocument::build(catalog.records(), HeaderStyle::Fields, DEFAULT_FILENAME);
        assert_eq!(
            doc.content_disposition(),
            "attachment; filename=\"communes_haute_corse.csv\""
        );
        assert_eq!(doc.body.lines().count(), 16);
    }

    #[test]
    fn write_export_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("exports");
        let doc = CsvDocument::build(&[dissolved()], HeaderStyle::Fields, "out.csv");

        let path = write_export(&dir, &doc).unwrap();
        assert_eq!(path, dir.join("out.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), doc.body);
    }
}
