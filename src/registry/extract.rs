//! Per-item field extraction.
//!
//! A [`Spec`] maps output columns to path expressions against the detail
//! document. Multi-occurrence fields are carried as typed value lists inside
//! the record; joining into a single delimited string happens only at the
//! table boundary, so no sentinel token is ever baked into in-memory data.

use super::document::{Document, FieldPath};
use ohno::app_err;

/// How a field's occurrences map onto the output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// First matching value only; absence yields an empty cell.
    Single,

    /// All matching values, de-duplicated by exact string equality in
    /// first-seen order, kept within one cell.
    Joined,
}

/// One output column extracted per document.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    column: String,
    path: FieldPath,
    multiplicity: Multiplicity,
}

impl FieldSpec {
    pub fn new(column: impl Into<String>, path: &str, multiplicity: Multiplicity) -> crate::Result<Self> {
        Ok(Self {
            column: column.into(),
            path: FieldPath::parse(path)?,
            multiplicity,
        })
    }
}

/// A repeating field that fans out into one record per occurrence, pairing
/// each occurrence's text value with one of its attributes (e.g. an API
/// endpoint with its `apiType`).
#[derive(Debug, Clone)]
pub struct FanOutSpec {
    path: FieldPath,
    value_column: String,
    attribute: String,
    attribute_column: String,
}

impl FanOutSpec {
    pub fn new(
        path: &str,
        value_column: impl Into<String>,
        attribute: impl Into<String>,
        attribute_column: impl Into<String>,
    ) -> crate::Result<Self> {
        Ok(Self {
            path: FieldPath::parse(path)?,
            value_column: value_column.into(),
            attribute: attribute.into(),
            attribute_column: attribute_column.into(),
        })
    }
}

/// The full extraction configuration for one harvest: identifier path, the
/// per-document fields, and an optional fan-out field.
#[derive(Debug, Clone)]
pub struct Spec {
    identifier_column: String,
    identifier_path: FieldPath,
    fields: Vec<FieldSpec>,
    fan_out: Option<FanOutSpec>,
}

impl Spec {
    pub fn new(identifier_column: impl Into<String>, identifier_path: &str) -> crate::Result<Self> {
        Ok(Self {
            identifier_column: identifier_column.into(),
            identifier_path: FieldPath::parse(identifier_path)?,
            fields: Vec::new(),
            fan_out: None,
        })
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fan_out(mut self, fan_out: FanOutSpec) -> Self {
        self.fan_out = Some(fan_out);
        self
    }

    /// The declared output columns, identifier first, fan-out columns last.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.fields.len() + 3);
        columns.push(self.identifier_column.clone());
        columns.extend(self.fields.iter().map(|f| f.column.clone()));
        if let Some(fan_out) = &self.fan_out {
            columns.push(fan_out.value_column.clone());
            columns.push(fan_out.attribute_column.clone());
        }
        columns
    }
}

/// One extraction result row, with cells aligned to [`Spec::columns`].
///
/// Each cell is a typed list of values; an empty list means the field was
/// absent (or present but empty — the registry does not distinguish the two).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    cells: Vec<Vec<String>>,
}

impl Record {
    /// Cell values, aligned to the spec's columns.
    #[must_use]
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// The originating item identifier. Guaranteed non-empty by extraction.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.cells.first().and_then(|c| c.first()).map_or("", String::as_str)
    }
}

/// Extract one or more records from a detail document.
///
/// Produces exactly one record for specs without a fan-out field. With a
/// fan-out field, produces one record per occurrence; an occurrence with no
/// value is skipped with a warning, and zero occurrences yield zero records.
pub fn extract(document: &Document, spec: &Spec) -> crate::Result<Vec<Record>> {
    let identifier = document.first_value(&spec.identifier_path);
    if identifier.is_empty() {
        return Err(app_err!("detail document carries no item identifier"));
    }

    let mut base: Vec<Vec<String>> = Vec::with_capacity(spec.fields.len() + 3);
    base.push(vec![identifier.clone()]);

    for field in &spec.fields {
        let cell = match field.multiplicity {
            Multiplicity::Single => {
                let value = document.first_value(&field.path);
                if value.is_empty() { Vec::new() } else { vec![value] }
            }
            Multiplicity::Joined => dedupe_first_seen(document.values(&field.path)),
        };
        base.push(cell);
    }

    let Some(fan_out) = &spec.fan_out else {
        return Ok(vec![Record { cells: base }]);
    };

    let occurrences = document.select(&fan_out.path);
    log::debug!("{identifier}: {} `{}` occurrence(s)", occurrences.len(), fan_out.value_column);

    let mut records = Vec::with_capacity(occurrences.len());
    for (index, occurrence) in occurrences.iter().enumerate() {
        let value = occurrence.text();
        if value.is_empty() {
            log::warn!("{identifier}: `{}` occurrence {index} has no value, skipping", fan_out.value_column);
            continue;
        }

        let attribute = occurrence.attribute(&fan_out.attribute).unwrap_or_default();

        let mut cells = base.clone();
        cells.push(vec![value.to_string()]);
        cells.push(if attribute.is_empty() { Vec::new() } else { vec![attribute.to_string()] });
        records.push(Record { cells });
    }

    Ok(records)
}

fn dedupe_first_seen(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"
        <r3d:re3data xmlns:r3d="http://www.re3data.org/schema/2-2">
            <r3d:repository>
                <r3d:re3data.orgIdentifier>r3d100010468</r3d:re3data.orgIdentifier>
                <r3d:repositoryName>Zenodo</r3d:repositoryName>
                <r3d:type>disciplinary</r3d:type>
                <r3d:type>institutional</r3d:type>
                <r3d:type>disciplinary</r3d:type>
                <r3d:api apiType="OAI-PMH">https://zenodo.org/oai2d</r3d:api>
                <r3d:api apiType="REST">https://developers.zenodo.org</r3d:api>
                <r3d:api apiType="broken"></r3d:api>
            </r3d:repository>
        </r3d:re3data>"#;

    fn base_spec() -> Spec {
        Spec::new("re3data_id", "repository/re3data.orgIdentifier")
            .unwrap()
            .field(FieldSpec::new("name", "repository/repositoryName", Multiplicity::Single).unwrap())
            .field(FieldSpec::new("type", "repository/type", Multiplicity::Joined).unwrap())
            .field(FieldSpec::new("certificate", "repository/certificate", Multiplicity::Joined).unwrap())
    }

    #[test]
    fn test_columns_order() {
        let spec = base_spec().fan_out(FanOutSpec::new("repository/api", "api", "apiType", "api_type").unwrap());
        assert_eq!(spec.columns(), ["re3data_id", "name", "type", "certificate", "api", "api_type"]);
    }

    #[test]
    fn test_extract_single_record() {
        let document = Document::parse(DETAIL).unwrap();
        let records = extract(&document, &base_spec()).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.identifier(), "r3d100010468");
        assert_eq!(record.cells()[1], vec!["Zenodo".to_string()]);
        // Duplicate "disciplinary" removed, first-seen order preserved.
        assert_eq!(record.cells()[2], vec!["disciplinary".to_string(), "institutional".to_string()]);
        // Missing field is an empty cell, not an error.
        assert!(record.cells()[3].is_empty());
    }

    #[test]
    fn test_extract_fan_out_one_record_per_occurrence() {
        let document = Document::parse(DETAIL).unwrap();
        let spec = base_spec().fan_out(FanOutSpec::new("repository/api", "api", "apiType", "api_type").unwrap());
        let records = extract(&document, &spec).unwrap();

        // The empty third <api> occurrence is skipped, not an error.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cells()[4], vec!["https://zenodo.org/oai2d".to_string()]);
        assert_eq!(records[0].cells()[5], vec!["OAI-PMH".to_string()]);
        assert_eq!(records[1].cells()[4], vec!["https://developers.zenodo.org".to_string()]);
        assert_eq!(records[1].cells()[5], vec!["REST".to_string()]);

        // Shared columns are duplicated across the fanned-out records.
        assert_eq!(records[0].identifier(), records[1].identifier());
        assert_eq!(records[0].cells()[1], records[1].cells()[1]);
    }

    #[test]
    fn test_extract_fan_out_zero_occurrences_yields_zero_records() {
        let document = Document::parse(
            "<re3data><repository><re3data.orgIdentifier>r3d9</re3data.orgIdentifier></repository></re3data>",
        )
        .unwrap();
        let spec = base_spec().fan_out(FanOutSpec::new("repository/api", "api", "apiType", "api_type").unwrap());
        let records = extract(&document, &spec).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_missing_identifier_is_an_error() {
        let document = Document::parse("<re3data><repository/></re3data>").unwrap();
        assert!(extract(&document, &base_spec()).is_err());
    }

    #[test]
    fn test_dedupe_first_seen() {
        let values = vec!["b".to_string(), "a".to_string(), "b".to_string(), "c".to_string(), "a".to_string()];
        assert_eq!(dedupe_first_seen(values), vec!["b".to_string(), "a".to_string(), "c".to_string()]);
    }
}
