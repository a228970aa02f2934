//! Row and source-file data structures.
//!
//! This module defines the intermediate representation for ingested tabular
//! data:
//! - [`Row`]: One snapshot row, a column→value mapping tagged with its source file
//! - [`Scalar`]: A cell value (text or number), compared by string coercion
//! - [`SourceFile`]: One ingested file with its header order and rows
//!
//! Rows are immutable once constructed. A row lacking a column is treated as
//! holding the empty string for that column.

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Reserved column recording which file a row was read from.
///
/// Present on every row, forced to the front of projected column orders, and
/// never eligible for change detection.
pub const SOURCE_FILE_FIELD: &str = "Found_In_File";

/// A scalar cell value.
///
/// Comparison for change detection is always on the string coercion
/// ([`Scalar::coerce`]); `Number` exists so programmatic producers do not
/// have to pre-render values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// String form used for equality checks and display.
    ///
    /// Integral numbers render without a trailing `.0` so `100` and `100.0`
    /// coerce identically.
    pub fn coerce(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) => Cow::Borrowed(s.as_str()),
            Scalar::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    Cow::Owned(format!("{}", *n as i64))
                } else {
                    Cow::Owned(n.to_string())
                }
            }
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Scalar {
        Scalar::Text(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Scalar {
        Scalar::Number(n)
    }
}

/// One snapshot row: a mapping from column name to [`Scalar`], plus the name
/// of the file it was read from.
///
/// The reserved field is stored structurally in `source`, not in `fields`;
/// [`Row::get_str`] surfaces it under [`SOURCE_FILE_FIELD`] so callers can
/// treat it as an ordinary column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    source: String,
    fields: FxHashMap<String, Scalar>,
}

impl Row {
    /// Build a row tagged with `source`. Any literal [`SOURCE_FILE_FIELD`]
    /// key in `fields` is dropped in favor of the tag.
    pub fn new(
        source: impl Into<String>,
        fields: impl IntoIterator<Item = (String, Scalar)>,
    ) -> Row {
        let mut map = FxHashMap::default();
        for (k, v) in fields {
            if k == SOURCE_FILE_FIELD {
                continue;
            }
            map.insert(k, v);
        }
        Row {
            source: source.into(),
            fields: map,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        column == SOURCE_FILE_FIELD || self.fields.contains_key(column)
    }

    /// Coerced string value for `column`; absent columns read as `""`.
    pub fn get_str(&self, column: &str) -> Cow<'_, str> {
        if column == SOURCE_FILE_FIELD {
            return Cow::Borrowed(self.source.as_str());
        }
        match self.fields.get(column) {
            Some(v) => v.coerce(),
            None => Cow::Borrowed(""),
        }
    }

    /// Column names present on this row, excluding the reserved field.
    /// Iteration order is unspecified; callers needing a stable order use
    /// the pool's column universe.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

// Rows serialize as a single flat map with the reserved field first and the
// remaining columns in lexicographic order, so serialized output is stable
// across runs.
impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ordered: BTreeMap<&str, &Scalar> =
            self.fields.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let mut map = serializer.serialize_map(Some(ordered.len() + 1))?;
        map.serialize_entry(SOURCE_FILE_FIELD, &self.source)?;
        for (k, v) in ordered {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to scalar values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut source = String::new();
                let mut fields = FxHashMap::default();
                while let Some((key, value)) = access.next_entry::<String, Scalar>()? {
                    if key == SOURCE_FILE_FIELD {
                        source = value.coerce().into_owned();
                    } else {
                        fields.insert(key, value);
                    }
                }
                Ok(Row { source, fields })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// One successfully ingested file: its display name, header order, and rows.
///
/// Never mutated after ingestion; removed only by explicit user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Display name (typically the file name as uploaded).
    pub name: String,
    /// Header columns in file order, reserved field excluded.
    pub columns: Vec<String>,
    /// Rows in file order, each tagged with `name` as its source.
    pub rows: Vec<Row>,
}

impl SourceFile {
    /// Build a file from header order and per-row values.
    ///
    /// Rows shorter than the header read as empty for the trailing columns;
    /// extra cells beyond the header are dropped.
    pub fn from_records<S: Into<String>>(
        name: impl Into<String>,
        columns: Vec<String>,
        records: impl IntoIterator<Item = Vec<S>>,
    ) -> SourceFile {
        let name = name.into();
        let columns: Vec<String> = columns
            .into_iter()
            .filter(|c| c != SOURCE_FILE_FIELD)
            .collect();
        let rows = records
            .into_iter()
            .map(|record| {
                let fields = columns
                    .iter()
                    .cloned()
                    .zip(record.into_iter().map(|v| Scalar::Text(v.into())))
                    .collect::<Vec<_>>();
                Row::new(name.clone(), fields)
            })
            .collect();
        SourceFile {
            name,
            columns,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_renders_integral_numbers_without_fraction() {
        assert_eq!(Scalar::Number(100.0).coerce(), "100");
        assert_eq!(Scalar::Number(-3.0).coerce(), "-3");
        assert_eq!(Scalar::Number(1.5).coerce(), "1.5");
        assert_eq!(Scalar::Text("x".into()).coerce(), "x");
    }

    #[test]
    fn missing_column_reads_as_empty_string() {
        let row = Row::new("a.csv", vec![("Status".to_string(), Scalar::from("Open"))]);
        assert_eq!(row.get_str("Status"), "Open");
        assert_eq!(row.get_str("Nope"), "");
        assert_eq!(row.get_str(SOURCE_FILE_FIELD), "a.csv");
    }

    #[test]
    fn reserved_field_never_stored_as_data_column() {
        let row = Row::new(
            "a.csv",
            vec![(SOURCE_FILE_FIELD.to_string(), Scalar::from("spoofed"))],
        );
        assert_eq!(row.field_count(), 0);
        assert_eq!(row.get_str(SOURCE_FILE_FIELD), "a.csv");
    }

    #[test]
    fn row_serde_roundtrip_is_stable() {
        let row = Row::new(
            "a.csv",
            vec![
                ("B".to_string(), Scalar::from("2")),
                ("A".to_string(), Scalar::from(1.0)),
            ],
        );
        let json = serde_json::to_string(&row).expect("serialize row");
        assert_eq!(json, r#"{"Found_In_File":"a.csv","A":1.0,"B":"2"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize row");
        assert_eq!(back.source(), "a.csv");
        assert_eq!(back.get_str("B"), "2");
    }

    #[test]
    fn from_records_pads_short_rows() {
        let file = SourceFile::from_records(
            "a.csv",
            vec!["X".to_string(), "Y".to_string()],
            vec![vec!["1"]],
        );
        assert_eq!(file.rows[0].get_str("X"), "1");
        assert_eq!(file.rows[0].get_str("Y"), "");
    }
}
