//! Generic table record parsing.
//!
//! Reference records are read by explicit field name, whichever format they
//! come from. JSON objects and CSV rows both implement [`FieldSource`], and
//! each record type implements [`TableRecord`] once.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use symptom_types::{DiseaseMedicationEdge, Entity, EntityKind, SymptomDiseaseEdge};

use crate::types::{LoadError, LoadResult};

/// A record whose fields can be looked up by name.
pub trait FieldSource {
    /// Returns the text of a field, or `None` if absent or not scalar.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl FieldSource for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            serde_json::Value::Number(n) => Some(Cow::Owned(number_text(n))),
            _ => None,
        }
    }
}

/// Renders a JSON number, writing whole floats such as `1.0` as `1`.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(value) = n.as_f64() {
            if value.fract() == 0.0 && (0.0..u64::MAX as f64).contains(&value) {
                return (value as u64).to_string();
            }
        }
    }
    n.to_string()
}

impl FieldSource for HashMap<&str, &str> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| Cow::Borrowed(*value))
    }
}

/// Trait for types that can be parsed from reference table records.
pub trait TableRecord: Sized {
    /// Extra context needed to parse, e.g. the entity kind of an entity table.
    type Context: Copy;

    /// Name of the table holding these records.
    fn table_name(context: Self::Context) -> &'static str;

    /// Fields every record must carry.
    fn required_fields(context: Self::Context) -> [&'static str; 2];

    /// Parses one record. `index` is the record's position in its table.
    fn from_fields<S: FieldSource + ?Sized>(
        context: Self::Context,
        source: &S,
        index: usize,
    ) -> LoadResult<Self>;
}

impl TableRecord for Entity {
    type Context = EntityKind;

    fn table_name(kind: EntityKind) -> &'static str {
        kind.table_name()
    }

    fn required_fields(kind: EntityKind) -> [&'static str; 2] {
        [kind.id_field(), kind.name_field()]
    }

    fn from_fields<S: FieldSource + ?Sized>(
        kind: EntityKind,
        source: &S,
        index: usize,
    ) -> LoadResult<Self> {
        let table = kind.table_name();
        Ok(Entity {
            kind,
            id: parse::id(source, table, kind.id_field(), index)?,
            name: parse::text(source, table, kind.name_field(), index)?,
        })
    }
}

impl TableRecord for SymptomDiseaseEdge {
    type Context = ();

    fn table_name(_: ()) -> &'static str {
        Self::TABLE
    }

    fn required_fields(_: ()) -> [&'static str; 2] {
        [Self::SYMPTOM_FIELD, Self::DISEASE_FIELD]
    }

    fn from_fields<S: FieldSource + ?Sized>(_: (), source: &S, index: usize) -> LoadResult<Self> {
        Ok(SymptomDiseaseEdge {
            symptom_id: parse::id(source, Self::TABLE, Self::SYMPTOM_FIELD, index)?,
            disease_id: parse::id(source, Self::TABLE, Self::DISEASE_FIELD, index)?,
        })
    }
}

impl TableRecord for DiseaseMedicationEdge {
    type Context = ();

    fn table_name(_: ()) -> &'static str {
        Self::TABLE
    }

    fn required_fields(_: ()) -> [&'static str; 2] {
        [Self::DISEASE_FIELD, Self::MEDICATION_FIELD]
    }

    fn from_fields<S: FieldSource + ?Sized>(_: (), source: &S, index: usize) -> LoadResult<Self> {
        Ok(DiseaseMedicationEdge {
            disease_id: parse::id(source, Self::TABLE, Self::DISEASE_FIELD, index)?,
            medication_id: parse::id(source, Self::TABLE, Self::MEDICATION_FIELD, index)?,
        })
    }
}

/// A streaming parser for CSV reference tables.
///
/// Columns are located by header name, so column order and extra columns
/// do not matter.
pub struct CsvTable<R: Read, T: TableRecord> {
    reader: Reader<R>,
    context: T::Context,
    columns: HashMap<String, usize>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<T: TableRecord> CsvTable<BufReader<File>, T> {
    /// Creates a parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or lacks a required column.
    pub fn from_path<P: AsRef<Path>>(path: P, context: T::Context) -> LoadResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), context)
    }
}

impl<R: Read, T: TableRecord> CsvTable<R, T> {
    /// Creates a parser from a reader.
    pub fn from_reader(reader: R, context: T::Context) -> LoadResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Self::index_headers(&mut csv_reader, context)?;

        Ok(Self {
            reader: csv_reader,
            context,
            columns,
            records_read: 0,
            _marker: PhantomData,
        })
    }

    /// Maps header names to column positions and checks required columns.
    fn index_headers(
        reader: &mut Reader<R>,
        context: T::Context,
    ) -> LoadResult<HashMap<String, usize>> {
        let headers = reader.headers()?;
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            // Handle UTF-8 BOM at start of file
            .map(|(i, h)| (h.trim_start_matches('\u{feff}').to_string(), i))
            .collect();

        for column in T::required_fields(context) {
            if !columns.contains_key(column) {
                return Err(LoadError::MissingColumn {
                    table: T::table_name(context).to_string(),
                    column: column.to_string(),
                });
            }
        }

        Ok(columns)
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Parses all records into a Vec, failing on the first bad record.
    pub fn parse_all(self) -> LoadResult<Vec<T>> {
        self.collect()
    }
}

impl<R: Read, T: TableRecord> Iterator for CsvTable<R, T> {
    type Item = LoadResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    let index = self.records_read;
                    self.records_read += 1;

                    // Skip empty records
                    if record.iter().all(|f| f.is_empty()) {
                        continue;
                    }

                    let row = CsvRow {
                        record: &record,
                        columns: &self.columns,
                    };
                    return Some(T::from_fields(self.context, &row, index));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// A CSV row viewed through its header index.
struct CsvRow<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl FieldSource for CsvRow<'_> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let position = *self.columns.get(name)?;
        self.record.get(position).map(Cow::Borrowed)
    }
}

/// Helper functions for reading typed field values.
pub mod parse {
    use symptom_types::EntityId;

    use super::{FieldSource, LoadError, LoadResult};

    fn missing(table: &str, field: &str, index: usize) -> LoadError {
        LoadError::MissingField {
            table: table.to_string(),
            field: field.to_string(),
            record: index,
        }
    }

    /// Reads a required identifier field.
    pub fn id<S: FieldSource + ?Sized>(
        source: &S,
        table: &str,
        field: &str,
        index: usize,
    ) -> LoadResult<EntityId> {
        source
            .field(field)
            .and_then(|value| EntityId::parse(&value))
            .ok_or_else(|| missing(table, field, index))
    }

    /// Reads a required, non-blank text field. Surrounding whitespace is trimmed.
    pub fn text<S: FieldSource + ?Sized>(
        source: &S,
        table: &str,
        field: &str,
        index: usize,
    ) -> LoadResult<String> {
        match source.field(field) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(missing(table, field, index)),
        }
    }
}
