//! JSON reference document parsing.
//!
//! Reference data ships as two documents:
//!
//! ```text
//! medical_data.json     { "Symptoms": [{"SymptomID": 1, "SymptomName": "Fever"}, ...],
//!                         "Diseases": [...], "Medications": [...], "Allergies": [...],
//!                         "LifestyleFactors": [...], "MedicalConditions": [...] }
//! knowledge_base.json   { "SymptomDiseaseMapping": [{"SymptomID": 1, "DiseaseID": 3}, ...],
//!                         "DiseaseMedicationMapping": [{"DiseaseID": 3, "MedicationID": 9}, ...] }
//! ```
//!
//! Unknown tables and unknown fields are ignored.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};
use symptom_types::{DiseaseMedicationEdge, Entity, EntityKind, SymptomDiseaseEdge};

use crate::parser::TableRecord;
use crate::types::{LoadConfig, LoadError, LoadResult, ReferenceFiles};

/// A parsed JSON reference document: its top-level object.
pub type Document = Map<String, Value>;

/// Entity tables parsed from `medical_data.json`.
#[derive(Debug, Clone, Default)]
pub struct EntityTables {
    /// Entities of every kind, grouped by kind in table order.
    pub entities: Vec<Entity>,
    /// Records skipped in lenient mode.
    pub skipped: usize,
}

/// Mapping tables parsed from `knowledge_base.json`.
#[derive(Debug, Clone, Default)]
pub struct MappingTables {
    /// Symptom→disease edges, duplicates included.
    pub symptom_disease: Vec<SymptomDiseaseEdge>,
    /// Disease→medication edges.
    pub disease_medication: Vec<DiseaseMedicationEdge>,
    /// Records skipped in lenient mode.
    pub skipped: usize,
}

/// Reads a JSON document whose top level must be an object.
pub fn read_document<P: AsRef<Path>>(path: P) -> LoadResult<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Object(object) => Ok(object),
        _ => Err(LoadError::InvalidDocument {
            path: path.display().to_string(),
            reason: "top level is not an object".to_string(),
        }),
    }
}

/// Parses one table out of a document.
///
/// Returns `Ok(None)` if the table is absent. Malformed records fail the
/// load in strict mode and are counted in `skipped` otherwise.
pub fn parse_table<T: TableRecord>(
    document: &Document,
    context: T::Context,
    config: &LoadConfig,
    skipped: &mut usize,
) -> LoadResult<Option<Vec<T>>> {
    let table = T::table_name(context);
    let Some(value) = document.get(table) else {
        return Ok(None);
    };

    let Value::Array(rows) = value else {
        return Err(LoadError::InvalidDocument {
            path: table.to_string(),
            reason: "table is not an array".to_string(),
        });
    };

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let parsed = match row.as_object() {
            Some(object) => T::from_fields(context, object, index),
            None => Err(LoadError::MissingField {
                table: table.to_string(),
                field: T::required_fields(context)[0].to_string(),
                record: index,
            }),
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(e) if !config.strict_fields => {
                tracing::warn!("Skipping record {} in {}: {}", index, table, e);
                *skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Some(records))
}

/// Parses a required table, failing if it is absent.
pub fn parse_required_table<T: TableRecord>(
    document: &Document,
    context: T::Context,
    config: &LoadConfig,
    skipped: &mut usize,
) -> LoadResult<Vec<T>> {
    parse_table(document, context, config, skipped)?.ok_or_else(|| LoadError::MissingTable {
        table: T::table_name(context).to_string(),
    })
}

/// Parses all entity tables from a `medical_data.json` document.
///
/// Symptoms, diseases and medications are required; the remaining
/// vocabularies default to empty.
pub fn parse_entity_document(document: &Document, config: &LoadConfig) -> LoadResult<EntityTables> {
    let mut tables = EntityTables::default();

    for kind in EntityKind::ALL {
        let rows = if ReferenceFiles::REQUIRED_KINDS.contains(&kind) {
            parse_required_table::<Entity>(document, kind, config, &mut tables.skipped)?
        } else {
            parse_table::<Entity>(document, kind, config, &mut tables.skipped)?.unwrap_or_else(
                || {
                    tracing::debug!("No {} table; vocabulary is empty", kind.table_name());
                    Vec::new()
                },
            )
        };
        tables.entities.extend(rows);
    }

    Ok(tables)
}

/// Parses both mapping tables from a `knowledge_base.json` document.
pub fn parse_mapping_document(
    document: &Document,
    config: &LoadConfig,
) -> LoadResult<MappingTables> {
    let mut tables = MappingTables::default();
    tables.symptom_disease = parse_required_table(document, (), config, &mut tables.skipped)?;
    tables.disease_medication = parse_required_table(document, (), config, &mut tables.skipped)?;
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use symptom_types::EntityId;

    fn document(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_entity_document() {
        let doc = document(json!({
            "Symptoms": [
                {"SymptomID": 1, "SymptomName": "Fever"},
                {"SymptomName": "Cough", "SymptomID": 2}
            ],
            "Diseases": [{"DiseaseID": 10, "DiseaseName": "Flu", "Severity": "moderate"}],
            "Medications": [{"MedicationID": "M1", "MedicationName": "Paracetamol"}],
            "Allergies": [{"AllergyID": 5, "AllergyName": "Peanuts"}]
        }));

        let tables = parse_entity_document(&doc, &LoadConfig::default()).unwrap();
        assert_eq!(tables.entities.len(), 5);
        assert_eq!(tables.skipped, 0);

        // Field order inside a record does not matter
        let cough = &tables.entities[1];
        assert_eq!(cough.id, EntityId::Int(2));
        assert_eq!(cough.name, "Cough");

        let allergy = tables.entities.last().unwrap();
        assert_eq!(allergy.kind, EntityKind::Allergy);
    }

    #[test]
    fn test_missing_required_table() {
        let doc = document(json!({"Symptoms": [], "Diseases": []}));
        let result = parse_entity_document(&doc, &LoadConfig::default());
        assert!(matches!(
            result,
            Err(LoadError::MissingTable { ref table }) if table == "Medications"
        ));
    }

    #[test]
    fn test_strict_and_lenient_records() {
        let doc = document(json!({
            "SymptomDiseaseMapping": [
                {"SymptomID": 1, "DiseaseID": 10},
                {"SymptomID": 2},
                "not a record"
            ],
            "DiseaseMedicationMapping": [{"DiseaseID": 10, "MedicationID": "M1"}]
        }));

        let strict = parse_mapping_document(&doc, &LoadConfig::default());
        assert!(matches!(
            strict,
            Err(LoadError::MissingField { ref field, record: 1, .. }) if field == "DiseaseID"
        ));

        let lenient = parse_mapping_document(&doc, &LoadConfig::lenient()).unwrap();
        assert_eq!(lenient.symptom_disease, vec![SymptomDiseaseEdge::new(1u64, 10u64)]);
        assert_eq!(lenient.disease_medication.len(), 1);
        assert_eq!(lenient.skipped, 2);
    }

    #[test]
    fn test_float_ids_match_integer_ids() {
        let doc = document(json!({
            "SymptomDiseaseMapping": [{"SymptomID": 1.0, "DiseaseID": 10}],
            "DiseaseMedicationMapping": [{"DiseaseID": 10.0, "MedicationID": 100.0}]
        }));

        let tables = parse_mapping_document(&doc, &LoadConfig::default()).unwrap();
        assert_eq!(tables.symptom_disease, vec![SymptomDiseaseEdge::new(1u64, 10u64)]);
        assert_eq!(
            tables.disease_medication,
            vec![DiseaseMedicationEdge::new(10u64, 100u64)]
        );
    }

    #[test]
    fn test_table_must_be_array() {
        let doc = document(json!({"SymptomDiseaseMapping": {"SymptomID": 1}}));
        let mut skipped = 0;
        let result =
            parse_table::<SymptomDiseaseEdge>(&doc, (), &LoadConfig::default(), &mut skipped);
        assert!(matches!(result, Err(LoadError::InvalidDocument { .. })));
    }

    #[test]
    fn test_read_document_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medical_data.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            read_document(&path),
            Err(LoadError::InvalidDocument { .. })
        ));
        assert!(matches!(
            read_document(dir.path().join("absent.json")),
            Err(LoadError::FileNotFound { .. })
        ));
    }
}
