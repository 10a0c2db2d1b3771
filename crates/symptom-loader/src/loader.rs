//! Reference file discovery.

use std::fs;
use std::path::Path;

use symptom_types::{DiseaseMedicationEdge, EntityKind, SymptomDiseaseEdge};

use crate::types::{LoadError, LoadResult, ReferenceFiles};

/// File name of the entity document.
pub const MEDICAL_DATA_FILE: &str = "medical_data.json";
/// File name of the mapping document.
pub const KNOWLEDGE_BASE_FILE: &str = "knowledge_base.json";

/// Discovers reference files in a data directory.
///
/// Recognizes `medical_data.json` + `knowledge_base.json`, or one CSV file
/// per table named after the table (`Symptoms.csv`,
/// `SymptomDiseaseMapping.csv`, ...; matched case-insensitively). Other
/// files are ignored.
pub fn discover_reference_files<P: AsRef<Path>>(path: P) -> LoadResult<ReferenceFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = ReferenceFiles::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let filename = entry.file_name();
        let filename = filename.to_string_lossy();

        if filename.eq_ignore_ascii_case(MEDICAL_DATA_FILE) {
            files.medical_data = Some(entry.path());
            continue;
        }
        if filename.eq_ignore_ascii_case(KNOWLEDGE_BASE_FILE) {
            files.knowledge_base = Some(entry.path());
            continue;
        }

        let Some(stem) = csv_stem(&filename) else {
            continue;
        };

        if stem.eq_ignore_ascii_case(SymptomDiseaseEdge::TABLE) {
            files.symptom_disease_table = Some(entry.path());
        } else if stem.eq_ignore_ascii_case(DiseaseMedicationEdge::TABLE) {
            files.disease_medication_table = Some(entry.path());
        } else if let Some(kind) = table_kind(stem) {
            files.entity_tables.insert(kind, entry.path());
        }
    }

    if !files.has_required_files() {
        return Err(LoadError::RequiredFileMissing {
            file_type: files.missing_files().join(", "),
            directory: path.display().to_string(),
        });
    }

    Ok(files)
}

/// Returns the file stem of a `.csv` file name.
fn csv_stem(filename: &str) -> Option<&str> {
    let (stem, extension) = filename.rsplit_once('.')?;
    extension.eq_ignore_ascii_case("csv").then_some(stem)
}

/// Matches a table name to its entity kind, ignoring case.
fn table_kind(name: &str) -> Option<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .find(|kind| kind.table_name().eq_ignore_ascii_case(name))
}
