//! Loader-specific types: errors, configuration, statistics and file sets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use symptom_types::{EntityId, EntityKind};
use thiserror::Error;

/// Errors that can occur while loading reference data.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error reading a reference file.
    #[error("IO error reading reference data: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reference document is not shaped as expected.
    #[error("Invalid reference document {path}: {reason}")]
    InvalidDocument {
        /// The offending document.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A required table is absent from a reference document.
    #[error("Missing required table: {table}")]
    MissingTable {
        /// The missing table name.
        table: String,
    },

    /// Missing required column in a CSV table.
    #[error("Missing required column '{column}' in table {table}")]
    MissingColumn {
        /// The table being read.
        table: String,
        /// The name of the missing column.
        column: String,
    },

    /// A record lacks a required field, or the field is blank.
    #[error("Record {record} in table {table} is missing field '{field}'")]
    MissingField {
        /// The table being read.
        table: String,
        /// The missing field name.
        field: String,
        /// Zero-based record index within the table.
        record: usize,
    },

    /// Two entities of the same kind share an identifier.
    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateId {
        /// The entity kind.
        kind: EntityKind,
        /// The repeated identifier.
        id: EntityId,
    },

    /// Two entities of the same kind share a display name.
    #[error("Duplicate {kind} name '{name}' (ids {first} and {second})")]
    DuplicateName {
        /// The entity kind.
        kind: EntityKind,
        /// The repeated display name.
        name: String,
        /// Identifier of the first entity with that name.
        first: EntityId,
        /// Identifier of the second entity with that name.
        second: EntityId,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from the reference data directory.
    #[error("Required reference file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The files that were missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Configuration for reference data loading.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Reject tables where two entities of one kind share a display name.
    pub validate_unique_names: bool,
    /// Fail on malformed records instead of skipping them.
    pub strict_fields: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            validate_unique_names: true,
            strict_fields: true,
        }
    }
}

impl LoadConfig {
    /// Creates a config that skips malformed records and tolerates
    /// ambiguous display names.
    pub fn lenient() -> Self {
        Self {
            validate_unique_names: false,
            strict_fields: false,
        }
    }
}

/// Statistics from loading a reference data set.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Entities loaded per kind.
    pub entities: BTreeMap<EntityKind, usize>,
    /// Symptom→disease edges loaded (duplicates included).
    pub symptom_disease_edges: usize,
    /// Disease→medication edges loaded.
    pub disease_medication_edges: usize,
    /// Symptom→disease edges that repeat an earlier edge.
    pub duplicate_symptom_disease_edges: usize,
    /// Edges referencing an identifier absent from its entity table.
    pub dangling_references: usize,
    /// Malformed records skipped in lenient mode.
    pub skipped_records: usize,
    /// Time taken to load in milliseconds.
    pub load_time_ms: u64,
}

impl LoadStats {
    /// Returns the total number of entities across all kinds.
    pub fn total_entities(&self) -> usize {
        self.entities.values().sum()
    }

    /// Returns the number of entities loaded for one kind.
    pub fn entity_count(&self, kind: EntityKind) -> usize {
        self.entities.get(&kind).copied().unwrap_or(0)
    }
}

/// How a reference data directory is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceLayout {
    /// Two JSON documents: `medical_data.json` and `knowledge_base.json`.
    Json,
    /// One CSV file per table, e.g. `Symptoms.csv`.
    Csv,
}

/// Discovered reference files in a data directory.
#[derive(Debug, Clone, Default)]
pub struct ReferenceFiles {
    /// Path to the entity document (`medical_data.json`).
    pub medical_data: Option<PathBuf>,
    /// Path to the mapping document (`knowledge_base.json`).
    pub knowledge_base: Option<PathBuf>,
    /// Paths to per-kind CSV entity tables.
    pub entity_tables: BTreeMap<EntityKind, PathBuf>,
    /// Path to the symptom→disease CSV table.
    pub symptom_disease_table: Option<PathBuf>,
    /// Path to the disease→medication CSV table.
    pub disease_medication_table: Option<PathBuf>,
}

impl ReferenceFiles {
    /// Entity kinds every data set must provide.
    pub const REQUIRED_KINDS: [EntityKind; 3] = [
        EntityKind::Symptom,
        EntityKind::Disease,
        EntityKind::Medication,
    ];

    /// Creates a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the complete layout, preferring JSON when both are present.
    pub fn layout(&self) -> Option<ReferenceLayout> {
        if self.medical_data.is_some() && self.knowledge_base.is_some() {
            Some(ReferenceLayout::Json)
        } else if self.has_required_csv_tables() {
            Some(ReferenceLayout::Csv)
        } else {
            None
        }
    }

    /// Returns true if either layout is complete.
    pub fn has_required_files(&self) -> bool {
        self.layout().is_some()
    }

    fn has_required_csv_tables(&self) -> bool {
        Self::REQUIRED_KINDS
            .iter()
            .all(|kind| self.entity_tables.contains_key(kind))
            && self.symptom_disease_table.is_some()
            && self.disease_medication_table.is_some()
    }

    fn has_any_csv_table(&self) -> bool {
        !self.entity_tables.is_empty()
            || self.symptom_disease_table.is_some()
            || self.disease_medication_table.is_some()
    }

    /// Returns a list of missing required files.
    ///
    /// Reports CSV tables when any CSV table was found, JSON documents
    /// otherwise.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.has_any_csv_table() && self.medical_data.is_none() {
            for kind in Self::REQUIRED_KINDS {
                if !self.entity_tables.contains_key(&kind) {
                    missing.push(kind.table_name());
                }
            }
            if self.symptom_disease_table.is_none() {
                missing.push("SymptomDiseaseMapping");
            }
            if self.disease_medication_table.is_none() {
                missing.push("DiseaseMedicationMapping");
            }
        } else {
            if self.medical_data.is_none() {
                missing.push("medical_data.json");
            }
            if self.knowledge_base.is_none() {
                missing.push("knowledge_base.json");
            }
        }
        missing
    }
}
