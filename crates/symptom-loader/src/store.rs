//! In-memory reference data store.
//!
//! Holds the six entity tables and the two mapping tables, plus the indexes
//! the resolver, predictor and advisor query. The store is built once and
//! then shared read-only; every query takes `&self`.
//!
//! ```ignore
//! let store = ReferenceStore::from_directory("data", &LoadConfig::default())?;
//!
//! let symptoms = store.resolve_ids(EntityKind::Symptom, &["Fever", "Cough"]);
//! let predictions = store.predict_diseases(&symptoms);
//! let medications = store.suggest_for_predictions(&predictions);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use symptom_types::{
    DiseaseMedicationEdge, Entity, EntityId, EntityKind, SymptomDiseaseEdge,
};

use crate::json::{self, EntityTables, MappingTables};
use crate::loader::discover_reference_files;
use crate::parser::{CsvTable, TableRecord};
use crate::types::{
    LoadConfig, LoadError, LoadResult, LoadStats, ReferenceFiles, ReferenceLayout,
};

/// Display text for identifiers that do not resolve to an entity.
pub const UNKNOWN_NAME: &str = "unknown";

/// One entity table with an identifier index.
#[derive(Debug, Clone, Default)]
struct EntityTable {
    /// Entities in table order.
    rows: Vec<Entity>,
    /// Identifier -> position in `rows` (first occurrence wins).
    by_id: HashMap<EntityId, usize>,
}

/// In-memory store for symptom checker reference data.
///
/// # Example
///
/// ```
/// use symptom_loader::ReferenceStore;
/// use symptom_types::{Entity, EntityKind, SymptomDiseaseEdge};
///
/// let mut store = ReferenceStore::new();
/// store.insert_entities([
///     Entity::new(EntityKind::Symptom, 1u64, "Fever"),
///     Entity::new(EntityKind::Disease, 10u64, "Flu"),
/// ]);
/// store.insert_symptom_disease_edges([SymptomDiseaseEdge::new(1u64, 10u64)]);
///
/// assert_eq!(store.entity_count(EntityKind::Symptom), 1);
/// assert_eq!(store.display_name(EntityKind::Disease, &10u64.into()), "Flu");
/// assert_eq!(store.display_name(EntityKind::Disease, &99u64.into()), "unknown");
/// ```
#[derive(Default)]
pub struct ReferenceStore {
    /// Entity tables keyed by kind.
    tables: HashMap<EntityKind, EntityTable>,
    /// Symptom→disease edges in table order, duplicates included.
    symptom_disease: Vec<SymptomDiseaseEdge>,
    /// Disease IDs indexed by symptom ID (one entry per edge).
    diseases_by_symptom: HashMap<EntityId, Vec<EntityId>>,
    /// Disease→medication edges in table order.
    disease_medication: Vec<DiseaseMedicationEdge>,
    /// Medication IDs indexed by disease ID.
    medications_by_disease: HashMap<EntityId, Vec<EntityId>>,
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("ReferenceStore");
        for kind in EntityKind::ALL {
            debug.field(kind.table_name(), &self.entity_count(kind));
        }
        debug
            .field("symptom_disease", &self.symptom_disease.len())
            .field("disease_medication", &self.disease_medication.len())
            .finish()
    }
}

impl ReferenceStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers and loads reference data from a directory.
    pub fn from_directory<P: AsRef<Path>>(path: P, config: &LoadConfig) -> LoadResult<Self> {
        let files = discover_reference_files(path)?;
        let mut store = Self::new();
        store.load_all(&files, config)?;
        Ok(store)
    }

    /// Loads all reference tables from a discovered file set.
    ///
    /// Replaces the store's contents. If loading or validation fails the
    /// store keeps what it held before.
    pub fn load_all(&mut self, files: &ReferenceFiles, config: &LoadConfig) -> LoadResult<LoadStats> {
        let start = Instant::now();

        let (entities, mappings) = match files.layout() {
            Some(ReferenceLayout::Json) => Self::read_json(files, config)?,
            Some(ReferenceLayout::Csv) => Self::read_csv(files, config)?,
            None => {
                return Err(LoadError::RequiredFileMissing {
                    file_type: files.missing_files().join(", "),
                    directory: "reference file set".to_string(),
                })
            }
        };

        self.finish_load(entities, mappings, config, start)
    }

    /// Loads all reference tables, parsing the inputs concurrently.
    ///
    /// The two JSON documents, or all CSV tables, are read on the rayon
    /// thread pool. Results are identical to [`load_all`](Self::load_all).
    #[cfg(feature = "parallel")]
    pub fn load_all_parallel(
        &mut self,
        files: &ReferenceFiles,
        config: &LoadConfig,
    ) -> LoadResult<LoadStats> {
        let start = Instant::now();

        let (entities, mappings) = match files.layout() {
            Some(ReferenceLayout::Json) => {
                let (medical_data, knowledge_base) = json_paths(files)?;
                let (entities, mappings) = rayon::join(
                    || {
                        json::read_document(medical_data)
                            .and_then(|doc| json::parse_entity_document(&doc, config))
                    },
                    || {
                        json::read_document(knowledge_base)
                            .and_then(|doc| json::parse_mapping_document(&doc, config))
                    },
                );
                (entities?, mappings?)
            }
            Some(ReferenceLayout::Csv) => {
                let per_kind: Vec<LoadResult<(Vec<Entity>, usize)>> = EntityKind::ALL
                    .par_iter()
                    .map(|kind| match files.entity_tables.get(kind) {
                        Some(path) => read_csv_table::<Entity>(path, *kind, config),
                        None => Ok((Vec::new(), 0)),
                    })
                    .collect();

                let mut entities = EntityTables::default();
                for result in per_kind {
                    let (rows, skipped) = result?;
                    entities.entities.extend(rows);
                    entities.skipped += skipped;
                }

                let (symptom_disease, disease_medication) = rayon::join(
                    || {
                        read_optional_csv::<SymptomDiseaseEdge>(
                            files.symptom_disease_table.as_deref(),
                            config,
                        )
                    },
                    || {
                        read_optional_csv::<DiseaseMedicationEdge>(
                            files.disease_medication_table.as_deref(),
                            config,
                        )
                    },
                );
                let (symptom_disease, sd_skipped) = symptom_disease?;
                let (disease_medication, dm_skipped) = disease_medication?;

                let mappings = MappingTables {
                    symptom_disease,
                    disease_medication,
                    skipped: sd_skipped + dm_skipped,
                };
                (entities, mappings)
            }
            None => {
                return Err(LoadError::RequiredFileMissing {
                    file_type: files.missing_files().join(", "),
                    directory: "reference file set".to_string(),
                })
            }
        };

        self.finish_load(entities, mappings, config, start)
    }

    fn read_json(
        files: &ReferenceFiles,
        config: &LoadConfig,
    ) -> LoadResult<(EntityTables, MappingTables)> {
        let (medical_data, knowledge_base) = json_paths(files)?;
        let entities = json::parse_entity_document(&json::read_document(medical_data)?, config)?;
        let mappings = json::parse_mapping_document(&json::read_document(knowledge_base)?, config)?;
        Ok((entities, mappings))
    }

    fn read_csv(
        files: &ReferenceFiles,
        config: &LoadConfig,
    ) -> LoadResult<(EntityTables, MappingTables)> {
        let mut entities = EntityTables::default();
        for kind in EntityKind::ALL {
            if let Some(path) = files.entity_tables.get(&kind) {
                let (rows, skipped) = read_csv_table::<Entity>(path, kind, config)?;
                entities.entities.extend(rows);
                entities.skipped += skipped;
            }
        }

        let (symptom_disease, sd_skipped) =
            read_optional_csv::<SymptomDiseaseEdge>(files.symptom_disease_table.as_deref(), config)?;
        let (disease_medication, dm_skipped) =
            read_optional_csv::<DiseaseMedicationEdge>(
                files.disease_medication_table.as_deref(),
                config,
            )?;

        let mappings = MappingTables {
            symptom_disease,
            disease_medication,
            skipped: sd_skipped + dm_skipped,
        };
        Ok((entities, mappings))
    }

    /// Validates parsed tables and swaps them in, replacing any previous
    /// contents. On error the store is left unchanged.
    fn finish_load(
        &mut self,
        entities: EntityTables,
        mappings: MappingTables,
        config: &LoadConfig,
        start: Instant,
    ) -> LoadResult<LoadStats> {
        let mut stats = LoadStats {
            skipped_records: entities.skipped + mappings.skipped,
            ..Default::default()
        };

        for entity in &entities.entities {
            *stats.entities.entry(entity.kind).or_insert(0) += 1;
        }
        stats.symptom_disease_edges = mappings.symptom_disease.len();
        stats.disease_medication_edges = mappings.disease_medication.len();

        let mut loaded = Self::new();
        loaded.insert_entities(entities.entities);
        loaded.insert_symptom_disease_edges(mappings.symptom_disease);
        loaded.insert_disease_medication_edges(mappings.disease_medication);

        loaded.validate(config)?;
        *self = loaded;

        stats.duplicate_symptom_disease_edges = self.duplicate_symptom_disease_edge_count();
        stats.dangling_references = self.dangling_reference_count();
        stats.load_time_ms = start.elapsed().as_millis() as u64;

        if stats.duplicate_symptom_disease_edges > 0 {
            tracing::warn!(
                "{} duplicate symptom->disease edges; each occurrence adds to disease scores",
                stats.duplicate_symptom_disease_edges
            );
        }
        if stats.dangling_references > 0 {
            tracing::warn!(
                "{} mapping edges reference unknown entities",
                stats.dangling_references
            );
        }
        if stats.skipped_records > 0 {
            tracing::warn!("Skipped {} malformed records", stats.skipped_records);
        }

        tracing::info!(
            "Loaded {} entities, {} symptom->disease edges, {} disease->medication edges in {} ms",
            stats.total_entities(),
            stats.symptom_disease_edges,
            stats.disease_medication_edges,
            stats.load_time_ms
        );

        Ok(stats)
    }

    /// Checks identifier uniqueness and, if configured, name uniqueness.
    pub fn validate(&self, config: &LoadConfig) -> LoadResult<()> {
        for kind in EntityKind::ALL {
            let Some(table) = self.tables.get(&kind) else {
                continue;
            };

            for (position, entity) in table.rows.iter().enumerate() {
                if table.by_id.get(&entity.id) != Some(&position) {
                    return Err(LoadError::DuplicateId {
                        kind,
                        id: entity.id.clone(),
                    });
                }
            }

            if config.validate_unique_names {
                self.validate_unique_names(kind)?;
            }
        }
        Ok(())
    }

    /// Fails if two entities of `kind` share a display name.
    pub fn validate_unique_names(&self, kind: EntityKind) -> LoadResult<()> {
        let mut seen: HashMap<&str, &EntityId> = HashMap::new();
        for entity in self.entities(kind) {
            if let Some(first) = seen.insert(entity.name.as_str(), &entity.id) {
                return Err(LoadError::DuplicateName {
                    kind,
                    name: entity.name.clone(),
                    first: first.clone(),
                    second: entity.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Bulk inserts entities into their kind's table.
    ///
    /// When an identifier repeats within a kind, lookups by ID return the
    /// first entity; [`validate`](Self::validate) reports the repeat.
    pub fn insert_entities(&mut self, entities: impl IntoIterator<Item = Entity>) {
        for entity in entities {
            let table = self.tables.entry(entity.kind).or_default();
            let position = table.rows.len();
            table.by_id.entry(entity.id.clone()).or_insert(position);
            table.rows.push(entity);
        }
    }

    /// Bulk inserts symptom→disease edges. Duplicates are kept.
    pub fn insert_symptom_disease_edges(
        &mut self,
        edges: impl IntoIterator<Item = SymptomDiseaseEdge>,
    ) {
        for edge in edges {
            self.diseases_by_symptom
                .entry(edge.symptom_id.clone())
                .or_default()
                .push(edge.disease_id.clone());
            self.symptom_disease.push(edge);
        }
    }

    /// Bulk inserts disease→medication edges.
    pub fn insert_disease_medication_edges(
        &mut self,
        edges: impl IntoIterator<Item = DiseaseMedicationEdge>,
    ) {
        for edge in edges {
            self.medications_by_disease
                .entry(edge.disease_id.clone())
                .or_default()
                .push(edge.medication_id.clone());
            self.disease_medication.push(edge);
        }
    }

    // Query methods

    /// Returns all entities of a kind, in table order.
    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        self.tables
            .get(&kind)
            .map(|table| table.rows.as_slice())
            .unwrap_or(&[])
    }

    /// Gets an entity by kind and identifier.
    pub fn get_entity(&self, kind: EntityKind, id: &EntityId) -> Option<&Entity> {
        let table = self.tables.get(&kind)?;
        table.by_id.get(id).map(|&position| &table.rows[position])
    }

    /// Returns true if an entity exists in the store.
    pub fn has_entity(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.get_entity(kind, id).is_some()
    }

    /// Gets the display name of an entity.
    pub fn name_of(&self, kind: EntityKind, id: &EntityId) -> Option<&str> {
        self.get_entity(kind, id).map(|entity| entity.name.as_str())
    }

    /// Gets the display name of an entity, or [`UNKNOWN_NAME`] if the
    /// identifier does not resolve.
    pub fn display_name(&self, kind: EntityKind, id: &EntityId) -> &str {
        self.name_of(kind, id).unwrap_or(UNKNOWN_NAME)
    }

    /// Returns the display names of a kind, in table order.
    ///
    /// These are the options a selection form offers.
    pub fn vocabulary(&self, kind: EntityKind) -> Vec<&str> {
        self.entities(kind)
            .iter()
            .map(|entity| entity.name.as_str())
            .collect()
    }

    /// Gets the diseases linked to a symptom, one entry per edge.
    pub fn diseases_for_symptom(&self, symptom_id: &EntityId) -> &[EntityId] {
        self.diseases_by_symptom
            .get(symptom_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Gets the medications linked to a disease, one entry per edge.
    pub fn medications_for_disease(&self, disease_id: &EntityId) -> &[EntityId] {
        self.medications_by_disease
            .get(disease_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns all symptom→disease edges in table order.
    pub fn symptom_disease_edges(&self) -> &[SymptomDiseaseEdge] {
        &self.symptom_disease
    }

    /// Returns all disease→medication edges in table order.
    pub fn disease_medication_edges(&self) -> &[DiseaseMedicationEdge] {
        &self.disease_medication
    }

    // Statistics

    /// Returns the number of entities of a kind.
    pub fn entity_count(&self, kind: EntityKind) -> usize {
        self.entities(kind).len()
    }

    /// Returns the number of symptom→disease edges.
    pub fn symptom_disease_count(&self) -> usize {
        self.symptom_disease.len()
    }

    /// Returns the number of disease→medication edges.
    pub fn disease_medication_count(&self) -> usize {
        self.disease_medication.len()
    }

    /// Counts symptom→disease edges that repeat an earlier edge.
    pub fn duplicate_symptom_disease_edge_count(&self) -> usize {
        let mut seen = HashSet::with_capacity(self.symptom_disease.len());
        self.symptom_disease
            .iter()
            .filter(|edge| !seen.insert(*edge))
            .count()
    }

    /// Counts edge endpoints that do not resolve to an entity.
    pub fn dangling_reference_count(&self) -> usize {
        let symptom_disease = self
            .symptom_disease
            .iter()
            .map(|edge| {
                usize::from(!self.has_entity(EntityKind::Symptom, &edge.symptom_id))
                    + usize::from(!self.has_entity(EntityKind::Disease, &edge.disease_id))
            })
            .sum::<usize>();

        let disease_medication = self
            .disease_medication
            .iter()
            .map(|edge| {
                usize::from(!self.has_entity(EntityKind::Disease, &edge.disease_id))
                    + usize::from(!self.has_entity(EntityKind::Medication, &edge.medication_id))
            })
            .sum::<usize>();

        symptom_disease + disease_medication
    }
}

/// Returns both JSON document paths of a file set.
fn json_paths(files: &ReferenceFiles) -> LoadResult<(&Path, &Path)> {
    match (&files.medical_data, &files.knowledge_base) {
        (Some(medical_data), Some(knowledge_base)) => {
            Ok((medical_data.as_path(), knowledge_base.as_path()))
        }
        _ => Err(LoadError::RequiredFileMissing {
            file_type: files.missing_files().join(", "),
            directory: "reference file set".to_string(),
        }),
    }
}

/// Reads one CSV table, skipping malformed records in lenient mode.
fn read_csv_table<T: TableRecord>(
    path: &Path,
    context: T::Context,
    config: &LoadConfig,
) -> LoadResult<(Vec<T>, usize)> {
    let table = CsvTable::<_, T>::from_path(path, context)?;
    let mut records = Vec::new();
    let mut skipped = 0;

    for result in table {
        match result {
            Ok(record) => records.push(record),
            // CSV syntax errors are never skippable
            Err(e @ LoadError::MissingField { .. }) if !config.strict_fields => {
                tracing::warn!("Skipping record in {}: {}", T::table_name(context), e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((records, skipped))
}

/// Reads an optional edge table; an absent path yields no edges.
fn read_optional_csv<T: TableRecord<Context = ()>>(
    path: Option<&Path>,
    config: &LoadConfig,
) -> LoadResult<(Vec<T>, usize)> {
    match path {
        Some(path) => read_csv_table::<T>(path, (), config),
        None => Ok((Vec::new(), 0)),
    }
}
