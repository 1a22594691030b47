use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::{DataError, ModuleData, QuestionSetData};
use crate::raw_data::{RawModuleIndex, RawQuestionSetData};

const INDEX_FILE: &str = "index.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no module with id {id}")]
    ModuleNotFound { id: String },

    #[error("module index repeats id {id}")]
    DuplicateModuleId { id: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// The module catalog plus a registry resolving each module id to its data
/// file. The registry is built once at load time so that unknown ids are
/// rejected before any file access.
#[derive(Clone, Debug)]
pub struct ModuleCatalog {
    modules: Vec<ModuleData>,
    registry: BTreeMap<String, PathBuf>,
}

impl ModuleCatalog {
    /// Reads `index.json` from the data directory and builds the registry.
    pub fn load(data_dir: &Path) -> Result<Self, CatalogError> {
        let index_path = data_dir.join(INDEX_FILE);
        let raw_index: RawModuleIndex = read_json(&index_path)?;

        let modules = raw_index
            .modules
            .into_iter()
            .map(ModuleData::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = BTreeMap::new();
        for module in &modules {
            let path = data_dir.join(&module.data_file);

            if registry.insert(module.id.clone(), path).is_some() {
                return Err(CatalogError::DuplicateModuleId {
                    id: module.id.clone(),
                });
            }
        }

        log::debug!(
            "loaded module catalog from {}: {} modules",
            index_path.display(),
            modules.len(),
        );

        Ok(Self { modules, registry })
    }

    pub fn modules(&self) -> &[ModuleData] {
        &self.modules
    }

    pub fn module(&self, id: &str) -> Option<&ModuleData> {
        self.modules.iter().find(|module| module.id == id)
    }

    /// Advertised question count summed across modules.
    pub fn total_questions(&self) -> u32 {
        self.modules
            .iter()
            .map(|module| module.questions_count)
            .sum()
    }

    /// Loads and validates the question set backing a module.
    pub fn load_question_set(&self, id: &str) -> Result<QuestionSetData, CatalogError> {
        let path = self
            .registry
            .get(id)
            .ok_or_else(|| CatalogError::ModuleNotFound { id: id.to_owned() })?;

        let raw_set: RawQuestionSetData = read_json(path)?;
        let set = QuestionSetData::try_from(raw_set)?;
        set.check()?;

        log::debug!(
            "loaded question set for module {id}: {} questions",
            set.questions.len(),
        );

        Ok(set)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_owned(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Json {
        path: path.to_owned(),
        source,
    })
}
