//! Formation tops loader
//!
//! Reads tops from TOML, one table per formation:
//!
//! ```toml
//! [[formation]]
//! name = "Balder"
//! depth = 1952.0
//! facecolor = "#d4a017"
//! ```
//!
//! Tables may appear in any order; the result is sorted by depth.

use super::{FormationTop, FormationTops};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk layout of a tops file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopsFile {
    #[serde(default, rename = "formation")]
    pub formations: Vec<FormationTop>,
}

impl TryFrom<TopsFile> for FormationTops {
    type Error = LoadError;

    fn try_from(file: TopsFile) -> Result<Self, Self::Error> {
        let mut tops = FormationTops::default();
        for entry in file.formations {
            tops.add(entry.name, entry.depth, entry.facecolor)?;
        }
        Ok(tops)
    }
}

impl From<&FormationTops> for TopsFile {
    fn from(tops: &FormationTops) -> Self {
        Self {
            formations: tops.iter().cloned().collect(),
        }
    }
}

impl FormationTops {
    pub fn from_toml_str(contents: &str) -> Result<Self, LoadError> {
        let file: TopsFile = toml::from_str(contents)?;
        Self::try_from(file)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
        let tops = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            formations = tops.len(),
            "Loaded formation tops"
        );
        Ok(tops)
    }
}
