//! Formation Tops - named depth markers of one well
//!
//! `FormationTops` keeps its entries sorted shallow→deep at all times; every
//! constructor and mutator re-establishes that order (ties in depth are
//! ordered by name). Each formation spans `[top, next top)`; the deepest is
//! open-ended below.
//!
//! Tops hold plain depths and no reference to any trajectory. Checking that
//! the tops fall inside a survey's MD range is the caller's job (see
//! `crate::well`).

mod loader;

pub use loader::TopsFile;

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopsError {
    #[error("{formations} formation names but {depths} depths")]
    LengthMismatch { formations: usize, depths: usize },

    #[error("Depth of formation '{formation}' must be finite and >= 0, got {depth}")]
    InvalidDepth { formation: String, depth: f64 },

    #[error("Duplicate formation name '{0}'")]
    DuplicateFormation(String),

    #[error("Formation '{0}' not found")]
    NotFound(String),
}

impl TopsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopsError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One named marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationTop {
    pub name: String,
    pub depth: f64,
    /// Display hint only; never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facecolor: Option<String>,
}

/// `[top, bottom)` of one formation; `bottom` is `None` for the deepest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationInterval {
    pub name: String,
    pub top: f64,
    pub bottom: Option<f64>,
}

/// Columnar persisted form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopsRecord {
    pub formation: Vec<String>,
    pub depth: Vec<f64>,
    #[serde(default)]
    pub facecolor: HashMap<String, String>,
}

// ============================================================================
// FormationTops
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopsRecord", into = "TopsRecord")]
pub struct FormationTops {
    tops: Vec<FormationTop>,
}

impl FormationTops {
    /// Schema field names, in persisted order.
    pub const FIELDS: [&'static str; 3] = ["formation", "depth", "facecolor"];

    /// Build from parallel name/depth sequences.
    pub fn new<S, F, D>(formations: F, depths: D) -> Result<Self, TopsError>
    where
        S: Into<String>,
        F: IntoIterator<Item = S>,
        D: IntoIterator<Item = f64>,
    {
        let names: Vec<String> = formations.into_iter().map(Into::into).collect();
        let depths: Vec<f64> = depths.into_iter().collect();
        if names.len() != depths.len() {
            return Err(TopsError::LengthMismatch {
                formations: names.len(),
                depths: depths.len(),
            });
        }

        let mut tops = Self::default();
        for (name, depth) in names.into_iter().zip(depths) {
            tops.push_checked(name, depth, None)?;
        }
        tops.sort();
        Ok(tops)
    }

    /// Build from `(name, depth)` pairs, e.g. a `HashMap<String, f64>`.
    pub fn from_mapping<S, I>(mapping: I) -> Result<Self, TopsError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let (names, depths): (Vec<String>, Vec<f64>) =
            mapping.into_iter().map(|(n, d)| (n.into(), d)).unzip();
        Self::new(names, depths)
    }

    /// Attach display colors; unknown names are ignored.
    pub fn with_facecolors<K, V, I>(mut self, colors: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.merge_facecolors(colors);
        self
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormationTop> {
        self.tops.iter()
    }

    /// Names, shallow→deep.
    pub fn formations(&self) -> Vec<&str> {
        self.tops.iter().map(|t| t.name.as_str()).collect()
    }

    /// Depths, shallow→deep.
    pub fn depths(&self) -> Vec<f64> {
        self.tops.iter().map(|t| t.depth).collect()
    }

    /// Position of a formation in shallow→deep order.
    pub fn index(&self, name: &str) -> Result<usize, TopsError> {
        self.position(name)
            .ok_or_else(|| TopsError::NotFound(name.to_string()))
    }

    pub fn get_top(&self, name: &str) -> Result<f64, TopsError> {
        Ok(self.tops[self.index(name)?].depth)
    }

    /// `(top, bottom)`; bottom is the next-deeper top, `None` for the deepest.
    pub fn get_limit(&self, name: &str) -> Result<(f64, Option<f64>), TopsError> {
        let i = self.index(name)?;
        Ok((self.tops[i].depth, self.bottom_of(i)))
    }

    /// Every formation's interval, shallow→deep.
    pub fn intervals(&self) -> Vec<FormationInterval> {
        self.tops
            .iter()
            .enumerate()
            .map(|(i, t)| FormationInterval {
                name: t.name.clone(),
                top: t.depth,
                bottom: self.bottom_of(i),
            })
            .collect()
    }

    /// Formation containing `md` under `[top, bottom)`; the deepest formation
    /// takes everything at or below its top. `None` above the first top.
    pub fn find_at_md(&self, md: f64) -> Option<&str> {
        let k = self.tops.partition_point(|t| t.depth <= md);
        k.checked_sub(1).map(|i| self.tops[i].name.as_str())
    }

    /// Ordered `(name, depth)` pairs.
    pub fn to_mapping(&self) -> Vec<(String, f64)> {
        self.tops.iter().map(|t| (t.name.clone(), t.depth)).collect()
    }

    // ------------------------------------------------------------------------
    // Facecolors
    // ------------------------------------------------------------------------

    pub fn get_facecolor(&self, name: &str) -> Result<Option<&str>, TopsError> {
        Ok(self.tops[self.index(name)?].facecolor.as_deref())
    }

    /// Color of every formation, `None` where unset.
    pub fn facecolor_map(&self) -> HashMap<String, Option<String>> {
        self.tops
            .iter()
            .map(|t| (t.name.clone(), t.facecolor.clone()))
            .collect()
    }

    /// Override colors of known formations; unknown names are ignored.
    pub fn merge_facecolors<K, V, I>(&mut self, colors: I)
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (name, color) in colors {
            if let Some(i) = self.position(name.as_ref()) {
                self.tops[i].facecolor = Some(color.into());
            }
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    pub fn add(
        &mut self,
        name: impl Into<String>,
        depth: f64,
        facecolor: Option<String>,
    ) -> Result<(), TopsError> {
        self.push_checked(name.into(), depth, facecolor)?;
        self.sort();
        Ok(())
    }

    /// Remove a formation, returning its entry.
    pub fn remove(&mut self, name: &str) -> Result<FormationTop, TopsError> {
        let i = self.index(name)?;
        Ok(self.tops.remove(i))
    }

    /// Rename a formation, keeping its depth and color.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> Result<(), TopsError> {
        let new = new.into();
        let i = self.index(old)?;
        if new != old && self.contains(&new) {
            return Err(TopsError::DuplicateFormation(new));
        }
        self.tops[i].name = new;
        self.sort();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn position(&self, name: &str) -> Option<usize> {
        self.tops.iter().position(|t| t.name == name)
    }

    fn bottom_of(&self, i: usize) -> Option<f64> {
        self.tops.get(i + 1).map(|t| t.depth)
    }

    fn push_checked(
        &mut self,
        name: String,
        depth: f64,
        facecolor: Option<String>,
    ) -> Result<(), TopsError> {
        if !(depth.is_finite() && depth >= 0.0) {
            return Err(TopsError::InvalidDepth {
                formation: name,
                depth,
            });
        }
        if self.contains(&name) {
            return Err(TopsError::DuplicateFormation(name));
        }
        self.tops.push(FormationTop {
            name,
            depth,
            facecolor,
        });
        Ok(())
    }

    // Depths are finite by construction, so total_cmp orders them numerically
    fn sort(&mut self) {
        self.tops
            .sort_by(|a, b| a.depth.total_cmp(&b.depth).then_with(|| a.name.cmp(&b.name)));
    }
}

impl<'a> IntoIterator for &'a FormationTops {
    type Item = &'a FormationTop;
    type IntoIter = std::slice::Iter<'a, FormationTop>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<TopsRecord> for FormationTops {
    type Error = TopsError;

    fn try_from(record: TopsRecord) -> Result<Self, Self::Error> {
        Ok(Self::new(record.formation, record.depth)?.with_facecolors(record.facecolor))
    }
}

impl From<FormationTops> for TopsRecord {
    fn from(tops: FormationTops) -> Self {
        let mut record = TopsRecord::default();
        for t in tops.tops {
            if let Some(color) = t.facecolor {
                record.facecolor.insert(t.name.clone(), color);
            }
            record.formation.push(t.name);
            record.depth.push(t.depth);
        }
        record
    }
}

// ============================================================================
// Tests
// ============================================================================
