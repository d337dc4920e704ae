//! Weapon catalog
//!
//! Construction and reading are split: a [`CatalogBuilder`] is the single
//! writer during startup, and [`CatalogBuilder::build`] freezes it into a
//! [`Catalog`] that can be shared freely between threads.

use ahash::AHashMap;
use std::sync::Arc;

use crate::core::error::{ArmoryError, Result};
use crate::weapons::{WeaponFlag, WeaponSpec};

/// Names are matched case-insensitively, ignoring surrounding whitespace
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Mutable catalog under construction
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<Arc<WeaponSpec>>,
    by_name: AHashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a weapon under its name, internal name and lookup names
    ///
    /// Registration is all-or-nothing: if any of the names is already taken,
    /// the builder is left untouched.
    pub fn register(&mut self, spec: WeaponSpec) -> Result<Arc<WeaponSpec>> {
        let keys = self.claim_keys(&spec, &AHashMap::new())?;
        Ok(self.insert(spec, keys))
    }

    /// Register a batch of specs, all or none
    ///
    /// Every name is checked against the catalog and against the other
    /// specs of the batch before anything is inserted.
    pub fn register_all(&mut self, specs: impl IntoIterator<Item = WeaponSpec>) -> Result<usize> {
        let specs: Vec<WeaponSpec> = specs.into_iter().collect();
        let mut pending: AHashMap<String, String> = AHashMap::new();
        let mut claimed = Vec::with_capacity(specs.len());
        for spec in &specs {
            let keys = self.claim_keys(spec, &pending)?;
            for key in &keys {
                pending.insert(key.clone(), spec.name().to_string());
            }
            claimed.push(keys);
        }

        let count = specs.len();
        for (spec, keys) in specs.into_iter().zip(claimed) {
            self.insert(spec, keys);
        }
        Ok(count)
    }

    /// Distinct lookup keys of `spec`, or the first one already taken
    fn claim_keys(
        &self,
        spec: &WeaponSpec,
        pending: &AHashMap<String, String>,
    ) -> Result<Vec<String>> {
        let mut keys: Vec<String> = Vec::new();
        for name in spec.names() {
            let key = name_key(name);
            let existing = match self.by_name.get(&key) {
                Some(&idx) => Some(self.entries[idx].name().to_string()),
                None => pending.get(&key).cloned(),
            };
            if let Some(existing) = existing {
                tracing::warn!(
                    weapon = spec.name(),
                    name,
                    existing = existing.as_str(),
                    "Rejected duplicate weapon name"
                );
                return Err(ArmoryError::DuplicateName {
                    name: name.to_string(),
                    existing,
                });
            }
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn insert(&mut self, spec: WeaponSpec, keys: Vec<String>) -> Arc<WeaponSpec> {
        let idx = self.entries.len();
        let spec = Arc::new(spec);
        for key in keys {
            self.by_name.insert(key, idx);
        }
        self.entries.push(Arc::clone(&spec));
        tracing::debug!(weapon = spec.name(), internal = spec.internal_name(), "Registered weapon");
        spec
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name_key(name))
    }

    /// Freeze the catalog; no further registration is possible
    pub fn build(self) -> Catalog {
        tracing::info!(
            weapons = self.entries.len(),
            names = self.by_name.len(),
            "Weapon catalog frozen"
        );
        Catalog {
            entries: self.entries,
            by_name: self.by_name,
        }
    }
}

/// Frozen, read-only weapon catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<WeaponSpec>>,
    by_name: AHashMap<String, usize>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Find a weapon by display name, internal name or lookup name
    pub fn lookup(&self, name: &str) -> Result<&Arc<WeaponSpec>> {
        self.get(name).ok_or_else(|| ArmoryError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<WeaponSpec>> {
        self.by_name
            .get(&name_key(name))
            .map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name_key(name))
    }

    /// Every weapon in registration order; call again to restart
    pub fn all(&self) -> std::slice::Iter<'_, Arc<WeaponSpec>> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Arc<WeaponSpec>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct lookup keys
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Weapons ordered by sort key, then by name
    pub fn sorted(&self) -> Vec<&Arc<WeaponSpec>> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.sort_key()
                .cmp(b.sort_key())
                .then_with(|| a.name().cmp(b.name()))
        });
        sorted
    }

    pub fn with_flag(&self, flag: WeaponFlag) -> impl Iterator<Item = &Arc<WeaponSpec>> + '_ {
        self.entries.iter().filter(move |spec| spec.has_flag(flag))
    }
}
