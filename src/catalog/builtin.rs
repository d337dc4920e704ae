//! Weapon tables shipped with the crate

use super::definitions::load_into;
use super::registry::{Catalog, CatalogBuilder};
use crate::core::error::{ArmoryError, Result};

/// Bundled tables, loaded in this order
pub const TABLES: &[(&str, &str)] = &[
    ("energy", include_str!("../../data/weapons/energy.toml")),
    ("missiles", include_str!("../../data/weapons/missiles.toml")),
    ("narc", include_str!("../../data/weapons/narc.toml")),
    ("infantry", include_str!("../../data/weapons/infantry.toml")),
];

/// Build a catalog from every bundled table
pub fn builtin_catalog() -> Result<Catalog> {
    let mut builder = CatalogBuilder::new();
    for (table, content) in TABLES {
        let count = load_into(&mut builder, content).map_err(|e| match e {
            ArmoryError::Definition(msg) => ArmoryError::Definition(format!("{}: {}", table, msg)),
            other => other,
        })?;
        tracing::debug!(table, weapons = count, "Loaded weapon table");
    }
    tracing::info!(weapons = builder.len(), "Built-in weapon catalog ready");
    Ok(builder.build())
}

impl Catalog {
    /// Catalog of every bundled weapon
    pub fn builtin() -> Result<Catalog> {
        builtin_catalog()
    }
}
