//! Armory - weapon specification catalog and tech availability resolution

pub mod catalog;
pub mod core;
pub mod tech;
pub mod weapons;

pub use crate::catalog::{Catalog, CatalogBuilder};
pub use crate::core::{ArmoryError, Era, ResolverConfig, Result, RulesLevel, TechBase, TechRating, Year};
pub use crate::tech::{AvailabilityQuery, AvailabilityResolver, Faction, FactionSet, Verdict, VerdictReason};
pub use crate::weapons::{WeaponFlag, WeaponSpec, WeaponSpecBuilder};
