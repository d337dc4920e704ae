//! Weapon catalog: registration, declarative tables and the bundled set

pub mod builtin;
pub mod definitions;
pub mod registry;

pub use builtin::builtin_catalog;
pub use definitions::{load_into, parse_definitions};
pub use registry::{Catalog, CatalogBuilder};
