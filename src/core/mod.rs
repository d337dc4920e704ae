pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Era, EraCalendar};
pub use config::ResolverConfig;
pub use error::{ArmoryError, Result};
pub use types::{RulesLevel, TechBase, TechRating, Year, DATE_ES, DATE_PS};
