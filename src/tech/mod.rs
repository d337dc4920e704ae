//! Technology progression and availability

pub mod advancement;
pub mod availability;
pub mod faction;

pub use advancement::{Milestone, TechAdvancement, TechAdvancementBuilder, TechPhase, Timeline};
pub use availability::{
    resolve_availability, AvailabilityQuery, AvailabilityResolver, Verdict, VerdictReason,
};
pub use faction::{Faction, FactionSet};
