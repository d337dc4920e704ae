//! Availability resolution
//!
//! Decides whether a weapon may be fielded in a given year, under a rules
//! level, optionally by a specific faction. Four gates are checked in order:
//!
//! 1. introduction date (too early / never introduced)
//! 2. extinction window (extinct until reintroduced)
//! 3. rules level (intro-level, unofficial, optionally tech phase)
//! 4. faction (prototype / production / reintroduction factions)
//!
//! A weapon is legal only when it passes all four. The result is always a
//! [`Verdict`] value; "not legal" is an ordinary outcome, not an error.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::advancement::{Milestone, TechAdvancement, TechPhase, Timeline};
use super::faction::{Faction, FactionSet};
use crate::catalog::Catalog;
use crate::core::calendar::Era;
use crate::core::config::ResolverConfig;
use crate::core::types::{RulesLevel, TechBase, TechRating, Year};
use crate::weapons::WeaponSpec;

/// What is being asked of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub year: Year,
    pub rules_level: RulesLevel,
    pub faction: Option<Faction>,
    /// Lineage to evaluate; None (or `All`) lets the resolver pick the more
    /// permissive base of a dual-base weapon
    pub tech_base: Option<TechBase>,
}

impl AvailabilityQuery {
    pub fn new(year: Year, rules_level: RulesLevel) -> Self {
        Self {
            year,
            rules_level,
            faction: None,
            tech_base: None,
        }
    }

    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn with_tech_base(mut self, base: TechBase) -> Self {
        self.tech_base = Some(base);
        self
    }
}

/// Why a verdict came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictReason {
    Available,
    /// Available, but not to the requested faction
    WrongFaction,
    RulesLevel,
    Extinct,
    TooEarly,
    /// The base has no introduction date at all
    NeverIntroduced,
    /// The weapon has no timeline for the requested base
    WrongTechBase,
}

impl VerdictReason {
    // Lower is more permissive
    fn rank(self) -> u8 {
        match self {
            VerdictReason::Available => 0,
            VerdictReason::WrongFaction => 1,
            VerdictReason::RulesLevel => 2,
            VerdictReason::Extinct => 3,
            VerdictReason::TooEarly => 4,
            VerdictReason::NeverIntroduced => 5,
            VerdictReason::WrongTechBase => 6,
        }
    }
}

/// Outcome of an availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub legal: bool,
    /// Era availability rating; X when the weapon does not exist at that date
    pub availability: TechRating,
    pub reason: VerdictReason,
    pub era: Era,
    pub phase: Option<TechPhase>,
    /// Base the verdict was decided on
    pub tech_base: Option<TechBase>,
    pub introduced: Option<Year>,
}

impl Verdict {
    /// Whether the weapon cannot be used at all; a faction restriction is
    /// soft and left to the caller
    pub fn is_hard_failure(&self) -> bool {
        !self.legal && self.reason != VerdictReason::WrongFaction
    }

    fn unavailable(
        reason: VerdictReason,
        era: Era,
        base: Option<TechBase>,
        introduced: Option<Year>,
    ) -> Self {
        Self {
            legal: false,
            availability: TechRating::X,
            reason,
            era,
            phase: None,
            tech_base: base,
            introduced,
        }
    }

    /// Ordering by permissiveness: `Less` means `self` is more permissive
    fn permissiveness(&self, other: &Verdict) -> Ordering {
        self.reason
            .rank()
            .cmp(&other.reason.rank())
            .then_with(|| match (self.introduced, other.introduced) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.availability.cmp(&other.availability))
    }
}

/// Resolves availability verdicts under an explicit configuration
#[derive(Debug, Clone, Default)]
pub struct AvailabilityResolver {
    config: ResolverConfig,
}

impl AvailabilityResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, spec: &WeaponSpec, query: &AvailabilityQuery) -> Verdict {
        let verdict = self.resolve_tech(spec.tech(), query);
        tracing::trace!(
            weapon = spec.name(),
            year = query.year,
            reason = ?verdict.reason,
            "Resolved availability"
        );
        verdict
    }

    pub fn resolve_tech(&self, tech: &TechAdvancement, query: &AvailabilityQuery) -> Verdict {
        let era = self.config.eras.era_of(query.year);

        match query.tech_base {
            Some(base) if base != TechBase::All => match tech.timeline(base) {
                Some(timeline) => self.evaluate(tech, base, timeline, query, era),
                None => Verdict::unavailable(VerdictReason::WrongTechBase, era, Some(base), None),
            },
            _ => tech
                .timelines()
                .map(|(base, timeline)| self.evaluate(tech, base, timeline, query, era))
                .reduce(|best, next| {
                    if next.permissiveness(&best) == Ordering::Less {
                        next
                    } else {
                        best
                    }
                })
                .unwrap_or_else(|| {
                    Verdict::unavailable(VerdictReason::WrongTechBase, era, None, None)
                }),
        }
    }

    /// Resolve every catalog entry in parallel, in catalog order
    pub fn resolve_catalog<'c>(
        &self,
        catalog: &'c Catalog,
        query: &AvailabilityQuery,
    ) -> Vec<(&'c Arc<WeaponSpec>, Verdict)> {
        catalog
            .entries()
            .par_iter()
            .map(|spec| (spec, self.resolve(spec, query)))
            .collect()
    }

    /// Catalog entries that are legal for `query`
    pub fn legal_weapons<'c>(
        &self,
        catalog: &'c Catalog,
        query: &AvailabilityQuery,
    ) -> Vec<&'c Arc<WeaponSpec>> {
        catalog
            .entries()
            .par_iter()
            .filter(|spec| self.resolve(spec, query).legal)
            .collect()
    }

    fn evaluate(
        &self,
        tech: &TechAdvancement,
        base: TechBase,
        timeline: &Timeline,
        query: &AvailabilityQuery,
        era: Era,
    ) -> Verdict {
        let year = query.year;
        let Some(introduced) = timeline.introduction() else {
            return Verdict::unavailable(VerdictReason::NeverIntroduced, era, Some(base), None);
        };
        let Some(phase) = timeline.phase_at(year) else {
            return Verdict::unavailable(VerdictReason::TooEarly, era, Some(base), Some(introduced));
        };
        if timeline.is_extinct_at(year) {
            return Verdict::unavailable(VerdictReason::Extinct, era, Some(base), Some(introduced));
        }

        let mut verdict = Verdict {
            legal: true,
            availability: tech.availability_in(era),
            reason: VerdictReason::Available,
            era,
            phase: Some(phase),
            tech_base: Some(base),
            introduced: Some(introduced),
        };

        if !self.rules_permit(tech, phase, query.rules_level) {
            verdict.legal = false;
            verdict.reason = VerdictReason::RulesLevel;
        } else if let Some(faction) = query.faction {
            if !self.faction_permits(tech, timeline, phase, year, faction) {
                verdict.legal = false;
                verdict.reason = VerdictReason::WrongFaction;
            }
        }
        verdict
    }

    /// Rules level a record needs, before phase gating
    fn record_level(tech: &TechAdvancement) -> RulesLevel {
        if tech.is_unofficial() {
            RulesLevel::Unofficial
        } else if tech.is_intro_level() {
            RulesLevel::Introductory
        } else {
            RulesLevel::Standard
        }
    }

    fn rules_permit(&self, tech: &TechAdvancement, phase: TechPhase, level: RulesLevel) -> bool {
        let mut required = Self::record_level(tech);
        if self.config.strict_phase_gating {
            let phase_level = match phase {
                TechPhase::Experimental => RulesLevel::Experimental,
                TechPhase::Advanced => RulesLevel::Advanced,
                TechPhase::Standard => RulesLevel::Introductory,
            };
            required = required.max(phase_level);
        }
        if level == RulesLevel::Introductory && phase == TechPhase::Experimental {
            return false;
        }
        required <= level
    }

    fn faction_permits(
        &self,
        tech: &TechAdvancement,
        timeline: &Timeline,
        phase: TechPhase,
        year: Year,
        faction: Faction,
    ) -> bool {
        let allowed: FactionSet = if self.in_reintroduction_era(timeline, year) {
            tech.reintroduction_factions().union(tech.production_factions())
        } else {
            match phase {
                TechPhase::Standard => return true,
                TechPhase::Advanced => tech
                    .prototype_factions()
                    .union(tech.production_factions()),
                TechPhase::Experimental => tech.prototype_factions().clone(),
            }
        };
        allowed.is_empty() || allowed.contains(faction)
    }

    /// Reintroduced tech stays with the reintroducing factions for the rest
    /// of the era it came back in
    fn in_reintroduction_era(&self, timeline: &Timeline, year: Year) -> bool {
        match timeline.date(Milestone::Reintroduction) {
            Some(back) if year >= back => {
                self.config.eras.era_of(back) == self.config.eras.era_of(year)
            }
            _ => false,
        }
    }
}

/// Resolve with the default configuration
pub fn resolve_availability(
    spec: &WeaponSpec,
    year: Year,
    rules_level: RulesLevel,
    faction: Option<Faction>,
) -> Verdict {
    let mut query = AvailabilityQuery::new(year, rules_level);
    query.faction = faction;
    AvailabilityResolver::default().resolve(spec, &query)
}
