//! Weapon specifications
//!
//! One generic record type describes every weapon variant. Records are
//! assembled by [`WeaponSpecBuilder`], validated once, and never change
//! afterwards.

use serde::{Deserialize, Serialize};

use super::ammo::AmmoType;
use super::family::WeaponFamily;
use super::flags::{FlagOp, FlagSet, WeaponFlag};
use crate::core::error::{ArmoryError, Result};
use crate::tech::advancement::{TechAdvancement, TechAdvancementBuilder};

/// How much damage a hit deals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Damage {
    Fixed(u32),
    /// Rolled on the cluster hits table per rack
    ByClusterTable,
    /// Depends on range or the firing unit
    Variable,
    /// No direct damage (beacons, designators)
    Special,
}

/// Range bracket a target distance falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeBracket {
    Short,
    Medium,
    Long,
    Extreme,
}

/// Upper bounds of each range bracket, in hexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBrackets {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
    pub extreme: u32,
}

impl RangeBrackets {
    pub fn new(short: u32, medium: u32, long: u32, extreme: u32) -> Self {
        Self {
            short,
            medium,
            long,
            extreme,
        }
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.short < self.medium && self.medium < self.long && self.long < self.extreme
    }

    /// Bracket holding `distance`, or None when out of range
    pub fn bracket_at(&self, distance: u32) -> Option<RangeBracket> {
        if distance <= self.short {
            Some(RangeBracket::Short)
        } else if distance <= self.medium {
            Some(RangeBracket::Medium)
        } else if distance <= self.long {
            Some(RangeBracket::Long)
        } else if distance <= self.extreme {
            Some(RangeBracket::Extreme)
        } else {
            None
        }
    }
}

/// Per-trooper statistics of a personal infantry weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfantryStats {
    /// Damage per trooper per turn
    pub damage: f64,
    /// Range increment in hexes; 0 means melee only
    pub range: u32,
    pub shots: u32,
    pub bursts: u32,
}

impl InfantryStats {
    /// Brackets at one to four range increments; None for melee weapons
    /// or an increment too large to multiply out
    pub fn derived_ranges(&self) -> Option<RangeBrackets> {
        let r = self.range;
        if r == 0 {
            return None;
        }
        Some(RangeBrackets::new(r, r.checked_mul(2)?, r.checked_mul(3)?, r.checked_mul(4)?))
    }
}

/// Complete, validated weapon record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponSpec {
    name: String,
    internal_name: String,
    lookup_names: Vec<String>,
    sorting_name: Option<String>,
    rules_refs: Option<String>,
    family: WeaponFamily,
    ammo_type: AmmoType,
    damage: Damage,
    heat: u32,
    rack_size: u32,
    internal_shots: Option<u32>,
    ranges: Option<RangeBrackets>,
    minimum_range: Option<u32>,
    tonnage: f64,
    criticals: u32,
    cost: f64,
    battle_value: f64,
    flags: FlagSet,
    infantry: Option<InfantryStats>,
    tech: TechAdvancement,
}

impl WeaponSpec {
    pub fn builder(name: impl Into<String>) -> WeaponSpecBuilder {
        WeaponSpecBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn lookup_names(&self) -> &[String] {
        &self.lookup_names
    }

    /// Display name, internal name and every lookup name
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        [self.name.as_str(), self.internal_name.as_str()]
            .into_iter()
            .chain(self.lookup_names.iter().map(String::as_str))
    }

    pub fn sorting_name(&self) -> Option<&str> {
        self.sorting_name.as_deref()
    }

    /// Key for ordered listings; falls back to the display name
    pub fn sort_key(&self) -> &str {
        self.sorting_name.as_deref().unwrap_or(&self.name)
    }

    pub fn rules_refs(&self) -> Option<&str> {
        self.rules_refs.as_deref()
    }

    pub fn family(&self) -> WeaponFamily {
        self.family
    }

    pub fn ammo_type(&self) -> AmmoType {
        self.ammo_type
    }

    pub fn damage(&self) -> Damage {
        self.damage
    }

    pub fn heat(&self) -> u32 {
        self.heat
    }

    pub fn rack_size(&self) -> u32 {
        self.rack_size
    }

    /// Shots carried inside the weapon itself (one-shot launchers)
    pub fn internal_shots(&self) -> Option<u32> {
        self.internal_shots
    }

    pub fn is_one_shot(&self) -> bool {
        self.flags.one_shot_capacity().is_some()
    }

    /// Whether the weapon feeds from a separately tracked ammunition bin;
    /// one-shot weapons carry their ammunition internally
    pub fn needs_ammo_bin(&self) -> bool {
        self.ammo_type.needs_ammo_bin() && !self.is_one_shot()
    }

    /// Declared range brackets
    pub fn ranges(&self) -> Option<RangeBrackets> {
        self.ranges
    }

    /// Declared brackets, or those derived from infantry range increments
    pub fn effective_ranges(&self) -> Option<RangeBrackets> {
        self.ranges
            .or_else(|| self.infantry.and_then(|i| i.derived_ranges()))
    }

    pub fn minimum_range(&self) -> Option<u32> {
        self.minimum_range
    }

    pub fn tonnage(&self) -> f64 {
        self.tonnage
    }

    pub fn criticals(&self) -> u32 {
        self.criticals
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn battle_value(&self) -> f64 {
        self.battle_value
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn has_flag(&self, flag: WeaponFlag) -> bool {
        self.flags.has(flag)
    }

    pub fn infantry(&self) -> Option<&InfantryStats> {
        self.infantry.as_ref()
    }

    pub fn tech(&self) -> &TechAdvancement {
        &self.tech
    }
}

/// Step-by-step construction of a [`WeaponSpec`]
#[derive(Debug, Clone)]
pub struct WeaponSpecBuilder {
    name: String,
    internal_name: Option<String>,
    lookup_names: Vec<String>,
    sorting_name: Option<String>,
    rules_refs: Option<String>,
    family: WeaponFamily,
    ammo_type: AmmoType,
    damage: Damage,
    heat: u32,
    rack_size: u32,
    internal_shots: Option<u32>,
    ranges: Option<RangeBrackets>,
    minimum_range: Option<u32>,
    tonnage: f64,
    criticals: u32,
    cost: f64,
    battle_value: f64,
    flags: FlagSet,
    infantry: Option<InfantryStats>,
    tech: Option<TechAdvancementBuilder>,
}

impl WeaponSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            internal_name: None,
            lookup_names: Vec::new(),
            sorting_name: None,
            rules_refs: None,
            family: WeaponFamily::Generic,
            ammo_type: AmmoType::NotApplicable,
            damage: Damage::Special,
            heat: 0,
            rack_size: 0,
            internal_shots: None,
            ranges: None,
            minimum_range: None,
            tonnage: 0.0,
            criticals: 0,
            cost: 0.0,
            battle_value: 0.0,
            flags: FlagSet::new(),
            infantry: None,
            tech: None,
        }
    }

    /// Defaults to the display name when never set
    pub fn internal_name(mut self, name: impl Into<String>) -> Self {
        self.internal_name = Some(name.into());
        self
    }

    pub fn lookup_name(mut self, name: impl Into<String>) -> Self {
        self.lookup_names.push(name.into());
        self
    }

    pub fn sorting_name(mut self, name: impl Into<String>) -> Self {
        self.sorting_name = Some(name.into());
        self
    }

    pub fn rules_refs(mut self, refs: impl Into<String>) -> Self {
        self.rules_refs = Some(refs.into());
        self
    }

    /// Select the family and reset flags to its defaults
    pub fn family(mut self, family: WeaponFamily) -> Self {
        self.family = family;
        self.flags = family.default_flags();
        self
    }

    pub fn ammo_type(mut self, ammo: AmmoType) -> Self {
        self.ammo_type = ammo;
        self
    }

    pub fn damage(mut self, damage: Damage) -> Self {
        self.damage = damage;
        self
    }

    pub fn heat(mut self, heat: u32) -> Self {
        self.heat = heat;
        self
    }

    pub fn rack_size(mut self, size: u32) -> Self {
        self.rack_size = size;
        self
    }

    /// Only meaningful for one-shot weapons; defaults to their capacity
    pub fn internal_shots(mut self, shots: u32) -> Self {
        self.internal_shots = Some(shots);
        self
    }

    pub fn ranges(mut self, short: u32, medium: u32, long: u32, extreme: u32) -> Self {
        self.ranges = Some(RangeBrackets::new(short, medium, long, extreme));
        self
    }

    pub fn minimum_range(mut self, range: u32) -> Self {
        self.minimum_range = Some(range);
        self
    }

    pub fn tonnage(mut self, tons: f64) -> Self {
        self.tonnage = tons;
        self
    }

    pub fn criticals(mut self, slots: u32) -> Self {
        self.criticals = slots;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn battle_value(mut self, bv: f64) -> Self {
        self.battle_value = bv;
        self
    }

    pub fn union(mut self, flag: WeaponFlag) -> Self {
        self.flags = self.flags.union(flag);
        self
    }

    pub fn difference(mut self, flag: WeaponFlag) -> Self {
        self.flags = self.flags.difference(flag);
        self
    }

    pub fn flag_ops<'a>(mut self, ops: impl IntoIterator<Item = &'a FlagOp>) -> Self {
        self.flags = self.flags.fold(ops);
        self
    }

    pub fn infantry(mut self, stats: InfantryStats) -> Self {
        self.infantry = Some(stats);
        self
    }

    pub fn tech(mut self, tech: TechAdvancementBuilder) -> Self {
        self.tech = Some(tech);
        self
    }

    pub fn build(self) -> Result<WeaponSpec> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ArmoryError::configuration("<unnamed>", "weapon name is empty"));
        }
        let fail = |message: String| ArmoryError::configuration(name.as_str(), message);

        let internal_name = self.internal_name.unwrap_or_else(|| name.clone());
        if internal_name.trim().is_empty() {
            return Err(fail("internal name is empty".into()));
        }
        if self.lookup_names.iter().any(|n| n.trim().is_empty()) {
            return Err(fail("lookup name is empty".into()));
        }

        for (label, value) in [
            ("tonnage", self.tonnage),
            ("cost", self.cost),
            ("battle value", self.battle_value),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(fail(format!("{} must be a non-negative number, got {}", label, value)));
            }
        }

        if let Some(ranges) = self.ranges {
            if !self.flags.has(WeaponFlag::SpecialRange) && !ranges.is_strictly_increasing() {
                return Err(fail(format!(
                    "range brackets {}/{}/{}/{} are not strictly increasing",
                    ranges.short, ranges.medium, ranges.long, ranges.extreme
                )));
            }
        }

        self.flags.check_consistency().map_err(fail)?;

        match (self.flags.has(WeaponFlag::Infantry), &self.infantry) {
            (true, None) => return Err(fail("infantry weapon without infantry stats".into())),
            (false, Some(_)) => return Err(fail("infantry stats on a non-infantry weapon".into())),
            _ => {}
        }

        if let Some(stats) = &self.infantry {
            if stats.derived_ranges().is_none() && stats.range > 0 {
                return Err(fail(format!("infantry range increment {} is too large", stats.range)));
            }
        }

        let internal_shots = match self.flags.one_shot_capacity() {
            Some(capacity) => {
                let declared = self
                    .internal_shots
                    .or(self.infantry.map(|stats| stats.shots))
                    .unwrap_or(capacity);
                if declared == 0 || declared > capacity {
                    return Err(fail(format!(
                        "one-shot weapon declares {} internal shots (at most {})",
                        declared, capacity
                    )));
                }
                Some(declared)
            }
            None if self.internal_shots.is_some() => {
                return Err(fail("internal shots on a weapon that is not one-shot".into()));
            }
            None => None,
        };

        let tech = self
            .tech
            .ok_or_else(|| fail("no tech advancement record".into()))?
            .build_for(&name)?;

        Ok(WeaponSpec {
            name,
            internal_name,
            lookup_names: self.lookup_names,
            sorting_name: self.sorting_name,
            rules_refs: self.rules_refs,
            family: self.family,
            ammo_type: self.ammo_type,
            damage: self.damage,
            heat: self.heat,
            rack_size: self.rack_size,
            internal_shots,
            ranges: self.ranges,
            minimum_range: self.minimum_range,
            tonnage: self.tonnage,
            criticals: self.criticals,
            cost: self.cost,
            battle_value: self.battle_value,
            flags: self.flags,
            infantry: self.infantry,
            tech,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{TechBase, TechRating, DATE_ES};
    use crate::tech::faction::Faction;

    fn inarc_tech() -> TechAdvancementBuilder {
        TechAdvancement::builder()
            .tech_base(TechBase::InnerSphere)
            .tech_rating(TechRating::E)
            .availability([TechRating::X, TechRating::X, TechRating::E, TechRating::D])
            .is_advancement([Some(3054), Some(3062), Some(3070), None, None])
            .is_approximate([true, false, false, false, false])
            .prototype_factions(Faction::ComStar)
            .production_factions(Faction::ComStar | Faction::WordOfBlake)
    }

    fn inarc_os() -> WeaponSpecBuilder {
        WeaponSpec::builder("iNarc (OS)")
            .internal_name("ISImprovedNarc (OS)")
            .lookup_name("IS OS iNarc Beacon")
            .lookup_name("IS iNarc Missile Beacon (OS)")
            .sorting_name("Narc X OS")
            .family(WeaponFamily::Narc)
            .ammo_type(AmmoType::INarc)
            .rack_size(1)
            .ranges(4, 9, 15, 18)
            .tonnage(5.5)
            .criticals(2)
            .battle_value(15.0)
            .union(WeaponFlag::OneShot)
            .difference(WeaponFlag::ProtoWeapon)
            .cost(250_000.0)
            .rules_refs("232, TM")
            .tech(inarc_tech())
    }

    fn laser_pistol() -> WeaponSpecBuilder {
        WeaponSpec::builder("Laser Pistol (BR-25)")
            .lookup_name("BR25")
            .family(WeaponFamily::Infantry)
            .ammo_type(AmmoType::Infantry)
            .damage(Damage::Variable)
            .cost(950.0)
            .battle_value(0.01575)
            .tonnage(0.0013)
            .infantry(InfantryStats {
                damage: 0.05,
                range: 1,
                shots: 1,
                bursts: 1,
            })
            .union(WeaponFlag::NoFires)
            .union(WeaponFlag::DirectFire)
            .union(WeaponFlag::Laser)
            .union(WeaponFlag::Energy)
            .rules_refs("Shrapnel #9")
            .tech(
                TechAdvancement::builder()
                    .tech_base(TechBase::InnerSphere)
                    .is_advancement([None, None, Some(DATE_ES), None, None])
                    .tech_rating(TechRating::D)
                    .availability([TechRating::D, TechRating::D, TechRating::D, TechRating::C])
                    .is_approximate([false, false, true, false, false])
                    .production_factions(Faction::TaurianConcordat),
            )
    }

    #[test]
    fn test_one_shot_flags_after_construction() {
        let spec = inarc_os().build().unwrap();
        assert!(spec.has_flag(WeaponFlag::OneShot));
        assert!(!spec.has_flag(WeaponFlag::ProtoWeapon));
        assert!(spec.has_flag(WeaponFlag::Narc));
    }

    #[test]
    fn test_accessors() {
        let spec = inarc_os().build().unwrap();
        assert_eq!(spec.name(), "iNarc (OS)");
        assert_eq!(spec.internal_name(), "ISImprovedNarc (OS)");
        assert_eq!(spec.sort_key(), "Narc X OS");
        assert_eq!(spec.ranges(), Some(RangeBrackets::new(4, 9, 15, 18)));
        assert_eq!(spec.criticals(), 2);
        assert_eq!(spec.heat(), 0);
        assert_eq!(spec.damage(), Damage::Special);
        assert_eq!(spec.names().count(), 4);
    }

    #[test]
    fn test_one_shot_carries_its_own_ammo() {
        let spec = inarc_os().build().unwrap();
        assert!(spec.ammo_type().needs_ammo_bin());
        assert!(spec.is_one_shot());
        assert!(!spec.needs_ammo_bin());
        assert_eq!(spec.internal_shots(), Some(1));

        let reloadable = inarc_os().difference(WeaponFlag::OneShot).build().unwrap();
        assert!(reloadable.needs_ammo_bin());
        assert_eq!(reloadable.internal_shots(), None);
    }

    #[test]
    fn test_internal_shot_limits() {
        assert!(inarc_os().internal_shots(2).build().is_err());
        assert!(inarc_os().internal_shots(0).build().is_err());

        let double = inarc_os()
            .difference(WeaponFlag::OneShot)
            .union(WeaponFlag::DoubleOneShot)
            .build()
            .unwrap();
        assert_eq!(double.internal_shots(), Some(2));
        assert!(!double.needs_ammo_bin());

        let result = inarc_os()
            .difference(WeaponFlag::OneShot)
            .internal_shots(1)
            .build();
        assert!(matches!(result, Err(ArmoryError::Configuration { .. })));
    }

    #[test]
    fn test_huge_infantry_range_rejected() {
        let stats = InfantryStats {
            damage: 0.05,
            range: u32::MAX / 2,
            shots: 1,
            bursts: 1,
        };
        assert_eq!(stats.derived_ranges(), None);
        assert!(laser_pistol().infantry(stats).build().is_err());
    }

    #[test]
    fn test_internal_name_defaults_to_name() {
        let spec = laser_pistol().build().unwrap();
        assert_eq!(spec.internal_name(), "Laser Pistol (BR-25)");
        assert_eq!(spec.sort_key(), "Laser Pistol (BR-25)");
    }

    #[test]
    fn test_infantry_ranges_are_derived() {
        let spec = laser_pistol().build().unwrap();
        assert_eq!(spec.ranges(), None);
        assert_eq!(spec.effective_ranges(), Some(RangeBrackets::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_range_bracket_lookup() {
        let ranges = RangeBrackets::new(4, 9, 15, 18);
        assert_eq!(ranges.bracket_at(0), Some(RangeBracket::Short));
        assert_eq!(ranges.bracket_at(4), Some(RangeBracket::Short));
        assert_eq!(ranges.bracket_at(5), Some(RangeBracket::Medium));
        assert_eq!(ranges.bracket_at(18), Some(RangeBracket::Extreme));
        assert_eq!(ranges.bracket_at(19), None);
    }

    #[test]
    fn test_unordered_ranges_rejected() {
        let result = inarc_os().ranges(4, 9, 9, 18).build();
        assert!(matches!(result, Err(ArmoryError::Configuration { .. })));
    }

    #[test]
    fn test_special_range_skips_ordering() {
        let spec = inarc_os()
            .union(WeaponFlag::SpecialRange)
            .ranges(0, 0, 0, 0)
            .build();
        assert!(spec.is_ok());
    }

    #[test]
    fn test_one_shot_with_many_shots_rejected() {
        let result = laser_pistol()
            .union(WeaponFlag::OneShot)
            .infantry(InfantryStats {
                damage: 0.05,
                range: 1,
                shots: 5,
                bursts: 1,
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_infantry_flag_requires_stats() {
        let result = WeaponSpec::builder("Rifle")
            .family(WeaponFamily::Infantry)
            .tech(inarc_tech())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_tech_rejected() {
        let result = WeaponSpec::builder("Mystery Gun").build();
        match result {
            Err(ArmoryError::Configuration { weapon, .. }) => assert_eq!(weapon, "Mystery Gun"),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_tonnage_rejected() {
        assert!(inarc_os().tonnage(-1.0).build().is_err());
        assert!(inarc_os().battle_value(f64::NAN).build().is_err());
    }

    #[test]
    fn test_bad_tech_names_weapon() {
        let result = inarc_os()
            .tech(
                inarc_tech().is_advancement([Some(3070), Some(3062), Some(3054), None, None]),
            )
            .build();
        match result {
            Err(ArmoryError::Configuration { weapon, .. }) => assert_eq!(weapon, "iNarc (OS)"),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
