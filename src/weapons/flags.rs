//! Weapon capability flags
//!
//! Flags are tags drawn from a closed vocabulary. A flag set is built by
//! starting from a family's defaults and folding unions and differences over
//! it in declaration order, so later steps can retract defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability tag of a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponFlag {
    // Mounting platforms
    MechWeapon,
    TankWeapon,
    AeroWeapon,
    ProtoWeapon,
    BattleArmorWeapon,
    Infantry,
    // Delivery
    DirectFire,
    Energy,
    Laser,
    Pulse,
    Ballistic,
    Missile,
    Artillery,
    Flamer,
    Narc,
    // Special handling
    OneShot,
    DoubleOneShot,
    /// Cannot start fires
    NoFires,
    /// Range is not expressed as ordered brackets
    SpecialRange,
}

/// Single step of a flag fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagOp {
    Union(WeaponFlag),
    Difference(WeaponFlag),
}

/// Set of weapon capability flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(BTreeSet<WeaponFlag>);

impl FlagSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn of(flags: &[WeaponFlag]) -> Self {
        Self(flags.iter().copied().collect())
    }

    pub fn union(mut self, flag: WeaponFlag) -> Self {
        self.0.insert(flag);
        self
    }

    /// Remove a flag; removing an absent flag is a no-op
    pub fn difference(mut self, flag: WeaponFlag) -> Self {
        self.0.remove(&flag);
        self
    }

    pub fn union_set(mut self, other: &FlagSet) -> Self {
        self.0.extend(other.0.iter().copied());
        self
    }

    pub fn has(&self, flag: WeaponFlag) -> bool {
        self.0.contains(&flag)
    }

    pub fn apply(self, op: FlagOp) -> Self {
        match op {
            FlagOp::Union(flag) => self.union(flag),
            FlagOp::Difference(flag) => self.difference(flag),
        }
    }

    /// Apply `ops` in order on top of this set
    pub fn fold<'a>(self, ops: impl IntoIterator<Item = &'a FlagOp>) -> Self {
        ops.into_iter().fold(self, |set, op| set.apply(*op))
    }

    pub fn iter(&self) -> impl Iterator<Item = WeaponFlag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject flag combinations that describe contradictory weapons
    pub fn check_consistency(&self) -> Result<(), String> {
        const EXCLUSIVE: [(WeaponFlag, WeaponFlag); 2] = [
            (WeaponFlag::OneShot, WeaponFlag::DoubleOneShot),
            (WeaponFlag::Energy, WeaponFlag::Ballistic),
        ];
        for (a, b) in EXCLUSIVE {
            if self.has(a) && self.has(b) {
                return Err(format!("flags {:?} and {:?} are mutually exclusive", a, b));
            }
        }
        if self.has(WeaponFlag::Laser) && !self.has(WeaponFlag::Energy) {
            return Err("laser weapons must be energy weapons".into());
        }
        if self.has(WeaponFlag::Pulse) && !self.has(WeaponFlag::Laser) {
            return Err("pulse flag requires the laser flag".into());
        }
        Ok(())
    }

    /// Internal shots allowed by the one-shot flags, if any
    pub fn one_shot_capacity(&self) -> Option<u32> {
        if self.has(WeaponFlag::DoubleOneShot) {
            Some(2)
        } else if self.has(WeaponFlag::OneShot) {
            Some(1)
        } else {
            None
        }
    }
}

impl FromIterator<WeaponFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = WeaponFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
