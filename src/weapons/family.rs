//! Weapon families and their default capability flags

use serde::{Deserialize, Serialize};

use super::flags::{FlagSet, WeaponFlag};

/// Shared behavior group a weapon record starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponFamily {
    #[default]
    Generic,
    Laser,
    PulseLaser,
    Ballistic,
    Missile,
    Narc,
    Flamer,
    Infantry,
}

impl WeaponFamily {
    /// Flags every weapon of this family starts with
    pub fn default_flags(self) -> FlagSet {
        use WeaponFlag::*;

        let vehicle = [MechWeapon, TankWeapon, AeroWeapon, ProtoWeapon];
        let extra: &[WeaponFlag] = match self {
            WeaponFamily::Generic => return FlagSet::new(),
            WeaponFamily::Infantry => return FlagSet::of(&[Infantry]),
            WeaponFamily::Laser => &[DirectFire, Energy, Laser],
            WeaponFamily::PulseLaser => &[DirectFire, Energy, Laser, Pulse],
            WeaponFamily::Ballistic => &[DirectFire, Ballistic],
            WeaponFamily::Missile => &[Missile],
            WeaponFamily::Narc => &[Missile, Narc, NoFires],
            WeaponFamily::Flamer => &[DirectFire, Energy, Flamer],
        };
        vehicle.iter().chain(extra).copied().collect()
    }
}
