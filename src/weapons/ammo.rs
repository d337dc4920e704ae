//! Ammunition types weapons draw from

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoType {
    /// Energy and melee weapons
    #[default]
    #[serde(rename = "none")]
    NotApplicable,
    /// Personal infantry weapons (tracked per trooper, not in bins)
    Infantry,
    Narc,
    #[serde(rename = "inarc")]
    INarc,
    Lrm,
    Srm,
    Mrm,
    #[serde(rename = "ac")]
    Autocannon,
    Gauss,
    #[serde(rename = "mg")]
    MachineGun,
    Artillery,
}

impl AmmoType {
    /// Whether this kind of ammunition is kept in separately tracked bins;
    /// see `WeaponSpec::needs_ammo_bin` for one-shot weapons
    pub fn needs_ammo_bin(self) -> bool {
        !matches!(self, AmmoType::NotApplicable | AmmoType::Infantry)
    }
}
