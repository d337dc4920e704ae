//! Factions and faction sets
//!
//! Prototype and production records name the factions that fielded a
//! technology. Sets combine with `|`, which is always a set union.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// In-universe faction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    // Inner Sphere powers
    #[serde(rename = "TH")]
    TerranHegemony,
    #[serde(rename = "CC")]
    CapellanConfederation,
    #[serde(rename = "DC")]
    DraconisCombine,
    #[serde(rename = "FS")]
    FederatedSuns,
    #[serde(rename = "FW")]
    FreeWorldsLeague,
    #[serde(rename = "LC")]
    LyranCommonwealth,
    #[serde(rename = "FC")]
    FederatedCommonwealth,
    #[serde(rename = "FR")]
    FreeRasalhague,
    #[serde(rename = "SIC")]
    StIvesCompact,
    #[serde(rename = "RS")]
    RepublicOfTheSphere,
    #[serde(rename = "RD")]
    RasalhagueDominion,
    #[serde(rename = "CS")]
    ComStar,
    #[serde(rename = "WB")]
    WordOfBlake,
    #[serde(rename = "MERC")]
    Mercenary,
    // Periphery
    #[serde(rename = "TC")]
    TaurianConcordat,
    #[serde(rename = "MOC")]
    MagistracyOfCanopus,
    #[serde(rename = "OA")]
    OutworldsAlliance,
    #[serde(rename = "MH")]
    MarianHegemony,
    #[serde(rename = "RW")]
    RimWorlds,
    #[serde(rename = "PER")]
    Periphery,
    // Clans
    #[serde(rename = "CLAN")]
    ClanGeneral,
    #[serde(rename = "CBS")]
    ClanBloodSpirit,
    #[serde(rename = "CGB")]
    ClanGhostBear,
    #[serde(rename = "CHH")]
    ClanHellsHorses,
    #[serde(rename = "CJF")]
    ClanJadeFalcon,
    #[serde(rename = "CSJ")]
    ClanSmokeJaguar,
    #[serde(rename = "CSV")]
    ClanSteelViper,
    #[serde(rename = "CWF")]
    ClanWolf,
    #[serde(rename = "CSA")]
    ClanSnowRaven,
}

impl Faction {
    pub const ALL: [Faction; 29] = [
        Faction::TerranHegemony,
        Faction::CapellanConfederation,
        Faction::DraconisCombine,
        Faction::FederatedSuns,
        Faction::FreeWorldsLeague,
        Faction::LyranCommonwealth,
        Faction::FederatedCommonwealth,
        Faction::FreeRasalhague,
        Faction::StIvesCompact,
        Faction::RepublicOfTheSphere,
        Faction::RasalhagueDominion,
        Faction::ComStar,
        Faction::WordOfBlake,
        Faction::Mercenary,
        Faction::TaurianConcordat,
        Faction::MagistracyOfCanopus,
        Faction::OutworldsAlliance,
        Faction::MarianHegemony,
        Faction::RimWorlds,
        Faction::Periphery,
        Faction::ClanGeneral,
        Faction::ClanBloodSpirit,
        Faction::ClanGhostBear,
        Faction::ClanHellsHorses,
        Faction::ClanJadeFalcon,
        Faction::ClanSmokeJaguar,
        Faction::ClanSteelViper,
        Faction::ClanWolf,
        Faction::ClanSnowRaven,
    ];

    /// Short code used in data records
    pub fn code(self) -> &'static str {
        match self {
            Faction::TerranHegemony => "TH",
            Faction::CapellanConfederation => "CC",
            Faction::DraconisCombine => "DC",
            Faction::FederatedSuns => "FS",
            Faction::FreeWorldsLeague => "FW",
            Faction::LyranCommonwealth => "LC",
            Faction::FederatedCommonwealth => "FC",
            Faction::FreeRasalhague => "FR",
            Faction::StIvesCompact => "SIC",
            Faction::RepublicOfTheSphere => "RS",
            Faction::RasalhagueDominion => "RD",
            Faction::ComStar => "CS",
            Faction::WordOfBlake => "WB",
            Faction::Mercenary => "MERC",
            Faction::TaurianConcordat => "TC",
            Faction::MagistracyOfCanopus => "MOC",
            Faction::OutworldsAlliance => "OA",
            Faction::MarianHegemony => "MH",
            Faction::RimWorlds => "RW",
            Faction::Periphery => "PER",
            Faction::ClanGeneral => "CLAN",
            Faction::ClanBloodSpirit => "CBS",
            Faction::ClanGhostBear => "CGB",
            Faction::ClanHellsHorses => "CHH",
            Faction::ClanJadeFalcon => "CJF",
            Faction::ClanSmokeJaguar => "CSJ",
            Faction::ClanSteelViper => "CSV",
            Faction::ClanWolf => "CWF",
            Faction::ClanSnowRaven => "CSA",
        }
    }

    pub fn is_clan(self) -> bool {
        matches!(
            self,
            Faction::ClanGeneral
                | Faction::ClanBloodSpirit
                | Faction::ClanGhostBear
                | Faction::ClanHellsHorses
                | Faction::ClanJadeFalcon
                | Faction::ClanSmokeJaguar
                | Faction::ClanSteelViper
                | Faction::ClanWolf
                | Faction::ClanSnowRaven
        )
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Faction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Faction::ALL
            .iter()
            .copied()
            .find(|f| f.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| format!("unknown faction code '{}'", code))
    }
}

/// Set of factions
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionSet(BTreeSet<Faction>);

impl FactionSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, faction: Faction) -> bool {
        self.0.contains(&faction)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Faction> + '_ {
        self.0.iter().copied()
    }

    pub fn insert(&mut self, faction: Faction) {
        self.0.insert(faction);
    }

    pub fn union(&self, other: &FactionSet) -> FactionSet {
        FactionSet(self.0.union(&other.0).copied().collect())
    }
}

impl From<Faction> for FactionSet {
    fn from(faction: Faction) -> Self {
        let mut set = FactionSet::new();
        set.insert(faction);
        set
    }
}

impl FromIterator<Faction> for FactionSet {
    fn from_iter<I: IntoIterator<Item = Faction>>(iter: I) -> Self {
        FactionSet(iter.into_iter().collect())
    }
}

impl BitOr for Faction {
    type Output = FactionSet;

    fn bitor(self, rhs: Faction) -> FactionSet {
        FactionSet::from(self) | rhs
    }
}

impl BitOr<Faction> for FactionSet {
    type Output = FactionSet;

    fn bitor(mut self, rhs: Faction) -> FactionSet {
        self.insert(rhs);
        self
    }
}

impl BitOr for FactionSet {
    type Output = FactionSet;

    fn bitor(self, rhs: FactionSet) -> FactionSet {
        self.union(&rhs)
    }
}

impl fmt::Display for FactionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().map(Faction::code).collect();
        f.write_str(&codes.join(", "))
    }
}
