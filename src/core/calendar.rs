//! Era calendar for availability buckets
//!
//! Availability ratings are tracked per historical era. The calendar maps
//! an in-universe year onto one of four eras.

use serde::{Deserialize, Serialize};

use super::types::Year;

/// Historical era used to bucket availability ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    StarLeague,     // ..=2780
    SuccessionWars, // 2781..=3049
    ClanInvasion,   // 3050..=3130
    DarkAge,        // 3131..
}

impl Era {
    pub const ALL: [Era; 4] = [
        Era::StarLeague,
        Era::SuccessionWars,
        Era::ClanInvasion,
        Era::DarkAge,
    ];

    /// Position of this era in a per-era availability table
    pub fn index(self) -> usize {
        match self {
            Era::StarLeague => 0,
            Era::SuccessionWars => 1,
            Era::ClanInvasion => 2,
            Era::DarkAge => 3,
        }
    }
}

/// Last year of each of the first three eras; the Dark Age is open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraCalendar {
    pub star_league_end: Year,
    pub succession_wars_end: Year,
    pub clan_invasion_end: Year,
}

impl EraCalendar {
    pub fn era_of(&self, year: Year) -> Era {
        if year <= self.star_league_end {
            Era::StarLeague
        } else if year <= self.succession_wars_end {
            Era::SuccessionWars
        } else if year <= self.clan_invasion_end {
            Era::ClanInvasion
        } else {
            Era::DarkAge
        }
    }

    /// First year of the given era (None for the open-ended first era)
    pub fn start_of(&self, era: Era) -> Option<Year> {
        match era {
            Era::StarLeague => None,
            Era::SuccessionWars => Some(self.star_league_end + 1),
            Era::ClanInvasion => Some(self.succession_wars_end + 1),
            Era::DarkAge => Some(self.clan_invasion_end + 1),
        }
    }
}

impl Default for EraCalendar {
    fn default() -> Self {
        Self {
            star_league_end: 2780,
            succession_wars_end: 3049,
            clan_invasion_end: 3130,
        }
    }
}
