//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// In-universe calendar year
pub type Year = i32;

/// Pre-spaceflight: the tech predates recorded milestones
pub const DATE_PS: Year = 1950;

/// Early spaceflight
pub const DATE_ES: Year = 2100;

/// Parallel technology lineages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechBase {
    #[serde(rename = "is", alias = "inner_sphere")]
    InnerSphere,
    #[serde(rename = "clan")]
    Clan,
    /// Dual-base design with independent timelines for both lineages
    #[serde(rename = "all", alias = "both")]
    All,
}

impl TechBase {
    /// Whether this base covers the given (single) lineage
    pub fn covers(self, base: TechBase) -> bool {
        match self {
            TechBase::All => true,
            own => own == base || base == TechBase::All,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TechBase::InnerSphere => "IS",
            TechBase::Clan => "Clan",
            TechBase::All => "All",
        }
    }
}

impl fmt::Display for TechBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Tech rating and availability code, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TechRating {
    A,
    B,
    C,
    D,
    E,
    F,
    /// Unavailable
    X,
}

impl TechRating {
    pub fn code(self) -> char {
        match self {
            TechRating::A => 'A',
            TechRating::B => 'B',
            TechRating::C => 'C',
            TechRating::D => 'D',
            TechRating::E => 'E',
            TechRating::F => 'F',
            TechRating::X => 'X',
        }
    }
}

impl fmt::Display for TechRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TechRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(TechRating::A),
            "B" => Ok(TechRating::B),
            "C" => Ok(TechRating::C),
            "D" => Ok(TechRating::D),
            "E" => Ok(TechRating::E),
            "F" => Ok(TechRating::F),
            "X" => Ok(TechRating::X),
            other => Err(format!("unknown tech rating '{}'", other)),
        }
    }
}

/// Game rules level, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesLevel {
    Introductory,
    Standard,
    Advanced,
    Experimental,
    Unofficial,
}

impl fmt::Display for RulesLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RulesLevel::Introductory => "introductory",
            RulesLevel::Standard => "standard",
            RulesLevel::Advanced => "advanced",
            RulesLevel::Experimental => "experimental",
            RulesLevel::Unofficial => "unofficial",
        };
        f.write_str(name)
    }
}
