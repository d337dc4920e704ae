//! Declarative weapon definitions
//!
//! Weapon tables are written as TOML text, one `[[weapon]]` table per
//! variant. Each record names a family, folds flag operations over the
//! family defaults and carries its tech advancement table:
//!
//! ```toml
//! [[weapon]]
//! name = "iNarc (OS)"
//! internal_name = "ISImprovedNarc (OS)"
//! family = "narc"
//! flags = [{ union = "one_shot" }, { difference = "proto_weapon" }]
//! ranges = [4, 9, 15, 18]
//!
//! [weapon.tech]
//! base = "is"
//! rating = "E"
//! availability = ["X", "X", "E", "D"]
//! is_advancement = [3054, 3062, 3070, "none", "none"]
//! production_factions = ["CS", "WB"]
//! ```
//!
//! Reading the text from disk is left to the caller.

use serde::Deserialize;

use super::registry::CatalogBuilder;
use crate::core::error::{ArmoryError, Result};
use crate::core::types::{TechBase, TechRating, Year, DATE_ES, DATE_PS};
use crate::tech::{Faction, FactionSet, TechAdvancement, TechAdvancementBuilder};
use crate::weapons::{
    AmmoType, Damage, FlagOp, InfantryStats, WeaponFamily, WeaponSpec, WeaponSpecBuilder,
};

#[derive(Debug, Deserialize)]
struct DefinitionFile {
    #[serde(default, rename = "weapon")]
    weapons: Vec<WeaponDefinition>,
}

/// One weapon record as written in a table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponDefinition {
    pub name: String,
    #[serde(default)]
    pub internal_name: Option<String>,
    #[serde(default)]
    pub lookup_names: Vec<String>,
    #[serde(default)]
    pub sorting_name: Option<String>,
    #[serde(default)]
    pub rules_refs: Option<String>,
    #[serde(default)]
    pub family: WeaponFamily,
    #[serde(default)]
    pub flags: Vec<FlagOp>,
    #[serde(default)]
    pub ammo: AmmoType,
    #[serde(default)]
    pub damage: Option<DamageDef>,
    #[serde(default)]
    pub heat: u32,
    #[serde(default)]
    pub rack_size: u32,
    #[serde(default)]
    pub internal_shots: Option<u32>,
    #[serde(default)]
    pub ranges: Option<[u32; 4]>,
    #[serde(default)]
    pub minimum_range: Option<u32>,
    #[serde(default)]
    pub tonnage: f64,
    #[serde(default)]
    pub criticals: u32,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub bv: f64,
    #[serde(default)]
    pub infantry: Option<InfantryStats>,
    pub tech: TechDefinition,
}

/// Damage written either as a number or as a keyword
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DamageDef {
    Fixed(u32),
    Keyword(String),
}

impl DamageDef {
    fn resolve(&self) -> std::result::Result<Damage, String> {
        match self {
            DamageDef::Fixed(n) => Ok(Damage::Fixed(*n)),
            DamageDef::Keyword(word) => match word.to_ascii_lowercase().as_str() {
                "cluster" => Ok(Damage::ByClusterTable),
                "variable" => Ok(Damage::Variable),
                "special" => Ok(Damage::Special),
                other => Err(format!("unknown damage keyword '{}'", other)),
            },
        }
    }
}

/// Milestone date written as a year or as "none", "PS" or "ES"
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateDef {
    Year(Year),
    Keyword(String),
}

impl DateDef {
    fn resolve(&self) -> std::result::Result<Option<Year>, String> {
        match self {
            DateDef::Year(y) => Ok(Some(*y)),
            DateDef::Keyword(word) => match word.to_ascii_lowercase().as_str() {
                "none" | "-" => Ok(None),
                "ps" => Ok(Some(DATE_PS)),
                "es" => Ok(Some(DATE_ES)),
                other => Err(format!("unknown date keyword '{}'", other)),
            },
        }
    }
}

fn resolve_dates(dates: &[DateDef; 5]) -> std::result::Result<[Option<Year>; 5], String> {
    let mut out = [None; 5];
    for (slot, date) in out.iter_mut().zip(dates) {
        *slot = date.resolve()?;
    }
    Ok(out)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TechDefinition {
    pub base: TechBase,
    #[serde(default)]
    pub intro_level: bool,
    #[serde(default)]
    pub unofficial: bool,
    pub rating: TechRating,
    pub availability: [TechRating; 4],
    #[serde(default)]
    pub is_advancement: Option<[DateDef; 5]>,
    #[serde(default)]
    pub clan_advancement: Option<[DateDef; 5]>,
    #[serde(default)]
    pub advancement: Option<[DateDef; 5]>,
    #[serde(default)]
    pub is_approximate: Option<[bool; 5]>,
    #[serde(default)]
    pub clan_approximate: Option<[bool; 5]>,
    #[serde(default)]
    pub approximate: Option<[bool; 5]>,
    #[serde(default)]
    pub prototype_factions: Vec<Faction>,
    #[serde(default)]
    pub production_factions: Vec<Faction>,
    #[serde(default)]
    pub reintroduction_factions: Vec<Faction>,
}

fn collect_factions(factions: &[Faction]) -> FactionSet {
    factions.iter().copied().collect()
}

impl TechDefinition {
    fn to_builder(&self) -> std::result::Result<TechAdvancementBuilder, String> {
        let mut builder = TechAdvancement::builder()
            .tech_base(self.base)
            .intro_level(self.intro_level)
            .unofficial(self.unofficial)
            .tech_rating(self.rating)
            .availability(self.availability)
            .prototype_factions(collect_factions(&self.prototype_factions))
            .production_factions(collect_factions(&self.production_factions))
            .reintroduction_factions(collect_factions(&self.reintroduction_factions));

        if let Some(dates) = &self.is_advancement {
            builder = builder.is_advancement(resolve_dates(dates)?);
        }
        if let Some(dates) = &self.clan_advancement {
            builder = builder.clan_advancement(resolve_dates(dates)?);
        }
        if let Some(dates) = &self.advancement {
            builder = builder.advancement(resolve_dates(dates)?);
        }
        if let Some(flags) = self.is_approximate {
            builder = builder.is_approximate(flags);
        }
        if let Some(flags) = self.clan_approximate {
            builder = builder.clan_approximate(flags);
        }
        if let Some(flags) = self.approximate {
            builder = builder.approximate(flags);
        }
        Ok(builder)
    }
}

impl WeaponDefinition {
    /// Turn the record into a builder, family defaults first
    pub fn to_builder(&self) -> Result<WeaponSpecBuilder> {
        let fail = |message: String| ArmoryError::configuration(self.name.as_str(), message);

        let mut builder = WeaponSpec::builder(self.name.as_str())
            .family(self.family)
            .flag_ops(&self.flags)
            .ammo_type(self.ammo)
            .heat(self.heat)
            .rack_size(self.rack_size)
            .tonnage(self.tonnage)
            .criticals(self.criticals)
            .cost(self.cost)
            .battle_value(self.bv)
            .tech(self.tech.to_builder().map_err(fail)?);

        if let Some(internal) = &self.internal_name {
            builder = builder.internal_name(internal.as_str());
        }
        for lookup in &self.lookup_names {
            builder = builder.lookup_name(lookup.as_str());
        }
        if let Some(sorting) = &self.sorting_name {
            builder = builder.sorting_name(sorting.as_str());
        }
        if let Some(refs) = &self.rules_refs {
            builder = builder.rules_refs(refs.as_str());
        }
        if let Some(damage) = &self.damage {
            builder = builder.damage(damage.resolve().map_err(fail)?);
        }
        if let Some([short, medium, long, extreme]) = self.ranges {
            builder = builder.ranges(short, medium, long, extreme);
        }
        if let Some(shots) = self.internal_shots {
            builder = builder.internal_shots(shots);
        }
        if let Some(min) = self.minimum_range {
            builder = builder.minimum_range(min);
        }
        if let Some(stats) = self.infantry {
            builder = builder.infantry(stats);
        }
        Ok(builder)
    }
}

/// Decode a weapon table without validating its records
pub fn parse_records(content: &str) -> Result<Vec<WeaponDefinition>> {
    let file: DefinitionFile = toml::from_str(content)?;
    Ok(file.weapons)
}

/// Decode and validate every record of a weapon table
pub fn parse_definitions(content: &str) -> Result<Vec<WeaponSpec>> {
    parse_records(content)?
        .iter()
        .map(|record| record.to_builder()?.build())
        .collect()
}

/// Validate a whole table, then register its weapons
///
/// A table with any invalid record, or with a name already taken in the
/// builder or elsewhere in the table, registers nothing.
pub fn load_into(builder: &mut CatalogBuilder, content: &str) -> Result<usize> {
    let specs = parse_definitions(content)?;
    builder.register_all(specs)
}
