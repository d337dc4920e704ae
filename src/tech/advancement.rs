//! Tech advancement records
//!
//! A record tracks, per tech base, when a technology entered prototype
//! (experimental), limited (advanced) and common (standard) production, when
//! it went extinct and when it was reintroduced. It also carries the rating,
//! per-era availability codes and the factions that fielded it.
//!
//! Records are configured once through [`TechAdvancementBuilder`] and are
//! read-only afterwards.

use serde::{Deserialize, Serialize};

use super::faction::FactionSet;
use crate::core::calendar::Era;
use crate::core::error::{ArmoryError, Result};
use crate::core::types::{TechBase, TechRating, Year, DATE_ES, DATE_PS};

/// Milestones of a tech timeline, in their required order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Experimental,
    Advanced,
    Standard,
    Extinction,
    Reintroduction,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Milestone::Experimental,
        Milestone::Advanced,
        Milestone::Standard,
        Milestone::Extinction,
        Milestone::Reintroduction,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Production phase a technology is in at a given year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechPhase {
    /// Prototype units only
    Experimental,
    /// Limited production
    Advanced,
    /// Common production
    Standard,
}

/// Milestone dates for one tech base
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    dates: [Option<Year>; 5],
    approximate: [bool; 5],
}

impl Timeline {
    pub fn new(dates: [Option<Year>; 5]) -> Self {
        Self {
            dates,
            approximate: [false; 5],
        }
    }

    pub fn with_approximate(mut self, approximate: [bool; 5]) -> Self {
        self.approximate = approximate;
        self
    }

    pub fn date(&self, milestone: Milestone) -> Option<Year> {
        self.dates[milestone.index()]
    }

    pub fn is_approximate(&self, milestone: Milestone) -> bool {
        self.approximate[milestone.index()]
    }

    /// Earliest of the experimental, advanced and standard dates
    pub fn introduction(&self) -> Option<Year> {
        self.dates[..3].iter().flatten().copied().min()
    }

    /// Production phase at `year`, or None before introduction
    pub fn phase_at(&self, year: Year) -> Option<TechPhase> {
        let intro = self.introduction()?;
        if year < intro {
            return None;
        }
        let reached = |m: Milestone| self.date(m).is_some_and(|d| year >= d);
        if reached(Milestone::Standard) {
            Some(TechPhase::Standard)
        } else if reached(Milestone::Advanced) {
            Some(TechPhase::Advanced)
        } else {
            Some(TechPhase::Experimental)
        }
    }

    /// Whether the technology is lost at `year` (extinct and not yet back)
    pub fn is_extinct_at(&self, year: Year) -> bool {
        match self.date(Milestone::Extinction) {
            Some(extinct) if year >= extinct => !self.is_reintroduced_at(year),
            _ => false,
        }
    }

    pub fn is_reintroduced_at(&self, year: Year) -> bool {
        self.date(Milestone::Reintroduction).is_some_and(|d| year >= d)
    }

    /// Display form of a milestone date: "3054", "~3054", "ES", or "-"
    pub fn format_date(&self, milestone: Milestone) -> String {
        let Some(year) = self.date(milestone) else {
            return "-".to_string();
        };
        let text = match year {
            DATE_PS => "PS".to_string(),
            DATE_ES => "ES".to_string(),
            y => y.to_string(),
        };
        if self.is_approximate(milestone) {
            format!("~{}", text)
        } else {
            text
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.introduction().is_none() {
            return Err("no experimental, advanced or standard date".into());
        }

        // experimental <= advanced <= standard, skipping absent dates
        let mut latest: Option<(Milestone, Year)> = None;
        for milestone in [Milestone::Experimental, Milestone::Advanced, Milestone::Standard] {
            if let Some(date) = self.date(milestone) {
                if let Some((prev, prev_date)) = latest {
                    if date < prev_date {
                        return Err(format!(
                            "{:?} date {} precedes {:?} date {}",
                            milestone, date, prev, prev_date
                        ));
                    }
                }
                latest = Some((milestone, date));
            }
        }

        match (self.date(Milestone::Extinction), latest) {
            (Some(extinct), Some((prev, prev_date))) if extinct <= prev_date => {
                return Err(format!(
                    "extinction date {} is not after {:?} date {}",
                    extinct, prev, prev_date
                ));
            }
            _ => {}
        }

        if let Some(reintro) = self.date(Milestone::Reintroduction) {
            match self.date(Milestone::Extinction) {
                None => return Err(format!("reintroduction date {} without extinction", reintro)),
                Some(extinct) if reintro <= extinct => {
                    return Err(format!(
                        "reintroduction date {} is not after extinction date {}",
                        reintro, extinct
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Complete tech advancement record of a piece of equipment
///
/// Only obtainable through [`TechAdvancementBuilder`], so every record has
/// passed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechAdvancement {
    tech_base: TechBase,
    intro_level: bool,
    unofficial: bool,
    rating: TechRating,
    availability: [TechRating; 4],
    is: Option<Timeline>,
    clan: Option<Timeline>,
    prototype_factions: FactionSet,
    production_factions: FactionSet,
    reintroduction_factions: FactionSet,
}

impl TechAdvancement {
    pub fn builder() -> TechAdvancementBuilder {
        TechAdvancementBuilder::default()
    }

    pub fn tech_base(&self) -> TechBase {
        self.tech_base
    }

    pub fn is_intro_level(&self) -> bool {
        self.intro_level
    }

    pub fn is_unofficial(&self) -> bool {
        self.unofficial
    }

    pub fn rating(&self) -> TechRating {
        self.rating
    }

    pub fn availability(&self) -> [TechRating; 4] {
        self.availability
    }

    pub fn availability_in(&self, era: Era) -> TechRating {
        self.availability[era.index()]
    }

    /// Timeline of a single base; `All` is not a single base and yields None
    pub fn timeline(&self, base: TechBase) -> Option<&Timeline> {
        match base {
            TechBase::InnerSphere => self.is.as_ref(),
            TechBase::Clan => self.clan.as_ref(),
            TechBase::All => None,
        }
    }

    /// Timelines carried by this record, Inner Sphere first
    pub fn timelines(&self) -> impl Iterator<Item = (TechBase, &Timeline)> + '_ {
        self.is
            .iter()
            .map(|t| (TechBase::InnerSphere, t))
            .chain(self.clan.iter().map(|t| (TechBase::Clan, t)))
    }

    pub fn prototype_factions(&self) -> &FactionSet {
        &self.prototype_factions
    }

    pub fn production_factions(&self) -> &FactionSet {
        &self.production_factions
    }

    pub fn reintroduction_factions(&self) -> &FactionSet {
        &self.reintroduction_factions
    }
}

/// Chained configuration for a [`TechAdvancement`]
#[derive(Debug, Clone, Default)]
pub struct TechAdvancementBuilder {
    tech_base: Option<TechBase>,
    intro_level: bool,
    unofficial: bool,
    rating: Option<TechRating>,
    availability: Option<[TechRating; 4]>,
    is_dates: Option<[Option<Year>; 5]>,
    clan_dates: Option<[Option<Year>; 5]>,
    shared_dates: Option<[Option<Year>; 5]>,
    is_approximate: Option<[bool; 5]>,
    clan_approximate: Option<[bool; 5]>,
    shared_approximate: Option<[bool; 5]>,
    prototype_factions: FactionSet,
    production_factions: FactionSet,
    reintroduction_factions: FactionSet,
}

impl TechAdvancementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tech_base(mut self, base: TechBase) -> Self {
        self.tech_base = Some(base);
        self
    }

    pub fn intro_level(mut self, intro: bool) -> Self {
        self.intro_level = intro;
        self
    }

    pub fn unofficial(mut self, unofficial: bool) -> Self {
        self.unofficial = unofficial;
        self
    }

    pub fn tech_rating(mut self, rating: TechRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Availability codes for the Star League, Succession Wars, Clan
    /// Invasion and Dark Age eras
    pub fn availability(mut self, codes: [TechRating; 4]) -> Self {
        self.availability = Some(codes);
        self
    }

    pub fn is_advancement(mut self, dates: [Option<Year>; 5]) -> Self {
        self.is_dates = Some(dates);
        self
    }

    pub fn clan_advancement(mut self, dates: [Option<Year>; 5]) -> Self {
        self.clan_dates = Some(dates);
        self
    }

    /// Same dates for every declared base that has no dates of its own
    pub fn advancement(mut self, dates: [Option<Year>; 5]) -> Self {
        self.shared_dates = Some(dates);
        self
    }

    pub fn is_approximate(mut self, flags: [bool; 5]) -> Self {
        self.is_approximate = Some(flags);
        self
    }

    pub fn clan_approximate(mut self, flags: [bool; 5]) -> Self {
        self.clan_approximate = Some(flags);
        self
    }

    pub fn approximate(mut self, flags: [bool; 5]) -> Self {
        self.shared_approximate = Some(flags);
        self
    }

    pub fn prototype_factions(mut self, factions: impl Into<FactionSet>) -> Self {
        self.prototype_factions = factions.into();
        self
    }

    pub fn production_factions(mut self, factions: impl Into<FactionSet>) -> Self {
        self.production_factions = factions.into();
        self
    }

    pub fn reintroduction_factions(mut self, factions: impl Into<FactionSet>) -> Self {
        self.reintroduction_factions = factions.into();
        self
    }

    pub fn build(self) -> Result<TechAdvancement> {
        self.build_for("tech advancement")
    }

    /// Finish the record, naming `owner` in any configuration error
    pub fn build_for(self, owner: &str) -> Result<TechAdvancement> {
        let fail = |message: String| ArmoryError::configuration(owner, message);

        let tech_base = self
            .tech_base
            .ok_or_else(|| fail("tech base not declared".into()))?;

        let is = self
            .timeline_for(
                tech_base.covers(TechBase::InnerSphere),
                self.is_dates,
                self.is_approximate,
                TechBase::InnerSphere,
            )
            .map_err(fail)?;
        let clan = self
            .timeline_for(
                tech_base.covers(TechBase::Clan),
                self.clan_dates,
                self.clan_approximate,
                TechBase::Clan,
            )
            .map_err(fail)?;

        Ok(TechAdvancement {
            tech_base,
            intro_level: self.intro_level,
            unofficial: self.unofficial,
            rating: self.rating.unwrap_or(TechRating::C),
            availability: self.availability.unwrap_or([TechRating::X; 4]),
            is,
            clan,
            prototype_factions: self.prototype_factions,
            production_factions: self.production_factions,
            reintroduction_factions: self.reintroduction_factions,
        })
    }

    fn timeline_for(
        &self,
        declared: bool,
        own_dates: Option<[Option<Year>; 5]>,
        own_approximate: Option<[bool; 5]>,
        base: TechBase,
    ) -> std::result::Result<Option<Timeline>, String> {
        if !declared {
            if own_dates.is_some() {
                return Err(format!("{} dates given for a base the record does not declare", base));
            }
            return Ok(None);
        }
        let dates = own_dates
            .or(self.shared_dates)
            .ok_or_else(|| format!("missing {} advancement dates", base))?;
        let approximate = own_approximate
            .or(self.shared_approximate)
            .unwrap_or([false; 5]);
        let timeline = Timeline::new(dates).with_approximate(approximate);
        timeline
            .validate()
            .map_err(|message| format!("{} timeline: {}", base, message))?;
        Ok(Some(timeline))
    }
}
