//! Property-based tests for flag algebra and availability

use proptest::prelude::*;

use armory::catalog::Catalog;
use armory::core::{RulesLevel, TechBase, TechRating};
use armory::tech::{
    resolve_availability, AvailabilityQuery, AvailabilityResolver, Milestone, VerdictReason,
};
use armory::weapons::{FlagSet, WeaponFlag};

const FLAGS: [WeaponFlag; 8] = [
    WeaponFlag::MechWeapon,
    WeaponFlag::TankWeapon,
    WeaponFlag::ProtoWeapon,
    WeaponFlag::DirectFire,
    WeaponFlag::Missile,
    WeaponFlag::Narc,
    WeaponFlag::OneShot,
    WeaponFlag::NoFires,
];

fn flag_strategy() -> impl Strategy<Value = WeaponFlag> {
    (0..FLAGS.len()).prop_map(|i| FLAGS[i])
}

proptest! {
    #[test]
    fn union_is_idempotent(
        base in proptest::collection::vec(flag_strategy(), 0..6),
        flag in flag_strategy(),
    ) {
        let set: FlagSet = base.into_iter().collect();
        let once = set.clone().union(flag);
        let twice = once.clone().union(flag);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.has(flag));
    }

    #[test]
    fn difference_removes_only_its_flag(
        base in proptest::collection::vec(flag_strategy(), 0..6),
        flag in flag_strategy(),
    ) {
        let set: FlagSet = base.into_iter().collect();
        let removed = set.clone().difference(flag);
        prop_assert!(!removed.has(flag));
        for other in set.iter().filter(|f| *f != flag) {
            prop_assert!(removed.has(other));
        }
    }

    #[test]
    fn lrm_stays_available_once_introduced(year in 2400i32..3150, later in 0i32..100) {
        let catalog = Catalog::builtin().unwrap();
        let lrm = catalog.lookup("LRM 5").unwrap();
        let now = resolve_availability(lrm, year, RulesLevel::Standard, None);
        let then = resolve_availability(lrm, year + later, RulesLevel::Standard, None);
        prop_assert!(now.legal);
        prop_assert!(then.legal);
    }

    #[test]
    fn legality_holds_until_extinction(year in 1950i32..3150, step in 0i32..200) {
        let catalog = Catalog::builtin().unwrap();
        let resolver = AvailabilityResolver::default();
        for spec in catalog.all() {
            for (base, timeline) in spec.tech().timelines() {
                let later = year + step;
                let dies = timeline
                    .date(Milestone::Extinction)
                    .filter(|&extinct| year < extinct)
                    .unwrap_or(i32::MAX);
                if later >= dies {
                    continue;
                }
                let now = AvailabilityQuery::new(year, RulesLevel::Unofficial)
                    .with_tech_base(base);
                let then = AvailabilityQuery::new(later, RulesLevel::Unofficial)
                    .with_tech_base(base);
                if resolver.resolve(spec, &now).legal {
                    let verdict = resolver.resolve(spec, &then);
                    prop_assert!(verdict.legal, "{} ({}) lost at {}", spec.name(), base, later);
                    prop_assert_eq!(verdict.tech_base, Some(base));
                }
            }
        }
    }

    #[test]
    fn unavailable_verdicts_report_x(year in 2000i32..3200) {
        let catalog = Catalog::builtin().unwrap();
        for spec in catalog.all() {
            let verdict = resolve_availability(spec, year, RulesLevel::Unofficial, None);
            if matches!(verdict.reason, VerdictReason::TooEarly | VerdictReason::Extinct) {
                prop_assert_eq!(verdict.availability, TechRating::X);
            }
        }
    }
}

#[test]
fn dual_base_lineages_resolve_separately() {
    let catalog = Catalog::builtin().unwrap();
    let laser = catalog.lookup("Medium Laser").unwrap();
    let resolver = AvailabilityResolver::default();

    let clan = AvailabilityQuery::new(2840, RulesLevel::Standard).with_tech_base(TechBase::Clan);
    assert!(resolver.resolve(laser, &clan).legal);
    let clan = AvailabilityQuery::new(2850, RulesLevel::Standard).with_tech_base(TechBase::Clan);
    assert_eq!(resolver.resolve(laser, &clan).reason, VerdictReason::Extinct);

    let is = AvailabilityQuery::new(3100, RulesLevel::Standard)
        .with_tech_base(TechBase::InnerSphere);
    assert!(resolver.resolve(laser, &is).legal);
}

#[test]
fn builtin_timelines_are_ordered() {
    let catalog = Catalog::builtin().unwrap();
    for spec in catalog.all() {
        for (base, timeline) in spec.tech().timelines() {
            let dates = (
                timeline.date(Milestone::Standard),
                timeline.date(Milestone::Extinction),
            );
            if let (Some(standard), Some(extinct)) = dates {
                assert!(extinct > standard, "{} ({}) dies before standard", spec.name(), base);
            }
            assert!(timeline.introduction().is_some(), "{} has no introduction", spec.name());
            assert!(base == TechBase::InnerSphere || base == TechBase::Clan);
        }
    }
}
