//! Availability resolution over the bundled catalog

use std::sync::Arc;
use std::thread;

use armory::catalog::Catalog;
use armory::core::{Era, ResolverConfig, RulesLevel, TechBase, TechRating};
use armory::tech::{
    resolve_availability, AvailabilityQuery, AvailabilityResolver, Faction, TechPhase,
    VerdictReason,
};

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

#[test]
fn test_inarc_in_its_experimental_years() {
    let catalog = catalog();
    let inarc = catalog.lookup("iNarc (OS)").unwrap();

    let verdict = resolve_availability(inarc, 3060, RulesLevel::Standard, Some(Faction::ComStar));
    assert!(verdict.legal);
    assert_eq!(verdict.era, Era::ClanInvasion);
    assert_eq!(verdict.phase, Some(TechPhase::Experimental));
    assert_eq!(verdict.availability, TechRating::E);

    let early = resolve_availability(inarc, 3050, RulesLevel::Standard, None);
    assert!(!early.legal);
    assert_eq!(early.reason, VerdictReason::TooEarly);
    assert_eq!(early.availability, TechRating::X);
}

#[test]
fn test_inarc_faction_windows() {
    let catalog = catalog();
    let inarc = catalog.lookup("iNarc").unwrap();

    // Prototype years: ComStar only
    let wob = resolve_availability(inarc, 3060, RulesLevel::Advanced, Some(Faction::WordOfBlake));
    assert_eq!(wob.reason, VerdictReason::WrongFaction);
    assert!(!wob.is_hard_failure());

    // Production years open up to the Word of Blake
    let wob = resolve_availability(inarc, 3065, RulesLevel::Advanced, Some(Faction::WordOfBlake));
    assert!(wob.legal);
    assert_eq!(wob.phase, Some(TechPhase::Advanced));

    let davion = resolve_availability(inarc, 3065, RulesLevel::Advanced, Some(Faction::FederatedSuns));
    assert_eq!(davion.reason, VerdictReason::WrongFaction);

    // Standard years: everyone
    let davion = resolve_availability(inarc, 3075, RulesLevel::Advanced, Some(Faction::FederatedSuns));
    assert!(davion.legal);
}

#[test]
fn test_introductory_rules_exclude_prototypes() {
    let catalog = catalog();
    let inarc = catalog.lookup("iNarc").unwrap();
    let verdict = resolve_availability(inarc, 3060, RulesLevel::Introductory, None);
    assert_eq!(verdict.reason, VerdictReason::RulesLevel);
    assert!(verdict.is_hard_failure());

    let lrm = catalog.lookup("LRM 5").unwrap();
    assert!(resolve_availability(lrm, 3025, RulesLevel::Introductory, None).legal);
}

#[test]
fn test_dual_base_weapon_picks_permissive_lineage() {
    let catalog = catalog();
    let laser = catalog.lookup("Medium Laser").unwrap();
    let resolver = AvailabilityResolver::default();

    // Clan line is extinct; the Inner Sphere line is not
    let query = AvailabilityQuery::new(3050, RulesLevel::Standard);
    let verdict = resolver.resolve(laser, &query);
    assert!(verdict.legal);
    assert_eq!(verdict.tech_base, Some(TechBase::InnerSphere));

    let clan = resolver.resolve(laser, &query.with_tech_base(TechBase::Clan));
    assert_eq!(clan.reason, VerdictReason::Extinct);

    let er = catalog.lookup("Clan ER Medium Laser").unwrap();
    let wrong_base = resolver.resolve(er, &query.with_tech_base(TechBase::InnerSphere));
    assert_eq!(wrong_base.reason, VerdictReason::WrongTechBase);
}

#[test]
fn test_narc_lost_and_recovered() {
    let catalog = catalog();
    let narc = catalog.lookup("Narc Missile Beacon").unwrap();

    let lost = resolve_availability(narc, 2900, RulesLevel::Standard, None);
    assert_eq!(lost.reason, VerdictReason::Extinct);

    // Back in the same era it returned in: reintroducing and production factions
    let davion = resolve_availability(narc, 3040, RulesLevel::Standard, Some(Faction::FederatedSuns));
    assert!(davion.legal);
    let kurita = resolve_availability(narc, 3040, RulesLevel::Standard, Some(Faction::DraconisCombine));
    assert_eq!(kurita.reason, VerdictReason::WrongFaction);

    // Next era: open to everyone
    let kurita = resolve_availability(narc, 3055, RulesLevel::Standard, Some(Faction::DraconisCombine));
    assert!(kurita.legal);
    assert_eq!(kurita.availability, TechRating::D);
}

#[test]
fn test_strict_phase_gating() {
    let catalog = catalog();
    let inarc = catalog.lookup("iNarc").unwrap();
    let strict = AvailabilityResolver::new(ResolverConfig {
        strict_phase_gating: true,
        ..ResolverConfig::default()
    });

    let query = AvailabilityQuery::new(3060, RulesLevel::Advanced);
    assert_eq!(strict.resolve(inarc, &query).reason, VerdictReason::RulesLevel);

    let query = AvailabilityQuery::new(3060, RulesLevel::Experimental);
    assert!(strict.resolve(inarc, &query).legal);
}

#[test]
fn test_resolve_whole_catalog() {
    let catalog = catalog();
    let resolver = AvailabilityResolver::default();
    let query = AvailabilityQuery::new(3025, RulesLevel::Standard);

    let verdicts = resolver.resolve_catalog(&catalog, &query);
    assert_eq!(verdicts.len(), catalog.len());
    for ((spec, _), expected) in verdicts.iter().zip(catalog.all()) {
        assert!(Arc::ptr_eq(spec, expected));
    }

    let legal: Vec<&str> = resolver
        .legal_weapons(&catalog, &query)
        .into_iter()
        .map(|s| s.name())
        .collect();
    assert!(legal.contains(&"Medium Laser"));
    assert!(legal.contains(&"LRM 5"));
    assert!(legal.contains(&"Laser Pistol (BR-25)"));
    assert!(!legal.contains(&"iNarc"));
    assert!(!legal.contains(&"Medium Pulse Laser"));
}

#[test]
fn test_concurrent_readers() {
    let catalog = Arc::new(catalog());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let resolver = AvailabilityResolver::default();
                let query = AvailabilityQuery::new(3050 + i * 10, RulesLevel::Advanced);
                let spec = catalog.lookup("Narc Missile Beacon").unwrap();
                resolver.resolve(spec, &query).legal
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
