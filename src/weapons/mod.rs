pub mod ammo;
pub mod family;
pub mod flags;
pub mod spec;

pub use ammo::AmmoType;
pub use family::WeaponFamily;
pub use flags::{FlagOp, FlagSet, WeaponFlag};
pub use spec::{Damage, InfantryStats, RangeBracket, RangeBrackets, WeaponSpec, WeaponSpecBuilder};
