//! Core type definitions.

pub mod chef;
pub mod id;
pub mod location;
pub mod ranking;
pub mod role;
pub mod tournament;

pub use chef::Chef;
pub use id::{ChefId, LocationId, TournamentId, UserId};
pub use location::{Location, LocationDirectory, LocationRef};
pub use ranking::RankingEntry;
pub use role::RoleTier;
pub use tournament::{Registration, Tournament};
