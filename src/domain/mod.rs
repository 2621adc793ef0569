pub mod features;
pub mod game;
pub mod odds;
pub mod teams;

pub use features::{FeatureRow, FeatureTable, FEATURE_NAMES};
pub use game::{BoxScore, Game, GameLog, OpeningLine, TeamGameRecord, TeamRatings};
pub use odds::{OddsTable, PricedGame};
pub use teams::{arena_coords, distance_km};
