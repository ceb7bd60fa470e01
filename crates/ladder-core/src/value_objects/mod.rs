//! Value objects - immutable types that represent domain concepts

mod player_id;
mod rank_tier;
mod season;

pub use player_id::{PlayerId, PlayerIdError};
pub use rank_tier::{RankTier, RankTierParseError};
pub use season::SeasonId;
