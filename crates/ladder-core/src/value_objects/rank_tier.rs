//! Rank tier - discrete ladder band derived from a rating
//!
//! The threshold table lives here and only here. Everything that needs a tier
//! (the cache writer, read endpoints, the backfill binary) goes through
//! [`RankTier::classify`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ladder tier, ordered from lowest (`F1`) to highest (`A3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RankTier {
    F1,
    F2,
    F3,
    E1,
    E2,
    E3,
    D1,
    D2,
    D3,
    C1,
    C2,
    C3,
    B1,
    B2,
    B3,
    A1,
    A2,
    A3,
}

/// Inclusive lower bounds, highest first
const THRESHOLDS: [(f64, RankTier); 17] = [
    (1600.0, RankTier::A3),
    (1500.0, RankTier::A2),
    (1400.0, RankTier::A1),
    (1350.0, RankTier::B3),
    (1300.0, RankTier::B2),
    (1200.0, RankTier::B1),
    (1150.0, RankTier::C3),
    (1100.0, RankTier::C2),
    (1000.0, RankTier::C1),
    (900.0, RankTier::D3),
    (800.0, RankTier::D2),
    (700.0, RankTier::D1),
    (600.0, RankTier::E3),
    (550.0, RankTier::E2),
    (500.0, RankTier::E1),
    (450.0, RankTier::F3),
    (400.0, RankTier::F2),
];

impl RankTier {
    /// All tiers in ascending order
    pub const ALL: [RankTier; 18] = [
        Self::F1,
        Self::F2,
        Self::F3,
        Self::E1,
        Self::E2,
        Self::E3,
        Self::D1,
        Self::D2,
        Self::D3,
        Self::C1,
        Self::C2,
        Self::C3,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::A1,
        Self::A2,
        Self::A3,
    ];

    /// Map a rating to its tier. Total: NaN and anything below 400 land in `F1`.
    pub fn classify(rating: f64) -> Self {
        THRESHOLDS
            .iter()
            .find(|(threshold, _)| rating >= *threshold)
            .map_or(Self::F1, |(_, tier)| *tier)
    }

    /// Integer convenience over [`RankTier::classify`]
    #[inline]
    pub fn from_rating(rating: i32) -> Self {
        Self::classify(f64::from(rating))
    }

    /// Position in the ladder, 0 for `F1` up to 17 for `A3`
    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Display label, e.g. `Tier-B1`
    pub fn label(self) -> &'static str {
        match self {
            Self::F1 => "Tier-F1",
            Self::F2 => "Tier-F2",
            Self::F3 => "Tier-F3",
            Self::E1 => "Tier-E1",
            Self::E2 => "Tier-E2",
            Self::E3 => "Tier-E3",
            Self::D1 => "Tier-D1",
            Self::D2 => "Tier-D2",
            Self::D3 => "Tier-D3",
            Self::C1 => "Tier-C1",
            Self::C2 => "Tier-C2",
            Self::C3 => "Tier-C3",
            Self::B1 => "Tier-B1",
            Self::B2 => "Tier-B2",
            Self::B3 => "Tier-B3",
            Self::A1 => "Tier-A1",
            Self::A2 => "Tier-A2",
            Self::A3 => "Tier-A3",
        }
    }

    /// Lowest rating that still classifies into this tier (`None` for `F1`)
    pub fn min_rating(self) -> Option<f64> {
        THRESHOLDS
            .iter()
            .find(|(_, tier)| *tier == self)
            .map(|(threshold, _)| *threshold)
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error when parsing a tier label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rank tier label: {0}")]
pub struct RankTierParseError(pub String);

impl FromStr for RankTier {
    type Err = RankTierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.label() == s)
            .ok_or_else(|| RankTierParseError(s.to_string()))
    }
}

impl Serialize for RankTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RankTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
