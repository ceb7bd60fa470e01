//! Player record -> [`PlayerStats`]

use ladder_core::entities::{ModeStats, PlayerStats};

use crate::error::RemoteError;
use crate::schema::{ModeResponse, PlayerResponse};

/// Solo ladder keys, first present wins
const SOLO_MODES: [&str; 2] = ["rm_solo", "rm_1v1"];

/// Team ladder keys, first present wins
const TEAM_MODES: [&str; 4] = ["rm_team", "rm_2v2", "rm_3v3", "rm_4v4"];

/// Hidden ELO keys, first present wins
const ELO_MODES: [&str; 2] = ["rm_1v1_elo", "rm_solo_elo"];

/// Normalize a decoded record. Fails only when the name is missing or blank.
pub fn normalize(response: PlayerResponse) -> Result<PlayerStats, RemoteError> {
    let name = response
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or(RemoteError::MissingName)?;

    let modes = response.modes.unwrap_or_default();
    let first_present = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| modes.get(*key).and_then(Option::as_ref))
    };

    let solo = first_present(&SOLO_MODES).map(mode_stats).unwrap_or_default();
    let team = first_present(&TEAM_MODES).map(mode_stats).unwrap_or_default();
    let solo_elo = first_present(&ELO_MODES)
        .and_then(|mode| mode.rating)
        .map(round_rating);

    let avatar_url = response.avatars.and_then(|a| {
        [a.small, a.medium, a.full]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
    });

    Ok(PlayerStats {
        name,
        solo,
        solo_elo,
        team,
        avatar_url,
        group_tag: response.clan.and_then(|c| non_blank(c.tag)),
        region: non_blank(response.region),
        faction: non_blank(response.main_civilization),
    })
}

fn mode_stats(mode: &ModeResponse) -> ModeStats {
    ModeStats {
        rating: mode.rating.map(round_rating).unwrap_or_default(),
        wins: mode.wins_count.unwrap_or_default(),
        matches: mode.games_count.unwrap_or_default(),
        last_match_at: mode.last_game_at,
    }
}

/// Saturating float -> int; NaN becomes 0
fn round_rating(rating: f64) -> i32 {
    if rating.is_nan() {
        return 0;
    }
    rating.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
