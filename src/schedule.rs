use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::model::{Game, GameStatus, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Teams must be different")]
    SameTeam,
    #[error("Invalid team selection")]
    UnknownTeam,
    #[error("Invalid date")]
    InvalidDate,
    #[error("Scores cannot be negative")]
    NegativeScore,
    #[error("Invalid score")]
    InvalidScore,
}

/// Validates a matchup and builds the new fixture: next numeric id, 0-0,
/// not yet completed. The caller appends it to the dataset on success.
pub fn build_game(
    teams: &[Team],
    games: &[Game],
    home_id: &str,
    away_id: &str,
    scheduled_at: NaiveDateTime,
) -> Result<Game, ScheduleError> {
    if home_id.is_empty() || away_id.is_empty() {
        return Err(ScheduleError::MissingFields);
    }
    if home_id == away_id {
        return Err(ScheduleError::SameTeam);
    }
    let Some(home) = teams.iter().find(|t| t.id == home_id) else {
        return Err(ScheduleError::UnknownTeam);
    };
    let Some(away) = teams.iter().find(|t| t.id == away_id) else {
        return Err(ScheduleError::UnknownTeam);
    };

    Ok(Game {
        id: next_game_id(games),
        home_id: home.id.clone(),
        away_id: away.id.clone(),
        home: home.name.clone(),
        away: away.name.clone(),
        score_home: 0,
        score_away: 0,
        scheduled_at,
        status: GameStatus::Scheduled,
    })
}

pub fn next_game_id(games: &[Game]) -> String {
    (games.len() + 1).to_string()
}

/// Completed copy of `game` with the final score. The winner falls out of
/// the scores: higher side wins, level means no winner.
pub fn record_result(game: &Game, score_home: u16, score_away: u16) -> Game {
    let winner = if score_home > score_away {
        Some(game.home_id.clone())
    } else if score_away > score_home {
        Some(game.away_id.clone())
    } else {
        None
    };

    let mut updated = game.clone();
    updated.score_home = score_home;
    updated.score_away = score_away;
    updated.status = GameStatus::Completed { winner };
    updated
}

/// Distinct calendar days with at least one game, ascending.
pub fn game_dates(games: &[Game]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = games.iter().map(|g| g.scheduled_at.date()).collect();
    dates.sort();
    dates.dedup();
    dates
}

pub fn games_on(games: &[Game], date: NaiveDate) -> Vec<&Game> {
    games
        .iter()
        .filter(|g| g.scheduled_at.date() == date)
        .collect()
}

pub fn parse_game_date(raw: &str) -> Result<NaiveDateTime, ScheduleError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];

    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Err(ScheduleError::MissingFields);
    }
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cleaned, fmt) {
            return Ok(dt);
        }
    }
    // A bare date schedules for midnight.
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(ScheduleError::InvalidDate)
}

/// Scores are unsigned, so a leading minus gets the dedicated message and
/// anything else that fails to parse is rejected outright; an empty field
/// counts as zero.
pub fn parse_score(raw: &str) -> Result<u16, ScheduleError> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Ok(0);
    }
    if cleaned.starts_with('-') {
        return Err(ScheduleError::NegativeScore);
    }
    cleaned
        .parse::<u16>()
        .map_err(|_| ScheduleError::InvalidScore)
}
