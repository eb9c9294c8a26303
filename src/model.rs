use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub catchphrase: String,
    pub registered_at: NaiveDate,
    pub games_played: u32,
    pub games_won: u32,
    pub total_points: u32,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    // Membership by reference; a player may in principle appear on more
    // than one team. Never empty for seeded teams.
    pub player_ids: Vec<String>,
    // Aggregates are maintained by the organizer, not derived from games.
    pub games_played: u32,
    pub games_won: u32,
    pub total_points: u32,
}

impl Team {
    pub fn members<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        self.player_ids
            .iter()
            .filter_map(|id| players.iter().find(|p| &p.id == id))
            .collect()
    }

    /// Comma-joined member names for table cells. Dangling ids render as
    /// "Unknown" instead of dropping out of the list.
    pub fn member_names(&self, players: &[Player]) -> String {
        self.player_ids
            .iter()
            .map(|id| {
                players
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Scheduled,
    // `winner` is one of the two team ids; None means the game ended level.
    Completed { winner: Option<String> },
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: String,
    pub home_id: String,
    pub away_id: String,
    pub home: String,
    pub away: String,
    pub score_home: u16,
    pub score_away: u16,
    pub scheduled_at: NaiveDateTime,
    pub status: GameStatus,
}

impl Game {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, GameStatus::Completed { .. })
    }

    pub fn winner_id(&self) -> Option<&str> {
        match &self.status {
            GameStatus::Completed { winner } => winner.as_deref(),
            GameStatus::Scheduled => None,
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }
}

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

impl User {
    /// Display name for greetings and the header line; email when unnamed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Admin => "admin",
    }
}

pub fn status_label(status: &GameStatus) -> &'static str {
    match status {
        GameStatus::Scheduled => "Scheduled",
        GameStatus::Completed { .. } => "Completed",
    }
}
