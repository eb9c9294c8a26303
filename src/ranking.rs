use std::cmp::Ordering;

use crate::model::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    GamesWon,
    GamesPlayed,
    TotalPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Scoreboard sort criteria. Selecting the active key flips the direction;
/// selecting a new key resets to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranking {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for Ranking {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranking {
    pub fn new() -> Self {
        Self {
            key: SortKey::GamesWon,
            direction: SortDirection::Descending,
        }
    }

    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }

    /// Ordered view over `teams`; the input slice is left untouched.
    /// Ties keep their input order (stable sort, no secondary keys).
    pub fn rank<'a>(&self, teams: &'a [Team]) -> Vec<&'a Team> {
        let mut ranked: Vec<&Team> = teams.iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }

    /// Same ordering as [`Ranking::rank`], as indices into `teams`.
    pub fn rank_indices(&self, teams: &[Team]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..teams.len()).collect();
        indices.sort_by(|a, b| self.compare(&teams[*a], &teams[*b]));
        indices
    }

    pub fn compare(&self, a: &Team, b: &Team) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => cmp_names(&a.name, &b.name),
            SortKey::GamesWon => a.games_won.cmp(&b.games_won),
            SortKey::GamesPlayed => a.games_played.cmp(&b.games_played),
            SortKey::TotalPoints => a.total_points.cmp(&b.total_points),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

// ASCII-case-insensitive first so "ace" sorts next to "Ace"; byte order
// settles names that differ only by case. Identical names stay Equal.
fn cmp_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}

pub fn sort_key_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Name => "TEAM",
        SortKey::GamesWon => "WINS",
        SortKey::GamesPlayed => "GAMES",
        SortKey::TotalPoints => "POINTS",
    }
}

pub fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    }
}
