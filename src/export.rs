use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::model::{self, Game, Player, Team};
use crate::ranking::Ranking;

#[derive(Debug)]
pub struct ExportReport {
    pub teams: usize,
    pub players: usize,
    pub games: usize,
}

pub struct ExportProgress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Writes the tournament snapshot into a three-sheet workbook. The
/// Standings sheet is ordered with the default ranking (wins, descending)
/// no matter what the scoreboard is currently sorted by.
pub fn export_standings_with_progress(
    path: &Path,
    teams: &[Team],
    players: &[Player],
    games: &[Game],
    mut on_progress: impl FnMut(ExportProgress),
) -> Result<ExportReport> {
    let total = teams.len() + players.len() + games.len();
    let mut current = 0usize;

    on_progress(ExportProgress {
        current,
        total,
        message: "Collecting standings".to_string(),
    });

    let ranking = Ranking::new();
    let ranked = ranking.rank(teams);

    let mut standings_rows = vec![vec![
        "Rank".to_string(),
        "Team".to_string(),
        "Players".to_string(),
        "Games".to_string(),
        "Wins".to_string(),
        "Points".to_string(),
    ]];
    for (idx, team) in ranked.iter().enumerate() {
        standings_rows.push(standing_row(idx + 1, team, players));
        current = current.saturating_add(1);
        on_progress(ExportProgress {
            current,
            total,
            message: format!("Team: {}", team.name),
        });
    }

    let mut players_rows = vec![vec![
        "Player ID".to_string(),
        "Player".to_string(),
        "Catchphrase".to_string(),
        "Registered".to_string(),
        "Games".to_string(),
        "Wins".to_string(),
        "Points".to_string(),
    ]];
    for player in players {
        players_rows.push(player_row(player));
        current = current.saturating_add(1);
        on_progress(ExportProgress {
            current,
            total,
            message: format!("Player: {}", player.name),
        });
    }

    let mut games_rows = vec![vec![
        "Game ID".to_string(),
        "Date".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Score".to_string(),
        "Status".to_string(),
        "Winner".to_string(),
    ]];
    for game in games {
        games_rows.push(game_row(game, teams));
        current = current.saturating_add(1);
        on_progress(ExportProgress {
            current,
            total,
            message: format!("Game: {} vs {}", game.home, game.away),
        });
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Standings")?;
        write_rows(sheet, &standings_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_rows(sheet, &players_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Games")?;
        write_rows(sheet, &games_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        teams: standings_rows.len().saturating_sub(1),
        players: players_rows.len().saturating_sub(1),
        games: games_rows.len().saturating_sub(1),
    })
}

fn standing_row(rank: usize, team: &Team, players: &[Player]) -> Vec<String> {
    vec![
        rank.to_string(),
        team.name.clone(),
        team.member_names(players),
        team.games_played.to_string(),
        team.games_won.to_string(),
        team.total_points.to_string(),
    ]
}

fn player_row(player: &Player) -> Vec<String> {
    vec![
        player.id.clone(),
        player.name.clone(),
        player.catchphrase.clone(),
        player.registered_at.format("%Y-%m-%d").to_string(),
        player.games_played.to_string(),
        player.games_won.to_string(),
        player.total_points.to_string(),
    ]
}

fn game_row(game: &Game, teams: &[Team]) -> Vec<String> {
    let winner = match game.winner_id() {
        Some(id) => teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None if game.is_completed() => "Tie".to_string(),
        None => String::new(),
    };

    vec![
        game.id.clone(),
        game.scheduled_at.format("%Y-%m-%d").to_string(),
        game.home.clone(),
        game.away.clone(),
        format!("{}-{}", game.score_home, game.score_away),
        model::status_label(&game.status).to_string(),
        winner,
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
