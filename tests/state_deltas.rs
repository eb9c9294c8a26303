use chrono::NaiveDate;
use cornhole_terminal::model::{Game, GameStatus, Player, Team, Tournament};
use cornhole_terminal::state::{AppState, Delta, apply_delta};

fn team(id: &str, name: &str, won: u32, points: u32) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        player_ids: Vec::new(),
        games_played: 8,
        games_won: won,
        total_points: points,
    }
}

fn player(id: &str, name: &str) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        catchphrase: "Toss it!".to_string(),
        registered_at: NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date"),
        games_played: 8,
        games_won: 4,
        total_points: 120,
    }
}

fn game(id: &str, home_id: &str, away_id: &str, day: u32) -> Game {
    Game {
        id: id.to_string(),
        home_id: home_id.to_string(),
        away_id: away_id.to_string(),
        home: format!("Team {home_id}"),
        away: format!("Team {away_id}"),
        score_home: 0,
        score_away: 0,
        scheduled_at: NaiveDate::from_ymd_opt(2023, 7, day)
            .expect("valid date")
            .and_hms_opt(18, 0, 0)
            .expect("valid time"),
        status: GameStatus::Scheduled,
    }
}

#[test]
fn roster_delta_fills_the_tables_and_clears_loading() {
    let mut state = AppState::new();
    assert!(state.roster_loading);

    apply_delta(
        &mut state,
        Delta::SetRoster {
            players: vec![player("p1", "Sandy Pitts")],
            teams: vec![team("1", "Bag Tossers", 6, 235)],
        },
    );

    assert!(!state.roster_loading);
    assert_eq!(state.teams.len(), 1);
    assert_eq!(state.players.len(), 1);
    assert_eq!(state.selected, 0);
}

#[test]
fn roster_delta_keeps_the_highlighted_team_when_it_survives() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetRoster {
            players: Vec::new(),
            teams: vec![
                team("1", "Bag Tossers", 6, 235),
                team("2", "Cornhole Kings", 5, 220),
                team("3", "Hole Seekers", 4, 195),
            ],
        },
    );
    state.selected = 1; // "2" under default wins-descending order

    apply_delta(
        &mut state,
        Delta::SetRoster {
            players: Vec::new(),
            teams: vec![
                team("2", "Cornhole Kings", 7, 240),
                team("3", "Hole Seekers", 4, 195),
            ],
        },
    );

    // Team 2 now ranks first; the highlight follows it there.
    assert_eq!(state.selected_team_id().as_deref(), Some("2"));
    assert_eq!(state.selected, 0);
}

#[test]
fn roster_delta_clamps_a_stale_selection() {
    let mut state = AppState::new();
    state.selected = 7;

    apply_delta(
        &mut state,
        Delta::SetRoster {
            players: Vec::new(),
            teams: vec![team("1", "Bag Tossers", 6, 235)],
        },
    );
    assert_eq!(state.selected, 0);
}

#[test]
fn set_games_rewinds_the_schedule_cursor() {
    let mut state = AppState::new();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 12)];
    state.schedule_date = 1;
    state.schedule_scroll = 3;

    apply_delta(
        &mut state,
        Delta::SetGames(vec![game("1", "1", "2", 20), game("2", "1", "3", 22)]),
    );

    assert_eq!(state.schedule_date, 0);
    assert_eq!(state.schedule_scroll, 0);
    assert_eq!(state.games.len(), 2);
}

#[test]
fn upsert_replaces_a_game_by_id() {
    let mut state = AppState::new();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 12)];

    let mut updated = game("2", "2", "3", 12);
    updated.score_home = 21;
    updated.score_away = 13;
    updated.status = GameStatus::Completed {
        winner: Some("2".to_string()),
    };
    apply_delta(&mut state, Delta::UpsertGame(updated));

    assert_eq!(state.games.len(), 2);
    let stored = state.games.iter().find(|g| g.id == "2").expect("game kept");
    assert_eq!((stored.score_home, stored.score_away), (21, 13));
    assert_eq!(stored.winner_id(), Some("2"));
}

#[test]
fn upsert_appends_an_unknown_game() {
    let mut state = AppState::new();
    state.games = vec![game("1", "1", "2", 10)];

    apply_delta(&mut state, Delta::UpsertGame(game("9", "1", "3", 15)));
    assert_eq!(state.games.len(), 2);
    assert!(state.games.iter().any(|g| g.id == "9"));
}

#[test]
fn tournament_delta_sets_the_header_line() {
    let mut state = AppState::new();
    assert!(state.tournament.is_none());

    apply_delta(
        &mut state,
        Delta::SetTournament(Tournament {
            id: "1".to_string(),
            name: "Summer Cornhole Championship 2023".to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 7, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2023, 7, 30).expect("valid date"),
        }),
    );

    let tournament = state.tournament.as_ref().expect("tournament set");
    assert_eq!(tournament.name, "Summer Cornhole Championship 2023");
}

#[test]
fn export_deltas_drive_the_progress_panel() {
    let mut state = AppState::new();

    apply_delta(
        &mut state,
        Delta::ExportStarted {
            path: "out.xlsx".to_string(),
            total: 30,
        },
    );
    assert!(state.export.active);
    assert!(!state.export.done);
    assert_eq!(state.export.total, 30);
    assert_eq!(state.export.current, 0);
    assert_eq!(state.export.path.as_deref(), Some("out.xlsx"));

    apply_delta(
        &mut state,
        Delta::ExportProgress {
            current: 12,
            total: 30,
            message: "Standings: Bag Tossers".to_string(),
        },
    );
    assert_eq!(state.export.current, 12);
    assert_eq!(state.export.message, "Standings: Bag Tossers");
    assert!(!state.export.done);

    apply_delta(
        &mut state,
        Delta::ExportFinished {
            path: "out.xlsx".to_string(),
            teams: 10,
            players: 20,
            games: 40,
            errors: 0,
        },
    );
    assert!(state.export.done);
    assert_eq!(state.export.current, state.export.total);
    assert_eq!(state.export.error_count, 0);
    assert_eq!(
        state.export.message,
        "Done: 10 teams, 20 players, 40 games (0 errors)"
    );
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Export finished (0 errors)")
    );
}

#[test]
fn log_delta_lands_in_the_console_ring() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] Hello".to_string()));
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] Hello"));
}

#[test]
fn console_ring_drops_the_oldest_entries() {
    let mut state = AppState::new();
    for n in 0..205 {
        state.push_log(format!("[INFO] message {n}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(
        state.logs.front().map(String::as_str),
        Some("[INFO] message 5")
    );
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] message 204")
    );
}
