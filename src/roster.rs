use std::env;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::export;
use crate::model::{Game, GameStatus, Player, Role, Team, Tournament, User};
use crate::state::{Delta, ProviderCommand};

/// Seeds the roster, then services export commands until the UI side
/// hangs up.
pub fn spawn_roster_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let mut rng = score_rng();
        let teams = seed_teams();
        let games = seed_games(&teams, &mut rng);

        let _ = tx.send(Delta::SetRoster {
            players: seed_players(),
            teams,
        });
        let _ = tx.send(Delta::SetGames(games));
        let _ = tx.send(Delta::SetTournament(seed_tournament()));
        let _ = tx.send(Delta::Log("[INFO] Tournament data loaded".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::ExportSheet {
                    path,
                    teams,
                    players,
                    games,
                } => run_export(&tx, &path, &teams, &players, &games),
            }
        }
    });
}

fn run_export(tx: &Sender<Delta>, path: &str, teams: &[Team], players: &[Player], games: &[Game]) {
    let total = teams.len() + players.len() + games.len();
    let _ = tx.send(Delta::ExportStarted {
        path: path.to_string(),
        total,
    });

    let progress_tx = tx.clone();
    let report = export::export_standings_with_progress(
        Path::new(path),
        teams,
        players,
        games,
        |progress| {
            let _ = progress_tx.send(Delta::ExportProgress {
                current: progress.current,
                total: progress.total,
                message: progress.message,
            });
        },
    );

    match report {
        Ok(report) => {
            let _ = tx.send(Delta::ExportFinished {
                path: path.to_string(),
                teams: report.teams,
                players: report.players,
                games: report.games,
                errors: 0,
            });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Export failed: {err:#}")));
            let _ = tx.send(Delta::ExportFinished {
                path: path.to_string(),
                teams: 0,
                players: 0,
                games: 0,
                errors: 1,
            });
        }
    }
}

/// Score generator. `CORNHOLE_SEED` pins the sequence for reproducible
/// demo runs.
pub fn score_rng() -> StdRng {
    match env::var("CORNHOLE_SEED")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
    {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn seed_players() -> Vec<Player> {
    vec![
        player("1", "John Smith", "Let the bags fly!", 1, 6, 120),
        player("2", "Emily Johnson", "Watch this!", 2, 5, 115),
        player("3", "Michael Brown", "Cornhole master in the house!", 1, 7, 140),
        player("4", "Sarah Davis", "Aim small, miss small.", 3, 4, 95),
        player("5", "David Wilson", "Nothing but hole!", 2, 5, 110),
        player("6", "Jessica Martinez", "Bags don't lie!", 4, 3, 85),
        player("7", "Robert Taylor", "Respect the bag.", 1, 6, 125),
        player("8", "Jennifer Anderson", "It's all in the wrist!", 3, 2, 70),
        player("9", "Christopher Thomas", "Feel the slide.", 2, 4, 100),
        player("10", "Amanda Jackson", "In the hole!", 4, 5, 105),
        player("11", "Daniel White", "Bean bag wizard!", 1, 3, 80),
        player("12", "Elizabeth Harris", "Watch and learn.", 3, 5, 110),
        player("13", "Matthew Clark", "Cornhole champion!", 2, 7, 135),
        player("14", "Stephanie Lewis", "Sliding to victory!", 4, 4, 90),
        player("15", "Andrew Walker", "Accuracy is everything.", 1, 6, 120),
        player("16", "Melissa Green", "Focus and throw.", 3, 3, 85),
        player("17", "Kevin Adams", "Let's bag this win!", 2, 5, 105),
        player("18", "Rebecca Mitchell", "Cornhole queen!", 4, 2, 75),
        player("19", "Brian Turner", "Bag toss pro!", 1, 4, 95),
        player("20", "Nicole Phillips", "Slide it in!", 3, 5, 110),
    ]
}

pub fn seed_teams() -> Vec<Team> {
    vec![
        team("1", "Bag Tossers", "1", "2", 6, 235),
        team("2", "Cornhole Kings", "3", "4", 5, 235),
        team("3", "Bag Sliders", "5", "6", 4, 195),
        team("4", "Hole Seekers", "7", "8", 4, 195),
        team("5", "Bean Bag Bros", "9", "10", 5, 205),
        team("6", "Cornhole Queens", "11", "12", 4, 190),
        team("7", "Bag Droppers", "13", "14", 5, 225),
        team("8", "Ace Tossers", "15", "16", 4, 205),
        team("9", "Hole in One", "17", "18", 3, 180),
        team("10", "Slide & Score", "19", "20", 5, 205),
    ]
}

/// Round-robin style July slate. Pairings rotate so every team plays a
/// spread of opponents; scores are drawn from the cornhole-typical 5..20
/// range, and level scores leave the game without a winner.
pub fn seed_games(teams: &[Team], rng: &mut impl Rng) -> Vec<Game> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut games = Vec::with_capacity(40);
    for i in 0..40usize {
        let home_idx = (i / 4) % teams.len();
        let away_idx = (home_idx + 1 + i / 8) % teams.len();
        let home = &teams[home_idx];
        let away = &teams[away_idx];

        let score_home: u16 = rng.gen_range(5..20);
        let score_away: u16 = rng.gen_range(5..20);
        let winner = if score_home > score_away {
            Some(home.id.clone())
        } else if score_away > score_home {
            Some(away.id.clone())
        } else {
            None
        };

        games.push(Game {
            id: (i + 1).to_string(),
            home_id: home.id.clone(),
            away_id: away.id.clone(),
            home: home.name.clone(),
            away: away.name.clone(),
            score_home,
            score_away,
            scheduled_at: july_midnight((i % 30) as u32 + 1),
            status: GameStatus::Completed { winner },
        });
    }
    games
}

pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: Some("Admin User".to_string()),
            role: Role::Admin,
        },
        User {
            id: "2".to_string(),
            email: "user@example.com".to_string(),
            name: Some("Regular User".to_string()),
            role: Role::User,
        },
    ]
}

pub fn seed_tournament() -> Tournament {
    Tournament {
        id: "1".to_string(),
        name: "Summer Cornhole Championship 2023".to_string(),
        start_date: seed_date(7, 1),
        end_date: seed_date(7, 30),
    }
}

fn player(id: &str, name: &str, catchphrase: &str, day: u32, won: u32, points: u32) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        catchphrase: catchphrase.to_string(),
        registered_at: seed_date(6, day),
        games_played: 8,
        games_won: won,
        total_points: points,
    }
}

fn team(id: &str, name: &str, first: &str, second: &str, won: u32, points: u32) -> Team {
    Team {
        id: id.to_string(),
        name: name.to_string(),
        player_ids: vec![first.to_string(), second.to_string()],
        games_played: 8,
        games_won: won,
        total_points: points,
    }
}

fn seed_date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, month, day).unwrap_or_default()
}

fn july_midnight(day: u32) -> NaiveDateTime {
    seed_date(7, day).and_hms_opt(0, 0, 0).unwrap_or_default()
}
