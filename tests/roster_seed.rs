use cornhole_terminal::model::{GameStatus, Role, Team};
use cornhole_terminal::roster::{seed_games, seed_players, seed_teams, seed_tournament, seed_users};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn seed_roster_has_the_full_league() {
    let players = seed_players();
    let teams = seed_teams();
    assert_eq!(players.len(), 20);
    assert_eq!(teams.len(), 10);

    for team in &teams {
        assert_eq!(team.player_ids.len(), 2, "team {} roster", team.name);
        assert_eq!(
            team.members(&players).len(),
            2,
            "team {} members resolve",
            team.name
        );
        assert_eq!(team.games_played, 8);
    }

    let mut ids: Vec<&str> = teams.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), teams.len());
}

#[test]
fn member_names_join_with_a_fallback_for_unknown_ids() {
    let players = seed_players();
    let teams = seed_teams();
    assert_eq!(teams[0].member_names(&players), "John Smith, Emily Johnson");

    let stray = Team {
        id: "99".to_string(),
        name: "Ghosts".to_string(),
        player_ids: vec!["1".to_string(), "404".to_string()],
        games_played: 0,
        games_won: 0,
        total_points: 0,
    };
    assert_eq!(stray.member_names(&players), "John Smith, Unknown");
}

#[test]
fn seeded_games_cover_a_july_slate() {
    let teams = seed_teams();
    let mut rng = StdRng::seed_from_u64(42);
    let games = seed_games(&teams, &mut rng);
    assert_eq!(games.len(), 40);

    for (idx, game) in games.iter().enumerate() {
        assert_eq!(game.id, (idx + 1).to_string());
        assert_ne!(game.home_id, game.away_id, "game {}", game.id);
        assert!(teams.iter().any(|t| t.id == game.home_id));
        assert!(teams.iter().any(|t| t.id == game.away_id));

        assert!((5..20).contains(&game.score_home), "game {}", game.id);
        assert!((5..20).contains(&game.score_away), "game {}", game.id);

        let date = game.scheduled_at.date();
        assert_eq!(date.format("%Y-%m").to_string(), "2023-07");
        assert!(game.is_completed());
    }
}

#[test]
fn seeded_games_crown_the_higher_score() {
    let teams = seed_teams();
    let mut rng = StdRng::seed_from_u64(7);
    for game in seed_games(&teams, &mut rng) {
        let GameStatus::Completed { winner } = &game.status else {
            panic!("seeded games are completed");
        };
        if game.score_home > game.score_away {
            assert_eq!(winner.as_deref(), Some(game.home_id.as_str()));
        } else if game.score_away > game.score_home {
            assert_eq!(winner.as_deref(), Some(game.away_id.as_str()));
        } else {
            assert!(winner.is_none(), "level game {} has no winner", game.id);
        }
    }
}

#[test]
fn seeding_is_reproducible_for_a_fixed_rng() {
    let teams = seed_teams();
    let first: Vec<(String, u16, u16)> = {
        let mut rng = StdRng::seed_from_u64(42);
        seed_games(&teams, &mut rng)
            .into_iter()
            .map(|g| (g.id, g.score_home, g.score_away))
            .collect()
    };
    let second: Vec<(String, u16, u16)> = {
        let mut rng = StdRng::seed_from_u64(42);
        seed_games(&teams, &mut rng)
            .into_iter()
            .map(|g| (g.id, g.score_home, g.score_away))
            .collect()
    };
    assert_eq!(first, second);
}

#[test]
fn fewer_than_two_teams_yields_no_games() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(seed_games(&[], &mut rng).is_empty());

    let one = seed_teams().into_iter().take(1).collect::<Vec<_>>();
    assert!(seed_games(&one, &mut rng).is_empty());
}

#[test]
fn seed_users_cover_both_roles() {
    let users = seed_users();
    assert_eq!(users.len(), 2);

    let admin = users
        .iter()
        .find(|u| u.email == "admin@example.com")
        .expect("admin account");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.display_name(), "Admin User");

    let regular = users
        .iter()
        .find(|u| u.email == "user@example.com")
        .expect("regular account");
    assert_eq!(regular.role, Role::User);
}

#[test]
fn seed_tournament_spans_july() {
    let tournament = seed_tournament();
    assert_eq!(tournament.name, "Summer Cornhole Championship 2023");
    assert_eq!(
        tournament.start_date.format("%Y-%m-%d").to_string(),
        "2023-07-01"
    );
    assert_eq!(
        tournament.end_date.format("%Y-%m-%d").to_string(),
        "2023-07-30"
    );
}
