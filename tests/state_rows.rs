use chrono::{Datelike, NaiveDate};
use cornhole_terminal::model::{Game, GameStatus, Team};
use cornhole_terminal::ranking::{SortDirection, SortKey};
use cornhole_terminal::state::{AdminTab, AppState, MAX_FIELD_LEN, Screen, TextField};

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

fn game(id: &str, home_id: &str, away_id: &str, day: u32) -> Game {
    Game {
        id: id.to_string(),
        home_id: home_id.to_string(),
        away_id: away_id.to_string(),
        home: format!("Team {home_id}"),
        away: format!("Team {away_id}"),
        score_home: 11,
        score_away: 7,
        scheduled_at: NaiveDate::from_ymd_opt(2023, 7, day)
            .expect("valid date")
            .and_hms_opt(18, 0, 0)
            .expect("valid time"),
        status: GameStatus::Scheduled,
    }
}

fn league_state() -> AppState {
    let mut state = AppState::new();
    state.teams = vec![
        team("1", "Bag Tossers", 6, 235),
        team("2", "Cornhole Kings", 5, 220),
        team("3", "Hole Seekers", 4, 195),
    ];
    state.roster_loading = false;
    state
}

#[test]
fn ranked_rows_follow_the_current_sort() {
    let mut state = league_state();
    let wins_first: Vec<&str> = state.ranked_teams().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(wins_first, ["1", "2", "3"]);

    state.select_sort_key(SortKey::Name);
    let by_name: Vec<&str> = state.ranked_teams().iter().map(|t| t.id.as_str()).collect();
    // New key starts descending, so reverse alphabetical.
    assert_eq!(by_name, ["3", "2", "1"]);
}

#[test]
fn sort_key_selection_follows_the_highlighted_team() {
    let mut state = league_state();
    state.selected = 2; // "3" under wins-descending

    state.select_sort_key(SortKey::Name);
    assert_eq!(state.selected_team_id().as_deref(), Some("3"));
    assert_eq!(state.selected, 0);
    assert_eq!(state.ranking.key, SortKey::Name);
    assert_eq!(state.ranking.direction, SortDirection::Descending);
}

#[test]
fn reselecting_the_key_flips_direction_and_keeps_the_team() {
    let mut state = league_state();
    state.selected = 1; // "2"

    state.select_sort_key(SortKey::GamesWon);
    assert_eq!(state.ranking.direction, SortDirection::Ascending);
    assert_eq!(state.selected_team_id().as_deref(), Some("2"));
    assert_eq!(state.selected, 1);
}

#[test]
fn scoreboard_selection_wraps_both_ways() {
    let mut state = league_state();
    assert_eq!(state.screen, Screen::Scoreboard);

    state.selected = 2;
    state.select_next();
    assert_eq!(state.selected, 0);

    state.select_prev();
    assert_eq!(state.selected, 2);
}

#[test]
fn selection_on_an_empty_scoreboard_stays_put() {
    let mut state = AppState::new();
    state.select_next();
    state.select_prev();
    assert_eq!(state.selected, 0);
    assert!(state.selected_team().is_none());
}

#[test]
fn schedule_date_navigation_wraps() {
    let mut state = league_state();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 15), game("3", "1", "3", 20)];
    state.screen = Screen::Schedule;

    assert_eq!(state.schedule_dates().len(), 3);
    assert_eq!(
        state.selected_date(),
        NaiveDate::from_ymd_opt(2023, 7, 10)
    );

    state.next_date();
    state.next_date();
    state.next_date();
    assert_eq!(state.schedule_date, 0);

    state.prev_date();
    assert_eq!(state.schedule_date, 2);
    assert_eq!(
        state.selected_date(),
        NaiveDate::from_ymd_opt(2023, 7, 20)
    );
}

#[test]
fn games_for_selected_date_filters_the_day() {
    let mut state = league_state();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 10), game("3", "1", "3", 20)];

    let on_first = state.games_for_selected_date();
    assert_eq!(on_first.len(), 2);
    assert!(on_first.iter().all(|g| g.scheduled_at.date().day() == 10));

    state.next_date();
    assert_eq!(state.games_for_selected_date().len(), 1);
}

#[test]
fn changing_the_date_resets_the_game_scroll() {
    let mut state = league_state();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 10), game("3", "1", "3", 20)];
    state.schedule_scroll = 1;

    state.next_date();
    assert_eq!(state.schedule_scroll, 0);
}

#[test]
fn admin_results_selection_wraps_over_games() {
    let mut state = league_state();
    state.games = vec![game("1", "1", "2", 10), game("2", "2", "3", 12)];
    state.screen = Screen::Admin;
    state.set_admin_tab(AdminTab::Results);

    state.select_next();
    assert_eq!(state.admin_selected, 1);
    state.select_next();
    assert_eq!(state.admin_selected, 0);
    state.select_prev();
    assert_eq!(state.admin_selected, 1);

    let selected = state.admin_selected_game().expect("game under cursor");
    assert_eq!(selected.id, "2");
}

#[test]
fn switching_admin_tabs_abandons_the_result_edit() {
    let mut state = league_state();
    state.games = vec![game("1", "1", "2", 10)];
    state.set_admin_tab(AdminTab::Results);

    let editing = state.games[0].clone();
    state.result_form.begin(&editing);
    state.input_active = true;
    assert_eq!(state.result_form.score_home.value, "11");
    assert_eq!(state.editing_game().map(|g| g.id.as_str()), Some("1"));

    state.set_admin_tab(AdminTab::Schedule);
    assert!(!state.input_active);
    assert!(state.result_form.game_id.is_none());
    assert!(state.editing_game().is_none());

    // Re-selecting the current tab changes nothing.
    state.input_active = true;
    state.set_admin_tab(AdminTab::Schedule);
    assert!(state.input_active);
}

#[test]
fn schedule_form_cycles_team_picks_with_wrap() {
    let mut state = league_state();
    let form = &mut state.schedule_form;
    form.focus_next(); // Home
    form.cycle_pick(3, true);
    assert_eq!(form.home, Some(0));
    form.cycle_pick(3, false);
    form.cycle_pick(3, false);
    assert_eq!(form.home, Some(1));

    form.focus_next(); // Away
    form.cycle_pick(3, false);
    assert_eq!(form.away, Some(2));
    form.cycle_pick(3, true);
    assert_eq!(form.away, Some(0));

    // No teams leaves the slot unset.
    form.cycle_pick(0, true);
    assert_eq!(form.away, None);
}

#[test]
fn text_field_edits_at_the_cursor() {
    let mut field = TextField::default();
    for ch in "tet".chars() {
        field.insert(ch);
    }
    field.move_left();
    field.insert('s');
    assert_eq!(field.value, "test");
    assert_eq!(field.cursor, 3);

    field.backspace();
    assert_eq!(field.value, "tet");
    assert_eq!(field.cursor, 2);
    field.insert('s');
    assert_eq!(field.value, "test");

    field.move_home();
    field.delete();
    assert_eq!(field.value, "est");
    field.move_end();
    field.insert('!');
    assert_eq!(field.value, "est!");
}

#[test]
fn text_field_rejects_control_and_non_ascii_input() {
    let mut field = TextField::default();
    field.insert('\t');
    field.insert('\n');
    field.insert('é');
    assert!(field.value.is_empty());

    field.insert('a');
    assert_eq!(field.value, "a");
}

#[test]
fn text_field_caps_its_length() {
    let mut field = TextField::default();
    for _ in 0..(MAX_FIELD_LEN + 10) {
        field.insert('x');
    }
    assert_eq!(field.value.len(), MAX_FIELD_LEN);
}

#[test]
fn text_field_trims_for_validation() {
    let field = TextField::with_value("  Sandy Pitts  ");
    assert_eq!(field.trimmed(), "Sandy Pitts");
    assert!(!field.is_blank());
    assert!(TextField::with_value("   ").is_blank());
}
