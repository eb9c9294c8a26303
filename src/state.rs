use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::model::{Game, Player, Team, Tournament};
use crate::ranking::{Ranking, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Scoreboard,
    Schedule,
    Players,
    Account,
    Admin,
    Sheets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Schedule,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Catchphrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    Home,
    Away,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultField {
    HomeScore,
    AwayScore,
}

pub const MAX_FIELD_LEN: usize = 64;

/// Single-line edit buffer for form fields. ASCII input only, so the
/// byte cursor always sits on a character boundary.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn insert(&mut self, ch: char) {
        if self.value.len() >= MAX_FIELD_LEN {
            return;
        }
        if ch.is_ascii() && !ch.is_ascii_control() {
            self.value.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 && self.cursor <= self.value.len() {
            self.cursor -= 1;
            self.value.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: Option<LoginField>,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            None | Some(LoginField::Password) => Some(LoginField::Email),
            Some(LoginField::Email) => Some(LoginField::Password),
        };
    }

    pub fn active_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Some(LoginField::Email) => Some(&mut self.email),
            Some(LoginField::Password) => Some(&mut self.password),
            None => None,
        }
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.focus = None;
        self.error = None;
    }
}

/// Confirmation panel contents after a successful registration. The
/// roster itself is untouched; registration is a front-door demo flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredPlayer {
    pub name: String,
    pub catchphrase: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: TextField,
    pub catchphrase: TextField,
    pub focus: Option<RegisterField>,
    pub error: Option<String>,
    pub last_registered: Option<RegisteredPlayer>,
}

impl RegisterForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            None | Some(RegisterField::Catchphrase) => Some(RegisterField::Name),
            Some(RegisterField::Name) => Some(RegisterField::Catchphrase),
        };
    }

    pub fn active_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Some(RegisterField::Name) => Some(&mut self.name),
            Some(RegisterField::Catchphrase) => Some(&mut self.catchphrase),
            None => None,
        }
    }

    pub fn reset_fields(&mut self) {
        self.name.clear();
        self.catchphrase.clear();
        self.focus = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    // Indices into the team list; None until the admin picks a side.
    pub home: Option<usize>,
    pub away: Option<usize>,
    pub date: TextField,
    pub focus: Option<ScheduleField>,
    pub error: Option<String>,
}

impl ScheduleForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            None | Some(ScheduleField::Date) => Some(ScheduleField::Home),
            Some(ScheduleField::Home) => Some(ScheduleField::Away),
            Some(ScheduleField::Away) => Some(ScheduleField::Date),
        };
    }

    pub fn cycle_pick(&mut self, team_count: usize, forward: bool) {
        let slot = match self.focus {
            Some(ScheduleField::Home) => &mut self.home,
            Some(ScheduleField::Away) => &mut self.away,
            _ => return,
        };
        if team_count == 0 {
            *slot = None;
            return;
        }
        *slot = Some(match (*slot, forward) {
            (None, true) => 0,
            (None, false) => team_count - 1,
            (Some(idx), true) => (idx + 1) % team_count,
            (Some(idx), false) => {
                if idx == 0 {
                    team_count - 1
                } else {
                    idx - 1
                }
            }
        });
    }

    pub fn reset(&mut self) {
        self.home = None;
        self.away = None;
        self.date.clear();
        self.focus = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultForm {
    pub game_id: Option<String>,
    pub score_home: TextField,
    pub score_away: TextField,
    pub focus: Option<ResultField>,
    pub error: Option<String>,
}

impl ResultForm {
    pub fn begin(&mut self, game: &Game) {
        self.game_id = Some(game.id.clone());
        self.score_home.set(game.score_home.to_string());
        self.score_away.set(game.score_away.to_string());
        self.focus = Some(ResultField::HomeScore);
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            None | Some(ResultField::AwayScore) => Some(ResultField::HomeScore),
            Some(ResultField::HomeScore) => Some(ResultField::AwayScore),
        };
    }

    pub fn active_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Some(ResultField::HomeScore) => Some(&mut self.score_home),
            Some(ResultField::AwayScore) => Some(&mut self.score_away),
            None => None,
        }
    }

    pub fn reset(&mut self) {
        self.game_id = None;
        self.score_home.clear();
        self.score_away.clear();
        self.focus = None;
        self.error = None;
    }
}

#[derive(Debug, Clone)]
pub struct ExportState {
    pub active: bool,
    pub done: bool,
    pub path: Option<String>,
    pub current: usize,
    pub total: usize,
    pub message: String,
    pub error_count: usize,
    pub last_updated: Option<std::time::Instant>,
}

impl Default for ExportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportState {
    pub fn new() -> Self {
        Self {
            active: false,
            done: false,
            path: None,
            current: 0,
            total: 0,
            message: String::new(),
            error_count: 0,
            last_updated: None,
        }
    }

    pub fn clear_if_done_for(&mut self, now: std::time::Instant, keep_secs: u64) {
        if !self.active || !self.done {
            return;
        }
        let Some(last) = self.last_updated else {
            return;
        };
        if now.duration_since(last).as_secs() >= keep_secs {
            *self = Self::new();
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub ranking: Ranking,
    pub selected: usize,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
    pub tournament: Option<Tournament>,
    pub roster_loading: bool,
    pub schedule_date: usize,
    pub schedule_scroll: u16,
    pub players_scroll: u16,
    pub admin_tab: AdminTab,
    pub admin_selected: usize,
    pub input_active: bool,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub schedule_form: ScheduleForm,
    pub result_form: ResultForm,
    pub export_path: TextField,
    pub last_export: Option<String>,
    pub export: ExportState,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Scoreboard,
            ranking: Ranking::new(),
            selected: 0,
            players: Vec::with_capacity(20),
            teams: Vec::with_capacity(10),
            games: Vec::with_capacity(40),
            tournament: None,
            roster_loading: true,
            schedule_date: 0,
            schedule_scroll: 0,
            players_scroll: 0,
            admin_tab: AdminTab::Schedule,
            admin_selected: 0,
            input_active: false,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            schedule_form: ScheduleForm::default(),
            result_form: ResultForm::default(),
            export_path: TextField::with_value("cornhole_standings.xlsx"),
            last_export: None,
            export: ExportState::new(),
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn maybe_clear_export(&mut self, now: std::time::Instant) {
        self.export.clear_if_done_for(now, 8);
    }

    // --- Scoreboard -------------------------------------------------------

    /// Teams in the current sort order. Aggregates come straight off the
    /// team records; nothing here recomputes them from game history.
    pub fn ranked_teams(&self) -> Vec<&Team> {
        self.ranking.rank(&self.teams)
    }

    pub fn selected_team_id(&self) -> Option<String> {
        let ranked = self.ranked_teams();
        ranked.get(self.selected).map(|team| team.id.clone())
    }

    pub fn selected_team(&self) -> Option<&Team> {
        let ranked = self.ranked_teams();
        ranked.get(self.selected).copied()
    }

    /// Applies the toggle rule and keeps the highlighted team highlighted
    /// wherever it lands in the new order.
    pub fn select_sort_key(&mut self, key: SortKey) {
        let selected_id = self.selected_team_id();
        self.ranking.select(key);
        self.restore_selection(selected_id);
    }

    fn restore_selection(&mut self, selected_id: Option<String>) {
        if let Some(id) = selected_id {
            let ranked = self.ranking.rank_indices(&self.teams);
            if let Some(pos) = ranked.iter().position(|idx| self.teams[*idx].id == id) {
                self.selected = pos;
                return;
            }
        }
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Scoreboard => {
                let total = self.teams.len();
                if total == 0 {
                    self.selected = 0;
                    return;
                }
                self.selected = (self.selected + 1) % total;
            }
            Screen::Schedule => self.scroll_schedule_down(),
            Screen::Players => self.scroll_players_down(),
            Screen::Admin => {
                if self.admin_tab == AdminTab::Results {
                    let total = self.games.len();
                    if total == 0 {
                        self.admin_selected = 0;
                        return;
                    }
                    self.admin_selected = (self.admin_selected + 1) % total;
                }
            }
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Scoreboard => {
                let total = self.teams.len();
                if total == 0 {
                    self.selected = 0;
                    return;
                }
                if self.selected == 0 {
                    self.selected = total - 1;
                } else {
                    self.selected -= 1;
                }
            }
            Screen::Schedule => self.scroll_schedule_up(),
            Screen::Players => self.scroll_players_up(),
            Screen::Admin => {
                if self.admin_tab == AdminTab::Results {
                    let total = self.games.len();
                    if total == 0 {
                        self.admin_selected = 0;
                        return;
                    }
                    if self.admin_selected == 0 {
                        self.admin_selected = total - 1;
                    } else {
                        self.admin_selected -= 1;
                    }
                }
            }
            _ => {}
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.teams.len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }

        let games = self.games.len();
        if games == 0 {
            self.admin_selected = 0;
        } else if self.admin_selected >= games {
            self.admin_selected = games - 1;
        }

        let dates = self.schedule_dates().len();
        if dates == 0 {
            self.schedule_date = 0;
        } else if self.schedule_date >= dates {
            self.schedule_date = dates - 1;
        }
    }

    // --- Schedule ---------------------------------------------------------

    pub fn schedule_dates(&self) -> Vec<NaiveDate> {
        crate::schedule::game_dates(&self.games)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.schedule_dates().get(self.schedule_date).copied()
    }

    pub fn games_for_selected_date(&self) -> Vec<&Game> {
        match self.selected_date() {
            Some(date) => crate::schedule::games_on(&self.games, date),
            None => Vec::new(),
        }
    }

    pub fn next_date(&mut self) {
        let total = self.schedule_dates().len();
        if total == 0 {
            self.schedule_date = 0;
            return;
        }
        self.schedule_date = (self.schedule_date + 1) % total;
        self.schedule_scroll = 0;
    }

    pub fn prev_date(&mut self) {
        let total = self.schedule_dates().len();
        if total == 0 {
            self.schedule_date = 0;
            return;
        }
        if self.schedule_date == 0 {
            self.schedule_date = total - 1;
        } else {
            self.schedule_date -= 1;
        }
        self.schedule_scroll = 0;
    }

    pub fn scroll_schedule_down(&mut self) {
        let total = self.games_for_selected_date().len() as u16;
        if self.schedule_scroll + 1 < total {
            self.schedule_scroll += 1;
        }
    }

    pub fn scroll_schedule_up(&mut self) {
        self.schedule_scroll = self.schedule_scroll.saturating_sub(1);
    }

    // --- Players ----------------------------------------------------------

    pub fn scroll_players_down(&mut self) {
        let total = self.players.len() as u16;
        if self.players_scroll + 1 < total {
            self.players_scroll += 1;
        }
    }

    pub fn scroll_players_up(&mut self) {
        self.players_scroll = self.players_scroll.saturating_sub(1);
    }

    // --- Admin ------------------------------------------------------------

    pub fn set_admin_tab(&mut self, tab: AdminTab) {
        if self.admin_tab != tab {
            self.admin_tab = tab;
            self.input_active = false;
            self.result_form.reset();
        }
    }

    pub fn admin_selected_game(&self) -> Option<&Game> {
        self.games.get(self.admin_selected)
    }

    pub fn editing_game(&self) -> Option<&Game> {
        let id = self.result_form.game_id.as_deref()?;
        self.games.iter().find(|g| g.id == id)
    }

    // --- Console ----------------------------------------------------------

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetRoster {
        players: Vec<Player>,
        teams: Vec<Team>,
    },
    SetGames(Vec<Game>),
    SetTournament(Tournament),
    UpsertGame(Game),
    ExportStarted {
        path: String,
        total: usize,
    },
    ExportProgress {
        current: usize,
        total: usize,
        message: String,
    },
    ExportFinished {
        path: String,
        teams: usize,
        players: usize,
        games: usize,
        errors: usize,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    ExportSheet {
        path: String,
        teams: Vec<Team>,
        players: Vec<Player>,
        games: Vec<Game>,
    },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetRoster { players, teams } => {
            let selected_id = state.selected_team_id();
            state.players = players;
            state.teams = teams;
            state.roster_loading = false;
            state.restore_selection(selected_id);
            state.clamp_selection();
        }
        Delta::SetGames(games) => {
            state.games = games;
            // Fresh schedule data is shown from the first date.
            state.schedule_date = 0;
            state.schedule_scroll = 0;
            state.clamp_selection();
        }
        Delta::SetTournament(tournament) => {
            state.tournament = Some(tournament);
        }
        Delta::UpsertGame(game) => {
            if let Some(existing) = state.games.iter_mut().find(|g| g.id == game.id) {
                *existing = game;
            } else {
                state.games.push(game);
            }
            state.clamp_selection();
        }
        Delta::ExportStarted { path, total } => {
            state.export.active = true;
            state.export.path = Some(path);
            state.export.total = total;
            state.export.current = 0;
            state.export.message = "Starting export".to_string();
            state.export.done = false;
            state.export.error_count = 0;
            state.export.last_updated = Some(std::time::Instant::now());
        }
        Delta::ExportProgress {
            current,
            total,
            message,
        } => {
            state.export.active = true;
            state.export.total = total;
            state.export.current = current;
            state.export.message = message;
            state.export.last_updated = Some(std::time::Instant::now());
        }
        Delta::ExportFinished {
            path,
            teams,
            players,
            games,
            errors,
        } => {
            state.export.active = true;
            state.export.path = Some(path);
            state.export.current = state.export.total;
            state.export.message =
                format!("Done: {teams} teams, {players} players, {games} games ({errors} errors)");
            state.export.done = true;
            state.export.error_count = errors;
            state.export.last_updated = Some(std::time::Instant::now());
            state.push_log(format!("[INFO] Export finished ({errors} errors)"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Scoreboard => "SCOREBOARD",
        Screen::Schedule => "SCHEDULE",
        Screen::Players => "PLAYERS",
        Screen::Account => "ACCOUNT",
        Screen::Admin => "ADMIN",
        Screen::Sheets => "SHEETS",
    }
}

pub fn admin_tab_label(tab: AdminTab) -> &'static str {
    match tab {
        AdminTab::Schedule => "Schedule Games",
        AdminTab::Results => "Update Results",
    }
}
