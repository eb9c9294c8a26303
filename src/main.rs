use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use cornhole_terminal::model::{role_label, Game, GameStatus, Player, Team};
use cornhole_terminal::ranking::{direction_label, sort_key_label, SortKey};
use cornhole_terminal::roster;
use cornhole_terminal::schedule;
use cornhole_terminal::session::SessionGate;
use cornhole_terminal::state::{
    admin_tab_label, apply_delta, screen_label, AdminTab, AppState, Delta, LoginField,
    ProviderCommand, RegisterField, RegisteredPlayer, ResultField, ScheduleField, Screen,
    TextField,
};
use cornhole_terminal::store::SessionStore;

struct App {
    state: AppState,
    gate: SessionGate,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(gate: SessionGate, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        let mut state = AppState::new();
        if let Some(user) = gate.current_user() {
            state.push_log(format!("[INFO] Session restored for {}", user.email));
        }
        Self {
            state,
            gate,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.state.help_overlay = false;
            }
            return;
        }

        if self.state.input_active {
            self.on_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Scoreboard,
            KeyCode::Char('2') => self.state.screen = Screen::Schedule,
            KeyCode::Char('3') => self.state.screen = Screen::Players,
            KeyCode::Char('4') => self.state.screen = Screen::Account,
            KeyCode::Char('5') => self.open_admin(),
            KeyCode::Char('6') => self.state.screen = Screen::Sheets,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => self.on_screen_key(key),
        }
    }

    fn on_screen_key(&mut self, key: KeyEvent) {
        match self.state.screen {
            Screen::Scoreboard => match key.code {
                KeyCode::Char('n') => self.state.select_sort_key(SortKey::Name),
                KeyCode::Char('w') => self.state.select_sort_key(SortKey::GamesWon),
                KeyCode::Char('g') => self.state.select_sort_key(SortKey::GamesPlayed),
                KeyCode::Char('p') => self.state.select_sort_key(SortKey::TotalPoints),
                _ => {}
            },
            Screen::Schedule => match key.code {
                KeyCode::Char('h') | KeyCode::Left => self.state.prev_date(),
                KeyCode::Char('l') | KeyCode::Right => self.state.next_date(),
                _ => {}
            },
            Screen::Players => {
                if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                    self.state.register.focus = Some(RegisterField::Name);
                    self.state.input_active = true;
                }
            }
            Screen::Account => {
                if self.gate.current_user().is_some() {
                    if key.code == KeyCode::Char('o') {
                        self.logout();
                    }
                } else if matches!(key.code, KeyCode::Char('e') | KeyCode::Enter) {
                    self.state.login.focus = Some(LoginField::Email);
                    self.state.input_active = true;
                }
            }
            Screen::Admin => match key.code {
                KeyCode::Char('s') => self.state.set_admin_tab(AdminTab::Schedule),
                KeyCode::Char('r') => self.state.set_admin_tab(AdminTab::Results),
                KeyCode::Char('e') | KeyCode::Enter => self.begin_admin_edit(),
                _ => {}
            },
            Screen::Sheets => match key.code {
                KeyCode::Char('e') => self.state.input_active = true,
                KeyCode::Enter => self.request_export(),
                _ => {}
            },
        }
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.input_active = false,
            KeyCode::Tab => self.focus_next_field(),
            KeyCode::Enter => self.submit_active_form(),
            code => self.dispatch_edit(code),
        }
    }

    fn focus_next_field(&mut self) {
        match self.state.screen {
            Screen::Account => self.state.login.focus_next(),
            Screen::Players => self.state.register.focus_next(),
            Screen::Admin => match self.state.admin_tab {
                AdminTab::Schedule => self.state.schedule_form.focus_next(),
                AdminTab::Results => self.state.result_form.focus_next(),
            },
            _ => {}
        }
    }

    fn dispatch_edit(&mut self, code: KeyCode) {
        match self.state.screen {
            Screen::Account => edit_field(self.state.login.active_field_mut(), code),
            Screen::Players => edit_field(self.state.register.active_field_mut(), code),
            Screen::Admin => match self.state.admin_tab {
                AdminTab::Schedule => match self.state.schedule_form.focus {
                    Some(ScheduleField::Home) | Some(ScheduleField::Away) => {
                        let team_count = self.state.teams.len();
                        match code {
                            KeyCode::Left | KeyCode::Char('h') => {
                                self.state.schedule_form.cycle_pick(team_count, false)
                            }
                            KeyCode::Right | KeyCode::Char('l') => {
                                self.state.schedule_form.cycle_pick(team_count, true)
                            }
                            _ => {}
                        }
                    }
                    Some(ScheduleField::Date) => {
                        edit_field(Some(&mut self.state.schedule_form.date), code)
                    }
                    None => {}
                },
                AdminTab::Results => edit_field(self.state.result_form.active_field_mut(), code),
            },
            Screen::Sheets => edit_field(Some(&mut self.state.export_path), code),
            _ => {}
        }
    }

    fn submit_active_form(&mut self) {
        match self.state.screen {
            Screen::Account => self.attempt_login(),
            Screen::Players => self.submit_registration(),
            Screen::Admin => match self.state.admin_tab {
                AdminTab::Schedule => self.submit_schedule(),
                AdminTab::Results => self.submit_result(),
            },
            Screen::Sheets => {
                self.state.input_active = false;
                self.request_export();
            }
            _ => {}
        }
    }

    fn attempt_login(&mut self) {
        let email = self.state.login.email.trimmed().to_string();
        let password = self.state.login.password.value.clone();
        match self.gate.login(&email, &password) {
            Ok(user) => {
                self.state.login.reset();
                self.state.input_active = false;
                self.state.screen = Screen::Scoreboard;
                self.state
                    .push_log(format!("[INFO] Login successful ({})", user.email));
            }
            Err(err) => {
                self.state.login.error = Some(err.to_string());
            }
        }
    }

    fn logout(&mut self) {
        self.gate.logout();
        self.state.push_log("[INFO] Logged out successfully");
    }

    fn submit_registration(&mut self) {
        let name = self.state.register.name.trimmed().to_string();
        let catchphrase = self.state.register.catchphrase.trimmed().to_string();
        if name.is_empty() || catchphrase.is_empty() {
            self.state.register.error = Some("Please fill in all fields".to_string());
            return;
        }

        self.state.register.reset_fields();
        self.state.register.last_registered = Some(RegisteredPlayer {
            name: name.clone(),
            catchphrase,
        });
        self.state.input_active = false;
        self.state
            .push_log(format!("[INFO] Registration successful! ({name})"));
    }

    fn begin_admin_edit(&mut self) {
        match self.state.admin_tab {
            AdminTab::Schedule => {
                self.state.schedule_form.focus = Some(ScheduleField::Home);
                self.state.input_active = true;
            }
            AdminTab::Results => {
                let game = self.state.admin_selected_game().cloned();
                if let Some(game) = game {
                    self.state.result_form.begin(&game);
                    self.state.input_active = true;
                }
            }
        }
    }

    fn submit_schedule(&mut self) {
        let home_id = self
            .state
            .schedule_form
            .home
            .and_then(|idx| self.state.teams.get(idx))
            .map(|team| team.id.clone())
            .unwrap_or_default();
        let away_id = self
            .state
            .schedule_form
            .away
            .and_then(|idx| self.state.teams.get(idx))
            .map(|team| team.id.clone())
            .unwrap_or_default();

        let scheduled_at = match schedule::parse_game_date(self.state.schedule_form.date.trimmed())
        {
            Ok(value) => value,
            Err(err) => {
                self.state.schedule_form.error = Some(err.to_string());
                return;
            }
        };

        match schedule::build_game(
            &self.state.teams,
            &self.state.games,
            &home_id,
            &away_id,
            scheduled_at,
        ) {
            Ok(game) => {
                apply_delta(&mut self.state, Delta::UpsertGame(game));
                self.state.schedule_form.reset();
                self.state.input_active = false;
                self.state.push_log("[INFO] Game scheduled successfully");
            }
            Err(err) => {
                self.state.schedule_form.error = Some(err.to_string());
            }
        }
    }

    fn submit_result(&mut self) {
        let Some(game_id) = self.state.result_form.game_id.clone() else {
            self.state.input_active = false;
            return;
        };
        let score_home = match schedule::parse_score(self.state.result_form.score_home.trimmed()) {
            Ok(value) => value,
            Err(err) => {
                self.state.result_form.error = Some(err.to_string());
                return;
            }
        };
        let score_away = match schedule::parse_score(self.state.result_form.score_away.trimmed()) {
            Ok(value) => value,
            Err(err) => {
                self.state.result_form.error = Some(err.to_string());
                return;
            }
        };

        let updated = match self.state.games.iter().find(|g| g.id == game_id) {
            Some(game) => schedule::record_result(game, score_home, score_away),
            None => {
                self.state.result_form.reset();
                self.state.input_active = false;
                return;
            }
        };

        apply_delta(&mut self.state, Delta::UpsertGame(updated));
        self.state.result_form.reset();
        self.state.input_active = false;
        self.state.push_log("[INFO] Game result updated successfully");
    }

    fn open_admin(&mut self) {
        if self.gate.is_admin() {
            self.state.screen = Screen::Admin;
        } else {
            self.state
                .push_log("[WARN] Admin access requires an admin account");
        }
    }

    fn request_export(&mut self) {
        if self.state.export.active && !self.state.export.done {
            self.state.push_log("[INFO] Export already running");
            return;
        }
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Sheets export unavailable");
            return;
        };
        let path = self.state.export_path.trimmed().to_string();
        if path.is_empty() {
            self.state.push_log("[WARN] Export path is empty");
            return;
        }

        let command = ProviderCommand::ExportSheet {
            path: path.clone(),
            teams: self.state.teams.clone(),
            players: self.state.players.clone(),
            games: self.state.games.clone(),
        };
        if tx.send(command).is_err() {
            self.state.push_log("[WARN] Export request failed");
        } else {
            self.state.last_export = Some(path);
            self.state.push_log("[INFO] Export request sent");
        }
    }
}

fn edit_field(field: Option<&mut TextField>, code: KeyCode) {
    let Some(field) = field else {
        return;
    };
    match code {
        KeyCode::Char(ch) => field.insert(ch),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => {}
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    roster::spawn_roster_provider(tx, cmd_rx);

    let gate = SessionGate::restore(roster::seed_users(), SessionStore::from_env());
    let mut app = App::new(gate, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.maybe_clear_export(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state, &app.gate))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(chunks[1]);

    match app.state.screen {
        Screen::Scoreboard => render_scoreboard(frame, body[0], &app.state),
        Screen::Schedule => render_schedule(frame, body[0], &app.state),
        Screen::Players => render_players(frame, body[0], &app.state),
        Screen::Account => render_account(frame, body[0], app),
        Screen::Admin => render_admin(frame, body[0], &app.state),
        Screen::Sheets => render_sheets(frame, body[0], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, body[1]);

    let footer = Paragraph::new(footer_text(app)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState, gate: &SessionGate) -> String {
    let title = match state.screen {
        Screen::Scoreboard => format!(
            "CORNSCORE | {} | Sort: {} {}",
            screen_label(state.screen),
            sort_key_label(state.ranking.key),
            direction_label(state.ranking.direction)
        ),
        _ => format!("CORNSCORE | {}", screen_label(state.screen)),
    };
    let tournament = state
        .tournament
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Loading tournament".to_string());
    let session = match gate.current_user() {
        Some(user) => format!(
            "Signed in: {} ({})",
            user.display_name(),
            role_label(user.role)
        ),
        None => "Anonymous".to_string(),
    };
    let line1 = format!("  __o   {title}");
    let line2 = format!(" /__/|  {tournament} | {session}");
    let line3 = "  |__|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(app: &App) -> String {
    match app.state.screen {
        Screen::Scoreboard => {
            "1-6 Screens | j/k/↑/↓ Move | n/w/g/p Sort | ? Help | q Quit".to_string()
        }
        Screen::Schedule => {
            "1-6 Screens | h/l/←/→ Date | j/k Scroll | ? Help | q Quit".to_string()
        }
        Screen::Players => "1-6 Screens | j/k Scroll | r Register | ? Help | q Quit".to_string(),
        Screen::Account => {
            if app.gate.current_user().is_some() {
                "1-6 Screens | o Log out | ? Help | q Quit".to_string()
            } else {
                "1-6 Screens | e/Enter Sign in | Tab Fields | Esc Done | ? Help | q Quit"
                    .to_string()
            }
        }
        Screen::Admin => {
            "1-6 Screens | s Schedule | r Results | j/k Games | e/Enter Edit | ? Help | q Quit"
                .to_string()
        }
        Screen::Sheets => "1-6 Screens | e Path | Enter Export | ? Help | q Quit".to_string(),
    }
}

fn scoreboard_columns() -> [Constraint; 6] {
    [
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Min(24),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(8),
    ]
}

fn render_scoreboard_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Rank", style);
    render_cell_text(frame, cols[1], "Team", style);
    render_cell_text(frame, cols[2], "Players", style);
    render_cell_text(frame, cols[3], "Games", style);
    render_cell_text(frame, cols[4], "Wins", style);
    render_cell_text(frame, cols[5], "Points", style);
}

fn render_scoreboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = scoreboard_columns();
    render_scoreboard_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if state.roster_loading {
        let empty = Paragraph::new("Loading teams...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let ranked = state.ranked_teams();
    if ranked.is_empty() {
        let empty = Paragraph::new("No teams yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, ranked.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };

        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let team = ranked[idx];
        render_cell_text(frame, cols[0], &(idx + 1).to_string(), row_style);
        render_cell_text(frame, cols[1], &team.name, row_style);
        render_cell_text(frame, cols[2], &team.member_names(&state.players), row_style);
        render_cell_text(frame, cols[3], &team.games_played.to_string(), row_style);
        render_cell_text(frame, cols[4], &team.games_won.to_string(), row_style);
        render_cell_text(frame, cols[5], &team.total_points.to_string(), row_style);
    }
}

fn render_schedule(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let dates = state.schedule_dates();
    let strip = if dates.is_empty() {
        "No games scheduled".to_string()
    } else {
        let per_label = 9usize;
        let visible = (sections[0].width as usize / per_label).max(1);
        let (start, end) = visible_range(state.schedule_date, dates.len(), visible);
        dates[start..end]
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let label = date.format("%b %d").to_string();
                if start + i == state.schedule_date {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    };
    let strip = Paragraph::new(strip).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(strip, sections[0]);

    let title = match state.selected_date() {
        Some(date) => format!("Games on {}", date.format("%B %d, %Y")),
        None => "Games".to_string(),
    };
    let games = state.games_for_selected_date();
    let text = if games.is_empty() {
        "No games on this date".to_string()
    } else {
        games
            .iter()
            .skip(state.schedule_scroll as usize)
            .map(|game| game_line(game))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let list = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, sections[1]);
}

fn game_line(game: &Game) -> String {
    let score = match &game.status {
        GameStatus::Scheduled => "  vs ".to_string(),
        GameStatus::Completed { .. } => format!("{:>2}-{:<2}", game.score_home, game.score_away),
    };
    let status = match &game.status {
        GameStatus::Scheduled => "Upcoming match".to_string(),
        GameStatus::Completed { winner: Some(id) } => {
            let name = if *id == game.home_id {
                &game.home
            } else {
                &game.away
            };
            format!("Completed - {name} won")
        }
        GameStatus::Completed { winner: None } => "Completed - Tie".to_string(),
    };
    format!(
        "#{:<3} {} {:>18} {} {:<18} {}",
        game.id,
        game.scheduled_at.format("%H:%M"),
        game.home,
        score,
        game.away,
        status
    )
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(44)])
        .split(area);

    let roster_title = format!("Roster ({} players)", state.players.len());
    let text = if state.players.is_empty() {
        "No players yet".to_string()
    } else {
        state
            .players
            .iter()
            .skip(state.players_scroll as usize)
            .map(player_line)
            .collect::<Vec<_>>()
            .join("\n")
    };
    let roster =
        Paragraph::new(text).block(Block::default().title(roster_title).borders(Borders::ALL));
    frame.render_widget(roster, cols[0]);

    let form = Paragraph::new(registration_text(state))
        .block(Block::default().title("Register").borders(Borders::ALL));
    frame.render_widget(form, cols[1]);
}

fn player_line(player: &Player) -> String {
    format!(
        "{:<20} {:>2}W {:>2}G {:>4}P  \"{}\"",
        player.name,
        player.games_won,
        player.games_played,
        player.total_points,
        player.catchphrase
    )
}

fn registration_text(state: &AppState) -> String {
    let name_focus = state.input_active && state.register.focus == Some(RegisterField::Name);
    let phrase_focus =
        state.input_active && state.register.focus == Some(RegisterField::Catchphrase);

    let mut lines = vec![
        "Join the tournament".to_string(),
        String::new(),
        field_line(
            "Name",
            &field_display(&state.register.name, name_focus),
            name_focus,
        ),
        field_line(
            "Catchphrase",
            &field_display(&state.register.catchphrase, phrase_focus),
            phrase_focus,
        ),
        String::new(),
        "r starts editing, Tab switches, Enter submits".to_string(),
    ];
    if let Some(err) = &state.register.error {
        lines.push(String::new());
        lines.push(format!("! {err}"));
    }
    if let Some(done) = &state.register.last_registered {
        lines.push(String::new());
        lines.push("Registration Complete".to_string());
        lines.push("Thank you for registering for the tournament!".to_string());
        lines.push(done.name.clone());
        lines.push(format!("\"{}\"", done.catchphrase));
    }
    lines.join("\n")
}

fn render_account(frame: &mut Frame, area: Rect, app: &App) {
    match app.gate.current_user() {
        Some(user) => {
            let text = [
                "Account".to_string(),
                String::new(),
                format!("Name:  {}", user.display_name()),
                format!("Email: {}", user.email),
                format!("Role:  {}", role_label(user.role)),
                String::new(),
                "Press o to log out".to_string(),
            ]
            .join("\n");
            let panel = Paragraph::new(text)
                .block(Block::default().title("Account").borders(Borders::ALL));
            frame.render_widget(panel, area);
        }
        None => render_login(frame, area, &app.state),
    }
}

fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
    let email_focus = state.input_active && state.login.focus == Some(LoginField::Email);
    let password_focus = state.input_active && state.login.focus == Some(LoginField::Password);

    let mut lines = vec![
        "Sign in to manage the tournament".to_string(),
        String::new(),
        field_line(
            "Email",
            &field_display(&state.login.email, email_focus),
            email_focus,
        ),
        field_line(
            "Password",
            &masked_display(&state.login.password, password_focus),
            password_focus,
        ),
    ];
    if let Some(err) = &state.login.error {
        lines.push(String::new());
        lines.push(format!("! {err}"));
    }
    lines.push(String::new());
    lines.push("Demo Accounts".to_string());
    lines.push("  Admin: admin@example.com".to_string());
    lines.push("  User:  user@example.com".to_string());
    lines.push("  (Use password: \"password\" for both)".to_string());

    let panel = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Sign In").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn render_admin(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tabs = format!(
        "{}   {}",
        tab_marker(AdminTab::Schedule, state.admin_tab),
        tab_marker(AdminTab::Results, state.admin_tab)
    );
    let tabs = Paragraph::new(tabs).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, sections[0]);

    match state.admin_tab {
        AdminTab::Schedule => {
            let form = Paragraph::new(schedule_form_text(state)).block(
                Block::default()
                    .title("Schedule New Game")
                    .borders(Borders::ALL),
            );
            frame.render_widget(form, sections[1]);
        }
        AdminTab::Results => render_admin_results(frame, sections[1], state),
    }
}

fn tab_marker(tab: AdminTab, active: AdminTab) -> String {
    if tab == active {
        format!("[{}]", admin_tab_label(tab))
    } else {
        format!(" {} ", admin_tab_label(tab))
    }
}

fn schedule_form_text(state: &AppState) -> String {
    let form = &state.schedule_form;
    let home_focus = state.input_active && form.focus == Some(ScheduleField::Home);
    let away_focus = state.input_active && form.focus == Some(ScheduleField::Away);
    let date_focus = state.input_active && form.focus == Some(ScheduleField::Date);

    let mut lines = vec![
        "Schedule a new game".to_string(),
        String::new(),
        field_line(
            "Home team",
            &pick_display(form.home, &state.teams),
            home_focus,
        ),
        field_line(
            "Away team",
            &pick_display(form.away, &state.teams),
            away_focus,
        ),
        field_line("Date", &field_display(&form.date, date_focus), date_focus),
        String::new(),
        "e starts editing, Tab switches, h/l pick teams,".to_string(),
        "date like 2023-07-15 or 2023-07-15 18:00, Enter submits".to_string(),
    ];
    if let Some(err) = &form.error {
        lines.push(String::new());
        lines.push(format!("! {err}"));
    }
    lines.join("\n")
}

fn pick_display(slot: Option<usize>, teams: &[Team]) -> String {
    slot.and_then(|idx| teams.get(idx))
        .map(|team| team.name.clone())
        .unwrap_or_else(|| "Select a team".to_string())
}

fn render_admin_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(40)])
        .split(area);

    let list_title = format!("All Games ({})", state.games.len());
    let text = if state.games.is_empty() {
        "No games yet".to_string()
    } else {
        let visible = cols[0].height.saturating_sub(2) as usize;
        let (start, end) = visible_range(state.admin_selected, state.games.len(), visible.max(1));
        state.games[start..end]
            .iter()
            .enumerate()
            .map(|(i, game)| {
                let prefix = if start + i == state.admin_selected {
                    "> "
                } else {
                    "  "
                };
                format!("{prefix}{}", game_line(game))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let list = Paragraph::new(text).block(Block::default().title(list_title).borders(Borders::ALL));
    frame.render_widget(list, cols[0]);

    let form = Paragraph::new(result_form_text(state)).block(
        Block::default()
            .title("Update Game Result")
            .borders(Borders::ALL),
    );
    frame.render_widget(form, cols[1]);
}

fn result_form_text(state: &AppState) -> String {
    let Some(game) = state.editing_game() else {
        return "Select a game with j/k and press Enter\nto record its result".to_string();
    };
    let form = &state.result_form;
    let home_focus = state.input_active && form.focus == Some(ResultField::HomeScore);
    let away_focus = state.input_active && form.focus == Some(ResultField::AwayScore);

    let mut lines = vec![
        format!("{} vs {}", game.home, game.away),
        format!("Played {}", game.scheduled_at.format("%B %d, %Y")),
        String::new(),
        field_line(
            &game.home,
            &field_display(&form.score_home, home_focus),
            home_focus,
        ),
        field_line(
            &game.away,
            &field_display(&form.score_away, away_focus),
            away_focus,
        ),
        String::new(),
        "Tab switches sides, Enter saves".to_string(),
    ];
    if let Some(err) = &form.error {
        lines.push(String::new());
        lines.push(format!("! {err}"));
    }
    lines.join("\n")
}

fn render_sheets(frame: &mut Frame, area: Rect, state: &AppState) {
    let path_focus = state.input_active;
    let mut lines = vec![
        "Export the tournament to a spreadsheet".to_string(),
        String::new(),
        field_line(
            "Workbook",
            &field_display(&state.export_path, path_focus),
            path_focus,
        ),
        String::new(),
    ];

    if state.export.active {
        let path = state.export.path.clone().unwrap_or_default();
        lines.push(format!("Export: {path}"));
        lines.push(format!(
            "  {} / {} rows",
            state.export.current, state.export.total
        ));
        lines.push(format!("  {}", state.export.message));
        if state.export.done && state.export.error_count > 0 {
            lines.push(format!("  {} errors", state.export.error_count));
        }
    } else if let Some(last) = &state.last_export {
        lines.push(format!("Last export: {last}"));
    } else {
        lines.push("No export yet".to_string());
    }

    lines.push(String::new());
    lines.push("Sheets written: Standings, Players, Games".to_string());

    let panel = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Sheets Export").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_line(label: &str, display: &str, focused: bool) -> String {
    let marker = if focused { ">" } else { " " };
    format!("{marker} {label:<12} [{display}]")
}

fn field_display(field: &TextField, focused: bool) -> String {
    if !focused {
        return field.value.clone();
    }
    let cursor = field.cursor.min(field.value.len());
    let (head, tail) = field.value.split_at(cursor);
    format!("{head}|{tail}")
}

fn masked_display(field: &TextField, focused: bool) -> String {
    let masked = "*".repeat(field.value.len());
    if !focused {
        return masked;
    }
    let cursor = field.cursor.min(masked.len());
    let (head, tail) = masked.split_at(cursor);
    format!("{head}|{tail}")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CornScore - Help",
        "",
        "Global:",
        "  1            Scoreboard",
        "  2            Schedule",
        "  3            Players",
        "  4            Account",
        "  5            Admin (admin only)",
        "  6            Sheets export",
        "  j/k or ↑/↓   Move/scroll",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Scoreboard:",
        "  n/w/g/p      Sort by team/wins/games/points",
        "  same key     Flip sort direction",
        "",
        "Forms:",
        "  e/Enter      Edit, Tab next field, Esc done",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
