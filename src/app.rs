//! Screen flow of the game.
//!
//! [`App`] is the I/O-free state machine behind the terminal loop: it turns
//! key presses and elapsed time into screen changes, session updates and
//! [`AppEffect`]s for the outer loop to carry out (persisting a finished run,
//! fetching the leaderboard, quitting).

use crossterm::event::KeyEvent;

use crate::core::{RunSnapshot, SimpleRng};
use crate::engine::{FinishedRun, GameSession};
use crate::input::{self, MenuKey, TextEdit};
use crate::leaderboard::{LeaderboardView, PersistEvent};
use crate::term::{self, FrameBuffer, TrackView, Viewport};
use crate::types::PlayerName;

/// Longest name accepted by the name entry field, in characters.
pub const MAX_NAME_CHARS: usize = 24;

pub const INSTRUCTIONS: &[&str] = &[
    "Steer your blue car between the three",
    "lanes. Dodge the falling obstacles:",
    "red ones are worth 10 points, the",
    "faster orange ones 40. Everything",
    "speeds up as your score grows.",
];

pub const ABOUT: &[&str] = &[
    "A road full of obstacles, in your",
    "terminal. Scores are kept by a small",
    "leaderboard server over TCP.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    NameEntry,
    Playing,
    Instructions,
    About,
    Scoreboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Instructions,
    Scoreboard,
    About,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Start,
        MenuItem::Instructions,
        MenuItem::Scoreboard,
        MenuItem::About,
        MenuItem::Quit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start game",
            MenuItem::Instructions => "Instructions",
            MenuItem::Scoreboard => "High scores",
            MenuItem::About => "About",
            MenuItem::Quit => "Quit",
        }
    }
}

const MENU_LABELS: [&str; 5] = [
    MenuItem::Start.label(),
    MenuItem::Instructions.label(),
    MenuItem::Scoreboard.label(),
    MenuItem::About.label(),
    MenuItem::Quit.label(),
];

/// Work the outer loop performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    Quit,
    /// Persist a finished run (fire and forget).
    Submit(FinishedRun),
    /// Load the top scores into the scoreboard; `request` tags the fetch.
    FetchLeaderboard { request: u64 },
}

pub struct App {
    screen: Screen,
    menu_index: usize,
    name_buffer: String,
    session: Option<GameSession>,
    leaderboard: LeaderboardView,
    seeds: SimpleRng,
    track_view: TrackView,
    snapshot: RunSnapshot,
}

impl App {
    /// `seed` drives the obstacle seeds of every session started from here.
    pub fn new(seed: u32) -> Self {
        Self {
            screen: Screen::Menu,
            menu_index: 0,
            name_buffer: String::new(),
            session: None,
            leaderboard: LeaderboardView::new(),
            seeds: SimpleRng::new(seed),
            track_view: TrackView::new(),
            snapshot: RunSnapshot::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu_selection(&self) -> MenuItem {
        MenuItem::ALL[self.menu_index]
    }

    pub fn name_buffer(&self) -> &str {
        &self.name_buffer
    }

    /// Whether the name entry would accept the current buffer.
    pub fn can_start(&self) -> bool {
        PlayerName::parse(&self.name_buffer).is_some()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn leaderboard(&self) -> &LeaderboardView {
        &self.leaderboard
    }

    /// Start playing as `name`. Ignored (returns false) for a blank name.
    pub fn on_start(&mut self, name: &str) -> bool {
        let Some(player) = PlayerName::parse(name) else {
            return false;
        };
        let seed = self.seeds.next_u32();
        self.session = Some(GameSession::new(player, seed));
        self.name_buffer.clear();
        self.screen = Screen::Playing;
        true
    }

    /// Close a modal screen.
    pub fn on_close(&mut self) {
        if matches!(
            self.screen,
            Screen::Instructions | Screen::About | Screen::Scoreboard
        ) {
            self.screen = Screen::Menu;
        }
    }

    /// Leave the game or the name entry for the menu.
    ///
    /// The session is dropped with its timers; a finished run that was not
    /// restarted is not persisted.
    pub fn on_back(&mut self) {
        match self.screen {
            Screen::Playing => {
                if let Some(session) = self.session.take() {
                    tracing::info!(player = %session.player(), score = session.run().score(), "left game");
                }
                self.screen = Screen::Menu;
            }
            Screen::NameEntry => {
                self.name_buffer.clear();
                self.screen = Screen::Menu;
            }
            _ => self.on_close(),
        }
    }

    pub fn open_scoreboard(&mut self) -> AppEffect {
        let request = self.leaderboard.activate();
        self.screen = Screen::Scoreboard;
        AppEffect::FetchLeaderboard { request }
    }

    /// Advance game time. Only the playing screen has a clock.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.advance(elapsed_ms);
        }
    }

    pub fn apply_persist_event(&mut self, event: &PersistEvent) {
        match event {
            PersistEvent::Submitted { player_name, score, .. } => {
                tracing::debug!(player = %player_name, score, "score stored");
            }
            PersistEvent::SubmitFailed { player_name, score } => {
                tracing::debug!(player = %player_name, score, "score lost");
            }
            PersistEvent::Leaderboard { .. } => {
                self.leaderboard.apply(event);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppEffect> {
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::NameEntry => self.handle_name_key(key),
            Screen::Playing => self.handle_game_key(key),
            Screen::Instructions | Screen::About | Screen::Scoreboard => self.handle_modal_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Option<AppEffect> {
        if input::should_quit(key) {
            return Some(AppEffect::Quit);
        }
        let n = MenuItem::ALL.len();
        match input::menu_key(key)? {
            MenuKey::Up => {
                self.menu_index = (self.menu_index + n - 1) % n;
                None
            }
            MenuKey::Down => {
                self.menu_index = (self.menu_index + 1) % n;
                None
            }
            MenuKey::Select => self.select(MenuItem::ALL[self.menu_index]),
            MenuKey::Pick(pos) => {
                let item = *MenuItem::ALL.get(pos.checked_sub(1)?)?;
                self.menu_index = pos - 1;
                self.select(item)
            }
        }
    }

    fn select(&mut self, item: MenuItem) -> Option<AppEffect> {
        match item {
            MenuItem::Start => {
                self.name_buffer.clear();
                self.screen = Screen::NameEntry;
                None
            }
            MenuItem::Instructions => {
                self.screen = Screen::Instructions;
                None
            }
            MenuItem::Scoreboard => Some(self.open_scoreboard()),
            MenuItem::About => {
                self.screen = Screen::About;
                None
            }
            MenuItem::Quit => Some(AppEffect::Quit),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> Option<AppEffect> {
        if input::is_interrupt(key) {
            return Some(AppEffect::Quit);
        }
        match input::text_key(key)? {
            TextEdit::Insert(c) => {
                if self.name_buffer.chars().count() < MAX_NAME_CHARS {
                    self.name_buffer.push(c);
                }
            }
            TextEdit::Backspace => {
                self.name_buffer.pop();
            }
            TextEdit::Submit => {
                let name = std::mem::take(&mut self.name_buffer);
                if !self.on_start(&name) {
                    self.name_buffer = name;
                }
            }
            TextEdit::Cancel => self.on_back(),
        }
        None
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> Option<AppEffect> {
        if input::should_quit(key) {
            return Some(AppEffect::Quit);
        }
        if input::is_back(key) {
            self.on_back();
            return None;
        }
        let action = input::handle_key_event(key)?;
        let session = self.session.as_mut()?;
        session.apply_action(action).map(AppEffect::Submit)
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<AppEffect> {
        if input::should_quit(key) {
            return Some(AppEffect::Quit);
        }
        if input::is_back(key) || matches!(input::menu_key(key), Some(MenuKey::Select)) {
            self.on_close();
        }
        None
    }

    /// Draw the current screen.
    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match self.screen {
            Screen::Menu => {
                term::render_menu(fb, viewport, "LANE DODGE", &MENU_LABELS, self.menu_index)
            }
            Screen::NameEntry => {
                let can_start = self.can_start();
                term::render_name_entry(fb, viewport, &self.name_buffer, can_start)
            }
            Screen::Instructions => term::render_modal(fb, viewport, "Instructions", INSTRUCTIONS),
            Screen::About => term::render_modal(fb, viewport, "About", ABOUT),
            Screen::Scoreboard => term::render_scoreboard(fb, viewport, &self.leaderboard),
            Screen::Playing => match self.session.as_ref() {
                Some(session) => {
                    session.run().snapshot_into(&mut self.snapshot);
                    self.track_view
                        .render_into(&self.snapshot, session.player().as_str(), viewport, fb);
                }
                None => {
                    fb.resize(viewport.width, viewport.height);
                    fb.clear(term::Cell::default());
                }
            },
        }
    }
}
