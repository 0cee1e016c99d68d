//! Game session - the single-threaded driving loop of one player's play.
//!
//! Owns the [`RunState`] and the two periodic tasks that drive it (obstacle
//! feed and motion step). The outer loop only feeds elapsed time and player
//! actions in; the session never touches I/O. A finished run comes back out
//! of [`GameSession::restart`] as a [`FinishedRun`] for the caller to persist.

use crate::core::{Obstacle, RunState};
use crate::scheduler::{Scheduler, TaskId};
use crate::types::{GameAction, PlayerName, MOTION_TICK_MS, SPAWN_PERIOD_MS};

/// A completed run, ready to be submitted to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRun {
    pub player_name: PlayerName,
    pub score: u32,
}

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionReport {
    pub spawned: u32,
    pub ticks: u32,
    pub passed: u32,
    pub points: u32,
    /// The run ended during this call.
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy)]
struct RunTimers {
    feed: TaskId,
    motion: TaskId,
}

pub struct GameSession {
    run: RunState,
    player: PlayerName,
    scheduler: Scheduler,
    timers: Option<RunTimers>,
    /// Reused firing buffer.
    fired: Vec<TaskId>,
}

impl GameSession {
    /// Start a session; both periodic tasks begin immediately.
    pub fn new(player: PlayerName, seed: u32) -> Self {
        let mut session = Self {
            run: RunState::new(seed),
            player,
            scheduler: Scheduler::new(),
            timers: None,
            fired: Vec::with_capacity(8),
        };
        session.start_timers();
        tracing::info!(player = %session.player, seed, "session started");
        session
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn is_over(&self) -> bool {
        self.run.is_over()
    }

    /// True while the feed and motion tasks are scheduled.
    pub fn timers_active(&self) -> bool {
        self.timers.is_some() && self.scheduler.active_count() > 0
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Place a specific obstacle on the track (scripted scenarios).
    pub fn insert_obstacle(&mut self, obstacle: Obstacle) -> bool {
        self.run.insert_obstacle(obstacle)
    }

    fn start_timers(&mut self) {
        if self.timers.is_some() {
            return;
        }
        // Feed first: when both are due together, the new obstacle moves in the same instant.
        let feed = self.scheduler.every(SPAWN_PERIOD_MS);
        let motion = self.scheduler.every(MOTION_TICK_MS);
        self.timers = Some(RunTimers { feed, motion });
    }

    fn stop_timers(&mut self) {
        if let Some(timers) = self.timers.take() {
            self.scheduler.cancel(timers.feed);
            self.scheduler.cancel(timers.motion);
        }
    }

    /// Advance the session clock, running every due feed and motion firing.
    ///
    /// Once the run ends, both tasks are cancelled and the remaining firings
    /// of this call are discarded.
    pub fn advance(&mut self, elapsed_ms: u32) -> SessionReport {
        let mut report = SessionReport::default();
        let Some(timers) = self.timers else {
            return report;
        };

        self.fired.clear();
        self.scheduler.advance(elapsed_ms, &mut self.fired);

        for i in 0..self.fired.len() {
            let id = self.fired[i];
            if id == timers.feed {
                if let Some(obstacle) = self.run.spawn_obstacle() {
                    report.spawned += 1;
                    tracing::trace!(id = obstacle.id, lane = obstacle.lane.index(), kind = obstacle.kind.as_str(), "obstacle spawned");
                }
            } else if id == timers.motion {
                let outcome = self.run.tick();
                report.ticks += 1;
                report.passed += outcome.motion.passed as u32;
                report.points += outcome.motion.points;
            }

            if self.run.is_over() {
                report.game_over = true;
                self.on_game_over();
                break;
            }
        }

        report
    }

    fn on_game_over(&mut self) {
        self.stop_timers();
        tracing::info!(
            player = %self.player,
            score = self.run.score(),
            ticks = self.run.ticks(),
            "run over"
        );
    }

    /// Shift one lane left. Returns whether the lane changed.
    pub fn move_left(&mut self) -> bool {
        let moved = self.run.move_left();
        self.check_lane_change_crash();
        moved
    }

    /// Shift one lane right. Returns whether the lane changed.
    pub fn move_right(&mut self) -> bool {
        let moved = self.run.move_right();
        self.check_lane_change_crash();
        moved
    }

    fn check_lane_change_crash(&mut self) {
        if self.run.is_over() && self.timers.is_some() {
            self.on_game_over();
        }
    }

    /// Start a new run after game over.
    ///
    /// Returns the finished run (score captured before the reset) for
    /// persistence. Ignored while the run is still live.
    pub fn restart(&mut self) -> Option<FinishedRun> {
        if !self.run.is_over() {
            return None;
        }
        let score = self.run.restart()?;
        self.start_timers();
        tracing::debug!(player = %self.player, episode = self.run.episode_id(), "run restarted");
        Some(FinishedRun {
            player_name: self.player.clone(),
            score,
        })
    }

    /// Apply a player action; a restart yields the finished run.
    pub fn apply_action(&mut self, action: GameAction) -> Option<FinishedRun> {
        match action {
            GameAction::MoveLeft => {
                self.move_left();
                None
            }
            GameAction::MoveRight => {
                self.move_right();
                None
            }
            GameAction::Restart => self.restart(),
        }
    }
}
