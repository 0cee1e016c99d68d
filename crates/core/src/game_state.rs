//! Run state module - owns everything that changes during one run
//!
//! This module ties together the feed, the motion step and the collision
//! detector. All mutation goes through explicit transitions (`spawn_obstacle`,
//! `tick`, `move_left`, `move_right`, `restart`); scheduling is the caller's job.

use crate::collision::find_collision;
use crate::feed::roll_obstacle;
use crate::motion::{advance_obstacles, MotionReport};
use crate::obstacle::Obstacle;
use crate::rng::SimpleRng;
use crate::snapshot::RunSnapshot;
use crate::types::{GameAction, Lane};

/// Result of one motion tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    pub motion: MotionReport,
    /// Id of the obstacle that ended the run during this tick.
    pub crashed_into: Option<u32>,
}

impl TickOutcome {
    pub fn game_over(&self) -> bool {
        self.crashed_into.is_some()
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    player_lane: Lane,
    obstacles: Vec<Obstacle>,
    score: u32,
    is_over: bool,
    /// Obstacle the car hit (kept for the game-over view).
    crash: Option<Obstacle>,
    rng: SimpleRng,
    next_obstacle_id: u32,
    /// Monotonic run counter (increments on restart).
    episode_id: u32,
    /// Motion ticks processed in the current run.
    ticks: u32,
}

impl RunState {
    /// Create a fresh run with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            player_lane: Lane::Center,
            obstacles: Vec::with_capacity(16),
            score: 0,
            is_over: false,
            crash: None,
            rng: SimpleRng::new(seed),
            next_obstacle_id: 1,
            episode_id: 0,
            ticks: 0,
        }
    }

    pub fn player_lane(&self) -> Lane {
        self.player_lane
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn crash(&self) -> Option<&Obstacle> {
        self.crash.as_ref()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Feed step: append one new obstacle at the top of the track.
    ///
    /// Returns `None` (and spawns nothing) once the run is over.
    pub fn spawn_obstacle(&mut self) -> Option<Obstacle> {
        if self.is_over {
            return None;
        }
        let obstacle = roll_obstacle(&mut self.rng, self.next_obstacle_id);
        self.next_obstacle_id = self.next_obstacle_id.wrapping_add(1);
        self.obstacles.push(obstacle);
        Some(obstacle)
    }

    /// Place a specific obstacle on the track (scripted scenarios).
    ///
    /// The obstacle keeps its position but gets the next run-local id.
    /// Ignored once the run is over.
    pub fn insert_obstacle(&mut self, mut obstacle: Obstacle) -> bool {
        if self.is_over {
            return false;
        }
        obstacle.id = self.next_obstacle_id;
        self.next_obstacle_id = self.next_obstacle_id.wrapping_add(1);
        self.obstacles.push(obstacle);
        true
    }

    /// Motion tick: move, score passed obstacles, then detect collisions.
    ///
    /// Motion always runs before the collision test so an obstacle is judged
    /// on its updated position. No-op once the run is over.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over {
            return TickOutcome::default();
        }

        self.ticks = self.ticks.wrapping_add(1);

        let motion = advance_obstacles(&mut self.obstacles, self.score);
        self.score += motion.points;

        let crashed_into = self.detect_collision();
        TickOutcome {
            motion,
            crashed_into,
        }
    }

    /// Latch game over if any obstacle hits the car. First hit wins.
    fn detect_collision(&mut self) -> Option<u32> {
        let hit = *find_collision(&self.obstacles, self.player_lane)?;
        self.is_over = true;
        self.crash = Some(hit);
        Some(hit.id)
    }

    /// Shift one lane left. Returns whether the lane changed.
    pub fn move_left(&mut self) -> bool {
        self.shift_to(self.player_lane.left())
    }

    /// Shift one lane right. Returns whether the lane changed.
    pub fn move_right(&mut self) -> bool {
        self.shift_to(self.player_lane.right())
    }

    fn shift_to(&mut self, lane: Option<Lane>) -> bool {
        if self.is_over {
            return false;
        }
        let Some(lane) = lane else {
            return false;
        };
        self.player_lane = lane;
        // Steering into an obstacle already inside the band ends the run too.
        self.detect_collision();
        true
    }

    /// Reset to a fresh run in the center lane.
    ///
    /// Returns the final score when the run had ended (the score to persist),
    /// captured before the reset. A restart of a live run returns `None`.
    pub fn restart(&mut self) -> Option<u32> {
        let finished = self.is_over.then_some(self.score);

        self.player_lane = Lane::Center;
        self.obstacles.clear();
        self.score = 0;
        self.is_over = false;
        self.crash = None;
        self.next_obstacle_id = 1;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.ticks = 0;

        finished
    }

    /// Apply a player action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Restart => {
                if !self.is_over {
                    return false;
                }
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut RunSnapshot) {
        out.player_lane = self.player_lane;
        out.obstacles.clear();
        out.obstacles.extend_from_slice(&self.obstacles);
        out.score = self.score;
        out.is_over = self.is_over;
        out.crashed_into = self.crash.map(|o| o.id);
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let mut s = RunSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(1)
    }
}
