//! Session scheduling: feed and motion cadence, cancellation on game over,
//! and the restart hand-off.

use lane_dodge::core::Obstacle;
use lane_dodge::engine::{FinishedRun, GameSession, Scheduler};
use lane_dodge::types::{GameAction, Lane, ObstacleKind, PlayerName, MOTION_TICK_MS, SPAWN_PERIOD_MS};

fn ana() -> PlayerName {
    PlayerName::parse("Ana").unwrap()
}

/// Crash the run deterministically with an obstacle right above the car.
fn crash(session: &mut GameSession) {
    let lane = session.run().player_lane();
    session.insert_obstacle(Obstacle::new(0, lane, ObstacleKind::Normal).at(430.0));
    let report = session.advance(MOTION_TICK_MS);
    assert!(report.game_over);
}

#[test]
fn feed_and_motion_cadence() {
    let mut s = GameSession::new(ana(), 5);
    let report = s.advance(SPAWN_PERIOD_MS - 1);
    assert_eq!(report.spawned, 0);
    assert_eq!(report.ticks, 19);

    let report = s.advance(1);
    assert_eq!(report.spawned, 1);
    assert_eq!(report.ticks, 1);
    assert_eq!(s.run().obstacles().len(), 1);
}

#[test]
fn chunked_and_single_advance_agree() {
    let mut a = GameSession::new(ana(), 11);
    let mut b = GameSession::new(ana(), 11);
    for _ in 0..600 {
        a.advance(MOTION_TICK_MS / 4);
    }
    b.advance(600 * (MOTION_TICK_MS / 4));
    assert_eq!(a.run().snapshot(), b.run().snapshot());
}

#[test]
fn game_over_cancels_both_tasks() {
    let mut s = GameSession::new(ana(), 5);
    assert!(s.timers_active());
    crash(&mut s);
    assert!(!s.timers_active());
    assert_eq!(s.scheduler().active_count(), 0);

    let frozen = s.run().snapshot();
    let report = s.advance(60_000);
    assert_eq!(report.spawned, 0);
    assert_eq!(report.ticks, 0);
    assert_eq!(s.run().snapshot(), frozen);
}

#[test]
fn firings_after_the_crash_are_discarded() {
    let mut s = GameSession::new(ana(), 5);
    s.insert_obstacle(Obstacle::new(0, Lane::Center, ObstacleKind::Normal).at(430.0));
    // The first tick crashes; the other 99 due firings must not run.
    let report = s.advance(100 * MOTION_TICK_MS);
    assert!(report.game_over);
    assert_eq!(report.ticks, 1);
    assert_eq!(s.run().ticks(), 1);
}

#[test]
fn steering_into_the_band_stops_timers() {
    let mut s = GameSession::new(ana(), 5);
    s.insert_obstacle(Obstacle::new(0, Lane::Left, ObstacleKind::Normal).at(460.0));
    s.apply_action(GameAction::MoveLeft);
    assert!(s.is_over());
    assert!(!s.timers_active());
}

#[test]
fn restart_hands_back_finished_run_and_reschedules() {
    let mut s = GameSession::new(ana(), 5);
    s.insert_obstacle(Obstacle::new(0, Lane::Left, ObstacleKind::Fast).at(490.0));
    s.advance(MOTION_TICK_MS);
    assert_eq!(s.run().score(), 40);
    crash(&mut s);

    let finished = s.apply_action(GameAction::Restart);
    assert_eq!(
        finished,
        Some(FinishedRun {
            player_name: ana(),
            score: 40
        })
    );
    assert!(s.timers_active());
    assert_eq!(s.run().score(), 0);
    assert_eq!(s.run().player_lane(), Lane::Center);

    let report = s.advance(SPAWN_PERIOD_MS);
    assert_eq!(report.spawned, 1);
}

#[test]
fn restart_of_live_run_is_ignored() {
    let mut s = GameSession::new(ana(), 5);
    s.advance(SPAWN_PERIOD_MS);
    assert_eq!(s.restart(), None);
    assert_eq!(s.run().obstacles().len(), 1);
}

#[test]
fn dropping_the_session_drops_its_timers() {
    // The scheduler is owned by value; nothing outlives the session.
    let s = GameSession::new(ana(), 5);
    let active = s.scheduler().active_count();
    assert_eq!(active, 2);
    drop(s);

    let mut scheduler = Scheduler::new();
    let id = scheduler.every(MOTION_TICK_MS);
    let mut fired = Vec::new();
    scheduler.advance(MOTION_TICK_MS * 3, &mut fired);
    assert_eq!(fired, vec![id; 3]);
}
