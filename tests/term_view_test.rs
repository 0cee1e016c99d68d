//! Track view over a live session: what the player sees frame to frame.

use lane_dodge::core::RunSnapshot;
use lane_dodge::engine::GameSession;
use lane_dodge::term::{encode_diff_into, FrameBuffer, TrackView, Viewport};
use lane_dodge::types::{PlayerName, MOTION_TICK_MS, SPAWN_PERIOD_MS};

fn frame_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn spawned_obstacle_appears_and_moves_down() {
    let view = TrackView::new();
    let vp = Viewport::new(80, 30);
    let mut session = GameSession::new(PlayerName::parse("Ana").unwrap(), 8);
    let mut snap = RunSnapshot::default();

    session.advance(SPAWN_PERIOD_MS);
    session.run().snapshot_into(&mut snap);
    let first = view.render(&snap, "Ana", vp);
    assert!(frame_text(&first).contains('▓'));

    session.advance(10 * MOTION_TICK_MS);
    session.run().snapshot_into(&mut snap);
    let later = view.render(&snap, "Ana", vp);

    let top_row = |fb: &FrameBuffer| (0..fb.height()).find(|&y| fb.row_text(y).contains('▓'));
    assert!(top_row(&later) > top_row(&first));

    // Only the moved sprite and the panel changed, so the diff is small.
    let mut out = Vec::new();
    encode_diff_into(&first, &later, &mut out).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn renders_into_reused_buffer_across_resizes() {
    let view = TrackView::new();
    let snap = RunSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    for (w, h) in [(80, 30), (40, 10), (120, 40)] {
        view.render_into(&snap, "Ana", Viewport::new(w, h), &mut fb);
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
    assert!(frame_text(&fb).contains("SCORE"));
}
