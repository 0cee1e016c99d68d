//! TrackView: maps a [`RunSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O). The 360x500 track is scaled to [`COL_UNITS`] track units
//! per column and [`TRACK_ROWS`] rows.

use crate::core::{speed_multiplier, Obstacle, RunSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Lane, ObstacleKind, CAR_HEIGHT, CAR_WIDTH, COLLISION_BAND_TOP, LANE_COUNT, TRACK_HEIGHT,
    TRACK_WIDTH,
};

/// Logical track units covered by one terminal column.
pub const COL_UNITS: u16 = 8;
/// Terminal columns per lane.
pub const LANE_COLS: u16 = TRACK_WIDTH / LANE_COUNT as u16 / COL_UNITS;
/// Terminal rows for the full track height.
pub const TRACK_ROWS: u16 = 25;
/// Sprite width in columns, for both the car and obstacles.
pub const SPRITE_COLS: u16 = CAR_WIDTH / COL_UNITS;

const TRACK_BG: Rgb = Rgb::new(40, 40, 48);
const CAR: Rgb = Rgb::new(70, 140, 255);
const NORMAL: Rgb = Rgb::new(220, 60, 60);
const FAST: Rgb = Rgb::new(255, 165, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Inner track width: lanes plus one divider column between neighbours.
pub const fn inner_width() -> u16 {
    LANE_COLS * LANE_COUNT as u16 + (LANE_COUNT as u16 - 1)
}

/// Top-left corner of the track border for `viewport`.
pub fn track_origin(viewport: Viewport) -> (u16, u16) {
    let frame_w = inner_width() + 2;
    let frame_h = TRACK_ROWS + 2;
    (
        viewport.width.saturating_sub(frame_w + PANEL_W) / 2,
        viewport.height.saturating_sub(frame_h) / 2,
    )
}

const PANEL_W: u16 = 20;

/// First column of the sprite drawn in `lane`, relative to the inner track.
pub fn sprite_col(lane: Lane) -> u16 {
    lane.index() as u16 * (LANE_COLS + 1) + (LANE_COLS - SPRITE_COLS) / 2
}

/// Rows `[start, end)` covered by something whose top edge is `top`.
pub fn sprite_rows(top: f32) -> (u16, u16) {
    let unit = TRACK_HEIGHT / TRACK_ROWS as f32;
    let start = (top / unit).floor().max(0.0) as u16;
    let end = ((top + CAR_HEIGHT as f32) / unit).ceil().max(0.0) as u16;
    (start.min(TRACK_ROWS), end.min(TRACK_ROWS))
}

#[derive(Debug, Default)]
pub struct TrackView;

impl TrackView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &RunSnapshot, player: &str, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (x0, y0) = track_origin(viewport);
        let inner_x = x0 + 1;
        let inner_y = y0 + 1;
        let frame_w = inner_width() + 2;
        let frame_h = TRACK_ROWS + 2;

        let bg = CellStyle::fg(Rgb::new(110, 110, 120)).on(TRACK_BG);
        fb.fill_rect(inner_x, inner_y, inner_width(), TRACK_ROWS, ' ', bg);
        fb.draw_border(x0, y0, frame_w, frame_h, CellStyle::fg(Rgb::new(200, 200, 200)));

        // Dashed lane dividers.
        for lane in 1..LANE_COUNT as u16 {
            let x = inner_x + lane * (LANE_COLS + 1) - 1;
            for row in (0..TRACK_ROWS).step_by(2) {
                fb.put_char(x, inner_y + row, '┊', bg.dim());
            }
        }

        for obstacle in &snap.obstacles {
            let crashed = snap.crashed_into == Some(obstacle.id);
            self.draw_obstacle(fb, inner_x, inner_y, obstacle, crashed);
        }

        let car = CellStyle::fg(CAR).on(TRACK_BG).bold();
        self.draw_sprite(fb, inner_x, inner_y, snap.player_lane, COLLISION_BAND_TOP, '█', car);

        self.draw_side_panel(fb, viewport, snap, player, x0 + frame_w + 2, y0);

        if snap.is_over {
            self.draw_game_over(fb, x0, y0, frame_w, frame_h, snap.score);
        }
    }

    pub fn render(&self, snap: &RunSnapshot, player: &str, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, player, viewport, &mut fb);
        fb
    }

    fn draw_obstacle(&self, fb: &mut FrameBuffer, inner_x: u16, inner_y: u16, o: &Obstacle, crashed: bool) {
        let fg = match o.kind {
            ObstacleKind::Normal => NORMAL,
            ObstacleKind::Fast => FAST,
        };
        let mut style = CellStyle::fg(fg).on(TRACK_BG);
        if crashed {
            style = style.on(Rgb::new(90, 20, 20)).bold();
        }
        self.draw_sprite(fb, inner_x, inner_y, o.lane, o.top, '▓', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_sprite(
        &self,
        fb: &mut FrameBuffer,
        inner_x: u16,
        inner_y: u16,
        lane: Lane,
        top: f32,
        ch: char,
        style: CellStyle,
    ) {
        let (start, end) = sprite_rows(top);
        if end <= start {
            return;
        }
        fb.fill_rect(inner_x + sprite_col(lane), inner_y + start, SPRITE_COLS, end - start, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        snap: &RunSnapshot,
        player: &str,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(8) >= viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let hint = CellStyle::default().dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "DRIVER", label);
        y += 1;
        fb.put_str(panel_x, y, player, value);
        y += 2;

        // Multiplier in hundredths, e.g. "x1.62".
        let hundredths = (speed_multiplier(snap.score) * 100.0).round() as u32;
        fb.put_str(panel_x, y, "SPEED", label);
        y += 1;
        let x = fb.put_str(panel_x, y, "x", value);
        let x = fb.put_u32(x, y, hundredths / 100, value);
        let x = fb.put_str(x, y, ".", value);
        if hundredths % 100 < 10 {
            let x = fb.put_str(x, y, "0", value);
            fb.put_u32(x, y, hundredths % 100, value);
        } else {
            fb.put_u32(x, y, hundredths % 100, value);
        }
        y += 2;

        fb.put_str(panel_x, y, "← → / a d  steer", hint);
        y += 1;
        fb.put_str(panel_x, y, "Esc        menu", hint);
        y += 1;
        fb.put_str(panel_x, y, "q          quit", hint);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, frame_w: u16, frame_h: u16, score: u32) {
        let box_w = frame_w.saturating_sub(4).max(20);
        let box_h = 8;
        let bx = x0 + frame_w.saturating_sub(box_w) / 2;
        let by = y0 + frame_h.saturating_sub(box_h) / 2;

        let panel = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(0, 0, 0));
        fb.fill_rect(bx, by, box_w, box_h, ' ', panel);
        fb.draw_border(bx, by, box_w, box_h, panel);

        fb.put_str_centered(bx, box_w, by + 2, "GAME OVER", panel.bold());

        let label = "Final score ";
        let digits = digit_count(score);
        let x = bx + box_w.saturating_sub(label.len() as u16 + digits) / 2;
        let x = fb.put_str(x, by + 3, label, panel);
        fb.put_u32(x, by + 3, score, panel.bold());

        fb.put_str_centered(bx, box_w, by + 5, "r / Enter  play again", panel.dim());
        fb.put_str_centered(bx, box_w, by + 6, "Esc  menu", panel.dim());
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
