//! Menu, modal, name entry and scoreboard screens.
//!
//! Each function clears the framebuffer and draws one centered panel.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::leaderboard::LeaderboardView;
use crate::track_view::Viewport;

const ACCENT: Rgb = Rgb::new(70, 140, 255);
const PANEL_W: u16 = 44;

struct Panel {
    x: u16,
    y: u16,
    w: u16,
}

fn open_panel(fb: &mut FrameBuffer, viewport: Viewport, title: &str, body_rows: u16) -> Panel {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().into_cell(' '));

    let w = PANEL_W.min(viewport.width);
    let h = (body_rows + 4).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.draw_border(x, y, w, h, CellStyle::fg(Rgb::new(200, 200, 200)));
    fb.put_str_centered(x, w, y + 1, title, CellStyle::fg(ACCENT).bold());
    Panel { x, y: y + 3, w }
}

/// Main menu with `selected` highlighted.
pub fn render_menu(fb: &mut FrameBuffer, viewport: Viewport, title: &str, items: &[&str], selected: usize) {
    let p = open_panel(fb, viewport, title, items.len() as u16 * 2 + 1);
    for (i, item) in items.iter().enumerate() {
        let y = p.y + i as u16 * 2;
        if i == selected {
            let style = CellStyle::fg(Rgb::new(0, 0, 0)).on(ACCENT).bold();
            fb.fill_rect(p.x + 6, y, p.w.saturating_sub(12), 1, ' ', style);
            fb.put_str_centered(p.x, p.w, y, item, style);
        } else {
            fb.put_str_centered(p.x, p.w, y, item, CellStyle::default());
        }
    }
    let hint_y = p.y + items.len() as u16 * 2;
    fb.put_str_centered(p.x, p.w, hint_y, "↑ ↓ choose   Enter select   q quit", CellStyle::default().dim());
}

/// Informational modal. `lines` are pre-wrapped.
pub fn render_modal(fb: &mut FrameBuffer, viewport: Viewport, title: &str, lines: &[&str]) {
    let p = open_panel(fb, viewport, title, lines.len() as u16 + 2);
    for (i, line) in lines.iter().enumerate() {
        fb.put_str(p.x + 2, p.y + i as u16, line, CellStyle::default());
    }
    let hint_y = p.y + lines.len() as u16 + 1;
    fb.put_str_centered(p.x, p.w, hint_y, "Esc / Enter  close", CellStyle::default().dim());
}

/// Name prompt. Submit is shown disabled while `can_submit` is false.
pub fn render_name_entry(fb: &mut FrameBuffer, viewport: Viewport, buffer: &str, can_submit: bool) {
    let p = open_panel(fb, viewport, "Enter your name", 5);

    let field_w = p.w.saturating_sub(6);
    let field = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(40, 40, 48));
    fb.fill_rect(p.x + 3, p.y, field_w, 1, ' ', field);
    if buffer.is_empty() {
        fb.put_str(p.x + 4, p.y, "Player name", field.dim());
    } else {
        // Keep the tail visible when the name is wider than the field.
        let visible = field_w.saturating_sub(2) as usize;
        let skip = buffer.chars().count().saturating_sub(visible);
        let tail: String = buffer.chars().skip(skip).collect();
        let end = fb.put_str(p.x + 4, p.y, &tail, field);
        fb.put_char(end, p.y, '▏', field);
    }

    let start = if can_submit {
        CellStyle::fg(Rgb::new(0, 0, 0)).on(ACCENT).bold()
    } else {
        CellStyle::fg(Rgb::new(120, 120, 120)).dim()
    };
    fb.put_str_centered(p.x, p.w, p.y + 2, " Start game ", start);
    fb.put_str_centered(p.x, p.w, p.y + 4, "Enter start   Esc back", CellStyle::default().dim());
}

/// Top scores list.
pub fn render_scoreboard(fb: &mut FrameBuffer, viewport: Viewport, view: &LeaderboardView) {
    let rows = view.entries().len().max(1) as u16;
    let p = open_panel(fb, viewport, "High scores", rows + 2);

    if view.is_loading() {
        fb.put_str_centered(p.x, p.w, p.y, "Loading...", CellStyle::default().dim());
    } else if view.entries().is_empty() {
        fb.put_str_centered(p.x, p.w, p.y, "No scores yet", CellStyle::default().dim());
    } else {
        let name_w = p.w.saturating_sub(16) as usize;
        for (i, (rank, name, score)) in view.rows().enumerate() {
            let y = p.y + i as u16;
            let style = if rank == 1 {
                CellStyle::default().bold()
            } else {
                CellStyle::default()
            };
            fb.put_u32(p.x + 2, y, rank as u32, style.dim());
            let clipped: String = name.chars().take(name_w).collect();
            fb.put_str(p.x + 6, y, &clipped, style);
            let digits = score.max(1).ilog10() as u16 + 1;
            fb.put_u32((p.x + p.w).saturating_sub(3 + digits), y, score, style);
        }
    }

    let hint_y = p.y + rows + 1;
    fb.put_str_centered(p.x, p.w, hint_y, "Esc / Enter  close", CellStyle::default().dim());
}
