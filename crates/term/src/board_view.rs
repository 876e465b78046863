//! BoardView: maps a [`BoardModel`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::board_model::{BoardModel, TileFace};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    CelebrationStep, RoundStatus, TimerPhase, BOARD_COLUMNS, DEFAULT_TILE_COUNT, WARNING_THRESHOLD_SECS,
};

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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const HEADER_ROWS: u16 = 2;

/// Renders the tile grid with its timer, progress and overlays.
pub struct BoardView {
    tile_w: u16,
    tile_h: u16,
    gap: u16,
    columns: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        // 5x3 leaves room for a centered glyph and reads as roughly square.
        Self {
            tile_w: 5,
            tile_h: 3,
            gap: 1,
            columns: BOARD_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl BoardView {
    pub fn new(tile_w: u16, tile_h: u16, columns: usize) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            gap: 1,
            columns: columns.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `cursor` is the highlighted tile, if any.
    pub fn render_into(
        &self,
        model: &BoardModel,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let tile_count = if model.tiles.is_empty() {
            DEFAULT_TILE_COUNT
        } else {
            model.tiles.len()
        };
        let rows = tile_count.div_ceil(self.columns) as u16;
        let cols = self.columns.min(tile_count.max(1)) as u16;

        let inner_w = cols * self.tile_w + (cols + 1) * self.gap;
        let inner_h = rows * self.tile_h + (rows + 1) * self.gap;
        let w = inner_w + 2;
        let h = inner_h + 2;
        let total_h = HEADER_ROWS + h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(total_h) / 2 + HEADER_ROWS,
            w,
            h,
        };

        let border = CellStyle::fg(Rgb::new(200, 200, 200));
        fb.fill_rect(frame.x + 1, frame.y + 1, inner_w, inner_h, ' ', CellStyle::default().on(BOARD_BG));
        draw_border(fb, frame, border);

        self.draw_header(fb, model, frame);

        match model.status {
            RoundStatus::Idle => self.draw_start_prompt(fb, frame),
            _ => {
                for (i, tile) in model.tiles.iter().enumerate() {
                    self.draw_tile(fb, frame, i, tile, cursor == Some(i));
                }
            }
        }

        match model.status {
            RoundStatus::Won => self.draw_celebration(fb, model, frame),
            RoundStatus::Lost => {
                let mid = frame.y + frame.h / 2;
                overlay_line(fb, frame, mid.saturating_sub(1), "TIME'S UP!", alert_style());
                overlay_line(fb, frame, mid + 1, "ENTER try again  R menu", prompt_style());
            }
            _ => {}
        }

        self.draw_footer(fb, model, frame);
    }

    fn tile_origin(&self, frame: Frame, index: usize) -> (u16, u16) {
        let col = (index % self.columns) as u16;
        let row = (index / self.columns) as u16;
        (
            frame.x + 1 + self.gap + col * (self.tile_w + self.gap),
            frame.y + 1 + self.gap + row * (self.tile_h + self.gap),
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, frame: Frame, index: usize, tile: &TileFace, cursor: bool) {
        let (x, y) = self.tile_origin(frame, index);
        let mid_x = x + self.tile_w / 2;
        let mid_y = y + self.tile_h / 2;

        match tile.visible_symbol() {
            None => {
                let back = CellStyle::fg(Rgb::new(70, 90, 140)).on(BOARD_BG);
                fb.fill_rect(x, y, self.tile_w, self.tile_h, '░', back);
            }
            Some(symbol) => {
                let (bg, fg) = if tile.matched {
                    (Rgb::new(40, 90, 60), Rgb::new(160, 255, 160))
                } else {
                    (Rgb::new(60, 60, 100), Rgb::new(255, 255, 255))
                };
                let face = CellStyle::fg(fg).on(bg);
                fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', face);
                fb.put_char(mid_x, mid_y, symbol.glyph(), face.bold());
            }
        }

        if cursor {
            let mark = CellStyle::fg(Rgb::new(255, 220, 80)).on(BOARD_BG).bold();
            fb.put_char(x.saturating_sub(1), mid_y, '[', mark);
            fb.put_char(x + self.tile_w, mid_y, ']', mark);
        }
    }

    fn draw_header(&self, fb: &mut FrameBuffer, model: &BoardModel, frame: Frame) {
        let y = frame.y.saturating_sub(HEADER_ROWS);
        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        fb.put_str(frame.x, y, "TIME", label);
        let time = format_clock(model.seconds_remaining);
        fb.put_str(frame.x + 5, y, &time, timer_style(model.phase));

        let pairs_x = frame.x + 12;
        fb.put_str(pairs_x, y, "PAIRS", label);
        fb.put_str(pairs_x + 6, y, &format!("{}/{}", model.matched, model.total), value);

        let sound = if model.sound { "SOUND ON" } else { "SOUND OFF" };
        let sound_x = (frame.x + frame.w).saturating_sub(sound.len() as u16);
        if sound_x > pairs_x + 12 {
            fb.put_str(sound_x, y, sound, value.dim());
        }
    }

    fn draw_footer(&self, fb: &mut FrameBuffer, model: &BoardModel, frame: Frame) {
        let y = frame.y + frame.h;
        if model.status == RoundStatus::Playing && model.warned {
            let text = if model.phase.is_critical() {
                "HURRY!".to_string()
            } else {
                format!("{} SECONDS LEFT", WARNING_THRESHOLD_SECS)
            };
            fb.put_str_centered(frame.x, frame.w, y, &text, timer_style(model.phase));
        }
        let help = CellStyle::fg(Rgb::new(140, 140, 150)).dim();
        fb.put_str_centered(frame.x, frame.w, y + 1, "arrows move  ENTER flip  R menu  M sound  Q quit", help);
    }

    fn draw_start_prompt(&self, fb: &mut FrameBuffer, frame: Frame) {
        let mid = frame.y + frame.h / 2;
        let title = CellStyle::fg(Rgb::new(255, 255, 255)).on(BOARD_BG).bold();
        overlay_line(fb, frame, mid.saturating_sub(1), "MEMORY MATCH", title);
        overlay_line(fb, frame, mid + 1, "press ENTER to start", prompt_style());
    }

    fn draw_celebration(&self, fb: &mut FrameBuffer, model: &BoardModel, frame: Frame) {
        let Some(step) = model.celebration else {
            return;
        };
        draw_confetti(fb, frame, model.round);

        let mid = frame.y + frame.h / 2;
        if matches!(step, CelebrationStep::Message | CelebrationStep::Actions) {
            overlay_line(fb, frame, mid.saturating_sub(1), "YOU FOUND ALL PAIRS!", win_style());
        }
        if step == CelebrationStep::Actions {
            overlay_line(fb, frame, mid + 1, "ENTER play again  R menu", prompt_style());
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Sprinkle confetti over the empty board background.
///
/// The pattern only depends on the round number, so consecutive frames diff
/// to nothing.
fn draw_confetti(fb: &mut FrameBuffer, frame: Frame, round: u32) {
    const COLORS: [Rgb; 4] = [
        Rgb::new(255, 90, 90),
        Rgb::new(255, 220, 80),
        Rgb::new(90, 200, 255),
        Rgb::new(160, 255, 120),
    ];
    let seed = round;
    for y in frame.y + 1..frame.y + frame.h - 1 {
        for x in frame.x + 1..frame.x + frame.w - 1 {
            let Some(cell) = fb.get(x, y) else { continue };
            if cell.ch != ' ' || cell.style.bg != BOARD_BG {
                continue;
            }
            let h = (x as u32).wrapping_mul(7) ^ (y as u32).wrapping_mul(13) ^ seed;
            if h % 5 == 0 {
                let color = COLORS[(h as usize / 5) % COLORS.len()];
                let ch = if h % 2 == 0 { '*' } else { '+' };
                fb.put_char(x, y, ch, CellStyle::fg(color).on(BOARD_BG));
            }
        }
    }
}

fn overlay_line(fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16 + 2;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    fb.put_char(x, y, ' ', style);
    fb.put_str(x + 1, y, text, style);
    fb.put_char(x + text_w - 1, y, ' ', style);
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn timer_style(phase: TimerPhase) -> CellStyle {
    match phase {
        TimerPhase::Normal => CellStyle::fg(Rgb::new(200, 200, 200)),
        TimerPhase::Warning => CellStyle::fg(Rgb::new(255, 165, 0)).bold(),
        TimerPhase::Critical => CellStyle::fg(Rgb::new(255, 70, 70)).bold(),
    }
}

fn alert_style() -> CellStyle {
    CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(150, 30, 30)).bold()
}

fn win_style() -> CellStyle {
    CellStyle::fg(Rgb::new(20, 20, 20)).on(Rgb::new(255, 220, 80)).bold()
}

fn prompt_style() -> CellStyle {
    CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(0, 0, 0))
}
