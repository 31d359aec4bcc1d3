//! GameView: draws a `GameSnapshot` into a framebuffer.
//!
//! Pure, no I/O. The board sits in a bordered frame with a side panel for
//! the counters and the next-piece preview; the start, pause and game-over
//! screens are drawn as boxes over the middle of the board.

use crate::core::{GameSnapshot, Phase, Piece};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{PieceKind, BLOCK_SIZE};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const LABEL: Style = Style::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
const EMPTY: Style = Style::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
const GHOST: Style = Style::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
const BANNER: Style = Style::new(Rgb::new(255, 255, 255), Rgb::new(20, 20, 28)).bold();
const BANNER_TEXT: Style = Style::new(Rgb::new(210, 210, 210), Rgb::new(20, 20, 28));

/// Side panel needs at least this many columns to be drawn.
const PANEL_MIN_W: u16 = 12;

/// Largest cell width or height, in terminal cells.
const MAX_CELL: u16 = 8;

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

/// What the view needs beyond the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    /// Best score on record
    pub best: Option<u32>,
    /// Where the finished session ranked, 1-based
    pub rank: Option<usize>,
}

/// Terminal layout for one game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the board frame landed in the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL),
            cell_h: cell_h.clamp(1, MAX_CELL),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::new(' ', Style::new(VALUE.fg, SCREEN_BG)));

        let board_w = u16::try_from(snap.board.width()).unwrap_or(u16::MAX);
        let board_h = u16::try_from(snap.board.height()).unwrap_or(u16::MAX);
        let frame_w = board_w.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = board_h.saturating_mul(self.cell_h).saturating_add(2);
        let panel_room = PANEL_MIN_W + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w.saturating_add(panel_room)) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame);

        for (y, row) in snap.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, frame, x as i32, y as i32, *kind, false),
                    None => self.fill_cell(fb, frame, x as i32, y as i32, '·', EMPTY),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            for (x, y) in ghost.cells() {
                self.fill_cell(fb, frame, x, y, '░', GHOST);
            }
        }
        if let Some(active) = snap.active {
            self.draw_piece(fb, frame, &active);
        }

        self.draw_side_panel(fb, snap, hud, viewport, frame);

        if !snap.started {
            self.draw_banner(fb, frame, &[("TETRIS", BANNER), ("", BANNER_TEXT), ("press any key", BANNER_TEXT)]);
        } else if snap.phase == Phase::GameOver {
            self.draw_game_over(fb, frame, snap, hud);
        } else if snap.paused {
            self.draw_banner(fb, frame, &[("PAUSED", BANNER), ("", BANNER_TEXT), ("P to resume", BANNER_TEXT)]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let right = f.x.saturating_add(f.w - 1);
        let bottom = f.y.saturating_add(f.h - 1);
        fb.put_char(f.x, f.y, '┌', BORDER);
        fb.put_char(right, f.y, '┐', BORDER);
        fb.put_char(f.x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', BORDER);
            fb.put_char(x, bottom, '─', BORDER);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', BORDER);
            fb.put_char(right, y, '│', BORDER);
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, f: Frame, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.draw_block(fb, f, x, y, piece.kind, true);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: i32, y: i32, kind: PieceKind, bold: bool) {
        let mut style = Style::new(piece_color(kind), BOARD_BG);
        style.bold = bold;
        self.fill_cell(fb, f, x, y, '█', style);
    }

    /// Paint one board cell; cells outside the visible board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i32, y: i32, ch: char, style: Style) {
        let cols = (f.w - 2) / self.cell_w;
        let rows = (f.h - 2) / self.cell_h;
        if x < 0 || y < 0 || x >= i32::from(cols) || y >= i32::from(rows) {
            return;
        }
        let px = f.x.saturating_add(1).saturating_add(x as u16 * self.cell_w);
        let py = f.y.saturating_add(1).saturating_add(y as u16 * self.cell_h);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_MIN_W) > viewport.width {
            return;
        }

        let mut y = f.y;
        for (label, value) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y + 1, value, VALUE);
            y += 3;
        }

        fb.put_str(panel_x, y, "BEST", LABEL);
        match hud.best {
            Some(best) => fb.put_u32(panel_x, y + 1, best.max(snap.score), VALUE),
            None => fb.put_u32(panel_x, y + 1, snap.score, VALUE),
        };
        y += 3;

        fb.put_str(panel_x, y, "NEXT", LABEL);
        y += 1;
        let preview = Piece::spawn(snap.next, 0);
        let style = Style::new(piece_color(snap.next), SCREEN_BG);
        for (dx, dy) in preview.shape() {
            let px = panel_x + dx as u16 * 2;
            let py = y + dy as u16;
            fb.fill_rect(px, py, 2, 1, '█', style);
        }
        y += BLOCK_SIZE as u16 + 1;

        fb.put_str(panel_x, y, "GHOST", LABEL);
        fb.put_str(panel_x + 6, y, if snap.ghost_enabled { "on" } else { "off" }, VALUE);
        y += 2;

        let help = VALUE.dim();
        for line in ["←→ move  ↑ z rotate", "↓ soft  x step", "space drop", "p pause  g ghost", "r restart  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot, hud: &Hud) {
        let score = format!("score {}", snap.score);
        let level = format!("level {}", snap.level);
        let lines = format!("lines {}", snap.lines);
        let rank = match hud.rank {
            Some(rank) => format!("{} place", ordinal(rank)),
            None => "unranked".to_string(),
        };
        self.draw_banner(
            fb,
            f,
            &[
                ("GAME OVER", BANNER),
                ("", BANNER_TEXT),
                (score.as_str(), BANNER_TEXT),
                (level.as_str(), BANNER_TEXT),
                (lines.as_str(), BANNER_TEXT),
                (rank.as_str(), BANNER_TEXT),
                ("", BANNER_TEXT),
                ("R restart  Q quit", BANNER_TEXT),
            ],
        );
    }

    /// Boxed lines centred over the board.
    fn draw_banner(&self, fb: &mut FrameBuffer, f: Frame, lines: &[(&str, Style)]) {
        let text_w = lines.iter().map(|(s, _)| s.chars().count() as u16).max().unwrap_or(0);
        let box_w = (text_w + 4).min(f.w);
        let box_h = lines.len() as u16 + 2;
        let box_x = f.x.saturating_add(f.w.saturating_sub(box_w) / 2);
        let box_y = f.y.saturating_add(f.h.saturating_sub(box_h) / 2);

        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', BANNER_TEXT);
        for (i, (text, style)) in lines.iter().enumerate() {
            fb.put_str_centered(box_x, box_w, box_y + 1 + i as u16, text, *style);
        }
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// `1` -> `1st`, `12` -> `12th`, `22` -> `22nd`
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
