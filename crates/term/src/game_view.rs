//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be asserted in unit tests.
//!
//! Layout, top to bottom: title, score line, a blank row, the bordered board,
//! a blank row, the key help line.

use crate::core::SessionSnapshot;
use crate::fb::{fmt_u32, CellStyle, FrameBuffer, Rgb};
use crate::tiles::tile_theme;
use crate::types::{GameStatus, GRID_SIZE};

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 2;

const TITLE: &str = "SPACE 2048";
const HELP: &str = "arrows/WASD/drag move · N new · Q quit";

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen position of the board frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Terminal renderer for a Space 2048 session.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 9x3 leaves room for glyph, value and name while fitting 80x24.
        Self::new(9, 3)
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame size including the border.
    pub fn frame_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        (
            n * (self.tile_w + 1) + 3,
            n * (self.tile_h + 1) + 3,
        )
    }

    /// Where the board frame lands in `viewport`.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let (frame_w, frame_h) = self.frame_size();
        let block_h = HEADER_ROWS + frame_h + FOOTER_ROWS;
        let block_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(block_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: block_y + HEADER_ROWS,
            width: frame_w,
            height: frame_h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board = self.layout(viewport);
        self.draw_header(fb, snap, board);

        let space = CellStyle::new(Rgb::new(60, 60, 90), Rgb::hex(0x1a1a2e));
        fb.fill_rect(
            board.x + 1,
            board.y + 1,
            board.width - 2,
            board.height - 2,
            ' ',
            space,
        );
        draw_border(
            fb,
            board,
            CellStyle::new(Rgb::new(150, 150, 200), Rgb::hex(0x0f0c29)),
        );

        for (r, row) in snap.grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                self.draw_tile(fb, board, r as u16, c as u16, value);
            }
        }

        match snap.status {
            GameStatus::Won => {
                self.draw_overlay(fb, board, "YOU WON!", "You reached the Universe!", Rgb::hex(0x7c3aed))
            }
            GameStatus::Lost => {
                self.draw_overlay(fb, board, "GAME OVER", "No more moves available", Rgb::hex(0x9b2c2c))
            }
            GameStatus::Playing => {}
        }

        let help = CellStyle::default().dim();
        fb.put_str_centered(board.x, board.y + board.height + 1, board.width, HELP, help);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, board: BoardLayout) {
        let top = board.y - HEADER_ROWS;
        let title = CellStyle::new(Rgb::hex(0xfbbf24), Rgb::hex(0x0f0c29)).bold();
        fb.put_str_centered(board.x, top, board.width, TITLE, title);

        let label = CellStyle::new(Rgb::new(160, 160, 200), Rgb::hex(0x0f0c29));
        let value = CellStyle::new(Rgb::new(240, 240, 255), Rgb::hex(0x0f0c29)).bold();
        let y = top + 1;

        let x = board.x + 1;
        let n = fb.put_str(x, y, "SCORE ", label);
        fb.put_u32(x + n, y, snap.score, value);

        let mut digits = [0u8; 10];
        let best_w = 5 + fmt_u32(snap.best_score, &mut digits).len() as u16;
        let x = (board.x + board.width).saturating_sub(best_w + 1);
        let n = fb.put_str(x, y, "BEST ", label);
        fb.put_u32(x + n, y, snap.best_score, value);
    }

    fn tile_origin(&self, board: BoardLayout, row: u16, col: u16) -> (u16, u16) {
        (
            board.x + 2 + col * (self.tile_w + 1),
            board.y + 2 + row * (self.tile_h + 1),
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, board: BoardLayout, row: u16, col: u16, value: u32) {
        let (px, py) = self.tile_origin(board, row, col);

        if value == 0 {
            let empty = CellStyle::new(Rgb::new(90, 90, 120), Rgb::hex(0x252545)).dim();
            fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', empty);
            fb.put_char(px + self.tile_w / 2, py + self.tile_h / 2, '·', empty);
            return;
        }

        let theme = tile_theme(value);
        let style = theme.style();
        fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', style);

        // Value on the middle row, glyph above and name below when there is room.
        let mid = py + self.tile_h / 2;
        let mut digits = [0u8; 10];
        fb.put_str_centered(px, mid, self.tile_w, fmt_u32(value, &mut digits), style);
        if self.tile_h >= 2 {
            fb.put_char(px + self.tile_w / 2, mid - 1, theme.glyph, style);
        }
        if self.tile_h >= 3 {
            let name = CellStyle { bold: false, ..style };
            fb.put_str_centered(px, mid + 1, self.tile_w, theme.name, name);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        board: BoardLayout,
        title: &str,
        subtitle: &str,
        bg: Rgb,
    ) {
        let panel = CellStyle::new(Rgb::new(255, 255, 255), bg);
        let mid = board.y + board.height / 2;
        let x = board.x + 1;
        let w = board.width - 2;

        fb.fill_rect(x, mid - 2, w, 5, ' ', panel);
        fb.put_str_centered(x, mid - 1, w, title, panel.bold());
        fb.put_str_centered(x, mid, w, subtitle, panel);
        fb.put_str_centered(x, mid + 1, w, "press N to play again", panel.dim());
    }
}

fn draw_border(fb: &mut FrameBuffer, board: BoardLayout, style: CellStyle) {
    let BoardLayout { x, y, width: w, height: h } = board;
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
