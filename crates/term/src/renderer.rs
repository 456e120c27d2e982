//! TerminalRenderer: flushes framebuffers to a terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw. After that only runs of changed cells are written.

use std::io::{self, Stdout, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse capture for drag swipes.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(EnableMouseCapture)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    /// Undo everything `enter` did. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Write `frame`, diffing against the previously presented one.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), frame, &mut self.buf)?;
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(last) => last.clone_from(frame),
            None => self.last = Some(frame.clone()),
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// With no previous frame, or one of a different size, the screen is cleared
/// and every row is written.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen: Option<CellStyle> = None;
    for y in 0..next.height() {
        let runs = match prev {
            Some(prev) => changed_runs(prev, next, y),
            None => vec![(0, next.width())],
        };
        for (x, len) in runs {
            out.queue(cursor::MoveTo(x, y))?;
            for cx in x..x + len {
                let cell = next.get(cx, y).unwrap_or_default();
                if pen != Some(cell.style) {
                    set_pen(out, cell.style)?;
                    pen = Some(cell.style);
                }
                out.queue(Print(cell.ch))?;
            }
        }
    }

    if pen.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// `(start, len)` runs of cells on row `y` that differ between two equally sized frames.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<(u16, u16)> {
    let mut runs = Vec::new();
    let mut start: Option<u16> = None;
    for x in 0..next.width() {
        let dirty = prev.get(x, y) != next.get(x, y);
        match (dirty, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push((s, x - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, next.width() - s));
    }
    runs
}

fn set_pen(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        for x in [1, 2, 3, 5] {
            b.put_char(x, 0, 'X', CellStyle::default());
        }
        assert_eq!(changed_runs(&a, &b, 0), vec![(1, 3), (5, 1)]);
        assert!(changed_runs(&a, &a, 0).is_empty());
    }

    #[test]
    fn first_frame_is_a_full_redraw() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "ab", CellStyle::default());

        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains("\x1b[2J"));
        assert!(s.contains("ab"));
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_frame(Some(&fb), &fb, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn size_change_forces_full_redraw() {
        let small = FrameBuffer::new(2, 2);
        let big = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        encode_frame(Some(&small), &big, &mut out).unwrap();
        assert!(text(&out).contains("\x1b[2J"));
    }

    #[test]
    fn present_only_writes_changes() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(8, 1);
        renderer.present(&fb).unwrap();
        let first = renderer.writer().len();

        fb.put_char(4, 0, 'Z', CellStyle::default());
        renderer.present(&fb).unwrap();
        let second = &renderer.writer()[first..];
        let s = text(second);
        assert!(s.contains('Z'));
        assert!(!s.contains("\x1b[2J"));

        renderer.invalidate();
        renderer.present(&fb).unwrap();
        assert!(text(renderer.writer()).matches("\x1b[2J").count() == 2);
    }
}
