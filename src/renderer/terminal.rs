//! Terminal backend
//!
//! Shapes are rasterised into a pixel buffer two pixels per cell (upper
//! half block, fg = top pixel, bg = bottom pixel), then text is printed
//! over the cells. The 800x600 playfield is stretched to fill the terminal.

use std::io::{self, Write};

use crossterm::style::{self, Color as TermColor};
use crossterm::{cursor, queue};

use super::frame::{Color, DrawCommand, Frame, Presenter};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::Rect;

/// Smallest terminal (columns, rows) the playfield is legible in
pub const MIN_TERMINAL_SIZE: (u16, u16) = (40, 15);

impl From<Color> for TermColor {
    fn from(c: Color) -> Self {
        TermColor::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Pixel grid, `h` is twice the terminal row count
#[derive(Debug, Clone)]
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Color>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Color::BLACK; w * h],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Color::BLACK);
    }

    pub fn clear(&mut self, c: Color) {
        self.px.fill(c);
    }

    fn set(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Color {
        self.px[y * self.w + x]
    }

    fn scale(&self) -> (f32, f32) {
        (self.w as f32 / WINDOW_WIDTH, self.h as f32 / WINDOW_HEIGHT)
    }

    /// Fill a playfield rectangle. Anything non-empty covers at least one pixel.
    pub fn fill_rect(&mut self, rect: &Rect, c: Color) {
        let (sx, sy) = self.scale();
        let x0 = (rect.left() * sx).floor() as i32;
        let y0 = (rect.top() * sy).floor() as i32;
        let x1 = ((rect.right() * sx).ceil() as i32).max(x0 + 1);
        let y1 = ((rect.bottom() * sy).ceil() as i32).max(y0 + 1);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, c);
            }
        }
    }

    /// Fill a playfield circle, testing pixel centres against the radius
    pub fn fill_circle(&mut self, center: glam::Vec2, radius: f32, c: Color) {
        let (sx, sy) = self.scale();
        let x0 = ((center.x - radius) * sx).floor() as i32;
        let x1 = ((center.x + radius) * sx).ceil() as i32;
        let y0 = ((center.y - radius) * sy).floor() as i32;
        let y1 = ((center.y + radius) * sy).ceil() as i32;

        let mut drawn = false;
        for y in y0..y1 {
            for x in x0..x1 {
                let px = (x as f32 + 0.5) / sx;
                let py = (y as f32 + 0.5) / sy;
                if glam::Vec2::new(px, py).distance_squared(center) <= radius * radius {
                    self.set(x, y, c);
                    drawn = true;
                }
            }
        }
        // Too small to cover any pixel centre at this scale
        if !drawn {
            self.set((center.x * sx) as i32, (center.y * sy) as i32, c);
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev: Option<(Color, Color)> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(top.into()),
                        style::SetBackgroundColor(bot.into())
                    )?;
                    prev = Some((top, bot));
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

/// Presents frames on a terminal in raw mode / alternate screen
pub struct TerminalPresenter<W: Write> {
    out: W,
    buf: PixelBuf,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            cols,
            rows,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.cols = cols;
            self.rows = rows;
            self.buf.resize(cols as usize, rows as usize * 2);
        }
    }

    /// Terminal cell for a playfield point
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / WINDOW_WIDTH * self.cols as f32).max(0.0) as u16;
        let row = (y / WINDOW_HEIGHT * self.rows as f32).max(0.0) as u16;
        (col.min(self.cols.saturating_sub(1)), row.min(self.rows.saturating_sub(1)))
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let mut background = Color::BLACK;
        for command in &frame.commands {
            match command {
                DrawCommand::Clear(c) => {
                    background = *c;
                    self.buf.clear(*c);
                }
                DrawCommand::FillRect { rect, color } => self.buf.fill_rect(rect, *color),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                } => self.buf.fill_circle(*center, *radius, *color),
                DrawCommand::Text(_) => {}
            }
        }
        self.buf.render(&mut self.out)?;

        // Text goes on top of the shapes
        for command in &frame.commands {
            let DrawCommand::Text(label) = command else {
                continue;
            };
            let (col, row) = self.cell(label.pos.x, label.pos.y);
            let room = (self.cols - col) as usize;
            let text: String = label.text.chars().take(room).collect();
            queue!(
                self.out,
                cursor::MoveTo(col, row),
                style::SetForegroundColor(label.color.into()),
                style::SetBackgroundColor(background.into()),
                style::Print(text),
                style::ResetColor
            )?;
        }
        self.out.flush()
    }
}
