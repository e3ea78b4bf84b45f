/// Character-cell presentation sink for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use objview_core::{Canvas, Pixel, PointSink, WindowSize};
use std::io::Write;

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';

/// Packs two pixel rows into each terminal row with half-block glyphs, so
/// pixels come out roughly square
pub struct TerminalCanvas {
    canvas: Canvas,
}

impl TerminalCanvas {
    /// Canvas filling `columns × rows` terminal cells
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            canvas: Canvas::new(columns as usize, rows as usize * 2),
        }
    }

    /// Pixel resolution handed to the renderer
    pub fn window(&self) -> WindowSize {
        WindowSize::new(self.canvas.width() as u32, self.canvas.height() as u32)
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.canvas.resize(columns as usize, rows as usize * 2);
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.canvas.height() / 2 {
            for x in 0..self.canvas.width() {
                let top = self.canvas.get(x, row * 2).map(to_terminal);
                let bottom = self.canvas.get(x, row * 2 + 1).map(to_terminal);

                let (glyph, fg, bg) = match (top, bottom) {
                    (None, None) => (' ', Color::Reset, Color::Reset),
                    (Some(top), None) => (UPPER_HALF, top, Color::Reset),
                    (None, Some(bottom)) => (LOWER_HALF, bottom, Color::Reset),
                    (Some(top), Some(bottom)) => (UPPER_HALF, top, bottom),
                };

                writer.queue(SetForegroundColor(fg))?;
                writer.queue(SetBackgroundColor(bg))?;
                writer.queue(Print(glyph))?;
            }
            writer.queue(ResetColor)?;
            writer.queue(Print("\r\n"))?;
        }
        Ok(())
    }
}

impl PointSink for TerminalCanvas {
    fn draw_points(&mut self, color: objview_core::Color, points: &[Pixel]) {
        self.canvas.draw_points(color, points);
    }
}

fn to_terminal(color: objview_core::Color) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
