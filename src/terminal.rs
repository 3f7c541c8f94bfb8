use crate::catalog::Track;
use crate::color::Color;
use crate::graphics::Frame;
use crate::input::Point;
use crate::page::Page;
use crate::slider::Slider;
use crate::viewer::Surface;
use crossterm::{
    cursor, event,
    style::{self, Color as TermColor, Stylize},
    terminal, ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Approximate pixel size of one terminal cell, used for pointer deltas
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Rows taken by the product slider
const SLIDER_ROWS: u16 = 7;
const PANEL_MIN_COLS: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }
}

/// Screen regions for a terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub canvas: Rect,
    pub panel: Rect,
    pub slider: Rect,
    pub status: Rect,
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        let status = Rect {
            x: 0,
            y: rows.saturating_sub(1),
            width: cols,
            height: rows.min(1),
        };
        let slider_rows = SLIDER_ROWS.min(rows.saturating_sub(1));
        let slider = Rect {
            x: 0,
            y: status.y.saturating_sub(slider_rows),
            width: cols,
            height: slider_rows,
        };
        let top_rows = slider.y;
        let panel_cols = ((cols as u32 * 2 / 5) as u16).max(PANEL_MIN_COLS).min(cols);
        let canvas = Rect {
            x: 0,
            y: 0,
            width: cols - panel_cols,
            height: top_rows,
        };
        let panel = Rect {
            x: canvas.width,
            y: 0,
            width: panel_cols,
            height: top_rows,
        };
        Layout {
            canvas,
            panel,
            slider,
            status,
        }
    }

    /// Canvas client size in half-block pixels
    pub fn surface(&self) -> Surface {
        Surface::new(
            self.canvas.width as usize,
            self.canvas.height as usize * 2,
        )
    }

    /// Canvas client position of a terminal cell, in pixels
    pub fn canvas_point(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f64 - self.canvas.x as f64) * CELL_WIDTH_PX,
            (row as f64 - self.canvas.y as f64) * CELL_HEIGHT_PX,
        )
    }

    /// Index of the color button drawn on `row`, if any
    pub fn color_button_at(&self, col: u16, row: u16, buttons: usize) -> Option<usize> {
        if !self.panel.contains(col, row) {
            return None;
        }
        let first = self.panel.y + 3;
        let index = row.checked_sub(first)? as usize;
        (index < buttons).then_some(index)
    }

    /// Slider arrow clicked: `Some(false)` for previous, `Some(true)` for next
    pub fn slider_arrow_at(&self, col: u16, row: u16) -> Option<bool> {
        if row != self.slider.y || !self.slider.contains(col, row) {
            return None;
        }
        if col < self.slider.x + 3 {
            Some(false)
        } else if col.saturating_add(3) >= self.slider.x + self.slider.width {
            Some(true)
        } else {
            None
        }
    }
}

/// Current terminal size, falling back to crossterm when termsize cannot tell
pub fn size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => terminal::size(),
    }
}

/// Raw mode, alternate screen, and mouse capture for as long as it lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?
            .execute(event::EnableMouseCapture)?
            .execute(cursor::Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out
            .execute(cursor::Show)
            .and_then(|out| out.execute(event::DisableMouseCapture))
            .and_then(|out| out.execute(terminal::LeaveAlternateScreen));
        let _ = terminal::disable_raw_mode();
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.as_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Truncates `text` to at most `width` terminal columns
fn fit(text: &str, width: usize) -> String {
    let mut columns = 0;
    text.chars()
        .take_while(|c| {
            columns += c.width().unwrap_or(0);
            columns <= width
        })
        .collect()
}

/// Draws a frame into `rect` with one half-block per two pixel rows
pub fn draw_canvas<W: Write>(
    out: &mut W,
    rect: Rect,
    frame: Frame<'_>,
    pixel_ratio: f64,
) -> io::Result<()> {
    for row in 0..rect.height {
        out.queue(cursor::MoveTo(rect.x, rect.y + row))?;
        for col in 0..rect.width {
            let x = (col as f64 * pixel_ratio) as usize;
            let top = ((row as f64 * 2.0) * pixel_ratio) as usize;
            let bottom = ((row as f64 * 2.0 + 1.0) * pixel_ratio) as usize;
            let upper = frame.pixel(x, top).unwrap_or(Color::WHITE);
            let lower = frame.pixel(x, bottom).unwrap_or(Color::WHITE);
            out.queue(style::PrintStyledContent(
                '▀'.with(term_color(upper)).on(term_color(lower)),
            ))?;
        }
    }
    Ok(())
}

/// Fills `rect` with spaces
pub fn clear_rect<W: Write>(out: &mut W, rect: Rect) -> io::Result<()> {
    let blank = " ".repeat(rect.width as usize);
    for row in 0..rect.height {
        out.queue(cursor::MoveTo(rect.x, rect.y + row))?
            .queue(style::Print(&blank))?;
    }
    Ok(())
}

pub fn draw_panel<W: Write>(out: &mut W, rect: Rect, page: &Page) -> io::Result<()> {
    clear_rect(out, rect)?;
    let width = rect.width.saturating_sub(2) as usize;
    let x = rect.x + 1;

    out.queue(cursor::MoveTo(x, rect.y + 1))?
        .queue(style::PrintStyledContent(fit(&page.bag_name, width).bold()))?;

    for (i, button) in page.buttons.iter().enumerate() {
        let row = rect.y + 3 + i as u16;
        if row >= rect.y + rect.height {
            break;
        }
        let swatch = Color::from_hex(&button.swatch.hex).unwrap_or(Color::BLACK);
        let marker = if button.active { '>' } else { ' ' };
        out.queue(cursor::MoveTo(x, row))?
            .queue(style::Print(format!("{marker}{} ", i + 1)))?
            .queue(style::PrintStyledContent("■".with(term_color(swatch))))?
            .queue(style::Print(fit(
                &format!(" {}", button.swatch.title),
                width.saturating_sub(4),
            )))?;
    }

    let actions_row = rect.y + 4 + page.buttons.len() as u16;
    if actions_row < rect.y + rect.height {
        out.queue(cursor::MoveTo(x, actions_row))?
            .queue(style::Print(fit("[c] add to cart  [m] view more", width)))?;
    }
    Ok(())
}

pub fn draw_slider<W: Write>(
    out: &mut W,
    rect: Rect,
    track: &Track,
    slider: &Slider,
) -> io::Result<()> {
    clear_rect(out, rect)?;
    if rect.height == 0 {
        return Ok(());
    }
    let title = format!(
        " Popular  {}-{} of {} ",
        slider.index() + 1,
        (slider.index() + slider.items_per_view()).min(track.cards.len()),
        track.cards.len()
    );
    out.queue(cursor::MoveTo(rect.x, rect.y))?
        .queue(style::Print("◀ "))?
        .queue(style::PrintStyledContent(title.bold()))?
        .queue(cursor::MoveTo(
            (rect.x + rect.width).saturating_sub(2),
            rect.y,
        ))?
        .queue(style::Print("▶"))?;

    let left = rect.x as i64 + 1;
    let right = (rect.x + rect.width) as i64;
    let mut offset = left + track.translate_x;
    for card in &track.cards {
        let start = offset;
        offset += (card.width + slider.gap()) as i64;
        if start < left || start + card.width as i64 > right {
            continue;
        }
        for (line, text) in card.lines().iter().enumerate() {
            let row = rect.y + 2 + line as u16;
            if row >= rect.y + rect.height {
                break;
            }
            out.queue(cursor::MoveTo(start as u16, row))?
                .queue(style::Print(fit(text, card.width)))?;
        }
    }
    Ok(())
}

pub fn draw_status<W: Write>(out: &mut W, rect: Rect, message: Option<&str>) -> io::Result<()> {
    clear_rect(out, rect)?;
    out.queue(cursor::MoveTo(rect.x, rect.y))?;
    let width = rect.width as usize;
    match message {
        // Multi-line notifications are shown on one line
        Some(message) => out.queue(style::PrintStyledContent(
            fit(&message.replace('\n', "  "), width).reverse(),
        ))?,
        None => out.queue(style::Print(fit(
            "drag to rotate  1-9 color  h/l or ←/→ slide  d debug  q quit",
            width,
        )))?,
    };
    Ok(())
}

/// Diagnostic lines drawn over the top-left of the canvas
pub fn draw_debug<W: Write>(out: &mut W, rect: Rect, lines: &[String]) -> io::Result<()> {
    for (i, line) in lines.iter().enumerate() {
        let row = rect.y + i as u16;
        if row >= rect.y + rect.height {
            break;
        }
        out.queue(cursor::MoveTo(rect.x, row))?
            .queue(style::PrintStyledContent(
                fit(line, rect.width as usize).white().on_black(),
            ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_screen() {
        let layout = Layout::new(120, 40);
        assert_eq!(layout.status, Rect { x: 0, y: 39, width: 120, height: 1 });
        assert_eq!(layout.slider.y, 32);
        assert_eq!(layout.canvas.width + layout.panel.width, 120);
        assert_eq!(layout.canvas.height, 32);
        assert_eq!(layout.surface(), Surface::new(72, 64));
    }

    #[test]
    fn tiny_terminals_do_not_underflow() {
        let layout = Layout::new(10, 2);
        assert_eq!(layout.canvas.width, 0);
        assert_eq!(layout.surface().width, 0);
        let empty = Layout::new(0, 0);
        assert_eq!(empty.status.height, 0);
    }

    #[test]
    fn very_wide_terminals_do_not_overflow() {
        let layout = Layout::new(u16::MAX, 40);
        assert_eq!(layout.panel.width, 26214);
        assert_eq!(layout.canvas.width + layout.panel.width, u16::MAX);
        let layout = Layout::new(40000, 30);
        assert_eq!(layout.panel.width, 16000);
    }

    #[test]
    fn canvas_points_are_in_pixels() {
        let layout = Layout::new(120, 40);
        assert_eq!(layout.canvas_point(2, 3), Point::new(16.0, 48.0));
    }

    #[test]
    fn finds_clicked_controls() {
        let layout = Layout::new(120, 40);
        let col = layout.panel.x + 2;
        assert_eq!(layout.color_button_at(col, 3, 5), Some(0));
        assert_eq!(layout.color_button_at(col, 7, 5), Some(4));
        assert_eq!(layout.color_button_at(col, 8, 5), None);
        assert_eq!(layout.color_button_at(0, 3, 5), None);
        assert_eq!(layout.slider_arrow_at(0, layout.slider.y), Some(false));
        assert_eq!(layout.slider_arrow_at(119, layout.slider.y), Some(true));
        assert_eq!(layout.slider_arrow_at(60, layout.slider.y), None);
    }

    fn columns(text: &str) -> usize {
        unicode_width::UnicodeWidthStr::width(text)
    }

    #[test]
    fn fit_counts_columns() {
        assert_eq!(fit("프리미엄 토트백", 4), "프리");
        assert_eq!(fit("프리미엄", 3), "프");
        assert_eq!(fit("👜", 1), "");
        assert_eq!(fit("₩ 85,000", 8), "₩ 85,000");
        assert_eq!(fit("abc", 10), "abc");
    }

    #[test]
    fn narrow_cards_stay_within_their_columns() {
        let mut track = Track::default();
        crate::catalog::render_products(&mut track, &crate::catalog::CATALOG, 8);
        for card in &track.cards {
            for line in card.lines() {
                let fitted = fit(line, card.width);
                assert!(columns(&fitted) <= card.width, "{fitted:?}");
            }
        }
    }

    #[test]
    fn long_notifications_fit_the_status_line() {
        let rect = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 1,
        };
        let message = "\"프리미엄 레더 백팩\" (Black)\nAdded your favourite to the cart! 🎉";
        assert!(columns(&fit(&message.replace('\n', "  "), 20)) <= 20);
        let mut out = Vec::new();
        draw_status(&mut out, rect, Some(message)).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains('\n'));
    }
}
