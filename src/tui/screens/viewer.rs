use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::core::spinner::FrameSpinner;
use crate::core::surface::{PixelSurface, Surface};

/// Upper half block: one terminal cell shows two vertically stacked pixels,
/// the glyph colored by the top one and the cell background by the bottom.
const HALF_BLOCK: &str = "▀";

pub fn draw(frame: &mut Frame, area: Rect, spinner: &FrameSpinner<PixelSurface>) {
    if spinner.current_frame().is_none() {
        return;
    }

    let surface = spinner.surface();
    if surface.width() == 0 || surface.height() == 0 || area.width == 0 || area.height == 0 {
        return;
    }

    let (cols, rows) = fit(surface.width(), surface.height(), area.width, area.height);
    let target = Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    );

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows as u32 {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..cols as u32 {
            let px = col * surface.width() / cols as u32;
            let py_top = (row * 2) * surface.height() / (rows as u32 * 2);
            let py_bottom = (row * 2 + 1) * surface.height() / (rows as u32 * 2);

            let style = Style::default()
                .fg(cell_color(surface.pixel(px, py_top)))
                .bg(cell_color(surface.pixel(px, py_bottom)));
            spans.push(Span::styled(HALF_BLOCK, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), target);
}

/// Scale the image to the drawable area, preserving aspect ratio with cells
/// counted as one pixel wide and two pixels tall.
fn fit(img_w: u32, img_h: u32, max_cols: u16, max_rows: u16) -> (u16, u16) {
    let scale = f64::min(
        max_cols as f64 / img_w as f64,
        (max_rows as f64 * 2.0) / img_h as f64,
    );
    let cols = ((img_w as f64 * scale).floor() as u16).clamp(1, max_cols);
    let rows = ((img_h as f64 * scale / 2.0).ceil() as u16).clamp(1, max_rows);
    (cols, rows)
}

fn cell_color(rgba: [u8; 4]) -> Color {
    if rgba[3] < 128 {
        Color::Reset
    } else {
        Color::Rgb(rgba[0], rgba[1], rgba[2])
    }
}
