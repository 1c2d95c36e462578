//! Off-screen rendering.
//!
//! Sections and timeline cards slide partly off the stage.  Ratatui areas
//! cannot start at negative coordinates, so such content is rendered into a
//! scratch buffer at its natural size and the overlapping part is copied
//! onto the frame.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Render `widget` at `width`×`height` with its top-left corner at (`x`, `y`)
/// relative to `clip`, keeping only the cells inside `clip`.
pub fn render_clipped<W: Widget>(widget: W, x: i32, y: i32, width: u16, height: u16, clip: Rect, buf: &mut Buffer) {
    if width == 0 || height == 0 || clip.width == 0 || clip.height == 0 {
        return;
    }
    let left = x.max(0);
    let top = y.max(0);
    let right = (x + i32::from(width)).min(i32::from(clip.width));
    let bottom = (y + i32::from(height)).min(i32::from(clip.height));
    if left >= right || top >= bottom {
        return;
    }

    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(scratch.area, &mut scratch);

    for row in top..bottom {
        for col in left..right {
            let (Ok(sx), Ok(sy)) = (u16::try_from(col - x), u16::try_from(row - y)) else {
                continue;
            };
            let (Ok(dx), Ok(dy)) = (u16::try_from(col), u16::try_from(row)) else {
                continue;
            };
            let Some(src) = scratch.cell((sx, sy)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((clip.x + dx, clip.y + dy)) {
                *dst = src.clone();
            }
        }
    }
}
