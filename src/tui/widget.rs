//! Placement of the floating panel inside the terminal.

use ratatui::layout::Rect;

use crate::model::Position;

pub const WIDGET_WIDTH: u16 = 36;
pub const WIDGET_HEIGHT: u16 = 22;
/// Distance from a screen edge within which a move snaps flush to it
pub const SNAP_MARGIN: u16 = 2;
/// Gap from the right and top edges when no position has been saved
const DEFAULT_INSET: u16 = 2;

/// Size of the panel clamped to the screen
fn widget_size(screen: Rect) -> (u16, u16) {
    (
        WIDGET_WIDTH.min(screen.width),
        WIDGET_HEIGHT.min(screen.height),
    )
}

/// Where the panel lands for a saved `position`. Without a saved position
/// it sits top-right. The result always lies inside `screen`.
pub fn placement(position: &Position, screen: Rect) -> Rect {
    let (w, h) = widget_size(screen);
    let (x, y) = position.coords().unwrap_or_else(|| {
        (
            screen.width.saturating_sub(w + DEFAULT_INSET),
            DEFAULT_INSET,
        )
    });
    clamp(Rect::new(x, y, w, h), screen)
}

/// Keep `rect` fully inside `screen`, shrinking it if the screen is smaller.
pub fn clamp(rect: Rect, screen: Rect) -> Rect {
    let w = rect.width.min(screen.width);
    let h = rect.height.min(screen.height);
    let max_x = screen.x + screen.width - w;
    let max_y = screen.y + screen.height - h;
    Rect::new(
        rect.x.clamp(screen.x, max_x),
        rect.y.clamp(screen.y, max_y),
        w,
        h,
    )
}

/// Move `rect` by (dx, dy) cells, staying on screen.
pub fn nudge(rect: Rect, dx: i32, dy: i32, screen: Rect) -> Rect {
    let x = (rect.x as i32 + dx).max(0);
    let y = (rect.y as i32 + dy).max(0);
    let moved = Rect::new(
        x.min(u16::MAX as i32) as u16,
        y.min(u16::MAX as i32) as u16,
        rect.width,
        rect.height,
    );
    clamp(moved, screen)
}

/// Pull the panel flush against any edge it is closer than `SNAP_MARGIN` to.
pub fn snap_to_edge(rect: Rect, screen: Rect) -> Rect {
    let mut snapped = clamp(rect, screen);
    let right = screen.x + screen.width;
    let bottom = screen.y + screen.height;

    if snapped.x - screen.x < SNAP_MARGIN {
        snapped.x = screen.x;
    } else if right - (snapped.x + snapped.width) < SNAP_MARGIN {
        snapped.x = right - snapped.width;
    }

    if snapped.y - screen.y < SNAP_MARGIN {
        snapped.y = screen.y;
    } else if bottom - (snapped.y + snapped.height) < SNAP_MARGIN {
        snapped.y = bottom - snapped.height;
    }

    snapped
}

/// Position to persist for a placed panel
pub fn position_of(rect: Rect) -> Position {
    Position::at(rect.x, rect.y)
}
