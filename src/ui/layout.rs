//! Single-column layout: header, activity, status; palette floats over activity.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    HEADER_HEIGHT, MARGIN_X, MIN_ACTIVITY_LINES, PALETTE_MARGIN_BOTTOM, PALETTE_MAX_HEIGHT,
    PALETTE_MAX_WIDTH, STATUS_HEIGHT,
};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub activity: Rect,
    pub status: Rect,
}

/// Modal rect for the palette: top of the activity area, centered, capped in size.
pub fn palette_overlay_rect(activity: Rect) -> Rect {
    let height = activity
        .height
        .saturating_sub(PALETTE_MARGIN_BOTTOM)
        .min(PALETTE_MAX_HEIGHT);
    let width = activity.width.min(PALETTE_MAX_WIDTH);
    Rect {
        x: activity.x + (activity.width - width) / 2,
        y: activity.y,
        width,
        height,
    }
}

pub fn compute(area: Rect) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_ACTIVITY_LINES),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let activity = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    LayoutRegions {
        header: chunks[0],
        activity,
        status: chunks[2],
    }
}
