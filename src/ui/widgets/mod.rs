//! TUI widgets: header, activity, status, command palette.

mod activity;
mod header;
mod palette;
mod query;
mod status;

pub use activity::render as render_activity;
pub use header::render as render_header;
pub use palette::render as render_palette;
pub use status::render as render_status;
