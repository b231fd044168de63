//! Single-panel render: header, activity, status, optional palette overlay.

use ratatui::Frame;

use crate::app::App;
use crate::host::HostFacade;
use crate::ui::layout;
use crate::ui::theme::SPINNER;
use crate::ui::widgets::{render_activity, render_header, render_palette, render_status};

pub fn render(f: &mut Frame, app: &App, tick: usize) {
    let regions = layout::compute(f.area());
    let host = app.session.host();
    let panel = app.session.panel();
    let spinner_char = SPINNER[tick % SPINNER.len()];

    render_header(f, regions.header, host.cached_config(), &host.working_directory());
    render_activity(f, host.notifications(), host.activity_scroll, regions.activity);
    render_status(f, regions.status, panel, spinner_char);

    if host.panel_visible() {
        render_palette(f, panel, layout::palette_overlay_rect(regions.activity), spinner_char);
    }
}
