use tui::layout::{Constraint, Layout, Rect};

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

/// Screen regions for one frame.
pub struct LayoutAreas {
    pub header: Rect,
    pub main: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

impl LayoutAreas {
    pub fn new(area: Rect, show_logs: bool) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        // logs sit beside the content so list height is unchanged
        let (main, logs) = if show_logs {
            let [main, logs] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
            (main, Some(logs))
        } else {
            (body, None)
        };

        Self { header, main, logs, footer }
    }
}
