use crate::state::app_settings::AppSettings;
use crate::state::navigator::Navigator;
use crate::ui::theme::Theme;

pub struct App {
    pub theme: Theme,
    pub nav: Navigator,
    pub show_logs: bool,
}

impl App {
    pub fn new(settings: &AppSettings) -> Self {
        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self {
            theme: Theme::default(),
            nav: Navigator::default(),
            show_logs: false,
        }
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }
}
