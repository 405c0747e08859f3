use tui::style::{Color, Modifier, Style};

/// Colors used by the renderer. Built once at startup and only read.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub border: Color,
    pub selected_border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub live: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            selected_border: Color::Yellow,
            text: Color::White,
            muted: Color::Gray,
            accent: Color::Cyan,
            live: Color::Red,
            error: Color::LightRed,
        }
    }
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.selected_border).add_modifier(Modifier::BOLD)
    }

    pub fn live(&self) -> Style {
        Style::default().fg(self.live).add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }
}
