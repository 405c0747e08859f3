use espn_api::{GameDetail, TeamDetail};
use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

pub const SCORE_HEADER_HEIGHT: u16 = 3;

/// Away and home side by side with the game state between them.
pub struct ScoreHeader<'a> {
    pub detail: &'a GameDetail,
    pub theme: &'a Theme,
}

impl Widget for ScoreHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [away, middle, home] =
            Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1), Constraint::Fill(2)]).areas(area);
        let theme = self.theme;

        Paragraph::new(team_lines(&self.detail.away, theme))
            .alignment(Alignment::Left)
            .render(away, buf);
        Paragraph::new(team_lines(&self.detail.home, theme))
            .alignment(Alignment::Right)
            .render(home, buf);

        let state = if self.detail.is_live {
            Line::styled("● LIVE", theme.live())
        } else {
            Line::styled(self.detail.status.as_str(), theme.muted())
        };
        let detail = if self.detail.status_detail.is_empty() {
            clock_text(self.detail)
        } else {
            self.detail.status_detail.clone()
        };
        Paragraph::new(vec![state, Line::styled(detail, theme.text()), Line::styled("vs", theme.muted())])
            .alignment(Alignment::Center)
            .render(middle, buf);
    }
}

fn team_lines<'a>(team: &'a TeamDetail, theme: &Theme) -> Vec<Line<'a>> {
    vec![
        Line::styled(team.label(), theme.heading()),
        Line::styled(team.record.as_str(), theme.muted()),
        Line::from(Span::styled(team.score.as_str(), theme.highlight())),
    ]
}

/// "Q3 4:12" style text built from period and clock.
fn clock_text(detail: &GameDetail) -> String {
    match (detail.period.is_empty(), detail.clock.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("P{}", detail.period),
        (true, false) => detail.clock.clone(),
        (false, false) => format!("P{} {}", detail.period, detail.clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_text_handles_missing_parts() {
        let mut detail = GameDetail::default();
        assert_eq!(clock_text(&detail), "");
        detail.period = "3".into();
        assert_eq!(clock_text(&detail), "P3");
        detail.clock = "4:12".into();
        assert_eq!(clock_text(&detail), "P3 4:12");
    }

    #[test]
    fn renders_both_teams() {
        let detail = GameDetail {
            status_detail: "Final".into(),
            away: TeamDetail { short_name: "Bruins".into(), score: "2".into(), ..Default::default() },
            home: TeamDetail { short_name: "Leafs".into(), score: "3".into(), ..Default::default() },
            ..Default::default()
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, SCORE_HEADER_HEIGHT);
        let mut buf = Buffer::empty(area);
        ScoreHeader { detail: &detail, theme: &theme }.render(area, &mut buf);

        let top: String = (0..50).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.starts_with("Bruins"));
        assert!(top.trim_end().ends_with("Leafs"));
    }
}
