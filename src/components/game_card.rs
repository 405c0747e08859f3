use chrono::Local;
use espn_api::{Game, Team};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::state::viewport::GAME_CARD_HEIGHT;
use crate::ui::theme::Theme;

/// One scoreboard entry drawn as a bordered card, [`GAME_CARD_HEIGHT`] rows tall:
///
/// ```text
/// ╭ BOS @ LAL ──────────────╮
/// │ ● LIVE  3rd Quarter     │
/// │ Celtics             87  │
/// │ Lakers              91  │
/// │ Crypto.com Arena        │
/// │ Tue Jan 14  7:30 PM     │
/// ╰─────────────────────────╯
/// ```
pub struct GameCard<'a> {
    pub game: &'a Game,
    pub selected: bool,
    pub theme: &'a Theme,
}

impl Widget for GameCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Rect { height: area.height.min(GAME_CARD_HEIGHT), ..area };
        let theme = self.theme;
        let border = if self.selected { theme.selected_border } else { theme.border };

        let title = if self.game.short_name.is_empty() { &self.game.name } else { &self.game.short_name };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(tui::style::Style::default().fg(border))
            .title(format!(" {title} "));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        let status = if self.game.is_live {
            Line::from(vec![Span::styled("● LIVE  ", theme.live()), Span::styled(self.game.status.as_str(), theme.text())])
        } else {
            Line::styled(self.game.status.as_str(), theme.muted())
        };

        let kickoff = self
            .game
            .kickoff
            .map(|t| t.with_timezone(&Local).format("%a %b %-d  %-I:%M %p").to_string())
            .unwrap_or_default();

        let lines = vec![
            status,
            team_line(&self.game.away, width, theme),
            team_line(&self.game.home, width, theme),
            Line::styled(self.game.venue.as_str(), theme.muted()),
            Line::styled(kickoff, theme.muted()),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Team name on the left, score right-aligned.
fn team_line<'a>(team: &'a Team, width: usize, theme: &Theme) -> Line<'a> {
    let name = if team.short_name.is_empty() { &team.name } else { &team.short_name };
    let score_width = team.score.chars().count();
    let name_width = width.saturating_sub(score_width + 1);
    let name: String = name.chars().take(name_width).collect();
    let pad = width.saturating_sub(name.chars().count() + score_width);
    Line::from(vec![
        Span::styled(name, theme.text()),
        Span::raw(" ".repeat(pad)),
        Span::styled(team.score.as_str(), theme.heading()),
    ])
}
