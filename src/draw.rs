use std::io::{self, Stdout};

use espn_api::{GameDetail, ListMode, Statistic};
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::game_card::GameCard;
use crate::components::score_header::{SCORE_HEADER_HEIGHT, ScoreHeader};
use crate::state::navigator::{Navigator, View};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::viewport::{self, GAME_CARD_HEIGHT};
use crate::ui::layout::LayoutAreas;
use crate::ui::theme::Theme;

/// Team statistics shown per game; the feed may carry many more.
const MAX_STAT_ROWS: usize = 12;

pub fn draw(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    loading: LoadingState,
) -> io::Result<()> {
    let size = terminal.size()?;
    if size.width <= 10 || size.height <= 10 {
        return Ok(());
    }

    terminal.draw(|f| {
        let layout = LayoutAreas::new(f.area(), app.show_logs);
        let theme = app.theme;

        draw_header(f, layout.header, &app.nav, &theme);
        match app.nav.view {
            View::SportSelect => draw_sports(f, layout.main, &app.nav, &theme),
            View::LeagueSelect => draw_leagues(f, layout.main, &app.nav, &theme),
            View::GameList => draw_games(f, layout.main, &app.nav, &theme),
            View::GameDetail => draw_detail(f, layout.main, &mut app.nav, &theme),
        }
        if let Some(logs) = layout.logs {
            draw_logs(f, logs, &theme);
        }
        draw_footer(f, layout.footer, app.nav.view, &theme);
        draw_loading_spinner(f, layout.header, loading, &theme);
    })?;
    Ok(())
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

/// Breadcrumb of the current drill-down path.
fn draw_header(f: &mut Frame, area: Rect, nav: &Navigator, theme: &Theme) {
    let mut crumbs = vec![Span::styled("Sports", theme.heading())];
    let mut push = |text: String| {
        crumbs.push(Span::styled(" › ", theme.muted()));
        crumbs.push(Span::styled(text, theme.text()));
    };

    if nav.view != View::SportSelect
        && let Some(sport) = nav.sport
    {
        push(format!("{} {}", sport.icon, sport.name));
    }
    if matches!(nav.view, View::GameList | View::GameDetail)
        && let Some(league) = nav.league
    {
        push(league.name.to_owned());
    }
    if nav.view == View::GameDetail
        && let Some(detail) = nav.detail.as_ref()
    {
        push(matchup(detail));
    }

    let block = default_border(theme.border).title(" sportsterm ");
    f.render_widget(Paragraph::new(Line::from(crumbs)).block(block), area);
}

/// "Away @ Home" from the loaded detail, independent of list order.
fn matchup(detail: &GameDetail) -> String {
    format!("{} @ {}", detail.away.label(), detail.home.label())
}

fn draw_sports(f: &mut Frame, area: Rect, nav: &Navigator, theme: &Theme) {
    let lines = nav
        .catalog()
        .iter()
        .enumerate()
        .map(|(idx, sport)| menu_line(format!("{} {}", sport.icon, sport.name), idx == nav.sport_cursor, theme))
        .collect::<Vec<_>>();
    let block = default_border(theme.border).title(" Select a sport ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_leagues(f: &mut Frame, area: Rect, nav: &Navigator, theme: &Theme) {
    let leagues = nav.sport.map(|s| s.leagues).unwrap_or_default();
    let lines = leagues
        .iter()
        .enumerate()
        .map(|(idx, league)| menu_line(league.name.to_owned(), idx == nav.league_cursor, theme))
        .collect::<Vec<_>>();
    let title = nav.sport.map_or(" Select a league ".to_owned(), |s| format!(" {} leagues ", s.name));
    let block = default_border(theme.border).title(title);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn menu_line(text: String, selected: bool, theme: &Theme) -> Line<'static> {
    if selected {
        Line::styled(format!("> {text}"), theme.highlight())
    } else {
        Line::styled(format!("  {text}"), theme.text())
    }
}

fn draw_games(f: &mut Frame, area: Rect, nav: &Navigator, theme: &Theme) {
    let [status_area, cards_area] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    let total = nav.games.len();
    let visible = nav.visible_games();
    let first = nav.game_scroll.min(total);
    let last = (first + visible).min(total);

    let mut status = vec![
        Span::styled(nav.league.map_or("", |l| l.name), theme.heading()),
        Span::styled(format!("  {} games", nav.mode.label()), theme.muted()),
    ];
    if nav.loading {
        status.push(Span::styled("  Loading games...", theme.highlight()));
    }
    if total > visible {
        status.push(Span::styled(format!("  Showing {}-{} of {total}", first + 1, last), theme.text()));
    }
    if let Some(updated) = nav.last_update {
        status.push(Span::styled(format!("  Updated {}", updated.format("%-I:%M:%S %p")), theme.muted()));
    }
    if let Some(err) = nav.list_error.as_deref() {
        status.push(Span::styled(format!("  {err}"), theme.error()));
    }
    f.render_widget(Paragraph::new(Line::from(status)), status_area);

    if total == 0 {
        f.render_widget(
            Paragraph::new(empty_list_message(nav)).style(theme.muted()).alignment(Alignment::Center),
            cards_area,
        );
        return;
    }

    for (row, (idx, game)) in nav.games.iter().enumerate().skip(first).take(last - first).enumerate() {
        let y = cards_area.y + row as u16 * GAME_CARD_HEIGHT;
        if y + GAME_CARD_HEIGHT > cards_area.bottom() {
            break;
        }
        let card = Rect::new(cards_area.x, y, cards_area.width, GAME_CARD_HEIGHT);
        f.render_widget(GameCard { game, selected: idx == nav.game_cursor, theme }, card);
    }
}

fn empty_list_message(nav: &Navigator) -> &'static str {
    if nav.loading {
        "Loading games..."
    } else if nav.list_error.is_some() {
        "Could not load games. Press r to retry."
    } else {
        match nav.mode {
            ListMode::Current => "No games today. Press u for upcoming games.",
            ListMode::Upcoming => "No upcoming games scheduled.",
        }
    }
}

fn draw_detail(f: &mut Frame, area: Rect, nav: &mut Navigator, theme: &Theme) {
    let block = default_border(theme.border).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(detail) = nav.detail.as_ref() else {
        let (msg, style) = if let Some(err) = nav.detail_error.as_deref() {
            (format!("Load failed:\n{err}"), theme.error())
        } else {
            ("Loading game...".to_owned(), theme.muted())
        };
        f.render_widget(Paragraph::new(msg).style(style), inner);
        return;
    };

    let [score_area, _gap, body_area] = Layout::vertical([
        Constraint::Length(SCORE_HEADER_HEIGHT),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(ScoreHeader { detail, theme }, score_area);

    let body = Paragraph::new(detail_lines(detail, theme)).wrap(Wrap { trim: false });
    let total = body.line_count(body_area.width);
    nav.detail_scroll = viewport::clamp_offset(nav.detail_scroll, total, usize::from(body_area.height));
    let offset = u16::try_from(nav.detail_scroll).unwrap_or(u16::MAX);
    f.render_widget(body.scroll((offset, 0)), body_area);
}

fn detail_lines<'a>(detail: &'a GameDetail, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if !detail.venue.is_empty() || !detail.attendance.is_empty() {
        lines.push(Line::styled("Game Info", theme.heading()));
        if !detail.venue.is_empty() {
            lines.push(Line::from(vec![Span::styled("Venue: ", theme.muted()), Span::raw(detail.venue.as_str())]));
        }
        if !detail.attendance.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Attendance: ", theme.muted()),
                Span::raw(detail.attendance.as_str()),
            ]));
        }
        lines.push(Line::default());
    }

    let stats = stat_rows(&detail.away.statistics, &detail.home.statistics);
    if !stats.is_empty() {
        lines.push(Line::styled(
            format!("Team Stats  {} | {}", detail.away.label(), detail.home.label()),
            theme.heading(),
        ));
        for (label, away, home) in stats.into_iter().take(MAX_STAT_ROWS) {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<24}"), theme.muted()),
                Span::raw(format!("{away:>10}  {home:>10}")),
            ]));
        }
        lines.push(Line::default());
    }

    if !detail.leaders.is_empty() {
        lines.push(Line::styled("Leaders", theme.heading()));
        for leader in &detail.leaders {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", leader.category), theme.muted()),
                Span::raw(format!("{} ({}) {}", leader.athlete, leader.team, leader.value)),
            ]));
        }
        lines.push(Line::default());
    }

    lines.push(Line::styled("Recent Plays", theme.heading()));
    if detail.plays.is_empty() {
        lines.push(Line::styled("No plays yet", theme.muted()));
    }
    for play in &detail.plays {
        let mut spans = vec![Span::styled(format!("P{} {:>6} ", play.period, play.clock), theme.muted())];
        if !play.team.is_empty() {
            spans.push(Span::styled(format!("{} ", play.team), theme.text()));
        }
        let style = if play.scoring { theme.highlight() } else { theme.text() };
        spans.push(Span::styled(play.text.as_str(), style));
        lines.push(Line::from(spans));
    }

    lines
}

/// Pair away and home statistics by label, in away-side order, with home-only
/// labels appended.
fn stat_rows<'a>(away: &'a [Statistic], home: &'a [Statistic]) -> Vec<(&'a str, &'a str, &'a str)> {
    let mut rows: Vec<(&str, &str, &str)> = away
        .iter()
        .map(|a| {
            let h = home.iter().find(|h| h.label == a.label).map_or("", |h| h.value.as_str());
            (a.label.as_str(), a.value.as_str(), h)
        })
        .collect();
    for h in home {
        if !away.iter().any(|a| a.label == h.label) {
            rows.push((h.label.as_str(), "", h.value.as_str()));
        }
    }
    rows
}

fn draw_logs(f: &mut Frame, area: Rect, theme: &Theme) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(theme.border).title(" Logs "))
        .style_error(theme.error())
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(theme.text())
        .style_debug(theme.muted())
        .style_trace(theme.muted());
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, area: Rect, view: View, theme: &Theme) {
    let help = match view {
        View::SportSelect => "↑/↓ move  enter select  \" logs  q quit",
        View::LeagueSelect => "↑/↓ move  enter select  esc back  \" logs  q quit",
        View::GameList => "↑/↓ move  enter details  r refresh  u upcoming/current  esc back  \" logs  q quit",
        View::GameDetail => "↑/↓ scroll  esc back  \" logs  q quit",
    };
    f.render_widget(Paragraph::new(help).style(theme.muted()), area);
}

fn draw_loading_spinner(f: &mut Frame, header: Rect, loading: LoadingState, theme: &Theme) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => theme.error(),
        _ => theme.text(),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string()).style(style);
    let area = Rect::new(header.right().saturating_sub(3), header.y + 1, 1, 1);
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(label: &str, value: &str) -> Statistic {
        Statistic { label: label.into(), value: value.into() }
    }

    #[test]
    fn stat_rows_align_by_label() {
        let away = [stat("Rebounds", "40"), stat("Assists", "22")];
        let home = [stat("Assists", "25"), stat("Turnovers", "12")];
        assert_eq!(
            stat_rows(&away, &home),
            vec![("Rebounds", "40", ""), ("Assists", "22", "25"), ("Turnovers", "", "12")]
        );
    }

    #[test]
    fn stat_table_is_capped() {
        let stats: Vec<Statistic> = (0..40).map(|i| stat(&format!("Stat {i}"), "1")).collect();
        let mut detail = GameDetail::default();
        detail.away.statistics = stats.clone();
        detail.home.statistics = stats;
        let lines = detail_lines(&detail, &Theme::default());
        // heading + capped rows + blank, then plays heading + "No plays yet"
        assert_eq!(lines.len(), 1 + MAX_STAT_ROWS + 1 + 2);
    }

    #[test]
    fn matchup_uses_detail_teams() {
        let mut detail = GameDetail::default();
        detail.away.short_name = "Celtics".into();
        detail.home.name = "Los Angeles Lakers".into();
        assert_eq!(matchup(&detail), "Celtics @ Los Angeles Lakers");
    }

    #[test]
    fn empty_list_message_follows_mode_and_loading() {
        let mut nav = Navigator::default();
        assert_eq!(empty_list_message(&nav), "No games today. Press u for upcoming games.");
        nav.mode = ListMode::Upcoming;
        assert_eq!(empty_list_message(&nav), "No upcoming games scheduled.");
        nav.list_error = Some("Network error".into());
        assert_eq!(empty_list_message(&nav), "Could not load games. Press r to retry.");
        nav.loading = true;
        assert_eq!(empty_list_message(&nav), "Loading games...");
    }

    #[test]
    fn detail_without_sections_still_lists_plays_heading() {
        let detail = GameDetail::default();
        let lines = detail_lines(&detail, &Theme::default());
        assert_eq!(lines.len(), 2);
    }
}
