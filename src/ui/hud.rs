use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::GameState;
use crate::ui::Palette;

/// Values shown by the HUD that do not live in the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub tick_interval: Duration,
    pub games_started: u64,
    pub palette: &'a Palette,
}

/// Renders the one-line HUD under the playfield.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) {
    let status = status_line(state.snake.len(), info.tick_interval, info.games_started);
    let status_width = u16::try_from(status.chars().count()).unwrap_or(u16::MAX);
    let [score_area, status_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state.score, info.palette)),
        score_area,
    );

    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.palette.hud_muted)),
        status_area,
    );
}

fn score_line(score: u32, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::default().fg(palette.hud_muted)),
        Span::styled(
            score.to_string(),
            Style::default()
                .fg(palette.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn status_line(length: usize, tick_interval: Duration, games_started: u64) -> String {
    format!(
        "Len {length}  {}ms  #{games_started}",
        tick_interval.as_millis()
    )
}
