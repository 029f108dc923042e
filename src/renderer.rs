use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{EngineConfig, GridSize};
use crate::game::GameState;
use crate::session::{Phase, Session};
use crate::snake::Position;
use crate::ui::Palette;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns used to draw one grid cell, so cells look square.
pub const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_SEGMENT: &str = "██";
const GLYPH_FOOD: &str = "▐▌";

/// Renders the full frame for the current session.
pub fn render(frame: &mut Frame<'_>, session: &Session, hud_info: HudInfo<'_>) {
    let area = frame.area();
    let state = session.state();
    let grid = state.config().grid_size();

    let Some((field, hud_row)) = layout_field(area, grid) else {
        render_too_small(frame, area, grid);
        return;
    };

    let palette = hud_info.palette;
    let block = Block::bordered()
        .border_style(Style::new().fg(palette.border_fg))
        .style(Style::new().bg(palette.play_bg));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    render_food(frame, inner, state, palette);
    render_snake(frame, inner, state, palette);
    render_hud(frame, hud_row, state, &hud_info);

    match session.phase() {
        Phase::Ready => render_start_menu(frame, field, palette),
        Phase::Paused => render_pause_menu(frame, field),
        Phase::GameOverPrompt => {
            render_game_over_menu(frame, field, state.score, state.game_over_reason);
        }
        Phase::Playing | Phase::Quit => {}
    }
}

/// Splits `area` into a centered bordered field and the HUD row below it.
///
/// Returns `None` when the terminal cannot fit the grid.
#[must_use]
pub fn layout_field(area: Rect, grid: GridSize) -> Option<(Rect, Rect)> {
    let width = u16::try_from(grid.columns)
        .ok()?
        .checked_mul(COLUMNS_PER_CELL)?
        .checked_add(2)?;
    let height = u16::try_from(grid.rows).ok()?.checked_add(2)?;

    if width > area.width || height.saturating_add(1) > area.height {
        return None;
    }

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [field, hud_row] = Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(column);

    Some((field, hud_row))
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize) {
    let needed_width = grid
        .columns
        .saturating_mul(u32::from(COLUMNS_PER_CELL))
        .saturating_add(2);
    let needed_height = grid.rows.saturating_add(3);
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {needed_width}x{needed_height}")),
        Line::from("[Q] Quit"),
    ];

    let [row] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), row);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, palette: &Palette) {
    let Some((x, y)) = grid_to_terminal(inner, state.config(), state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(palette.food).bg(palette.play_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, palette: &Palette) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    // Tail first so the head stays visible when it overlaps the body.
    for segment in state.snake.segments().rev() {
        let Some((x, y)) = grid_to_terminal(inner, state.config(), *segment) else {
            continue;
        };

        let style = if *segment == head {
            Style::new()
                .fg(palette.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(palette.snake_body)
        };
        buffer.set_string(x, y, GLYPH_SEGMENT, style);
    }
}

/// Maps a pixel-space grid position to the terminal cell where it is drawn.
#[must_use]
pub fn grid_to_terminal(
    inner: Rect,
    config: &EngineConfig,
    position: Position,
) -> Option<(u16, u16)> {
    if !position.is_within_bounds(config.grid_width, config.grid_height) {
        return None;
    }

    let cell = i32::try_from(config.cell_size).ok()?;
    let column = u16::try_from(position.x / cell).ok()?;
    let row = u16::try_from(position.y / cell).ok()?;

    let x = inner.x.saturating_add(column.saturating_mul(COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
