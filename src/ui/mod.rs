pub mod hud;
pub mod menu;

use ratatui::style::Color;

/// Colors applied to the playfield and overlays.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake and red food on a white field.
pub const PALETTE_CLASSIC: Palette = Palette {
    snake_head: Color::Rgb(0, 160, 0),
    snake_body: Color::Rgb(0, 255, 0),
    food: Color::Rgb(255, 0, 0),
    play_bg: Color::Rgb(255, 255, 255),
    border_fg: Color::Gray,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};
