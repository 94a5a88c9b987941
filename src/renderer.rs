use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{Palette, Rgb};
use crate::grid::{Grid, Tile};
use crate::snapshot::Snapshot;
use crate::ui::hud::render_hud;

/// Terminal columns used to draw one grid cell, so cells come out roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_APPLE: &str = "◖◗";
const GLYPH_OBSTACLE: &str = "▓▓";

/// Kinds of drawable entity; each gets its own glyph.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum EntityKind {
    SnakeHead,
    SnakeBody,
    Apple,
    Obstacle,
}

impl EntityKind {
    fn glyph(self) -> &'static str {
        match self {
            Self::SnakeHead | Self::SnakeBody => GLYPH_CELL,
            Self::Apple => GLYPH_APPLE,
            Self::Obstacle => GLYPH_OBSTACLE,
        }
    }
}

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, grid: Grid, palette: &Palette) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let block = Block::bordered()
        .title(" hazard-snake ")
        .style(Style::new().bg(to_color(palette.board)));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    for tile in &snapshot.obstacles {
        draw_tile(frame, inner, grid, tile, EntityKind::Obstacle);
    }

    draw_tile(frame, inner, grid, &snapshot.apple, EntityKind::Apple);

    for (index, tile) in snapshot.snake.iter().enumerate().rev() {
        let kind = if index == 0 {
            EntityKind::SnakeHead
        } else {
            EntityKind::SnakeBody
        };
        draw_tile(frame, inner, grid, tile, kind);
    }
}

fn draw_tile(frame: &mut Frame<'_>, inner: Rect, grid: Grid, tile: &Tile, kind: EntityKind) {
    let Some((x, y)) = cell_to_terminal(inner, grid, tile) else {
        return;
    };

    let mut color = to_color(tile.color);
    if kind == EntityKind::SnakeHead {
        color = to_color(brighten(tile.color));
    }

    frame
        .buffer_mut()
        .set_string(x, y, kind.glyph(), Style::new().fg(color));
}

/// Maps a tile to its top-left terminal position inside `inner`, or `None`
/// when the terminal is too small to show it.
fn cell_to_terminal(inner: Rect, grid: Grid, tile: &Tile) -> Option<(u16, u16)> {
    if !grid.contains(tile.cell) {
        return None;
    }

    let (column, row) = grid.index_of(tile.cell);
    let x_offset = u16::try_from(column).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn brighten(rgb: Rgb) -> Rgb {
    let lift = |channel: u8| channel.saturating_add((255 - channel) / 2);
    Rgb::new(lift(rgb.r), lift(rgb.g), lift(rgb.b))
}
