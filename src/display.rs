/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game session.  No game logic is performed; this module only translates
/// state into terminal commands.  The playfield uses logical game units, so
/// a `Viewport` scales them onto whatever terminal size is available (and
/// maps mouse cells back to game units for the input layer).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_game::compute::retry_button_rect;
use flappy_game::entities::{GameSession, GameStatus, Pipe};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PIPE: Color = Color::Green;
const C_BIRD: Color = Color::Yellow;
const C_GROUND: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_OVER_BOX: Color = Color::Red;
const C_BUTTON_BG: Color = Color::Green;
const C_BUTTON_TEXT: Color = Color::White;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps logical game units onto terminal cells and back.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32, cols: u16, rows: u16) -> Self {
        Viewport {
            cols,
            rows,
            scale_x: cols as f32 / screen_width,
            scale_y: rows as f32 / screen_height,
        }
    }

    /// Game x → column, clamped into the visible range.
    fn col(&self, x: f32) -> u16 {
        ((x * self.scale_x).round() as i32).clamp(0, self.cols as i32) as u16
    }

    /// Game y → row, clamped into the visible range.
    fn row(&self, y: f32) -> u16 {
        ((y * self.scale_y).round() as i32).clamp(0, self.rows as i32) as u16
    }

    /// Terminal cell → game units, using the cell's centre.  Mouse events
    /// arrive in cells; the core only understands game units.
    pub fn game_pos(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as f32 + 0.5) / self.scale_x,
            (row as f32 + 0.5) / self.scale_y,
        )
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for pipe in &state.pipes {
        draw_pipe(out, state, viewport, pipe)?;
    }
    draw_ground(out, state, viewport)?;
    draw_bird(out, state, viewport)?;
    draw_hud(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, viewport)?;
    } else {
        draw_controls_hint(out, viewport)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Cell-rect fill ────────────────────────────────────────────────────────────

/// Fill the cell rectangle covering the game-unit span `[x0, x1) × [y0, y1)`.
fn fill_rect<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    symbol: &str,
    color: Color,
) -> std::io::Result<()> {
    let c0 = viewport.col(x0);
    let c1 = viewport.col(x1);
    let r0 = viewport.row(y0);
    let r1 = viewport.row(y1);
    if c1 <= c0 || r1 <= r0 {
        return Ok(());
    }

    out.queue(style::SetForegroundColor(color))?;
    let band = symbol.repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&band))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_pipe<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
    pipe: &Pipe,
) -> std::io::Result<()> {
    let config = &state.config;
    let right = pipe.x + config.pipe_width;

    // Upper segment: top of screen down to the gap
    fill_rect(out, viewport, pipe.x, right, 0.0, pipe.height, "█", C_PIPE)?;

    // Lower segment: below the gap down to the ground
    fill_rect(
        out,
        viewport,
        pipe.x,
        right,
        pipe.height + config.gap_size,
        state.ground.y,
        "█",
        C_PIPE,
    )?;

    Ok(())
}

fn draw_ground<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
) -> std::io::Result<()> {
    fill_rect(
        out,
        viewport,
        0.0,
        state.config.screen_width,
        state.ground.y,
        state.config.screen_height,
        "▓",
        C_GROUND,
    )
}

fn draw_bird<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let bird = &state.bird;
    fill_rect(
        out,
        viewport,
        bird.x,
        bird.x + bird.width,
        bird.y,
        bird.y + bird.height,
        "█",
        C_BIRD,
    )
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", state.score)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, viewport.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Flap   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let score_line = format!("You lost with {} points", state.score);

    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];

    let cx = viewport.cols / 2;
    let start_row = (viewport.rows / 2).saturating_sub(3);

    out.queue(style::SetForegroundColor(C_OVER_BOX))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_line))?;

    draw_retry_button(out, state, viewport)?;

    let hint = "ENTER / click Retry - Play Again   Q - Quit";
    let hint_row = viewport.rows.saturating_sub(1);
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}

/// The clickable retry control, drawn exactly at the bounds the core exposes
/// so pointer hit-testing agrees with what the player sees.
fn draw_retry_button<W: Write>(
    out: &mut W,
    state: &GameSession,
    viewport: &Viewport,
) -> std::io::Result<()> {
    let rect = retry_button_rect(&state.config);
    let c0 = viewport.col(rect.x);
    let c1 = viewport.col(rect.x + rect.width);
    let r0 = viewport.row(rect.y);
    let r1 = viewport.row(rect.y + rect.height);
    if c1 <= c0 || r1 <= r0 {
        return Ok(());
    }

    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    let blank = " ".repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&blank))?;
    }

    let label = "Retry";
    let label_row = r0 + (r1 - r0) / 2;
    let label_col = c0 + ((c1 - c0) as usize).saturating_sub(label.len()) as u16 / 2;
    out.queue(cursor::MoveTo(label_col, label_row))?;
    out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
    out.queue(Print(label))?;
    out.queue(style::ResetColor)?;

    Ok(())
}
