/// All game entity types — passive data, no game logic.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Abstract input commands, produced by the input layer and consumed by the
/// state machine in `compute::apply_command`.  `PointerClick` coordinates are
/// in game units, not terminal cells.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Jump,
    Restart,
    Quit,
    PointerClick { x: f32, y: f32 },
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Session constants, fixed once play begins.  `Default` carries the
/// canonical tuning; `compute::validate_config` rejects combinations with no
/// valid obstacle gap before a session starts.
#[derive(Clone, Debug)]
pub struct Config {
    /// Logical playfield width in game units (not terminal cells).
    pub screen_width: f32,
    /// Logical playfield height in game units.
    pub screen_height: f32,
    pub pipe_width: f32,
    /// Vertical opening between a pipe's upper and lower segments.
    pub gap_size: f32,
    /// Velocity added each frame.
    pub gravity: f32,
    /// Upward velocity set (not added) by a flap.
    pub jump_impulse: f32,
    /// Leftward pipe motion per frame.
    pub pipe_speed: f32,
    /// Milliseconds between pipe spawns.
    pub pipe_add_interval_ms: f32,
    /// X position where new pipes appear, off the right edge.
    pub pipe_initial_x: f32,
    pub ground_height: f32,
    /// The bird's horizontal position, fixed for the whole session.
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: 400.0,
            screen_height: 600.0,
            pipe_width: 100.0,
            gap_size: 200.0,
            gravity: 0.90,
            jump_impulse: 12.0,
            pipe_speed: 7.0,
            pipe_add_interval_ms: 1500.0,
            pipe_initial_x: 500.0,
            ground_height: 50.0,
            bird_x: 50.0,
            bird_width: 70.0,
            bird_height: 70.0,
        }
    }
}

/// Rejected configurations.  Raised once at session start — gameplay itself
/// never errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("gap of {gap_size} plus margins cannot fit a screen {screen_height} units tall")]
    GapTooLarge { gap_size: f32, screen_height: f32 },
    #[error("ground height {ground_height} must be smaller than screen height {screen_height}")]
    GroundTooTall {
        ground_height: f32,
        screen_height: f32,
    },
    #[error("pipes must spawn ahead of the bird (spawn x {pipe_initial_x}, bird right edge {bird_right})")]
    SpawnBehindBird { pipe_initial_x: f32, bird_right: f32 },
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in game units.  Used for the retry control's
/// bounds so the input layer can test pointer clicks against it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

// ── Bird, pipes, ground ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bird {
    /// Fixed after creation; only `y` and `velocity` change frame to frame.
    pub x: f32,
    pub y: f32,
    /// Positive = falling.  Changed only by gravity and jump impulses.
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

/// A pipe pair: the upper segment spans `0..height`, the lower segment spans
/// `height + gap_size..screen_height`.
#[derive(Clone, Debug)]
pub struct Pipe {
    pub x: f32,
    /// Gap-top offset, drawn uniformly at spawn time.
    pub height: f32,
    /// Set the first frame the bird clears this pipe, so it scores once.
    pub passed: bool,
}

#[derive(Clone, Debug)]
pub struct Ground {
    pub y: f32,
}

// ── Master session state ──────────────────────────────────────────────────────

/// One run of the game from start (or restart) to game over.  Cloneable so
/// pure update functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub bird: Bird,
    /// Live pipes in spawn order, which is also x-descending.
    pub pipes: Vec<Pipe>,
    pub ground: Ground,
    pub score: u32,
    pub status: GameStatus,
    /// Milliseconds accumulated toward the next pipe spawn.
    pub spawn_timer_ms: f32,
    pub frame: u64,
    pub config: Config,
}
