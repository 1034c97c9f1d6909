/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG, so a seeded
/// RNG reproduces an entire run frame for frame.

use rand::Rng;

use crate::entities::{
    Bird, Command, Config, ConfigError, GameSession, GameStatus, Ground, Pipe, Rect,
};

/// Milliseconds of game time per frame — one call to `tick` advances exactly
/// this much on the spawn clock.
pub const TICK_MS: f32 = 1000.0 / 60.0;

/// Minimum distance from the screen top/bottom to the gap.  Keeps both pipe
/// segments on screen with nonzero height.
pub const GAP_MARGIN: f32 = 50.0;

const RETRY_BUTTON_WIDTH: f32 = 100.0;
const RETRY_BUTTON_HEIGHT: f32 = 50.0;

// ── Configuration validation ─────────────────────────────────────────────────

/// Reject configurations that cannot produce a playable session.  Called once
/// at session start; never clamps silently.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let positive = [
        ("screen_width", config.screen_width),
        ("screen_height", config.screen_height),
        ("pipe_width", config.pipe_width),
        ("gap_size", config.gap_size),
        ("gravity", config.gravity),
        ("jump_impulse", config.jump_impulse),
        ("pipe_speed", config.pipe_speed),
        ("pipe_add_interval_ms", config.pipe_add_interval_ms),
        ("ground_height", config.ground_height),
        ("bird_width", config.bird_width),
        ("bird_height", config.bird_height),
    ];
    for (name, value) in positive {
        if value <= 0.0 {
            return Err(ConfigError::NonPositive { name, value });
        }
    }

    // The random gap offset lives in [GAP_MARGIN, screen_height - gap_size -
    // GAP_MARGIN]; an empty range means no pipe can ever spawn.
    if config.gap_size + 2.0 * GAP_MARGIN > config.screen_height {
        return Err(ConfigError::GapTooLarge {
            gap_size: config.gap_size,
            screen_height: config.screen_height,
        });
    }

    if config.ground_height >= config.screen_height {
        return Err(ConfigError::GroundTooTall {
            ground_height: config.ground_height,
            screen_height: config.screen_height,
        });
    }

    let bird_right = config.bird_x + config.bird_width;
    if config.pipe_initial_x <= bird_right {
        return Err(ConfigError::SpawnBehindBird {
            pipe_initial_x: config.pipe_initial_x,
            bird_right,
        });
    }

    Ok(())
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn initial_bird(config: &Config) -> Bird {
    Bird {
        x: config.bird_x,
        y: config.screen_height / 2.0,
        velocity: 0.0,
        width: config.bird_width,
        height: config.bird_height,
    }
}

/// Build the initial session state, failing fast on a bad configuration.
pub fn init_session(config: Config) -> Result<GameSession, ConfigError> {
    validate_config(&config)?;
    Ok(GameSession {
        bird: initial_bird(&config),
        pipes: Vec::new(),
        ground: Ground {
            y: config.screen_height - config.ground_height,
        },
        score: 0,
        status: GameStatus::Playing,
        spawn_timer_ms: 0.0,
        frame: 0,
        config,
    })
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Flap: set the bird's velocity to the upward impulse, overriding whatever
/// it was.  No-op unless Playing.
pub fn jump(state: &GameSession) -> GameSession {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    GameSession {
        bird: Bird {
            velocity: -state.config.jump_impulse,
            ..state.bird.clone()
        },
        ..state.clone()
    }
}

/// Start a fresh run: new bird, no pipes, score 0, spawn clock at zero.
/// Only GameOver can transition back to Playing, so this is a no-op while a
/// run is in progress.
pub fn restart(state: &GameSession) -> GameSession {
    if state.status != GameStatus::GameOver {
        return state.clone();
    }
    GameSession {
        bird: initial_bird(&state.config),
        pipes: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        spawn_timer_ms: 0.0,
        frame: 0,
        ..state.clone()
    }
}

/// Bounds of the retry control on the game-over screen, in game units.  The
/// renderer draws it here and the input layer tests pointer clicks against it.
pub fn retry_button_rect(config: &Config) -> Rect {
    Rect {
        x: (config.screen_width - RETRY_BUTTON_WIDTH) / 2.0,
        y: config.screen_height / 2.0 + 20.0,
        width: RETRY_BUTTON_WIDTH,
        height: RETRY_BUTTON_HEIGHT,
    }
}

pub enum CommandOutcome {
    Continue(GameSession),
    Quit,
}

/// The reactive state machine: apply one abstract input command.  Pointer
/// clicks count as a restart only on the game-over screen and only inside the
/// retry control.
pub fn apply_command(state: &GameSession, command: Command) -> CommandOutcome {
    match command {
        Command::Jump => CommandOutcome::Continue(jump(state)),
        Command::Restart => CommandOutcome::Continue(restart(state)),
        Command::PointerClick { x, y } => {
            if state.status == GameStatus::GameOver
                && retry_button_rect(&state.config).contains(x, y)
            {
                CommandOutcome::Continue(restart(state))
            } else {
                CommandOutcome::Continue(state.clone())
            }
        }
        Command::Quit => CommandOutcome::Quit,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

fn spawn_pipe(config: &Config, rng: &mut impl Rng) -> Pipe {
    let max_offset = config.screen_height - config.gap_size - GAP_MARGIN;
    Pipe {
        x: config.pipe_initial_x,
        height: rng.gen_range(GAP_MARGIN..=max_offset),
        passed: false,
    }
}

/// Advance the simulation by one frame.  A GameOver session is returned
/// unchanged — positions, pipes and score stay frozen until a restart.
pub fn tick(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let config = &state.config;
    let frame = state.frame + 1;

    // ── 1. Bird physics: gravity into velocity, velocity into position ───────
    let velocity = state.bird.velocity + config.gravity;
    let bird = Bird {
        y: state.bird.y + velocity,
        velocity,
        ..state.bird.clone()
    };

    // ── 2. Spawn clock ───────────────────────────────────────────────────────
    // Accumulator stands in for the original repeating timer: subtracting the
    // interval on fire keeps the long-run cadence exact.
    let mut spawn_timer_ms = state.spawn_timer_ms + TICK_MS;
    let mut pipes = state.pipes.clone();
    while spawn_timer_ms >= config.pipe_add_interval_ms {
        spawn_timer_ms -= config.pipe_add_interval_ms;
        pipes.push(spawn_pipe(config, rng));
    }

    // ── 3. Advance pipes ─────────────────────────────────────────────────────
    for pipe in &mut pipes {
        pipe.x -= config.pipe_speed;
    }

    // ── 4. Retire pipes fully past the left edge ─────────────────────────────
    pipes.retain(|p| p.x > -config.pipe_width);

    // ── 5. Ground collision ──────────────────────────────────────────────────
    // No ceiling check: the bird may fly above the screen and come back.
    let ground_hit = bird.y + bird.height > state.ground.y;

    // ── 6. Pass-through scoring ──────────────────────────────────────────────
    let mut score = state.score;
    for pipe in &mut pipes {
        if !pipe.passed && pipe.x + config.pipe_width < bird.x {
            pipe.passed = true;
            score += 1;
        }
    }

    // ── 7. Pipe collision ────────────────────────────────────────────────────
    let pipe_hit = pipes.iter().any(|pipe| {
        bird.x + bird.width > pipe.x
            && bird.x < pipe.x + config.pipe_width
            && (bird.y < pipe.height || bird.y + bird.height > pipe.height + config.gap_size)
    });

    let status = if ground_hit || pipe_hit {
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameSession {
        bird,
        pipes,
        score,
        status,
        spawn_timer_ms,
        frame,
        ..state.clone()
    }
}
