mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use flappy_game::compute::{apply_command, init_session, tick, CommandOutcome};
use flappy_game::entities::{Command, Config, GameSession, GameStatus};

use display::Viewport;

/// One physics step per frame at 60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Translate one raw terminal event into an abstract command.  Mouse cells
/// are converted to game units here so the core never sees terminal
/// coordinates.
fn map_event(ev: &Event, viewport: &Viewport) -> Option<Command> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char(' ') | KeyCode::Up => Some(Command::Jump),
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            let (x, y) = viewport.game_pos(*column, *row);
            Some(Command::PointerClick { x, y })
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    mut session: GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    let mut viewport = Viewport::new(
        session.config.screen_width,
        session.config.screen_height,
        cols,
        rows,
    );

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                viewport = Viewport::new(
                    session.config.screen_width,
                    session.config.screen_height,
                    cols,
                    rows,
                );
                continue;
            }
            if let Some(command) = map_event(&ev, &viewport) {
                match apply_command(&session, command) {
                    CommandOutcome::Continue(next) => session = next,
                    CommandOutcome::Quit => return Ok(()),
                }
            }
        }

        if session.status == GameStatus::Playing {
            session = tick(&session, &mut rng);
        }

        display::render(out, &session, &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Fail fast on a bad configuration, before touching the terminal.
    let session = match init_session(Config::default()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    // The retry control is clickable, so mouse reporting is on for the whole
    // session.
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, session, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
