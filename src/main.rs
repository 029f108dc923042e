use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::clock::TickClock;
use grid_snake::error::AppError;
use grid_snake::input::InputHandler;
use grid_snake::logging::init_file_logging;
use grid_snake::renderer;
use grid_snake::session::{Phase, Session};
use grid_snake::settings::{Settings, SettingsLayer, load_layer};
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::ui::PALETTE_CLASSIC;
use grid_snake::ui::hud::HudInfo;
use tracing::info;

/// Upper bound on how long one frame waits for input.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a fixed grid, for a short break")]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config dir when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Playfield width in pixels; a multiple of the cell size.
    #[arg(long)]
    width: Option<u32>,

    /// Playfield height in pixels; a multiple of the cell size.
    #[arg(long)]
    height: Option<u32>,

    /// Grid step in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Segments the snake starts with.
    #[arg(long = "body-length")]
    body_length: Option<u32>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Append tracing output to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the resolved settings as JSON and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsLayer {
        SettingsLayer {
            grid_width: self.width,
            grid_height: self.height,
            cell_size: self.cell_size,
            initial_body_length: self.body_length,
            tick_interval_ms: self.tick_ms,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let layer = load_layer(cli.config.as_deref())?.merged(cli.overrides());
    let settings = Settings::resolve(layer)?;

    if cli.print_config {
        let json = serde_json::to_string_pretty(&settings)?;
        println!("{json}");
        return Ok(());
    }

    let session = match settings.seed {
        Some(seed) => Session::with_seed(settings.engine, seed)?,
        None => Session::new(settings.engine)?,
    };
    info!(?settings, "starting session");

    play(session, &settings)
}

fn play(mut session: Session, settings: &Settings) -> Result<(), AppError> {
    let mut terminal_session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut clock = TickClock::new(settings.tick_interval(), Instant::now());
    clock.pause();

    loop {
        let hud_info = HudInfo {
            tick_interval: clock.interval(),
            games_started: session.games_started(),
            palette: &PALETTE_CLASSIC,
        };
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session, hud_info))?;

        let wait = clock
            .until_next(Instant::now())
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(wait)?
            && let Some(phase) = session.handle_input(game_input)
        {
            sync_clock(&mut clock, phase);
        }

        if session.should_quit() {
            break;
        }

        if clock.poll(Instant::now())
            && let Some(phase) = session.tick()
        {
            sync_clock(&mut clock, phase);
        }
    }

    info!(
        games = session.games_started(),
        last_score = session.state().score,
        "session finished"
    );
    Ok(())
}

/// The clock only runs while a game is actually being played.
fn sync_clock(clock: &mut TickClock, phase: Phase) {
    if phase == Phase::Playing {
        clock.resume(Instant::now());
    } else {
        clock.pause();
    }
}
