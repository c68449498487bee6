use anyhow::{Context, Result};
use clap::Parser;
use common::{default_snake_colors, GameEngine, SnakeColor, Speed};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::app::{App, AppCommand};

#[derive(Parser, Debug)]
#[command(
    name = "snakebattle-terminal",
    about = "Watch two AI snakes battle for food in the terminal"
)]
struct Args {
    /// Tick speed: slow | normal | fast, or 150 / 100 / 50 (ms)
    #[arg(long, default_value = "normal")]
    speed: Speed,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Colour of snake Alpha: palette name or #rrggbb
    #[arg(long)]
    color_a: Option<SnakeColor>,

    /// Colour of snake Beta: palette name or #rrggbb
    #[arg(long)]
    color_b: Option<SnakeColor>,

    /// Write logs to this file (the terminal itself is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Start the first battle immediately
    #[arg(long)]
    autostart: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let [default_a, default_b] = default_snake_colors();
    let colors = [
        args.color_a.unwrap_or(default_a),
        args.color_b.unwrap_or(default_b),
    ];
    info!(seed, speed = %args.speed, "Starting Snake Battle");

    let mut app = App::new(GameEngine::new_with_settings(seed, args.speed, colors));
    if args.autostart {
        app.handle_command(AppCommand::StartGame)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    let snapshot = app.engine.snapshot();
    info!(scores = ?snapshot.scores(), tick = snapshot.tick, "Exiting");
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_update = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_update);
        last_update = now;

        app.update(dt)?;

        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(16))? {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_input(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => None,
            };

            match command {
                Some(AppCommand::Quit) => return Ok(()),
                Some(command) => app.handle_command(command)?,
                None => {}
            }
        }
    }
}
