// sortty: instrumented sorting algorithms replayed as terminal bar animations

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use sortty::algorithms::{Algorithm, UnknownAlgorithm};
use sortty::config::{self, ArrayConfig};
use sortty::controller::RunController;
use sortty::playback::{self, BarRow, SpeedError, SpeedLevel};
use sortty::ui::App;

#[derive(Parser, Debug)]
#[command(name = "sortty", version, about = "Watch sorting algorithms compare and move values")]
struct Cli {
    /// Algorithm: bubble, selection, insertion, quick or merge
    #[arg(short, long, default_value = "bubble", value_parser = parse_algorithm)]
    algorithm: Algorithm,

    /// Playback speed level: 5, 10, ..., 50
    #[arg(short, long, default_value = "25", value_parser = parse_speed)]
    speed: SpeedLevel,

    /// Number of generated values
    #[arg(long, default_value_t = config::DEFAULT_LEN)]
    len: usize,

    /// Smallest generated value
    #[arg(long, default_value_t = config::DEFAULT_MIN)]
    min: u32,

    /// Largest generated value
    #[arg(long, default_value_t = config::DEFAULT_MAX)]
    max: u32,

    /// Seed for reproducible arrays
    #[arg(long)]
    seed: Option<u64>,

    /// Comma separated values to sort instead of a random array
    #[arg(long, value_delimiter = ',')]
    values: Option<Vec<u32>>,

    /// Sort once and print the result instead of opening the UI
    #[arg(long)]
    headless: bool,

    /// Print every recorded step (headless only)
    #[arg(long, requires = "headless")]
    dump: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, UnknownAlgorithm> {
    s.parse()
}

fn parse_speed(s: &str) -> Result<SpeedLevel, SpeedError> {
    s.parse()
}

fn init_logging(path: Option<&Path>, headless: bool) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match path {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // The TUI owns the terminal; only log to stderr without it
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run_headless(controller: &RunController, cli: &Cli) -> Result<(), Box<dyn Error>> {
    let input = controller.array().to_vec();
    let mut array = input.clone();
    let log = cli.algorithm.run(&mut array);

    if cli.dump {
        for (position, step) in log.iter().enumerate() {
            let (first, second, is_move, tag) = step.to_raw();
            println!("{:>5}  {:>3} {:>4} {:<5} {:?}", position, first, second, is_move, tag);
        }
    }

    let mut row = BarRow::from_values(&input);
    playback::replay(&log, &mut row)?;

    println!("Algorithm:   {}", cli.algorithm);
    println!("Input:       {:?}", input);
    println!("Sorted:      {:?}", array);
    println!(
        "Steps:       {} ({} comparisons, {} relocations)",
        log.len(),
        log.comparisons(),
        log.relocations()
    );
    println!(
        "Playback:    {} ms at speed {}",
        cli.speed.pace().span(log.len()).as_millis(),
        cli.speed
    );

    if row.values() != array {
        return Err("replayed display does not match the sorted array".into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), cli.headless)?;

    let array_config = match ArrayConfig::new(cli.len, cli.min, cli.max) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut controller = RunController::new(array_config, cli.seed);
    match &cli.values {
        Some(values) if values.contains(&0) => {
            eprintln!("Error: values must be positive");
            std::process::exit(1);
        }
        Some(values) => {
            controller.load(values.clone(), &mut BarRow::new());
        }
        None => {
            controller.generate(&mut BarRow::new());
        }
    }

    if cli.headless {
        return run_headless(&controller, &cli);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, cli.algorithm, cli.speed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
