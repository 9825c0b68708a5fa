use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::core::constants::{CONFIG_FILE, IDLE_POLL_MS, REALTIME_FRAME_MS};
use flappy::core::{FrameClock, GameConfig};
use flappy::game::{FlightInput, HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore, Session};
use flappy::input::{map_event, InputAction};
use flappy::ui::draw_ui;
use flappy::utils::build_info::version_line;
use flappy::utils::persistence::save_path;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

#[derive(Debug, Default, PartialEq, Eq)]
struct PlayOptions {
    seed: Option<u64>,
    no_save: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Play(PlayOptions),
    ResetBest,
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = PlayOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "reset-best" => return Ok(Command::ResetBest),
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--no-save" => options.no_save = true,
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown command: {}", other)),
        }
    }

    Ok(Command::Play(options))
}

fn print_help() {
    println!("Flappy - Terminal Flappy Bird\n");
    println!("Usage: flappy [options] [command]\n");
    println!("Commands:");
    println!("  reset-best     Forget the saved best score");
    println!("\nOptions:");
    println!("  --seed <n>     Use a fixed seed for pipe placement");
    println!("  --no-save      Do not read or write the best score");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!("\nControls: Space/Up/Enter or left click to flap, Q/Esc to quit.");
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let options = match parse_args(&args) {
        Ok(Command::Play(options)) => options,
        Ok(Command::ResetBest) => {
            JsonHighScoreStore::default_location()?.clear()?;
            println!("Best score cleared.");
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    let (config, config_warning) = match save_path(CONFIG_FILE) {
        Ok(path) => GameConfig::load_or_default(&path),
        Err(_) => (GameConfig::default(), None),
    };

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (store, store_warning) = if options.no_save {
        (None, None)
    } else {
        open_store(JsonHighScoreStore::default_location())
    };

    let save_error = match store {
        Some(store) => {
            let mut session = Session::new(config, store, rng);
            play(&mut session)?;
            session.last_save_error().map(str::to_string)
        }
        None => {
            let mut session = Session::new(config, MemoryHighScoreStore::default(), rng);
            play(&mut session)?;
            None
        }
    };

    for warning in [config_warning, store_warning].into_iter().flatten() {
        eprintln!("Warning: {}", warning);
    }
    if let Some(e) = save_error {
        eprintln!("Warning: {}", e);
    }
    Ok(())
}

/// An unusable save location means playing without a saved best score.
fn open_store(
    location: io::Result<JsonHighScoreStore>,
) -> (Option<JsonHighScoreStore>, Option<String>) {
    match location {
        Ok(store) => (Some(store), None),
        Err(e) => (None, Some(format!("Best score will not be saved: {}", e))),
    }
}

/// Set up the terminal, run the game, and always restore the terminal.
fn play<S: HighScoreStore>(session: &mut Session<S, StdRng>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, session);

    // Restore even when the game loop failed
    let _ = disable_raw_mode();
    let _ = terminal.backend_mut().execute(DisableMouseCapture);
    let _ = terminal.backend_mut().execute(LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run<S: HighScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut Session<S, StdRng>,
) -> io::Result<()> {
    let mut clock = FrameClock::new(Duration::from_millis(REALTIME_FRAME_MS));
    let idle_poll = Duration::from_millis(IDLE_POLL_MS);
    let mut play_area = Rect::default();

    loop {
        // Frames are only scheduled while flying
        let now = Instant::now();
        clock.follow(session.state().is_playing(), now);

        if clock.take_due(now) {
            session.tick();
        }

        terminal.draw(|frame| {
            play_area = draw_ui(frame, session.state(), session.config());
        })?;

        let timeout = clock
            .time_until_due(Instant::now())
            .unwrap_or(idle_poll);

        if event::poll(timeout)? {
            let event = event::read()?;
            match map_event(&event, play_area) {
                Some(InputAction::Quit) => return Ok(()),
                Some(InputAction::Flap) => {
                    session.handle_input(FlightInput::Flap);
                }
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("flappy")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_args_plays_with_defaults() {
        assert_eq!(
            parse_args(&args(&[])),
            Ok(Command::Play(PlayOptions::default()))
        );
    }

    #[test]
    fn test_seed_and_no_save() {
        assert_eq!(
            parse_args(&args(&["--seed", "42", "--no-save"])),
            Ok(Command::Play(PlayOptions {
                seed: Some(42),
                no_save: true,
            }))
        );
    }

    #[test]
    fn test_seed_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        let err = parse_args(&args(&["--seed", "abc"])).unwrap_err();
        assert!(err.contains("abc"));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_args(&args(&["reset-best"])), Ok(Command::ResetBest));
        assert_eq!(parse_args(&args(&["-v"])), Ok(Command::Version));
        assert_eq!(parse_args(&args(&["--help"])), Ok(Command::Help));
    }

    #[test]
    fn test_unusable_save_location_falls_back() {
        let missing = Err(io::Error::new(io::ErrorKind::NotFound, "no home"));
        let (store, warning) = open_store(missing);
        assert!(store.is_none());
        assert!(warning.unwrap().contains("no home"));

        let (store, warning) = open_store(Ok(JsonHighScoreStore::new("/tmp/best.json")));
        assert!(store.is_some());
        assert!(warning.is_none());
    }

    #[test]
    fn test_unknown_argument() {
        let err = parse_args(&args(&["--fly"])).unwrap_err();
        assert!(err.contains("--fly"));
    }
}
