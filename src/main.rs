mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use spelling_bees::{
    app::{App, Banner, Settings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{AppEvent, CrosstermEventSource, FrameClock, Runner},
    FileHighScoreStore, HighScoreStore, WordCatalog,
};

use crate::ui::GameView;

const TICK_RATE_MS: u64 = 50;
const LOG_ENV: &str = "SPELLING_BEES_LOG";

/// spell the word behind the pictogram, one letter-bee at a time
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal spelling game. Type the word for the picture; every correct leading letter sends its bee flying. Keep the streak going to beat your best."
)]
pub struct Cli {
    /// built-in catalog name or path to a catalog JSON file
    #[clap(short = 'c', long)]
    catalog: Option<String>,

    /// list the built-in catalogs and exit
    #[clap(long)]
    list_catalogs: bool,

    /// skip the bee animation and show the result right away
    #[clap(long)]
    no_celebrate: bool,

    /// do not show the attempt counter
    #[clap(long)]
    hide_attempts: bool,

    /// remember the effective settings for next time
    #[clap(long)]
    save_config: bool,

    /// forget the stored best streak before playing
    #[clap(long)]
    reset_high_score: bool,

    /// where to write logs (level via SPELLING_BEES_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Command line flags win over the stored config.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if self.no_celebrate {
            config.celebrate = false;
        }
        if self.hide_attempts {
            config.show_attempts = false;
        }
        config
    }
}

fn init_tracing(log_file: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file.or_else(AppDirs::log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_catalogs {
        for name in WordCatalog::builtin_names() {
            println!("{name}");
        }
        return Ok(());
    }

    // the game plays fine without a log
    if let Err(e) = init_tracing(cli.log_file.clone()) {
        eprintln!("spelling-bees: logging disabled: {e}");
    }

    let config_store = FileConfigStore::new();
    let config = cli.apply_to(config_store.load());
    if cli.save_config {
        config_store.save(&config)?;
    }

    let catalog = match WordCatalog::load(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };

    let store = FileHighScoreStore::new();
    if cli.reset_high_score {
        store.save(0)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let settings = Settings {
        celebrate: config.celebrate,
        show_attempts: config.show_attempts,
    };
    let mut app = App::new(catalog, store, settings);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, S: HighScoreStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FrameClock::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| f.render_widget(GameView(&*app), f.area()))?;

    while !app.should_quit {
        let animating = app.swarm.is_active() || app.banner != Banner::Hidden;
        if let AppEvent::Tick(_) = runner.step_game(&mut *app) {
            if !animating {
                continue;
            }
        }
        terminal.draw(|f| f.render_widget(GameView(&*app), f.area()))?;
    }

    Ok(())
}
