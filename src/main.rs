use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use leaktop::app::App;
use leaktop::config::{self, load_config, load_config_from_path};
use leaktop::event::{Event, EventHandler};
use leaktop::ui;

#[derive(Parser)]
#[command(
    name = "leaktop",
    about = "Find the process leaking memory: a live ranked view of per-process growth"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval: Option<u64>,

    /// Number of ranked rows to keep per poll
    #[arg(long)]
    top: Option<usize>,

    /// Memory accuracy: resident or proportional
    #[arg(long)]
    memory_mode: Option<String>,

    /// Baseline policy: advancing (growth per poll) or fixed (growth since start)
    #[arg(long)]
    reference: Option<String>,

    /// Write per-poll tracing spans to this file as JSON lines.
    #[arg(long)]
    trace_log: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &cli.trace_log {
        init_trace(path)?;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();
    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.poll_interval_ms);
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        if let Some(event) = events.next().await {
            let mut should_draw = false;
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                        should_draw = true;
                    }
                }
                Event::Tick => {
                    app.on_tick();
                    should_draw = true;
                }
                Event::Resize => {
                    should_draw = true;
                }
            }
            if should_draw {
                terminal.draw(|frame| ui::draw(frame, &app))?;
            }
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval {
        config.general.poll_interval_ms = interval;
    }
    if let Some(top) = cli.top {
        config.general.top_n = top;
    }
    if let Some(ref mode) = cli.memory_mode {
        config.general.memory_mode = mode.clone();
    }
    if let Some(ref policy) = cli.reference {
        config.general.reference_policy = policy.clone();
    }

    config
}

fn init_trace(path: &std::path::Path) -> Result<()> {
    #[cfg(not(feature = "trace-polls"))]
    {
        let _ = path;
        Err(color_eyre::eyre::eyre!(
            "--trace-log requires the `trace-polls` feature; run with `cargo run --features trace-polls -- --trace-log <path>`"
        ))
    }

    #[cfg(feature = "trace-polls")]
    {
        leaktop::trace::init_tracing_json(path)
    }
}
