//! LUMEN
//!
//! Audio-reactive terminal visual display: captures the default input,
//! extracts per-frame features, and rotates through procedural effects
//! with a glitching text/logo overlay.

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lumen_analysis::Analyzer;
use lumen_audio::{CaptureEngine, CaptureEvent, Sampler};
use lumen_config::{Config, Logo};
use lumen_input::InputHandler;
use lumen_tui::{CanvasWidget, Painter, Session};

/// Frame rate for the render loop
const FPS: u64 = 30;

fn main() -> anyhow::Result<()> {
    init_logging();

    // Config and logo load independently of the capture acquisition;
    // both degrade to defaults rather than aborting startup.
    let config = Config::load();
    let logo = load_logo(&config);

    // Fatal-to-feature: without a capture stream there is nothing to
    // visualize. Report and leave without panicking.
    let (engine, mut sampler) = match CaptureEngine::start() {
        Ok(pair) => pair,
        Err(err) => {
            error!(%err, "visualization cannot start");
            eprintln!("lumen: {err}");
            return Ok(());
        }
    };
    info!(sample_rate = engine.sample_rate(), "capture stream running");

    // Initialize terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut terminal, &engine, &mut sampler, &config, logo);

    // Cleanup: restore the terminal, then drop the engine to release
    // the input stream.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    drop(engine);

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    engine: &CaptureEngine,
    sampler: &mut Sampler,
    config: &Config,
    logo: Option<Logo>,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let mut painter = Painter::new(size.width, size.height);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut session = Session::new(config, logo, seed);
    let mut analyzer = Analyzer::new();
    let input = InputHandler::new();

    let frame_duration = Duration::from_millis(1000 / FPS);
    let start = Instant::now();
    let mut quit = false;

    while !quit {
        let frame_start = Instant::now();
        let now = start.elapsed().as_millis() as u64;

        while let Some(CaptureEvent::Error(msg)) = engine.try_event() {
            warn!(%msg, "capture stream error");
        }

        // Until the first full window arrives the frame is skipped;
        // the loop stays alive.
        if let Some(window) = sampler.pull() {
            let mut frame = analyzer.begin_frame(window);
            session.render_frame(&mut frame, &mut painter, now);
        }

        terminal.draw(|f| f.render_widget(CanvasWidget::new(&painter), f.area()))?;

        // Input gets whatever is left of the frame budget
        let timeout = frame_duration.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = input.handle_key(key) {
                        let at = start.elapsed().as_millis() as u64;
                        quit = session.handle_command(command, at);
                    }
                }
                Event::Resize(cols, rows) => painter.resize(cols, rows),
                _ => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }

    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the canvas
fn init_logging() {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumen");
    let _ = std::fs::create_dir_all(&dir);
    let Ok(file) = std::fs::File::create(dir.join("lumen.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Degraded-feature path: a missing or broken image only disables the
/// logo subsystem
fn load_logo(config: &Config) -> Option<Logo> {
    if !config.logo.enabled {
        return None;
    }
    let path = config.logo.image_path(&Config::config_dir());
    match Logo::load(&path) {
        Ok(logo) => {
            info!(path = %path.display(), "logo loaded");
            Some(logo)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "logo disabled");
            None
        }
    }
}
