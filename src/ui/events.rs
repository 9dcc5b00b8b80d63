// Event handling and main UI loop

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, BufRead, Stdout, Write};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::{self, EncoderKind, IMAGE_EXTENSIONS};
use crate::ui::Dashboard;
use crate::ui::state::{StatusKind, UiState};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// What the main loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Convert,
    Rescan,
}

pub fn run_ui(config: &Config) -> io::Result<()> {
    let mut state = UiState::new(config);

    // Probe before entering raw mode; it spawns ffmpeg
    if config.encoding.use_gpu {
        state.gpu_available = Some(engine::encoder_available(
            &config.ffmpeg_path,
            EncoderKind::Gpu.codec(),
        ));
    }
    rescan(&mut state, config);

    let mut terminal = enter_terminal()?;
    let result = run_app(&mut terminal, &mut state, config);

    // Restore the terminal even when the loop failed
    let restored = leave_terminal(&mut terminal);
    result.and(restored)
}

fn enter_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn leave_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn run_app(terminal: &mut Tui, state: &mut UiState, config: &Config) -> io::Result<()> {
    loop {
        terminal.draw(|frame| Dashboard::render(frame, state, config))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            // Resize and friends just trigger a redraw
            continue;
        };

        match handle_key(key, state) {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Rescan => rescan(state, config),
            Action::Convert => convert_selected(terminal, state, config)?,
        }
    }
}

/// Apply a key press to `state` and report what the loop must do next
pub fn handle_key(key: KeyEvent, state: &mut UiState) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Rescan,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => Action::Convert,
        KeyCode::Tab => {
            state.next_section();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            Action::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.cycle(false);
            Action::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.cycle(true);
            Action::None
        }
        _ => Action::None,
    }
}

fn rescan(state: &mut UiState, config: &Config) {
    match engine::scan_render_folders(&config.renders_folder, IMAGE_EXTENSIONS) {
        Ok(folders) => {
            let count = folders.len();
            debug!("Scan found {} render folders", count);
            state.set_folders(folders);
            state.set_status(StatusKind::Info, format!("Found {} render folders", count));
        }
        Err(e) => {
            warn!("Scan failed: {}", e);
            state.set_folders(Vec::new());
            state.set_status(StatusKind::Error, format!("Scan failed: {}", e));
        }
    }
}

/// Suspend the TUI and run the conversion in the plain terminal so ffmpeg's
/// progress output stays visible
fn convert_selected(terminal: &mut Tui, state: &mut UiState, config: &Config) -> io::Result<()> {
    if state.folders.is_empty() {
        state.set_status(StatusKind::Error, "No folders available");
        return Ok(());
    }
    let Some(request) = state.conversion_request() else {
        state.set_status(StatusKind::Error, "No folder selected");
        return Ok(());
    };

    leave_terminal(terminal)?;

    let result = engine::convert(config, &request);
    if let Err(e) = &result {
        eprintln!("Error: {}", error_chain(e));
    }
    print!("\nPress Enter to return...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    rescan(state, config);
    match result {
        Ok(path) => state.set_status(StatusKind::Success, format!("Saved {}", path.display())),
        Err(e) => state.set_status(
            StatusKind::Error,
            format!("Conversion failed: {}", error_chain(&e)),
        ),
    }
    Ok(())
}

/// Error message followed by its causes, `: `-separated like anyhow's `{:#}`
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
