mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::input::{self, Flow};
use app::App;
use crate::core::actions::button_labels;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use system::{CrosstermEvents, EventSource, TerminalModes};
use ui::render;
use utils::error::Result;

/// 유휴 틱 간격 (틱당 이벤트 하나 폴링)
const TICK_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new();
    let mut events = CrosstermEvents;
    let mut modes = TerminalModes::new();

    // Run app
    let res = run_app(&mut terminal, &mut app, &mut events, &mut modes);

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

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut CrosstermEvents,
    modes: &mut TerminalModes,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            app.layout.update(f.area(), button_labels());
            app.sync_panel_viewports();
            render::draw_main(f, app);
        })?;

        // 틱당 이벤트 하나. 다이얼로그 세션이 열리면 handle_event 안에서
        // 세션이 종결될 때까지 블로킹으로 이벤트를 소비한다.
        if let Some(event) = events.poll_event(TICK_INTERVAL)? {
            if input::handle_event(app, terminal, events, modes, event)? == Flow::Quit {
                app.quit();
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
