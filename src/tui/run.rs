use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::core::loader::FrameLoader;
use crate::core::source::FrameSource;
use crate::core::spinner::{FrameSpinner, PointerEvent};
use crate::core::surface::PixelSurface;
use crate::tui::app::App;
use crate::tui::async_bridge::{AsyncBridge, AsyncRequest, AsyncResponse};
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::ui;

/// Poll cadence; matches the demo rotation interval so demo steps never
/// wait on a slower tick.
const TICK_RATE: Duration = Duration::from_millis(25);

pub fn run(sources: Vec<FrameSource>, demo: bool, max_attempts: u32) -> Result<()> {
    // Validate before touching the terminal so the error prints normally.
    let spinner = FrameSpinner::new(sources, PixelSurface::new(0, 0), demo)?;

    let (request_tx, request_rx) = mpsc::channel::<AsyncRequest>(32);
    let (response_tx, response_rx) = mpsc::channel::<AsyncResponse>(32);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(spinner, request_tx.clone());
    app.start_loading();

    let bridge = AsyncBridge::new(request_rx, response_tx, FrameLoader::new(max_attempts));
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(bridge.run());
    });

    let event_handler = EventHandler::new(TICK_RATE);

    // Response receiver needs to be checked without blocking
    let mut response_rx = response_rx;

    let result = run_loop(&mut terminal, &mut app, &event_handler, &mut response_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    response_rx: &mut mpsc::Receiver<AsyncResponse>,
) -> Result<()> {
    while !app.should_quit {
        // Draw
        terminal.draw(|f| ui::draw(f, app))?;

        // Check for async responses (non-blocking)
        while let Ok(response) = response_rx.try_recv() {
            app.handle_async_response(response);
        }

        // Handle events
        match event_handler.next()? {
            AppEvent::Key(key) => handle_key_event(app, key),
            AppEvent::Mouse(mouse) => handle_mouse_event(app, mouse),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
        }
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: crossterm::event::KeyEvent) {
    use crossterm::event::KeyCode::*;

    // Global quit with Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == Char('c') {
        app.quit();
        return;
    }

    match key.code {
        Char('q') | Esc => app.quit(),
        Left | Char('h') => app.step(-1),
        Right | Char('l') => app.step(1),
        Char('d') => app.restart_demo(),
        _ => {}
    }
}

/// Left-button presses and drags anywhere in the terminal drive the spinner;
/// the drag keeps tracking until the button is released, so motion never
/// "escapes" the widget mid-gesture.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column as i32;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer(PointerEvent::Down { x }),
        MouseEventKind::Drag(MouseButton::Left) => app.pointer(PointerEvent::MoveTo { x }),
        MouseEventKind::Up(MouseButton::Left) => app.pointer(PointerEvent::Up),
        _ => {}
    }
}
