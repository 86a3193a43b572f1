//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode,
//!   mouse capture, bracketed paste).
//! - Drive a single event loop that handles input and ticks.
//! - Broadcast left pointer-downs to UI event bus subscribers, then route
//!   input to the focused components and execute returned `Effect`s.
//! - After each draw, run the next-frame tasks the draw made due.
//!
//! Event Loop Strategy
//! - A dedicated input task blocks on `crossterm::event::read()` and forwards
//!   events over a channel.
//! - Smart ticking: fast interval (100 ms) only while the thank-you countdown
//!   runs; long interval (5 s) otherwise.
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, KeyCode,
        KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use feedback_types::{Effect, Msg, Route};
use ratatui::{Terminal, prelude::*};
use std::time::{Duration, Instant};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::TuiConfig;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

/// Spawn a dedicated input task that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Mouse moves are throttled to one per 16 ms; they only drive hover
/// highlighting. The task ends once the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    let mut last_mouse_move = Instant::now();

    tokio::task::spawn_blocking(move || {
        let sixteen_ms = Duration::from_millis(16);
        loop {
            if sender.is_closed() {
                break;
            }
            match event::poll(sixteen_ms) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!("Failed to poll for events: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < sixteen_ms {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(e) = sender.blocking_send(event) {
                        warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draws a frame, then runs the next-frame tasks the draw made due.
fn render(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
) -> Result<Vec<Effect>> {
    // Rebuild focus just before rendering so structure changes are reflected
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(main_view.run_frame_tasks(app))
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Key(_) => Vec::new(),
        Event::Mouse(mouse_event) => {
            let mut effects = Vec::new();
            if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) {
                effects.extend(main_view.broadcast_pointer_down(app, mouse_event.column, mouse_event.row));
            }
            effects.extend(main_view.handle_mouse_events(app, mouse_event));
            effects
        }
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Paste(text) => main_view.handle_paste(app, &text),
        Event::FocusGained | Event::FocusLost => Vec::new(),
    }
}

/// Executes effects until none are left. Returns `true` when anything ran.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: &mut Vec<Effect>) -> bool {
    let mut ran = false;
    while !effects.is_empty() {
        ran = true;
        // move effects out of their Vec to avoid processing new effects while processing current ones
        let current = std::mem::take(effects);
        for effect in current {
            match effect {
                Effect::SwitchTo(route) => {
                    effects.extend(main_view.switch_route(app, route));
                }
                Effect::FeedbackSubmitted { kind, value } => {
                    info!(kind = %kind, value = %value, "feedback submitted");
                    effects.push(Effect::SwitchTo(Route::ThankYou));
                }
            }
        }
    }
    ran
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(config: TuiConfig) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut app = App::new(&config);
    let mut main_view = MainView::default();
    let mut effects = main_view.switch_route(&mut app, Route::Home);

    let mut terminal = setup_terminal()?;
    if let Ok(size) = terminal.size() {
        app.update(&Msg::Resize(size.width, size.height));
    }

    // Ticking strategy: fast while counting down, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    effects.extend(render(&mut terminal, &mut app, &mut main_view)?);

    let result = loop {
        let mut needs_render = process_effects(&mut app, &mut main_view, &mut effects);

        let target_interval = if app.needs_fast_ticks() { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; break out to shut down cleanly.
                    break Ok(());
                };
                if let Event::Key(key_event) = &event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break Ok(());
                }
                effects.extend(handle_input_event(&mut app, &mut main_view, event));
                needs_render = true;
            }

            // Periodic tick
            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(&mut app, &Msg::Tick));
                needs_render |= app.needs_fast_ticks() || !effects.is_empty();
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break Ok(()); }
        }

        needs_render |= process_effects(&mut app, &mut main_view, &mut effects);
        if needs_render {
            match render(&mut terminal, &mut app, &mut main_view) {
                Ok(frame_effects) => effects.extend(frame_effects),
                Err(error) => break Err(error),
            }
        }
    };

    app.feedback.type_select.teardown(&mut app.events);
    cleanup_terminal(&mut terminal)?;
    result
}
