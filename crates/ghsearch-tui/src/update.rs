//! TUI reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)` and
//! executes the returned effects.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ghsearch_core::search::{Applied, SearchCommand};
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            app.results.expire_press(Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            let layout = render::layout(Rect::new(0, 0, width, height));
            app.results.body = layout.body;
            app.results.clamp(app.search.results().len());
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::SearchCompleted { id, outcome } => {
            if app.search.on_completed(id, outcome) == Applied::Results {
                app.results.reset();
            }
            vec![]
        }
    }
}

fn to_effects(commands: Vec<SearchCommand>) -> Vec<UiEffect> {
    commands.into_iter().map(UiEffect::from).collect()
}

/// Tears down the search widget and quits.
fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = to_effects(app.search.unmount());
    effects.push(UiEffect::Quit);
    effects
}

/// Pushes the current input text through the search state machine.
fn input_changed(app: &mut AppState) -> Vec<UiEffect> {
    let commands = app.search.on_input(app.input.text(), app.debounce);
    if app.search.results().is_empty() {
        app.results.reset();
    }
    to_effects(commands)
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            app.input.insert_str(&text);
            input_changed(app)
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let len = app.search.results().len();
    match key.code {
        KeyCode::Esc => quit(app),
        KeyCode::Char('c') if ctrl => quit(app),
        KeyCode::Up => {
            app.results.select_prev();
            vec![]
        }
        KeyCode::Char('p') if ctrl => {
            app.results.select_prev();
            vec![]
        }
        KeyCode::Down => {
            app.results.select_next(len);
            vec![]
        }
        KeyCode::Char('n') if ctrl => {
            app.results.select_next(len);
            vec![]
        }
        KeyCode::Enter => open_selected(app),
        _ => {
            if app.input.input(key) {
                input_changed(app)
            } else {
                vec![]
            }
        }
    }
}

fn open_selected(app: &AppState) -> Vec<UiEffect> {
    app.selected_user()
        .map(|user| UiEffect::OpenBrowser {
            url: user.profile_url(),
        })
        .into_iter()
        .collect()
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let len = app.search.results().len();
    match mouse.kind {
        MouseEventKind::Moved => {
            let row = app.results.row_at(mouse.column, mouse.row, len);
            app.results.hover(row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(row) = app.results.row_at(mouse.column, mouse.row, len) {
                app.results.select(row, len);
                app.results.press(row, Instant::now());
            }
        }
        MouseEventKind::ScrollUp => app.results.select_prev(),
        MouseEventKind::ScrollDown => app.results.select_next(len),
        _ => {}
    }
    vec![]
}
