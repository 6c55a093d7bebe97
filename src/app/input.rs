//! Key bindings, one handler per screen.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, AppState};

/// Apply `key` to the current screen. Returns `true` when the program
/// should exit.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c')) {
        app.quit();
        return true;
    }

    match app.state {
        AppState::Login(_) => handle_login_input(app, key.code, ctrl),
        AppState::Register(_) => handle_register_input(app, key.code),
        AppState::Menu { .. } => handle_menu_input(app, key.code, now),
        AppState::ResumePrompt { .. } => handle_resume_input(app, key.code, now),
        AppState::Playing => handle_playing_input(app, key.code, now),
        AppState::Paused { .. } | AppState::GameEnd { .. } => {
            handle_dialog_input(app, key.code, now)
        }
    }

    app.should_quit()
}

fn handle_login_input(app: &mut App, key: KeyCode, ctrl: bool) {
    match key {
        KeyCode::F(2) => app.open_register(),
        KeyCode::Char('r') if ctrl => app.open_register(),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => app.quit(),
        _ => edit_form(app, key),
    }
}

fn handle_register_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_register(),
        KeyCode::Esc => app.cancel_register(),
        _ => edit_form(app, key),
    }
}

fn edit_form(app: &mut App, key: KeyCode) {
    let (AppState::Login(form) | AppState::Register(form)) = &mut app.state else {
        return;
    };
    match key {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
        KeyCode::Backspace => form.pop(),
        KeyCode::Char(c) if !c.is_control() => form.push(c),
        _ => {}
    }
}

fn handle_menu_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(now),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_resume_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_resume(true, now),
        KeyCode::Char('n') | KeyCode::Char('N') => app.answer_resume(false, now),
        _ => {}
    }
}

fn handle_playing_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Esc => app.pause(),
        KeyCode::Enter => app.submit_answer(now),
        KeyCode::Backspace => app.pop_answer_char(),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == ' ' => {
            app.push_answer_char(c)
        }
        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            app.select_next()
        }
        KeyCode::Enter => app.confirm(now),
        KeyCode::Esc if matches!(app.state, AppState::Paused { .. }) => app.continue_game(now),
        KeyCode::Char('r') | KeyCode::Char('R') if matches!(app.state, AppState::GameEnd { .. }) => {
            app.retry(now)
        }
        _ => {}
    }
}
