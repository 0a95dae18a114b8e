//! Keyboard input handling for the TUI.
//!
//! Overlays (help, confirmations) take keys first, then the active page.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use stockroom_core::Route;

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};
use crate::forms::{CredentialsFocus, CredentialsKind, ProductFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => {
            handle_search_input(app, key);
            return Ok(false);
        }
        AppState::Normal | AppState::Quitting => {}
    }

    match app.route {
        Route::Login | Route::Register => handle_credentials_input(app, key),
        Route::Products => handle_products_input(app, key),
        Route::NewProduct | Route::EditProduct(_) => handle_product_form_input(app, key),
        Route::Home => {}
    }
    Ok(false)
}

fn handle_credentials_input(app: &mut App, key: KeyEvent) {
    let form = match app.route {
        Route::Register => &mut app.register_form,
        _ => &mut app.login_form,
    };
    if form.submitting {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('r') if ctrl && form.kind == CredentialsKind::Login => {
            app.go(Route::Register);
        }
        KeyCode::Char('l') if ctrl && form.kind == CredentialsKind::Register => {
            app.go(Route::Login);
        }
        KeyCode::Char('?') if form.focus == CredentialsFocus::Button => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Down | KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            CredentialsFocus::Username | CredentialsFocus::Password => {
                form.focus = form.focus.next();
            }
            CredentialsFocus::Button => match form.kind {
                CredentialsKind::Login => app.submit_login(),
                CredentialsKind::Register => app.submit_register(),
            },
        },
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !ctrl => form.push_char(c),
        _ => {}
    }
}

fn handle_products_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('/') => app.state = AppState::Searching,
        KeyCode::Esc => app.clear_search(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(1),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::Home | KeyCode::Char('g') => app.selection = 0,
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('n') => app.go(Route::NewProduct),
        KeyCode::Enter | KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Delete | KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('r') => app.refresh_products(),
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.state = AppState::Normal,
        KeyCode::Esc => {
            app.clear_search();
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Down => app.select_next(1),
        KeyCode::Up => app.select_prev(1),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_product_form_input(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go(Route::Products);
        return;
    }

    let form = &mut app.product_form;
    if form.submitting || form.loading {
        return;
    }

    match key.code {
        KeyCode::Down | KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::Up | KeyCode::BackTab => form.focus = form.focus.prev(),
        KeyCode::Enter => match form.focus {
            ProductFocus::Save => app.submit_product(),
            ProductFocus::Cancel => app.go(Route::Products),
            _ => form.focus = form.focus.next(),
        },
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}
