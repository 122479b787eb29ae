//! Event handler for the TUI
//!
//! Routes key events to the open dialog, the entry form or the expense
//! table. Storage failures surface as error dialogs inside [`App`], so
//! handling a key never fails.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, FocusedPanel};
use super::dialogs::edit_row::EditAction;
use super::event::Event;
use super::views::form::FormField;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.expire_status(Instant::now()),
        Event::Resize => {}
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    if key.code == KeyCode::F(1) {
        app.open_dialog(ActiveDialog::Help);
        return;
    }

    match app.focused_panel {
        FocusedPanel::Table => handle_table_key(app, key),
        FocusedPanel::Form => handle_form_key(app, key),
    }
}

/// Handle keys while the expense table has focus
fn handle_table_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Tab | KeyCode::Char('a') | KeyCode::Char('i') => app.toggle_panel_focus(),

        KeyCode::Char('j') | KeyCode::Down => app.controller.table_mut().select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.controller.table_mut().select_prev(),
        KeyCode::Char('g') | KeyCode::Home => {
            let table = app.controller.table_mut();
            let first = if table.is_empty() { None } else { Some(0) };
            table.select(first);
        }
        KeyCode::Char('G') | KeyCode::End => {
            let table = app.controller.table_mut();
            let last = table.len().checked_sub(1);
            table.select(last);
        }
        KeyCode::Esc => app.controller.table_mut().select(None),

        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit_row(),
        KeyCode::Char('u') => app.request_update(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('D') => app.request_delete_all(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
}

/// Handle keys while the entry form has focus
fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Esc => {
            app.toggle_panel_focus();
            return;
        }
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        KeyCode::Down => {
            app.form.next_field();
            return;
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.form.prev_field();
            return;
        }
        _ => {}
    }

    match app.form.focused {
        FormField::Category => match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                app.form.category = app.form.category.next();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                app.form.category = app.form.category.prev();
            }
            _ => {}
        },
        FormField::Date => match key.code {
            KeyCode::Char(']') | KeyCode::Char('+') => app.shift_form_date(1),
            KeyCode::Char('[') => app.shift_form_date(-1),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '/' => {
                app.form.date.insert(c)
            }
            _ => edit_text(app, key),
        },
        FormField::Amount | FormField::Description => edit_text(app, key),
    }
}

/// Cursor and deletion keys plus typed characters for the focused input
fn edit_text(app: &mut App, key: KeyEvent) {
    let date_focused = app.form.focused == FormField::Date;
    let Some(input) = app.form.focused_input() else {
        return;
    };
    match key.code {
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Char(c) if !date_focused => input.insert(c),
        _ => {}
    }
}

/// Handle keys while a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match &mut app.active_dialog {
        ActiveDialog::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline(),
            _ => {}
        },
        ActiveDialog::EditRow(state) => match state.handle_key(key) {
            EditAction::Continue => {}
            EditAction::Commit => {
                let state = state.clone();
                app.commit_edit_row(&state);
            }
            EditAction::Cancel => app.close_dialog(),
        },
        ActiveDialog::Warning(_) | ActiveDialog::Error(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.close_dialog();
            }
        }
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::ExpenseInput;
    use crate::storage::Storage;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn seeded() -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();
        repo.insert(&ExpenseInput::new("01-01-2024", "Food", "25", "lunch"))
            .unwrap();
        repo.insert(&ExpenseInput::new("01-02-2024", "Rent", "900", "january"))
            .unwrap();
        storage
    }

    #[test]
    fn test_add_through_form() {
        let storage = Storage::open_in_memory().unwrap();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_panel, FocusedPanel::Form);

        // Clear the prefilled date and type one
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "01-05-2024");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "40");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "bus pass?");
        press(&mut app, KeyCode::Enter);

        let stored = storage.expenses().list_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, "01-05-2024");
        assert_eq!(stored[0].category, "Rent");
        assert_eq!(stored[0].amount, "40");
        assert_eq!(stored[0].description, "bus pass?");
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_date_field_ignores_letters_and_steps_days() {
        let storage = Storage::open_in_memory().unwrap();
        let mut app = App::new(&storage, &Settings::default()).unwrap();
        app.form.date.set_value("12-31-2023");
        press(&mut app, KeyCode::Tab);

        type_text(&mut app, "x");
        assert_eq!(app.form.date.value(), "12-31-2023");
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.form.date.value(), "01-01-2024");
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.form.date.value(), "12-30-2023");
    }

    #[test]
    fn test_delete_selected_with_confirmation() {
        let storage = seeded();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.active_dialog, ActiveDialog::Confirm(_)));
        press(&mut app, KeyCode::Char('y'));

        let remaining = storage.expenses().list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].description, "january");
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_delete_all_declined_at_second_prompt() {
        let storage = seeded();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.active_dialog, ActiveDialog::Confirm(_)));
        press(&mut app, KeyCode::Char('n'));

        assert!(!app.has_dialog());
        assert_eq!(storage.expenses().count().unwrap(), 2);
    }

    #[test]
    fn test_update_without_selection_shows_warning() {
        let storage = seeded();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Char('u'));
        assert!(matches!(app.active_dialog, ActiveDialog::Warning(_)));
        press(&mut app, KeyCode::Enter);
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_edit_row_and_update() {
        let storage = seeded();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.active_dialog, ActiveDialog::EditRow(_)));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        type_text(&mut app, " and dessert");
        press(&mut app, KeyCode::Enter);
        assert!(!app.has_dialog());

        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Char('y'));

        let stored = storage.expenses().list_all().unwrap();
        assert_eq!(stored[0].description, "lunch and dessert");
    }

    #[test]
    fn test_quit_keys() {
        let storage = Storage::open_in_memory().unwrap();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "q");
        assert!(!app.should_quit);

        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_opens_and_any_key_closes() {
        let storage = Storage::open_in_memory().unwrap();
        let mut app = App::new(&storage, &Settings::default()).unwrap();

        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.active_dialog, ActiveDialog::Help));
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.has_dialog());
    }
}
