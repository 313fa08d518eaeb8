//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::query::Refresh;
use crate::view::NavigableTable;

use super::state::{AppState, FilterField, Focus, InputMode};

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: usize = 20;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Issue the given query.
    Fetch(Refresh),
    /// Apply the value in the filter editor.
    ApplyEdit,
}

impl From<Refresh> for KeyAction {
    fn from(refresh: Refresh) -> Self {
        match refresh {
            Refresh::None => KeyAction::None,
            other => KeyAction::Fetch(other),
        }
    }
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Edit(_) => handle_edit_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Help popup
        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.show_help = !state.show_help;
            if state.show_help {
                state.help_scroll = 0;
            }
            KeyAction::None
        }
        KeyCode::Esc => {
            state.status_message = None;
            state.show_help = false;
            KeyAction::None
        }

        // Row navigation (or help scroll while the popup is open)
        KeyCode::Up | KeyCode::Char('k') => navigate(state, Move::Up),
        KeyCode::Down | KeyCode::Char('j') => navigate(state, Move::Down),
        KeyCode::PageUp => navigate(state, Move::PageUp),
        KeyCode::PageDown => navigate(state, Move::PageDown),
        KeyCode::Home => navigate(state, Move::Home),
        KeyCode::End => navigate(state, Move::End),

        _ if state.show_help => KeyAction::None,

        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = state.focus.next();
            KeyAction::None
        }

        // Toolbar
        KeyCode::Char('f') => {
            state.begin_edit(FilterField::From);
            KeyAction::None
        }
        KeyCode::Char('t') => {
            state.begin_edit(FilterField::To);
            KeyAction::None
        }
        KeyCode::Char('/') | KeyCode::Char('m') => {
            state.begin_edit(FilterField::Message);
            KeyAction::None
        }
        KeyCode::Char('x') | KeyCode::Char('X') => state.filter.clear_filters().into(),
        KeyCode::Char('F') | KeyCode::Char(' ') => state.filter.toggle_follow().into(),

        // Pager: older / newer
        KeyCode::Char('<') | KeyCode::Char(',') | KeyCode::Left => state.filter.prev_page().into(),
        KeyCode::Char('>') | KeyCode::Char('.') | KeyCode::Right => {
            state.filter.next_page().into()
        }

        // Manual refresh
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Fetch(Refresh::Stat),

        _ => KeyAction::None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

fn apply_move<T: NavigableTable>(table: &mut T, mv: Move) {
    match mv {
        Move::Up => table.select_up(),
        Move::Down => table.select_down(),
        Move::PageUp => table.page_up(PAGE_STEP),
        Move::PageDown => table.page_down(PAGE_STEP),
        Move::Home => table.home(),
        Move::End => table.end(),
    }
}

/// Moves the cursor of the focused panel. Moving the stat cursor narrows the
/// list to the newly selected row.
fn navigate(state: &mut AppState, mv: Move) -> KeyAction {
    if state.show_help {
        state.help_scroll = match mv {
            Move::Up => state.help_scroll.saturating_sub(1),
            Move::Down => state.help_scroll.saturating_add(1),
            Move::PageUp => state.help_scroll.saturating_sub(10),
            Move::PageDown => state.help_scroll.saturating_add(10),
            Move::Home => 0,
            Move::End => usize::MAX,
        };
        return KeyAction::None;
    }

    match state.focus {
        Focus::Stats => {
            let before = state.stats.selected_index();
            apply_move(&mut state.stats, mv);
            if state.stats.selected_index() != before {
                state.apply_selection().into()
            } else {
                KeyAction::None
            }
        }
        Focus::Entries => {
            apply_move(&mut state.entries, mv);
            KeyAction::None
        }
    }
}

fn handle_edit_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.cancel_edit();
            KeyAction::None
        }
        KeyCode::Enter => KeyAction::ApplyEdit,
        KeyCode::Backspace => {
            state.edit_input.pop();
            state.edit_error = None;
            KeyAction::None
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.edit_input.clear();
            state.edit_error = None;
            KeyAction::None
        }
        KeyCode::Char(c) => {
            // Ignore control/alt-modified chars
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.edit_input.push(c);
            state.edit_error = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StatMap;
    use crate::query::FilterState;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state_with_stats() -> AppState {
        let mut state = AppState::new(FilterState::default(), "test");
        let mut stat = StatMap::new();
        let sshd = stat.entry("sshd".into()).or_default();
        sshd.insert("101".into(), 3);
        sshd.insert("102".into(), 1);
        state.stats.update(&stat);
        state
    }

    #[test]
    fn quit_requires_confirmation_and_quits_on_qq() {
        let mut state = state_with_stats();

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(state.show_quit_confirm);

        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::Quit);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = state_with_stats();
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn ctrl_c_quits_immediately() {
        let mut state = state_with_stats();
        assert_eq!(handle_key(&mut state, ctrl('c')), KeyAction::Quit);
    }

    #[test]
    fn moving_stat_cursor_narrows_list() {
        let mut state = state_with_stats();
        state.filter.prev_page();

        // *,*  -> sshd,*
        let action = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(action, KeyAction::Fetch(Refresh::List));
        assert_eq!(state.filter.selection(), (Some("sshd"), None));
        assert_eq!(state.filter.offset(), 0);

        // -> sshd,101
        let _ = handle_key(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.filter.selection(), (Some("sshd"), Some("101")));

        // Back to the wildcard row clears both filters.
        let action = handle_key(&mut state, key(KeyCode::Home));
        assert_eq!(action, KeyAction::Fetch(Refresh::List));
        assert_eq!(state.filter.selection(), (None, None));

        // Already at the top: nothing to fetch.
        assert_eq!(handle_key(&mut state, key(KeyCode::Up)), KeyAction::None);
    }

    #[test]
    fn entry_focus_scrolls_without_fetching() {
        let mut state = state_with_stats();
        let _ = handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, Focus::Entries);
        assert_eq!(handle_key(&mut state, key(KeyCode::Down)), KeyAction::None);
        assert_eq!(state.stats.selected_index(), 0);
    }

    #[test]
    fn pager_keys_follow_pagination_rules() {
        let mut state = state_with_stats();

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('<'))),
            KeyAction::Fetch(Refresh::List)
        );
        assert!(!state.filter.follow());
        assert_eq!(state.filter.offset(), 50);

        let _ = handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.filter.offset(), 100);

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('>'))),
            KeyAction::Fetch(Refresh::List)
        );
        assert_eq!(state.filter.offset(), 50);

        assert_eq!(
            handle_key(&mut state, key(KeyCode::Right)),
            KeyAction::Fetch(Refresh::Stat)
        );
        assert_eq!(state.filter.offset(), 0);
        assert!(state.filter.follow());
    }

    #[test]
    fn follow_toggle() {
        let mut state = state_with_stats();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('F'))), KeyAction::None);
        assert!(!state.filter.follow());
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char(' '))),
            KeyAction::Fetch(Refresh::Stat)
        );
        assert!(state.filter.follow());
    }

    #[test]
    fn message_editor_collects_input_and_applies_on_enter() {
        let mut state = state_with_stats();
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Edit(FilterField::Message));

        for c in "oomx".chars() {
            let _ = handle_key(&mut state, key(KeyCode::Char(c)));
        }
        let _ = handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.edit_input, "oom");

        // Keys that normally act are plain text while editing.
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(!state.show_quit_confirm);
        assert_eq!(state.edit_input, "oomq");

        let _ = handle_key(&mut state, ctrl('u'));
        assert!(state.edit_input.is_empty());

        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::ApplyEdit);
    }

    #[test]
    fn editor_cancels_on_esc() {
        let mut state = state_with_stats();
        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        assert_eq!(state.input_mode, InputMode::Edit(FilterField::From));
        let _ = handle_key(&mut state, key(KeyCode::Char('1')));
        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.edit_input.is_empty());
        assert_eq!(state.filter.from(), None);
    }

    #[test]
    fn help_scroll_captures_navigation() {
        let mut state = state_with_stats();
        let _ = handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(state.show_help);

        let _ = handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.help_scroll, 1);
        assert_eq!(state.stats.selected_index(), 0);

        // Toolbar keys are inert while help is shown.
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('<'))), KeyAction::None);
        assert_eq!(state.filter.offset(), 0);

        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.show_help);
    }

    #[test]
    fn clear_filters_key() {
        let mut state = state_with_stats();
        state.filter.set_message(Some("x".into()));
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Char('x'))),
            KeyAction::Fetch(Refresh::Stat)
        );
        assert_eq!(state.filter.message(), None);
    }
}
