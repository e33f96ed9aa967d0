use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};
use crate::command::Command;
use crate::sort::SortKey;

/// Translate a terminal event into a command for the current focus.
pub fn command_for_event(event: &Event, app: &App) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => command_for_key(key, app.focus),
        _ => None,
    }
}

pub fn command_for_key(key: &KeyEvent, focus: Focus) -> Option<Command> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('u') if focus == Focus::Input => Some(Command::ClearQuery),
            _ => None,
        };
    }
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        return Some(Command::NextFocus);
    }

    match focus {
        Focus::Input => input_command(key.code),
        Focus::Results => results_command(key.code),
    }
}

fn input_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Enter => Some(Command::Submit),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Down => Some(Command::NextFocus),
        KeyCode::Char(c) => Some(Command::TypeChar(c)),
        _ => None,
    }
}

fn results_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::ToggleExpand),
        KeyCode::Char('n') => Some(Command::SortBy(SortKey::Name)),
        KeyCode::Char('t') => Some(Command::SortBy(SortKey::TestTypes)),
        KeyCode::Char('r') => Some(Command::SortBy(SortKey::RemoteTesting)),
        KeyCode::Char('o') => Some(Command::Visit),
        KeyCode::Char('/') => Some(Command::FocusInput),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|n| Command::OpenDownload(n as usize)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_input_focus_types_characters() {
        assert_eq!(
            command_for_key(&key(KeyCode::Char('q')), Focus::Input),
            Some(Command::TypeChar('q'))
        );
        assert_eq!(
            command_for_key(&key(KeyCode::Enter), Focus::Input),
            Some(Command::Submit)
        );
    }

    #[test]
    fn test_results_focus_bindings() {
        assert_eq!(
            command_for_key(&key(KeyCode::Enter), Focus::Results),
            Some(Command::ToggleExpand)
        );
        assert_eq!(
            command_for_key(&key(KeyCode::Char('t')), Focus::Results),
            Some(Command::SortBy(SortKey::TestTypes))
        );
        assert_eq!(
            command_for_key(&key(KeyCode::Char('3')), Focus::Results),
            Some(Command::OpenDownload(3))
        );
        assert_eq!(command_for_key(&key(KeyCode::Char('0')), Focus::Results), None);
    }

    #[test]
    fn test_global_bindings() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(&ctrl_c, Focus::Input), Some(Command::Quit));

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(&ctrl_u, Focus::Input), Some(Command::ClearQuery));
        assert_eq!(command_for_key(&ctrl_u, Focus::Results), None);

        assert_eq!(
            command_for_key(&key(KeyCode::Tab), Focus::Results),
            Some(Command::NextFocus)
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let app = App::new();
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(command_for_event(&Event::Key(release), &app), None);
        assert_eq!(
            command_for_event(&Event::Key(key(KeyCode::Char('a'))), &app),
            Some(Command::TypeChar('a'))
        );
    }
}
