// Key bindings
//
// Maps raw crossterm key events onto table actions. Only presses count;
// release and repeat events are dropped so terminals that report both do
// not trigger an action twice.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectPreviousColumn,
    SelectNextColumn,
    /// Sort by the selected column
    SortSelected,
    /// Sort by the column at this zero-based index
    SortColumn(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    Refresh,
    /// Copy the current page as TSV
    Copy,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Action::SelectPreviousColumn,
        KeyCode::Right | KeyCode::Char('l') => Action::SelectNextColumn,
        KeyCode::Enter | KeyCode::Char(' ') => Action::SortSelected,
        KeyCode::Char(c @ '1'..='9') => Action::SortColumn(c as usize - '1' as usize),
        KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
        KeyCode::Char('p') | KeyCode::PageUp => Action::PreviousPage,
        KeyCode::Home => Action::FirstPage,
        KeyCode::End => Action::LastPage,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('y') => Action::Copy,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(action_for(&press(KeyCode::Char('n'))), Some(Action::NextPage));
        assert_eq!(action_for(&press(KeyCode::PageDown)), Some(Action::NextPage));
        assert_eq!(action_for(&press(KeyCode::PageUp)), Some(Action::PreviousPage));
        assert_eq!(action_for(&press(KeyCode::Home)), Some(Action::FirstPage));
        assert_eq!(action_for(&press(KeyCode::End)), Some(Action::LastPage));
        assert_eq!(
            action_for(&press(KeyCode::Char('h'))),
            Some(Action::SelectPreviousColumn)
        );
    }

    #[test]
    fn digits_sort_by_position() {
        assert_eq!(action_for(&press(KeyCode::Char('1'))), Some(Action::SortColumn(0)));
        assert_eq!(action_for(&press(KeyCode::Char('4'))), Some(Action::SortColumn(3)));
        assert_eq!(action_for(&press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_other_chords_are_ignored() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(action_for(&ctrl('c')), Some(Action::Quit));
        assert_eq!(action_for(&ctrl('n')), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for(&key), None);
    }
}
