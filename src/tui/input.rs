//! Input handling for the TUI application.
//!
//! Key events map to different messages depending on which view or overlay
//! has focus: text keys type into the filter editor, while the same keys
//! drive the table or the flashcards elsewhere.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::KeyCode;

use super::messages::AppMsg;

/// Which part of the interface receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// The vocabulary table.
    Table,
    /// A filter text input.
    FilterInput,
    /// The multi-select value picker.
    MembershipPicker,
    /// The column finder overlay.
    ColumnFinder,
    /// The flashcard session.
    Study,
}

/// Maps a key event to an application message for `context`.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
#[must_use]
pub fn map_key_to_message_with_context(key: &KeyMsg, context: InputContext) -> Option<AppMsg> {
    match context {
        InputContext::Table => map_table_key(key.key),
        InputContext::FilterInput => map_filter_input_key(key.key),
        InputContext::MembershipPicker => map_picker_key(key.key),
        InputContext::ColumnFinder => map_finder_key(key.key),
        InputContext::Study => map_study_key(key.key),
    }
}

const fn map_table_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::PageDown => Some(AppMsg::PageDown),
        KeyCode::PageUp => Some(AppMsg::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('h') | KeyCode::Left => Some(AppMsg::ColumnLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(AppMsg::ColumnRight),
        KeyCode::Char(' ') => Some(AppMsg::ToggleRow),
        KeyCode::Char('a') => Some(AppMsg::ToggleAllVisible),
        KeyCode::Char('s') => Some(AppMsg::SortColumn { multi: false }),
        KeyCode::Char('S') => Some(AppMsg::SortColumn { multi: true }),
        KeyCode::Char('z') => Some(AppMsg::ClearSort),
        KeyCode::Char('>') => Some(AppMsg::WidenColumn),
        KeyCode::Char('<') => Some(AppMsg::NarrowColumn),
        KeyCode::Char('f') => Some(AppMsg::EditColumnFilter),
        KeyCode::Char('/') => Some(AppMsg::EditGlobalSearch),
        KeyCode::Char('x') => Some(AppMsg::ClearFilters),
        KeyCode::Char('c') => Some(AppMsg::OpenColumnFinder),
        KeyCode::Char('r') => Some(AppMsg::RefreshRequested),
        KeyCode::Enter => Some(AppMsg::StartSession),
        _ => None,
    }
}

const fn map_filter_input_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char(ch) => Some(AppMsg::InputChar(ch)),
        KeyCode::Backspace => Some(AppMsg::InputBackspace),
        KeyCode::Enter => Some(AppMsg::InputSubmit),
        KeyCode::Esc => Some(AppMsg::InputCancel),
        _ => None,
    }
}

const fn map_picker_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Char(' ') => Some(AppMsg::OverlayToggle),
        KeyCode::Esc | KeyCode::Enter => Some(AppMsg::CloseOverlay),
        _ => None,
    }
}

const fn map_finder_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Char(' ') => Some(AppMsg::OverlayToggle),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(AppMsg::OverlayEnter),
        KeyCode::Char('h') | KeyCode::Left => Some(AppMsg::OverlayBack),
        KeyCode::Esc => Some(AppMsg::CloseOverlay),
        _ => None,
    }
}

const fn map_study_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('h') | KeyCode::Left => Some(AppMsg::PreviousCard),
        KeyCode::Char('l') | KeyCode::Right => Some(AppMsg::NextCard),
        KeyCode::Char(' ') => Some(AppMsg::FlipCard),
        KeyCode::Char(',') => Some(AppMsg::RemoveCard),
        KeyCode::Char('/') => Some(AppMsg::FlagCard),
        KeyCode::Esc => Some(AppMsg::LeaveSession),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use rstest::rstest;

    use super::{InputContext, map_key_to_message_with_context};
    use crate::tui::messages::AppMsg;

    fn key_msg(key: KeyCode) -> bubbletea_rs::event::KeyMsg {
        bubbletea_rs::event::KeyMsg {
            key,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn mapped(key: KeyCode, context: InputContext) -> Option<AppMsg> {
        map_key_to_message_with_context(&key_msg(key), context)
    }

    #[rstest]
    #[case::left(KeyCode::Left)]
    #[case::h(KeyCode::Char('h'))]
    fn study_previous_keys(#[case] key: KeyCode) {
        assert!(matches!(
            mapped(key, InputContext::Study),
            Some(AppMsg::PreviousCard)
        ));
    }

    #[rstest]
    #[case(KeyCode::Char(','), "RemoveCard")]
    #[case(KeyCode::Char('/'), "FlagCard")]
    #[case(KeyCode::Char(' '), "FlipCard")]
    #[case(KeyCode::Esc, "LeaveSession")]
    fn study_action_keys(#[case] key: KeyCode, #[case] expected: &str) {
        let message = mapped(key, InputContext::Study).expect("key should map");
        assert!(format!("{message:?}").starts_with(expected));
    }

    #[test]
    fn filter_input_captures_command_letters() {
        assert!(matches!(
            mapped(KeyCode::Char('q'), InputContext::FilterInput),
            Some(AppMsg::InputChar('q'))
        ));
        assert!(matches!(
            mapped(KeyCode::Char('q'), InputContext::Table),
            Some(AppMsg::Quit)
        ));
    }

    #[test]
    fn slash_means_search_in_table_and_flag_in_study() {
        assert!(matches!(
            mapped(KeyCode::Char('/'), InputContext::Table),
            Some(AppMsg::EditGlobalSearch)
        ));
        assert!(matches!(
            mapped(KeyCode::Char('/'), InputContext::Study),
            Some(AppMsg::FlagCard)
        ));
    }

    #[test]
    fn shifted_sort_appends() {
        assert!(matches!(
            mapped(KeyCode::Char('S'), InputContext::Table),
            Some(AppMsg::SortColumn { multi: true })
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert!(mapped(KeyCode::F(5), InputContext::ColumnFinder).is_none());
    }
}
