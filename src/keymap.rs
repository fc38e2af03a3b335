use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::tab::Tab;

/// What a key press asks the browser to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    SelectTab(Tab),
    NextTab,
    PrevTab,
    SwitchPanel,
    Up,
    Down,
    PageUp,
    PageDown,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
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
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char(ch @ '1'..='5') => Action::SelectTab(Tab::from_number(ch.to_digit(10)?)?),
        KeyCode::Right | KeyCode::Char('l') => Action::NextTab,
        KeyCode::Left | KeyCode::Char('h') => Action::PrevTab,
        KeyCode::Tab => Action::SwitchPanel,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        _ => return None,
    };
    Some(action)
}

/// Short help line, always shown.
pub const SHORT_HELP: &str = "tab: switch panel • ←/→: tabs • ↑/↓: move • ?: more • q: quit";

/// Expanded help line toggled with `?`.
pub const FULL_HELP: &str = "1-5: jump to tab • ←/h →/l: prev/next tab • tab: user → project → detail • ↑/k ↓/j: move or scroll • pgup/pgdn: page • ?: less • q/ctrl+c: quit";
