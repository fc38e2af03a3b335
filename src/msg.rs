use crossterm::event::KeyEvent;

/// All possible messages that drive state transitions.
#[derive(Debug, Clone)]
pub enum Msg {
    Key(KeyEvent),
    Resize(u16, u16),
    Quit,
}
