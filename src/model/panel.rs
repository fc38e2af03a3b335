/// Which region of the browser receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// User-scope capability list.
    #[default]
    UserList,
    /// Project-scope capability list.
    ProjectList,
    /// Detail viewport; navigation scrolls instead of selecting.
    DetailFocus,
}

impl Panel {
    pub fn next(self) -> Panel {
        match self {
            Panel::UserList => Panel::ProjectList,
            Panel::ProjectList => Panel::DetailFocus,
            Panel::DetailFocus => Panel::UserList,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::UserList => "USER",
            Panel::ProjectList => "PROJECT",
            Panel::DetailFocus => "DETAIL",
        }
    }
}
