use super::capability::CapabilityType;

/// Browser tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Mcps,
    Commands,
    Skills,
    Plugins,
    Agents,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Mcps,
        Tab::Commands,
        Tab::Skills,
        Tab::Plugins,
        Tab::Agents,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Mcps => "MCPs",
            Tab::Commands => "Commands",
            Tab::Skills => "Skills",
            Tab::Plugins => "Plugins",
            Tab::Agents => "Agents",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tab for a 1-based number key.
    pub fn from_number(n: u32) -> Option<Tab> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    pub fn capability_type(self) -> CapabilityType {
        match self {
            Tab::Mcps => CapabilityType::Mcp,
            Tab::Commands => CapabilityType::Command,
            Tab::Skills => CapabilityType::Skill,
            Tab::Plugins => CapabilityType::Plugin,
            Tab::Agents => CapabilityType::Agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_forward_steps_return_to_start() {
        for start in Tab::ALL {
            let mut tab = start;
            for _ in 0..5 {
                tab = tab.next();
            }
            assert_eq!(tab, start);
        }
    }

    #[test]
    fn forward_and_backward_steps_cancel_out() {
        for start in Tab::ALL {
            for steps in 0..12 {
                let mut tab = start;
                for _ in 0..steps {
                    tab = tab.next();
                }
                for _ in 0..steps {
                    tab = tab.prev();
                }
                assert_eq!(tab, start);
            }
        }
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        assert_eq!(Tab::Mcps.prev(), Tab::Agents);
        assert_eq!(Tab::Agents.next(), Tab::Mcps);
    }

    #[test]
    fn number_keys_map_to_tabs() {
        assert_eq!(Tab::from_number(1), Some(Tab::Mcps));
        assert_eq!(Tab::from_number(4), Some(Tab::Plugins));
        assert_eq!(Tab::from_number(5), Some(Tab::Agents));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(6), None);
        assert_eq!(Tab::Plugins.capability_type(), CapabilityType::Plugin);
    }
}
