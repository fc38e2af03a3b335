use super::view_model::CapabilityView;

/// One scope's capability list filtered to the active tab.
#[derive(Debug, Clone)]
pub struct ListPanel {
    title: &'static str,
    items: Vec<CapabilityView>,
    selected: Option<usize>,
    /// First visible row.
    top: usize,
    /// Visible rows.
    height: usize,
}

impl ListPanel {
    pub fn new(title: &'static str, items: Vec<CapabilityView>, height: usize) -> Self {
        let mut panel = Self {
            title,
            items: Vec::new(),
            selected: None,
            top: 0,
            height,
        };
        panel.set_items(items);
        panel
    }

    /// Title with the item count, e.g. `User (3)`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.title, self.items.len())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Replaces the items, keeping the selection index clamped to the new
    /// length.
    pub fn set_items(&mut self, items: Vec<CapabilityView>) {
        self.items = items;
        self.selected = match (self.items.len(), self.selected) {
            (0, _) => None,
            (len, Some(idx)) => Some(idx.min(len - 1)),
            (_, None) => Some(0),
        };
        self.scroll_to_selection();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&CapabilityView> {
        self.selected.and_then(|idx| self.items.get(idx))
    }

    pub fn select_first(&mut self) {
        if !self.items.is_empty() {
            self.selected = Some(0);
            self.scroll_to_selection();
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };

        let max = self.items.len().saturating_sub(1) as isize;
        let next = (current as isize + delta).clamp(0, max);
        self.selected = Some(next as usize);
        self.scroll_to_selection();
    }

    pub fn page_size(&self) -> usize {
        self.height.max(1)
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.scroll_to_selection();
    }

    /// Rows currently visible, paired with their index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &CapabilityView)> {
        self.items
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.page_size())
    }

    fn scroll_to_selection(&mut self) {
        let Some(selected) = self.selected else {
            self.top = 0;
            return;
        };

        let height = self.page_size();
        if selected < self.top {
            self.top = selected;
        } else if selected >= self.top + height {
            self.top = selected + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::capability::{
        Capability, CapabilityInfo, CapabilityType, FileCapability, Scope,
    };

    fn views(names: &[&str]) -> Vec<CapabilityView> {
        names
            .iter()
            .map(|name| {
                CapabilityView::from(&Capability::Command(FileCapability {
                    info: CapabilityInfo::new(*name, "", CapabilityType::Command, Scope::User),
                    file_path: String::new(),
                    content: String::new(),
                }))
            })
            .collect()
    }

    #[test]
    fn empty_panel_has_no_selection() {
        let mut panel = ListPanel::new("User", Vec::new(), 5);
        panel.select_first();
        panel.move_selection(3);

        assert_eq!(panel.selected_index(), None);
        assert!(panel.selected_item().is_none());
        assert_eq!(panel.title(), "User (0)");
    }

    #[test]
    fn movement_is_clamped_to_bounds() {
        let mut panel = ListPanel::new("User", views(&["a", "b", "c"]), 5);

        panel.move_selection(-1);
        assert_eq!(panel.selected_index(), Some(0));

        panel.move_selection(10);
        assert_eq!(panel.selected_item().map(CapabilityView::name), Some("c"));
    }

    #[test]
    fn shrinking_items_clamps_selection() {
        let mut panel = ListPanel::new("Project", views(&["a", "b", "c"]), 5);
        panel.move_selection(2);

        panel.set_items(views(&["x"]));
        assert_eq!(panel.selected_index(), Some(0));

        panel.set_items(Vec::new());
        assert_eq!(panel.selected_index(), None);
    }

    #[test]
    fn window_follows_selection() {
        let mut panel = ListPanel::new("User", views(&["a", "b", "c", "d", "e"]), 2);
        panel.move_selection(3);

        let shown: Vec<&str> = panel.visible().map(|(_, view)| view.name()).collect();
        assert_eq!(shown, vec!["c", "d"]);

        panel.select_first();
        let shown: Vec<&str> = panel.visible().map(|(_, view)| view.name()).collect();
        assert_eq!(shown, vec!["a", "b"]);
    }
}
