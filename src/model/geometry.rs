/// Fallback size before the first resize event.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

pub const TAB_BAR_HEIGHT: u16 = 1;
pub const HELP_BAR_HEIGHT: u16 = 1;

/// Columns eaten by a panel's borders and horizontal padding.
pub const BORDER_ALLOWANCE_X: u16 = 4;
/// Rows eaten by a panel's borders.
pub const BORDER_ALLOWANCE_Y: u16 = 2;

/// Outer and inner panel sizes for a terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub left_column_width: u16,
    pub detail_width: u16,
    pub body_height: u16,
    pub user_panel_height: u16,
    pub project_panel_height: u16,
}

impl PanelGeometry {
    pub fn compute(width: u16, height: u16, left_column_percent: u16) -> Self {
        let left_column_width = (u32::from(width) * u32::from(left_column_percent) / 100) as u16;
        let detail_width = width.saturating_sub(left_column_width);
        let body_height = height.saturating_sub(TAB_BAR_HEIGHT + HELP_BAR_HEIGHT);
        let user_panel_height = body_height / 2;
        let project_panel_height = body_height - user_panel_height;

        Self {
            left_column_width,
            detail_width,
            body_height,
            user_panel_height,
            project_panel_height,
        }
    }

    pub fn user_list_rows(&self) -> usize {
        usize::from(self.user_panel_height.saturating_sub(BORDER_ALLOWANCE_Y))
    }

    pub fn project_list_rows(&self) -> usize {
        usize::from(self.project_panel_height.saturating_sub(BORDER_ALLOWANCE_Y))
    }

    pub fn detail_inner_width(&self) -> usize {
        usize::from(self.detail_width.saturating_sub(BORDER_ALLOWANCE_X))
    }

    pub fn detail_inner_height(&self) -> usize {
        usize::from(self.body_height.saturating_sub(BORDER_ALLOWANCE_Y))
    }
}
