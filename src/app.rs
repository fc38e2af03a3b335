use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

use crate::discovery::Buckets;
use crate::keymap::{self, Action};
use crate::model::config::UiConfig;
use crate::model::detail_panel::DetailPanel;
use crate::model::geometry::{DEFAULT_HEIGHT, DEFAULT_WIDTH, PanelGeometry};
use crate::model::list_panel::ListPanel;
use crate::model::panel::Panel;
use crate::model::tab::Tab;
use crate::model::view_model::CapabilityView;
use crate::msg::Msg;

const PRIMARY: Color = Color::Rgb(0x6f, 0x03, 0xfc);
const BAR_BG: Color = Color::Rgb(20, 20, 30);

pub struct App {
    user_caps: Vec<CapabilityView>,
    project_caps: Vec<CapabilityView>,
    active_tab: Tab,
    active_panel: Panel,
    width: u16,
    height: u16,
    left_column_percent: u16,
    user_list: ListPanel,
    project_list: ListPanel,
    detail: DetailPanel,
    show_full_help: bool,
    pub should_quit: bool,
}

impl App {
    /// Starts on the MCP tab with the user list focused, sized for an
    /// 80x24 terminal until the first resize arrives.
    pub fn new(buckets: Buckets, ui: &UiConfig) -> Self {
        let active_tab = Tab::default();
        let geometry = PanelGeometry::compute(DEFAULT_WIDTH, DEFAULT_HEIGHT, ui.left_column_percent);

        let user_list = ListPanel::new(
            "User",
            filter_by_tab(&buckets.user, active_tab),
            geometry.user_list_rows(),
        );
        let project_list = ListPanel::new(
            "Project",
            filter_by_tab(&buckets.project, active_tab),
            geometry.project_list_rows(),
        );

        let mut app = Self {
            user_caps: buckets.user,
            project_caps: buckets.project,
            active_tab,
            active_panel: Panel::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            left_column_percent: ui.left_column_percent,
            user_list,
            project_list,
            detail: DetailPanel::new(geometry.detail_inner_width(), geometry.detail_inner_height()),
            show_full_help: ui.show_full_help,
            should_quit: false,
        };
        app.update_detail();
        app
    }

    // ── MVU: Update ──────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => {
                if let Some(action) = keymap::action_for(key) {
                    self.apply(action);
                }
            }
            Msg::Resize(width, height) => self.resize(width, height),
            Msg::Quit => self.should_quit = true,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.show_full_help = !self.show_full_help,
            Action::SelectTab(tab) => self.switch_to_tab(tab),
            Action::NextTab => self.switch_to_tab(self.active_tab.next()),
            Action::PrevTab => self.switch_to_tab(self.active_tab.prev()),
            Action::SwitchPanel => self.switch_panel(),
            Action::Up => self.navigate(|_| -1),
            Action::Down => self.navigate(|_| 1),
            Action::PageUp => self.navigate(|page| -(page as isize)),
            Action::PageDown => self.navigate(|page| page as isize),
        }
    }

    /// Moves the focused list's selection, or scrolls the detail when it
    /// has focus. `delta` receives the focused component's page size.
    fn navigate(&mut self, delta: impl Fn(usize) -> isize) {
        match self.active_panel {
            Panel::UserList => {
                self.user_list.move_selection(delta(self.user_list.page_size()));
                self.update_detail();
            }
            Panel::ProjectList => {
                self.project_list.move_selection(delta(self.project_list.page_size()));
                self.update_detail();
            }
            Panel::DetailFocus => self.detail.scroll(delta(self.detail.page_size())),
        }
    }

    fn switch_to_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.user_list.set_items(filter_by_tab(&self.user_caps, tab));
        self.project_list.set_items(filter_by_tab(&self.project_caps, tab));
        self.select_first_in_active_panel();
        self.update_detail();
        tracing::debug!(tab = tab.label(), "switched tab");
    }

    fn switch_panel(&mut self) {
        self.active_panel = self.active_panel.next();
        match self.active_panel {
            Panel::UserList => self.user_list.select_first(),
            Panel::ProjectList => self.project_list.select_first(),
            Panel::DetailFocus => {}
        }
        self.update_detail();
    }

    fn select_first_in_active_panel(&mut self) {
        match self.active_panel {
            Panel::UserList => self.user_list.select_first(),
            Panel::ProjectList | Panel::DetailFocus => self.project_list.select_first(),
        }
    }

    /// The detail follows the user list only while it has focus.
    fn update_detail(&mut self) {
        let selected = match self.active_panel {
            Panel::UserList => self.user_list.selected_item(),
            Panel::ProjectList | Panel::DetailFocus => self.project_list.selected_item(),
        };
        let text = selected.map(CapabilityView::detail_text).unwrap_or_default();
        self.detail.set_content(text);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        let geometry = self.geometry();
        self.user_list.set_height(geometry.user_list_rows());
        self.project_list.set_height(geometry.project_list_rows());
        self.detail
            .set_size(geometry.detail_inner_width(), geometry.detail_inner_height());
    }

    fn geometry(&self) -> PanelGeometry {
        PanelGeometry::compute(self.width, self.height, self.left_column_percent)
    }

    // ── MVU: View ────────────────────────────────────────────────

    pub fn view(&mut self, frame: &mut Frame) {
        let geometry = self.geometry();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // tab bar
                Constraint::Min(1),    // body
                Constraint::Length(1), // help bar
            ])
            .split(frame.area());

        self.render_tab_bar(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(geometry.left_column_width),
                Constraint::Min(1),
            ])
            .split(chunks[1]);

        let lists = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(geometry.user_panel_height),
                Constraint::Min(1),
            ])
            .split(body[0]);

        render_list(
            frame,
            lists[0],
            &self.user_list,
            self.active_panel == Panel::UserList,
        );
        render_list(
            frame,
            lists[1],
            &self.project_list,
            self.active_panel == Panel::ProjectList,
        );
        self.render_detail(frame, body[1]);
        self.render_help_bar(frame, chunks[2]);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let spans: Vec<Span> = Tab::ALL
            .iter()
            .map(|&tab| {
                let label = format!(" [{}] {} ", tab.index() + 1, tab.label());
                let style = if tab == self.active_tab {
                    Style::default()
                        .bg(PRIMARY)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().bg(BAR_BG).fg(Color::Gray)
                };
                Span::styled(label, style)
            })
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(BAR_BG)),
            area,
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .detail
            .visible_lines()
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();

        let title = if self.detail.line_count() > self.detail.page_size() {
            format!(
                " Details {}/{} ",
                self.detail.top_line() + 1,
                self.detail.line_count()
            )
        } else {
            " Details ".to_string()
        };

        let panel = Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .block(panel_block(&title, self.active_panel == Panel::DetailFocus));
        frame.render_widget(panel, area);
    }

    fn render_help_bar(&self, frame: &mut Frame, area: Rect) {
        let focus = Span::styled(
            format!(" {} ", self.active_panel.label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
        let help = if self.show_full_help {
            keymap::FULL_HELP
        } else {
            keymap::SHORT_HELP
        };
        let bar = Line::from(vec![
            focus,
            Span::styled(format!(" {help} "), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(bar).style(Style::default().bg(BAR_BG)), area);
    }
}

fn filter_by_tab(caps: &[CapabilityView], tab: Tab) -> Vec<CapabilityView> {
    let kind = tab.capability_type();
    caps.iter().filter(|view| view.kind() == kind).cloned().collect()
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let (border_type, border_style) = if focused {
        (BorderType::Rounded, Style::default().fg(PRIMARY))
    } else {
        (BorderType::Plain, Style::default().fg(Color::DarkGray))
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
}

fn render_list(frame: &mut Frame, area: Rect, panel: &ListPanel, focused: bool) {
    let selected = panel.selected_index();
    let lines: Vec<Line> = if panel.item_count() == 0 {
        vec![Line::from(Span::styled(
            "Nothing here",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        panel
            .visible()
            .map(|(idx, view)| {
                let name = Span::styled(format!("{}  ", view.name()), Style::default().fg(Color::White));
                let label = Span::styled(view.list_label(), Style::default().fg(Color::DarkGray));
                if Some(idx) == selected {
                    let highlight = if focused {
                        Style::default().fg(Color::White).bg(PRIMARY)
                    } else {
                        Style::default().fg(Color::Black).bg(Color::Gray)
                    };
                    Line::from(vec![name, label]).style(highlight)
                } else {
                    Line::from(vec![name, label])
                }
            })
            .collect()
    };

    let title = format!(" {} ", panel.title());
    frame.render_widget(Paragraph::new(lines).block(panel_block(&title, focused)), area);
}
