/// Scrollable, word-wrapped text viewport for the selected capability.
#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    text: String,
    lines: Vec<String>,
    top_line: usize,
    width: usize,
    height: usize,
}

impl DetailPanel {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replaces the content and scrolls back to the top.
    pub fn set_content(&mut self, text: String) {
        self.text = text;
        self.top_line = 0;
        self.rewrap();
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.rewrap();
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn page_size(&self) -> usize {
        self.height.max(1)
    }

    pub fn scroll(&mut self, delta: isize) {
        let max = self.max_top() as isize;
        self.top_line = (self.top_line as isize + delta).clamp(0, max) as usize;
    }

    pub fn visible_lines(&self) -> &[String] {
        let end = (self.top_line + self.page_size()).min(self.lines.len());
        &self.lines[self.top_line.min(end)..end]
    }

    fn max_top(&self) -> usize {
        self.lines.len().saturating_sub(self.page_size())
    }

    fn rewrap(&mut self) {
        self.lines = if self.text.is_empty() {
            Vec::new()
        } else {
            self.text
                .split('\n')
                .flat_map(|line| wrap_line(line, self.width))
                .collect()
        };
        self.top_line = self.top_line.min(self.max_top());
    }
}

/// Greedy word wrap; words longer than `width` are split hard.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

        if needed <= width {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            continue;
        }

        if current_len > 0 {
            out.push(std::mem::take(&mut current));
        }

        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            let rest = chars.split_off(width);
            out.push(chars.into_iter().collect());
            chars = rest;
        }
        current = chars.iter().collect();
        current_len = chars.len();
    }

    out.push(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_line("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn splits_words_longer_than_width() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("ab cdefghij x", 4), vec!["ab", "cdef", "ghij", "x"]);
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut panel = DetailPanel::new(20, 3);
        panel.set_content((1..=10).map(|n| n.to_string()).collect::<Vec<_>>().join("\n"));

        panel.scroll(-5);
        assert_eq!(panel.top_line(), 0);

        panel.scroll(100);
        assert_eq!(panel.top_line(), 7);
        assert_eq!(panel.visible_lines(), ["8", "9", "10"]);
    }

    #[test]
    fn new_content_resets_scroll() {
        let mut panel = DetailPanel::new(20, 2);
        panel.set_content("a\nb\nc\nd".to_string());
        panel.scroll(2);

        panel.set_content("x\ny\nz".to_string());
        assert_eq!(panel.top_line(), 0);
    }

    #[test]
    fn empty_content_has_no_lines() {
        let mut panel = DetailPanel::new(20, 2);
        panel.set_content(String::new());

        assert_eq!(panel.line_count(), 0);
        assert!(panel.visible_lines().is_empty());
    }

    #[test]
    fn resize_rewraps_existing_text() {
        let mut panel = DetailPanel::new(40, 5);
        panel.set_content("alpha beta gamma".to_string());
        assert_eq!(panel.line_count(), 1);

        panel.set_size(6, 5);
        assert_eq!(panel.visible_lines(), ["alpha", "beta", "gamma"]);
    }
}
