use crate::cli::output::current_preferences;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Specifies the configuration for a single column in the rendered table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
    /// Continue long plain-text cells on extra lines instead of truncating.
    pub wrap: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment: Alignment::Left,
            wrap: false,
        }
    }

    pub fn max(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// Represents a table with column metadata and rows of data to render.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Computes the content widths for each column based on headers, rows, and
    /// column constraints.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .max()
                    .unwrap_or(0);
                let width = visible_width(&column.header)
                    .max(column.min_width)
                    .max(widest_cell);
                column.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    /// Renders a single row using the provided column widths.
    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment, self.padding)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    /// Renders one logical row, spilling wrapped cells onto continuation lines.
    fn render_wrapped(&self, row: &[String], widths: &[usize]) -> Vec<String> {
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                if column.wrap {
                    wrap_text(text, *width)
                } else {
                    vec![text.to_string()]
                }
            })
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

        (0..height)
            .map(|line| {
                let parts: Vec<String> = cells
                    .iter()
                    .map(|cell| cell.get(line).cloned().unwrap_or_default())
                    .collect();
                self.render_row(&parts, widths)
            })
            .collect()
    }

    /// Renders the full table, optionally including headers and a rule.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if self.show_headers {
            let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&header, &widths));
            lines.push(horizontal_rule(&widths, self.padding));
        }

        for row in &self.rows {
            lines.extend(self.render_wrapped(row, &widths));
        }
        lines.join("\n")
    }
}

/// Number of printable characters, ignoring ANSI colour sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            skip_escape(&mut chars);
        } else {
            width += 1;
        }
    }
    width
}

fn skip_escape(chars: &mut std::str::Chars<'_>) {
    if chars.clone().next() == Some('[') {
        chars.next();
        for ch in chars.by_ref() {
            if ('\u{40}'..='\u{7e}').contains(&ch) {
                break;
            }
        }
    }
}

/// Shortens `text` to `width` visible characters, ending with an ellipsis.
pub fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let ellipsis = if current_preferences().plain_mode {
        "~"
    } else {
        "…"
    };
    let keep = width - 1;
    let mut result = String::new();
    let mut visible = 0;
    let mut saw_ansi = false;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            let rest = chars.as_str();
            skip_escape(&mut chars);
            let consumed = rest.len() - chars.as_str().len();
            result.push(ch);
            result.push_str(&rest[..consumed]);
            saw_ansi = true;
            continue;
        }
        if visible == keep {
            break;
        }
        result.push(ch);
        visible += 1;
    }

    result.push_str(ellipsis);
    if saw_ansi {
        result.push_str("\u{1b}[0m");
    }
    result
}

/// Greedy word wrap to `width` characters. Words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 || visible_width(text) <= width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while visible_width(&word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.chars().take(width).collect());
            word = word.chars().skip(width).collect();
        }
        if word.is_empty() {
            continue;
        }
        if current.is_empty() {
            current = word;
        } else if visible_width(&current) + 1 + visible_width(&word) <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Renders a single cell with padding and alignment applied.
pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));

    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
        Alignment::Center => (remaining / 2, remaining - remaining / 2),
    };

    format!(
        "{pad}{}{fitted}{}{pad}",
        " ".repeat(left),
        " ".repeat(right),
        pad = " ".repeat(padding)
    )
}

/// Builds a horizontal rule that spans the width of the table.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }

    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_ignores_ansi() {
        assert_eq!(visible_width("\u{1b}[31mred\u{1b}[0m"), 3);
        assert_eq!(visible_width("●●○"), 3);
    }

    #[test]
    fn truncation_respects_width() {
        let cut = truncate_text("Automate insurance eligibility", 10);
        assert_eq!(visible_width(&cut), 10);
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn columns_size_to_widest_cell() {
        let mut table = Table::new(vec![TableColumn::new("Phase"), TableColumn::new("Step")]);
        table.push_row(vec!["Referral".into(), "Intake".into()]);
        assert_eq!(table.compute_widths(), vec![8, 6]);
        let rendered = table.render();
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.lines().nth(2).unwrap().contains("Referral"));
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("Share a visit schedule with the client", 16),
            vec!["Share a visit", "schedule with", "the client"]
        );
        assert_eq!(wrap_text("Intake", 16), vec!["Intake"]);
        assert_eq!(
            wrap_text("Telehealth-enabled", 8),
            vec!["Teleheal", "th-enabl", "ed"]
        );
    }

    #[test]
    fn wrapped_column_adds_continuation_lines() {
        let mut table = Table::new(vec![
            TableColumn::new("Area"),
            TableColumn::new("Details").max(12).wrap(),
        ]);
        table.push_row(vec![
            "Insurance".into(),
            "Verify payer coverage first".into(),
        ]);
        let rendered = table.render();
        let body: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(body.len(), 3);
        assert!(body[0].contains("Insurance") && body[0].contains("Verify payer"));
        assert_eq!(body[1].trim(), "coverage");
        assert_eq!(body[2].trim(), "first");
        assert!(!rendered.contains('…'));
    }

    #[test]
    fn max_width_caps_column() {
        let mut table = Table::new(vec![TableColumn::new("Item").max(6)]);
        table.push_row(vec!["Transportation access".into()]);
        assert_eq!(table.compute_widths(), vec![6]);
    }
}
