use colored::Colorize;

use crate::cli::output::current_preferences;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align_right: false,
        }
    }

    /// Right-aligned column, for amounts and distances.
    pub fn numeric(header: impl Into<String>, width: usize) -> Self {
        Self {
            align_right: true,
            ..Self::new(header, width)
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub empty_message: String,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
            empty_message: "No records.".into(),
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Column widths grown to fit the widest cell.
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .fold(column.width, usize::max)
            })
            .collect()
    }

    /// Lines of the rendered table, without styling.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        if self.rows.is_empty() {
            lines.push(self.empty_message.clone());
            return lines;
        }

        let widths = self.widths();
        let header: Vec<String> = self.columns.iter().map(|col| col.header.clone()).collect();
        lines.push(self.format_row(&header, &widths));
        let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        lines.push("-".repeat(total));
        for row in &self.rows {
            lines.push(self.format_row(row, &widths));
        }
        lines
    }

    fn format_row(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, (column, width)) in self.columns.iter().zip(widths).enumerate() {
            if idx > 0 {
                line.push(' ');
            }
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            if column.align_right {
                line.push_str(&" ".repeat(pad));
                line.push_str(cell);
            } else {
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            }
        }
        line.trim_end().to_string()
    }
}

/// Renders [`Table`] instances using simple padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        let color = current_preferences().color_enabled;
        let header_lines =
            usize::from(table.title.is_some()) + usize::from(!table.rows.is_empty());
        for (idx, line) in table.lines().into_iter().enumerate() {
            if color && idx < header_lines {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_fit_cells() {
        let mut table = Table::new(
            None::<String>,
            vec![TableColumn::new("ID", 2), TableColumn::numeric("Amount", 4)],
        );
        table.add_row(vec!["1715760000000", "150.00 zł"]);

        let lines = table.lines();
        assert_eq!(lines[0], format!("ID{}Amount", " ".repeat(15)));
        assert_eq!(lines[2], "1715760000000 150.00 zł");
    }

    #[test]
    fn empty_table_prints_message() {
        let table = Table::new(Some("Rentals"), vec![TableColumn::new("ID", 4)])
            .with_empty_message("No rental records yet.");
        assert_eq!(table.lines(), vec!["Rentals", "No rental records yet."]);
    }
}
