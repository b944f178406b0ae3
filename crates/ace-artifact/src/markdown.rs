//! Markdown table rendering
//!
//! Table artifacts persist as a Markdown string: header row, `---` separator
//! row, data rows. Pipe and backslash characters in cell text are escaped so
//! arbitrary student text cannot break the table structure.

use crate::content::Cell;

/// Render a trimmed, normalized grid as a Markdown table
///
/// The first row is the header. Empty cells render as empty strings. Returns
/// `None` for a grid with no rows.
#[must_use]
pub fn render_table(rows: &[Vec<Cell>]) -> Option<String> {
    let header = rows.first()?;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let mut out = String::new();
    push_row(&mut out, header, width);
    out.push_str("\n|");
    for _ in 0..width {
        out.push_str(" --- |");
    }
    for row in &rows[1..] {
        out.push('\n');
        push_row(&mut out, row, width);
    }
    Some(out)
}

fn push_row(out: &mut String, row: &[Cell], width: usize) {
    out.push('|');
    for col in 0..width {
        out.push(' ');
        if let Some(cell) = row.get(col) {
            out.push_str(&cell_text(cell));
        }
        out.push_str(" |");
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(n) => format_number(*n),
        Cell::Text(s) => escape(s),
    }
}

/// Integer-valued numbers render without a trailing `.0`, matching the
/// string forms the extraction APIs hand back.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => out.push_str("\\|"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn renders_header_separator_and_data_rows() {
        let grid = vec![
            vec![text("Name"), text("Score")],
            vec![text("Ada"), Cell::Number(92.0)],
        ];
        assert_eq!(
            render_table(&grid).unwrap(),
            "| Name | Score |\n| --- | --- |\n| Ada | 92 |"
        );
    }

    #[test]
    fn empty_cells_render_as_empty_strings() {
        let grid = vec![vec![text("h1"), text("h2")], vec![Cell::Empty, text("v")]];
        assert_eq!(
            render_table(&grid).unwrap(),
            "| h1 | h2 |\n| --- | --- |\n|  | v |"
        );
    }

    #[test]
    fn pipes_and_backslashes_are_escaped() {
        let grid = vec![vec![text("a|b"), text("c\\d")]];
        assert_eq!(render_table(&grid).unwrap(), "| a\\|b | c\\\\d |\n| --- | --- |");
    }

    #[test]
    fn ragged_rows_pad_to_header_width() {
        let grid = vec![vec![text("a"), text("b")], vec![text("c")]];
        assert_eq!(
            render_table(&grid).unwrap(),
            "| a | b |\n| --- | --- |\n| c |  |"
        );
    }

    #[test]
    fn fractional_numbers_keep_their_fraction() {
        let grid = vec![vec![Cell::Number(2.5)]];
        assert_eq!(render_table(&grid).unwrap(), "| 2.5 |\n| --- |");
    }

    #[test]
    fn no_rows_renders_nothing() {
        assert!(render_table(&[]).is_none());
    }
}
