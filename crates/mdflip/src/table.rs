//! Pipe table detection
//!
//! Finds maximal runs of pipe-delimited lines and turns them into
//! [`Block::Table`]. A run whose second line has no dash is handed back line
//! by line. Header and body rows keep whatever cell counts they were
//! written with.

use mdflip_core::Block;

use crate::inline::parse_inlines;

/// A line run after table extraction
#[derive(Debug, Clone, PartialEq)]
pub enum Piece<'a> {
    Table(Block),
    Line(&'a str),
}

/// Whether a line has at least two cells once enclosing pipes are removed
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.contains('|')
}

/// Split a row into trimmed cells, dropping the empty segments produced by
/// leading and trailing pipes
pub fn split_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let mut cells: Vec<&str> = trimmed.split('|').map(str::trim).collect();

    if trimmed.starts_with('|') && cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if trimmed.ends_with('|') && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    cells
}

/// Replace table candidates in a run of lines
pub fn extract_tables<'a>(lines: &[&'a str]) -> Vec<Piece<'a>> {
    let mut pieces = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if !is_table_row(lines[i]) {
            pieces.push(Piece::Line(lines[i]));
            i += 1;
            continue;
        }

        let run_end = lines[i..]
            .iter()
            .position(|line| !is_table_row(line))
            .map_or(lines.len(), |offset| i + offset);
        let run = &lines[i..run_end];

        match build_table(run) {
            Some(table) => pieces.push(Piece::Table(table)),
            None => pieces.extend(run.iter().copied().map(Piece::Line)),
        }

        i = run_end;
    }

    pieces
}

fn build_table(run: &[&str]) -> Option<Block> {
    if run.len() < 2 {
        return None;
    }
    if !run[1].contains('-') {
        tracing::debug!(rows = run.len(), "table candidate rejected: separator row has no dash");
        return None;
    }

    let headers = split_cells(run[0]).into_iter().map(parse_inlines).collect();
    let rows = run[2..]
        .iter()
        .map(|line| split_cells(line).into_iter().map(parse_inlines).collect())
        .collect();

    Some(Block::Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdflip_core::Inline;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<Vec<Inline>> {
        values.iter().map(|v| vec![Inline::text(*v)]).collect()
    }

    #[test]
    fn test_is_table_row() {
        assert!(is_table_row("A | B"));
        assert!(is_table_row("| A | B |"));
        assert!(is_table_row("---|---"));
        assert!(!is_table_row("| A |"));
        assert!(!is_table_row("no pipes"));
    }

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| A | B |"), vec!["A", "B"]);
        assert_eq!(split_cells("A | B"), vec!["A", "B"]);
        assert_eq!(split_cells("A || B"), vec!["A", "", "B"]);
    }

    #[test]
    fn test_simple_table() {
        let lines = ["A | B", "---|---", "1 | 2"];
        assert_eq!(
            extract_tables(&lines),
            vec![Piece::Table(Block::Table {
                headers: cells(&["A", "B"]),
                rows: vec![cells(&["1", "2"])],
            })]
        );
    }

    #[test]
    fn test_separator_without_dash_is_rejected() {
        let lines = ["A | B", "x | y", "1 | 2"];
        assert_eq!(
            extract_tables(&lines),
            vec![
                Piece::Line("A | B"),
                Piece::Line("x | y"),
                Piece::Line("1 | 2"),
            ]
        );
    }

    #[test]
    fn test_single_row_is_not_a_table() {
        let lines = ["intro", "A | B", "outro"];
        assert_eq!(
            extract_tables(&lines),
            vec![Piece::Line("intro"), Piece::Line("A | B"), Piece::Line("outro")]
        );
    }

    #[test]
    fn test_cell_count_mismatch_is_kept() {
        let lines = ["| A | B | C |", "|---|---|", "| 1 | 2 |", "text"];
        assert_eq!(
            extract_tables(&lines),
            vec![
                Piece::Table(Block::Table {
                    headers: cells(&["A", "B", "C"]),
                    rows: vec![cells(&["1", "2"])],
                }),
                Piece::Line("text"),
            ]
        );
    }

    #[test]
    fn test_cells_are_inline_parsed() {
        let lines = ["**A** | B", "-|-", "`x` | y"];
        assert_eq!(
            extract_tables(&lines),
            vec![Piece::Table(Block::Table {
                headers: vec![
                    vec![Inline::Strong(vec![Inline::text("A")])],
                    vec![Inline::text("B")],
                ],
                rows: vec![vec![
                    vec![Inline::Code("x".to_string())],
                    vec![Inline::text("y")],
                ]],
            })]
        );
    }
}
