//! Aligned text tables for buffer diagnostics.
//!
//! A table is a list of rows, each row an ordered list of [`Cell`]s. Column `n`
//! of every row is right-aligned to the widest cell in that column, with one
//! space of separation. Numeric cells are stringified through the caller's
//! `number_to_string` callback, so the renderer never needs to know what a
//! number is.
//!
//! Once the accumulated width reaches `fill_to_width`, the remaining columns
//! continue in a new block below, separated by a blank line:
//!
//! ```
//! use bufcheck_table::{Cell, PrettyTable, TableOptions, TableRenderer};
//!
//! let fmt = |n: &u32| format!("{:02x}", n);
//! let opts = TableOptions::new(120, &fmt);
//! let rows: Vec<Vec<Cell<u32>>> = vec![
//!     vec!["actual ==".into(), Cell::Value(1), Cell::Value(5)],
//!     vec!["failed ->".into(), "".into(), "xx".into()],
//! ];
//! let out = PrettyTable.render(&opts, &rows);
//! assert_eq!(out, " actual == 01 05\n failed ->    xx");
//! ```

use std::fmt;

/// One table cell: pre-rendered text or a value for the numeric callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<N> {
    Text(String),
    Value(N),
}

impl<N> Cell<N> {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn render(&self, number_to_string: &dyn Fn(&N) -> String) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Value(n) => number_to_string(n),
        }
    }
}

impl<N> From<&str> for Cell<N> {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl<N> From<String> for Cell<N> {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// One labeled row; the label is just the first cell.
pub type Row<N> = Vec<Cell<N>>;

/// Rendering configuration.
pub struct TableOptions<'a, N> {
    /// Start a new block once the current one is at least this wide.
    pub fill_to_width: usize,
    /// Used for every [`Cell::Value`].
    pub number_to_string: &'a dyn Fn(&N) -> String,
}

impl<'a, N> TableOptions<'a, N> {
    pub fn new(fill_to_width: usize, number_to_string: &'a dyn Fn(&N) -> String) -> Self {
        Self {
            fill_to_width,
            number_to_string,
        }
    }
}

impl<N> fmt::Debug for TableOptions<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("fill_to_width", &self.fill_to_width)
            .finish_non_exhaustive()
    }
}

/// Turns labeled rows into one aligned multi-line string.
pub trait TableRenderer<N> {
    fn render(&self, opts: &TableOptions<'_, N>, rows: &[Row<N>]) -> String;
}

/// Default renderer: right-aligned columns, wrapped into blocks by width.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyTable;

impl<N> TableRenderer<N> for PrettyTable {
    fn render(&self, opts: &TableOptions<'_, N>, rows: &[Row<N>]) -> String {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return String::new();
        }

        let rendered: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.render(opts.number_to_string))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                rendered
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
                    + 1
            })
            .collect();

        let mut blocks = Vec::new();
        let mut block_start = 0;
        let mut block_width = 0;
        for (col, width) in widths.iter().enumerate() {
            block_width += width;
            if block_width >= opts.fill_to_width || col + 1 == columns {
                blocks.push(block_start..col + 1);
                block_start = col + 1;
                block_width = 0;
            }
        }

        blocks
            .into_iter()
            .map(|cols| {
                rendered
                    .iter()
                    .map(|row| {
                        let mut line = String::new();
                        for col in cols.clone() {
                            if let Some(cell) = row.get(col) {
                                let pad = widths[col].saturating_sub(cell.chars().count());
                                line.extend(std::iter::repeat(' ').take(pad));
                                line.push_str(cell);
                            }
                        }
                        line.trim_end().to_string()
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
