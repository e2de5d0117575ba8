//! Table projection of the library.
//!
//! The table is never rebuilt after a mutation. Rows are appended, patched or
//! dropped one at a time, and each row is tied to its book through an explicit
//! `BookId -> RowId` map, so a row keeps pointing at the same book however many
//! rows before it disappear.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::book::{Book, BookId};

/// Identity of a visible table row. Shown to the user as `#n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = std::num::ParseIntError;

    /// Accepts `3` or `#3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.strip_prefix('#').unwrap_or(s).parse().map(RowId)
    }
}

/// Column headers, in cell order, followed by the action column.
pub const HEADERS: [&str; 5] = ["Title", "Author", "Pages", "Status", "Action"];

/// One table row: four read-only cells plus the toggle control's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    book: BookId,
    cells: [String; 4],
    toggle_label: &'static str,
}

impl Row {
    fn from_book(id: RowId, book: &Book) -> Self {
        Self {
            id,
            book: book.id(),
            cells: [
                book.title().to_string(),
                book.author().to_string(),
                book.pages().to_string(),
                book.read_display().to_string(),
            ],
            toggle_label: book.toggle_label(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn book(&self) -> BookId {
        self.book
    }

    /// Title, author, pages and read status, in that order.
    pub fn cells(&self) -> &[String; 4] {
        &self.cells
    }

    pub fn read_cell(&self) -> &str {
        &self.cells[3]
    }

    pub fn toggle_label(&self) -> &'static str {
        self.toggle_label
    }
}

/// The visible mirror of the library.
#[derive(Debug, Clone)]
pub struct TableView {
    rows: Vec<Row>,
    by_book: HashMap<BookId, RowId>,
    next_row: u64,
    hidden: bool,
}

impl TableView {
    /// An empty, hidden table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            by_book: HashMap::new(),
            next_row: 1,
            hidden: true,
        }
    }

    /// Replace all rows with one per book. Used once, for the initial load.
    pub fn render_library(&mut self, books: &[Book]) {
        self.rows.clear();
        self.by_book.clear();
        for book in books {
            self.push_row(book);
        }
        self.update_visibility();
    }

    /// Add a row for a newly added book.
    pub fn append_row(&mut self, book: &Book) -> RowId {
        let id = self.push_row(book);
        self.update_visibility();
        id
    }

    /// Refresh the read cell and toggle label of the book's row only.
    /// Returns false if the book has no row.
    pub fn patch_read(&mut self, book: &Book) -> bool {
        let Some(index) = self.index_of_book(book.id()) else {
            return false;
        };
        let row = &mut self.rows[index];
        row.cells[3] = book.read_display().to_string();
        row.toggle_label = book.toggle_label();
        true
    }

    /// Drop the book's row. Returns the row id it had.
    pub fn remove_row(&mut self, book: BookId) -> Option<RowId> {
        let index = self.index_of_book(book)?;
        let row = self.rows.remove(index);
        self.by_book.remove(&book);
        self.update_visibility();
        Some(row.id)
    }

    /// The book a visible row belongs to.
    pub fn row_book(&self, row: RowId) -> Option<BookId> {
        self.rows.iter().find(|r| r.id == row).map(|r| r.book)
    }

    /// The row currently showing a book.
    pub fn row_for(&self, book: BookId) -> Option<RowId> {
        self.by_book.get(&book).copied()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hidden whenever there are no rows.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Plain-text rendering: a header line, a rule, then one line per row.
    /// A hidden table renders as `None`.
    pub fn render(&self) -> Option<String> {
        if self.hidden {
            return None;
        }

        let lines: Vec<[String; 6]> = self
            .rows
            .iter()
            .map(|row| {
                let [title, author, pages, status] = row.cells.clone();
                [
                    row.id.to_string(),
                    title,
                    author,
                    pages,
                    status,
                    row.toggle_label.to_string(),
                ]
            })
            .collect();

        let header = [
            "Row", HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3], HEADERS[4],
        ];
        let mut widths = header.map(|h| h.chars().count());
        for line in &lines {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, header.iter().copied(), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, rule.iter().map(String::as_str), &widths);
        for line in &lines {
            push_line(&mut out, line.iter().map(String::as_str), &widths);
        }
        out.truncate(out.trim_end().len());
        Some(out)
    }

    fn push_row(&mut self, book: &Book) -> RowId {
        let id = RowId(self.next_row);
        self.next_row += 1;
        self.rows.push(Row::from_book(id, book));
        self.by_book.insert(book.id(), id);
        id
    }

    fn index_of_book(&self, book: BookId) -> Option<usize> {
        let row = self.by_book.get(&book)?;
        self.rows.iter().position(|r| r.id == *row)
    }

    fn update_visibility(&mut self) {
        self.hidden = self.rows.is_empty();
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
