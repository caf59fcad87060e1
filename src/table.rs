// File: ./src/table.rs
//! HTML schedule tables and the sanitizing pass that tags header rows and
//! normalizes shift cells.
//!
//! The document keeps only what the schedule scan needs: tables, their rows,
//! and the text of each cell. Sanitizing rewrites the cells in place and must
//! happen before [`crate::schedule::extract_schedules`] reads the document.
use crate::error::ScheduleError;
use crate::model::{Cell, normalize_cell};
use scraper::{ElementRef, Html, Node, Selector};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn is_header(&self) -> bool {
        matches!(self.cells.first(), Some(Cell::DatesHeader))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDocument {
    pub tables: Vec<Table>,
    sanitized: bool,
}

impl ScheduleDocument {
    /// Reads every `<table>` of a decoded HTML body, in document order.
    ///
    /// Rows of a nested table belong to that nested table only.
    pub fn parse(html: &str) -> Result<Self, ScheduleError> {
        let selector = |css: &str| {
            Selector::parse(css).map_err(|e| ScheduleError::Selector(format!("{css}: {e}")))
        };
        let table_selector = selector("table")?;
        let row_selector = selector("tr")?;

        let document = Html::parse_document(html);
        let tables = document
            .select(&table_selector)
            .map(|table| {
                let rows = table
                    .select(&row_selector)
                    .filter(|row| belongs_to(row, &table))
                    .map(|row| Row {
                        cells: row
                            .children()
                            .filter_map(ElementRef::wrap)
                            .filter(|c| matches!(c.value().name(), "td" | "th"))
                            .map(|c| Cell::Text(cell_text(c)))
                            .collect(),
                    })
                    .collect();
                Table { rows }
            })
            .collect();

        Ok(Self {
            tables,
            sanitized: false,
        })
    }

    /// Builds a single-table document from plain cell text.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|cells| Row {
                cells: cells.iter().map(|c| Cell::text(*c)).collect(),
            })
            .collect();
        Self {
            tables: vec![Table { rows }],
            sanitized: false,
        }
    }

    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.tables.iter().flat_map(|t| t.rows.iter())
    }

    pub fn sanitize(&mut self) {
        sanitize(self);
    }
}

// The closest enclosing <table> owns the row.
fn belongs_to(row: &ElementRef<'_>, table: &ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|n| n.value().as_element().is_some_and(|e| e.name() == "table"))
        .is_some_and(|n| n.id() == table.id())
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Normalizes every cell of every table in place.
///
/// - blank cells become `NoShift`,
/// - rows starting with two `NoShift` cells are removed,
/// - a row whose first cell is blank is a date header row,
/// - shift cells of employee rows go through [`normalize_cell`].
///
/// Running it again on a sanitized document changes nothing.
pub fn sanitize(doc: &mut ScheduleDocument) {
    for table in &mut doc.tables {
        table.rows.retain_mut(sanitize_row);
    }
    doc.sanitized = true;
}

fn sanitize_row(row: &mut Row) -> bool {
    for cell in &mut row.cells {
        if let Cell::Text(text) = cell {
            let trimmed = text.trim();
            *cell = if trimmed.is_empty() {
                Cell::NoShift
            } else {
                Cell::Text(trimmed.to_string())
            };
        }
    }

    if row.cells.iter().take(2).all(Cell::is_no_shift) {
        return false;
    }

    let blank_first = matches!(row.cells.first(), Some(Cell::NoShift));
    if blank_first {
        row.cells[0] = Cell::DatesHeader;
    } else if !row.is_header() {
        for cell in row.cells.iter_mut().skip(1) {
            if let Cell::Text(text) | Cell::Shift(text) = cell {
                *cell = normalize_cell(text);
            }
        }
    }
    true
}
