// File: ./src/schedule.rs
// Scans sanitized schedule tables into per-week blocks of employee shifts.
use crate::error::ScheduleError;
use crate::model::{Cell, WorkdayRecord, build_workday, resolve_date_token};
use crate::table::{Row, ScheduleDocument};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// One header row's worth of columns (usually a week) and the shifts found
/// under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub dates: Vec<NaiveDate>,
    pub employees: BTreeMap<String, Vec<WorkdayRecord>>,
}

impl ScheduleBlock {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            employees: BTreeMap::new(),
        }
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn workdays(&self, employee: &str) -> &[WorkdayRecord] {
        self.employees.get(employee).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Settings the scan needs from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub timezone: Tz,
    pub date_lookback_days: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Vancouver,
            date_lookback_days: 14,
        }
    }
}

enum ScanState {
    NoActiveBlock,
    ActiveBlock(ScheduleBlock),
}

/// Builds schedule blocks from a sanitized document.
///
/// A header row closes the block in progress and opens a new one. Shift cells
/// that cannot be turned into a workday are logged and skipped; an employee
/// row before any header row, or a header date that cannot be resolved, aborts
/// the scan.
pub fn extract_schedules(
    doc: &ScheduleDocument,
    reference: NaiveDate,
    options: &ScanOptions,
) -> Result<Vec<ScheduleBlock>, ScheduleError> {
    if !doc.is_sanitized() {
        return Err(ScheduleError::Unsanitized);
    }

    let mut blocks = Vec::new();
    let mut state = ScanState::NoActiveBlock;

    for row in doc.rows() {
        if row.is_header() {
            let dates = row
                .cells
                .iter()
                .skip(1)
                .map(|c| resolve_date_token(c.as_str(), reference, options.date_lookback_days))
                .collect::<Result<Vec<_>, _>>()?;
            log::debug!("Opening schedule block {:?}", dates.first());

            if let ScanState::ActiveBlock(block) = state {
                blocks.push(block);
            }
            state = ScanState::ActiveBlock(ScheduleBlock::new(dates));
            continue;
        }

        match &mut state {
            ScanState::ActiveBlock(block) => scan_employee_row(block, row, &options.timezone),
            ScanState::NoActiveBlock => {
                let name = row.cells.first().map(Cell::to_string).unwrap_or_default();
                return Err(ScheduleError::EmployeeRowBeforeHeader(name));
            }
        }
    }

    if let ScanState::ActiveBlock(block) = state {
        blocks.push(block);
    }
    log::debug!("Extracted {} schedule block(s)", blocks.len());
    Ok(blocks)
}

fn scan_employee_row(block: &mut ScheduleBlock, row: &Row, tz: &Tz) {
    let Some((name_cell, shifts)) = row.cells.split_first() else {
        return;
    };
    let name = name_cell.as_str();

    for (date, cell) in block.dates.iter().zip(shifts) {
        let token = match cell {
            Cell::NoShift => continue,
            Cell::Shift(token) => token,
            other => {
                log::warn!("Skipping unnormalized cell {:?} for {} on {}", other, name, date);
                continue;
            }
        };
        match build_workday(token, *date, tz) {
            Ok(workday) => block
                .employees
                .entry(name.to_string())
                .or_default()
                .push(workday),
            Err(e) if e.is_recoverable() => {
                log::warn!("Dropping shift for {} on {}: {}", name, date, e);
            }
            Err(e) => {
                log::error!("Unexpected error for {} on {}: {}", name, date, e);
            }
        }
    }
}
