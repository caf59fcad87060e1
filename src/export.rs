// File: ./src/export.rs
// Glue between extracted schedule blocks and the calendar files on disk.
use crate::calendar::CalendarSerializer;
use crate::config::Config;
use crate::model::slugify;
use crate::schedule::ScheduleBlock;
use crate::storage::CalendarStore;
use anyhow::Result;
use std::path::PathBuf;

/// One serialized calendar: an employee's shifts within one schedule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeCalendar {
    pub employee: String,
    pub slug: String,
    pub block_index: usize,
    pub ics: Vec<u8>,
}

/// Serializes every employee of every block that passes the configured filter.
pub fn render_calendars(
    blocks: &[ScheduleBlock],
    serializer: &CalendarSerializer,
    config: &Config,
) -> Vec<EmployeeCalendar> {
    let mut calendars = Vec::new();
    for (block_index, block) in blocks.iter().enumerate() {
        for (employee, workdays) in &block.employees {
            if !config.exports_employee(employee) {
                log::debug!("Skipping {} (filtered out)", employee);
                continue;
            }
            let slug = slugify(employee);
            calendars.push(EmployeeCalendar {
                employee: employee.clone(),
                ics: serializer.serialize(&slug, workdays),
                slug,
                block_index,
            });
        }
    }
    calendars
}

/// Writes the calendars of all blocks into `store`, returning the written paths.
pub fn export_schedules(
    blocks: &[ScheduleBlock],
    config: &Config,
    store: &CalendarStore,
) -> Result<Vec<PathBuf>> {
    let serializer = CalendarSerializer::new(config);
    render_calendars(blocks, &serializer, config)
        .into_iter()
        .map(|cal| store.write(&cal.slug, &blocks[cal.block_index], &cal.ics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use crate::schedule::extract_schedules;
    use crate::table::ScheduleDocument;
    use chrono::NaiveDate;

    fn blocks() -> Vec<ScheduleBlock> {
        let mut doc = ScheduleDocument::from_rows(&[
            &["", "Mon Jan 1", "Tue Jan 2"],
            &["Doe, Jane", "9AM - 5PM", "OFF"],
            &["Ste-Marie, Luc", "OFF", "1PM - 9PM LUNCH : 5PM"],
        ]);
        doc.sanitize();
        let reference = NaiveDate::from_ymd_opt(2023, 12, 28).unwrap();
        extract_schedules(&doc, reference, &Config::default().scan_options()).unwrap()
    }

    #[test]
    fn test_filter_applies() {
        let config = Config {
            employee_filter: vec!["Ste-Marie".to_string()],
            ..Config::default()
        };
        let cals = render_calendars(&blocks(), &CalendarSerializer::new(&config), &config);
        assert_eq!(cals.len(), 1);
        assert_eq!(cals[0].slug, "ste-marie-luc");
    }

    #[test]
    fn test_export_writes_one_file_per_employee() {
        let ctx = TestContext::new();
        let store = CalendarStore::new(ctx.get_calendars_dir().unwrap());
        let paths = export_schedules(&blocks(), &Config::default(), &store).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(
            paths
                .iter()
                .any(|p| p.ends_with("doe-jane/Schedule 2024-01-01 to 2024-01-02.ics"))
        );
    }
}
