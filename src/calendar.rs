// File: ./src/calendar.rs
// Turns an employee's workdays into VEVENTs with VALARM reminders.
use crate::config::Config;
use crate::model::WorkdayRecord;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use icalendar::{Alarm, CalendarDateTime, Component, Event, EventLike, Trigger};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, AsRefStr)]
pub enum EventKind {
    #[strum(serialize = "w")]
    Work,
    #[strum(serialize = "l")]
    Lunch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AlarmAnchor {
    #[strum(serialize = "START")]
    Start,
    #[strum(serialize = "END")]
    End,
}

/// A display reminder `before` the anchor of its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftAlarm {
    pub before: Duration,
    pub anchor: AlarmAnchor,
}

impl ShiftAlarm {
    pub fn before_start(minutes: u32) -> Self {
        Self {
            before: Duration::minutes(minutes as i64),
            anchor: AlarmAnchor::Start,
        }
    }

    pub fn before_end(minutes: u32) -> Self {
        Self {
            before: Duration::minutes(minutes as i64),
            anchor: AlarmAnchor::End,
        }
    }

    fn trigger(&self) -> Trigger {
        match self.anchor {
            AlarmAnchor::Start => Trigger::before_start(self.before),
            AlarmAnchor::End => Trigger::before_end(self.before),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftEvent {
    pub kind: EventKind,
    pub uid: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
    pub alarms: Vec<ShiftAlarm>,
}

impl ShiftEvent {
    /// `{kind}/{epoch seconds of start}/{employee slug}/{namespace}`; stable
    /// across runs so re-imports update instead of duplicating.
    pub fn make_uid(kind: EventKind, start: &DateTime<Tz>, slug: &str, namespace: &str) -> String {
        format!("{}/{}/{}/{}", kind.as_ref(), start.timestamp(), slug, namespace)
    }

    fn to_event(&self, stamp: DateTime<Utc>) -> Event {
        let mut event = Event::new();
        event.uid(&self.uid);
        event.summary(&self.summary);
        event.timestamp(stamp);
        event.starts(utc_time(&self.start));
        event.ends(utc_time(&self.end));

        for (idx, reminder) in self.alarms.iter().enumerate() {
            let mut alarm = Alarm::display(&self.summary, reminder.trigger());
            // Left unset, both would be filled with random/current values on output.
            alarm.uid(&format!("{}/alarm/{}", self.uid, idx));
            alarm.timestamp(stamp);
            event.alarm(alarm);
        }
        event.done()
    }
}

// UTC instants need no VTIMEZONE, so the document stands on its own.
fn utc_time(dt: &DateTime<Tz>) -> CalendarDateTime {
    CalendarDateTime::Utc(dt.with_timezone(&Utc))
}

/// Builds and serializes the calendar of one employee.
#[derive(Debug, Clone)]
pub struct CalendarSerializer {
    namespace: String,
    prodid: String,
    work_summary: String,
    lunch_summary: String,
    lunch_length: Duration,
    work_alarms: Vec<ShiftAlarm>,
    lunch_alarms: Vec<ShiftAlarm>,
    stamp: DateTime<Utc>,
}

impl CalendarSerializer {
    pub fn new(config: &Config) -> Self {
        Self {
            namespace: config.uid_namespace.clone(),
            prodid: config.prodid.clone(),
            work_summary: config.work_summary.clone(),
            lunch_summary: config.lunch_summary.clone(),
            lunch_length: Duration::minutes(config.lunch_minutes as i64),
            work_alarms: config
                .work_reminders_mins
                .iter()
                .map(|m| ShiftAlarm::before_start(*m))
                .collect(),
            lunch_alarms: vec![
                ShiftAlarm::before_start(config.lunch_start_reminder_mins),
                ShiftAlarm::before_end(config.lunch_end_reminder_mins),
            ],
            stamp: Utc::now(),
        }
    }

    /// Fixes DTSTAMP so identical input serializes to identical bytes.
    pub fn with_stamp(mut self, stamp: DateTime<Utc>) -> Self {
        self.stamp = stamp;
        self
    }

    /// One work event per workday plus a lunch event when a lunch time is
    /// known, ordered by start then kind.
    pub fn events(&self, slug: &str, workdays: &[WorkdayRecord]) -> Vec<ShiftEvent> {
        let mut events = Vec::with_capacity(workdays.len() * 2);
        for workday in workdays {
            events.push(ShiftEvent {
                kind: EventKind::Work,
                uid: ShiftEvent::make_uid(EventKind::Work, &workday.start, slug, &self.namespace),
                start: workday.start,
                end: workday.end,
                summary: self.work_summary.clone(),
                alarms: self.work_alarms.clone(),
            });

            if let Some(lunch) = workday.lunch {
                events.push(ShiftEvent {
                    kind: EventKind::Lunch,
                    uid: ShiftEvent::make_uid(EventKind::Lunch, &lunch, slug, &self.namespace),
                    start: lunch,
                    end: lunch + self.lunch_length,
                    summary: self.lunch_summary.clone(),
                    alarms: self.lunch_alarms.clone(),
                });
            }
        }
        events.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.uid.cmp(&b.uid))
        });
        events
    }

    /// A complete VCALENDAR document for one employee.
    pub fn serialize(&self, slug: &str, workdays: &[WorkdayRecord]) -> Vec<u8> {
        let mut output = format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:{}\r\nCALSCALE:GREGORIAN\r\n",
            self.prodid
        );

        for event in self.events(slug, workdays) {
            let full_ics = event.to_event(self.stamp).to_string();
            output.push_str(full_ics.trim_end());
            output.push_str("\r\n");
        }

        output.push_str("END:VCALENDAR\r\n");
        output.into_bytes()
    }
}

/// Serializes `workdays` with the settings of `config`.
pub fn serialize_to_calendar(slug: &str, workdays: &[WorkdayRecord], config: &Config) -> Vec<u8> {
    CalendarSerializer::new(config).serialize(slug, workdays)
}
