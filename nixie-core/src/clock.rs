//! Time of day and the always-on schedule

use heapless::Vec;

use serde::{Deserialize, Serialize};

/// Maximum entries in the always-on schedule
pub const MAX_SCHEDULE_ENTRIES: usize = 8;

/// Minutes in a day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// 24-hour wall clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Create a time, returning `None` when a field is out of range
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Advance by one second
    ///
    /// The second always advances; minutes and hours only carry when
    /// `carry` is set, so a time being edited by hand is not disturbed by
    /// the running clock.
    pub fn tick(&mut self, carry: bool) {
        self.second += 1;
        if self.second == 60 {
            self.second = 0;
            if carry {
                self.minute += 1;
                if self.minute == 60 {
                    self.minute = 0;
                    self.inc_hour();
                }
            }
        }
    }

    /// Increment the hour, wrapping 23 -> 0
    pub fn inc_hour(&mut self) {
        self.hour = (self.hour + 1) % 24;
    }

    /// Increment the minute, wrapping 59 -> 0 without carrying
    pub fn inc_minute(&mut self) {
        self.minute = (self.minute + 1) % 60;
    }

    /// Increment the second, wrapping 59 -> 0 without carrying
    pub fn inc_second(&mut self) {
        self.second = (self.second + 1) % 60;
    }

    /// Minutes since midnight
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Tube digits, most significant first: `HH MM SS`
    pub fn digits(&self) -> [u8; 6] {
        [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
            self.second / 10,
            self.second % 10,
        ]
    }
}

/// One switch point of the always-on schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Display stays on from this point until the next entry
    pub on: bool,
    pub hour: u8,
    pub minute: u8,
}

impl ScheduleEntry {
    pub const fn new(on: bool, hour: u8, minute: u8) -> Self {
        Self { on, hour, minute }
    }

    /// Minutes since midnight of this switch point
    pub fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

/// Daily schedule of when the display ignores auto-off
///
/// Entries are sorted by time and the first one starts at midnight, so
/// every minute of the day is covered by exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlwaysOnSchedule {
    entries: Vec<ScheduleEntry, MAX_SCHEDULE_ENTRIES>,
}

impl AlwaysOnSchedule {
    /// Build a schedule, `None` if there are too many entries
    pub fn from_entries(entries: &[ScheduleEntry]) -> Option<Self> {
        Vec::from_slice(entries).ok().map(|entries| Self { entries })
    }

    /// A schedule that is always off
    pub fn never() -> Self {
        let mut entries = Vec::new();
        let _ = entries.push(ScheduleEntry::new(false, 0, 0));
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Check if the display should stay on at `time`
    ///
    /// Picks the last entry starting at or before `time`. Minutes-of-day
    /// are compared as a whole, so 10:15 falls under a 9:30 entry.
    pub fn is_on_at(&self, time: &TimeOfDay) -> bool {
        let now = time.minutes_of_day();
        self.entries
            .iter()
            .take_while(|entry| entry.minutes_of_day() <= now)
            .last()
            .map(|entry| entry.on)
            .unwrap_or(false)
    }
}

impl Default for AlwaysOnSchedule {
    /// On from 9:30 to 23:30
    fn default() -> Self {
        let mut entries = Vec::new();
        let _ = entries.push(ScheduleEntry::new(false, 0, 0));
        let _ = entries.push(ScheduleEntry::new(true, 9, 30));
        let _ = entries.push(ScheduleEntry::new(false, 23, 30));
        Self { entries }
    }
}
