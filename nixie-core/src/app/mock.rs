//! Recording board for application tests

use std::vec::Vec as StdVec;

use embedded_hal::delay::DelayNs;
use rgb::RGB8;

use crate::clock::TimeOfDay;
use crate::settings::Settings;
use crate::traits::{
    InputSource, LedStrip, NixieDisplay, RealTimeClock, RtcError, SettingsStore, StorageError,
};

#[derive(Default)]
pub struct MockBoard {
    pub digits: StdVec<StdVec<u8>>,
    pub blanks: usize,
    pub dots: bool,
    pub rtc: TimeOfDay,
    pub rtc_fail: bool,
    pub rtc_reads: usize,
    pub rtc_writes: StdVec<TimeOfDay>,
    pub stored: Option<Settings>,
    pub save_fail: bool,
    pub save_attempts: usize,
    pub frames: StdVec<(StdVec<RGB8>, u8)>,
    pub led_blanks: usize,
    pub delayed_ns: u64,
}

impl MockBoard {
    pub fn last_digits(&self) -> &[u8] {
        self.digits.last().map(|d| d.as_slice()).unwrap_or(&[])
    }
}

impl NixieDisplay for MockBoard {
    fn write_digits(&mut self, digits: &[u8]) {
        self.digits.push(StdVec::from(digits));
    }

    fn blank(&mut self) {
        self.blanks += 1;
    }

    fn set_dots(&mut self, on: bool) {
        self.dots = on;
    }
}

impl RealTimeClock for MockBoard {
    fn read_time(&mut self) -> Result<TimeOfDay, RtcError> {
        self.rtc_reads += 1;
        if self.rtc_fail {
            return Err(RtcError::Bus);
        }
        Ok(self.rtc)
    }

    fn write_time(&mut self, time: TimeOfDay) -> Result<(), RtcError> {
        if self.rtc_fail {
            return Err(RtcError::Bus);
        }
        self.rtc = time;
        self.rtc_writes.push(time);
        Ok(())
    }
}

impl SettingsStore for MockBoard {
    fn load(&mut self) -> Result<Option<Settings>, StorageError> {
        Ok(self.stored)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.save_attempts += 1;
        if self.save_fail {
            return Err(StorageError::Flash);
        }
        self.stored = Some(*settings);
        Ok(())
    }
}

impl LedStrip for MockBoard {
    fn write(&mut self, frame: &[RGB8], brightness: u8) {
        self.frames.push((StdVec::from(frame), brightness));
    }

    fn blank(&mut self) {
        self.led_blanks += 1;
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.delayed_ns += ns as u64;
    }
}

/// Button levels held constant until changed
#[derive(Default)]
pub struct Levels(pub [bool; 4]);

impl InputSource for Levels {
    fn is_pressed(&mut self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }
}
