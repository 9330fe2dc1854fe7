use crate::utils::error::BookingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 09:00 到 21:00 的整點時段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u8);

pub const FIRST_HOUR: u8 = 9;
pub const LAST_HOUR: u8 = 21;

pub const TIME_GRID: [TimeSlot; 13] = [
    TimeSlot(9),
    TimeSlot(10),
    TimeSlot(11),
    TimeSlot(12),
    TimeSlot(13),
    TimeSlot(14),
    TimeSlot(15),
    TimeSlot(16),
    TimeSlot(17),
    TimeSlot(18),
    TimeSlot(19),
    TimeSlot(20),
    TimeSlot(21),
];

const LABELS: [&str; 13] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
    "19:00", "20:00", "21:00",
];

impl TimeSlot {
    pub const OPENING: TimeSlot = TimeSlot(FIRST_HOUR);

    pub fn from_hour(hour: u8) -> Option<Self> {
        (FIRST_HOUR..=LAST_HOUR).contains(&hour).then_some(TimeSlot(hour))
    }

    pub fn parse(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .position(|l| *l == label)
            .map(|index| TIME_GRID[index])
    }

    pub fn hour(&self) -> u8 {
        self.0
    }

    fn index(&self) -> usize {
        (self.0 - FIRST_HOUR) as usize
    }

    pub fn as_str(&self) -> &'static str {
        LABELS[self.index()]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::parse(s).ok_or_else(|| BookingError::InvalidTimeSlot(s.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.as_str().to_string()
    }
}

/// 結束時間只能選開始時間之後（含）的時段
pub fn available_end_times(start: TimeSlot) -> &'static [TimeSlot] {
    &TIME_GRID[start.index()..]
}

/// 字串版本；不在表上的時間回傳整張表
pub fn available_end_times_for(start: &str) -> &'static [TimeSlot] {
    match TimeSlot::parse(start) {
        Some(slot) => available_end_times(slot),
        None => {
            tracing::debug!("Start time '{}' not on the grid, offering every slot", start);
            &TIME_GRID
        }
    }
}
