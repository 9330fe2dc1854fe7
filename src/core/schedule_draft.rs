use crate::core::time_grid::{available_end_times_for, TimeSlot};
use crate::domain::model::Schedule;
use chrono::NaiveDate;
use std::fmt;

pub const RANGE_WARNING: &str = "* 시작 시간과 종료 시간은 다르게 선택해야합니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleField {
    Date,
    StartTime,
    EndTime,
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleField::Date => "date",
            ScheduleField::StartTime => "startTime",
            ScheduleField::EndTime => "endTime",
        };
        f.write_str(name)
    }
}

/// 編輯中的單一時段，以及日期選擇器目前選取的日期
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    schedule: Schedule,
    selected_date: NaiveDate,
}

impl ScheduleDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            schedule: Schedule::new(
                iso_date(today),
                TimeSlot::OPENING.as_str(),
                TimeSlot::OPENING.as_str(),
            ),
            selected_date: today,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn set_field(&mut self, field: ScheduleField, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!("Draft {} set to '{}'", field, value);
        match field {
            ScheduleField::Date => self.schedule.date = value,
            ScheduleField::StartTime => self.schedule.start_time = value,
            ScheduleField::EndTime => self.schedule.end_time = value,
        }
    }

    /// 日期選擇器變更
    pub fn pick_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.set_field(ScheduleField::Date, iso_date(date));
    }

    /// 日期清空、時間回到 09:00；選擇器獨立回到今天
    pub fn reset(&mut self, today: NaiveDate) {
        self.schedule = Schedule::new("", TimeSlot::OPENING.as_str(), TimeSlot::OPENING.as_str());
        self.selected_date = today;
    }

    pub fn invalid_range(&self) -> bool {
        self.schedule.start_time == self.schedule.end_time
    }

    pub fn range_warning(&self) -> Option<&'static str> {
        self.invalid_range().then_some(RANGE_WARNING)
    }

    pub fn end_time_choices(&self) -> &'static [TimeSlot] {
        available_end_times_for(&self.schedule.start_time)
    }

    /// 第一個空白欄位
    pub fn missing_field(&self) -> Option<ScheduleField> {
        if self.schedule.date.is_empty() {
            Some(ScheduleField::Date)
        } else if self.schedule.start_time.is_empty() {
            Some(ScheduleField::StartTime)
        } else if self.schedule.end_time.is_empty() {
            Some(ScheduleField::EndTime)
        } else {
            None
        }
    }
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
