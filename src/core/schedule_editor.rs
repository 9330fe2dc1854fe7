use crate::core::schedule_draft::{ScheduleDraft, ScheduleField};
use crate::core::time_grid::{available_end_times, TimeSlot};
use crate::domain::model::Schedule;
use crate::domain::ports::ScheduleListener;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;

pub type Clock = fn() -> NaiveDate;

/// 以 UTC 日期為準
fn utc_today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Added(Schedule),
    Rejected { missing: ScheduleField },
}

impl CommitOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, CommitOutcome::Added(_))
    }
}

/// 可預約時段的登錄編輯器
///
/// 持有一筆編輯中的草稿與已加入的時段清單，並把每次新增、
/// 移除的結果回報給擁有者（`ScheduleListener`）。
pub struct RegistrationEditor<L: ScheduleListener> {
    draft: ScheduleDraft,
    committed: Vec<Schedule>,
    listener: L,
    clock: Clock,
}

impl<L: ScheduleListener> RegistrationEditor<L> {
    pub fn new(listener: L) -> Self {
        Self::with_clock(listener, utc_today)
    }

    pub fn with_clock(listener: L, clock: Clock) -> Self {
        Self {
            draft: ScheduleDraft::new(clock()),
            committed: Vec::new(),
            listener,
            clock,
        }
    }

    pub fn draft(&self) -> &Schedule {
        self.draft.schedule()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.draft.selected_date()
    }

    pub fn committed(&self) -> &[Schedule] {
        &self.committed
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn invalid_range(&self) -> bool {
        self.draft.invalid_range()
    }

    pub fn range_warning(&self) -> Option<&'static str> {
        self.draft.range_warning()
    }

    pub fn end_time_choices(&self) -> &'static [TimeSlot] {
        self.draft.end_time_choices()
    }

    pub fn set_field(&mut self, field: ScheduleField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn pick_date(&mut self, date: NaiveDate) {
        self.draft.pick_date(date);
    }

    pub fn commit(&mut self) -> CommitOutcome {
        if let Some(missing) = self.draft.missing_field() {
            tracing::debug!("Schedule not added, {} is empty", missing);
            return CommitOutcome::Rejected { missing };
        }

        let schedule = self.draft.schedule().clone();
        if self.draft.invalid_range() {
            tracing::warn!("Adding schedule with identical start and end time: {}", schedule);
        }

        // 先通知擁有者，再加入清單並重設草稿
        self.listener.on_add(std::slice::from_ref(&schedule));
        self.committed.push(schedule.clone());
        self.draft.reset((self.clock)());

        tracing::info!("➕ Added schedule {} ({} total)", schedule, self.committed.len());
        CommitOutcome::Added(schedule)
    }

    /// 依選單的限制填入一筆時段後加入；結束時間須在開始時間之後（含）
    pub fn add_schedule(
        &mut self,
        date: NaiveDate,
        start: TimeSlot,
        end: TimeSlot,
    ) -> Result<CommitOutcome> {
        let choices = available_end_times(start);
        if !choices.contains(&end) {
            return Err(BookingError::ValidationError {
                message: format!(
                    "End time {} is not available after {} (choose {} ~ {})",
                    end,
                    start,
                    choices[0],
                    choices[choices.len() - 1]
                ),
            });
        }

        self.pick_date(date);
        self.set_field(ScheduleField::StartTime, start.as_str());
        self.set_field(ScheduleField::EndTime, end.as_str());
        Ok(self.commit())
    }

    pub fn remove(&mut self, index: usize) -> Result<Schedule> {
        let len = self.committed.len();
        if index >= len {
            return Err(BookingError::ScheduleIndexOutOfRange { index, len });
        }

        let removed = self.committed[index].clone();
        let remaining: Vec<Schedule> = self
            .committed
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, s)| s.clone())
            .collect();

        self.committed = remaining;
        self.listener.on_cancel_added(&self.committed);

        tracing::info!("➖ Removed schedule {} ({} left)", removed, self.committed.len());
        Ok(removed)
    }

    pub fn into_parts(self) -> (Vec<Schedule>, L) {
        (self.committed, self.listener)
    }
}

/// 把回呼結果累積起來的擁有者，同步反映編輯器的清單
#[derive(Debug, Default, Clone)]
pub struct PendingSchedules {
    schedules: Vec<Schedule>,
}

impl PendingSchedules {
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn into_schedules(self) -> Vec<Schedule> {
        self.schedules
    }
}

impl ScheduleListener for PendingSchedules {
    fn on_add(&mut self, new_entries: &[Schedule]) {
        self.schedules.extend_from_slice(new_entries);
    }

    fn on_cancel_added(&mut self, remaining: &[Schedule]) {
        self.schedules = remaining.to_vec();
    }
}
