pub mod booking;
pub mod report;
pub mod reservation_card;
pub mod schedule_draft;
pub mod schedule_editor;
pub mod time_grid;

pub use crate::domain::model::{Reservation, Schedule};
pub use crate::domain::ports::{BookingApi, ConfigProvider, ScheduleListener, Storage};
pub use crate::utils::error::Result;
