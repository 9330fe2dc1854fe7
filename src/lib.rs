pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{
    http::HttpBookingApi,
    storage::{LocalStorage, SessionStore},
};
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::ClientConfig;
pub use crate::core::{
    booking::{ActivityForm, BookingService, ReservationOverview},
    reservation_card::{ModalState, ReservationCard},
    schedule_draft::ScheduleField,
    schedule_editor::{CommitOutcome, PendingSchedules, RegistrationEditor},
    time_grid::{available_end_times, available_end_times_for, TimeSlot, TIME_GRID},
};
pub use crate::utils::error::{BookingError, Result};
