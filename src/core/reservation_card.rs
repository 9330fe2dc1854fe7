use crate::domain::model::{NewReview, Reservation, ReservationStatus};
use crate::utils::error::{BookingError, Result};
use crate::utils::format::format_krw;
use crate::utils::validation::{validate_non_empty_string, validate_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    CancelConfirm,
    Review,
}

/// 我的預約列表中的一列
#[derive(Debug, Clone)]
pub struct ReservationCard {
    reservation: Reservation,
    cancelled: bool,
    review_submitted: bool,
    modal: ModalState,
}

impl ReservationCard {
    pub fn new(reservation: Reservation) -> Self {
        let review_submitted = reservation.review_submitted;
        Self {
            reservation,
            cancelled: false,
            review_submitted,
            modal: ModalState::Closed,
        }
    }

    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    pub fn id(&self) -> i64 {
        self.reservation.id
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_review_submitted(&self) -> bool {
        self.review_submitted
    }

    pub fn can_cancel(&self) -> bool {
        self.reservation.status == ReservationStatus::Pending && !self.cancelled
    }

    pub fn can_review(&self) -> bool {
        self.reservation.status == ReservationStatus::Completed && !self.review_submitted
    }

    pub fn open_cancel_modal(&mut self) -> Result<()> {
        if !self.can_cancel() {
            return Err(self.unavailable("cancel", "only pending reservations can be cancelled"));
        }
        self.modal = ModalState::CancelConfirm;
        Ok(())
    }

    pub fn open_review_modal(&mut self) -> Result<()> {
        if !self.can_review() {
            return Err(self.unavailable(
                "review",
                "reviews are for completed reservations without a review",
            ));
        }
        self.modal = ModalState::Review;
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
        self.modal = ModalState::Closed;
    }

    pub(crate) fn mark_review_submitted(&mut self) {
        self.review_submitted = true;
        self.modal = ModalState::Closed;
    }

    pub fn summary_line(&self) -> String {
        let r = &self.reservation;
        format!(
            "{} · {} ~ {} · {}명",
            r.date, r.start_time, r.end_time, r.head_count
        )
    }

    pub fn price_label(&self) -> String {
        format_krw(self.reservation.total_price)
    }

    pub fn status_label(&self) -> &'static str {
        if self.cancelled {
            ReservationStatus::Canceled.label()
        } else {
            self.reservation.status.label()
        }
    }

    fn unavailable(&self, action: &str, reason: &str) -> BookingError {
        BookingError::InvalidReservationAction {
            id: self.reservation.id,
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub fn validate_review(review: &NewReview) -> Result<()> {
    validate_range("rating", review.rating, 1, 5)?;
    validate_non_empty_string("content", &review.content)
        .map_err(|_| BookingError::ValidationError {
            message: "Review content cannot be empty".to_string(),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::model::ReservationActivity;

    pub(crate) fn reservation(id: i64, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            team_id: "4-14".to_string(),
            user_id: 1,
            activity: ReservationActivity {
                id: 100,
                title: "Hanok Stay Tea Class".to_string(),
                banner_image_url: String::new(),
            },
            schedule_id: 5,
            status,
            review_submitted: false,
            total_price: 64000,
            head_count: 2,
            date: "2024-05-01".to_string(),
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
        }
    }

    #[test]
    fn test_pending_card_offers_cancel_only() {
        let mut card = ReservationCard::new(reservation(1, ReservationStatus::Pending));
        assert!(card.can_cancel());
        assert!(!card.can_review());
        assert!(card.open_review_modal().is_err());
        assert_eq!(card.modal(), ModalState::Closed);

        card.open_cancel_modal().unwrap();
        assert_eq!(card.modal(), ModalState::CancelConfirm);

        card.mark_cancelled();
        assert!(!card.can_cancel());
        assert_eq!(card.modal(), ModalState::Closed);
        assert_eq!(card.status_label(), "예약 취소");
    }

    #[test]
    fn test_completed_card_with_review_offers_nothing() {
        let mut r = reservation(2, ReservationStatus::Completed);
        r.review_submitted = true;
        let mut card = ReservationCard::new(r);
        assert!(!card.can_review());
        assert!(matches!(
            card.open_review_modal(),
            Err(BookingError::InvalidReservationAction { id: 2, .. })
        ));
    }

    #[test]
    fn test_labels() {
        let card = ReservationCard::new(reservation(3, ReservationStatus::Confirmed));
        assert_eq!(card.summary_line(), "2024-05-01 · 10:00 ~ 12:00 · 2명");
        assert_eq!(card.price_label(), "₩64,000");
        assert_eq!(card.status_label(), "예약 승인");
    }

    #[test]
    fn test_validate_review() {
        let ok = NewReview {
            rating: 4,
            content: "Great".to_string(),
        };
        assert!(validate_review(&ok).is_ok());

        let bad_rating = NewReview {
            rating: 0,
            content: "Great".to_string(),
        };
        assert!(validate_review(&bad_rating).is_err());

        let blank = NewReview {
            rating: 5,
            content: "   ".to_string(),
        };
        assert!(validate_review(&blank).is_err());
    }
}
