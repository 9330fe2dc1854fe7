use crate::core::reservation_card::{validate_review, ModalState, ReservationCard};
use crate::core::schedule_editor::RegistrationEditor;
use crate::domain::model::{
    Activity, DailyReservationCount, NewActivity, NewReview, NotificationPage, ReservationStatus,
    Review,
};
use crate::domain::ports::{BookingApi, ScheduleListener};
use crate::utils::error::{BookingError, Result};

/// 新增體驗表單中時段以外的欄位
#[derive(Debug, Clone, Default)]
pub struct ActivityForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub price: i64,
    pub banner_image_url: String,
    pub sub_image_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ReservationOverview {
    NoActivities,
    Dashboard {
        activities: Vec<Activity>,
        selected: Activity,
        days: Vec<DailyReservationCount>,
    },
}

pub struct BookingService<A: BookingApi> {
    api: A,
}

impl<A: BookingApi> BookingService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 需先開啟取消確認視窗
    pub async fn cancel(&self, card: &mut ReservationCard) -> Result<()> {
        if card.modal() != ModalState::CancelConfirm {
            return Err(BookingError::InvalidReservationAction {
                id: card.id(),
                action: "cancel".to_string(),
                reason: "cancellation was not confirmed".to_string(),
            });
        }

        tracing::info!("🗑️ Cancelling reservation {}", card.id());
        self.api.cancel_reservation(card.id()).await?;
        card.mark_cancelled();
        Ok(())
    }

    pub async fn review(&self, card: &mut ReservationCard, review: NewReview) -> Result<Review> {
        if card.modal() != ModalState::Review {
            return Err(BookingError::InvalidReservationAction {
                id: card.id(),
                action: "review".to_string(),
                reason: "review form is not open".to_string(),
            });
        }
        validate_review(&review)?;

        tracing::info!("📝 Submitting review for reservation {}", card.id());
        let submitted = self.api.submit_review(card.id(), &review).await?;
        card.mark_review_submitted();
        Ok(submitted)
    }

    pub async fn register_activity<L: ScheduleListener>(
        &self,
        form: ActivityForm,
        editor: RegistrationEditor<L>,
    ) -> Result<Activity> {
        for (field, value) in [
            ("title", &form.title),
            ("category", &form.category),
            ("address", &form.address),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::ValidationError {
                    message: format!("Activity {} is required", field),
                });
            }
        }
        if form.price <= 0 {
            return Err(BookingError::ValidationError {
                message: format!("Price must be positive (got {})", form.price),
            });
        }

        let (schedules, _) = editor.into_parts();
        if schedules.is_empty() {
            return Err(BookingError::ValidationError {
                message: "At least one schedule is required".to_string(),
            });
        }

        let activity = NewActivity {
            title: form.title,
            category: form.category,
            description: form.description,
            address: form.address,
            price: form.price,
            schedules,
            banner_image_url: form.banner_image_url,
            sub_image_urls: form.sub_image_urls,
        };

        let created = self.api.register_activity(&activity).await?;
        tracing::info!(
            "✅ Registered activity {} '{}' with {} schedules",
            created.id,
            created.title,
            activity.schedules.len()
        );
        Ok(created)
    }

    /// 沒指定體驗時選第一個
    pub async fn reservation_overview(
        &self,
        activity_id: Option<i64>,
        year: i32,
        month: u32,
    ) -> Result<ReservationOverview> {
        let activities = self.api.my_activities().await?.activities;
        if activities.is_empty() {
            return Ok(ReservationOverview::NoActivities);
        }

        let selected = match activity_id {
            Some(id) => activities
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| BookingError::ValidationError {
                    message: format!("Activity {} is not one of your activities", id),
                })?,
            None => activities[0].clone(),
        };

        let days = self
            .api
            .reservation_dashboard(selected.id, year, month)
            .await?;
        tracing::debug!(
            "Loaded {} dashboard days for activity {}",
            days.len(),
            selected.id
        );

        Ok(ReservationOverview::Dashboard {
            activities,
            selected,
            days,
        })
    }

    pub async fn reservation_cards(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<ReservationCard>> {
        let page = self.api.my_reservations(status).await?;
        Ok(page
            .reservations
            .into_iter()
            .map(ReservationCard::new)
            .collect())
    }

    pub async fn notifications(&self) -> Result<NotificationPage> {
        self.api.my_notifications().await
    }

    pub async fn dismiss_notification(&self, notification_id: i64) -> Result<()> {
        self.api.delete_notification(notification_id).await?;
        tracing::info!("Dismissed notification {}", notification_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reservation_card::tests::reservation;
    use crate::core::schedule_draft::ScheduleField;
    use crate::core::schedule_editor::PendingSchedules;
    use crate::domain::model::{
        ActivityPage, ActivityQuery, AuthSession, Reservation, ReservationCounts,
        ReservationPage, UserProfile,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        activities: Vec<Activity>,
        calls: Mutex<Vec<String>>,
        registered: Mutex<Option<NewActivity>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn activity(id: i64, title: &str) -> Activity {
        Activity {
            id,
            user_id: 1,
            title: title.to_string(),
            description: String::new(),
            category: "투어".to_string(),
            price: 10000,
            address: "Seoul".to_string(),
            banner_image_url: String::new(),
            rating: 0.0,
            review_count: 0,
        }
    }

    #[async_trait]
    impl BookingApi for FakeApi {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthSession> {
            Err(BookingError::Unauthenticated)
        }

        async fn my_info(&self) -> Result<UserProfile> {
            Err(BookingError::Unauthenticated)
        }

        async fn list_activities(&self, _query: &ActivityQuery) -> Result<ActivityPage> {
            Ok(ActivityPage {
                activities: self.activities.clone(),
                total_count: self.activities.len() as i64,
                cursor_id: None,
            })
        }

        async fn register_activity(&self, activity: &NewActivity) -> Result<Activity> {
            *self.registered.lock().unwrap() = Some(activity.clone());
            Ok(Self::created(activity))
        }

        async fn my_activities(&self) -> Result<ActivityPage> {
            self.list_activities(&ActivityQuery::default()).await
        }

        async fn reservation_dashboard(
            &self,
            activity_id: i64,
            year: i32,
            month: u32,
        ) -> Result<Vec<DailyReservationCount>> {
            self.record(format!("dashboard {} {}-{}", activity_id, year, month));
            Ok(vec![DailyReservationCount {
                date: format!("{}-{:02}-01", year, month),
                reservations: ReservationCounts {
                    completed: 0,
                    confirmed: 1,
                    pending: 2,
                },
            }])
        }

        async fn my_reservations(
            &self,
            _status: Option<ReservationStatus>,
        ) -> Result<ReservationPage> {
            Ok(ReservationPage {
                reservations: vec![reservation(1, ReservationStatus::Pending)],
                total_count: 1,
                cursor_id: None,
            })
        }

        async fn cancel_reservation(&self, reservation_id: i64) -> Result<Reservation> {
            self.record(format!("cancel {}", reservation_id));
            Ok(reservation(reservation_id, ReservationStatus::Canceled))
        }

        async fn submit_review(&self, reservation_id: i64, review: &NewReview) -> Result<Review> {
            self.record(format!("review {}", reservation_id));
            Ok(Review {
                id: 1,
                activity_id: 100,
                rating: review.rating,
                content: review.content.clone(),
            })
        }

        async fn my_notifications(&self) -> Result<NotificationPage> {
            Ok(NotificationPage {
                notifications: vec![],
                total_count: 0,
                cursor_id: None,
            })
        }

        async fn delete_notification(&self, notification_id: i64) -> Result<()> {
            self.record(format!("delete {}", notification_id));
            Ok(())
        }
    }

    impl FakeApi {
        fn created(new_activity: &NewActivity) -> Activity {
            let mut created = activity(77, &new_activity.title);
            created.price = new_activity.price;
            created
        }
    }

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn form() -> ActivityForm {
        ActivityForm {
            title: "Jeju Night Hike".to_string(),
            category: "투어".to_string(),
            description: "Hike under the stars".to_string(),
            address: "Jeju".to_string(),
            price: 45000,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_cancel_requires_confirmation() {
        let service = BookingService::new(FakeApi::default());
        let mut card = ReservationCard::new(reservation(4, ReservationStatus::Pending));

        assert!(service.cancel(&mut card).await.is_err());
        assert!(service.api().calls().is_empty());

        card.open_cancel_modal().unwrap();
        service.cancel(&mut card).await.unwrap();

        assert_eq!(service.api().calls(), vec!["cancel 4".to_string()]);
        assert!(card.is_cancelled());
        assert!(!card.can_cancel());
        assert_eq!(card.modal(), ModalState::Closed);
    }

    #[tokio::test]
    async fn test_review_validates_before_calling_api() {
        let service = BookingService::new(FakeApi::default());
        let mut card = ReservationCard::new(reservation(5, ReservationStatus::Completed));
        card.open_review_modal().unwrap();

        let empty = NewReview {
            rating: 3,
            content: String::new(),
        };
        assert!(service.review(&mut card, empty).await.is_err());
        assert!(service.api().calls().is_empty());
        assert_eq!(card.modal(), ModalState::Review);

        let review = NewReview {
            rating: 5,
            content: "Loved it".to_string(),
        };
        let submitted = service.review(&mut card, review).await.unwrap();
        assert_eq!(submitted.rating, 5);
        assert!(card.is_review_submitted());
        assert!(!card.can_review());
    }

    #[tokio::test]
    async fn test_register_activity_sends_committed_schedules() {
        let service = BookingService::new(FakeApi::default());
        let mut editor = RegistrationEditor::with_clock(PendingSchedules::default(), fixed_day);
        editor.set_field(ScheduleField::EndTime, "11:00");
        editor.commit();
        editor.pick_date(fixed_day());
        editor.set_field(ScheduleField::StartTime, "14:00");
        editor.set_field(ScheduleField::EndTime, "16:00");
        editor.commit();

        let created = service.register_activity(form(), editor).await.unwrap();
        assert_eq!(created.id, 77);

        let sent = service.api().registered.lock().unwrap().clone().unwrap();
        assert_eq!(sent.schedules.len(), 2);
        assert_eq!(sent.schedules[1].start_time, "14:00");
    }

    #[tokio::test]
    async fn test_register_activity_without_schedules_fails() {
        let service = BookingService::new(FakeApi::default());
        let editor = RegistrationEditor::with_clock(PendingSchedules::default(), fixed_day);

        let result = service.register_activity(form(), editor).await;
        assert!(matches!(result, Err(BookingError::ValidationError { .. })));
        assert!(service.api().registered.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overview_without_activities() {
        let service = BookingService::new(FakeApi::default());
        let overview = service.reservation_overview(None, 2024, 5).await.unwrap();
        assert!(matches!(overview, ReservationOverview::NoActivities));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_overview_selects_requested_or_first_activity() {
        let api = FakeApi {
            activities: vec![activity(1, "Kayak"), activity(2, "Pottery")],
            ..Default::default()
        };
        let service = BookingService::new(api);

        match service.reservation_overview(None, 2024, 5).await.unwrap() {
            ReservationOverview::Dashboard { selected, days, .. } => {
                assert_eq!(selected.id, 1);
                assert_eq!(days[0].reservations.pending, 2);
            }
            ReservationOverview::NoActivities => panic!("expected dashboard"),
        }

        match service.reservation_overview(Some(2), 2024, 6).await.unwrap() {
            ReservationOverview::Dashboard { selected, .. } => assert_eq!(selected.id, 2),
            ReservationOverview::NoActivities => panic!("expected dashboard"),
        }

        assert!(service.reservation_overview(Some(9), 2024, 6).await.is_err());
        assert_eq!(
            service.api().calls(),
            vec!["dashboard 1 2024-5".to_string(), "dashboard 2 2024-6".to_string()]
        );
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let service = BookingService::new(FakeApi::default());
        service.dismiss_notification(3).await.unwrap();
        assert_eq!(service.api().calls(), vec!["delete 3".to_string()]);
    }
}
