use crate::domain::model::{
    Activity, ActivityPage, ActivityQuery, AuthSession, DailyReservationCount, NewActivity,
    NewReview, NotificationPage, Reservation, ReservationPage, ReservationStatus, Review, Schedule,
    UserProfile,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn team_id(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn session_path(&self) -> &str;
}

/// 時段編輯器對擁有者的回呼
pub trait ScheduleListener {
    /// 剛加入的時段
    fn on_add(&mut self, new_entries: &[Schedule]);
    /// 移除後剩下的完整清單
    fn on_cancel_added(&mut self, remaining: &[Schedule]);
}

/// 遠端預約服務
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn my_info(&self) -> Result<UserProfile>;
    async fn list_activities(&self, query: &ActivityQuery) -> Result<ActivityPage>;
    async fn register_activity(&self, activity: &NewActivity) -> Result<Activity>;
    async fn my_activities(&self) -> Result<ActivityPage>;
    async fn reservation_dashboard(
        &self,
        activity_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyReservationCount>>;
    async fn my_reservations(&self, status: Option<ReservationStatus>) -> Result<ReservationPage>;
    async fn cancel_reservation(&self, reservation_id: i64) -> Result<Reservation>;
    async fn submit_review(&self, reservation_id: i64, review: &NewReview) -> Result<Review>;
    async fn my_notifications(&self) -> Result<NotificationPage>;
    async fn delete_notification(&self, notification_id: i64) -> Result<()>;
}
