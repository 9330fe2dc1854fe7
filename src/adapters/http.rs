use crate::domain::model::{
    Activity, ActivityPage, ActivityQuery, AuthSession, DailyReservationCount, NewActivity,
    NewReview, NotificationPage, Reservation, ReservationPage, ReservationStatus, Review,
    UserProfile,
};
use crate::domain::ports::{BookingApi, ConfigProvider};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const RESERVATION_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// 以 reqwest 呼叫遠端預約 API
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpBookingApi {
    pub fn new<C: ConfigProvider>(config: &C, access_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        let base_url = format!(
            "{}/{}",
            config.api_base_url().trim_end_matches('/'),
            config.team_id()
        );

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.access_token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(BookingError::Unauthenticated),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("API response status: {} ({})", status, response.url());

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(BookingError::Unauthenticated);
        }

        // API 錯誤格式為 { "message": "..." }，解析失敗時保留原始內容
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body
                }
            });

        tracing::warn!("API request failed with {}: {}", status, message);
        Err(BookingError::ApiStatus {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        tracing::debug!("Signing in as {}", email);
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        self.send(request).await
    }

    async fn my_info(&self) -> Result<UserProfile> {
        let request = self.authorized(self.client.get(self.url("/users/me")))?;
        self.send(request).await
    }

    async fn list_activities(&self, query: &ActivityQuery) -> Result<ActivityPage> {
        let request = self
            .client
            .get(self.url("/activities"))
            .query(&query.to_query_pairs());
        self.send(request).await
    }

    async fn register_activity(&self, activity: &NewActivity) -> Result<Activity> {
        tracing::debug!(
            "Registering activity '{}' with {} schedules",
            activity.title,
            activity.schedules.len()
        );
        let request = self.authorized(self.client.post(self.url("/activities")).json(activity))?;
        self.send(request).await
    }

    async fn my_activities(&self) -> Result<ActivityPage> {
        let request = self.authorized(self.client.get(self.url("/my-activities")))?;
        self.send(request).await
    }

    async fn reservation_dashboard(
        &self,
        activity_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyReservationCount>> {
        let path = format!("/my-activities/{}/reservation-dashboard", activity_id);
        let request = self.authorized(self.client.get(self.url(&path)).query(&[
            ("year", year.to_string()),
            ("month", format!("{:02}", month)),
        ]))?;
        self.send(request).await
    }

    async fn my_reservations(&self, status: Option<ReservationStatus>) -> Result<ReservationPage> {
        let mut query = vec![("size", RESERVATION_PAGE_SIZE.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        let request =
            self.authorized(self.client.get(self.url("/my-reservations")).query(&query))?;
        self.send(request).await
    }

    async fn cancel_reservation(&self, reservation_id: i64) -> Result<Reservation> {
        let path = format!("/my-reservations/{}", reservation_id);
        let request = self.authorized(
            self.client
                .patch(self.url(&path))
                .json(&serde_json::json!({ "status": "canceled" })),
        )?;
        self.send(request).await
    }

    async fn submit_review(&self, reservation_id: i64, review: &NewReview) -> Result<Review> {
        let path = format!("/my-reservations/{}/reviews", reservation_id);
        let request = self.authorized(self.client.post(self.url(&path)).json(review))?;
        self.send(request).await
    }

    async fn my_notifications(&self) -> Result<NotificationPage> {
        let request = self.authorized(self.client.get(self.url("/my-notifications")))?;
        self.send(request).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<()> {
        let path = format!("/my-notifications/{}", notification_id);
        let request = self.authorized(self.client.delete(self.url(&path)))?;
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
