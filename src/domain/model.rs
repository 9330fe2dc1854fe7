use serde::{Deserialize, Serialize};
use std::fmt;

/// 一筆可預約時段：日期 + 開始/結束時間
///
/// 欄位保留為字串，空字串代表尚未填寫。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl Schedule {
    pub fn new(
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ~ {}", self.date, self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub banner_image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub cursor_id: Option<i64>,
}

/// 新增體驗時送出的內容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub price: i64,
    pub schedules: Vec<Schedule>,
    pub banner_image_url: String,
    #[serde(default)]
    pub sub_image_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<String>,
}

impl ActivityQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("method", "offset".to_string())];
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword", keyword.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Declined,
    Canceled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Declined => "declined",
            ReservationStatus::Canceled => "canceled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// 預約列表上顯示的狀態標籤
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "예약 완료",
            ReservationStatus::Confirmed => "예약 승인",
            ReservationStatus::Declined => "예약 거절",
            ReservationStatus::Canceled => "예약 취소",
            ReservationStatus::Completed => "체험 완료",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = crate::utils::error::BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "declined" => Ok(ReservationStatus::Declined),
            "canceled" => Ok(ReservationStatus::Canceled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(crate::utils::error::BookingError::ValidationError {
                message: format!("Unknown reservation status: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationActivity {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub banner_image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub user_id: i64,
    pub activity: ReservationActivity,
    #[serde(default)]
    pub schedule_id: i64,
    pub status: ReservationStatus,
    #[serde(default)]
    pub review_submitted: bool,
    pub total_price: i64,
    pub head_count: u32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPage {
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub cursor_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationCounts {
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub confirmed: u32,
    #[serde(default)]
    pub pending: u32,
}

/// 預約現況月曆中單日的統計
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyReservationCount {
    pub date: String,
    pub reservations: ReservationCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReview {
    pub rating: u8,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub activity_id: i64,
    pub rating: u8,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl UserProfile {
    /// 沒有大頭貼時以暱稱第一個字代替
    pub fn avatar_initial(&self) -> Option<char> {
        self.nickname.chars().next()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub cursor_id: Option<i64>,
}
