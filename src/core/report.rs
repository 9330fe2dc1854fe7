use crate::core::booking::ReservationOverview;
use crate::core::reservation_card::ReservationCard;
use crate::utils::error::Result;
use std::io::Write;

const CSV_HEADER: [&str; 8] = [
    "id", "activity", "status", "date", "start_time", "end_time", "head_count", "total_price",
];

pub fn write_reservations_csv<W: Write>(cards: &[ReservationCard], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for card in cards {
        let r = card.reservation();
        csv_writer.write_record([
            r.id.to_string(),
            r.activity.title.clone(),
            r.status.as_str().to_string(),
            r.date.clone(),
            r.start_time.clone(),
            r.end_time.clone(),
            r.head_count.to_string(),
            r.total_price.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 預約列表的文字版，一筆兩行
pub fn render_reservation_list(cards: &[ReservationCard]) -> String {
    if cards.is_empty() {
        return "아직 예약한 체험이 없어요.".to_string();
    }

    let mut out = String::new();
    for card in cards {
        let mut actions = Vec::new();
        if card.can_cancel() {
            actions.push("예약취소");
        }
        if card.can_review() {
            actions.push("후기작성");
        }

        out.push_str(&format!(
            "#{} [{}] {}\n    {} · {}",
            card.id(),
            card.status_label(),
            card.reservation().activity.title,
            card.summary_line(),
            card.price_label()
        ));
        if !actions.is_empty() {
            out.push_str(&format!(" · {}", actions.join(" / ")));
        }
        out.push('\n');
    }
    out
}

pub fn render_overview(overview: &ReservationOverview) -> String {
    match overview {
        ReservationOverview::NoActivities => "아직 등록한 체험이 없어요.".to_string(),
        ReservationOverview::Dashboard {
            activities,
            selected,
            days,
        } => {
            let mut out = String::from("예약 현황\n체험명:\n");
            for activity in activities {
                let marker = if activity.id == selected.id { '*' } else { ' ' };
                out.push_str(&format!("  {} {} ({})\n", marker, activity.title, activity.id));
            }
            for day in days {
                let counts = &day.reservations;
                out.push_str(&format!(
                    "{}  예약 {} · 승인 {} · 완료 {}\n",
                    day.date, counts.pending, counts.confirmed, counts.completed
                ));
            }
            out
        }
    }
}
