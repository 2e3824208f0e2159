use chrono::NaiveDateTime;

/// Minute-precision timestamp used in the allocation log and CSV export.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}
