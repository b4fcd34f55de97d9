use chrono::{DateTime, Local, TimeZone};

/// Header clock text, e.g. `Thu 14 Mar 16:42/31`.
pub fn format_date_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%a %-d %b %H:%M/%S").to_string()
}

pub fn now_date_time() -> String {
    format_date_time(&Local::now())
}
