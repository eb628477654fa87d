//! 时间工具模块
//!
//! 后端返回的时间字符串可能带时区（RFC 3339），也可能是不带时区的 ISO 8601。
//! 显示时使用时间戳自身的墙上时间，计算时长时才换算到 UTC。

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// 当前 UTC 日历日期
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_with(
    s: &str,
    project: fn(&DateTime<FixedOffset>) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(project(&dt));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// 解析时间字符串，带时区时保留其墙上时间
///
/// 返回 None 如果格式无法识别
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    parse_with(s, DateTime::naive_local)
}

/// 解析为 UTC 时刻，用于相减
fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    parse_with(s, DateTime::naive_utc)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(s).map(|dt| dt.date()))
}

/// `YYYY.MM.DD`
pub fn dot_date(date: NaiveDate) -> String {
    format!("{}.{:02}.{:02}", date.year(), date.month(), date.day())
}

/// 把 `created_at` 之类的字段格式化为 `YYYY.MM.DD`，无法解析时返回 `-`
pub fn format_dot_date(s: Option<&str>) -> String {
    s.and_then(parse_date)
        .map(dot_date)
        .unwrap_or_else(|| "-".to_string())
}

/// `HH:MM`，缺失或无法解析时返回 `-`
pub fn format_clock(s: Option<&str>) -> String {
    s.and_then(parse_datetime)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// 两个时间点之间的小时数，保留一位小数，不小于 0
pub fn hours_between(start: &str, end: &str) -> Option<f64> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let hours = (end - start).num_seconds() as f64 / 3600.0;
    Some(((hours * 10.0).round() / 10.0).max(0.0))
}

/// 图表横轴标签，例如 `월(15일)`
pub fn weekday_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}({}일)", weekday, date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = parse_datetime("2024-01-02T08:30:00.123456").unwrap();
        assert_eq!(naive.format("%H:%M").to_string(), "08:30");

        let offset = parse_datetime("2024-01-02T08:30:00+09:00").unwrap();
        assert_eq!(offset.format("%H:%M").to_string(), "08:30");

        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn hours_are_rounded_to_one_decimal() {
        let hours = hours_between("2024-01-02T08:00:00", "2024-01-02T17:20:00").unwrap();
        assert_eq!(hours, 9.3);
        assert_eq!(
            hours_between("2024-01-02T17:00:00", "2024-01-02T08:00:00"),
            Some(0.0)
        );
    }

    #[test]
    fn offset_timestamps_display_their_own_wall_clock() {
        let stamp = Some("2024-01-02T08:30:00+09:00");
        assert_eq!(format_clock(stamp), "08:30");
        assert_eq!(format_dot_date(stamp), "2024.01.02");
    }

    #[test]
    fn hours_across_offsets_use_the_real_interval() {
        let hours = hours_between("2024-01-02T08:00:00+09:00", "2024-01-02T01:00:00Z").unwrap();
        assert_eq!(hours, 2.0);
    }

    #[test]
    fn formats_dates_for_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(dot_date(date), "2024.01.15");
        assert_eq!(weekday_label(date), "월(15일)");
        assert_eq!(format_dot_date(Some("2024-03-05T10:00:00")), "2024.03.05");
        assert_eq!(format_dot_date(None), "-");
        assert_eq!(format_clock(None), "-");
    }
}
