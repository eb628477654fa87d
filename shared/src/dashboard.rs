//! 仪表盘统计
//!
//! 出勤状态分桶与最近 7 天工时序列，均为纯函数。

use chrono::{Days, NaiveDate};

use crate::date::{hours_between, parse_date, weekday_label};
use crate::{AttendanceRecord, Role, STATUS_ABSENT, STATUS_EARLY_LEAVE, STATUS_LATE, STATUS_PRESENT};

pub const WEEKLY_DAYS: u64 = 7;

/// 环形图数据：三个桶的标签与计数
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBuckets {
    pub labels: [&'static str; 3],
    pub counts: [usize; 3],
}

impl StatusBuckets {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.labels.iter().copied().zip(self.counts.iter().copied())
    }
}

fn count_check_in(records: &[AttendanceRecord], status: &str) -> usize {
    records
        .iter()
        .filter(|r| r.check_in_status.as_deref() == Some(status))
        .count()
}

/// 工人：本人记录中的 正常出勤 / 迟到 / 早退
pub fn worker_buckets(records: &[AttendanceRecord]) -> StatusBuckets {
    let early_leave = records
        .iter()
        .filter(|r| r.check_out_status.as_deref() == Some(STATUS_EARLY_LEAVE))
        .count();
    StatusBuckets {
        labels: [STATUS_PRESENT, STATUS_LATE, STATUS_EARLY_LEAVE],
        counts: [
            count_check_in(records, STATUS_PRESENT),
            count_check_in(records, STATUS_LATE),
            early_leave,
        ],
    }
}

/// 管理员：今日全工地的 正常出勤 / 迟到 / 未出勤
///
/// 未出勤 = 用户总数 - 今日记录数，用户为 0 时计 0。
pub fn manager_buckets(total_users: usize, today: &[AttendanceRecord]) -> StatusBuckets {
    StatusBuckets {
        labels: [STATUS_PRESENT, STATUS_LATE, STATUS_ABSENT],
        counts: [
            count_check_in(today, STATUS_PRESENT),
            count_check_in(today, STATUS_LATE),
            total_users.saturating_sub(today.len()),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub label: String,
    pub hours: f64,
}

/// 截至 `today` 的 7 天工时，按日期从旧到新排列
///
/// 缺少上班或下班时间的日期计 0。
pub fn weekly_hours(records: &[AttendanceRecord], today: NaiveDate) -> Vec<DailyHours> {
    (0..WEEKLY_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let hours = records
                .iter()
                .find(|r| parse_date(&r.date) == Some(date))
                .and_then(|r| match (&r.check_in_time, &r.check_out_time) {
                    (Some(start), Some(end)) => hours_between(start, end),
                    _ => None,
                })
                .unwrap_or(0.0);
            DailyHours {
                date,
                label: weekday_label(date),
                hours,
            }
        })
        .collect()
}

/// 仪表盘视图数据
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub full_name: String,
    pub role: Role,
    pub trade_type: String,
    pub buckets: StatusBuckets,
    pub weekly: Vec<DailyHours>,
}

impl DashboardModel {
    pub fn greeting(&self) -> String {
        format!("반갑습니다, {}님!", self.full_name)
    }

    pub fn buckets_title(&self) -> &'static str {
        match self.role {
            Role::Manager => "오늘 현장 출석율",
            Role::Worker => "나의 출석 통계",
        }
    }

    /// 柱状图缩放用的最大工时
    pub fn max_hours(&self) -> f64 {
        self.weekly.iter().map(|d| d.hours).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, status: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            date: date.into(),
            check_in_status: status.map(String::from),
            ..Default::default()
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn worker_buckets_count_present_late_early_leave() {
        let records = vec![
            record("2024-01-01", Some("정상 출근")),
            record("2024-01-02", Some("지각")),
        ];
        let buckets = worker_buckets(&records);
        assert_eq!(buckets.counts, [1, 1, 0]);
        assert_eq!(buckets.labels, ["정상 출근", "지각", "조퇴"]);

        let mut early = record("2024-01-03", Some("정상 출근"));
        early.check_out_status = Some("조퇴".into());
        let buckets = worker_buckets(&[early]);
        assert_eq!(buckets.counts, [1, 0, 1]);
    }

    #[test]
    fn manager_absent_is_users_minus_records() {
        let today = vec![
            record("2024-01-01", Some("정상 출근")),
            record("2024-01-01", Some("지각")),
            record("2024-01-01", None),
        ];
        let buckets = manager_buckets(10, &today);
        assert_eq!(buckets.counts, [1, 1, 7]);
        assert_eq!(buckets.labels[2], "미출근");

        assert_eq!(manager_buckets(0, &today).counts[2], 0);
        assert_eq!(manager_buckets(2, &today).counts[2], 0);
    }

    #[test]
    fn check_in_buckets_never_exceed_records() {
        let statuses = [Some("정상 출근"), Some("지각"), None, Some("정상 출근")];
        let records: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| record(&format!("2024-02-0{}", i + 1), *s))
            .collect();

        let buckets = worker_buckets(&records);
        assert!(buckets.counts[0] + buckets.counts[1] <= records.len());

        let buckets = manager_buckets(records.len(), &records);
        assert!(buckets.total() <= records.len());
    }

    #[test]
    fn weekly_series_has_seven_days_oldest_first() {
        let today = day(2024, 1, 10);
        let records = vec![
            AttendanceRecord {
                date: "2024-01-10".into(),
                check_in_time: Some("2024-01-10T08:00:00".into()),
                check_out_time: Some("2024-01-10T17:30:00".into()),
                ..Default::default()
            },
            AttendanceRecord {
                date: "2024-01-05".into(),
                check_in_time: Some("2024-01-05T08:00:00".into()),
                check_out_time: None,
                ..Default::default()
            },
            AttendanceRecord {
                date: "2024-01-01".into(),
                check_in_time: Some("2024-01-01T08:00:00".into()),
                check_out_time: Some("2024-01-01T18:00:00".into()),
                ..Default::default()
            },
        ];

        let series = weekly_hours(&records, today);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day(2024, 1, 4));
        assert_eq!(series[6].date, today);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));

        assert_eq!(series[6].hours, 9.5);
        // 01-05 缺少下班时间
        assert_eq!(series[1].hours, 0.0);
        // 01-01 不在窗口内
        assert_eq!(series.iter().filter(|d| d.hours > 0.0).count(), 1);
        assert_eq!(series[6].label, "수(10일)");
    }

    #[test]
    fn weekly_series_with_no_records_is_all_zero() {
        let series = weekly_hours(&[], day(2024, 3, 1));
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|d| d.hours == 0.0));
    }
}
