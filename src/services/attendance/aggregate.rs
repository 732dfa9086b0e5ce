//! 考勤聚合
//!
//! 输入为 (日期, 是否出勤) 序列，便于同时复用在当天快照、周趋势和区间报表上。

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::attendance::responses::{DailySnapshot, DateStats, DayCount};
use crate::utils::dates::trailing_days;

/// 周趋势固定的天数
pub const TREND_DAYS: u32 = 7;

/// 某一天的出勤/缺勤/未记录人数
///
/// 未记录人数 = 学生总数 − 当天记录数，不会小于 0。
pub fn daily_snapshot<I>(date: NaiveDate, records: I, total_students: u64) -> DailySnapshot
where
    I: IntoIterator<Item = (NaiveDate, bool)>,
{
    let (mut present, mut absent) = (0_i64, 0_i64);
    for (day, is_present) in records {
        if day != date {
            continue;
        }
        if is_present {
            present += 1;
        } else {
            absent += 1;
        }
    }

    DailySnapshot {
        date,
        present,
        absent,
        not_marked: (total_students as i64 - present - absent).max(0),
    }
}

/// 截止到 `today`（含）的 7 天趋势，每天都有一个桶，按日期升序
///
/// 窗口外的记录被忽略。
pub fn weekly_trend<I>(today: NaiveDate, records: I) -> Vec<DayCount>
where
    I: IntoIterator<Item = (NaiveDate, bool)>,
{
    let mut buckets: BTreeMap<NaiveDate, DayCount> = trailing_days(today, TREND_DAYS)
        .into_iter()
        .map(|date| {
            (
                date,
                DayCount {
                    date,
                    present: 0,
                    absent: 0,
                },
            )
        })
        .collect();

    for (day, is_present) in records {
        if let Some(bucket) = buckets.get_mut(&day) {
            if is_present {
                bucket.present += 1;
            } else {
                bucket.absent += 1;
            }
        }
    }

    buckets.into_values().collect()
}

/// 按日期汇总的出勤统计，只包含有记录的日期，按日期升序
pub fn date_stats<I>(records: I) -> Vec<DateStats>
where
    I: IntoIterator<Item = (NaiveDate, bool)>,
{
    let mut stats: BTreeMap<NaiveDate, DateStats> = BTreeMap::new();
    for (day, is_present) in records {
        let entry = stats.entry(day).or_insert(DateStats {
            date: day,
            present: 0,
            absent: 0,
            total: 0,
        });
        entry.total += 1;
        if is_present {
            entry.present += 1;
        } else {
            entry.absent += 1;
        }
    }

    stats.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_daily_snapshot() {
        let records = vec![(day(10), true), (day(10), false), (day(10), true), (day(9), false)];
        let snap = daily_snapshot(day(10), records, 5);
        assert_eq!(snap.present, 2);
        assert_eq!(snap.absent, 1);
        assert_eq!(snap.not_marked, 2);

        let empty = daily_snapshot(day(10), Vec::new(), 0);
        assert_eq!(empty.not_marked, 0);
    }

    #[test]
    fn test_weekly_trend_always_seven_buckets() {
        let trend = weekly_trend(day(10), Vec::new());
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, day(4));
        assert_eq!(trend[6].date, day(10));
        assert!(trend.iter().all(|b| b.present == 0 && b.absent == 0));
    }

    #[test]
    fn test_weekly_trend_counts_and_ignores_outside_window() {
        let records = vec![
            (day(10), true),
            (day(10), true),
            (day(4), false),
            (day(3), true),  // 窗口外
            (day(11), true), // 未来
        ];
        let trend = weekly_trend(day(10), records);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[6].present, 2);
        assert_eq!(trend[0].absent, 1);
        let total: i64 = trend.iter().map(|b| b.present + b.absent).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_date_stats_sorted() {
        let stats = date_stats(vec![(day(2), true), (day(1), false), (day(2), false)]);
        assert_eq!(
            stats,
            vec![
                DateStats {
                    date: day(1),
                    present: 0,
                    absent: 1,
                    total: 1,
                },
                DateStats {
                    date: day(2),
                    present: 1,
                    absent: 1,
                    total: 2,
                },
            ]
        );
        assert!(date_stats(Vec::new()).is_empty());
    }
}
