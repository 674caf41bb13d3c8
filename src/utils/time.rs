use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};

/// 한국 시간 기준 현재 시각 (UTC+9)
pub fn now_kst() -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::hours(9)
}

/// 한국 시간 기준 오늘 날짜
pub fn today_kst() -> NaiveDate {
    now_kst().date()
}

/// 해당 날짜의 하루 구간 [자정, 다음날 자정)
///
/// 퀴즈 제출/스킵 집계와 오늘 퀴즈 삭제가 모두 이 구간을 기준으로 한다.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    (start, start + Duration::days(1))
}
