//! Time-based and random values for dynamic test data.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Base two-digit number used for ids in dynamic test data
pub const TEST_NN: i64 = 20;

pub fn test_date() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

pub fn test_time() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

pub fn test_timestamp() -> String {
    Local::now().to_rfc3339()
}

pub fn future_time_minutes(minutes: i64) -> String {
    format_time(Local::now() + Duration::minutes(minutes))
}

pub fn future_time_hours(hours: i64) -> String {
    format_time(Local::now() + Duration::hours(hours))
}

pub fn future_date_days(days: i64) -> String {
    format_date(Local::now() + Duration::days(days))
}

pub fn past_time_minutes(minutes: i64) -> String {
    format_time(Local::now() - Duration::minutes(minutes))
}

pub fn past_time_hours(hours: i64) -> String {
    format_time(Local::now() - Duration::hours(hours))
}

pub fn past_date_days(days: i64) -> String {
    format_date(Local::now() - Duration::days(days))
}

/// Current time rendered in a fixed UTC offset, e.g. `2026-10-19T14:03:00+01:00`.
///
/// Offsets outside ±23 hours are clamped.
pub fn time_with_zone_offset(offset_hours: i32) -> String {
    let hours = offset_hours.clamp(-23, 23);
    match FixedOffset::east_opt(hours * 3600) {
        Some(offset) => Utc::now()
            .with_timezone(&offset)
            .format(OFFSET_DATETIME_FORMAT)
            .to_string(),
        None => Utc::now().format(OFFSET_DATETIME_FORMAT).to_string(),
    }
}

/// Tomorrow's date joined with the time one hour from now.
pub fn future_date_time_sample() -> String {
    format!("{}T{}", future_date_days(1), future_time_hours(1))
}

pub fn random_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A 4-digit number drawn from the operating system's CSPRNG.
///
/// Panics if the OS entropy source is unavailable.
pub fn random_4_digit_number() -> u32 {
    OsRng.gen_range(1000..=9999)
}

fn format_time(at: DateTime<Local>) -> String {
    at.format(TIME_FORMAT).to_string()
}

fn format_date(at: DateTime<Local>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Numeric variables for one test round on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestVariables {
    pub today_test_round: i64,
    /// Single digit variable
    pub test_n: i64,
    /// Base two-digit number
    pub test_nn: i64,
    /// `test_nn + 1` through `test_nn + 9`
    pub test_nn_offsets: [i64; 9],
    /// Month, day and round folded into four digits
    pub test_md: i64,
    pub test_md500: i64,
    /// `yyMMdd`
    pub test_day: i64,
    /// `yyMMdd` followed by the round
    pub test_day_n: i64,
    /// `yyMMdd` followed by the base two-digit number
    pub test_day_nn: i64,
}

impl TestVariables {
    /// Look a variable up by its conventional name (`testMD`, `testNN3`, ...).
    pub fn get(&self, key: &str) -> Option<i64> {
        match key {
            "todayTestRound" => Some(self.today_test_round),
            "testN" => Some(self.test_n),
            "testNN" => Some(self.test_nn),
            "testMD" => Some(self.test_md),
            "testMD500" => Some(self.test_md500),
            "testDay" => Some(self.test_day),
            "testDayN" => Some(self.test_day_n),
            "testDayNN" => Some(self.test_day_nn),
            _ => {
                let index: usize = key.strip_prefix("testNN")?.parse().ok()?;
                (1..=9)
                    .contains(&index)
                    .then(|| self.test_nn_offsets[index - 1])
            }
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, i64> {
        let mut map = BTreeMap::new();
        map.insert("todayTestRound".to_string(), self.today_test_round);
        map.insert("testN".to_string(), self.test_n);
        map.insert("testNN".to_string(), self.test_nn);
        for (i, value) in self.test_nn_offsets.iter().enumerate() {
            map.insert(format!("testNN{}", i + 1), *value);
        }
        map.insert("testMD".to_string(), self.test_md);
        map.insert("testMD500".to_string(), self.test_md500);
        map.insert("testDay".to_string(), self.test_day);
        map.insert("testDayN".to_string(), self.test_day_n);
        map.insert("testDayNN".to_string(), self.test_day_nn);
        map
    }
}

/// Test variables for `round` on the current local date.
pub fn generate_test_variables(round: i64) -> TestVariables {
    generate_test_variables_on(Local::now().date_naive(), round)
}

/// Test variables for `round` on `day`.
pub fn generate_test_variables_on(day: NaiveDate, round: i64) -> TestVariables {
    let mut test_nn_offsets = [0i64; 9];
    for (i, slot) in test_nn_offsets.iter_mut().enumerate() {
        *slot = TEST_NN + i as i64 + 1;
    }

    let test_md = i64::from(day.month()) * 31 + i64::from(day.day()) + round * 1000;
    let test_day = i64::from(day.year() % 100) * 10_000
        + i64::from(day.month()) * 100
        + i64::from(day.day());

    TestVariables {
        today_test_round: round,
        test_n: round,
        test_nn: TEST_NN,
        test_nn_offsets,
        test_md,
        test_md500: test_md + 500,
        test_day,
        test_day_n: concat_digits(test_day, round),
        test_day_nn: concat_digits(test_day, TEST_NN),
    }
}

/// Decimal concatenation, `concat_digits(261019, 3) == 2610193`.
fn concat_digits(head: i64, tail: i64) -> i64 {
    format!("{}{}", head, tail).parse().unwrap_or(head)
}
