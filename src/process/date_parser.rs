use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a calendar date; a time part, if any, is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// `7`, `07`, `July` or `jul` → 7.
pub fn parse_month(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if let Some(n) = parse_whole(s) {
        return u32::try_from(n).ok().filter(|m| (1..=12).contains(m));
    }
    let lower = s.to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(&lower)))
        .map(|i| i as u32 + 1)
}

/// Integer text, tolerating a `.0` tail left by float-typed exports.
pub fn parse_whole(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i32>() {
        return Some(n);
    }
    let f: f64 = s.parse().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Build a date from separate year, month and day-of-month cells.
pub fn compose_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = parse_whole(year)?;
    let month = parse_month(month)?;
    let day = u32::try_from(parse_whole(day)?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
