use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Strict `YYYY-MM-DD` parsing (no single-digit months or days).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Inclusive date bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn describe(&self) -> String {
        match (self.from, self.to) {
            (None, None) => "all dates".to_string(),
            (Some(f), None) => format!("from {f}"),
            (None, Some(t)) => format!("until {t}"),
            (Some(f), Some(t)) if f == t => format!("{f}"),
            (Some(f), Some(t)) => format!("{f} → {t}"),
        }
    }
}

/// Quick filters offered by the history views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    All,
    ThisWeek,
    LastWeek,
    ThisMonth,
}

/// Sunday starting the week that contains `d`.
pub fn start_of_week(d: NaiveDate) -> NaiveDate {
    let back = d.weekday().num_days_from_sunday() as u64;
    d - Days::new(back)
}

/// Monday starting the ISO week that contains `d` (payroll weeks).
pub fn monday_of_week(d: NaiveDate) -> NaiveDate {
    let back = d.weekday().num_days_from_monday() as u64;
    d - Days::new(back)
}

pub fn end_of_month(d: NaiveDate) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d);
    (first + Months::new(1)) - Days::new(1)
}

/// Resolve a preset relative to `today` (weeks run Sunday–Saturday).
pub fn preset_range(preset: Preset, today: NaiveDate) -> DateRange {
    match preset {
        Preset::All => DateRange::default(),
        Preset::ThisWeek => {
            let start = start_of_week(today);
            DateRange::between(start, start + Days::new(6))
        }
        Preset::LastWeek => {
            let start = start_of_week(today) - Days::new(7);
            DateRange::between(start, start + Days::new(6))
        }
        Preset::ThisMonth => {
            let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
            DateRange::between(start, end_of_month(today))
        }
    }
}

/// Expand one period token (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`) to its bounds.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((first, end_of_month(first)))
        }
        4 => {
            let year: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        _ => Err(invalid()),
    }
}

/// Parse `--period`.
///
/// Supports:
/// - all
/// - YYYY / YYYY-MM / YYYY-MM-DD
/// - start:end ranges of the same shape (e.g. 2025-06:2025-08)
pub fn parse_period(p: &str) -> AppResult<DateRange> {
    if p.trim().eq_ignore_ascii_case("all") {
        return Ok(DateRange::default());
    }

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        if start_raw.trim().len() != end_raw.trim().len() {
            return Err(AppError::InvalidDate(format!(
                "{p} (start and end must have the same format)"
            )));
        }
        let (from, _) = period_bounds(start_raw)?;
        let (_, to) = period_bounds(end_raw)?;
        if to < from {
            return Err(AppError::InvalidDate(format!("{p} (end before start)")));
        }
        return Ok(DateRange::between(from, to));
    }

    let (from, to) = period_bounds(p)?;
    Ok(DateRange::between(from, to))
}

/// Combine the CLI filters: explicit bounds win over `--period`, which wins
/// over the preset.
pub fn resolve_range(
    preset: Option<Preset>,
    period: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> AppResult<DateRange> {
    if from.is_some() || to.is_some() {
        return Ok(DateRange {
            from: from.map(parse_date_arg).transpose()?,
            to: to.map(parse_date_arg).transpose()?,
        });
    }
    if let Some(p) = period {
        return parse_period(p);
    }
    Ok(preset_range(preset.unwrap_or(Preset::All), today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn this_week_runs_sunday_to_saturday() {
        // 2025-01-08 is a Wednesday
        let r = preset_range(Preset::ThisWeek, d("2025-01-08"));
        assert_eq!(r, DateRange::between(d("2025-01-05"), d("2025-01-11")));

        let last = preset_range(Preset::LastWeek, d("2025-01-08"));
        assert_eq!(last, DateRange::between(d("2024-12-29"), d("2025-01-04")));
    }

    #[test]
    fn sunday_starts_its_own_week() {
        let r = preset_range(Preset::ThisWeek, d("2025-01-05"));
        assert_eq!(r.from, Some(d("2025-01-05")));
    }

    #[test]
    fn this_month_handles_leap_february() {
        let r = preset_range(Preset::ThisMonth, d("2024-02-10"));
        assert_eq!(r, DateRange::between(d("2024-02-01"), d("2024-02-29")));
    }

    #[test]
    fn periods_and_ranges() {
        assert_eq!(
            parse_period("2025-06").unwrap(),
            DateRange::between(d("2025-06-01"), d("2025-06-30"))
        );
        assert_eq!(
            parse_period("2024:2025").unwrap(),
            DateRange::between(d("2024-01-01"), d("2025-12-31"))
        );
        assert!(parse_period("all").unwrap().is_unbounded());
        assert!(parse_period("2025-06:2025").is_err());
        assert!(parse_period("2025-13").is_err());
    }

    #[test]
    fn strict_date_parsing() {
        assert!(parse_date("2025-1-6").is_none());
        assert!(parse_date("06/01/2025").is_none());
        assert_eq!(monday_of_week(d("2025-01-08")), d("2025-01-06"));
    }
}
