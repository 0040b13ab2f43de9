//! Core aggregation helpers for order reporting.
//!
//! Pure functions for volume parsing, rounding and reporting windows -
//! no database access.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};

use super::requests::Period;

/// Product categories whose line items count toward liter totals.
///
/// `Ovocné` is a legacy spelling of `Ovocné víno` still present on older
/// catalog rows. Gas (`Dusík`/`Plyny`) and PET goods have no liter
/// equivalent and are excluded from all liter arithmetic.
pub const LITER_CATEGORIES: [&str; 4] = ["Víno", "Nápoje", "Ovocné víno", "Ovocné"];

/// Fixed physical package sizes in liters (kegs and canisters).
pub const PACKAGE_SIZES: [f64; 6] = [3.0, 5.0, 10.0, 20.0, 30.0, 50.0];

/// Parse the liter size out of a line-item volume descriptor.
///
/// Takes the longest numeric prefix of the trimmed value and parses it as
/// a float; anything without a numeric prefix (the categorical tokens
/// `maly`, `velky`, `baleni`) yields `0`. A comma is not a decimal
/// separator: `"1,5L"` parses as `1`.
///
/// # Examples
/// ```
/// use napoje_web::reporting::parsed_liters;
///
/// assert_eq!(parsed_liters("5"), 5.0);
/// assert_eq!(parsed_liters("20L"), 20.0);
/// assert_eq!(parsed_liters("maly"), 0.0);
/// ```
pub fn parsed_liters(volume: &str) -> f64 {
    let trimmed = volume.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        let accept = match c {
            '0'..='9' => {
                seen_digit = true;
                true
            }
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            '-' if i == 0 => true,
            _ => false,
        };
        if !accept {
            break;
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    match trimmed[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Round a liter figure to one decimal place, half-up.
///
/// # Examples
/// ```
/// use napoje_web::reporting::round_liters;
///
/// assert_eq!(round_liters(12.34), 12.3);
/// assert_eq!(round_liters(12.36), 12.4);
/// ```
pub fn round_liters(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Percentage share of `part` in `whole`, rounded to one decimal place.
/// A zero `whole` yields `0` rather than a division error.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round_half_up(part / whole * 1000.0) / 10.0
}

/// Percent change from `previous` to `current`, rounded to one decimal
/// place, or `None` when `previous` is `0`.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(round_half_up((current - previous) / previous * 1000.0) / 10.0)
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whether a product category counts toward liter totals.
pub fn is_liter_eligible(category: &str) -> bool {
    LITER_CATEGORIES.contains(&category)
}

/// Normalize a category for the summary's category shares.
/// Only the legacy `Ovocné` spelling is folded into `Ovocné víno`.
pub fn normalize_category(category: &str) -> &str {
    if category == "Ovocné" {
        "Ovocné víno"
    } else {
        category
    }
}

/// Computed liters for one line item: `quantity x parsed volume`, or `0`
/// when the product category is not liter-eligible.
pub fn line_liters(quantity: i32, volume: &str, category: &str) -> f64 {
    if !is_liter_eligible(category) {
        return 0.0;
    }
    f64::from(quantity) * parsed_liters(volume)
}

/// Display label for a package bucket, e.g. `20.0` -> `"20L"`.
pub fn package_label(size: f64) -> String {
    format!("{}L", size)
}

/// Resolve a reporting period to its minimum `created_at` cutoff.
///
/// The cutoff is normalized to midnight UTC of the resolved day, so
/// orders placed earlier on the cutoff day are still included. `all` has
/// no lower bound.
pub fn period_cutoff(period: Period, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = match period {
        Period::All => return None,
        Period::Week => now - Duration::days(7),
        Period::Month => now - Duration::days(30),
        Period::Year => now.checked_sub_months(Months::new(12)).unwrap_or(now),
    };
    Some(midnight(raw.date_naive()))
}

/// First days of the trailing six calendar months, oldest first,
/// including the current month.
pub fn trend_month_starts(now: DateTime<Utc>) -> Vec<NaiveDate> {
    let today = now.date_naive();
    let current = today.with_day(1).unwrap_or(today);
    (0u32..6)
        .rev()
        .map(|back| current.checked_sub_months(Months::new(back)).unwrap_or(current))
        .collect()
}

/// Lower bound for the monthly trend fetch: midnight on the first day of
/// the oldest trend month.
pub fn trend_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let starts = trend_month_starts(now);
    let first = starts.first().copied().unwrap_or_else(|| now.date_naive());
    midnight(first)
}

/// Bucket key for a calendar month, e.g. `"2026-08"`.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    // ==================== parsed_liters tests ====================

    #[test]
    fn test_parsed_liters_plain_numbers() {
        assert_eq!(parsed_liters("5"), 5.0);
        assert_eq!(parsed_liters("10"), 10.0);
        assert_eq!(parsed_liters("3.5"), 3.5);
        assert_eq!(parsed_liters("50"), 50.0);
    }

    #[test]
    fn test_parsed_liters_with_unit_suffix() {
        assert_eq!(parsed_liters("20L"), 20.0);
        assert_eq!(parsed_liters("30 l"), 30.0);
    }

    #[test]
    fn test_parsed_liters_comma_is_not_a_decimal_separator() {
        // Documented quirk: the comma terminates the numeric prefix.
        assert_eq!(parsed_liters("1,5L"), 1.0);
    }

    #[test]
    fn test_parsed_liters_categorical_tokens_are_zero() {
        assert_eq!(parsed_liters("maly"), 0.0);
        assert_eq!(parsed_liters("velky"), 0.0);
        assert_eq!(parsed_liters("baleni"), 0.0);
    }

    #[test]
    fn test_parsed_liters_degenerate_inputs() {
        assert_eq!(parsed_liters(""), 0.0);
        assert_eq!(parsed_liters("-"), 0.0);
        assert_eq!(parsed_liters("."), 0.0);
        assert_eq!(parsed_liters("  "), 0.0);
    }

    #[test]
    fn test_parsed_liters_stops_at_second_dot() {
        assert_eq!(parsed_liters("5.5.5"), 5.5);
    }

    #[test]
    fn test_parsed_liters_negative() {
        assert_eq!(parsed_liters("-3"), -3.0);
    }

    // ==================== rounding tests ====================

    #[test]
    fn test_round_liters_one_decimal() {
        assert_eq!(round_liters(12.34), 12.3);
        assert_eq!(round_liters(12.36), 12.4);
    }

    #[test]
    fn test_round_liters_half_up() {
        assert_eq!(round_liters(12.35), 12.4);
        assert_eq!(round_liters(0.05), 0.1);
    }

    #[test]
    fn test_round_liters_whole_numbers_unchanged() {
        assert_eq!(round_liters(15.0), 15.0);
        assert_eq!(round_liters(0.0), 0.0);
    }

    #[test]
    fn test_percent_basic() {
        assert_eq!(percent(20.0, 80.0), 25.0);
        assert_eq!(percent(1.0, 3.0), 33.3);
    }

    #[test]
    fn test_percent_zero_whole() {
        assert_eq!(percent(20.0, 0.0), 0.0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(25.0, 20.0), Some(25.0));
        assert_eq!(percent_change(15.0, 20.0), Some(-25.0));
        assert_eq!(percent_change(25.0, 0.0), None);
    }

    // ==================== category tests ====================

    #[test]
    fn test_liter_eligibility() {
        assert!(is_liter_eligible("Víno"));
        assert!(is_liter_eligible("Nápoje"));
        assert!(is_liter_eligible("Ovocné víno"));
        assert!(is_liter_eligible("Ovocné"));
        assert!(!is_liter_eligible("Dusík"));
        assert!(!is_liter_eligible("Plyny"));
        assert!(!is_liter_eligible("PET"));
    }

    #[test]
    fn test_normalize_category_folds_legacy_spelling() {
        assert_eq!(normalize_category("Ovocné"), "Ovocné víno");
        assert_eq!(normalize_category("Ovocné víno"), "Ovocné víno");
        assert_eq!(normalize_category("Víno"), "Víno");
    }

    #[test]
    fn test_line_liters() {
        assert_eq!(line_liters(3, "5", "Víno"), 15.0);
        assert_eq!(line_liters(2, "10", "Nápoje"), 20.0);
        // Ineligible categories contribute nothing even with numeric volume
        assert_eq!(line_liters(4, "10", "PET"), 0.0);
        assert_eq!(line_liters(2, "maly", "Dusík"), 0.0);
    }

    #[test]
    fn test_package_label() {
        assert_eq!(package_label(20.0), "20L");
        assert_eq!(package_label(3.0), "3L");
    }

    // ==================== period tests ====================

    #[test]
    fn test_period_cutoff_all_is_unbounded() {
        assert_eq!(period_cutoff(Period::All, at(2026, 8, 30, 15, 45)), None);
    }

    #[test]
    fn test_period_cutoff_week_normalized_to_midnight() {
        let cutoff = period_cutoff(Period::Week, at(2026, 8, 30, 15, 45)).unwrap();
        assert_eq!(cutoff, at(2026, 8, 23, 0, 0));
    }

    #[test]
    fn test_period_cutoff_month_is_thirty_days() {
        let cutoff = period_cutoff(Period::Month, at(2026, 8, 30, 9, 0)).unwrap();
        assert_eq!(cutoff, at(2026, 7, 31, 0, 0));
    }

    #[test]
    fn test_period_cutoff_year_is_calendar_year() {
        let cutoff = period_cutoff(Period::Year, at(2026, 8, 30, 9, 0)).unwrap();
        assert_eq!(cutoff, at(2025, 8, 30, 0, 0));
    }

    #[test]
    fn test_period_cutoff_includes_same_day_orders() {
        // An order placed at 01:00 on the cutoff day must satisfy
        // created_at >= cutoff.
        let cutoff = period_cutoff(Period::Week, at(2026, 8, 30, 15, 45)).unwrap();
        assert!(at(2026, 8, 23, 1, 0) >= cutoff);
    }

    // ==================== trend window tests ====================

    #[test]
    fn test_trend_month_starts_six_months_ascending() {
        let starts = trend_month_starts(at(2026, 8, 30, 12, 0));
        let keys: Vec<String> = starts
            .iter()
            .map(|d| month_key(d.year(), d.month()))
            .collect();
        assert_eq!(
            keys,
            vec!["2026-03", "2026-04", "2026-05", "2026-06", "2026-07", "2026-08"]
        );
    }

    #[test]
    fn test_trend_month_starts_across_year_boundary() {
        let starts = trend_month_starts(at(2026, 1, 15, 12, 0));
        let keys: Vec<String> = starts
            .iter()
            .map(|d| month_key(d.year(), d.month()))
            .collect();
        assert_eq!(
            keys,
            vec!["2025-08", "2025-09", "2025-10", "2025-11", "2025-12", "2026-01"]
        );
    }

    #[test]
    fn test_trend_window_start_is_first_of_oldest_month() {
        let start = trend_window_start(at(2026, 8, 30, 12, 0));
        assert_eq!(start, at(2026, 3, 1, 0, 0));
    }

    #[test]
    fn test_month_key_zero_pads() {
        assert_eq!(month_key(2026, 3), "2026-03");
        assert_eq!(month_key(2026, 12), "2026-12");
    }
}
