use chrono::{Local, NaiveDate};

/// Weight used when a release date cannot be parsed
pub const FALLBACK_WEIGHT: f64 = 0.5;

const FULL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a release date in "YYYY-MM-DD" or "YYYY" resolution
///
/// A bare year resolves to January 1st of that year. Anything else,
/// including month precision ("YYYY-MM"), is rejected.
pub fn parse_release_date(release_date: &str) -> Option<NaiveDate> {
    let release_date = release_date.trim();

    if let Ok(date) = NaiveDate::parse_from_str(release_date, FULL_DATE_FORMAT) {
        return Some(date);
    }

    if release_date.len() == 4 && release_date.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = release_date.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Recency weight of a release date against today's local date
pub fn recency_weight(release_date: &str) -> f64 {
    recency_weight_at(release_date, Local::now().date_naive())
}

/// Recency weight `1 / (days_since_release + 1)` against a fixed "today"
///
/// Unparseable dates get [`FALLBACK_WEIGHT`]. Dates after `today` count as
/// released today.
pub fn recency_weight_at(release_date: &str, today: NaiveDate) -> f64 {
    match parse_release_date(release_date) {
        Some(date) => {
            let days = (today - date).num_days().max(0);
            1.0 / (days as f64 + 1.0)
        }
        None => {
            tracing::debug!(release_date = %release_date, "Unparseable release date, using fallback weight");
            FALLBACK_WEIGHT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_parse_full_date() {
        assert_eq!(
            parse_release_date("2017-05-26"),
            NaiveDate::from_ymd_opt(2017, 5, 26)
        );
    }

    #[test]
    fn test_parse_year_only() {
        assert_eq!(
            parse_release_date("1987"),
            NaiveDate::from_ymd_opt(1987, 1, 1)
        );
    }

    #[test]
    fn test_month_precision_is_rejected() {
        assert_eq!(parse_release_date("2017-05"), None);
        assert_eq!(recency_weight_at("2017-05", today()), FALLBACK_WEIGHT);
    }

    #[test]
    fn test_released_today_weighs_one() {
        assert_eq!(recency_weight_at("2024-06-15", today()), 1.0);
    }

    #[test]
    fn test_released_yesterday_weighs_half() {
        assert_eq!(recency_weight_at("2024-06-14", today()), 0.5);
    }

    #[test]
    fn test_unparseable_dates_use_fallback() {
        for bad in ["", "not a date", "2024-13-40", "24", "0000-00-00", "20245"] {
            assert_eq!(recency_weight_at(bad, today()), 0.5, "input {:?}", bad);
        }
    }

    #[test]
    fn test_future_date_clamps_to_today() {
        assert_eq!(recency_weight_at("2024-06-16", today()), 1.0);
        assert_eq!(recency_weight_at("2030-01-01", today()), 1.0);
    }

    #[test]
    fn test_weight_non_increasing_with_age() {
        let dates = [
            "2024-06-15",
            "2024-06-01",
            "2024-01-01",
            "2024",
            "2020-02-29",
            "2010",
            "1965-08-06",
        ];
        let weights: Vec<f64> = dates.iter().map(|d| recency_weight_at(d, today())).collect();

        for pair in weights.windows(2) {
            assert!(pair[0] >= pair[1], "{:?}", weights);
        }
        for weight in &weights {
            assert!(*weight > 0.0 && *weight <= 1.0);
        }
    }

    #[test]
    fn test_wall_clock_today_is_close_to_one() {
        let today = Local::now().date_naive();
        let weight = recency_weight(&today.format(FULL_DATE_FORMAT).to_string());
        // Tolerates a date rollover between the two clock reads
        assert!(weight >= 0.5);
        assert!(weight <= 1.0);
    }
}
