//! Competition filter predicates.
//!
//! The HTTP service and the client both filter through this module so a
//! selection yields the same records regardless of where it is evaluated.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::dto::filter::{DeadlineWindow, FilterSelection, PrizeRange};
use crate::models::{Competition, ONGOING_DEADLINE};

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Records matching `selection`, evaluated against the current time
pub fn apply(records: &[Competition], selection: &FilterSelection) -> Vec<Competition> {
    apply_at(records, selection, Utc::now())
}

/// Records matching `selection` with deadline buckets computed from `now`.
/// Relative order is preserved.
pub fn apply_at(
    records: &[Competition],
    selection: &FilterSelection,
    now: DateTime<Utc>,
) -> Vec<Competition> {
    if selection.is_unconstrained() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches_at(record, selection, now))
        .cloned()
        .collect()
}

/// Whether a single record satisfies every constraint of `selection`
pub fn matches_at(record: &Competition, selection: &FilterSelection, now: DateTime<Utc>) -> bool {
    matches_category(record, selection.category.as_deref())
        && selection
            .difficulty
            .is_none_or(|difficulty| record.difficulty == difficulty)
        && matches_prize_range(&record.prize_value, selection.prize_range)
        && matches_deadline(&record.deadline, selection.deadline, now)
}

fn matches_category(record: &Competition, category: Option<&str>) -> bool {
    category.is_none_or(|category| record.category == category)
}

pub fn matches_prize_range(prize_value: &str, range: PrizeRange) -> bool {
    range == PrizeRange::All || PrizeRange::classify(prize_amount(prize_value)) == range
}

pub fn matches_deadline(deadline: &str, window: DeadlineWindow, now: DateTime<Utc>) -> bool {
    window == DeadlineWindow::All || deadline_window(deadline, now) == window
}

/// Every ASCII digit of `prize_value` read as one integer.
///
/// Separators, currency symbols, words and decimal points are dropped, so
/// `"$1,000 Monthly"` is 1000 and `"$1.50"` is 150. No digits yields 0 and
/// values too large for `u64` saturate.
pub fn prize_amount(prize_value: &str) -> u64 {
    prize_value
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        })
}

/// Bucket a deadline relative to `now`; never returns `All`.
///
/// `Ongoing` and deadlines that cannot be read as a date land in `Later`.
/// Past dates count as `Week`.
pub fn deadline_window(deadline: &str, now: DateTime<Utc>) -> DeadlineWindow {
    if deadline == ONGOING_DEADLINE {
        return DeadlineWindow::Later;
    }

    let Some(date) = parse_deadline(deadline) else {
        tracing::debug!(deadline, "Unreadable deadline, treating as later");
        return DeadlineWindow::Later;
    };

    let one_week = now + Duration::days(WEEK_DAYS);
    let one_month = now + Duration::days(MONTH_DAYS);

    if date <= one_week {
        DeadlineWindow::Week
    } else if date <= one_month {
        DeadlineWindow::Month
    } else {
        DeadlineWindow::Later
    }
}

/// Read a deadline as an instant. Plain dates are midnight UTC.
pub fn parse_deadline(deadline: &str) -> Option<DateTime<Utc>> {
    let deadline = deadline.trim();
    if deadline.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(deadline) {
        return Some(timestamp.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(deadline, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(deadline, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Case-insensitive substring match on the title; an empty query matches everything
pub fn matches_title(record: &Competition, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || record.title.to_lowercase().contains(&query.to_lowercase())
}

/// Records whose title contains `query`
pub fn search(records: &[Competition], query: &str) -> Vec<Competition> {
    records
        .iter()
        .filter(|record| matches_title(record, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::fixtures::{competition, sample_competitions};
    use crate::models::Difficulty;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn titles(records: &[Competition]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    fn iso_days_from_now(days: i64) -> String {
        (now() + Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_technology_high_prize_scenario() {
        let selection = FilterSelection::all()
            .with_category("Technology")
            .with_prize_range(PrizeRange::High);

        let result = apply_at(&sample_competitions(), &selection, now());

        assert_eq!(
            titles(&result),
            vec!["Mobile App Innovation Challenge", "Game Development Hackathon"]
        );
    }

    #[test]
    fn test_all_selection_is_identity() {
        let records = sample_competitions();
        assert_eq!(apply_at(&records, &FilterSelection::all(), now()), records);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let records = sample_competitions();
        let selections = [
            FilterSelection::all().with_difficulty(Difficulty::Easy),
            FilterSelection::all().with_prize_range(PrizeRange::Medium),
            FilterSelection::all().with_deadline(DeadlineWindow::Later),
            FilterSelection::all()
                .with_category("Technology")
                .with_deadline(DeadlineWindow::Week),
        ];

        for selection in selections {
            let once = apply_at(&records, &selection, now());
            let twice = apply_at(&once, &selection, now());
            assert_eq!(once, twice, "{selection:?}");
        }
    }

    #[test]
    fn test_filtering_keeps_relative_order() {
        let result = apply_at(
            &sample_competitions(),
            &FilterSelection::all().with_difficulty(Difficulty::Easy),
            now(),
        );
        assert_eq!(
            titles(&result),
            vec![
                "Summer Photography Contest",
                "Culinary Innovation Award",
                "Fitness Challenge"
            ]
        );
    }

    #[test]
    fn test_prize_amount_extraction() {
        assert_eq!(prize_amount("$2,500"), 2_500);
        assert_eq!(prize_amount("$1,000 Monthly"), 1_000);
        assert_eq!(prize_amount("$1.50"), 150);
        assert_eq!(prize_amount("Bragging rights"), 0);
        assert_eq!(prize_amount("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn test_prize_range_boundaries() {
        assert!(matches_prize_range("$2,000", PrizeRange::Medium));
        assert!(!matches_prize_range("$2,000", PrizeRange::Low));
        assert!(matches_prize_range("$5,000", PrizeRange::High));
        assert!(!matches_prize_range("$5,000", PrizeRange::Medium));
        assert!(matches_prize_range("$1,999", PrizeRange::Low));
    }

    #[test]
    fn test_digit_free_prize_is_low() {
        assert!(matches_prize_range("Trophy", PrizeRange::Low));
        assert!(!matches_prize_range("Trophy", PrizeRange::High));
    }

    #[test]
    fn test_deadline_week_boundary() {
        let deadline = iso_days_from_now(7);
        assert_eq!(deadline_window(&deadline, now()), DeadlineWindow::Week);
    }

    #[test]
    fn test_deadline_month_boundary() {
        assert_eq!(
            deadline_window(&iso_days_from_now(8), now()),
            DeadlineWindow::Month
        );
        assert_eq!(
            deadline_window(&iso_days_from_now(30), now()),
            DeadlineWindow::Month
        );
        assert_eq!(
            deadline_window(&iso_days_from_now(31), now()),
            DeadlineWindow::Later
        );
    }

    fn rfc3339_from_now(duration: Duration) -> String {
        (now() + duration).to_rfc3339()
    }

    #[test]
    fn test_deadline_exact_instant_boundaries() {
        let week = rfc3339_from_now(Duration::days(7));
        let past_week = rfc3339_from_now(Duration::days(7) + Duration::seconds(1));
        let month = rfc3339_from_now(Duration::days(30));
        let past_month = rfc3339_from_now(Duration::days(30) + Duration::seconds(1));

        assert_eq!(deadline_window(&week, now()), DeadlineWindow::Week);
        assert_eq!(deadline_window(&past_week, now()), DeadlineWindow::Month);
        assert_eq!(deadline_window(&month, now()), DeadlineWindow::Month);
        assert_eq!(deadline_window(&past_month, now()), DeadlineWindow::Later);
    }

    #[test]
    fn test_past_deadline_counts_as_week() {
        assert_eq!(
            deadline_window(&iso_days_from_now(-3), now()),
            DeadlineWindow::Week
        );
    }

    #[test]
    fn test_ongoing_only_matches_later() {
        assert!(matches_deadline("Ongoing", DeadlineWindow::Later, now()));
        assert!(!matches_deadline("Ongoing", DeadlineWindow::Week, now()));
        assert!(!matches_deadline("Ongoing", DeadlineWindow::Month, now()));
        assert!(matches_deadline("Ongoing", DeadlineWindow::All, now()));
    }

    #[test]
    fn test_unreadable_deadline_falls_back_to_later() {
        assert_eq!(deadline_window("sometime soon", now()), DeadlineWindow::Later);
        assert_eq!(deadline_window("", now()), DeadlineWindow::Later);
    }

    #[test]
    fn test_parse_deadline_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();

        assert_eq!(parse_deadline("Jul 15, 2024"), Some(expected));
        assert_eq!(parse_deadline("July 15, 2024"), Some(expected));
        assert_eq!(parse_deadline("2024-07-15"), Some(expected));
        assert_eq!(parse_deadline("07/15/2024"), Some(expected));
        assert_eq!(parse_deadline("15 Jul 2024"), Some(expected));
        assert_eq!(parse_deadline("2024-07-15T00:00:00Z"), Some(expected));
        assert_eq!(
            parse_deadline("2024-07-15T02:00:00+02:00"),
            Some(expected)
        );
        assert_eq!(parse_deadline("Ongoing"), None);
    }

    #[test]
    fn test_sample_deadline_buckets() {
        let records = sample_competitions();

        let week = apply_at(
            &records,
            &FilterSelection::all().with_deadline(DeadlineWindow::Week),
            now(),
        );
        assert_eq!(titles(&week), Vec::<&str>::new());

        let month = apply_at(
            &records,
            &FilterSelection::all().with_deadline(DeadlineWindow::Month),
            now(),
        );
        assert_eq!(
            titles(&month),
            vec!["Summer Photography Contest", "Short Story Competition"]
        );

        let later = apply_at(
            &records,
            &FilterSelection::all().with_deadline(DeadlineWindow::Later),
            now(),
        );
        assert_eq!(later.len(), 6);
        assert!(titles(&later).contains(&"Fitness Challenge"));
    }

    #[test]
    fn test_category_is_exact_match() {
        let records = vec![competition("Lens Masters", "Photography", "$500", "Ongoing")];
        let lower = FilterSelection::all().with_category("photography");
        assert!(apply_at(&records, &lower, now()).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_title_substring() {
        let records = sample_competitions();

        assert_eq!(
            titles(&search(&records, "photo")),
            vec!["Summer Photography Contest"]
        );
        assert_eq!(titles(&search(&records, "CHALLENGE")).len(), 2);
        assert!(search(&records, "Technology").is_empty());
        assert_eq!(search(&records, "").len(), records.len());
    }
}
