use chrono::{Datelike, Duration, NaiveDate};

/// Inclusive calendar window extracted from question text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRange {
    pub start: String,
    pub end: String,
    pub label: String,
}

/// Recognizes exactly two phrases: "this month" and "last month". Anything
/// else ("in January", "last 3 months", ...) yields no window and the
/// aggregations run unscoped. Extending the phrase set is a known follow-up;
/// keep new phrases in this one function.
pub fn extract_date_range(question: &str, today: NaiveDate) -> Option<ExtractedRange> {
    let q = question.to_lowercase();

    if q.contains("this month") {
        let start = first_day_of_month(today);
        return Some(ExtractedRange {
            start: iso(start),
            end: iso(today),
            label: "this month".to_string(),
        });
    }

    if q.contains("last month") {
        let this_month_start = first_day_of_month(today);
        let last_month_end = this_month_start - Duration::days(1);
        let last_month_start = first_day_of_month(last_month_end);
        return Some(ExtractedRange {
            start: iso(last_month_start),
            end: iso(last_month_end),
            label: "last month".to_string(),
        });
    }

    None
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
