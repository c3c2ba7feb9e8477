//! Compact day stamps for output file names, e.g. `20MAY2019`.

use chrono::{Local, NaiveDate};

/// Formats `date` as day, abbreviated month and year, upper-cased.
///
/// ```rust
/// use chrono::NaiveDate;
/// use rakott::day_stamp;
///
/// let date = NaiveDate::from_ymd_opt(2019, 5, 20).unwrap();
/// assert_eq!(day_stamp(date), "20MAY2019");
/// ```
pub fn day_stamp(date: NaiveDate) -> String {
    date.format("%d%b%Y").to_string().to_uppercase()
}

/// Day stamp of the current local date.
pub fn today_stamp() -> String {
    day_stamp(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        assert_eq!(day_stamp(date), "03JAN2021");
    }

    #[test]
    fn test_today_stamp_shape() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 9);
        assert!(stamp[2..5].chars().all(|c| c.is_ascii_uppercase()));
    }
}
