use chrono::{Datelike, NaiveDate, NaiveDateTime};
use js_sys::Date;

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Milliseconds since the epoch, from the browser clock
pub fn now_ms() -> i64 {
    Date::now() as i64
}

/// Today's local date
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// e.g. "May 1, 2024"
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// e.g. "May 1, 2024 at 10:00"
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    format!("{} at {}", format_date(datetime.date()), datetime.format("%H:%M"))
}

/// Value for an `<input type="date">`
pub fn input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date(date), "May 1, 2024");
        assert_eq!(format_datetime(date.and_hms_opt(10, 0, 0).unwrap()), "May 1, 2024 at 10:00");
        assert_eq!(input_value(date), "2024-05-01");
        assert_eq!(parse_input_value("2024-05-01"), Some(date));
        assert_eq!(parse_input_value("May 1"), None);
    }

    #[wasm_bindgen_test]
    fn test_today_is_a_real_date() {
        let today = today();
        assert!(today.year() >= 2024);
    }
}
