use chrono::NaiveDate;

/// Strict parse of `"dd/MM/yyyy"`: two-digit day and month, four-digit year.
/// Surrounding whitespace is ignored; anything else yields `None`.
pub fn parse_day_first_date(s: &str) -> Option<NaiveDate> {
    let b = s.trim().as_bytes();
    if b.len() != 10 || b[2] != b'/' || b[5] != b'/' {
        return None;
    }
    let digits = [0, 1, 3, 4, 6, 7, 8, 9];
    if !digits.iter().all(|&i| b[i].is_ascii_digit()) {
        return None;
    }

    let d = |i: usize| (b[i] - b'0') as u32;
    let day = d(0) * 10 + d(1);
    let month = d(3) * 10 + d(4);
    let year = (d(6) * 1000 + d(7) * 100 + d(8) * 10 + d(9)) as i32;

    NaiveDate::from_ymd_opt(year, month, day)
}
