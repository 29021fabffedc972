/// Format a value as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = (val.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if val < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Signed percentage with one decimal: +12.3%, -4.0%, 0.0%
pub fn percent(val: f64) -> String {
    if val > 0.0 {
        format!("+{val:.1}%")
    } else {
        format!("{val:.1}%")
    }
}

/// Render a `YYYY-MM` month key for humans: "March 2024". Unknown input is
/// passed through untouched.
pub fn month_display(key: &str) -> String {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    if let Some((year, month)) = key.split_once('-') {
        if let Ok(m) = month.parse::<usize>() {
            if (1..=12).contains(&m) {
                return format!("{} {year}", MONTHS[m - 1]);
            }
        }
    }
    key.to_string()
}
