use chrono::NaiveDate;
use fleet_config::Config;

/// Locale-aware rendering of amounts, distances and dates.
#[derive(Debug, Clone)]
pub struct Formatter {
    currency: String,
    precision: usize,
    polish_dates: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Formatter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            precision: usize::from(config.currency_precision),
            polish_dates: config.locale.to_ascii_lowercase().starts_with("pl"),
        }
    }

    pub fn amount(&self, value: f64) -> String {
        format!("{:.*} {}", self.precision, value, self.currency)
    }

    /// Amount with an explicit sign, as used for profit figures.
    pub fn signed_amount(&self, value: f64) -> String {
        if value > 0.0 {
            format!("+{}", self.amount(value))
        } else {
            self.amount(value)
        }
    }

    /// Odometer readings are unsigned and may exceed `i64::MAX`.
    pub fn mileage(&self, value: u64) -> String {
        format!("{} km", group_digits(&value.to_string()))
    }

    /// Distance left until the next service; overdue distances are shown
    /// unsigned with a marker instead of a minus sign.
    pub fn remaining(&self, value: i64, overdue: bool) -> String {
        let distance = format!("{} km", group_digits(&value.unsigned_abs().to_string()));
        if overdue {
            format!("{distance} (overdue)")
        } else {
            distance
        }
    }

    pub fn date(&self, date: NaiveDate) -> String {
        if self.polish_dates {
            date.format("%d.%m.%Y").to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    /// Prints `label: value` pairs with the labels padded to a common width.
    pub fn print_two_column(&self, rows: &[(&str, String)]) {
        for line in two_column_lines(rows) {
            println!("{line}");
        }
    }
}

fn two_column_lines(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("  {:width$} : {}", label, value, width = width))
        .collect()
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
