// Display formatting for rates and axis labels
use super::aggregate::{week_end, week_start};
use super::chart::Granularity;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DECIMALS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

const MONTHS_RU: [&str; 12] = [
    "янв.", "февр.", "март", "апр.", "май", "июнь", "июль", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    fn month_abbrev(self, month0: u32) -> &'static str {
        let names = match self {
            Locale::Ru => &MONTHS_RU,
            Locale::En => &MONTHS_EN,
        };
        names[month0 as usize % 12]
    }

    fn month_year(self, date: NaiveDate) -> String {
        let month = self.month_abbrev(date.month0());
        match self {
            Locale::Ru => format!("{} {} г.", month, date.year()),
            Locale::En => format!("{} {}", month, date.year()),
        }
    }
}

/// Fixed-point number with a comma decimal separator. Ties round away from
/// zero, the same way plotted values are rounded.
pub fn format_number_with_comma(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{:.*}", decimals, rounded).replacen('.', ",", 1)
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{}%", format_number_with_comma(value, decimals))
}

fn day_month(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// X-axis label for a bucket key.
pub fn format_date(date: NaiveDate, granularity: Granularity, locale: Locale) -> String {
    match granularity {
        Granularity::Day => day_month(date),
        Granularity::Week => format!(
            "{} - {}",
            day_month(week_start(date)),
            day_month(week_end(date))
        ),
        Granularity::Month => locale.month_year(date),
    }
}

/// Full date for point details, independent of granularity.
pub fn format_date_full(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
