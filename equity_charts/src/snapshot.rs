//! Company snapshot: fundamentals, latest quote and the derived analyst rating, plus the
//! text formatting used when printing them.

use std::fmt;

use equity_data_ingestor::models::{overview::CompanyOverview, quote::GlobalQuote};
use serde::Serialize;

use crate::assemble::round2;

/// Five-star rendering of an analyst rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    /// Filled stars.
    pub full: u8,
    /// `true` when a half star follows the filled ones.
    pub half: bool,
    /// Outlined stars.
    pub empty: u8,
}

impl StarRating {
    /// Stars for a rating on the 0..=5 scale: `floor(r)` full stars, a half star when
    /// the fractional part is at least one half, the rest empty.
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = rating.fract() >= 0.5;
        Self {
            full,
            half,
            empty: 5 - full - u8::from(half),
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.full {
            f.write_str("★")?;
        }
        if self.half {
            f.write_str("½")?;
        }
        for _ in 0..self.empty {
            f.write_str("☆")?;
        }
        Ok(())
    }
}

/// Overview and quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySnapshot {
    /// Fundamentals.
    pub overview: CompanyOverview,
    /// Latest quote.
    pub quote: GlobalQuote,
    /// Weighted analyst rating (strong buy = 5 .. strong sell = 1), `0` without ratings.
    pub analyst_rating: f64,
    /// Star rendering of `analyst_rating`.
    pub stars: StarRating,
}

impl CompanySnapshot {
    /// Derives the rating fields from the overview.
    pub fn new(overview: CompanyOverview, quote: GlobalQuote) -> Self {
        let analyst_rating = overview.analyst_ratings.weighted_average();
        Self {
            stars: StarRating::from_rating(analyst_rating),
            analyst_rating: round2(analyst_rating),
            overview,
            quote,
        }
    }

    /// Human-readable lines for terminal output. Missing values print as `N/A`.
    pub fn to_lines(&self) -> Vec<String> {
        let o = &self.overview;
        let na = || "N/A".to_string();
        vec![
            format!(
                "{} ({})",
                o.name.as_deref().unwrap_or("Company Name"),
                o.symbol
            ),
            format!("Price:          {}", format_price(self.quote.price)),
            format!(
                "Change:         {}",
                self.quote
                    .change_percent
                    .map_or_else(na, |p| format!("{p:+.2}%"))
            ),
            format!(
                "Market cap:     {}",
                o.market_capitalization.map_or_else(na, format_millions)
            ),
            format!("EBITDA:         {}", o.ebitda.map_or_else(na, format_millions)),
            format!(
                "P/E ratio:      {}",
                o.pe_ratio.map_or_else(na, |v| format!("{v:.2}"))
            ),
            format!(
                "Profit margin:  {}",
                o.profit_margin.map_or_else(na, format_percent)
            ),
            format!(
                "Analyst rating: {} ({:.2} from {} ratings)",
                self.stars,
                self.analyst_rating,
                o.analyst_ratings.total()
            ),
            format!(
                "Headquarters:   {}",
                o.headquarters().unwrap_or_else(na)
            ),
            String::new(),
            o.description
                .clone()
                .unwrap_or_else(|| "No description available.".to_string()),
        ]
    }
}

/// Inserts `,` thousands separators into the integer part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// A dollar amount in millions with two decimals: `156336898000.0 -> "$156,336.90M"`.
pub fn format_millions(value: f64) -> String {
    format!("${}M", group_thousands(&format!("{:.2}", value / 1_000_000.0)))
}

/// A ratio as a percentage with one decimal: `0.0964 -> "9.6%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// A price with two decimals: `170.0 -> "$170.00"`.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}
