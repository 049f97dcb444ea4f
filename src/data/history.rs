//! Historical rate search: "what was the rate at this date and time?"
//!
//! A search resolves the entered date and time of day to a timestamp,
//! takes the closest point from the pair's full history and the
//! [`SEARCH_SPAN_DAYS`] window centred on it for the chart.

use super::series::{filter_centered, nearest};
use super::store::SeriesStore;
use crate::error::{Result, SpreadError};
use crate::types::{PricePoint, Series, TimestampMillis};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Width of the chart window shown around a searched timestamp
pub const SEARCH_SPAN_DAYS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalMatch {
    /// Timestamp that was asked for
    pub target: TimestampMillis,
    /// Closest point in the full history
    pub point: PricePoint,
    /// Points centred on the target
    pub window: Series,
}

fn time_error(text: &str) -> SpreadError {
    SpreadError::ParseError(format!(
        "invalid time '{}': expected e.g. 13:00, 1:00 PM or 1pm",
        text
    ))
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse a time of day in 24-hour (`13:00`, `0930`) or 12-hour
/// (`1:00 PM`, `1pm`, `12am`) form. Hour 0 is allowed with a period:
/// `0am` is midnight and `0pm` is noon.
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime> {
    let lowered = text.trim().to_lowercase();
    let (clock, period) = if let Some(rest) = lowered.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = lowered.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (lowered.as_str(), None)
    };
    if !clock.is_ascii() {
        return Err(time_error(text));
    }

    let (hour_text, minute_text) = match clock.split_once(':') {
        Some((h, m)) if (1..=2).contains(&h.len()) && (m.is_empty() || m.len() == 2) => (h, m),
        Some(_) => return Err(time_error(text)),
        None => match clock.len() {
            1 | 2 => (clock, ""),
            3 => clock.split_at(1),
            4 => clock.split_at(2),
            _ => return Err(time_error(text)),
        },
    };

    let hour = parse_digits(hour_text).ok_or_else(|| time_error(text))?;
    let minute = if minute_text.is_empty() {
        0
    } else {
        parse_digits(minute_text).ok_or_else(|| time_error(text))?
    };

    let hour = match period {
        Some(is_pm) => {
            if hour > 12 {
                return Err(time_error(text));
            }
            match (is_pm, hour) {
                (false, 12) => 0,
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, h) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| time_error(text))
}

/// Epoch millis of a UTC date and time of day
pub fn target_timestamp(date: NaiveDate, time: NaiveTime) -> TimestampMillis {
    NaiveDateTime::new(date, time).and_utc().timestamp_millis()
}

/// Closest point to `target` and the window centred on it; `None` for an
/// empty history
pub fn search_at(series: &[PricePoint], target: TimestampMillis) -> Option<HistoricalMatch> {
    let point = nearest(series, target)?;
    Some(HistoricalMatch {
        target,
        point,
        window: filter_centered(series, target, SEARCH_SPAN_DAYS),
    })
}

/// Search a pair's full cached history for a date and typed time
pub fn lookup(
    store: &mut SeriesStore,
    symbol: &str,
    date: NaiveDate,
    time_text: &str,
) -> Result<Option<HistoricalMatch>> {
    let time = parse_time_of_day(time_text)?;
    let target = target_timestamp(date, time);
    let series = store.get_or_generate(symbol)?;
    let found = search_at(series, target);

    match &found {
        Some(m) => log::debug!(
            "lookup {} at {}: {:.4} ({} window points)",
            symbol,
            target,
            m.point.price,
            m.window.len()
        ),
        None => log::warn!("lookup {} at {}: no data", symbol, target),
    }
    Ok(found)
}
