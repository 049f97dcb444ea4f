//! Series summary statistics for chart headers and axis scaling

use crate::types::{PricePoint, TimestampMillis};
use serde::Serialize;
use statrs::statistics::{Data, Distribution};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub start: TimestampMillis,
    pub end: TimestampMillis,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; zero for a single point
    pub std_dev: f64,
    /// `last - first`
    pub change: f64,
    /// `change` as a percentage of `first`
    pub change_pct: f64,
}

impl SeriesSummary {
    /// Padding above and below the price range on a chart axis: 10% of the
    /// range, or 0.1% of the price when the series is flat.
    pub fn axis_buffer(&self) -> f64 {
        let range = self.max - self.min;
        if range > 0.0 {
            range * 0.1
        } else {
            self.max.abs() * 0.001
        }
    }
}

/// Summarise a series; `None` when it is empty
pub fn summarize(series: &[PricePoint]) -> Option<SeriesSummary> {
    let first = series.first()?;
    let last = series.last()?;

    let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let data = Data::new(prices);
    let mean = data.mean().unwrap_or(first.price);
    let std_dev = data.std_dev().filter(|s| s.is_finite()).unwrap_or(0.0);

    let change = last.price - first.price;
    Some(SeriesSummary {
        points: series.len(),
        start: first.timestamp,
        end: last.timestamp,
        first: first.price,
        last: last.price,
        min,
        max,
        mean,
        std_dev,
        change,
        change_pct: change / first.price * 100.0,
    })
}
