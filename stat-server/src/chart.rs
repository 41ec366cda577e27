//! Chart data aggregation
//!
//! Groups stats into one time series per stat title:
//!
//! ```text
//! [Stat{title: 1, 2020-04-21, 3}, Stat{title: 1, 2020-04-20, 2.5}]
//!   -> {"1": {"default": [2.5, 3.0], "labels": ["2020-04-20", "2020-04-21"]}}
//! ```
//!
//! Series are ordered by date, then by stat id. Stat titles without stats
//! do not appear.

use rust_decimal::prelude::ToPrimitive;
use shared::chart::{ChartData, ChartSeries};
use shared::models::Stat;

/// Build the chart payload from every stat in the store
pub fn build_chart_data(stats: &[Stat]) -> ChartData {
    let mut ordered: Vec<&Stat> = stats.iter().collect();
    ordered.sort_by_key(|s| (s.date, s.id));

    let mut data = ChartData::default();
    for stat in ordered {
        data.stats_dict
            .entry(stat.title_id.to_string())
            .or_insert_with(ChartSeries::default)
            .push(
                stat.amount.to_f64().unwrap_or_default(),
                stat.date.format("%Y-%m-%d").to_string(),
            );
    }
    data
}
