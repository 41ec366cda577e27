//! Chart payload types
//!
//! The chart data endpoint returns one series per stat title:
//! `{"stats_dict": {"<stat_title_id>": {"default": [..], "labels": [..]}}}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time series of one stat title; `default[i]` and `labels[i]` describe the same stat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub default: Vec<f64>,
    pub labels: Vec<String>,
}

impl ChartSeries {
    pub fn push(&mut self, amount: f64, label: String) {
        self.default.push(amount);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.default.len()
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_empty()
    }
}

/// Chart data endpoint payload, keyed by stat title id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub stats_dict: BTreeMap<String, ChartSeries>,
}
