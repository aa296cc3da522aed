use crate::stats;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KpiMetric {
    pub name: String,
    pub value: f64,
    pub target: Option<f64>,
}

impl KpiMetric {
    /// Percent of target reached, one decimal. 0 when there is no usable target.
    pub fn achievement(&self) -> f64 {
        match self.target {
            Some(t) if t > 0.0 => stats::round1(self.value / t * 100.0),
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KpiSummary {
    pub period: String,
    #[serde(default)]
    pub metrics: Vec<KpiMetric>,
}
