use crate::stats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DealerOperation {
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub kind: String,
    pub amount: f64,
}

/// Per-dealer e-wallet summary, aggregated by the backend report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DealerSummary {
    pub dealer_code: String,
    pub name: String,
    pub province: Option<String>,
    pub operation_count: u64,
    pub total_amount: f64,
    #[serde(default)]
    pub operations: Vec<DealerOperation>,
}

impl DealerSummary {
    /// Average amount per operation; 0 for a dealer with no operations.
    pub fn average_amount(&self) -> f64 {
        stats::average(self.total_amount, self.operation_count)
    }
}
