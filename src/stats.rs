//! Summary counts over the filtered (not paginated) subset of a list.

use crate::models::{
    Agent, AgentStatus, Category, DealerSummary, Prospect, ProspectStatus, Task, TaskCategory,
    TaskPriority, TaskStatus,
};
use serde::Serialize;
use std::collections::HashMap;

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// `count / total * 100`, one decimal. A zero total yields 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(count as f64 / total as f64 * 100.0)
}

/// `sum / count`; 0 when there is nothing to average.
pub fn average(sum: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Counts per variant of a closed enum. Every variant is present.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakdown<K: Category> {
    counts: HashMap<K, usize>,
    total: usize,
}

impl<K: Category> Breakdown<K> {
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut counts: HashMap<K, usize> = K::ALL.iter().map(|k| (*k, 0)).collect();
        let mut total = 0;
        for k in keys {
            *counts.entry(k).or_insert(0) += 1;
            total += 1;
        }
        Breakdown { counts, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, key: K) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn percentage(&self, key: K) -> f64 {
        percentage(self.count(key), self.total)
    }

    /// (variant, count, percentage) in declaration order.
    pub fn rows(&self) -> Vec<BreakdownRow> {
        K::ALL
            .iter()
            .map(|k| BreakdownRow {
                key: k.as_str(),
                count: self.count(*k),
                percentage: self.percentage(*k),
            })
            .collect()
    }
}

impl<K: Category> Default for Breakdown<K> {
    fn default() -> Self {
        Self::from_keys(std::iter::empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub key: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// A record type whose filtered subset can be summarised.
pub trait Aggregate: Sized {
    type Stats: Clone + std::fmt::Debug + PartialEq;

    fn aggregate(records: &[&Self]) -> Self::Stats;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentStats {
    pub total: usize,
    pub by_status: Breakdown<AgentStatus>,
}

impl Aggregate for Agent {
    type Stats = AgentStats;

    fn aggregate(records: &[&Agent]) -> AgentStats {
        AgentStats {
            total: records.len(),
            by_status: Breakdown::from_keys(records.iter().map(|a| a.status())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStats {
    pub total: usize,
    pub open: usize,
    pub by_status: Breakdown<TaskStatus>,
    pub by_priority: Breakdown<TaskPriority>,
    pub by_category: Breakdown<TaskCategory>,
    pub intervention_minutes: u64,
}

impl Aggregate for Task {
    type Stats = TaskStats;

    fn aggregate(records: &[&Task]) -> TaskStats {
        TaskStats {
            total: records.len(),
            open: records.iter().filter(|t| t.status.is_open()).count(),
            by_status: Breakdown::from_keys(records.iter().map(|t| t.status)),
            by_priority: Breakdown::from_keys(records.iter().map(|t| t.priority)),
            by_category: Breakdown::from_keys(records.iter().map(|t| t.category)),
            intervention_minutes: records.iter().map(|t| t.total_minutes()).sum(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProspectStats {
    pub total: usize,
    pub by_status: Breakdown<ProspectStatus>,
    /// Won over closed (won + lost) prospects.
    pub conversion_rate: f64,
    pub documents_complete: usize,
}

impl Aggregate for Prospect {
    type Stats = ProspectStats;

    fn aggregate(records: &[&Prospect]) -> ProspectStats {
        let by_status = Breakdown::from_keys(records.iter().map(|p| p.status));
        let won = by_status.count(ProspectStatus::Won);
        let closed = won + by_status.count(ProspectStatus::Lost);
        ProspectStats {
            total: records.len(),
            conversion_rate: percentage(won, closed),
            documents_complete: records.iter().filter(|p| p.documents.is_complete()).count(),
            by_status,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealerStats {
    pub dealers: usize,
    pub operations: u64,
    pub total_amount: f64,
    pub average_amount: f64,
    pub top_dealer: Option<String>,
}

impl Aggregate for DealerSummary {
    type Stats = DealerStats;

    fn aggregate(records: &[&DealerSummary]) -> DealerStats {
        let operations: u64 = records.iter().map(|d| d.operation_count).sum();
        let total_amount: f64 = records.iter().map(|d| d.total_amount).sum();
        let top_dealer = records
            .iter()
            .max_by(|a, b| a.total_amount.total_cmp(&b.total_amount))
            .map(|d| d.dealer_code.clone());
        DealerStats {
            dealers: records.len(),
            operations,
            total_amount,
            average_amount: average(total_amount, operations),
            top_dealer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(0.0, 0), 0.0);
        assert_eq!(average(150.0, 3), 50.0);
    }

    #[test]
    fn breakdown_lists_every_variant() {
        let b = Breakdown::from_keys([TaskPriority::High, TaskPriority::High, TaskPriority::Low]);
        assert_eq!(b.total(), 3);
        assert_eq!(b.count(TaskPriority::Urgent), 0);
        let rows = b.rows();
        assert_eq!(rows.len(), TaskPriority::ALL.len());
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 3);
        assert_eq!(rows[2].key, "HIGH");
        assert_eq!(rows[2].percentage, 66.7);
    }
}
