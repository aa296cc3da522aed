use crate::ids::{AgentId, InterventionId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

category_enum! {
    TaskStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Suspended => "SUSPENDED",
        WaitingCustomer => "WAITING_CUSTOMER",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

category_enum! {
    TaskPriority {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

category_enum! {
    TaskCategory {
        Technical => "TECHNICAL",
        Administrative => "ADMINISTRATIVE",
        Commercial => "COMMERCIAL",
        Support => "SUPPORT",
        Complaint => "COMPLAINT",
        Other => "OTHER",
    }
}

impl TaskStatus {
    /// Resolved and closed tasks no longer need work.
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Resolved | TaskStatus::Closed)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssignedAgent {
    pub id: AgentId,
    pub name: String,
    pub surname: String,
}

impl AssignedAgent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Work log entry on a task. Appended, never removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Intervention {
    pub id: Option<InterventionId>,
    pub date: DateTime<Utc>,
    pub author: String,
    pub description: String,
    #[serde(default)]
    pub minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: TaskId,
    pub number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub customer: Customer,
    pub assigned_agent: Option<AssignedAgent>,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn total_minutes(&self) -> u64 {
        self.interventions.iter().map(|i| u64::from(i.minutes)).sum()
    }

    pub fn append_intervention(&mut self, intervention: Intervention) {
        self.interventions.push(intervention);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub customer: Customer,
    pub assigned_agent_id: Option<AgentId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterventionDraft {
    pub author: String,
    pub description: String,
    pub minutes: u32,
    pub date: Option<DateTime<Utc>>,
}
