use crate::ids::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

category_enum! {
    /// Registry status, derived from the `active` flag.
    AgentStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

/// Agent registry entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Agent {
    pub id: AgentId,
    pub code: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub province: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    pub fn status(&self) -> AgentStatus {
        if self.active {
            AgentStatus::Active
        } else {
            AgentStatus::Inactive
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Body for create/update requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub code: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub province: Option<String>,
    pub active: bool,
}

impl From<&Agent> for AgentDraft {
    fn from(a: &Agent) -> Self {
        AgentDraft {
            code: a.code.clone(),
            name: a.name.clone(),
            surname: a.surname.clone(),
            email: a.email.clone(),
            phone: a.phone.clone(),
            province: a.province.clone(),
            active: a.active,
        }
    }
}
