//! Deterministic records for list tests.

use backoffice_core::ids::{AgentId, TaskId};
use backoffice_core::models::{
    Agent, AssignedAgent, CompanyData, Customer, DealerSummary, Intervention,
    LegalRepresentative, ProspectDraft, ProspectStatus, Task, TaskCategory, TaskPriority,
    TaskStatus,
};
use backoffice_core::models::Category;
use chrono::{TimeZone, Utc};

const PROVINCES: [&str; 3] = ["MI", "RM", "TO"];

/// `n` agents; every third is inactive, every fifth has no province.
pub fn agents(n: usize) -> Vec<Agent> {
    (1..=n)
        .map(|i| Agent {
            id: AgentId::new(i as i64).unwrap(),
            code: format!("AG{:03}", i),
            name: format!("Name{}", i),
            surname: if i % 2 == 0 { "Rossi".to_string() } else { "Bianchi".to_string() },
            email: Some(format!("agent{}@example.com", i)),
            phone: None,
            province: if i % 5 == 0 { None } else { Some(PROVINCES[i % 3].to_string()) },
            active: i % 3 != 0,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
            updated_at: None,
        })
        .collect()
}

pub fn intervention(minutes: u32) -> Intervention {
    Intervention {
        id: None,
        date: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        author: "operator".to_string(),
        description: "call back".to_string(),
        minutes,
    }
}

/// `n` tasks cycling through every status, priority and category.
pub fn tasks(n: usize) -> Vec<Task> {
    (1..=n)
        .map(|i| Task {
            id: TaskId::new(i as i64).unwrap(),
            number: format!("T-{:04}", i),
            title: format!("Ticket {}", i),
            description: None,
            status: TaskStatus::ALL[i % TaskStatus::ALL.len()],
            priority: TaskPriority::ALL[i % TaskPriority::ALL.len()],
            category: TaskCategory::ALL[i % TaskCategory::ALL.len()],
            customer: Customer {
                id: Some(100 + i as i64),
                name: format!("Customer {}", i),
                email: None,
                phone: None,
            },
            assigned_agent: (i % 2 == 0).then(|| AssignedAgent {
                id: AgentId::new(1).unwrap(),
                name: "Mario".to_string(),
                surname: "Verdi".to_string(),
            }),
            interventions: vec![intervention(15); i % 3],
            created_at: None,
        })
        .collect()
}

pub fn prospect_draft(company: &str, province: Option<&str>, status: ProspectStatus) -> ProspectDraft {
    ProspectDraft {
        status,
        company: CompanyData {
            name: company.to_string(),
            vat_number: Some("01234567890".to_string()),
            province: province.map(String::from),
            ..Default::default()
        },
        legal_representatives: vec![LegalRepresentative {
            name: "Anna".to_string(),
            surname: format!("Rep{}", company),
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn dealer(code: &str, province: Option<&str>, operations: u64, total: f64) -> DealerSummary {
    DealerSummary {
        dealer_code: code.to_string(),
        name: format!("Dealer {}", code),
        province: province.map(String::from),
        operation_count: operations,
        total_amount: total,
        operations: Vec::new(),
    }
}
