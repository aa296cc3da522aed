//! Records the console lists and edits. Wire format is snake_case JSON; enum
//! values travel as SCREAMING_SNAKE_CASE.

/// A closed enum whose variants partition a record set. `ALL` lists every
/// variant so breakdowns can report zero counts.
pub trait Category: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

macro_rules! category_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::models::Category for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl $name {
            /// Parse a wire value, ignoring case.
            pub fn from_wire(s: &str) -> Option<Self> {
                match s.to_uppercase().as_str() {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", $crate::models::Category::as_str(self))
            }
        }
    };
}

mod agent;
mod dealer;
mod kpi;
mod prospect;
mod task;

pub use agent::{Agent, AgentDraft, AgentStatus};
pub use dealer::{DealerOperation, DealerSummary};
pub use kpi::{KpiMetric, KpiSummary};
pub use prospect::{
    CommercialData, CommercialOffer, CompanyData, DocumentChecklist, LegalRepresentative,
    Prospect, ProspectDraft, ProspectStatus, MAX_LEGAL_REPRESENTATIVES,
};
pub use task::{
    AssignedAgent, Customer, Intervention, InterventionDraft, Task, TaskCategory, TaskDraft,
    TaskPriority, TaskStatus,
};
