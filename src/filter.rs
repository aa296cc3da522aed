//! Record predicates for list pages: free-text search plus enum constraints.
//! Pure functions; no side effects.

use crate::models::{
    Agent, AgentStatus, DealerSummary, Prospect, ProspectStatus, Task, TaskCategory,
    TaskPriority, TaskStatus,
};

/// Either the "all" sentinel or one concrete value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    /// An absent value only passes the `All` sentinel.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(want) => value == Some(want),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Choice::Only(v),
            None => Choice::All,
        }
    }
}

impl Choice<String> {
    /// Province-style constraint: compared case-insensitively, surrounding blanks ignored.
    pub fn matches_text(&self, value: Option<&str>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(want) => {
                value.is_some_and(|v| v.trim().eq_ignore_ascii_case(want.trim()))
            }
        }
    }
}

/// Normalized search text. Empty matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: impl AsRef<str>) -> Self {
        SearchTerm(raw.as_ref().trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the term is empty or any present field contains it.
    pub fn matches<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        if self.0.is_empty() {
            return true;
        }
        fields
            .into_iter()
            .flatten()
            .any(|f| f.to_lowercase().contains(&self.0))
    }
}

/// Filter state for one list page. Updates are typed per page.
pub trait ListFilter: Clone + Default {
    type Update;

    /// Apply one field update. Returns true if the stored value changed.
    fn apply(&mut self, update: Self::Update) -> bool;
}

/// A record that can be tested against its page's filter.
pub trait Filterable {
    type Filter: ListFilter;

    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Filtered subset, original order preserved.
pub fn filter_records<'a, T: Filterable>(records: &'a [T], filter: &T::Filter) -> Vec<&'a T> {
    records.iter().filter(|r| r.matches(filter)).collect()
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// --- Agents ---

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentFilter {
    pub search: SearchTerm,
    pub status: Choice<AgentStatus>,
    pub province: Choice<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AgentFilterUpdate {
    Search(String),
    Status(Choice<AgentStatus>),
    Province(Choice<String>),
}

impl ListFilter for AgentFilter {
    type Update = AgentFilterUpdate;

    fn apply(&mut self, update: AgentFilterUpdate) -> bool {
        match update {
            AgentFilterUpdate::Search(s) => replace(&mut self.search, SearchTerm::new(s)),
            AgentFilterUpdate::Status(c) => replace(&mut self.status, c),
            AgentFilterUpdate::Province(c) => replace(&mut self.province, c),
        }
    }
}

impl Filterable for Agent {
    type Filter = AgentFilter;

    fn matches(&self, f: &AgentFilter) -> bool {
        f.search.matches([
            Some(self.name.as_str()),
            Some(self.surname.as_str()),
            Some(self.code.as_str()),
            self.email.as_deref(),
        ]) && f.status.matches(Some(&self.status()))
            && f.province.matches_text(self.province.as_deref())
    }
}

// --- Tasks ---

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    pub search: SearchTerm,
    pub status: Choice<TaskStatus>,
    pub priority: Choice<TaskPriority>,
    pub category: Choice<TaskCategory>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TaskFilterUpdate {
    Search(String),
    Status(Choice<TaskStatus>),
    Priority(Choice<TaskPriority>),
    Category(Choice<TaskCategory>),
}

impl ListFilter for TaskFilter {
    type Update = TaskFilterUpdate;

    fn apply(&mut self, update: TaskFilterUpdate) -> bool {
        match update {
            TaskFilterUpdate::Search(s) => replace(&mut self.search, SearchTerm::new(s)),
            TaskFilterUpdate::Status(c) => replace(&mut self.status, c),
            TaskFilterUpdate::Priority(c) => replace(&mut self.priority, c),
            TaskFilterUpdate::Category(c) => replace(&mut self.category, c),
        }
    }
}

impl Filterable for Task {
    type Filter = TaskFilter;

    fn matches(&self, f: &TaskFilter) -> bool {
        let agent_name = self.assigned_agent.as_ref().map(|a| a.full_name());
        f.search.matches([
            Some(self.number.as_str()),
            Some(self.title.as_str()),
            Some(self.customer.name.as_str()),
            agent_name.as_deref(),
        ]) && f.status.matches(Some(&self.status))
            && f.priority.matches(Some(&self.priority))
            && f.category.matches(Some(&self.category))
    }
}

// --- Prospects ---

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProspectFilter {
    pub search: SearchTerm,
    pub status: Choice<ProspectStatus>,
    pub province: Choice<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProspectFilterUpdate {
    Search(String),
    Status(Choice<ProspectStatus>),
    Province(Choice<String>),
}

impl ListFilter for ProspectFilter {
    type Update = ProspectFilterUpdate;

    fn apply(&mut self, update: ProspectFilterUpdate) -> bool {
        match update {
            ProspectFilterUpdate::Search(s) => replace(&mut self.search, SearchTerm::new(s)),
            ProspectFilterUpdate::Status(c) => replace(&mut self.status, c),
            ProspectFilterUpdate::Province(c) => replace(&mut self.province, c),
        }
    }
}

impl Filterable for Prospect {
    type Filter = ProspectFilter;

    fn matches(&self, f: &ProspectFilter) -> bool {
        let first_rep = self.legal_representatives.first().map(|r| r.surname.as_str());
        f.search.matches([
            Some(self.number.as_str()),
            Some(self.company.name.as_str()),
            self.company.vat_number.as_deref(),
            first_rep,
        ]) && f.status.matches(Some(&self.status))
            && f.province.matches_text(self.company.province.as_deref())
    }
}

// --- E-wallet dealers ---

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DealerFilter {
    pub search: SearchTerm,
    pub province: Choice<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DealerFilterUpdate {
    Search(String),
    Province(Choice<String>),
}

impl ListFilter for DealerFilter {
    type Update = DealerFilterUpdate;

    fn apply(&mut self, update: DealerFilterUpdate) -> bool {
        match update {
            DealerFilterUpdate::Search(s) => replace(&mut self.search, SearchTerm::new(s)),
            DealerFilterUpdate::Province(c) => replace(&mut self.province, c),
        }
    }
}

impl Filterable for DealerSummary {
    type Filter = DealerFilter;

    fn matches(&self, f: &DealerFilter) -> bool {
        f.search
            .matches([Some(self.dealer_code.as_str()), Some(self.name.as_str())])
            && f.province.matches_text(self.province.as_deref())
    }
}
