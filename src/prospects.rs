//! Client-held prospect book. Nothing here is persisted; the list page reads
//! it through `ListView::replace_source(book.all().to_vec())`.

use crate::ids::ProspectId;
use crate::models::{Prospect, ProspectDraft, ProspectStatus};
use crate::validation::{Validate, ValidationErrors};
use chrono::Utc;
use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct ProspectBook {
    prospects: Vec<Prospect>,
    next_number: u32,
}

impl ProspectBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Prospect] {
        &self.prospects
    }

    pub fn len(&self) -> usize {
        self.prospects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prospects.is_empty()
    }

    pub fn get(&self, id: ProspectId) -> Option<&Prospect> {
        self.prospects.iter().find(|p| p.id == id)
    }

    /// Validate, then add with a fresh id and the next `PR-nnnn` number.
    pub fn create(&mut self, draft: ProspectDraft) -> Result<&Prospect, ValidationErrors> {
        draft.validate()?;
        self.next_number += 1;
        let prospect = Prospect {
            id: ProspectId::new_random(),
            number: format!("PR-{:04}", self.next_number),
            status: draft.status,
            company: draft.company,
            legal_representatives: draft.legal_representatives,
            documents: draft.documents,
            offer: draft.offer,
            commercial: draft.commercial,
            extra_info: draft.extra_info,
            created_at: Utc::now(),
        };
        info!(number = %prospect.number, "prospect created");
        self.prospects.push(prospect);
        Ok(&self.prospects[self.prospects.len() - 1])
    }

    /// Replace every editable block. Returns `Ok(false)` if the id is unknown.
    pub fn update(&mut self, id: ProspectId, draft: ProspectDraft) -> Result<bool, ValidationErrors> {
        draft.validate()?;
        let Some(p) = self.prospects.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        p.status = draft.status;
        p.company = draft.company;
        p.legal_representatives = draft.legal_representatives;
        p.documents = draft.documents;
        p.offer = draft.offer;
        p.commercial = draft.commercial;
        p.extra_info = draft.extra_info;
        Ok(true)
    }

    pub fn set_status(&mut self, id: ProspectId, status: ProspectStatus) -> bool {
        match self.prospects.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ProspectId) -> Option<Prospect> {
        let pos = self.prospects.iter().position(|p| p.id == id)?;
        Some(self.prospects.remove(pos))
    }
}
