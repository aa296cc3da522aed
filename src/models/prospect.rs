use crate::ids::ProspectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on legal representatives per prospect.
pub const MAX_LEGAL_REPRESENTATIVES: usize = 4;

category_enum! {
    ProspectStatus {
        New => "NEW",
        Contacted => "CONTACTED",
        Negotiation => "NEGOTIATION",
        Won => "WON",
        Lost => "LOST",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyData {
    pub name: String,
    pub vat_number: Option<String>,
    pub fiscal_code: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub pec: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LegalRepresentative {
    pub name: String,
    pub surname: String,
    pub fiscal_code: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocumentChecklist {
    pub identity_document: bool,
    pub chamber_of_commerce_extract: bool,
    pub signed_contract: bool,
    pub privacy_consent: bool,
    pub bank_details: bool,
}

impl DocumentChecklist {
    /// (collected, required)
    pub fn progress(&self) -> (usize, usize) {
        let flags = [
            self.identity_document,
            self.chamber_of_commerce_extract,
            self.signed_contract,
            self.privacy_consent,
            self.bank_details,
        ];
        (flags.iter().filter(|f| **f).count(), flags.len())
    }

    pub fn is_complete(&self) -> bool {
        let (done, required) = self.progress();
        done == required
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommercialOffer {
    pub product: Option<String>,
    pub monthly_fee: Option<f64>,
    pub activation_fee: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CommercialData {
    pub iban: Option<String>,
    pub sector: Option<String>,
    pub annual_revenue: Option<f64>,
    pub employees: Option<u32>,
}

/// Prospect held entirely on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Prospect {
    pub id: ProspectId,
    pub number: String,
    pub status: ProspectStatus,
    pub company: CompanyData,
    #[serde(default)]
    pub legal_representatives: Vec<LegalRepresentative>,
    #[serde(default)]
    pub documents: DocumentChecklist,
    #[serde(default)]
    pub offer: CommercialOffer,
    #[serde(default)]
    pub commercial: CommercialData,
    pub extra_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProspectDraft {
    pub status: ProspectStatus,
    pub company: CompanyData,
    pub legal_representatives: Vec<LegalRepresentative>,
    pub documents: DocumentChecklist,
    pub offer: CommercialOffer,
    pub commercial: CommercialData,
    pub extra_info: Option<String>,
}

impl Default for ProspectDraft {
    fn default() -> Self {
        ProspectDraft {
            status: ProspectStatus::New,
            company: CompanyData::default(),
            legal_representatives: Vec::new(),
            documents: DocumentChecklist::default(),
            offer: CommercialOffer::default(),
            commercial: CommercialData::default(),
            extra_info: None,
        }
    }
}
