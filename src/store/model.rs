//! Company and computer model entities.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A computer model as stored inside its owning company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerModel {
    pub id: String,
    pub name: String,
    pub release: String,
}

/// A company together with the computer models it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Models keyed by their id, in insertion order.
    pub computer_models: IndexMap<String, ComputerModel>,
}

impl Company {
    /// The company fields without its models.
    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }

    /// Resolve every owned model against this company.
    pub fn resolved_models(&self) -> Vec<ResolvedModel> {
        let company = self.summary();
        self.computer_models
            .values()
            .map(|model| ResolvedModel {
                model: model.clone(),
                company: company.clone(),
            })
            .collect()
    }
}

/// The owning company of a model, without its model collection.
///
/// This is a back-reference only; it never owns the company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// A computer model paired with the company that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub model: ComputerModel,
    pub company: CompanySummary,
}

/// A company as submitted for creation or replacement.
///
/// Models arrive as a list; the store indexes them by id on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub id: String,
    pub name: String,
    pub location: String,
    pub computer_models: Vec<ComputerModel>,
}

impl NewCompany {
    /// Index the submitted models by id. Later duplicates replace earlier ones.
    pub fn into_company(self) -> Company {
        let computer_models = self
            .computer_models
            .into_iter()
            .map(|model| (model.id.clone(), model))
            .collect();

        Company {
            id: self.id,
            name: self.name,
            location: self.location,
            computer_models,
        }
    }
}

impl From<Company> for NewCompany {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            location: company.location,
            computer_models: company.computer_models.into_values().collect(),
        }
    }
}
