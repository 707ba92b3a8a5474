//! In-memory resource store with identity and referential-integrity checks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use thiserror::Error;

use crate::store::model::{Company, ComputerModel, NewCompany, ResolvedModel};

/// Errors returned by mutating store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A company with this id already exists.
    #[error("company.id not available")]
    DuplicateId(String),

    /// The company already owns a model with this id.
    #[error("computerModel.id not available")]
    DuplicateModelId { company_id: String, model_id: String },

    /// The referenced company does not exist.
    #[error("company {0} not found")]
    CompanyNotFound(String),
}

/// Single source of truth for companies and their computer models.
#[derive(Debug, Default, Clone)]
pub struct ResourceStore {
    companies: IndexMap<String, Company>,
}

impl ResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of companies held.
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// All companies with their nested models, in insertion order.
    pub fn list_companies(&self) -> Vec<Company> {
        self.companies.values().cloned().collect()
    }

    pub fn get_company(&self, id: &str) -> Option<Company> {
        self.companies.get(id).cloned()
    }

    /// Models of a company, or `None` if the company is unknown.
    pub fn list_models(&self, company_id: &str) -> Option<Vec<ResolvedModel>> {
        self.companies.get(company_id).map(Company::resolved_models)
    }

    /// A single model, or `None` if either the company or the model is unknown.
    pub fn get_model(&self, company_id: &str, model_id: &str) -> Option<ResolvedModel> {
        let company = self.companies.get(company_id)?;
        let model = company.computer_models.get(model_id)?;
        Some(ResolvedModel {
            model: model.clone(),
            company: company.summary(),
        })
    }

    /// Insert a new company, indexing its models by id.
    pub fn add_company(&mut self, company: NewCompany) -> Result<(), StoreError> {
        if self.companies.contains_key(&company.id) {
            return Err(StoreError::DuplicateId(company.id));
        }

        let company = company.into_company();
        tracing::debug!(
            company_id = %company.id,
            computer_models = company.computer_models.len(),
            "Company added"
        );
        self.companies.insert(company.id.clone(), company);
        Ok(())
    }

    /// Remove a company and, with it, all of its models.
    pub fn remove_company(&mut self, id: &str) -> Option<Company> {
        let removed = self.companies.shift_remove(id);
        if let Some(company) = &removed {
            tracing::debug!(
                company_id = %company.id,
                computer_models = company.computer_models.len(),
                "Company removed"
            );
        }
        removed
    }

    /// Replace a company wholesale: remove by id, then add.
    ///
    /// The caller guarantees the replacement carries the id it replaces.
    /// If the add step fails the original company is put back.
    pub fn update_company(&mut self, company: NewCompany) -> Result<(), StoreError> {
        let previous = self.remove_company(&company.id);

        match self.add_company(company) {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(previous) = previous {
                    self.companies.insert(previous.id.clone(), previous);
                }
                Err(err)
            }
        }
    }

    /// Append a model to an existing company.
    pub fn add_model_to_company(
        &mut self,
        company_id: &str,
        model: ComputerModel,
    ) -> Result<(), StoreError> {
        let company = self
            .get_company(company_id)
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;

        if company.computer_models.contains_key(&model.id) {
            return Err(StoreError::DuplicateModelId {
                company_id: company_id.to_string(),
                model_id: model.id,
            });
        }

        let mut replacement = NewCompany::from(company);
        replacement.computer_models.push(model);
        self.update_company(replacement)
    }
}

/// The store shared across request handlers behind a single lock.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<ResourceStore>>,
}

impl SharedStore {
    pub fn new(store: ResourceStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store. The guard must not be held across an `.await`.
    ///
    /// A panic inside a handler leaves the data structurally intact, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, ResourceStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> ComputerModel {
        ComputerModel {
            id: id.into(),
            name: format!("Model {id}"),
            release: "1981".into(),
        }
    }

    fn company(id: &str, models: &[&str]) -> NewCompany {
        NewCompany {
            id: id.into(),
            name: format!("Company {id}"),
            location: "Somewhere".into(),
            computer_models: models.iter().map(|m| model(m)).collect(),
        }
    }

    #[test]
    fn test_add_and_get_company() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1", "m2"])).unwrap();

        let acme = store.get_company("acme").unwrap();
        assert_eq!(acme.name, "Company acme");
        assert_eq!(acme.computer_models.len(), 2);
        assert!(store.get_company("other").is_none());
    }

    #[test]
    fn test_duplicate_company_is_rejected_and_store_unchanged() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1"])).unwrap();

        let mut dup = company("acme", &[]);
        dup.name = "Impostor".into();
        let err = store.add_company(dup).unwrap_err();

        assert_eq!(err, StoreError::DuplicateId("acme".into()));
        assert_eq!(err.to_string(), "company.id not available");
        let acme = store.get_company("acme").unwrap();
        assert_eq!(acme.name, "Company acme");
        assert_eq!(acme.computer_models.len(), 1);
    }

    #[test]
    fn test_list_companies_keeps_insertion_order() {
        let mut store = ResourceStore::new();
        for id in ["zeta", "alpha", "mid"] {
            store.add_company(company(id, &[])).unwrap();
        }

        let ids: Vec<_> = store.list_companies().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_remove_company_cascades() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1"])).unwrap();

        let removed = store.remove_company("acme").unwrap();
        assert_eq!(removed.computer_models.len(), 1);
        assert!(store.list_models("acme").is_none());
        assert!(store.get_model("acme", "m1").is_none());
        assert!(store.remove_company("acme").is_none());
    }

    #[test]
    fn test_update_company_is_full_replace() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1", "m2"])).unwrap();

        let mut replacement = company("acme", &["m3"]);
        replacement.location = "NYC".into();
        store.update_company(replacement).unwrap();

        let acme = store.get_company("acme").unwrap();
        assert_eq!(acme.location, "NYC");
        assert_eq!(acme.computer_models.keys().collect::<Vec<_>>(), vec!["m3"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_model_resolves_company() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1"])).unwrap();

        let resolved = store.get_model("acme", "m1").unwrap();
        assert_eq!(resolved.model.id, "m1");
        assert_eq!(resolved.company.id, "acme");
        assert!(store.get_model("acme", "missing").is_none());
        assert!(store.get_model("missing", "m1").is_none());
    }

    #[test]
    fn test_model_ids_are_scoped_to_company() {
        let mut store = ResourceStore::new();
        store.add_company(company("a", &["shared"])).unwrap();
        store.add_company(company("b", &["shared"])).unwrap();

        assert_eq!(store.get_model("a", "shared").unwrap().company.id, "a");
        assert_eq!(store.get_model("b", "shared").unwrap().company.id, "b");
    }

    #[test]
    fn test_add_model_to_company() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1"])).unwrap();

        store.add_model_to_company("acme", model("m2")).unwrap();

        let ids: Vec<_> = store
            .list_models("acme")
            .unwrap()
            .into_iter()
            .map(|r| r.model.id)
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_add_model_to_unknown_company() {
        let mut store = ResourceStore::new();
        let err = store.add_model_to_company("ghost", model("m1")).unwrap_err();
        assert_eq!(err, StoreError::CompanyNotFound("ghost".into()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_duplicate_model_is_rejected() {
        let mut store = ResourceStore::new();
        store.add_company(company("acme", &["m1"])).unwrap();

        let mut dup = model("m1");
        dup.name = "Overwrite".into();
        let err = store.add_model_to_company("acme", dup).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateModelId { .. }));
        assert_eq!(store.get_model("acme", "m1").unwrap().model.name, "Model m1");
    }

    #[test]
    fn test_shared_store_lock() {
        let shared = SharedStore::new(ResourceStore::new());
        shared.lock().add_company(company("acme", &[])).unwrap();
        assert_eq!(shared.clone().lock().len(), 1);
    }
}
