//! Outbound rendering of store entities.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::codec::uri::ApiUrls;
use crate::store::{Company, ResolvedModel};

/// An entity that has a single-resource JSON rendering.
pub trait Resource {
    /// Serializable wire shape of the entity.
    type Document: Serialize;

    /// Absolute URI of this resource.
    fn uri(&self, urls: &ApiUrls) -> String;

    /// Build the wire document, resolving related resources to URIs.
    fn document(&self, urls: &ApiUrls) -> Self::Document;
}

/// Wire shape of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDocument {
    pub id: String,
    pub name: String,
    pub location: String,
    pub uri: String,
    pub computer_models: Vec<String>,
}

/// Wire shape of a computer model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerModelDocument {
    pub id: String,
    pub name: String,
    pub release: String,
    pub uri: String,
    /// URI of the owning company.
    pub company: String,
}

impl Resource for Company {
    type Document = CompanyDocument;

    fn uri(&self, urls: &ApiUrls) -> String {
        urls.company_uri(&self.id)
    }

    fn document(&self, urls: &ApiUrls) -> CompanyDocument {
        CompanyDocument {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            uri: self.uri(urls),
            computer_models: self
                .computer_models
                .keys()
                .map(|model_id| urls.computer_model_uri(&self.id, model_id))
                .collect(),
        }
    }
}

impl Resource for ResolvedModel {
    type Document = ComputerModelDocument;

    fn uri(&self, urls: &ApiUrls) -> String {
        urls.computer_model_uri(&self.company.id, &self.model.id)
    }

    fn document(&self, urls: &ApiUrls) -> ComputerModelDocument {
        ComputerModelDocument {
            id: self.model.id.clone(),
            name: self.model.name.clone(),
            release: self.model.release.clone(),
            uri: self.uri(urls),
            company: urls.company_uri(&self.company.id),
        }
    }
}

/// Render each element through its own `Resource` impl.
pub fn render_collection<R: Resource>(items: &[R], urls: &ApiUrls) -> Vec<R::Document> {
    items.iter().map(|item| item.document(urls)).collect()
}

/// Serialize as JSON indented with tabs.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}
