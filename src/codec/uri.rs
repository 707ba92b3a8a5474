//! Hypermedia URI construction.

use crate::config::ServerConfig;

/// Absolute URL builder for API resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    base_url: String,
}

impl ApiUrls {
    /// Create from an already-assembled base URL such as `http://127.0.0.1:8080/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Base URL from the listener host/port and API prefix.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(format!(
            "http://{}:{}{}",
            config.listener.host, config.listener.port, config.api.prefix
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn companies_uri(&self) -> String {
        format!("{}/companies", self.base_url)
    }

    pub fn company_uri(&self, company_id: &str) -> String {
        format!("{}/companies/{}", self.base_url, company_id)
    }

    pub fn computer_model_uri(&self, company_id: &str, model_id: &str) -> String {
        format!(
            "{}/companies/{}/computer-models/{}",
            self.base_url, company_id, model_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uris_from_config() {
        let mut config = ServerConfig::default();
        config.listener.host = "localhost".into();
        config.listener.port = 3000;
        config.api.prefix = "/api/v2".into();

        let urls = ApiUrls::from_config(&config);
        assert_eq!(urls.base_url(), "http://localhost:3000/api/v2");
        assert_eq!(urls.company_uri("acme"), "http://localhost:3000/api/v2/companies/acme");
        assert_eq!(
            urls.computer_model_uri("acme", "m1"),
            "http://localhost:3000/api/v2/companies/acme/computer-models/m1"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let urls = ApiUrls::new("http://h:1/");
        assert_eq!(urls.companies_uri(), "http://h:1/companies");
    }
}
