//! URL template compilation and path matching.
//!
//! # Responsibilities
//! - Parse a template such as `companies/:companyId` into segments
//! - Match a request path segment by segment
//! - Capture parameter segments by name
//!
//! # Design Decisions
//! - Exact segment count; one optional trailing `/`
//! - Literal segments are case-sensitive
//! - A parameter matches exactly one non-empty segment
//! - No regex: matching is a single pass over the segments

use thiserror::Error;

/// Marker that introduces a parameter segment.
pub const PARAM_MARKER: char = ':';

/// Errors raised when compiling templates into a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("template `{template}` has invalid parameter name `{name}`")]
    InvalidParamName { template: String, name: String },

    #[error("template `{template}` declares parameter `{name}` twice")]
    DuplicateParam { template: String, name: String },

    #[error("templates `{first}` and `{second}` can match the same path")]
    Ambiguous { first: String, second: String },
}

/// One compiled template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// Named values captured from a matched path, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: Vec<(String, String)>,
}

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A compiled URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl PathTemplate {
    /// Compile a `/`-delimited template. Leading and trailing `/` are ignored.
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let trimmed = template.trim_matches('/');
        let mut segments = Vec::new();

        if !trimmed.is_empty() {
            for part in trimmed.split('/') {
                if part.is_empty() {
                    return Err(TemplateError::EmptySegment(template.to_string()));
                }

                match part.strip_prefix(PARAM_MARKER) {
                    Some(name) => {
                        if !is_valid_param_name(name) {
                            return Err(TemplateError::InvalidParamName {
                                template: template.to_string(),
                                name: name.to_string(),
                            });
                        }
                        if segments.iter().any(|s| matches!(s, Segment::Param(n) if n == name)) {
                            return Err(TemplateError::DuplicateParam {
                                template: template.to_string(),
                                name: name.to_string(),
                            });
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The template text as declared, without surrounding slashes.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a path relative to the API prefix, e.g. `/companies/acme/`.
    ///
    /// Returns the captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);

        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.params.push((name.clone(), part.to_string()));
                }
                _ => return None,
            }
        }
        Some(params)
    }

    /// Whether some path could match both templates.
    pub fn overlaps(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let t = PathTemplate::compile("companies").unwrap();
        assert!(t.matches("/companies").unwrap().is_empty());
        assert!(t.matches("/companies/").is_some());
        assert!(t.matches("companies").is_some());
        assert!(t.matches("/Companies").is_none());
        assert!(t.matches("/companies//").is_none());
        assert!(t.matches("/companies/acme").is_none());
        assert!(t.matches("/other/companies").is_none());
    }

    #[test]
    fn test_param_capture() {
        let t = PathTemplate::compile("companies/:companyId/computer-models/:computerModelId").unwrap();
        let params = t.matches("/companies/acme/computer-models/m1").unwrap();

        assert_eq!(params.get("companyId"), Some("acme"));
        assert_eq!(params.get("computerModelId"), Some("m1"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["companyId", "computerModelId"]);
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        let t = PathTemplate::compile("companies/:companyId").unwrap();
        assert!(t.matches("/companies/").is_none());
        assert!(t.matches("/companies//").is_none());
        assert_eq!(t.matches("/companies/acme/").unwrap().get("companyId"), Some("acme"));
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(
            PathTemplate::compile("companies//x"),
            Err(TemplateError::EmptySegment("companies//x".into()))
        );
        assert!(matches!(
            PathTemplate::compile("companies/:"),
            Err(TemplateError::InvalidParamName { .. })
        ));
        assert!(matches!(
            PathTemplate::compile("companies/:9id"),
            Err(TemplateError::InvalidParamName { .. })
        ));
        assert!(matches!(
            PathTemplate::compile("a/:id/b/:id"),
            Err(TemplateError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_overlap_detection() {
        let company = PathTemplate::compile("companies/:companyId").unwrap();
        let models = PathTemplate::compile("companies/:companyId/computer-models").unwrap();
        let search = PathTemplate::compile("companies/search").unwrap();
        let users = PathTemplate::compile("users/:id").unwrap();

        assert!(!company.overlaps(&models));
        assert!(company.overlaps(&search));
        assert!(!company.overlaps(&users));
    }
}
