//! Compiled URI templates for resource capabilities
//!
//! A template is a scheme plus ordered path segments, each either a literal
//! or a named placeholder (`countries://{countryName}`). Matching compares
//! segments in order and extracts placeholder values under their declared
//! names, so the name a handler receives is exactly the name written in the
//! template.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A compiled resource URI template
#[derive(Debug, Clone)]
pub struct UriTemplate {
    raw: String,
    scheme: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Compile a template string
    pub fn parse(template: &str) -> std::result::Result<Self, RegistryError> {
        let invalid = |message: &str| RegistryError::InvalidTemplate {
            template: template.to_string(),
            message: message.to_string(),
        };

        let (scheme, rest) = template
            .split_once("://")
            .ok_or_else(|| invalid("missing '://'"))?;
        if scheme.is_empty() {
            return Err(invalid("empty scheme"));
        }
        if rest.is_empty() {
            return Err(invalid("empty path"));
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                if name.is_empty() {
                    return Err(invalid("empty placeholder name"));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Placeholder(n) if n == name))
                {
                    return Err(invalid("duplicate placeholder name"));
                }
                segments.push(Segment::Placeholder(name.to_string()));
            } else if part.contains('{') || part.contains('}') {
                return Err(invalid("placeholder must span a whole segment"));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            scheme: scheme.to_string(),
            segments,
        })
    }

    /// The template string as registered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of placeholder segments
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count()
    }

    /// True when the template contains no placeholders
    pub fn is_concrete(&self) -> bool {
        self.placeholder_count() == 0
    }

    /// Match a concrete URI, extracting placeholder values by name
    ///
    /// Returns `None` unless the scheme matches and every segment lines up:
    /// literals compare exactly, placeholders capture any non-empty segment.
    pub fn match_uri(&self, uri: &str) -> Option<BTreeMap<String, String>> {
        let (scheme, rest) = uri.split_once("://")?;
        if scheme != self.scheme {
            return None;
        }

        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(params)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_template_matches_itself() {
        let template = UriTemplate::parse("greeting://general").unwrap();
        assert!(template.is_concrete());
        let params = template.match_uri("greeting://general").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_placeholder_extraction() {
        let template = UriTemplate::parse("countries://{countryName}").unwrap();
        let params = template.match_uri("countries://france").unwrap();
        assert_eq!(params["countryName"], "france");
    }

    #[test]
    fn test_scheme_mismatch() {
        let template = UriTemplate::parse("countries://{countryName}").unwrap();
        assert!(template.match_uri("greeting://france").is_none());
    }

    #[test]
    fn test_segment_count_mismatch() {
        let template = UriTemplate::parse("countries://{countryName}").unwrap();
        assert!(template.match_uri("countries://europe/france").is_none());
    }

    #[test]
    fn test_literal_segment_must_match_exactly() {
        let template = UriTemplate::parse("countries://all").unwrap();
        assert!(template.match_uri("countries://all").is_some());
        assert!(template.match_uri("countries://europe").is_none());
    }

    #[test]
    fn test_empty_placeholder_value_rejected() {
        let template = UriTemplate::parse("countries://{countryName}").unwrap();
        assert!(template.match_uri("countries://").is_none());
    }

    #[test]
    fn test_mixed_literal_and_placeholder_segments() {
        let template = UriTemplate::parse("countries://region/{regionName}").unwrap();
        let params = template.match_uri("countries://region/Europe").unwrap();
        assert_eq!(params["regionName"], "Europe");
        assert!(template.match_uri("countries://name/Europe").is_none());
    }

    #[test]
    fn test_invalid_templates_rejected() {
        assert!(UriTemplate::parse("no-scheme").is_err());
        assert!(UriTemplate::parse("://path").is_err());
        assert!(UriTemplate::parse("countries://").is_err());
        assert!(UriTemplate::parse("countries://{}").is_err());
        assert!(UriTemplate::parse("countries://pre{fix}").is_err());
        assert!(UriTemplate::parse("countries://{a}/{a}").is_err());
    }

    #[test]
    fn test_display_round_trips_raw() {
        let template = UriTemplate::parse("countries://{countryName}").unwrap();
        assert_eq!(template.to_string(), "countries://{countryName}");
        assert_eq!(template.as_str(), "countries://{countryName}");
    }
}
