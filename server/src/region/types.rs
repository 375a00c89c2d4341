//! Region types, upstream payloads, and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Extent;

/// Errors that can occur while resolving a boundary
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("No matching boundary for {0}")]
    NotFound(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Upstream returned error payload: {0}")]
    UpstreamPayload(String),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

/// Administrative level a query resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionLevel {
    State,
    Village,
}

/// Which administrative names the caller supplied
#[derive(Debug, Clone, Default)]
pub struct BoundaryQuery {
    pub state: Option<String>,
    pub village: Option<String>,
}

impl BoundaryQuery {
    /// True when neither name is present (after trimming).
    pub fn is_empty(&self) -> bool {
        fn blank(s: &Option<String>) -> bool {
            s.as_deref().map_or(true, |v| v.trim().is_empty())
        }
        blank(&self.state) && blank(&self.village)
    }

    /// Human-readable label for log lines and NotFound messages.
    pub fn label(&self) -> String {
        match (self.state.as_deref(), self.village.as_deref()) {
            (Some(s), Some(v)) => format!("village '{}' in state '{}'", v, s),
            (None, Some(v)) => format!("village '{}'", v),
            (Some(s), None) => format!("state '{}'", s),
            (None, None) => "<empty query>".to_string(),
        }
    }
}

/// One case-insensitive contains predicate against an attribute field.
///
/// Values are sanitized at construction so the rendered filter carries no
/// wildcard or quote characters from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub value: String,
}

impl Predicate {
    pub fn contains(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: sanitize_filter_value(value),
        }
    }

    /// Render as a SQL-ish `UPPER(field) LIKE UPPER('%value%')` clause.
    pub fn render(&self) -> String {
        format!("UPPER({}) LIKE UPPER('%{}%')", self.field, self.value)
    }
}

/// Strip characters that would act as wildcards or break the quoted literal.
fn sanitize_filter_value(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '%' | '\'' | '_'))
        .collect()
}

/// Polygon geometry: one or more closed rings in EPSG:3857.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub rings: Vec<Vec<[f64; 2]>>,
}

/// A resolved boundary record from the feature-query service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// Esri-JSON feature-query response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub error: Option<UpstreamErrorBody>,
}

/// Embedded error payload some upstream responses carry with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UpstreamErrorBody {
    pub fn describe(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(msg)) => format!("{} ({})", msg, code),
            (None, Some(msg)) => msg.clone(),
            (Some(code), None) => format!("upstream error code {}", code),
            (None, None) => "unspecified upstream error".to_string(),
        }
    }
}

/// A resolved feature plus the level it was matched at.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub level: RegionLevel,
    pub feature: Feature,
}

/// Parameters for a clipped raster export.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub extent: Extent,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_sanitizes_injection_characters() {
        let p = Predicate::contains("vilname", "An%g'u_l");
        assert_eq!(p.value, "Angul");
        assert_eq!(p.render(), "UPPER(vilname) LIKE UPPER('%Angul%')");
    }

    #[test]
    fn predicate_trims_whitespace() {
        let p = Predicate::contains("stname", "  Odisha  ");
        assert_eq!(p.value, "Odisha");
    }

    #[test]
    fn boundary_query_emptiness() {
        assert!(BoundaryQuery::default().is_empty());
        assert!(
            BoundaryQuery {
                state: Some("   ".to_string()),
                village: None,
            }
            .is_empty()
        );
        assert!(
            !BoundaryQuery {
                state: Some("Odisha".to_string()),
                village: None,
            }
            .is_empty()
        );
    }

    #[test]
    fn feature_set_parses_esri_json() {
        let raw = r#"{
            "features": [{
                "geometry": {"rings": [[[1.0, 2.0], [3.0, 4.0], [1.0, 2.0]]]},
                "attributes": {"stname": "Odisha"}
            }]
        }"#;
        let set: FeatureSet = serde_json::from_str(raw).unwrap();
        assert_eq!(set.features.len(), 1);
        assert!(set.error.is_none());
        assert_eq!(set.features[0].geometry.rings[0].len(), 3);
        assert_eq!(set.features[0].attributes["stname"], "Odisha");
    }

    #[test]
    fn feature_set_parses_embedded_error() {
        let raw = r#"{"error": {"code": 400, "message": "Invalid query"}}"#;
        let set: FeatureSet = serde_json::from_str(raw).unwrap();
        assert!(set.features.is_empty());
        assert_eq!(set.error.unwrap().describe(), "Invalid query (400)");
    }

    #[test]
    fn region_level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RegionLevel::State).unwrap(),
            "\"state\""
        );
        assert_eq!(
            serde_json::to_string(&RegionLevel::Village).unwrap(),
            "\"village\""
        );
    }
}
