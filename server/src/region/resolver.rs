//! Name-to-boundary resolution

use std::sync::Arc;
use tracing::info;

use super::client::GeodataClient;
use super::types::{BoundaryQuery, Predicate, RegionError, RegionLevel, Resolution};
use crate::config::FieldConfig;

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolves a state/village query to a single boundary feature.
pub struct RegionResolver {
    client: Arc<dyn GeodataClient>,
    fields: FieldConfig,
}

impl RegionResolver {
    pub fn new(client: Arc<dyn GeodataClient>, fields: FieldConfig) -> Self {
        Self { client, fields }
    }

    /// Build the filter for a query.
    ///
    /// Village queries match the village name field, AND-ed with the state
    /// field when a state is also given; state-only queries match the state
    /// field alone.
    fn where_clause(&self, query: &BoundaryQuery) -> String {
        let mut predicates = Vec::new();
        if let Some(village) = non_blank(&query.village) {
            predicates.push(Predicate::contains(&self.fields.village_field, village));
            if let Some(state) = non_blank(&query.state) {
                predicates.push(Predicate::contains(&self.fields.state_field, state));
            }
        } else if let Some(state) = non_blank(&query.state) {
            predicates.push(Predicate::contains(&self.fields.state_field, state));
        }
        predicates
            .iter()
            .map(Predicate::render)
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    fn level(query: &BoundaryQuery) -> RegionLevel {
        if non_blank(&query.village).is_some() {
            RegionLevel::Village
        } else {
            RegionLevel::State
        }
    }

    /// Resolve the best-matching boundary feature for `query`.
    pub async fn resolve(&self, query: &BoundaryQuery) -> Result<Resolution, RegionError> {
        let level = Self::level(query);
        let where_clause = self.where_clause(query);

        let set = self.client.query_boundary(&where_clause).await?;
        let feature = set
            .features
            .into_iter()
            .next()
            .ok_or_else(|| RegionError::NotFound(query.label()))?;

        info!(
            level = ?level,
            rings = feature.geometry.rings.len(),
            "resolved {}",
            query.label()
        );
        Ok(Resolution { level, feature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::types::{ExportRequest, Feature, FeatureSet, Geometry};
    use async_trait::async_trait;
    use bytes::Bytes;

    struct StubClient {
        features: Vec<Feature>,
        last_where: std::sync::Mutex<Option<String>>,
    }

    impl StubClient {
        fn with_features(features: Vec<Feature>) -> Arc<Self> {
            Arc::new(Self {
                features,
                last_where: std::sync::Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl GeodataClient for StubClient {
        async fn query_boundary(&self, where_clause: &str) -> Result<FeatureSet, RegionError> {
            *self.last_where.lock().unwrap() = Some(where_clause.to_string());
            Ok(FeatureSet {
                features: self.features.clone(),
                error: None,
            })
        }

        async fn export_raster(&self, _request: &ExportRequest) -> Result<Bytes, RegionError> {
            unimplemented!("not used by resolver tests")
        }
    }

    fn square_feature() -> Feature {
        Feature {
            geometry: Geometry {
                rings: vec![vec![
                    [0.0, 0.0],
                    [100.0, 0.0],
                    [100.0, 100.0],
                    [0.0, 100.0],
                    [0.0, 0.0],
                ]],
            },
            attributes: serde_json::Map::new(),
        }
    }

    fn resolver(client: Arc<StubClient>) -> RegionResolver {
        RegionResolver::new(client, FieldConfig::default())
    }

    #[tokio::test]
    async fn state_only_resolves_state_level() {
        let client = StubClient::with_features(vec![square_feature()]);
        let resolution = resolver(client.clone())
            .resolve(&BoundaryQuery {
                state: Some("Odisha".to_string()),
                village: None,
            })
            .await
            .unwrap();

        assert_eq!(resolution.level, RegionLevel::State);
        let clause = client.last_where.lock().unwrap().clone().unwrap();
        assert_eq!(clause, "UPPER(stname) LIKE UPPER('%Odisha%')");
    }

    #[tokio::test]
    async fn village_with_state_resolves_village_level() {
        let client = StubClient::with_features(vec![square_feature()]);
        let resolution = resolver(client.clone())
            .resolve(&BoundaryQuery {
                state: Some("Odisha".to_string()),
                village: Some("Angul".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(resolution.level, RegionLevel::Village);
        let clause = client.last_where.lock().unwrap().clone().unwrap();
        assert_eq!(
            clause,
            "UPPER(vilname) LIKE UPPER('%Angul%') AND UPPER(stname) LIKE UPPER('%Odisha%')"
        );
    }

    #[tokio::test]
    async fn injection_characters_are_stripped_from_clause() {
        let client = StubClient::with_features(vec![square_feature()]);
        resolver(client.clone())
            .resolve(&BoundaryQuery {
                state: None,
                village: Some("x'; DROP--%_".to_string()),
            })
            .await
            .unwrap();

        let clause = client.last_where.lock().unwrap().clone().unwrap();
        assert!(!clause.contains("';"));
        assert!(clause.contains("x; DROP--"));
    }

    #[tokio::test]
    async fn zero_features_is_not_found() {
        let client = StubClient::with_features(vec![]);
        let err = resolver(client)
            .resolve(&BoundaryQuery {
                state: None,
                village: Some("Zzzzznotreal".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RegionError::NotFound(_)));
        assert!(err.to_string().contains("Zzzzznotreal"));
    }
}
