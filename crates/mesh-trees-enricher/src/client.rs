//! HTTP client for the NLM MeSH RDF service.

use mesh_trees::TreeNumber;
use serde::Deserialize;
use tracing::debug;

use crate::config::EnricherConfig;
use crate::error::{EnrichError, EnrichResult};
use crate::record::ConceptRecord;
use crate::traits::MeshQueryable;

/// Blocking HTTP client for MeSH record and label lookups.
///
/// Record lookups hit `{base_url}/{code}.json`; descriptor-at-position
/// lookups go through the service's SPARQL endpoint. One client serves a
/// whole run and applies the configured timeout to every request.
pub struct MeshRdfClient {
    http: reqwest::blocking::Client,
    base_url: String,
    sparql_url: String,
}

impl MeshRdfClient {
    /// Creates a client from the enricher configuration.
    pub fn new(config: &EnricherConfig) -> EnrichResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EnrichError::ClientInit(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sparql_url: config.sparql_url.clone(),
        })
    }

    /// The record endpoint URL for a bare code.
    fn record_url(&self, code: &str) -> String {
        format!("{}/{}.json", self.base_url, code)
    }
}

impl MeshQueryable for MeshRdfClient {
    fn fetch_record(&self, code: &str) -> EnrichResult<ConceptRecord> {
        let url = self.record_url(code);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| classify_transport(code, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EnrichError::NotFound(code.to_string()));
        }
        if !status.is_success() {
            return Err(EnrichError::ApiStatus {
                status: status.as_u16(),
                id: code.to_string(),
            });
        }

        let data: serde_json::Value =
            response.json().map_err(|e| EnrichError::MalformedRecord {
                id: code.to_string(),
                message: e.to_string(),
            })?;

        ConceptRecord::from_json(code, &data)
    }

    fn descriptor_label_at(&self, tree: &TreeNumber) -> EnrichResult<Option<String>> {
        let query = descriptor_label_query(tree.as_str());
        debug!("SPARQL label lookup for {}", tree);

        let label_query_error = |message: String| EnrichError::LabelQuery {
            tree: tree.as_str().to_string(),
            message,
        };

        let response = self
            .http
            .get(&self.sparql_url)
            .query(&[
                ("query", query.as_str()),
                ("format", "JSON"),
                ("limit", "1"),
                ("inference", "true"),
            ])
            .send()
            .map_err(|e| label_query_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(label_query_error(format!("status {}", status.as_u16())));
        }

        let decoded: SparqlResponse = response
            .json()
            .map_err(|e| label_query_error(e.to_string()))?;

        Ok(decoded
            .results
            .bindings
            .into_iter()
            .next()
            .and_then(|binding| binding.label)
            .map(|label| label.value))
    }
}

fn classify_transport(code: &str, err: reqwest::Error) -> EnrichError {
    if err.is_timeout() {
        EnrichError::Timeout(code.to_string())
    } else {
        EnrichError::Network {
            id: code.to_string(),
            message: err.to_string(),
        }
    }
}

/// SPARQL query finding the descriptor at an exact tree position.
fn descriptor_label_query(tree: &str) -> String {
    format!(
        r#"PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX meshv: <http://id.nlm.nih.gov/mesh/vocab#>
PREFIX mesh: <http://id.nlm.nih.gov/mesh/>

SELECT ?label
FROM <http://id.nlm.nih.gov/mesh>

WHERE {{
  ?descriptor meshv:treeNumber mesh:{tree} .
  ?descriptor rdfs:label ?label
}}"#
    )
}

// ============================================================================
// SPARQL JSON results
// ============================================================================

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Deserialize)]
struct SparqlBinding {
    label: Option<SparqlValue>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}
