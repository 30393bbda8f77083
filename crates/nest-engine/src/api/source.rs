//! Data source contract and the in-memory sources the engine ships.
//!
//! Remote fetching belongs to the host: a browser page fetches the JSON and
//! hands it over, so the engine only sees a finished payload.

use serde::Deserialize;

use crate::api::error::DataSourceError;
use crate::api::types::IdeaRecord;

/// Anything that can deliver a snapshot of idea records.
pub trait DataSource {
    fn fetch_records(&mut self) -> Result<Vec<IdeaRecord>, DataSourceError>;
}

/// A fixed, in-memory list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<IdeaRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<IdeaRecord>) -> Self {
        Self { records }
    }
}

impl DataSource for StaticSource {
    fn fetch_records(&mut self) -> Result<Vec<IdeaRecord>, DataSourceError> {
        Ok(self.records.clone())
    }
}

/// Records parsed from a JSON payload: either a bare array or an
/// `{ "ideas": [...] }` envelope.
#[derive(Debug, Clone)]
pub struct JsonSource {
    payload: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<IdeaRecord>),
    Envelope {
        #[serde(alias = "records", alias = "data")]
        ideas: Vec<IdeaRecord>,
    },
}

impl JsonSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self { payload: payload.into() }
    }

    /// Parse a payload directly.
    pub fn parse(json: &str) -> Result<Vec<IdeaRecord>, DataSourceError> {
        let records = match serde_json::from_str::<Payload>(json) {
            Ok(Payload::Bare(records)) | Ok(Payload::Envelope { ideas: records }) => records,
            // Re-parse as a bare array to surface a useful serde message.
            Err(_) => serde_json::from_str::<Vec<IdeaRecord>>(json)?,
        };
        Ok(records)
    }
}

impl DataSource for JsonSource {
    fn fetch_records(&mut self) -> Result<Vec<IdeaRecord>, DataSourceError> {
        Self::parse(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let mut source = JsonSource::new(r#"[{ "id": 1, "title": "a" }, { "id": 2, "title": "b" }]"#);
        let records = source.fetch_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "2");
    }

    #[test]
    fn parses_envelope() {
        let records = JsonSource::parse(r#"{ "ideas": [{ "id": "x", "comments": 3 }] }"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].engagement_count, 3);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = JsonSource::parse("{ not json").unwrap_err();
        assert!(matches!(err, DataSourceError::Malformed(_)));
    }

    #[test]
    fn static_source_returns_copies() {
        let mut source = StaticSource::new(vec![IdeaRecord::new("1", "one")]);
        assert_eq!(source.fetch_records().unwrap().len(), 1);
        assert_eq!(source.fetch_records().unwrap().len(), 1);
    }
}
