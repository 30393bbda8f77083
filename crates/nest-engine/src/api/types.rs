use serde::{Deserialize, Deserializer, Serialize};

/// One idea as delivered by the data source.
///
/// The schema is strict: every field has an explicit default applied once at
/// ingestion, so rendering code never has to guess at missing data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeaRecord {
    /// Opaque identifier. Numeric ids in JSON are stringified.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_text")]
    pub title: String,
    #[serde(deserialize_with = "de_text")]
    pub description: String,
    /// Discussion count. Negative or fractional inputs are clamped/truncated.
    #[serde(alias = "engagement_count", alias = "comments", deserialize_with = "de_count")]
    pub engagement_count: u32,
    #[serde(alias = "external_ref", alias = "url", deserialize_with = "de_text")]
    pub external_ref: String,
}

impl IdeaRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    // -- Builder pattern --

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_engagement(mut self, count: u32) -> Self {
        self.engagement_count = count;
        self
    }

    pub fn with_external_ref(mut self, external_ref: impl Into<String>) -> Self {
        self.external_ref = external_ref.into();
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<RawScalar>::deserialize(d)? {
        Some(RawScalar::Text(s)) => s,
        Some(RawScalar::Int(n)) => n.to_string(),
        Some(RawScalar::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn de_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(match Option::<RawScalar>::deserialize(d)? {
        Some(RawScalar::Int(n)) => n.clamp(0, u32::MAX as i64) as u32,
        Some(RawScalar::Float(f)) if f.is_finite() => f.max(0.0).min(u32::MAX as f64) as u32,
        Some(RawScalar::Text(s)) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

/// Selection state surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Index of the particle in the current field snapshot.
    pub index: usize,
    pub record: IdeaRecord,
}

/// Notifications produced by the driver for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// A pointer click resolved to a particle.
    Selected(Selection),
    /// A click landed on empty space, or the field was rebuilt.
    SelectionCleared,
    /// A new snapshot of `count` records was seeded.
    Seeded { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let r: IdeaRecord = serde_json::from_str(r#"{ "id": "a1" }"#).unwrap();
        assert_eq!(r.id, "a1");
        assert_eq!(r.title, "");
        assert_eq!(r.description, "");
        assert_eq!(r.engagement_count, 0);
        assert_eq!(r.external_ref, "");
    }

    #[test]
    fn numeric_id_and_aliases() {
        let json = r#"{
            "id": 42,
            "title": "Solar kites",
            "comments": 7,
            "url": "https://example.org/42",
            "extra": true
        }"#;
        let r: IdeaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, "42");
        assert_eq!(r.engagement_count, 7);
        assert_eq!(r.external_ref, "https://example.org/42");
    }

    #[test]
    fn engagement_is_sanitized() {
        let neg: IdeaRecord = serde_json::from_str(r#"{ "engagementCount": -3 }"#).unwrap();
        assert_eq!(neg.engagement_count, 0);
        let frac: IdeaRecord = serde_json::from_str(r#"{ "engagementCount": 4.7 }"#).unwrap();
        assert_eq!(frac.engagement_count, 4);
        let null: IdeaRecord = serde_json::from_str(r#"{ "engagementCount": null, "title": null }"#).unwrap();
        assert_eq!(null.engagement_count, 0);
        assert_eq!(null.title, "");
    }

    #[test]
    fn serializes_camel_case() {
        let r = IdeaRecord::new("x", "T").with_engagement(2).with_external_ref("ref");
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"engagementCount\":2"));
        assert!(json.contains("\"externalRef\":\"ref\""));
    }
}
