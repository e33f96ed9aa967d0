use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub title: String,
    pub url: String,
    pub language: String,
}

/// One candidate returned by the recommendation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub test_types: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_testing: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_levels: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub adaptive_irt: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub languages: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_downloads",
        skip_serializing_if = "Option::is_none"
    )]
    pub downloads: Option<Vec<Download>>,
}

impl Recommendation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Empty strings count as absent, the same way they render.
    pub fn description_or_placeholder(&self) -> &str {
        non_empty(&self.description).unwrap_or(NO_DESCRIPTION)
    }

    pub fn test_types_or_placeholder(&self) -> &str {
        non_empty(&self.test_types).unwrap_or(NOT_AVAILABLE)
    }

    pub fn remote_testing_or_placeholder(&self) -> &str {
        non_empty(&self.remote_testing).unwrap_or(NOT_AVAILABLE)
    }

    pub fn duration_or_placeholder(&self) -> &str {
        non_empty(&self.duration).unwrap_or(NOT_AVAILABLE)
    }

    pub fn job_levels_or_placeholder(&self) -> &str {
        non_empty(&self.job_levels).unwrap_or(NOT_AVAILABLE)
    }

    pub fn adaptive_irt_or_placeholder(&self) -> &str {
        non_empty(&self.adaptive_irt).unwrap_or(NOT_AVAILABLE)
    }

    pub fn languages_or_placeholder(&self) -> &str {
        non_empty(&self.languages).unwrap_or(NOT_AVAILABLE)
    }

    pub fn is_remote(&self) -> bool {
        self.remote_testing.as_deref() == Some("Yes")
    }

    /// Target of the "visit" action, if the item has one.
    pub fn visit_url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Downloads worth showing; `None` hides the section entirely.
    pub fn visible_downloads(&self) -> Option<&[Download]> {
        self.downloads
            .as_deref()
            .filter(|downloads| !downloads.is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Items are relayed untouched from the service, so scalar fields may arrive
/// as numbers or booleans. Those render as their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Malformed download entries are dropped one by one.
fn lenient_downloads<'de, D>(deserializer: D) -> Result<Option<Vec<Download>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let rec: Recommendation = serde_json::from_str(r#"{"name": "Java Test"}"#).unwrap();
        assert_eq!(rec.name, "Java Test");
        assert_eq!(rec.description_or_placeholder(), NO_DESCRIPTION);
        assert_eq!(rec.duration_or_placeholder(), NOT_AVAILABLE);
        assert!(rec.visible_downloads().is_none());
        assert!(rec.visit_url().is_none());
    }

    #[test]
    fn test_deserialize_nulls_and_downloads() {
        let rec: Recommendation = serde_json::from_str(
            r#"{
                "name": "Verify",
                "description": null,
                "remote_testing": "Yes",
                "url": "https://example.com/verify",
                "downloads": [{"title": "Fact Sheet", "url": "https://example.com/f.pdf", "language": "English"}]
            }"#,
        )
        .unwrap();

        assert!(rec.description.is_none());
        assert!(rec.is_remote());
        assert_eq!(rec.visit_url(), Some("https://example.com/verify"));
        assert_eq!(rec.visible_downloads().map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_deserialize_loose_field_types() {
        let rec: Recommendation = serde_json::from_str(
            r#"{
                "duration": 30,
                "adaptive_irt": false,
                "downloads": [{"title": "Fact Sheet"}, {"title": "Guide", "url": "https://example.com/g.pdf", "language": "English"}]
            }"#,
        )
        .unwrap();

        assert_eq!(rec.name, "");
        assert_eq!(rec.duration_or_placeholder(), "30");
        assert_eq!(rec.adaptive_irt_or_placeholder(), "false");
        assert_eq!(rec.visible_downloads().map(|d| d[0].title.as_str()), Some("Guide"));
    }

    #[test]
    fn test_null_name_is_empty() {
        let rec: Recommendation = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(rec.name, "");
    }

    #[test]
    fn test_empty_downloads_hidden() {
        let mut rec = Recommendation::new("Empty");
        rec.downloads = Some(Vec::new());
        assert!(rec.visible_downloads().is_none());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let json = serde_json::to_string(&Recommendation::new("Only Name")).unwrap();
        assert_eq!(json, r#"{"name":"Only Name"}"#);
    }
}
