use crate::app::{App, Focus};
use crate::model::{Download, Recommendation};
use crate::sort::SortConfig;
use serde::{Deserialize, Serialize};

/// Serializable snapshot of the search view, used by `screenshot`,
/// `execute` and the rendering tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    pub focus: Focus,
    pub query: String,
    pub results: Vec<Recommendation>,
    pub sort: SortConfig,
    pub expanded_index: Option<usize>,
    pub selected_index: usize,
    pub loading: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub search_generation: u64,
    pub status_message: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            focus: Focus::Results,
            query: "java developer".to_string(),
            results: vec![
                Recommendation {
                    description: Some(
                        "Multi-choice test that measures knowledge of Java programming."
                            .to_string(),
                    ),
                    test_types: Some("Knowledge & Skills".to_string()),
                    remote_testing: Some("Yes".to_string()),
                    duration: Some("30 minutes".to_string()),
                    job_levels: Some("Mid-Professional".to_string()),
                    adaptive_irt: Some("No".to_string()),
                    languages: Some("English (USA)".to_string()),
                    url: Some("https://example.com/products/java-8".to_string()),
                    downloads: Some(vec![Download {
                        title: "Product Fact Sheet".to_string(),
                        url: "https://example.com/downloads/java-8.pdf".to_string(),
                        language: "English".to_string(),
                    }]),
                    ..Recommendation::new("Java 8 (New)")
                },
                Recommendation {
                    test_types: Some("Ability & Aptitude".to_string()),
                    remote_testing: Some("No".to_string()),
                    ..Recommendation::new("Verify - Numerical Ability")
                },
                Recommendation {
                    test_types: Some("Personality & Behavior".to_string()),
                    remote_testing: Some("Yes".to_string()),
                    url: Some("https://example.com/products/opq".to_string()),
                    ..Recommendation::new("Occupational Personality Questionnaire")
                },
            ],
            sort: SortConfig::default(),
            expanded_index: None,
            selected_index: 0,
            loading: false,
            error: None,
            search_generation: 1,
            status_message: "Found 3 results".to_string(),
        }
    }
}

impl TestConfig {
    pub fn load_from_file(path: &str) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TestConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn from_app(app: &App) -> Self {
        TestConfig {
            focus: app.focus,
            query: app.query.clone(),
            results: app.results.clone(),
            sort: app.sort,
            expanded_index: app.expanded,
            selected_index: app.selected,
            loading: app.loading,
            error: app.error.clone(),
            search_generation: app.search_generation,
            status_message: app.status_message.clone(),
        }
    }
}
