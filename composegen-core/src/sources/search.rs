//! Example-search connector
//!
//! Finds real Compose snippets in the android/compose-samples repository to
//! use as reference context for generation. Strictly best-effort: any
//! failure (network, auth, rate limit, decode) yields an empty list.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// One reference snippet found by the search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetExample {
    pub code: String,
    pub description: String,
    pub path: String,
    pub source_url: String,
}

/// Words too common to be useful as search keywords
const STOP_WORDS: &[&str] = &["a", "an", "the", "with", "and", "or", "for", "to", "of", "in"];

/// Connector for the code-hosting search API
pub struct ExampleSearch {
    client: reqwest::Client,
    access_token: Option<String>,
    repo: String,
}

impl ExampleSearch {
    const API_URL: &'static str = "https://api.github.com/search/code";

    pub fn new(access_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("composegen")
            .build()
            .unwrap_or_default();
        Self { client, access_token, repo: "android/compose-samples".to_string() }
    }

    /// Search for Compose examples matching the query.
    ///
    /// Returns at most `max_results` snippets; an empty list on any
    /// failure. Never errors.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SnippetExample> {
        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            return Vec::new();
        }

        let q = format!("{} repo:{} language:kotlin", keywords.join(" "), self.repo);
        let mut request = self
            .client
            .get(Self::API_URL)
            .query(&[("q", q.as_str()), ("per_page", "30")])
            .header("Accept", "application/vnd.github.text-match+json");
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let data: Value = match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json().await {
                    Ok(data) => data,
                    Err(error) => {
                        warn!(%error, "search response decode failed");
                        return Vec::new();
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "search request rejected");
                return Vec::new();
            }
            Err(error) => {
                warn!(%error, "search request failed");
                return Vec::new();
            }
        };

        let mut examples = Vec::new();
        for item in data["items"].as_array().map(Vec::as_slice).unwrap_or(&[]) {
            if examples.len() >= max_results {
                break;
            }
            let path = item["path"].as_str().unwrap_or_default();
            if !path.ends_with(".kt") {
                continue;
            }

            let fragment = item["text_matches"]
                .as_array()
                .and_then(|matches| {
                    matches
                        .iter()
                        .filter_map(|m| m["fragment"].as_str())
                        .find(|f| f.contains("@Composable"))
                })
                .unwrap_or_default();
            if fragment.is_empty() {
                continue;
            }

            examples.push(SnippetExample {
                code: fragment.to_string(),
                description: describe(fragment, path),
                path: path.to_string(),
                source_url: item["html_url"].as_str().unwrap_or_default().to_string(),
            });
        }

        debug!(query, found = examples.len(), "example search complete");
        examples
    }
}

/// Lowercase the query and strip stop words and short tokens
fn extract_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word) && word.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Describe a snippet by its composable function names, falling back to
/// the file name
fn describe(code: &str, path: &str) -> String {
    let pattern = Regex::new(r"@Composable\s+fun\s+(\w+)").expect("valid pattern");
    let names: Vec<&str> = pattern
        .captures_iter(code)
        .take(3)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect();
    if names.is_empty() {
        let file = path.rsplit('/').next().unwrap_or(path);
        format!("Compose example from {}", file)
    } else {
        format!("Compose UI: {}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_extraction_strips_noise() {
        let keywords = extract_keywords("Create a login screen with the fields");
        assert_eq!(keywords, vec!["create", "login", "screen", "fields"]);
    }

    #[test]
    fn test_describe_prefers_composable_names() {
        let code = "@Composable\nfun LoginScreen() {}\n@Composable\nfun LoginButton() {}";
        assert_eq!(describe(code, "ui/Login.kt"), "Compose UI: LoginScreen, LoginButton");
    }

    #[test]
    fn test_describe_falls_back_to_file_name() {
        assert_eq!(describe("val x = 1", "app/src/Theme.kt"), "Compose example from Theme.kt");
    }

    #[tokio::test]
    async fn test_search_with_only_stop_words_short_circuits() {
        let search = ExampleSearch::new(None);
        assert!(search.search("a an the", 3).await.is_empty());
    }
}
