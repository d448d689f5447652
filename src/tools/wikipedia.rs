//! Encyclopedia lookup through the MediaWiki action API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::tool::ToolDescriptor;
use crate::tools::config::WikipediaConfig;
use crate::tools::schema::{ParamType, RequestSchema, ValidatedArguments, ValidationError};
use crate::tools::types::{Tool, ToolError};

pub const WIKIPEDIA_TOOL_NAME: &str = "wikipedia_search";

/// Tool for fetching the lead summary of a Wikipedia article.
pub struct WikipediaTool {
    descriptor: ToolDescriptor,
    client: Client,
    api_url: String,
    max_summary_chars: usize,
}

#[derive(Debug, Deserialize)]
struct WikipediaArgs {
    query: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBlock>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
    #[serde(default)]
    extract: String,
}

/// An article that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub summary: String,
}

impl WikipediaTool {
    pub fn new(config: WikipediaConfig) -> Result<Self, ToolError> {
        if config.timeout_ms == 0 {
            return Err(ToolError::Configuration(
                "wikipedia timeout must be greater than 0".to_string(),
            ));
        }
        if config.max_summary_chars == 0 {
            return Err(ToolError::Configuration(
                "wikipedia summary limit must be greater than 0".to_string(),
            ));
        }

        let schema = RequestSchema::builder()
            .required(
                "query",
                ParamType::String,
                "The Wikipedia page title or search query to find article summary",
            )
            .optional(
                "language",
                ParamType::String,
                "en",
                "Wikipedia language code (default: 'en' for English)",
            )
            .build()
            .map_err(|error| ToolError::Configuration(error.to_string()))?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| ToolError::Configuration(error.to_string()))?;

        Ok(Self {
            descriptor: ToolDescriptor::new(
                WIKIPEDIA_TOOL_NAME,
                concat!(
                    "Search Wikipedia for article summaries. ",
                    "Retrieves page title, summary, and URL for any Wikipedia topic. ",
                    "Supports multiple languages."
                ),
                schema,
            )
            .with_title("Wikipedia Search"),
            client,
            api_url: config.api_url,
            max_summary_chars: config.max_summary_chars,
        })
    }

    /// Fetches one page. `Ok(None)` means the page does not exist.
    ///
    /// `language` is trimmed and lowercased, and anything that is not a
    /// language code is rejected before the endpoint is built.
    pub fn lookup(&self, query: &str, language: &str) -> Result<Option<Article>, ToolError> {
        let language = language_code(language)?;
        let endpoint = self.api_url.replace("{lang}", &language);
        tracing::debug!(%query, %language, %endpoint, "wikipedia lookup");

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|info"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("redirects", "1"),
                ("titles", query),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Transport(format!(
                "Wikipedia API returned {status}"
            )));
        }

        let payload: QueryResponse = response.json().map_err(|error| {
            ToolError::InvalidResponse(format!("failed to parse Wikipedia response: {error}"))
        })?;

        let Some(page) = payload.query.and_then(|block| block.pages.into_iter().next()) else {
            return Ok(None);
        };
        if page.missing || page.invalid {
            return Ok(None);
        }

        let title = page.title.unwrap_or_else(|| query.to_string());
        let url = page.fullurl.ok_or_else(|| {
            ToolError::InvalidResponse(format!("page '{title}' has no canonical URL"))
        })?;
        let summary = truncate_chars(page.extract.trim(), self.max_summary_chars).to_string();

        Ok(Some(Article {
            title,
            url,
            summary,
        }))
    }
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn language_code(raw: &str) -> Result<String, ValidationError> {
    let language = raw.trim().to_ascii_lowercase();
    if is_language_code(&language) {
        Ok(language)
    } else {
        Err(ValidationError::out_of_range(
            "language",
            format!("'{raw}' is not a Wikipedia language code"),
        ))
    }
}

fn is_language_code(code: &str) -> bool {
    let mut chars = code.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    first_ok && rest_ok && (2..=12).contains(&code.len())
}

fn format_article(article: &Article) -> String {
    let result = format!(
        "Wikipedia Article: {}\nURL: {}\n\nSummary:\n{}\n",
        article.title, article.url, article.summary
    );
    result.trim().to_string()
}

impl Tool for WikipediaTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, args: ValidatedArguments) -> Result<String, ToolError> {
        let args: WikipediaArgs = args
            .deserialize()
            .map_err(|error| ValidationError::out_of_range("$", error.to_string()))?;
        let language = language_code(&args.language)?;

        match self.lookup(&args.query, &language)? {
            Some(article) => {
                tracing::info!(title = %article.title, "wikipedia article found");
                Ok(format_article(&article))
            }
            None => {
                tracing::info!(query = %args.query, %language, "wikipedia page not found");
                Ok(format!(
                    "No Wikipedia page found for '{}' in {language} language.",
                    args.query
                ))
            }
        }
    }

    fn describe_error(&self, error: &ToolError) -> String {
        match error {
            ToolError::Transport(_) | ToolError::InvalidResponse(_) => {
                format!("Error retrieving Wikipedia article: {error}")
            }
            other => other.describe(),
        }
    }
}
