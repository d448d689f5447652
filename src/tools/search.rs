//! Web search through the Brave Search API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::Deserialize;

use crate::core::tool::ToolDescriptor;
use crate::tools::config::{BraveSearchConfig, BRAVE_API_KEY_ENV};
use crate::tools::schema::{ParamType, RequestSchema, ValidatedArguments, ValidationError};
use crate::tools::types::{Tool, ToolError};

pub const BRAVE_SEARCH_TOOL_NAME: &str = "brave_search";
const DEFAULT_COUNT: i64 = 10;

/// Tool for searching the web with Brave Search.
pub struct BraveSearchTool {
    descriptor: ToolDescriptor,
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct BraveSearchArgs {
    query: String,
    count: i64,
}

#[derive(Debug, Default, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWebBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct BraveWebBlock {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl BraveSearchTool {
    pub fn new(config: BraveSearchConfig) -> Result<Self, ToolError> {
        let api_key = config
            .api_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        if api_key.is_none() {
            tracing::warn!("{BRAVE_API_KEY_ENV} not set; brave_search will report a configuration error");
        }

        if config.timeout_ms == 0 {
            return Err(ToolError::Configuration(
                "brave search timeout must be greater than 0".to_string(),
            ));
        }

        let schema = RequestSchema::builder()
            .required(
                "query",
                ParamType::String,
                "The search query to find information about",
            )
            .optional(
                "count",
                ParamType::Integer,
                DEFAULT_COUNT,
                &format!(
                    "Number of search results to return (default: {DEFAULT_COUNT}, max: {})",
                    config.max_results
                ),
            )
            .build()
            .map_err(|error| ToolError::Configuration(error.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| ToolError::Configuration(error.to_string()))?;

        Ok(Self {
            descriptor: ToolDescriptor::new(
                BRAVE_SEARCH_TOOL_NAME,
                concat!(
                    "Search the web using Brave Search API to find current information, ",
                    "news, and articles on any topic. Returns search results with titles, ",
                    "descriptions, and URLs."
                ),
                schema,
            )
            .with_title("Brave Search"),
            client,
            base_url: config.base_url,
            api_key,
            max_results: config.max_results.max(1),
        })
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap, ToolError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(api_key).map_err(|_| {
            ToolError::Configuration(format!("{BRAVE_API_KEY_ENV} contains invalid characters"))
        })?;
        token.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-subscription-token"), token);
        Ok(headers)
    }
}

/// Clamps a requested result count to the provider maximum.
pub fn effective_count(requested: u32, max: u32) -> u32 {
    requested.min(max)
}

impl Tool for BraveSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn run(&self, args: ValidatedArguments) -> Result<String, ToolError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ToolError::Configuration(format!(
                "{BRAVE_API_KEY_ENV} environment variable not set. Please set your Brave API key."
            )));
        };

        let args: BraveSearchArgs = args
            .deserialize()
            .map_err(|error| ValidationError::out_of_range("$", error.to_string()))?;
        if args.count < 1 {
            return Err(ValidationError::out_of_range("count", "must be at least 1").into());
        }
        let requested = u32::try_from(args.count).unwrap_or(u32::MAX);
        let count = effective_count(requested, self.max_results);

        tracing::debug!(query = %args.query, requested, count, "brave search request");
        let count_param = count.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .headers(self.headers(api_key)?)
            .query(&[("q", args.query.as_str()), ("count", count_param.as_str())])
            .send()?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ToolError::Transport(format!(
                "Brave Search authentication failed ({status}). Check {BRAVE_API_KEY_ENV}"
            )));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ToolError::Transport(format!(
                "Brave Search API returned {status}: {}",
                body.trim()
            )));
        }

        let payload: BraveResponse = response.json().map_err(|error| {
            ToolError::InvalidResponse(format!("failed to parse Brave Search response: {error}"))
        })?;
        let results = payload.web.unwrap_or_default().results;

        tracing::info!(query = %args.query, hits = results.len(), "brave search complete");
        Ok(format_results(&args.query, &results))
    }
}

fn format_results(query: &str, results: &[BraveResult]) -> String {
    if results.is_empty() {
        return format!("No search results found for query: '{query}'");
    }

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());
    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            format!(
                "[Result {}]\nTitle: {}\nURL: {}\nDescription: {}\n",
                idx + 1,
                field(&result.title),
                field(&result.url),
                field(&result.description),
            )
        })
        .collect();

    format!(
        "Found {} result(s) for '{query}':\n\n{}",
        results.len(),
        blocks.join("\n")
    )
}
