//! Test helpers that point tool configurations at a mock provider.

use httpmock::MockServer;

use crate::tools::config::{BraveSearchConfig, WikipediaConfig};

/// Path the mocked Brave endpoint is served on.
pub(crate) const SEARCH_PATH: &str = "/res/v1/web/search";

pub(crate) fn brave_config(server: &MockServer, api_key: Option<&str>) -> BraveSearchConfig {
    BraveSearchConfig {
        api_key: api_key.map(str::to_string),
        base_url: server.url(SEARCH_PATH),
        timeout_ms: 5_000,
        ..BraveSearchConfig::default()
    }
}

/// Serves each language under `/{lang}/w/api.php`.
pub(crate) fn wikipedia_config(server: &MockServer) -> WikipediaConfig {
    WikipediaConfig {
        api_url: format!("{}/{{lang}}/w/api.php", server.base_url()),
        timeout_ms: 5_000,
        ..WikipediaConfig::default()
    }
}
