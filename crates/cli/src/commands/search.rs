//! `search` command: query the web and render LLM-friendly results.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::{Value, json};

use rdr_client::{ClientConfig, ReaderClient, SearchRequest};
use rdr_core::{Settings, SettingsStore};

use crate::commands::{Globals, resolve_response_format, resolve_timeout};
use crate::output::{Outcome, Renderer};

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query.
    #[arg(long, short = 'q')]
    pub query: String,

    /// Restrict results to a domain (repeatable).
    #[arg(long, short = 's')]
    pub site: Vec<String>,

    /// Response format: markdown, html, text.
    #[arg(long, short = 'F')]
    pub format: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,

    /// Maximum results to return (default 5).
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Write output to a file instead of stdout (markdown output only).
    #[arg(long, short = 'O')]
    pub output_file: Option<PathBuf>,
}

pub async fn run(globals: &Globals, args: SearchArgs) -> Result<Outcome> {
    let settings = SettingsStore::default_location()?.load()?;
    let output_format = globals.output_format(&settings);
    let mut renderer = Renderer::create(output_format, args.output_file.as_deref())?;

    match search_payload(globals, &args, &settings).await {
        Ok(payload) => {
            renderer.render(&payload)?;
            Ok(Outcome::Success)
        }
        Err(err) => {
            renderer.render_error(&err.to_string())?;
            Ok(Outcome::Failure)
        }
    }
}

async fn search_payload(globals: &Globals, args: &SearchArgs, settings: &Settings) -> Result<Value> {
    let config = ClientConfig {
        read_base_url: settings.read_api_url.clone(),
        // --api-base retargets the search endpoint for this command.
        search_base_url: globals
            .api_base
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| settings.search_api_url.clone()),
        api_key: globals.api_key.clone().filter(|v| !v.is_empty()).or_else(|| settings.api_key.clone()),
        timeout: resolve_timeout(args.timeout, settings),
        ..Default::default()
    };
    let client = ReaderClient::new(config)?;

    let req = SearchRequest {
        query: args.query.clone(),
        sites: args.site.clone(),
        response_format: resolve_response_format(args.format.as_deref(), settings)?,
        headers: Default::default(),
        limit: args.limit,
    };

    let resp = client.search(&req).await?;

    // The wire response is normalized in full; the caller's limit is applied
    // here, preserving order.
    let limit = req.effective_limit();
    let results: Vec<_> = resp.results.into_iter().take(limit).collect();

    Ok(json!({
        "query": resp.query,
        "results": serde_json::to_value(&results)?,
        "count": results.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdr_client::SearchResult;

    #[test]
    fn test_payload_shape() {
        let results = vec![
            SearchResult { title: Some("T".into()), url: Some("https://t.example".into()), content: "c".into() },
            SearchResult { title: None, url: None, content: "line".into() },
        ];
        let payload = json!({
            "query": "q",
            "results": serde_json::to_value(&results).unwrap(),
            "count": results.len(),
        });

        assert_eq!(payload["count"], 2);
        assert_eq!(payload["results"][0]["title"], "T");
        // Absent fields are omitted, not null.
        assert!(payload["results"][1].get("title").is_none());
        assert_eq!(payload["results"][1]["content"], "line");
    }
}
