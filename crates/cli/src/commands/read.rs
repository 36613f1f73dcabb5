//! `read` command: extract content from one URL or a file of URLs.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::{Value, json};

use rdr_client::{ClientConfig, ReadRequest, ReaderClient};
use rdr_core::{Settings, SettingsStore};

use crate::commands::{Globals, resolve_response_format, resolve_timeout};
use crate::output::{Outcome, OutputFormat, Renderer};

/// Arguments for the read command.
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// URL to read (required unless --file is used).
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// File containing URLs, one per line.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Response format: markdown, html, text, screenshot.
    #[arg(long, short = 'F')]
    pub format: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,

    /// Enable image captioning with a VLM.
    #[arg(long)]
    pub with_alt: bool,

    /// Bypass the API-side cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Proxy server URL.
    #[arg(long)]
    pub proxy: Option<String>,

    /// CSS selector for content extraction.
    #[arg(long)]
    pub target_selector: Option<String>,

    /// CSS selector to wait for before extraction.
    #[arg(long)]
    pub wait_for_selector: Option<String>,

    /// Cookie string to forward.
    #[arg(long)]
    pub cookie: Option<String>,

    /// Use POST (for SPAs with hash routing).
    #[arg(long)]
    pub post: bool,

    /// Write output to a file instead of stdout (markdown output only).
    #[arg(long, short = 'O')]
    pub output_file: Option<PathBuf>,
}

pub async fn run(globals: &Globals, args: ReadArgs) -> Result<Outcome> {
    if args.url.is_none() && args.file.is_none() {
        bail!("either --url or --file is required");
    }
    if args.url.is_some() && args.file.is_some() {
        bail!("--url and --file cannot be combined");
    }

    let settings = SettingsStore::default_location()?.load()?;
    let output_format = globals.output_format(&settings);
    let mut renderer = Renderer::create(output_format, args.output_file.as_deref())?;

    match read_payload(globals, &args, &settings, output_format).await {
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

async fn read_payload(
    globals: &Globals, args: &ReadArgs, settings: &Settings, output_format: OutputFormat,
) -> Result<Value> {
    let config = ClientConfig {
        read_base_url: globals
            .api_base
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| settings.read_api_url.clone()),
        search_base_url: settings.search_api_url.clone(),
        api_key: globals.api_key.clone().filter(|v| !v.is_empty()).or_else(|| settings.api_key.clone()),
        timeout: resolve_timeout(args.timeout, settings),
        ..Default::default()
    };
    let client = ReaderClient::new(config)?;

    match (&args.url, &args.file) {
        (Some(url), _) => {
            let req = request_for(url.clone(), args, settings)?;
            let resp = client.read(&req).await?;
            Ok(serde_json::to_value(&resp)?)
        }
        (None, None) => bail!("either --url or --file is required"),
        (None, Some(file)) => {
            let content = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let urls = parse_url_list(&content);
            if urls.is_empty() {
                bail!("no URLs found in {}", file.display());
            }
            read_batch(&client, urls, args, settings, output_format).await
        }
    }
}

/// Process a URL list strictly sequentially, one call at a time.
///
/// A per-URL failure becomes an error record; the batch keeps going.
async fn read_batch(
    client: &ReaderClient, urls: Vec<String>, args: &ReadArgs, settings: &Settings,
    output_format: OutputFormat,
) -> Result<Value> {
    let total = urls.len();
    let show_progress = output_format == OutputFormat::Markdown;
    if show_progress {
        eprintln!("Processing {total} URLs...");
    }

    let mut results = Vec::with_capacity(total);
    for (index, url) in urls.into_iter().enumerate() {
        if show_progress {
            eprintln!("Processing [{}/{total}]: {url}", index + 1);
        }

        let req = request_for(url.clone(), args, settings)?;
        match client.read(&req).await {
            Ok(resp) => results.push(serde_json::to_value(&resp)?),
            Err(err) => {
                tracing::debug!("batch item failed: {url}: {err}");
                results.push(json!({"url": url, "error": err.to_string()}));
            }
        }
    }

    Ok(Value::Array(results))
}

fn request_for(url: String, args: &ReadArgs, settings: &Settings) -> Result<ReadRequest> {
    Ok(ReadRequest {
        url,
        post_method: args.post,
        response_format: resolve_response_format(args.format.as_deref(), settings)?,
        headers: Default::default(),
        no_cache: args.no_cache,
        proxy_url: args.proxy.clone(),
        target_selector: args.target_selector.clone(),
        wait_for_selector: args.wait_for_selector.clone(),
        cookie: args.cookie.clone(),
        with_generated_alt: args.with_alt || settings.with_generated_alt,
    })
}

/// Parse a URL-list file: one URL per line, blanks and `#` comments skipped.
fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let content = "# sources\nhttps://a.example\n\n  https://b.example  \n# trailing comment\n";
        assert_eq!(parse_url_list(content), ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_parse_url_list_empty() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("# only comments\n\n").is_empty());
    }

    #[test]
    fn test_request_for_applies_settings_captioning_default() {
        let args = ReadArgs {
            url: Some("https://example.com".to_string()),
            file: None,
            format: None,
            timeout: None,
            with_alt: false,
            no_cache: false,
            proxy: None,
            target_selector: None,
            wait_for_selector: None,
            cookie: None,
            post: false,
            output_file: None,
        };

        let mut settings = Settings::default();
        settings.with_generated_alt = true;
        let req = request_for("https://example.com".to_string(), &args, &settings).unwrap();
        assert!(req.with_generated_alt);

        settings.with_generated_alt = false;
        let req = request_for("https://example.com".to_string(), &args, &settings).unwrap();
        assert!(!req.with_generated_alt);
    }
}
