//! Output rendering for the CLI.
//!
//! One logical payload, two presentations: a JSON success/error envelope, or
//! Markdown prose. Renderers only write and flush; translating a rendered
//! error into the process exit code is the dispatcher's job.

mod json;
mod markdown;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;

use std::path::Path;

use serde_json::Value;

/// What a command produced, after its output has been written.
///
/// `Failure` means the error is already rendered; the caller owns the
/// non-zero exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Output presentation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    /// Resolve a format name; anything unrecognized falls back to JSON.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("markdown") {
            OutputFormat::Markdown
        } else {
            OutputFormat::Json
        }
    }
}

/// The active renderer, one variant per presentation.
pub enum Renderer {
    Json(JsonRenderer),
    Markdown(MarkdownRenderer),
}

impl Renderer {
    /// Build the renderer for a format.
    ///
    /// Only the Markdown variant supports file output; JSON always goes to
    /// stdout.
    pub fn create(format: OutputFormat, output_file: Option<&Path>) -> std::io::Result<Self> {
        match format {
            OutputFormat::Json => Ok(Renderer::Json(JsonRenderer::new())),
            OutputFormat::Markdown => Ok(Renderer::Markdown(MarkdownRenderer::create(output_file)?)),
        }
    }

    /// Render a success payload.
    pub fn render(&mut self, payload: &Value) -> std::io::Result<()> {
        match self {
            Renderer::Json(json) => json.render(payload),
            Renderer::Markdown(markdown) => markdown.render(payload),
        }
    }

    /// Render an error message and flush.
    pub fn render_error(&mut self, message: &str) -> std::io::Result<()> {
        match self {
            Renderer::Json(json) => json.render_error(message),
            Renderer::Markdown(markdown) => markdown.render_error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("Markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        // Unrecognized names degrade to JSON rather than failing.
        assert_eq!(OutputFormat::from_name("yaml"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name(""), OutputFormat::Json);
    }
}
