//! JSON envelope rendering.
//!
//! Every payload is wrapped in `{"success": true, "data": ...}`; errors in
//! `{"success": false, "error": "..."}`. serde_json leaves `<`, `>`, and `&`
//! alone inside strings, which downstream LLM tooling relies on.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

/// Success wrapper. `data` is omitted when the payload is absent.
#[derive(Debug, Serialize)]
struct SuccessEnvelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

/// Failure wrapper.
#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a str>,
}

/// JSON renderer; always writes to stdout.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a success envelope.
    pub fn render(&mut self, payload: &Value) -> std::io::Result<()> {
        let data = (!payload.is_null()).then_some(payload);
        self.write(&SuccessEnvelope { success: true, data })
    }

    /// Render a failure envelope.
    pub fn render_error(&mut self, message: &str) -> std::io::Result<()> {
        self.render_error_with_code(message, None)
    }

    /// Render a failure envelope with an optional machine-readable code.
    pub fn render_error_with_code(&mut self, message: &str, code: Option<&str>) -> std::io::Result<()> {
        self.write(&ErrorEnvelope { success: false, error: message, code })
    }

    fn write<T: Serialize>(&mut self, envelope: &T) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, envelope).map_err(std::io::Error::other)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let payload = json!({"url": "https://example.com"});
        let envelope = SuccessEnvelope { success: true, data: Some(&payload) };
        let rendered = serde_json::to_string_pretty(&envelope).unwrap();
        assert!(rendered.contains("\"success\": true"));
        assert!(rendered.contains("\"data\""));
        assert!(rendered.contains("https://example.com"));
    }

    #[test]
    fn test_success_envelope_omits_absent_data() {
        let envelope = SuccessEnvelope { success: true, data: None };
        let rendered = serde_json::to_string(&envelope).unwrap();
        assert_eq!(rendered, r#"{"success":true}"#);
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope { success: false, error: "HTTP error 404: gone", code: None };
        let rendered = serde_json::to_string_pretty(&envelope).unwrap();
        assert!(rendered.contains("\"success\": false"));
        assert!(rendered.contains("404"));
        assert!(!rendered.contains("\"code\""));
    }

    #[test]
    fn test_no_html_escaping_in_strings() {
        let payload = json!({"content": "<p>a & b</p>"});
        let envelope = SuccessEnvelope { success: true, data: Some(&payload) };
        let rendered = serde_json::to_string(&envelope).unwrap();
        assert!(rendered.contains("<p>a & b</p>"));
    }
}
