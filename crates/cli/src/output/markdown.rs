//! Markdown prose rendering.
//!
//! Dispatches on the payload shape: a single record becomes a titled
//! document, a record list becomes numbered sections, anything else is
//! stringified. The sink is stdout or a caller-named file; the file handle
//! lives inside the renderer so it is closed on every exit path.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};

/// Per-record content cutoff in list renderings.
const LIST_CONTENT_LIMIT: usize = 200;

/// Markdown renderer.
pub struct MarkdownRenderer {
    out: Box<dyn Write>,
}

impl MarkdownRenderer {
    /// Render to a created/truncated file, or stdout when no path is given.
    pub fn create(output_file: Option<&Path>) -> io::Result<Self> {
        let out: Box<dyn Write> = match output_file {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        Ok(Self { out })
    }

    /// Render a success payload.
    pub fn render(&mut self, payload: &Value) -> io::Result<()> {
        write_payload(&mut self.out, payload)?;
        self.out.flush()
    }

    /// Render an error line and flush.
    pub fn render_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "**Error**: {message}")?;
        self.out.flush()
    }
}

fn write_payload(w: &mut dyn Write, payload: &Value) -> io::Result<()> {
    match payload {
        Value::Object(record) => write_record(w, record),
        Value::Array(records) => write_list(w, records),
        other => writeln!(w, "{}", display_value(other)),
    }
}

fn write_record(w: &mut dyn Write, record: &Map<String, Value>) -> io::Result<()> {
    if let Some(title) = record.get("title").and_then(Value::as_str) {
        writeln!(w, "# {title}")?;
        writeln!(w)?;
    }
    if let Some(url) = record.get("url").and_then(Value::as_str) {
        writeln!(w, "**Source**: <{url}>")?;
        writeln!(w)?;
    }
    if let Some(content) = record.get("content").and_then(Value::as_str) {
        writeln!(w, "{content}")?;
    } else {
        for (key, value) in record {
            writeln!(w, "**{key}**: {}", display_value(value))?;
        }
    }
    Ok(())
}

fn write_list(w: &mut dyn Write, records: &[Value]) -> io::Result<()> {
    for (index, item) in records.iter().enumerate() {
        // Title-less records keep their position but produce no block.
        let Some(record) = item.as_object() else { continue };
        let Some(title) = record.get("title").and_then(Value::as_str) else { continue };

        writeln!(w, "## {}. {title}", index + 1)?;
        if let Some(url) = record.get("url").and_then(Value::as_str) {
            writeln!(w, "**URL**: <{url}>")?;
        }
        if let Some(content) = record.get("content").and_then(Value::as_str) {
            writeln!(w, "{}", truncate(content, LIST_CONTENT_LIMIT))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Cut content to `limit` characters with a trailing ellipsis marker.
fn truncate(content: &str, limit: usize) -> String {
    if content.chars().count() > limit {
        let cut: String = content.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

/// Strings render bare; everything else as its JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
