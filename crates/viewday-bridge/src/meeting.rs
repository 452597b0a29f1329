//! Meeting-note creation from remote calendar events.

use serde::Deserialize;
use serde_json::{json, Value};
use viewday_core::{Metadata, LINKS_FIELD};

/// Structured fields of a `create-meeting-note` request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFields {
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// External event id; the generated note is linked back to it.
    #[serde(default)]
    pub event_id: Option<String>,
}

impl MeetingFields {
    /// File name for the generated note: the event date (when known)
    /// followed by the sanitized title.
    pub fn file_name(&self) -> String {
        let title = sanitize_file_name(&self.title);
        match self.start.as_deref().map(date_part) {
            Some(date) if !date.is_empty() => format!("{date} {title}.md"),
            _ => format!("{title}.md"),
        }
    }

    /// Frontmatter block for the generated note.
    pub fn frontmatter(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("meeting".to_string(), Value::Bool(true));
        if let Some(start) = &self.start {
            metadata.insert("start_date".to_string(), json!(start));
        }
        if let Some(end) = &self.end {
            metadata.insert("end_date".to_string(), json!(end));
        }
        if !self.attendees.is_empty() {
            metadata.insert("attendees".to_string(), json!(self.attendees));
        }
        if let Some(event_id) = &self.event_id {
            metadata.insert(LINKS_FIELD.to_string(), json!([event_id]));
        }
        metadata
    }

    /// Markdown body for the generated note.
    pub fn body(&self) -> String {
        let mut body = String::new();
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            body.push_str(description.trim());
            body.push_str("\n\n");
        }
        if let Some(url) = &self.meeting_url {
            body.push_str(&format!("[Join meeting]({url})\n\n"));
        }
        body.push_str("## Notes\n");
        body
    }
}

/// Strip characters the host file system rejects in note names.
pub fn sanitize_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '^' | '[' | ']' => ' ',
            other => other,
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn date_part(start: &str) -> &str {
    start.split('T').next().unwrap_or("")
}
