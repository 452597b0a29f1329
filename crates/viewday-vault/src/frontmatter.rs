//! Frontmatter block parsing and rendering.

use serde_json::Value;
use std::collections::BTreeMap;
use viewday_core::Metadata;

/// A note split into its metadata block and body.
#[derive(Debug)]
pub struct ParsedNote<'a> {
    /// `None` when the note has no valid frontmatter block; the body is
    /// then the whole note.
    pub metadata: Option<Metadata>,
    pub body: &'a str,
}

/// Split a note into frontmatter and body.
///
/// The block must open with `---` on the first line (an optional BOM is
/// tolerated) and close with `---` or `...`. YAML is parsed through
/// serde_yaml and converted to JSON values for uniform downstream
/// handling; a block that is not a mapping is treated as absent so a
/// malformed note is skipped rather than destroyed on the next mutation.
pub fn parse(input: &str) -> ParsedNote<'_> {
    let whole = ParsedNote {
        metadata: None,
        body: input,
    };

    let content = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return whole;
    };
    if first.trim_end() != "---" {
        return whole;
    }

    let mut yaml_len = 0;
    let mut consumed = first.len();
    let mut closed = false;
    for line in lines {
        consumed += line.len();
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            closed = true;
            break;
        }
        yaml_len += line.len();
    }
    if !closed {
        return whole;
    }

    let raw_yaml = &content[first.len()..first.len() + yaml_len];
    let body = &content[consumed..];
    if raw_yaml.trim().is_empty() {
        return ParsedNote {
            metadata: Some(Metadata::new()),
            body,
        };
    }
    match yaml_to_metadata(raw_yaml) {
        Some(metadata) => ParsedNote {
            metadata: Some(metadata),
            body,
        },
        None => whole,
    }
}

fn yaml_to_metadata(raw: &str) -> Option<Metadata> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(raw).ok()?;
    let json: Value = serde_json::to_value(yaml).ok()?;
    match json {
        Value::Object(map) => Some(map.into_iter().collect()),
        _ => None,
    }
}

/// Render a note back from metadata and body. Keys are written sorted so
/// repeated rewrites are stable; an empty mapping drops the block
/// entirely.
pub fn render(metadata: &Metadata, body: &str) -> Result<String, serde_yaml::Error> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }
    let ordered: BTreeMap<&String, &Value> = metadata.iter().collect();
    let yaml = serde_yaml::to_string(&ordered)?;
    Ok(format!("---\n{yaml}---\n{body}"))
}
