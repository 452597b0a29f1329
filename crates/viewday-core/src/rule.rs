//! Mapping rules: which frontmatter property, folder scope, and color feed
//! the calendar surface.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// A named mapping rule supplied by the remote surface.
///
/// Rules arrive over the wire with historical aliases for the folder scope
/// (`folderScope`, `folder`, `path`). The aliases are collapsed into
/// [`Rule::folder_scope`] during deserialization and never re-resolved per
/// scan; serialization emits the canonical `folderScope` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Opaque stable identifier, unique within the rule set.
    pub id: String,
    /// Display label, no uniqueness constraint.
    pub name: String,
    /// Frontmatter key holding the date value.
    pub property: String,
    /// Optional path prefix restricting the rule to a subtree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_scope: Option<String>,
    /// Opaque style token, passed through unmodified.
    pub color: String,
    /// Inactive rules are excluded from scans but may still be supplied to
    /// unscheduled detection.
    pub active: bool,
}

impl Rule {
    /// Whether a document path falls inside this rule's folder scope.
    /// A rule without a scope covers the whole store.
    pub fn matches_path(&self, path: &str) -> bool {
        match &self.folder_scope {
            Some(scope) => path.starts_with(scope.as_str()),
            None => true,
        }
    }
}

/// Raw wire shape carrying every historical scope alias.
#[derive(Deserialize)]
struct RuleWire {
    id: String,
    #[serde(default)]
    name: String,
    property: String,
    #[serde(default)]
    folder_scope: Option<String>,
    #[serde(default, rename = "folderScope")]
    folder_scope_camel: Option<String>,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    color: String,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = RuleWire::deserialize(deserializer)?;
        let folder_scope = normalize_scope([
            wire.folder_scope_camel,
            wire.folder_scope,
            wire.folder,
            wire.path,
        ]);
        Ok(Self {
            id: wire.id,
            name: wire.name,
            property: wire.property,
            folder_scope,
            color: wire.color,
            active: wire.active,
        })
    }
}

/// Pick the first non-empty alias, most specific first. Trailing slashes
/// are dropped so scope comparison works on bare prefixes.
fn normalize_scope<const N: usize>(aliases: [Option<String>; N]) -> Option<String> {
    aliases
        .into_iter()
        .flatten()
        .map(|scope| scope.trim().trim_end_matches('/').to_string())
        .find(|scope| !scope.is_empty())
}
