//! Canonical keys for classified variables.
//!
//! A variable name like `palette/gray/100` becomes two keys:
//!
//! - a **tree key** (`gray.100`) used inside the category's token map
//! - a **style key** (`color-gray-100`) used as the stylesheet variable name
//!
//! The category's own leading segment is stripped first (`palette`,
//! `spacing`, `border radius`, `typography`), unless that would leave
//! nothing.

use std::collections::HashMap;

use tracing::warn;
use varsmith_graph::VariableId;

use crate::classify::Category;
use crate::error::TokenError;
use crate::options::CollisionPolicy;

/// Keys derived from a variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalKey {
    /// Remaining path segments after category stripping.
    pub segments: Vec<String>,
    pub tree_key: String,
    pub style_key: String,
}

impl CanonicalKey {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Splits a slash-delimited name into trimmed, non-empty segments.
pub fn path_segments(name: &str) -> Vec<&str> {
    name.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Replaces each whitespace run with a single `-`.
pub fn hyphenate(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Lowercased, hyphenated form used for keyword comparisons.
pub fn fold(segment: &str) -> String {
    hyphenate(segment).to_lowercase()
}

/// Lowercases and replaces whitespace runs with `-`.
///
/// ```rust
/// use varsmith_tokens::normalize::kebab;
///
/// assert_eq!(kebab("High Contrast"), "high-contrast");
/// ```
pub fn kebab(s: &str) -> String {
    fold(s.trim())
}

/// Slash-delimited name as a dotted path.
pub fn pathify(name: &str) -> String {
    path_segments(name).join(".")
}

/// Canonical spelling of a typography facet, if `segment` names one.
pub fn typography_facet(segment: &str) -> Option<&'static str> {
    match fold(segment).as_str() {
        "font-size" => Some("font-size"),
        "font-weight" => Some("font-weight"),
        "line-height" => Some("line-height"),
        "letter-spacing" => Some("letter-spacing"),
        "font-family" => Some("font-family"),
        _ => None,
    }
}

/// Number of leading segments that name the category itself.
fn category_prefix_len(category: Category, segments: &[&str]) -> usize {
    let head = segments.first().map(|s| fold(s)).unwrap_or_default();
    match category {
        Category::Palette if head == "palette" => 1,
        Category::Spacing if head == "spacing" => 1,
        Category::Radius => {
            let next = segments.get(1).map(|s| fold(s)).unwrap_or_default();
            if head == "border" && next == "radius" {
                2
            } else if head == "border-radius" || head == "radius" {
                1
            } else {
                0
            }
        }
        Category::Typography if head == "typography" || head == "font" => 1,
        _ => 0,
    }
}

/// Derives the canonical keys for `name` in `category`.
///
/// ```rust
/// use varsmith_tokens::{normalize, Category};
///
/// let key = normalize(Category::Radius, "border radius/md");
/// assert_eq!(key.tree_key, "md");
/// assert_eq!(key.style_key, "radius-md");
/// ```
pub fn normalize(category: Category, name: &str) -> CanonicalKey {
    let segments = path_segments(name);
    let mut strip = category_prefix_len(category, &segments);
    if strip >= segments.len() {
        strip = 0;
    }

    let mut kept: Vec<String> = segments[strip..].iter().map(|s| s.to_string()).collect();
    if category == Category::Typography {
        if let Some(first) = kept.first_mut() {
            if let Some(facet) = typography_facet(first) {
                *first = facet.to_string();
            }
        }
    }

    let tree_key = kept.join(".");
    let body = kept
        .iter()
        .map(|s| hyphenate(s))
        .collect::<Vec<_>>()
        .join("-");
    let style_key = match category.style_prefix() {
        Some(prefix) if !body.is_empty() => format!("{}-{}", prefix, body),
        _ => body,
    };

    CanonicalKey {
        segments: kept,
        tree_key,
        style_key,
    }
}

/// Tracks which variable produced each `(category, key)` pair.
#[derive(Debug)]
pub(crate) struct KeyLedger {
    policy: CollisionPolicy,
    claims: HashMap<(Category, String), VariableId>,
}

impl KeyLedger {
    pub(crate) fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            claims: HashMap::new(),
        }
    }

    /// Claims `key` for `variable`. A claim by a different variable is a
    /// collision: logged and allowed under last-write-wins, an error under
    /// fail.
    pub(crate) fn claim(
        &mut self,
        category: Category,
        key: &str,
        variable: &str,
    ) -> Result<(), TokenError> {
        let previous = self
            .claims
            .insert((category, key.to_string()), variable.to_string());

        match previous {
            Some(first) if first != variable => match self.policy {
                CollisionPolicy::LastWriteWins => {
                    warn!(
                        %category,
                        key,
                        first = %first,
                        second = variable,
                        "key collision, keeping the later variable"
                    );
                    Ok(())
                }
                CollisionPolicy::Fail => Err(TokenError::KeyCollision {
                    category,
                    key: key.to_string(),
                    first,
                    second: variable.to_string(),
                }),
            },
            _ => Ok(()),
        }
    }
}
