//! JSDoc comment lookup and tag parsing.
//!
//! Comments are found by position: the doc comment of a node is the `/** */`
//! block that ends right before the node starts (only whitespace between).

use blend_carton::CompactString;
use memchr::memmem;
use serde::Serialize;

/// A parsed `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsDoc {
    /// Free text before the first tag.
    pub description: String,
    /// Tags in source order.
    pub tags: Vec<JsDocTag>,
}

/// One `@name body` tag. Multi-line bodies keep their line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsDocTag {
    pub name: CompactString,
    pub body: String,
}

impl JsDoc {
    /// Parse the raw comment text, including the `/**` and `*/` delimiters.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let inner = trimmed.strip_prefix("/**").unwrap_or(trimmed);
        let inner = inner.strip_suffix("*/").unwrap_or(inner);

        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<(CompactString, Vec<&str>)> = Vec::new();

        for line in inner.lines() {
            let line = strip_comment_gutter(line);
            if let Some(tag) = line.trim_start().strip_prefix('@') {
                let (name, rest) = match tag.find(char::is_whitespace) {
                    Some(pos) => (&tag[..pos], tag[pos..].trim_start()),
                    None => (tag, ""),
                };
                tags.push((CompactString::from(name), vec![rest]));
            } else if let Some((_, body)) = tags.last_mut() {
                body.push(line);
            } else {
                description.push(line);
            }
        }

        Self {
            description: join_trimmed(&description),
            tags: tags
                .into_iter()
                .map(|(name, body)| JsDocTag {
                    name,
                    body: join_trimmed(&body),
                })
                .collect(),
        }
    }

    /// Body of the first tag named `name`.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.body.as_str())
    }

    /// Bodies of every tag named `name`.
    pub fn tags_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.tags
            .iter()
            .filter(move |t| t.name == name)
            .map(|t| t.body.as_str())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Description, falling back to an explicit `@description` tag.
    pub fn summary(&self) -> &str {
        if !self.description.is_empty() {
            return &self.description;
        }
        self.tag("description").unwrap_or("")
    }
}

/// Raw doc comment ending right before byte offset `pos`.
pub fn leading_doc_comment(source: &str, pos: usize) -> Option<&str> {
    let before = source.get(..pos)?.trim_end();
    if !before.ends_with("*/") {
        return None;
    }
    // Block comments do not nest: the opener is the first `/*` after the
    // previous comment's `*/`, even when the body itself contains `/*`
    let body_end = before.len() - 2;
    let search_from = memmem::rfind(&before.as_bytes()[..body_end], b"*/").map_or(0, |i| i + 2);
    let start = search_from + memmem::find(&before.as_bytes()[search_from..body_end], b"/*")?;
    let comment = &before[start..];
    // Plain block comments are not documentation
    if !comment.starts_with("/**") || comment == "/**/" {
        return None;
    }
    Some(comment)
}

/// Parsed doc comment ending right before `pos`.
pub fn doc_at(source: &str, pos: u32) -> Option<JsDoc> {
    leading_doc_comment(source, pos as usize).map(JsDoc::parse)
}

/// Remove the leading ` * ` gutter, keeping deeper indentation intact.
fn strip_comment_gutter(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}

fn join_trimmed(lines: &[&str]) -> String {
    let text = lines.join("\n");
    text.trim_matches(|c: char| c == '\n' || c.is_whitespace())
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
