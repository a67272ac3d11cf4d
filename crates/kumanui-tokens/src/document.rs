//! Typed token tree loaded from YAML.
//!
//! A token document is a nested mapping. Any mapping that carries a `value`
//! key is a color entry ([`TokenNode::Leaf`]); every other mapping is a group
//! of named children ([`TokenNode::Group`]). Scalars that are neither (notes,
//! descriptions, version tags) are kept as [`TokenNode::Scalar`] so that a
//! reference landing on them fails loudly instead of disappearing.
//!
//! ```rust
//! use kumanui_tokens::{ColorValue, TokenDocument};
//!
//! let doc = TokenDocument::from_yaml(r##"
//! palette:
//!   cyan:
//!     dark: { value: "#0E7490" }
//! semantics:
//!   web:
//!     dark:
//!       text: { value: "{palette.cyan.dark}", alpha: 0.8 }
//! "##).unwrap();
//!
//! let entry = doc.entry("semantics.web.dark.text").unwrap();
//! assert!(matches!(entry.color_value(), ColorValue::Reference(_)));
//! assert_eq!(entry.alpha, Some(0.8));
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::{DocumentError, ResolutionError, ResolutionErrorKind};

/// A single color declaration: a literal or a reference, plus optional alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    /// Raw `value` string as written in the document.
    pub value: String,
    /// Declared opacity in `[0, 1]`. `Some(0.0)` is distinct from `None`.
    pub alpha: Option<f64>,
}

impl ColorEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            alpha: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Classifies the raw value.
    pub fn color_value(&self) -> ColorValue<'_> {
        ColorValue::classify(&self.value)
    }

    /// The reference target, if this entry is a reference.
    pub fn reference(&self) -> Option<Reference<'_>> {
        match self.color_value() {
            ColorValue::Reference(r) => Some(r),
            _ => None,
        }
    }
}

/// What a color entry's `value` string denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue<'a> {
    /// Starts with `#`; digit validation happens at resolution time.
    Literal(&'a str),
    /// `{dotted.path}`.
    Reference(Reference<'a>),
    /// Anything else.
    Other(&'a str),
}

impl<'a> ColorValue<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            return ColorValue::Literal(trimmed);
        }
        if let Some(path) = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            return ColorValue::Reference(Reference::new(path.trim()));
        }
        ColorValue::Other(raw)
    }
}

/// A dotted path into the token document, as written inside `{...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference<'a> {
    path: &'a str,
}

impl<'a> Reference<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.path.split('.')
    }

    /// `(hue, tier)` when this points at `palette.<hue>.<tier>`.
    pub fn palette_target(&self) -> Option<(&'a str, &'a str)> {
        let mut parts = self.segments();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("palette"), Some(hue), Some(tier), None) => Some((hue, tier)),
            _ => None,
        }
    }

    /// Human-facing label for the referenced color.
    ///
    /// `palette.cyan.dark` reads as "Dark Cyan", `palette.brand.KumaYellow`
    /// as "KumaYellow", and anything else falls back to its last segment.
    /// Tier names take precedence, so `palette.brand.base` is "Base Brand".
    pub fn display_name(&self) -> String {
        match self.palette_target() {
            Some((hue, tier @ ("base" | "light" | "dark"))) => {
                format!("{} {}", capitalize(tier), capitalize(hue))
            }
            Some(("brand", name)) => name.to_string(),
            _ => self.path.rsplit('.').next().unwrap_or(self.path).to_string(),
        }
    }
}

impl std::fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.path)
    }
}

/// Uppercases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A node in the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(ColorEntry),
    Group(IndexMap<String, TokenNode>),
    Scalar(String),
}

impl TokenNode {
    pub fn as_entry(&self) -> Option<&ColorEntry> {
        match self {
            TokenNode::Leaf(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, TokenNode>> {
        match self {
            TokenNode::Group(children) => Some(children),
            _ => None,
        }
    }

    fn from_yaml(value: &Value, path: &str) -> Result<Self, DocumentError> {
        match value {
            Value::Mapping(map) => {
                if let Some(raw) = map.get("value") {
                    return parse_entry(map, raw, path).map(TokenNode::Leaf);
                }
                let mut children = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    let key = yaml_key(key, path)?;
                    let child_path = join_path(path, &key);
                    let node = TokenNode::from_yaml(child, &child_path)?;
                    children.insert(key, node);
                }
                Ok(TokenNode::Group(children))
            }
            Value::Tagged(tagged) => TokenNode::from_yaml(&tagged.value, path),
            Value::String(s) => Ok(TokenNode::Scalar(s.clone())),
            Value::Number(n) => Ok(TokenNode::Scalar(n.to_string())),
            Value::Bool(b) => Ok(TokenNode::Scalar(b.to_string())),
            Value::Null => Ok(TokenNode::Scalar(String::new())),
            Value::Sequence(_) => Ok(TokenNode::Scalar(format!("{:?}", value))),
        }
    }
}

fn yaml_key(key: &Value, path: &str) -> Result<String, DocumentError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(DocumentError::InvalidEntry {
            token: path.to_string(),
            message: format!("unsupported mapping key {:?}", other),
            path: None,
        }),
    }
}

fn parse_entry(
    map: &serde_yaml::Mapping,
    raw: &Value,
    path: &str,
) -> Result<ColorEntry, DocumentError> {
    let value = raw
        .as_str()
        .ok_or_else(|| DocumentError::InvalidEntry {
            token: path.to_string(),
            message: format!("'value' must be a string, got {:?}", raw),
            path: None,
        })?
        .to_string();

    let alpha = match map.get("alpha") {
        None | Some(Value::Null) => None,
        Some(a) => {
            let alpha = a.as_f64().ok_or_else(|| DocumentError::InvalidEntry {
                token: path.to_string(),
                message: format!("'alpha' must be a number, got {:?}", a),
                path: None,
            })?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(DocumentError::InvalidEntry {
                    token: path.to_string(),
                    message: format!("'alpha' must be within 0..=1, got {}", alpha),
                    path: None,
                });
            }
            Some(alpha)
        }
    };

    Ok(ColorEntry { value, alpha })
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// An immutable, fully parsed token document.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    root: IndexMap<String, TokenNode>,
}

impl TokenDocument {
    /// Wraps an already-built tree.
    pub fn new(root: IndexMap<String, TokenNode>) -> Self {
        Self { root }
    }

    /// Parses a document from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
            path: None,
            message: e.to_string(),
        })?;

        match TokenNode::from_yaml(&value, "")? {
            TokenNode::Group(root) => {
                tracing::debug!(top_level = root.len(), "parsed token document");
                Ok(Self { root })
            }
            _ => Err(DocumentError::NotAMapping { path: None }),
        }
    }

    /// Reads and parses a document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "loading token document");
        Self::from_yaml(&content).map_err(|e| e.with_path(path.to_path_buf()))
    }

    pub fn root(&self) -> &IndexMap<String, TokenNode> {
        &self.root
    }

    /// Looks up a node by dotted path.
    pub fn get(&self, path: &str) -> Option<&TokenNode> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.get(segment)?;
        }
        Some(node)
    }

    /// Walks a reference path, reporting exactly where it breaks.
    pub fn lookup(&self, reference: Reference<'_>) -> Result<&TokenNode, ResolutionError> {
        let mut children = &self.root;
        let mut walked = String::new();
        let mut node: Option<&TokenNode> = None;

        for segment in reference.segments() {
            if let Some(current) = node {
                children = match current {
                    TokenNode::Group(children) => children,
                    _ => {
                        return Err(ResolutionErrorKind::NotAMapping {
                            reference: reference.path().to_string(),
                            at: walked,
                        }
                        .into())
                    }
                };
            }
            let next = children.get(segment).ok_or_else(|| {
                ResolutionError::from(ResolutionErrorKind::DanglingReference {
                    reference: reference.path().to_string(),
                    parent: if walked.is_empty() {
                        "<root>".to_string()
                    } else {
                        walked.clone()
                    },
                    missing: segment.to_string(),
                })
            })?;
            walked = join_path(&walked, segment);
            node = Some(next);
        }

        node.ok_or_else(|| {
            ResolutionErrorKind::DanglingReference {
                reference: reference.path().to_string(),
                parent: "<root>".to_string(),
                missing: String::new(),
            }
            .into()
        })
    }

    /// The color entry at `path`.
    pub fn entry(&self, path: &str) -> Result<&ColorEntry, ResolutionError> {
        match self.lookup(Reference::new(path)).map_err(|e| e.at(path))? {
            TokenNode::Leaf(entry) => Ok(entry),
            _ => Err(ResolutionError::from(ResolutionErrorKind::NotAMapping {
                reference: path.to_string(),
                at: path.to_string(),
            })
            .at(path)),
        }
    }

    /// Every color entry with its dotted path, in document order.
    pub fn entries(&self) -> Vec<(String, &ColorEntry)> {
        let mut out = Vec::new();
        collect_entries(&self.root, "", &mut out);
        out
    }
}

fn collect_entries<'a>(
    children: &'a IndexMap<String, TokenNode>,
    prefix: &str,
    out: &mut Vec<(String, &'a ColorEntry)>,
) {
    for (key, node) in children {
        let path = join_path(prefix, key);
        match node {
            TokenNode::Leaf(entry) => out.push((path, entry)),
            TokenNode::Group(grandchildren) => collect_entries(grandchildren, &path, out),
            TokenNode::Scalar(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"
version: 2
palette:
  black:
    base: { value: "#1C1C1C" }
    dark: { value: "#0A0A0A" }
  cyan:
    dark: { value: "#0e7490", alpha: 0 }
  brand:
    KumaYellow: { value: "#F5C518" }
semantics:
  web:
    dark:
      text: { value: "{palette.cyan.dark}" }
      code:
        bg: { value: "{palette.black.dark}", alpha: 0.5 }
"##;

    fn doc() -> TokenDocument {
        TokenDocument::from_yaml(DOC).unwrap()
    }

    // =====================================================================
    // Classification
    // =====================================================================

    #[test]
    fn classify_literal() {
        assert_eq!(ColorValue::classify("#fff000"), ColorValue::Literal("#fff000"));
    }

    #[test]
    fn classify_reference() {
        match ColorValue::classify("{palette.cyan.dark}") {
            ColorValue::Reference(r) => assert_eq!(r.path(), "palette.cyan.dark"),
            other => panic!("expected reference, got {:?}", other),
        }
    }

    #[test]
    fn classify_other() {
        assert_eq!(ColorValue::classify("cyan"), ColorValue::Other("cyan"));
        assert_eq!(ColorValue::classify("{unclosed"), ColorValue::Other("{unclosed"));
    }

    #[test]
    fn display_names() {
        assert_eq!(Reference::new("palette.cyan.dark").display_name(), "Dark Cyan");
        assert_eq!(
            Reference::new("palette.brand.KumaYellow").display_name(),
            "KumaYellow"
        );
        assert_eq!(
            Reference::new("semantics.web.dark.text").display_name(),
            "text"
        );
    }

    #[test]
    fn tier_names_win_over_brand() {
        assert_eq!(Reference::new("palette.brand.base").display_name(), "Base Brand");
        assert_eq!(Reference::new("palette.brand.dark").display_name(), "Dark Brand");
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("magenta"), "Magenta");
        assert_eq!(capitalize("kumaYellow"), "KumaYellow");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn new_wraps_prebuilt_tree() {
        let mut root = IndexMap::new();
        root.insert(
            "accent".to_string(),
            TokenNode::Leaf(ColorEntry::new("#FF8800").with_alpha(0.5)),
        );
        let doc = TokenDocument::new(root);
        assert_eq!(doc.root().len(), 1);
        assert_eq!(doc.entry("accent").unwrap().alpha, Some(0.5));
        assert_eq!(doc, TokenDocument::from_yaml("accent: { value: \"#FF8800\", alpha: 0.5 }").unwrap());
    }

    #[test]
    fn reference_display_wraps_in_braces() {
        assert_eq!(Reference::new("a.b").to_string(), "{a.b}");
    }

    // =====================================================================
    // Loading
    // =====================================================================

    #[test]
    fn leaves_and_groups() {
        let doc = doc();
        assert!(matches!(doc.get("palette"), Some(TokenNode::Group(_))));
        assert!(matches!(doc.get("palette.black.base"), Some(TokenNode::Leaf(_))));
        assert!(matches!(doc.get("version"), Some(TokenNode::Scalar(_))));
        assert!(doc.get("palette.black.light").is_none());
    }

    #[test]
    fn zero_alpha_is_kept() {
        let doc = doc();
        assert_eq!(doc.entry("palette.cyan.dark").unwrap().alpha, Some(0.0));
        assert_eq!(doc.entry("palette.black.base").unwrap().alpha, None);
    }

    #[test]
    fn entries_in_document_order() {
        let doc = doc();
        let paths: Vec<String> = doc.entries().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "palette.black.base",
                "palette.black.dark",
                "palette.cyan.dark",
                "palette.brand.KumaYellow",
                "semantics.web.dark.text",
                "semantics.web.dark.code.bg",
            ]
        );
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(matches!(
            TokenDocument::from_yaml("- a\n- b\n"),
            Err(DocumentError::NotAMapping { .. })
        ));
    }

    #[test]
    fn rejects_invalid_yaml() {
        assert!(matches!(
            TokenDocument::from_yaml("palette: [unclosed"),
            Err(DocumentError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        let err = TokenDocument::from_yaml("a: { value: \"#000000\", alpha: 1.5 }").unwrap_err();
        match err {
            DocumentError::InvalidEntry { token, .. } => assert_eq!(token, "a"),
            other => panic!("expected InvalidEntry, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_string_value() {
        assert!(matches!(
            TokenDocument::from_yaml("a: { value: 12 }"),
            Err(DocumentError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn integer_alpha_is_accepted() {
        let doc = TokenDocument::from_yaml("a: { value: \"#000000\", alpha: 1 }").unwrap();
        assert_eq!(doc.entry("a").unwrap().alpha, Some(1.0));
    }

    // =====================================================================
    // Lookup
    // =====================================================================

    #[test]
    fn lookup_walks_nested_groups() {
        let doc = doc();
        let node = doc.lookup(Reference::new("semantics.web.dark.code.bg")).unwrap();
        assert_eq!(node.as_entry().unwrap().value, "{palette.black.dark}");
        assert!(doc.lookup(Reference::new("semantics.web")).unwrap().as_group().is_some());
    }

    #[test]
    fn lookup_reports_dangling_segment() {
        let err = doc()
            .lookup(Reference::new("palette.red.base"))
            .unwrap_err();
        match err.kind {
            ResolutionErrorKind::DanglingReference { parent, missing, .. } => {
                assert_eq!(parent, "palette");
                assert_eq!(missing, "red");
            }
            other => panic!("expected DanglingReference, got {:?}", other),
        }
    }

    #[test]
    fn lookup_through_leaf_is_not_a_mapping() {
        let err = doc()
            .lookup(Reference::new("palette.black.base.value"))
            .unwrap_err();
        assert!(matches!(err.kind, ResolutionErrorKind::NotAMapping { .. }));
    }

    #[test]
    fn entry_tags_lookup_failures_with_path() {
        let err = doc().entry("palette.black.light").unwrap_err();
        assert_eq!(err.token.as_deref(), Some("palette.black.light"));
    }

    #[test]
    fn entry_on_group_is_not_a_mapping() {
        let err = doc().entry("palette.black").unwrap_err();
        assert!(matches!(err.kind, ResolutionErrorKind::NotAMapping { .. }));
        assert_eq!(err.token.as_deref(), Some("palette.black"));
    }
}
