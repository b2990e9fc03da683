//! The token tree produced by the tokenizer: a hierarchy of [`Token`]s, each
//! carrying a precise source [`Range`] and a bag of rule-visible
//! [`properties`](Token::properties).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A zero-based line/column position with an absolute byte offset into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 0-based line index.
    pub line: usize,
    /// 0-based column (UTF-8 byte index within the line).
    pub column: usize,
    /// 0-based byte offset from the start of the document.
    pub offset: usize,
}

impl Position {
    /// Construct a new position.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A half-open `[start, end)` span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive start position.
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

impl Range {
    /// Construct a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// The fixed catalog of token kinds the tokenizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// The root of every token tree.
    Document,
    /// A block of contiguous text lines.
    Paragraph,
    /// A line terminator between two block-level siblings.
    LineEnding,
    /// An ATX heading (`# Title`).
    AtxHeading,
    /// A setext heading (`Title` underlined with `=` or `-`).
    SetextHeading,
    /// The underline line of a setext heading.
    SetextHeadingUnderline,
    /// A list container, grouping sibling `ListItem`s.
    List,
    /// A single list item.
    ListItem,
    /// A fenced code block (``` or ~~~).
    CodeFenced,
    /// An indented (4-space) code block.
    CodeIndented,
    /// The literal text content of a code block or span.
    CodeText,
    /// A blockquote (`>` prefixed lines).
    BlockQuote,
    /// An inline link `[text](url "title")`.
    Link,
    /// A reference-style link `[text][ref]`.
    LinkReference,
    /// An inline image `![alt](url "title")`.
    Image,
    /// A reference-style image `![alt][ref]`.
    ImageReference,
    /// A bare `<https://...>` autolink.
    Autolink,
    /// Emphasized inline text (`*text*`, `_text_`).
    Emphasis,
    /// Strongly emphasized inline text (`**text**`, `__text__`).
    Strong,
    /// A thematic break (`---`, `***`, `___`).
    ThematicBreak,
    /// A block-level raw HTML region.
    HtmlFlow,
    /// An inline raw HTML tag.
    HtmlText,
    /// A GFM table, grouping header/delimiter/body rows.
    Table,
    /// A single row within a table.
    TableRow,
    /// A single cell within a table row.
    TableCell,
    /// The `|---|---|` delimiter row of a table.
    TableDelimiter,
    /// Plain inline text.
    Text,
    /// Inline or leading whitespace significant to a rule.
    Whitespace,
}

impl TokenKind {
    /// Stable, lowerCamelCase name for this kind (used in diagnostics and tests).
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Document => "document",
            TokenKind::Paragraph => "paragraph",
            TokenKind::LineEnding => "lineEnding",
            TokenKind::AtxHeading => "atxHeading",
            TokenKind::SetextHeading => "setextHeading",
            TokenKind::SetextHeadingUnderline => "setextHeadingUnderline",
            TokenKind::List => "list",
            TokenKind::ListItem => "listItem",
            TokenKind::CodeFenced => "codeFenced",
            TokenKind::CodeIndented => "codeIndented",
            TokenKind::CodeText => "codeText",
            TokenKind::BlockQuote => "blockQuote",
            TokenKind::Link => "link",
            TokenKind::LinkReference => "linkReference",
            TokenKind::Image => "image",
            TokenKind::ImageReference => "imageReference",
            TokenKind::Autolink => "autolink",
            TokenKind::Emphasis => "emphasis",
            TokenKind::Strong => "strong",
            TokenKind::ThematicBreak => "thematicBreak",
            TokenKind::HtmlFlow => "htmlFlow",
            TokenKind::HtmlText => "htmlText",
            TokenKind::Table => "table",
            TokenKind::TableRow => "tableRow",
            TokenKind::TableCell => "tableCell",
            TokenKind::TableDelimiter => "tableDelimiter",
            TokenKind::Text => "text",
            TokenKind::Whitespace => "whitespace",
        }
    }
}

/// A node in the hierarchical token tree.
///
/// Tokens own their children directly (no index indirection); rules walk the
/// tree with [`Token::find_all`] / [`Token::descendants`] rather than
/// resolving child indices against a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// What kind of node this is.
    pub kind: TokenKind,
    /// Source span this token covers.
    pub range: Range,
    /// Raw source text this token covers (for leaf-ish tokens); may be empty
    /// for pure containers whose content lives entirely in `children`.
    pub text: String,
    /// Rule-visible metadata, e.g. `level` (headings), `ordered`/`marker`
    /// (lists), `language` (fenced code), `url`/`title`/`alt` (links/images).
    pub properties: HashMap<String, serde_json::Value>,
    /// Child tokens, in document order.
    pub children: Vec<Token>,
}

impl Token {
    /// Construct a new, childless, property-less token.
    pub fn new(kind: TokenKind, range: Range, text: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            text: text.into(),
            properties: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Attach a property and return `self` (builder-style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach children and return `self` (builder-style).
    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    /// True if this token is of the given kind.
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// 1-based starting line number (for diagnostics, which are 1-based).
    pub fn start_line(&self) -> usize {
        self.range.start.line + 1
    }

    /// 1-based ending line number (inclusive).
    pub fn end_line(&self) -> usize {
        self.range.end.line + 1
    }

    /// Read a string property, if present.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    /// Read a usize property, if present.
    pub fn prop_usize(&self, key: &str) -> Option<usize> {
        self.properties.get(key).and_then(|v| v.as_u64()).map(|v| v as usize)
    }

    /// Read a bool property, if present.
    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(|v| v.as_bool())
    }

    /// Depth-first iterator over this token and every descendant (pre-order).
    pub fn descendants(&self) -> TokenIter<'_> {
        TokenIter { stack: vec![self] }
    }

    /// All descendants (including `self`) of the given kind, in document order.
    pub fn find_all(&self, kind: TokenKind) -> Vec<&Token> {
        self.descendants().filter(|t| t.kind == kind).collect()
    }

    /// The immediate children of the given kind.
    pub fn children_of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.children.iter().filter(move |t| t.kind == kind)
    }
}

/// All tokens of `kind` anywhere in `roots` or their descendants, in document order.
///
/// This is the entry point rules use against `RuleParams::tokens`, which holds
/// the document's top-level children rather than a single root token.
pub fn find_all_in<'a>(roots: &'a [Token], kind: TokenKind) -> Vec<&'a Token> {
    roots.iter().flat_map(|t| t.descendants()).filter(|t| t.kind == kind).collect()
}

/// All tokens anywhere in `roots` or their descendants matching `pred`.
pub fn find_all_by<'a>(roots: &'a [Token], pred: impl Fn(&Token) -> bool) -> Vec<&'a Token> {
    roots.iter().flat_map(|t| t.descendants()).filter(|t| pred(t)).collect()
}

/// Depth-first pre-order iterator over a [`Token`] tree.
pub struct TokenIter<'a> {
    stack: Vec<&'a Token>,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, col: usize) -> Position {
        Position::new(line, col, col)
    }

    #[test]
    fn find_all_walks_nested_children() {
        let leaf = Token::new(TokenKind::AtxHeading, Range::new(pos(0, 0), pos(0, 5)), "# Hi")
            .with_property("level", 1u64);
        let doc = Token::new(TokenKind::Document, Range::new(pos(0, 0), pos(1, 0)), "")
            .with_children(vec![leaf]);
        let headings = doc.find_all(TokenKind::AtxHeading);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].prop_usize("level"), Some(1));
    }

    #[test]
    fn descendants_are_preorder() {
        let a = Token::new(TokenKind::Text, Range::new(pos(0, 0), pos(0, 1)), "a");
        let b = Token::new(TokenKind::Text, Range::new(pos(0, 1), pos(0, 2)), "b");
        let parent = Token::new(TokenKind::Paragraph, Range::new(pos(0, 0), pos(0, 2)), "")
            .with_children(vec![a, b]);
        let texts: Vec<&str> = parent.descendants().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["", "a", "b"]);
    }
}
