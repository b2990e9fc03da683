//! Inline-level tokenization for paragraph, heading, and table-cell text.
//!
//! This is a single left-to-right scan rather than a full CommonMark emphasis
//! resolution pass: good enough for rules that need to know *whether* and
//! *where* a link/image/code-span/emphasis run appears, without needing a
//! byte-perfect HTML renderer behind it.

use super::{Blocks, Position, Range, Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`+)([^`]*?)\1").unwrap());
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^!\[((?:[^\]\\]|\\.)*)\]\(\s*(\S*?)(?:\s+"([^"]*)")?\s*\)"#).unwrap());
static IMAGE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^!\[((?:[^\]\\]|\\.)*)\]\[([^\]]*)\]").unwrap());
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[((?:[^\]\\]|\\.)*)\]\(\s*<?([^\s)>]*)>?(?:\s+"([^"]*)")?\s*\)"#).unwrap());
static LINK_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[((?:[^\]\\]|\\.)*)\]\[([^\]]*)\]").unwrap());
static AUTOLINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<((?:https?|mailto):[^\s<>]+|[^\s<>@]+@[^\s<>]+)>").unwrap());
static HTML_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^</?[A-Za-z][A-Za-z0-9-]*(?:\s+[^<>]*)?/?>|^<!--.*?-->").unwrap());
static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*\*|__)((?:[^\\]|\\.)+?)\1").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\*|_)((?:[^\\]|\\.)+?)\1").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~~((?:[^~\\]|\\.)+?)~~").unwrap());

/// Parse the inline constructs within `text`, which began at `(start_line, start_col)`
/// in the original document. `text` may itself span multiple (newline-joined) lines.
pub(super) fn parse_inline(text: &str, start_line: usize, start_col: usize, blocks: &Blocks<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0usize;
    let mut line = start_line;
    let mut col = start_col;
    let mut text_run_start: Option<(usize, usize, usize)> = None; // (byte_idx, line, col)

    let pos = |l: usize, c: usize, blocks: &Blocks<'_>| -> Position {
        let offset = blocks.offsets.get(l).copied().unwrap_or(0) + c;
        Position::new(l, c, offset)
    };

    let flush_text = |tokens: &mut Vec<Token>, run: &mut Option<(usize, usize, usize)>, end_byte: usize, end_line: usize, end_col: usize| {
        if let Some((start_byte, sline, scol)) = run.take() {
            if end_byte > start_byte {
                let range = Range::new(Position::new(sline, scol, scol), Position::new(end_line, end_col, end_col));
                tokens.push(Token::new(TokenKind::Text, range, &text[start_byte..end_byte]));
            }
        }
    };

    while i < bytes.len() {
        let rest = &text[i..];
        if rest.starts_with('\n') {
            flush_text(&mut tokens, &mut text_run_start, i, line, col);
            i += 1;
            line += 1;
            col = 0;
            continue;
        }

        let mut matched_len = 0usize;
        let mut produced: Option<Token> = None;

        if let Some(m) = CODE_SPAN.find(rest) {
            matched_len = m.end();
            let content = CODE_SPAN.captures(rest).unwrap()[2].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(Token::new(TokenKind::CodeText, range, content));
        } else if let Some(caps) = IMAGE.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let alt = caps[1].to_string();
            let url = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            let title = caps.get(3).map(|m| m.as_str().to_string());
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            let mut t = Token::new(TokenKind::Image, range, &rest[..matched_len])
                .with_property("alt", alt)
                .with_property("url", url);
            if let Some(title) = title {
                t = t.with_property("title", title);
            }
            produced = Some(t);
        } else if let Some(caps) = IMAGE_REF.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let alt = caps[1].to_string();
            let reference = caps[2].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(
                Token::new(TokenKind::ImageReference, range, &rest[..matched_len])
                    .with_property("alt", alt)
                    .with_property("reference", reference),
            );
        } else if let Some(caps) = LINK.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let label = caps[1].to_string();
            let url = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            let title = caps.get(3).map(|m| m.as_str().to_string());
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            let children = parse_inline(&label, line, col + 1, blocks);
            let mut t = Token::new(TokenKind::Link, range, &rest[..matched_len])
                .with_property("url", url)
                .with_children(children);
            if let Some(title) = title {
                t = t.with_property("title", title);
            }
            produced = Some(t);
        } else if let Some(caps) = LINK_REF.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let label = caps[1].to_string();
            let reference = caps[2].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(
                Token::new(TokenKind::LinkReference, range, &rest[..matched_len])
                    .with_property("label", label)
                    .with_property("reference", reference),
            );
        } else if let Some(m) = AUTOLINK.find(rest) {
            matched_len = m.end();
            let url = AUTOLINK.captures(rest).unwrap()[1].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(Token::new(TokenKind::Autolink, range, &rest[..matched_len]).with_property("url", url));
        } else if let Some(m) = HTML_INLINE.find(rest) {
            matched_len = m.end();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(Token::new(TokenKind::HtmlText, range, &rest[..matched_len]));
        } else if let Some(caps) = STRONG.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let inner = caps[2].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            let children = parse_inline(&inner, line, col + 2, blocks);
            produced = Some(Token::new(TokenKind::Strong, range, inner).with_children(children));
        } else if let Some(caps) = STRIKETHROUGH.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let inner = caps[1].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            produced = Some(Token::new(TokenKind::Text, range, &inner).with_property("strikethrough", true));
        } else if let Some(caps) = EMPHASIS.captures(rest) {
            matched_len = caps.get(0).unwrap().end();
            let inner = caps[2].to_string();
            let range = Range::new(pos(line, col, blocks), pos(line, col + matched_len, blocks));
            let children = parse_inline(&inner, line, col + 1, blocks);
            produced = Some(Token::new(TokenKind::Emphasis, range, inner).with_children(children));
        }

        if let Some(token) = produced {
            flush_text(&mut tokens, &mut text_run_start, i, line, col);
            tokens.push(token);
            i += matched_len;
            col += matched_len;
        } else {
            if text_run_start.is_none() {
                text_run_start = Some((i, line, col));
            }
            let ch_len = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            i += ch_len;
            col += ch_len;
        }
    }
    flush_text(&mut tokens, &mut text_run_start, i, line, col);
    tokens
}
