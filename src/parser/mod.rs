//! The block/inline tokenizer.
//!
//! Markdown is read line by line and classified into block-level tokens
//! (headings, lists, code blocks, block quotes, tables, paragraphs, ...).
//! Paragraph- and heading-like text is then given a second, lighter pass to
//! pick out the inline constructs (links, images, emphasis, code spans,
//! autolinks, raw HTML) that rules care about.
//!
//! This is a hand-written recursive-descent/state-machine parser rather than
//! a wrapper around a general-purpose Markdown engine: rule authors need
//! exact byte/line/column positions and a fixed, stable vocabulary of token
//! kinds, which a general renderer's AST does not guarantee across versions.

mod inline;
mod token;

pub use token::*;

use once_cell::sync::Lazy;
use regex::Regex;

static ATX_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(#{1,6})(?:\s+(.*?))?\s*$").unwrap());
static ATX_CLOSING_HASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+#+\s*$").unwrap());
static THEMATIC_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap());
static SETEXT_UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(=+|-+)\s*$").unwrap());
static FENCE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( {0,3})(`{3,}|~{3,})[ \t]*(.*?)\s*$").unwrap());
static BLOCKQUOTE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}>[ \t]?").unwrap());
static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})([-+*])(?:[ \t]+(.*)|$)").unwrap());
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( {0,3})(\d{1,9})([.)])(?:[ \t]+(.*)|$)").unwrap());
static HTML_FLOW_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^ {0,3}<(/?(?:address|article|aside|base|basefont|blockquote|body|caption|center|col|colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|frame|frameset|h1|h2|h3|h4|h5|h6|head|header|hr|html|iframe|legend|li|link|main|menu|menuitem|nav|noframes|ol|optgroup|option|p|param|section|summary|table|tbody|td|tfoot|th|thead|title|tr|track|ul)\b|!--|[?]|!\[CDATA\[|![A-Za-z])").unwrap()
});
static TABLE_DELIMITER_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:?-+:?\s*(\|\s*:?-+:?\s*)+\|?\s*$|^\s*\|(\s*:?-+:?\s*\|)+\s*$").unwrap());
static INDENTED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?: {4}|\t)").unwrap());

/// Parse Markdown source into the top-level children of an implicit document root.
pub fn parse(content: &str) -> Vec<Token> {
    let lines: Vec<&str> = split_lines_keep_empty(content);
    let mut offsets = Vec::with_capacity(lines.len());
    let mut offset = 0usize;
    for line in &lines {
        offsets.push(offset);
        offset += line.len() + 1; // account for the stripped line terminator
    }
    let mut b = Blocks {
        lines: &lines,
        offsets: &offsets,
    };
    b.parse_block_range(0, lines.len())
}

fn split_lines_keep_empty(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return Vec::new();
    }
    let normalized_has_trailing_nl = content.ends_with('\n');
    let mut lines: Vec<&str> = content.split('\n').collect();
    if normalized_has_trailing_nl {
        lines.pop();
    }
    lines.iter().map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
}

struct Blocks<'a> {
    lines: &'a [&'a str],
    offsets: &'a [usize],
}

impl<'a> Blocks<'a> {
    fn pos(&self, line: usize, column: usize) -> Position {
        let offset = self.offsets.get(line).copied().unwrap_or(0) + column;
        Position::new(line, column, offset)
    }

    fn line_end_pos(&self, line: usize) -> Position {
        let len = self.lines.get(line).map(|l| l.len()).unwrap_or(0);
        self.pos(line, len)
    }

    /// Parse the block-level tokens covering `[start, end)` (line indices).
    fn parse_block_range(&mut self, mut start: usize, end: usize) -> Vec<Token> {
        let mut tokens = Vec::new();
        while start < end {
            if self.lines[start].trim().is_empty() {
                start += 1;
                continue;
            }
            let (token, next) = self.parse_one_block(start, end);
            tokens.push(token);
            start = next.max(start + 1);
        }
        tokens
    }

    fn parse_one_block(&mut self, start: usize, end: usize) -> (Token, usize) {
        let line = self.lines[start];

        if let Some(caps) = FENCE_START.captures(line) {
            return self.parse_fenced_code(start, end, caps[1].len(), caps[2].chars().next().unwrap(), caps[2].len());
        }
        if THEMATIC_BREAK.is_match(line) && !BULLET_ITEM.is_match(line) {
            let range = Range::new(self.pos(start, 0), self.line_end_pos(start));
            return (Token::new(TokenKind::ThematicBreak, range, line), start + 1);
        }
        if let Some(caps) = ATX_HEADING.captures(line) {
            return self.parse_atx_heading(start, &caps);
        }
        if BLOCKQUOTE_PREFIX.is_match(line) {
            return self.parse_blockquote(start, end);
        }
        if BULLET_ITEM.is_match(line) || ORDERED_ITEM.is_match(line) {
            return self.parse_list(start, end);
        }
        if HTML_FLOW_START.is_match(line) {
            return self.parse_html_flow(start, end);
        }
        if self.is_table_start(start, end) {
            return self.parse_table(start, end);
        }
        if INDENTED_CODE.is_match(line) {
            return self.parse_indented_code(start, end);
        }
        self.parse_paragraph_or_setext(start, end)
    }

    fn parse_fenced_code(
        &mut self,
        start: usize,
        end: usize,
        indent: usize,
        fence_char: char,
        fence_len: usize,
    ) -> (Token, usize) {
        let info = FENCE_START.captures(self.lines[start]).unwrap()[3].to_string();
        let language = info.split_whitespace().next().unwrap_or("").to_string();
        let mut close = end;
        let mut i = start + 1;
        while i < end {
            let trimmed = self.lines[i].trim_start();
            let closing_run = trimmed.chars().take_while(|&c| c == fence_char).count();
            if closing_run >= fence_len && trimmed[closing_run..].trim().is_empty() {
                close = i;
                break;
            }
            i += 1;
        }
        let content_end = close.min(end);
        let content = self.lines[start + 1..content_end].join("\n");
        let last_line = if close < end { close } else { content_end.saturating_sub(1).max(start) };
        let range = Range::new(self.pos(start, 0), self.line_end_pos(last_line));
        let code_text_range = Range::new(self.pos(start + 1, 0), self.line_end_pos(content_end.saturating_sub(1).max(start)));
        let code_text = Token::new(TokenKind::CodeText, code_text_range, content);
        let token = Token::new(TokenKind::CodeFenced, range, self.lines[start])
            .with_property("language", language)
            .with_property("indent", indent as u64)
            .with_property("marker", fence_char.to_string())
            .with_children(vec![code_text]);
        (token, if close < end { close + 1 } else { end })
    }

    fn parse_atx_heading(&mut self, start: usize, caps: &regex::Captures<'_>) -> (Token, usize) {
        let level = caps[1].len();
        let raw_text = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let text = ATX_CLOSING_HASHES.replace(raw_text, "").trim().to_string();
        let range = Range::new(self.pos(start, 0), self.line_end_pos(start));
        let children = inline::parse_inline(&text, start, caps[1].len() + 1, self);
        let token = Token::new(TokenKind::AtxHeading, range, text)
            .with_property("level", level as u64)
            .with_children(children);
        (token, start + 1)
    }

    fn parse_blockquote(&mut self, start: usize, end: usize) -> (Token, usize) {
        let mut i = start;
        let mut inner_lines: Vec<String> = Vec::new();
        while i < end {
            let line = self.lines[i];
            if let Some(m) = BLOCKQUOTE_PREFIX.find(line) {
                inner_lines.push(line[m.end()..].to_string());
            } else if line.trim().is_empty() {
                break;
            } else {
                // Lazy continuation of blockquote paragraph content.
                inner_lines.push(line.to_string());
            }
            i += 1;
        }
        let inner_refs: Vec<&str> = inner_lines.iter().map(|s| s.as_str()).collect();
        let offset_lines = &self.lines[start..i];
        let mut sub_offsets = Vec::with_capacity(offset_lines.len());
        let mut off = self.offsets[start];
        for l in offset_lines {
            sub_offsets.push(off);
            off += l.len() + 1;
        }
        let mut sub = Blocks {
            lines: &inner_refs,
            offsets: &sub_offsets,
        };
        // Re-anchor by running the sub-parser but shifting line numbers back up.
        let children = shift_lines(sub.parse_block_range(0, inner_refs.len()), start);
        let range = Range::new(self.pos(start, 0), self.line_end_pos(i.saturating_sub(1).max(start)));
        let token = Token::new(TokenKind::BlockQuote, range, "").with_children(children);
        (token, i)
    }

    fn parse_list(&mut self, start: usize, end: usize) -> (Token, usize) {
        let ordered = ORDERED_ITEM.is_match(self.lines[start]);
        let mut items = Vec::new();
        let mut i = start;
        let mut blank_streak = 0usize;
        while i < end {
            let line = self.lines[i];
            if line.trim().is_empty() {
                blank_streak += 1;
                if blank_streak >= 2 {
                    break;
                }
                i += 1;
                continue;
            }
            let is_item_start = if ordered {
                ORDERED_ITEM.is_match(line)
            } else {
                BULLET_ITEM.is_match(line)
            };
            if !is_item_start {
                if blank_streak > 0 || !starts_indented(line) {
                    break;
                }
            }
            blank_streak = 0;
            let (item, next) = self.parse_list_item(i, end, ordered);
            items.push(item);
            i = next;
        }
        let range = if let (Some(first), Some(last)) = (items.first(), items.last()) {
            Range::new(first.range.start, last.range.end)
        } else {
            Range::new(self.pos(start, 0), self.line_end_pos(start))
        };
        let token = Token::new(TokenKind::List, range, "")
            .with_property("ordered", ordered)
            .with_children(items);
        (token, i)
    }

    fn parse_list_item(&mut self, start: usize, end: usize, ordered: bool) -> (Token, usize) {
        let line = self.lines[start];
        let (marker, content_col, marker_text) = if ordered {
            let caps = ORDERED_ITEM.captures(line).unwrap();
            let indent = caps[1].len();
            let num = &caps[2];
            let delim = &caps[3];
            let prefix_len = indent + num.len() + delim.len();
            let gap = caps.get(4).map(|m| line[prefix_len..].len() - m.as_str().len()).unwrap_or(1).max(1);
            (format!("{num}{delim}"), prefix_len + gap, format!("{num}{delim}"))
        } else {
            let caps = BULLET_ITEM.captures(line).unwrap();
            let indent = caps[1].len();
            let bullet = &caps[2];
            let prefix_len = indent + bullet.len();
            let gap = caps.get(3).map(|m| line[prefix_len..].len() - m.as_str().len()).unwrap_or(1).max(1);
            (bullet.to_string(), prefix_len + gap, bullet.to_string())
        };

        let mut i = start + 1;
        while i < end {
            let l = self.lines[i];
            if l.trim().is_empty() {
                // A blank line continues the item only if further indented content follows.
                if i + 1 < end && starts_with_indent(self.lines[i + 1], content_col) {
                    i += 1;
                    continue;
                }
                break;
            }
            if starts_with_indent(l, content_col) {
                i += 1;
                continue;
            }
            break;
        }

        let item_lines: Vec<String> = (start..i)
            .map(|n| {
                if n == start {
                    self.lines[n].get(content_col.min(self.lines[n].len())..).unwrap_or("").to_string()
                } else {
                    let l = self.lines[n];
                    if l.len() >= content_col {
                        l[content_col..].to_string()
                    } else {
                        l.trim_start().to_string()
                    }
                }
            })
            .collect();
        let refs: Vec<&str> = item_lines.iter().map(|s| s.as_str()).collect();
        let mut sub_offsets = Vec::with_capacity(refs.len());
        let mut off = self.offsets[start];
        for l in &refs {
            sub_offsets.push(off);
            off += l.len() + 1;
        }
        let mut sub = Blocks {
            lines: &refs,
            offsets: &sub_offsets,
        };
        let children = shift_lines(sub.parse_block_range(0, refs.len()), start);
        let range = Range::new(self.pos(start, 0), self.line_end_pos(i.saturating_sub(1).max(start)));
        let token = Token::new(TokenKind::ListItem, range, marker_text).with_property("marker", marker).with_children(children);
        (token, i)
    }

    fn parse_html_flow(&mut self, start: usize, end: usize) -> (Token, usize) {
        let mut i = start + 1;
        while i < end && !self.lines[i].trim().is_empty() {
            i += 1;
        }
        let text = self.lines[start..i].join("\n");
        let range = Range::new(self.pos(start, 0), self.line_end_pos(i.saturating_sub(1).max(start)));
        (Token::new(TokenKind::HtmlFlow, range, text), i)
    }

    fn is_table_start(&self, start: usize, end: usize) -> bool {
        if start + 1 >= end {
            return false;
        }
        self.lines[start].contains('|') && TABLE_DELIMITER_ROW.is_match(self.lines[start + 1].trim())
    }

    fn parse_table(&mut self, start: usize, end: usize) -> (Token, usize) {
        let header = self.parse_table_row(start, TokenKind::TableRow);
        let delimiter_range = Range::new(self.pos(start + 1, 0), self.line_end_pos(start + 1));
        let delimiter = Token::new(TokenKind::TableDelimiter, delimiter_range, self.lines[start + 1]);
        let mut rows = vec![header, delimiter];
        let mut i = start + 2;
        while i < end && !self.lines[i].trim().is_empty() && self.lines[i].contains('|') {
            rows.push(self.parse_table_row(i, TokenKind::TableRow));
            i += 1;
        }
        let range = Range::new(self.pos(start, 0), self.line_end_pos(i.saturating_sub(1).max(start)));
        let token = Token::new(TokenKind::Table, range, "").with_children(rows);
        (token, i)
    }

    fn parse_table_row(&mut self, line_idx: usize, kind: TokenKind) -> Token {
        let line = self.lines[line_idx];
        let trimmed = line.trim();
        let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
        let inner = inner.strip_suffix('|').unwrap_or(inner);
        let mut cells = Vec::new();
        let mut col = 0usize;
        for part in split_table_cells(inner) {
            let text = part.trim().to_string();
            let range = Range::new(self.pos(line_idx, col), self.pos(line_idx, col + part.len()));
            let inline_children = inline::parse_inline(&text, line_idx, col, self);
            cells.push(Token::new(TokenKind::TableCell, range, text).with_children(inline_children));
            col += part.len() + 1;
        }
        let range = Range::new(self.pos(line_idx, 0), self.line_end_pos(line_idx));
        Token::new(kind, range, line).with_children(cells)
    }

    fn parse_indented_code(&mut self, start: usize, end: usize) -> (Token, usize) {
        let mut i = start;
        while i < end && (self.lines[i].trim().is_empty() || INDENTED_CODE.is_match(self.lines[i])) {
            i += 1;
        }
        while i > start && self.lines[i - 1].trim().is_empty() {
            i -= 1;
        }
        let content: String = self.lines[start..i]
            .iter()
            .map(|l| l.strip_prefix("    ").or_else(|| l.strip_prefix('\t')).unwrap_or(l.trim_start()))
            .collect::<Vec<_>>()
            .join("\n");
        let range = Range::new(self.pos(start, 0), self.line_end_pos(i.saturating_sub(1).max(start)));
        let token = Token::new(TokenKind::CodeIndented, range, content);
        (token, i)
    }

    fn parse_paragraph_or_setext(&mut self, start: usize, end: usize) -> (Token, usize) {
        let mut i = start;
        while i < end {
            let line = self.lines[i];
            if line.trim().is_empty() {
                break;
            }
            if i > start
                && (ATX_HEADING.is_match(line)
                    || THEMATIC_BREAK.is_match(line)
                    || FENCE_START.is_match(line)
                    || BLOCKQUOTE_PREFIX.is_match(line)
                    || HTML_FLOW_START.is_match(line))
            {
                break;
            }
            if i > start && (BULLET_ITEM.is_match(line) || ORDERED_ITEM.is_match(line)) {
                break;
            }
            if i > start && SETEXT_UNDERLINE.is_match(line) {
                break;
            }
            i += 1;
        }
        let para_end = i;
        if para_end < end && para_end > start {
            let candidate = self.lines[para_end];
            if SETEXT_UNDERLINE.is_match(candidate) && !THEMATIC_BREAK.is_match(candidate) {
                let level = if candidate.trim_start().starts_with('=') { 1 } else { 2 };
                let text = self.lines[start..para_end].join(" ").trim().to_string();
                let underline_range = Range::new(self.pos(para_end, 0), self.line_end_pos(para_end));
                let underline = Token::new(TokenKind::SetextHeadingUnderline, underline_range, candidate);
                let heading_range = Range::new(self.pos(start, 0), self.line_end_pos(para_end));
                let mut children = inline::parse_inline(&text, start, 0, self);
                children.push(underline);
                let token = Token::new(TokenKind::SetextHeading, heading_range, text)
                    .with_property("level", level as u64)
                    .with_children(children);
                return (token, para_end + 1);
            }
        }
        let text = self.lines[start..para_end].join("\n");
        let range = Range::new(self.pos(start, 0), self.line_end_pos(para_end.saturating_sub(1).max(start)));
        let children = inline::parse_inline(&text, start, 0, self);
        let token = Token::new(TokenKind::Paragraph, range, text).with_children(children);
        (token, para_end)
    }
}

fn shift_lines(tokens: Vec<Token>, by: usize) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|mut t| {
            t.range.start.line += by;
            t.range.end.line += by;
            t.children = shift_lines(t.children, by);
            t
        })
        .collect()
}

fn starts_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

fn starts_with_indent(line: &str, width: usize) -> bool {
    let stripped = line.trim_start_matches(' ');
    line.len() - stripped.len() >= width || line.trim().is_empty()
}

fn split_table_cells(inner: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                current.push(c);
                current.push(next);
                chars.next();
                continue;
            }
        }
        if c == '|' {
            cells.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    cells.push(current);
    cells
}
