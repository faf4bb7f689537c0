//! AST → HTML.

use crate::editor::markdown::{heading_text, parse_table_cells};
use crate::editor::{MarkdownAst, MdBlock, MdBlockKind, TableAlign};
use std::fmt::Write;

pub fn render_html(ast: &MarkdownAst) -> String {
    let mut out = String::new();
    for block in ast.blocks() {
        render_block(&mut out, block);
    }
    out
}

fn render_block(out: &mut String, block: &MdBlock) {
    match block.kind {
        MdBlockKind::Heading(level) => {
            let text = block.lines.first().map(|l| heading_text(l)).unwrap_or("");
            let _ = writeln!(out, "<h{level}>{}</h{level}>", render_inline(text));
        }
        MdBlockKind::Paragraph => {
            let text = join_trimmed(block.lines.iter().map(String::as_str));
            let _ = writeln!(out, "<p>{}</p>", render_inline(&text));
        }
        MdBlockKind::CodeFence => {
            match block.lang.as_deref() {
                Some(lang) => {
                    let _ = write!(out, "<pre><code class=\"language-{}\">", escape(lang));
                }
                None => out.push_str("<pre><code>"),
            }
            for line in &block.lines {
                out.push_str(&escape(line));
                out.push('\n');
            }
            out.push_str("</code></pre>\n");
        }
        MdBlockKind::BlockQuote => {
            let text = join_trimmed(block.lines.iter().map(|line| {
                let trimmed = line.trim_start();
                let rest = trimmed.strip_prefix('>').unwrap_or(trimmed);
                rest.strip_prefix(' ').unwrap_or(rest)
            }));
            let _ = writeln!(out, "<blockquote><p>{}</p></blockquote>", render_inline(&text));
        }
        MdBlockKind::UnorderedList | MdBlockKind::OrderedList => render_list(out, block),
        MdBlockKind::HorizontalRule => out.push_str("<hr>\n"),
        MdBlockKind::Table => render_table(out, block),
    }
}

fn render_list(out: &mut String, block: &MdBlock) {
    let ordered = block.kind == MdBlockKind::OrderedList;
    let tag = if ordered { "ol" } else { "ul" };
    let mut items: Vec<String> = Vec::new();
    for line in &block.lines {
        match strip_list_marker(line.trim_start(), ordered) {
            Some(item) => items.push(item.to_string()),
            None => match items.last_mut() {
                Some(last) => {
                    last.push(' ');
                    last.push_str(line.trim());
                }
                None => items.push(line.trim().to_string()),
            },
        }
    }

    let _ = writeln!(out, "<{tag}>");
    for item in items {
        let _ = writeln!(out, "<li>{}</li>", render_inline(&item));
    }
    let _ = writeln!(out, "</{tag}>");
}

fn strip_list_marker(line: &str, ordered: bool) -> Option<&str> {
    if ordered {
        let dot = line.find(". ")?;
        if dot == 0 || !line[..dot].chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(&line[dot + 2..])
    } else {
        ["- ", "* ", "+ "]
            .iter()
            .find_map(|marker| line.strip_prefix(marker))
    }
}

fn render_table(out: &mut String, block: &MdBlock) {
    out.push_str("<table>\n");
    for (row_index, line) in block.lines.iter().enumerate() {
        if row_index == 1 {
            continue;
        }
        let cells = parse_table_cells(line).unwrap_or_default();
        let tag = if row_index == 0 { "th" } else { "td" };
        if row_index == 0 {
            out.push_str("<thead>\n");
        } else if row_index == 2 {
            out.push_str("<tbody>\n");
        }
        out.push_str("<tr>");
        for (col, cell) in cells.iter().enumerate() {
            let style = match block.aligns.get(col).copied().unwrap_or(TableAlign::None) {
                TableAlign::None => "",
                TableAlign::Left => " style=\"text-align:left\"",
                TableAlign::Center => " style=\"text-align:center\"",
                TableAlign::Right => " style=\"text-align:right\"",
            };
            let _ = write!(out, "<{tag}{style}>{}</{tag}>", render_inline(cell));
        }
        out.push_str("</tr>\n");
        if row_index == 0 {
            out.push_str("</thead>\n");
        }
    }
    if block.lines.len() > 2 {
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

fn join_trimmed<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Code spans, `**strong**`, `*em*`/`_em_` and `[text](url)` links.
pub fn render_inline(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(ch) = rest.chars().next() {
        if ch == '`' {
            if let Some(end) = rest[1..].find('`') {
                let _ = write!(out, "<code>{}</code>", escape(&rest[1..1 + end]));
                rest = &rest[end + 2..];
                continue;
            }
        }
        if let Some(inner) = rest.strip_prefix("**") {
            if let Some(end) = inner.find("**").filter(|&end| end > 0) {
                let _ = write!(out, "<strong>{}</strong>", render_inline(&inner[..end]));
                rest = &inner[end + 2..];
                continue;
            }
        }
        if ch == '*' || ch == '_' {
            if let Some(end) = rest[1..].find(ch).filter(|&end| end > 0) {
                let _ = write!(out, "<em>{}</em>", render_inline(&rest[1..1 + end]));
                rest = &rest[end + 2..];
                continue;
            }
        }
        if ch == '[' {
            if let Some((text, url, consumed)) = parse_link(rest) {
                let _ = write!(
                    out,
                    "<a href=\"{}\">{}</a>",
                    escape(url),
                    render_inline(text)
                );
                rest = &rest[consumed..];
                continue;
            }
        }
        push_escaped(&mut out, ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

fn parse_link(src: &str) -> Option<(&str, &str, usize)> {
    let close = src.find("](")?;
    let text = &src[1..close];
    if text.contains(']') {
        return None;
    }
    let url_start = close + 2;
    let url_len = src[url_start..].find(')')?;
    let url = &src[url_start..url_start + url_len];
    Some((text, url, url_start + url_len + 1))
}

pub fn escape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for ch in src.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/render.rs"]
mod tests;
