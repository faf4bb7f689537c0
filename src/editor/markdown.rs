//! Block-level Markdown structure.
//!
//! The editor re-parses its rope into a [`MarkdownAst`] after every change;
//! the preview consumes the AST and never looks at the raw text.

use ropey::Rope;

/// Block-level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdBlockKind {
    Paragraph,
    Heading(u8),
    Table,
    CodeFence,
    BlockQuote,
    UnorderedList,
    OrderedList,
    HorizontalRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlign {
    None,
    Left,
    Center,
    Right,
}

/// One block of the document.
///
/// `lines` holds the block's source lines without line terminators. For code
/// fences the opening and closing fence lines are excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdBlock {
    pub kind: MdBlockKind,
    pub start_line: usize,
    pub end_line: usize,
    pub lines: Vec<String>,
    pub lang: Option<String>,
    pub aligns: Vec<TableAlign>,
}

impl MdBlock {
    fn new(kind: MdBlockKind, start_line: usize) -> Self {
        Self {
            kind,
            start_line,
            end_line: start_line,
            lines: Vec::new(),
            lang: None,
            aligns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownAst {
    blocks: Vec<MdBlock>,
}

impl MarkdownAst {
    pub fn parse(rope: &Rope) -> Self {
        Self {
            blocks: parse_blocks(rope),
        }
    }

    pub fn blocks(&self) -> &[MdBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Heading line without its `#` markers and optional closing sequence.
pub fn heading_text(line: &str) -> &str {
    let text = line.trim_start().trim_start_matches('#').trim();
    let without_closing = text.trim_end_matches('#');
    if without_closing.len() == text.len() {
        return text;
    }
    if without_closing.is_empty() || without_closing.ends_with(' ') {
        without_closing.trim_end()
    } else {
        text
    }
}

fn parse_blocks(rope: &Rope) -> Vec<MdBlock> {
    struct FenceState {
        marker: u8,
        len: usize,
    }

    let total = rope.len_lines();
    let mut blocks: Vec<MdBlock> = Vec::new();
    let mut current: Option<MdBlock> = None;
    let mut fence: Option<FenceState> = None;
    let mut i = 0usize;

    while i < total {
        let line = rope_line_without_newline(rope, i);
        let trimmed = line.trim_start();

        if let Some(state) = fence.as_ref() {
            let closes = parse_fence_marker(trimmed).is_some_and(|(marker, run_len, rest)| {
                // A closing fence must match delimiter and be at least as long.
                marker == state.marker && run_len >= state.len && rest.trim().is_empty()
            });
            if let Some(block) = current.as_mut() {
                if !closes {
                    block.lines.push(line.clone());
                }
                block.end_line = i + 1;
            }
            if closes {
                fence = None;
                blocks.extend(current.take());
            }
            i += 1;
            continue;
        }

        if let Some((marker, run_len, rest)) = parse_fence_marker(trimmed) {
            blocks.extend(current.take());
            let mut block = MdBlock::new(MdBlockKind::CodeFence, i);
            block.end_line = i + 1;
            block.lang = rest.split_whitespace().next().map(str::to_string);
            current = Some(block);
            fence = Some(FenceState {
                marker,
                len: run_len,
            });
            i += 1;
            continue;
        }

        if let Some(table) = detect_table_block(rope, i) {
            blocks.extend(current.take());
            let mut block = MdBlock::new(MdBlockKind::Table, i);
            block.end_line = table.end_line;
            block.aligns = table.aligns;
            block.lines = (i..table.end_line)
                .map(|row| rope_line_without_newline(rope, row))
                .collect();
            blocks.push(block);
            i = table.end_line;
            continue;
        }

        match classify_line(trimmed) {
            None => {
                blocks.extend(current.take());
            }
            Some(kind @ (MdBlockKind::Heading(_) | MdBlockKind::HorizontalRule)) => {
                blocks.extend(current.take());
                let mut block = MdBlock::new(kind, i);
                block.end_line = i + 1;
                block.lines.push(line);
                blocks.push(block);
            }
            Some(kind) => {
                let continues = current
                    .as_ref()
                    .is_some_and(|block| continues_block(block.kind, kind));
                if !continues {
                    blocks.extend(current.take());
                    current = Some(MdBlock::new(kind, i));
                }
                if let Some(block) = current.as_mut() {
                    block.lines.push(line);
                    block.end_line = i + 1;
                }
            }
        }
        i += 1;
    }

    // An unterminated fence runs to the end of the document.
    blocks.extend(current);
    blocks
}

/// Whether a line of `next` kind extends an open block of `open` kind.
fn continues_block(open: MdBlockKind, next: MdBlockKind) -> bool {
    match (open, next) {
        (a, b) if a == b => true,
        // Lazy continuation lines.
        (MdBlockKind::BlockQuote, MdBlockKind::Paragraph) => true,
        (MdBlockKind::UnorderedList | MdBlockKind::OrderedList, MdBlockKind::Paragraph) => true,
        _ => false,
    }
}

fn parse_fence_marker(trimmed: &str) -> Option<(u8, usize, &str)> {
    let bytes = trimmed.as_bytes();
    let marker = *bytes.first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }

    let mut run_len = 0;
    while run_len < bytes.len() && bytes[run_len] == marker {
        run_len += 1;
    }
    if run_len < 3 {
        return None;
    }

    Some((marker, run_len, &trimmed[run_len..]))
}

struct TableDetection {
    end_line: usize,
    aligns: Vec<TableAlign>,
}

fn detect_table_block(rope: &Rope, start_line: usize) -> Option<TableDetection> {
    let total = rope.len_lines();
    if start_line + 1 >= total {
        return None;
    }

    let header = parse_table_cells(&rope_line_without_newline(rope, start_line))?;
    let separator = parse_table_cells(&rope_line_without_newline(rope, start_line + 1))?;
    if header.is_empty() || header.len() != separator.len() {
        return None;
    }

    let aligns = separator
        .iter()
        .map(|cell| parse_table_alignment(cell))
        .collect::<Option<Vec<_>>>()?;

    let mut end_line = start_line + 2;
    while end_line < total {
        let row = rope_line_without_newline(rope, end_line);
        if row.trim().is_empty() || parse_table_cells(&row).is_none() {
            break;
        }
        end_line += 1;
    }

    Some(TableDetection { end_line, aligns })
}

fn parse_table_alignment(cell: &str) -> Option<TableAlign> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    let left = trimmed.starts_with(':');
    let right = trimmed.ends_with(':');
    let core = trimmed.trim_matches(':');
    if core.len() < 3 || !core.chars().all(|ch| ch == '-') {
        return None;
    }

    Some(match (left, right) {
        (true, true) => TableAlign::Center,
        (true, false) => TableAlign::Left,
        (false, true) => TableAlign::Right,
        (false, false) => TableAlign::None,
    })
}

/// Split a pipe table row into trimmed cells; `None` if the line has no pipe.
pub fn parse_table_cells(src: &str) -> Option<Vec<String>> {
    let trimmed = src.trim();
    if !trimmed.contains('|') {
        return None;
    }
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    if next != '|' {
                        cell.push('\\');
                    }
                    cell.push(next);
                }
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    Some(cells)
}

fn classify_line(trimmed: &str) -> Option<MdBlockKind> {
    if trimmed.is_empty() {
        return None;
    }

    // Heading: # ... (1-6 levels)
    if trimmed.starts_with('#') {
        let hashes = trimmed.len() - trimmed.trim_start_matches('#').len();
        let after_hashes = &trimmed[hashes..];
        if hashes <= 6 && (after_hashes.is_empty() || after_hashes.starts_with(' ')) {
            return Some(MdBlockKind::Heading(hashes as u8));
        }
    }

    if is_horizontal_rule(trimmed) {
        return Some(MdBlockKind::HorizontalRule);
    }

    if trimmed.starts_with('>') {
        return Some(MdBlockKind::BlockQuote);
    }

    if trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
        return Some(MdBlockKind::UnorderedList);
    }

    if let Some(dot_pos) = trimmed.find(". ") {
        if dot_pos > 0 && dot_pos <= 9 && trimmed[..dot_pos].chars().all(|c| c.is_ascii_digit())
        {
            return Some(MdBlockKind::OrderedList);
        }
    }

    Some(MdBlockKind::Paragraph)
}

fn is_horizontal_rule(trimmed: &str) -> bool {
    let Some(marker) = trimmed.chars().find(|c| *c != ' ') else {
        return false;
    };
    if !matches!(marker, '-' | '*' | '_') {
        return false;
    }
    let count = trimmed.chars().filter(|c| *c == marker).count();
    count >= 3 && trimmed.chars().all(|c| c == marker || c == ' ')
}

fn rope_line_without_newline(rope: &Rope, line: usize) -> String {
    if line >= rope.len_lines() {
        return String::new();
    }
    let s = rope.line(line).to_string();
    s.trim_end_matches(['\n', '\r']).to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/editor/markdown.rs"]
mod tests;
