//! Document parser: markdown-flavoured prose with math → [`Document`].
//!
//! One forward pass over trimmed lines with a single cursor and no
//! backtracking. The scanner keeps at most one open paragraph or one open
//! list. Line kinds are tested in this order:
//!
//! 1. heading (`###`/`####` by default, see [`NormalizeConfig`])
//! 2. bullet (`-` or `*` followed by whitespace)
//! 3. display math (`\[` anywhere on the line, or `$$` at its start)
//! 4. blank line
//! 5. anything else: paragraph text
//!
//! Display math may span several lines. The cursor then consumes lines until
//! the closing delimiter; if none arrives the block is emitted with whatever
//! was captured. Parsing never fails.

use crate::config::NormalizeConfig;
use crate::document::{Block, Document};
use crate::pipeline::inline::tokenize_inline;
use crate::pipeline::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use tracing::debug;

/// Parse prose with the default configuration.
pub fn parse_document(text: &str) -> Document {
    parse_document_with(text, &NormalizeConfig::default())
}

/// Parse prose into a [`Document`].
pub fn parse_document_with(text: &str, config: &NormalizeConfig) -> Document {
    let source: Cow<'_, str> = if config.presanitize {
        Cow::Owned(sanitize(text))
    } else {
        Cow::Borrowed(text)
    };
    let lines: Vec<&str> = source.lines().map(str::trim).collect();

    let mut builder = DocumentBuilder::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some((level, title)) = heading(line, config) {
            builder.close_all();
            builder.blocks.push(Block::Heading {
                level,
                inlines: tokenize_inline(title),
            });
        } else if let Some(item) = bullet_item(line) {
            builder.flush_paragraph();
            builder.list.push(item.to_string());
        } else if let Some(open) = DisplayOpen::find(line) {
            // Lead-in prose belongs after any open list, before the math.
            builder.flush_list();
            builder.paragraph.push(line[..open.at].trim().to_string());
            builder.close_all();
            i = builder.capture_math(&lines, i, open);
        } else if line.is_empty() {
            builder.close_all();
        } else {
            builder.flush_list();
            builder.paragraph.push(line.to_string());
        }

        i += 1;
    }

    builder.close_all();
    debug!(blocks = builder.blocks.len(), lines = lines.len(), "parsed document");
    Document {
        blocks: builder.blocks,
    }
}

// ── Line classification ─────────────────────────────────────────────────────

fn heading<'l>(line: &'l str, config: &NormalizeConfig) -> Option<(u8, &'l str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    let rest = line[level..].strip_prefix(' ')?;
    if !config.is_heading_level(level) {
        return None;
    }
    Some((level as u8, rest.trim()))
}

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+").unwrap());

fn bullet_item(line: &str) -> Option<&str> {
    RE_BULLET.find(line).map(|m| line[m.end()..].trim())
}

/// Where a display-math block opens on a line.
#[derive(Debug, Clone, Copy)]
struct DisplayOpen {
    at: usize,
    open: &'static str,
    close: &'static str,
}

impl DisplayOpen {
    fn find(line: &str) -> Option<Self> {
        if let Some(at) = line.find("\\[") {
            return Some(Self {
                at,
                open: "\\[",
                close: "\\]",
            });
        }
        if line.starts_with("$$") {
            return Some(Self {
                at: 0,
                open: "$$",
                close: "$$",
            });
        }
        None
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct DocumentBuilder {
    blocks: Vec<Block>,
    paragraph: Vec<String>,
    list: Vec<String>,
}

impl DocumentBuilder {
    fn flush_paragraph(&mut self) {
        let parts: Vec<&str> = self
            .paragraph
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if !parts.is_empty() {
            self.blocks.push(Block::Paragraph {
                inlines: tokenize_inline(&parts.join(" ")),
            });
        }
        self.paragraph.clear();
    }

    fn flush_list(&mut self) {
        if !self.list.is_empty() {
            let items = self.list.iter().map(|item| tokenize_inline(item)).collect();
            self.blocks.push(Block::List { items });
            self.list.clear();
        }
    }

    fn close_all(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    /// Consume a display-math block that opens on `lines[start]`.
    ///
    /// Returns the index of the last line consumed. Text after the closing
    /// delimiter on that line opens a new paragraph.
    fn capture_math(&mut self, lines: &[&str], start: usize, open: DisplayOpen) -> usize {
        let first = &lines[start][open.at + open.open.len()..];
        let mut parts: Vec<&str> = Vec::new();
        let mut trailing = "";
        let mut i = start;

        if let Some(end) = first.find(open.close) {
            parts.push(&first[..end]);
            trailing = &first[end + open.close.len()..];
        } else {
            parts.push(first);
            loop {
                i += 1;
                let Some(line) = lines.get(i) else {
                    // Unterminated: keep what we have.
                    i = lines.len() - 1;
                    break;
                };
                if let Some(end) = line.find(open.close) {
                    parts.push(&line[..end]);
                    trailing = &line[end + open.close.len()..];
                    break;
                }
                parts.push(line);
            }
        }

        let joined = parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let latex = sanitize(&joined);
        if !latex.is_empty() {
            self.blocks.push(Block::MathBlock { latex });
        }

        let trailing = trailing.trim();
        if !trailing.is_empty() {
            self.paragraph.push(trailing.to_string());
        }
        i
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Inline;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn math_block(s: &str) -> Block {
        Block::MathBlock {
            latex: s.to_string(),
        }
    }

    fn paragraph(s: &str) -> Block {
        Block::Paragraph {
            inlines: vec![text(s)],
        }
    }

    #[test]
    fn test_heading_paragraph_list() {
        let doc = parse_document("### Title\nSome text.\n- item one\n- item two");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 3,
                    inlines: vec![text("Title")],
                },
                paragraph("Some text."),
                Block::List {
                    items: vec![vec![text("item one")], vec![text("item two")]],
                },
            ]
        );
    }

    #[test]
    fn test_level_four_heading() {
        let doc = parse_document("#### Step 2");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 4,
                inlines: vec![text("Step 2")],
            }]
        );
    }

    #[test]
    fn test_unconfigured_heading_levels_are_text() {
        let doc = parse_document("# Big\n##### Tiny\n###NoSpace");
        assert_eq!(doc.blocks, vec![paragraph("# Big ##### Tiny ###NoSpace")]);
    }

    #[test]
    fn test_configured_heading_range() {
        let config = NormalizeConfig::builder().heading_levels(1, 6).build().unwrap();
        let doc = parse_document_with("# Big", &config);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn test_paragraph_lines_join_with_spaces() {
        let doc = parse_document("line one\n  line two  \n\nsecond");
        assert_eq!(
            doc.blocks,
            vec![paragraph("line one line two"), paragraph("second")]
        );
    }

    #[test]
    fn test_text_line_closes_list() {
        let doc = parse_document("* a\n- b\nafter");
        assert_eq!(
            doc.blocks,
            vec![
                Block::List {
                    items: vec![vec![text("a")], vec![text("b")]],
                },
                paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_bullet_closes_paragraph() {
        let doc = parse_document("intro\n- a");
        assert_eq!(doc.len(), 2);
        assert!(matches!(doc.blocks[1], Block::List { .. }));
    }

    #[test]
    fn test_single_line_display_math() {
        let doc = parse_document("\\[x^2 = 4\\]\n$$y = 1$$");
        assert_eq!(doc.blocks, vec![math_block("x^2 = 4"), math_block("y = 1")]);
    }

    #[test]
    fn test_multi_line_display_math() {
        let doc = parse_document("\\[ x^2\n+ 2x\n= 0 \\]");
        assert_eq!(doc.blocks, vec![math_block("x^2 + 2x = 0")]);
    }

    #[test]
    fn test_multi_line_dollar_math() {
        let doc = parse_document("$$\n\\frac{a}{b}\n$$\nafter");
        assert_eq!(
            doc.blocks,
            vec![math_block("\\frac{a}{b}"), paragraph("after")]
        );
    }

    #[test]
    fn test_unterminated_display_math() {
        let doc = parse_document("text\n\\[\nrac{1}{2}\n+ 1");
        assert_eq!(
            doc.blocks,
            vec![paragraph("text"), math_block("\\frac{1}{2} + 1")]
        );
    }

    #[test]
    fn test_text_around_display_math() {
        let doc = parse_document("So \\[x = 1\\] done");
        assert_eq!(
            doc.blocks,
            vec![paragraph("So"), math_block("x = 1"), paragraph("done")]
        );
    }

    #[test]
    fn test_prose_before_display_math_follows_open_list() {
        let doc = parse_document("- a\nso \\[x\\]");
        assert_eq!(
            doc.blocks,
            vec![
                Block::List {
                    items: vec![vec![text("a")]],
                },
                paragraph("so"),
                math_block("x"),
            ]
        );
    }

    #[test]
    fn test_empty_math_block_dropped() {
        let doc = parse_document("\\[ \\]");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_inline_dollar_block_mid_line_is_inline() {
        let doc = parse_document("value $$x$$ here");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                inlines: vec![
                    text("value "),
                    Inline::InlineMath("x".into()),
                    text(" here")
                ],
            }]
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse_document("").is_empty());
        assert!(parse_document("  \n\n \t ").is_empty());
    }

    #[test]
    fn test_presanitize() {
        let config = NormalizeConfig::builder().presanitize(true).build().unwrap();
        let doc = parse_document_with("half is rac{1}{2}", &config);
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                inlines: vec![text("half is "), Inline::InlineMath("\\frac{1}{2}".into())],
            }]
        );
        assert_eq!(
            parse_document("half is rac{1}{2}").blocks,
            vec![paragraph("half is rac{1}{2}")]
        );
    }
}
