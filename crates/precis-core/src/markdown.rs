//! Markdown-to-prose conversion for summarizer input.
//!
//! Markdown documents carry structure the summarizer should not score: code,
//! headings, tables and frontmatter. [`strip_to_prose`] walks the CommonMark
//! event stream and keeps only the running text.

use camino::Utf8Path;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// File extensions treated as markdown by [`is_markdown_path`].
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// Whether `path` looks like a markdown file, judged by its extension.
pub fn is_markdown_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Strip markdown formatting, returning plain prose text.
///
/// Drops code blocks, inline code, headings, tables, images, raw HTML and
/// YAML frontmatter. Keeps paragraph, list item and blockquote text, link
/// text and emphasized text without its markers. Block boundaries become
/// newlines so the sentence splitter sees them as whitespace.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut prose = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => skip_depth += 1,
            Event::End(
                TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image,
            ) => skip_depth = skip_depth.saturating_sub(1),

            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                end_block(&mut prose);
            }

            // Inline code, raw HTML, footnote refs and rules carry no prose.
            _ => {}
        }
    }

    prose.trim_end().to_string()
}

fn end_block(prose: &mut String) {
    let trimmed = prose.trim_end().len();
    prose.truncate(trimmed);
    if !prose.is_empty() {
        prose.push('\n');
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
