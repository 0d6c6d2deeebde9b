//! Markdown renderer for content bodies.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from first H1 heading (if extraction was enabled).
    pub title: Option<String>,
}

/// Markdown to HTML renderer for content bodies.
///
/// Wraps a `pulldown-cmark` parser with GFM extensions enabled by default
/// and optional title extraction from the first H1 heading.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
    extract_title: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: false,
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered; only its text is lifted into
    /// [`RenderResult::title`].
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.parser_options()).collect();

        let title = if self.extract_title {
            first_h1_text(&events)
        } else {
            None
        };

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());

        RenderResult { html: out, title }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the plain text of the first H1 heading, if any.
fn first_h1_text(events: &[Event<'_>]) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_h1 => {
                let title = text.trim();
                return (!title.is_empty()).then(|| title.to_owned());
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(t),
            _ => {}
        }
    }

    None
}
