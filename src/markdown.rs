//! Renders article bodies to HTML. Embedded code blocks are pulled out before
//! the Markdown conversion and put back afterwards (see [`crate::code`]).

use crate::code::{self, Extractor};
use pulldown_cmark::{html, Options, Parser};
use std::fmt;
use std::io;

/// The HTML for an article body.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub html: String,

    /// Whether any code blocks were found in the source. Pages containing
    /// code need the syntax-highlighting assets.
    pub has_code: bool,
}

/// Converts markup text (Markdown with embedded `<code>` blocks) into HTML.
/// A single renderer should be used for a whole run so that code block
/// placeholder tokens are never reused.
#[derive(Debug, Default)]
pub struct Renderer {
    extractor: Extractor,
}

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }

    pub fn render(&mut self, txt: &str) -> Result<Rendered> {
        let extracted = self.extractor.extract(txt);
        let html = to_html(&extracted.text)?;
        Ok(Rendered {
            html: code::substitute(&html, &extracted.placeholders),
            has_code: !extracted.placeholders.is_empty(),
        })
    }
}

/// Converts Markdown to HTML.
pub fn to_html(markdown: &str) -> Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let annotate = |err: io::Error| Error::Markdown {
        text: excerpt(markdown),
        err,
    };

    let mut out: Vec<u8> = Vec::with_capacity(markdown.len() * 3 / 2);
    html::write_html(&mut out, Parser::new_ext(markdown, options)).map_err(annotate)?;
    String::from_utf8(out)
        .map_err(|e| annotate(io::Error::new(io::ErrorKind::InvalidData, e)))
}

// The offending text is reported back to the user; keep it readable.
fn excerpt(txt: &str) -> String {
    const MAX_CHARS: usize = 200;
    match txt.char_indices().nth(MAX_CHARS) {
        Some((i, _)) => format!("{}...", &txt[..i]),
        None => txt.to_owned(),
    }
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error converting markup to HTML.
#[derive(Debug)]
pub enum Error {
    /// Returned when the Markdown conversion fails. `text` is (an excerpt
    /// of) the input that was being converted.
    Markdown { text: String, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Markdown { text, err } => {
                write!(f, "converting markdown `{}`: {}", text, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Markdown { text: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_plain_markdown() -> Result<()> {
        let rendered = Renderer::new().render("Hello, *world*")?;
        assert_eq!("<p>Hello, <em>world</em></p>\n", rendered.html);
        assert!(!rendered.has_code);
        Ok(())
    }

    #[test]
    fn test_render_code_block_survives_markdown() -> Result<()> {
        let rendered = Renderer::new()
            .render("Run this:\n\n<code python>print(my_var_name < 2 and _x_)</code>\n\nDone.")?;
        assert!(rendered.has_code);
        assert!(rendered.html.contains(
            "<pre class=\"prettyprint lang-py\">\nprint(my_var_name &lt; 2 and _x_)</pre>"
        ));
        assert!(!rendered.html.contains("<em>"));
        assert!(!rendered.html.contains("KBCODEBLOCK"));
        Ok(())
    }

    #[test]
    fn test_render_identical_blocks() -> Result<()> {
        let rendered = Renderer::new().render("<code>a</code>\n\n<code>a</code>")?;
        assert_eq!(
            2,
            rendered
                .html
                .matches("<pre class=\"prettyprint\">\na</pre>")
                .count()
        );
        Ok(())
    }

    #[test]
    fn test_excerpt() {
        assert_eq!("short", excerpt("short"));
        let long = "x".repeat(300);
        assert_eq!(format!("{}...", "x".repeat(200)), excerpt(&long));
    }
}
