//! Parses the flat knowledge-base file into [`Article`]s. The format looks
//! like this:
//!
//! ```text
//! # comments and blank lines are allowed before the first article
//! @title: Article Title
//! @date: 2020-01-15
//! @tags: tag-one, tag-two
//!
//! Body text in Markdown, possibly with <code python>embedded code</code>.
//!
//! @title: Next Article
//! ...
//! ```
//!
//! An article starts with its attribute lines (`@name: value`). The first line
//! which isn't an attribute starts the body. Within a body, a line starting
//! with `@` starts a new article only if the previous line was blank;
//! otherwise it's ordinary text.

use crate::article::{self, Article, ArticleBuilder};
use crate::markdown::{self, Renderer};
use std::fmt;

const COMMENT_PREFIX: &str = "#";
const ATTRIBUTE_PREFIX: &str = "@";

/// The parser's states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Before the first article. Comments and blank lines are skipped.
    Start,

    /// Reading an article's attribute lines.
    Attributes,

    /// Reading an article's body.
    Text,
}

/// Parses [`Article`]s from the contents of a knowledge-base file. The
/// renderer is borrowed so that every article parsed during a run shares the
/// same code block placeholder counter.
pub struct Parser<'a> {
    renderer: &'a mut Renderer,
    state: State,

    /// Whether the previous line was blank (only whitespace).
    was_prev_blank: bool,

    /// The article being accumulated, with the line it started on.
    current: Option<(usize, ArticleBuilder)>,
    articles: Vec<Article>,
}

impl<'a> Parser<'a> {
    pub fn new(renderer: &'a mut Renderer) -> Parser<'a> {
        Parser {
            renderer,
            state: State::Start,
            was_prev_blank: true,
            current: None,
            articles: Vec::new(),
        }
    }

    /// Parses every article in `input`, in input order. Hidden articles are
    /// included.
    pub fn parse(mut self, input: &str) -> Result<Vec<Article>> {
        for (i, line) in input.lines().enumerate() {
            self.on_line(i + 1, line)?;
        }
        self.finish_article()?;
        Ok(self.articles)
    }

    fn on_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let is_blank = line.trim().is_empty();
        match self.state {
            State::Start => {
                if line.starts_with(COMMENT_PREFIX) || is_blank {
                    // skip
                } else if line.starts_with(ATTRIBUTE_PREFIX) {
                    self.start_article(line_no, line)?;
                } else {
                    return Err(Error::UnexpectedText {
                        line: line_no,
                        text: line.to_owned(),
                    });
                }
            }
            State::Attributes => {
                if line.starts_with(ATTRIBUTE_PREFIX) {
                    self.add_attribute(line_no, line)?;
                } else {
                    self.state = State::Text;
                    self.add_body_line(line);
                }
            }
            State::Text => {
                if line.starts_with(ATTRIBUTE_PREFIX) && self.was_prev_blank {
                    self.finish_article()?;
                    self.start_article(line_no, line)?;
                } else {
                    self.add_body_line(line);
                }
            }
        }
        self.was_prev_blank = is_blank;
        Ok(())
    }

    fn start_article(&mut self, line_no: usize, line: &str) -> Result<()> {
        self.current = Some((line_no, ArticleBuilder::new()));
        self.state = State::Attributes;
        self.add_attribute(line_no, line)
    }

    fn add_attribute(&mut self, line_no: usize, line: &str) -> Result<()> {
        let (name, value) = parse_attribute(line).ok_or_else(|| Error::MalformedAttribute {
            line: line_no,
            text: line.to_owned(),
        })?;
        if let Some((_, builder)) = &mut self.current {
            builder
                .add_attribute(name, value)
                .map_err(|err| Error::Article { line: line_no, err })?;
        }
        Ok(())
    }

    fn add_body_line(&mut self, line: &str) {
        if let Some((_, builder)) = &mut self.current {
            builder.add_body_line(line);
        }
    }

    fn finish_article(&mut self) -> Result<()> {
        if let Some((line, builder)) = self.current.take() {
            let article = builder
                .finish(self.renderer)
                .map_err(|err| Error::Render { line, err })?;
            self.articles.push(article);
        }
        Ok(())
    }
}

/// Splits an `@name: value` line on the first `:` into a trimmed
/// `(name, value)` pair. Returns `None` if there's no `:`.
fn parse_attribute(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_prefix(ATTRIBUTE_PREFIX)?;
    let colon = line.find(':')?;
    Some((line[..colon].trim(), line[colon + 1..].trim()))
}

/// Parses `input` with a fresh [`Renderer`].
pub fn parse(input: &str) -> Result<Vec<Article>> {
    Parser::new(&mut Renderer::new()).parse(input)
}

/// Represents the result of an [`Article`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing the input file. Every variant carries the
/// (1-based) number of the offending line, or the first line of the
/// offending article.
#[derive(Debug)]
pub enum Error {
    /// Returned for non-blank, non-comment text before the first article.
    UnexpectedText { line: usize, text: String },

    /// Returned for attribute lines without a `:`.
    MalformedAttribute { line: usize, text: String },

    /// Returned for unknown or duplicate attributes.
    Article { line: usize, err: article::Error },

    /// Returned when an article's body can't be rendered.
    Render { line: usize, err: markdown::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedText { line, text } => write!(
                f,
                "line {}: unexpected text before first article: `{}`",
                line, text
            ),
            Error::MalformedAttribute { line, text } => write!(
                f,
                "line {}: malformed attribute (wanted `@name: value`): `{}`",
                line, text
            ),
            Error::Article { line, err } => write!(f, "line {}: {}", line, err),
            Error::Render { line, err } => {
                write!(f, "article starting at line {}: {}", line, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnexpectedText { .. } => None,
            Error::MalformedAttribute { .. } => None,
            Error::Article { line: _, err } => Some(err),
            Error::Render { line: _, err } => Some(err),
        }
    }
}
