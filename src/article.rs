//! Defines the [`Article`] type and the [`ArticleBuilder`] which accumulates
//! an article's attributes and body lines while the input is being parsed.

use crate::markdown::{Renderer, Result as RenderResult};
use crate::url;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The tag which marks an article as hidden (a draft). Hidden articles are
/// parsed but never written out.
pub const HIDDEN_TAG: &str = "hidden";

/// The recognized article attributes (`@title:`, `@date:`, `@tags:`).
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Attribute {
    Title,
    Date,
    Tags,
}

impl FromStr for Attribute {
    type Err = Error;

    /// Parses an attribute name. Names are case-insensitive.
    fn from_str(s: &str) -> Result<Attribute> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Attribute::Title),
            "date" => Ok(Attribute::Date),
            "tags" => Ok(Attribute::Tags),
            _ => Err(Error::UnknownAttribute(s.to_owned())),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Attribute::Title => "title",
            Attribute::Date => "date",
            Attribute::Tags => "tags",
        })
    }
}

/// A single knowledge-base entry. Articles are immutable once built; see
/// [`ArticleBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    /// The raw (trimmed) attribute values as they appeared in the input.
    pub attributes: HashMap<Attribute, String>,

    pub title: String,

    /// The article's dates. The first one is the publish date.
    pub dates: Vec<String>,

    /// Lowercase tag names in the order they were listed.
    pub tags: Vec<String>,

    /// The raw markup, trimmed.
    pub body: String,

    /// The rendered body.
    pub html: String,

    /// Whether the body contains any code blocks.
    pub has_code: bool,

    /// The link target for the article's page.
    pub url: String,

    /// The article page's file name in the output directory.
    pub file_name: String,
}

impl Article {
    /// The date used for sorting and display. Empty only for articles which
    /// would fail [`Article::validate`].
    pub fn publish_date(&self) -> &str {
        self.dates.first().map(String::as_str).unwrap_or_default()
    }

    pub fn is_hidden(&self) -> bool {
        self.tags.iter().any(|t| t == HIDDEN_TAG)
    }

    /// Tags in alphabetical order, for display.
    pub fn sorted_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Checks that the article is complete: it has a non-empty title, at
    /// least one date and all dates are `YYYY-MM-DD`, at least one tag, and a
    /// non-empty body.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(Error::MissingTitle);
        }
        if self.dates.is_empty() {
            return Err(Error::MissingDates);
        }
        if let Some(date) = self.dates.iter().find(|d| !is_valid_date(d)) {
            return Err(Error::MalformedDate(date.clone()));
        }
        if self.tags.is_empty() {
            return Err(Error::MissingTags);
        }
        if self.body.is_empty() {
            return Err(Error::EmptyBody);
        }
        Ok(())
    }
}

/// Returns whether `date` matches `YYYY-MM-DD` literally (digits and dashes
/// in the right places). Dates in this format sort correctly as strings.
pub fn is_valid_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Accumulates an article while it's being parsed: attributes first, then
/// body lines. [`ArticleBuilder::finish`] renders the body and produces the
/// final [`Article`].
#[derive(Debug, Default)]
pub struct ArticleBuilder {
    attributes: HashMap<Attribute, String>,
    title: String,
    dates: Vec<String>,
    tags: Vec<String>,
    url: String,
    file_name: String,
    body_lines: Vec<String>,
}

impl ArticleBuilder {
    pub fn new() -> ArticleBuilder {
        ArticleBuilder::default()
    }

    /// Adds an attribute. `name` is matched case-insensitively against the
    /// recognized attributes and each attribute may only be set once.
    pub fn add_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let attribute: Attribute = name.parse()?;
        if self.attributes.contains_key(&attribute) {
            return Err(Error::DuplicateAttribute(attribute));
        }

        let value = value.trim();
        match attribute {
            Attribute::Title => {
                self.title = value.to_owned();
                self.url = url::url(value);
                self.file_name = url::file_name(value);
            }
            Attribute::Date => {
                self.dates = value.split_whitespace().map(str::to_owned).collect();
            }
            Attribute::Tags => {
                self.tags = value
                    .split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
            }
        }
        self.attributes.insert(attribute, value.to_owned());
        Ok(())
    }

    pub fn add_body_line(&mut self, line: &str) {
        self.body_lines.push(line.to_owned());
    }

    /// Trims and renders the body and returns the finished article.
    pub fn finish(self, renderer: &mut Renderer) -> RenderResult<Article> {
        let body = self.body_lines.join("\n").trim().to_owned();
        let rendered = renderer.render(&body)?;
        Ok(Article {
            attributes: self.attributes,
            title: self.title,
            dates: self.dates,
            tags: self.tags,
            body,
            html: rendered.html,
            has_code: rendered.has_code,
            url: self.url,
            file_name: self.file_name,
        })
    }
}

/// The result of a fallible article operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem with an article's attributes or contents.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned for attribute names other than `title`, `date` and `tags`.
    UnknownAttribute(String),

    /// Returned when an attribute is given twice for the same article.
    DuplicateAttribute(Attribute),

    /// Returned when the article has no title.
    MissingTitle,

    /// Returned when the article has no dates.
    MissingDates,

    /// Returned when a date isn't in `YYYY-MM-DD` format.
    MalformedDate(String),

    /// Returned when the article has no tags.
    MissingTags,

    /// Returned when the article's body is empty.
    EmptyBody,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownAttribute(name) => {
                write!(f, "unknown attribute `{}`", name)
            }
            Error::DuplicateAttribute(attribute) => {
                write!(f, "duplicate attribute `{}`", attribute)
            }
            Error::MissingTitle => write!(f, "missing title"),
            Error::MissingDates => write!(f, "missing date"),
            Error::MalformedDate(date) => {
                write!(f, "malformed date `{}` (wanted YYYY-MM-DD)", date)
            }
            Error::MissingTags => write!(f, "missing tags"),
            Error::EmptyBody => write!(f, "empty body"),
        }
    }
}

impl std::error::Error for Error {}
