//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the knowledge base: parsing the input file
//! ([`crate::parser`]), validating the articles ([`crate::site`]) and writing
//! the pages ([`crate::write`]).

use crate::config::Config;
use crate::markdown::Renderer;
use crate::parser::{Error as ParseError, Parser};
use crate::site::{Error as SiteError, Site};
use crate::write::{Error as WriteError, Writer};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a successful build produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// The number of parsed articles, hidden ones included.
    pub articles: usize,

    pub hidden: usize,

    /// The number of tags (one tag page each).
    pub tags: usize,

    pub pages: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Number of articles: {} (hidden: {})",
            self.articles, self.hidden
        )?;
        write!(f, "Number of tags: {}", self.tags)
    }
}

/// Builds the site from a [`Config`] object. Nothing is written unless the
/// whole input parses and validates; the output directory is created at that
/// point if it doesn't exist. Existing files in it are overwritten.
pub fn build_site(config: &Config) -> Result<Summary> {
    let input = std::fs::read_to_string(&config.input_file).map_err(|err| Error::Read {
        path: config.input_file.clone(),
        err,
    })?;

    let mut renderer = Renderer::new();
    let articles = Parser::new(&mut renderer).parse(&input)?;
    let site = Site::new(&articles)?;
    info!(
        articles = site.total,
        hidden = site.hidden,
        tags = site.tags.len(),
        "parsed articles"
    );

    create_dir(&config.output_directory)?;
    let writer = Writer {
        output_directory: &config.output_directory,
        index_page_size: config.index_page_size,
    };
    let pages = writer.write_site(&site)?;
    info!(pages, directory = %config.output_directory.display(), "wrote pages");

    Ok(Summary {
        articles: site.total,
        hidden: site.hidden,
        tags: site.tags.len(),
        pages,
    })
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::CreateDir {
        path: dir.to_owned(),
        err,
    })
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during reading the
/// input, parsing, validating, or writing.
#[derive(Debug)]
pub enum Error {
    /// Returned when the input file can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned for malformed input.
    Parse(ParseError),

    /// Returned for articles which fail validation.
    Site(SiteError),

    /// Returned when the output directory can't be created.
    CreateDir { path: PathBuf, err: std::io::Error },

    /// Returned for errors writing pages.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Reading input file '{}': {}", path.display(), err)
            }
            Error::Parse(err) => err.fmt(f),
            Error::Site(err) => err.fmt(f),
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::Parse(err) => std::error::Error::source(err),
            Error::Site(err) => std::error::Error::source(err),
            Error::CreateDir { path: _, err } => Some(err),
            Error::Write(err) => std::error::Error::source(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<SiteError> for Error {
    /// Converts [`SiteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: SiteError) -> Error {
        Error::Site(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
