//! Builds the HTML pages for a [`Site`] and writes them to disk. There are
//! three kinds of pages:
//!
//! 1. Index pages, listing every visible article by publish date, most recent
//!    first, [`Writer::index_page_size`] articles per page. The first page is
//!    `index.html` and subsequent pages are `index-1.html`, `index-2.html`,
//!    etc.
//! 2. Article pages, one per visible article, named after the article's
//!    [`Article::file_name`].
//! 3. Tag pages, one per tag (`tag-{tag}.html`), listing the articles carrying
//!    the tag.
//!
//! Building pages is pure (see [`pages`]); only [`Writer::write_site`]
//! touches the file system.

use crate::article::Article;
use crate::html;
use crate::site::{Site, INDEX_FILE_NAME};
use crate::tag;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const INDEX_TITLE: &str = "Index of all articles";

/// An output HTML file.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// The file name relative to the output directory.
    pub file_name: String,

    pub html: String,
}

/// Responsible for writing a [`Site`]'s pages to disk.
pub struct Writer<'a> {
    /// The directory in which all pages are written. It must already exist.
    pub output_directory: &'a Path,

    /// The number of articles per index page.
    pub index_page_size: usize,
}

impl Writer<'_> {
    /// Writes a single [`Page`] to disk, overwriting any existing file.
    fn write_page(&self, page: &Page) -> Result<()> {
        let path = self.output_directory.join(&page.file_name);
        debug!(path = %path.display(), "writing page");
        std::fs::write(&path, &page.html).map_err(|err| Error::Io { path, err })
    }

    /// Builds and writes every page for `site`. Returns the number of pages
    /// written. Pages are written one at a time, so a failure can leave some
    /// of them on disk.
    pub fn write_site(&self, site: &Site) -> Result<usize> {
        let pages = pages(site, self.index_page_size);
        for page in &pages {
            self.write_page(page)?;
        }
        Ok(pages.len())
    }
}

/// Creates all of the index, article and tag [`Page`]s for `site`.
pub fn pages(site: &Site, index_page_size: usize) -> Vec<Page> {
    let mut pages = index_pages(site, index_page_size);
    pages.extend(site.articles.iter().map(|a| article_page(site, a)));
    pages.extend(site.tags.tags().into_iter().map(|t| tag_page(site, t)));
    pages
}

/// The file name (and URL) of the `n`th index page.
pub fn index_file_name(n: usize) -> String {
    match n {
        0 => String::from(INDEX_FILE_NAME),
        _ => format!("index-{}.html", n),
    }
}

/// The number of index pages needed for `articles` articles.
pub fn index_page_count(articles: usize, index_page_size: usize) -> usize {
    (articles + index_page_size - 1) / index_page_size
}

/// Creates the index [`Page`]s. No pages are created if there are no
/// visible articles.
fn index_pages(site: &Site, index_page_size: usize) -> Vec<Page> {
    let total_pages = index_page_count(site.articles.len(), index_page_size);
    let all_tags = tags_nav(site, &site.tags.visible_tags(), None);

    site.articles
        .chunks(index_page_size)
        .enumerate()
        .map(|(i, chunk)| {
            let first = i * index_page_size + 1;
            let last = first + chunk.len() - 1;

            let mut lines = vec![
                html::header(INDEX_TITLE, site.last_updated(), false),
                all_tags.clone(),
                String::from(r#"<div id="kb">"#),
                format!("<p>Recent articles ({} - {}):</p>", first, last),
                article_list(chunk),
            ];
            if total_pages > 1 {
                lines.push(pagination(i, total_pages));
            }
            lines.push(String::from("</div>"));
            lines.push(all_tags.clone());
            lines.push(String::from("<p> </p>"));
            lines.push(String::from(html::footer()));

            Page {
                file_name: index_file_name(i),
                html: lines.join("\n"),
            }
        })
        .collect()
}

/// The previous/next links for the `i`th of `total_pages` index pages. At the
/// boundaries the text is shown without a link.
fn pagination(i: usize, total_pages: usize) -> String {
    let prev = match i {
        0 => String::from("previous"),
        _ => html::link(&index_file_name(i - 1), "previous"),
    };
    let next = match i + 1 < total_pages {
        true => html::link(&index_file_name(i + 1), "next"),
        false => String::from("next"),
    };
    format!("<p/><center>\n{}\n &deg; \n{}\n</center>", prev, next)
}

/// Creates an article's page.
fn article_page(site: &Site, article: &Article) -> Page {
    let tags = tags_nav(site, &article.sorted_tags(), None);
    let lines = vec![
        html::header(&article.title, article.publish_date(), article.has_code),
        tags.clone(),
        String::from(r#"<div id="kb">"#),
        format!(
            r#"<p><center><font size="+1"><b>{}</b></font></center></p>"#,
            html::escape(&article.title)
        ),
        article.html.clone(),
        String::from("</div>"),
        tags,
        String::from("<p> </p>"),
        String::from(html::footer()),
    ];
    Page {
        file_name: article.file_name.clone(),
        html: lines.join("\n"),
    }
}

/// Creates a tag's page. The page lists the tag's articles by publish date,
/// most recent first; a tag without visible articles gets an empty list.
fn tag_page(site: &Site, tag: &str) -> Page {
    let mut articles = site.tags.articles(tag).to_vec();
    articles.sort_by(|a, b| b.publish_date().cmp(a.publish_date()));

    let mut nav_tags = site.tags.visible_tags();
    if let Err(i) = nav_tags.binary_search(&tag) {
        nav_tags.insert(i, tag);
    }
    let tags = tags_nav(site, &nav_tags, Some(tag));

    let lines = vec![
        html::header(
            &format!("Articles tagged with {}", tag),
            site.last_updated(),
            false,
        ),
        tags.clone(),
        String::from(r#"<div id="kb">"#),
        format!(
            "<p>Articles tagged with <b>{}</b> tag:</p>",
            html::escape(tag)
        ),
        article_list(&articles),
        String::from("</div>"),
        tags,
        String::from("<p> </p>"),
        String::from(html::footer()),
    ];
    Page {
        file_name: tag::file_name(tag),
        html: lines.join("\n"),
    }
}

/// Renders a list of article links with their publish dates.
fn article_list(articles: &[&Article]) -> String {
    let mut lines = vec![String::from("<ul>")];
    lines.extend(articles.iter().map(|a| {
        format!(
            "<li>{} {}</li>",
            html::link(&a.url, &html::escape(&a.title)),
            html::small(&html::gray(&format!("({})", a.publish_date())))
        )
    }));
    lines.push(String::from("</ul>"));
    lines.join("\n")
}

/// Renders the tag navigation bar: each tag with its number of visible
/// articles. `unlinked` (the current tag on a tag page) is shown without a
/// link.
fn tags_nav(site: &Site, tags: &[&str], unlinked: Option<&str>) -> String {
    let mut lines = vec![String::from(r#"<div class="tags">"#), String::from("Tags: ")];
    lines.extend(tags.iter().map(|&t| {
        let count = html::gray(&format!(" ({}) ", site.tags.count(t)));
        match unlinked == Some(t) {
            true => format!(" {}{}", html::escape(t), count),
            false => format!("{}{}", html::link(&tag::url(t), &html::escape(t)), count),
        }
    }));
    lines.push(String::from("</div>"));
    lines.join("\n")
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error writing an output file.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "writing `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
        }
    }
}
