//! Turns the parsed articles into a [`Site`]: the validated, visible articles
//! in publish order plus the tag index. Everything which can reject the input
//! happens here, before any page is written.

use crate::article::{self, Article};
use crate::tag::{self, TagIndex};
use std::collections::HashMap;
use std::fmt;

/// The file name of the first index page.
pub const INDEX_FILE_NAME: &str = "index.html";

/// The validated, visible articles of a knowledge base.
#[derive(Debug)]
pub struct Site<'a> {
    /// Visible articles sorted by publish date, most recent first. Articles
    /// with the same publish date keep their input order.
    pub articles: Vec<&'a Article>,

    /// Visible articles grouped by tag, in input order.
    pub tags: TagIndex<'a>,

    /// The number of parsed articles, hidden ones included.
    pub total: usize,

    /// The number of hidden articles.
    pub hidden: usize,
}

impl<'a> Site<'a> {
    /// Filters out hidden articles, validates the rest, and checks that no two
    /// pages would be written to the same file.
    pub fn new(all: &'a [Article]) -> Result<Site<'a>> {
        let visible: Vec<&'a Article> = all.iter().filter(|a| !a.is_hidden()).collect();

        for article in &visible {
            article.validate().map_err(|err| Error::Invalid {
                title: article.title.clone(),
                err,
            })?;
        }
        check_unique(&visible)?;

        let tags = TagIndex::new(all, &visible);
        check_tags_unique(&tags)?;
        check_reserved(&visible, &tags)?;

        let mut articles = visible;
        articles.sort_by(|a, b| b.publish_date().cmp(a.publish_date()));

        Ok(Site {
            total: all.len(),
            hidden: all.len() - articles.len(),
            articles,
            tags,
        })
    }

    /// The most recent publish date, used as the creation date of the listing
    /// pages. Deriving it from the input keeps the output reproducible.
    pub fn last_updated(&self) -> &'a str {
        self.articles
            .first()
            .copied()
            .map(Article::publish_date)
            .unwrap_or_default()
    }
}

// The url is the percent-encoded file name, so equal file names always mean
// equal urls and the url check covers both.
fn check_unique(articles: &[&Article]) -> Result<()> {
    let mut urls: HashMap<&str, &str> = HashMap::new();
    for article in articles {
        if let Some(first) = urls.insert(&article.url, &article.title) {
            return Err(Error::DuplicateUrl {
                url: article.url.clone(),
                first: first.to_owned(),
                second: article.title.clone(),
            });
        }
    }
    Ok(())
}

fn check_tags_unique(tags: &TagIndex) -> Result<()> {
    let mut file_names: HashMap<String, &str> = HashMap::new();
    for tag in tags.tags() {
        let file_name = tag::file_name(tag);
        if let Some(first) = file_names.get(&file_name) {
            return Err(Error::DuplicateTagFileName {
                file_name,
                first: (*first).to_owned(),
                second: tag.to_owned(),
            });
        }
        file_names.insert(file_name, tag);
    }
    Ok(())
}

// Article pages share the output directory with the index and tag pages.
fn check_reserved(articles: &[&Article], tags: &TagIndex) -> Result<()> {
    let tag_file_names: Vec<String> = tags.tags().into_iter().map(tag::file_name).collect();
    for article in articles {
        if is_index_file_name(&article.file_name) || tag_file_names.contains(&article.file_name) {
            return Err(Error::ReservedFileName {
                file_name: article.file_name.clone(),
                title: article.title.clone(),
            });
        }
    }
    Ok(())
}

/// Returns whether `file_name` has the shape of an index page name
/// (`index.html` or `index-<n>.html`).
pub fn is_index_file_name(file_name: &str) -> bool {
    if file_name == INDEX_FILE_NAME {
        return true;
    }
    match file_name
        .strip_prefix("index-")
        .and_then(|rest| rest.strip_suffix(".html"))
    {
        Some(n) => !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// The result of a fallible site operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an article set which can't be turned into a site.
#[derive(Debug)]
pub enum Error {
    /// Returned when a visible article fails validation.
    Invalid { title: String, err: article::Error },

    /// Returned when two visible articles' titles map onto the same URL.
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },

    /// Returned when two tags map onto the same tag page.
    DuplicateTagFileName {
        file_name: String,
        first: String,
        second: String,
    },

    /// Returned when an article's file would overwrite an index or tag page.
    ReservedFileName { file_name: String, title: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Invalid { title, err } => {
                write!(f, "invalid article `{}`: {}", title, err)
            }
            Error::DuplicateUrl { url, first, second } => write!(
                f,
                "titles `{}` and `{}` create a duplicate url `{}`",
                first, second, url
            ),
            Error::DuplicateTagFileName {
                file_name,
                first,
                second,
            } => write!(
                f,
                "tags `{}` and `{}` create a duplicate tag page `{}`",
                first, second, file_name
            ),
            Error::ReservedFileName { file_name, title } => write!(
                f,
                "title `{}` creates file name `{}` which is used by a generated page",
                title, file_name
            ),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Invalid { title: _, err } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn article(title: &str, date: &str, tags: &str) -> String {
        format!("@title: {}\n@date: {}\n@tags: {}\nbody of {}\n\n", title, date, tags, title)
    }

    fn titles<'a>(articles: &[&'a Article]) -> Vec<&'a str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_publish_date_stable() -> TestResult {
        let input = [
            article("old", "2019-05-01", "x"),
            article("tie one", "2020-01-01 2018-01-01", "x"),
            article("new", "2021-01-01", "x"),
            article("tie two", "2020-01-01", "x"),
        ]
        .concat();
        let articles = parse(&input)?;
        let site = Site::new(&articles)?;
        assert_eq!(vec!["new", "tie one", "tie two", "old"], titles(&site.articles));
        assert_eq!("2021-01-01", site.last_updated());
        Ok(())
    }

    #[test]
    fn test_hidden_articles_are_filtered() -> TestResult {
        let input = [
            article("shown", "2020-01-01", "x"),
            article("draft", "2020-02-01", "hidden, x, drafts"),
        ]
        .concat();
        let articles = parse(&input)?;
        let site = Site::new(&articles)?;
        assert_eq!(vec!["shown"], titles(&site.articles));
        assert_eq!(vec!["shown"], titles(site.tags.articles("x")));
        assert_eq!(0, site.tags.count("drafts"));
        assert_eq!(2, site.total);
        assert_eq!(1, site.hidden);
        Ok(())
    }

    #[test]
    fn test_hidden_articles_are_not_validated() -> TestResult {
        let input = [
            article("shown", "2020-01-01", "x"),
            article("draft", "someday", "hidden"),
        ]
        .concat();
        let articles = parse(&input)?;
        assert!(Site::new(&articles).is_ok());
        Ok(())
    }

    #[test]
    fn test_invalid_article() -> TestResult {
        let articles = parse(&article("bad", "2020-1-1", "x"))?;
        match Site::new(&articles) {
            Err(Error::Invalid { title, err }) => {
                assert_eq!("bad", title);
                assert_eq!(article::Error::MalformedDate(String::from("2020-1-1")), err);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_url() -> TestResult {
        let input = [
            article("Same Title", "2020-01-01", "x"),
            article("same title", "2020-01-02", "y"),
        ]
        .concat();
        let articles = parse(&input)?;
        match Site::new(&articles) {
            Err(Error::DuplicateUrl { url, first, second }) => {
                assert_eq!("same-title.html", url);
                assert_eq!("Same Title", first);
                assert_eq!("same title", second);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_url_ignores_hidden() -> TestResult {
        let input = [
            article("Same Title", "2020-01-01", "x"),
            article("same title", "2020-01-02", "hidden"),
        ]
        .concat();
        let articles = parse(&input)?;
        assert!(Site::new(&articles).is_ok());
        Ok(())
    }

    #[test]
    fn test_duplicate_tag_file_name() -> TestResult {
        let input = [
            article("first", "2020-01-01", "a b"),
            article("second", "2020-01-02", "a/b"),
        ]
        .concat();
        let articles = parse(&input)?;
        match Site::new(&articles) {
            Err(Error::DuplicateTagFileName {
                file_name,
                first,
                second,
            }) => {
                assert_eq!("tag-a-b.html", file_name);
                assert_eq!("a b", first);
                assert_eq!("a/b", second);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_tag_file_name_from_hidden_article() -> TestResult {
        let input = [
            article("first", "2020-01-01", "a b"),
            article("draft", "2020-01-02", "hidden, a/b"),
        ]
        .concat();
        let articles = parse(&input)?;
        assert!(matches!(
            Site::new(&articles),
            Err(Error::DuplicateTagFileName { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_attribute_only_article_at_end_of_input() -> TestResult {
        let shown = article("shown", "2020-01-01", "x");

        let articles = parse(&format!("{}@title: Draft\n@tags: hidden\n", shown))?;
        let site = Site::new(&articles)?;
        assert_eq!(vec!["shown"], titles(&site.articles));
        assert_eq!(1, site.hidden);

        let articles = parse(&format!("{}@title: Stub\n@date: 2020-02-01\n@tags: x\n", shown))?;
        match Site::new(&articles) {
            Err(Error::Invalid { title, err }) => {
                assert_eq!("Stub", title);
                assert_eq!(article::Error::EmptyBody, err);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_reserved_file_name() -> TestResult {
        for title in &["Index", "index 2", "Tag X"] {
            let input = [
                article("first", "2020-01-01", "x"),
                article(title, "2020-01-02", "y"),
            ]
            .concat();
            let articles = parse(&input)?;
            assert!(matches!(
                Site::new(&articles),
                Err(Error::ReservedFileName { .. })
            ));
        }
        Ok(())
    }

    #[test]
    fn test_is_index_file_name() {
        assert!(is_index_file_name("index.html"));
        assert!(is_index_file_name("index-12.html"));
        assert!(!is_index_file_name("index-.html"));
        assert!(!is_index_file_name("index-of-things.html"));
        assert!(!is_index_file_name("indexes.html"));
    }
}
