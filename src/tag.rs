//! Defines the [`TagIndex`], which groups visible articles by tag.

use crate::article::{Article, HIDDEN_TAG};
use crate::url;
use std::collections::BTreeMap;

const TAG_PAGE_PREFIX: &str = "tag-";

/// Maps each tag onto the visible articles carrying it. Tags are kept in
/// alphabetical order; each tag's articles are kept in the order they were
/// indexed.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    tags: BTreeMap<String, Vec<&'a Article>>,
}

impl<'a> TagIndex<'a> {
    /// Builds the index. `all` is every parsed article (hidden ones included)
    /// and is only used to register tag names, so that tags carried solely by
    /// hidden articles still get an (empty) entry. `visible` are the articles
    /// which are actually indexed. The [`HIDDEN_TAG`] marker itself is never
    /// indexed.
    pub fn new(all: &'a [Article], visible: &[&'a Article]) -> TagIndex<'a> {
        let mut tags: BTreeMap<String, Vec<&'a Article>> = BTreeMap::new();
        for tag in all.iter().flat_map(|a| a.tags.iter()) {
            if tag != HIDDEN_TAG {
                tags.entry(tag.clone()).or_default();
            }
        }
        for &article in visible {
            for tag in &article.tags {
                if let Some(articles) = tags.get_mut(tag) {
                    articles.push(article);
                }
            }
        }
        TagIndex { tags }
    }

    /// The articles carrying `tag`, in index order.
    pub fn articles(&self, tag: &str) -> &[&'a Article] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// The number of visible articles carrying `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.articles(tag).len()
    }

    /// Every indexed tag in alphabetical order, including tags without any
    /// visible articles.
    pub fn tags(&self) -> Vec<&str> {
        self.tags.keys().map(String::as_str).collect()
    }

    /// Tags with at least one visible article, in alphabetical order.
    pub fn visible_tags(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|(_, articles)| !articles.is_empty())
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// The on-disk file name of a tag's page.
pub fn file_name(tag: &str) -> String {
    url::file_name(&format!("{}{}", TAG_PAGE_PREFIX, url::sanitize_for_filename(tag)))
}

/// The link target of a tag's page.
pub fn url(tag: &str) -> String {
    url::url(&format!("{}{}", TAG_PAGE_PREFIX, url::sanitize_for_filename(tag)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::{parse, Result};

    #[test]
    fn test_tag_index() -> Result<()> {
        let articles = parse(
            "@title: one\n@date: 2020-01-01\n@tags: b, a\nbody\n\n\
             @title: two\n@date: 2020-01-02\n@tags: a, hidden, secret\nbody\n\n\
             @title: three\n@date: 2020-01-03\n@tags: a\nbody\n",
        )?;
        let visible: Vec<&Article> = articles.iter().filter(|a| !a.is_hidden()).collect();
        let index = TagIndex::new(&articles, &visible);

        assert_eq!(vec!["a", "b", "secret"], index.tags());
        assert_eq!(vec!["a", "b"], index.visible_tags());
        assert_eq!(
            vec!["one", "three"],
            index.articles("a").iter().map(|a| a.title.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(1, index.count("b"));
        assert_eq!(0, index.count("secret"));
        assert_eq!(0, index.count("hidden"));
        assert_eq!(3, index.len());
        Ok(())
    }

    #[test]
    fn test_tag_page_names() {
        assert_eq!("tag-c#.html", file_name("c#"));
        assert_eq!("tag-c%23.html", url("c#"));
        assert_eq!("tag-web-dev.html", file_name("web dev"));
    }
}
