//! The library code for the `kbgen` knowledge-base generator. It converts a
//! single flat text file of articles into a set of cross-linked static HTML
//! pages. The architecture can be broken down into three steps:
//!
//! 1. Parsing articles from the input file ([`crate::parser`]), rendering each
//!    article's body as it's parsed ([`crate::markdown`])
//! 2. Filtering and validating the articles ([`crate::site`])
//! 3. Building the index, article and tag pages and writing them to disk
//!    ([`crate::write`])
//!
//! The first step is the only one with any real logic: the input format is
//! line-oriented and parsed by a small state machine. The body renderer pulls
//! embedded `<code>` blocks out of the text before handing it to the Markdown
//! converter so that code is highlighted rather than mangled.
//!
//! Any error aborts the whole run; see [`crate::build::build_site`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod build;
pub mod code;
pub mod config;
pub mod html;
pub mod markdown;
pub mod parser;
pub mod site;
pub mod tag;
pub mod url;
pub mod write;
