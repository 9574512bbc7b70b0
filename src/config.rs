use std::path::{Path, PathBuf};

/// The number of articles listed on each index page.
pub const DEFAULT_INDEX_PAGE_SIZE: usize = 25;

/// Everything a build needs to know, threaded explicitly through
/// [`crate::build::build_site`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The knowledge-base file to read.
    pub input_file: PathBuf,

    /// The directory the pages are written to. It's created if it doesn't
    /// exist.
    pub output_directory: PathBuf,

    pub index_page_size: usize,
}

impl Config {
    pub fn new(output_directory: &Path, input_file: &Path) -> Config {
        Config {
            input_file: input_file.to_owned(),
            output_directory: output_directory.to_owned(),
            index_page_size: DEFAULT_INDEX_PAGE_SIZE,
        }
    }
}
