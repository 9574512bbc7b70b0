//! Converts arbitrary article titles and tag names into file names and URLs.
//! File names are used for the output files on disk while URLs are used in
//! the links between pages; the two differ only in that URLs are
//! percent-encoded.

use ::url::form_urlencoded::byte_serialize;

/// The extension appended to every generated page.
pub const HTML_EXTENSION: &str = ".html";

// Characters which can't (or shouldn't) appear in a file name.
const FILENAME_UNSAFE: &[char] = &[' ', '/', '\\', '"', '\'', '(', ')'];

/// Creates a sane file name stem out of arbitrary text: characters which are
/// invalid in file names are replaced with `-` and the result is lowercased.
pub fn sanitize_for_filename(txt: &str) -> String {
    txt.replace(FILENAME_UNSAFE, "-").to_lowercase()
}

/// Converts arbitrary text into a percent-encoded URL stem. This is
/// [`sanitize_for_filename`] followed by form-style percent encoding.
pub fn to_url(txt: &str) -> String {
    byte_serialize(sanitize_for_filename(txt).as_bytes()).collect()
}

/// The on-disk file name for a page whose stem is derived from `txt`.
pub fn file_name(txt: &str) -> String {
    format!("{}{}", sanitize_for_filename(txt), HTML_EXTENSION)
}

/// The link target for a page whose stem is derived from `txt`.
pub fn url(txt: &str) -> String {
    format!("{}{}", to_url(txt), HTML_EXTENSION)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(
            "how-to-use-c----really--",
            sanitize_for_filename("How to use C/\\ \"really\" "),
        );
        assert_eq!("a-b--c--d-", sanitize_for_filename("A b'(c)\"d\""));
    }

    #[test]
    fn test_sanitize_preserves_other_characters() {
        assert_eq!("c++-&-c#", sanitize_for_filename("C++ & C#"));
    }

    #[test]
    fn test_to_url_percent_encodes() {
        assert_eq!("c%2B%2B-%26-c%23", to_url("C++ & C#"));
        assert_eq!("plain-title", to_url("Plain Title"));
    }

    #[test]
    fn test_file_name_and_url() {
        assert_eq!("what-is-c#.html", file_name("What is C#"));
        assert_eq!("what-is-c%23.html", url("What is C#"));
    }
}
