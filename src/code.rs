//! Handles the embedded `<code [language]>...</code>` blocks in article
//! bodies. The Markdown pass would mangle source code (underscores become
//! emphasis, indentation becomes nested blocks, etc), so rendering happens in
//! two passes: [`Extractor::extract`] swaps each code block for an opaque
//! placeholder token and renders the block separately, and after the Markdown
//! conversion [`substitute`] puts the rendered blocks back.

const CODE_OPEN: &str = "<code";
const CODE_CLOSE: &str = "</code>";

/// The highlighting class applied to every code block. Blocks with a
/// recognized language also get a `lang-*` class.
const HIGHLIGHT_CLASS: &str = "prettyprint";

/// A rendered code block and the token standing in for it in the text given
/// to the Markdown pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub token: String,
    pub html: String,
}

/// The result of the extraction pass.
#[derive(Debug, PartialEq)]
pub struct Extracted {
    /// The input with every code block replaced by its token.
    pub text: String,

    /// The rendered code blocks, in the order they appeared in the input.
    pub placeholders: Vec<Placeholder>,
}

/// Extracts code blocks from markup text. The extractor owns a counter which
/// increases monotonically over its lifetime, so tokens are unique for every
/// code block processed by the same extractor regardless of content.
#[derive(Debug, Default)]
pub struct Extractor {
    next_token: usize,
}

impl Extractor {
    pub fn new() -> Extractor {
        Extractor::default()
    }

    fn token(&mut self) -> String {
        // Alphanumeric only so that Markdown leaves it alone, and terminated
        // so that no token is a prefix of another.
        let token = format!("KBCODEBLOCK{}END", self.next_token);
        self.next_token += 1;
        token
    }

    /// Replaces every `<code [language]>...</code>` span in `txt` with a
    /// placeholder token. Blocks are not nested: the inner text runs up to the
    /// first `</code>`. Scanning stops at the first opening marker which has
    /// no closing `>` or no `</code>`; the remainder is left as-is.
    pub fn extract(&mut self, txt: &str) -> Extracted {
        let mut text = String::with_capacity(txt.len());
        let mut placeholders = Vec::new();
        let mut rest = txt;

        while let Some(code_start) = rest.find(CODE_OPEN) {
            let lang_start = code_start + CODE_OPEN.len();
            let lang_end = match rest[lang_start..].find('>') {
                Some(offset) => lang_start + offset,
                None => break,
            };
            let code_end = match rest[lang_end + 1..].find(CODE_CLOSE) {
                Some(offset) => lang_end + 1 + offset,
                None => break,
            };

            let lang = rest[lang_start..lang_end].trim();
            let code = rest[lang_end + 1..code_end].trim();
            let token = self.token();

            text.push_str(&rest[..code_start]);
            text.push_str(&token);
            placeholders.push(Placeholder {
                token,
                html: code_to_html(code, lang),
            });
            rest = &rest[code_end + CODE_CLOSE.len()..];
        }

        text.push_str(rest);
        Extracted { text, placeholders }
    }
}

/// Replaces each placeholder token in `html` with its rendered code block.
pub fn substitute(html: &str, placeholders: &[Placeholder]) -> String {
    placeholders
        .iter()
        .fold(html.to_owned(), |html, p| html.replace(&p.token, &p.html))
}

/// Maps a language hint onto the highlighter's language name. Returns `None`
/// for unrecognized hints.
pub fn highlight_lang(lang: &str) -> Option<&'static str> {
    match lang.to_lowercase().as_str() {
        "c" => Some("c"),
        "c++" => Some("cc"),
        "cpp" => Some("cpp"),
        "python" => Some("py"),
        "html" => Some("html"),
        "xml" => Some("xml"),
        "perl" => Some("pl"),
        "c#" => Some("cs"),
        "javascript" => Some("js"),
        "java" => Some("java"),
        _ => None,
    }
}

/// Escapes `&`, `<` and `>`. `&` goes first so the entities introduced for
/// the other two aren't escaped again.
pub fn escape_code(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a code block as a preformatted block carrying the highlighting
/// classes for `lang`.
pub fn code_to_html(code: &str, lang: &str) -> String {
    match highlight_lang(lang) {
        Some(lang) => format!(
            "<pre class=\"{} lang-{}\">\n{}</pre>",
            HIGHLIGHT_CLASS,
            lang,
            escape_code(code)
        ),
        None => format!(
            "<pre class=\"{}\">\n{}</pre>",
            HIGHLIGHT_CLASS,
            escape_code(code)
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape_code_ampersand_first() {
        assert_eq!("a &amp;&lt;b&gt; &amp;lt;", escape_code("a &<b> &lt;"));
    }

    #[test]
    fn test_highlight_lang() {
        assert_eq!(Some("py"), highlight_lang("python"));
        assert_eq!(Some("cc"), highlight_lang("c++"));
        assert_eq!(Some("cs"), highlight_lang("C#"));
        assert_eq!(Some("js"), highlight_lang("javascript"));
        assert_eq!(None, highlight_lang("cobol"));
        assert_eq!(None, highlight_lang(""));
    }

    #[test]
    fn test_extract_single_block() {
        let mut extractor = Extractor::new();
        let extracted = extractor.extract("before <code python> print(1) </code> after");
        assert_eq!("before KBCODEBLOCK0END after", extracted.text);
        assert_eq!(
            vec![Placeholder {
                token: String::from("KBCODEBLOCK0END"),
                html: String::from("<pre class=\"prettyprint lang-py\">\nprint(1)</pre>"),
            }],
            extracted.placeholders,
        );
    }

    #[test]
    fn test_extract_without_language_uses_generic_class() {
        let extracted = Extractor::new().extract("<code>if a < b && c > d {}</code>");
        assert_eq!(
            "<pre class=\"prettyprint\">\nif a &lt; b &amp;&amp; c &gt; d {}</pre>",
            extracted.placeholders[0].html,
        );
    }

    #[test]
    fn test_extract_unknown_language_uses_generic_class() {
        let extracted = Extractor::new().extract("<code cobol>DISPLAY 'HI'.</code>");
        assert_eq!(
            "<pre class=\"prettyprint\">\nDISPLAY 'HI'.</pre>",
            extracted.placeholders[0].html,
        );
    }

    #[test]
    fn test_tokens_are_unique_across_calls() {
        let mut extractor = Extractor::new();
        let first = extractor.extract("<code>x</code> <code>x</code>");
        let second = extractor.extract("<code>x</code>");
        assert_eq!("KBCODEBLOCK0END KBCODEBLOCK1END", first.text);
        assert_eq!("KBCODEBLOCK2END", second.text);
    }

    #[test]
    fn test_extract_stops_at_unterminated_block() {
        let extracted = Extractor::new().extract("<code c>a</code> then <code c>b");
        assert_eq!("KBCODEBLOCK0END then <code c>b", extracted.text);
        assert_eq!(1, extracted.placeholders.len());
    }

    #[test]
    fn test_extract_without_code() {
        let extracted = Extractor::new().extract("just prose");
        assert_eq!("just prose", extracted.text);
        assert!(extracted.placeholders.is_empty());
    }

    #[test]
    fn test_substitute() {
        let mut extractor = Extractor::new();
        let placeholders: Vec<Placeholder> = (0..11)
            .map(|i| Placeholder {
                token: extractor.token(),
                html: format!("<pre>{}</pre>", i),
            })
            .collect();
        assert_eq!(
            "<p><pre>1</pre></p><p><pre>10</pre></p>",
            substitute("<p>KBCODEBLOCK1END</p><p>KBCODEBLOCK10END</p>", &placeholders),
        );
    }
}
