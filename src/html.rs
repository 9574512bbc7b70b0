//! The page skeleton shared by all generated pages and a handful of small
//! HTML helpers.

use pulldown_cmark::escape::escape_html;

/// The page header. `{{title}}`, `{{creation-date}}`, `{{highlight-links}}` and
/// `{{highlight-onload}}` are substituted per page (see [`header`]).
const HEADER_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
 <meta charset="utf-8">
 <meta name="description" content="{{title}}">
 <link rel="stylesheet" href="../css/wp-style.css" type="text/css">
 <link rel="stylesheet" href="../css/article.css" type="text/css">
 {{highlight-links}}
 <title>{{title}}</title>
</head>

<body{{highlight-onload}}>
<div id="container">

<p><a href="../index.html">home</a> &raquo; <a href="index.html">knowledge base</a> &raquo; <strong>{{title}}</strong> <font color="#aaaaaa" size="-1">({{creation-date}})</font></p>
"##;

const FOOTER_HTML: &str = r#"<hr>
</div>
</body>
</html>
"#;

/// The syntax-highlighting assets, only linked from pages with code blocks.
const HIGHLIGHT_LINKS: &str = r#"<link href="../js/prettify.css" type="text/css" rel="stylesheet" />
<script type="text/javascript" src="../js/prettify.js"></script>
"#;

const HIGHLIGHT_ONLOAD: &str = r#" onload="prettyPrint()""#;

/// Renders the page header. `title` is escaped here; callers pass plain text.
pub fn header(title: &str, creation_date: &str, has_code: bool) -> String {
    let title = escape(title);
    let (links, onload) = match has_code {
        true => (HIGHLIGHT_LINKS, HIGHLIGHT_ONLOAD),
        false => ("", ""),
    };
    replace_vars(
        HEADER_HTML,
        &[
            ("title", &title),
            ("creation-date", creation_date),
            ("highlight-links", links),
            ("highlight-onload", onload),
        ],
    )
}

pub fn footer() -> &'static str {
    FOOTER_HTML
}

/// Substitutes `{{name}}` placeholders in a single pass, so text coming from
/// one substitution is never itself treated as a placeholder. Unknown
/// placeholders are left as-is.
pub fn replace_vars(template: &str, vars: &[(&str, &str)]) -> String {
    const OPEN: &str = "{{";
    const CLOSE: &str = "}}";

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        let name_start = start + OPEN.len();
        let name_end = match rest[name_start..].find(CLOSE) {
            Some(offset) => name_start + offset,
            None => break,
        };
        out.push_str(&rest[..start]);
        let name = &rest[name_start..name_end];
        match vars.iter().find(|(var, _)| *var == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..name_end + CLOSE.len()]),
        }
        rest = &rest[name_end + CLOSE.len()..];
    }
    out.push_str(rest);
    out
}

/// Escapes text for use in element content and attribute values.
pub fn escape(txt: &str) -> String {
    let mut out = String::with_capacity(txt.len());
    // Writing into a `String` never fails.
    let _ = escape_html(&mut out, txt);
    out
}

pub fn link(url: &str, txt: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, url, txt)
}

pub fn gray(txt: &str) -> String {
    format!(r#"<font color="gray">{}</font>"#, txt)
}

pub fn small(txt: &str) -> String {
    format!(r#"<font size="-1">{}</font>"#, txt)
}
