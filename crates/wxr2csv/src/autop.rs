//! Plain-text to HTML paragraph conversion.
//!
//! Port of WordPress's `wpautop` transform: blank-line separated text
//! becomes `<p>` blocks, single newlines inside a block become `<br />`
//! line breaks, and block-level tags keep their own lines instead of being
//! wrapped in paragraphs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Block-level tags that must not be wrapped in `<p>`.
const BLOCKS: &str = "table|thead|tfoot|caption|col|colgroup|tbody|tr|td|th|div|dl|dd|dt|ul|ol|li|\
                      pre|form|map|area|blockquote|address|math|style|p|h1|h2|h3|h4|h5|h6|hr|\
                      fieldset|legend|section|article|aside|hgroup|header|footer|nav|figure|\
                      figcaption|details|menu|summary";

static DOUBLE_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>\s*<br\s*/?>").unwrap());
static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(<(?:{BLOCKS})[^>]*>)")).unwrap());
static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("(</(?:{BLOCKS})>)")).unwrap());
static MANY_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static EMPTY_PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>\s*</p>").unwrap());
static BLOCK_ALONE_IN_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"<p>\s*(</?(?:{BLOCKS})[^>]*>)\s*</p>")).unwrap());
static PARAGRAPH_BEFORE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"<p>\s*(</?(?:{BLOCKS})[^>]*>)")).unwrap());
static PARAGRAPH_AFTER_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(</?(?:{BLOCKS})[^>]*>)\s*</p>")).unwrap());
static NEWLINE_TO_BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<br />)?\s*\n").unwrap());
static BR_AFTER_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(</?(?:{BLOCKS})[^>]*>)\s*<br />")).unwrap());
static BR_BEFORE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<br />(\s*</?(?:p|li|div|dl|dd|dt|th|pre|td|ul|ol)[^>]*>)").unwrap()
});

/// Convert plain text to paragraph markup. Whitespace-only input yields an
/// empty string.
pub(crate) fn autop(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let padded = format!("{text}\n").replace("\r\n", "\n").replace('\r', "\n");
    let mut work = DOUBLE_BR.replace_all(&padded, "\n\n").into_owned();
    work = BLOCK_OPEN.replace_all(&work, "\n$1").into_owned();
    work = BLOCK_CLOSE.replace_all(&work, "$1\n\n").into_owned();
    work = MANY_NEWLINES.replace_all(&work, "\n\n").into_owned();

    let mut out = String::with_capacity(work.len());
    for paragraph in PARAGRAPH_BREAK.split(&work) {
        out.push_str("<p>");
        out.push_str(paragraph.trim());
        out.push_str("</p>\n");
    }

    out = EMPTY_PARAGRAPH.replace_all(&out, "").into_owned();
    out = BLOCK_ALONE_IN_PARAGRAPH.replace_all(&out, "$1").into_owned();
    out = PARAGRAPH_BEFORE_BLOCK.replace_all(&out, "$1").into_owned();
    out = PARAGRAPH_AFTER_BLOCK.replace_all(&out, "$1").into_owned();

    // `regex` has no lookbehind; the optional capture keeps newlines that
    // already follow a `<br />` untouched.
    out = NEWLINE_TO_BR
        .replace_all(&out, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "<br />\n".to_string()
            }
        })
        .into_owned();

    out = BR_AFTER_BLOCK.replace_all(&out, "$1").into_owned();
    out = BR_BEFORE_BLOCK.replace_all(&out, "$1").into_owned();

    out
}
