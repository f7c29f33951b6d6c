//! Post and page record extraction.

use std::collections::HashMap;

use wxr2csv_dom::{Element, WxrDocument};

use crate::autop::autop;
use crate::config::{ConvertBreaks, ExportConfig, PostKind};

use super::category::is_default_category;
use super::csv::RecordSet;

const MORE_MARKER: &str = "<!--more-->";
const BLOCK_EDITOR_MARKER: &str = "<!-- wp:";

const FIXED_COLUMNS: [&str; 6] = ["type", "title", "status", "convert breaks", "date", "basename"];

/// Collect post or page records from every document's `<item>` elements
/// whose post type is in `types`.
pub(crate) fn collect(
    documents: &[WxrDocument],
    config: &ExportConfig,
    kind: PostKind,
    types: &[&str],
) -> RecordSet {
    let mut set = RecordSet::new(kind.file_name(), columns(kind, config));

    for document in documents {
        for item in document.elements_by_tag_name("item") {
            let post_type = item.child_text("wp:post_type");
            if !types.contains(&post_type.as_str()) {
                continue;
            }
            set.push(build_record(item, config, kind));
        }
    }

    set
}

/// Column list for one output kind: fixed columns, `category` for posts
/// only, the two body columns, then one `cf_` column per mapped custom
/// field in map order.
fn columns(kind: PostKind, config: &ExportConfig) -> Vec<String> {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    if kind == PostKind::Post {
        columns.push("category".to_string());
    }
    columns.push("body".to_string());
    columns.push("extended body".to_string());
    columns.extend(
        config
            .custom_field_map
            .iter()
            .map(|(_, name)| format!("cf_{name}")),
    );
    columns
}

fn build_record(item: &Element, config: &ExportConfig, kind: PostKind) -> HashMap<String, String> {
    let mut row = HashMap::new();
    row.insert("type".to_string(), kind.label().to_string());
    row.insert("title".to_string(), item.child_text("title"));
    row.insert("basename".to_string(), item.child_text("wp:post_name"));

    let status = if item.child_text("wp:status").eq_ignore_ascii_case("publish") {
        "Publish"
    } else {
        "Draft"
    };
    row.insert("status".to_string(), status.to_string());

    // A GMT date of "0000-00-00 00:00:00" marks a draft that was never
    // published; fall back to the local post date. The check is the
    // literal leading "0000" and dates are not otherwise validated.
    let mut date = item.child_text("wp:post_date_gmt");
    if date.starts_with("0000") {
        date = item.child_text("wp:post_date");
    }
    row.insert("date".to_string(), date);

    let content = item.child_text("content:encoded");
    let (body, extended, breaks) = split_content(&content, config.convert_breaks);
    row.insert("convert breaks".to_string(), breaks.as_str().to_string());
    row.insert("body".to_string(), body);
    row.insert("extended body".to_string(), extended);

    if kind == PostKind::Post {
        row.insert("category".to_string(), category_list(item));
    }

    for meta in item.elements_by_tag_name("wp:postmeta") {
        let key = meta.child_text("wp:meta_key");
        if let Some(column) = config.custom_field_column(&key) {
            // Later duplicates of the same key overwrite earlier ones.
            row.insert(format!("cf_{column}"), meta.child_text("wp:meta_value"));
        }
    }

    row
}

/// Split content at the first more marker and apply paragraph conversion.
///
/// Content that starts with a block-editor comment is already structured:
/// it passes through untouched and always records `richtext` so it is never
/// re-wrapped in paragraph tags.
fn split_content(content: &str, mode: ConvertBreaks) -> (String, String, ConvertBreaks) {
    let (body, extended) = match content.split_once(MORE_MARKER) {
        Some((body, extended)) => (body, extended),
        None => (content, ""),
    };

    if body.starts_with(BLOCK_EDITOR_MARKER) {
        (body.to_string(), extended.to_string(), ConvertBreaks::Richtext)
    } else if mode == ConvertBreaks::Richtext {
        (autop(body), autop(extended), mode)
    } else {
        (body.to_string(), extended.to_string(), mode)
    }
}

/// Newline-joined list of the item's non-default category names.
///
/// The `nicename` slug may be percent-encoded (Japanese installs encode
/// 未分類); a slug that fails to decode simply never matches the default
/// category name.
fn category_list(item: &Element) -> String {
    let mut names: Vec<&str> = Vec::new();

    for category in item.elements_by_tag_name("category") {
        let Some(nicename) = category.attribute("nicename") else {
            continue;
        };
        if nicename.is_empty() || nicename == "uncategorized" {
            continue;
        }
        if let Ok(decoded) = urlencoding::decode(nicename) {
            if is_default_category(&decoded) {
                continue;
            }
        }
        names.push(category.text());
    }

    names.join("\n")
}
