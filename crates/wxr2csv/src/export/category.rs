//! Category record extraction.

use std::collections::HashMap;

use wxr2csv_dom::WxrDocument;

use super::csv::RecordSet;

const COLUMNS: [&str; 4] = ["type", "label", "dirname", "description"];

/// The implicit default category, as named by English and Japanese
/// WordPress installs.
///
/// Shared by category export and the per-item category column so the two
/// exclusion rules cannot diverge.
pub(crate) fn is_default_category(name: &str) -> bool {
    name == "Uncategorized" || name == "未分類"
}

/// Collect category records from every document's `<wp:category>` elements.
///
/// The default category is skipped entirely; the output never contains an
/// implicit category.
pub(crate) fn collect(documents: &[WxrDocument]) -> RecordSet {
    let mut set = RecordSet::new(
        "categories.csv",
        COLUMNS.iter().map(|c| c.to_string()).collect(),
    );

    for document in documents {
        for element in document.elements_by_tag_name("wp:category") {
            let label = element.child_text("wp:cat_name");
            if is_default_category(&label) {
                continue;
            }

            let dirname = [
                element.child_text("wp:category_parent"),
                element.child_text("wp:category_nicename"),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");

            let mut row = HashMap::new();
            row.insert("type".to_string(), "Category".to_string());
            row.insert("label".to_string(), label);
            row.insert("dirname".to_string(), dirname);
            row.insert(
                "description".to_string(),
                element.child_text("wp:category_description"),
            );
            set.push(row);
        }
    }

    set
}
