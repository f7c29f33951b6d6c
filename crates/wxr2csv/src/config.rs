//! Export configuration.

use std::str::FromStr;

/// Output kind an input post type is mapped to.
///
/// Types mapped to the same kind are merged into one output set; input
/// types absent from the map are not exported at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Page,
}

impl PostKind {
    /// Title-cased value written to the `type` column.
    pub fn label(self) -> &'static str {
        match self {
            PostKind::Post => "Post",
            PostKind::Page => "Page",
        }
    }

    /// Output file name for this kind.
    pub(crate) fn file_name(self) -> &'static str {
        match self {
            PostKind::Post => "posts.csv",
            PostKind::Page => "pages.csv",
        }
    }
}

impl FromStr for PostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(PostKind::Post),
            "page" => Ok(PostKind::Page),
            other => Err(format!(
                "unknown post kind `{other}` (expected `post` or `page`)"
            )),
        }
    }
}

/// Paragraph conversion mode recorded in the `convert breaks` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertBreaks {
    /// Leave content as-is.
    #[default]
    Default,
    /// Convert plain text to HTML paragraph markup.
    Richtext,
}

impl ConvertBreaks {
    /// Value written to the `convert breaks` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ConvertBreaks::Default => "__default__",
            ConvertBreaks::Richtext => "richtext",
        }
    }
}

impl FromStr for ConvertBreaks {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "__default__" => Ok(ConvertBreaks::Default),
            "richtext" => Ok(ConvertBreaks::Richtext),
            other => Err(format!(
                "unknown convert-breaks mode `{other}` (expected `default` or `richtext`)"
            )),
        }
    }
}

/// Configuration for a single export run.
///
/// Both maps are ordered association lists: the custom-field map's entry
/// order fixes the order of the `cf_` columns in the output.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Input post type to output kind.
    pub post_type_map: Vec<(String, PostKind)>,
    /// Custom-field key to output column suffix. Keys absent here are not
    /// exported.
    pub custom_field_map: Vec<(String, String)>,
    /// Fallback paragraph conversion mode for plain-text content.
    pub convert_breaks: ConvertBreaks,
    /// Optional directory prefix applied to every produced file name.
    pub output_dir: Option<String>,
}

impl ExportConfig {
    /// Post types mapped to the given output kind, in map order.
    pub(crate) fn types_mapped_to(&self, kind: PostKind) -> Vec<&str> {
        self.post_type_map
            .iter()
            .filter(|(_, mapped)| *mapped == kind)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Output column suffix for a custom-field key, if the key is mapped.
    pub(crate) fn custom_field_column(&self, key: &str) -> Option<&str> {
        self.custom_field_map
            .iter()
            .find(|(mapped, _)| mapped == key)
            .map(|(_, column)| column.as_str())
    }
}
