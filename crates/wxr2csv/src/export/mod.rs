//! CSV export engine.
//!
//! Walks all registered documents, builds one in-memory record set per
//! output kind (categories, posts, pages) and serializes each non-empty set
//! to CSV text. Extraction is synchronous pure computation over the parsed
//! trees; with the `parallel` feature the independent record sets are
//! serialized on rayon's thread pool. Output order stays fixed either way.

mod category;
mod csv;
mod item;

use wxr2csv_dom::WxrDocument;

use crate::config::{ExportConfig, PostKind};
use crate::Result;

use self::csv::RecordSet;

/// One produced output file, ready for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name relative to the archive root, directory prefix included.
    pub filename: String,
    /// CSV text, UTF-8, header row first.
    pub data: String,
}

/// Run one export over the given documents.
///
/// The categories set is built whenever some type maps to posts; it is
/// independent of the type mapping itself. Empty sets produce no file.
pub(crate) fn run(documents: &[WxrDocument], config: &ExportConfig) -> Result<Vec<ExportFile>> {
    let post_types = config.types_mapped_to(PostKind::Post);
    let page_types = config.types_mapped_to(PostKind::Page);

    let mut sets: Vec<RecordSet> = Vec::new();

    if !post_types.is_empty() {
        sets.push(category::collect(documents));
        sets.push(item::collect(documents, config, PostKind::Post, &post_types));
    }
    if !page_types.is_empty() {
        sets.push(item::collect(documents, config, PostKind::Page, &page_types));
    }

    sets.retain(|set| !set.is_empty());

    let prefix = match &config.output_dir {
        Some(dir) => format!("{dir}/"),
        None => String::new(),
    };

    serialize(sets, &prefix)
}

#[cfg(feature = "parallel")]
fn serialize(sets: Vec<RecordSet>, prefix: &str) -> Result<Vec<ExportFile>> {
    use rayon::prelude::*;

    // Each set owns its rows, so serialization tasks share nothing.
    sets.into_par_iter()
        .map(|set| serialize_one(set, prefix))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn serialize(sets: Vec<RecordSet>, prefix: &str) -> Result<Vec<ExportFile>> {
    sets.into_iter()
        .map(|set| serialize_one(set, prefix))
        .collect()
}

fn serialize_one(set: RecordSet, prefix: &str) -> Result<ExportFile> {
    let data = set.to_csv()?;
    Ok(ExportFile {
        filename: format!("{prefix}{}", set.file_name()),
        data,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{Converter, ConvertBreaks, ExportConfig, PostKind};

    const NEWS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
    xmlns:content="http://purl.org/rss/1.0/modules/content/"
    xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
    <title>Test Blog</title>
    <wp:category>
        <wp:term_id>1</wp:term_id>
        <wp:category_nicename>uncategorized</wp:category_nicename>
        <wp:category_parent></wp:category_parent>
        <wp:cat_name><![CDATA[Uncategorized]]></wp:cat_name>
    </wp:category>
    <wp:category>
        <wp:term_id>2</wp:term_id>
        <wp:category_nicename>cat1</wp:category_nicename>
        <wp:category_parent>parent-cat</wp:category_parent>
        <wp:cat_name><![CDATA[cat1]]></wp:cat_name>
        <wp:category_description><![CDATA[first category]]></wp:category_description>
    </wp:category>
    <item>
        <title>Hello world!</title>
        <wp:post_type>post</wp:post_type>
        <wp:post_date>2019-06-01 20:20:11</wp:post_date>
        <wp:post_date_gmt>2019-06-01 11:20:11</wp:post_date_gmt>
        <wp:post_name>hello-world</wp:post_name>
        <wp:status>publish</wp:status>
        <category domain="category" nicename="uncategorized"><![CDATA[Uncategorized]]></category>
        <content:encoded><![CDATA[<!-- wp:paragraph -->
<p>Welcome to WordPress.</p>
<!-- /wp:paragraph -->]]></content:encoded>
    </item>
    <item>
        <title>post with category</title>
        <wp:post_type>post</wp:post_type>
        <wp:post_date>2019-06-01 20:22:10</wp:post_date>
        <wp:post_date_gmt>0000-00-00 00:00:00</wp:post_date_gmt>
        <wp:post_name></wp:post_name>
        <wp:status>draft</wp:status>
        <category domain="category" nicename="cat1"><![CDATA[cat1]]></category>
        <category domain="category" nicename="uncategorized"><![CDATA[Uncategorized]]></category>
        <content:encoded><![CDATA[]]></content:encoded>
    </item>
    <item>
        <title>A news entry</title>
        <wp:post_type>news</wp:post_type>
        <wp:post_date>2019-06-02 05:28:54</wp:post_date>
        <wp:post_date_gmt>2019-06-01 20:28:54</wp:post_date_gmt>
        <wp:post_name>a-news-entry</wp:post_name>
        <wp:status>publish</wp:status>
        <content:encoded><![CDATA[]]></content:encoded>
        <wp:postmeta>
            <wp:meta_key>field1</wp:meta_key>
            <wp:meta_value><![CDATA[value one]]></wp:meta_value>
        </wp:postmeta>
        <wp:postmeta>
            <wp:meta_key>_edit_last</wp:meta_key>
            <wp:meta_value><![CDATA[1]]></wp:meta_value>
        </wp:postmeta>
        <wp:postmeta>
            <wp:meta_key>field2</wp:meta_key>
            <wp:meta_value><![CDATA[first write]]></wp:meta_value>
        </wp:postmeta>
        <wp:postmeta>
            <wp:meta_key>field2</wp:meta_key>
            <wp:meta_value><![CDATA[last write]]></wp:meta_value>
        </wp:postmeta>
    </item>
    <item>
        <title>About</title>
        <wp:post_type>page</wp:post_type>
        <wp:post_date>2019-06-01 20:25:00</wp:post_date>
        <wp:post_date_gmt>2019-06-01 11:25:00</wp:post_date_gmt>
        <wp:post_name>about</wp:post_name>
        <wp:status>publish</wp:status>
        <content:encoded><![CDATA[About this site.]]></content:encoded>
    </item>
</channel>
</rss>"#;

    const WP4_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
    xmlns:content="http://purl.org/rss/1.0/modules/content/"
    xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
    <item>
        <title>テスト投稿</title>
        <wp:post_type>post</wp:post_type>
        <wp:post_date>2019-05-30 17:21:10</wp:post_date>
        <wp:post_date_gmt>0000-00-00 00:00:00</wp:post_date_gmt>
        <wp:post_name></wp:post_name>
        <wp:status>draft</wp:status>
        <category domain="category" nicename="%e3%82%ab%e3%83%86%e3%82%b4%e3%83%aa%e5%90%8d"><![CDATA[カテゴリ名]]></category>
        <category domain="category" nicename="%e6%9c%aa%e5%88%86%e9%a1%9e"><![CDATA[未分類]]></category>
        <content:encoded><![CDATA[本文本文

<!--more-->

続き続き]]></content:encoded>
    </item>
</channel>
</rss>"#;

    fn converter(xml: &str) -> Converter {
        let mut converter = Converter::new();
        converter.add_xml(xml).unwrap();
        converter
    }

    fn full_config() -> ExportConfig {
        ExportConfig {
            post_type_map: vec![
                ("post".to_string(), PostKind::Post),
                ("page".to_string(), PostKind::Page),
                ("news".to_string(), PostKind::Post),
            ],
            custom_field_map: vec![
                ("field1".to_string(), "net_field1".to_string()),
                ("field2".to_string(), "net_field2".to_string()),
            ],
            convert_breaks: ConvertBreaks::Default,
            output_dir: Some("test".to_string()),
        }
    }

    fn read_records(data: &str) -> Vec<HashMap<String, String>> {
        let mut reader = ::csv::Reader::from_reader(data.as_bytes());
        let headers = reader.headers().unwrap().clone();
        reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, value)| (header.to_string(), value.to_string()))
                    .collect()
            })
            .collect()
    }

    fn find<'a>(
        files: &'a [crate::ExportFile],
        filename: &str,
    ) -> Option<&'a crate::ExportFile> {
        files.iter().find(|f| f.filename == filename)
    }

    #[test]
    fn test_export_all_kinds() {
        let files = converter(NEWS_XML).export(&full_config()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(find(&files, "test/categories.csv").is_some());
        assert!(find(&files, "test/posts.csv").is_some());
        assert!(find(&files, "test/pages.csv").is_some());
    }

    #[test]
    fn test_categories_skip_default_category() {
        let files = converter(NEWS_XML).export(&full_config()).unwrap();
        let records = read_records(&find(&files, "test/categories.csv").unwrap().data);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "Category");
        assert_eq!(records[0]["label"], "cat1");
        assert_eq!(records[0]["dirname"], "parent-cat/cat1");
        assert_eq!(records[0]["description"], "first category");
    }

    #[test]
    fn test_post_records() {
        let files = converter(NEWS_XML).export(&full_config()).unwrap();
        let records = read_records(&find(&files, "test/posts.csv").unwrap().data);
        assert_eq!(records.len(), 3);

        // Block-editor content forces richtext and passes through untouched.
        let hello = &records[0];
        assert_eq!(hello["type"], "Post");
        assert_eq!(hello["title"], "Hello world!");
        assert_eq!(hello["status"], "Publish");
        assert_eq!(hello["convert breaks"], "richtext");
        assert_eq!(hello["date"], "2019-06-01 11:20:11");
        assert_eq!(hello["basename"], "hello-world");
        assert_eq!(hello["category"], "");
        assert_eq!(
            hello["body"],
            "<!-- wp:paragraph -->\n<p>Welcome to WordPress.</p>\n<!-- /wp:paragraph -->"
        );
        assert_eq!(hello["extended body"], "");
        assert_eq!(hello["cf_net_field1"], "");
        assert_eq!(hello["cf_net_field2"], "");

        // Epoch-zero GMT date falls back to the local date.
        let draft = &records[1];
        assert_eq!(draft["status"], "Draft");
        assert_eq!(draft["date"], "2019-06-01 20:22:10");
        assert_eq!(draft["basename"], "");
        assert_eq!(draft["category"], "cat1");
        assert_eq!(draft["convert breaks"], "__default__");

        // Custom post type merged into posts; duplicate meta key last-wins.
        let news = &records[2];
        assert_eq!(news["title"], "A news entry");
        assert_eq!(news["date"], "2019-06-01 20:28:54");
        assert_eq!(news["cf_net_field1"], "value one");
        assert_eq!(news["cf_net_field2"], "last write");
    }

    #[test]
    fn test_page_records_have_no_category_column() {
        let files = converter(NEWS_XML).export(&full_config()).unwrap();
        let pages = &find(&files, "test/pages.csv").unwrap().data;

        let mut reader = ::csv::Reader::from_reader(pages.as_bytes());
        let headers: Vec<_> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            [
                "type",
                "title",
                "status",
                "convert breaks",
                "date",
                "basename",
                "body",
                "extended body",
                "cf_net_field1",
                "cf_net_field2",
            ]
        );

        let records = read_records(pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "Page");
        assert_eq!(records[0]["title"], "About");
    }

    #[test]
    fn test_pages_only_export_omits_categories_and_posts() {
        let config = ExportConfig {
            post_type_map: vec![("news".to_string(), PostKind::Page)],
            ..full_config()
        };

        let files = converter(NEWS_XML).export(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "test/pages.csv");

        let records = read_records(&files[0].data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "Page");
        assert_eq!(records[0]["title"], "A news entry");
    }

    #[test]
    fn test_no_mapping_yields_no_files() {
        let config = ExportConfig::default();
        let files = converter(NEWS_XML).export(&config).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_no_prefix_when_output_dir_unset() {
        let config = ExportConfig {
            output_dir: None,
            ..full_config()
        };
        let files = converter(NEWS_XML).export(&config).unwrap();
        assert!(find(&files, "categories.csv").is_some());
        assert!(find(&files, "posts.csv").is_some());
        assert!(find(&files, "pages.csv").is_some());
    }

    #[test]
    fn test_default_mode_leaves_content_raw() {
        let config = ExportConfig {
            post_type_map: vec![("post".to_string(), PostKind::Post)],
            convert_breaks: ConvertBreaks::Default,
            ..Default::default()
        };

        let files = converter(WP4_XML).export(&config).unwrap();
        let records = read_records(&find(&files, "posts.csv").unwrap().data);

        let record = &records[0];
        assert_eq!(record["title"], "テスト投稿");
        assert_eq!(record["status"], "Draft");
        assert_eq!(record["date"], "2019-05-30 17:21:10");
        assert_eq!(record["convert breaks"], "__default__");
        assert_eq!(record["body"], "本文本文\n\n");
        assert_eq!(record["extended body"], "\n\n続き続き");
        // The encoded 未分類 slug is excluded, the other category kept.
        assert_eq!(record["category"], "カテゴリ名");
    }

    #[test]
    fn test_richtext_mode_converts_paragraphs() {
        let config = ExportConfig {
            post_type_map: vec![("post".to_string(), PostKind::Post)],
            convert_breaks: ConvertBreaks::Richtext,
            ..Default::default()
        };

        let files = converter(WP4_XML).export(&config).unwrap();
        let records = read_records(&find(&files, "posts.csv").unwrap().data);

        let record = &records[0];
        assert_eq!(record["convert breaks"], "richtext");
        assert_eq!(record["body"], "<p>本文本文</p>\n");
        assert_eq!(record["extended body"], "\n<p>続き続き</p>\n");
    }

    #[test]
    fn test_export_is_deterministic() {
        let converter = converter(NEWS_XML);
        let config = full_config();

        let first = converter.export(&config).unwrap();
        let second = converter.export(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multi_document_export_preserves_registration_order() {
        let mut merged = Converter::new();
        merged.add_xml(WP4_XML).unwrap();
        merged.add_xml(NEWS_XML).unwrap();

        let config = ExportConfig {
            post_type_map: vec![("post".to_string(), PostKind::Post)],
            ..Default::default()
        };

        let files = merged.export(&config).unwrap();
        let records = read_records(&find(&files, "posts.csv").unwrap().data);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["title"], "テスト投稿");
        assert_eq!(records[1]["title"], "Hello world!");
        assert_eq!(records[2]["title"], "post with category");
    }

    #[test]
    fn test_unmapped_custom_fields_have_no_column() {
        let config = ExportConfig {
            post_type_map: vec![("news".to_string(), PostKind::Post)],
            ..Default::default()
        };

        let files = converter(NEWS_XML).export(&config).unwrap();
        let posts = &find(&files, "posts.csv").unwrap().data;

        let mut reader = ::csv::Reader::from_reader(posts.as_bytes());
        let headers: Vec<_> = reader.headers().unwrap().iter().map(String::from).collect();
        assert!(!headers.iter().any(|h| h.starts_with("cf_")));
    }
}
