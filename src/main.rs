//! wxr2csv CLI - converts WordPress WXR exports to CSV archives.
//!
//! This is the main entry point for the wxr2csv command-line application.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wxr2csv::{ConvertBreaks, Converter, ExportConfig, PostKind};

/// wxr2csv - WordPress WXR export to CSV conversion tool
#[derive(Parser)]
#[command(name = "wxr2csv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List post types and custom-field keys present in WXR files
    Inspect {
        /// WXR export files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert WXR files into a ZIP archive of CSV files
    Convert {
        /// WXR export files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Map an input post type to an output kind, e.g. `news=post`
        #[arg(
            short = 't',
            long = "post-type",
            value_name = "TYPE=KIND",
            value_parser = parse_post_type
        )]
        post_types: Vec<(String, PostKind)>,

        /// Export a custom field under the given column name, e.g. `field1=net_field1`
        #[arg(
            short = 'f',
            long = "custom-field",
            value_name = "KEY=COLUMN",
            value_parser = parse_custom_field
        )]
        custom_fields: Vec<(String, String)>,

        /// Paragraph conversion mode for plain-text content
        #[arg(long, default_value = "default", value_parser = parse_convert_breaks)]
        convert_breaks: ConvertBreaks,

        /// Directory prefix for file names inside the archive
        #[arg(short, long, env = "WXR2CSV_DIRNAME")]
        dirname: Option<String>,

        /// Output ZIP file
        #[arg(short, long, env = "WXR2CSV_OUTPUT", default_value = "export.zip")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { files } => cmd_inspect(&files),
        Commands::Convert {
            files,
            post_types,
            custom_fields,
            convert_breaks,
            dirname,
            output,
        } => cmd_convert(&files, post_types, custom_fields, convert_breaks, dirname, &output),
    }
}

fn load_documents(files: &[PathBuf]) -> Result<Converter> {
    let mut converter = Converter::new();

    for path in files {
        let xml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        converter
            .add_xml(&xml)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
    }

    Ok(converter)
}

fn cmd_inspect(files: &[PathBuf]) -> Result<()> {
    let converter = load_documents(files)?;

    println!("Post types:");
    for post_type in converter.post_types() {
        println!("  {post_type}");
    }

    println!("Custom fields:");
    for field in converter.custom_fields() {
        println!("  {field}");
    }

    Ok(())
}

fn cmd_convert(
    files: &[PathBuf],
    post_types: Vec<(String, PostKind)>,
    custom_fields: Vec<(String, String)>,
    convert_breaks: ConvertBreaks,
    dirname: Option<String>,
    output: &PathBuf,
) -> Result<()> {
    let converter = load_documents(files)?;

    let config = ExportConfig {
        post_type_map: post_types,
        custom_field_map: custom_fields,
        convert_breaks,
        output_dir: dirname,
    };

    let exported = converter.export(&config).context("Export failed")?;
    if exported.is_empty() {
        println!("No post types selected for export; nothing to write");
        return Ok(());
    }

    let file = fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for export_file in &exported {
        zip.start_file(export_file.filename.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", export_file.filename))?;
        zip.write_all(export_file.data.as_bytes())?;
        println!("  {} ({} bytes)", export_file.filename, export_file.data.len());
    }

    zip.finish().context("Failed to finalize archive")?;
    println!("Wrote {}", output.display());

    Ok(())
}

fn parse_post_type(s: &str) -> Result<(String, PostKind), String> {
    let (name, kind) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=KIND, got `{s}`"))?;
    Ok((name.to_string(), kind.parse()?))
}

fn parse_custom_field(s: &str) -> Result<(String, String), String> {
    let (key, column) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=COLUMN, got `{s}`"))?;
    Ok((key.to_string(), column.to_string()))
}

fn parse_convert_breaks(s: &str) -> Result<ConvertBreaks, String> {
    s.parse()
}
