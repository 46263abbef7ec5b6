//! Subcommand implementations

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use deckgen_core::Renderer;
use deckgen_parser::{detect_kind, load_dataset, read_headers};
use deckgen_render::{AgeChartRenderer, AgeWorkbookRenderer, LayoutMap, OutlineRenderer, PptxRenderer, TemplatePackage};
use deckgen_report::{Catalogue, Report, ReportOutput, SectionBuilder};
use tracing::{debug, info, warn};

use crate::config::{Config, CONFIG_FILE, STARTER};
use crate::Options;

/// Extra files written alongside a ticket deck
#[derive(Debug, Clone, Copy, Default)]
pub struct Extras {
    pub chart: bool,
    pub workbook: bool,
}

/// Print an export's columns, kind, size and the reports it supports
pub fn inspect(file: &Path, json: bool) -> Result<()> {
    let reader = File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let headers = read_headers(reader).with_context(|| format!("Failed to read {}", file.display()))?;
    let kind = detect_kind(&headers)?;
    let dataset = load_dataset(file)?;

    if json {
        let summary = serde_json::json!({
            "file": file.display().to_string(),
            "type": kind.as_str(),
            "rows": dataset.len(),
            "columns": headers,
            "reports": Report::available(kind),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Type: {} export", kind);
    println!("Rows: {}", dataset.len());
    println!("Columns: {}", headers.join(", "));
    println!("Reports: {}", Report::available(kind).join(", "));
    Ok(())
}

/// Write a starter configuration and the folders it refers to
pub fn init(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for folder in ["raw", "templates", "output"] {
        let path = dir.join(folder);
        std::fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    }
    std::fs::write(&config_path, STARTER).with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created: {}", config_path.display());
    println!("Put exports in {} and run a report, e.g. `deckgen all`", dir.join("raw").display());
    Ok(())
}

fn renderer(config: &Config, template: Option<&PathBuf>) -> Result<PptxRenderer> {
    let renderer = match template.or(config.paths.template.as_ref()) {
        Some(path) => {
            let package = TemplatePackage::open(path)?;
            debug!(template = %path.display(), "using template");
            PptxRenderer::with_template(package).layouts(config.layouts.unwrap_or_default())
        }
        None => PptxRenderer::new().layouts(config.layouts.unwrap_or_else(LayoutMap::builtin)),
    };
    Ok(renderer)
}

/// Build a report and write (or outline) every deck it produces
pub fn run(options: &Options, report: &Report, extras: Extras) -> Result<()> {
    let config = Config::load(options.config.as_deref())?;

    let input = options
        .input
        .clone()
        .unwrap_or_else(|| config.paths.export(report.input()).to_path_buf());
    let dataset = load_dataset(&input).with_context(|| format!("Failed to load {} export", report.input()))?;

    let renderer = renderer(&config, options.template.as_ref())?;
    let now = Local::now().naive_local();
    let sections = SectionBuilder::new(renderer.slide_size()?, now);
    let catalogue = Catalogue::new(config.reports.clone(), sections);

    let outputs: Vec<ReportOutput> = catalogue
        .build(report, dataset)
        .with_context(|| format!("Failed to build the {} report", report.name()))?
        .into_iter()
        .filter(|output| {
            let empty = output.deck.is_empty();
            if empty {
                warn!(file = %output.file_name(now, "pptx"), "no slides, skipped");
            }
            !empty
        })
        .collect();

    if options.dry_run {
        let outline = OutlineRenderer::new();
        for output in &outputs {
            println!("<!-- {} -->", output.file_name(now, "pptx"));
            println!("{}", outline.render(&output.deck)?);
        }
        return Ok(());
    }

    let output_dir = options.output_dir.clone().unwrap_or(config.paths.output_dir);
    std::fs::create_dir_all(&output_dir).with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for output in &outputs {
        write_output(&renderer, output, &output_dir, now, extras)?;
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "written");
    println!("Created: {}", path.display());
    Ok(())
}

fn write_output(
    renderer: &PptxRenderer,
    output: &ReportOutput,
    dir: &Path,
    at: NaiveDateTime,
    extras: Extras,
) -> Result<()> {
    let pptx = renderer
        .render(&output.deck)
        .with_context(|| format!("Failed to render {}", output.file_name(at, "pptx")))?;
    write_file(&dir.join(output.file_name(at, "pptx")), &pptx)?;

    if extras.chart {
        if output.assignees.is_empty() {
            info!("no open tickets, chart skipped");
        } else {
            let svg = AgeChartRenderer::new().render(&output.assignees)?;
            write_file(&dir.join(output.file_name(at, "svg")), svg.as_bytes())?;
        }
    }
    if extras.workbook {
        let xlsx = AgeWorkbookRenderer::new().render(&output.assignees)?;
        write_file(&dir.join(output.file_name(at, "xlsx")), &xlsx)?;
    }
    Ok(())
}
