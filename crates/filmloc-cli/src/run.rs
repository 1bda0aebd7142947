//! Command handlers.
//!
//! Per-page failures are logged and reported in the summary rather than
//! propagated, so one unreachable page does not abort the run.

use futures::stream::{self, StreamExt};
use scraper::Html;

use filmloc_core::{load_layouts_or_builtin, AppConfig, MovieMeta};
use filmloc_extractor::{
    process_page, CoordinateParser, DirectoryAuditStore, Extractor, JsonLinesSink, MarkupFetcher,
    MarkupSource, PageContext,
};

use crate::fetch::{load_page, LoadedPage, PageFetcher};
use crate::ExtractArgs;

/// Apply command-line overrides on top of the environment config.
fn effective_config(config: &AppConfig, args: &ExtractArgs) -> AppConfig {
    let mut config = config.clone();
    if args.no_markup {
        config.use_raw_markup = false;
    }
    if args.validate_coordinates {
        config.validate_coordinates = true;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    config
}

fn markup_source(config: &AppConfig, args: &ExtractArgs) -> anyhow::Result<MarkupSource> {
    if !config.use_raw_markup {
        return Ok(MarkupSource::Disabled);
    }
    if let Some(path) = &args.markup_file {
        let markup = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        return Ok(MarkupSource::Static(markup));
    }
    let fetcher = MarkupFetcher::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build markup fetcher: {e}"))?;
    Ok(MarkupSource::Remote(fetcher))
}

/// Fetch every page with bounded concurrency, then extract and write each
/// one in input order.
///
/// # Errors
///
/// Returns an error for invalid arguments, unusable layouts, an unwritable
/// output directory, or when every page failed to load.
pub(crate) async fn run_extract(config: &AppConfig, args: ExtractArgs) -> anyhow::Result<()> {
    if args.html_file.is_some() && args.urls.len() != 1 {
        anyhow::bail!("--html-file requires exactly one URL");
    }

    let config = effective_config(config, &args);
    let layouts = load_layouts_or_builtin(config.layouts_path.as_deref())?;
    let extractor = Extractor::from_config(&config, &layouts)?;
    let markup = markup_source(&config, &args)?;
    let pages = PageFetcher::new(config.request_timeout_secs, &config.user_agent)?;
    let meta = MovieMeta {
        title: args.title.clone(),
        year: args.year.clone(),
    };

    let max_concurrent = config.max_concurrency.max(1);
    let html_file = args.html_file.as_deref();

    let mut loaded: Vec<(usize, &str, anyhow::Result<LoadedPage>)> =
        stream::iter(args.urls.iter().enumerate())
            .map(|(idx, url)| {
                let fut = load_page(url, html_file, &pages, &markup);
                async move { (idx, url.as_str(), fut.await) }
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;
    loaded.sort_by_key(|(idx, _, _)| *idx);

    if args.dry_run {
        return print_dry_run(&extractor, &meta, &loaded);
    }

    let mut records = JsonLinesSink::open(&config.output_dir)?;
    let mut audit = DirectoryAuditStore::open(&config.output_dir)?;

    let mut total_records = 0usize;
    let mut failed_pages = 0usize;

    for (_, url, page) in &loaded {
        let page = match page {
            Ok(page) => page,
            Err(e) => {
                failed_pages += 1;
                tracing::warn!(url, error = %format!("{e:#}"), "failed to load page");
                println!("  \u{2717} {url}  {e:#}");
                continue;
            }
        };

        let document = Html::parse_document(&page.html);
        let ctx = PageContext::new(url, &document).with_markup(page.raw_markup.as_deref());
        let outcome = process_page(&extractor, &ctx, &meta, &mut records, &mut audit);

        total_records += outcome.records.len();
        match outcome.error {
            Some(err) => {
                failed_pages += 1;
                println!("  \u{2717} {url}  {err}");
            }
            None => {
                let audit_note = if outcome.audit_written { "" } else { "  (audit not written)" };
                println!(
                    "  \u{2713} {url}  {} records{audit_note}",
                    outcome.records.len()
                );
            }
        }
    }

    if failed_pages == loaded.len() {
        anyhow::bail!("all {failed_pages} pages failed");
    }

    println!(
        "Run complete: {total_records} records from {} pages written to {}",
        loaded.len() - failed_pages,
        records.path().display()
    );
    Ok(())
}

fn print_dry_run(
    extractor: &Extractor,
    meta: &MovieMeta,
    loaded: &[(usize, &str, anyhow::Result<LoadedPage>)],
) -> anyhow::Result<()> {
    for (_, url, page) in loaded {
        match page {
            Ok(page) => {
                let document = Html::parse_document(&page.html);
                let ctx = PageContext::new(url, &document).with_markup(page.raw_markup.as_deref());
                for record in extractor.extract_page(&ctx, meta).records {
                    println!("{}", serde_json::to_string(&record)?);
                }
            }
            Err(e) => eprintln!("error: {url}: {e:#}"),
        }
    }
    Ok(())
}

/// Print the coordinates found in `text`, or "none".
pub(crate) fn run_parse_coords(text: &str, validate: bool) {
    match CoordinateParser::new(validate).parse(text) {
        Some(c) => println!("{}, {}", c.latitude, c.longitude),
        None => println!("none"),
    }
}

/// Print each configured layout after checking it compiles.
///
/// # Errors
///
/// Returns an error if the layouts file cannot be loaded or a layout has an
/// invalid pattern or selector.
pub(crate) fn run_layouts(config: &AppConfig) -> anyhow::Result<()> {
    let layouts = load_layouts_or_builtin(config.layouts_path.as_deref())?;
    Extractor::from_config(config, &layouts)?;

    for layout in &layouts {
        let hosts = if layout.hosts.is_empty() {
            "any host".to_string()
        } else {
            layout.hosts.join(", ")
        };
        println!(
            "{:<24} {hosts}  {}",
            layout.name,
            layout.path_pattern.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
