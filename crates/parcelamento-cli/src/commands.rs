use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use parcelamento::config::validate_config;
use parcelamento::pipeline::{analyze_text, NoopProgress, ProgressEvent, ProgressReporter};
use parcelamento::processor::TextExtractor;
use parcelamento::sanitize::display_name;
use parcelamento::{
    load_config, parse_search_terms, BatchProcessor, CancellationToken, Config,
    PdfTextExtractor, ResultRepository, StatusFilter,
};

use crate::report::{render_records, yes_no, JsonReport};

pub struct ProcessArgs {
    pub archive: PathBuf,
    pub output: PathBuf,
    pub search: Option<String>,
    pub status: StatusFilter,
    pub json: Option<PathBuf>,
    pub workers: Option<usize>,
    pub show_progress: bool,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("parcelamento").join("config.json"))
}

/// Explicit path, then the per-user config file if present, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            info!("Using config file {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

struct BarProgress(ProgressBar);

impl ProgressReporter for BarProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => self.0.set_length(total as u64),
            ProgressEvent::FileCompleted {
                file_name,
                processed,
                ..
            }
            | ProgressEvent::FileFailed {
                file_name,
                processed,
                ..
            } => {
                self.0.set_position(processed as u64);
                self.0.set_message(display_name(&file_name).to_string());
            }
            ProgressEvent::Finished { .. } => self.0.finish_and_clear(),
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Ctrl-C stops dispatching new files; finished ones are still reported.
fn install_interrupt_handler(cancel: &CancellationToken) {
    let token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        warn!("Interrupt received, cancelling remaining files");
        token.cancel();
    }) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }
}

pub fn run_process(args: ProcessArgs, config: Config) -> Result<()> {
    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel);
    run_process_with(args, config, &cancel)
}

pub fn run_process_with(
    args: ProcessArgs,
    mut config: Config,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }
    validate_config(&config).context("Invalid configuration")?;

    let bytes = fs::read(&args.archive)
        .with_context(|| format!("Failed to read archive {}", args.archive.display()))?;

    let compression = config.output.compression;
    let processor = BatchProcessor::new(config);

    let result = if args.show_progress {
        let reporter = BarProgress(progress_bar());
        processor.process_archive_bytes_with(&bytes, &reporter, cancel)
    } else {
        processor.process_archive_bytes_with(&bytes, &NoopProgress, cancel)
    }
    .context("Não foi possível processar o ZIP")?;

    let repository = ResultRepository::new();
    let result = repository.replace(result);
    if let Some(search) = &args.search {
        repository.set_search_terms(parse_search_terms(search));
    }

    let mut records = repository.filtered(&args.status);
    records.sort_by(|a, b| a.company_name.cmp(&b.company_name));

    for warning in &result.warnings {
        println!("Aviso: {}", warning);
    }

    print!(
        "{}",
        render_records(&records, &repository.search_terms(), !result.records.is_empty())
    );

    if !result.unmatched_files.is_empty() {
        println!("\nSem CNPJ identificado: {}", result.unmatched_files.len());
    }

    if !result.failures.is_empty() {
        println!("\nFalhas:");
        for failure in &result.failures {
            println!("  {}: {}", failure.file_name, failure.message);
        }
    }

    if !result.skipped.is_empty() {
        println!("\nNão processados:");
        for file_name in &result.skipped {
            println!("  {}", file_name);
        }
    }

    let archive = result
        .to_archive(compression)
        .context("Failed to build output archive")?;
    fs::write(&args.output, archive)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("\nZIP gerado: {}", args.output.display());

    if let Some(json_path) = &args.json {
        let report = JsonReport::new(&result, records);
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("Relatório JSON: {}", json_path.display());
    }

    Ok(())
}

pub fn run_classify(file: &Path) -> Result<()> {
    let text = PdfTextExtractor::new()
        .extract_file(file)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;
    let analysis = analyze_text(&text);

    match &analysis.company_name {
        Some(name) => println!("Empresa: {}", name),
        None => {
            warn!("No company name found in {}", file.display());
            println!("Empresa: (não identificada)");
        }
    }
    println!(
        "Parcelamento RF: {}",
        yes_no(analysis.classification.receita_federal)
    );
    println!("Parcelamento PGFN: {}", yes_no(analysis.classification.pgfn));

    Ok(())
}
