use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{info, info_span, trace, warn};

use crm_ingest::read_csv_table;
use crm_model::Partition;
use crm_output::{BatchReport, write_batch_report, write_partition};
use crm_store::{CustomerStore, SqliteStore};
use crm_transform::RecordPipeline;

use crate::cli::{RegionsArgs, RunArgs};
use crate::config::{load_config, resolve_run_config};
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::BatchResult;

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let config = load_config(args.config.as_deref()).context("load configuration")?;
    config.validate().context("validate configuration")?;
    let mut table = Table::new();
    table.set_header(vec!["Code"]);
    apply_table_style(&mut table);
    for code in &config.valid_regions {
        table.add_row(vec![code.as_str()]);
    }
    println!("{table}");
    println!("{} region codes", config.valid_regions.len());
    Ok(())
}

pub fn run_batch(args: &RunArgs) -> Result<BatchResult> {
    let config = resolve_run_config(args).context("load configuration")?;
    let source = config
        .source
        .clone()
        .ok_or_else(|| anyhow!("missing input path"))?;
    let origin = config.origin_for(&source);
    let batch_span = info_span!("batch", source = %source.display());
    let _batch_guard = batch_span.enter();

    // =========================================================================
    // Stage 1: Ingest - load the whole source table; failure is fatal
    // =========================================================================
    let ingest_start = Instant::now();
    let table = info_span!("ingest")
        .in_scope(|| read_csv_table(&source, config.delimiter_byte()))
        .with_context(|| format!("load {}", source.display()))?;
    info!(
        row_count = table.len(),
        column_count = table.headers.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Normalize - prune, standardize, dedupe, normalize, partition
    // =========================================================================
    let normalize_start = Instant::now();
    let pipeline = RecordPipeline::new(config.clone()).context("build pipeline")?;
    let outcome = pipeline
        .run(&table, &origin)
        .with_context(|| format!("normalize {}", source.display()))?;
    info!(
        accepted = outcome.stats.accepted,
        rejected = outcome.stats.rejected,
        duration_ms = normalize_start.elapsed().as_millis(),
        "normalize complete"
    );
    log_rejections(&outcome.partition);

    // =========================================================================
    // Stage 3: Report - written on dry runs too, it never touches the tables
    // =========================================================================
    let report = match &args.report {
        Some(path) => {
            let report = BatchReport::new(
                &origin,
                outcome.stats,
                &outcome.partition,
                &config.valid_regions,
            );
            write_batch_report(path, &report)
                .with_context(|| format!("write report {}", path.display()))?;
            Some(path.clone())
        }
        None => None,
    };

    if args.dry_run {
        info!("dry run, no tables written");
        return Ok(BatchResult {
            source,
            origin,
            stats: outcome.stats,
            outputs: None,
            report,
            store: None,
            dry_run: true,
        });
    }

    // =========================================================================
    // Stage 4: Output - accepted and rejected tables
    // =========================================================================
    let output_start = Instant::now();
    let outputs = info_span!("output", output_dir = %config.output_dir.display())
        .in_scope(|| {
            write_partition(
                &outcome.partition,
                &config.accepted_path(),
                &config.rejected_path(),
            )
        })
        .context("write output tables")?;
    info!(
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    // =========================================================================
    // Stage 5: Load - insert new customers, existing identities untouched
    // =========================================================================
    let store = match &config.database {
        Some(path) => {
            let load_start = Instant::now();
            let summary = info_span!("load", database = %path.display()).in_scope(|| {
                let mut store = SqliteStore::open(path)?;
                store.insert_new(&outcome.partition.accepted)
            });
            let summary = summary.with_context(|| format!("load into {}", path.display()))?;
            if summary.skipped_missing_identity > 0 {
                warn!(
                    skipped = summary.skipped_missing_identity,
                    "accepted records without identity were not loaded"
                );
            }
            info!(
                inserted = summary.inserted,
                already_present = summary.already_present,
                duration_ms = load_start.elapsed().as_millis(),
                "load complete"
            );
            Some(summary)
        }
        None => None,
    };

    Ok(BatchResult {
        source,
        origin,
        stats: outcome.stats,
        outputs: Some(outputs),
        report,
        store,
        dry_run: false,
    })
}

fn log_rejections(partition: &Partition) {
    for rejected in &partition.rejected {
        let record = &rejected.record;
        let name = format!(
            "{} {}",
            record.name.given_name(),
            record.name.family_name()
        );
        trace!(
            name = redact_value(name.trim()),
            phone = redact_value(record.phone.as_str()),
            region = %record.region,
            reasons = ?rejected.reasons,
            "record rejected"
        );
    }
}
