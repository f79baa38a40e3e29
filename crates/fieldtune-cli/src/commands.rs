use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, trace, warn};

use fieldtune_ingest::CoverageReport;
use fieldtune_recommend::EngineOptions;
use fieldtune_report::{
    ReportMeta, build_rows, load_disable_list, write_csv, write_markdown,
};
use fieldtune_store::ConfigStore;
use fieldtune_validate::{AcceptBroken, Session};

use crate::cli::{ApplyArgs, CheckArgs, RecommendArgs};
use crate::logging::redact_value;
use crate::summary::{print_change_log, print_recommendations, print_safety, print_warnings};

pub fn run_recommend(args: &RecommendArgs) -> Result<()> {
    let span = info_span!("recommend", config = %args.config.display());
    let _guard = span.enter();

    let mut session = open_session(&args.config, args.coverage.as_deref())?;
    session
        .check_integrity()
        .context("configuration integrity check")?;

    let options = EngineOptions {
        technical_fields: args.technical_fields.clone(),
        no_derived_identifiers: args.no_derived_identifiers,
    };
    let (recommendations, summary) = session.recommend(&options)?;
    let rows = build_rows(session.snapshot(), session.coverage(), &recommendations);
    for row in &rows {
        trace!(
            field = row.field_name.as_str(),
            samples = redact_value(&row.sample_values),
            "report row"
        );
    }

    print_recommendations(&rows, &summary);
    print_warnings(session.warnings());

    if let Some(path) = &args.out {
        write_csv(path, &rows)?;
        info!(path = %path.display(), "recommendation CSV saved");
        println!("Recommendations written to: {}", path.display());
    }
    if let Some(path) = &args.markdown {
        let meta = ReportMeta {
            collection: session.document().collection.clone(),
            coverage_generated_at: session.document().generated_at,
            counts: summary.counts,
            mean_coverage: summary.mean_coverage,
        };
        write_markdown(path, &meta, &rows)?;
        info!(path = %path.display(), "recommendation Markdown saved");
        println!("Markdown report written to: {}", path.display());
    }
    Ok(())
}

pub fn run_apply(args: &ApplyArgs) -> Result<()> {
    let span = info_span!("apply", config = %args.config.display());
    let _guard = span.enter();

    let candidates = collect_candidates(args)?;
    if candidates.is_empty() {
        bail!("no candidate fields given; use --disable or --disable-file");
    }

    let store = ConfigStore::new(&args.config);
    let mut session = open_session(&args.config, args.coverage.as_deref())?;
    session
        .check_integrity()
        .context("configuration integrity check")?;
    print_warnings(session.warnings());

    let report = session.simulate(&candidates)?;
    print_safety(&report);

    if args.dry_run {
        info!("dry run; configuration not modified");
        println!("Dry run - configuration not modified.");
        return Ok(());
    }

    let accept = if args.accept_broken {
        AcceptBroken::Yes
    } else {
        AcceptBroken::No
    };
    if !report.is_safe() && args.accept_broken {
        warn!(
            broken = report.broken_expansions.len(),
            "applying despite broken expansions (operator override)"
        );
    }
    let log = session.apply(&candidates, accept)?;
    session.persist(&store)?;
    print_change_log(&log);
    println!("Configuration persisted: {}", args.config.display());
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let span = info_span!("check", config = %args.config.display());
    let _guard = span.enter();

    let mut session = open_session(&args.config, None)?;
    session
        .check_integrity()
        .context("configuration integrity check")?;

    let snapshot = session.snapshot();
    println!("Fields: {}", snapshot.len());
    println!("Included: {}", snapshot.included_count());
    if session.warnings().is_empty() {
        println!("Integrity check passed with no warnings.");
    } else {
        println!(
            "Integrity check passed with {} warning(s).",
            session.warnings().len()
        );
    }
    print_warnings(session.warnings());
    Ok(())
}

fn open_session(config: &Path, coverage: Option<&Path>) -> Result<Session> {
    let store = ConfigStore::new(config);
    let document = store.load().context("load configuration")?;
    let report = match coverage {
        Some(path) => Some(CoverageReport::load(path).context("load coverage report")?),
        None => None,
    };
    Ok(Session::open(document, report.as_ref())?)
}

fn collect_candidates(args: &ApplyArgs) -> Result<Vec<String>> {
    let mut candidates = args.disable.clone();
    if let Some(path) = &args.disable_file {
        candidates.extend(load_disable_list(path)?);
    }
    Ok(candidates)
}
