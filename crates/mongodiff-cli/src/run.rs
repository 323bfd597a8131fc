//! The capture pipeline behind the binary

use crate::args::Cli;
use crate::wait::wait_for_interrupt;
use mongodiff_core::diff::{render_change_report, Formatter, Style};
use mongodiff_core::logging_facility;
use mongodiff_core::{capture_changes, emit, Result};
use mongodiff_core_types::RunId;
use mongodiff_store::{probe, MongoSource};
use std::path::Path;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe, connect, snapshot twice, report and emit into the working directory
///
/// # Errors
///
/// The first failure of any phase; nothing is written unless every phase
/// before emission succeeded.
pub fn execute(cli: Cli) -> Result<()> {
    logging_facility::init(cli.log_format.profile());

    let run_id = RunId::new();
    let span = tracing::info_span!("capture_run", run_id = %run_id, database = %cli.db);
    let _guard = span.enter();

    let config = cli.run_config()?;
    let formatter = cli.formatter();

    println!(
        "{}",
        formatter.paint(Style::Notice, &format!("Checking if MongoDB is up... {}", cli.host))
    );
    probe(&cli.host, PROBE_TIMEOUT)?;
    let source = MongoSource::connect(&cli.connect_options())?;

    let changes = capture_changes(&source, &config.excludes, || {
        if cli.wait_for_signal {
            wait_for_interrupt(formatter.as_ref())
        } else {
            Ok(())
        }
    })?;

    print!("{}", render_change_report(&changes, formatter.as_ref()));
    if changes.is_empty() {
        return Ok(());
    }

    let report = emit(&source, &changes, &config, Path::new("."))?;
    println!(
        "{}",
        formatter.paint(
            Style::Notice,
            &format!(
                "Wrote {} files ({} documents) with prefix {}",
                report.written.len(),
                report.document_count,
                config.prefix
            )
        )
    );
    Ok(())
}
