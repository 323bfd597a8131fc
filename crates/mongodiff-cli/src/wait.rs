//! Pause between the two snapshots

use mongodiff_core::diff::{Formatter, Style};
use mongodiff_core::{ExError, ExErrorKind, Result};

fn signal_error(err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("wait_for_signal")
        .with_message(err.to_string())
}

/// Block until the process receives Ctrl+C
///
/// # Errors
///
/// `Internal` when the runtime or the signal handler cannot be set up.
pub fn wait_for_interrupt(formatter: &dyn Formatter) -> Result<()> {
    println!(
        "{}{}{}",
        formatter.paint(Style::Notice, "Send SIGINT ("),
        formatter.paint(Style::Alert, "Ctrl+C"),
        formatter.paint(
            Style::Notice,
            ") when you have finished inserting the data you want to capture"
        )
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(signal_error)?;
    runtime.block_on(tokio::signal::ctrl_c()).map_err(signal_error)?;

    println!(
        "{}{}",
        formatter.paint(Style::Notice, "Signal received: "),
        formatter.paint(Style::Alert, "interrupt")
    );
    Ok(())
}
