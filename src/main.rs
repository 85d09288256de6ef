//! MR Tuning Plots - Query 4 experiment charts
//!
//! Reads the reducer-count and slow-start experiment tables from the working
//! directory, renders one annotated line chart per table and prints a summary.

mod app;
mod charts;
mod config;
mod data;
mod report;
mod stats;

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    let outcome = app::run(Path::new("."));
    log::debug!("generated {} image(s)", outcome.generated.len());

    if outcome.exit_code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    use env_logger::{Builder, Env};
    use std::io::Write;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
