//! Run command handler

use crate::cli::{Backend, RunArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use bridgetest_core::{run_suite, ConformanceReport, NativeBoundary, Tier};
use bridgetest_ffi::{live_allocations, FfiBoundary};
use tracing::{info, instrument, warn};

/// Handle the run command
#[instrument(skip(config, output))]
pub fn handle_run(args: RunArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let backend = args.backend.unwrap_or(config.suite.backend);
    let tier = args.tier.map(Tier::from).unwrap_or(config.suite.tier);

    let timer = Timer::with_details("run_command", &format!("{:?}/{}", backend, tier));
    info!(?backend, %tier, "Running conformance suite");

    let (report, leaked) = run_with_backend(backend, tier);
    output.report(&report, args.failures_only)?;

    if output.is_verbose() {
        output.info(&format!("Suite finished in {:.2?}", timer.elapsed()))?;
    }

    if leaked != 0 {
        warn!(leaked, "Handles left live after the suite");
        return Err(Error::other(format!("{} FFI handle(s) were not freed", leaked)));
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(Error::ConformanceFailed {
            backend: report.backend.clone(),
            failed: report.failed(),
            total: report.total(),
        })
    }
}

/// Run the suite against `backend`
///
/// Also returns how many FFI handles the run left allocated; always 0 for
/// the native backend.
pub fn run_with_backend(backend: Backend, tier: Tier) -> (ConformanceReport, usize) {
    match backend {
        Backend::Native => (run_suite(&NativeBoundary, tier), 0),
        Backend::Ffi => {
            let baseline = live_allocations();
            let report = run_suite(&FfiBoundary, tier);
            (report, live_allocations().saturating_sub(baseline))
        }
    }
}
