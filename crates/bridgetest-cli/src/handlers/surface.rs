//! Surface command handler

use crate::cli::SurfaceArgs;
use crate::error::Result;
use crate::output::OutputWriter;

/// Handle the surface command
pub fn handle_surface(args: SurfaceArgs, output: &mut OutputWriter) -> Result<()> {
    let surface = bridgetest_core::surface();
    tracing::debug!(
        functions = surface.functions.len(),
        structs = surface.structs.len(),
        "Listing surface"
    );
    output.surface(&surface, args.symbols)
}
