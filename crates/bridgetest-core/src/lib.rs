//! bridgetest Core - reference surface and conformance suite for a
//! cross-language boundary contract
//!
//! This crate holds the native side of the contract and everything needed
//! to check an implementation of it.
//!
//! # Main Components
//!
//! - **Surface types**: [`StructA`] and [`StructB`], value types with copying accessors
//! - **Free functions**: the seven functions of the surface in [`functions`]
//! - **Value model**: [`Value`], [`ValueKind`] and the lossless [`Marshal`] trait
//! - **Surface descriptors**: the call surface as data, plus dynamic [`invoke`]
//! - **Conformance**: the [`Boundary`] trait and [`run_suite`]
//!
//! # Example
//!
//! ```
//! use bridgetest_core::{run_suite, NativeBoundary, Tier};
//!
//! let report = run_suite(&NativeBoundary, Tier::Asserted);
//! assert_eq!(report.failed(), 0);
//! ```

pub mod boundary;
pub mod conformance;
pub mod error;
pub mod functions;
pub mod surface;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use boundary::{Boundary, InnerAccess, NativeBoundary, OuterAccess};
pub use conformance::{run_suite, Check, ConformanceReport, Tier};
pub use error::{Error, Result};
pub use surface::{invoke, surface, FunctionSignature, Surface};
pub use types::{StructA, StructB};
pub use value::{Marshal, Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
