//! Call-stack snapshots for error reports.
//!
//! [`capture`] records the current thread's call stack as a [`Stacktrace`]:
//! one [`StacktraceFrame`] per live frame, innermost first, each with a module
//! and function name, an application/library classification, a short display
//! path and, on request, the surrounding source lines.
//!
//! ```rust
//! use stackshot::ContextDepth;
//!
//! let trace = stackshot::capture(0, ContextDepth::surrounding(3), &["my_app"]);
//! for frame in &trace {
//!     println!("{}:{} {}", frame.filename, frame.line, frame.function);
//! }
//! ```
//!
//! Capturing never fails. Symbols that can't be resolved, source files that
//! can't be read and lines past the end of a file only leave fields empty; a
//! thread whose stack can't be unwound yields an empty trace.
//!
//! # Configuration
//!
//! Display paths are produced by trimming known source roots, built once per
//! process from a [`TrimConfig`]. Call [`init`] early to pick them explicitly;
//! otherwise they come from [`TrimConfig::from_env`] on first capture:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `STACKSHOT_STD_ROOT` | Standard-library source root, tried first. |
//! | `RUSTUP_HOME`, `RUSTUP_TOOLCHAIN` | Fallback standard-library root: the toolchain's rust-src. |
//! | `STACKSHOT_SOURCE_PATH` | Colon-separated library source roots. |
//! | `CARGO_HOME` | Registry checkouts under `registry/src` are appended to the roots. |
//!
//! Source files are read once and cached for the life of the process.

use std::sync::OnceLock;
use tracing::debug;

pub use stackshot_capture::{
    BacktraceIntrospector, PathNormalizer, RawFrame, SOURCE_PATH_ENV, STD_ROOT_ENV,
    StackIntrospector, StackWalker, TrimConfig, is_in_app, split_symbol,
};
pub use stackshot_source_context::{
    FileLineCache, FileSource, FsSource, SourceContext, source_context,
};
pub use stackshot_types::{ContextDepth, Stacktrace, StacktraceFrame};

static NORMALIZER: OnceLock<PathNormalizer> = OnceLock::new();

/// Installs the process-wide source roots.
///
/// Only the first call (or the first capture, which falls back to
/// [`TrimConfig::from_env`]) takes effect; returns `false` if the roots were
/// already set.
pub fn init(config: TrimConfig) -> bool {
    let installed = NORMALIZER.set(PathNormalizer::new(&config)).is_ok();
    if !installed {
        debug!("source roots already initialized, ignoring new configuration");
    }
    installed
}

/// The process-wide normalizer used by [`capture`].
pub fn normalizer() -> &'static PathNormalizer {
    NORMALIZER.get_or_init(|| PathNormalizer::new(&TrimConfig::from_env()))
}

/// Captures the calling thread's stack.
///
/// With `skip == 0` the first frame is the function that called `capture`;
/// each extra unit of `skip` drops one more frame. Modules equal to `main` or
/// starting with one of `in_app_prefixes` are marked as application code.
#[inline(never)]
pub fn capture(skip: usize, context_depth: ContextDepth, in_app_prefixes: &[&str]) -> Stacktrace {
    let introspector = BacktraceIntrospector::snapshot_below(capture as *const () as usize);
    StackWalker::new(normalizer(), FileLineCache::global()).walk(
        &introspector,
        skip,
        context_depth,
        in_app_prefixes,
    )
}

/// Same as [`capture`], with a caller-provided normalizer and cache.
#[inline(never)]
pub fn capture_with(
    walker: &StackWalker<'_>,
    skip: usize,
    context_depth: ContextDepth,
    in_app_prefixes: &[&str],
) -> Stacktrace {
    let introspector = BacktraceIntrospector::snapshot_below(capture_with as *const () as usize);
    walker.walk(&introspector, skip, context_depth, in_app_prefixes)
}
