//! Stack walking, symbol naming and path trimming.
//!
//! [`StackWalker`] drives a [`StackIntrospector`] frame by frame. Each frame's
//! symbol is split into module and function names, classified as application
//! or library code, given a display path by the [`PathNormalizer`], and
//! optionally enriched with source lines from a
//! [`FileLineCache`](stackshot_source_context::FileLineCache).
//! [`BacktraceIntrospector`] is the introspector for the running process.

mod config;
mod introspect;
mod normalize;
mod resolve;
mod unwind;
mod walker;

pub use config::{SOURCE_PATH_ENV, STD_ROOT_ENV, TrimConfig};
pub use introspect::{RawFrame, StackIntrospector};
pub use normalize::PathNormalizer;
pub use resolve::{is_in_app, resolve_names, split_symbol};
pub use unwind::BacktraceIntrospector;
pub use walker::StackWalker;
