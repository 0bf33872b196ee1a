use std::path::PathBuf;

/// What the runtime reports for one live frame before any naming is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    /// Program counter, used as the key for [`StackIntrospector::resolve`].
    pub pc: usize,
    pub file: Option<PathBuf>,
    /// 1-based, 0 when unknown.
    pub line: u32,
    /// 1-based, 0 when unknown.
    pub column: u32,
}

/// Access to the call stack and the symbols behind it.
///
/// Depth 0 is the innermost frame the introspector exposes; the walker counts
/// upwards from there until [`frame_at`](Self::frame_at) returns `None`.
pub trait StackIntrospector {
    /// The frame `depth` levels above the innermost one, `None` once the bottom
    /// of the stack has been passed.
    fn frame_at(&self, depth: usize) -> Option<RawFrame>;

    /// Full symbol name of the function containing `pc`, if known.
    fn resolve(&self, pc: usize) -> Option<String>;
}
