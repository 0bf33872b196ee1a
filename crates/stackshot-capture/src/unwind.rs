use crate::introspect::{RawFrame, StackIntrospector};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Snapshot of the current thread's stack, unwound and symbolized by the
/// `backtrace` crate.
#[derive(Debug, Clone, Default)]
pub struct BacktraceIntrospector {
    frames: Vec<RawFrame>,
    /// Symbol names keyed by pc; recursive frames share an entry.
    names: HashMap<usize, String>,
}

impl BacktraceIntrospector {
    /// Unwinds the calling thread and keeps the frames above the function that
    /// starts at address `entry`.
    ///
    /// `entry` is the address of the capture entry point
    /// (`entry_fn as *const () as usize`), which must be `#[inline(never)]`.
    /// Its own frame and everything it called, the unwinder included, are
    /// dropped so depth 0 is the entry point's caller. If no frame on the stack
    /// starts at `entry` every frame is kept.
    #[inline(never)]
    pub fn snapshot_below(entry: usize) -> Self {
        let mut unwound = Vec::new();
        backtrace::trace(|frame| {
            unwound.push(frame.clone());
            true
        });

        let start = match unwound
            .iter()
            .position(|frame| frame.symbol_address() as usize == entry)
        {
            Some(index) => index + 1,
            None => {
                debug!(
                    entry,
                    frames = unwound.len(),
                    "capture entry point not on the stack, keeping every frame"
                );
                0
            }
        };

        let mut snapshot = Self::default();
        for frame in unwound[start..].iter().filter(|frame| !frame.ip().is_null()) {
            let (raw, name) = symbolize(frame);
            if let Some(name) = name {
                snapshot.names.entry(raw.pc).or_insert(name);
            }
            snapshot.frames.push(raw);
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl StackIntrospector for BacktraceIntrospector {
    fn frame_at(&self, depth: usize) -> Option<RawFrame> {
        self.frames.get(depth).cloned()
    }

    fn resolve(&self, pc: usize) -> Option<String> {
        self.names.get(&pc).cloned()
    }
}

fn symbolize(frame: &backtrace::Frame) -> (RawFrame, Option<String>) {
    let mut raw = RawFrame {
        pc: frame.ip() as usize,
        ..RawFrame::default()
    };
    let mut name = None;

    // Inlined callers are reported after the innermost function, which is the
    // one the pc actually sits in.
    let mut innermost = true;
    backtrace::resolve_frame(frame, |symbol| {
        if !innermost {
            return;
        }
        innermost = false;
        name = symbol.name().map(|name| format!("{name:#}"));
        raw.file = symbol.filename().map(Path::to_path_buf);
        raw.line = symbol.lineno().unwrap_or(0);
        raw.column = symbol.colno().unwrap_or(0);
    });

    (raw, name)
}
