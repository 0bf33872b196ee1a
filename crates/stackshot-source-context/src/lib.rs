//! Source lines around a stack frame's location.
//!
//! File contents come from a [`FileLineCache`], so a file that shows up in many
//! frames (or many captures) is read from disk once.

mod cache;

pub use cache::{FileLineCache, FileLines, FileSource, FsSource};

use stackshot_types::ContextDepth;
use std::path::Path;

/// The window of lines extracted around one target line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceContext {
    pub pre_context: Vec<String>,
    pub context_line: String,
    pub post_context: Vec<String>,
}

/// Extracts the lines around 1-based `line` of `file`.
///
/// The window is clipped at both ends of the file. Returns `None` when context
/// is disabled, the file can't be read, or `line` is 0 or past the end of the
/// file.
pub fn source_context(
    cache: &FileLineCache,
    file: &Path,
    line: u32,
    depth: ContextDepth,
) -> Option<SourceContext> {
    let radius = depth.radius()?;
    let target = (line as usize).checked_sub(1)?;
    let lines = cache.lines_of(file)?;
    window(&lines, target, radius)
}

fn window(lines: &[Vec<u8>], target: usize, radius: usize) -> Option<SourceContext> {
    if target >= lines.len() {
        return None;
    }

    let start = target.saturating_sub(radius);
    let end = target.saturating_add(radius).saturating_add(1).min(lines.len());

    Some(SourceContext {
        pre_context: lines[start..target].iter().map(|l| decode(l)).collect(),
        context_line: decode(&lines[target]),
        post_context: lines[target + 1..end].iter().map(|l| decode(l)).collect(),
    })
}

fn decode(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}
