//! Plain data records produced by a stack capture.
//!
//! A [`Stacktrace`] is built once per capture and handed to whoever asked for it;
//! nothing in this workspace mutates it afterwards. Mapping these records onto a
//! wire format is the job of the event serializer, which can reflect over them
//! through [`facet::Facet`].

use facet::Facet;
use std::num::NonZeroUsize;

/// Call stack at the moment of capture, innermost frame first.
#[derive(Facet, Debug, Clone, Default, PartialEq, Eq)]
pub struct Stacktrace {
    frames: Vec<StacktraceFrame>,
}

impl Stacktrace {
    pub fn new(frames: Vec<StacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[StacktraceFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn into_frames(self) -> Vec<StacktraceFrame> {
        self.frames
    }
}

impl FromIterator<StacktraceFrame> for Stacktrace {
    fn from_iter<I: IntoIterator<Item = StacktraceFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Stacktrace {
    type Item = StacktraceFrame;
    type IntoIter = std::vec::IntoIter<StacktraceFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stacktrace {
    type Item = &'a StacktraceFrame;
    type IntoIter = std::slice::Iter<'a, StacktraceFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// One level of the call stack.
///
/// Empty strings and empty vectors mean "unknown" and are meant to be omitted
/// by serializers. `in_app` is always meaningful.
#[derive(Facet, Debug, Clone, Default, PartialEq, Eq)]
pub struct StacktraceFrame {
    /// Display path with well-known source roots trimmed off.
    pub filename: String,
    /// Path exactly as reported by the symbolizer.
    pub absolute_path: String,
    pub function: String,
    pub module: String,
    /// 1-based, 0 when unknown.
    pub line: u32,
    /// 1-based, 0 when unknown.
    pub column: u32,
    pub context_line: Option<String>,
    pub pre_context: Vec<String>,
    pub post_context: Vec<String>,
    pub in_app: bool,
}

impl StacktraceFrame {
    pub fn has_context(&self) -> bool {
        self.context_line.is_some() || !self.pre_context.is_empty() || !self.post_context.is_empty()
    }
}

/// How many source lines to attach around each frame's line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextDepth {
    /// No source context at all.
    #[default]
    None,
    /// Only the frame's own line.
    CurrentLine,
    /// Up to `n` lines on each side of the frame's line, `2n + 1` in total.
    Surrounding(NonZeroUsize),
}

impl ContextDepth {
    pub fn surrounding(lines: usize) -> Self {
        NonZeroUsize::new(lines).map_or(Self::None, Self::Surrounding)
    }

    /// Lines kept on each side of the target, `None` when context is disabled.
    pub fn radius(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::CurrentLine => Some(0),
            Self::Surrounding(lines) => Some(lines.get()),
        }
    }
}

/// `0` disables context, `-1` keeps only the current line and any positive
/// value is a radius. Other negative values disable context.
impl From<i32> for ContextDepth {
    fn from(raw: i32) -> Self {
        match raw {
            -1 => Self::CurrentLine,
            lines if lines > 0 => Self::surrounding(lines as usize),
            _ => Self::None,
        }
    }
}
