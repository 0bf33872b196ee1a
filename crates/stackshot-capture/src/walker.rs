use crate::introspect::{RawFrame, StackIntrospector};
use crate::normalize::PathNormalizer;
use crate::resolve::{is_in_app, resolve_names};
use stackshot_source_context::{FileLineCache, source_context};
use stackshot_types::{ContextDepth, Stacktrace, StacktraceFrame};
use tracing::trace;

/// Turns the frames an introspector exposes into a [`Stacktrace`].
#[derive(Debug, Clone, Copy)]
pub struct StackWalker<'a> {
    normalizer: &'a PathNormalizer,
    cache: &'a FileLineCache,
}

impl<'a> StackWalker<'a> {
    pub fn new(normalizer: &'a PathNormalizer, cache: &'a FileLineCache) -> Self {
        Self { normalizer, cache }
    }

    /// Builds frames for depths `skip`, `skip + 1`, ... until the introspector
    /// runs out of frames. Never fails: missing symbols, paths or source files
    /// only leave the matching fields empty.
    pub fn walk(
        &self,
        introspector: &dyn StackIntrospector,
        skip: usize,
        context_depth: ContextDepth,
        in_app_prefixes: &[&str],
    ) -> Stacktrace {
        let mut frames = Vec::new();
        for depth in skip.. {
            let Some(raw) = introspector.frame_at(depth) else {
                break;
            };
            frames.push(self.build_frame(introspector, raw, context_depth, in_app_prefixes));
        }
        trace!(skip, frames = frames.len(), "walked stack");
        Stacktrace::new(frames)
    }

    fn build_frame(
        &self,
        introspector: &dyn StackIntrospector,
        raw: RawFrame,
        context_depth: ContextDepth,
        in_app_prefixes: &[&str],
    ) -> StacktraceFrame {
        let (module, function) = resolve_names(introspector.resolve(raw.pc));
        let absolute_path = raw
            .file
            .as_deref()
            .map(|file| file.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut frame = StacktraceFrame {
            filename: self.normalizer.normalize(&absolute_path).to_owned(),
            in_app: is_in_app(&module, in_app_prefixes),
            absolute_path,
            function,
            module,
            line: raw.line,
            column: raw.column,
            ..StacktraceFrame::default()
        };

        if let Some(file) = raw.file.as_deref() {
            if let Some(context) = source_context(self.cache, file, raw.line, context_depth) {
                frame.pre_context = context.pre_context;
                frame.context_line = Some(context.context_line);
                frame.post_context = context.post_context;
            }
        }

        frame
    }
}
