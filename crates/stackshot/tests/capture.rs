use stackshot::{ContextDepth, FileLineCache, PathNormalizer, StackWalker, Stacktrace};

#[inline(never)]
fn capture_here(skip: usize, depth: ContextDepth) -> Stacktrace {
    let trace = stackshot::capture(skip, depth, &["capture"]);
    std::hint::black_box(trace)
}

fn functions(trace: &Stacktrace) -> Vec<String> {
    trace.frames().iter().map(|f| f.function.clone()).collect()
}

#[test]
fn first_frame_is_the_caller() {
    let trace = capture_here(0, ContextDepth::None);
    let first = trace.frames().first().expect("stack must not be empty");

    assert_eq!(first.function, "capture_here");
    assert_eq!(first.module, "capture");
    assert!(first.in_app);
    assert!(first.line > 0);
    assert!(first.absolute_path.ends_with("capture.rs"), "{}", first.absolute_path);
}

#[test]
fn skip_starts_further_up_the_stack() {
    let trace = capture_here(1, ContextDepth::None);
    let first = trace.frames().first().expect("stack must not be empty");
    assert_eq!(first.function, "skip_starts_further_up_the_stack");
}

#[test]
fn each_skip_drops_exactly_one_frame() {
    let full = functions(&capture_here(0, ContextDepth::None));
    let skipped = functions(&capture_here(1, ContextDepth::None));
    assert_eq!(&full[1..], &skipped[..]);
}

#[test]
fn library_frames_are_not_in_app() {
    let trace = capture_here(0, ContextDepth::None);
    assert!(trace.frames().iter().any(|frame| !frame.in_app));
    for frame in &trace {
        if frame.module.starts_with("core::") || frame.module.starts_with("std::") {
            assert!(!frame.in_app, "{}::{}", frame.module, frame.function);
        }
    }
}

#[test]
fn no_context_unless_asked() {
    let trace = capture_here(0, ContextDepth::None);
    assert!(trace.frames().iter().all(|frame| !frame.has_context()));
}

#[test]
fn current_line_context_has_no_neighbours() {
    let trace = capture_here(0, ContextDepth::CurrentLine);
    let first = &trace.frames()[0];
    let line = first.context_line.as_deref().expect("test source is readable");
    assert!(line.contains("stackshot::capture("), "{line}");

    for frame in &trace {
        assert!(frame.pre_context.is_empty());
        assert!(frame.post_context.is_empty());
    }
}

#[test]
fn surrounding_context_is_bounded() {
    let trace = capture_here(0, ContextDepth::from(2));
    let first = &trace.frames()[0];
    assert_eq!(first.pre_context.len(), 2);
    assert_eq!(first.post_context.len(), 2);
    assert!(first.pre_context[1].contains("fn capture_here"));

    for frame in &trace {
        assert!(frame.pre_context.len() <= 2);
        assert!(frame.post_context.len() <= 2);
    }
}

#[test]
fn custom_walker_trims_its_own_roots() {
    let normalizer = PathNormalizer::from_prefixes([env!("CARGO_MANIFEST_DIR")]);
    let cache = FileLineCache::new();
    let walker = StackWalker::new(&normalizer, &cache);

    let trace = stackshot::capture_with(&walker, 0, ContextDepth::CurrentLine, &["capture"]);
    let first = &trace.frames()[0];

    assert_eq!(first.function, "custom_walker_trims_its_own_roots");
    assert_eq!(first.filename, "tests/capture.rs");
    assert!(first.context_line.is_some());
    assert!(!cache.is_empty());
}

#[test]
fn concurrent_captures_are_independent() {
    let traces: Vec<Stacktrace> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| capture_here(0, ContextDepth::surrounding(1))))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("capture thread panicked"))
            .collect()
    });

    for trace in &traces {
        let first = &trace.frames()[0];
        assert_eq!(first.function, "capture_here");
        assert_eq!(first.context_line, traces[0].frames()[0].context_line);
    }
}
