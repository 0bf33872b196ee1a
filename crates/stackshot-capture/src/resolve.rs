/// Splits a full symbol name into `(module, function)`.
///
/// The split happens on the last path separator, so nested module paths stay
/// whole in `module`. Rust paths (`a::b::f`) split on the last top-level `::`,
/// ignoring any inside `<...>` qualifications; names without one fall back to
/// the dotted `module.function` form. A trailing rustc hash segment and a
/// trailing `::<...>` generic argument list are dropped, and the `·` method
/// separator is rewritten to `.`. Names with no separator at all have an empty
/// module.
pub fn split_symbol(raw: &str) -> (String, String) {
    let name = strip_generic_args(strip_symbol_hash(raw));
    let (module, function) = match last_separator(name) {
        Some((index, len)) => (&name[..index], &name[index + len..]),
        None => ("", name),
    };
    (module.to_owned(), function.replace('\u{b7}', "."))
}

/// [`split_symbol`] for a symbol that may not have resolved; unknown symbols
/// give two empty strings.
pub fn resolve_names(symbol: Option<String>) -> (String, String) {
    symbol.map(|name| split_symbol(&name)).unwrap_or_default()
}

/// Whether a frame from `module` belongs to the application: the `main` module
/// always does, anything else only when it starts with one of `in_app_prefixes`.
pub fn is_in_app(module: &str, in_app_prefixes: &[&str]) -> bool {
    module == "main" || in_app_prefixes.iter().any(|prefix| module.starts_with(prefix))
}

fn strip_symbol_hash(name: &str) -> &str {
    match name.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            head
        }
        _ => name,
    }
}

/// Drops a trailing turbofish, so `f::<u32>` names `f`.
fn strip_generic_args(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.last() != Some(&b'>') {
        return name;
    }
    let mut depth = 0usize;
    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            // `->` in fn pointer types
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth += 1,
            b'<' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return name[..i].strip_suffix("::").unwrap_or(name);
                }
            }
            _ => {}
        }
    }
    name
}

/// Byte index and length of the separator to split on.
fn last_separator(name: &str) -> Option<(usize, usize)> {
    let bytes = name.as_bytes();
    let mut depth = 0usize;
    let mut last_path = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                last_path = Some(i);
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    match last_path {
        Some(index) => Some((index, 2)),
        None => name.rfind('.').map(|index| (index, 1)),
    }
}
