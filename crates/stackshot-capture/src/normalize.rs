use crate::config::TrimConfig;

/// Turns absolute source paths into short display paths by trimming known
/// source roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNormalizer {
    prefixes: Vec<String>,
}

impl PathNormalizer {
    pub fn new(config: &TrimConfig) -> Self {
        Self::from_prefixes(config.std_root.iter().chain(&config.search_path))
    }

    /// Every prefix is stored with a trailing `/` so it only ever matches whole
    /// path segments. Empty prefixes are dropped.
    pub fn from_prefixes<I>(prefixes: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .filter_map(|prefix| {
                let prefix = prefix.as_ref();
                match prefix {
                    "" => None,
                    p if p.ends_with('/') => Some(p.to_owned()),
                    p => Some(format!("{p}/")),
                }
            })
            .collect();
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Strips the first matching root from `absolute_path`.
    ///
    /// Paths under no configured root are returned as they are, except for the
    /// `/rustc/<commit>/` prefix rustc bakes into the standard library's debug
    /// info, which is always removed.
    pub fn normalize<'p>(&self, absolute_path: &'p str) -> &'p str {
        for prefix in &self.prefixes {
            if let Some(trimmed) = absolute_path.strip_prefix(prefix.as_str()) {
                return trimmed;
            }
        }
        strip_rustc_remap(absolute_path)
    }
}

fn strip_rustc_remap(path: &str) -> &str {
    let Some(after) = path.strip_prefix("/rustc/") else {
        return path;
    };
    match after.split_once('/') {
        Some((commit, rest)) if commit.len() == 40 && commit.bytes().all(|b| b.is_ascii_hexdigit()) => {
            rest
        }
        _ => path,
    }
}
