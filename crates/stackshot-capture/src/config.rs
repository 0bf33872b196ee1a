use std::path::Path;

/// Overrides the standard-library source root.
pub const STD_ROOT_ENV: &str = "STACKSHOT_STD_ROOT";
/// Colon-separated list of extra library source roots.
pub const SOURCE_PATH_ENV: &str = "STACKSHOT_SOURCE_PATH";

/// Source roots that get trimmed off frame paths, in the order they are tried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimConfig {
    /// Standard-library source root, tried first.
    pub std_root: Option<String>,
    /// Library source roots, tried after `std_root`.
    pub search_path: Vec<String>,
}

impl TrimConfig {
    pub fn new(std_root: impl Into<String>) -> Self {
        Self {
            std_root: Some(std_root.into()),
            search_path: Vec::new(),
        }
    }

    /// Appends every non-empty entry of a colon-separated path list.
    pub fn with_search_path(mut self, colon_separated: &str) -> Self {
        self.search_path.extend(
            colon_separated
                .split(':')
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned),
        );
        self
    }

    /// Reads the roots from the process environment.
    ///
    /// The standard-library root is `STACKSHOT_STD_ROOT`, or else the rust-src
    /// component of the rustup toolchain named by `RUSTUP_TOOLCHAIN` (under
    /// `RUSTUP_HOME`, default `~/.rustup`) when it is installed. The search path
    /// is `STACKSHOT_SOURCE_PATH` followed by every registry checkout under
    /// `$CARGO_HOME/registry/src` (default `~/.cargo`).
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let home = var("HOME");

        let rustup_home = var("RUSTUP_HOME").or_else(|| home.as_ref().map(|h| format!("{h}/.rustup")));
        let std_root = var(STD_ROOT_ENV).or_else(|| rustup_rust_src(rustup_home?, var("RUSTUP_TOOLCHAIN")?));

        let mut config = Self {
            std_root,
            search_path: Vec::new(),
        };
        if let Some(source_path) = var(SOURCE_PATH_ENV) {
            config = config.with_search_path(&source_path);
        }

        let cargo_home = var("CARGO_HOME").or_else(|| home.map(|h| format!("{h}/.cargo")));
        if let Some(cargo_home) = cargo_home {
            config
                .search_path
                .extend(registry_source_roots(Path::new(&cargo_home)));
        }

        config
    }
}

fn rustup_rust_src(rustup_home: String, toolchain: String) -> Option<String> {
    let path = format!("{rustup_home}/toolchains/{toolchain}/lib/rustlib/src/rust");
    Path::new(&path).is_dir().then_some(path)
}

fn registry_source_roots(cargo_home: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(cargo_home.join("registry").join("src")) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let mut roots: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    roots.sort();
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(label: &str) -> PathBuf {
        let base = std::env::temp_dir().join(format!(
            "stackshot-config-{label}-{}-{}",
            std::process::id(),
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock before unix epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&base).expect("failed to create temp dir");
        base
    }

    fn config_from(vars: &[(&str, &str)]) -> TrimConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrimConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn search_path_skips_empty_entries() {
        let config = TrimConfig::new("/usr/lib/rust").with_search_path("/a::/b:");
        assert_eq!(config.std_root.as_deref(), Some("/usr/lib/rust"));
        assert_eq!(config.search_path, ["/a", "/b"]);
    }

    #[test]
    fn explicit_variables_win() {
        let config = config_from(&[
            (STD_ROOT_ENV, "/opt/rust-src"),
            (SOURCE_PATH_ENV, "/work/vendor:/work/libs"),
            ("CARGO_HOME", "/nonexistent/stackshot/cargo"),
        ]);
        assert_eq!(config.std_root.as_deref(), Some("/opt/rust-src"));
        assert_eq!(config.search_path, ["/work/vendor", "/work/libs"]);
    }

    #[test]
    fn empty_environment_yields_no_roots() {
        assert_eq!(config_from(&[]), TrimConfig::default());
        assert_eq!(config_from(&[(STD_ROOT_ENV, "")]), TrimConfig::default());
    }

    #[test]
    fn missing_rustup_toolchain_is_ignored() {
        let config = config_from(&[
            ("RUSTUP_HOME", "/nonexistent/stackshot/rustup"),
            ("RUSTUP_TOOLCHAIN", "stable-x86_64-unknown-linux-gnu"),
        ]);
        assert_eq!(config.std_root, None);
    }

    #[test]
    fn installed_rustup_toolchain_supplies_std_root() {
        let rustup_home = temp_dir("rustup");
        let rust_src = rustup_home.join("toolchains/nightly/lib/rustlib/src/rust");
        std::fs::create_dir_all(&rust_src).expect("failed to create rust-src dir");

        let config = config_from(&[
            ("RUSTUP_HOME", rustup_home.to_str().expect("utf-8 temp path")),
            ("RUSTUP_TOOLCHAIN", "nightly"),
        ]);
        assert_eq!(
            config.std_root.as_deref(),
            Some(rust_src.to_str().expect("utf-8 temp path"))
        );

        std::fs::remove_dir_all(rustup_home).expect("failed to cleanup temp dir");
    }

    #[test]
    fn registry_checkouts_follow_the_search_path() {
        let cargo_home = temp_dir("cargo");
        let registry = cargo_home.join("registry/src");
        std::fs::create_dir_all(registry.join("index.crates.io-1949cf8c6b5b557f"))
            .expect("failed to create registry dir");
        std::fs::create_dir_all(registry.join("github.com-1ecc6299db9ec823"))
            .expect("failed to create registry dir");

        let config = config_from(&[
            (SOURCE_PATH_ENV, "/work/vendor"),
            ("CARGO_HOME", cargo_home.to_str().expect("utf-8 temp path")),
        ]);

        let expected = [
            "/work/vendor".to_owned(),
            registry.join("github.com-1ecc6299db9ec823").display().to_string(),
            registry.join("index.crates.io-1949cf8c6b5b557f").display().to_string(),
        ];
        assert_eq!(config.search_path, expected);

        std::fs::remove_dir_all(cargo_home).expect("failed to cleanup temp dir");
    }
}
