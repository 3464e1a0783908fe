use std::env;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::OnceLock;

/// Browsers known to support `--app=<url>`, most preferred first.
const CANDIDATES: [&str; 6] = [
    "chromium-browser",
    "chromium",
    "google-chrome-stable",
    "google-chrome",
    "brave-browser",
    "microsoft-edge",
];

const FALLBACK: &str = "chromium-browser";

pub fn get_browser_executable() -> &'static str {
    static BROWSER_CACHE: OnceLock<&'static str> = OnceLock::new();

    *BROWSER_CACHE.get_or_init(|| {
        env::var_os("PATH")
            .and_then(|path| find_in_path(&CANDIDATES, &path))
            .unwrap_or(FALLBACK)
    })
}

fn find_in_path(candidates: &[&'static str], path_var: &OsStr) -> Option<&'static str> {
    let dirs: Vec<_> = env::split_paths(path_var).collect();

    candidates
        .iter()
        .copied()
        .find(|candidate| dirs.iter().any(|dir| is_executable(&dir.join(candidate))))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
