use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Platform base directory the default subdirectory is placed under.
/// Windows: `%APPDATA%`, everything else: `$HOME`.
fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Ok(PathBuf::from(appdata));
        }
    }
    dirs::home_dir().ok_or_else(|| anyhow!("unable to determine the user home directory"))
}

/// Expand a leading `~` into the user home directory.
fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the application home directory into an absolute path.
///
/// - `configured`: user-provided value; `None` selects `<platform base>/<default_subdir>`.
/// - relative values are resolved against the current working directory.
/// - when `create` is set the directory (and parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let mut path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => platform_base_dir()?.join(default_subdir),
    };

    if path.is_relative() {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        path = cwd.join(path);
    }

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home dir {}", path.display()))?;
    }

    Ok(normalize(&path))
}

/// Drop `.` components so the stored path is stable for display and comparison.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
