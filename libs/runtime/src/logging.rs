use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{filter::FilterFn, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- level helpers --------

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// Returns true if target == prefix or target starts with "prefix::"
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

/// Max level per target prefix, with a catch-all for unmatched targets.
/// `None` means the sink is disabled for that target.
#[derive(Clone, Debug, Default)]
struct LevelTable {
    default: Option<Level>,
    by_target: Vec<(String, Option<Level>)>,
}

impl LevelTable {
    fn resolve(&self, target: &str) -> Option<Level> {
        // longest prefix wins so "market::infra" can override "market"
        self.by_target
            .iter()
            .filter(|(prefix, _)| matches_target_prefix(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, level)| *level)
            .unwrap_or(self.default)
    }

    fn allows(&self, meta: &tracing::Metadata<'_>) -> bool {
        self.resolve(meta.target())
            .is_some_and(|max| meta.level() <= &max)
    }
}

fn console_levels(cfg: &LoggingConfig) -> LevelTable {
    LevelTable {
        default: cfg
            .get(DEFAULT_SECTION)
            .and_then(|s| parse_tracing_level(&s.console_level)),
        by_target: explicit_sections(cfg)
            .map(|(name, s)| (name.clone(), parse_tracing_level(&s.console_level)))
            .collect(),
    }
}

fn file_levels(cfg: &LoggingConfig) -> LevelTable {
    let file_level = |s: &Section| {
        if s.file.trim().is_empty() {
            None
        } else {
            parse_tracing_level(&s.file_level)
        }
    };
    LevelTable {
        default: cfg.get(DEFAULT_SECTION).and_then(file_level),
        by_target: explicit_sections(cfg)
            .map(|(name, s)| (name.clone(), file_level(s)))
            .collect(),
    }
}

fn explicit_sections(cfg: &LoggingConfig) -> impl Iterator<Item = (&String, &Section)> {
    cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
}

// -------- rotating file sinks --------

#[derive(Clone)]
struct RotatingFile(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

/// A writer that may have no destination; writes are then dropped.
struct MaybeFile(Option<RotatingFile>);

impl Write for MaybeFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes events to log files by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotatingFile>,
    by_target: HashMap<String, RotatingFile>,
}

impl FileRouter {
    fn resolve(&self, target: &str) -> Option<RotatingFile> {
        self.by_target
            .iter()
            .filter(|(prefix, _)| matches_target_prefix(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_target.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeFile;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeFile(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeFile(self.resolve(meta.target()))
    }
}

/// Relative log paths are resolved against `base_dir` (the configured home dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn open_rotating_file(
    log_path: &Path,
    max_bytes: usize,
    max_backups: usize,
) -> std::io::Result<RotatingFile> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_backups)),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotatingFile(Arc::new(Mutex::new(rot))))
}

fn open_section_file(name: &str, section: &Section, base_dir: &Path) -> Option<RotatingFile> {
    if section.file.trim().is_empty() {
        return None;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let max_backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
    let log_path = resolve_log_path(&section.file, base_dir);

    match open_rotating_file(&log_path, max_bytes as usize, max_backups) {
        Ok(writer) => Some(writer),
        Err(e) => {
            eprintln!(
                "Failed to open log file for '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    if let Some(section) = cfg.get(DEFAULT_SECTION) {
        router.default = open_section_file(DEFAULT_SECTION, section, base_dir);
    }
    for (name, section) in explicit_sections(cfg) {
        if let Some(writer) = open_section_file(name, section, base_dir) {
            router.by_target.insert(name.clone(), writer);
        }
    }
    router
}

// -------- public init --------

/// Install the global subscriber from the logging configuration.
/// - `cfg`: target → section map, "default" is the catch-all
/// - `base_dir`: directory relative log file paths are resolved against
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    let console = console_levels(cfg);
    // Console output goes to stderr; stdout carries command results.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(FilterFn::new(move |meta| console.allows(meta)));

    let router = build_file_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let files = file_levels(cfg);
    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(FilterFn::new(move |meta| files.allows(meta)));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_backups: Some(2),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn test_logging_level_parsing() {
        assert_eq!(parse_tracing_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_tracing_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("Info"), Some(Level::INFO));
        assert_eq!(parse_tracing_level("warn"), Some(Level::WARN));
        assert_eq!(parse_tracing_level("ERROR"), Some(Level::ERROR));
        assert_eq!(parse_tracing_level("off"), None);
        assert_eq!(parse_tracing_level("none"), None);
        assert_eq!(parse_tracing_level("invalid"), Some(Level::INFO));
    }

    #[test]
    fn test_target_prefix_matching() {
        assert!(matches_target_prefix("market", "market"));
        assert!(matches_target_prefix("market::domain::service", "market"));
        assert!(!matches_target_prefix("market_server", "market"));
        assert!(!matches_target_prefix("sea_orm", "market"));
    }

    #[test]
    fn test_console_levels_prefer_explicit_sections() {
        let mut cfg = default_logging_config();
        cfg.insert("sea_orm".into(), section("warn", "", ""));
        cfg.insert("market::infra".into(), section("off", "", ""));

        let table = console_levels(&cfg);

        assert_eq!(table.resolve("market::domain"), Some(Level::INFO));
        assert_eq!(table.resolve("sea_orm::driver"), Some(Level::WARN));
        assert_eq!(table.resolve("market::infra::storage"), None);
    }

    #[test]
    fn test_file_levels_disable_sections_without_file() {
        let mut cfg = default_logging_config();
        cfg.insert("sqlx".into(), section("info", "", "debug"));
        cfg.insert("market".into(), section("info", "logs/market.log", "trace"));

        let table = file_levels(&cfg);

        assert_eq!(table.resolve("sqlx::query"), None);
        assert_eq!(table.resolve("market::api"), Some(Level::TRACE));
        assert_eq!(table.resolve("other"), Some(Level::DEBUG));
    }

    #[test]
    fn test_file_paths_resolved_against_home_dir() {
        let tmp = tempdir().unwrap();
        let base_dir = tmp.path();

        let resolved = resolve_log_path("logs/test.log", base_dir);
        assert!(resolved.starts_with(base_dir));
        assert!(resolved.ends_with("logs/test.log"));

        let absolute = base_dir.join("abs.log");
        assert_eq!(
            resolve_log_path(&absolute.to_string_lossy(), Path::new("/elsewhere")),
            absolute
        );
    }

    #[test]
    fn test_open_rotating_file_creates_parent() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("nested/dir/app.log");

        let res = open_rotating_file(&p, 128 * 1024, 2);
        assert!(res.is_ok(), "writer should be created");
        assert!(p.parent().unwrap().exists(), "parent dir must be created");
    }

    #[test]
    fn test_file_router_falls_back_to_default() {
        let tmp = tempdir().unwrap();
        let mut cfg = default_logging_config();
        cfg.insert("market".into(), section("info", "logs/market-only.log", "debug"));
        cfg.insert("sqlx".into(), section("info", "", "debug"));

        let router = build_file_router(&cfg, tmp.path());

        assert!(router.default.is_some());
        assert!(router.by_target.contains_key("market"));
        assert!(!router.by_target.contains_key("sqlx"));
        assert!(router.resolve("market::domain").is_some());
        assert!(router.resolve("anything").is_some());
    }
}
