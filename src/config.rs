use std::path::PathBuf;

/// Namespace (category) atoms are validated under when none is configured
pub const DEFAULT_NAMESPACE: &str = "dev-python";

/// Environment variable overriding the namespace
pub const NAMESPACE_ENV: &str = "ATOM_NAMER_NAMESPACE";

/// Returns the namespace to validate atoms under.
/// Uses $ATOM_NAMER_NAMESPACE if set and non-empty, otherwise DEFAULT_NAMESPACE.
pub fn namespace() -> String {
    namespace_with_env(std::env::var(NAMESPACE_ENV).ok())
}

/// Returns the path to the data directory for atom-namer.
/// Uses $XDG_DATA_HOME/atom-namer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/atom-namer,
/// or ./atom-namer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("atom-namer.log")
}

fn namespace_with_env(namespace: Option<String>) -> String {
    namespace
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("atom-namer")
}
