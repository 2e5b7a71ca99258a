/// Package name.
pub(crate) const PKG_NAME: &str = env!("CARGO_PKG_NAME");
/// Default configuration file name.
pub(crate) const CONFIG_NAME: &str = "config.toml";
/// Configuration file version written by this release.
pub(crate) const CONFIG_VERSION: &str = "1.0";
/// Number of backups kept when neither `--limit` nor the config file says otherwise.
pub(crate) const DEFAULT_LIMIT: i64 = 10;
