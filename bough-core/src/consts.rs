//! Constants shared by the query engine and the CLI.

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// Environment variable that overrides the configured git executable
pub const ENV_GIT_PATH: &str = "BOUGH_GIT";

/// Length of the abbreviated commit hashes reported in diffs
pub const SHORT_HASH_LEN: usize = 7;

/// Text reported in place of a commit that does not exist
pub const ABSENT_COMMIT: &str = "None";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "bough.toml";
