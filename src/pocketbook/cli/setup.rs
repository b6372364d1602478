use clap::Parser;
use directories::ProjectDirs;
use pocketbook::error::{BookError, Result};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "pocketbook", bin_name = "pocketbook", version = get_version())]
#[command(about = "Interactive contact book and tagged notebook", long_about = None)]
pub struct Cli {
    /// Directory holding contacts.json, notes.json and config.json
    #[arg(long, env = "POCKETBOOK_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// The explicit directory if one was given, else the per-user data directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "pocketbook", "pocketbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BookError::Persistence("could not determine a data directory".into()))
}
