use std::fs;
use std::path::{Path, PathBuf};

use pocketsage_core::commands::{context, import};
use pocketsage_core::import::ImportOutcome;
use tempfile::TempDir;

pub fn temp_home(prefix: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("create temp dir");
    let home = dir.path().join("sage-home");
    (dir, home)
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

/// Imports CSV content into the store rooted at `home`.
pub fn import_csv(home: &Path, body: &str) -> ImportOutcome {
    let fixture_dir = tempfile::Builder::new()
        .prefix("pocketsage-fixture")
        .tempdir()
        .expect("create fixture dir");
    let path = write_fixture(fixture_dir.path(), "rows.csv", body);
    import::run_with_home_override(&path.display().to_string(), false, Some(home))
        .expect("import fixture")
}

pub fn context_for(home: &Path, question: &str) -> context::ContextData {
    context::run_with_home_override(question, Some(home)).expect("build context")
}

pub fn db_path(home: &Path) -> PathBuf {
    home.join("finance.db")
}
