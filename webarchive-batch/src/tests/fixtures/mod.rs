use std::path::PathBuf;

/// Path of a test fixture by file name
pub fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from("src/tests/fixtures").join(file_name)
}
