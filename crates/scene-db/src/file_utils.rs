use std::path::{Path, PathBuf};

use crate::Options;

/// Extension of `path`, lower-cased, without the dot. Empty when absent.
pub fn lower_case_file_extension(path: &Path) -> String {
    path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).unwrap_or_default()
}

/// Resolves `path` to an existing file.
///
/// The path is tried as given, then under each search path, first joined
/// whole and then by bare file name.
pub fn find_data_file(path: &Path, options: &Options) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let file_name = path.file_name();
    for dir in &options.search_paths {
        let joined = dir.join(path);
        if joined.is_file() {
            return Some(joined);
        }

        if let Some(name) = file_name {
            let by_name = dir.join(name);
            if by_name.is_file() {
                return Some(by_name);
            }
        }
    }

    log::debug!("{} not found in {} search paths", path.display(), options.search_paths.len());
    None
}
