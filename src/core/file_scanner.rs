use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;
use crate::core::parsers::SourceKind;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Source files in path order.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                    Err(e) => tracing::warn!("invalid glob pattern '{}': {}", inc, e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!("include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    SourceKind::from_path(path).is_some()
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(result: &ScanResult) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scan_source_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("App.vue")).unwrap();
        File::create(dir_path.join("utils.ts")).unwrap();
        File::create(dir_path.join("main.mjs")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(dir_path, &[], &[], false);

        assert_eq!(result.files.len(), 3);
        let files = names(&result);
        assert!(files.iter().any(|f| f.ends_with("App.vue")));
        assert!(files.iter().any(|f| f.ends_with("main.mjs")));
        assert!(!files.iter().any(|f| f.ends_with("style.css")));
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("lib.js")).unwrap();
        File::create(dir_path.join("app.tsx")).unwrap();

        let result = scan_files(dir_path, &[], &["**/node_modules/**".to_owned()], false);

        assert_eq!(result.files.len(), 1);
        assert!(!names(&result).iter().any(|f| f.contains("node_modules")));
    }

    #[test]
    fn test_is_scannable_file() {
        assert!(is_scannable_file(Path::new("app.tsx")));
        assert!(is_scannable_file(Path::new("app.vue")));
        assert!(is_scannable_file(Path::new("app.cjs")));
        assert!(!is_scannable_file(Path::new("data.json")));
        assert!(!is_scannable_file(Path::new("README.md")));
    }

    #[test]
    fn test_scan_with_includes_and_dedup() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let components = dir_path.join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.vue")).unwrap();

        let lib = dir_path.join("lib");
        fs::create_dir(&lib).unwrap();
        File::create(lib.join("utils.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &["src".to_owned(), "src/components".to_owned(), "missing".to_owned()],
            &[],
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(names(&result)[0].ends_with("src/components/Button.vue"));
    }

    #[test]
    fn test_scan_ignores_test_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.tsx")).unwrap();
        File::create(dir_path.join("app.test.tsx")).unwrap();
        let tests_dir = dir_path.join("__tests__");
        fs::create_dir(&tests_dir).unwrap();
        File::create(tests_dir.join("helper.ts")).unwrap();

        assert_eq!(scan_files(dir_path, &[], &[], true).files.len(), 1);
        assert_eq!(scan_files(dir_path, &[], &[], false).files.len(), 3);
    }

    #[test]
    fn test_scan_with_glob_and_literal_ignores() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let pages = dir_path.join("src").join("pages");
        fs::create_dir_all(&pages).unwrap();
        File::create(pages.join("Home.vue")).unwrap();
        File::create(pages.join("Home.stories.tsx")).unwrap();

        let generated = dir_path.join("src").join("generated");
        fs::create_dir_all(&generated).unwrap();
        File::create(generated.join("types.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &["src/*".to_owned()],
            &["src/generated".to_owned(), "**/*.stories.tsx".to_owned()],
            false,
        );

        assert_eq!(result.files.len(), 1);
        assert!(names(&result)[0].ends_with("Home.vue"));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("file?.ts"));
        assert!(!is_glob_pattern("src"));
        assert!(!is_glob_pattern("app/[locale]"));
    }
}
