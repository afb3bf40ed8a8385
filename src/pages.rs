use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::{evaluate_page, ImportanceTier, ProfileTable, ValidationResult};

/// What the user pointed us at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single page.
    Page(PathBuf),
    /// A wiki directory and the Markdown pages directly inside it, sorted.
    Wiki { dir: PathBuf, pages: Vec<PathBuf> },
}

/// Resolve a path into a single page or a whole wiki.
pub fn resolve_target(path: &Path) -> Result<Target> {
    if path.is_file() {
        return Ok(Target::Page(path.to_path_buf()));
    }
    if path.is_dir() {
        let pages = markdown_files(path)?;
        if pages.is_empty() {
            bail!("No Markdown files found in {}", path.display());
        }
        return Ok(Target::Wiki {
            dir: path.to_path_buf(),
            pages,
        });
    }
    bail!("No such file or directory: {}", path.display())
}

/// `*.md` files directly inside `dir`, sorted by path.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.md", glob::Pattern::escape(&dir.to_string_lossy()));

    let mut pages = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid path {}", dir.display()))? {
        match entry {
            Ok(path) if path.is_file() => pages.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping unreadable entry: {}", e),
        }
    }
    pages.sort();
    Ok(pages)
}

/// Read and score one page. Without an explicit tier, it is inferred from
/// the file name.
pub fn score_page(
    path: &Path,
    importance: Option<ImportanceTier>,
    profiles: &ProfileTable,
) -> Result<ValidationResult> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    let importance = importance.unwrap_or_else(|| ImportanceTier::infer(path));
    Ok(evaluate_page(
        &path.to_string_lossy(),
        &text,
        importance,
        profiles,
    ))
}

/// Score every page in parallel. Results keep the order of `paths`.
pub fn score_pages(paths: &[PathBuf], profiles: &ProfileTable) -> Result<Vec<ValidationResult>> {
    paths
        .par_iter()
        .map(|path| score_page(path, None, profiles))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_path() {
        let err = resolve_target(Path::new("/nonexistent/wiki")).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }

    #[test]
    fn test_resolve_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_target(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No Markdown files"));
    }

    #[test]
    fn test_markdown_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2.1-b.md", "index.md", "1.1-a.md", "notes.txt"] {
            fs::write(dir.path().join(name), "# x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let names: Vec<String> = markdown_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1.1-a.md", "2.1-b.md", "index.md"]);
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("1.1-overview.md");
        fs::write(&page, "# Overview").unwrap();
        assert_eq!(resolve_target(&page).unwrap(), Target::Page(page));
    }

    #[test]
    fn test_score_page_infers_importance() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("2.1-messaging.md");
        fs::write(&page, "# Messaging\n\nKafka topics.\n").unwrap();

        let inferred = score_page(&page, None, &ProfileTable::default()).unwrap();
        assert_eq!(inferred.importance, ImportanceTier::High);

        let explicit =
            score_page(&page, Some(ImportanceTier::Low), &ProfileTable::default()).unwrap();
        assert_eq!(explicit.importance, ImportanceTier::Low);
    }

    #[test]
    fn test_score_pages_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = ["1.1-a.md", "3.1-c.md", "index.md"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, "# Page\n").unwrap();
                path
            })
            .collect();
        let results = score_pages(&paths, &ProfileTable::default()).unwrap();
        let tiers: Vec<ImportanceTier> = results.iter().map(|r| r.importance).collect();
        assert_eq!(
            tiers,
            vec![ImportanceTier::High, ImportanceTier::Medium, ImportanceTier::Index]
        );
    }

    #[test]
    fn test_score_page_crlf_scores_like_lf() {
        let dir = tempfile::tempdir().unwrap();
        let lf = "# Orders\n\nOrders flow over REST.\n\n## Flow\n\n```mermaid\ngraph TD\n  A[order-service] --> B[payment-service]\n```\n\n```yaml\n# deploy/orders.yaml:L1-L20\nreplicas: 3\n```\n";
        let lf_page = dir.path().join("1.1-lf.md");
        let crlf_page = dir.path().join("1.1-crlf.md");
        fs::write(&lf_page, lf).unwrap();
        fs::write(&crlf_page, lf.replace('\n', "\r\n")).unwrap();

        let profiles = ProfileTable::default();
        let lf_result = score_page(&lf_page, None, &profiles).unwrap();
        let crlf_result = score_page(&crlf_page, None, &profiles).unwrap();
        assert_eq!(crlf_result.score, lf_result.score);
        assert_eq!(crlf_result.breakdown, lf_result.breakdown);
    }
}
