//! URL list input
//!
//! Reads the URL sequence the batch operates on. The core treats URLs as
//! opaque strings; the only filtering done here is dropping blank lines.

use std::io;
use std::path::Path;

/// Reads URLs from a text file, one per line
///
/// Lines are trimmed of surrounding whitespace and blank lines are dropped.
/// URL syntax is not validated here - the HTTP client is the only validator.
///
/// # Arguments
///
/// * `path` - Path to a UTF-8 text file with one URL per line
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The non-blank lines, in file order
/// * `Err(io::Error)` - The file could not be read
pub fn read_urls_from_file(path: &Path) -> io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    tracing::info!("Read {} URLs from {}", urls.len(), path.display());

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_urls_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_one_url_per_line() {
        let file = create_urls_file("https://a.test/\nhttps://b.test/\n");
        let urls = read_urls_from_file(file.path()).unwrap();
        assert_eq!(urls, vec!["https://a.test/", "https://b.test/"]);
    }

    #[test]
    fn test_drops_blank_lines_and_trims() {
        let file = create_urls_file("  https://a.test/  \n\n   \nhttps://b.test/\n\n");
        let urls = read_urls_from_file(file.path()).unwrap();
        assert_eq!(urls, vec!["https://a.test/", "https://b.test/"]);
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        // Duplicates are permitted; each is fetched independently
        let file = create_urls_file("https://a.test/\nhttps://a.test/\n");
        let urls = read_urls_from_file(file.path()).unwrap();
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        let file = create_urls_file("");
        let urls = read_urls_from_file(file.path()).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = read_urls_from_file(Path::new("/nonexistent/urls.txt"));
        assert!(result.is_err());
    }
}
