//! Word list loading utilities
//!
//! Lists are plain text, one word per line. Blank lines and lines starting
//! with `#` are skipped. Validation is left to [`Dictionary`](crate::core::Dictionary).

use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_oracle::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/answers.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_words(&content))
}

/// Extract the words of a list, in order
#[must_use]
pub fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn parse_skips_blanks_and_comments() {
        let words = parse_words("# answers\ncrane\n\n  slate  \n#irate\nIRATE\n");
        assert_eq!(words, vec!["crane", "slate", "IRATE"]);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_words("").is_empty());
        assert!(parse_words("\n\n# nothing\n").is_empty());
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new("wordlist");
        let path = dir.path().join("words.txt");
        fs::write(&path, "қазақ\r\nалма\n").unwrap();

        assert_eq!(load_from_file(&path).unwrap(), vec!["қазақ", "алма"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new("wordlist-missing");
        assert!(load_from_file(dir.path().join("absent.txt")).is_err());
    }
}
