//! Reads a source file and prepares it for the lexer: lines keep their
//! original 1-based numbers, while blank lines and comment lines never reach
//! the rest of the pipeline.

use std::{fs, path::Path};

use log::debug;

use crate::error::{ErrorKind, WordyError, WordyResult};

/// Read a program from disk. A missing or unreadable file is a
/// `FILE_NOT_FOUND_ERROR`.
pub fn read_program(path: &Path) -> WordyResult<Vec<(String, usize)>> {
    debug!("reading program from '{}'", path.display());

    let contents = fs::read_to_string(path).map_err(|_| {
        WordyError::new(
            ErrorKind::FileNotFound,
            format!("Couldn't find file: {}", path.display()),
        )
    })?;

    Ok(filter_lines(&contents))
}

/// Trim every line and drop the ones that are empty or start with the
/// `comment` keyword.
pub fn filter_lines(contents: &str) -> Vec<(String, usize)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("comment") {
                None
            } else {
                Some((line.to_owned(), index + 1))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_comment_lines_are_elided() {
        let lines = filter_lines("comment a greeting\nint function main\nreturn 0\n");

        assert_eq!(
            vec![("int function main".to_owned(), 2), ("return 0".to_owned(), 3)],
            lines
        );
    }

    #[test]
    fn test_blank_lines_keep_numbering_intact() {
        let lines = filter_lines("int function main\n\n   \n\treturn 0");

        assert_eq!(
            vec![("int function main".to_owned(), 1), ("return 0".to_owned(), 4)],
            lines
        );
    }

    #[test]
    fn test_indented_comment_lines_are_elided() {
        assert!(filter_lines("   comment indented\n\tcomment tabbed\n").is_empty());
    }

    #[test]
    fn test_missing_file_reports_file_not_found() {
        let error = read_program(Path::new("no/such/program.wordy")).expect_err("should fail");

        assert_eq!(ErrorKind::FileNotFound, error.kind);
        assert_eq!("Couldn't find file: no/such/program.wordy", error.message);
    }

    #[test]
    fn test_reading_a_real_file() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "comment header").expect("should write");
        writeln!(file, "int function id int n").expect("should write");
        writeln!(file, "return n").expect("should write");

        let lines = read_program(file.path()).expect("should read");

        assert_eq!(
            vec![
                ("int function id int n".to_owned(), 2),
                ("return n".to_owned(), 3)
            ],
            lines
        );
    }
}
