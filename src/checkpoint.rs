//! Checkpoint file format: strict plain-text resume state (SPEC_FULL.md §4.6).
//!
//! Line 1 is `min max`. Every later line is
//! `complete count_0 ... count_{P-1} [checksum_hex]`. The file is only
//! ever opened for reading or appending; the program never truncates
//! or deletes it.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::CheckpointError;
use crate::task::MAX_FANG_PAIRS;
use crate::types::Vamp;

/// The last line successfully parsed out of a checkpoint file.
#[derive(Debug, Clone)]
pub struct Resume {
    pub complete: Vamp,
    pub count: [u64; MAX_FANG_PAIRS],
    pub checksum_hex: Option<String>,
}

/// Creates an empty checkpoint file declaring `min max` on its first
/// line. Refuses to overwrite an existing file.
pub fn touch(path: &Path, min: Vamp, max: Vamp) -> Result<(), CheckpointError> {
    if path.exists() {
        return Err(CheckpointError::AlreadyExists(path.to_path_buf()));
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| CheckpointError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    writeln!(file, "{min} {max}").map_err(|source| CheckpointError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Appends one finalized line. Never truncates, never seeks.
pub fn save(
    path: &Path,
    complete: Vamp,
    count: &[u64; MAX_FANG_PAIRS],
    checksum_hex: &str,
) -> Result<(), CheckpointError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| CheckpointError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    let counts = count
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(file, "{complete} {counts} {checksum_hex}").map_err(|source| CheckpointError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an existing checkpoint file, validating strictly as it goes,
/// and returns the bounds declared on line 1 plus the last valid resume
/// state (if any lines beyond the header exist).
pub fn load(path: &Path, requested_min: Vamp, requested_max: Vamp) -> Result<(Vamp, Vamp, Option<Resume>), CheckpointError> {
    let file = std::fs::File::open(path).map_err(|source| CheckpointError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = BufReader::new(file).lines();

    let header = lines
        .next()
        .ok_or_else(|| malformed(path, 1, ""))?
        .map_err(|source| CheckpointError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let mut header_fields = header.split(' ');
    let min = parse_token(path, 1, header_fields.next())?;
    let max = parse_token(path, 1, header_fields.next())?;
    if header_fields.next().is_some() {
        return Err(malformed(path, 1, &header));
    }
    if min != requested_min || max != requested_max {
        return Err(CheckpointError::BoundsMismatch {
            path: path.to_path_buf(),
            line: 1,
            min,
            max,
            requested_min,
            requested_max,
        });
    }

    let mut previous: Option<Resume> = None;
    let mut line_no = 1;
    for line in lines {
        line_no += 1;
        let line = line.map_err(|source| CheckpointError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut fields = line.split(' ');

        let complete = parse_token(path, line_no, fields.next())?;
        let mut count = [0u64; MAX_FANG_PAIRS];
        for (column, slot) in count.iter_mut().enumerate() {
            *slot = parse_token(path, line_no, fields.next())?;
            if column > 0 && *slot > count[column - 1] {
                return Err(CheckpointError::NonMonotonic {
                    path: path.to_path_buf(),
                    line: line_no,
                    column,
                });
            }
        }
        let checksum_hex = fields.next().map(str::to_owned);
        if fields.next().is_some() {
            return Err(malformed(path, line_no, &line));
        }

        if complete < min || complete > max {
            return Err(malformed(path, line_no, &complete.to_string()));
        }
        if let Some(prev) = &previous {
            if complete < prev.complete {
                return Err(malformed(path, line_no, &complete.to_string()));
            }
            for column in 0..MAX_FANG_PAIRS {
                if count[column] < prev.count[column] {
                    return Err(CheckpointError::NonMonotonic {
                        path: path.to_path_buf(),
                        line: line_no,
                        column,
                    });
                }
            }
        }

        previous = Some(Resume {
            complete,
            count,
            checksum_hex,
        });
    }

    Ok((min, max, previous))
}

fn parse_token(path: &Path, line: usize, token: Option<&str>) -> Result<Vamp, CheckpointError> {
    let token = token.ok_or_else(|| malformed(path, line, ""))?;
    token.parse::<Vamp>().map_err(|_| malformed(path, line, token))
}

fn malformed(path: &Path, line: usize, token: &str) -> CheckpointError {
    CheckpointError::Malformed {
        path: path.to_path_buf(),
        line,
        token: token.to_owned(),
    }
}

/// Resolves an optional checkpoint path at startup: touches a new file
/// if none exists, or loads and validates an existing one.
pub fn resolve(path: Option<&PathBuf>, min: Vamp, max: Vamp) -> Result<Option<(Vamp, Option<Resume>)>, CheckpointError> {
    let Some(path) = path else { return Ok(None) };
    if path.exists() {
        let (_, _, resume) = load(path, min, max)?;
        Ok(Some((max, resume)))
    } else {
        touch(path, min, max)?;
        Ok(Some((max, None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn touch_then_save_then_load_roundtrips() {
        let file = NamedTempFile::new().unwrap();
        std::fs::remove_file(file.path()).ok(); // touch() must create it itself
        touch(file.path(), 0, 1_000_000).unwrap();

        let count = [3, 2, 1, 0, 0, 0, 0, 0];
        save(file.path(), 500, &count, "deadbeef").unwrap();

        let (min, max, resume) = load(file.path(), 0, 1_000_000).unwrap();
        assert_eq!((min, max), (0, 1_000_000));
        let resume = resume.unwrap();
        assert_eq!(resume.complete, 500);
        assert_eq!(resume.count, count);
        assert_eq!(resume.checksum_hex.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn touch_refuses_to_overwrite() {
        let file = NamedTempFile::new().unwrap();
        // NamedTempFile already created the file, so touch() must fail.
        assert!(matches!(
            touch(file.path(), 0, 10),
            Err(CheckpointError::AlreadyExists(_))
        ));
    }

    #[test]
    fn rejects_decreasing_counts() {
        let file = NamedTempFile::new().unwrap();
        std::fs::remove_file(file.path()).ok();
        touch(file.path(), 0, 1_000_000).unwrap();
        save(file.path(), 100, &[5, 4, 3, 0, 0, 0, 0, 0], "ab").unwrap();
        save(file.path(), 200, &[4, 4, 3, 0, 0, 0, 0, 0], "cd").unwrap();

        assert!(matches!(
            load(file.path(), 0, 1_000_000),
            Err(CheckpointError::NonMonotonic { .. })
        ));
    }
}
