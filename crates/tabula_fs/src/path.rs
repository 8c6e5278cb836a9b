use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use globset::{GlobBuilder, GlobMatcher};
use tabula_utils::cond::select;

use crate::FsError;

/// `chrono` format of the timestamp substituted for `*`, e.g. `20240229_123000`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// -----------------------------------------------------------------------------
// Timestamped names

/// Replace every `*` in `path` with the current local time.
///
/// Paths without `*` are returned unchanged.
#[inline]
pub fn timestamp_file_name(path: &str) -> String {
    timestamp_file_name_at(path, &Local::now())
}

/// Replace every `*` in `path` with `time`, formatted as [`TIMESTAMP_FORMAT`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tabula_fs::timestamp_file_name_at;
///
/// let time = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 5).unwrap();
/// assert_eq!(
///     timestamp_file_name_at("out/report_*.csv", &time),
///     "out/report_20240229_123005.csv",
/// );
/// ```
pub fn timestamp_file_name_at<Tz>(path: &str, time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if !path.contains('*') {
        return path.to_owned();
    }
    path.replace('*', &time.format(TIMESTAMP_FORMAT).to_string())
}

// -----------------------------------------------------------------------------
// Latest file

/// Characters that make a path component a glob rather than a literal name.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

fn is_glob(component: &Component<'_>) -> bool {
    matches!(component, Component::Normal(part) if part.to_str().is_some_and(|part| part.contains(GLOB_META)))
}

/// Split `pattern` into the literal directory to walk from and the glob
/// matched against paths relative to it.
///
/// A pattern without glob syntax matches its final component literally.
fn split_pattern(pattern: &str) -> Result<(PathBuf, String), FsError> {
    let no_match = || FsError::NoMatchingFiles {
        pattern: pattern.to_owned(),
    };

    let mut components = Path::new(pattern).components().peekable();
    let mut base = PathBuf::new();
    while let Some(component) = components.next_if(|component| !is_glob(component)) {
        base.push(component);
    }

    let mut rest = components
        .map(|component| component.as_os_str().to_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(no_match)?;
    if rest.is_empty() {
        let name = base
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(no_match)?;
        base.pop();
        rest.push(name);
    }
    Ok((base, rest.join("/")))
}

/// Regular files matching `pattern`, sorted by path.
///
/// Glob syntax may appear in any component, e.g. `logs/*/r_*.csv`. The
/// directories before the first glob component are taken literally and
/// walked no deeper than the glob reaches. `*` stays within one component
/// and `**` crosses any number of them. A missing directory has no matches.
fn matching_files(pattern: &str) -> Result<Vec<PathBuf>, FsError> {
    let (base, glob) = split_pattern(pattern)?;
    let matcher = GlobBuilder::new(&glob)
        .literal_separator(true)
        .build()?
        .compile_matcher();
    let depth_limit = select(glob.contains("**"), None, Some(glob.split('/').count()));

    let root = select(base.as_os_str().is_empty(), Path::new("."), base.as_path());
    let mut found = Vec::new();
    collect_matches(root, Path::new(""), depth_limit, &matcher, &mut found)?;

    let mut matches: Vec<PathBuf> = found.into_iter().map(|relative| base.join(relative)).collect();
    matches.sort();

    log::trace!("pattern `{pattern}` matched {} files", matches.len());
    Ok(matches)
}

/// Walk `root/relative`, pushing matching files as paths relative to `root`.
fn collect_matches(
    root: &Path,
    relative: &Path,
    depth_limit: Option<usize>,
    matcher: &GlobMatcher,
    found: &mut Vec<PathBuf>,
) -> Result<(), FsError> {
    let dir = root.join(relative);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(FsError::io(dir)(err)),
    };

    let depth = relative.components().count() + 1;
    for entry in entries {
        let entry = entry.map_err(FsError::io(&dir))?;
        let file_type = entry.file_type().map_err(FsError::io(entry.path()))?;
        let path = relative.join(entry.file_name());

        if file_type.is_file() {
            if matcher.is_match(&path) {
                found.push(path);
            }
        } else if file_type.is_dir() && depth_limit.is_none_or(|limit| depth < limit) {
            collect_matches(root, &path, depth_limit, matcher, found)?;
        }
    }
    Ok(())
}

/// The matching file whose path sorts last.
///
/// With timestamped names such as `report_20240229_123005.csv` in a single
/// directory this is the most recent one.
pub fn latest_file_by_name(pattern: &str) -> Result<PathBuf, FsError> {
    matching_files(pattern)?
        .pop()
        .ok_or_else(|| FsError::NoMatchingFiles {
            pattern: pattern.to_owned(),
        })
}

/// The most recently modified matching file.
///
/// On equal modification times the path that sorts first wins.
pub fn latest_file_by_mod_time(pattern: &str) -> Result<PathBuf, FsError> {
    let mut latest: Option<(PathBuf, SystemTime)> = None;

    for path in matching_files(pattern)? {
        let modified = fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map_err(FsError::io(&path))?;
        if latest.as_ref().is_none_or(|(_, time)| modified > *time) {
            latest = Some((path, modified));
        }
    }

    latest
        .map(|(path, _)| path)
        .ok_or_else(|| FsError::NoMatchingFiles {
            pattern: pattern.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn timestamp_substitution() {
        let time = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamp_file_name_at("a_*_b_*.json", &time), "a_20230102_030405_b_20230102_030405.json");
        assert_eq!(timestamp_file_name_at("plain.csv", &time), "plain.csv");
        assert_eq!(timestamp_file_name("plain.csv"), "plain.csv");
        assert!(!timestamp_file_name("x_*.csv").contains('*'));
    }

    #[test]
    fn missing_directory_has_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("absent").join("*.csv");
        let pattern = pattern.to_str().unwrap();

        assert!(matching_files(pattern).unwrap().is_empty());
        assert!(matches!(
            latest_file_by_name(pattern),
            Err(FsError::NoMatchingFiles { .. })
        ));
    }

    #[test]
    fn latest_by_name_and_mod_time() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["r_20240101_000000.csv", "r_20240301_000000.csv", "r_20240201_000000.csv", "other.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        fs::create_dir(dir.path().join("r_20990101_000000.csv")).unwrap();

        let pattern = dir.path().join("r_*.csv");
        let pattern = pattern.to_str().unwrap();

        let by_name = latest_file_by_name(pattern).unwrap();
        assert_eq!(by_name, dir.path().join("r_20240301_000000.csv"));

        let older = fs::File::options()
            .write(true)
            .open(dir.path().join("r_20240301_000000.csv"))
            .unwrap();
        older
            .set_modified(SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1))
            .unwrap();
        let newest = fs::File::options()
            .write(true)
            .open(dir.path().join("r_20240101_000000.csv"))
            .unwrap();
        newest.set_modified(SystemTime::now()).unwrap();

        let by_time = latest_file_by_mod_time(pattern).unwrap();
        assert_eq!(by_time, dir.path().join("r_20240101_000000.csv"));
    }

    #[test]
    fn glob_in_directory_components() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        for sub in ["a", "b", "a/deep"] {
            fs::create_dir_all(logs.join(sub)).unwrap();
        }
        for file in ["a/r_1.csv", "b/r_2.csv", "b/skip.txt", "a/deep/r_3.csv", "r_0.csv"] {
            fs::write(logs.join(file), file).unwrap();
        }

        let pattern = logs.join("*").join("r_*.csv");
        assert_eq!(
            matching_files(pattern.to_str().unwrap()).unwrap(),
            [logs.join("a/r_1.csv"), logs.join("b/r_2.csv")]
        );

        let pattern = logs.join("**").join("r_*.csv");
        assert_eq!(
            matching_files(pattern.to_str().unwrap()).unwrap(),
            [
                logs.join("a/deep/r_3.csv"),
                logs.join("a/r_1.csv"),
                logs.join("b/r_2.csv"),
                logs.join("r_0.csv"),
            ]
        );

        let literal = logs.join("b").join("r_2.csv");
        assert_eq!(matching_files(literal.to_str().unwrap()).unwrap(), [literal.clone()]);
    }

    #[test]
    fn invalid_pattern() {
        assert!(matches!(latest_file_by_name("[z-a"), Err(FsError::Pattern(_))));
    }
}
