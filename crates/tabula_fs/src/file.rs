use std::fs;
use std::path::{Path, PathBuf};

use crate::path::{latest_file_by_name, timestamp_file_name};
use crate::{Format, Formats, FsError};

fn extension(path: &Path) -> &str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
}

/// Write `data` to `path` with every `*` replaced by the current local time.
///
/// Missing parent directories are created. Returns the path written.
pub fn save_file(data: &[u8], path: &str) -> Result<PathBuf, FsError> {
    let path = PathBuf::from(timestamp_file_name(path));

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(FsError::io(parent))?;
    }
    fs::write(&path, data).map_err(FsError::io(&path))?;

    log::debug!("saved {} bytes to `{}`", data.len(), path.display());
    Ok(path)
}

/// Decode the latest file matching `pattern` into `out`, by name order.
///
/// The format is chosen by the extension of the file found.
pub fn read_file<T: ?Sized>(out: &mut T, pattern: &str, formats: &Formats<T>) -> Result<PathBuf, FsError> {
    let path = latest_file_by_name(pattern)?;
    let format = formats.require(extension(&path))?;
    decode_file(out, path, format)
}

/// Decode the latest file matching `pattern` into `out` with `format`.
pub fn read_file_with<T: ?Sized>(
    out: &mut T,
    pattern: &str,
    format: &dyn Format<T>,
) -> Result<PathBuf, FsError> {
    let path = latest_file_by_name(pattern)?;
    decode_file(out, path, format)
}

fn decode_file<T: ?Sized>(out: &mut T, path: PathBuf, format: &dyn Format<T>) -> Result<PathBuf, FsError> {
    let data = fs::read(&path).map_err(FsError::io(&path))?;
    format.decode(&data, out)?;
    log::debug!("read {} bytes from `{}`", data.len(), path.display());
    Ok(path)
}

/// Encode `value` and save it to `path`, see [`save_file`].
///
/// The format is chosen by the extension of `path`.
pub fn write_file<T: ?Sized>(value: &T, path: &str, formats: &Formats<T>) -> Result<PathBuf, FsError> {
    let format = formats.require(extension(Path::new(path)))?;
    write_file_with(value, path, format)
}

/// Encode `value` with `format` and save it to `path`, see [`save_file`].
pub fn write_file_with<T: ?Sized>(value: &T, path: &str, format: &dyn Format<T>) -> Result<PathBuf, FsError> {
    let data = format.encode(value)?;
    save_file(&data, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("data.bin");

        let saved = save_file(b"hello", target.to_str().unwrap()).unwrap();
        assert_eq!(saved, target);
        assert_eq!(fs::read(&saved).unwrap(), b"hello");
    }

    #[test]
    fn save_substitutes_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("log_*.txt");

        let saved = save_file(b"", pattern.to_str().unwrap()).unwrap();
        let name = saved.file_name().unwrap().to_str().unwrap();
        // `log_` + `YYYYmmdd_HHMMSS` + `.txt`
        assert_eq!(name.len(), 4 + 15 + 4);
        assert!(name.starts_with("log_") && !name.contains('*'));
    }

    #[test]
    fn unknown_extension() {
        let formats = Formats::<Vec<u8>>::new();
        assert!(matches!(
            write_file(&vec![1_u8], "out.xml", &formats),
            Err(FsError::UnsupportedFormat { extension }) if extension == "xml"
        ));
        assert!(matches!(
            write_file(&vec![1_u8], "no_extension", &formats),
            Err(FsError::UnsupportedFormat { extension }) if extension.is_empty()
        ));
    }
}
