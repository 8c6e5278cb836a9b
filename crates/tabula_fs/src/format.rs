use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tabula_csv::{Codec, CsvOptions, Records, Target};
use tabula_utils::default;

use crate::FsError;

// -----------------------------------------------------------------------------
// Format

/// An encoding strategy for values of type `T`.
pub trait Format<T: ?Sized>: Send + Sync {
    fn encode(&self, value: &T) -> Result<Vec<u8>, FsError>;

    fn decode(&self, data: &[u8], out: &mut T) -> Result<(), FsError>;
}

/// Comma-separated rows through [`tabula_csv`].
#[derive(Debug, Clone, Default)]
pub struct CsvFormat {
    codec: Codec,
}

impl CsvFormat {
    #[inline]
    pub const fn new(options: CsvOptions) -> Self {
        Self {
            codec: Codec::new(options),
        }
    }
}

impl<T: Records + Target + ?Sized> Format<T> for CsvFormat {
    #[inline]
    fn encode(&self, value: &T) -> Result<Vec<u8>, FsError> {
        Ok(self.codec.marshal(value)?)
    }

    #[inline]
    fn decode(&self, data: &[u8], out: &mut T) -> Result<(), FsError> {
        Ok(self.codec.unmarshal(data, out)?)
    }
}

/// JSON through `serde_json`, compact unless `pretty` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl<T: Serialize + DeserializeOwned> Format<T> for JsonFormat {
    fn encode(&self, value: &T) -> Result<Vec<u8>, FsError> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(data)
    }

    fn decode(&self, data: &[u8], out: &mut T) -> Result<(), FsError> {
        *out = serde_json::from_slice(data)?;
        Ok(())
    }
}

/// TOML through `toml`. The value must serialize as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl<T: Serialize + DeserializeOwned> Format<T> for TomlFormat {
    fn encode(&self, value: &T) -> Result<Vec<u8>, FsError> {
        Ok(toml::to_string(value)?.into_bytes())
    }

    fn decode(&self, data: &[u8], out: &mut T) -> Result<(), FsError> {
        *out = toml::from_str(std::str::from_utf8(data)?)?;
        Ok(())
    }
}

/// YAML through `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl<T: Serialize + DeserializeOwned> Format<T> for YamlFormat {
    fn encode(&self, value: &T) -> Result<Vec<u8>, FsError> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }

    fn decode(&self, data: &[u8], out: &mut T) -> Result<(), FsError> {
        *out = serde_yaml::from_slice(data)?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Formats

/// Format strategies keyed by file extension, without the dot.
///
/// Lookups are case-sensitive.
///
/// # Examples
///
/// ```
/// use tabula_fs::{Formats, JsonFormat};
///
/// let formats = Formats::<Vec<u32>>::new().with("json", JsonFormat::default());
/// assert!(formats.get("json").is_some());
/// assert!(formats.get("JSON").is_none());
/// ```
pub struct Formats<T: ?Sized> {
    formats: BTreeMap<String, Arc<dyn Format<T>>>,
}

impl<T: ?Sized> Formats<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    /// Register `format` for `extension`, replacing any previous one.
    pub fn with(mut self, extension: impl Into<String>, format: impl Format<T> + 'static) -> Self {
        self.formats.insert(extension.into(), Arc::new(format));
        self
    }

    #[inline]
    pub fn get(&self, extension: &str) -> Option<&dyn Format<T>> {
        self.formats.get(extension).map(Arc::as_ref)
    }

    /// The registered format for `extension`, or [`FsError::UnsupportedFormat`].
    pub(crate) fn require(&self, extension: &str) -> Result<&dyn Format<T>, FsError> {
        self.get(extension).ok_or_else(|| FsError::UnsupportedFormat {
            extension: extension.to_owned(),
        })
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }
}

impl<T> Formats<T>
where
    T: Records + Target + Serialize + DeserializeOwned,
{
    /// `csv`, tab-separated `tsv`, `json`, `toml`, and YAML under both
    /// `yaml` and `yml`, with default settings.
    pub fn standard() -> Self {
        let tabs = CsvOptions {
            delimiter: b'\t',
            ..default()
        };
        Self::new()
            .with("csv", CsvFormat::default())
            .with("tsv", CsvFormat::new(tabs))
            .with("json", JsonFormat::default())
            .with("toml", TomlFormat)
            .with("yaml", YamlFormat)
            .with("yml", YamlFormat)
    }
}

impl<T: ?Sized> Default for Formats<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Formats<T> {
    fn clone(&self) -> Self {
        Self {
            formats: self.formats.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Formats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.extensions()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Settings {
        name: String,
        retries: u32,
    }

    #[test]
    fn json_and_toml_strategies() {
        let settings = Settings {
            name: "daily".into(),
            retries: 3,
        };

        let json = JsonFormat::default().encode(&settings).unwrap();
        assert_eq!(json, br#"{"name":"daily","retries":3}"#);
        let mut decoded = Settings::default();
        JsonFormat::default().decode(&json, &mut decoded).unwrap();
        assert_eq!(decoded, settings);

        let toml = TomlFormat.encode(&settings).unwrap();
        let mut decoded = Settings::default();
        TomlFormat.decode(&toml, &mut decoded).unwrap();
        assert_eq!(decoded, settings);

        assert!(matches!(
            TomlFormat.decode(b"\xff", &mut decoded),
            Err(FsError::Utf8(_))
        ));
    }

    #[test]
    fn yaml_strategy() {
        let settings = Settings {
            name: "daily".into(),
            retries: 3,
        };

        let yaml = YamlFormat.encode(&settings).unwrap();
        assert_eq!(yaml, b"name: daily\nretries: 3\n");
        let mut decoded = Settings::default();
        YamlFormat.decode(&yaml, &mut decoded).unwrap();
        assert_eq!(decoded, settings);

        assert!(matches!(
            YamlFormat.decode(b"name: [unclosed", &mut decoded),
            Err(FsError::Yaml(_))
        ));
    }

    #[test]
    fn registry_lookup() {
        let formats = Formats::<Settings>::new()
            .with("json", JsonFormat::default())
            .with("conf", TomlFormat);
        assert_eq!(formats.extensions().collect::<Vec<_>>(), ["conf", "json"]);
        assert!(formats.get("json").is_some());
        assert!(matches!(
            formats.require("yaml"),
            Err(FsError::UnsupportedFormat { extension }) if extension == "yaml"
        ));
    }
}
