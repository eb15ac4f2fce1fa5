//! Multi-format decoding: TOML/JSON/YAML selected by file extension.

use crate::error::ConfigError;
use crate::model::RawConfig;
use camino::Utf8Path;

/// Decode a [`RawConfig`] from `path`, dispatching on its extension.
pub fn decode_raw_config(path: &Utf8Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|e| ConfigError::ReadFailed {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::DecodeFailed {
            format: "TOML",
            reason: e.to_string(),
        }),
        Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::DecodeFailed {
            format: "JSON",
            reason: e.to_string(),
        }),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::DecodeFailed {
                format: "YAML",
                reason: e.to_string(),
            })
        }
        other => Err(ConfigError::UnsupportedExtension {
            extension: other.unwrap_or("").to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_with_ext(content: &str, ext: &str) -> (NamedTempFile, camino::Utf8PathBuf) {
        let mut file = NamedTempFile::with_suffix(format!(".{ext}")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();
        (file, path)
    }

    #[test]
    fn decodes_toml() {
        let (_f, path) = write_with_ext(
            "[project]\nname = \"adder\"\nrtl_files = [\"a.sv\"]\ntop_module = \"adder\"\n",
            "toml",
        );
        let raw = decode_raw_config(&path).unwrap();
        assert_eq!(raw.project.unwrap().name, "adder");
    }

    #[test]
    fn decodes_json() {
        let (_f, path) = write_with_ext(
            r#"{"project": {"name": "adder", "rtl_files": ["a.sv"], "top_module": "adder"}}"#,
            "json",
        );
        let raw = decode_raw_config(&path).unwrap();
        assert_eq!(raw.project.unwrap().name, "adder");
    }

    #[test]
    fn decodes_yaml() {
        let (_f, path) = write_with_ext(
            "project:\n  name: adder\n  rtl_files: [a.sv]\n  top_module: adder\n",
            "yaml",
        );
        let raw = decode_raw_config(&path).unwrap();
        assert_eq!(raw.project.unwrap().name, "adder");
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let (_f, path) = write_with_ext("irrelevant", "ini");
        let err = decode_raw_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedExtension { .. }));
    }

    #[test]
    fn malformed_toml_surfaces_decode_error() {
        let (_f, path) = write_with_ext("[project\nname = ", "toml");
        let err = decode_raw_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DecodeFailed { format: "TOML", .. }));
    }
}
