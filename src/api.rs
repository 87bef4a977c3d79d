use crate::canonical::{decode, encode};
use crate::document::Document;
use crate::error::PalsError;
use crate::line::BeamLine;
use log::debug;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The text encodings a lattice document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Picks a format from a file extension (`.yaml`, `.yml` or `.json`).
    ///
    /// # Errors
    /// Returns `PalsError::UnknownFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, PalsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(PalsError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("YAML"),
            Format::Json => f.write_str("JSON"),
        }
    }
}

impl Serialize for BeamLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let document = encode(self).map_err(S::Error::custom)?;
        document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BeamLine {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Document::deserialize(deserializer)?;
        decode(&document).map_err(D::Error::custom)
    }
}

/// Serializes a line into a YAML string.
///
/// # Errors
/// Returns a `PalsError` if encoding or the YAML codec fails.
pub fn to_yaml(line: &BeamLine) -> Result<String, PalsError> {
    Ok(serde_yaml::to_string(&encode(line)?)?)
}

/// Serializes a line into a pretty-printed JSON string with sorted keys.
///
/// # Errors
/// Returns a `PalsError` if encoding or the JSON codec fails.
pub fn to_json(line: &BeamLine) -> Result<String, PalsError> {
    Ok(serde_json::to_string_pretty(&encode(line)?)?)
}

/// Parses and validates a line from YAML text.
///
/// # Errors
/// Returns `PalsError::Yaml` for malformed text and `PalsError::Validation`
/// for a well-formed document that is not a valid lattice.
pub fn from_yaml(text: &str) -> Result<BeamLine, PalsError> {
    let document: Document = serde_yaml::from_str(text)?;
    Ok(decode(&document)?)
}

/// Parses and validates a line from JSON text.
///
/// # Errors
/// Returns `PalsError::Json` for malformed text and `PalsError::Validation`
/// for a well-formed document that is not a valid lattice.
pub fn from_json(text: &str) -> Result<BeamLine, PalsError> {
    let document: Document = serde_json::from_str(text)?;
    Ok(decode(&document)?)
}

/// # Errors
/// See [`to_yaml`] and [`to_json`].
pub fn to_string(line: &BeamLine, format: Format) -> Result<String, PalsError> {
    match format {
        Format::Yaml => to_yaml(line),
        Format::Json => to_json(line),
    }
}

/// # Errors
/// See [`from_yaml`] and [`from_json`].
pub fn from_str(text: &str, format: Format) -> Result<BeamLine, PalsError> {
    match format {
        Format::Yaml => from_yaml(text),
        Format::Json => from_json(text),
    }
}

/// Reads a line from a file, choosing the format from its extension.
///
/// # Errors
/// Returns `UnknownFormat`, `Io`, or any parse/validation error.
pub fn read_file(path: impl AsRef<Path>) -> Result<BeamLine, PalsError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    debug!("Reading {format} lattice from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
    from_str(&text, format)
}

/// Writes a line to a file, choosing the format from its extension.
///
/// The text is written to a temporary file next to `path` and then moved over
/// it, so readers never see a half-written document.
///
/// # Errors
/// Returns `UnknownFormat`, `Io`, or any encoding error.
pub fn write_file(line: &BeamLine, path: impl AsRef<Path>) -> Result<(), PalsError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = to_string(line, format)?;
    debug!("Writing {format} lattice '{}' to {}", line.name(), path.display());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| io_error(path, &e))?;
    file.write_all(text.as_bytes()).map_err(|e| io_error(path, &e))?;
    file.persist(path).map_err(|e| io_error(path, &e.error))?;
    Ok(())
}

fn io_error(path: &Path, e: &std::io::Error) -> PalsError {
    PalsError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
