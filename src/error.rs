use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum PalsError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("YAML codec failed: {message}")]
    #[diagnostic(
        code(pals::codec::yaml),
        help("The text could not be read or written as YAML. Check indentation and quoting.")
    )]
    Yaml { message: String },

    #[error("JSON codec failed: {message}")]
    #[diagnostic(
        code(pals::codec::json),
        help("The text could not be read or written as JSON.")
    )]
    Json { message: String },

    #[error("I/O on '{path}' failed: {message}")]
    #[diagnostic(code(pals::io))]
    Io { path: String, message: String },

    #[error("Cannot infer a document format for '{path}'")]
    #[diagnostic(
        code(pals::io::unknown_format),
        help("Use a .yaml, .yml or .json extension, or pass the format explicitly.")
    )]
    UnknownFormat { path: String },
}

impl From<serde_yaml::Error> for PalsError {
    fn from(e: serde_yaml::Error) -> Self {
        PalsError::Yaml {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for PalsError {
    fn from(e: serde_json::Error) -> Self {
        PalsError::Json {
            message: e.to_string(),
        }
    }
}

/// Everything that can make a lattice value fail to exist.
///
/// `location` is a breadcrumb into the document being decoded (for example
/// `fodo_cell.line[1].quad1.MagneticMultipoleP`), or the element name when the
/// value was built in code.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown field '{field}' at {location}")]
    #[diagnostic(
        code(pals::schema::unknown_field),
        help("Allowed fields here are: {expected}")
    )]
    UnknownField {
        location: String,
        field: String,
        expected: String,
    },

    #[error("Missing required field '{field}' at {location}")]
    #[diagnostic(code(pals::schema::missing_field))]
    MissingField { location: String, field: String },

    #[error("Invalid magnetic multipole parameter '{key}' at {location}: {reason}")]
    #[diagnostic(
        code(pals::schema::multipole_key),
        help(
            "Parameters must be of the form 'tiltN', 'BnN', 'BsN', 'KnN' or 'KsN', \
             where N is a non-negative integer without leading zeros."
        )
    )]
    InvalidMultipoleKey {
        location: String,
        key: String,
        reason: String,
    },

    #[error("Invalid bend parameter '{key}' at {location}")]
    #[diagnostic(
        code(pals::schema::bend_key),
        help("Allowed parameters are {allowed} or user-defined 'aux_*' fields.")
    )]
    InvalidBendKey {
        location: String,
        key: String,
        allowed: String,
    },

    #[error("Unknown element kind '{kind}' at {location}")]
    #[diagnostic(code(pals::schema::unknown_kind), help("Known kinds are: {known}"))]
    UnknownKind {
        location: String,
        kind: String,
        known: String,
    },

    #[error("Expected kind '{expected}' at {location}, but found '{found}'")]
    #[diagnostic(code(pals::schema::kind_mismatch))]
    KindMismatch {
        location: String,
        expected: String,
        found: String,
    },

    #[error("Negative length {value} at {location}")]
    #[diagnostic(
        code(pals::constraint::negative_length),
        help("Segment lengths are in meters and must be greater than or equal to zero.")
    )]
    NegativeLength { location: String, value: f64 },

    #[error("Non-finite value {value} for '{field}' at {location}")]
    #[diagnostic(code(pals::constraint::non_finite))]
    NonFinite {
        location: String,
        field: String,
        value: f64,
    },

    #[error("Empty element name at {location}")]
    #[diagnostic(code(pals::constraint::empty_name))]
    EmptyName { location: String },

    #[error("Expected {expected} for '{field}' at {location}, but found {found}")]
    #[diagnostic(code(pals::shape::type_mismatch))]
    TypeMismatch {
        location: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("Expected a mapping with exactly one key (the name) at {location}, but found {found}")]
    #[diagnostic(
        code(pals::shape::not_single_key),
        help("Every element and line is written as '{{ <name>: {{ ...fields... }} }}'.")
    )]
    NotSingleKey { location: String, found: String },

    #[error("Reference/alias elements are not yet implemented: '{reference}' at {location}")]
    #[diagnostic(
        code(pals::unsupported::reference),
        help("Write the element out in full as '{{ <name>: {{ kind: ..., ... }} }}'.")
    )]
    UnsupportedReference { location: String, reference: String },

    #[error("Element at {location} is missing its 'name' field")]
    #[diagnostic(code(pals::invariant::missing_name))]
    MissingName { location: String },
}
