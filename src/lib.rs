pub mod api;
pub mod bend;
pub mod canonical;
pub mod document;
pub mod element;
pub mod error;
pub mod line;
pub mod multipole;
pub mod utils;

pub use api::{from_json, from_yaml, read_file, to_json, to_yaml, write_file, Format};
pub use bend::{BendField, BendParameters};
pub use canonical::{decode, encode};
pub use document::Document;
pub use element::{
    BaseElement, Drift, Element, ElementKind, Kicker, Quadrupole, Rbend, Sbend, Sextupole,
    ThickElement,
};
pub use error::{PalsError, ValidationError};
pub use line::BeamLine;
pub use multipole::{MagneticMultipoleParameters, MultipoleFamily, MultipoleKey};
