//! Lattice element variants.
//!
//! Every value here is valid from the moment it exists. Mutators validate the
//! new value first and only then replace the old one, so a failed update leaves
//! the element as it was.

use crate::bend::BendParameters;
use crate::error::ValidationError;
use crate::line::BeamLine;
use crate::multipole::MagneticMultipoleParameters;
use std::fmt::{self, Display};

/// A non-empty element or line name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    /// # Errors
    /// Returns `EmptyName` if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new_at(name, "<unnamed>")
    }

    pub(crate) fn new_at(name: impl Into<String>, location: &str) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyName {
                location: location.to_string(),
            });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Segment length in meters; finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// # Errors
    /// Returns `NegativeLength` for values below zero and `NonFinite` for NaN or infinity.
    pub fn new(meters: f64) -> Result<Self, ValidationError> {
        Self::new_at(meters, "<unnamed>")
    }

    pub(crate) fn new_at(meters: f64, location: &str) -> Result<Self, ValidationError> {
        if !meters.is_finite() {
            return Err(ValidationError::NonFinite {
                location: location.to_string(),
                field: "length".to_string(),
                value: meters,
            });
        }
        if meters < 0.0 {
            return Err(ValidationError::NegativeLength {
                location: location.to_string(),
                value: meters,
            });
        }
        Ok(Self(meters))
    }

    #[must_use]
    pub fn meters(self) -> f64 {
        self.0
    }
}

/// The discriminator written as `kind` in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    BaseElement,
    ThickElement,
    Drift,
    Quadrupole,
    Sextupole,
    Kicker,
    Sbend,
    Rbend,
    BeamLine,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::BaseElement,
        ElementKind::ThickElement,
        ElementKind::Drift,
        ElementKind::Quadrupole,
        ElementKind::Sextupole,
        ElementKind::Kicker,
        ElementKind::Sbend,
        ElementKind::Rbend,
        ElementKind::BeamLine,
    ];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::BaseElement => "BaseElement",
            ElementKind::ThickElement => "ThickElement",
            ElementKind::Drift => "Drift",
            ElementKind::Quadrupole => "Quadrupole",
            ElementKind::Sextupole => "Sextupole",
            ElementKind::Kicker => "Kicker",
            ElementKind::Sbend => "Sbend",
            ElementKind::Rbend => "Rbend",
            ElementKind::BeamLine => "BeamLine",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The universal fallback element: a name and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseElement {
    name: Name,
}

impl BaseElement {
    /// # Errors
    /// Returns `EmptyName` if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Name::new(name)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// # Errors
    /// Returns `EmptyName` if `name` is empty; the element keeps its old name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = Name::new_at(name, self.name.as_str())?;
        Ok(())
    }
}

// Name and length accessors shared by every thick variant.
macro_rules! thick_accessors {
    ($($ty:ident),+ $(,)?) => {$(
        impl $ty {
            #[must_use]
            pub fn name(&self) -> &str {
                self.name.as_str()
            }

            /// # Errors
            /// Returns `EmptyName` if `name` is empty; the element keeps its old name.
            pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
                self.name = Name::new_at(name, self.name.as_str())?;
                Ok(())
            }

            /// Segment length in meters.
            #[must_use]
            pub fn length(&self) -> f64 {
                self.length.meters()
            }

            /// # Errors
            /// Returns `NegativeLength` or `NonFinite`; the element keeps its old length.
            pub fn set_length(&mut self, meters: f64) -> Result<(), ValidationError> {
                self.length = Length::new_at(meters, self.name.as_str())?;
                Ok(())
            }
        }
    )+};
}

thick_accessors!(ThickElement, Drift, Quadrupole, Sextupole, Kicker, Sbend, Rbend);

fn name_and_length(name: String, meters: f64) -> Result<(Name, Length), ValidationError> {
    let name = Name::new(name)?;
    let length = Length::new_at(meters, name.as_str())?;
    Ok((name, length))
}

/// An element with a finite, non-negative segment length.
#[derive(Debug, Clone, PartialEq)]
pub struct ThickElement {
    name: Name,
    length: Length,
}

impl ThickElement {
    /// # Errors
    /// Fails on an empty name or an invalid length.
    pub fn new(name: impl Into<String>, length: f64) -> Result<Self, ValidationError> {
        let (name, length) = name_and_length(name.into(), length)?;
        Ok(Self { name, length })
    }
}

/// A field-free region.
#[derive(Debug, Clone, PartialEq)]
pub struct Drift {
    name: Name,
    length: Length,
}

impl Drift {
    /// # Errors
    /// Fails on an empty name or an invalid length.
    pub fn new(name: impl Into<String>, length: f64) -> Result<Self, ValidationError> {
        let (name, length) = name_and_length(name.into(), length)?;
        Ok(Self { name, length })
    }
}

macro_rules! multipole_magnet {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            name: Name,
            length: Length,
            multipoles: MagneticMultipoleParameters,
        }

        impl $ty {
            /// # Errors
            /// Fails on an empty name or an invalid length.
            pub fn new(
                name: impl Into<String>,
                length: f64,
                multipoles: MagneticMultipoleParameters,
            ) -> Result<Self, ValidationError> {
                let (name, length) = name_and_length(name.into(), length)?;
                Ok(Self {
                    name,
                    length,
                    multipoles,
                })
            }

            #[must_use]
            pub fn multipoles(&self) -> &MagneticMultipoleParameters {
                &self.multipoles
            }

            pub fn multipoles_mut(&mut self) -> &mut MagneticMultipoleParameters {
                &mut self.multipoles
            }

            pub fn set_multipoles(&mut self, multipoles: MagneticMultipoleParameters) {
                self.multipoles = multipoles;
            }
        }
    };
}

multipole_magnet!(
    /// A quadrupole magnet.
    Quadrupole
);
multipole_magnet!(
    /// A sextupole magnet.
    Sextupole
);
multipole_magnet!(
    /// A kicker magnet.
    Kicker
);

macro_rules! bend_magnet {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $ty {
            name: Name,
            length: Length,
            bend: BendParameters,
            multipoles: Option<MagneticMultipoleParameters>,
        }

        impl $ty {
            /// # Errors
            /// Fails on an empty name or an invalid length.
            pub fn new(
                name: impl Into<String>,
                length: f64,
                bend: BendParameters,
            ) -> Result<Self, ValidationError> {
                let (name, length) = name_and_length(name.into(), length)?;
                Ok(Self {
                    name,
                    length,
                    bend,
                    multipoles: None,
                })
            }

            #[must_use]
            pub fn with_multipoles(mut self, multipoles: MagneticMultipoleParameters) -> Self {
                self.multipoles = Some(multipoles);
                self
            }

            #[must_use]
            pub fn bend(&self) -> &BendParameters {
                &self.bend
            }

            pub fn bend_mut(&mut self) -> &mut BendParameters {
                &mut self.bend
            }

            pub fn set_bend(&mut self, bend: BendParameters) {
                self.bend = bend;
            }

            #[must_use]
            pub fn multipoles(&self) -> Option<&MagneticMultipoleParameters> {
                self.multipoles.as_ref()
            }

            pub fn set_multipoles(&mut self, multipoles: Option<MagneticMultipoleParameters>) {
                self.multipoles = multipoles;
            }
        }
    };
}

bend_magnet!(
    /// A sector bend.
    Sbend
);
bend_magnet!(
    /// A rectangular bend.
    Rbend
);

/// Any lattice segment, including a nested line.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Base(BaseElement),
    Thick(ThickElement),
    Drift(Drift),
    Quadrupole(Quadrupole),
    Sextupole(Sextupole),
    Kicker(Kicker),
    Sbend(Sbend),
    Rbend(Rbend),
    BeamLine(BeamLine),
}

impl Element {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Base(_) => ElementKind::BaseElement,
            Element::Thick(_) => ElementKind::ThickElement,
            Element::Drift(_) => ElementKind::Drift,
            Element::Quadrupole(_) => ElementKind::Quadrupole,
            Element::Sextupole(_) => ElementKind::Sextupole,
            Element::Kicker(_) => ElementKind::Kicker,
            Element::Sbend(_) => ElementKind::Sbend,
            Element::Rbend(_) => ElementKind::Rbend,
            Element::BeamLine(_) => ElementKind::BeamLine,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Element::Base(e) => e.name(),
            Element::Thick(e) => e.name(),
            Element::Drift(e) => e.name(),
            Element::Quadrupole(e) => e.name(),
            Element::Sextupole(e) => e.name(),
            Element::Kicker(e) => e.name(),
            Element::Sbend(e) => e.name(),
            Element::Rbend(e) => e.name(),
            Element::BeamLine(e) => e.name(),
        }
    }

    /// The segment length, for thick variants only.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        match self {
            Element::Thick(e) => Some(e.length()),
            Element::Drift(e) => Some(e.length()),
            Element::Quadrupole(e) => Some(e.length()),
            Element::Sextupole(e) => Some(e.length()),
            Element::Kicker(e) => Some(e.length()),
            Element::Sbend(e) => Some(e.length()),
            Element::Rbend(e) => Some(e.length()),
            Element::Base(_) | Element::BeamLine(_) => None,
        }
    }

    #[must_use]
    pub fn as_line(&self) -> Option<&BeamLine> {
        match self {
            Element::BeamLine(line) => Some(line),
            _ => None,
        }
    }
}

macro_rules! element_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {$(
        impl From<$ty> for Element {
            fn from(e: $ty) -> Self {
                Element::$variant(e)
            }
        }
    )+};
}

element_from!(
    Base(BaseElement),
    Thick(ThickElement),
    Drift(Drift),
    Quadrupole(Quadrupole),
    Sextupole(Sextupole),
    Kicker(Kicker),
    Sbend(Sbend),
    Rbend(Rbend),
    BeamLine(BeamLine),
);
