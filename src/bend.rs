//! Bend (dipole) parameters (`BendP`).

use crate::document::{Document, Mapping};
use crate::error::ValidationError;
use crate::multipole::{check_finite, number_field};
use crate::utils::quoted_list;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Prefix that marks a user-defined bend parameter.
pub const AUX_PREFIX: &str = "aux_";

/// The named bend parameters. Each defaults to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BendField {
    /// \[radian\] Reference bend angle.
    RhoRef,
    /// \[T\] Reference bend field.
    BendFieldRef,
    /// \[radian\] Entrance pole face rotation with respect to a sector geometry.
    E1,
    /// \[radian\] Exit pole face rotation with respect to a sector geometry.
    E2,
    /// \[radian\] Entrance pole face rotation with respect to a rectangular geometry.
    E1Rect,
    /// \[radian\] Exit pole face rotation with respect to a rectangular geometry.
    E2Rect,
    /// \[T·m\] Entrance fringe field integral.
    EdgeInt1,
    /// \[T·m\] Exit fringe field integral.
    EdgeInt2,
    /// \[1/m\] Reference bend strength, `1 / radius_ref`.
    GRef,
    /// \[1/m\] Entrance pole face curvature.
    H1,
    /// \[1/m\] Exit pole face curvature.
    H2,
    /// \[m\] Chord length between entrance and exit faces.
    LChord,
    /// \[m\] Sagitta length.
    LSagitta,
    /// \[radian\] Reference tilt.
    TiltRef,
}

impl BendField {
    pub const ALL: [BendField; 14] = [
        BendField::RhoRef,
        BendField::BendFieldRef,
        BendField::E1,
        BendField::E2,
        BendField::E1Rect,
        BendField::E2Rect,
        BendField::EdgeInt1,
        BendField::EdgeInt2,
        BendField::GRef,
        BendField::H1,
        BendField::H2,
        BendField::LChord,
        BendField::LSagitta,
        BendField::TiltRef,
    ];

    /// The document key for this field.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            BendField::RhoRef => "rho_ref",
            BendField::BendFieldRef => "bend_field_ref",
            BendField::E1 => "e1",
            BendField::E2 => "e2",
            BendField::E1Rect => "e1_rect",
            BendField::E2Rect => "e2_rect",
            BendField::EdgeInt1 => "edge_int1",
            BendField::EdgeInt2 => "edge_int2",
            BendField::GRef => "g_ref",
            BendField::H1 => "h1",
            BendField::H2 => "h2",
            BendField::LChord => "L_chord",
            BendField::LSagitta => "L_sagitta",
            BendField::TiltRef => "tilt_ref",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl Display for BendField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BendParameters {
    values: [f64; 14],
    aux: BTreeMap<String, f64>,
}

impl BendParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from raw keys: one of the named fields or an `aux_*` extension.
    ///
    /// # Errors
    /// Returns `InvalidBendKey` for any other key and `NonFinite` for NaN or
    /// infinite values. Nothing is stored unless every pair is valid.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.set_raw(key.as_ref(), value, "BendP")?;
        }
        Ok(params)
    }

    /// Builder-style setter for a named field.
    ///
    /// # Errors
    /// Returns `NonFinite` if `value` is NaN or infinite.
    pub fn with(mut self, field: BendField, value: f64) -> Result<Self, ValidationError> {
        self.set(field, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, field: BendField) -> f64 {
        self.values[field.slot()]
    }

    /// # Errors
    /// Returns `NonFinite` if `value` is NaN or infinite; the record is unchanged.
    pub fn set(&mut self, field: BendField, value: f64) -> Result<(), ValidationError> {
        check_finite(value, field.key(), "BendP")?;
        self.values[field.slot()] = value;
        Ok(())
    }

    #[must_use]
    pub fn aux(&self, key: &str) -> Option<f64> {
        self.aux.get(key).copied()
    }

    /// Sets a user-defined extension. `key` must start with `aux_`.
    ///
    /// # Errors
    /// Returns `InvalidBendKey` for keys without the `aux_` prefix and `NonFinite`
    /// for NaN or infinite values.
    pub fn set_aux(&mut self, key: &str, value: f64) -> Result<(), ValidationError> {
        if !key.starts_with(AUX_PREFIX) {
            return Err(invalid_key(key, "BendP"));
        }
        check_finite(value, key, "BendP")?;
        self.aux.insert(key.to_string(), value);
        Ok(())
    }

    pub fn aux_iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.aux.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn set_raw(&mut self, key: &str, value: f64, location: &str) -> Result<(), ValidationError> {
        match BendField::from_key(key) {
            Some(field) => {
                check_finite(value, key, location)?;
                self.values[field.slot()] = value;
                Ok(())
            }
            None if key.starts_with(AUX_PREFIX) => {
                check_finite(value, key, location)?;
                self.aux.insert(key.to_string(), value);
                Ok(())
            }
            None => Err(invalid_key(key, location)),
        }
    }

    /// Every named field (defaults included) followed by the `aux_*` extensions.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut map: Mapping = BendField::ALL
            .into_iter()
            .map(|f| (f.key().to_string(), Document::Number(self.get(f))))
            .collect();
        for (key, value) in &self.aux {
            map.insert(key.clone(), Document::Number(*value));
        }
        Document::Mapping(map)
    }

    /// # Errors
    /// Fails if the node is not a mapping, a key is not allowed, or a value is
    /// not a finite number.
    pub fn from_document(doc: &Document, location: &str) -> Result<Self, ValidationError> {
        let map = doc.as_mapping().ok_or_else(|| ValidationError::TypeMismatch {
            location: location.to_string(),
            field: "BendP".to_string(),
            expected: "a mapping".to_string(),
            found: doc.describe(),
        })?;

        let mut params = Self::new();
        for (key, value) in map {
            if BendField::from_key(key).is_none() && !key.starts_with(AUX_PREFIX) {
                return Err(invalid_key(key, location));
            }
            let value = number_field(value, key, location)?;
            params.set_raw(key, value, location)?;
        }
        Ok(params)
    }
}

fn invalid_key(key: &str, location: &str) -> ValidationError {
    let mut allowed: Vec<&str> = BendField::ALL.into_iter().map(BendField::key).collect();
    allowed.sort_unstable();
    ValidationError::InvalidBendKey {
        location: location.to_string(),
        key: key.to_string(),
        allowed: quoted_list(allowed),
    }
}
