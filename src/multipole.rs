//! Magnetic multipole parameters (`MagneticMultipoleP`).
//!
//! Keys follow the grammar `<prefix><order>` where the prefix is one of
//! `tilt`, `Bn`, `Bs`, `Kn`, `Ks` and the order is a non-negative integer
//! written without leading zeros (`0` itself is fine).

use crate::document::{Document, Mapping};
use crate::error::ValidationError;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MultipoleFamily {
    /// Tilt angle of the multipole, `tiltN`.
    Tilt,
    /// Field normal component, `BnN`.
    Bn,
    /// Field skew component, `BsN`.
    Bs,
    /// Normalized normal component, `KnN`.
    Kn,
    /// Normalized skew component, `KsN`.
    Ks,
}

impl MultipoleFamily {
    pub const ALL: [MultipoleFamily; 5] = [
        MultipoleFamily::Tilt,
        MultipoleFamily::Bn,
        MultipoleFamily::Bs,
        MultipoleFamily::Kn,
        MultipoleFamily::Ks,
    ];

    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            MultipoleFamily::Tilt => "tilt",
            MultipoleFamily::Bn => "Bn",
            MultipoleFamily::Bs => "Bs",
            MultipoleFamily::Kn => "Kn",
            MultipoleFamily::Ks => "Ks",
        }
    }
}

/// A validated multipole parameter name such as `Bn1` or `tilt0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MultipoleKey {
    family: MultipoleFamily,
    order: u64,
}

impl MultipoleKey {
    #[must_use]
    pub fn new(family: MultipoleFamily, order: u64) -> Self {
        Self { family, order }
    }

    #[must_use]
    pub fn family(&self) -> MultipoleFamily {
        self.family
    }

    #[must_use]
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Parses a raw document key, reporting failures against `location`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMultipoleKey` if the prefix is unknown or
    /// the order is missing, non-numeric, has a leading zero, or overflows.
    pub fn parse_at(key: &str, location: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidMultipoleKey {
            location: location.to_string(),
            key: key.to_string(),
            reason,
        };

        let family = MultipoleFamily::ALL
            .into_iter()
            .filter(|f| key.starts_with(f.prefix()))
            .max_by_key(|f| f.prefix().len())
            .ok_or_else(|| invalid("unknown prefix".to_string()))?;

        let prefix = family.prefix();
        let digits = &key[prefix.len()..];
        let form = format!("must be of the form '{prefix}N'");
        if digits.is_empty() {
            return Err(invalid(format!("{form}, but the order N is missing")));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("{form} where N is a non-negative integer")));
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(invalid(format!("{form} with no leading zeros in N")));
        }
        let order = digits
            .parse::<u64>()
            .map_err(|_| invalid(format!("order {digits} is too large")))?;

        Ok(Self { family, order })
    }
}

impl FromStr for MultipoleKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_at(s, "MagneticMultipoleP")
    }
}

impl Display for MultipoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.prefix(), self.order)
    }
}

/// An open, key-validated mapping of multipole components to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagneticMultipoleParameters {
    values: BTreeMap<MultipoleKey, f64>,
}

impl MagneticMultipoleParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from raw string keys. Every key and value is checked
    /// before anything is stored.
    ///
    /// # Errors
    /// Returns the first `InvalidMultipoleKey` or `NonFinite` error found.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, ValidationError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let location = "MagneticMultipoleP";
        let mut values = BTreeMap::new();
        for (raw, value) in pairs {
            let raw = raw.as_ref();
            let key = MultipoleKey::parse_at(raw, location)?;
            check_finite(value, raw, location)?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Builder-style insert.
    ///
    /// # Errors
    /// Returns `NonFinite` if `value` is NaN or infinite.
    pub fn with(mut self, key: MultipoleKey, value: f64) -> Result<Self, ValidationError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Sets one component, returning the previous value. The record is left
    /// untouched when the value is rejected.
    ///
    /// # Errors
    /// Returns `NonFinite` if `value` is NaN or infinite.
    pub fn insert(
        &mut self,
        key: MultipoleKey,
        value: f64,
    ) -> Result<Option<f64>, ValidationError> {
        check_finite(value, &key.to_string(), "MagneticMultipoleP")?;
        Ok(self.values.insert(key, value))
    }

    pub fn remove(&mut self, key: MultipoleKey) -> Option<f64> {
        self.values.remove(&key)
    }

    #[must_use]
    pub fn get(&self, key: MultipoleKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Looks a component up by its raw name, e.g. `"Bn1"`.
    #[must_use]
    pub fn get_named(&self, key: &str) -> Option<f64> {
        key.parse::<MultipoleKey>().ok().and_then(|k| self.get(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MultipoleKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let map: Mapping = self
            .values
            .iter()
            .map(|(k, v)| (k.to_string(), Document::Number(*v)))
            .collect();
        Document::Mapping(map)
    }

    /// Reads the record from a document node located at `location`.
    ///
    /// # Errors
    /// Fails if the node is not a mapping, a key breaks the grammar, or a
    /// value is not a finite number.
    pub fn from_document(doc: &Document, location: &str) -> Result<Self, ValidationError> {
        let map = doc.as_mapping().ok_or_else(|| ValidationError::TypeMismatch {
            location: location.to_string(),
            field: "MagneticMultipoleP".to_string(),
            expected: "a mapping".to_string(),
            found: doc.describe(),
        })?;

        let mut values = BTreeMap::new();
        for (raw, value) in map {
            let key = MultipoleKey::parse_at(raw, location)?;
            values.insert(key, number_field(value, raw, location)?);
        }
        Ok(Self { values })
    }
}

pub(crate) fn check_finite(value: f64, field: &str, location: &str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            location: location.to_string(),
            field: field.to_string(),
            value,
        })
    }
}

/// Reads a finite number out of a document node.
pub(crate) fn number_field(
    doc: &Document,
    field: &str,
    location: &str,
) -> Result<f64, ValidationError> {
    let value = doc.as_f64().ok_or_else(|| ValidationError::TypeMismatch {
        location: location.to_string(),
        field: field.to_string(),
        expected: "a number".to_string(),
        found: doc.describe(),
    })?;
    check_finite(value, field, location)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_for(key: &str) -> String {
        match MagneticMultipoleParameters::from_pairs([(key, 1.0)]) {
            Err(ValidationError::InvalidMultipoleKey { reason, .. }) => reason,
            other => panic!("expected InvalidMultipoleKey for {key}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_every_family() {
        let params = MagneticMultipoleParameters::from_pairs([
            ("Bn1", 1.0),
            ("Ks0", -2.0),
            ("tilt3", 0.1),
            ("Bs12", 4.0),
            ("Kn2", 5.0),
        ])
        .unwrap();

        assert_eq!(params.len(), 5);
        let ks0 = MultipoleKey::new(MultipoleFamily::Ks, 0);
        assert_eq!(params.get(ks0), Some(-2.0));
        assert_eq!(params.get_named("tilt3"), Some(0.1));
        assert_eq!(params.get_named("Bs12"), Some(4.0));
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(reason_for("Bn01").contains("leading zeros"));
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert_eq!(reason_for("Xn1"), "unknown prefix");
    }

    #[test]
    fn rejects_missing_order() {
        assert!(reason_for("Bn").contains("missing"));
        assert!(reason_for("tilt").contains("'tiltN'"));
    }

    #[test]
    fn rejects_non_digit_order() {
        assert!(reason_for("Bn1a").contains("non-negative integer"));
        assert!(reason_for("Kn-1").contains("non-negative integer"));
    }

    #[test]
    fn accepts_large_orders() {
        let params = MagneticMultipoleParameters::from_pairs([("Bn99999999999", 1.0)]);
        let params = params.unwrap();
        let (key, _) = params.iter().next().unwrap();
        assert_eq!(key.order(), 99_999_999_999);
        assert_eq!(key.to_string(), "Bn99999999999");
    }

    #[test]
    fn rejects_overflowing_order() {
        assert!(reason_for("Bn99999999999999999999").contains("too large"));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = MagneticMultipoleParameters::from_pairs([("Bn1", f64::NAN)]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { .. }));
    }

    #[test]
    fn failed_insert_leaves_record_unchanged() {
        let key = MultipoleKey::new(MultipoleFamily::Bn, 1);
        let mut params = MagneticMultipoleParameters::new().with(key, 1.0).unwrap();
        assert!(params.insert(key, f64::INFINITY).is_err());
        assert_eq!(params.get(key), Some(1.0));
    }

    #[test]
    fn key_display_matches_grammar() {
        let tilt0 = MultipoleKey::new(MultipoleFamily::Tilt, 0);
        assert_eq!(tilt0.to_string(), "tilt0");
        assert_eq!("Kn10".parse::<MultipoleKey>().unwrap().order(), 10);
    }

    #[test]
    fn reads_document_mapping() {
        let doc: Document = serde_yaml::from_str("Bn1: 1\nBs2: -0.5\n").unwrap();
        let location = "q1.MagneticMultipoleP";
        let params = MagneticMultipoleParameters::from_document(&doc, location).unwrap();
        assert_eq!(params.get_named("Bn1"), Some(1.0));
        assert_eq!(params.to_document(), doc);
    }

    #[test]
    fn document_errors_carry_location() {
        let doc: Document = serde_yaml::from_str("Bn1: strong\n").unwrap();
        let location = "q1.MagneticMultipoleP";
        let err = MagneticMultipoleParameters::from_document(&doc, location).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                location: "q1.MagneticMultipoleP".to_string(),
                field: "Bn1".to_string(),
                expected: "a number".to_string(),
                found: "a string \"strong\"".to_string(),
            }
        );
    }
}
