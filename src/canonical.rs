//! The name-keyed document form.
//!
//! Every element and line is written as a mapping with a single key, its name,
//! whose value holds the remaining fields:
//!
//! ```yaml
//! fodo_cell:
//!   kind: BeamLine
//!   line:
//!   - drift1:
//!       kind: Drift
//!       length: 0.25
//!   - quad1:
//!       kind: Quadrupole
//!       length: 1.0
//!       MagneticMultipoleP:
//!         Bn1: 1.0
//! ```
//!
//! [`lift_name`] and [`lower_name`] are the two halves of that convention and
//! work on plain field mappings. [`encode`] and [`decode`] apply them
//! recursively to whole lines.

use crate::bend::BendParameters;
use crate::document::{Document, Mapping};
use crate::element::{
    BaseElement, Drift, Element, ElementKind, Kicker, Length, Name, Quadrupole, Rbend, Sbend,
    Sextupole, ThickElement,
};
use crate::error::ValidationError;
use crate::line::BeamLine;
use crate::multipole::{number_field, MagneticMultipoleParameters};
use crate::utils::{child, index, or_root, quoted_list};
use log::{debug, trace};

pub const NAME_FIELD: &str = "name";
pub const KIND_FIELD: &str = "kind";
pub const LINE_FIELD: &str = "line";
pub const LENGTH_FIELD: &str = "length";
pub const MULTIPOLE_FIELD: &str = "MagneticMultipoleP";
pub const BEND_FIELD: &str = "BendP";

/// One entry handed to [`decode_entries`]: either a value already built in
/// code, which is kept as is, or a document node still to be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEntry {
    Element(Element),
    Document(Document),
}

impl From<Element> for LineEntry {
    fn from(e: Element) -> Self {
        LineEntry::Element(e)
    }
}

impl From<Document> for LineEntry {
    fn from(d: Document) -> Self {
        LineEntry::Document(d)
    }
}

/// Pops `name` out of a flat field set and re-keys the rest under it.
///
/// # Errors
/// Returns `MissingName` if there is no `name` field and `TypeMismatch` if it
/// is not a string.
pub fn lift_name(mut fields: Mapping, location: &str) -> Result<Document, ValidationError> {
    let name = fields
        .remove(NAME_FIELD)
        .ok_or_else(|| ValidationError::MissingName {
            location: or_root(location),
        })?;
    match name {
        Document::String(name) => Ok(Document::single(name, Document::Mapping(fields))),
        other => Err(ValidationError::TypeMismatch {
            location: or_root(location),
            field: NAME_FIELD.to_string(),
            expected: "a string".to_string(),
            found: other.describe(),
        }),
    }
}

/// The inverse of [`lift_name`]: turns `{name: {fields}}` into a flat field set
/// that includes `name`.
///
/// # Errors
/// Fails with `NotSingleKey` unless `doc` is a mapping with exactly one key,
/// with `TypeMismatch` if the value under the key is not a mapping, and with
/// `UnknownField` if that value already has a `name` field.
pub fn lower_name(doc: &Document, location: &str) -> Result<Mapping, ValidationError> {
    let (name, body) = match doc.as_mapping() {
        Some(map) if map.len() == 1 => map.iter().next(),
        _ => None,
    }
    .ok_or_else(|| ValidationError::NotSingleKey {
        location: or_root(location),
        found: doc.describe(),
    })?;

    let here = child(location, name);
    let mut fields = body
        .as_mapping()
        .ok_or_else(|| ValidationError::TypeMismatch {
            location: here.clone(),
            field: name.clone(),
            expected: "a mapping of the element's fields".to_string(),
            found: body.describe(),
        })?
        .clone();

    if fields.contains_key(NAME_FIELD) {
        return Err(ValidationError::UnknownField {
            location: here,
            field: NAME_FIELD.to_string(),
            expected: "any field except 'name'; the name is the wrapping key".to_string(),
        });
    }
    fields.insert(NAME_FIELD.to_string(), Document::String(name.clone()));
    Ok(fields)
}

/// Renders a line in the name-keyed form.
///
/// # Errors
/// Returns `MissingName` if a field set reaches [`lift_name`] without a name,
/// which the typed model never produces.
pub fn encode(line: &BeamLine) -> Result<Document, ValidationError> {
    debug!("Encoding line '{}' with {} elements", line.name(), line.len());
    lift_name(line_fields(line, line.name())?, line.name())
}

/// Renders a single element (or nested line) in the name-keyed form.
///
/// # Errors
/// See [`encode`].
pub fn encode_element(element: &Element) -> Result<Document, ValidationError> {
    encode_at(element, "")
}

fn encode_at(element: &Element, location: &str) -> Result<Document, ValidationError> {
    trace!("Encoding {} '{}'", element.kind(), element.name());
    let fields = match element {
        Element::BeamLine(line) => line_fields(line, &child(location, line.name()))?,
        other => element_fields(other),
    };
    lift_name(fields, location)
}

fn line_fields(line: &BeamLine, location: &str) -> Result<Mapping, ValidationError> {
    let line_location = child(location, LINE_FIELD);
    let entries = line
        .iter()
        .enumerate()
        .map(|(i, e)| encode_at(e, &index(&line_location, i)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut fields = base_fields(line.name(), ElementKind::BeamLine);
    fields.insert(LINE_FIELD.to_string(), Document::Sequence(entries));
    Ok(fields)
}

fn base_fields(name: &str, kind: ElementKind) -> Mapping {
    let mut fields = Mapping::new();
    fields.insert(NAME_FIELD.to_string(), Document::from(name));
    fields.insert(KIND_FIELD.to_string(), Document::from(kind.tag()));
    fields
}

fn element_fields(element: &Element) -> Mapping {
    let mut fields = base_fields(element.name(), element.kind());
    if let Some(length) = element.length() {
        fields.insert(LENGTH_FIELD.to_string(), Document::Number(length));
    }

    let (bend, multipoles) = match element {
        Element::Quadrupole(e) => (None, Some(e.multipoles())),
        Element::Sextupole(e) => (None, Some(e.multipoles())),
        Element::Kicker(e) => (None, Some(e.multipoles())),
        Element::Sbend(e) => (Some(e.bend()), e.multipoles()),
        Element::Rbend(e) => (Some(e.bend()), e.multipoles()),
        _ => (None, None),
    };
    if let Some(bend) = bend {
        fields.insert(BEND_FIELD.to_string(), bend.to_document());
    }
    if let Some(multipoles) = multipoles {
        fields.insert(MULTIPOLE_FIELD.to_string(), multipoles.to_document());
    }
    fields
}

/// Builds a line from its name-keyed document form.
///
/// # Errors
/// Any schema, constraint, shape or unsupported-feature error found while
/// walking the document. Nothing is built unless the whole tree is valid.
pub fn decode(doc: &Document) -> Result<BeamLine, ValidationError> {
    let fields = lower_name(doc, "")?;
    let location = name_of(&fields, "")?.to_string();
    let line = decode_line(&fields, &location)?;
    debug!("Decoded line '{}' with {} elements", line.name(), line.len());
    Ok(line)
}

/// Builds a single element (or nested line) from its name-keyed form.
///
/// # Errors
/// See [`decode`].
pub fn decode_element(doc: &Document) -> Result<Element, ValidationError> {
    decode_node(doc, "")
}

/// Builds a line from a mix of ready-made elements and document nodes.
///
/// # Errors
/// Fails on an empty name or on the first entry that does not decode.
pub fn decode_entries(
    name: impl Into<String>,
    entries: impl IntoIterator<Item = LineEntry>,
) -> Result<BeamLine, ValidationError> {
    let name = Name::new(name)?;
    let location = child(name.as_str(), LINE_FIELD);
    let line = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| decode_entry(entry, &index(&location, i)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BeamLine::from_parts(name, line))
}

fn decode_entry(entry: LineEntry, location: &str) -> Result<Element, ValidationError> {
    match entry {
        LineEntry::Element(element) => Ok(element),
        LineEntry::Document(doc) => decode_node(&doc, location),
    }
}

fn decode_node(doc: &Document, location: &str) -> Result<Element, ValidationError> {
    match doc {
        Document::String(reference) => Err(ValidationError::UnsupportedReference {
            location: or_root(location),
            reference: reference.clone(),
        }),
        Document::Mapping(map) if map.len() == 1 => {
            let fields = lower_name(doc, location)?;
            let name = name_of(&fields, location)?;
            let here = child(location, name.as_str());
            decode_fields(&fields, name, &here)
        }
        other => Err(ValidationError::NotSingleKey {
            location: or_root(location),
            found: other.describe(),
        }),
    }
}

fn name_of(fields: &Mapping, location: &str) -> Result<Name, ValidationError> {
    let raw = fields
        .get(NAME_FIELD)
        .and_then(Document::as_str)
        .ok_or_else(|| ValidationError::MissingName {
            location: or_root(location),
        })?;
    Name::new_at(raw, &or_root(location))
}

fn decode_line(fields: &Mapping, location: &str) -> Result<BeamLine, ValidationError> {
    let name = name_of(fields, location)?;
    match declared_kind(fields, location)? {
        None | Some(ElementKind::BeamLine) => {}
        Some(other) => {
            return Err(ValidationError::KindMismatch {
                location: location.to_string(),
                expected: ElementKind::BeamLine.tag().to_string(),
                found: other.tag().to_string(),
            });
        }
    }
    check_fields(fields, ElementKind::BeamLine, location)?;
    line_entries(fields, name, location)
}

/// Variant dispatch on the `kind` tag, falling back to the field shape when
/// the tag is absent.
fn decode_fields(fields: &Mapping, name: Name, location: &str) -> Result<Element, ValidationError> {
    let kind = match declared_kind(fields, location)? {
        Some(kind) => kind,
        None => infer_kind(fields, location)?,
    };
    trace!("Decoding {kind} '{name}'");
    check_fields(fields, kind, location)?;

    let element = match kind {
        ElementKind::BaseElement => Element::Base(BaseElement::new(name.as_str())?),
        ElementKind::ThickElement => {
            Element::Thick(ThickElement::new(name.as_str(), length(fields, location)?)?)
        }
        ElementKind::Drift => Element::Drift(Drift::new(name.as_str(), length(fields, location)?)?),
        ElementKind::Quadrupole => Element::Quadrupole(Quadrupole::new(
            name.as_str(),
            length(fields, location)?,
            required_multipoles(fields, location)?,
        )?),
        ElementKind::Sextupole => Element::Sextupole(Sextupole::new(
            name.as_str(),
            length(fields, location)?,
            required_multipoles(fields, location)?,
        )?),
        ElementKind::Kicker => Element::Kicker(Kicker::new(
            name.as_str(),
            length(fields, location)?,
            required_multipoles(fields, location)?,
        )?),
        ElementKind::Sbend => {
            let mut sbend = Sbend::new(
                name.as_str(),
                length(fields, location)?,
                bend(fields, location)?,
            )?;
            sbend.set_multipoles(optional_multipoles(fields, location)?);
            Element::Sbend(sbend)
        }
        ElementKind::Rbend => {
            let mut rbend = Rbend::new(
                name.as_str(),
                length(fields, location)?,
                bend(fields, location)?,
            )?;
            rbend.set_multipoles(optional_multipoles(fields, location)?);
            Element::Rbend(rbend)
        }
        ElementKind::BeamLine => Element::BeamLine(line_entries(fields, name, location)?),
    };
    Ok(element)
}

fn line_entries(fields: &Mapping, name: Name, location: &str) -> Result<BeamLine, ValidationError> {
    let raw = required(fields, LINE_FIELD, location)?;
    let entries = raw.as_sequence().ok_or_else(|| ValidationError::TypeMismatch {
        location: location.to_string(),
        field: LINE_FIELD.to_string(),
        expected: "a sequence".to_string(),
        found: raw.describe(),
    })?;

    let line_location = child(location, LINE_FIELD);
    let line = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| decode_node(entry, &index(&line_location, i)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BeamLine::from_parts(name, line))
}

fn declared_kind(fields: &Mapping, location: &str) -> Result<Option<ElementKind>, ValidationError> {
    let Some(raw) = fields.get(KIND_FIELD) else {
        return Ok(None);
    };
    let tag = raw.as_str().ok_or_else(|| ValidationError::TypeMismatch {
        location: location.to_string(),
        field: KIND_FIELD.to_string(),
        expected: "a string".to_string(),
        found: raw.describe(),
    })?;
    ElementKind::from_tag(tag)
        .map(Some)
        .ok_or_else(|| ValidationError::UnknownKind {
            location: location.to_string(),
            kind: tag.to_string(),
            known: quoted_list(ElementKind::ALL.into_iter().map(ElementKind::tag)),
        })
}

/// Only unambiguous shapes are inferred: a `line` field, no fields, or just a length.
fn infer_kind(fields: &Mapping, location: &str) -> Result<ElementKind, ValidationError> {
    let mut keys = fields.keys().map(String::as_str).filter(|k| *k != NAME_FIELD);
    let first = keys.next();
    let second = keys.next();
    match (first, second) {
        (None, _) => Ok(ElementKind::BaseElement),
        (Some(LENGTH_FIELD), None) => Ok(ElementKind::ThickElement),
        _ if fields.contains_key(LINE_FIELD) => Ok(ElementKind::BeamLine),
        _ => Err(ValidationError::MissingField {
            location: location.to_string(),
            field: KIND_FIELD.to_string(),
        }),
    }
}

fn allowed_fields(kind: ElementKind) -> &'static [&'static str] {
    match kind {
        ElementKind::BaseElement => &[NAME_FIELD, KIND_FIELD],
        ElementKind::ThickElement | ElementKind::Drift => &[NAME_FIELD, KIND_FIELD, LENGTH_FIELD],
        ElementKind::Quadrupole | ElementKind::Sextupole | ElementKind::Kicker => {
            &[NAME_FIELD, KIND_FIELD, LENGTH_FIELD, MULTIPOLE_FIELD]
        }
        ElementKind::Sbend | ElementKind::Rbend => {
            &[
                NAME_FIELD,
                KIND_FIELD,
                LENGTH_FIELD,
                BEND_FIELD,
                MULTIPOLE_FIELD,
            ]
        }
        ElementKind::BeamLine => &[NAME_FIELD, KIND_FIELD, LINE_FIELD],
    }
}

fn check_fields(
    fields: &Mapping,
    kind: ElementKind,
    location: &str,
) -> Result<(), ValidationError> {
    let allowed = allowed_fields(kind);
    match fields.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(unknown) => Err(ValidationError::UnknownField {
            location: location.to_string(),
            field: unknown.clone(),
            expected: quoted_list(allowed.iter().copied()),
        }),
        None => Ok(()),
    }
}

fn required<'a>(
    fields: &'a Mapping,
    field: &str,
    location: &str,
) -> Result<&'a Document, ValidationError> {
    fields.get(field).ok_or_else(|| ValidationError::MissingField {
        location: location.to_string(),
        field: field.to_string(),
    })
}

fn length(fields: &Mapping, location: &str) -> Result<f64, ValidationError> {
    let meters = number_field(
        required(fields, LENGTH_FIELD, location)?,
        LENGTH_FIELD,
        location,
    )?;
    Length::new_at(meters, location).map(Length::meters)
}

fn required_multipoles(
    fields: &Mapping,
    location: &str,
) -> Result<MagneticMultipoleParameters, ValidationError> {
    let doc = required(fields, MULTIPOLE_FIELD, location)?;
    MagneticMultipoleParameters::from_document(doc, &child(location, MULTIPOLE_FIELD))
}

fn optional_multipoles(
    fields: &Mapping,
    location: &str,
) -> Result<Option<MagneticMultipoleParameters>, ValidationError> {
    match fields.get(MULTIPOLE_FIELD) {
        None | Some(Document::Null) => Ok(None),
        Some(doc) => {
            MagneticMultipoleParameters::from_document(doc, &child(location, MULTIPOLE_FIELD))
                .map(Some)
        }
    }
}

fn bend(fields: &Mapping, location: &str) -> Result<BendParameters, ValidationError> {
    let doc = required(fields, BEND_FIELD, location)?;
    BendParameters::from_document(doc, &child(location, BEND_FIELD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    fn quad(name: &str, length: f64, bn1: f64) -> Element {
        let params = MagneticMultipoleParameters::from_pairs([("Bn1", bn1)]).unwrap();
        Quadrupole::new(name, length, params).unwrap().into()
    }

    #[test]
    fn lift_name_rekeys_remaining_fields() {
        let mut fields = Mapping::new();
        fields.insert("name".to_string(), "d1".into());
        fields.insert("length".to_string(), 1.0.into());
        let lifted = lift_name(fields, "").unwrap();
        assert_eq!(lifted, doc(json!({"d1": {"length": 1.0}})));
    }

    #[test]
    fn lift_name_requires_a_name() {
        let mut fields = Mapping::new();
        fields.insert("length".to_string(), 1.0.into());
        assert_eq!(
            lift_name(fields, "l.line[0]").unwrap_err(),
            ValidationError::MissingName {
                location: "l.line[0]".to_string()
            }
        );
    }

    #[test]
    fn lower_name_is_the_inverse_of_lift_name() {
        let wrapped = doc(json!({"q1": {"kind": "Quadrupole", "length": 2.0}}));
        let fields = lower_name(&wrapped, "").unwrap();
        assert_eq!(fields["name"], Document::from("q1"));
        assert_eq!(lift_name(fields, "").unwrap(), wrapped);
    }

    #[test]
    fn lower_name_rejects_other_shapes() {
        let two_keys = doc(json!({"a": {}, "b": {}}));
        assert!(matches!(
            lower_name(&two_keys, ""),
            Err(ValidationError::NotSingleKey { .. })
        ));
        let scalar_body = doc(json!({"a": 1.0}));
        assert!(matches!(
            lower_name(&scalar_body, ""),
            Err(ValidationError::TypeMismatch { .. })
        ));
        let named_body = doc(json!({"a": {"name": "b"}}));
        assert!(matches!(
            lower_name(&named_body, ""),
            Err(ValidationError::UnknownField { .. })
        ));
    }

    #[test]
    fn encodes_elements_with_kind_and_fields() {
        let encoded = encode_element(&quad("quad1", 1.0, 1.0)).unwrap();
        assert_eq!(
            encoded,
            doc(json!({"quad1": {
                "kind": "Quadrupole",
                "length": 1.0,
                "MagneticMultipoleP": {"Bn1": 1.0}
            }}))
        );
    }

    #[test]
    fn encodes_nested_lines_recursively() {
        let d1 = Drift::new("d1", 0.5).unwrap();
        let marker = BaseElement::new("m").unwrap();
        let inner = BeamLine::new("inner", vec![d1.into()]).unwrap();
        let outer = BeamLine::new("outer", vec![inner.into(), marker.into()]).unwrap();
        assert_eq!(
            encode(&outer).unwrap(),
            doc(json!({"outer": {
                "kind": "BeamLine",
                "line": [
                    {"inner": {"kind": "BeamLine", "line": [
                        {"d1": {"kind": "Drift", "length": 0.5}}
                    ]}},
                    {"m": {"kind": "BaseElement"}}
                ]
            }}))
        );
    }

    #[test]
    fn decode_round_trips_every_variant() {
        let bend = BendParameters::from_pairs([("g_ref", 0.1), ("aux_id", 7.0)]).unwrap();
        let mp = MagneticMultipoleParameters::from_pairs([("Kn2", 0.3)]).unwrap();
        let sbend = Sbend::new("sb", 1.5, bend.clone()).unwrap();
        let rbend = Rbend::new("rb", 1.5, bend).unwrap().with_multipoles(mp.clone());
        let inner = BeamLine::new("arc", vec![sbend.into(), rbend.into()]).unwrap();
        let line = BeamLine::new(
            "ring",
            vec![
                BaseElement::new("start").unwrap().into(),
                ThickElement::new("t", 0.0).unwrap().into(),
                Drift::new("d", 2.0).unwrap().into(),
                quad("q", 1.0, -0.5),
                Sextupole::new("s", 0.2, mp.clone()).unwrap().into(),
                Kicker::new("k", 0.1, mp).unwrap().into(),
                inner.into(),
            ],
        )
        .unwrap();

        assert_eq!(decode(&encode(&line).unwrap()).unwrap(), line);
    }

    #[test]
    fn decode_rejects_string_references() {
        let d = doc(json!({"l": {"line": ["drift1"]}}));
        assert_eq!(
            decode(&d).unwrap_err(),
            ValidationError::UnsupportedReference {
                location: "l.line[0]".to_string(),
                reference: "drift1".to_string(),
            }
        );
    }

    #[test]
    fn decode_reports_nested_locations() {
        let d = doc(json!({"cell": {"line": [
            {"sub": {"line": [
                {"q1": {
                    "kind": "Quadrupole",
                    "length": 1.0,
                    "MagneticMultipoleP": {"Bn01": 1.0}
                }}
            ]}}
        ]}}));
        match decode(&d).unwrap_err() {
            ValidationError::InvalidMultipoleKey { location, key, .. } => {
                assert_eq!(location, "cell.line[0].sub.line[0].q1.MagneticMultipoleP");
                assert_eq!(key, "Bn01");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn decode_requires_line_sequence() {
        let missing = doc(json!({"l": {"kind": "BeamLine"}}));
        assert!(matches!(
            decode(&missing),
            Err(ValidationError::MissingField { field, .. }) if field == "line"
        ));
        let wrong = doc(json!({"l": {"line": {"d": {}}}}));
        assert!(matches!(
            decode(&wrong),
            Err(ValidationError::TypeMismatch { field, .. }) if field == "line"
        ));
    }

    #[test]
    fn decode_rejects_non_single_key_entries() {
        let d = doc(json!({"l": {"line": [{"a": {}, "b": {}}]}}));
        assert!(matches!(decode(&d), Err(ValidationError::NotSingleKey { .. })));
        let d = doc(json!({"l": {"line": [1.0]}}));
        assert!(matches!(decode(&d), Err(ValidationError::NotSingleKey { .. })));
    }

    #[test]
    fn decode_rejects_non_line_top_level() {
        let d = doc(json!({"d": {"kind": "Drift", "length": 1.0}}));
        assert!(matches!(decode(&d), Err(ValidationError::KindMismatch { .. })));
        let d = doc(json!([{"l": {"line": []}}]));
        assert!(matches!(decode(&d), Err(ValidationError::NotSingleKey { .. })));
    }

    #[test]
    fn decode_rejects_unknown_fields_and_kinds() {
        let drift = json!({"d": {"kind": "Drift", "length": 1.0, "angle": 0.1}});
        let d = doc(json!({"l": {"line": [drift]}}));
        assert!(matches!(
            decode(&d),
            Err(ValidationError::UnknownField { field, .. }) if field == "angle"
        ));
        let d = doc(json!({"l": {"line": [{"x": {"kind": "Solenoid"}}]}}));
        assert!(matches!(decode(&d), Err(ValidationError::UnknownKind { .. })));
    }

    #[test]
    fn decode_rejects_negative_lengths() {
        let d = doc(json!({"l": {"line": [{"d": {"kind": "Drift", "length": -1.0}}]}}));
        assert_eq!(
            decode(&d).unwrap_err(),
            ValidationError::NegativeLength {
                location: "l.line[0].d".to_string(),
                value: -1.0,
            }
        );
    }

    #[test]
    fn kind_is_inferred_only_from_unambiguous_shapes() {
        assert_eq!(
            decode_element(&doc(json!({"m": {}}))).unwrap(),
            Element::Base(BaseElement::new("m").unwrap())
        );
        assert_eq!(
            decode_element(&doc(json!({"t": {"length": 1.0}}))).unwrap(),
            Element::Thick(ThickElement::new("t", 1.0).unwrap())
        );
        assert!(matches!(
            decode_element(&doc(json!({"q": {"length": 1.0, "MagneticMultipoleP": {}}}))),
            Err(ValidationError::MissingField { field, .. }) if field == "kind"
        ));
    }

    #[test]
    fn empty_lines_decode() {
        let line = decode(&doc(json!({"empty": {"line": []}}))).unwrap();
        assert!(line.is_empty());
        assert_eq!(line.name(), "empty");
    }

    #[test]
    fn decode_entries_keeps_built_elements() {
        let built = quad("q1", 1.0, 1.0);
        let drift = doc(json!({"d1": {"kind": "Drift", "length": 0.5}}));
        let entries = [LineEntry::from(built.clone()), LineEntry::from(drift)];
        let line = decode_entries("mixed", entries).unwrap();
        assert_eq!(line.elements()[0], built);
        assert_eq!(
            line.elements()[1],
            Element::Drift(Drift::new("d1", 0.5).unwrap())
        );

        let reference = LineEntry::from(Document::from("q1"));
        let err = decode_entries("mixed", [reference]).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedReference { .. }));
    }
}
