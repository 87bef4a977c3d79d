// Integration tests for pals-core using fixture documents
use miette::Report;
use pals_core::{read_file, BeamLine, Element, ElementKind, PalsError, ValidationError};
use std::path::PathBuf;

fn get_test_file_path(subdir: &str, filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(subdir)
        .join(filename)
}

fn read_ok(filename: &str) -> BeamLine {
    match read_file(get_test_file_path("ok", filename)) {
        Ok(line) => line,
        Err(err) => panic!("{:?}", Report::new(err)),
    }
}

fn read_err(filename: &str) -> ValidationError {
    match read_file(get_test_file_path("err", filename)) {
        Ok(line) => panic!("Expected {filename} to fail, but got {line:?}"),
        Err(PalsError::Validation(err)) => err,
        Err(other) => panic!("Expected a validation error, got {other:?}"),
    }
}

// Documents that should load successfully
mod ok_tests {
    use super::*;

    #[test]
    fn test_fodo_yaml_and_json_agree() {
        let from_yaml = read_ok("fodo.yaml");
        let from_json = read_ok("fodo.json");
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml.name(), "fodo_cell");
        assert_eq!(from_yaml.len(), 5);
        assert_eq!(from_yaml.total_length(), 3.25);
    }

    #[test]
    fn test_ring_with_nested_arcs() {
        let ring = read_ok("ring.yaml");
        let kinds: Vec<ElementKind> = ring.iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            [
                ElementKind::BeamLine,
                ElementKind::Drift,
                ElementKind::BeamLine,
                ElementKind::BaseElement
            ]
        );

        let arc1 = ring.elements()[0].as_line().unwrap();
        match &arc1.elements()[0] {
            Element::Sbend(b1) => {
                assert_eq!(b1.bend().aux("aux_magnet_id"), Some(17.0));
                assert!(b1.multipoles().is_none());
            }
            other => panic!("Expected an Sbend, got {other:?}"),
        }

        let arc2 = ring.find("arc2").and_then(Element::as_line).unwrap();
        match arc2.find("b2") {
            Some(Element::Rbend(b2)) => {
                assert_eq!(b2.multipoles().and_then(|m| m.get_named("Bn2")), Some(0.01));
            }
            other => panic!("Expected an Rbend, got {other:?}"),
        }
    }

    #[test]
    fn test_ring_round_trips_through_both_codecs() {
        let ring = read_ok("ring.yaml");
        let yaml = pals_core::to_yaml(&ring).unwrap();
        assert_eq!(pals_core::from_yaml(&yaml).unwrap(), ring);
        let json = pals_core::to_json(&ring).unwrap();
        assert_eq!(pals_core::from_json(&json).unwrap(), ring);
    }

    #[test]
    fn test_empty_line() {
        let line = read_ok("empty.json");
        assert!(line.is_empty());
    }
}

// Documents that should be rejected
mod err_tests {
    use super::*;

    #[test]
    fn test_reference_entries_fail_explicitly() {
        let err = read_err("reference.yaml");
        assert_eq!(
            err,
            ValidationError::UnsupportedReference {
                location: "cell.line[1]".to_string(),
                reference: "drift1".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_length() {
        let err = read_err("negative_length.yaml");
        assert!(matches!(err, ValidationError::NegativeLength { value, .. } if value == -0.5));
    }

    #[test]
    fn test_leading_zero_multipole_key() {
        match read_err("leading_zero.json") {
            ValidationError::InvalidMultipoleKey { location, key, .. } => {
                assert_eq!(location, "cell.line[0].q1.MagneticMultipoleP");
                assert_eq!(key, "Bn01");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_bend_field() {
        let err = read_err("bad_bend.yaml");
        assert!(matches!(
            err,
            ValidationError::InvalidBendKey { key, .. } if key == "unknown_field"
        ));
    }

    #[test]
    fn test_missing_line_field() {
        let err = read_err("missing_line.yaml");
        assert_eq!(
            err,
            ValidationError::MissingField {
                location: "cell".to_string(),
                field: "line".to_string(),
            }
        );
    }

    #[test]
    fn test_multi_key_entry() {
        let err = read_err("two_keys.yaml");
        assert!(matches!(
            err,
            ValidationError::NotSingleKey { location, .. } if location == "cell.line[0]"
        ));
    }

    #[test]
    fn test_nan_length() {
        match read_err("non_finite_length.yaml") {
            ValidationError::NonFinite {
                location,
                field,
                value,
            } => {
                assert_eq!(location, "cell.line[0].d1");
                assert_eq!(field, "length");
                assert!(value.is_nan());
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_infinite_multipole_value() {
        let err = read_err("non_finite_multipole.yaml");
        assert_eq!(
            err,
            ValidationError::NonFinite {
                location: "cell.line[1].q1.MagneticMultipoleP".to_string(),
                field: "Bn1".to_string(),
                value: f64::INFINITY,
            }
        );
    }
}
