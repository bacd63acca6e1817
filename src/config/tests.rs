//! Tests for sweep file loading

use std::io::Write;
use std::path::Path;

use crate::config::{builtin_sweep, load_or_builtin, load_sweep, parse_sweep, SweepFile};
use crate::error::SweepError;
use crate::space::{ParamValue, ResolvedValue};

const SWEEP_YAML: &str = r#"
command:
  prefix: "python train.py --epochs=10"
controller: depth
params:
  - name: depth
    values: [2, 3]
    default: 2
    on: false
  - name: dropout
    values: [0.25, 0.5]
    depends_on: depth
  - name: use_bn
    values: [true, false]
  - name: act
    values: [relu, tanh]
    default: relu
    on: false
overlay:
  - name: nkerns
    rows:
      - when: 2
        value: [6, 12]
      - when: 3
        value: [5, 10, 18]
"#;

fn parse(yaml: &str) -> SweepFile {
    parse_sweep(yaml, Path::new("sweep.yaml")).unwrap()
}

#[test]
fn test_parse_full_sweep() {
    let sweep = parse(SWEEP_YAML);
    assert_eq!(sweep.command.prefix, "python train.py --epochs=10");
    assert_eq!(sweep.command.tag_flag, "img_prefix");
    assert_eq!(sweep.controller.as_deref(), Some("depth"));
    assert_eq!(sweep.params.len(), 4);
    assert_eq!(sweep.overlay.len(), 1);

    let depth = sweep.params.get("depth").unwrap();
    assert!(!depth.enabled);
    assert_eq!(depth.default, Some(ParamValue::Int(2)));
    assert_eq!(sweep.params.get("dropout").unwrap().depends_on.as_deref(), Some("depth"));
}

#[test]
fn test_parsed_sweep_samples() {
    let sweep = parse(SWEEP_YAML);
    let sampler = sweep.sampler().unwrap().with_seed(1);
    // dropout 2 ** 2, use_bn 2
    assert_eq!(sampler.total().unwrap(), 8);

    let samples = sampler.sample(None).unwrap();
    assert_eq!(samples.len(), 8);
    let nkerns = ResolvedValue::Tuple(vec![ParamValue::Int(6), ParamValue::Int(12)]);
    for config in &samples {
        assert_eq!(config.get("nkerns"), Some(&nkerns));
        assert_eq!(config.get("act"), Some(&ResolvedValue::Scalar(ParamValue::from("relu"))));
    }
}

#[test]
fn test_missing_default_surfaces_on_build() {
    let sweep = parse("params:\n  - name: lr\n    values: [0.1]\n    on: false\n");
    assert!(matches!(sweep.sampler(), Err(SweepError::MissingDefault { .. })));
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_sweep("params: [name: x", Path::new("broken.yaml")).unwrap_err();
    assert!(matches!(err, SweepError::ConfigParsing { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn test_unknown_field_type_is_rejected() {
    let result = parse_sweep("params:\n  - name: x\n    values: 3\n", Path::new("s.yaml"));
    assert!(matches!(result, Err(SweepError::ConfigParsing { .. })));
}

#[test]
fn test_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SWEEP_YAML.as_bytes()).unwrap();
    let sweep = load_sweep(file.path()).unwrap();
    assert_eq!(sweep, parse(SWEEP_YAML));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_sweep(dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, SweepError::ConfigNotFound { .. }));
}

#[test]
fn test_load_or_builtin() {
    assert_eq!(load_or_builtin(None).unwrap(), builtin_sweep());
}

#[test]
fn test_builtin_round_trips_through_yaml() {
    let yaml = serde_yaml::to_string(&builtin_sweep()).unwrap();
    assert_eq!(parse(&yaml), builtin_sweep());
}

#[test]
fn test_builtin_space() {
    let sweep = builtin_sweep();
    let sampler = sweep.sampler().unwrap().with_seed(42);
    // l2_regs: 3 candidates over conv_layer_n + 2 = 4 slots
    assert_eq!(sampler.total().unwrap(), 81);

    let samples = sampler.sample(Some(5)).unwrap();
    for config in &samples {
        let names: Vec<_> = config.names().collect();
        assert_eq!(
            names,
            vec![
                "conv_layer_n",
                "fold",
                "dr",
                "batch_size",
                "ebd_dm",
                "l2_regs",
                "ks",
                "nkerns",
                "filter_widths"
            ]
        );
        assert_eq!(
            config.get("ks"),
            Some(&ResolvedValue::Tuple(vec![ParamValue::Int(20), ParamValue::Int(5)]))
        );
    }
}
