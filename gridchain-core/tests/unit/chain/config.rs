use super::*;

#[test]
fn notes_document_with_seed() {
    let cfg = ChainConfig::from_json_str(
        r##"{
            "mode": "notes",
            "resolutions": [4, 3],
            "precision": 20,
            "scale": 2.5,
            "seed": { "colors": ["#009fe3", "#ea5e00", "#d32b51", "#b74083"], "cell_size": ["0.5"] }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.note_resolutions().unwrap(), vec![[4], [3]]);
    let opts = cfg.chain_opts();
    assert_eq!(opts.precision.digits(), 20);
    assert_eq!(opts.extent, ExtentPolicy::Carried);
    assert_eq!(cfg.layout_opts().scale, 2.5);

    let seed = cfg.note_seed().unwrap().unwrap();
    assert_eq!(seed.resolution(), [4]);
    assert_eq!(seed.cell_size(), &[ExactCoordinate::parse("0.5").unwrap()]);
}

#[test]
fn pixels_document_defaults() {
    let cfg = ChainConfig::from_json_str(
        r##"{ "mode": "pixels", "resolutions": [[8, 8], [5, 3]], "seed": { "rows": [["#000000", "#ffffff"]] } }"##,
    )
    .unwrap();
    assert_eq!(cfg.pixel_resolutions().unwrap(), vec![[8, 8], [5, 3]]);
    assert_eq!(cfg.chain_opts(), ChainOpts::pixels());
    assert_eq!(cfg.scale, 1.0);
    let seed = cfg.pixel_seed().unwrap().unwrap();
    assert_eq!(seed.resolution(), [2, 1]);
    assert!(cfg.note_resolutions().is_err());
}

#[test]
fn bad_resolutions_report_their_position() {
    for raw in [
        "[4, 0]",
        "[4, -2]",
        "[4, 2.5]",
        "[4, \"x\"]",
        "[4, 4.0000000000000001]",
    ] {
        let cfg =
            ChainConfig::from_json_str(&format!(r#"{{ "mode": "notes", "resolutions": {raw} }}"#))
                .unwrap();
        let err = cfg.note_resolutions().unwrap_err();
        assert!(
            matches!(err, GridError::InvalidResolution { position: 1, .. }),
            "{raw}: {err}"
        );
    }
}

#[test]
fn missing_seed_is_left_to_the_caller() {
    let cfg = ChainConfig::from_json_str(r#"{ "mode": "notes" }"#).unwrap();
    assert!(cfg.note_seed().unwrap().is_none());
    assert!(cfg.note_resolutions().unwrap().is_empty());
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(matches!(
        ChainConfig::from_json_str(r#"{ "mode": "voxels" }"#),
        Err(GridError::Serde(_))
    ));
    assert!(ChainConfig::from_json_str(r#"{ "mode": "notes", "precision": 0 }"#).is_err());
    assert!(ChainConfig::from_json_str(r#"{ "mode": "notes", "colour": 1 }"#).is_err());

    let cfg = ChainConfig::from_json_str(
        r##"{ "mode": "notes", "seed": { "rows": [["#000000"]] } }"##,
    )
    .unwrap();
    assert!(cfg.note_seed().is_err());

    let cfg = ChainConfig::from_json_str(
        r##"{ "mode": "pixels", "seed": { "rows": [["#000000"]], "cell_size": [1] } }"##,
    )
    .unwrap();
    assert!(cfg.pixel_seed().is_err());
}

#[test]
fn from_path_reports_missing_files() {
    let err = ChainConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("here.json"));
}
