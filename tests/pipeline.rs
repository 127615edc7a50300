use choroscad::{ErrorKind, ScadBuilder, ScadError, ScadOptions};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;

/// One Polygon (a 4-point ring) and one MultiPolygon with two members.
///
/// ```text
///  feature 0: Polygon       -> points_0
///  feature 1: MultiPolygon  -> points_1, points_2
/// ```
const MIXED: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "STUSPS": "IL", "NAME": "Illinois" },
            "geometry": { "type": "Polygon", "coordinates": [[[-91.0, 37.0], [-87.5, 37.0], [-87.5, 42.5], [-91.0, 37.0]]] }
        },
        {
            "type": "Feature",
            "properties": { "STUSPS": "MI", "NAME": "Michigan" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[-87.0, 45.0], [-83.0, 45.0], [-83.0, 48.0], [-87.0, 45.0]]],
                    [[[-86.0, 41.7], [-82.5, 41.7], [-82.5, 45.0], [-86.0, 41.7]]]
                ]
            }
        }
    ]
}"#;

fn loaded(options: ScadOptions) -> ScadBuilder {
    let mut builder = ScadBuilder::with_options(options);
    builder.read_geojson(MIXED).unwrap();
    assert_eq!(builder.extract_features().unwrap(), 2);
    builder
}

fn heights(code: &str) -> Vec<&str> {
    code.lines()
        .filter_map(|line| line.strip_prefix("linear_extrude(height=")?.strip_suffix(')'))
        .collect()
}

#[test]
fn emits_one_block_per_shape_with_default_height() {
    let builder = loaded(ScadOptions::default());
    let code = builder.to_scad().unwrap();

    let names: Vec<&str> = code.lines()
        .filter_map(|line| line.split_once(" = ").map(|(name, _)| name))
        .collect();
    assert_eq!(names, vec!["points_0", "points_1", "points_2"]);
    assert_eq!(heights(&code), vec!["2", "2", "2"]);
    assert_eq!(code.matches("polygon(points_").count(), 3);
}

#[test]
fn bind_scale_emit_end_to_end() {
    let mut builder = loaded(ScadOptions::default());
    assert_eq!(builder.bind_data("pop", &[10.0, 20.0]).unwrap(), 2);
    assert_eq!(builder.scale_heights((10.0, 20.0), (1.0, 5.0)).unwrap(), (1.0, 5.0));

    let code = builder.to_scad().unwrap();
    assert_eq!(heights(&code), vec!["1", "5", "5"]);
}

#[test]
fn full_pipeline_writes_file() {
    let mut builder = loaded(ScadOptions::default());
    builder.simplify().unwrap();
    builder.transform([-91.0, 37.0], 10.0).unwrap();
    builder.offset(0.05).unwrap();
    let matched = builder.bind_data_by_identifier(
        "pop",
        &[(json!("MI"), 10.0), (json!("IL"), 12.0), (json!("WI"), 5.9)],
        "STUSPS",
    ).unwrap();
    assert_eq!(matched, 2);
    builder.scale_heights((0.0, 16.0), (2.0, 18.0)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("midwest.scad");
    let written = builder.write_scad_file(&path).unwrap();

    let code = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, code.chars().count());
    assert!(code.starts_with("points_0 = [[0.02, 0.02], [35.02, 0.02], [35.02, 55.02], [0.02, 0.02]];\n"));
    assert_eq!(heights(&code), vec!["14", "12", "12"]);
    assert_eq!(code.matches("offset(0.05)\n").count(), 3);
}

#[test]
fn color_preview_is_reproducible_with_seeded_rng() {
    let options = ScadOptions { color_bank: vec!["Red".into(), "Blue".into()], ..ScadOptions::default() };
    let mut builder = loaded(options);
    builder.color_preview();

    let a = builder.to_scad_with_rng(&mut StdRng::seed_from_u64(42)).unwrap();
    let b = builder.to_scad_with_rng(&mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.lines().filter(|line| line.starts_with("color(\"")).count(), 3);
}

#[test]
fn stage_errors_carry_their_kind() {
    let mut builder = ScadBuilder::new();
    let err = builder.read_geojson("not json").unwrap_err();
    assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Parse));

    let err = builder.to_scad().unwrap_err();
    assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::State));

    let mut builder = loaded(ScadOptions::default());
    builder.bind_data("pop", &[1.0, 2.0]).unwrap();
    let err = builder.scale_heights((5.0, 5.0), (1.0, 2.0)).unwrap_err();
    assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Config));

    let dir = tempfile::tempdir().unwrap();
    let err = builder.write_scad_file(&dir.path().join("missing/out.scad")).unwrap_err();
    assert_eq!(ScadError::kind_of(&err), Some(ErrorKind::Io));
}

#[test]
fn geojson_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.geojson");
    std::fs::write(&input, MIXED).unwrap();

    let mut builder = ScadBuilder::new();
    builder.read_geojson_file(&input).unwrap();
    builder.extract_features().unwrap();
    builder.bind_data("pop", &[1.0]).unwrap();

    let output = dir.path().join("out.geojson");
    builder.write_geojson_file(&output).unwrap();

    let mut reread = ScadBuilder::new();
    reread.read_geojson_file(&output).unwrap();
    reread.extract_features().unwrap();
    assert_eq!(reread.features(), builder.features());
}
