use datajoin_api_core::Value;
use datajoin_scale_core::{Scale, ScaleConfig, ScaleMode};
use datajoin_test_fixtures::scales;

fn load(name: &str) -> Scale {
    let cfg: ScaleConfig = scales::load(name).unwrap();
    Scale::new(&cfg).unwrap()
}

#[test]
fn score_linear_roundtrips_and_clamps() {
    let s = load("score-linear");
    assert!(s.is_clamped());
    assert_eq!(s.map(50.0), Value::Float(60.0));
    assert_eq!(s.invert(60.0).unwrap(), 50.0);
    assert_eq!(s.map(100.0), Value::Float(120.0));
}

#[test]
fn population_log_reads_base() {
    let s = load("population-log");
    assert_eq!(s.mode(), ScaleMode::Log { base: 10.0 });
    let y = s.map_number(10.0).unwrap();
    assert!((y - 100.0).abs() < 1e-3, "{y}");
}

#[test]
fn heat_color_passes_through_white() {
    let s = load("heat-color");
    assert_eq!(s.map(50.0), Value::ColorRgba([1.0, 1.0, 1.0, 1.0]));
    assert_eq!(s.map(75.0), Value::ColorRgba([1.0, 0.5, 0.5, 1.0]));
}

#[test]
fn configs_survive_json_roundtrip() {
    for name in scales::keys() {
        let cfg: ScaleConfig = scales::load(&name).unwrap();
        let text = serde_json::to_string(&cfg).unwrap();
        let back: ScaleConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(cfg, back, "{name}");
    }
}
