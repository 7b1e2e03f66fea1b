use datajoin_api_core::{color, Value};
use datajoin_scale_core::{RangeInterpolation, Scale, ScaleConfig, ScaleError, ScaleMode};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn linear_map_and_invert_are_exact_inverses() {
    let s = Scale::linear(&[20.0, 80.0], &[0.0, 120.0]).unwrap();
    assert_eq!(s.map(50.0), Value::Float(60.0));
    assert_eq!(s.invert(60.0).unwrap(), 50.0);

    for i in 0..=60 {
        let x = 20.0 + i as f32;
        let y = s.map_number(x).unwrap();
        approx(s.invert(y).unwrap(), x, 1e-4);
    }
}

#[test]
fn linear_map_over_narrow_domain() {
    // 50 sits three quarters of the way through [20, 60].
    let s = Scale::linear(&[20.0, 60.0], &[0.0, 120.0]).unwrap();
    assert_eq!(s.map_number(50.0).unwrap(), 90.0);
    assert_eq!(s.invert(90.0).unwrap(), 50.0);
}

#[test]
fn clamp_saturates_both_ends() {
    let s = Scale::new(&ScaleConfig::linear(&[0.0, 100.0], &[0.0, 10.0]).with_clamp(true)).unwrap();
    assert_eq!(s.map(150.0), Value::Float(10.0));
    assert_eq!(s.map(-50.0), Value::Float(0.0));
    assert_eq!(s.invert(20.0).unwrap(), 100.0);
}

#[test]
fn unclamped_extrapolates() {
    let s = Scale::linear(&[0.0, 100.0], &[0.0, 10.0]).unwrap();
    assert_eq!(s.map_number(150.0).unwrap(), 15.0);
    assert_eq!(s.map_number(-50.0).unwrap(), -5.0);
}

#[test]
fn decreasing_domain_and_piecewise_segments() {
    let s = Scale::linear(&[100.0, 50.0, 0.0], &[0.0, 10.0, 100.0]).unwrap();
    assert_eq!(s.map_number(75.0).unwrap(), 5.0);
    assert_eq!(s.map_number(25.0).unwrap(), 55.0);
    approx(s.invert(55.0).unwrap(), 25.0, 1e-4);
}

#[test]
fn log_scale_maps_decades_evenly() {
    let s = Scale::log(&[1.0, 1000.0], &[0.0, 300.0], 10.0).unwrap();
    approx(s.map_number(10.0).unwrap(), 100.0, 1e-3);
    approx(s.map_number(100.0).unwrap(), 200.0, 1e-3);
    approx(s.invert(200.0).unwrap(), 100.0, 1e-2);
}

#[test]
fn log_scale_over_negative_domain() {
    let s = Scale::log(&[-1000.0, -1.0], &[0.0, 300.0], 10.0).unwrap();
    approx(s.map_number(-100.0).unwrap(), 100.0, 1e-3);
    approx(s.invert(100.0).unwrap(), -100.0, 1e-2);
}

#[test]
fn color_range_interpolates_per_channel() {
    let s = Scale::new(&ScaleConfig {
        domain: vec![0.0, 1.0],
        range: vec![color("#000000").unwrap(), color("#ff0000").unwrap()],
        ..ScaleConfig::default()
    })
    .unwrap();
    assert_eq!(s.map(0.5), Value::ColorRgba([0.5, 0.0, 0.0, 1.0]));
    assert!(matches!(s.map_number(0.5), Err(ScaleError::NonNumericRange(_))));

    let err = s.invert(0.5).unwrap_err();
    assert!(matches!(err, ScaleError::UnsupportedOperation(_)));
    assert!(!err.is_configuration());

    let linear_light = s.clone().with_interpolation(RangeInterpolation::LinearRgb);
    if let Value::ColorRgba(c) = linear_light.map(0.5) {
        approx(c[0], 0.735_357, 1e-4);
        approx(c[1], 0.0, 1e-6);
    } else {
        panic!("linear-light map should produce a color");
    }

    let hsl = s.clone().with_interpolation(RangeInterpolation::Hsl);
    assert!(matches!(hsl.map(0.25), Value::ColorRgba(_)));
}

#[test]
fn text_range_steps_and_is_not_invertible() {
    let s = Scale::new(&ScaleConfig {
        domain: vec![0.0, 1.0],
        range: vec![Value::text("low"), Value::text("high")],
        ..ScaleConfig::default()
    })
    .unwrap();
    assert_eq!(s.map(0.2), Value::text("low"));
    assert_eq!(s.map(0.8), Value::text("high"));
    assert!(s.invert(0.0).is_err());
}

#[test]
fn non_monotonic_range_is_not_invertible() {
    let s = Scale::linear(&[0.0, 1.0, 2.0], &[0.0, 10.0, 0.0]).unwrap();
    assert_eq!(s.map_number(1.5).unwrap(), 5.0);
    assert!(matches!(s.invert(5.0), Err(ScaleError::UnsupportedOperation(_))));
}

#[test]
fn configuration_errors() {
    assert_eq!(
        Scale::linear(&[0.0], &[0.0]).unwrap_err(),
        ScaleError::TooFewBoundaries(1)
    );
    assert_eq!(
        Scale::linear(&[0.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err(),
        ScaleError::DomainRangeMismatch {
            domain_len: 2,
            range_len: 3
        }
    );
    assert!(matches!(
        Scale::linear(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]),
        Err(ScaleError::NonMonotonicDomain(_))
    ));
    assert!(matches!(
        Scale::linear(&[0.0, f32::INFINITY], &[0.0, 1.0]),
        Err(ScaleError::NonFiniteDomain(_))
    ));
    assert!(matches!(
        Scale::log(&[-1.0, 10.0], &[0.0, 1.0], 10.0),
        Err(ScaleError::LogDomainCrossesZero(_))
    ));
    assert!(matches!(
        Scale::log(&[1.0, 10.0], &[0.0, 1.0], 1.0),
        Err(ScaleError::InvalidLogBase(_))
    ));
    for err in [ScaleError::TooFewBoundaries(0), ScaleError::InvalidLogBase(1.0)] {
        assert!(err.is_configuration());
    }
}

#[test]
fn linear_ticks_follow_domain_direction() {
    let s = Scale::linear(&[0.0, 100.0], &[0.0, 1.0]).unwrap();
    assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    let r = Scale::linear(&[100.0, 0.0], &[0.0, 1.0]).unwrap();
    assert_eq!(r.ticks(5), vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
}

#[test]
fn log_ticks_cover_each_decade() {
    let s = Scale::log(&[1.0, 100.0], &[0.0, 1.0], 10.0).unwrap();
    let ticks = s.ticks(10);
    assert_eq!(ticks.len(), 19);
    assert_eq!(ticks.first(), Some(&1.0));
    assert_eq!(ticks.last(), Some(&100.0));
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn nice_log_extends_to_powers() {
    let s = Scale::log(&[3.0, 70.0], &[0.0, 1.0], 10.0).unwrap().nice(None);
    assert_eq!(s.domain(), &[1.0, 100.0]);
    assert_eq!(s.mode(), ScaleMode::Log { base: 10.0 });
}
