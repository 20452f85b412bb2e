use camera_autosize::{Dimensions, FitError, SizeDerivation, derive_size, select_best_ratio};

const CAMERA: &[&str] = &["4:3", "16:9", "1:1"];

#[test]
fn selection_is_always_a_supported_entry() {
    let sets: &[&[&str]] = &[
        &["4:3"],
        &["1:1", "4:3"],
        &["16:9", "4:3", "1:1", "3:2", "20:9"],
        &["3:4", "9:16"],
    ];
    let targets = [
        (1.0, 1.0),
        (320.0, 240.0),
        (1080.0, 2400.0),
        (5000.0, 10.0),
        (0.5, 0.25),
    ];
    for set in sets {
        for (w, h) in targets {
            let best = select_best_ratio(Some(*set), Some(Dimensions::new(w, h)))
                .unwrap()
                .unwrap();
            assert!(set.contains(&best), "{best} not in {set:?}");
        }
    }
}

#[test]
fn equal_ratios_resolve_to_first_listed() {
    for (w, h) in [(400.0, 300.0), (100.0, 100.0), (1080.0, 1920.0)] {
        let target = Some(Dimensions::new(w, h));
        assert_eq!(
            select_best_ratio(Some(&["4:3", "8:6"][..]), target),
            Ok(Some("4:3"))
        );
        assert_eq!(
            select_best_ratio(Some(&["8:6", "4:3"][..]), target),
            Ok(Some("8:6"))
        );
    }
}

#[test]
fn orientation_does_not_change_selection() {
    let portrait = select_best_ratio(Some(CAMERA), Some(Dimensions::new(300.0, 400.0)));
    let landscape = select_best_ratio(Some(CAMERA), Some(Dimensions::new(400.0, 300.0)));
    assert_eq!(portrait, landscape);
    assert_eq!(portrait, Ok(Some("4:3")));
}

#[test]
fn portrait_ratio_strings_compare_unnormalized() {
    // "3:4" is 0.75, further from 4/3 than "1:1".
    let best = select_best_ratio(Some(&["3:4", "1:1"][..]), Some(Dimensions::new(300.0, 400.0)));
    assert_eq!(best, Ok(Some("1:1")));
}

#[test]
fn absence_propagates() {
    let dims = Some(Dimensions::new(640.0, 480.0));
    assert_eq!(select_best_ratio::<&str>(None, dims), Ok(None));
    assert_eq!(select_best_ratio(Some(CAMERA), None), Ok(None));
}

#[test]
fn selection_does_not_reorder_input() {
    let supported = vec!["1:1".to_string(), "16:9".to_string(), "4:3".to_string()];
    let before = supported.clone();
    let _ = select_best_ratio(Some(&supported[..]), Some(Dimensions::new(1920.0, 1080.0)));
    assert_eq!(supported, before);
}

#[test]
fn derived_height_is_unrounded() {
    let size = derive_size(
        Some(Dimensions::new(100.0, 9999.0)),
        Some("4:3"),
        SizeDerivation::Literal,
    )
    .unwrap()
    .unwrap();
    assert_eq!(size.width, 100.0);
    assert_eq!(size.height, 100.0 * (4.0 / 3.0));
}

#[test]
fn malformed_ratio_yields_error_not_panic() {
    let result = derive_size(
        Some(Dimensions::new(100.0, 100.0)),
        Some("abc"),
        SizeDerivation::Literal,
    );
    assert!(matches!(result, Err(FitError::InvalidRatio { .. })));
}

#[test]
fn tall_phone_container_picks_sixteen_by_nine() {
    let container = Some(Dimensions::new(1080.0, 1920.0));
    let best = select_best_ratio(Some(CAMERA), container).unwrap();
    assert_eq!(best, Some("16:9"));

    let size = derive_size(container, best, SizeDerivation::Literal)
        .unwrap()
        .unwrap();
    assert_eq!(size.width, 1080.0);
    assert!((size.height - 1920.0).abs() < 1e-9);
}
