//! Integration tests for the analysis pipeline on realistic datasets.

use std::f64::consts::PI;

use utterscope::analysis::geometry::{bias_angle, bias_radius};
use utterscope::analysis::{bias, distribution, geometry, length};
use utterscope::prelude::*;

fn support_bot() -> PhraseDataset {
    PhraseDataset::from_intents([
        (
            "reset_password",
            vec![
                "reset password",
                "forgot my password",
                "i cannot remember the password for my account",
                "how do i reset my password",
                "password",
            ],
        ),
        (
            "opening_hours",
            vec![
                "hours",
                "when are you open",
                "what time does the store open on saturday",
            ],
        ),
        (
            "complaint",
            vec![
                "i have been waiting for over two weeks and nobody has answered \
                 a single one of my emails",
                "your delivery driver left my parcel in the rain and now everything \
                 inside is completely ruined",
            ],
        ),
        ("greeting", vec!["hi", "hello", "hey there", "good morning"]),
    ])
    .unwrap()
}

#[test]
fn test_greet_bye_counts() -> Result<()> {
    let dataset = PhraseDataset::from_intents([
        ("greet", vec!["hi", "hello there", "hi"]),
        ("bye", vec!["goodbye now friend"]),
    ])?;

    let result = distribution::analyze(&dataset)?;
    assert_eq!(result.summary.count_of("greet"), Some(3));
    assert_eq!(result.summary.count_of("bye"), Some(1));
    assert_eq!(result.summary.mean, 2.0);
    assert_eq!(result.summary.median, 2.0);
    Ok(())
}

#[test]
fn test_word_count_classification() {
    assert_eq!(length::classify("a b c"), LengthCategory::Keyword);
    assert_eq!(length::classify("a b c d e"), LengthCategory::NaturalLanguage);
    assert_eq!(
        length::classify("a b c d e f g h i j k l m"),
        LengthCategory::Fluff
    );
}

#[test]
fn test_two_keywords_one_sentence_geometry() -> Result<()> {
    let dataset = PhraseDataset::from_intents([("mixed", vec!["a", "b", "c d e f"])])?;
    let biases = bias::aggregate(&dataset)?;
    let mixed = biases["mixed"];

    assert!((mixed.keyword - 2.0 / 3.0).abs() < 1e-9);
    assert!((mixed.natural_language - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(mixed.fluff, 0.0);

    // sqrt((1/3)^2 + 0 + (1/3)^2) * sqrt(6)/2 and 2/3 * 2π/3 + 1/3 * 4π/3
    let expected_radius = (2.0f64 / 9.0).sqrt() * 6.0f64.sqrt() / 2.0;
    let expected_angle = 8.0 * PI / 9.0;

    let points = geometry::polar_embedding(&biases);
    assert_eq!(points.len(), 1);
    assert!((points[0].radius - expected_radius).abs() < 1e-6);
    assert!((points[0].angle - expected_angle).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_keyword_fraction_above_range_fails() {
    let thresholds = ThresholdConfig::new(0.05, 0.25, 0.25, 0.65, 0.25, 0.50);
    let mut biases = BiasMap::new();
    biases.insert("intent".to_string(), BiasVector::new(0.30, 0.40, 0.30));

    let table = geometry::compliance_table(&biases, &thresholds);
    assert!(!table["intent"].keyword);
    assert!(table["intent"].natural_language);
    assert!(table["intent"].fluff);
}

#[test]
fn test_support_bot_report() -> Result<()> {
    let dataset = support_bot();
    let report = analyze(&dataset, &ThresholdConfig::default())?;

    assert_eq!(report.distribution.summary.total, 14);
    assert_eq!(report.distribution.summary.intents, 4);
    assert_eq!(report.distribution.summary.max, 5);
    assert_eq!(report.distribution.summary.ranked()[0].intent, "reset_password");

    for bias in report.biases.values() {
        assert!((bias.total() - 1.0).abs() < 1e-9);
    }

    // A pure fluff intent sits on the rim at 360°.
    let complaint = report
        .polar
        .iter()
        .find(|p| p.intent == "complaint")
        .unwrap();
    assert!((complaint.radius - 1.0).abs() < 1e-9);
    assert!((complaint.angle - 2.0 * PI).abs() < 1e-9);

    let names: Vec<&str> = report.polar.iter().map(|p| p.intent.as_str()).collect();
    assert_eq!(
        names,
        vec!["complaint", "greeting", "opening_hours", "reset_password"]
    );

    assert_eq!(report.compliance.len(), 4);
    assert!(report.failing_intents().contains(&"greeting"));
    Ok(())
}

#[test]
fn test_pipeline_is_deterministic() -> Result<()> {
    let dataset = support_bot();
    let first = analyze(&dataset, &ThresholdConfig::default())?;
    let second = analyze(&dataset, &ThresholdConfig::default())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_radius_extremes() {
    assert!(bias_radius(&BiasVector::balanced()).abs() < 1e-12);
    assert!((bias_radius(&BiasVector::new(0.0, 1.0, 0.0)) - 1.0).abs() < 1e-12);
    assert!((bias_angle(&BiasVector::new(1.0, 0.0, 0.0)) - 2.0 * PI / 3.0).abs() < 1e-12);
}

#[test]
fn test_uniform_counts_keep_one_bin_or_more() -> Result<()> {
    let mut dataset = PhraseDataset::new();
    for intent in ["a", "b", "c"] {
        dataset.extend_intent(intent, ["one", "two", "three", "four", "five"])?;
    }

    let result = distribution::analyze(&dataset)?;
    assert_eq!(result.summary.std_dev, 1.0);
    assert!(result.histogram.bins() >= 1);
    assert!(result.curve.iter().all(|v| v.is_finite()));
    Ok(())
}

#[test]
fn test_errors_surface_instead_of_nan() {
    let empty = PhraseDataset::new();
    assert!(matches!(
        analyze(&empty, &ThresholdConfig::default()),
        Err(UtterscopeError::EmptyDataset(_))
    ));

    let mut dataset = support_bot();
    dataset.extend_intent("unused", Vec::<String>::new()).unwrap();
    match bias::aggregate(&dataset) {
        Err(UtterscopeError::DegenerateIntent { intent }) => assert_eq!(intent, "unused"),
        other => panic!("expected degenerate intent, got {other:?}"),
    }
}
