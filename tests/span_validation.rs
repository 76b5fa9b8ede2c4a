//! Validator and error-surface tests at the crate boundary.

use iob2::{Annotation, Error, Iob2Encoder, LabelVocab, Span, WordTokenizer};

#[test]
fn overlapping_spans_rejected_before_encoding() {
    // {0..5} and {3..8} overlap; the validator must fail before any encode
    // call regardless of the underlying text.
    let text = "abcdefghij";
    let spans = vec![Span::new(0, 5, "x"), Span::new(3, 8, "y")];
    let err = Annotation::validate(text, spans.clone()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // Same failure through the encoder entry point.
    let encoder = Iob2Encoder::new(&["x", "y"]).unwrap();
    let err = encoder
        .encode_text(text, spans, &WordTokenizer::with_specials())
        .unwrap_err();
    assert!(err.to_string().contains("overlap"));
}

#[test]
fn out_of_bounds_span_names_index_zero() {
    let err = Annotation::validate("short", vec![Span::new(0, 100, "x")]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("span 0"), "diagnostic must name span index 0: {msg}");
    assert!(msg.contains("end=100"), "got: {msg}");
}

#[test]
fn violation_index_reflects_input_order() {
    // The second span is the bad one; the diagnostic must say so.
    let err = Annotation::validate(
        "abcdefghij",
        vec![Span::new(0, 3, "x"), Span::new(7, 5, "y")],
    )
    .unwrap_err();
    assert!(err.to_string().contains("span 1"));
}

#[test]
fn vocabulary_size_law() {
    for n in 1..8 {
        let classes: Vec<String> = (0..n).map(|i| format!("class{i}")).collect();
        let vocab = LabelVocab::new(&classes).unwrap();
        assert_eq!(vocab.len(), 2 * n + 1);
        assert_eq!(vocab.label_name(0).as_deref(), Some("O"));
    }
}

#[test]
fn duplicate_classes_are_config_errors() {
    assert!(matches!(
        Iob2Encoder::new(&["actor", "Actor"]).unwrap_err(),
        Error::Config(_)
    ));
    assert!(matches!(
        Iob2Encoder::new(&[] as &[&str]).unwrap_err(),
        Error::Config(_)
    ));
}

#[test]
fn unknown_span_class_is_config_error() {
    let encoder = Iob2Encoder::new(&["actor"]).unwrap();
    let err = encoder
        .encode_text(
            "Matt Damon",
            vec![Span::new(0, 10, "villain")],
            &WordTokenizer::with_specials(),
        )
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("villain"), "got: {msg}");
    assert!(matches!(err, Error::Config(_)));
}
