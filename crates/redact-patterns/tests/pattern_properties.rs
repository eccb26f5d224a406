use proptest::prelude::*;
use redact_core::TextIndex;
use redact_patterns::{Locale, PatternRecognizer, PatternSet, RecognizerKind};
use std::time::{Duration, Instant};

fn locale() -> impl Strategy<Value = Locale> {
    prop::sample::select(Locale::ALL.to_vec())
}

// ── A recognizer never reports overlapping spans for itself ──────────────

proptest! {
    #[test]
    fn recognizer_spans_do_not_self_overlap(
        text in "[0-9a-z@.+ ()-]{0,200}",
        locale in locale()
    ) {
        let index = TextIndex::new(&text);
        for kind in RecognizerKind::ALL {
            let detections = PatternRecognizer::builtin(kind, locale).recognize(&index);
            for pair in detections.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].start());
            }
        }
    }

    #[test]
    fn spans_stay_inside_text(
        text in "\\PC{0,120}",
        locale in locale()
    ) {
        let len = text.chars().count();
        for d in PatternSet::all(locale).recognize(&text) {
            prop_assert!(d.start() < d.end());
            prop_assert!(d.end() <= len);
        }
    }

    #[test]
    fn luhn_invalid_card_not_detected(
        prefix in "4[0-9]{14}"
    ) {
        // pick the one check digit that fails Luhn
        let valid = (0..10u32)
            .find(|d| redact_patterns::validators::luhn(&format!("{prefix}{d}")))
            .unwrap();
        let invalid = (valid + 1) % 10;
        let text = format!("card {prefix}{invalid} end");
        let detections =
            PatternSet::new(Locale::Us, &[RecognizerKind::CreditCard]).recognize(&text);
        prop_assert!(detections.is_empty());
    }
}

// ── Degenerate input finishes in linear time ─────────────────────────────

#[test]
fn pathological_inputs_finish_quickly() {
    let inputs = [
        "0".repeat(200_000),
        "a@".repeat(100_000),
        "1.".repeat(100_000),
        "+62 8".repeat(50_000),
        format!("https://{}", "a".repeat(200_000)),
        "A".repeat(200_000),
    ];

    for locale in Locale::ALL {
        let set = PatternSet::all(locale);
        for input in &inputs {
            let started = Instant::now();
            let _ = set.recognize(input);
            assert!(
                started.elapsed() < Duration::from_secs(10),
                "recognition took {:?} on {} chars",
                started.elapsed(),
                input.len()
            );
        }
    }
}
