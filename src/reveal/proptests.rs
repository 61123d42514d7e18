//! Property-based tests for the reveal cursor

use super::*;
use proptest::prelude::*;

fn steps(target: &str, chunk_size: usize) -> Vec<RevealStep> {
    let mut cursor = RevealCursor::new(target, NonZeroUsize::new(chunk_size).unwrap());
    std::iter::from_fn(|| cursor.tick()).collect()
}

proptest! {
    #[test]
    fn prop_lengths_monotonic_and_prefixes(target in "\\PC{0,80}", chunk in 1usize..12) {
        let steps = steps(&target, chunk);
        let mut last_len = 0;
        for step in &steps {
            prop_assert!(target.starts_with(step.text()));
            prop_assert!(step.text().len() >= last_len);
            last_len = step.text().len();
        }
    }

    #[test]
    fn prop_completes_once_with_full_text(target in "\\PC{0,80}", chunk in 1usize..12) {
        let steps = steps(&target, chunk);
        let completions: Vec<_> = steps.iter().filter(|s| s.is_complete()).collect();
        prop_assert_eq!(completions.len(), 1);
        prop_assert_eq!(steps.last(), Some(&RevealStep::Complete(target.clone())));
    }

    #[test]
    fn prop_partial_count_is_ceil(target in "\\PC{0,80}", chunk in 1usize..12) {
        let steps = steps(&target, chunk);
        let partials = steps.iter().filter(|s| !s.is_complete()).count();
        let chars = target.chars().count();
        prop_assert_eq!(partials, chars.div_ceil(chunk));
    }

    #[test]
    fn prop_big_chunk_single_emission(target in "\\PC{1,40}", extra in 0usize..10) {
        let chunk = target.chars().count() + extra;
        let steps = steps(&target, chunk);
        prop_assert_eq!(
            steps,
            vec![
                RevealStep::Partial(target.clone()),
                RevealStep::Complete(target.clone()),
            ]
        );
    }
}
