//! Property tests for question generation and scoring.

use kuniate::{CountryRecord, Outcome, Quiz, QuizError, OPTION_COUNT};
use proptest::prelude::*;
use std::collections::HashSet;

/// Datasets with at least four distinct names, duplicates allowed.
fn dataset() -> impl Strategy<Value = Vec<CountryRecord>> {
    (
        prop::collection::hash_set("[A-Z][a-z]{2,8}", OPTION_COUNT..30),
        prop::collection::vec(any::<prop::sample::Index>(), 0..5),
    )
        .prop_map(|(names, dupes)| {
            let mut names: Vec<String> = names.into_iter().collect();
            names.sort();
            let extra: Vec<String> = dupes.iter().map(|i| i.get(&names).clone()).collect();
            names.extend(extra);
            names.into_iter().map(CountryRecord::new).collect()
        })
}

proptest! {
    #[test]
    fn options_are_four_distinct_with_subject_once(countries in dataset(), seed in any::<u64>()) {
        let mut quiz = Quiz::with_seed(countries, seed).unwrap();
        for _ in 0..10 {
            let subject = quiz.generate_question().name.clone();
            let options = quiz.options();

            prop_assert_eq!(options.len(), OPTION_COUNT);
            prop_assert_eq!(options.iter().collect::<HashSet<_>>().len(), OPTION_COUNT);
            prop_assert_eq!(options.iter().filter(|o| **o == subject).count(), 1);
            prop_assert!(options.iter().all(|o| quiz.countries().iter().any(|c| c.name == *o)));
        }
    }

    #[test]
    fn progress_is_capped_and_non_decreasing(countries in dataset(), seed in any::<u64>(), rounds in 0usize..40) {
        let mut quiz = Quiz::with_seed(countries, seed).unwrap();
        let mut last = 0;
        for _ in 0..rounds {
            quiz.generate_question();
            let progress = quiz.state().progress;
            prop_assert!(progress >= last);
            prop_assert!(progress <= 10);
            last = progress;
        }
    }

    #[test]
    fn counts_match_answers(countries in dataset(), seed in any::<u64>(), picks in prop::collection::vec(0usize..OPTION_COUNT, 1..25)) {
        let mut quiz = Quiz::with_seed(countries, seed).unwrap();
        quiz.generate_question();
        let mut correct = 0;

        for pick in &picks {
            let option = quiz.options()[*pick].clone();
            let is_subject = quiz.subject().unwrap().name == option;
            let answer = quiz.submit_answer(&option).unwrap();

            prop_assert_eq!(answer.outcome == Outcome::Correct, is_subject);
            if is_subject {
                correct += 1;
            }
            prop_assert!(quiz.submit_answer(&option).is_err());
            prop_assert!(quiz.advance(answer.next.token));
        }

        prop_assert_eq!(quiz.state().correct_count, correct);
        prop_assert_eq!(quiz.state().score, correct);
        prop_assert_eq!(quiz.answered() as usize, picks.len());
    }

    #[test]
    fn too_few_names_is_an_error(names in prop::collection::vec("[A-C]", 1..12)) {
        let distinct = names.iter().collect::<HashSet<_>>().len();
        let countries = names.into_iter().map(CountryRecord::new).collect();

        let is_insufficient = matches!(
            Quiz::with_seed(countries, 0),
            Err(QuizError::InsufficientVariety { distinct: d, .. }) if d == distinct
        );
        prop_assert!(is_insufficient);
    }
}
