use bufcheck_core::{
    check_elements_between, check_elements_equal, int_to_padded_hex, scan, DiagnosticsConfig,
    DisplayWindow, Number,
};
use proptest::prelude::*;

fn buffer_with_index() -> impl Strategy<Value = (Vec<i16>, usize)> {
    prop::collection::vec(any::<i16>(), 1..64).prop_flat_map(|v| {
        let len = v.len();
        (Just(v), 0..len)
    })
}

proptest! {
    #[test]
    fn equal_copies_pass(actual in prop::collection::vec(any::<u32>(), 0..128)) {
        let expected = actual.clone();
        prop_assert!(check_elements_equal(&actual, &expected).is_ok());
    }

    #[test]
    fn single_mismatch_is_found((actual, k) in buffer_with_index()) {
        let mut expected = actual.clone();
        expected[k] = expected[k].wrapping_add(1);
        let report = check_elements_equal(&actual, &expected).unwrap_err();
        let summary = *report.summary().unwrap();
        prop_assert_eq!(summary.first_failure, k);
        prop_assert_eq!(summary.last_failure, k);
        prop_assert_eq!(summary.failure_count, 1);
        let header = format!("indices {} through {}.", k, k);
        prop_assert!(report.message().contains(&header));
    }

    #[test]
    fn window_stays_in_bounds((actual, k) in buffer_with_index()) {
        let failures = scan(&actual, |i, _| i != k);
        let window = DisplayWindow::around(&failures, &DiagnosticsConfig::default()).unwrap();
        prop_assert_eq!(window.start, k.saturating_sub(1));
        prop_assert_eq!(window.end, (k + 2).min(actual.len()));
        prop_assert!(window.start <= k && k < window.end);
    }

    #[test]
    fn between_ignores_bound_order(
        triples in prop::collection::vec(any::<(i32, i32, i32)>(), 1..32)
    ) {
        let actual: Vec<i32> = triples.iter().map(|t| t.0).collect();
        let lo: Vec<i32> = triples.iter().map(|t| t.1).collect();
        let hi: Vec<i32> = triples.iter().map(|t| t.2).collect();
        let (lo2, hi2) = (lo.clone(), hi.clone());

        let forward = check_elements_between(&actual, (move |i| lo[i], move |i| hi[i]));
        let reversed = check_elements_between(&actual, (move |i| hi2[i], move |i| lo2[i]));
        prop_assert_eq!(forward.is_ok(), reversed.is_ok());
        if let (Err(f), Err(r)) = (&forward, &reversed) {
            prop_assert_eq!(f.summary(), r.summary());
        }
    }

    #[test]
    fn between_matches_min_max(
        triples in prop::collection::vec(any::<(i8, i8, i8)>(), 1..32)
    ) {
        let expect_ok = triples
            .iter()
            .all(|&(v, a, b)| a.min(b) <= v && v <= a.max(b));
        let actual: Vec<i8> = triples.iter().map(|t| t.0).collect();
        let bounds = triples.clone();
        let bounds2 = triples.clone();
        let result =
            check_elements_between(&actual, (move |i| bounds[i].1, move |i| bounds2[i].2));
        prop_assert_eq!(result.is_ok(), expect_ok);
    }

    #[test]
    fn hex_round_trips(magnitude in any::<u64>(), width in 1usize..=8, negative in any::<bool>()) {
        let magnitude = if width == 8 {
            magnitude
        } else {
            magnitude & ((1u64 << (8 * width)) - 1)
        };
        let value = if negative {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };
        let s = int_to_padded_hex(Number::Int(value), width);
        let digits = s.strip_prefix('-').unwrap_or(&s);
        prop_assert_eq!(digits.len(), 2 * width);
        prop_assert_eq!(u64::from_str_radix(digits, 16).unwrap(), magnitude);
        prop_assert_eq!(s.starts_with('-'), value < 0);
    }

    #[test]
    fn reports_are_reproducible(
        actual in prop::collection::vec(any::<f32>(), 1..32),
        expected in prop::collection::vec(any::<f32>(), 1..32),
    ) {
        let n = actual.len().min(expected.len());
        let (actual, expected) = (&actual[..n], &expected[..n]);
        match (check_elements_equal(actual, expected), check_elements_equal(actual, expected)) {
            (Ok(()), Ok(())) => {}
            (Err(a), Err(b)) => {
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.to_json(), b.to_json());
            }
            _ => prop_assert!(false, "same inputs gave different outcomes"),
        }
    }
}
