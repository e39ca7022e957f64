use blackout_platform_core::{fallback_name, MonitorHandle, MonitorRecord, MonitorRect};
use blackout_selection::{resolve, SelectionError, SelectionRequest};
use proptest::prelude::*;

fn topology(len: usize) -> Vec<MonitorRecord> {
    (0..len)
        .map(|i| {
            let left = i as i32 * 1280;
            MonitorRecord::new(
                i,
                MonitorHandle::from_raw(i as isize + 1),
                MonitorRect::new(left, 0, left + 1280, 1024),
                fallback_name(i),
            )
        })
        .collect()
}

fn is_strictly_ascending(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn valid_indices_select_exactly_their_distinct_set(
        len in 1usize..8,
        picks in prop::collection::vec(1i64..8, 1..12),
    ) {
        let monitors = topology(len);
        let picks: Vec<i64> = picks.into_iter().map(|p| (p - 1) % len as i64 + 1).collect();

        let selection = resolve(&monitors, &SelectionRequest::by_index(picks.clone())).unwrap();
        let indices = selection.stable_indices();

        prop_assert!(is_strictly_ascending(&indices));
        let mut expected: Vec<usize> = picks.iter().map(|p| (*p - 1) as usize).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn any_out_of_range_index_fails_the_whole_request(
        len in 1usize..8,
        good in prop::collection::vec(1i64..=1, 0..4),
        bad_offset in 1i64..100,
    ) {
        let monitors = topology(len);
        let bad = len as i64 + bad_offset;
        let mut indices = good;
        indices.push(bad);

        prop_assert_eq!(
            resolve(&monitors, &SelectionRequest::by_index(indices)),
            Err(SelectionError::IndexOutOfRange { value: bad, max: len })
        );
    }

    #[test]
    fn resolution_is_idempotent_under_repetition(
        len in 1usize..6,
        picks in prop::collection::vec(1i64..6, 1..6),
    ) {
        let monitors = topology(len);
        let picks: Vec<i64> = picks.into_iter().map(|p| (p - 1) % len as i64 + 1).collect();
        let doubled: Vec<i64> = picks.iter().chain(picks.iter()).copied().collect();

        prop_assert_eq!(
            resolve(&monitors, &SelectionRequest::by_index(picks)),
            resolve(&monitors, &SelectionRequest::by_index(doubled))
        );
    }

    #[test]
    fn each_pattern_yields_one_hit_or_one_warning(
        len in 1usize..8,
        patterns in prop::collection::vec("[a-z0-9 ]{0,4}", 1..6),
    ) {
        let monitors = topology(len);
        let selection = resolve(&monitors, &SelectionRequest::by_name(patterns.clone())).unwrap();

        let hits = patterns
            .iter()
            .filter(|p| monitors.iter().any(|m| m.friendly_name().to_lowercase().contains(p.as_str())))
            .count();

        prop_assert_eq!(hits + selection.warnings.len(), patterns.len());
        prop_assert!(selection.monitors.len() <= hits);
        prop_assert!(is_strictly_ascending(&selection.stable_indices()));
    }
}
