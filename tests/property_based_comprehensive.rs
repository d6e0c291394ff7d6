//! Comprehensive property-based tests
//!
//! Core properties checked with proptest:
//! 1. Pattern parsing counts exactly the `.`/`-` symbols
//! 2. History stays bounded by the pattern length
//! 3. History iterates oldest to newest
//! 4. Matching needs a full-length window inside the timeout
//! 5. A successful match always empties the history
//! 6. Log parsing never panics

use morsegate::controller::{PressOutcome, SequenceController};
use morsegate::history::EventHistory;
use morsegate::matcher::evaluate;
use morsegate::pattern::Pattern;
use morsegate::press::PressEvent;
use morsegate::trigger::RecordingTrigger;
use proptest::prelude::*;
use std::time::Duration;

/// Presses with non-decreasing ticks built from (gap, is_long) pairs
fn press_stream(max_len: usize) -> impl Strategy<Value = Vec<PressEvent>> {
    prop::collection::vec((0u64..1500, any::<bool>()), 0..max_len).prop_map(|steps| {
        let mut tick = 0;
        steps
            .into_iter()
            .map(|(gap, is_long)| {
                tick += gap;
                PressEvent::new(tick, is_long)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parse_counts_symbols(s in ".*") {
        let expected = s.chars().filter(|c| *c == '.' || *c == '-').count();
        prop_assert_eq!(Pattern::parse(&s).len(), expected);
    }

    #[test]
    fn prop_parse_preserves_symbol_order(s in "[.\\- a-z]{0,40}") {
        let expected: Vec<bool> = s
            .chars()
            .filter_map(|c| match c {
                '-' => Some(true),
                '.' => Some(false),
                _ => None,
            })
            .collect();
        let pattern = Pattern::parse(&s);
        prop_assert_eq!(pattern.as_slice(), expected.as_slice());
    }

    #[test]
    fn prop_display_is_normalized_reparse(s in ".*") {
        let pattern = Pattern::parse(&s);
        prop_assert_eq!(Pattern::parse(&pattern.to_string()), pattern);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_history_bounded_by_pattern(
        sequence in "[.\\-]{1,6}",
        timeout_ms in 0u64..5000,
        presses in press_stream(60),
    ) {
        let mut controller = SequenceController::new(
            &sequence,
            Duration::from_millis(timeout_ms),
            RecordingTrigger::new(),
        );

        for press in presses {
            controller.ingest(press);
            prop_assert!(controller.history().len() <= controller.pattern().len());
        }
    }

    #[test]
    fn prop_trigger_empties_history(
        sequence in "[.\\-]{1,6}",
        timeout_ms in 0u64..5000,
        presses in press_stream(60),
    ) {
        let mut controller = SequenceController::new(
            &sequence,
            Duration::from_millis(timeout_ms),
            RecordingTrigger::new(),
        );

        let mut triggered = 0;
        for press in presses {
            if controller.ingest(press) == PressOutcome::Triggered {
                triggered += 1;
                prop_assert!(controller.history().is_empty());
            }
        }
        prop_assert_eq!(controller.action().count(), triggered);
        prop_assert_eq!(controller.trigger_count(), triggered);
    }

    #[test]
    fn prop_history_is_fifo(presses in press_stream(40)) {
        let mut history = EventHistory::new();
        for press in &presses {
            history.push_back(*press);
        }
        let iterated: Vec<PressEvent> = history.iter().copied().collect();
        prop_assert_eq!(&iterated, &presses);

        for press in &presses {
            prop_assert_eq!(history.pop_front().ok(), Some(*press));
        }
        prop_assert!(history.is_empty());
    }

    #[test]
    fn prop_short_history_never_matches(
        sequence in "[.\\-]{2,8}",
        presses in press_stream(8),
    ) {
        let pattern = Pattern::parse(&sequence);
        let history: EventHistory = presses
            .into_iter()
            .take(pattern.len() - 1)
            .collect();
        prop_assert!(!evaluate(&pattern, &history, Duration::MAX));
    }

    #[test]
    fn prop_exact_presses_match_within_timeout(
        sequence in "[.\\-]{1,8}",
        gaps in prop::collection::vec(0u64..200, 8),
    ) {
        let pattern = Pattern::parse(&sequence);
        let mut tick = 0;
        let history: EventHistory = pattern
            .iter()
            .zip(gaps)
            .map(|(is_long, gap)| {
                tick += gap;
                PressEvent::new(tick, is_long)
            })
            .collect();

        let first = history.first().map(|e| e.timestamp).unwrap_or(0);
        let span = history.last().map(|e| e.timestamp).unwrap_or(0) - first;
        prop_assert!(evaluate(&pattern, &history, Duration::from_millis(span)));
        if span > 0 {
            prop_assert!(!evaluate(&pattern, &history, Duration::from_millis(span - 1)));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_log_parser_never_panics(log in "[0-9a-z .\\-#\n]{0,200}") {
        // Property: any input either parses or yields a line-numbered error
        let _ = morsegate::replay::parse_log(&log);
    }
}
