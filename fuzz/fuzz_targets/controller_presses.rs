#![no_main]

use libfuzzer_sys::fuzz_target;
use morsegate::controller::SequenceController;
use morsegate::press::PressEvent;
use morsegate::trigger::RecordingTrigger;
use std::time::Duration;

fuzz_target!(|input: (String, u16, Vec<PressEvent>)| {
    let (sequence, timeout_ms, presses) = input;
    let mut controller = SequenceController::new(
        &sequence,
        Duration::from_millis(u64::from(timeout_ms)),
        RecordingTrigger::new(),
    );

    // Arbitrary (even out-of-order) ticks must never panic or overflow the window
    for press in presses {
        controller.ingest(press);
        assert!(controller.history().len() <= controller.pattern().len());
    }
});
