use crate::audio::capture::append_capped;

use std::sync::atomic::{AtomicBool, Ordering};

/// WHAT: A chunk crossing the sample budget is truncated at the bound
/// WHY: The duration cap must hold exactly even mid-callback
#[test]
fn given_chunk_crossing_cap_when_appending_then_truncated_and_flag_raised() {
    // Given: A buffer three samples short of the cap
    let cap_samples = 1024;
    let mut buf = vec![0.0f32; cap_samples - 3];
    let cap_reached = AtomicBool::new(false);

    // When: A larger chunk arrives
    append_capped(&mut buf, &[1.0f32; 48], cap_samples, &cap_reached);

    // Then: Exactly three samples were accepted and the flag is raised
    assert_eq!(buf.len(), cap_samples);
    assert!(cap_reached.load(Ordering::Acquire));
    assert_eq!(buf[cap_samples - 4], 0.0);
    assert_eq!(buf[cap_samples - 3], 1.0);
    assert_eq!(buf[cap_samples - 1], 1.0);
}

/// WHAT: A full buffer accepts nothing more
/// WHY: Callbacks can fire again before the owner polls the flag
#[test]
fn given_full_buffer_when_more_samples_arrive_then_dropped_and_flag_raised() {
    // Given: A buffer already at the cap
    let cap_samples = 256;
    let mut buf = vec![0.0f32; cap_samples];
    let cap_reached = AtomicBool::new(false);

    // When: Another chunk arrives
    append_capped(&mut buf, &[1.0f32; 64], cap_samples, &cap_reached);

    // Then: Nothing appended; the flag is (re-)raised
    assert_eq!(buf.len(), cap_samples);
    assert!(buf.iter().all(|&s| s == 0.0));
    assert!(cap_reached.load(Ordering::Acquire));
}

/// WHAT: A chunk under the remaining budget is appended whole
/// WHY: The flag must stay down until the cap is actually hit
#[test]
fn given_room_in_buffer_when_appending_then_whole_chunk_kept_flag_down() {
    // Given: An empty buffer with plenty of budget
    let cap_samples = 1024;
    let mut buf = Vec::new();
    let cap_reached = AtomicBool::new(false);

    // When: A small chunk arrives
    append_capped(&mut buf, &[0.5f32; 100], cap_samples, &cap_reached);

    // Then: The whole chunk is buffered and the flag stays down
    assert_eq!(buf.len(), 100);
    assert!(!cap_reached.load(Ordering::Acquire));
}

/// WHAT: A chunk landing exactly on the budget raises the flag
/// WHY: The boundary case closes the clip without losing or gaining a sample
#[test]
fn given_chunk_exactly_filling_cap_when_appending_then_flag_raised() {
    // Given: A buffer 64 samples short of the cap
    let cap_samples = 512;
    let mut buf = vec![0.0f32; cap_samples - 64];
    let cap_reached = AtomicBool::new(false);

    // When: A chunk of exactly 64 samples arrives
    append_capped(&mut buf, &[1.0f32; 64], cap_samples, &cap_reached);

    // Then: The buffer sits exactly at the cap and the flag is raised
    assert_eq!(buf.len(), cap_samples);
    assert!(cap_reached.load(Ordering::Acquire));
}
