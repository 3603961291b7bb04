//! Broadcast clock formatting tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sidecast_core::protocol::clock::{format_elapsed, BroadcastClock};

#[test]
fn first_tick_reads_one_second() {
    assert_eq!(BroadcastClock::new().tick(), " 00 : 01 ");
}

#[test]
fn sixty_five_ticks_read_one_oh_five() {
    let mut clock = BroadcastClock::new();
    let mut last = String::new();
    for _ in 0..65 {
        last = clock.tick();
    }
    assert_eq!(last, " 01 : 05 ");
    assert_eq!(clock.elapsed_seconds(), 65);
}

#[test]
fn padding_boundary_at_ten_seconds() {
    let mut clock = BroadcastClock::new();
    for _ in 0..9 {
        clock.tick();
    }
    assert_eq!(clock.tick(), " 00 : 10 ");
}

#[test]
fn minutes_widen_past_two_digits() {
    assert_eq!(format_elapsed(3599), " 59 : 59 ");
    assert_eq!(format_elapsed(3600), " 60 : 00 ");
    assert_eq!(format_elapsed(6000), " 100 : 00 ");
}

#[test]
fn reset_starts_a_fresh_run() {
    let mut clock = BroadcastClock::new();
    clock.tick();
    clock.tick();
    clock.reset();
    assert_eq!(clock.elapsed_seconds(), 0);
    assert_eq!(clock.tick(), " 00 : 01 ");
}
