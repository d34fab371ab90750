// Mount/dispose bookkeeping and frame-request tracking.

use jt_core::lifecycle::{FrameSlot, Lifecycle, PageHide, Phase};

#[test]
fn normal_mount_then_dispose() {
    let mut l = Lifecycle::default();
    assert_eq!(l.phase(), Phase::Idle);
    assert!(l.begin_mount());
    assert!(l.is_alive());
    assert!(!l.is_mounted());
    assert!(l.finish_mount());
    assert!(l.is_mounted());
    assert!(l.dispose());
    assert_eq!(l.phase(), Phase::Disposed);
    assert!(!l.is_alive());
}

#[test]
fn dispose_twice_is_harmless() {
    let mut l = Lifecycle::default();
    l.begin_mount();
    l.finish_mount();
    assert!(l.dispose());
    assert!(!l.dispose());
    assert_eq!(l.phase(), Phase::Disposed);
}

#[test]
fn dispose_before_mount_completes_rejects_late_resources() {
    let mut l = Lifecycle::default();
    l.begin_mount();
    assert!(l.dispose());
    assert!(!l.finish_mount());
    assert!(!l.is_mounted());
    assert!(!l.begin_mount());
}

#[test]
fn dispose_without_mount_is_allowed() {
    let mut l = Lifecycle::default();
    assert!(l.dispose());
    assert!(!l.begin_mount());
}

#[test]
fn mount_only_starts_once() {
    let mut l = Lifecycle::default();
    assert!(l.begin_mount());
    assert!(!l.begin_mount());
    assert!(l.finish_mount());
    assert!(!l.finish_mount());
}

#[test]
fn frame_slot_tracks_single_pending_request() {
    let mut s = FrameSlot::default();
    assert!(s.schedule(7));
    assert_eq!(s.pending(), Some(7));
    assert!(s.fire());
    assert_eq!(s.pending(), None);
    assert!(s.schedule(8));
    assert_eq!(s.pending(), Some(8));
}

#[test]
fn stopping_hands_back_pending_handle() {
    let mut s = FrameSlot::default();
    s.schedule(3);
    assert_eq!(s.stop(), Some(3));
    assert_eq!(s.pending(), None);
    assert!(s.is_stopped());
    assert_eq!(s.stop(), None);
}

#[test]
fn stopped_slot_refuses_new_requests_and_skips_callbacks() {
    let mut s = FrameSlot::default();
    s.schedule(1);
    s.stop();
    assert!(!s.schedule(2));
    assert_eq!(s.pending(), None);
    // a callback already queued by the browser must not run the tick
    assert!(!s.fire());
}

#[test]
fn cached_pagehide_keeps_views_alive() {
    assert_eq!(PageHide::from_persisted(true), PageHide::Cached);
    assert!(!PageHide::from_persisted(true).tears_down());
    assert_eq!(PageHide::from_persisted(false), PageHide::Unload);
    assert!(PageHide::from_persisted(false).tears_down());
}

#[test]
fn no_frames_after_dispose() {
    let mut l = Lifecycle::default();
    l.begin_mount();
    l.finish_mount();
    assert!(l.is_mounted());
    l.dispose();
    assert!(!l.is_mounted());
    assert!(!l.dispose());
}
