// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chain runner: execute an accumulated listener chain in order.
//!
//! The accumulator emits chain entries grouped capture → bubble (or a
//! single direct group), so the runner only has to walk the sequence and
//! honor the stop flag between entries. A stop raised during capture
//! aborts the remaining sequence, which suppresses the bubble phase too.

use canopy_synthetic::SyntheticEvent;

/// Runs the event's accumulated chain to completion or until propagation
/// is stopped.
///
/// `current_target` is set to the owning instance of each entry for the
/// duration of its invocation and cleared afterwards. The chain is
/// consumed; running an event twice requires re-accumulation.
///
/// Listener panics propagate to the caller. The chain has already been
/// taken out of the event by then, so the event itself stays releasable.
pub fn run_chain<K: Copy, N>(event: &mut SyntheticEvent<K, N>) {
    let chain = event.take_chain();
    for entry in chain {
        if event.propagation_stopped() {
            break;
        }
        event.set_current_target(Some(entry.instance));
        (entry.listener)(event);
    }
    event.set_current_target(None);
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use canopy_synthetic::{
        DispatchChain, DispatchConfig, DispatchEntry, EventPool, EventShape, NativeEvent,
        NativeKind, Phase, SyntheticEvent,
    };

    use super::*;

    const CLICK: NativeKind = NativeKind::new("click");

    type Log = Rc<RefCell<Vec<(Phase, u32)>>>;

    fn event_with_chain(
        log: &Log,
        entries: &[(Phase, u32)],
        stop_at: Option<u32>,
    ) -> (EventPool<u32, u32>, SyntheticEvent<u32, u32>) {
        let mut pool = EventPool::new();
        let config = Rc::new(DispatchConfig::phased("click", &[CLICK], true));
        let mut event = pool.acquire(
            config,
            EventShape::Mouse,
            Some(1),
            NativeEvent::new(),
            Some(1),
        );

        let mut chain = DispatchChain::new();
        for &(phase, instance) in entries {
            let log = log.clone();
            chain.push(DispatchEntry {
                listener: Rc::new(move |event: &mut SyntheticEvent<u32, u32>| {
                    log.borrow_mut().push((phase, instance));
                    if stop_at == Some(instance) {
                        event.stop_propagation();
                    }
                }),
                instance,
                phase,
            });
        }
        event.attach_chain(chain);
        (pool, event)
    }

    #[test]
    fn runs_every_entry_in_order() {
        let log: Log = Rc::default();
        let entries = [
            (Phase::Capture, 1),
            (Phase::Capture, 2),
            (Phase::Bubble, 2),
            (Phase::Bubble, 1),
        ];
        let (_pool, mut event) = event_with_chain(&log, &entries, None);

        run_chain(&mut event);
        assert_eq!(*log.borrow(), entries);
        assert_eq!(event.current_target(), None);
        assert_eq!(event.chain_len(), 0);
    }

    #[test]
    fn stop_during_capture_suppresses_bubble() {
        let log: Log = Rc::default();
        let entries = [
            (Phase::Capture, 1),
            (Phase::Capture, 2),
            (Phase::Bubble, 2),
            (Phase::Bubble, 1),
        ];
        let (_pool, mut event) = event_with_chain(&log, &entries, Some(1));

        run_chain(&mut event);
        // The stopping entry finishes; everything after it is skipped.
        assert_eq!(*log.borrow(), [(Phase::Capture, 1)]);
        assert!(event.propagation_stopped());
    }

    #[test]
    fn stop_mid_bubble_skips_remaining_entries() {
        let log: Log = Rc::default();
        let entries = [
            (Phase::Capture, 1),
            (Phase::Bubble, 2),
            (Phase::Bubble, 1),
        ];
        let (_pool, mut event) = event_with_chain(&log, &entries, Some(2));

        run_chain(&mut event);
        assert_eq!(*log.borrow(), [(Phase::Capture, 1), (Phase::Bubble, 2)]);
    }

    #[test]
    fn current_target_tracks_the_invoked_instance() {
        let seen: Rc<RefCell<Vec<Option<u32>>>> = Rc::default();
        let mut pool: EventPool<u32, u32> = EventPool::new();
        let config = Rc::new(DispatchConfig::phased("click", &[CLICK], true));
        let mut event = pool.acquire(
            config,
            EventShape::Mouse,
            Some(7),
            NativeEvent::new(),
            Some(7),
        );

        let mut chain = DispatchChain::new();
        for instance in [7_u32, 8] {
            let seen = seen.clone();
            chain.push(DispatchEntry {
                listener: Rc::new(move |event: &mut SyntheticEvent<u32, u32>| {
                    seen.borrow_mut().push(event.current_target());
                }),
                instance,
                phase: Phase::Bubble,
            });
        }
        event.attach_chain(chain);

        run_chain(&mut event);
        assert_eq!(*seen.borrow(), [Some(7), Some(8)]);
        assert_eq!(event.current_target(), None);
    }
}
