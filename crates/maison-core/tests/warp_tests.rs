use maison_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Curtain that appears in the page only after `mounted_after` lookups.
struct FakeCurtain {
    lookups: Cell<u32>,
    mounted_after: u32,
    dismissed: Cell<u32>,
}

impl FakeCurtain {
    fn present() -> Rc<Self> {
        Self::after(0)
    }

    fn after(lookups: u32) -> Rc<Self> {
        Rc::new(Self {
            lookups: Cell::new(0),
            mounted_after: lookups,
            dismissed: Cell::new(0),
        })
    }
}

impl Curtain for FakeCurtain {
    fn dismiss(&self) -> bool {
        let n = self.lookups.get();
        self.lookups.set(n + 1);
        if n >= self.mounted_after {
            self.dismissed.set(self.dismissed.get() + 1);
            true
        } else {
            false
        }
    }
}

#[derive(Default)]
struct RecordingNavigator {
    visits: RefCell<Vec<(Duration, String, bool, bool)>>,
    clock: RefCell<Option<Rc<ManualScheduler>>>,
    signal: RefCell<Option<WarpSignal>>,
}

impl RecordingNavigator {
    fn new(clock: &Rc<ManualScheduler>, signal: &WarpSignal) -> Rc<Self> {
        let nav = Self::default();
        *nav.clock.borrow_mut() = Some(clock.clone());
        *nav.signal.borrow_mut() = Some(signal.clone());
        Rc::new(nav)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        let now = self.clock.borrow().as_ref().map(|c| c.now()).unwrap_or_default();
        let (zooming, at_warp) = self
            .signal
            .borrow()
            .as_ref()
            .map(|s| (s.is_zooming(), s.start_at_warp()))
            .unwrap_or_default();
        self.visits
            .borrow_mut()
            .push((now, route.to_url(), zooming, at_warp));
    }
}

fn mount(signal: &WarpSignal, curtain: Rc<FakeCurtain>, clock: &Rc<ManualScheduler>) -> PageEntryCoordinator {
    PageEntryCoordinator::mount(signal, curtain, clock.clone(), &EntryTimings::default())
}

#[test]
fn signal_cells_notify_independently() {
    let signal = WarpSignal::default();
    let zoom_hits = Rc::new(Cell::new(0));
    let z = zoom_hits.clone();
    let _sub = signal.is_zooming.subscribe(move |_| z.set(z.get() + 1));
    signal.set_start_at_warp(true);
    assert_eq!(zoom_hits.get(), 0);
    signal.set_zooming(true);
    signal.set_zooming(true);
    assert_eq!(zoom_hits.get(), 1);
    let other_view = signal.clone();
    other_view.set_zooming(false);
    assert_eq!(zoom_hits.get(), 2);
    assert!(!signal.is_zooming());
}

#[test]
fn coordinator_without_entry_flag_forces_rest() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    // stale fast state from a previous page
    signal.set_zooming(true);
    let entry = mount(&signal, FakeCurtain::present(), &clock);
    assert!(!signal.is_zooming());
    assert_eq!(signal.phase(), WarpPhase::Settle);
    clock.advance(ms(200));
    assert!(entry.is_settled());
    assert_eq!(signal.phase(), WarpPhase::Resting);
}

#[test]
fn coordinator_with_entry_flag_holds_warp_then_decelerates() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::new(true);
    let entry = mount(&signal, FakeCurtain::present(), &clock);
    assert!(signal.is_zooming());
    assert!(signal.start_at_warp());
    clock.advance(ms(199));
    assert!(signal.is_zooming());
    clock.advance(ms(1));
    assert!(!signal.is_zooming());
    assert!(!signal.start_at_warp());
    assert!(entry.is_settled());
}

#[test]
fn unmount_before_deceleration_leaves_signal_alone() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::new(true);
    let entry = mount(&signal, FakeCurtain::present(), &clock);
    clock.advance(ms(50));
    entry.unmount();
    clock.advance(ms(1000));
    assert!(signal.is_zooming());
    assert!(signal.start_at_warp());
}

#[test]
fn remount_does_not_see_older_page_timer() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::new(true);
    let first = mount(&signal, FakeCurtain::present(), &clock);
    clock.advance(ms(150));
    drop(first);
    signal.set_start_at_warp(true);
    let second = mount(&signal, FakeCurtain::present(), &clock);
    // the first mount would have fired at 200ms
    clock.advance(ms(100));
    assert!(signal.is_zooming());
    assert!(!second.is_settled());
    clock.advance(ms(100));
    assert!(!signal.is_zooming());
    assert!(second.is_settled());
}

#[test]
fn curtain_found_immediately_is_dismissed_once() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let curtain = FakeCurtain::present();
    let entry = mount(&signal, curtain.clone(), &clock);
    clock.run_until_idle();
    assert!(entry.curtain_dismissed());
    assert_eq!(curtain.dismissed.get(), 1);
    assert_eq!(curtain.lookups.get(), 1);
}

#[test]
fn late_curtain_is_caught_by_first_retry() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let curtain = FakeCurtain::after(1);
    let entry = mount(&signal, curtain.clone(), &clock);
    assert!(!entry.curtain_dismissed());
    clock.advance(ms(100));
    assert!(entry.curtain_dismissed());
    clock.advance(ms(1000));
    // the 500ms retry is skipped
    assert_eq!(curtain.lookups.get(), 2);
    assert_eq!(curtain.dismissed.get(), 1);
}

#[test]
fn very_late_curtain_is_caught_by_second_retry() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let curtain = FakeCurtain::after(2);
    let entry = mount(&signal, curtain.clone(), &clock);
    clock.advance(ms(499));
    assert!(!entry.curtain_dismissed());
    clock.advance(ms(1));
    assert!(entry.curtain_dismissed());
}

#[test]
fn missing_curtain_gives_up_after_retries() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let curtain = FakeCurtain::after(u32::MAX);
    let entry = mount(&signal, curtain.clone(), &clock);
    clock.run_until_idle();
    assert!(!entry.curtain_dismissed());
    assert_eq!(curtain.lookups.get(), 3);
    assert!(entry.is_settled());
}

#[test]
fn forward_handoff_zooms_then_navigates_with_entry_flag() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    assert!(handoff.begin(Journey::into_quiz()));
    assert!(signal.is_zooming());
    assert!(!signal.start_at_warp());
    assert_eq!(signal.phase(), WarpPhase::Handoff);
    clock.advance(ms(2499));
    assert!(nav.visits.borrow().is_empty());
    clock.advance(ms(1));
    let visits = nav.visits.borrow();
    assert_eq!(visits.len(), 1);
    let (at, url, zooming, at_warp) = &visits[0];
    assert_eq!(*at, ms(2500));
    assert_eq!(url, "/quiz?entry=true");
    assert!(*zooming);
    // start_at_warp is raised before the navigation call
    assert!(*at_warp);
    // forward journeys leave the flags for the destination
    drop(visits);
    clock.advance(ms(5000));
    assert!(signal.is_zooming());
    assert!(signal.start_at_warp());
}

#[test]
fn forward_handoff_into_fresh_coordinator_settles_within_delay() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    handoff.begin(Journey::into_quiz());
    clock.advance(ms(2500));
    assert_eq!(nav.visits.borrow().len(), 1);

    let entry = mount(&signal, FakeCurtain::present(), &clock);
    assert!(signal.is_zooming());
    clock.advance(ms(200));
    assert!(!signal.is_zooming());
    assert!(!signal.start_at_warp());
    assert!(entry.is_settled());
}

#[test]
fn return_handoff_self_cleans_without_entry_flag() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    assert!(handoff.begin(Journey::back_home()));
    assert!(signal.is_zooming());
    clock.advance(ms(2000));
    {
        let visits = nav.visits.borrow();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].1, "/#discovery-hub");
        assert!(!visits[0].3);
    }
    assert!(signal.is_zooming());
    clock.advance(ms(499));
    assert!(signal.is_zooming());
    clock.advance(ms(1));
    assert!(!signal.is_zooming());
    assert!(!signal.start_at_warp());
    assert_eq!(signal.phase(), WarpPhase::Resting);
}

#[test]
fn handoff_ignores_second_trigger_while_pending() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    assert!(handoff.begin(Journey::into_quiz()));
    clock.advance(ms(1000));
    assert!(!handoff.begin(Journey::into_quiz()));
    clock.run_until_idle();
    assert_eq!(nav.visits.borrow().len(), 1);
    assert!(!handoff.is_pending());
}

#[test]
fn handoff_outlives_the_page_that_started_it() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    handoff.begin(Journey::back_home());
    drop(handoff);
    clock.run_until_idle();
    assert_eq!(nav.visits.borrow().len(), 1);
    assert!(!signal.is_zooming());
}

#[test]
fn cancelled_handoff_never_navigates() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::default();
    let nav = RecordingNavigator::new(&clock, &signal);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    handoff.begin(Journey::into_quiz());
    clock.advance(ms(1000));
    handoff.cancel();
    clock.run_until_idle();
    assert!(nav.visits.borrow().is_empty());
    assert!(!signal.start_at_warp());
}

#[test]
fn timer_scope_cancels_on_drop() {
    let clock = Rc::new(ManualScheduler::new());
    let fired = Rc::new(Cell::new(false));
    {
        let scope = TimerScope::new(clock.clone());
        let f = fired.clone();
        scope.schedule(ms(10), Box::new(move || f.set(true)));
        assert_eq!(scope.pending(), 1);
    }
    clock.run_until_idle();
    assert!(!fired.get());
}

#[test]
fn manual_scheduler_runs_ties_in_order_and_nested_tasks() {
    let clock = Rc::new(ManualScheduler::new());
    let order = Rc::new(RefCell::new(Vec::new()));
    for n in 0..3 {
        let o = order.clone();
        clock.schedule(ms(10), Box::new(move || o.borrow_mut().push(n)));
    }
    let o = order.clone();
    let inner_clock = clock.clone();
    clock.schedule(
        ms(5),
        Box::new(move || {
            let o2 = o.clone();
            inner_clock.schedule(ms(1), Box::new(move || o2.borrow_mut().push(99)));
        }),
    );
    clock.advance(ms(10));
    assert_eq!(*order.borrow(), vec![99, 0, 1, 2]);
    assert_eq!(clock.now(), ms(10));
}

#[test]
fn return_journey_started_during_settle_keeps_the_warp() {
    let clock = Rc::new(ManualScheduler::new());
    let signal = WarpSignal::new(true);
    let nav = RecordingNavigator::new(&clock, &signal);
    let entry = mount(&signal, FakeCurtain::present(), &clock);
    let handoff = NavigationHandoff::new(
        signal.clone(),
        nav.clone(),
        clock.clone(),
        HandoffTimings::default(),
    );
    clock.advance(ms(100));
    assert!(handoff.begin(Journey::back_home()));
    clock.advance(ms(150));
    assert!(entry.is_settled());
    assert_eq!(signal.phase(), WarpPhase::Handoff);
    assert!(signal.is_zooming());

    clock.advance(ms(1850));
    assert_eq!(nav.visits.borrow().len(), 1);
    assert!(signal.is_zooming());
    clock.advance(ms(500));
    assert!(!signal.is_zooming());
    assert!(!signal.start_at_warp());
    assert_eq!(signal.phase(), WarpPhase::Resting);
}

#[test]
fn release_only_succeeds_for_the_current_owner() {
    let signal = WarpSignal::default();
    signal.claim(WarpPhase::Settle);
    signal.claim(WarpPhase::Handoff);
    assert!(!signal.release(WarpPhase::Settle));
    assert_eq!(signal.phase(), WarpPhase::Handoff);
    assert!(signal.release(WarpPhase::Handoff));
    assert_eq!(signal.phase(), WarpPhase::Resting);
}
