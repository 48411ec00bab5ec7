use playerhost::platform::{
    Dimension, LayoutIntent, ManualConnectivity, PlayerSurface, RecordingSurface, Size,
};
use playerhost::{FullScreenListener, PlayerView, ViewConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Recorder {
    enters: AtomicUsize,
    exits: AtomicUsize,
}

impl FullScreenListener for Recorder {
    fn on_enter_full_screen(&self) {
        self.enters.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exit_full_screen(&self) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }
}

fn new_view() -> (PlayerView, RecordingSurface) {
    let surface = RecordingSurface::new(Size::new(1080, 1920));
    let view = PlayerView::new(
        Box::new(surface.clone()),
        Box::new(ManualConnectivity::new(true)),
        ViewConfig::default(),
    );
    (view, surface)
}

#[test]
fn notifications_match_effective_transitions() {
    let (mut view, _) = new_view();
    let rec = Arc::new(Recorder::default());
    view.add_full_screen_listener(rec.clone());

    // enter, enter, exit, enter, exit, exit, exit
    let calls = [true, true, false, true, false, false, false];
    let mut effective = 0;
    for enter in calls {
        let changed = if enter {
            view.enter_full_screen()
        } else {
            view.exit_full_screen()
        };
        if changed {
            effective += 1;
        }
    }

    assert_eq!(effective, 4);
    assert!(!view.is_full_screen());
    assert_eq!(rec.enters.load(Ordering::SeqCst), 2);
    assert_eq!(rec.exits.load(Ordering::SeqCst), 2);
}

#[test]
fn toggle_count_parity_decides_state() {
    let (mut view, _) = new_view();
    for _ in 0..6 {
        view.toggle_full_screen();
    }
    assert!(!view.is_full_screen());
    view.toggle_full_screen();
    assert!(view.is_full_screen());
}

#[test]
fn adding_twice_and_removing_unknown() {
    let (mut view, _) = new_view();
    let rec = Arc::new(Recorder::default());

    let id = view.add_full_screen_listener(rec.clone());
    assert!(id.is_some());
    assert!(view.add_full_screen_listener(rec.clone()).is_none());

    let id = id.unwrap();
    assert!(view.remove_full_screen_listener(id));
    assert!(!view.remove_full_screen_listener(id));

    view.enter_full_screen();
    assert_eq!(rec.enters.load(Ordering::SeqCst), 0);
}

#[test]
fn removing_a_never_added_token_reports_no_change() {
    let (mut view, _) = new_view();
    let (mut other, _) = new_view();
    let foreign = other.add_full_screen_listener(Arc::new(Recorder::default())).unwrap();
    let own = view.add_full_screen_listener(Arc::new(Recorder::default())).unwrap();

    assert_ne!(own, foreign);
    assert!(!view.remove_full_screen_listener(foreign));
    assert!(other.remove_full_screen_listener(foreign));
}

#[test]
fn built_in_controls_follow_without_registration() {
    let (mut view, _) = new_view();
    view.enter_full_screen();
    assert!(view.controls().is_full_screen());
    assert_eq!(view.controls().size(), Size::new(1080, 1920));

    view.exit_full_screen();
    assert!(!view.controls().is_full_screen());
    assert_eq!(view.controls().size(), Size::new(1080, 607));
}

#[test]
fn layout_intents_follow_transitions() {
    let (mut view, surface) = new_view();
    view.enter_full_screen();
    assert_eq!(view.layout(), LayoutIntent::fill());
    assert_eq!(surface.layout(), LayoutIntent::fill());

    view.exit_full_screen();
    assert_eq!(view.layout().width, Dimension::MatchParent);
    assert_eq!(view.layout().height, Dimension::WrapContent);
    assert_eq!(view.surface_layout(), LayoutIntent::fill_width());
}

#[test]
fn layout_pass_resizes_controls_outside_transitions() {
    let (mut view, surface) = new_view();
    surface.set_available(Size::new(1920, 1080));
    view.on_layout();
    assert_eq!(view.controls().size(), Size::new(1920, 1080));
    assert!(!view.is_full_screen());
}
