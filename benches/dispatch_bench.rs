use criterion::{criterion_group, criterion_main, Criterion};
use playerhost::platform::{ManualConnectivity, NetworkEvent, RecordingSurface, Size};
use playerhost::{FullScreenListener, PlayerView, ViewConfig};
use std::sync::Arc;

struct Quiet;

impl FullScreenListener for Quiet {
    fn on_enter_full_screen(&self) {}
    fn on_exit_full_screen(&self) {}
}

fn view(online: bool) -> (PlayerView, RecordingSurface, ManualConnectivity) {
    let surface = RecordingSurface::new(Size::new(1920, 1080));
    let network = ManualConnectivity::new(online);
    let view = PlayerView::new(
        Box::new(surface.clone()),
        Box::new(network.clone()),
        ViewConfig::default(),
    );
    (view, surface, network)
}

fn bench_toggle_full_screen(c: &mut Criterion) {
    let (mut view, surface, _) = view(true);
    for _ in 0..16 {
        view.add_full_screen_listener(Arc::new(Quiet));
    }

    c.bench_function("toggle_full_screen_16_listeners", |b| {
        b.iter(|| {
            view.toggle_full_screen();
            surface.clear();
        })
    });
}

fn bench_resume_on_reconnect(c: &mut Criterion) {
    let (mut view, surface, network) = view(true);
    view.initialize(None, true).expect("initialize");
    surface.emit_state("abc", 42.0, true);
    view.pump().expect("pump");

    c.bench_function("resume_on_reconnect", |b| {
        b.iter(|| {
            network.emit(NetworkEvent::Available);
            view.pump().expect("pump");
            surface.clear();
        })
    });
}

criterion_group!(benches, bench_toggle_full_screen, bench_resume_on_reconnect);
criterion_main!(benches);
