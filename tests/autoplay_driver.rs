// SPDX-License-Identifier: MPL-2.0
use std::time::{Duration, Instant};

use compare_lens::compare::{
    AutoplayDriver, AutoplayTick, Dimensions, Effect, PointerEvent, PointerPhase, SliderConfig,
    SliderStateMachine,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::timeout;

const FAST_TICK: Duration = Duration::from_millis(5);
const WAIT: Duration = Duration::from_secs(2);

async fn next_tick(rx: &mut UnboundedReceiver<AutoplayTick>) -> AutoplayTick {
    timeout(WAIT, rx.recv())
        .await
        .expect("tick should arrive in time")
        .expect("driver should still be sending")
}

fn autoplaying_slider() -> (SliderStateMachine, Effect) {
    let mut slider = SliderStateMachine::new(SliderConfig {
        autoplay: true,
        ..SliderConfig::default()
    });
    slider.container_resized(Dimensions::new(400.0, 400.0), 0.0);
    slider.content_loaded(Dimensions::new(400.0, 400.0));
    let effect = slider.mount(Instant::now());
    (slider, effect)
}

#[tokio::test]
async fn ticks_advance_the_slider() {
    let (tx, mut rx) = unbounded_channel();
    let mut driver = AutoplayDriver::with_interval(tx, FAST_TICK);
    let (mut slider, effect) = autoplaying_slider();

    driver.apply(effect);
    assert!(driver.is_running());

    let mut moved = 0;
    for _ in 0..3 {
        let tick = next_tick(&mut rx).await;
        if slider.tick(tick.ticket, tick.at) {
            moved += 1;
        }
    }
    assert_eq!(moved, 3);
}

#[tokio::test]
async fn stop_effect_cancels_the_timer() {
    let (tx, mut rx) = unbounded_channel();
    let mut driver = AutoplayDriver::with_interval(tx, FAST_TICK);
    let (mut slider, effect) = autoplaying_slider();
    driver.apply(effect);
    next_tick(&mut rx).await;

    let effect = slider.handle(PointerEvent::mouse(PointerPhase::Enter, 10.0, 0.0), Instant::now());
    assert_eq!(effect, Effect::StopAutoplay);
    driver.apply(effect);
    assert!(!driver.is_running());

    // Ticks queued before cancellation carry a stale ticket
    while let Ok(tick) = rx.try_recv() {
        assert!(!slider.tick(tick.ticket, tick.at));
    }
    tokio::time::sleep(FAST_TICK * 4).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn restart_replaces_previous_run() {
    let (tx, mut rx) = unbounded_channel();
    let mut driver = AutoplayDriver::with_interval(tx, FAST_TICK);
    let (mut slider, effect) = autoplaying_slider();
    let Effect::StartAutoplay(first) = effect else {
        panic!("expected autoplay start, got {effect:?}");
    };
    driver.apply(effect);

    let now = Instant::now();
    driver.apply(slider.handle(PointerEvent::mouse(PointerPhase::Enter, 10.0, 0.0), now));
    let effect = slider.handle(PointerEvent::mouse(PointerPhase::Leave, 500.0, 0.0), now);
    let Effect::StartAutoplay(second) = effect else {
        panic!("expected autoplay restart, got {effect:?}");
    };
    driver.apply(effect);

    // Drain until the new run shows up; older ticks must be rejected
    loop {
        let tick = next_tick(&mut rx).await;
        if tick.ticket == second {
            assert!(slider.tick(tick.ticket, tick.at));
            break;
        }
        assert_eq!(tick.ticket, first);
        assert!(!slider.tick(tick.ticket, tick.at));
    }
}

#[tokio::test]
async fn dropping_the_driver_stops_ticks() {
    let (tx, mut rx) = unbounded_channel();
    let (_slider, effect) = autoplaying_slider();
    {
        let mut driver = AutoplayDriver::with_interval(tx, FAST_TICK);
        driver.apply(effect);
        next_tick(&mut rx).await;
    }

    // The aborted task drops its sender, closing the channel
    let closed = timeout(WAIT, async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok());
}

#[tokio::test]
async fn none_effect_leaves_driver_idle() {
    let (tx, _rx) = unbounded_channel();
    let mut driver = AutoplayDriver::new(tx);
    driver.apply(Effect::None);
    assert!(!driver.is_running());
}
