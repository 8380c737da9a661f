// SPDX-License-Identifier: MPL-2.0
//! Geometry and normalization properties over a grid of sizes.

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use compare_lens::compare::{
    normalize, resolve_contain_rect, triangle_wave, Dimensions, PointerEvent, PointerPhase,
    SliderConfig, SliderStateMachine,
};
use compare_lens::domain::ui::AutoplayDuration;

const SIZES: [f32; 7] = [1.0, 17.0, 240.0, 333.3, 1080.0, 1920.0, 4096.0];

fn size_grid() -> impl Iterator<Item = (Dimensions, Dimensions)> {
    SIZES.iter().flat_map(|&cw| {
        SIZES.iter().flat_map(move |&ch| {
            SIZES.iter().flat_map(move |&nw| {
                SIZES
                    .iter()
                    .map(move |&nh| (Dimensions::new(cw, ch), Dimensions::new(nw, nh)))
            })
        })
    })
}

#[test]
fn contain_rect_stays_inside_container() {
    for (container, natural) in size_grid() {
        let rect = resolve_contain_rect(container, natural).expect("usable sizes resolve");
        let slack = container.width.max(container.height) * 1e-5;

        assert!(rect.left >= 0.0 && rect.top >= 0.0);
        assert!(rect.right() <= container.width + slack, "{rect:?} in {container:?}");
        assert!(rect.bottom() <= container.height + slack, "{rect:?} in {container:?}");
    }
}

#[test]
fn contain_rect_touches_two_edges() {
    for (container, natural) in size_grid() {
        let rect = resolve_contain_rect(container, natural).expect("usable sizes resolve");
        let fills_width = (rect.width - container.width).abs() <= container.width * 1e-5;
        let fills_height = (rect.height - container.height).abs() <= container.height * 1e-5;
        assert!(fills_width || fills_height, "{rect:?} in {container:?}");
    }
}

#[test]
fn contain_rect_preserves_aspect_ratio() {
    for (container, natural) in size_grid() {
        let rect = resolve_contain_rect(container, natural).expect("usable sizes resolve");
        // Clamped rects for extreme ratios can lose aspect at sub-pixel sizes
        if rect.width < 1.0 || rect.height < 1.0 {
            continue;
        }
        assert_relative_eq!(
            rect.width / rect.height,
            natural.aspect_ratio(),
            max_relative = 1e-3
        );
    }
}

#[test]
fn contain_rect_is_centered() {
    for (container, natural) in size_grid() {
        let rect = resolve_contain_rect(container, natural).expect("usable sizes resolve");
        let tolerance = container.width.max(container.height) * 1e-5;
        assert!((rect.left - (container.width - rect.right())).abs() <= tolerance);
        assert!((rect.top - (container.height - rect.bottom())).abs() <= tolerance);
    }
}

#[test]
fn unusable_sizes_never_resolve() {
    let good = Dimensions::new(100.0, 100.0);
    for bad in [
        Dimensions::new(0.0, 100.0),
        Dimensions::new(100.0, 0.0),
        Dimensions::new(-5.0, 100.0),
        Dimensions::new(f32::NAN, 100.0),
        Dimensions::new(f32::INFINITY, 100.0),
    ] {
        assert!(resolve_contain_rect(bad, good).is_none());
        assert!(resolve_contain_rect(good, bad).is_none());
    }
}

#[test]
fn normalized_percent_is_always_in_range() {
    for (container, natural) in size_grid() {
        let rect = resolve_contain_rect(container, natural).expect("usable sizes resolve");
        for client_x in [-1e6, -1.0, 0.0, rect.left, rect.right(), 1e6] {
            let value = normalize(client_x, 0.0, &rect).value();
            assert!((0.0..=100.0).contains(&value));
        }
    }
}

#[test]
fn autoplay_sweep_is_bounded_and_symmetric() {
    let duration = AutoplayDuration::new(750);
    for millis in (0..3000).step_by(25) {
        let rising = triangle_wave(Duration::from_millis(millis), duration).value();
        assert!((0.0..=100.0).contains(&rising));

        let mirror = 1500 - (millis % 1500);
        let falling = triangle_wave(Duration::from_millis(mirror), duration).value();
        assert_relative_eq!(rising, falling, epsilon = 1e-3);
    }
}

#[test]
fn random_walk_never_escapes_range() {
    let now = Instant::now();
    let mut slider = SliderStateMachine::new(SliderConfig::default());
    slider.container_resized(Dimensions::new(640.0, 480.0), 20.0);
    slider.content_loaded(Dimensions::new(1920.0, 1080.0));
    slider.mount(now);

    // Linear congruential walk across and beyond the container
    let mut x: u32 = 12345;
    for step in 0..2000 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
        #[allow(clippy::cast_precision_loss)]
        let client_x = (x % 1200) as f32 - 300.0;
        let phase = match step % 5 {
            0 => PointerPhase::Enter,
            4 => PointerPhase::Leave,
            _ => PointerPhase::Move,
        };
        slider.handle(PointerEvent::mouse(phase, client_x, f64::from(step)), now);
        let value = slider.percent().value();
        assert!((0.0..=100.0).contains(&value));
    }
}
