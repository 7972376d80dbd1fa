use super::*;
use crate::frames::locator::FrameLocator;

fn store_with(n: u32, loaded: &[(u32, [u8; 3])]) -> FrameStore {
    let mut s = FrameStore::new(&FrameLocator::default(), n).unwrap();
    for (i, rgb) in loaded {
        s.mark_loaded(FrameIndex(*i), PreparedImage::solid(8, 4, *rgb))
            .unwrap();
    }
    s
}

fn renderer(w: u32, h: u32, policy: IndexPolicy) -> Renderer {
    Renderer::new(
        Some(Surface::new(Viewport::new(w, h)).unwrap()),
        RendererOpts {
            clear_rgba: None,
            index_policy: policy,
        },
    )
}

fn close(px: [u8; 4], want: [u8; 4]) -> bool {
    px.iter().zip(want).all(|(a, b)| a.abs_diff(b) <= 1)
}

#[test]
fn draws_cover_fitted_frame_over_whole_surface() {
    let store = store_with(3, &[(1, [220, 40, 10])]);
    let mut r = renderer(6, 6, IndexPolicy::Strict);

    let out = r.render(&store, FrameIndex(1)).unwrap();
    assert_eq!(
        out,
        RenderOutcome::Drawn {
            requested: FrameIndex(1),
            drawn: FrameIndex(1)
        }
    );
    let s = r.surface().unwrap();
    for (x, y) in [(3, 3), (0, 0), (5, 5), (0, 5), (5, 0)] {
        let px = s.pixel(x, y).unwrap();
        assert!(close(px, [220, 40, 10, 255]), "pixel ({x},{y}) = {px:?}");
    }
}

#[test]
fn rendering_twice_is_pixel_identical() {
    let store = store_with(2, &[(0, [10, 200, 30])]);
    let mut r = renderer(17, 9, IndexPolicy::Strict);
    r.render(&store, FrameIndex(0)).unwrap();
    let first = r.surface().unwrap().data().to_vec();
    r.render(&store, FrameIndex(0)).unwrap();
    assert_eq!(first, r.surface().unwrap().data());
    assert_eq!(r.stats().draws, 2);
}

#[test]
fn unloaded_frame_keeps_previous_pixels() {
    let store = store_with(3, &[(0, [255, 255, 255])]);
    let mut r = renderer(4, 4, IndexPolicy::Strict);
    r.render(&store, FrameIndex(0)).unwrap();
    let before = r.surface().unwrap().data().to_vec();

    let out = r.render(&store, FrameIndex(2)).unwrap();
    assert_eq!(out, RenderOutcome::NotLoaded(FrameIndex(2)));
    assert_eq!(before, r.surface().unwrap().data());
    assert_eq!(r.stats(), RenderStats { draws: 1, skipped: 1 });
}

#[test]
fn failed_frame_draws_nearest_loaded_neighbour() {
    let mut store = store_with(5, &[(1, [0, 0, 255]), (4, [0, 255, 0])]);
    store.mark_failed(FrameIndex(2), "decode error").unwrap();
    let mut r = renderer(4, 4, IndexPolicy::Strict);

    let out = r.render(&store, FrameIndex(2)).unwrap();
    assert_eq!(
        out,
        RenderOutcome::Drawn {
            requested: FrameIndex(2),
            drawn: FrameIndex(1)
        }
    );
    assert!(close(r.surface().unwrap().pixel(2, 2).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn missing_surface_is_a_silent_noop() {
    let store = store_with(1, &[(0, [1, 2, 3])]);
    let mut r = Renderer::new(None, RendererOpts::default());
    assert_eq!(
        r.render(&store, FrameIndex(0)).unwrap(),
        RenderOutcome::NoSurface
    );
    assert_eq!(
        r.resize(&store, Viewport::new(10, 10), FrameIndex(0)).unwrap(),
        RenderOutcome::NoSurface
    );
    assert!(!r.has_surface());
}

#[test]
fn out_of_range_index_strict_fails_and_clamp_draws_last() {
    let store = store_with(3, &[(2, [9, 9, 9])]);

    let mut strict = renderer(2, 2, IndexPolicy::Strict);
    assert!(matches!(
        strict.render(&store, FrameIndex(3)),
        Err(ScrollreelError::IndexOutOfRange { index: 3, len: 3 })
    ));

    let mut clamp = renderer(2, 2, IndexPolicy::Clamp);
    assert_eq!(
        clamp.render(&store, FrameIndex(99)).unwrap(),
        RenderOutcome::Drawn {
            requested: FrameIndex(2),
            drawn: FrameIndex(2)
        }
    );
}

#[test]
fn resize_repaints_at_new_size() {
    let store = store_with(2, &[(1, [100, 50, 25])]);
    let mut r = renderer(4, 4, IndexPolicy::Strict);
    r.render(&store, FrameIndex(1)).unwrap();

    let out = r
        .resize(&store, Viewport::new(10, 3), FrameIndex(1))
        .unwrap();
    assert!(out.is_drawn());
    let s = r.surface().unwrap();
    assert_eq!(s.viewport(), Viewport::new(10, 3));
    assert!(close(s.pixel(9, 2).unwrap(), [100, 50, 25, 255]));
}

#[test]
fn zero_area_resize_skips_drawing() {
    let store = store_with(1, &[(0, [1, 1, 1])]);
    let mut r = renderer(4, 4, IndexPolicy::Strict);
    assert_eq!(
        r.resize(&store, Viewport::new(0, 4), FrameIndex(0)).unwrap(),
        RenderOutcome::EmptySurface
    );
}

#[test]
fn clear_color_shows_through_transparent_frames() {
    let mut store = FrameStore::new(&FrameLocator::default(), 1).unwrap();
    store
        .mark_loaded(
            FrameIndex(0),
            PreparedImage::from_premul(1, 1, vec![0, 0, 0, 0]),
        )
        .unwrap();
    let mut r = Renderer::new(
        Some(Surface::new(Viewport::new(3, 3)).unwrap()),
        RendererOpts {
            clear_rgba: Some([18, 20, 28, 255]),
            index_policy: IndexPolicy::Strict,
        },
    );
    r.render(&store, FrameIndex(0)).unwrap();
    assert!(close(
        r.surface().unwrap().pixel(1, 1).unwrap(),
        [18, 20, 28, 255]
    ));
}

#[test]
fn default_index_policy_is_strict_in_debug() {
    if cfg!(debug_assertions) {
        assert_eq!(IndexPolicy::default(), IndexPolicy::Strict);
    } else {
        assert_eq!(IndexPolicy::default(), IndexPolicy::Clamp);
    }
}

#[test]
fn frame_pixmap_checks_buffer_length() {
    let short = PreparedImage::from_premul(2, 2, vec![0; 12]);
    assert!(frame_pixmap(&short).is_err());
    let empty = PreparedImage::from_premul(0, 3, Vec::new());
    assert!(frame_pixmap(&empty).is_err());
    let translucent = PreparedImage::from_premul(2, 1, vec![10, 0, 0, 128, 0, 0, 0, 255]);
    assert!(frame_pixmap(&translucent).is_ok());
}
