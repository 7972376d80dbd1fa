use super::*;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn wide_surface_crops_vertically() {
    // 1920x1080 frame on a 2560x1080 ultrawide: width drives the scale.
    let fit = CoverFit::compute(1920, 1080, Viewport::new(2560, 1080)).unwrap();
    assert!(approx(fit.scale, 2560.0 / 1920.0));
    assert!(approx(fit.offset.x, 0.0));
    assert!(approx(fit.offset.y, (1080.0 - 1080.0 * fit.scale) / 2.0));
    assert!(fit.offset.y < 0.0);
    assert!(fit.covers(Viewport::new(2560, 1080), EPS));
}

#[test]
fn tall_surface_crops_horizontally() {
    // portrait phone viewport
    let fit = CoverFit::compute(1920, 1080, Viewport::new(390, 844)).unwrap();
    assert!(approx(fit.scale, 844.0 / 1080.0));
    assert!(approx(fit.offset.y, 0.0));
    assert!(approx(fit.offset.x, (390.0 - 1920.0 * fit.scale) / 2.0));
    assert!(fit.covers(Viewport::new(390, 844), EPS));
}

#[test]
fn scale_is_max_of_axis_ratios_and_overflow_is_centered() {
    for (w, h, sw, sh) in [
        (1920u32, 1080u32, 1280u32, 720u32),
        (100, 50, 10, 300),
        (3, 7, 640, 480),
        (640, 480, 641, 479),
        (1, 1, 5, 9),
    ] {
        let vp = Viewport::new(sw, sh);
        let fit = CoverFit::compute(w, h, vp).unwrap();
        let expected = (f64::from(sw) / f64::from(w)).max(f64::from(sh) / f64::from(h));
        assert!(approx(fit.scale, expected), "{w}x{h} on {sw}x{sh}");

        let r = fit.dest_rect();
        // symmetric overflow on both sides of each axis
        assert!(approx(-r.x0, r.x1 - f64::from(sw)));
        assert!(approx(-r.y0, r.y1 - f64::from(sh)));
        assert!(fit.covers(vp, 1e-6));
    }
}

#[test]
fn exact_aspect_has_no_offset() {
    let fit = CoverFit::compute(1920, 1080, Viewport::new(960, 540)).unwrap();
    assert!(approx(fit.scale, 0.5));
    assert!(approx(fit.offset.x, 0.0) && approx(fit.offset.y, 0.0));
}

#[test]
fn affine_maps_image_corners_to_dest_rect() {
    let fit = CoverFit::compute(200, 100, Viewport::new(300, 300)).unwrap();
    let a = fit.to_affine();
    let r = fit.dest_rect();
    let tl = a * kurbo::Point::new(0.0, 0.0);
    let br = a * kurbo::Point::new(200.0, 100.0);
    assert!(approx(tl.x, r.x0) && approx(tl.y, r.y0));
    assert!(approx(br.x, r.x1) && approx(br.y, r.y1));
}

#[test]
fn empty_inputs_yield_none() {
    assert!(CoverFit::compute(0, 10, Viewport::new(10, 10)).is_none());
    assert!(CoverFit::compute(10, 10, Viewport::new(0, 10)).is_none());
}
