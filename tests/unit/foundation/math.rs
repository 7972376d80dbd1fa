use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_matches_rounded_product() {
    let mut px = [100u8, 50, 200, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0,
            1,
            2,
            3,
            255
        ]
    );
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(1.0, 0.0, 0.0), 1.0);
    assert_eq!(lerp(1.0, 0.0, 1.0), 0.0);
    assert_eq!(lerp(0.0, -100.0, 0.5), -50.0);
}

#[test]
fn unpremultiply_inverts_opaque_and_keeps_transparent() {
    let mut px = [10u8, 20, 30, 255, 0, 0, 0, 0, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..8], &[10, 20, 30, 255, 0, 0, 0, 0]);
    assert_eq!(&px[8..], &[128, 64, 0, 128]);
}
