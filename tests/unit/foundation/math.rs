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
fn unpremultiply_edges() {
    assert_eq!(unpremultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply([64, 0, 128, 128]), [128, 0, 255, 128]);
}

#[test]
fn premultiply_then_unpremultiply_is_close() {
    let mut px = vec![200u8, 100, 50, 180, 7, 8, 9, 0];
    premultiply_in_place(&mut px);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
    unpremultiply_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(px[3], 180);
}
