pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Undo premultiplication of one RGBA8 pixel. Fully transparent pixels become zero.
pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let un = |c: u8| -> u8 {
        let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
        v.min(255) as u8
    };
    [un(px[0]), un(px[1]), un(px[2]), a]
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

pub(crate) fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
