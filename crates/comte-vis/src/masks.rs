//! Face masks of the two view polyhedra.
//!
//! Octahedral faces are the eight sign octants (±x, ±y, ±z); bit i has
//! −x when `i & 1`, −y when `i & 2`, −z when `i & 4`. A triakis
//! octahedron splits each octant face into three, one leaning toward
//! each axis: face index = octant·3 + lean. A triakis face belongs to
//! the axis masks of its octant's two non-lean axes and to its
//! octant's diagonal mask.

pub const OCT_ALL: u32 = 0xff;

pub const OCT_X_POS: u32 = 0x55;
pub const OCT_X_NEG: u32 = 0xaa;
pub const OCT_Y_POS: u32 = 0x33;
pub const OCT_Y_NEG: u32 = 0xcc;
pub const OCT_Z_POS: u32 = 0x0f;
pub const OCT_Z_NEG: u32 = 0xf0;

/// Axis masks in +x, −x, +y, −y, +z, −z order.
pub const OCT_AXIS: [u32; 6] = [
    OCT_X_POS, OCT_X_NEG, OCT_Y_POS, OCT_Y_NEG, OCT_Z_POS, OCT_Z_NEG,
];

pub const TRI_ALL: u32 = 0x00ff_ffff;

const fn tri_axis(axis: usize, neg: bool) -> u32 {
    let mut m = 0u32;
    let mut o = 0;
    while o < 8 {
        if ((o >> axis) & 1 == 1) == neg {
            let mut lean = 0;
            while lean < 3 {
                if lean != axis {
                    m |= 1 << (o * 3 + lean);
                }
                lean += 1;
            }
        }
        o += 1;
    }
    m
}

const fn tri_diags() -> [u32; 8] {
    let mut d = [0u32; 8];
    let mut o = 0;
    while o < 8 {
        d[o] = 0b111 << (o * 3);
        o += 1;
    }
    d
}

/// Axis masks in +x, −x, +y, −y, +z, −z order.
pub const TRI_AXIS: [u32; 6] = [
    tri_axis(0, false),
    tri_axis(0, true),
    tri_axis(1, false),
    tri_axis(1, true),
    tri_axis(2, false),
    tri_axis(2, true),
];

/// Diagonal (octant) masks; octant bit i set means negative on that
/// axis, matching the octahedral encoding.
pub const TRI_DIAG: [u32; 8] = tri_diags();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octahedral_axis_masks() {
        assert_eq!(OCT_ALL.count_ones(), 8);
        for axis in OCT_AXIS {
            assert_eq!(axis.count_ones(), 4, "axis {axis:#010b} should have 4 faces");
        }
        for pair in [
            (OCT_X_POS, OCT_X_NEG),
            (OCT_Y_POS, OCT_Y_NEG),
            (OCT_Z_POS, OCT_Z_NEG),
        ] {
            assert_eq!(pair.0 | pair.1, OCT_ALL);
            assert_eq!(pair.0 & pair.1, 0);
        }
        for face in 0..8u32 {
            let mask = 1 << face;
            let hits = OCT_AXIS.iter().filter(|a| *a & mask != 0).count();
            assert_eq!(hits, 3, "face {face} is in {hits} axis masks, expected 3");
        }
    }

    #[test]
    fn triakis_axis_and_diagonal_masks() {
        assert_eq!(TRI_ALL.count_ones(), 24);
        for (i, axis) in TRI_AXIS.iter().enumerate() {
            assert_eq!(axis.count_ones(), 8, "axis constant {i} should have 8 faces");
        }
        for (i, diag) in TRI_DIAG.iter().enumerate() {
            assert_eq!(diag.count_ones(), 3, "diag constant {i} should have 3 faces");
        }
        for face in 0..24u32 {
            let mask = 1 << face;
            let in_axes = TRI_AXIS.iter().filter(|a| *a & mask != 0).count();
            let in_diags = TRI_DIAG.iter().filter(|d| *d & mask != 0).count();
            assert_eq!(in_axes, 2, "face {face} is in {in_axes} axis masks, expected 2");
            assert_eq!(in_diags, 1, "face {face} is in {in_diags} diagonal masks");
        }
        let all_axes = TRI_AXIS.iter().fold(0, |a, m| a | m);
        let all_diags = TRI_DIAG.iter().fold(0, |a, m| a | m);
        assert_eq!(all_axes, TRI_ALL);
        assert_eq!(all_diags, TRI_ALL);
        for pair in [(0, 1), (2, 3), (4, 5)] {
            assert_eq!(TRI_AXIS[pair.0] & TRI_AXIS[pair.1], 0);
        }
    }
}
