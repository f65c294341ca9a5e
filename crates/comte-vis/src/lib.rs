//! Region-scale passability and exterior-visibility estimation.
//!
//! Solidity is downsampled into a bitmap of small cubic cells, then a
//! BFS from the region's open boundary propagates polyhedral view-cone
//! face masks between cells. Each face restricts which directions a
//! ray may continue, so occluders cast shadows while the result stays
//! a sound over-approximation of what an outside camera could see.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use comte_blocks::{Catalog, Nid};
use comte_region::RegionData;

pub mod masks;

use masks::{OCT_ALL, OCT_AXIS, TRI_ALL, TRI_AXIS, TRI_DIAG};

/// Cell side length in blocks; a compile-time power of two.
pub const VIS_CELL: usize = 2;

/// Horizontal cell count per region axis.
pub const VIS_WIDTH: usize = 512 / VIS_CELL;

const QUEUED: u32 = 1 << 31;

/// Solidity seam so the BFS can run against a catalog or a plain
/// closure in tests.
pub trait Solid {
    fn is_solid(&self, nid: Nid) -> bool;
}

impl Solid for Catalog {
    #[inline]
    fn is_solid(&self, nid: Nid) -> bool {
        Catalog::is_solid(self, nid)
    }
}

/// Adapter for closure-based solidity in tests and tools.
pub struct SolidFn<F>(pub F);

impl<F: Fn(Nid) -> bool> Solid for SolidFn<F> {
    #[inline]
    fn is_solid(&self, nid: Nid) -> bool {
        (self.0)(nid)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisibilityMode {
    Octahedral,
    TriakisOctahedral,
}

impl VisibilityMode {
    #[inline]
    fn all_faces(self) -> u32 {
        match self {
            VisibilityMode::Octahedral => OCT_ALL,
            VisibilityMode::TriakisOctahedral => TRI_ALL,
        }
    }

    #[inline]
    fn axis_masks(self) -> &'static [u32; 6] {
        match self {
            VisibilityMode::Octahedral => &OCT_AXIS,
            VisibilityMode::TriakisOctahedral => &TRI_AXIS,
        }
    }

    /// Multiplier for the BFS iteration cap; the triakis state space
    /// is larger so cells re-enter the queue more often.
    #[inline]
    fn iter_factor(self) -> usize {
        match self {
            VisibilityMode::Octahedral => 4,
            VisibilityMode::TriakisOctahedral => 16,
        }
    }
}

/// Decides whether one cell of a section is traversable. For cells of
/// side <= 2 any interior non-solid voxel suffices; larger cells need
/// at least two of the six cell faces to hold a non-solid voxel.
pub fn cell_passable(
    section: &[Nid],
    solid: &impl Solid,
    ox: usize,
    oy: usize,
    oz: usize,
    cell: usize,
) -> bool {
    #[inline]
    fn at(section: &[Nid], x: usize, y: usize, z: usize) -> Nid {
        section[x + z * 16 + y * 256]
    }

    if cell <= 2 {
        for y in oy..oy + cell {
            for z in oz..oz + cell {
                for x in ox..ox + cell {
                    if !solid.is_solid(at(section, x, y, z)) {
                        return true;
                    }
                }
            }
        }
        return false;
    }

    let mut open_faces = 0;
    let last = cell - 1;
    let mut face_open = |fixed: usize, axis: usize| {
        for a in 0..cell {
            for b in 0..cell {
                let (x, y, z) = match axis {
                    0 => (fixed, oy + a, oz + b),
                    1 => (ox + a, fixed, oz + b),
                    _ => (ox + a, oy + b, fixed),
                };
                if !solid.is_solid(at(section, x, y, z)) {
                    return true;
                }
            }
        }
        false
    };
    for (fixed, axis) in [
        (ox, 0),
        (ox + last, 0),
        (oy, 1),
        (oy + last, 1),
        (oz, 2),
        (oz + last, 2),
    ] {
        if face_open(fixed, axis) {
            open_faces += 1;
            if open_faces >= 2 {
                return true;
            }
        }
    }
    false
}

/// Bit-packed per-cell solidity for one region; a set bit is solid.
pub struct Passability {
    height: usize,
    bits: Vec<u64>,
}

impl Passability {
    pub fn build(region: &RegionData, solid: &impl Solid) -> Passability {
        let height = region.max_sections() * 16 / VIS_CELL;
        let mut pass = Passability {
            height,
            bits: vec![0; (VIS_WIDTH * VIS_WIDTH * height).div_ceil(64)],
        };
        let per_axis = 16 / VIS_CELL;
        for cz in 0..32 {
            for cx in 0..32 {
                let chunk = region.chunk(cx, cz);
                for (ys, section) in chunk.blocks.iter().enumerate() {
                    for sy in 0..per_axis {
                        for sz in 0..per_axis {
                            for sx in 0..per_axis {
                                if !cell_passable(
                                    section,
                                    solid,
                                    sx * VIS_CELL,
                                    sy * VIS_CELL,
                                    sz * VIS_CELL,
                                    VIS_CELL,
                                ) {
                                    pass.set_solid(
                                        cx * per_axis + sx,
                                        ys * per_axis + sy,
                                        cz * per_axis + sz,
                                    );
                                }
                            }
                        }
                    }
                }
                // sections missing above a chunk's stored range stay
                // passable, as does every cell of an absent chunk
            }
        }
        pass
    }

    #[inline]
    fn idx(x: usize, y: usize, z: usize) -> usize {
        x + z * VIS_WIDTH + y * VIS_WIDTH * VIS_WIDTH
    }

    #[inline]
    fn set_solid(&mut self, x: usize, y: usize, z: usize) {
        let i = Self::idx(x, y, z);
        self.bits[i >> 6] |= 1 << (i & 63);
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_is_passable(&self, x: usize, y: usize, z: usize) -> bool {
        if y >= self.height {
            return true;
        }
        let i = Self::idx(x, y, z);
        self.bits[i >> 6] & (1 << (i & 63)) == 0
    }
}

/// Reachability of every passability cell: one face-mask word per
/// cell. After convergence a nonzero word means a ray from outside the
/// region may enter this cell, so blocks around it must be emitted.
pub struct Visibility {
    pass: Passability,
    reachable: Vec<u32>,
    mode: VisibilityMode,
}

impl Visibility {
    pub fn compute(region: &RegionData, solid: &impl Solid, mode: VisibilityMode) -> Visibility {
        let pass = Passability::build(region, solid);
        let height = pass.height();
        let mut vis = Visibility {
            reachable: vec![0; VIS_WIDTH * VIS_WIDTH * height],
            pass,
            mode,
        };
        if height == 0 {
            return vis;
        }

        let mut queue: VecDeque<u32> = VecDeque::new();
        let all = mode.all_faces();

        // Seed every boundary cell with the full face mask: the top
        // plane first, then the side walls top-down. The order only
        // shapes how fast the BFS drains.
        for z in 0..VIS_WIDTH {
            for x in 0..VIS_WIDTH {
                vis.update(&mut queue, x, height - 1, z, all);
            }
        }
        for y in (0..height).rev() {
            for a in 0..VIS_WIDTH {
                vis.update(&mut queue, a, y, 0, all);
                vis.update(&mut queue, a, y, VIS_WIDTH - 1, all);
                vis.update(&mut queue, 0, y, a, all);
                vis.update(&mut queue, VIS_WIDTH - 1, y, a, all);
            }
        }

        const STEP: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        // Budget over the region's vertical extent in blocks: a cell
        // re-enters the queue at most once per added face bit, so this
        // bounds any input while a divergence still trips the panic.
        let axis_masks = mode.axis_masks();
        let mut budget = VIS_WIDTH * VIS_WIDTH * height * VIS_CELL * mode.iter_factor();
        while let Some(i) = queue.pop_front() {
            if budget == 0 {
                // converging worlds stay far from this bound
                panic!("visibility BFS exceeded its iteration budget");
            }
            budget -= 1;
            let i = i as usize;
            vis.reachable[i] &= !QUEUED;
            let r = vis.reachable[i];
            let x = i % VIS_WIDTH;
            let z = (i / VIS_WIDTH) % VIS_WIDTH;
            let y = i / (VIS_WIDTH * VIS_WIDTH);

            for (d, &(dx, dy, dz)) in STEP.iter().enumerate() {
                let m = r & axis_masks[d];
                if m == 0 {
                    continue;
                }
                let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
                if !in_bounds(nx, ny, nz, height) {
                    continue;
                }
                vis.update(&mut queue, nx as usize, ny as usize, nz as usize, m);
            }

            if mode == VisibilityMode::TriakisOctahedral {
                for (o, &diag) in TRI_DIAG.iter().enumerate() {
                    let m = r & diag;
                    if m == 0 {
                        continue;
                    }
                    let nx = x as i32 + if o & 1 != 0 { -1 } else { 1 };
                    let ny = y as i32 + if o & 2 != 0 { -1 } else { 1 };
                    let nz = z as i32 + if o & 4 != 0 { -1 } else { 1 };
                    if !in_bounds(nx, ny, nz, height) {
                        continue;
                    }
                    vis.update(&mut queue, nx as usize, ny as usize, nz as usize, m);
                }
            }
        }

        vis
    }

    /// ORs new face bits into a cell and enqueues it when the bits
    /// changed and the cell is passable. Solid cells keep the bits
    /// (they mark visible geometry) but never propagate.
    fn update(&mut self, queue: &mut VecDeque<u32>, x: usize, y: usize, z: usize, mask: u32) {
        let i = Passability::idx(x, y, z);
        let old = self.reachable[i];
        if old | mask == old {
            return;
        }
        self.reachable[i] |= mask;
        if self.pass.cell_is_passable(x, y, z) && self.reachable[i] & QUEUED == 0 {
            self.reachable[i] |= QUEUED;
            queue.push_back(i as u32);
        }
    }

    #[inline]
    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    /// Whether the cell containing block `(x, y, z)` may be seen from
    /// outside the region. Cells above the stored height are exterior.
    #[inline]
    pub fn is_visible(&self, x: usize, y: usize, z: usize) -> bool {
        let (cx, cy, cz) = (x / VIS_CELL, y / VIS_CELL, z / VIS_CELL);
        if cy >= self.pass.height() {
            return true;
        }
        self.reachable[Passability::idx(cx, cy, cz)] & !QUEUED != 0
    }

    #[inline]
    pub fn is_passable(&self, x: usize, y: usize, z: usize) -> bool {
        self.pass
            .cell_is_passable(x / VIS_CELL, y / VIS_CELL, z / VIS_CELL)
    }
}

#[inline]
fn in_bounds(x: i32, y: i32, z: i32, height: usize) -> bool {
    x >= 0
        && z >= 0
        && y >= 0
        && (x as usize) < VIS_WIDTH
        && (z as usize) < VIS_WIDTH
        && (y as usize) < height
}
