//! Per-voxel face meshing of a decoded region into binned, layered
//! record streams.
#![forbid(unsafe_code)]

use comte_blocks::{Catalog, RenderLayer, AIR};
use comte_region::{NeighborWindow, RegionData};
use comte_vis::Visibility;

pub mod artifact;

/// The region splits into a 2×2 grid of 256×256 quadrants.
pub const NUM_BINS: usize = 4;

/// Reachability pruning only applies below this height; everything
/// above is assumed lit by the sky.
const CAVE_LIT_Y: usize = 64;

/// One region's mesher output: a record stream per quadrant bin and
/// render layer, plus a per-nid census of emitted blocks.
pub struct MeshOutput {
    pub bufs: [[Vec<u8>; RenderLayer::COUNT]; NUM_BINS],
    pub block_counts: Vec<u32>,
}

impl MeshOutput {
    fn new(catalog: &Catalog) -> MeshOutput {
        MeshOutput {
            bufs: std::array::from_fn(|_| std::array::from_fn(|_| Vec::new())),
            block_counts: vec![0; catalog.block_count()],
        }
    }

    /// Total record bytes across every bin and layer.
    pub fn total_len(&self) -> usize {
        self.bufs
            .iter()
            .flat_map(|bin| bin.iter().map(Vec::len))
            .sum()
    }
}

/// Walks every voxel in deterministic (y, z, x) order and emits one
/// 8-byte record per exposed template face. Neighbor lookups go
/// through the window so region borders read the adjacent file.
pub fn mesh_region(
    region: &RegionData,
    catalog: &Catalog,
    vis: Option<&Visibility>,
    window: &mut NeighborWindow,
) -> MeshOutput {
    let mut out = MeshOutput::new(catalog);
    // the record position packs y into 8 bits
    let max_y = (region.max_sections() * 16).min(256);
    let water = catalog.nid("minecraft:water");

    for y in 0..max_y {
        let ys = y >> 4;
        let mut z = 0usize;
        while z < 512 {
            // whole chunk row without this section: skip 16 rows
            if z & 15 == 0
                && (0..32).all(|cx| region.chunk(cx, z >> 4).sections() <= ys)
            {
                z += 16;
                continue;
            }
            let mut x = 0usize;
            while x < 512 {
                let chunk = region.chunk(x >> 4, z >> 4);
                if chunk.sections() <= ys {
                    x = (x & !15) + 16;
                    continue;
                }
                if let Some(vis) = vis {
                    if y < CAVE_LIT_Y && !vis.is_visible(x, y, z) {
                        x += 1;
                        continue;
                    }
                }

                let (b, s, bl, bsl) = chunk.get_local(x, y, z);
                if b == AIR {
                    x += 1;
                    continue;
                }

                // Neighbor order is part of the artifact contract: the
                // shader indexes face-visibility bits positionally.
                let (xi, yi, zi) = (x as i32, y as i32, z as i32);
                let neighbors = [
                    window.sample(region, xi - 1, yi, zi),
                    window.sample(region, xi + 1, yi, zi),
                    window.sample(region, xi, yi, zi + 1),
                    window.sample(region, xi, yi, zi - 1),
                    window.sample(region, xi, yi + 1, zi),
                    window.sample(region, xi, yi - 1, zi),
                ];

                let is_water = water == Some(b);
                let mut side_vis = 0u32;
                let mut side_light = 0u32;
                for (i, &(nb, _, nl, nsl)) in neighbors.iter().enumerate() {
                    let open = if is_water {
                        // water against water or anything solid stays
                        // sealed, so touching water cells share no face
                        nb == AIR || (water != Some(nb) && !catalog.is_solid(nb))
                    } else {
                        !catalog.is_solid(nb)
                    };
                    if open {
                        side_vis |= 1 << i;
                    }
                    let l = nsl.max(nl).max(bl).max(bsl);
                    side_light |= (l as u32) << (4 * i);
                }

                if side_vis != 0 {
                    out.block_counts[b as usize] += 1;

                    let templates = catalog.templates(b);
                    let layers = catalog.layers(b);
                    if templates.is_empty() {
                        x += 1;
                        continue;
                    }
                    let (tmpl, layer) = match (templates.get(s as usize), layers.get(s as usize)) {
                        (Some(t), Some(l)) => (t, *l),
                        // unknown stateval: fall back to the base model
                        _ => (&templates[0], layers[0]),
                    };

                    let pos = (((x & 0xff) as u32) << 16) | (((z & 0xff) as u32) << 8) | y as u32;
                    let bin = &mut out.bufs[(x >> 8) + 2 * (z >> 8)][layer.index()];
                    for pair in tmpl.chunks_exact(2) {
                        let (word0, word1) = (pair[0], pair[1]);
                        if word1 & side_vis == 0 {
                            continue;
                        }
                        bin.extend_from_slice(&(word0 | pos).to_le_bytes());
                        bin.extend_from_slice(
                            &((word1 & !0x3f) | (side_light << 6) | (side_vis & word1))
                                .to_le_bytes(),
                        );
                    }
                }
                x += 1;
            }
            z += 1;
        }
    }

    out
}
