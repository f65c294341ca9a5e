//! Synthetic showroom region: a grass floor plus one cluster per
//! catalog block cycling through every stateval, with a marker row
//! underneath identifying the render layer. Used by integration tests
//! and for eyeballing catalog changes without a real world.

use comte_blocks::{Catalog, Nid, RenderLayer, Stateval, AIR};

use crate::chunk::RegionData;

pub fn fake_region(catalog: &Catalog) -> RegionData {
    let mut data = RegionData::empty();
    let grass = catalog.nid("minecraft:grass_block").unwrap_or(AIR);

    for chunk in &mut data.chunks {
        let mut nb = vec![AIR; 4096];
        for slot in nb.iter_mut().skip(256).take(256) {
            *slot = grass;
        }
        chunk.blocks = vec![nb];
        chunk.states = vec![vec![0; 4096]];
    }

    let mut set = |x: usize, y: usize, z: usize, b: Nid, s: Stateval| {
        let chunk = data.chunk_mut(x >> 4, z >> 4);
        let o = (x & 15) + (z & 15) * 16 + (y & 15) * 256;
        chunk.blocks[y >> 4][o] = b;
        chunk.states[y >> 4][o] = s;
    };

    let layer_marker = |layer: RenderLayer| {
        let name = match layer {
            RenderLayer::Cube => "minecraft:gold_block",
            RenderLayer::Voxel => "minecraft:diamond_block",
            RenderLayer::Cross => "minecraft:emerald_block",
            RenderLayer::Crop => "minecraft:dirt",
            RenderLayer::CubeFallback => "minecraft:iron_block",
        };
        catalog.nid(name).unwrap_or(AIR)
    };

    let mut bx = 32usize;
    let mut bz = 32usize;
    for b in 1..catalog.block_count() as Nid {
        let states = catalog.state_map(b).max() as usize;
        let row = states / 6 + 1;
        if bx + row >= 220 {
            bx = 32;
            bz += 8;
        }
        let marker = catalog
            .layers(b)
            .first()
            .map(|&l| layer_marker(l))
            .unwrap_or(AIR);
        for s in 0..=states {
            set(
                bx + s % row,
                3 + (s % row + s / row) % 2,
                bz + s / row,
                b,
                s as Stateval,
            );
            set(bx + s % row, 1, bz + s / row, marker, 0);
        }
        bx += row + 2;
    }

    data
}
