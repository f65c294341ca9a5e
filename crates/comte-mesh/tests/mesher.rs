use std::fs;
use std::io::Read;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use comte_blocks::{Catalog, Nid, AIR};
use comte_mesh::{artifact, mesh_region};
use comte_region::{ChunkData, NeighborWindow, RegionData};
use comte_vis::{Visibility, VisibilityMode};

const MANIFEST: &str = r#"{
    "world_version": 3700,
    "blocks": [
        {"name": "air", "solid": false, "templates": []},
        {"name": "stone", "solid": true, "templates": [{"layer": 0, "tmpl": [16777216, 63]}]},
        {"name": "water", "solid": false,
         "states": [["level", "0", "1", "2", "3", "4", "5", "6", "7",
                     "8", "9", "10", "11", "12", "13", "14", "15"]],
         "templates": [{"layer": 0, "tmpl": [33554432, 63]}]},
        {"name": "grass_block", "solid": true, "templates": [{"layer": 0, "tmpl": [50331648, 63]}]},
        {"name": "bedrock", "solid": true, "templates": [{"layer": 0, "tmpl": [67108864, 63]}]}
    ]
}"#;

fn catalog() -> Catalog {
    Catalog::from_manifest_bytes(MANIFEST.as_bytes()).unwrap()
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(tag: &str) -> TempDir {
        let dir = std::env::temp_dir().join(format!("comte-mesh-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Ensures the chunk containing (x, z) stores at least `sections`
/// sections, then writes one block.
fn set(region: &mut RegionData, x: usize, y: usize, z: usize, b: Nid) {
    let chunk = region.chunk_mut(x >> 4, z >> 4);
    let need = (y >> 4) + 1;
    while chunk.blocks.len() < need {
        chunk.blocks.push(vec![AIR; 4096]);
        chunk.states.push(vec![0; 4096]);
    }
    let o = (x & 15) + (z & 15) * 16 + (y & 15) * 256;
    chunk.blocks[y >> 4][o] = b;
}

fn records(buf: &[u8]) -> Vec<(u32, u32)> {
    buf.chunks_exact(8)
        .map(|r| {
            (
                u32::from_le_bytes([r[0], r[1], r[2], r[3]]),
                u32::from_le_bytes([r[4], r[5], r[6], r[7]]),
            )
        })
        .collect()
}

fn pos_of(x: usize, y: usize, z: usize) -> u32 {
    (((x & 0xff) as u32) << 16) | (((z & 0xff) as u32) << 8) | y as u32
}

#[test]
fn single_stone_block_wire_format() {
    let cat = catalog();
    let stone = cat.nid("minecraft:stone").unwrap();
    let mut region = RegionData::empty();
    set(&mut region, 256, 64, 256, stone);

    let dir = TempDir::new("single");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, None, &mut window);

    assert_eq!(out.total_len(), 8);
    // (256, 256) is the x>>8 == 1, z>>8 == 1 quadrant
    let recs = records(&out.bufs[3][0]);
    assert_eq!(recs.len(), 1);
    let (word0, word1) = recs[0];
    assert_eq!(word0, (1 << 24) | pos_of(256, 64, 256));
    assert_eq!(word0 & 0x00ff_ffff, 0x0000_0040);
    // all six faces exposed under full sky light
    assert_eq!(word1 & 0x3f, 0b111111);
    assert_eq!((word1 >> 6) & 0xff_ffff, 0xff_ffff);
    assert_eq!(out.block_counts[stone as usize], 1);
}

#[test]
fn neighbor_order_is_the_wire_contract() {
    let cat = catalog();
    let stone = cat.nid("minecraft:stone").unwrap();
    let grass = cat.nid("minecraft:grass_block").unwrap();
    let mut region = RegionData::empty();
    set(&mut region, 256, 64, 256, stone);
    // occluders on the −x and −y sides only
    set(&mut region, 255, 64, 256, grass);
    set(&mut region, 256, 63, 256, stone);

    let dir = TempDir::new("order");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, None, &mut window);

    let center = records(&out.bufs[3][0])
        .into_iter()
        .find(|(w0, _)| w0 & 0x00ff_ffff == pos_of(256, 64, 256))
        .expect("center record");
    // bit order (−x, +x, +z, −z, +y, −y): bits 0 and 5 are sealed
    assert_eq!(center.1 & 0x3f, 0b011110);
}

#[test]
fn water_over_stone_column() {
    let cat = catalog();
    let stone = cat.nid("minecraft:stone").unwrap();
    let water = cat.nid("minecraft:water").unwrap();
    let mut region = RegionData::empty();
    // 3×3 slab: stone at y=4..=5, water on top at y=6
    for z in 4..7 {
        for x in 4..7 {
            set(&mut region, x, 4, z, stone);
            set(&mut region, x, 5, z, stone);
            set(&mut region, x, 6, z, water);
        }
    }

    let dir = TempDir::new("water");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, None, &mut window);
    let recs = records(&out.bufs[0][0]);

    // center water cell: only its upward face survives
    let water_rec = recs
        .iter()
        .find(|(w0, _)| *w0 == (2 << 24) | pos_of(5, 6, 5))
        .expect("water record");
    assert_eq!(water_rec.1 & 0x3f, 0b010000);

    // stone directly under it: only the top face, water does not
    // occlude stone
    let stone_rec = recs
        .iter()
        .find(|(w0, _)| *w0 == (1 << 24) | pos_of(5, 5, 5))
        .expect("stone record");
    assert_eq!(stone_rec.1 & 0x3f, 0b010000);

    // no record anywhere emits a face between two touching water
    // cells: interior waters have exactly one exposed face
    for z in 4..7 {
        for x in 4..7 {
            if let Some((_, w1)) = recs
                .iter()
                .find(|(w0, _)| *w0 == (2 << 24) | pos_of(x, 6, z))
            {
                let horizontal = w1 & 0b001111;
                let expected = {
                    let mut bits = 0u32;
                    if x == 4 {
                        bits |= 1 << 0;
                    }
                    if x == 6 {
                        bits |= 1 << 1;
                    }
                    if z == 6 {
                        bits |= 1 << 2;
                    }
                    if z == 4 {
                        bits |= 1 << 3;
                    }
                    bits
                };
                assert_eq!(horizontal, expected, "water at ({x},6,{z})");
            }
        }
    }
}

#[test]
fn occluded_interior_is_pruned() {
    let cat = catalog();
    let stone = cat.nid("minecraft:stone").unwrap();
    let mut region = RegionData::empty();
    // A hollow shell around a lone interior block, well below the lit
    // threshold. Walls are two blocks thick and aligned to the
    // passability cell grid; a sub-cell wall cannot occlude, since any
    // cell with an open voxel stays passable.
    for z in 96..106 {
        for y in 24..34 {
            for x in 96..106 {
                let interior =
                    (98..104).contains(&x) && (26..32).contains(&y) && (98..104).contains(&z);
                if !interior {
                    set(&mut region, x, y, z, stone);
                }
            }
        }
    }
    let (cx, cy, cz) = (100usize, 28usize, 100usize);
    set(&mut region, cx, cy, cz, stone);

    let vis = Visibility::compute(&region, &cat, VisibilityMode::Octahedral);
    let dir = TempDir::new("prune");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, Some(&vis), &mut window);

    let recs = records(&out.bufs[0][0]);
    assert!(
        !recs
            .iter()
            .any(|(w0, _)| w0 & 0x00ff_ffff == pos_of(cx, cy, cz)),
        "interior block must not be emitted"
    );
    // the shell's outer surface renders
    assert!(recs
        .iter()
        .any(|(w0, _)| w0 & 0x00ff_ffff == pos_of(cx, 33, cz)));
}

#[test]
fn meshing_is_deterministic() {
    let cat = catalog();
    let fake = comte_region::fakes::fake_region(&cat);
    let dir = TempDir::new("idem");
    let mut w1 = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let mut w2 = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let a = mesh_region(&fake, &cat, None, &mut w1);
    let b = mesh_region(&fake, &cat, None, &mut w2);
    assert!(a.total_len() > 0);
    for bin in 0..4 {
        for layer in 0..5 {
            assert_eq!(a.bufs[bin][layer], b.bufs[bin][layer]);
        }
    }
}

#[test]
fn empty_region_artifacts() {
    let cat = catalog();
    let region = RegionData::empty();
    let dir = TempDir::new("empty");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, None, &mut window);
    assert_eq!(out.total_len(), 0);

    let out_dir = dir.0.join("map");
    artifact::write_artifacts(&out_dir, "r.0.0", &out).unwrap();

    let header_json = concat!(
        r#"{"layers":[{"length":0,"name":"CUBE"},{"length":0,"name":"VOXEL"},"#,
        r#"{"length":0,"name":"CROSS"},{"length":0,"name":"CROP"},"#,
        r#"{"length":0,"name":"CUBE_FALLBACK"}]}"#
    );
    let mut expected = Vec::new();
    expected.extend_from_slice(artifact::MAGIC);
    expected.extend_from_slice(&(header_json.len() as u32).to_le_bytes());
    expected.extend_from_slice(header_json.as_bytes());

    for bi in 0..4 {
        let path = out_dir.join(format!("r.0.0.{bi}.cmt"));
        let mut decoded = Vec::new();
        GzDecoder::new(fs::File::open(&path).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, expected, "bin {bi}");
    }
}

#[test]
fn artifact_bodies_follow_the_header() {
    let cat = catalog();
    let stone = cat.nid("minecraft:stone").unwrap();
    let mut region = RegionData::empty();
    set(&mut region, 10, 4, 10, stone);

    let dir = TempDir::new("bodies");
    let mut window = NeighborWindow::new(&dir.0, 0, 0, &cat);
    let out = mesh_region(&region, &cat, None, &mut window);
    let out_dir = dir.0.join("map");
    artifact::write_artifacts(&out_dir, "r.0.0", &out).unwrap();

    let mut decoded = Vec::new();
    GzDecoder::new(fs::File::open(out_dir.join("r.0.0.0.cmt")).unwrap())
        .read_to_end(&mut decoded)
        .unwrap();
    assert_eq!(&decoded[..8], artifact::MAGIC);
    let hlen = u32::from_le_bytes([decoded[8], decoded[9], decoded[10], decoded[11]]) as usize;
    let header: serde_json::Value = serde_json::from_slice(&decoded[12..12 + hlen]).unwrap();
    assert_eq!(header["layers"][0]["name"], "CUBE");
    assert_eq!(header["layers"][0]["length"], 8);
    let body = &decoded[12 + hlen..];
    assert_eq!(body, out.bufs[0][0].as_slice());
}
