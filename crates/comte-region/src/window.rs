//! Lazy cache of the adjacent regions touched by border neighbor
//! reads. Each of the four sides loads at most once per region and
//! only the strip of 32 chunks along the shared border; a missing or
//! unreadable neighbor reads as air under full sky light.

use std::path::{Path, PathBuf};

use comte_blocks::{Catalog, Nid, Stateval, AIR};

use crate::chunk::RegionData;
use crate::region::{DecodeScratch, Region};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    XNeg = 0,
    XPos = 1,
    ZNeg = 2,
    ZPos = 3,
}

pub struct NeighborWindow<'a> {
    dir: PathBuf,
    rx: i32,
    rz: i32,
    catalog: &'a Catalog,
    bedrock: Nid,
    sides: [Option<Box<RegionData>>; 4],
    scratch: DecodeScratch,
}

impl<'a> NeighborWindow<'a> {
    pub fn new(dir: &Path, rx: i32, rz: i32, catalog: &'a Catalog) -> NeighborWindow<'a> {
        NeighborWindow {
            dir: dir.to_path_buf(),
            rx,
            rz,
            catalog,
            bedrock: catalog.nid("minecraft:bedrock").unwrap_or(AIR),
            sides: [None, None, None, None],
            scratch: DecodeScratch::new(),
        }
    }

    /// Reads `(nid, stateval, block_light, sky_light)` at region-local
    /// coordinates, reaching into the adjacent region when x or z falls
    /// outside `[0, 512)`. Below-world reads resolve to bedrock so
    /// bottom faces stay sealed.
    pub fn sample(&mut self, base: &RegionData, x: i32, y: i32, z: i32) -> (Nid, Stateval, u8, u8) {
        if y < 0 {
            return (self.bedrock, 0, 0xf, 0);
        }
        if ((x | z) & !511) == 0 {
            return base.get(x as usize, y as usize, z as usize);
        }
        let side = if x < 0 {
            Side::XNeg
        } else if x >= 512 {
            Side::XPos
        } else if z < 0 {
            Side::ZNeg
        } else {
            Side::ZPos
        };
        let adj = self.load(side);
        adj.get((x & 511) as usize, y as usize, (z & 511) as usize)
    }

    fn load(&mut self, side: Side) -> &RegionData {
        let slot = side as usize;
        if self.sides[slot].is_none() {
            let (dx, dz) = match side {
                Side::XNeg => (-1, 0),
                Side::XPos => (1, 0),
                Side::ZNeg => (0, -1),
                Side::ZPos => (0, 1),
            };
            // only the 32 chunks along the shared border
            let wanted: Vec<usize> = match side {
                Side::XNeg => (0..32).map(|i| 31 + i * 32).collect(),
                Side::XPos => (0..32).map(|i| i * 32).collect(),
                Side::ZNeg => (0..32).map(|i| i + 31 * 32).collect(),
                Side::ZPos => (0..32).collect(),
            };
            let path = self
                .dir
                .join(format!("r.{}.{}.mca", self.rx + dx, self.rz + dz));
            let data = Region::open(&path)
                .and_then(|r| r.read_chunks(Some(&wanted), self.catalog, &mut self.scratch))
                .unwrap_or_else(|err| {
                    log::debug!("adjacent region {}: {err}", path.display());
                    RegionData::empty()
                });
            self.sides[slot] = Some(Box::new(data));
        }
        self.sides[slot].as_deref().expect("side cached above")
    }
}
