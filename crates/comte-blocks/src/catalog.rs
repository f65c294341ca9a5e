//! Version-pinned block catalog, loaded once from the atlas builder's
//! JSON manifest and read-only afterwards.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::legacy;
use crate::migrate::Migrations;
use crate::statemap::StateMap;
use crate::types::{Nid, RenderLayer, Stateval, AIR};

#[derive(Debug, Deserialize)]
pub struct BlockManifest {
    pub blocks: Vec<ManifestBlock>,
    pub world_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct ManifestBlock {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub states: Vec<Vec<String>>,
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub templates: Vec<ManifestModel>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestModel {
    pub layer: u8,
    #[serde(default)]
    pub tmpl: Vec<u32>,
}

/// One palette entry as read from a chunk: the namespaced block name
/// plus its `attr=value` property strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub props: Vec<String>,
}

pub struct Catalog {
    world_version: u32,
    name_to_nid: HashMap<String, Nid>,
    nid_to_name: Vec<String>,
    nid_to_display: Vec<String>,
    nid_to_smap: Vec<StateMap>,
    solid: Vec<u64>,
    tmpl: Vec<Vec<Vec<u32>>>,
    layer: Vec<Vec<RenderLayer>>,
    blockstate_to_nid: Vec<Nid>,
    blockstate_to_nstate: Vec<Stateval>,
    migrations: Migrations,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let buf = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_manifest_bytes(&buf)
    }

    pub fn from_manifest_bytes(buf: &[u8]) -> Result<Catalog, CatalogError> {
        let meta: BlockManifest = serde_json::from_slice(buf)?;
        Self::from_manifest(meta)
    }

    pub fn from_manifest(meta: BlockManifest) -> Result<Catalog, CatalogError> {
        let mut cat = Catalog {
            world_version: meta.world_version,
            name_to_nid: HashMap::with_capacity(meta.blocks.len()),
            nid_to_name: vec![String::new()],
            nid_to_display: vec![String::new()],
            nid_to_smap: vec![StateMap::default()],
            solid: Vec::new(),
            tmpl: vec![Vec::new()],
            layer: vec![Vec::new()],
            blockstate_to_nid: vec![AIR; 4096],
            blockstate_to_nstate: vec![0; 4096],
            migrations: Migrations::prepare(meta.world_version),
        };

        let mut count: Nid = 1;
        for b in &meta.blocks {
            let n = if matches!(b.name.as_str(), "air" | "cave_air" | "void_air") {
                AIR
            } else {
                let n = count;
                count += 1;
                n
            };
            cat.name_to_nid.insert(format!("minecraft:{}", b.name), n);
            let smap = StateMap::build(&b.states)
                .map_err(|detail| CatalogError::Invalid {
                    detail: format!("{}: {detail}", b.name),
                })?;
            if (n as usize) >= cat.nid_to_name.len() {
                cat.nid_to_name.push(b.name.clone());
                cat.nid_to_display.push(b.display_name.clone());
                cat.nid_to_smap.push(smap);
            } else {
                cat.nid_to_name[n as usize] = b.name.clone();
                cat.nid_to_display[n as usize] = b.display_name.clone();
            }
            if n > 0 {
                if (n >> 6) as usize >= cat.solid.len() {
                    cat.solid.push(0);
                }
                if b.solid {
                    cat.solid[(n >> 6) as usize] |= 1 << (n & 63);
                }
                let mut tmpls = Vec::with_capacity(b.templates.len());
                let mut layers = Vec::with_capacity(b.templates.len());
                for m in &b.templates {
                    tmpls.push(m.tmpl.clone());
                    layers.push(RenderLayer::from_index(m.layer).ok_or_else(|| {
                        CatalogError::Invalid {
                            detail: format!("{}: render layer {} out of range", b.name, m.layer),
                        }
                    })?);
                }
                cat.tmpl.push(tmpls);
                cat.layer.push(layers);
            }
        }

        for &(blockstate, name, props) in legacy::TABLE {
            let key = format!("minecraft:{name}");
            let Some(&nid) = cat.name_to_nid.get(&key) else {
                log::warn!("legacy blockstate {blockstate:#05x}: {key} not in manifest");
                continue;
            };
            cat.blockstate_to_nid[blockstate as usize] = nid;
            cat.blockstate_to_nstate[blockstate as usize] = if props.is_empty() {
                0
            } else {
                cat.nid_to_smap[nid as usize].get(props)
            };
        }

        Ok(cat)
    }

    #[inline]
    pub fn world_version(&self) -> u32 {
        self.world_version
    }

    /// Solidity drives both occlusion and passability. Air is never
    /// solid.
    #[inline]
    pub fn is_solid(&self, nid: Nid) -> bool {
        self.solid
            .get((nid >> 6) as usize)
            .is_some_and(|w| w & (1 << (nid & 63)) != 0)
    }

    /// Looks up a namespaced name, e.g. `minecraft:stone`.
    pub fn nid(&self, name: &str) -> Option<Nid> {
        self.name_to_nid.get(name).copied()
    }

    pub fn name(&self, nid: Nid) -> &str {
        self.nid_to_name.get(nid as usize).map_or("", String::as_str)
    }

    pub fn display_name(&self, nid: Nid) -> &str {
        self.nid_to_display
            .get(nid as usize)
            .map_or("", String::as_str)
    }

    /// Number of assigned nids, including air.
    pub fn block_count(&self) -> usize {
        self.nid_to_name.len()
    }

    pub fn state_map(&self, nid: Nid) -> &StateMap {
        &self.nid_to_smap[nid as usize]
    }

    /// Template word-pair lists per stateval; empty for air.
    #[inline]
    pub fn templates(&self, nid: Nid) -> &[Vec<u32>] {
        &self.tmpl[nid as usize]
    }

    #[inline]
    pub fn layers(&self, nid: Nid) -> &[RenderLayer] {
        &self.layer[nid as usize]
    }

    /// Maps a combined legacy blockstate (`id<<4 | data`).
    #[inline]
    pub fn legacy(&self, blockstate: u16) -> (Nid, Stateval) {
        (
            self.blockstate_to_nid[blockstate as usize & 0xfff],
            self.blockstate_to_nstate[blockstate as usize & 0xfff],
        )
    }

    /// Rewrites palette names written by world version `vfrom` to this
    /// catalog's version. Properties pass through untouched.
    pub fn migrate(&self, vfrom: u32, palettes: &mut [Vec<PaletteEntry>]) {
        self.migrations.apply(vfrom, self.world_version, palettes);
    }
}
