//! Region file decoding: header parse, sequential chunk inflation, and
//! NBT collection into [`ChunkData`].

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::{Decompress, FlushDecompress, Status};

use comte_blocks::{Catalog, PaletteEntry, AIR};
use comte_nbt::{walk, Value};

use crate::bits;
use crate::chunk::{ChunkData, RegionData};
use crate::error::RegionError;

/// Extracts `(rx, rz)` from an `r.<x>.<z>.mca` file name.
pub fn parse_region_name(name: &str) -> Option<(i32, i32)> {
    let mut parts = name.split('.');
    if parts.next()? != "r" {
        return None;
    }
    let rx = parts.next()?.parse().ok()?;
    let rz = parts.next()?.parse().ok()?;
    Some((rx, rz))
}

/// Worker-local reusable decode state: one zlib inflater and the two
/// buffers that survive across chunks of the same region.
pub struct DecodeScratch {
    inflater: Decompress,
    chunk_buf: Vec<u8>,
    nbt_buf: Vec<u8>,
}

impl Default for DecodeScratch {
    fn default() -> Self {
        DecodeScratch {
            inflater: Decompress::new(true),
            chunk_buf: Vec::new(),
            nbt_buf: Vec::with_capacity(4 << 20),
        }
    }
}

impl DecodeScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct Region {
    path: PathBuf,
    rx: i32,
    rz: i32,
    offsets: Vec<u32>,
    timestamps: Vec<u32>,
}

#[inline]
fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

impl Region {
    /// Opens a region file and reads its locator and timestamp tables.
    /// A file name not matching `r.<x>.<z>.mca` is processed at
    /// coordinates (0, 0) with a warning.
    pub fn open(path: &Path) -> Result<Region, RegionError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let (rx, rz) = match parse_region_name(name) {
            Some(c) => c,
            None => {
                log::warn!("{name}: file name does not match r.<x>.<z>.mca, assuming (0, 0)");
                (0, 0)
            }
        };

        let mut file = File::open(path).map_err(|source| RegionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut header = vec![0u8; 8192];
        file.read_exact(&mut header).map_err(|source| {
            if source.kind() == io::ErrorKind::UnexpectedEof {
                RegionError::MalformedRegion {
                    offset: 0,
                    detail: "truncated header".to_string(),
                }
            } else {
                RegionError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut offsets = vec![0u32; 1024];
        let mut timestamps = vec![0u32; 1024];
        for i in 0..1024 {
            offsets[i] = be_u32(&header[i * 4..]);
            timestamps[i] = be_u32(&header[4096 + i * 4..]);
        }

        Ok(Region {
            path: path.to_path_buf(),
            rx,
            rz,
            offsets,
            timestamps,
        })
    }

    #[inline]
    pub fn rx(&self) -> i32 {
        self.rx
    }

    #[inline]
    pub fn rz(&self) -> i32 {
        self.rz
    }

    #[inline]
    pub fn timestamp(&self, index: usize) -> u32 {
        self.timestamps[index]
    }

    /// Decodes the region's chunks, visiting them in ascending on-disk
    /// offset order for sequential I/O. `wanted` limits decoding to a
    /// subset of chunk indices. Errors in a single chunk are logged and
    /// leave that chunk empty; an unknown palette block is fatal.
    pub fn read_chunks(
        &self,
        wanted: Option<&[usize]>,
        catalog: &Catalog,
        scratch: &mut DecodeScratch,
    ) -> Result<RegionData, RegionError> {
        let mut data = RegionData::empty();

        let max_sectors = self
            .offsets
            .iter()
            .map(|o| (o & 0xff) as usize)
            .max()
            .unwrap_or(0);
        if max_sectors == 0 {
            return Ok(data);
        }

        let mut seq: Vec<usize> = match wanted {
            Some(w) => w.iter().copied().filter(|&i| self.offsets[i] != 0).collect(),
            None => (0..1024).filter(|&i| self.offsets[i] != 0).collect(),
        };
        seq.sort_by_key(|&i| self.offsets[i]);

        let mut file = File::open(&self.path).map_err(|source| RegionError::Io {
            path: self.path.to_path_buf(),
            source,
        })?;
        let io_err = |source| RegionError::Io {
            path: self.path.to_path_buf(),
            source,
        };

        let DecodeScratch {
            inflater,
            chunk_buf,
            nbt_buf,
        } = scratch;
        chunk_buf.resize(4096 * max_sectors, 0);

        for &ci in &seq {
            let loc = self.offsets[ci];
            let padded = 4096 * (loc & 0xff) as usize;
            if padded < 5 {
                log::warn!("{}: chunk {ci} allocated zero sectors", self.path.display());
                continue;
            }
            file.seek(SeekFrom::Start(u64::from(loc >> 8) * 4096))
                .map_err(io_err)?;
            file.read_exact(&mut chunk_buf[..padded]).map_err(io_err)?;

            let head = &chunk_buf[..padded];
            let chunk_len = be_u32(&head[..4]) as usize;
            if chunk_len + 4 > padded || chunk_len < 1 {
                log::warn!(
                    "{}: chunk {ci} length {chunk_len} does not fit {} sectors",
                    self.path.display(),
                    loc & 0xff
                );
                continue;
            }
            if head[4] != 2 {
                log::warn!(
                    "{}: chunk {ci}: unsupported compression type {}",
                    self.path.display(),
                    head[4]
                );
                continue;
            }

            if let Err(detail) = inflate_into(inflater, &head[5..chunk_len + 4], nbt_buf) {
                log::warn!("{}: chunk {ci}: {detail}", self.path.display());
                continue;
            }

            match decode_chunk(nbt_buf, self.rx, self.rz, ci, catalog) {
                Ok(Some(chunk)) => data.chunks[ci] = chunk,
                Ok(None) => {}
                Err(err @ RegionError::UnknownBlock { .. }) => return Err(err),
                Err(err) => log::warn!("{}: chunk {ci}: {err}", self.path.display()),
            }
        }

        Ok(data)
    }
}

/// Inflates one zlib stream into `out`, reusing the inflater.
fn inflate_into(inflater: &mut Decompress, src: &[u8], out: &mut Vec<u8>) -> Result<(), String> {
    inflater.reset(true);
    out.clear();
    let mut pos = 0usize;
    loop {
        if out.len() == out.capacity() {
            out.reserve(64 * 1024);
        }
        let before = inflater.total_in();
        let status = inflater
            .decompress_vec(&src[pos..], out, FlushDecompress::Finish)
            .map_err(|e| e.to_string())?;
        pos += (inflater.total_in() - before) as usize;
        match status {
            Status::StreamEnd => return Ok(()),
            Status::Ok | Status::BufError => {
                if pos >= src.len() && out.len() < out.capacity() {
                    return Err("truncated zlib stream".to_string());
                }
            }
        }
    }
}

/// Everything collected for one section while walking a chunk's NBT.
#[derive(Default)]
struct SectionCollect<'a> {
    y: Option<i8>,
    legacy_blocks: Option<&'a [u8]>,
    legacy_data: Option<&'a [u8]>,
    block_states: Option<&'a [u8]>,
    palette: Vec<PaletteEntry>,
    block_light: Option<Vec<u8>>,
    sky_light: Option<Vec<u8>>,
}

impl SectionCollect<'_> {
    fn has_blocks(&self) -> bool {
        self.legacy_blocks.is_some()
            || self.block_states.is_some_and(|b| !b.is_empty())
            || !self.palette.is_empty()
    }
}

#[derive(Default)]
struct Collected<'a> {
    data_version: u32,
    x_pos: Option<i32>,
    z_pos: Option<i32>,
    proto: bool,
    sections: Vec<SectionCollect<'a>>,
}

fn decode_chunk(
    buf: &[u8],
    rx: i32,
    rz: i32,
    index: usize,
    catalog: &Catalog,
) -> Result<Option<ChunkData>, RegionError> {
    let (cx, cz) = (index & 31, index >> 5);
    let malformed = |detail: String| RegionError::MalformedChunk {
        rx,
        rz,
        cx,
        cz,
        detail,
    };

    let mut col = Collected::default();
    walk(buf, |path, indices, value| {
        collect(&mut col, path, indices, value)
    })?;

    let expect_x = rx * 32 + cx as i32;
    let expect_z = rz * 32 + cz as i32;
    if col.x_pos.is_some_and(|x| x != expect_x) || col.z_pos.is_some_and(|z| z != expect_z) {
        return Err(malformed(format!(
            "misplaced chunk: expected ({expect_x},{expect_z}), got ({:?},{:?})",
            col.x_pos, col.z_pos
        )));
    }
    if col.proto {
        return Ok(None);
    }

    // world-bottom sections are not rendered
    col.sections.retain(|s| s.y.map_or(true, |y| y >= 0));
    while col.sections.last().is_some_and(|s| !s.has_blocks()) {
        col.sections.pop();
    }
    if col
        .sections
        .windows(2)
        .any(|w| w[0].y.unwrap_or(0) > w[1].y.unwrap_or(0))
    {
        return Err(malformed("sections out of order".to_string()));
    }

    // place each stored section at its Y index, synthesizing air for
    // gaps, so `blocks[y >> 4]` addresses the right slice
    let mut sections: Vec<SectionCollect> = Vec::with_capacity(col.sections.len());
    for s in std::mem::take(&mut col.sections) {
        let y = s.y.map_or(sections.len(), |y| y as usize);
        if y >= 64 {
            return Err(malformed(format!("section Y {y} out of range")));
        }
        if y < sections.len() {
            return Err(malformed(format!("duplicate section Y {y}")));
        }
        sections.resize_with(y, SectionCollect::default);
        sections.push(s);
    }
    col.sections = sections;

    let mut chunk = ChunkData::default();
    let legacy_mode = col.sections.iter().any(|s| s.legacy_blocks.is_some());
    if legacy_mode {
        for s in &col.sections {
            if s.legacy_blocks.is_none() && s.legacy_data.is_none() {
                chunk.blocks.push(vec![AIR; 4096]);
                chunk.states.push(vec![0u16; 4096]);
                continue;
            }
            let (Some(blocks), Some(data)) = (s.legacy_blocks, s.legacy_data) else {
                return Err(malformed("legacy Blocks without Data".to_string()));
            };
            if blocks.len() != 4096 || data.len() != 2048 {
                return Err(malformed(format!(
                    "legacy array lengths {}/{}",
                    blocks.len(),
                    data.len()
                )));
            }
            let mut nb = vec![AIR; 4096];
            let mut ns = vec![0u16; 4096];
            for (i, &ob) in blocks.iter().enumerate() {
                let o = (ob as u16) << 4 | ((data[i >> 1] >> ((i & 1) << 2)) & 0xf) as u16;
                let (mut nid, mut state) = catalog.legacy(o);
                if nid == AIR && o & 0xf != 0 {
                    // unknown variant: retry as the base block
                    (nid, state) = catalog.legacy(o & !0xf);
                }
                nb[i] = nid;
                ns[i] = state;
            }
            chunk.blocks.push(nb);
            chunk.states.push(ns);
        }
    } else if col.sections.iter().any(SectionCollect::has_blocks) {
        let mut palettes: Vec<Vec<PaletteEntry>> =
            col.sections.iter().map(|s| s.palette.clone()).collect();
        catalog.migrate(col.data_version, &mut palettes);

        for (s, palette) in col.sections.iter().zip(&palettes) {
            let mut pal_nids = Vec::with_capacity(palette.len());
            let mut pal_states = Vec::with_capacity(palette.len());
            for e in palette {
                let Some(nid) = catalog.nid(&e.name) else {
                    return Err(RegionError::UnknownBlock {
                        name: e.name.clone(),
                    });
                };
                pal_nids.push(nid);
                pal_states.push(catalog.state_map(nid).get_list(&e.props));
            }

            let raw = s.block_states.unwrap_or(&[]);
            if raw.is_empty() {
                // a palette with no index data fills the whole section
                // with its first entry (single-block sections, e.g.
                // solid ocean)
                let (fill_nid, fill_state) = match (pal_nids.first(), pal_states.first()) {
                    (Some(&n), Some(&st)) => (n, st),
                    _ => (AIR, 0),
                };
                chunk.blocks.push(vec![fill_nid; 4096]);
                chunk.states.push(vec![fill_state; 4096]);
            } else {
                let mut vals = bits::unpack_section(raw, col.data_version);
                let mut states = vec![0u16; 4096];
                for (v, st) in vals.iter_mut().zip(states.iter_mut()) {
                    let pi = *v as usize;
                    match (pal_nids.get(pi), pal_states.get(pi)) {
                        (Some(&n), Some(&s)) => {
                            *v = n;
                            *st = s;
                        }
                        _ => {
                            return Err(malformed(format!(
                                "palette index {pi} out of range ({} entries)",
                                pal_nids.len()
                            )))
                        }
                    }
                }
                chunk.blocks.push(vals);
                chunk.states.push(states);
            }
        }
    }

    for s in col.sections {
        chunk
            .block_light
            .push(s.block_light.filter(|v| v.len() == 2048).unwrap_or_default());
        chunk
            .sky_light
            .push(s.sky_light.filter(|v| v.len() == 2048).unwrap_or_default());
    }

    // sections that materialized as pure air (e.g. an air-only
    // palette) still count as absent at the top
    while chunk
        .blocks
        .last()
        .is_some_and(|s| s.iter().all(|&b| b == AIR))
    {
        chunk.blocks.pop();
        chunk.states.pop();
    }

    Ok(Some(chunk))
}

/// Routes one NBT entry into the collector. Both name generations are
/// accepted: `Level.Sections[].*` and modern
/// `sections[].block_states.{data, palette[].*}`.
fn collect<'a>(col: &mut Collected<'a>, path: &[&'a str], indices: &[usize], value: Value<'a>) {
    let Some(&last) = path.last() else { return };

    if path.len() <= 2 {
        match value {
            Value::Int(v) => match last {
                "DataVersion" => col.data_version = v as u32,
                "xPos" => col.x_pos = Some(v),
                "zPos" => col.z_pos = Some(v),
                _ => {}
            },
            Value::Str(s) if last == "Status" || last == "status" => {
                col.proto = s != "full" && s != "minecraft:full";
            }
            _ => {}
        }
    }

    let in_sections = path
        .iter()
        .take(2)
        .any(|&s| s == "Sections" || s == "sections");
    if !in_sections {
        return;
    }
    let Some(&si) = indices.first() else { return };
    if col.sections.len() <= si {
        col.sections.resize_with(si + 1, SectionCollect::default);
    }
    let sec = &mut col.sections[si];

    match value {
        Value::Byte(v) if last == "Y" => sec.y = Some(v),
        Value::ByteArray(a) => match last {
            "Blocks" => sec.legacy_blocks = Some(a),
            "Data" => sec.legacy_data = Some(a),
            // light arrays escape the reused inflate buffer, so copy
            "BlockLight" => sec.block_light = Some(a.to_vec()),
            "SkyLight" => sec.sky_light = Some(a.to_vec()),
            _ => {}
        },
        Value::LongArray(a) if last == "BlockStates" || last == "data" => {
            sec.block_states = Some(a);
        }
        Value::Str(s) => {
            let in_palette = path.iter().any(|&p| p == "Palette" || p == "palette");
            if !in_palette {
                return;
            }
            let Some(&pi) = indices.get(1) else { return };
            if sec.palette.len() <= pi {
                sec.palette.resize_with(pi + 1, PaletteEntry::default);
            }
            if last == "Name" {
                sec.palette[pi].name = s.to_string();
            } else if path.len() >= 2 {
                let parent = path[path.len() - 2];
                if parent == "Properties" || parent == "properties" {
                    sec.palette[pi].props.push(format!("{last}={s}"));
                }
            }
        }
        _ => {}
    }
}
