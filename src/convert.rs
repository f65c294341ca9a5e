//! Batch conversion driver: one worker owns one region from decode to
//! artifact, fed over a rendezvous channel and joined as the barrier.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use comte_blocks::{Catalog, RenderLayer};
use comte_mesh::{artifact, mesh_region, MeshOutput};
use comte_region::{DecodeScratch, NeighborWindow, Region, RegionError};
use comte_vis::{Visibility, VisibilityMode};

pub struct ConvertConfig {
    pub region_dir: PathBuf,
    pub out_dir: PathBuf,
    pub filters: Vec<String>,
    pub threads: usize,
    pub prune_caves: bool,
}

pub fn run(cfg: &ConvertConfig) -> Result<(), Box<dyn Error>> {
    // the atlas builder leaves blockmeta.json next to the per-world
    // output directories
    let data_dir = cfg.out_dir.parent().unwrap_or(Path::new("."));
    let catalog = Arc::new(Catalog::load(&data_dir.join("blockmeta.json"))?);

    let mut names: Vec<String> = fs::read_dir(&cfg.region_dir)
        .map_err(|source| RegionError::Io {
            path: cfg.region_dir.clone(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".mca"))
        .filter(|name| {
            cfg.filters.is_empty() || cfg.filters.iter().any(|f| name.contains(f))
        })
        .collect();
    names.sort();

    let (tx, rx) = crossbeam_channel::bounded::<String>(0);
    let failed = Arc::new(AtomicBool::new(false));
    let mut workers = Vec::with_capacity(cfg.threads);
    for _ in 0..cfg.threads {
        let rx = rx.clone();
        let catalog = Arc::clone(&catalog);
        let region_dir = cfg.region_dir.clone();
        let out_dir = cfg.out_dir.clone();
        let prune_caves = cfg.prune_caves;
        let failed = Arc::clone(&failed);
        workers.push(thread::spawn(move || -> Result<(), RegionError> {
            let mut scratch = DecodeScratch::new();
            while let Ok(name) = rx.recv() {
                if let Err(err) = process_region(
                    &region_dir,
                    &out_dir,
                    &name,
                    &catalog,
                    prune_caves,
                    &mut scratch,
                ) {
                    failed.store(true, Ordering::Relaxed);
                    return Err(err);
                }
            }
            Ok(())
        }));
    }
    drop(rx);

    for name in names {
        if failed.load(Ordering::Relaxed) || tx.send(name).is_err() {
            break;
        }
    }
    drop(tx);

    let mut any_err = false;
    for worker in workers {
        match worker.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                log::error!("{err}");
                any_err = true;
            }
            Err(_) => any_err = true,
        }
    }
    if any_err {
        return Err("conversion failed".into());
    }
    Ok(())
}

fn process_region(
    region_dir: &Path,
    out_dir: &Path,
    name: &str,
    catalog: &Catalog,
    prune_caves: bool,
    scratch: &mut DecodeScratch,
) -> Result<(), RegionError> {
    let path = region_dir.join(name);
    let region = Region::open(&path)?;
    let data = region.read_chunks(None, catalog, scratch)?;

    let vis = prune_caves
        .then(|| Visibility::compute(&data, catalog, VisibilityMode::Octahedral));
    let mut window = NeighborWindow::new(region_dir, region.rx(), region.rz(), catalog);
    let out = mesh_region(&data, catalog, vis.as_ref(), &mut window);

    let stem = name.strip_suffix(".mca").unwrap_or(name);
    let compressed = artifact::write_artifacts(out_dir, stem, &out)?;
    println!(
        "{name} {} KiB -> {} KiB",
        out.total_len() / 1024,
        compressed / 1024
    );
    log_census(catalog, &out);
    Ok(())
}

/// Frequent blocks still rendering through the fallback layer point at
/// gaps in the model templates.
fn log_census(catalog: &Catalog, out: &MeshOutput) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for (nid, &count) in out.block_counts.iter().enumerate() {
        if count < 100 {
            continue;
        }
        let nid = nid as u16;
        if catalog.layers(nid).first() == Some(&RenderLayer::CubeFallback) {
            log::debug!(
                "fallback-rendered: {} ({}) x{count}",
                catalog.name(nid),
                catalog.display_name(nid)
            );
        }
    }
}
