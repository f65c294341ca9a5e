use std::io;
use std::path::PathBuf;

use thiserror::Error;

use comte_nbt::NbtError;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed region at byte {offset}: {detail}")]
    MalformedRegion { offset: u64, detail: String },
    #[error(transparent)]
    MalformedNbt(#[from] NbtError),
    #[error("malformed chunk r.{rx}.{rz} ({cx},{cz}): {detail}")]
    MalformedChunk {
        rx: i32,
        rz: i32,
        cx: usize,
        cz: usize,
        detail: String,
    },
    #[error("unknown block in palette: {name}")]
    UnknownBlock { name: String },
}
