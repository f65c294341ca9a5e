/// Internal block id, assigned by catalog order. Id 0 is always air.
pub type Nid = u16;

/// Packed state index for one block, at most 16 bits wide.
pub type Stateval = u16;

/// A state-map entry: attribute mask in the high 16 bits, the
/// attribute's positioned ordinal in the low 16.
pub type Statemaskval = u32;

pub const AIR: Nid = 0;

/// Output render layer of a block template, in artifact header order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    Cube = 0,
    Voxel = 1,
    Cross = 2,
    Crop = 3,
    CubeFallback = 4,
}

impl RenderLayer {
    pub const COUNT: usize = 5;

    pub const ALL: [RenderLayer; Self::COUNT] = [
        RenderLayer::Cube,
        RenderLayer::Voxel,
        RenderLayer::Cross,
        RenderLayer::Crop,
        RenderLayer::CubeFallback,
    ];

    pub fn from_index(i: u8) -> Option<RenderLayer> {
        Some(match i {
            0 => RenderLayer::Cube,
            1 => RenderLayer::Voxel,
            2 => RenderLayer::Cross,
            3 => RenderLayer::Crop,
            4 => RenderLayer::CubeFallback,
            _ => return None,
        })
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderLayer::Cube => "CUBE",
            RenderLayer::Voxel => "VOXEL",
            RenderLayer::Cross => "CROSS",
            RenderLayer::Crop => "CROP",
            RenderLayer::CubeFallback => "CUBE_FALLBACK",
        }
    }
}
