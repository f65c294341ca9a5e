//! Built-in table mapping pre-flattening blockstates (`id<<4 | data`)
//! to modern block names and properties. Covers the classic id space;
//! unmapped combinations resolve to air, and the decoder retries a
//! miss with the data nibble cleared, so only the base variant of each
//! id is load-bearing.

#[rustfmt::skip]
pub(crate) const TABLE: &[(u16, &str, &str)] = &[
    (0x000, "air", ""),
    // 1: stone variants
    (0x010, "stone", ""),
    (0x011, "granite", ""),
    (0x012, "polished_granite", ""),
    (0x013, "diorite", ""),
    (0x014, "polished_diorite", ""),
    (0x015, "andesite", ""),
    (0x016, "polished_andesite", ""),
    (0x020, "grass_block", ""),
    (0x030, "dirt", ""),
    (0x031, "coarse_dirt", ""),
    (0x032, "podzol", ""),
    (0x040, "cobblestone", ""),
    // 5: planks
    (0x050, "oak_planks", ""),
    (0x051, "spruce_planks", ""),
    (0x052, "birch_planks", ""),
    (0x053, "jungle_planks", ""),
    (0x054, "acacia_planks", ""),
    (0x055, "dark_oak_planks", ""),
    (0x060, "oak_sapling", ""),
    (0x061, "spruce_sapling", ""),
    (0x062, "birch_sapling", ""),
    (0x063, "jungle_sapling", ""),
    (0x064, "acacia_sapling", ""),
    (0x065, "dark_oak_sapling", ""),
    (0x070, "bedrock", ""),
    // 8-11: liquids; nonzero flow levels fall back via the nibble retry
    (0x080, "water", "level=0"),
    (0x090, "water", "level=0"),
    (0x0a0, "lava", "level=0"),
    (0x0b0, "lava", "level=0"),
    (0x0c0, "sand", ""),
    (0x0c1, "red_sand", ""),
    (0x0d0, "gravel", ""),
    (0x0e0, "gold_ore", ""),
    (0x0f0, "iron_ore", ""),
    (0x100, "coal_ore", ""),
    // 17: logs, data = species | axis<<2
    (0x110, "oak_log", "axis=y"),
    (0x111, "spruce_log", "axis=y"),
    (0x112, "birch_log", "axis=y"),
    (0x113, "jungle_log", "axis=y"),
    (0x114, "oak_log", "axis=x"),
    (0x115, "spruce_log", "axis=x"),
    (0x116, "birch_log", "axis=x"),
    (0x117, "jungle_log", "axis=x"),
    (0x118, "oak_log", "axis=z"),
    (0x119, "spruce_log", "axis=z"),
    (0x11a, "birch_log", "axis=z"),
    (0x11b, "jungle_log", "axis=z"),
    (0x11c, "oak_wood", "axis=y"),
    (0x11d, "spruce_wood", "axis=y"),
    (0x11e, "birch_wood", "axis=y"),
    (0x11f, "jungle_wood", "axis=y"),
    // 18: leaves, high bits carry decay flags
    (0x120, "oak_leaves", ""),
    (0x121, "spruce_leaves", ""),
    (0x122, "birch_leaves", ""),
    (0x123, "jungle_leaves", ""),
    (0x124, "oak_leaves", "persistent=true"),
    (0x125, "spruce_leaves", "persistent=true"),
    (0x126, "birch_leaves", "persistent=true"),
    (0x127, "jungle_leaves", "persistent=true"),
    (0x130, "sponge", ""),
    (0x131, "wet_sponge", ""),
    (0x140, "glass", ""),
    (0x150, "lapis_ore", ""),
    (0x160, "lapis_block", ""),
    (0x170, "dispenser", "facing=north"),
    (0x180, "sandstone", ""),
    (0x181, "chiseled_sandstone", ""),
    (0x182, "cut_sandstone", ""),
    (0x190, "note_block", ""),
    // 23: wool
    (0x230, "white_wool", ""),
    (0x231, "orange_wool", ""),
    (0x232, "magenta_wool", ""),
    (0x233, "light_blue_wool", ""),
    (0x234, "yellow_wool", ""),
    (0x235, "lime_wool", ""),
    (0x236, "pink_wool", ""),
    (0x237, "gray_wool", ""),
    (0x238, "light_gray_wool", ""),
    (0x239, "cyan_wool", ""),
    (0x23a, "purple_wool", ""),
    (0x23b, "blue_wool", ""),
    (0x23c, "brown_wool", ""),
    (0x23d, "green_wool", ""),
    (0x23e, "red_wool", ""),
    (0x23f, "black_wool", ""),
    (0x250, "dandelion", ""),
    (0x260, "poppy", ""),
    (0x261, "blue_orchid", ""),
    (0x262, "allium", ""),
    (0x263, "azure_bluet", ""),
    (0x264, "red_tulip", ""),
    (0x265, "orange_tulip", ""),
    (0x266, "white_tulip", ""),
    (0x267, "pink_tulip", ""),
    (0x268, "oxeye_daisy", ""),
    (0x270, "brown_mushroom", ""),
    (0x280, "red_mushroom", ""),
    (0x290, "gold_block", ""),
    (0x2a0, "iron_block", ""),
    (0x2b0, "smooth_stone_slab", "type=double"),
    (0x2c0, "smooth_stone_slab", "type=bottom"),
    (0x2c8, "smooth_stone_slab", "type=top"),
    (0x2d0, "bricks", ""),
    (0x2e0, "tnt", ""),
    (0x2f0, "bookshelf", ""),
    (0x300, "mossy_cobblestone", ""),
    (0x310, "obsidian", ""),
    (0x320, "torch", ""),
    (0x330, "fire", "age=0"),
    (0x340, "spawner", ""),
    // 53: oak stairs, data = facing | top<<2
    (0x350, "oak_stairs", "facing=east,half=bottom"),
    (0x351, "oak_stairs", "facing=west,half=bottom"),
    (0x352, "oak_stairs", "facing=south,half=bottom"),
    (0x353, "oak_stairs", "facing=north,half=bottom"),
    (0x354, "oak_stairs", "facing=east,half=top"),
    (0x355, "oak_stairs", "facing=west,half=top"),
    (0x356, "oak_stairs", "facing=south,half=top"),
    (0x357, "oak_stairs", "facing=north,half=top"),
    (0x360, "chest", "facing=north"),
    (0x380, "diamond_ore", ""),
    (0x390, "diamond_block", ""),
    (0x3a0, "crafting_table", ""),
    // 59: wheat ages
    (0x3b0, "wheat", "age=0"),
    (0x3b1, "wheat", "age=1"),
    (0x3b2, "wheat", "age=2"),
    (0x3b3, "wheat", "age=3"),
    (0x3b4, "wheat", "age=4"),
    (0x3b5, "wheat", "age=5"),
    (0x3b6, "wheat", "age=6"),
    (0x3b7, "wheat", "age=7"),
    (0x3c0, "farmland", "moisture=0"),
    (0x3c7, "farmland", "moisture=7"),
    (0x3d0, "furnace", "facing=north,lit=false"),
    (0x3e0, "furnace", "facing=north,lit=true"),
    (0x3f0, "oak_sign", ""),
    (0x410, "ladder", "facing=north"),
    (0x420, "rail", "shape=north_south"),
    // 67: cobblestone stairs
    (0x430, "cobblestone_stairs", "facing=east,half=bottom"),
    (0x431, "cobblestone_stairs", "facing=west,half=bottom"),
    (0x432, "cobblestone_stairs", "facing=south,half=bottom"),
    (0x433, "cobblestone_stairs", "facing=north,half=bottom"),
    (0x434, "cobblestone_stairs", "facing=east,half=top"),
    (0x435, "cobblestone_stairs", "facing=west,half=top"),
    (0x436, "cobblestone_stairs", "facing=south,half=top"),
    (0x437, "cobblestone_stairs", "facing=north,half=top"),
    (0x480, "redstone_ore", ""),
    (0x490, "redstone_ore", "lit=true"),
    // 78: snow layers, data = layers-1
    (0x4e0, "snow", "layers=1"),
    (0x4e1, "snow", "layers=2"),
    (0x4e2, "snow", "layers=3"),
    (0x4e3, "snow", "layers=4"),
    (0x4e4, "snow", "layers=5"),
    (0x4e5, "snow", "layers=6"),
    (0x4e6, "snow", "layers=7"),
    (0x4e7, "snow", "layers=8"),
    (0x4f0, "ice", ""),
    (0x500, "snow_block", ""),
    (0x510, "cactus", ""),
    (0x520, "clay", ""),
    (0x530, "sugar_cane", ""),
    (0x540, "jukebox", ""),
    (0x550, "oak_fence", ""),
    (0x560, "carved_pumpkin", "facing=south"),
    (0x561, "carved_pumpkin", "facing=west"),
    (0x562, "carved_pumpkin", "facing=north"),
    (0x563, "carved_pumpkin", "facing=east"),
    (0x570, "netherrack", ""),
    (0x580, "soul_sand", ""),
    (0x590, "glowstone", ""),
    (0x5a0, "nether_portal", "axis=x"),
    (0x5b0, "jack_o_lantern", "facing=south"),
    // 95: stained glass
    (0x5f0, "white_stained_glass", ""),
    (0x5f1, "orange_stained_glass", ""),
    (0x5f2, "magenta_stained_glass", ""),
    (0x5f3, "light_blue_stained_glass", ""),
    (0x5f4, "yellow_stained_glass", ""),
    (0x5f5, "lime_stained_glass", ""),
    (0x5f6, "pink_stained_glass", ""),
    (0x5f7, "gray_stained_glass", ""),
    (0x5f8, "light_gray_stained_glass", ""),
    (0x5f9, "cyan_stained_glass", ""),
    (0x5fa, "purple_stained_glass", ""),
    (0x5fb, "blue_stained_glass", ""),
    (0x5fc, "brown_stained_glass", ""),
    (0x5fd, "green_stained_glass", ""),
    (0x5fe, "red_stained_glass", ""),
    (0x5ff, "black_stained_glass", ""),
    (0x610, "infested_stone", ""),
    (0x620, "stone_bricks", ""),
    (0x621, "mossy_stone_bricks", ""),
    (0x622, "cracked_stone_bricks", ""),
    (0x623, "chiseled_stone_bricks", ""),
    (0x630, "brown_mushroom_block", ""),
    (0x640, "red_mushroom_block", ""),
    (0x650, "iron_bars", ""),
    (0x660, "glass_pane", ""),
    (0x670, "melon", ""),
    (0x6a0, "vine", ""),
    (0x6e0, "mycelium", ""),
    (0x6f0, "lily_pad", ""),
    (0x700, "nether_bricks", ""),
    (0x790, "end_stone", ""),
    (0x810, "emerald_ore", ""),
    (0x850, "emerald_block", ""),
    (0x8b0, "cobblestone_wall", ""),
    (0x8b1, "mossy_cobblestone_wall", ""),
    (0x980, "redstone_block", ""),
    (0x9b0, "quartz_block", ""),
    (0x9b1, "chiseled_quartz_block", ""),
    (0x9b2, "quartz_pillar", "axis=y"),
    // 159: stained terracotta
    (0x9f0, "white_terracotta", ""),
    (0x9f1, "orange_terracotta", ""),
    (0x9f2, "magenta_terracotta", ""),
    (0x9f3, "light_blue_terracotta", ""),
    (0x9f4, "yellow_terracotta", ""),
    (0x9f5, "lime_terracotta", ""),
    (0x9f6, "pink_terracotta", ""),
    (0x9f7, "gray_terracotta", ""),
    (0x9f8, "light_gray_terracotta", ""),
    (0x9f9, "cyan_terracotta", ""),
    (0x9fa, "purple_terracotta", ""),
    (0x9fb, "blue_terracotta", ""),
    (0x9fc, "brown_terracotta", ""),
    (0x9fd, "green_terracotta", ""),
    (0x9fe, "red_terracotta", ""),
    (0x9ff, "black_terracotta", ""),
    (0xa10, "acacia_leaves", ""),
    (0xa11, "dark_oak_leaves", ""),
    (0xa20, "acacia_log", "axis=y"),
    (0xa21, "dark_oak_log", "axis=y"),
    (0xa80, "prismarine", ""),
    (0xa81, "prismarine_bricks", ""),
    (0xa82, "dark_prismarine", ""),
    (0xa90, "sea_lantern", ""),
    (0xaa0, "hay_block", "axis=y"),
    (0xac0, "terracotta", ""),
    (0xad0, "coal_block", ""),
    (0xae0, "packed_ice", ""),
    (0xb30, "red_sandstone", ""),
    (0xb31, "chiseled_red_sandstone", ""),
    (0xb32, "cut_red_sandstone", ""),
];
