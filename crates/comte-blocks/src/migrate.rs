//! Block-name migrations between world format versions.
//!
//! The rename rules mirror the game's own data-fixer schema table,
//! which is the single source of truth for data-level format
//! differences. Rules for every version in `(vfrom, vto]` are composed
//! into one flat map per starting version at catalog load, so
//! migrating a palette entry is a single lookup. Renames touch only
//! the block name; properties pass through.

use hashbrown::HashMap;

use crate::catalog::PaletteEntry;

#[rustfmt::skip]
const RULES: &[(u32, &[(&str, &str)])] = &[
    (1474, &[
        ("minecraft:purple_shulker_box", "minecraft:shulker_box"),
    ]),
    (1475, &[
        ("minecraft:flowing_water", "minecraft:water"),
        ("minecraft:flowing_lava", "minecraft:lava"),
    ]),
    (1480, &[
        ("minecraft:blue_coral", "minecraft:tube_coral_block"),
        ("minecraft:pink_coral", "minecraft:brain_coral_block"),
        ("minecraft:purple_coral", "minecraft:bubble_coral_block"),
        ("minecraft:red_coral", "minecraft:fire_coral_block"),
        ("minecraft:yellow_coral", "minecraft:horn_coral_block"),
        ("minecraft:blue_coral_plant", "minecraft:tube_coral"),
        ("minecraft:pink_coral_plant", "minecraft:brain_coral"),
        ("minecraft:purple_coral_plant", "minecraft:bubble_coral"),
        ("minecraft:red_coral_plant", "minecraft:fire_coral"),
        ("minecraft:yellow_coral_plant", "minecraft:horn_coral"),
        ("minecraft:blue_coral_fan", "minecraft:tube_coral_fan"),
        ("minecraft:pink_coral_fan", "minecraft:brain_coral_fan"),
        ("minecraft:purple_coral_fan", "minecraft:bubble_coral_fan"),
        ("minecraft:red_coral_fan", "minecraft:fire_coral_fan"),
        ("minecraft:yellow_coral_fan", "minecraft:horn_coral_fan"),
        ("minecraft:blue_dead_coral", "minecraft:dead_tube_coral"),
        ("minecraft:pink_dead_coral", "minecraft:dead_brain_coral"),
        ("minecraft:purple_dead_coral", "minecraft:dead_bubble_coral"),
        ("minecraft:red_dead_coral", "minecraft:dead_fire_coral"),
        ("minecraft:yellow_dead_coral", "minecraft:dead_horn_coral"),
    ]),
    (1484, &[
        ("minecraft:sea_grass", "minecraft:seagrass"),
        ("minecraft:tall_sea_grass", "minecraft:tall_seagrass"),
    ]),
    (1487, &[
        ("minecraft:prismarine_bricks_slab", "minecraft:prismarine_brick_slab"),
        ("minecraft:prismarine_bricks_stairs", "minecraft:prismarine_brick_stairs"),
    ]),
    (1488, &[
        ("minecraft:kelp_top", "minecraft:kelp"),
        ("minecraft:kelp", "minecraft:kelp_plant"),
    ]),
    (1490, &[
        ("minecraft:melon_block", "minecraft:melon"),
    ]),
    (1510, &[
        ("minecraft:portal", "minecraft:nether_portal"),
        ("minecraft:oak_bark", "minecraft:oak_wood"),
        ("minecraft:spruce_bark", "minecraft:spruce_wood"),
        ("minecraft:birch_bark", "minecraft:birch_wood"),
        ("minecraft:jungle_bark", "minecraft:jungle_wood"),
        ("minecraft:acacia_bark", "minecraft:acacia_wood"),
        ("minecraft:dark_oak_bark", "minecraft:dark_oak_wood"),
        ("minecraft:stripped_oak_bark", "minecraft:stripped_oak_wood"),
        ("minecraft:stripped_spruce_bark", "minecraft:stripped_spruce_wood"),
        ("minecraft:stripped_birch_bark", "minecraft:stripped_birch_wood"),
        ("minecraft:stripped_jungle_bark", "minecraft:stripped_jungle_wood"),
        ("minecraft:stripped_acacia_bark", "minecraft:stripped_acacia_wood"),
        ("minecraft:stripped_dark_oak_bark", "minecraft:stripped_dark_oak_wood"),
        ("minecraft:mob_spawner", "minecraft:spawner"),
    ]),
    (1515, &[
        ("minecraft:tube_coral_fan", "minecraft:tube_coral_wall_fan"),
        ("minecraft:brain_coral_fan", "minecraft:brain_coral_wall_fan"),
        ("minecraft:bubble_coral_fan", "minecraft:bubble_coral_wall_fan"),
        ("minecraft:fire_coral_fan", "minecraft:fire_coral_wall_fan"),
        ("minecraft:horn_coral_fan", "minecraft:horn_coral_wall_fan"),
    ]),
    (1802, &[
        ("minecraft:stone_slab", "minecraft:smooth_stone_slab"),
        ("minecraft:sign", "minecraft:oak_sign"),
        ("minecraft:wall_sign", "minecraft:oak_wall_sign"),
    ]),
    (2209, &[
        ("minecraft:bee_hive", "minecraft:beehive"),
    ]),
    (2508, &[
        ("minecraft:warped_fungi", "minecraft:warped_fungus"),
        ("minecraft:crimson_fungi", "minecraft:crimson_fungus"),
    ]),
    (2528, &[
        ("minecraft:soul_fire_torch", "minecraft:soul_torch"),
        ("minecraft:soul_fire_wall_torch", "minecraft:soul_wall_torch"),
        ("minecraft:soul_fire_lantern", "minecraft:soul_lantern"),
    ]),
    (2679, &[
        // keyed on cauldron contents in the game; the filled variant
        // is the one that renders differently
        ("minecraft:cauldron", "minecraft:water_cauldron"),
    ]),
    (2680, &[
        ("minecraft:grass_path", "minecraft:dirt_path"),
    ]),
    (2690, &[
        ("minecraft:weathered_copper_block", "minecraft:oxidized_copper_block"),
        ("minecraft:semi_weathered_copper_block", "minecraft:weathered_copper_block"),
        ("minecraft:lightly_weathered_copper_block", "minecraft:exposed_copper_block"),
        ("minecraft:weathered_cut_copper", "minecraft:oxidized_cut_copper"),
        ("minecraft:semi_weathered_cut_copper", "minecraft:weathered_cut_copper"),
        ("minecraft:lightly_weathered_cut_copper", "minecraft:exposed_cut_copper"),
        ("minecraft:weathered_cut_copper_stairs", "minecraft:oxidized_cut_copper_stairs"),
        ("minecraft:semi_weathered_cut_copper_stairs", "minecraft:weathered_cut_copper_stairs"),
        ("minecraft:lightly_weathered_cut_copper_stairs", "minecraft:exposed_cut_copper_stairs"),
        ("minecraft:weathered_cut_copper_slab", "minecraft:oxidized_cut_copper_slab"),
        ("minecraft:semi_weathered_cut_copper_slab", "minecraft:weathered_cut_copper_slab"),
        ("minecraft:lightly_weathered_cut_copper_slab", "minecraft:exposed_cut_copper_slab"),
        ("minecraft:waxed_semi_weathered_copper", "minecraft:waxed_weathered_copper"),
        ("minecraft:waxed_lightly_weathered_copper", "minecraft:waxed_exposed_copper"),
        ("minecraft:waxed_semi_weathered_cut_copper", "minecraft:waxed_weathered_cut_copper"),
        ("minecraft:waxed_lightly_weathered_cut_copper", "minecraft:waxed_exposed_cut_copper"),
        ("minecraft:waxed_semi_weathered_cut_copper_stairs", "minecraft:waxed_weathered_cut_copper_stairs"),
        ("minecraft:waxed_lightly_weathered_cut_copper_stairs", "minecraft:waxed_exposed_cut_copper_stairs"),
        ("minecraft:waxed_semi_weathered_cut_copper_slab", "minecraft:waxed_weathered_cut_copper_slab"),
        ("minecraft:waxed_lightly_weathered_cut_copper_slab", "minecraft:waxed_exposed_cut_copper_slab"),
    ]),
    (2691, &[
        ("minecraft:waxed_copper", "minecraft:waxed_copper_block"),
        ("minecraft:oxidized_copper_block", "minecraft:oxidized_copper"),
        ("minecraft:weathered_copper_block", "minecraft:weathered_copper"),
        ("minecraft:exposed_copper_block", "minecraft:exposed_copper"),
    ]),
    (2696, &[
        ("minecraft:grimstone", "minecraft:deepslate"),
        ("minecraft:grimstone_slab", "minecraft:cobbled_deepslate_slab"),
        ("minecraft:grimstone_stairs", "minecraft:cobbled_deepslate_stairs"),
        ("minecraft:grimstone_wall", "minecraft:cobbled_deepslate_wall"),
        ("minecraft:polished_grimstone", "minecraft:polished_deepslate"),
        ("minecraft:polished_grimstone_slab", "minecraft:polished_deepslate_slab"),
        ("minecraft:polished_grimstone_stairs", "minecraft:polished_deepslate_stairs"),
        ("minecraft:polished_grimstone_wall", "minecraft:polished_deepslate_wall"),
        ("minecraft:grimstone_tiles", "minecraft:deepslate_tiles"),
        ("minecraft:grimstone_tile_slab", "minecraft:deepslate_tile_slab"),
        ("minecraft:grimstone_tile_stairs", "minecraft:deepslate_tile_stairs"),
        ("minecraft:grimstone_tile_wall", "minecraft:deepslate_tile_wall"),
        ("minecraft:grimstone_bricks", "minecraft:deepslate_bricks"),
        ("minecraft:grimstone_brick_slab", "minecraft:deepslate_brick_slab"),
        ("minecraft:grimstone_brick_stairs", "minecraft:deepslate_brick_stairs"),
        ("minecraft:grimstone_brick_wall", "minecraft:deepslate_brick_wall"),
        ("minecraft:chiseled_grimstone", "minecraft:chiseled_deepslate"),
    ]),
    (2700, &[
        ("minecraft:cave_vines_head", "minecraft:cave_vines"),
        ("minecraft:cave_vines_body", "minecraft:cave_vines_plant"),
    ]),
    (2717, &[
        ("minecraft:azalea_leaves_flowers", "minecraft:flowering_azalea_leaves"),
    ]),
    (3692, &[
        ("minecraft:grass", "minecraft:short_grass"),
    ]),
    (4541, &[
        ("minecraft:chain", "minecraft:iron_chain"),
    ]),
];

#[derive(Clone, Debug, Default)]
pub(crate) struct Migrations {
    /// Ascending by version; the map at version v is the composition
    /// of every rule set in `[v, vto]` and applies to chunks with
    /// `vfrom < v`.
    steps: Vec<(u32, HashMap<String, String>)>,
}

impl Migrations {
    pub(crate) fn prepare(vto: u32) -> Migrations {
        let mut steps: Vec<(u32, HashMap<String, String>)> = Vec::new();
        let mut next: HashMap<String, String> = HashMap::new();
        for &(version, rules) in RULES.iter().rev() {
            if version > vto {
                continue;
            }
            let mut m: HashMap<String, String> =
                HashMap::with_capacity(rules.len() + next.len());
            for &(from, to) in rules {
                let resolved = next.get(to).cloned().unwrap_or_else(|| to.to_string());
                m.insert(from.to_string(), resolved);
            }
            for (k, v) in &next {
                m.entry(k.clone()).or_insert_with(|| v.clone());
            }
            next = m.clone();
            steps.push((version, m));
        }
        steps.reverse();
        Migrations { steps }
    }

    pub(crate) fn apply(&self, vfrom: u32, vto: u32, palettes: &mut [Vec<PaletteEntry>]) {
        if vfrom >= vto {
            return;
        }
        let Some((_, map)) = self.steps.iter().find(|(v, _)| *v > vfrom) else {
            return;
        };
        for palette in palettes.iter_mut() {
            for entry in palette.iter_mut() {
                if let Some(new) = map.get(&entry.name) {
                    entry.name = new.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migrate_one(vfrom: u32, vto: u32, name: &str) -> String {
        let m = Migrations::prepare(vto);
        let mut pal = vec![vec![PaletteEntry {
            name: name.to_string(),
            props: Vec::new(),
        }]];
        m.apply(vfrom, vto, &mut pal);
        pal[0][0].name.clone()
    }

    #[test]
    fn composed_contract_cases() {
        for (vfrom, vto, input, expected) in [
            (2680, 2690, "minecraft:weathered_copper_block", "minecraft:oxidized_copper_block"),
            (2680, 2691, "minecraft:weathered_copper_block", "minecraft:oxidized_copper"),
            (2689, 2690, "minecraft:weathered_copper_block", "minecraft:oxidized_copper_block"),
            (2690, 2691, "minecraft:weathered_copper_block", "minecraft:weathered_copper"),
            (2690, 2691, "minecraft:grimstone", "minecraft:grimstone"),
            (2690, 2696, "minecraft:grimstone", "minecraft:deepslate"),
            (2230, 3700, "minecraft:grass", "minecraft:short_grass"),
        ] {
            assert_eq!(
                migrate_one(vfrom, vto, input),
                expected,
                "migrate({vfrom}, {vto}, {input})"
            );
        }
    }

    #[test]
    fn newer_chunks_are_untouched() {
        assert_eq!(
            migrate_one(3700, 3700, "minecraft:grass"),
            "minecraft:grass"
        );
        assert_eq!(
            migrate_one(4000, 3700, "minecraft:grass"),
            "minecraft:grass"
        );
    }

    #[test]
    fn properties_pass_through() {
        let m = Migrations::prepare(1802);
        let mut pal = vec![vec![PaletteEntry {
            name: "minecraft:stone_slab".to_string(),
            props: vec!["type=top".to_string()],
        }]];
        m.apply(1631, 1802, &mut pal);
        assert_eq!(pal[0][0].name, "minecraft:smooth_stone_slab");
        assert_eq!(pal[0][0].props, vec!["type=top".to_string()]);
    }

    /// Applies the raw rule sets one version at a time.
    fn migrate_sequential(vfrom: u32, vto: u32, name: &str) -> String {
        let mut n = name.to_string();
        for &(version, rules) in RULES {
            if vfrom < version && version <= vto {
                if let Some(&(_, to)) = rules.iter().find(|(from, _)| *from == n) {
                    n = to.to_string();
                }
            }
        }
        n
    }

    #[test]
    fn composed_matches_sequential_application() {
        let names: Vec<&str> = RULES
            .iter()
            .flat_map(|(_, rules)| rules.iter().map(|(from, _)| *from))
            .collect();
        for &(vfrom, vto) in &[
            (0, 4541),
            (1474, 1510),
            (1488, 1490),
            (2527, 2696),
            (2690, 2700),
            (3000, 4541),
        ] {
            for name in &names {
                assert_eq!(
                    migrate_one(vfrom, vto, name),
                    migrate_sequential(vfrom, vto, name),
                    "composed vs sequential for {name} at ({vfrom}, {vto})"
                );
            }
        }
    }
}
