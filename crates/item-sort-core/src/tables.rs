use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Read-only id tables the registry resolves item attributes against.
///
/// Every set is indexed by the raw integer id the item field carries
/// (`create_tile`, `buff_type`, `shoot`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameTables {
    pub ore_tiles: BTreeSet<i32>,
    pub basic_chest_tiles: BTreeSet<i32>,
    pub chair_tiles: BTreeSet<i32>,
    pub door_tiles: BTreeSet<i32>,
    pub table_tiles: BTreeSet<i32>,
    pub torch_tiles: BTreeSet<i32>,
    pub light_pet_buffs: BTreeSet<i32>,
    pub vanity_pet_buffs: BTreeSet<i32>,
    pub hook_projectiles: BTreeSet<i32>,
    pub food_buffs: BTreeSet<i32>,
}

impl GameTables {
    /// Starter set of vanilla ids.
    #[must_use]
    pub fn vanilla() -> Self {
        Self {
            ore_tiles: [
                6, 7, 8, 9, 22, 37, 58, 107, 108, 111, 166, 167, 168, 169, 204, 211, 221, 222, 223,
            ]
            .into_iter()
            .collect(),
            basic_chest_tiles: [21, 467].into_iter().collect(),
            chair_tiles: [15, 497].into_iter().collect(),
            door_tiles: [10, 11, 388, 389].into_iter().collect(),
            table_tiles: [14, 18, 469].into_iter().collect(),
            torch_tiles: [4].into_iter().collect(),
            light_pet_buffs: [19, 27, 101, 102, 152, 155, 190].into_iter().collect(),
            vanity_pet_buffs: [40, 41, 42, 45, 50, 51, 52, 53, 54, 55, 56, 61].into_iter().collect(),
            hook_projectiles: [13, 32, 73, 74, 165, 230, 231, 232, 233, 234, 235, 256, 315, 322]
                .into_iter()
                .collect(),
            food_buffs: [26, 206].into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_ore_tile(&self, tile: i32) -> bool {
        tile >= 0 && self.ore_tiles.contains(&tile)
    }

    #[must_use]
    pub fn is_basic_chest_tile(&self, tile: i32) -> bool {
        tile >= 0 && self.basic_chest_tiles.contains(&tile)
    }

    /// Whether the tile satisfies one of the housing furniture roles.
    #[must_use]
    pub fn is_room_need_tile(&self, tile: i32) -> bool {
        tile >= 0
            && [&self.chair_tiles, &self.door_tiles, &self.table_tiles, &self.torch_tiles]
                .into_iter()
                .any(|set| set.contains(&tile))
    }

    #[must_use]
    pub fn is_pet_buff(&self, buff: i32) -> bool {
        buff > 0 && (self.light_pet_buffs.contains(&buff) || self.vanity_pet_buffs.contains(&buff))
    }

    #[must_use]
    pub fn is_hook_projectile(&self, projectile: i32) -> bool {
        projectile > 0 && self.hook_projectiles.contains(&projectile)
    }

    #[must_use]
    pub fn is_food_buff(&self, buff: i32) -> bool {
        self.food_buffs.contains(&buff)
    }
}
