use serde::{Deserialize, Serialize};

use crate::tables::GameTables;
use crate::{Category, DamageClass, Item, SubCategory};

const DRINK_USE_STYLE: i32 = 2;

/// Every predicate the listing UI can select.
///
/// Umbrella variants (`Weapon`, `Tool`, `Equipment`, `Potion`, `Placeable`)
/// decide category membership; the rest refine one family. Residual variants
/// (`OtherWeapon`, `OtherPotion`, `OtherPlaceable`, `Misc`) pass when their
/// umbrella passes and none of their named siblings do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemFilter {
    All,
    Weapon,
    Melee,
    Ranged,
    Magic,
    Summon,
    Throwing,
    OtherWeapon,
    Tool,
    Axe,
    Hammer,
    Pickaxe,
    Equipment,
    Armor,
    VanityArmor,
    Accessory,
    Grapple,
    Mount,
    Pet,
    Dye,
    VanityItems,
    Potion,
    Recovery,
    Food,
    Buff,
    OtherPotion,
    Placeable,
    Material,
    Block,
    Ore,
    RoomNeeds,
    Statue,
    Banner,
    Crate,
    OtherPlaceable,
    Misc,
}

impl ItemFilter {
    /// Umbrella and sibling list for residual filters.
    ///
    /// `Misc` is the residual of every named umbrella under the always-true
    /// filter. Material is left out of the placeable siblings since it
    /// overlaps the others rather than naming a kind of placeable.
    #[must_use]
    pub fn residual_parts(self) -> Option<(Self, &'static [Self])> {
        match self {
            Self::OtherWeapon => Some((
                Self::Weapon,
                &[Self::Melee, Self::Ranged, Self::Magic, Self::Summon, Self::Throwing],
            )),
            Self::OtherPotion => Some((Self::Potion, &[Self::Recovery, Self::Food, Self::Buff])),
            Self::OtherPlaceable => Some((
                Self::Placeable,
                &[Self::Block, Self::Ore, Self::RoomNeeds, Self::Statue, Self::Banner, Self::Crate],
            )),
            Self::Misc => Some((
                Self::All,
                &[Self::Weapon, Self::Tool, Self::Equipment, Self::Potion, Self::Placeable],
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn passes(self, item: &Item, tables: &GameTables) -> bool {
        match self {
            Self::All => true,

            Self::Weapon => item.damage > 0 && !item.has_tool_power(),
            Self::Melee => item.damage_class == DamageClass::Melee && !item.has_tool_power(),
            Self::Ranged => item.damage_class == DamageClass::Ranged,
            Self::Magic => item.damage_class == DamageClass::Magic,
            Self::Summon => item.damage_class == DamageClass::Summon,
            Self::Throwing => item.damage_class == DamageClass::Throwing,

            Self::Tool => item.has_tool_power(),
            Self::Axe => item.axe > 0,
            Self::Hammer => item.hammer > 0,
            Self::Pickaxe => item.pick > 0,

            Self::Equipment => {
                item.has_armor_slot()
                    || item.accessory
                    || tables.is_hook_projectile(item.shoot)
                    || item.mount_type >= 0
                    || is_dye(item)
                    || tables.is_pet_buff(item.buff_type)
            }
            Self::Armor => item.has_armor_slot() && !item.vanity,
            Self::VanityArmor => item.has_armor_slot() && item.vanity,
            Self::Accessory => item.accessory,
            Self::Grapple => tables.is_hook_projectile(item.shoot),
            Self::Mount => item.mount_type >= 0,
            Self::Pet => tables.is_pet_buff(item.buff_type),
            Self::Dye => is_dye(item),
            Self::VanityItems => item.vanity,

            Self::Potion => item.consumable && item.use_style == DRINK_USE_STYLE,
            Self::Recovery => {
                Self::Potion.passes(item, tables) && (item.heal_life > 0 || item.heal_mana > 0)
            }
            Self::Food => Self::Potion.passes(item, tables) && tables.is_food_buff(item.buff_type),
            Self::Buff => {
                Self::Potion.passes(item, tables)
                    && item.buff_type > 0
                    && !tables.is_food_buff(item.buff_type)
            }

            // Case-sensitive name match; anything called "... Bar" or "... Ore"
            // lists as placeable even when it creates no tile.
            Self::Placeable => {
                item.create_tile >= 0
                    || item.create_wall > 0
                    || item.name.contains("Bar")
                    || item.name.contains("Ore")
            }
            Self::Material => Self::Placeable.passes(item, tables) && item.material,
            Self::Block => {
                item.name.contains("Block") || item.name.contains("Brick") || item.create_wall > 0
            }
            Self::Ore => item.name.contains(" Bar") || tables.is_ore_tile(item.create_tile),
            Self::RoomNeeds => tables.is_room_need_tile(item.create_tile),
            Self::Statue => item.name.contains("Statue"),
            Self::Banner => item.name.contains("Banner"),
            Self::Crate => {
                item.name.contains("Crate") || tables.is_basic_chest_tile(item.create_tile)
            }

            Self::OtherWeapon | Self::OtherPotion | Self::OtherPlaceable | Self::Misc => {
                self.residual_parts().is_some_and(|(umbrella, siblings)| {
                    umbrella.passes(item, tables)
                        && !siblings.iter().any(|sibling| sibling.passes(item, tables))
                })
            }
        }
    }
}

fn is_dye(item: &Item) -> bool {
    item.dye > 0 || item.hair_dye >= 0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Melee,
    Ranged,
    Magic,
    Summon,
    Throwing,
    OtherWeapons,
}

impl WeaponKind {
    pub const ALL: [Self; 6] =
        [Self::Melee, Self::Ranged, Self::Magic, Self::Summon, Self::Throwing, Self::OtherWeapons];

    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Melee),
            2 => Some(Self::Ranged),
            3 => Some(Self::Magic),
            4 => Some(Self::Summon),
            5 => Some(Self::Throwing),
            6 => Some(Self::OtherWeapons),
            _ => None,
        }
    }

    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::Melee => ItemFilter::Melee,
            Self::Ranged => ItemFilter::Ranged,
            Self::Magic => ItemFilter::Magic,
            Self::Summon => ItemFilter::Summon,
            Self::Throwing => ItemFilter::Throwing,
            Self::OtherWeapons => ItemFilter::OtherWeapon,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Axe,
    Hammer,
    Pickaxe,
}

impl ToolKind {
    pub const ALL: [Self; 3] = [Self::Axe, Self::Hammer, Self::Pickaxe];

    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Axe),
            2 => Some(Self::Hammer),
            3 => Some(Self::Pickaxe),
            _ => None,
        }
    }

    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::Axe => ItemFilter::Axe,
            Self::Hammer => ItemFilter::Hammer,
            Self::Pickaxe => ItemFilter::Pickaxe,
        }
    }
}

/// Equipment sub-kinds. These are independent checks, not a partition: a
/// vanity helmet is both `VanityArmor` and `VanityItems`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Armor,
    Accessory,
    Grapple,
    Mount,
    Pet,
    Dye,
    VanityItems,
    VanityArmor,
}

impl EquipmentKind {
    pub const ALL: [Self; 8] = [
        Self::Armor,
        Self::Accessory,
        Self::Grapple,
        Self::Mount,
        Self::Pet,
        Self::Dye,
        Self::VanityItems,
        Self::VanityArmor,
    ];

    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Armor),
            2 => Some(Self::Accessory),
            3 => Some(Self::Grapple),
            4 => Some(Self::Mount),
            5 => Some(Self::Pet),
            6 => Some(Self::Dye),
            7 => Some(Self::VanityItems),
            8 => Some(Self::VanityArmor),
            _ => None,
        }
    }

    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::Armor => ItemFilter::Armor,
            Self::Accessory => ItemFilter::Accessory,
            Self::Grapple => ItemFilter::Grapple,
            Self::Mount => ItemFilter::Mount,
            Self::Pet => ItemFilter::Pet,
            Self::Dye => ItemFilter::Dye,
            Self::VanityItems => ItemFilter::VanityItems,
            Self::VanityArmor => ItemFilter::VanityArmor,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PotionKind {
    Recovery,
    Food,
    Buff,
    OtherPotions,
}

impl PotionKind {
    pub const ALL: [Self; 4] = [Self::Recovery, Self::Food, Self::Buff, Self::OtherPotions];

    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Recovery),
            2 => Some(Self::Food),
            3 => Some(Self::Buff),
            4 => Some(Self::OtherPotions),
            _ => None,
        }
    }

    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::Recovery => ItemFilter::Recovery,
            Self::Food => ItemFilter::Food,
            Self::Buff => ItemFilter::Buff,
            Self::OtherPotions => ItemFilter::OtherPotion,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaceableKind {
    Material,
    Block,
    Ore,
    RoomNeeds,
    Statue,
    Banner,
    Crate,
    OtherPlaceables,
}

impl PlaceableKind {
    pub const ALL: [Self; 8] = [
        Self::Material,
        Self::Block,
        Self::Ore,
        Self::RoomNeeds,
        Self::Statue,
        Self::Banner,
        Self::Crate,
        Self::OtherPlaceables,
    ];

    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Material),
            2 => Some(Self::Block),
            3 => Some(Self::Ore),
            4 => Some(Self::RoomNeeds),
            5 => Some(Self::Statue),
            6 => Some(Self::Banner),
            7 => Some(Self::Crate),
            8 => Some(Self::OtherPlaceables),
            _ => None,
        }
    }

    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::Material => ItemFilter::Material,
            Self::Block => ItemFilter::Block,
            Self::Ore => ItemFilter::Ore,
            Self::RoomNeeds => ItemFilter::RoomNeeds,
            Self::Statue => ItemFilter::Statue,
            Self::Banner => ItemFilter::Banner,
            Self::Crate => ItemFilter::Crate,
            Self::OtherPlaceables => ItemFilter::OtherPlaceable,
        }
    }
}

/// Named leaf filters of a category family, in sub-category order.
fn family_leaves(category: Category) -> Vec<ItemFilter> {
    match category {
        Category::All | Category::Misc => Vec::new(),
        Category::Weapons => WeaponKind::ALL.iter().map(|kind| kind.filter()).collect(),
        Category::Tools => ToolKind::ALL.iter().map(|kind| kind.filter()).collect(),
        Category::Equipment => EquipmentKind::ALL.iter().map(|kind| kind.filter()).collect(),
        Category::Potions => PotionKind::ALL.iter().map(|kind| kind.filter()).collect(),
        Category::Placeables => PlaceableKind::ALL.iter().map(|kind| kind.filter()).collect(),
    }
}

/// Resolve a category and raw sub-category into exactly one filter.
///
/// Sub-category values a family does not define fall back to the category's
/// umbrella filter. `All` and `Misc` ignore the sub-category.
#[must_use]
pub fn resolve(category: Category, sub_category: SubCategory) -> ItemFilter {
    let SubCategory(raw) = sub_category;
    let leaf = match category {
        Category::All | Category::Misc => None,
        Category::Weapons => WeaponKind::from_raw(raw).map(WeaponKind::filter),
        Category::Tools => ToolKind::from_raw(raw).map(ToolKind::filter),
        Category::Equipment => EquipmentKind::from_raw(raw).map(EquipmentKind::filter),
        Category::Potions => PotionKind::from_raw(raw).map(PotionKind::filter),
        Category::Placeables => PlaceableKind::from_raw(raw).map(PlaceableKind::filter),
    };

    leaf.unwrap_or_else(|| {
        if sub_category != SubCategory::ALL {
            tracing::debug!(
                category = category.as_str(),
                sub_category = raw,
                "sub-category not defined for category; using umbrella filter"
            );
        }
        category.umbrella()
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub leaves: Vec<ItemFilter>,
}

/// Top-level category of an item and every named leaf of that family it
/// passes.
///
/// Named umbrellas can overlap (a damaging item called "... Ore" is both a
/// weapon and a placeable); the first passing category in
/// [`Category::NAMED`] order wins.
#[must_use]
pub fn classify(item: &Item, tables: &GameTables) -> Classification {
    let category = Category::NAMED
        .into_iter()
        .find(|category| category.umbrella().passes(item, tables))
        .unwrap_or(Category::Misc);
    let leaves = family_leaves(category)
        .into_iter()
        .filter(|leaf| leaf.passes(item, tables))
        .collect();
    Classification { category, leaves }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tables() -> GameTables {
        GameTables::vanilla()
    }

    fn named(name: &str) -> Item {
        Item { name: name.to_string(), ..Item::default() }
    }

    fn weapon(name: &str, damage_class: DamageClass) -> Item {
        Item { damage: 12, damage_class, ..named(name) }
    }

    fn potion(name: &str) -> Item {
        Item { consumable: true, use_style: DRINK_USE_STYLE, ..named(name) }
    }

    #[test]
    fn all_passes_everything() {
        assert!(ItemFilter::All.passes(&Item::default(), &tables()));
        assert!(ItemFilter::All.passes(&weapon("Zephyr", DamageClass::Melee), &tables()));
    }

    #[test]
    fn weapon_umbrella_excludes_tools() {
        let pickaxe = Item { pick: 35, ..weapon("Copper Pickaxe", DamageClass::Melee) };
        assert!(!ItemFilter::Weapon.passes(&pickaxe, &tables()));
        assert!(!ItemFilter::Melee.passes(&pickaxe, &tables()));
        assert!(ItemFilter::Tool.passes(&pickaxe, &tables()));
        assert!(ItemFilter::Pickaxe.passes(&pickaxe, &tables()));
    }

    #[test]
    fn melee_weapon_named_axe_is_not_a_tool() {
        let sword = weapon("Axe-of-Doom", DamageClass::Melee);
        assert!(ItemFilter::Melee.passes(&sword, &tables()));
        assert!(!ItemFilter::Axe.passes(&sword, &tables()));
        assert!(!ItemFilter::Tool.passes(&sword, &tables()));
    }

    #[test]
    fn other_weapons_requires_positive_damage() {
        let classless = weapon("Sandgun", DamageClass::None);
        assert!(ItemFilter::OtherWeapon.passes(&classless, &tables()));

        let harmless = named("Rubber Duck");
        assert!(!ItemFilter::OtherWeapon.passes(&harmless, &tables()));
        assert!(!ItemFilter::OtherWeapon.passes(&weapon("Bow", DamageClass::Ranged), &tables()));
    }

    #[test]
    fn hamaxe_matches_axe_and_hammer() {
        let hamaxe = Item { axe: 15, hammer: 70, ..named("Molten Hamaxe") };
        assert!(ItemFilter::Axe.passes(&hamaxe, &tables()));
        assert!(ItemFilter::Hammer.passes(&hamaxe, &tables()));
        assert!(!ItemFilter::Pickaxe.passes(&hamaxe, &tables()));
    }

    #[test]
    fn equipment_umbrella_includes_dyes_and_hair_dyes() {
        let dye = Item { dye: 3, ..named("Red Dye") };
        let hair_dye = Item { hair_dye: 0, ..named("Life Hair Dye") };
        for item in [&dye, &hair_dye] {
            assert!(ItemFilter::Equipment.passes(item, &tables()));
            assert!(ItemFilter::Dye.passes(item, &tables()));
        }
        assert!(!ItemFilter::Dye.passes(&named("Gel"), &tables()));
    }

    #[test]
    fn equipment_leaves_are_independent_checks() {
        let vanity_hat = Item { head_slot: 12, vanity: true, ..named("Top Hat") };
        assert!(ItemFilter::VanityArmor.passes(&vanity_hat, &tables()));
        assert!(ItemFilter::VanityItems.passes(&vanity_hat, &tables()));
        assert!(!ItemFilter::Armor.passes(&vanity_hat, &tables()));

        let helmet = Item { head_slot: 3, ..named("Iron Helmet") };
        assert!(ItemFilter::Armor.passes(&helmet, &tables()));
        assert!(!ItemFilter::VanityArmor.passes(&helmet, &tables()));
    }

    #[test]
    fn grapple_mount_and_pet_use_static_tables() {
        let hook = Item { shoot: 13, ..named("Grappling Hook") };
        assert!(ItemFilter::Grapple.passes(&hook, &tables()));
        assert!(ItemFilter::Equipment.passes(&hook, &tables()));
        assert!(!ItemFilter::Grapple.passes(&hook, &GameTables::default()));

        let saddle = Item { mount_type: 0, ..named("Slimy Saddle") };
        assert!(ItemFilter::Mount.passes(&saddle, &tables()));

        let orb = Item { buff_type: 19, ..named("Shadow Orb") };
        let carrot = Item { buff_type: 40, ..named("Carrot") };
        let ironskin = Item { buff_type: 5, ..named("Ironskin Potion") };
        assert!(ItemFilter::Pet.passes(&orb, &tables()));
        assert!(ItemFilter::Pet.passes(&carrot, &tables()));
        assert!(!ItemFilter::Pet.passes(&ironskin, &tables()));
    }

    #[test]
    fn potion_leaves_split_recovery_food_and_buffs() {
        let healing = Item { heal_life: 100, ..potion("Healing Potion") };
        let stew = Item { buff_type: 26, ..potion("Bowl of Soup") };
        let ironskin = Item { buff_type: 5, ..potion("Ironskin Potion") };
        let plain = potion("Bottled Water");

        assert!(ItemFilter::Recovery.passes(&healing, &tables()));
        assert!(ItemFilter::Food.passes(&stew, &tables()));
        assert!(!ItemFilter::Buff.passes(&stew, &tables()));
        assert!(ItemFilter::Buff.passes(&ironskin, &tables()));
        assert!(ItemFilter::OtherPotion.passes(&plain, &tables()));
        for item in [&healing, &stew, &ironskin] {
            assert!(!ItemFilter::OtherPotion.passes(item, &tables()));
        }
    }

    #[test]
    fn potions_require_consumable_drink_style() {
        let thrown = Item { consumable: true, use_style: 1, heal_life: 20, ..named("Shuriken") };
        assert!(!ItemFilter::Potion.passes(&thrown, &tables()));
        assert!(!ItemFilter::Recovery.passes(&thrown, &tables()));
        assert!(!ItemFilter::OtherPotion.passes(&thrown, &tables()));
    }

    #[test]
    fn placeable_name_heuristic_is_preserved() {
        let bar = named("Gold Bar");
        let foreboding = named("Orea's Lament");
        assert!(ItemFilter::Placeable.passes(&bar, &tables()));
        assert!(ItemFilter::Placeable.passes(&foreboding, &tables()));
        assert!(ItemFilter::Ore.passes(&bar, &tables()));
        assert!(!ItemFilter::Placeable.passes(&named("iron ore"), &tables()));
    }

    #[test]
    fn ore_matches_ore_tiles_and_leading_space_bars() {
        let copper_ore = Item { create_tile: 7, ..named("Copper Ore") };
        assert!(ItemFilter::Ore.passes(&copper_ore, &tables()));
        assert!(!ItemFilter::Ore.passes(&named("Crowbar"), &tables()));
    }

    #[test]
    fn placeable_leaves_and_residual() {
        let block = Item { create_tile: 1, ..named("Stone Block") };
        let wall = Item { create_wall: 4, ..named("Wood Wall") };
        let chair = Item { create_tile: 15, ..named("Wooden Chair") };
        let statue = Item { create_tile: 105, ..named("Angel Statue") };
        let banner = Item { create_tile: 91, ..named("Zombie Banner") };
        let crate_item = Item { create_tile: 376, ..named("Wooden Crate") };
        let chest = Item { create_tile: 21, ..named("Chest") };
        let anvil = Item { create_tile: 16, ..named("Iron Anvil") };

        assert!(ItemFilter::Block.passes(&block, &tables()));
        assert!(ItemFilter::Block.passes(&wall, &tables()));
        assert!(ItemFilter::RoomNeeds.passes(&chair, &tables()));
        assert!(ItemFilter::Statue.passes(&statue, &tables()));
        assert!(ItemFilter::Banner.passes(&banner, &tables()));
        assert!(ItemFilter::Crate.passes(&crate_item, &tables()));
        assert!(ItemFilter::Crate.passes(&chest, &tables()));

        assert!(ItemFilter::OtherPlaceable.passes(&anvil, &tables()));
        for item in [&block, &wall, &chair, &statue, &banner, &crate_item, &chest] {
            assert!(!ItemFilter::OtherPlaceable.passes(item, &tables()), "{}", item.name);
        }
    }

    #[test]
    fn material_requires_placeable() {
        let gel = Item { material: true, ..named("Gel") };
        let bar = Item { material: true, create_tile: 239, ..named("Iron Bar") };
        assert!(!ItemFilter::Material.passes(&gel, &tables()));
        assert!(ItemFilter::Material.passes(&bar, &tables()));
        assert!(ItemFilter::Misc.passes(&gel, &tables()));
    }

    #[test]
    fn resolve_maps_family_values() {
        assert_eq!(resolve(Category::Weapons, SubCategory(1)), ItemFilter::Melee);
        assert_eq!(resolve(Category::Equipment, SubCategory(1)), ItemFilter::Armor);
        assert_eq!(resolve(Category::Tools, SubCategory(3)), ItemFilter::Pickaxe);
        assert_eq!(resolve(Category::Potions, SubCategory(4)), ItemFilter::OtherPotion);
        assert_eq!(resolve(Category::Placeables, SubCategory(8)), ItemFilter::OtherPlaceable);
        assert_eq!(resolve(Category::Equipment, SubCategory(8)), ItemFilter::VanityArmor);
    }

    #[test]
    fn resolve_falls_back_to_umbrella() {
        assert_eq!(resolve(Category::Tools, SubCategory(6)), ItemFilter::Tool);
        assert_eq!(resolve(Category::Weapons, SubCategory(200)), ItemFilter::Weapon);
        assert_eq!(resolve(Category::Misc, SubCategory(3)), ItemFilter::Misc);
        assert_eq!(resolve(Category::All, SubCategory(1)), ItemFilter::All);
        assert_eq!(resolve(Category::Potions, SubCategory::ALL), ItemFilter::Potion);
    }

    #[test]
    fn classify_reports_category_and_leaves() {
        let report = classify(&weapon("Zephyr", DamageClass::Melee), &tables());
        assert_eq!(report.category, Category::Weapons);
        assert_eq!(report.leaves, vec![ItemFilter::Melee]);

        let report = classify(&named("Gel"), &tables());
        assert_eq!(report.category, Category::Misc);
        assert!(report.leaves.is_empty());
    }

    const NAME_POOL: [&str; 14] = [
        "Iron Ore",
        "Gold Bar",
        "Crowbar",
        "Stone Block",
        "Red Brick",
        "Angel Statue",
        "Zombie Banner",
        "Wooden Crate",
        "Torch",
        "Zephyr",
        "Healing Potion",
        "Gel",
        "ORb",
        "Ore Detector",
    ];

    fn arb_damage_class() -> impl Strategy<Value = DamageClass> {
        prop_oneof![
            Just(DamageClass::None),
            Just(DamageClass::Melee),
            Just(DamageClass::Ranged),
            Just(DamageClass::Magic),
            Just(DamageClass::Summon),
            Just(DamageClass::Throwing),
        ]
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        let combat = (0..3_i32, arb_damage_class(), 0..2_i32, 0..2_i32, 0..2_i32);
        let equip = (-1..2_i32, -1..2_i32, any::<bool>(), any::<bool>(), -1..2_i32, -1..1_i32);
        let buffs = (
            prop_oneof![Just(0), Just(5), Just(19), Just(26), Just(40)],
            prop_oneof![Just(0), Just(13), Just(14)],
            0..2_i32,
            0..2_i32,
        );
        let usage = (any::<bool>(), prop_oneof![Just(0), Just(DRINK_USE_STYLE)], any::<bool>());
        let placing = (
            prop_oneof![Just(-1), Just(1), Just(4), Just(7), Just(15), Just(21)],
            -1..2_i32,
            0..NAME_POOL.len(),
        );
        (combat, equip, buffs, usage, placing).prop_map(
            |(
                (damage, damage_class, pick, axe, hammer),
                (head_slot, body_slot, accessory, vanity, mount_type, hair_dye),
                (buff_type, shoot, dye, heal_life),
                (consumable, use_style, material),
                (create_tile, create_wall, name_index),
            )| Item {
                name: NAME_POOL[name_index].to_string(),
                damage,
                damage_class,
                pick,
                axe,
                hammer,
                head_slot,
                body_slot,
                accessory,
                vanity,
                mount_type,
                hair_dye,
                buff_type,
                shoot,
                dye,
                heal_life,
                consumable,
                use_style,
                material,
                create_tile,
                create_wall,
                ..Item::default()
            },
        )
    }

    fn arb_weapon() -> impl Strategy<Value = Item> {
        (arb_item(), 1..500_i32).prop_map(|(item, damage)| Item {
            damage,
            pick: 0,
            axe: 0,
            hammer: 0,
            ..item
        })
    }

    proptest! {
        #[test]
        fn property_misc_is_residual_of_named_umbrellas(item in arb_item()) {
            let tables = tables();
            let any_named = Category::NAMED
                .iter()
                .any(|category| category.umbrella().passes(&item, &tables));
            prop_assert_eq!(ItemFilter::Misc.passes(&item, &tables), !any_named);

            let report = classify(&item, &tables);
            prop_assert!(report.category.umbrella().passes(&item, &tables));
        }

        #[test]
        fn property_weapon_family_is_partitioned(item in arb_weapon()) {
            let tables = tables();
            prop_assert!(ItemFilter::Weapon.passes(&item, &tables));
            let matching = WeaponKind::ALL
                .iter()
                .filter(|kind| kind.filter().passes(&item, &tables))
                .count();
            prop_assert_eq!(matching, 1);
        }

        #[test]
        fn property_residuals_are_umbrella_closed(item in arb_item()) {
            let tables = tables();
            for residual in [
                ItemFilter::OtherWeapon,
                ItemFilter::OtherPotion,
                ItemFilter::OtherPlaceable,
                ItemFilter::Misc,
            ] {
                let (umbrella, siblings) = residual
                    .residual_parts()
                    .unwrap_or_else(|| panic!("{residual:?} should be residual"));
                if residual.passes(&item, &tables) {
                    prop_assert!(umbrella.passes(&item, &tables));
                    prop_assert!(siblings.iter().all(|sibling| !sibling.passes(&item, &tables)));
                }
            }
        }

        #[test]
        fn property_resolve_never_fails(raw in any::<u8>()) {
            for category in [
                Category::All,
                Category::Weapons,
                Category::Tools,
                Category::Equipment,
                Category::Potions,
                Category::Placeables,
                Category::Misc,
            ] {
                let filter = resolve(category, SubCategory(raw));
                if raw == 0 {
                    prop_assert_eq!(filter, category.umbrella());
                }
            }
        }
    }
}
