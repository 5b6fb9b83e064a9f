//! Classification and ordering engine for storage item listings.
//!
//! The engine takes a sequence of items (or recipes), resolves a
//! `(Category, SubCategory)` pair into a single [`ItemFilter`], keeps the
//! records that pass the filter and the free-text filters, and yields them in
//! a stable order produced by a [`SortTree`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod filter;
mod pipeline;
mod sorter;
mod tables;

pub use filter::{
    classify, resolve, Classification, EquipmentKind, ItemFilter, PlaceableKind, PotionKind,
    ToolKind, WeaponKind,
};
pub use pipeline::{
    matches_text, sort_and_filter_items, sort_and_filter_recipes, RestartSignal, SortRequest,
};
pub use sorter::{Comparator, SortTree, SortedIter};
pub use tables::GameTables;

/// Source name reported for items that do not come from a mod.
pub const VANILLA_SOURCE: &str = "Terraria";

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum SortError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DamageClass {
    #[default]
    None,
    Melee,
    Ranged,
    Magic,
    Summon,
    Throwing,
}

impl DamageClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Magic => "magic",
            Self::Summon => "summon",
            Self::Throwing => "throwing",
        }
    }
}

/// An item-like record with the attributes classification reads.
///
/// Index-style fields use `-1` for "none", matching the registry the records
/// come from. `create_wall` treats every value `<= 0` as "none".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Item {
    pub item_type: i32,
    pub name: String,
    pub source: Option<String>,
    pub stack: i32,
    pub damage: i32,
    pub damage_class: DamageClass,
    pub pick: i32,
    pub axe: i32,
    pub hammer: i32,
    pub head_slot: i32,
    pub body_slot: i32,
    pub leg_slot: i32,
    pub accessory: bool,
    pub vanity: bool,
    pub consumable: bool,
    pub material: bool,
    pub shoot: i32,
    pub mount_type: i32,
    pub buff_type: i32,
    pub dye: i32,
    pub hair_dye: i32,
    pub heal_life: i32,
    pub heal_mana: i32,
    pub use_style: i32,
    pub create_tile: i32,
    pub create_wall: i32,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            item_type: 0,
            name: String::new(),
            source: None,
            stack: 1,
            damage: 0,
            damage_class: DamageClass::None,
            pick: 0,
            axe: 0,
            hammer: 0,
            head_slot: -1,
            body_slot: -1,
            leg_slot: -1,
            accessory: false,
            vanity: false,
            consumable: false,
            material: false,
            shoot: 0,
            mount_type: -1,
            buff_type: 0,
            dye: 0,
            hair_dye: -1,
            heal_life: 0,
            heal_mana: 0,
            use_style: 0,
            create_tile: -1,
            create_wall: -1,
        }
    }
}

impl Item {
    /// Display name of the mod the item comes from, or [`VANILLA_SOURCE`].
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(VANILLA_SOURCE)
    }

    #[must_use]
    pub fn has_armor_slot(&self) -> bool {
        self.head_slot >= 0 || self.body_slot >= 0 || self.leg_slot >= 0
    }

    #[must_use]
    pub fn has_tool_power(&self) -> bool {
        self.pick > 0 || self.axe > 0 || self.hammer > 0
    }

    /// # Errors
    /// Returns [`SortError::Validation`] when the record cannot have come from
    /// a well-formed registry.
    pub fn validate(&self) -> Result<(), SortError> {
        if self.name.trim().is_empty() {
            return Err(SortError::Validation(format!(
                "item {} MUST have a non-empty name",
                self.item_type
            )));
        }

        if self.stack < 0 {
            return Err(SortError::Validation(format!(
                "item {} has negative stack {}",
                self.item_type, self.stack
            )));
        }

        for (field, value) in [
            ("head_slot", self.head_slot),
            ("body_slot", self.body_slot),
            ("leg_slot", self.leg_slot),
            ("mount_type", self.mount_type),
            ("hair_dye", self.hair_dye),
            ("create_tile", self.create_tile),
        ] {
            if value < -1 {
                return Err(SortError::Validation(format!(
                    "item {} has {field} {value}; expected -1 or a valid index",
                    self.item_type
                )));
            }
        }

        Ok(())
    }
}

/// A recipe is classified and ordered through the item it produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub create_item: Item,
}

/// Access to the record a listing entry is classified by.
pub trait AsItem {
    fn as_item(&self) -> &Item;
}

impl AsItem for Item {
    fn as_item(&self) -> &Item {
        self
    }
}

impl AsItem for Recipe {
    fn as_item(&self) -> &Item {
        &self.create_item
    }
}

impl<T: AsItem + ?Sized> AsItem for &T {
    fn as_item(&self) -> &Item {
        (**self).as_item()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    All,
    Weapons,
    Tools,
    Equipment,
    Potions,
    Placeables,
    Misc,
}

impl Category {
    /// The categories that own an umbrella filter, in classification order.
    pub const NAMED: [Self; 5] =
        [Self::Weapons, Self::Tools, Self::Equipment, Self::Potions, Self::Placeables];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Weapons => "weapons",
            Self::Tools => "tools",
            Self::Equipment => "equipment",
            Self::Potions => "potions",
            Self::Placeables => "placeables",
            Self::Misc => "misc",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "weapons" => Some(Self::Weapons),
            "tools" => Some(Self::Tools),
            "equipment" => Some(Self::Equipment),
            "potions" => Some(Self::Potions),
            "placeables" => Some(Self::Placeables),
            "misc" => Some(Self::Misc),
            _ => None,
        }
    }

    /// Category-level filter, ignoring any sub-category.
    #[must_use]
    pub fn umbrella(self) -> ItemFilter {
        match self {
            Self::All => ItemFilter::All,
            Self::Weapons => ItemFilter::Weapon,
            Self::Tools => ItemFilter::Tool,
            Self::Equipment => ItemFilter::Equipment,
            Self::Potions => ItemFilter::Potion,
            Self::Placeables => ItemFilter::Placeable,
            Self::Misc => ItemFilter::Misc,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(&value.to_ascii_lowercase())
            .ok_or_else(|| SortError::Parse(format!("unknown category `{value}`")))
    }
}

/// Raw sub-category value as selected in the UI.
///
/// The same value means different things per category; `0` is always "All".
/// Decode it with the family kind enums or let [`resolve`] do it.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash,
)]
#[serde(transparent)]
pub struct SubCategory(pub u8);

impl SubCategory {
    pub const ALL: Self = Self(0);
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Default,
    Id,
    Name,
    Quantity,
}

impl SortMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Id => "id",
            Self::Name => "name",
            Self::Quantity => "quantity",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }

    /// Comparators applied in order; every pass after the first rebuilds a
    /// fresh tree from the previous pass's output.
    #[must_use]
    pub fn passes(self) -> &'static [Comparator] {
        match self {
            Self::Default => &[Comparator::Default],
            Self::Id => &[Comparator::Id],
            Self::Name => &[Comparator::Name],
            Self::Quantity => &[Comparator::Id, Comparator::Quantity],
        }
    }

    /// Comparators for the recipe listing. A recipe's stack is its output
    /// count rather than a held quantity, so Quantity keeps filtered order.
    #[must_use]
    pub fn recipe_passes(self) -> &'static [Comparator] {
        match self {
            Self::Quantity => &[Comparator::Default],
            other => other.passes(),
        }
    }

    #[must_use]
    pub fn tie_breakers(self) -> Vec<String> {
        describe_passes(self.passes())
    }

    #[must_use]
    pub fn recipe_tie_breakers(self) -> Vec<String> {
        describe_passes(self.recipe_passes())
    }
}

fn describe_passes(passes: &[Comparator]) -> Vec<String> {
    passes
        .iter()
        .filter_map(|comparator| match comparator {
            Comparator::Default => None,
            Comparator::Id => Some("item_type asc"),
            Comparator::Name => Some("name_casefold asc"),
            Comparator::Quantity => Some("stack asc"),
        })
        .chain(std::iter::once("insertion_order asc"))
        .map(str::to_string)
        .collect()
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(&value.to_ascii_lowercase())
            .ok_or_else(|| SortError::Parse(format!("unknown sort mode `{value}`")))
    }
}
