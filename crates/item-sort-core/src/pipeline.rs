use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::filter::{resolve, ItemFilter};
use crate::sorter::{Comparator, SortTree, SortedIter};
use crate::tables::GameTables;
use crate::{AsItem, Category, Item, Recipe, SortMode, SubCategory};

/// Externally owned "start over" flag polled while recipes are sorted.
pub trait RestartSignal {
    fn restart_requested(&self) -> bool;
}

impl RestartSignal for AtomicBool {
    fn restart_requested(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: RestartSignal + ?Sized> RestartSignal for &T {
    fn restart_requested(&self) -> bool {
        (**self).restart_requested()
    }
}

impl<T: RestartSignal + ?Sized> RestartSignal for Arc<T> {
    fn restart_requested(&self) -> bool {
        (**self).restart_requested()
    }
}

/// One listing request as chosen in the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SortRequest {
    pub sort_mode: SortMode,
    pub category: Category,
    pub sub_category: SubCategory,
    pub mod_filter: String,
    pub name_filter: String,
}

impl SortRequest {
    #[must_use]
    pub fn filter(&self) -> ItemFilter {
        resolve(self.category, self.sub_category)
    }

    fn keeps(&self, filter: ItemFilter, item: &Item, tables: &GameTables) -> bool {
        filter.passes(item, tables) && matches_text(item, &self.mod_filter, &self.name_filter)
    }
}

/// Case-insensitive substring match on the item's source and name. Empty
/// filters match everything.
#[must_use]
pub fn matches_text(item: &Item, mod_filter: &str, name_filter: &str) -> bool {
    contains_folded(item.source_name(), mod_filter) && contains_folded(&item.name, name_filter)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn split_passes(passes: &'static [Comparator]) -> (Comparator, &'static [Comparator]) {
    match passes.split_first() {
        Some((first, rest)) => (*first, rest),
        None => (Comparator::Default, &[]),
    }
}

/// Filter `items` through the request and return them in sorted order.
///
/// Survivors are inserted in their input order, so ties under every
/// comparator keep that order. Quantity mode sorts by identity first and then
/// rebuilds the tree by held count.
pub fn sort_and_filter_items<'a, I>(
    items: I,
    request: &SortRequest,
    tables: &GameTables,
) -> SortedIter<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let filter = request.filter();
    let (first, rest) = split_passes(request.sort_mode.passes());

    let mut tree = SortTree::new(first);
    tree.extend(items.into_iter().filter(|item| request.keeps(filter, item, tables)));
    for &comparator in rest {
        tree = tree.rebuild(comparator);
    }

    tracing::debug!(
        filter = ?filter,
        sort_mode = request.sort_mode.as_str(),
        matched = tree.len(),
        "sorted item listing"
    );
    tree.into_sorted()
}

/// Filter the first `num_recipes` recipes by the item they create and return
/// them in sorted order.
///
/// Quantity mode keeps the filtered recipes in input order.
///
/// `restart` is polled after every insertion, in every pass. Once it reports
/// a restart the partial result is dropped and an empty sequence is returned.
pub fn sort_and_filter_recipes<'a, S>(
    recipes: &'a [Recipe],
    num_recipes: usize,
    request: &SortRequest,
    tables: &GameTables,
    restart: &S,
) -> SortedIter<&'a Recipe>
where
    S: RestartSignal + ?Sized,
{
    let filter = request.filter();
    let (first, rest) = split_passes(request.sort_mode.recipe_passes());

    let candidates = recipes
        .iter()
        .take(num_recipes)
        .filter(|recipe| request.keeps(filter, recipe.as_item(), tables));
    let Some(mut tree) = fill_polling(candidates, first, restart) else {
        return SortedIter::empty();
    };
    for &comparator in rest {
        let Some(rebuilt) = fill_polling(tree.into_sorted(), comparator, restart) else {
            return SortedIter::empty();
        };
        tree = rebuilt;
    }

    tracing::debug!(
        filter = ?filter,
        sort_mode = request.sort_mode.as_str(),
        matched = tree.len(),
        "sorted recipe listing"
    );
    tree.into_sorted()
}

fn fill_polling<T, I, S>(values: I, comparator: Comparator, restart: &S) -> Option<SortTree<T>>
where
    T: AsItem,
    I: Iterator<Item = T>,
    S: RestartSignal + ?Sized,
{
    let mut tree = SortTree::new(comparator);
    for value in values {
        tree.insert(value);
        if restart.restart_requested() {
            tracing::info!(
                comparator = ?comparator,
                inserted = tree.len(),
                "restart requested; abandoning recipe sort"
            );
            return None;
        }
    }
    Some(tree)
}
