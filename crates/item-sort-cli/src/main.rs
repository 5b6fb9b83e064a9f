use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use item_sort_core::{
    classify, matches_text, sort_and_filter_items, sort_and_filter_recipes, Category, GameTables,
    Item, ItemFilter, Recipe, RestartSignal, SortMode, SortRequest, SubCategory,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing_subscriber::EnvFilter;

const CLI_CONTRACT_VERSION: &str = "cli.v1";

#[derive(Debug, Parser)]
#[command(name = "item-sort")]
#[command(about = "Classify and order storage item listings")]
struct Cli {
    #[arg(long)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Items(ListArgs),
    Recipes(RecipeArgs),
    Classify(ClassifyArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long, default_value = "all")]
    category: Category,
    #[arg(long, default_value_t = 0)]
    sub_category: u8,
    #[arg(long, default_value = "default")]
    sort: SortMode,
    #[arg(long, default_value = "")]
    mod_filter: String,
    #[arg(long, default_value = "")]
    name_filter: String,
}

#[derive(Debug, Args)]
struct RecipeArgs {
    #[command(flatten)]
    list: ListArgs,
    /// Number of valid recipes; defaults to the catalog's value or its length.
    #[arg(long)]
    num_recipes: Option<usize>,
    /// Raise the restart flag once this many recipes have been inserted.
    #[arg(long)]
    restart_after: Option<usize>,
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    #[arg(long, default_value = "")]
    name_filter: String,
}

/// Item registry snapshot fed to the engine.
#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    num_recipes: Option<usize>,
    #[serde(default = "GameTables::vanilla")]
    tables: GameTables,
}

#[derive(Debug, Serialize)]
struct ListedItem<'a> {
    item_type: i32,
    name: &'a str,
    source: &'a str,
    stack: i32,
}

impl<'a> From<&'a Item> for ListedItem<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            item_type: item.item_type,
            name: &item.name,
            source: item.source_name(),
            stack: item.stack,
        }
    }
}

/// Stand-in for the crafting UI's restart flag: trips after a fixed number
/// of polls.
struct ScriptedRestart {
    polls: Cell<usize>,
    after: Option<usize>,
}

impl ScriptedRestart {
    fn new(after: Option<usize>) -> Self {
        Self { polls: Cell::new(0), after }
    }

    fn tripped(&self) -> bool {
        self.after.is_some_and(|after| self.polls.get() >= after)
    }
}

impl RestartSignal for ScriptedRestart {
    fn restart_requested(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.tripped()
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T> {
    contract_version: &'static str,
    #[serde(flatten)]
    payload: &'a T,
}

fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
    let envelope = Envelope { contract_version: CLI_CONTRACT_VERSION, payload };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)?;
    match cli.command {
        Command::Items(args) => run_items(&args, &catalog),
        Command::Recipes(args) => run_recipes(&args, &catalog),
        Command::Classify(args) => run_classify(&args, &catalog),
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&body)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;

    for (index, item) in catalog.items.iter().enumerate() {
        item.validate().with_context(|| format!("invalid catalog item at index {index}"))?;
    }
    for (index, recipe) in catalog.recipes.iter().enumerate() {
        recipe
            .create_item
            .validate()
            .with_context(|| format!("invalid catalog recipe at index {index}"))?;
    }

    tracing::debug!(
        items = catalog.items.len(),
        recipes = catalog.recipes.len(),
        path = %path.display(),
        "loaded catalog"
    );
    Ok(catalog)
}

fn build_request(args: &ListArgs) -> SortRequest {
    SortRequest {
        sort_mode: args.sort,
        category: args.category,
        sub_category: SubCategory(args.sub_category),
        mod_filter: args.mod_filter.clone(),
        name_filter: args.name_filter.clone(),
    }
}

fn fingerprint(items: &[&Item]) -> String {
    let mut hasher = Sha256::new();
    for item in items {
        hasher.update(format!("{}:{}\n", item.item_type, item.name).as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[derive(Debug, Serialize)]
struct Determinism {
    tie_breakers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    request: &'a SortRequest,
    filter: ItemFilter,
    determinism: Determinism,
    cancelled: bool,
    count: usize,
    fingerprint: String,
    results: Vec<ListedItem<'a>>,
}

impl<'a> Listing<'a> {
    fn new(
        request: &'a SortRequest,
        tie_breakers: Vec<String>,
        cancelled: bool,
        results: &[&'a Item],
    ) -> Self {
        Self {
            request,
            filter: request.filter(),
            determinism: Determinism { tie_breakers },
            cancelled,
            count: results.len(),
            fingerprint: fingerprint(results),
            results: results.iter().map(|item| ListedItem::from(*item)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifiedItem<'a> {
    item_type: i32,
    name: &'a str,
    category: Category,
    leaves: Vec<ItemFilter>,
}

#[derive(Debug, Serialize)]
struct ClassifyReport<'a> {
    count: usize,
    items: Vec<ClassifiedItem<'a>>,
}

fn run_items(args: &ListArgs, catalog: &Catalog) -> Result<()> {
    let request = build_request(args);
    let results: Vec<&Item> =
        sort_and_filter_items(&catalog.items, &request, &catalog.tables).collect();
    emit_json(&Listing::new(&request, request.sort_mode.tie_breakers(), false, &results))
}

fn run_recipes(args: &RecipeArgs, catalog: &Catalog) -> Result<()> {
    let request = build_request(&args.list);
    let num_recipes = args.num_recipes.or(catalog.num_recipes).unwrap_or(catalog.recipes.len());
    let restart = ScriptedRestart::new(args.restart_after);

    let results: Vec<&Item> = sort_and_filter_recipes(
        &catalog.recipes,
        num_recipes,
        &request,
        &catalog.tables,
        &restart,
    )
    .map(|recipe| &recipe.create_item)
    .collect();
    let tie_breakers = request.sort_mode.recipe_tie_breakers();
    emit_json(&Listing::new(&request, tie_breakers, restart.tripped(), &results))
}

fn run_classify(args: &ClassifyArgs, catalog: &Catalog) -> Result<()> {
    let items: Vec<ClassifiedItem<'_>> = catalog
        .items
        .iter()
        .filter(|item| matches_text(item, "", &args.name_filter))
        .map(|item| {
            let report = classify(item, &catalog.tables);
            ClassifiedItem {
                item_type: item.item_type,
                name: &item.name,
                category: report.category,
                leaves: report.leaves,
            }
        })
        .collect();
    emit_json(&ClassifyReport { count: items.len(), items })
}
