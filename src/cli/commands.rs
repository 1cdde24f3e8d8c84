use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("RECIPEBOX_VERSION");

#[derive(Parser)]
#[command(
    name = "recipebox",
    version = VERSION,
    about = "Family recipe box, weekly meal planner and shopping list",
    after_help = "\
NOTE:
  Run `recipebox init` (or `recipebox init --demo`) before any other command.
  The database defaults to <data-dir>/recipebox/recipebox.db; override with
  --db or RECIPEBOX_DB.

EXIT CODES:
  0  Success
  1  Error (not initialized, not found, validation, storage)

WEEKS:
  Weeks start on Monday. Any date passed to --week is moved back to its Monday.
  Without --week the current week is used."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Database file
    #[arg(long, global = true, env = "RECIPEBOX_DB")]
    pub db: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database
    Init {
        /// Also create the Mom/Dad profiles and sample recipes
        #[arg(long)]
        demo: bool,
    },

    /// Family member profiles
    #[command(subcommand)]
    User(UserCommands),

    /// Recipe box
    #[command(subcommand)]
    Recipe(RecipeCommands),

    /// Weekly meal plan
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Shopping list for a planned week
    #[command(subcommand)]
    Shop(ShopCommands),
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a profile (the first one becomes current)
    Add { name: String },
    /// List profiles; the current one is marked
    List,
    /// Make a profile current
    Switch { id: String },
    /// Show the current profile
    Current,
}

#[derive(clap::Args)]
pub struct RecipeFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Prep time in minutes
    #[arg(long)]
    pub prep: Option<u32>,
    /// Cook time in minutes
    #[arg(long)]
    pub cook: Option<u32>,
    #[arg(long)]
    pub servings: Option<u32>,
    /// Repeatable
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// One ingredient line, e.g. "2 cups flour". Repeatable
    #[arg(long = "ingredient")]
    pub ingredients: Vec<String>,
    /// One instruction step. Repeatable
    #[arg(long = "step")]
    pub steps: Vec<String>,
    #[arg(long)]
    pub photo_url: Option<String>,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Add a recipe authored by the current user
    Add {
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// List recipes
    #[command(after_help = "\
TIME BUCKETS (prep + cook):
  quick <15, medium 15-29, long 30-59, verylong 60+

SORT KEYS:
  recent (default), rating, alphabetical, random")]
    List {
        /// Case-insensitive match on name, ingredients or author
        #[arg(long)]
        search: Option<String>,
        /// Match any of these categories. Repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        time: Option<String>,
        /// Only recipes by this user id
        #[arg(long)]
        author: Option<String>,
        #[arg(long, default_value = "recent")]
        sort: String,
    },
    /// Show a recipe with ratings, comments and photos
    Show { id: String },
    /// Change a recipe (author only). List flags replace the whole list
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Record that the recipe was cooked today
    Made { id: String },
    /// Delete a recipe (author only)
    Delete { id: String },
    /// Rate a recipe 1-5 as the current user
    Rate { id: String, rating: u8 },
    /// Comment on a recipe as the current user
    Comment { id: String, text: String },
    /// Attach a photo URL as the current user
    Photo { id: String, url: String },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the week's 21 meal slots
    Show {
        /// Any date in the week (YYYY-MM-DD)
        #[arg(long)]
        week: Option<String>,
    },
    /// Put a recipe in a slot
    Assign {
        /// YYYY-MM-DD
        date: String,
        /// breakfast, lunch or dinner
        slot: String,
        recipe_id: String,
    },
    /// Empty a slot
    Clear { date: String, slot: String },
}

#[derive(Subcommand)]
pub enum ShopCommands {
    /// Show the week's list, generating it from the plan on first use
    Show {
        #[arg(long)]
        week: Option<String>,
    },
    /// Rebuild from the plan, dropping checks and custom items
    Regenerate {
        #[arg(long)]
        week: Option<String>,
    },
    /// Check or uncheck an item
    Toggle {
        item_id: String,
        #[arg(long)]
        week: Option<String>,
    },
    /// Add a custom item
    Add {
        text: String,
        /// Aisle, e.g. produce, dairy, "Meat & Seafood" (default: Other)
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        week: Option<String>,
    },
    /// Remove an item
    Remove {
        item_id: String,
        #[arg(long)]
        week: Option<String>,
    },
    /// Drop every checked item
    ClearChecked {
        #[arg(long)]
        week: Option<String>,
    },
}
