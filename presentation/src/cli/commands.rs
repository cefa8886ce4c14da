//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use nutrichat_domain::{FoodType, FoodTypeFilter, MealTime};
use std::path::PathBuf;

/// Output format for one-shot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// Raw JSON
    Json,
}

/// Food type filter for the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FoodTypeArg {
    #[default]
    All,
    /// Makanan Ringan (300 kcal or less)
    Light,
    /// Makanan Berat (more than 300 kcal)
    Heavy,
}

impl From<FoodTypeArg> for FoodTypeFilter {
    fn from(arg: FoodTypeArg) -> Self {
        match arg {
            FoodTypeArg::All => FoodTypeFilter::All,
            FoodTypeArg::Light => FoodTypeFilter::Only(FoodType::Light),
            FoodTypeArg::Heavy => FoodTypeFilter::Only(FoodType::Heavy),
        }
    }
}

/// CLI arguments for nutrichat
#[derive(Parser, Debug)]
#[command(name = "nutrichat")]
#[command(author, version, about = "Chat with a cooking assistant and explore Indonesian foods")]
#[command(long_about = r#"
nutrichat talks to a nutrition recommendation service. Ask the cooking
assistant questions and watch the answer stream in, browse the food
catalog, or get meal recommendations from your body measurements.

Configuration files are loaded from (in priority order):
1. NUTRICHAT_* environment variables (e.g. NUTRICHAT_API__BASE_URL)
2. --config <path>     Explicit config file
3. ./nutrichat.toml    Project-level config
4. ~/.config/nutrichat/config.toml   Global config

Example:
  nutrichat chat
  nutrichat chat --food "Nasi Goreng"
  nutrichat foods --type heavy --search ayam --page 2
  nutrichat recommend bmi --weight 60 --height 165 --meal-time pagi
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override the service base URL (e.g. http://127.0.0.1:5000/api)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Output format for one-shot commands
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The command to run; interactive chat when none is given.
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { food: None })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the interactive chat
    Chat {
        /// Open the conversation with the recipe of this food
        #[arg(long, value_name = "NAME")]
        food: Option<String>,
    },

    /// Print the recipe of a food
    Recipe {
        /// Food name as listed in the catalog
        food: String,
    },

    /// Print the description of a food
    Describe {
        /// Food name as listed in the catalog
        food: String,
    },

    /// Browse the food catalog
    Foods(FoodsArgs),

    /// Get meal recommendations
    #[command(subcommand)]
    Recommend(RecommendCommand),

    /// Check that the service is reachable
    Health,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct FoodsArgs {
    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show one food type
    #[arg(short = 't', long = "type", value_enum, default_value = "all")]
    pub food_type: FoodTypeArg,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RecommendCommand {
    /// Recommend from weight and height
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Height in centimeters
        #[arg(long)]
        height: f64,
        /// Meal time: pagi, siang or malam
        #[arg(long, default_value = "siang")]
        meal_time: MealTime,
    },

    /// Recommend from nutrition targets
    Nutrition {
        #[arg(long)]
        calories: f64,
        #[arg(long)]
        proteins: f64,
        #[arg(long)]
        fat: f64,
        #[arg(long)]
        carbohydrate: f64,
        /// Meal time: pagi, siang or malam
        #[arg(long, default_value = "siang")]
        meal_time: MealTime,
    },
}
