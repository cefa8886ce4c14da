//! CLI entrypoint for nutrichat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use nutrichat_application::{
    BrowseCatalogUseCase, ConversationLogger, FoodAssistantUseCase, NoConversationLogger,
    NutritionApi, RecommendInput, RecommendUseCase, StreamController,
};
use nutrichat_domain::{BmiRequest, CatalogQuery, NutritionRequest};
use nutrichat_infrastructure::{
    ConfigLoader, FileConfig, HttpNutritionApi, JsonlConversationLogger, SseChatTransport,
};
use nutrichat_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, JsonFormatter, OutputConfig, OutputFormat,
    OutputFormatter, RecommendCommand, ReplConfig,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.log.dir.as_deref());

    info!("Starting nutrichat against {}", config.api.base_url);

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    OutputConfig {
        color: config.output.color,
    }
    .apply();

    // === Dependency Injection ===
    let api = Arc::new(HttpNutritionApi::new(
        config.api.base_url.clone(),
        config.api.request_timeout(),
    )?);

    let formatter: Box<dyn OutputFormatter> = match cli.output {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    match cli.command_or_default() {
        Command::Chat { food } => run_chat(&cli, &config, api, food).await,
        Command::Recipe { food } => {
            let assistant = FoodAssistantUseCase::new(api).with_behavior(config.chat.to_behavior());
            let text = assistant.recipe(&food).await;
            println!("{}", formatter.format_food_text(&food, "Resep", &text));
            Ok(())
        }
        Command::Describe { food } => {
            let assistant = FoodAssistantUseCase::new(api).with_behavior(config.chat.to_behavior());
            let text = assistant.describe(&food).await;
            println!("{}", formatter.format_food_text(&food, "Deskripsi", &text));
            Ok(())
        }
        Command::Foods(args) => {
            let mut catalog = BrowseCatalogUseCase::new(api)
                .with_page_size(config.catalog.page_size)
                .load()
                .await?;
            catalog.set_query(
                CatalogQuery::new()
                    .with_food_type(args.food_type.into())
                    .with_search(args.search),
            );
            catalog.go_to(args.page);
            println!("{}", formatter.format_catalog(&catalog.page(), catalog.query()));
            Ok(())
        }
        Command::Recommend(command) => {
            let input = match command {
                RecommendCommand::Bmi {
                    weight,
                    height,
                    meal_time,
                } => RecommendInput::Bmi(BmiRequest {
                    weight,
                    height,
                    meal_time,
                }),
                RecommendCommand::Nutrition {
                    calories,
                    proteins,
                    fat,
                    carbohydrate,
                    meal_time,
                } => RecommendInput::Nutrition(NutritionRequest {
                    calories,
                    proteins,
                    fat,
                    carbohydrate,
                    meal_time,
                }),
            };
            let recommendation = RecommendUseCase::new(api).execute(input).await?;
            println!("{}", formatter.format_recommendation(&recommendation));
            Ok(())
        }
        Command::Health => {
            let health = api.health().await?;
            println!("{}", formatter.format_health(&health));
            if !health.is_healthy() {
                bail!("Service reported status '{}'", health.status);
            }
            Ok(())
        }
    }
}

async fn run_chat(
    cli: &Cli,
    config: &FileConfig,
    api: Arc<HttpNutritionApi>,
    food: Option<String>,
) -> Result<()> {
    let transport = Arc::new(SseChatTransport::new(
        config.api.base_url.clone(),
        config.api.stream_idle_timeout(),
    )?);

    let conversation_logger: Arc<dyn ConversationLogger> = match config
        .log
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let behavior = config.chat.to_behavior();
    let controller = StreamController::new(transport)
        .with_behavior(behavior.clone())
        .with_conversation_logger(conversation_logger);
    let assistant = FoodAssistantUseCase::new(api).with_behavior(behavior);

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.clone(),
    };

    let mut repl = ChatRepl::new(controller, assistant)
        .with_progress(repl_config.show_progress)
        .with_history_file(repl_config.history_path());

    if let Some(food) = food {
        repl.open_recipe(&food).await;
    }

    repl.run().await.map_err(|e| anyhow!("Chat failed: {}", e))
}

/// Set up tracing: stderr always, plus a daily log file when `log_dir` is set.
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "nutrichat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(stderr_layer)
                .init();
            None
        }
    }
}
