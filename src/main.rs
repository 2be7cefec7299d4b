use wasfah::api;
use wasfah::commands::CommandHandler;
use wasfah::config::SearchConfig;
use wasfah::database::Database;
use wasfah::providers::create_provider;
use wasfah::providers::traits::CompletionProvider;
use wasfah::recipes::prompt::CHEF_SYSTEM_PROMPT;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tokio::net::TcpListener;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    api_key: Option<String>,

    /// deepseek, openai or openrouter
    #[arg(long, default_value = "deepseek")]
    provider: String,

    /// SQLite file for saved recipes and the pantry
    #[arg(long)]
    db: Option<String>,

    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args = Args::parse();

    let mut config = SearchConfig::from_env();
    if let Some(path) = &args.db {
        config.db_path = path.clone();
    }

    if args.api {
        run_api_server(&args, config).await
    } else {
        run_cli_mode(&args, config).await
    }
}

/// `--api-key`, then `{PROVIDER}_API_KEY`, then `API_KEY`.
fn resolve_api_key(args: &Args) -> Result<String, BoxError> {
    if let Some(key) = &args.api_key {
        return Ok(key.clone());
    }
    let provider_var = format!("{}_API_KEY", args.provider.to_uppercase());
    env::var(&provider_var)
        .or_else(|_| env::var("API_KEY"))
        .map_err(|_| format!("API key must be provided via --api-key, {} or API_KEY", provider_var).into())
}

async fn build_provider(args: &Args) -> Result<Box<dyn CompletionProvider + Send + Sync>, BoxError> {
    let api_key = resolve_api_key(args)?;
    let provider = create_provider(&args.provider, api_key, CHEF_SYSTEM_PROMPT.to_string()).await?;
    info!("Using {} provider", provider.name());
    Ok(provider)
}

async fn run_cli_mode(args: &Args, config: SearchConfig) -> Result<(), BoxError> {
    let provider = build_provider(args).await?;
    let db = Arc::new(Database::new(&config.db_path).await?);

    let mut command_handler = CommandHandler::new(provider, db, config);

    // Show initial help menu
    command_handler.handle_command("help").await?;

    // Initialize rustyline editor
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    // Main input loop
    loop {
        let prompt = if command_handler.is_cooking() { "👩‍🍳 " } else { "🥘 " };
        match rl.readline(prompt) {
            Ok(line) => {
                let input = line.trim();
                let _ = rl.add_history_entry(input);

                if let Err(e) = command_handler.handle_command(input).await {
                    println!("{}", e.red());
                }
                if command_handler.is_exiting() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(args: &Args, config: SearchConfig) -> Result<(), BoxError> {
    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;

    let provider = build_provider(args).await?;
    let db = Arc::new(Database::new(&config.db_path).await?);

    let app = api::create_api(provider, db, config);

    let listener = TcpListener::bind(&addr).await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    info!("Server successfully bound to {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
