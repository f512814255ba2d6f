mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scout::providers::{factory::ProviderType, groq::GROQ_MODEL};
use tracing_subscriber::EnvFilter;

use commands::ask::{self, AskOptions};
use commands::version;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the model a question, optionally grounded in web search results
    #[command(about = "Ask the model a question")]
    Ask {
        /// Messages to send; each one becomes a separate user message, in order
        #[arg(required = true, num_args = 1..)]
        messages: Vec<String>,

        /// Provider to use (groq or openai)
        #[arg(short, long, default_value_t = ProviderType::Groq)]
        provider: ProviderType,

        /// Model to use
        #[arg(short, long, default_value = GROQ_MODEL)]
        model: String,

        /// System prompt placed before the conversation
        #[arg(short, long)]
        system: Option<String>,

        /// Fold web search results for the last message into the request
        #[arg(long)]
        search: bool,

        /// Provider API key (can also be set via GROQ_API_KEY or OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Override the provider host
        #[arg(long)]
        host: Option<String>,

        /// Tavily API key (can also be set via TAVILY_API_KEY)
        #[arg(long)]
        search_api_key: Option<String>,
    },

    /// Display scout version
    #[command(about = "Display scout version")]
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so replies can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Ask {
            messages,
            provider,
            model,
            system,
            search,
            api_key,
            host,
            search_api_key,
        }) => {
            ask::execute(AskOptions {
                messages,
                provider,
                model,
                system,
                search,
                api_key,
                host,
                search_api_key,
            })
            .await
        }
        Some(Command::Version) => version::execute(),
        None => {
            println!("No command provided - Run 'scout help' to see available commands.");
            Ok(())
        }
    }
}
