mod bootstrap;
mod session;

use clap::{Parser, Subcommand};
use dnsprobe_application::ports::{DiscoverySession, EventDispatcher, PersistenceQueue};
use dnsprobe_application::use_cases::RequestContext;
use dnsprobe_application::ResolverContext;
use dnsprobe_domain::{CliOverrides, DomainError, ExtractedAnswer, RecordType};
use dnsprobe_infrastructure::{ContextBuilder, SerialWorkQueue};
use session::{InMemoryAssetStore, InMemorySession, LoggingDispatcher};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dnsprobe")]
#[command(version, about = "DNS resolution core for asset discovery")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level or env-filter directive
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Override the public resolver list URL
    #[arg(long, global = true)]
    public_list_url: Option<String>,

    /// Do not start the guess pipeline
    #[arg(long, global = true)]
    no_guess: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a name and print the answers of the requested type
    Query {
        name: String,

        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,

        /// Use the untrusted public pool instead of the trusted one
        #[arg(long)]
        untrusted: bool,
    },
    /// Speculatively resolve candidate names on the untrusted pool
    Guess {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Build both pools and print their sizes
    Pools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        public_list_url: cli.public_list_url.clone(),
        disable_guessing: cli.no_guess,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!(
        attempts = config.resolvers.attempts,
        public_list_url = %config.resolvers.public_list_url,
        min_reliability = config.resolvers.min_reliability,
        guessing = config.guess.enabled,
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            signal_token.cancel();
        }
    });

    let ctx = ContextBuilder::new(&config).build(shutdown.clone()).await?;

    let result = match cli.command {
        Command::Query {
            name,
            record_type,
            untrusted,
        } => run_query(&ctx, &name, record_type, untrusted).await,
        Command::Guess { names } => run_guess(&ctx, names, shutdown.clone()).await,
        Command::Pools => {
            println!("trusted\t{}", ctx.trusted_count());
            println!("untrusted\t{}", ctx.untrusted_count());
            println!("guessing\t{}", ctx.guessing_enabled());
            Ok(())
        }
    };

    shutdown.cancel();
    result
}

async fn run_query(
    ctx: &ResolverContext,
    name: &str,
    record_type: RecordType,
    untrusted: bool,
) -> anyhow::Result<()> {
    let result = if untrusted {
        ctx.query_untrusted(name, record_type).await
    } else {
        ctx.query(name, record_type).await
    };

    match result {
        Ok(answers) if answers.is_empty() => {
            eprintln!("{name}: no {record_type} answers");
            Ok(())
        }
        Ok(answers) => {
            print_answers(&answers);
            Ok(())
        }
        Err(DomainError::NameDoesNotExist) => {
            eprintln!("{name}: NXDOMAIN");
            Ok(())
        }
        Err(DomainError::NoRecordOfType) => {
            eprintln!("{name}: no {record_type} records");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_answers(answers: &[ExtractedAnswer]) {
    for answer in answers {
        println!("{}\t{}\t{}", answer.name, answer.record_type, answer.data);
    }
}

async fn run_guess(
    ctx: &ResolverContext,
    names: Vec<String>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    if !ctx.guessing_enabled() {
        warn!("Guessing is disabled or no untrusted resolvers are available");
        return Ok(());
    }

    let queue = Arc::new(SerialWorkQueue::start(shutdown.child_token()));
    let store = Arc::new(InMemoryAssetStore::default());
    let session: Arc<dyn DiscoverySession> = Arc::new(InMemorySession::new(
        "cli",
        shutdown.clone(),
        Arc::clone(&store),
        Arc::clone(&queue) as Arc<dyn PersistenceQueue>,
    ));
    let dispatcher: Arc<dyn EventDispatcher> = Arc::new(LoggingDispatcher);

    for name in &names {
        ctx.submit_guess(
            RequestContext::new(Arc::clone(&session), Arc::clone(&dispatcher)),
            name,
        );
    }

    tokio::select! {
        _ = ctx.wait_for_guesses() => {}
        _ = shutdown.cancelled() => {}
    }
    queue.flush().await;

    let found = store.names();
    info!(submitted = names.len(), discovered = found.len(), "Guessing finished");
    for name in found {
        println!("{name}");
    }
    Ok(())
}
