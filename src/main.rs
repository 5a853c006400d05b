use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todolist::config::{self, DatabaseArgs, ServeArgs};
use todolist::{api, service::ListService};

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Server-rendered to-do lists")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve(ServeArgs),
    /// Seed the Today list with default items if it is empty, then exit
    Seed(DatabaseArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todolist=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let addr = args.bind_addr()?;
    let db = args.database.open()?;

    let app = api::create_router(db, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("To-do list server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    init_tracing();

    if let Some(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await?,
        Some(Commands::Seed(args)) => {
            let service = ListService::new(args.open()?);
            if service.seed_today()? {
                println!("Seeded the Today list with default items.");
            } else {
                println!("The Today list already has items; nothing to do.");
            }
        }
        None => serve(cli.serve).await?,
    }

    Ok(())
}
