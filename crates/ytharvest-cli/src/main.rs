use clap::{Parser, Subcommand};

mod ingest;
mod report;
mod show;

#[derive(Debug, Parser)]
#[command(name = "ytharvest")]
#[command(about = "Harvest YouTube channel data into a Postgres warehouse")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one channel (metadata, videos, comments) and stage the result
    Ingest {
        /// The channel id, e.g. UCxxxxxxxxxxxxxxxxxxxxxx
        channel_id: String,
    },
    /// Flatten every staged document into the three warehouse tables
    Load,
    /// Print one staged-data projection across all staged documents
    Show {
        #[arg(value_enum)]
        projection: show::Projection,
    },
    /// Run one canned analytical query against the warehouse
    Report {
        #[arg(value_enum)]
        name: report::ReportName,
        /// Publication year; only the published-in-year report uses it
        #[arg(long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ytharvest_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::info!(env = %config.env, "ytharvest starting");

    let pool = ytharvest_db::connect_pool(
        &config.database_url,
        ytharvest_db::PoolConfig::from_app_config(&config),
    )
    .await?;
    ytharvest_db::ping(&pool).await?;
    ytharvest_db::ensure_staging_schema(&pool).await?;

    match cli.command {
        Commands::Ingest { channel_id } => {
            ingest::run_ingest(&pool, &config, &channel_id).await?;
        }
        Commands::Load => {
            let counts = ytharvest_db::load_warehouse(&pool).await?;
            println!(
                "warehouse loaded: {} channels, {} videos, {} comments",
                counts.channels, counts.videos, counts.comments
            );
        }
        Commands::Show { projection } => show::run_show(&pool, projection).await?,
        Commands::Report { name, year } => report::run_report(&pool, name, year).await?,
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
