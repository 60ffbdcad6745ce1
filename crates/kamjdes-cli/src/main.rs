mod browse;
mod groups;
mod nearby;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kamjdes_core::{load_tables_or_builtin, AppConfig, DiscoveryTables, EntityKind, SnapshotSource};
use kamjdes_discovery::{Discovery, SortStrategy};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kamjdes")]
#[command(about = "Browse Prague restaurants and bakeries by district, cuisine and distance")]
struct Cli {
    /// Entity snapshot to read (overrides `KAMJDES_SNAPSHOT_PATH`)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    /// Discovery tables YAML (overrides `KAMJDES_TABLES_PATH`)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the location and cuisine values still selectable
    Options {
        #[arg(long, default_value = "restaurant")]
        kind: EntityKind,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// List entities matching the filters
    List {
        #[arg(long, default_value = "restaurant")]
        kind: EntityKind,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, default_value = "name")]
        sort: SortStrategy,
    },
    /// Show entities grouped by district or cuisine
    Groups {
        #[arg(long, value_enum)]
        by: GroupBy,
        #[arg(long, default_value = "restaurant")]
        kind: EntityKind,
        /// Smallest group to show (defaults to `KAMJDES_GROUP_MIN_COUNT`)
        #[arg(long)]
        min_count: Option<usize>,
        #[arg(long, default_value = "rating")]
        sort: SortStrategy,
        /// Group cuisines through the category hierarchy instead of by
        /// exact label
        #[arg(long)]
        hierarchy: bool,
    },
    /// List branches within a radius of a coordinate
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in km (defaults to `KAMJDES_DEFAULT_RADIUS_KM`)
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long, default_value = "restaurant")]
        kind: EntityKind,
    },
    /// Show quick filter shortcuts with enough matches
    QuickFilters {
        #[arg(long, default_value = "3")]
        min_count: usize,
    },
    /// Validate and print the active discovery tables
    Tables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupBy {
    Location,
    Cuisine,
}

/// Everything a command handler needs once configuration is resolved.
pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) discovery: Discovery,
    pub(crate) tables: DiscoveryTables,
    pub(crate) source: SnapshotSource,
}

fn resolve_tables(cli: &Cli, config: &AppConfig) -> anyhow::Result<DiscoveryTables> {
    let tables_path = cli.tables.as_deref().or(config.tables_path.as_deref());
    let tables = load_tables_or_builtin(tables_path)?;
    tracing::debug!(
        source = %tables_path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
        "discovery tables loaded"
    );
    Ok(tables)
}

fn build_context(cli: &Cli, config: AppConfig) -> anyhow::Result<Context> {
    let tables = resolve_tables(cli, &config)?;

    let snapshot_path = cli.snapshot.as_deref().unwrap_or(&config.snapshot_path);
    let source = SnapshotSource::load(snapshot_path)?;
    tracing::info!(
        snapshot = %snapshot_path.display(),
        entities = source.len(),
        "snapshot loaded"
    );

    Ok(Context {
        discovery: Discovery::new(&tables),
        tables,
        source,
        config,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = kamjdes_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command.as_ref() else {
        println!("kamjdes: no command given; try `kamjdes --help`");
        return Ok(());
    };

    if matches!(command, Commands::Tables) {
        let tables = resolve_tables(&cli, &config)?;
        browse::print_tables(&tables);
        return Ok(());
    }

    let ctx = build_context(&cli, config)?;

    match command {
        Commands::Options {
            kind,
            cuisine,
            location,
        } => browse::run_options(&ctx, *kind, cuisine.as_deref(), location.as_deref())?,
        Commands::List {
            kind,
            cuisine,
            location,
            sort,
        } => browse::run_list(&ctx, *kind, cuisine.as_deref(), location.as_deref(), *sort)?,
        Commands::Groups {
            by,
            kind,
            min_count,
            sort,
            hierarchy,
        } => {
            let min_count = min_count.unwrap_or(ctx.config.group_min_count);
            match by {
                GroupBy::Location => groups::run_location_groups(&ctx, *kind, min_count, *sort)?,
                GroupBy::Cuisine => {
                    groups::run_cuisine_groups(&ctx, *kind, min_count, *sort, *hierarchy)?;
                }
            }
        }
        Commands::Nearby {
            lat,
            lng,
            radius,
            kind,
        } => {
            let radius = radius.unwrap_or(ctx.config.default_radius_km);
            nearby::run_nearby(&ctx, *lat, *lng, radius, *kind).await?;
        }
        Commands::QuickFilters { min_count } => browse::run_quick_filters(&ctx, *min_count)?,
        Commands::Tables => browse::print_tables(&ctx.tables),
    }

    Ok(())
}
