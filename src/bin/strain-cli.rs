use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use strain_client::{
    Config, DEFAULT_BASE_URL, LocationParams, PageParams, SearchFilters, SearchParams,
    StrainClient, operations,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "strain-cli",
    version,
    about = "Small async CLI for querying the strain API"
)]
struct Cli {
    /// Base URL for the API.
    #[arg(long, env = "STRAIN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Application id sent in the `app_id` header.
    #[arg(long, env = "STRAIN_APP_ID")]
    app_id: Option<String>,

    /// Application key sent in the `app_key` header.
    #[arg(long, env = "STRAIN_APP_KEY", hide_env_values = true)]
    app_key: Option<String>,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the remote operations this client can call.
    Operations {
        /// Filter operations by substring match on operation id.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Search strains by name, flavor and condition.
    Search(SearchArgs),
    /// Show one strain.
    Details { slug: String },
    /// List reviews of a strain.
    Reviews {
        slug: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// Show one review of a strain.
    Review { slug: String, review_id: u64 },
    /// List photos of a strain.
    Photos {
        slug: String,
        #[command(flatten)]
        paging: PagingArgs,
    },
    /// List locations carrying a strain near a coordinate.
    Availabilities {
        slug: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search term; empty matches every strain.
    #[arg(default_value = "")]
    search: String,

    #[command(flatten)]
    paging: PagingArgs,

    /// Flavor name filter. Repeat as needed.
    #[arg(long = "flavor", value_name = "NAME")]
    flavors: Vec<String>,

    /// Condition name filter. Repeat as needed.
    #[arg(long = "condition", value_name = "NAME")]
    conditions: Vec<String>,
}

#[derive(Debug, Args)]
struct PagingArgs {
    /// Zero-based page index.
    #[arg(long)]
    page: Option<u32>,

    /// Page size.
    #[arg(long)]
    take: Option<u32>,
}

impl PagingArgs {
    fn to_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            take: self.take,
        }
    }
}

/// Entry point for the async CLI.
///
/// Parses command-line arguments, builds a client from the credentials,
/// dispatches subcommands, and prints JSON output.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // `operations` is metadata-only; it does not require credentials.
    if let Command::Operations { filter } = &cli.command {
        print_operations(filter.as_deref());
        return Ok(());
    }

    let client = build_client(&cli)?;
    let compact = cli.compact;

    match &cli.command {
        Command::Operations { .. } => unreachable!("handled above"),
        Command::Search(args) => {
            let result = client
                .search(&search_params(args))
                .await
                .context("strain search failed")?;
            print_json(&result, compact)
        }
        Command::Details { slug } => {
            let details = client
                .details(slug)
                .await
                .with_context(|| format!("failed to fetch strain '{slug}'"))?;
            print_json(&details, compact)
        }
        Command::Reviews { slug, paging } => {
            let page = client
                .reviews(slug, paging.to_params())
                .await
                .with_context(|| format!("failed to list reviews of '{slug}'"))?;
            print_json(&page, compact)
        }
        Command::Review { slug, review_id } => {
            let review = client
                .review_details(slug, *review_id)
                .await
                .with_context(|| format!("failed to fetch review {review_id} of '{slug}'"))?;
            print_json(&review, compact)
        }
        Command::Photos { slug, paging } => {
            let page = client
                .photos(slug, paging.to_params())
                .await
                .with_context(|| format!("failed to list photos of '{slug}'"))?;
            print_json(&page, compact)
        }
        Command::Availabilities { slug, lat, lon } => {
            let params = LocationParams {
                lat: *lat,
                lon: *lon,
            };
            let list = client
                .availabilities(slug, params)
                .await
                .with_context(|| format!("failed to list availabilities of '{slug}'"))?;
            print_json(&list, compact)
        }
    }
}

fn build_client(cli: &Cli) -> Result<StrainClient> {
    let (Some(app_id), Some(app_key)) = (&cli.app_id, &cli.app_key) else {
        bail!("credentials required: set --app-id/--app-key or STRAIN_APP_ID/STRAIN_APP_KEY");
    };
    let config = Config::new(app_id, app_key).with_base_url(&cli.base_url);
    StrainClient::new(config)
        .with_context(|| format!("failed to create client with base URL '{}'", cli.base_url))
}

fn search_params(args: &SearchArgs) -> SearchParams {
    let mut params = SearchParams::new(&args.search);
    params.page = args.paging.page;
    params.take = args.paging.take;

    if !args.flavors.is_empty() || !args.conditions.is_empty() {
        let mut filters = SearchFilters::default();
        if !args.flavors.is_empty() {
            filters = filters.flavors(&args.flavors);
        }
        if !args.conditions.is_empty() {
            filters = filters.conditions(&args.conditions);
        }
        params = params.filters(filters);
    }
    params
}

/// Prints the operation catalog.
///
/// When `filter` is provided, only operation ids containing that substring are shown.
fn print_operations(filter: Option<&str>) {
    let filter = filter.map(str::to_ascii_lowercase);

    let operations: Vec<_> = operations()
        .iter()
        .filter(|operation| {
            filter
                .as_ref()
                .is_none_or(|needle| operation.operation_id.contains(needle.as_str()))
        })
        .collect();

    let (operation_id_width, method_width) =
        operations
            .iter()
            .fold((0usize, 0usize), |(id_max, method_max), operation| {
                (
                    id_max.max(operation.operation_id.len()),
                    method_max.max(operation.method.len()),
                )
            });

    for operation in operations {
        println!(
            "{:<operation_id_width$}  {:<method_width$}  {}",
            operation.operation_id, operation.method, operation.path_template
        );
    }
}

/// Prints a record either compact or pretty-formatted.
fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
