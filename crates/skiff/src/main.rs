//! skiff - deploy and manage apps on skiff clusters.
//!
//! Apps deploy with `git push`; this CLI keeps the cluster registry,
//! figures out which app a repository belongs to, and answers git's
//! credential requests for cluster endpoints.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skiff_cmd::factory::Factory;

/// Process exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
}

/// skiff CLI - work with skiff clusters from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "skiff",
    version,
    about = "Deploy and manage apps on skiff clusters",
    long_about = "Work with skiff clusters from the command line: register clusters, \
                  resolve which app a repository deploys to, and serve git credentials \
                  for cluster endpoints."
)]
struct Cli {
    /// App name to use instead of resolving one from git remotes.
    #[arg(short, long, global = true, value_name = "APP")]
    app: Option<String>,

    /// Only match remotes against this registered cluster.
    #[arg(short, long, global = true, value_name = "CLUSTER")]
    cluster: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show which app the current repository belongs to.
    App(skiff_cmd::app::AppArgs),
    /// Manage registered clusters.
    #[command(subcommand)]
    Cluster(skiff_cmd::cluster::ClusterCommand),
    /// Answer git credential requests (invoked by git, not by hand).
    #[command(name = "git-credentials", hide = true)]
    GitCredentials(skiff_cmd::git_credentials::GitCredentialsArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries command output and, for the
    // credential helper, the protocol response git reads.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SKIFF_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut factory = Factory::new();
    if let Some(app) = cli.app {
        factory = factory.with_app_override(app);
    }
    if let Some(cluster) = cli.cluster {
        factory = factory.with_cluster_filter(cluster);
    }

    let exit_code = if let Some(cmd) = cli.command {
        match run_command(cmd, &factory).await {
            Ok(()) => exit_codes::OK,
            Err(e) => {
                tracing::error!("{e:#}");
                exit_codes::ERROR
            }
        }
    } else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        exit_codes::OK
    };

    std::process::exit(exit_code);
}

async fn run_command(cmd: Commands, factory: &Factory) -> anyhow::Result<()> {
    match cmd {
        Commands::App(args) => args.run(factory).await,
        Commands::Cluster(sub) => sub.run(factory).await,
        Commands::GitCredentials(args) => args.run(factory),
    }
}
