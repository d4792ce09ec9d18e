//! Release Linker Entry Point
//!
//! Links every issue referenced in commits since the previous release tag to
//! a Jira release ticket.

use clap::Parser;
use release_linker::config::{TerminalPrompt, PASSWORD_ENV, USER_ENV};
use release_linker::{Credentials, GitExecutor, LinkerError, LinkerResult, LinkerSettings};
use release_linker_tracker::{IssueTracker, JiraClient, TrackerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "release-linker")]
#[command(about = "Link issues referenced since the previous tag to a Jira release ticket")]
#[command(version)]
struct Args {
    /// Release tag; commits since the tag before it are scanned
    #[arg(long, short)]
    tag: String,

    /// Release ticket that receives the links (e.g. REL-100)
    #[arg(long, short)]
    release_ticket: String,

    /// Path of the git repository
    #[arg(long, short)]
    path: PathBuf,

    /// Jira user name
    #[arg(long, env = USER_ENV)]
    jira_user: Option<String>,

    /// Jira password
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    jira_pass: Option<String>,

    /// Report the issues that would be linked without linking them
    #[arg(long)]
    dry: bool,

    /// Jira base URL
    #[arg(long, env = "JIRA_URL", default_value = "https://jira.hybris.com")]
    jira_url: String,

    /// Jira REST API version
    #[arg(long, default_value = release_linker_tracker::config::DEFAULT_API_VERSION)]
    api_version: String,

    /// Name of the link type to create
    #[arg(long, default_value = release_linker::dispatch::DEFAULT_LINK_TYPE)]
    link_type: String,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print the link types the server knows and exit
    #[arg(long)]
    list_link_types: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "release_linker=info,release_linker_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = start(args).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn start(args: Args) -> LinkerResult<()> {
    let release_ticket = LinkerSettings::parse_release_ticket(&args.release_ticket)?;

    let credentials = Credentials::resolve(args.jira_user, args.jira_pass, &mut TerminalPrompt)?;

    let tracker_config =
        TrackerConfig::new(&args.jira_url, credentials.username, credentials.password)
            .with_api_version(args.api_version)
            .with_accept_invalid_certs(args.insecure)
            .with_timeout(Duration::from_secs(args.timeout_secs));
    let client =
        JiraClient::new(tracker_config).map_err(|e| LinkerError::Config(e.to_string()))?;
    tracing::info!(
        "Tracker: {} as {}",
        client.config().base_url,
        client.config().username
    );

    if args.list_link_types {
        let types = client
            .link_types()
            .await
            .map_err(LinkerError::RemoteFetch)?;
        for name in types {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut settings = LinkerSettings::new(args.tag, release_ticket, args.path);
    settings.link_type = args.link_type;
    settings.dry_run = args.dry;

    tracing::info!("Repository: {:?}", settings.repo_path);
    let history = GitExecutor::new(&settings.repo_path)?;
    let tracker: Arc<dyn IssueTracker> = Arc::new(client);

    let summary = release_linker::run(&history, tracker, &settings).await?;

    for result in &summary.report.results {
        if let release_linker::LinkOutcome::Failed(e) = &result.outcome {
            tracing::warn!("{} was not linked: {}", result.key, e);
        }
    }

    Ok(())
}
