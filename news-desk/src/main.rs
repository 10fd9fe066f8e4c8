use clap::Parser;
use news_desk::publisher::DEFAULT_POST_DELAY;
use news_desk::sources::rss_sources;
use news_desk::{
    AnalysisConfig, Analyst, Curator, DeskConfig, DraftArchive, HeadlineSource, NewsDesk, NewsStore,
    OpenRouterAdapter, Publisher, PublisherConfig, RunSettings, XClient,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// News desk bot - picks the top market story, writes a desk note, posts it to X
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Opts {
    /// Fetch window in hours (defaults to SCAN_INTERVAL_HOURS)
    #[arg(long)]
    hours: Option<u32>,

    /// Skip the startup connection checks
    #[arg(long)]
    skip_test: bool,

    /// Actually post; without this the draft is only previewed
    #[arg(long)]
    live: bool,

    /// Only consider headlines containing this keyword
    #[arg(long)]
    topic: Option<String>,

    /// Publish the saved latest draft again, without fetching
    #[arg(long)]
    retry_post: bool,

    /// File whose contents anchor the analysis
    #[arg(long)]
    context_file: Option<PathBuf>,

    /// Print the N most recent posted stories and exit
    #[arg(long, value_name = "N")]
    history: Option<usize>,
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging();

    match run(opts).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(opts: Opts) -> anyhow::Result<ExitCode> {
    let config = DeskConfig::from_env()?;
    let window_hours = opts.hours.unwrap_or(config.scan_interval_hours);

    info!(
        "News desk starting: {} feeds, {}h window, {}",
        config.feeds.len(),
        window_hours,
        if opts.live { "LIVE" } else { "dry run" }
    );

    let store = NewsStore::open(&config.db_path).await?;

    if let Some(limit) = opts.history {
        print_history(&store, limit).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let override_context = match &opts.context_file {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            info!("Using context from {} ({} chars)", path.display(), text.chars().count());
            Some(text)
        }
        None => None,
    };

    let http = reqwest::Client::builder().user_agent(config.fetch.user_agent.clone()).build()?;
    let llm = Arc::new(OpenRouterAdapter::new(http.clone(), config.llm.clone()));
    let channel = Arc::new(XClient::new(http, config.x.clone()));

    let mut settings = RunSettings::new(window_hours);
    settings.topic = opts.topic.clone();
    settings.override_context = override_context;

    let mut desk = NewsDesk::new(
        HeadlineSource::new(rss_sources(&config.feeds, config.fetch.clone())?),
        Curator::new(llm.clone()),
        Analyst::new(llm, AnalysisConfig::default()),
        Publisher::new(
            channel,
            PublisherConfig {
                dry_run: !opts.live,
                post_delay: DEFAULT_POST_DELAY,
            },
        ),
        store,
        DraftArchive::new(&config.draft_path, &config.archive_path),
        settings,
    );

    if !opts.skip_test && !desk.test_apis().await {
        error!("Connection test failed");
        return Ok(ExitCode::FAILURE);
    }

    if opts.retry_post {
        return Ok(match desk.retry_last_draft().await? {
            Some(true) => ExitCode::SUCCESS,
            Some(false) => {
                error!("Retry failed, draft kept at {}", desk.drafts().latest_path().display());
                ExitCode::SUCCESS
            }
            None => {
                error!("No saved draft at {}", desk.drafts().latest_path().display());
                ExitCode::FAILURE
            }
        });
    }

    desk.run_cycle().await;
    Ok(ExitCode::SUCCESS)
}

async fn print_history(store: &NewsStore, limit: usize) -> anyhow::Result<()> {
    let posts = store.recent_posts(limit).await?;
    println!("{} stories recorded, showing {}", store.posted_count().await?, posts.len());
    for post in posts {
        println!(
            "{}  {}  ({})",
            post.posted_at.format("%Y-%m-%d %H:%M"),
            post.title,
            post.source
        );
    }
    Ok(())
}
