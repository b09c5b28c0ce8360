use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use thumbnailer::cli::CliArgs;
use thumbnailer::config::{LoadedConfig, Settings, StoreSettings};
use thumbnailer::fetch::{ContentApiClient, HttpClient};
use thumbnailer::job::{JobServices, ThumbnailJob};
use thumbnailer::lock::{self, InstanceLock};
use thumbnailer::pipeline::PipelineDriver;
use thumbnailer::scrape::default_strategies;
use thumbnailer::storage::{LocalObjectStore, ObjectStore, S3ObjectStore};
use thumbnailer::workspace::Workspace;

/// Conventional status for a run ended by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // The logger may not be initialized yet when settings fail to resolve
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    let loaded_config = match &args.config {
        Some(path) => Some(
            LoadedConfig::load(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?,
        ),
        None => None,
    };

    let settings = Settings::resolve(&args, loaded_config.as_ref(), |key| {
        std::env::var(key).ok()
    })?;

    env_logger::Builder::new()
        .filter_level(if settings.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Thumbnailer v{}", env!("CARGO_PKG_VERSION"));

    let instance_lock = InstanceLock::acquire(&settings.lock_file)?;
    let lock_path = instance_lock.path().to_path_buf();
    ctrlc::set_handler(move || {
        warn!("Interrupted, removing lock {}", lock_path.display());
        lock::release(&lock_path);
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("failed to install interrupt handler")?;

    let workspace = Workspace::prepare(&settings.workspace)?;

    let http = HttpClient::new()?;
    let api = &settings.content_api;
    let resolver = ContentApiClient::new(http.clone(), &api.base_url, &api.domain, &api.client)?;
    let store = open_store(&settings.store, &http)?;

    let services = JobServices {
        listing: Box::new(http.clone()),
        resolver: Box::new(resolver),
        downloader: Box::new(http),
        store,
    };
    let driver = PipelineDriver::new(settings.policy, settings.quality)?;

    let summary = ThumbnailJob::new(services, driver, workspace)
        .locale(&settings.locale)
        .listing_template(&settings.listing_url)
        .strategies(default_strategies(&settings.doi_prefix))
        .run(&settings.journal)?;

    info!(
        "{} articles, {} with images, {} downloaded, {} thumbnails, {} uploaded",
        summary.found, summary.resolved, summary.downloaded, summary.generated, summary.uploaded
    );

    drop(instance_lock);

    #[allow(clippy::print_stdout)]
    {
        println!("DONE");
    }

    Ok(())
}

fn open_store(settings: &StoreSettings, http: &HttpClient) -> Result<Box<dyn ObjectStore>> {
    let store: Box<dyn ObjectStore> = match settings {
        StoreSettings::Local { root, bucket } => {
            info!("Writing thumbnails under {}", root.display());
            Box::new(LocalObjectStore::new(root, bucket))
        }
        StoreSettings::S3 {
            endpoint,
            bucket,
            region,
            credentials,
        } => Box::new(S3ObjectStore::new(
            http.inner().clone(),
            endpoint,
            bucket,
            region,
            credentials.clone(),
        )?),
    };
    Ok(store)
}
