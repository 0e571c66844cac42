use asset_sync::cli::Cli;
use asset_sync::config::Config;
use asset_sync::core::{get_debug_logger, ProxyAddress, ProxySelector};
use asset_sync::error::SyncError;
use asset_sync::release::{run, GitCli, GitHubClient};
use std::time::Instant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    if cli.init {
        Config::init()?;
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        let warnings = config.proxy_warnings();
        if !warnings.is_empty() {
            return Err(SyncError::InvalidConfig(warnings.join("; ")).into());
        }
        println!("✓ Configuration valid");
        return Ok(());
    }

    config.check()?;
    for warning in config.proxy_warnings() {
        eprintln!("Warning: {}", warning);
    }

    let debug_logger = get_debug_logger();

    let start = Instant::now();
    let proxy = select_proxy(&config).await?;
    debug_logger.performance_sync(
        "ProxySelector",
        "proxy_selection",
        start.elapsed().as_millis() as u64,
    );
    match &proxy {
        Some(proxy) => println!("Using proxy: {}", proxy.redacted()),
        None => println!("No usable proxy found, connecting directly"),
    }

    let api = GitHubClient::new(proxy.as_ref(), &config.http)?;
    let git = GitCli::new(config.resolved_git_dir(), &config.remote, &config.branch);

    if let Err(e) = run(&config, cli.only.as_deref(), &api, &git) {
        debug_logger.error_sync("ComponentSync", "run_aborted", &e.to_string());
        return Err(e.into());
    }

    println!("--- All checks complete ---");
    Ok(())
}

async fn select_proxy(config: &Config) -> Result<Option<ProxyAddress>, Box<dyn std::error::Error>> {
    if !config.proxy.enabled {
        return Ok(None);
    }

    let selector = ProxySelector::new()?.with_options(config.probe_options());
    Ok(selector
        .select(&config.proxy.preferred, &config.proxy.candidates)
        .await)
}
