use clap::Parser;
use menu_finder::MenuPipeline;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(&args).await {
        ::log::error!("Menu pipeline failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), menu_finder::MenuError> {
    let config = args.pipeline_config()?;
    let pipeline = MenuPipeline::new(config)?;

    let start_time = std::time::Instant::now();
    ::log::info!("Starting menu pipeline for: {}", args.query);

    if args.raw {
        let (url, text) = pipeline.scrape_only(&args.query).await?;
        println!("{}", url);
        println!("{}", text);
    } else {
        let report = pipeline.run(&args.query).await?;
        let json = serde_json::to_string_pretty(&report.menu)
            .map_err(menu_finder::MenuError::Output)?;
        println!("{}", json);
        ::log::info!("Menu scraped from {}", report.url);
    }

    ::log::info!(
        "Pipeline complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
