use std::process::ExitCode;

use chesssim_tools::config::FetchConfig;
use chesssim_tools::fetch::{self, FetchTask, Fetcher};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cfg = FetchConfig::load()?;
    let task = FetchTask::from_config(&cfg.fetch);
    let fetcher = Fetcher::from_config(&cfg.fetch)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if runtime.block_on(fetch::fetch_and_save(&fetcher, &task)) {
        println!("\n🎉 Stockfish downloaded successfully!");
        println!(
            "You can now use './{}' as a local worker",
            task.destination.display()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!("\n❌ Failed to download Stockfish");
        Ok(ExitCode::FAILURE)
    }
}
