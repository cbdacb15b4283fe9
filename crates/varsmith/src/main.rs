use anyhow::{Context, Result};
use clap::Parser;
use varsmith::{init_logging, render_summary, run_snapshot, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let report = run_snapshot(&cli.snapshot, &config)
        .await
        .with_context(|| format!("exporting {}", cli.snapshot.display()))?;

    let use_color = console::Term::stdout().features().colors_supported();
    print!("{}", render_summary(&report, use_color));
    Ok(())
}
