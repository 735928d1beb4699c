//! One-shot graph build for the `build` command.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::AsyncWriteExt;

use wikigraph_core::graph::export;
use wikigraph_core::{Config, GraphBuilder, Identity};

/// Where and how to write the result.
pub struct BuildOptions {
    pub identity: Identity,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// Build the graph once and write it to stdout or a file.
pub async fn run(config: &Config, options: BuildOptions) -> color_eyre::Result<()> {
    let builder = GraphBuilder::from_config(config).wrap_err("failed to set up graph builder")?;

    // Only show progress when stdout is not the JSON sink
    let spinner = options.output.as_ref().map(|_| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Scanning {}", config.corpus.data_dir));
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    });

    let (graph, stats) = builder
        .build_with_stats(&options.identity)
        .await
        .wrap_err("graph build failed")?;

    match &options.output {
        Some(path) => {
            export::write_json(&graph, path, options.pretty)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let mut bytes = if options.pretty {
                export::to_json_pretty(&graph)?.into_bytes()
            } else {
                export::to_json(&graph)?
            };
            bytes.push(b'\n');
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&bytes).await?;
            stdout.flush().await?;
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "Built graph: {} pages, {} edges ({} from tags), {} namespaces in {} ms",
            stats.pages, stats.edges, stats.tag_edges, stats.namespaces, stats.elapsed_ms
        ));
    }

    Ok(())
}
