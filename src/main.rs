use anyhow::{Context, Result};
use clap::Parser;
use model_metrics_plot::utils::io;
use model_metrics_plot::{plot_all_metrics, DisplayMode, Histories, PlotConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plot accuracy and loss curves of trained models side by side
#[derive(Parser, Debug)]
#[command(name = "model-metrics-plot", version, about)]
struct Cli {
    /// Existing directory to write models_accuracy_loss_plot.png into
    #[arg(short, long)]
    save_dir: PathBuf,

    /// JSON file mapping model names to histories
    #[arg(long)]
    histories: Option<PathBuf>,

    /// Single history as NAME=PATH (Keras CSV log or JSON record); repeatable
    #[arg(short, long = "model", value_name = "NAME=PATH", value_parser = parse_model_arg)]
    models: Vec<(String, PathBuf)>,

    /// TOML file with plot settings
    #[arg(short, long, env = "MODEL_METRICS_PLOT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// When to open the saved image
    #[arg(long, value_enum)]
    display: Option<DisplayMode>,
}

fn parse_model_arg(arg: &str) -> std::result::Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{arg}`")),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(display) = cli.display {
        config.display = display;
    }

    let mut histories = match &cli.histories {
        Some(path) => io::load_histories(path)
            .with_context(|| format!("Failed to load histories {}", path.display()))?,
        None => Histories::new(),
    };
    for (name, path) in &cli.models {
        let history = io::load_history(name, path)
            .with_context(|| format!("Failed to load history of {name} from {}", path.display()))?;
        histories.insert(name.clone(), history);
    }

    let names: Vec<&str> = histories.names().collect();
    info!(models = ?names, "Plotting model metrics");
    let output = plot_all_metrics(&cli.save_dir, &histories, &config)?;
    println!("{}", output.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_model_args_keep_order() {
        let cli = Cli::try_parse_from([
            "model-metrics-plot",
            "--save-dir",
            "out",
            "-m",
            "cnn=logs/cnn.csv",
            "--model",
            "mlp=logs/mlp.json",
            "--display",
            "never",
        ])
        .unwrap();

        let names: Vec<_> = cli.models.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["cnn", "mlp"]);
        assert_eq!(cli.display, Some(DisplayMode::Never));
    }

    #[test]
    fn test_bad_model_arg() {
        assert!(parse_model_arg("no-separator").is_err());
        assert!(parse_model_arg("=path.csv").is_err());
        assert_eq!(
            parse_model_arg("a=b=c.csv").unwrap(),
            ("a".to_string(), PathBuf::from("b=c.csv"))
        );
    }
}
