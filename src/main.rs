use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use speedtest_compare::data::loader::{extract_from_file, read_lossy};
use speedtest_compare::data::summary::{render_summary, summarize_text};
use speedtest_compare::export::{to_json, write_csv_file};
use speedtest_compare::plot::plot_html::{format_mean, write_html};
use speedtest_compare::plot::table::{series_table, summary_table};
use speedtest_compare::{ChartMode, MetricKind, Session, SessionConfig, SessionEvent, Side};

/// Compare SpeedTestSKT AvgResult metrics (ping, uplink TP, downlink TP) between two captures.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract one metric from a raw log and print it as summary text
    Extract {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = MetricArg::Ping)]
        metric: MetricArg,
        /// Also write the matched records as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Parse a pasted summary block and print its samples and mean
    Summarize {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = MetricArg::Ping)]
        metric: MetricArg,
    },
    /// Compare side A against side B
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
struct CompareArgs {
    a: PathBuf,
    b: PathBuf,
    /// Treat A as pasted summary text instead of a raw log
    #[arg(long)]
    a_pasted: bool,
    /// Treat B as pasted summary text instead of a raw log
    #[arg(long)]
    b_pasted: bool,
    /// TOML file with `metric` and `chart_mode`
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Write the chart as a standalone HTML page
    #[arg(long)]
    html: Option<PathBuf>,
    /// Write the comparison as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long)]
    csv_a: Option<PathBuf>,
    #[arg(long)]
    csv_b: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MetricArg {
    Ping,
    #[value(alias = "ul")]
    Uplink,
    #[value(alias = "dl")]
    Downlink,
}

impl From<MetricArg> for MetricKind {
    fn from(v: MetricArg) -> Self {
        match v {
            MetricArg::Ping => MetricKind::Ping,
            MetricArg::Uplink => MetricKind::UplinkThroughput,
            MetricArg::Downlink => MetricKind::DownlinkThroughput,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    #[value(alias = "magnitude")]
    Mean,
    Series,
}

impl From<ModeArg> for ChartMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Mean => ChartMode::Magnitude,
            ModeArg::Series => ChartMode::Series,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_side(session: &mut Session, side: Side, path: &Path, pasted: bool) -> Result<()> {
    let event = if pasted {
        let text = read_lossy(path)?;
        SessionEvent::TextCommitted { side, text }
    } else {
        SessionEvent::SourceLoaded {
            side,
            path: path.to_path_buf(),
        }
    };
    session
        .apply(event)
        .with_context(|| format!("loading side {side:?}"))?;
    Ok(())
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(metric) = args.metric {
        config.metric = metric.into();
    }
    if let Some(mode) = args.mode {
        config.chart_mode = mode.into();
    }

    let mut session = Session::new(config);
    load_side(&mut session, Side::A, &args.a, args.a_pasted)?;
    load_side(&mut session, Side::B, &args.b, args.b_pasted)?;

    let cmp = session
        .apply(SessionEvent::CompareRequested)?
        .context("compare produced no result")?;

    println!("{}", cmp.title());
    println!("{}", summary_table(cmp));
    if cmp.chart_mode == ChartMode::Series {
        println!("{}", series_table(cmp));
    }

    if let Some(path) = &args.html {
        write_html(cmp, path)?;
    }
    if let Some(path) = &args.json {
        std::fs::write(path, to_json(cmp)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.csv_a {
        write_csv_file(&cmp.a, cmp.metric, path)?;
    }
    if let Some(path) = &args.csv_b {
        write_csv_file(&cmp.b, cmp.metric, path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract { file, metric, csv } => {
            let kind = metric.into();
            let series = extract_from_file(&file, kind)?;
            print!("{}", render_summary(&series, kind));
            if let Some(path) = csv {
                write_csv_file(&series, kind, &path)?;
            }
        }
        Command::Summarize { file, metric } => {
            let text = read_lossy(&file)?;
            let summary = summarize_text(&text, metric.into());
            println!("Source: {}", summary.series.source);
            println!("Samples: {:?}", summary.series.samples());
            println!(
                "Mean: {}   (n={})",
                format_mean(summary.series.mean()),
                summary.series.len()
            );
        }
        Command::Compare(args) => run_compare(args)?,
    }

    Ok(())
}
