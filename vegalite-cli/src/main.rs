mod gallery;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use std::path::PathBuf;
use std::process::ExitCode;
use vegalite_common::error::{Result, ResultWithContext};
use vegalite_core::chart::SerializeOpts;
use vegalite_datasets::config::DatasetConfig;
use vegalite_datasets::Datasets;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Anscombe's quartet faceted scatter plot as a Vega-Lite spec
    Anscombe {
        /// Width of each facet panel
        #[clap(long, default_value = "150")]
        width: f64,

        /// Height of each facet panel
        #[clap(long, default_value = "150")]
        height: f64,

        /// Embed records under data.values instead of top-level datasets
        #[clap(long, num_args = 0)]
        inline: bool,

        /// Largest number of rows that may be embedded
        #[clap(long, default_value = "5000")]
        max_rows: usize,

        /// Print on a single line
        #[clap(long, num_args = 0)]
        compact: bool,

        #[clap(flatten)]
        source: SourceArgs,
    },

    /// List the names of the available datasets
    Datasets {
        #[clap(flatten)]
        source: SourceArgs,
    },

    /// Print the first rows of a dataset
    Show {
        name: String,

        #[clap(long, default_value = "10")]
        rows: usize,

        #[clap(flatten)]
        source: SourceArgs,
    },
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Fetch datasets that are not available locally from vega-datasets
    #[clap(long, num_args = 0)]
    pub remote: bool,

    /// Directory searched for <name>.json and <name>.csv
    #[clap(long)]
    pub data_dir: Option<PathBuf>,
}

impl SourceArgs {
    fn datasets(&self) -> Datasets {
        let mut config = DatasetConfig::from_env();
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir.clone());
        }
        if !self.remote {
            config = config.offline();
        }
        Datasets::new(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or(level));
    builder.target(Target::Stderr);
    builder.init();
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Anscombe {
            width,
            height,
            inline,
            max_rows,
            compact,
            source,
        } => {
            let table = source.datasets().load(gallery::ANSCOMBE).await?;
            let chart = gallery::anscombe_chart(table, width, height);
            let opts = SerializeOpts {
                max_rows: Some(max_rows),
                consolidate_datasets: !inline,
                ..Default::default()
            };
            let text = if compact {
                serde_json::to_string(&chart.to_spec(&opts)?)?
            } else {
                chart.to_string_pretty(&opts)?
            };
            println!("{text}");
        }
        Command::Datasets { source } => {
            for name in source.datasets().list().await {
                println!("{name}");
            }
        }
        Command::Show { name, rows, source } => {
            let table = source.datasets().load(&name).await?;
            let text = table
                .pretty_format(Some(rows))
                .with_context(|| format!("Printing dataset {name:?}"))?;
            println!("{text}");
            println!(
                "{} of {} rows, columns: {}",
                rows.min(table.num_rows()),
                table.num_rows(),
                table.column_names().join(", ")
            );
        }
    }
    Ok(())
}
