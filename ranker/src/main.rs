mod config;
mod report;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use decision_ranking::{
    compare,
    dataset::{self, Dataset},
    score_saw, score_wp,
    sensitivity::winner_stability,
    Method, Normalized,
};
use rand::{rngs::SmallRng, SeedableRng as _};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Problem;

#[derive(Parser, Debug)]
#[command(name = "ranker")]
#[command(about = "Rank alternatives by additive and multiplicative weighting", long_about = None)]
#[command(version)]
struct Cli {
    /// Log scoring steps (-v for debug, -vv for trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank with simple additive weighting
    Saw(Input),
    /// Rank with weighted product
    Wp(Input),
    /// Rank with both methods and compare the winners
    Compare(Input),
    /// Check how often the winner survives random weight perturbation
    Sensitivity {
        #[command(flatten)]
        input: Input,

        #[arg(long, value_enum, default_value = "saw")]
        method: MethodArg,

        #[arg(long, default_value = "1000")]
        trials: usize,

        /// Relative perturbation of each weight, within [0, 1]
        #[arg(long, default_value = "0.2")]
        jitter: f64,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the built-in datasets
    Presets,
}

#[derive(Args, Debug)]
struct Input {
    /// Built-in dataset to rank
    #[arg(long, value_enum, default_value = "hosting")]
    preset: Preset,

    /// TOML problem file, used instead of the preset
    #[arg(long)]
    problem: Option<PathBuf>,

    /// Rank the preset if the problem file cannot be loaded
    #[arg(long, requires = "problem")]
    fallback: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Cloud storage plans
    CloudStorage,
    /// Web hosting plans
    Hosting,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MethodArg {
    Saw,
    Wp,
}

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Saw => Method::Saw,
            MethodArg::Wp => Method::Wp,
        }
    }
}

impl Preset {
    const ALL: [Self; 2] = [Self::CloudStorage, Self::Hosting];

    fn name(self) -> &'static str {
        match self {
            Self::CloudStorage => "cloud-storage",
            Self::Hosting => "hosting",
        }
    }

    fn load(self) -> anyhow::Result<Dataset> {
        let data = match self {
            Self::CloudStorage => dataset::cloud_storage()?,
            Self::Hosting => dataset::hosting()?,
        };
        Ok(data)
    }
}

impl Input {
    fn load(&self) -> anyhow::Result<Dataset> {
        let Some(path) = &self.problem else {
            return self.preset.load();
        };
        match Problem::load(path).and_then(Problem::into_dataset) {
            Ok(data) => Ok(data),
            Err(err) if self.fallback => {
                let reason = format!("{err:#}");
                warn!(
                    error = reason.as_str(),
                    preset = self.preset.name(),
                    "problem file unusable, ranking the preset instead"
                );
                self.preset.load()
            }
            Err(err) => Err(err),
        }
    }

    fn print<T: Serialize>(
        &self,
        value: &T,
        render: impl FnOnce(&T) -> Result<String, std::fmt::Error>,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", render(value)?);
        }
        Ok(())
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Saw(input) => {
            let data = input.load()?;
            let result = score_saw(&data.matrix, &data.saw_weights, &data.types)
                .context("SAW scoring failed")?;
            input.print(&result, report::saw)
        }
        Command::Wp(input) => {
            let data = input.load()?;
            let result = score_wp(&data.matrix, &data.wp_weights, &data.types)
                .context("WP scoring failed")?;
            input.print(&result, report::wp)
        }
        Command::Compare(input) => {
            let data = input.load()?;
            let comparison =
                compare(&data.matrix, &data.saw_weights, &data.wp_weights, &data.types)
                    .context("comparison failed")?;
            input.print(&comparison, report::comparison)
        }
        Command::Sensitivity {
            input,
            method,
            trials,
            jitter,
            seed,
        } => {
            let jitter = Normalized::new(jitter).context("jitter must be within [0, 1]")?;
            let data = input.load()?;
            let method = Method::from(method);
            let weights = match method {
                Method::Saw => &data.saw_weights,
                Method::Wp => &data.wp_weights,
            };
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            info!(%method, trials, jitter = jitter.as_f64(), "running weight sensitivity");
            let stability = winner_stability(
                &mut rng,
                method,
                &data.matrix,
                weights,
                &data.types,
                trials,
                jitter,
            )
            .context("sensitivity analysis failed")?;
            input.print(&stability, report::stability)
        }
        Command::Presets => {
            for preset in Preset::ALL {
                print!("{}", report::dataset(preset.name(), &preset.load()?)?);
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli.command)
}
