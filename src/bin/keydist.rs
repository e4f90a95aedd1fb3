// Keydist CLI
// Keyboard-aware edit distance from the command line

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;

use keydist_core::{CostConfig, DistanceEngine, KeyboardModel, Layout, NeighborStatus, Settings};

/// Keyboard-aware edit distance
#[derive(Parser, Debug)]
#[command(name = "keydist")]
#[command(author = "keydist contributors")]
#[command(version)]
#[command(about = "Edit distance with a keyboard-adjacency typo bias", long_about = None)]
struct Args {
    /// Source word
    #[arg(
        value_name = "SOURCE",
        required_unless_present_any = ["neighbors", "dump_layout", "check_layout"]
    )]
    source: Option<String>,

    /// Target word
    #[arg(
        value_name = "TARGET",
        required_unless_present_any = ["neighbors", "dump_layout", "check_layout", "candidates"]
    )]
    target: Option<String>,

    /// TOML settings file (defaults to ~/.config/keydist/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// TOML layout file (overrides the layout from settings)
    #[arg(short, long, value_name = "LAYOUT")]
    layout: Option<PathBuf>,

    /// Discount typos between adjacent keys
    #[arg(short, long)]
    keyboard: bool,

    #[arg(long, value_name = "COST")]
    insertion_cost: Option<f64>,

    #[arg(long, value_name = "COST")]
    deletion_cost: Option<f64>,

    #[arg(long, value_name = "COST")]
    substitution_cost: Option<f64>,

    /// Print the full cost matrix
    #[arg(short, long)]
    matrix: bool,

    /// Rank comma-separated candidates against SOURCE
    #[arg(long, value_name = "WORDS", value_delimiter = ',')]
    candidates: Vec<String>,

    /// Show how two keys relate on the layout
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    neighbors: Vec<char>,

    /// Print every key's neighbors and exit
    #[arg(long)]
    dump_layout: bool,

    /// Report layout problems and exit
    #[arg(long)]
    check_layout: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Settings file costs with command-line overrides applied
    fn costs(&self, settings: &Settings) -> CostConfig {
        let mut costs = *settings.costs();
        if let Some(cost) = self.insertion_cost {
            costs.insertion_cost = cost;
        }
        if let Some(cost) = self.deletion_cost {
            costs.deletion_cost = cost;
        }
        if let Some(cost) = self.substitution_cost {
            costs.substitution_cost = cost;
        }
        if self.keyboard {
            costs.use_keyboard_model = true;
        }
        costs
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Main application state
struct Application {
    args: Args,
    settings: Settings,
    model: KeyboardModel,
}

impl Application {
    fn new(args: Args) -> Result<Self> {
        let mut settings = match args.config {
            Some(ref path) => Settings::from_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::load_default().context("failed to load default settings")?,
        };
        if args.layout.is_some() {
            settings.set_layout_path(args.layout.clone());
        }

        let layout: Option<Layout> = settings.load_layout().context("failed to load layout")?;
        if let Some(path) = settings.layout_path() {
            log::info!("Using layout {}", path.display());
        }
        let model = KeyboardModel::build(layout.as_ref());

        Ok(Self {
            args,
            settings,
            model,
        })
    }

    fn run(&self) -> Result<()> {
        if self.args.check_layout {
            return self.check_layout();
        }
        if self.args.dump_layout {
            self.dump_layout();
            return Ok(());
        }
        if let &[a, b] = self.args.neighbors.as_slice() {
            self.print_neighbors(a, b);
            return Ok(());
        }

        let Some(ref source) = self.args.source else {
            bail!("missing SOURCE word");
        };
        let costs = self.args.costs(&self.settings);
        let engine = DistanceEngine::new(&self.model);

        if !self.args.candidates.is_empty() {
            let candidates = self.args.candidates.iter().map(String::as_str);
            for ranked in engine.rank(source, candidates, &costs) {
                println!("{:8.4}  {}", ranked.distance, ranked.candidate);
            }
            return Ok(());
        }

        let Some(ref target) = self.args.target else {
            bail!("missing TARGET word");
        };
        if self.args.matrix {
            let matrix = engine.matrix(source, target, &costs);
            print!("{}", matrix);
            println!("distance = {}", matrix.final_cost());
        } else {
            println!("{}", engine.distance(source, target, &costs));
        }
        Ok(())
    }

    fn check_layout(&self) -> Result<()> {
        let issues = self.model.issues();
        if issues.is_empty() {
            println!("Layout is valid ({} keys)", self.model.len());
            return Ok(());
        }
        for issue in issues {
            println!("  - {}", issue);
        }
        bail!("layout has {} issue(s)", issues.len())
    }

    fn dump_layout(&self) {
        for (key, entry) in self.model.adjacency() {
            let neighbors: Vec<String> = entry
                .iter()
                .map(|(neighbor, direction)| format!("{:?} {}", neighbor, direction))
                .collect();
            println!("{:?}: {}", key, neighbors.join(", "));
        }
    }

    fn print_neighbors(&self, a: char, b: char) {
        let status = self.model.are_neighbors(a, b);
        match self.model.direction(a, b) {
            Some(direction) => println!("{:?} -> {:?}: {:?} ({})", a, b, status, direction),
            None => println!("{:?} -> {:?}: {:?}", a, b, status),
        }
        if status == NeighborStatus::Asymmetric {
            println!("  only one direction is recorded on this layout");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_env("KEYDIST_LOG")
        .init();

    Application::new(args)?.run()
}
