//! # Stratify CLI Application
//!
//! Batch reinforced concrete beam design from the command line.
//!
//! ```text
//! calc_cli design forces.csv -o output.csv --json report.json
//! calc_cli catalog
//! calc_cli fit --area 2.4 --width 7
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` for fine-grained filtering, or pass
//! `-v` / `-vv`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};

use calc_core::calculations::{design_members, DesignContext, MemberDesign};
use calc_core::errors::{CalcError, CalcResult};
use calc_core::file_io::{load_settings, read_force_table, save_report, write_results_csv};
use calc_core::materials::RebarCatalog;
use calc_core::project::{DesignReport, DesignSettings};

#[derive(Debug, Parser)]
#[command(version, about = "Reinforced concrete beam design from analysis force tables")]
struct Cli {
    /// Verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Design every member in a force table
    Design(Design),

    /// Print the rebar catalog
    Catalog,

    /// Choose a single-layer bar layout for a required area
    Fit(Fit),
}

#[derive(Debug, clap::Args)]
struct Design {
    /// Force table CSV exported from the analysis model
    forces: PathBuf,

    /// Results CSV path
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Also write the full design report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Settings JSON (materials, stirrup bar); defaults apply when omitted
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of worker threads (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Engineer recorded in the JSON report
    #[arg(long, default_value = "")]
    engineer: String,

    /// Job number recorded in the JSON report
    #[arg(long, default_value = "")]
    job_id: String,
}

#[derive(Debug, clap::Args)]
struct Fit {
    /// Required steel area (in²)
    #[arg(long)]
    area: f64,

    /// Width available for the layer (in)
    #[arg(long)]
    width: f64,

    /// Clear spacing floor between bars (in)
    #[arg(long, default_value_t = 2.0)]
    aggregate: f64,
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

impl Design {
    fn run(self) -> CalcResult<()> {
        let settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => DesignSettings::default(),
        };
        debug!(?settings, "design settings");
        let context = DesignContext::new(settings.clone())?;

        let table = read_force_table(&self.forces)?;
        let demands = table.member_demands();

        let designs = match self.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|e| CalcError::Internal {
                        message: format!("Failed to build worker pool: {}", e),
                    })?;
                pool.install(|| design_members(&demands, &context))
            }
            None => design_members(&demands, &context),
        };

        write_results_csv(&designs, &self.output)?;

        let report = DesignReport::new(self.engineer, self.job_id, settings, designs);
        if let Some(path) = &self.json {
            save_report(&report, path)?;
            info!(path = %path.display(), "wrote report");
        }

        print_summary(&report);
        Ok(())
    }
}

fn print_summary(report: &DesignReport) {
    println!("Designed {} members", report.member_count());

    let flagged: Vec<&MemberDesign> = report
        .designs
        .values()
        .filter(|design| design.needs_review())
        .collect();
    if flagged.is_empty() {
        println!("All members passed");
        return;
    }

    println!("{} members need review:", flagged.len());
    for design in flagged {
        for issue in &design.issues {
            println!("  {:>6}  {}", design.id, issue);
        }
    }
}

fn print_catalog() {
    println!("{:>4}  {:>10}  {:>10}", "Bar", "Dia (in)", "Area (in²)");
    for size in RebarCatalog::standard().sizes() {
        println!("{:>4}  {:>10.3}  {:>10.3}", format!("#{}", size.number), size.diameter_in, size.area_in2);
    }
}

impl Fit {
    fn run(self) -> CalcResult<()> {
        for (field, value) in [("area", self.area), ("width", self.width), ("aggregate", self.aggregate)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a non-negative number"));
            }
        }

        let selection = RebarCatalog::standard().fit_bars(self.area, self.width, self.aggregate);
        if selection.is_feasible() {
            println!("{} ({:.3} in²)", selection.display_name(), selection.provided_area_in2);
        } else {
            println!("No single-layer layout fits {:.2} in", self.width);
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Command::Design(command) => command.run(),
        Command::Catalog => {
            print_catalog();
            Ok(())
        }
        Command::Fit(command) => command.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match serde_json::to_string_pretty(&error) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", error),
            }
            ExitCode::FAILURE
        }
    }
}
