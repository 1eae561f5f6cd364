use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rpp_scriptgen::r#gen::{self, GenOpts};
use rpp_scriptgen::instances::InstancesDirUnreadable;
use rpp_scriptgen::list::{self, ListOpts};
use rpp_scriptgen::schema::ErrorResponse;

#[derive(Debug, Parser)]
#[command(name = "rpp-scriptgen")]
#[command(about = "Generates solver invocation lines for RPP instances", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit solver invocation lines for every instance
    Gen {
        /// Instance directory (default: $RPP_SCRIPTGEN_INSTANCES, then Instancias_RPP/URPP)
        dir: Option<String>,

        /// Write the rendered script to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// List qualifying instances as JSON
    List {
        /// Instance directory (default: $RPP_SCRIPTGEN_INSTANCES, then Instancias_RPP/URPP)
        dir: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to info unless RUST_LOG is set.
    // Allow -v/-vv to override it in a predictable way.
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Gen { dir, output } => {
            r#gen::execute(GenOpts {
                dir: dir.as_deref(),
                output: output.as_deref(),
            })?;
        }
        Command::List { dir } => {
            if let Err(e) = list::execute(ListOpts { dir: dir.as_deref() }) {
                // The list stdout contract is JSON, so the failure is reported
                // as an error envelope rather than anyhow's stderr rendering.
                let code = if e
                    .chain()
                    .any(|c| c.downcast_ref::<InstancesDirUnreadable>().is_some())
                {
                    "instances_dir_unreadable"
                } else {
                    "internal_error"
                };
                ErrorResponse::new(code, format!("{e:#}"), false).print();
                std::process::exit(1);
            }
        }
    }

    info!("done");
    Ok(())
}
