use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mcq_revision::ModuleCatalog;

mod display;
mod modules;
mod quiz;

#[derive(Parser)]
#[clap(name = "mcq-revision", about = "Terminal MCQ practice tool")]
struct Revision {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the module catalog
    Modules {
        #[clap(
            short,
            long,
            value_parser,
            value_name = "PATH",
            env = "MCQ_DATA_DIR",
            default_value = "data"
        )]
        data_dir: PathBuf,
    },
    /// Run an interactive quiz session for one module
    Quiz {
        #[clap(
            short,
            long,
            value_parser,
            value_name = "PATH",
            env = "MCQ_DATA_DIR",
            default_value = "data"
        )]
        data_dir: PathBuf,

        #[clap(value_parser, value_name = "MODULE_ID")]
        module_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "env-file")]
    dotenvy::dotenv().ok();

    pretty_env_logger::init();

    let revision = Revision::parse();

    match revision.command {
        Command::Modules { data_dir } => {
            let catalog = ModuleCatalog::load(&data_dir)?;
            modules::list(&catalog);

            Ok(())
        }
        Command::Quiz {
            data_dir,
            module_id,
        } => {
            let catalog = ModuleCatalog::load(&data_dir)?;
            quiz::run(&catalog, &module_id)
        }
    }
}
