use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use sensor_node_config::{
    bundle,
    constants::{CONFIG_FILE, VERSION},
    preflight,
    provision::{self, Provisioned},
    Config, Field, CONFIG_SOURCE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Provision sensor node configuration bundles", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a new provisioning file holding the placeholder values
    Init {
        #[arg(default_value = CONFIG_FILE)]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Set one field in a provisioning file
    Set {
        file: PathBuf,
        field: Field,
        value: String,
    },

    /// Print one field
    Get {
        field: Field,

        /// Provisioning file (defaults to the compiled-in bundle)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print every field, with secrets masked
    Show {
        /// Provisioning file (defaults to the compiled-in bundle)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print secret values in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Report every problem that would stop the node at startup
    Check {
        /// Provisioning file (defaults to the compiled-in bundle)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the bundle as Rust source, the way the build compiles it in
    Codegen {
        /// Provisioning file (defaults to the compiled-in bundle)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    log::debug!("sensor-provision {}", VERSION);

    match args.command {
        Command::Init { file, force } => init(&file, force),
        Command::Set { file, field, value } => set(&file, field, value),
        Command::Get { field, file } => {
            let config = bundle::load(file.as_deref())?;
            println!("{}", config.get(field));
            Ok(())
        }
        Command::Show { file, reveal } => {
            let config = bundle::load(file.as_deref())?;
            show(&config, reveal);
            Ok(())
        }
        Command::Check { file } => {
            let config = bundle::load(file.as_deref())?;
            check(&config)
        }
        Command::Codegen { file } => {
            let config = bundle::load(file.as_deref())?;
            let source = file
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| CONFIG_SOURCE.to_string());
            let code = Provisioned::from(config)
                .to_rust_source(&source)
                .context("Failed to render Rust source")?;
            print!("{}", code);
            Ok(())
        }
    }
}

fn init(file: &Path, force: bool) -> Result<()> {
    let template = Provisioned::template();
    let written = if force {
        template.write(file)
    } else {
        template.create(file)
    };

    match written {
        Ok(()) => {}
        Err(provision::Error::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists => bail!(
            "{} already exists, pass --force to overwrite it",
            file.display()
        ),
        Err(e) => return Err(e).with_context(|| format!("Failed to write {}", file.display())),
    }

    println!("Wrote {}, fill in every field before deploying", file.display());
    Ok(())
}

fn set(file: &Path, field: Field, value: String) -> Result<()> {
    let mut provisioned =
        Provisioned::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    provisioned.set(field, value);

    provisioned
        .write(file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    log::info!("Updated {} in {}", field, file.display());
    Ok(())
}

fn show(config: &Config<'_>, reveal: bool) {
    let width = Field::ALL.iter().map(|f| f.key().len()).max().unwrap_or(0);
    for (field, _) in config.fields() {
        println!(
            "{:width$}  {:?}",
            field.key(),
            config.display_value(field, reveal),
            width = width
        );
    }
}

fn check(config: &Config<'_>) -> Result<()> {
    let findings = preflight::findings(config);
    if findings.is_empty() {
        println!("Configuration OK");
        return Ok(());
    }

    for finding in &findings {
        eprintln!("{}: {}", finding.field().description(), finding);
    }
    bail!("{} problem(s) found", findings.len())
}
