//! QuickParts inspector
//!
//! Reads and edits infoset XML files from the command line, and exercises the
//! value codec directly.
//!
//! ```text
//! qp get quickparts.xml MapPart Zoom
//! qp set quickparts.xml MapPart Zoom 12 --type int
//! qp dump quickparts.xml
//! qp codec format --type double 1e21
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod commands;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use qp_core::QuickPartsConfig;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use commands::{codec_format, codec_parse, dump, get, set};

fn file_arg() -> Arg {
    Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Infoset XML file")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .help("Value kind: string, bool, int, double, float, decimal, datetime, with ? for nullable")
}

/// Command-line definition
#[must_use]
pub fn command() -> Command {
    Command::new("qp")
        .version(qp_core::VERSION)
        .about("Inspect and edit QuickParts infoset documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("get")
                .about("Print an attribute's stored text")
                .arg(file_arg())
                .arg(Arg::new("element").required(true).help("Element name"))
                .arg(Arg::new("attribute").required(true).help("Attribute name")),
        )
        .subcommand(
            Command::new("set")
                .about("Store an attribute, creating the file if needed")
                .arg(file_arg())
                .arg(Arg::new("element").required(true).help("Element name"))
                .arg(Arg::new("attribute").required(true).help("Attribute name"))
                .arg(
                    Arg::new("value")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Value text"),
                )
                .arg(type_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Print every element attribute")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("codec")
                .about("Run the value codec")
                .subcommand_required(true)
                .subcommand(
                    Command::new("format")
                        .about("Print the stored form of a value")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("text").required(true).allow_hyphen_values(true)),
                )
                .subcommand(
                    Command::new("parse")
                        .about("Decode stored text")
                        .arg(type_arg().required(true))
                        .arg(Arg::new("text").required(true).allow_hyphen_values(true)),
                ),
        )
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `--verbose`; the fallback level is `warn`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Load the configuration named by `--config`, or the default
///
/// # Errors
/// Returns error if the file cannot be read or parsed
pub fn load_config(matches: &ArgMatches) -> Result<QuickPartsConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => QuickPartsConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(QuickPartsConfig::default()),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing argument <{id}>"))
}

fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .with_context(|| format!("missing argument <{id}>"))
}

/// Run parsed arguments, writing results to `out`
///
/// # Errors
/// Returns error for unreadable files, malformed XML, or values the codec rejects
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let config = load_config(matches)?;
    let codec = config.codec.codec();

    match matches.subcommand() {
        Some(("get", args)) => {
            let text = get(
                required_path(args, "file")?,
                required(args, "element")?,
                required(args, "attribute")?,
            )?;
            writeln!(out, "{text}")?;
        }
        Some(("set", args)) => {
            let stored = set(
                &codec,
                required_path(args, "file")?,
                required(args, "element")?,
                required(args, "attribute")?,
                required(args, "value")?,
                args.get_one::<String>("type").map(String::as_str),
            )?;
            writeln!(out, "{stored}")?;
        }
        Some(("dump", args)) => {
            for line in dump(required_path(args, "file")?)? {
                writeln!(out, "{line}")?;
            }
        }
        Some(("codec", args)) => match args.subcommand() {
            Some(("format", args)) => {
                let text = codec_format(&codec, required(args, "type")?, required(args, "text")?)?;
                writeln!(out, "{text}")?;
            }
            Some(("parse", args)) => {
                let value = codec_parse(&codec, required(args, "type")?, required(args, "text")?)?;
                writeln!(out, "{value}")?;
            }
            _ => anyhow::bail!("expected `codec format` or `codec parse`"),
        },
        _ => anyhow::bail!("no subcommand given"),
    }
    Ok(())
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
