use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use confgear::options::parse_options_file;
use confgear::tree::leaf_paths;
use confgear::{AccessorOptions, ConfigReader, GearError, logging};

/// Exit code for a key path that resolves to nothing.
const EXIT_DOES_NOT_EXIST: u8 = 2;
/// Exit code for a key path that holds a value of another type.
const EXIT_INCOMPATIBLE_TYPE: u8 = 3;

#[derive(Parser)]
#[command(name = "confgear")]
#[command(
	author,
	version,
	about = "Typed key-path lookups over JSON configuration documents"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Separator between mapping keys in a key path
	#[arg(long, global = true, value_name = "STR")]
	delimiter: Option<String>,

	/// Resolve every lookup against the tree without memoizing
	#[arg(long, global = true)]
	no_cache: bool,

	/// Load accessor options from a TOML file
	#[arg(long, global = true, value_name = "FILE")]
	options: Option<PathBuf>,

	/// Increase log verbosity (repeatable)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the value at a key path
	Get {
		/// Document to read (.toml files are read as TOML, anything else as JSON)
		file: PathBuf,

		/// Key path to look up, e.g. State.Status
		key: String,

		/// Require the value to be of this type
		#[arg(long = "as", value_enum, default_value_t = ValueType::Any)]
		as_type: ValueType,
	},
	/// List every leaf key path in the document
	Keys {
		/// Document to read
		file: PathBuf,
	},
	/// Check that a document decodes without errors
	Validate {
		/// Document to read
		file: PathBuf,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueType {
	Any,
	Float,
	Bool,
	String,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	logging::init(logging::level_for_verbosity(cli.verbose))
		.context("Failed to initialise logging")?;

	let options = resolve_options(&cli)?;

	match cli.command {
		Commands::Get { file, key, as_type } => handle_get(&file, &key, as_type, options),
		Commands::Keys { file } => handle_keys(&file, options),
		Commands::Validate { file } => handle_validate(&file, options),
	}
}

/// Start from the options file (if any) and apply command line overrides.
fn resolve_options(cli: &Cli) -> Result<AccessorOptions> {
	let mut options = match cli.options {
		Some(ref path) => parse_options_file(path)
			.with_context(|| format!("Failed to load options from {}", path.display()))?,
		None => AccessorOptions::default(),
	};

	if let Some(ref delimiter) = cli.delimiter {
		options.delimiter = delimiter.clone();
	}
	if cli.no_cache {
		options.memoize = false;
	}

	options.validate().context("Invalid command line options")?;
	Ok(options)
}

fn open_reader(file: &Path, options: AccessorOptions) -> Result<ConfigReader> {
	ConfigReader::open(file, options)
		.with_context(|| format!("Failed to load document: {}", file.display()))
}

fn handle_get(
	file: &Path,
	key: &str,
	as_type: ValueType,
	options: AccessorOptions,
) -> Result<ExitCode> {
	let reader = open_reader(file, options)?;

	let rendered = match as_type {
		ValueType::Any => reader
			.get(key)
			.map(ToString::to_string)
			.ok_or_else(|| GearError::DoesNotExist {
				key: key.to_string(),
			}),
		ValueType::Float => reader.get_float(key).map(|v| v.to_string()),
		ValueType::Bool => reader.get_bool(key).map(|v| v.to_string()),
		ValueType::String => reader.get_string(key),
	};

	match rendered {
		Ok(value) => {
			println!("{}", value);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) if e.is_does_not_exist() => {
			eprintln!("error: {}", e);
			Ok(ExitCode::from(EXIT_DOES_NOT_EXIST))
		}
		Err(e) if e.is_incompatible_type() => {
			eprintln!("error: {}", e);
			Ok(ExitCode::from(EXIT_INCOMPATIBLE_TYPE))
		}
		Err(e) => Err(e.into()),
	}
}

fn handle_keys(file: &Path, options: AccessorOptions) -> Result<ExitCode> {
	let reader = open_reader(file, options)?;

	for path in leaf_paths(reader.root(), &reader.options().delimiter) {
		println!("{}", path);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_validate(file: &Path, options: AccessorOptions) -> Result<ExitCode> {
	match ConfigReader::open(file, options) {
		Ok(reader) => {
			let leaves = leaf_paths(reader.root(), &reader.options().delimiter).len();
			println!("{} is valid ({} leaf keys)", file.display(), leaves);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Document error: {:#}", anyhow::Error::new(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

