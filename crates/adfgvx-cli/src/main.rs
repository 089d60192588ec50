//! Command-line front end of the ADFGVX-style cipher.
//!
//! # Usage
//!
//! ```sh
//! adfgvx encrypt -p PASSWORD -t TRANSPOSITION [-t ...] [-i FILE] [-o FILE]
//! adfgvx decrypt -p PASSWORD -t TRANSPOSITION [-t ...] [-i FILE] [-o FILE]
//! adfgvx alphabets
//! ```
//!
//! Input is read from stdin and output written to stdout unless files are
//! given. Settings come from an optional JSON file (`--config`) and are
//! overridden by flags. Logging follows `RUST_LOG`; `-v` and `-q` adjust the
//! default level.

use std::{
    fs,
    io::{self, Read as _, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use adfgvx_cipher::{Cipher, CipherError, CipherSettings, StdTextCodec, TextEncoding};
use adfgvx_core::catalog;
use adfgvx_stream::LineEnding;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use zeroize::{Zeroize as _, Zeroizing};

const STDIN: &str = "<stdin>";
const STDOUT: &str = "<stdout>";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Log more details. Repeatable.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encrypt plaintext.
    Encrypt(CipherArgs),
    /// Decrypt ciphertext.
    Decrypt(CipherArgs),
    /// List the built-in alphabets.
    Alphabets,
}

#[derive(Debug, clap::Args)]
struct CipherArgs {
    /// Substitution password.
    #[arg(short, long, value_name = "PASSWORD")]
    password: String,

    /// Transposition password. Repeatable; applied in the given order.
    #[arg(
        short,
        long = "transposition",
        value_name = "PASSWORD",
        required = true
    )]
    transpositions: Vec<String>,

    /// Input file. Reads stdin if omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file. Writes stdout if omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Debug, Default, clap::Args)]
struct SettingsArgs {
    /// JSON settings file. Flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Code length of the alphabet.
    #[arg(long, value_name = "N")]
    places: Option<u8>,

    /// Number of code symbols of the alphabet.
    #[arg(long, value_name = "N")]
    symbols: Option<u8>,

    /// Code symbols to use instead of the alphabet's defaults.
    #[arg(long, value_name = "SYMBOLS")]
    code_symbols: Option<String>,

    /// Ciphertext symbols per group (0 disables grouping).
    #[arg(long, value_name = "N")]
    group_size: Option<usize>,

    /// Maximum ciphertext line length (0 disables wrapping).
    #[arg(long, value_name = "N")]
    line_length: Option<usize>,

    /// Output line ending: lf, crlf, cr or nel.
    #[arg(long, value_name = "ENDING")]
    line_ending: Option<LineEnding>,

    /// Encoding of input without byte-order mark: utf-8, utf-16le or utf-16be.
    #[arg(long, value_name = "ENCODING")]
    input_encoding: Option<TextEncoding>,

    /// Output encoding: utf-8, utf-16le or utf-16be.
    #[arg(long, value_name = "ENCODING")]
    output_encoding: Option<TextEncoding>,

    /// Write a byte-order mark.
    #[arg(long)]
    bom: bool,

    /// Largest accepted input, in bytes.
    #[arg(long, value_name = "BYTES")]
    max_input_size: Option<u64>,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<CipherSettings, CipherError> {
        let mut settings = match &self.config {
            Some(path) => CipherSettings::load(path)?,
            None => CipherSettings::default(),
        };

        if let Some(places) = self.places {
            settings.places = places;
        }
        if let Some(symbols) = self.symbols {
            settings.symbols = symbols;
        }
        if let Some(code_symbols) = &self.code_symbols {
            settings.code_symbols = Some(code_symbols.clone());
        }
        if let Some(group_size) = self.group_size {
            settings.group_size = group_size;
        }
        if let Some(line_length) = self.line_length {
            settings.max_line_length = line_length;
        }
        if let Some(line_ending) = self.line_ending {
            settings.line_ending = line_ending;
        }
        if let Some(encoding) = self.input_encoding {
            settings.input_encoding = encoding;
        }
        if let Some(encoding) = self.output_encoding {
            settings.output_encoding = encoding;
        }
        if self.bom {
            settings.output_bom = true;
        }
        if let Some(max_input_size) = self.max_input_size {
            settings.max_input_size = max_input_size;
        }
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Encrypt,
    Decrypt,
}

fn main() -> ExitCode {
    better_panic::install();
    let args = Args::parse();
    init_logger(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("adfgvx: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> Result<(), CipherError> {
    match args.command {
        Command::Encrypt(cipher_args) => transform(cipher_args, Mode::Encrypt),
        Command::Decrypt(cipher_args) => transform(cipher_args, Mode::Decrypt),
        Command::Alphabets => list_alphabets(),
    }
}

fn transform(mut args: CipherArgs, mode: Mode) -> Result<(), CipherError> {
    let settings = args.settings.resolve()?;
    let cipher = Cipher::new(settings, &args.password, &args.transpositions);
    args.password.zeroize();
    args.transpositions.zeroize();
    let cipher = cipher?;

    let input = read_input(args.input.as_deref(), &cipher)?;
    let output = Zeroizing::new(match mode {
        Mode::Encrypt => cipher.encrypt_bytes(&StdTextCodec, &input)?,
        Mode::Decrypt => cipher.decrypt_bytes(&StdTextCodec, &input)?,
    });
    write_output(args.output.as_deref(), &output)
}

fn read_input(path: Option<&Path>, cipher: &Cipher) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let mut bytes = Zeroizing::new(Vec::new());
    match path {
        Some(path) => {
            let metadata = fs::metadata(path).map_err(|e| CipherError::io("read", path, e))?;
            cipher.check_input_size(metadata.len())?;
            fs::File::open(path)
                .and_then(|mut file| file.read_to_end(&mut bytes))
                .map_err(|e| CipherError::io("read", path, e))?;
        }
        None => {
            // one byte past the limit is enough to reject oversized input
            let limit = cipher.settings().max_input_size.saturating_add(1);
            io::stdin()
                .lock()
                .take(limit)
                .read_to_end(&mut bytes)
                .map_err(|e| CipherError::io("read", STDIN, e))?;
        }
    }
    log::debug!("read {} bytes", bytes.len());
    Ok(bytes)
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), CipherError> {
    match path {
        Some(path) => fs::write(path, bytes).map_err(|e| CipherError::io("write", path, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .map_err(|e| CipherError::io("write", STDOUT, e))
        }
    }
}

fn list_alphabets() -> Result<(), CipherError> {
    let mut stdout = io::stdout().lock();
    for spec in catalog() {
        let mut rules = Vec::new();
        if spec.to_upper() {
            rules.push("upper-case");
        }
        if spec.treat_j_as_i() {
            rules.push("J as I");
        }
        let symbols: String = spec.default_code_symbols().into_iter().collect();
        let characters: String = spec.characters().iter().flat_map(|c| c.escape_debug()).collect();
        writeln!(
            stdout,
            "{key}  {count:>2} characters  symbols {symbols:<9}  {rules:<18}  {characters}",
            key = spec.key(),
            count = spec.characters().len(),
            rules = rules.join(", "),
        )
        .map_err(|e| CipherError::io("write", STDOUT, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt() {
        let args = Args::try_parse_from([
            "adfgvx", "-vv", "encrypt", "-p", "secret", "-t", "quark", "-t", "meddle",
            "--line-ending", "crlf", "--output-encoding", "utf-16le",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        let Command::Encrypt(cipher_args) = args.command else {
            panic!("expected encrypt");
        };
        assert_eq!(cipher_args.transpositions, ["quark", "meddle"]);
        let settings = cipher_args.settings.resolve().unwrap();
        assert_eq!(settings.line_ending, LineEnding::CrLf);
        assert_eq!(settings.output_encoding, TextEncoding::Utf16Le);
        assert_eq!(settings.group_size, 5);
    }

    #[test]
    fn test_transposition_required() {
        assert!(Args::try_parse_from(["adfgvx", "decrypt", "-p", "secret"]).is_err());
    }

    #[test]
    fn test_invalid_line_ending() {
        assert!(
            Args::try_parse_from([
                "adfgvx", "encrypt", "-p", "x", "-t", "ab", "--line-ending", "lfcr"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = SettingsArgs {
            places: Some(3),
            symbols: Some(3),
            group_size: Some(0),
            line_length: Some(0),
            bom: true,
            ..SettingsArgs::default()
        };
        let settings = args.resolve().unwrap();
        assert_eq!((settings.places, settings.symbols), (3, 3));
        assert_eq!(settings.group_size, 0);
        assert_eq!(settings.max_line_length, 0);
        assert!(settings.output_bom);
    }
}
