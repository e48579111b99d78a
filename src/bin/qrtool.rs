use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rust_qr_codec::config::{APP_NAME, APP_VERSION, DEFAULT_SAVE_EXTENSION};
use rust_qr_codec::encoder::capacity::{DataMode, capacity};
use rust_qr_codec::logging::init_logging;
use rust_qr_codec::tools::{decode_paths, expand_inputs};
use rust_qr_codec::{
    DecodedResult, ErrorCorrection, Session, SymbolOptions, SymbolVersion, encode_modules,
    encoder,
};
use std::io::{self, BufRead, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Generate and read QR code images")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a QR code image
    Encode {
        #[arg(long)]
        text: String,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        symbol: SymbolArgs,
    },
    /// Decode QR codes from image files or directories
    Decode {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print character capacity per version
    Capacity {
        #[arg(long)]
        ec: Option<ErrorCorrection>,
        #[arg(long)]
        version: Option<u8>,
    },
    /// Interactive session driven from stdin (generate/open/save/read)
    Session {
        #[command(flatten)]
        symbol: SymbolArgs,
    },
}

/// Symbol options; unset flags fall back to QR_* env vars, then defaults
#[derive(Args)]
struct SymbolArgs {
    /// Error correction level (L, M, Q, H)
    #[arg(long)]
    ec: Option<ErrorCorrection>,
    /// Pixels per module
    #[arg(long)]
    module_size: Option<NonZeroU32>,
    /// Quiet zone in modules
    #[arg(long)]
    border: Option<u32>,
    /// auto, N (fixed) or N+ (at least N)
    #[arg(long)]
    version: Option<SymbolVersion>,
}

impl SymbolArgs {
    fn resolve(&self) -> SymbolOptions {
        let mut opts = SymbolOptions::from_env();
        if let Some(ec) = self.ec {
            opts = opts.with_ec_level(ec);
        }
        if let Some(size) = self.module_size {
            opts = opts.with_module_size(size);
        }
        if let Some(border) = self.border {
            opts = opts.with_border(border);
        }
        if let Some(version) = self.version {
            opts = opts.with_version(version);
        }
        opts
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Encode { text, out, symbol } => encode_cmd(&text, &out, &symbol.resolve()),
        Command::Decode { inputs } => decode_cmd(&inputs),
        Command::Capacity { ec, version } => {
            capacity_cmd(ec, version);
            Ok(())
        }
        Command::Session { symbol } => session_cmd(&symbol.resolve()),
    }
}

fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_SAVE_EXTENSION)
    }
}

fn encode_cmd(text: &str, out: &Path, opts: &SymbolOptions) -> anyhow::Result<()> {
    let symbol = encode_modules(text, opts)?;
    let image = encoder::render(&symbol, opts);

    let mut session = Session::new();
    session.set_image(image);
    let out = with_default_extension(out);
    session
        .save(&out)
        .with_context(|| format!("writing {}", out.display()))?;

    println!(
        "{}: version {} ({}x{} modules), level {}, {}x{} px",
        out.display(),
        symbol.version,
        symbol.modules.width(),
        symbol.modules.width(),
        symbol.ec_level,
        session.image().map_or(0, |img| img.width()),
        session.image().map_or(0, |img| img.height()),
    );
    Ok(())
}

fn decode_cmd(inputs: &[PathBuf]) -> anyhow::Result<()> {
    let paths = expand_inputs(inputs);
    if paths.is_empty() {
        bail!("no images found");
    }

    let reports = decode_paths(&paths);
    let mut decoded = 0usize;
    for report in &reports {
        match &report.outcome {
            Ok(DecodedResult::Text(text)) => {
                decoded += 1;
                println!(
                    "{}: {} ({:.2?})",
                    report.path.display(),
                    text.text,
                    report.elapsed
                );
            }
            Ok(DecodedResult::NotFound) => {
                println!("{}: no QR code found", report.path.display());
            }
            Err(err) => {
                println!("{}: {}", report.path.display(), err);
            }
        }
    }

    if reports.len() > 1 {
        println!("Decoded {}/{} images", decoded, reports.len());
    }
    if decoded == 0 {
        bail!("no QR code decoded");
    }
    Ok(())
}

fn capacity_cmd(ec: Option<ErrorCorrection>, version: Option<u8>) {
    let levels: Vec<ErrorCorrection> = match ec {
        Some(level) => vec![level],
        None => ErrorCorrection::ALL.to_vec(),
    };
    let versions: Vec<u8> = match version {
        Some(v) => vec![v],
        None => (SymbolVersion::MIN..=SymbolVersion::MAX).collect(),
    };

    println!("version level numeric alphanumeric byte");
    for v in versions {
        for &level in &levels {
            let (Some(numeric), Some(alnum), Some(byte)) = (
                capacity(v, level, DataMode::Numeric),
                capacity(v, level, DataMode::Alphanumeric),
                capacity(v, level, DataMode::Byte),
            ) else {
                eprintln!("Version {} is outside 1..=40", v);
                return;
            };
            println!("{:>7} {:>5} {:>7} {:>12} {:>4}", v, level, numeric, alnum, byte);
        }
    }
}

/// Expand `\n`, `\t` and `\\` so one input line can carry a multi-line payload
fn unescape(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

const SESSION_HELP: &str = "\
commands:
  generate <text>   encode text into the current image (\\n for a line break)
  open <path>       load an image file
  save <path>       write the current image
  read              decode the current image
  info              show the current image and last result
  quit";

fn session_cmd(opts: &SymbolOptions) -> anyhow::Result<()> {
    println!("{} v{}", APP_NAME, APP_VERSION);
    println!("{}", SESSION_HELP);

    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let (command, arg) = match line.trim_start().split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", SESSION_HELP),
            "generate" => match session.generate(&unescape(arg), opts) {
                Ok(img) => println!(
                    "QR code generated successfully ({}x{} px)",
                    img.width(),
                    img.height()
                ),
                Err(err) => println!("Error: {}", err),
            },
            "open" if arg.is_empty() => println!("Warning: No file selected"),
            "open" => match session.load(Path::new(arg)) {
                Ok(img) => println!("Loaded {}x{} image", img.width(), img.height()),
                Err(err) => println!("Error: {}", err),
            },
            "save" if arg.is_empty() => println!("Warning: No file selected"),
            "save" => {
                let path = with_default_extension(Path::new(arg));
                match session.save(&path) {
                    Ok(()) => println!("File saved successfully: {}", path.display()),
                    Err(err) => println!("Error: {}", err),
                }
            }
            "read" => match session.decode_current() {
                Ok(DecodedResult::Text(decoded)) => println!("{}", decoded.text),
                Ok(DecodedResult::NotFound) => println!("No QR code found in image"),
                Err(err) => println!("Error: {}", err),
            },
            "info" => {
                match session.image() {
                    Some(img) => println!("Current image: {}x{} px", img.width(), img.height()),
                    None => println!("No image"),
                }
                if let Some(result) = session.last_result() {
                    println!("Last result: {}", result.text().unwrap_or("<no QR code>"));
                }
            }
            other => println!("Unknown command '{}' (try help)", other),
        }
    }

    log::info!("Application closing");
    Ok(())
}
