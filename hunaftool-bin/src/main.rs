use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use gumdrop::Options;

use hunaftool::convert;
use hunaftool::format::Format;

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "v", help = "verbose diagnostics on stderr")]
    verbose: bool,

    #[options(
        short = "i",
        meta = "FMT",
        help = "input format: dic, txt or csv (default: from extension)"
    )]
    input_format: Option<Format>,

    #[options(
        short = "o",
        meta = "FMT",
        help = "output format: dic, txt or csv (default: from extension)"
    )]
    output_format: Option<Format>,

    #[options(free, help = "<aff> [input] [output]")]
    files: Vec<PathBuf>,
}

fn main() {
    let args = Args::parse_args_default_or_exit();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(err) = run(args) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let aff_path = args
        .files
        .first()
        .ok_or_else(|| anyhow::anyhow!("no affix file given"))?;
    let input_path = args.files.get(1);
    let output_path = args.files.get(2);

    let aff_text = fs::read_to_string(aff_path)
        .with_context(|| format!("could not read {}", aff_path.display()))?;

    let input = match input_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => {
            eprintln!("Reading from stdin...");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let from = args
        .input_format
        .or_else(|| input_path.and_then(|p| Format::from_path(p)))
        .ok_or_else(|| anyhow::anyhow!("cannot infer the input format; pass -i"))?;

    let to = args
        .output_format
        .or_else(|| output_path.and_then(|p| Format::from_path(p)))
        .unwrap_or(match from {
            Format::Dic => Format::Csv,
            _ => Format::Dic,
        });

    let output = convert::convert_str(&aff_text, &input, from, to)?;

    match output_path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("could not write {}", path.display()))?,
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(())
}
