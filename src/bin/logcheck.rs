use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use env_logger::Env;
use log::LevelFilter;
use logcheck::transcript::{self, Options, TRANSCRIPT_TARGET};

#[derive(Debug, Parser)]
#[command(
    name = "logcheck",
    about = "Check a log transcript against a list of expected message patterns",
    after_help = "\
Each line of EXPECTATIONS is a pattern that must match one whole message of the transcript. \
`*` matches any text; everything else matches literally. Blank lines and lines starting with \
`#` are ignored."
)]
struct Opt {
    /// Drop debug messages before checking
    #[arg(long = "discard-debug")]
    discard_debug: bool,

    /// Do not fail on messages that no pattern matched
    #[arg(long = "allow-other")]
    allow_other: bool,

    /// Silence all log output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Verbose logging mode (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// File with one expected pattern per line
    #[arg(value_name = "EXPECTATIONS")]
    expectations: PathBuf,

    /// Transcript to check, or STDIN if not specified
    #[arg(value_name = "TRANSCRIPT")]
    transcript: Option<PathBuf>,
}

impl Opt {
    fn into_parts(self) -> (PathBuf, Option<PathBuf>, Options) {
        (
            self.expectations,
            self.transcript,
            Options {
                discard_debug: self.discard_debug,
                allow_other: self.allow_other,
            },
        )
    }
}

fn main() -> io::Result<()> {
    let opt = Opt::parse();

    // Initialize logger
    if !opt.quiet {
        let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(
            match opt.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            },
        ));
        // Replayed messages would otherwise be echoed back to stderr.
        if opt.verbose < 2 {
            builder.filter_module(TRANSCRIPT_TARGET, LevelFilter::Off);
        }
        builder.format_timestamp(None).init();
    }

    let (expectations, transcript, options) = opt.into_parts();
    let report = transcript::check_files(&options, transcript.as_ref(), expectations)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    report.write_failures(&mut stdout)?;
    stdout.flush()?;

    if !report.is_success() {
        process::exit(1);
    }
    Ok(())
}
