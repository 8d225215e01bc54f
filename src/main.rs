use std::io::IsTerminal;
use std::process::ExitCode;
use clap::Parser;
use tracing::Level;
use cert_trace::application::{ChainLinker, Config};
use cert_trace::domain::TraceError;
use cert_trace::infrastructure::{FixedClock, FsBundleSource, PemCertificateDecoder, SystemClock, TextRenderer};
use cert_trace::ports::{Clock, Renderer};

/// Trace X.509 certificate chains by matching Authority Key Identifiers to
/// Subject Key Identifiers.
#[derive(Debug, Parser)]
#[command(name = "cert-trace", version, after_help = "\
Environment:
  CERT_TRACE_AT   Evaluate validity at this RFC 3339 instant [default: now]
  CERT_TRACE_LOG  Log level: error, warn, info, debug, trace [default: warn]")]
struct Args {
    /// PEM file with the certificate chain to trace
    certs: String,

    /// PEM file with trusted CA certificates, listed before the chain
    #[arg(long, value_name = "PATH")]
    ca: Option<String>,

    /// Evaluate validity at this RFC 3339 instant instead of now
    #[arg(long, value_name = "RFC3339")]
    at: Option<String>,

    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::from_env(args.at.as_deref()) {
        Ok(c) => c.with_verbosity(args.verbose),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.class.exit_code() as u8);
        }
    };

    init_tracing(config.log_level);

    match run(&args, &config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.class.exit_code() as u8)
        }
    }
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: &Args, config: &Config) -> Result<String, TraceError> {
    let linker = ChainLinker::new(FsBundleSource::new(), PemCertificateDecoder::new());
    let report = linker.execute(&args.certs, args.ca.as_deref())?;

    let clock: Box<dyn Clock> = match config.at {
        Some(at) => Box::new(FixedClock::new(at)),
        None => Box::new(SystemClock::new()),
    };
    let now = clock.now();
    tracing::debug!(%now, "evaluating validity");

    Ok(TextRenderer::new().render(&report, now))
}
