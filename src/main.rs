// SPDX-License-Identifier: MPL-2.0
use lumen_search::app::{self, Flags};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
LumenSearch - search Unsplash photos

USAGE:
    lumen_search [OPTIONS] [QUERY]

ARGS:
    <QUERY>                 Search submitted as soon as the window opens

OPTIONS:
    --lang <LOCALE>         Interface language (e.g. en-US, ru)
    --config-dir <PATH>     Directory holding settings.toml
    --access-key <KEY>      Unsplash API access key
    -v, --verbose           Increase log verbosity (repeatable)
    -h, --help              Print this help
";

/// Parsed command line.
#[derive(Debug, Default)]
struct Cli {
    help: bool,
    verbosity: u8,
    flags: Flags,
    /// Arguments that were dropped, reported once logging is up.
    ignored: Vec<String>,
}

fn main() -> iced::Result {
    let cli = parse_args(std::env::args_os().skip(1).collect());

    if cli.help {
        print!("{HELP}");
        return Ok(());
    }

    init_tracing(cli.verbosity);
    for arg in &cli.ignored {
        tracing::warn!(%arg, "ignoring unrecognized argument");
    }

    app::run(cli.flags)
}

fn parse_args(raw: Vec<OsString>) -> Cli {
    let mut args = pico_args::Arguments::from_vec(raw);
    let mut cli = Cli {
        help: args.contains(["-h", "--help"]),
        ..Cli::default()
    };

    while args.contains(["-v", "--verbose"]) {
        cli.verbosity = cli.verbosity.saturating_add(1);
    }

    cli.flags.lang = opt_value(&mut args, "--lang", &mut cli.ignored);
    cli.flags.config_dir = opt_value(&mut args, "--config-dir", &mut cli.ignored);
    cli.flags.access_key = opt_value(&mut args, "--access-key", &mut cli.ignored);
    cli.flags.initial_query = initial_query(args, &mut cli.ignored);
    cli
}

fn opt_value(
    args: &mut pico_args::Arguments,
    key: &'static str,
    ignored: &mut Vec<String>,
) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        ignored.push(format!("{key} ({err})"));
        None
    })
}

/// Remaining free arguments joined into a single query. Leftover options are
/// dropped rather than searched for.
fn initial_query(args: pico_args::Arguments, ignored: &mut Vec<String>) -> Option<String> {
    let mut words = Vec::new();
    for arg in args.finish() {
        match arg.into_string() {
            Ok(word) if word.starts_with('-') => ignored.push(word),
            Ok(word) => words.push(word),
            Err(raw) => ignored.push(raw.to_string_lossy().into_owned()),
        }
    }
    let query = words.join(" ");
    (!query.trim().is_empty()).then_some(query)
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `info`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},wgpu_core=warn,wgpu_hal=warn,iced_wgpu=warn,naga=warn,cosmic_text=warn"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
