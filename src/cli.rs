use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{
    errors::{AppError, AppResult},
    time_spec::TimeSpec,
};

/// the long flags that may also be written with a single dash (`-at 5:00PM`)
const SINGLE_DASH_FLAGS: [&str; 3] = ["at", "in", "msg"];

pub const USAGE_NOTE: &str = "Either the --at or --in option must be given.
If no --msg is given, all non-flag arguments are combined to form the message.";

/// Rings an alarm at a time of day or after a delay
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, after_help = USAGE_NOTE)]
pub struct Args {
    /// time at which to ring the alarm, e.g. 3:04PM, 15:04 or 15
    #[arg(long, value_name = "TIME", default_value = "")]
    pub at: String,
    /// time after which to ring the alarm from now, e.g. 5s or 1h15m
    #[arg(long = "in", value_name = "DURATION", default_value = "")]
    pub delay: String,
    /// alarm message
    #[arg(long)]
    pub msg: Option<String>,
    /// config file to use instead of the default one
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// write the default config file and exit
    #[arg(long)]
    pub init: bool,
    /// overwrite an existing config file with --init
    #[arg(long, short, requires = "init")]
    pub force: bool,
    /// alarm message, used when --msg is not given
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,
}

impl Args {
    /// parses the process arguments, accepting `-at`/`-in`/`-msg` as well
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The time the alarm should ring, exactly one of `at` and `in` has to be non-empty.
    ///
    /// Reads nothing but the command line.
    pub fn time_spec(&self) -> AppResult<TimeSpec> {
        match (self.at.is_empty(), self.delay.is_empty()) {
            (false, true) => Ok(TimeSpec::parse_absolute(&self.at)?),
            (true, false) => Ok(TimeSpec::parse_relative(&self.delay)?),
            _ => Err(AppError::Usage),
        }
    }

    /// `msg`, or the trailing words, or `default_title` when both are empty
    #[must_use]
    pub fn title(&self, default_title: &str) -> String {
        let title = match &self.msg {
            Some(msg) if !msg.is_empty() => msg.clone(),
            _ => self.message.join(" "),
        };
        if title.is_empty() {
            default_title.to_string()
        } else {
            title
        }
    }
}

/// Rewrites `-at`, `-in` and `-msg` (and their `=value` forms) to the double-dash
/// spelling clap understands. Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut rest_is_positional = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if rest_is_positional {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                rest_is_positional = true;
                return arg;
            }
            let Some(flag) = text.strip_prefix('-').filter(|flag| !flag.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
