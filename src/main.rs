#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(
    clippy::use_self,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::missing_panics_doc
)]

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::CommandFactory;
use log::{error, info};
use roosty_alarm::{
    alarm::{self, Alarm},
    cli::Args,
    config::Config,
    errors::{AppError, AppResult},
    surface::DesktopNotifier,
};

fn main() -> ExitCode {
    // initilize the logger
    if let Err(e) = simple_file_logger::init_logger!("roosty_alarm") {
        eprintln!("couldn't initialize logger: {e:?}");
    }

    let args = Args::parse_args();
    let mut pause_on_error = false;
    match run(&args, &mut pause_on_error) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            if e.is_usage() {
                eprintln!("{}", Args::command().render_help());
            }
            if pause_on_error && io::stdin().is_terminal() {
                eprintln!("press enter to exit");
                let _ = io::stdin().read_line(&mut String::new());
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args, pause_on_error: &mut bool) -> AppResult<()> {
    if args.init {
        let config_path = config_path(args)?;
        if args.force || !config_path.exists() {
            Config::new().save(&config_path)?;
            println!("wrote {}", config_path.display());
        } else {
            return Err(AppError::Config(format!(
                "{} already exists, use --force to overwrite it",
                config_path.display()
            )));
        }
        return Ok(());
    }

    // a bad command line is reported as such, whatever state the config is in
    let spec = args.time_spec()?;

    let config = Config::load_or_default(&config_path(args)?)?;
    *pause_on_error = config.pause_on_error;

    let alarm = Alarm {
        spec,
        title: args.title(&config.default_title),
    };
    info!("starting alarm \"{}\" {}", alarm.title, alarm.spec);
    let now = chrono::Local::now().naive_local();
    alarm::run(&alarm, now, &mut DesktopNotifier::new(config))
}

fn config_path(args: &Args) -> AppResult<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => Config::config_path(),
    }
}
