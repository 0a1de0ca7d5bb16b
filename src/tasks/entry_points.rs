/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::Settings;
use crate::eval::{self, Report};
use crate::ui::logging::GlobalLogger;

use mvpusc_config_utils::YamlRead;

use clap::{App, Arg, ArgMatches};
use failure::ResultExt;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        // The logger may not exist yet if argument parsing failed.
        for cause in e.iter_chain() {
            error!("{}", cause);
            if !log_enabled!(log::Level::Error) {
                eprintln!("error: {}", cause);
            }
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("(for a backtrace, try again with RUST_BACKTRACE=1)");
        }
        std::process::exit(1);
    });
}

/// Arguments shared by every binary that logs.
#[derive(Debug)]
struct LoggingArgs {
    verbosity: i32,
    log_file: Option<PathBuf>,
}

impl LoggingArgs {
    fn args() -> Vec<Arg<'static, 'static>> {
        vec![
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("log more (may be repeated)"),
            Arg::with_name("log")
                .long("log")
                .takes_value(true)
                .value_name("LOGFILE")
                .help("also write the log to this file"),
        ]
    }

    fn from_matches(m: &ArgMatches<'_>) -> Self {
        LoggingArgs {
            verbosity: m.occurrences_of("verbose") as i32,
            log_file: m.value_of_os("log").map(PathBuf::from),
        }
    }

    fn init_global_logger(&self) -> FailResult<()> {
        let mut logger = GlobalLogger::default();
        logger.verbosity(self.verbosity);
        if let Some(path) = &self.log_file {
            logger.path(path);
        }
        logger.apply()
    }
}

#[derive(Debug)]
struct LinalgRefArgs {
    logging: LoggingArgs,
    config: PathBuf,
    output: Option<PathBuf>,
}

impl LinalgRefArgs {
    fn app() -> App<'static, 'static> {
        App::new("mvpusc-linalg-ref")
            .about("Evaluate linear algebra reference cases from yaml, writing json.")
            .args(&LoggingArgs::args())
            .args(&[
                Arg::with_name("config")
                    .short("c")
                    .long("config")
                    .takes_value(true)
                    .required(true)
                    .value_name("CONFIG")
                    .help("yaml file listing the cases to evaluate"),
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .takes_value(true)
                    .value_name("OUTPUT")
                    .help("write the json report here instead of stdout"),
            ])
    }

    fn from_matches(m: &ArgMatches<'_>) -> FailResult<Self> {
        let config = match m.value_of_os("config") {
            Some(path) => PathBuf::from(path),
            None => bail!("--config is required"),
        };
        Ok(LinalgRefArgs {
            logging: LoggingArgs::from_matches(m),
            config,
            output: m.value_of_os("output").map(PathBuf::from),
        })
    }
}

/// Read a reference-value config and evaluate it.
pub fn run_linalg_ref(config: &Path) -> FailResult<Report> {
    let settings = Settings::from_path(config)?;
    info!("Read {} cases from {}", settings.cases.len(), config.display());
    eval::evaluate(&settings)
}

/// Write a report as pretty-printed json, followed by a newline.
pub fn write_report(mut w: impl Write, report: &Report) -> FailResult<()> {
    serde_json::to_writer_pretty(&mut w, report)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

// %% CRATES: binary: mvpusc-linalg-ref %%
pub fn linalg_ref() {
    wrap_result_main(|| {
        let args = LinalgRefArgs::from_matches(&LinalgRefArgs::app().get_matches())?;
        args.logging.init_global_logger()?;

        let report = run_linalg_ref(&args.config)?;

        match &args.output {
            Some(path) => {
                let file = std::fs::File::create(path)
                    .with_context(|e| format!("while creating {}: {}", path.display(), e))?;
                write_report(std::io::BufWriter::new(file), &report)?;
                info!("Wrote {}", path.display());
            },
            None => write_report(std::io::stdout().lock(), &report)?,
        }
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<LinalgRefArgs, String> {
        let matches = LinalgRefArgs::app().get_matches_from_safe(argv).map_err(|e| e.to_string())?;
        LinalgRefArgs::from_matches(&matches).map_err(|e| e.to_string())
    }

    #[test]
    fn argument_groups() {
        let args = parse(&["mvpusc-linalg-ref", "-vv", "--log", "run.log", "-c", "cases.yaml"]).unwrap();
        assert_eq!(args.logging.verbosity, 2);
        assert_eq!(args.logging.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(args.config, PathBuf::from("cases.yaml"));
        assert_eq!(args.output, None);

        let args = parse(&["mvpusc-linalg-ref", "--config=a.yaml", "-o", "out.json"]).unwrap();
        assert_eq!(args.logging.verbosity, 0);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn config_is_required() {
        let err = parse(&["mvpusc-linalg-ref", "-o", "out.json"]).unwrap_err();
        assert!(err.contains("--config"), "{}", err);
    }
}
