/* ************************************************************************ **
** This file is part of mvpusc, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use std::fmt;
use std::path::{Path, PathBuf};
use log::{Level, LevelFilter};

/// Builder-style setup for logging.
///
/// Everything goes to stderr (stdout is reserved for output documents),
/// and optionally also to a file.
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

impl GlobalLogger {
    /// Also write the log to a file, truncating it.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level {
            i32::MIN..=0 => Verbosity::Default,
            1 => Verbosity::Loud,
            _ => Verbosity::Louder,
        };
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud, Louder }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl Verbosity {
    fn ours(self) -> LevelFilter {
        match self {
            Verbosity::Default => LevelFilter::Info,
            Verbosity::Loud => LevelFilter::Debug,
            Verbosity::Louder => LevelFilter::Trace,
        }
    }
}

impl GlobalLogger {
    /// Install the logger.  Fails if a logger was already installed.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let start = Instant::now();
        let mut dispatch = fern::Dispatch::new();
        dispatch = dispatch.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel(record.level()),
                    message))
            })
            .level(LevelFilter::Warn)
            .level_for("mvpusc_tasks", self.verbosity.ours())
            .level_for("mvpusc_config_utils", self.verbosity.ours())
            .chain(std::io::stderr());

        if let Some(path) = self.path.as_ref() {
            dispatch = dispatch.chain(fern::log_file(path)?);
        }

        dispatch.apply().map_err(|e| format_err!("{}", e))?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ansi_term::Colour;

        let style = match self.0 {
            Level::Error => Colour::Red.bold(),
            Level::Warn  => Colour::Red.normal(),
            Level::Info  => Colour::Cyan.bold(),
            Level::Debug => Colour::Yellow.dimmed(),
            Level::Trace => Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.0.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates() {
        let mut logger = GlobalLogger::default();
        assert_eq!(logger.verbosity.ours(), LevelFilter::Info);
        assert_eq!(logger.verbosity(-3).verbosity, Verbosity::Default);
        assert_eq!(logger.verbosity(1).verbosity.ours(), LevelFilter::Debug);
        assert_eq!(logger.verbosity(40).verbosity.ours(), LevelFilter::Trace);
    }

    #[test]
    fn colorized_level_keeps_the_name() {
        let s = ColorizedLevel(Level::Warn).to_string();
        assert!(s.contains("WARN"), "{:?}", s);
    }
}
