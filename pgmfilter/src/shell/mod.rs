//! Command shell
//!
//! A thin operator-facing layer over the filter pipeline. Each command
//! decodes an image, runs one filter and encodes the result. Failures are
//! reported on the shell's output and never end the session.

mod command;
mod settings;

pub use command::{Command, default_output_name, parse_command, tokenize};
pub use settings::{ENCODING_VAR, SEED_VAR, ShellSettings};

use crate::filter::{FilterError, MedianSelector, apply_filter};
use crate::io::{IoError, read_pgm, write_pgm};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Name printed in the welcome banner.
pub const BRAND_NAME: &str = "pgmfilter";

/// Command summary printed by `help`.
pub const HELP: &str = "\
Here are the commands you can use:
help                                    - prints available commands
avg input.pgm [output.pgm]              - applies averaging filter to input.pgm
median input.pgm [output.pgm]           - applies median filter to input.pgm
verprewitt input.pgm [output.pgm]       - applies prewitt vertical operator to input.pgm
horprewitt input.pgm [output.pgm]       - applies prewitt horizontal operator to input.pgm
sobel input.pgm [output.pgm]            - applies sobel filter to input.pgm
custom input.pgm [output.pgm] --kernel \"<rows>\" [options]
                                        - applies a custom kernel to input.pgm
    --kernel \"1 1 1; 0 0 0; -1 -1 -1\"   kernel rows, separated by ';'
    --coef <value>                      kernel coefficient (default 1)
    --mirror                            fill the output border by mirroring
    --pre                               pad before the kernel instead of after
    --clip                              clip instead of min-max normalization
exit                                    - quits the program
";

/// Errors reported by a shell command
#[derive(Debug, Error)]
pub enum ShellError {
    /// Decoding or encoding failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// The filter rejected its input or configuration
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The command line is malformed
    #[error("{0}")]
    Usage(String),
}

/// Result type for shell commands
pub type ShellResult<T> = Result<T, ShellError>;

/// What the read loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command
    Continue,
    /// Leave the loop
    Exit,
}

/// Command interpreter writing operator messages to `W`.
pub struct Shell<W: Write> {
    out: W,
    settings: ShellSettings,
    selector: MedianSelector,
}

impl<W: Write> Shell<W> {
    /// Create a shell writing to `out`.
    pub fn new(out: W, settings: ShellSettings) -> Self {
        Self {
            out,
            settings,
            selector: MedianSelector::new(settings.seed),
        }
    }

    /// Get the session settings.
    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// Print the banner and the command list.
    pub fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.out, "Welcome to {BRAND_NAME}")?;
        self.help()
    }

    /// Print the command list.
    pub fn help(&mut self) -> io::Result<()> {
        self.out.write_all(HELP.as_bytes())
    }

    /// Print the input prompt.
    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    /// Run one input line, reporting any failure on the output.
    ///
    /// Only a failure to write to the output itself is returned.
    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        match self.run_line(line) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                debug!(error = %e, "command failed");
                writeln!(self.out, "Error: {e}")?;
                if matches!(e, ShellError::Usage(_)) {
                    writeln!(self.out, "Tip: type 'help' for usage")?;
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one input line, returning any failure.
    ///
    /// Blank lines do nothing.
    pub fn run_line(&mut self, line: &str) -> ShellResult<Flow> {
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        self.run_args(&tokens)
    }

    /// Run one already tokenized command.
    pub fn run_args<S: AsRef<str>>(&mut self, args: &[S]) -> ShellResult<Flow> {
        match parse_command(args)? {
            Command::Help => {
                self.help().map_err(IoError::from)?;
                Ok(Flow::Continue)
            }
            Command::Exit => Ok(Flow::Exit),
            Command::Filter {
                kind,
                config,
                input,
                output,
            } => {
                let raster = read_pgm(&input)?;
                let filtered = apply_filter(&kind, &raster, &config, &mut self.selector)?;
                write_pgm(&filtered, &output, self.settings.encoding)?;
                info!(
                    filter = kind.name(),
                    input = %input.display(),
                    output = %output.display(),
                    "filter applied"
                );
                self.report_written(&output).map_err(IoError::from)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report_written(&mut self, output: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "Wrote to output {} successfully",
            output.display()
        )
    }

    /// Consume the shell, returning its output writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
