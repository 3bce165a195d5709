//! Command line parsing
//!
//! A command is a name followed by positional paths and, for `custom`,
//! options describing the kernel:
//!
//! ```text
//! avg|median|verprewitt|horprewitt|sobel <input> [output]
//! custom <input> [output] --kernel "<rows>" [--coef <f>] [--mirror] [--pre] [--clip]
//! ```

use super::{ShellError, ShellResult};
use crate::filter::{FilterConfig, FilterKind, Kernel, Normalization, PaddingPolicy, PaddingTiming};
use std::path::{Path, PathBuf};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the command list
    Help,
    /// Leave the shell
    Exit,
    /// Filter `input` into `output`
    Filter {
        kind: FilterKind,
        config: FilterConfig,
        input: PathBuf,
        output: PathBuf,
    },
}

/// Split a line into tokens.
///
/// Tokens are separated by whitespace; single or double quotes group
/// words into one token.
pub fn tokenize(line: &str) -> ShellResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quote.is_some() {
        return Err(ShellError::Usage("unterminated quote".into()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Default output path: `<stem>_<filter>.pgm` next to the input.
///
/// Only the last extension of the file name is removed.
pub fn default_output_name(input: &Path, filter: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_{filter}.pgm"))
}

fn builtin(name: &str) -> Option<FilterKind> {
    match name {
        "avg" => Some(FilterKind::Averaging),
        "median" => Some(FilterKind::Median),
        "verprewitt" => Some(FilterKind::VerticalPrewitt),
        "horprewitt" => Some(FilterKind::HorizontalPrewitt),
        "sobel" => Some(FilterKind::Sobel),
        _ => None,
    }
}

/// Options accepted by `custom`.
#[derive(Default)]
struct CustomOptions {
    kernel: Option<String>,
    coefficient: Option<f32>,
    mirror: bool,
    pre: bool,
    clip: bool,
}

impl CustomOptions {
    fn any(&self) -> bool {
        self.kernel.is_some() || self.coefficient.is_some() || self.mirror || self.pre || self.clip
    }

    fn into_filter(self) -> ShellResult<(FilterKind, FilterConfig)> {
        let text = self
            .kernel
            .ok_or_else(|| ShellError::Usage("custom needs --kernel \"<rows>\"".into()))?;
        let kernel = Kernel::parse(&text)?;

        let mut config = FilterConfig::default();
        if let Some(c) = self.coefficient {
            config = config.with_coefficient(c);
        }
        if self.mirror {
            config = config.with_padding_policy(PaddingPolicy::Mirror);
        }
        if self.pre {
            config = config.with_padding_timing(PaddingTiming::Pre);
        }
        if self.clip {
            config = config.with_normalization(Normalization::Clip);
        }
        Ok((FilterKind::Custom(kernel), config))
    }
}

/// Parse a tokenized command.
///
/// An empty token list is not a command; callers skip blank lines.
pub fn parse_command<S: AsRef<str>>(tokens: &[S]) -> ShellResult<Command> {
    let Some((name, rest)) = tokens.split_first() else {
        return Err(ShellError::Usage("empty command".into()));
    };
    let name: &str = name.as_ref();
    match name {
        "help" => return Ok(Command::Help),
        "exit" => return Ok(Command::Exit),
        _ => {}
    }
    let is_custom = name == "custom";
    if !is_custom && builtin(name).is_none() {
        return Err(ShellError::Usage(format!("cannot recognise command '{name}'")));
    }

    let mut positional = Vec::new();
    let mut options = CustomOptions::default();
    let rest: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
    let mut iter = rest.iter().copied();
    while let Some(token) = iter.next() {
        match token {
            "--kernel" => {
                let value = iter
                    .next()
                    .ok_or_else(|| ShellError::Usage("--kernel needs a value".into()))?;
                options.kernel = Some(value.to_string());
            }
            "--coef" => {
                let value = iter
                    .next()
                    .ok_or_else(|| ShellError::Usage("--coef needs a value".into()))?;
                let c = value.parse::<f32>().map_err(|_| {
                    ShellError::Usage(format!("'{value}' couldn't be processed as a float"))
                })?;
                options.coefficient = Some(c);
            }
            "--mirror" => options.mirror = true,
            "--pre" => options.pre = true,
            "--clip" => options.clip = true,
            flag if flag.starts_with("--") => {
                return Err(ShellError::Usage(format!("unknown option '{flag}'")));
            }
            path => positional.push(path),
        }
    }

    let (input, output) = match positional.as_slice() {
        [] => return Err(ShellError::Usage("no input provided".into())),
        [input] => (PathBuf::from(input), None),
        [input, output] => (PathBuf::from(input), Some(PathBuf::from(output))),
        [_, _, extra, ..] => {
            return Err(ShellError::Usage(format!("unexpected argument '{extra}'")));
        }
    };

    let (kind, config) = match builtin(name) {
        Some(kind) => {
            if options.any() {
                return Err(ShellError::Usage(format!(
                    "'{name}' takes no options; they only apply to custom"
                )));
            }
            let config = kind.default_config();
            (kind, config)
        }
        None => options.into_filter()?,
    };
    let output = output.unwrap_or_else(|| default_output_name(&input, kind.name()));
    Ok(Command::Filter {
        kind,
        config,
        input,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::AVERAGING_COEFFICIENT;

    fn parse(line: &str) -> ShellResult<Command> {
        parse_command(&tokenize(line)?)
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"custom in.pgm --kernel "1 1 1; 0 0 0" --pre"#).unwrap(),
            vec!["custom", "in.pgm", "--kernel", "1 1 1; 0 0 0", "--pre"]
        );
        assert_eq!(tokenize("  avg   a.pgm\n").unwrap(), vec!["avg", "a.pgm"]);
        assert_eq!(tokenize("avg ''").unwrap(), vec!["avg", ""]);
        assert!(tokenize("avg 'a.pgm").is_err());
    }

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_name(Path::new("lena.pgm"), "avg"),
            PathBuf::from("lena_avg.pgm")
        );
        assert_eq!(
            default_output_name(Path::new("dir/photo.v2.pgm"), "sobel"),
            PathBuf::from("dir/photo.v2_sobel.pgm")
        );
        assert_eq!(
            default_output_name(Path::new("noext"), "median"),
            PathBuf::from("noext_median.pgm")
        );
    }

    #[test]
    fn test_parse_builtin() {
        match parse("avg lena.pgm").unwrap() {
            Command::Filter {
                kind,
                config,
                input,
                output,
            } => {
                assert_eq!(kind, FilterKind::Averaging);
                assert_eq!(config.coefficient, AVERAGING_COEFFICIENT);
                assert_eq!(input, PathBuf::from("lena.pgm"));
                assert_eq!(output, PathBuf::from("lena_avg.pgm"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert_eq!(parse("exit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_custom() {
        let line = r#"custom in.pgm out.pgm --kernel "0 1 0; 1 1 1; 0 1 0" --coef 0.2 --mirror --clip"#;
        let cmd = parse(line).unwrap();
        let Command::Filter { kind, config, output, .. } = cmd else {
            panic!("expected filter command");
        };
        assert_eq!(kind.name(), "custom");
        assert_eq!(config.coefficient, 0.2);
        assert_eq!(config.padding_policy, PaddingPolicy::Mirror);
        assert_eq!(config.padding_timing, PaddingTiming::Post);
        assert_eq!(config.normalization, Normalization::Clip);
        assert_eq!(output, PathBuf::from("out.pgm"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("blur a.pgm"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("avg"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("avg a.pgm b.pgm c.pgm"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("avg a.pgm --pre"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("custom a.pgm"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("custom a.pgm --coef x --kernel '1'"), Err(ShellError::Usage(_))));
        assert!(matches!(
            parse("custom a.pgm --kernel '1 1; 1 1'"),
            Err(ShellError::Filter(_))
        ));
    }
}
