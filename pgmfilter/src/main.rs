use pgmfilter::shell::{Flow, Shell, ShellSettings};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = ShellSettings::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut shell = Shell::new(io::stdout().lock(), settings);

    // One-shot mode: run the command given on the command line
    if !args.is_empty() {
        return match shell.run_args(&args) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match interactive(&mut shell) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn interactive<W: Write>(shell: &mut Shell<W>) -> io::Result<()> {
    shell.welcome()?;
    let mut lines = io::stdin().lock().lines();
    loop {
        shell.prompt()?;
        let Some(line) = lines.next() else {
            break;
        };
        if shell.execute(&line?)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}
