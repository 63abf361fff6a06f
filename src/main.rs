use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser as _};
use cre::{Parser, Syntax};

/// Command line interface to the cre regex library.
#[derive(Debug, clap::Parser)]
#[command(name = "cre")]
#[command(about = "Command line interface to the cre regex library.", long_about = None)]
struct Cli {
    /// Regular expression to compile
    regex: Option<String>,

    /// Print the compiled regex datastructure (always on for now)
    #[arg(short = 'd', long)]
    dump_regex: bool,

    /// Reject malformed patterns instead of building a best-effort tree
    #[arg(long)]
    strict: bool,
}

// Usage: cre [OPTION]... REGEX
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(regex) = cli.regex.as_deref() else {
        println!("error: must supply a regex");
        println!("{}", Cli::command().render_help());
        return Ok(ExitCode::SUCCESS);
    };

    println!("Regex: {regex}");

    let syntax = if cli.strict {
        Syntax::Strict
    } else {
        Syntax::Permissive
    };
    let pattern = match Parser::new(regex).with_syntax(syntax).parse() {
        Ok(Some(pattern)) => pattern,
        Ok(None) => return Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    // The dump is printed whether or not --dump-regex was given.
    let _ = cli.dump_regex;
    cre::print(&pattern)?;
    cre::free(pattern);

    Ok(ExitCode::SUCCESS)
}
