use std::fs;
use std::path::PathBuf;

use arith_parser::Context;
use arith_parser::Lexer;
use arith_parser::parse;
use arith_parser::tokenize;
use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use miette::WrapErr;

#[derive(Parser, Debug)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Tokenize { filename: PathBuf },
    Parse { filename: PathBuf },
    Evaluate { filename: PathBuf },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Tokenize { filename } => {
            let file_contents = fs::read_to_string(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;

            for token in Lexer::new(filename.to_str(), &file_contents) {
                match token {
                    Ok(token) => println!("{token}"),
                    Err(e) => {
                        eprintln!("[line {}] Error: malformed numeric literal", e.line());
                        return Err(e.into());
                    }
                }
            }
        }
        Commands::Parse { filename } => {
            let file_contents = fs::read_to_string(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;

            let tokens = tokenize(&file_contents)?;
            let expr = parse(&tokens)?;
            println!("{expr}");
        }
        Commands::Evaluate { filename } => {
            let file_contents = fs::read_to_string(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;

            let tokens = tokenize(&file_contents)?;
            let expr = parse(&tokens)?;
            match expr.evaluate(&Context::default())? {
                Some(value) => println!("{value}"),
                None => println!("no value"),
            }
        }
    }
    Ok(())
}
