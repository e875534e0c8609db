use std::io;
use std::path::PathBuf;
use std::process;

use lox_lang::Lox;

const USAGE: &str = "Usage: lox [-i] [-e FILE | -l FILE] [script]

  -i          enter the REPL after running the script
  -e, -l FILE run FILE before the main script (loaded in order given)
  -h          print this message";

struct Args {
    preload: Vec<PathBuf>,
    script: Option<PathBuf>,
    interactive: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut preload = Vec::new();
    let mut script = None;
    let mut interactive = false;

    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "-i" => interactive = true,
            "-e" | "-l" => {
                let file = raw.next().ok_or_else(|| format!("{arg} requires a file argument"))?;
                preload.push(PathBuf::from(file));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }

    Ok(Args { preload, script, interactive })
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("lox: {message}");
            eprintln!("{USAGE}");
            process::exit(64);
        }
    };

    let mut lox = Lox::new(io::stdout());

    let mut exit_code = 0;
    for path in &args.preload {
        let code = lox.run_file(path);
        if code != 0 {
            exit_code = code;
        }
    }

    match &args.script {
        Some(path) => {
            let code = lox.run_file(path);
            if code != 0 {
                exit_code = code;
            }
            if args.interactive {
                lox.run_repl();
            }
        }
        None => lox.run_repl(),
    }

    process::exit(exit_code);
}
