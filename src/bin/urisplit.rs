//! Reads URIs line by line from standard input or from the named files
//! and prints each component. Exits with status 1 if any line failed to
//! parse.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use uri_parts::split;

fn value_or_none(value: Option<impl Display>) -> String {
    match value {
        Some(v) => format!("\"{v}\""),
        None => "None".to_owned(),
    }
}

fn read_stream(input: impl BufRead) -> io::Result<bool> {
    let mut all_ok = true;
    for line in input.lines() {
        let line = line?;
        println!("URI: {line}");
        let Some(parts) = split(&line) else {
            println!(" parse failed");
            all_ok = false;
            continue;
        };
        let auth = parts.authority.as_ref();
        println!(" scheme: {}", value_or_none(parts.scheme));
        println!(" userinfo: {}", value_or_none(auth.and_then(|a| a.userinfo)));
        println!(" host: {}", value_or_none(auth.map(|a| a.host)));
        println!(" port: {}", value_or_none(auth.and_then(|a| a.port)));
        println!(" path: \"{}\"", parts.path);
        println!(" query: {}", value_or_none(parts.query));
        println!(" fragment: {}", value_or_none(parts.fragment));
    }
    Ok(all_ok)
}

fn run(input: &mut dyn BufRead) -> ExitCode {
    match read_stream(input) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut exit = ExitCode::SUCCESS;

    if args.is_empty() {
        exit = run(&mut io::stdin().lock());
    } else {
        for arg in &args {
            match File::open(arg) {
                Ok(file) => {
                    if run(&mut BufReader::new(file)) != ExitCode::SUCCESS {
                        exit = ExitCode::FAILURE;
                    }
                }
                Err(e) => {
                    eprintln!("Error: couldn't open {arg}: {e}");
                    exit = ExitCode::FAILURE;
                }
            }
        }
    }
    exit
}
