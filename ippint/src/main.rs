#[macro_use]
extern crate clap;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process;

use clap::Arg;
use ippvm::Machine;

#[derive(Debug)]
enum Error {
    /// Neither --source nor --input was given.
    MissingInput,
    Io(io::Error, PathBuf),
    Load(ippint::LoadError),
    Fault(ippvm::Fault),
}

impl Error {
    fn code(&self) -> i32 {
        match self {
            Error::MissingInput => 10,
            Error::Io(..) => 11,
            Error::Load(err) => err.code(),
            Error::Fault(fault) => fault.code(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingInput => {
                f.write_str("At least one of --source or --input must be present.")
            }
            Error::Io(err, path) => {
                write!(f, "Opening \"{}\" failed: {}", path.display(), err)
            }
            Error::Load(err) => err.fmt(f),
            Error::Fault(fault) => fault.fmt(f),
        }
    }
}

fn main() {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("source")
                .long("source")
                .takes_value(true)
                .value_name("FILE")
                .help("File with the XML representation of the source code"),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("File with input lines consumed by READ"),
        )
        .get_matches_safe()
        .unwrap_or_else(|err| match err.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => err.exit(),
            _ => {
                eprintln!("{}", err.message);
                process::exit(10);
            }
        });

    let source = matches.value_of("source");
    let input = matches.value_of("input");

    match interpret(source, input) {
        Ok(status) => process::exit(status),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.code());
        }
    }
}

fn interpret(source: Option<&str>, input: Option<&str>) -> Result<i32, Error> {
    if source.is_none() && input.is_none() {
        return Err(Error::MissingInput);
    }

    let xml = match source {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };

    let program = ippint::load_program(&xml).map_err(Error::Load)?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file =
                File::open(path).map_err(|err| Error::Io(err, PathBuf::from(path)))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    Machine::new(&program, reader, stdout.lock())
        .run()
        .map_err(Error::Fault)
}

fn read_file(path: &str) -> Result<String, Error> {
    let mut source = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut source))
        .map_err(|err| Error::Io(err, PathBuf::from(path)))?;
    Ok(source)
}

fn read_stdin() -> Result<String, Error> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, PathBuf::from("<stdin>")))?;
    Ok(source)
}
