use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

use umsg_compiler::{compile_file, output_path, write_if_changed, GenOptions, Target, UmsgError};

#[derive(Parser, Debug)]
#[command(name = "umsg-gen")]
#[command(about = "Generate Rust or C++ message code from .umsg schemas", long_about = None)]
struct Cli {
    /// Input `.umsg` schema files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory; namespaces become subdirectories
    #[arg(short, long)]
    out: PathBuf,

    /// Write generated code to stdout instead of files
    #[arg(long)]
    stdout: bool,

    /// Language of the generated code
    #[arg(short, long, value_enum, default_value_t = Lang::Rust)]
    lang: Lang,

    /// Print the parsed message descriptors as JSON instead of generating code
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Lang {
    Rust,
    Cpp,
}

impl From<Lang> for Target {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Rust => Target::Rust,
            Lang::Cpp  => Target::Cpp,
        }
    }
}

/// Process every input in order. The first failure aborts the whole run.
fn run(cli: &Cli, stdout: &mut impl Write) -> Result<(), UmsgError> {
    let target = Target::from(cli.lang);

    for input in &cli.inputs {
        let options = GenOptions::new(target).with_source(input);
        let (message, code) = compile_file(input, &options)?;

        if cli.json {
            let json = serde_json::to_string_pretty(&message).map_err(io::Error::from)?;
            writeln!(stdout, "{}", json)?;
            continue;
        }

        if cli.stdout {
            stdout.write_all(code.as_bytes())?;
            continue;
        }

        let path = output_path(&cli.out, &message, target);
        let outcome = write_if_changed(&path, &code)?;
        log::info!("{} -> {} ({:?})", input.display(), path.display(), outcome);
    }

    Ok(())
}

fn main() -> Result<(), UmsgError> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run(&cli, &mut handle)
}
