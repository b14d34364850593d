use clap::{CommandFactory, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use csv2gedcom::diagnostics::LogSink;
use csv2gedcom::emitter::Emitter;
use csv2gedcom::errors::{OError, Result};
use csv2gedcom::gedcom::Header;
use csv2gedcom::input;
use log::{error, info, warn};
use std::io::{self, Write};
use std::{error, fs, process};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (CSV)
    infile: Option<String>,
    /// Output file (GEDCOM), standard output if not given
    #[arg(short, long)]
    outfile: Option<String>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Receiving system
    #[arg(long)]
    dest: Option<String>,
    /// File name recorded in the header
    #[arg(long)]
    file_name: Option<String>,
    /// Copyright notice
    #[arg(long)]
    copyright: Option<String>,
    /// Language of the data
    #[arg(long)]
    lang: Option<String>,
    /// Submitter name
    #[arg(long)]
    submitter: Option<String>,
    /// Submitter address line (repeat for more lines)
    #[arg(long)]
    address: Vec<String>,
    /// Submitter phone number
    #[arg(long)]
    phone: Option<String>,
    /// Submitter email address
    #[arg(long)]
    email: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn build_header(args: &Args) -> Result<Header> {
    let mut header = Header::default();
    if let Some(dest) = &args.dest {
        header.destination = dest.clone();
    }
    if let Some(file_name) = &args.file_name {
        header.file_name = file_name.clone();
    }
    if args.copyright.is_some() {
        header.copyright = args.copyright.clone();
    }
    if let Some(lang) = &args.lang {
        header.language = lang.clone();
    }
    if let Some(name) = &args.submitter {
        header.submitter.name = name.clone();
    }
    if !args.address.is_empty() {
        header.submitter.address = args.address.clone();
    }
    if args.phone.is_some() {
        header.submitter.phone = args.phone.clone();
    }
    if args.email.is_some() {
        header.submitter.email = args.email.clone();
    }
    header.validate()?;
    Ok(header)
}

fn process(args: &Args, infile: &str) -> Result<()> {
    let header = build_header(args)?;
    info!(target: "csv2gedcom", "read: {infile}");
    let people = input::read_people(infile)?;
    if people.is_empty() {
        warn!(target: "csv2gedcom", "no individuals in {infile}");
    }
    let emitter = Emitter::with_header(&people, header);
    let mut diagnostics = LogSink::default();
    match &args.outfile {
        Some(outfile) => {
            let file = fs::File::create(outfile)?;
            let mut writer = io::BufWriter::new(file);
            emitter.render(&mut writer, &mut diagnostics)?;
            writer.flush()?;
            info!(target: "csv2gedcom", "wrote: {outfile}");
        }
        None => {
            let mut writer = io::BufWriter::new(io::stdout().lock());
            emitter.render(&mut writer, &mut diagnostics)?;
            writer.flush()?;
        }
    }
    if diagnostics.reported > 0 {
        warn!(
            target: "csv2gedcom",
            "{} parent references could not be resolved",
            diagnostics.reported
        );
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let Some(infile) = &args.infile else {
        error!(
            target: "csv2gedcom",
            "missing CSV file\n{}",
            Args::command().render_usage()
        );
        return;
    };
    match process(&args, infile) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "csv2gedcom", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "csv2gedcom", "{e}");
                        error!(target: "csv2gedcom", "{e2}");
                    }
                },
                None => error!(target: "csv2gedcom", "{e}"),
            }
            process::exit(1);
        }
    }
}
