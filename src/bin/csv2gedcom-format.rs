use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::info;
use std::fs;
use std::io::{self, Write};

/// Normalize a delimited file for csv2gedcom: trim every cell and write clean CSV
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file
    infile: String,
    /// Output file (CSV), standard output if not given
    outfile: Option<String>,
    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn normalize(delimiter: u8, indata: &str, out: impl Write) -> Result<usize> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(indata.as_bytes());
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);
    let mut rows = 0;
    for record in rdr.records() {
        let record = record.with_context(|| format!("cannot parse row {}", rows + 1))?;
        wtr.write_record(&record)?;
        rows += 1;
    }
    wtr.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let delimiter = u8::try_from(args.delimiter).context("delimiter must be an ASCII character")?;
    info!(target: "csv2gedcom", "read: {}", args.infile);
    let raw = fs::read(&args.infile).with_context(|| format!("cannot read {}", args.infile))?;
    let indata = String::from_utf8_lossy(&raw);
    let rows = match &args.outfile {
        Some(outfile) => {
            let file =
                fs::File::create(outfile).with_context(|| format!("cannot create {outfile}"))?;
            normalize(delimiter, &indata, io::BufWriter::new(file))?
        }
        None => normalize(delimiter, &indata, io::stdout().lock())?,
    };
    info!(target: "csv2gedcom", "rows written: {rows}");
    Ok(())
}
