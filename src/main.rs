use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use xmlrecords::config::{OutputFormat, TransformConfig};
use xmlrecords::render::{render, HtmlSink, JsonLinesSink, RecordSink, TextSink};
use xmlrecords::{transform_reader, MappingTable};

type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Parser, Debug)]
#[command(name = "xmlrecords")]
#[command(about = "Print an XML document as labeled records, grouped under headers")]
struct Args {
    /// XML document to transform
    xml_path: PathBuf,

    /// Path dictionary (XMLPath,GermanPath,GermanLabel); overrides the config file
    #[arg(long = "mapping", value_name = "FILE")]
    mapping_path: Option<PathBuf>,

    /// Output format: text, html or json
    #[arg(long, value_parser = OutputFormat::parse)]
    format: Option<OutputFormat>,

    /// Config file; defaults to $XMLRECORDS_CONFIG_DIR/xmlrecords.json
    #[arg(long = "config", value_name = "FILE")]
    config_path: Option<PathBuf>,
}

fn run(args: Args) -> Result<usize, DynError> {
    let mut config = match &args.config_path {
        Some(path) => TransformConfig::load_from_file(path)?,
        None => TransformConfig::load_default()?,
    };
    if let Some(path) = args.mapping_path {
        config.mapping_path = Some(path);
    }
    if let Some(format) = args.format {
        config.format = format;
    }

    let table = match &config.mapping_path {
        Some(path) => MappingTable::load_from_file(path, &config.loader_options())?,
        None => {
            tracing::info!("[Main] No mapping dictionary configured, using element names");
            MappingTable::empty()
        }
    };

    let input = BufReader::new(File::open(&args.xml_path).map_err(|e| {
        format!("Failed to open {}: {e}", args.xml_path.display())
    })?);
    let stdout = io::stdout().lock();
    let mut sink: Box<dyn RecordSink> = match config.format {
        OutputFormat::Text => Box::new(TextSink::new(stdout)),
        OutputFormat::Html => Box::new(HtmlSink::new(stdout)),
        OutputFormat::Json => Box::new(JsonLinesSink::new(stdout)),
    };

    let written = render(transform_reader(input, &table), sink.as_mut())?;
    Ok(written)
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run(Args::parse()) {
        Ok(written) => tracing::info!("[Main] Rendered {} records", written),
        Err(err) => {
            eprintln!("xmlrecords: {err}");
            std::process::exit(1);
        }
    }
}
