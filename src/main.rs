use env_logger::Env;
use geojson_bbox::output::{Format, Output};
use geojson_bbox::{Bounded, GeoJson, Strategy};
use log::info;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "geojson_bbox",
    about = "Computes the bounding box of all geometries in a GeoJSON file"
)]
struct Opt {
    /// Log progress and timings
    #[structopt(short, long)]
    verbose: bool,

    /// Reduce on the current thread only
    #[structopt(long)]
    sequential: bool,

    /// Number of worker threads for the parallel reduction
    #[structopt(long)]
    threads: Option<usize>,

    #[structopt(short, long, default_value = "text", possible_values = &Format::VARIANTS)]
    format: Format,

    /// Print time to parse and time to bbox
    #[structopt(long)]
    timings: bool,

    #[structopt(parse(from_os_str))]
    path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    let level = if opt.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Some(threads) = opt.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    let strategy = if opt.sequential {
        Strategy::Sequential
    } else {
        Strategy::Parallel
    };

    // reading into a string first is faster than parsing from the file
    let start = Instant::now();
    info!("Reading file {}", opt.path.display());
    let data = fs::read_to_string(&opt.path)?;
    info!("Parsing JSON");
    let document: GeoJson = data.parse()?;
    let parse_time = start.elapsed();
    info!("Parsed in {:?}", parse_time);

    let start = Instant::now();
    let bbox = document.bbox_with(strategy)?;
    let bbox_time = start.elapsed();
    info!("Computed bbox ({:?}) in {:?}", strategy, bbox_time);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    bbox.write_as(opt.format, &mut writer)?;
    if opt.timings {
        writeln!(writer, "Time to parse: {}", parse_time.as_secs_f64())?;
        writeln!(writer, "Time to bbox: {}", bbox_time.as_secs_f64())?;
    }
    Ok(())
}
