use clap::Parser;
use log::info;
use qreg::error::{SimError, EXIT_CONFIG};
use qreg::runtime::state_vector::StateVector;
use serde::Serialize;
use serde_json::to_writer_pretty;
use std::fs::File;
use std::process;
use std::time::Instant;


const QREG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "qreg", version = QREG_VERSION,
    about = "qreg - parallel n-qubit quantum register simulator.\n\
             Builds a random 2^QUBITS state vector and applies the normalized\n\
             Hadamard transform to a chosen bit position inside a timed region.",
    long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Initializes a random state vector and applies the transform.
    Run {
        /// Number of qubits; the vector has 2^QUBITS amplitudes.
        qubits: usize,
        /// Target bit position, 1-indexed from the most significant bit.
        bit: usize,
        /// Worker threads for the parallel regions (default: all logical CPUs).
        #[arg(long)]
        threads: Option<usize>,
        /// Apply the transform this many times inside the timed region.
        #[arg(long, default_value_t = 1)]
        repeat: usize,
        /// Print the resulting vector, one amplitude per line.
        #[arg(long)]
        dump: bool,
        /// Write a JSON run summary to this path.
        #[arg(long, value_name = "PATH")]
        json: Option<String>,
    },
    /// Prints the qreg version.
    Version,
}

#[derive(Serialize)]
struct RunSummary {
    qubits: usize,
    bit: usize,
    threads: usize,
    repeat: usize,
    elapsed_secs: f64,
    norm_sqr: f64,
}

// exit codes: 0 success, EXIT_CONFIG bad configuration, EXIT_RESOURCE
// (raised inside the library) allocation failure
fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => println!("qreg {}", QREG_VERSION),
        Commands::Run {
            qubits,
            bit,
            threads,
            repeat,
            dump,
            json,
        } => run(qubits, bit, threads, repeat, dump, json),
    }
}

fn run(
    qubits: usize,
    bit: usize,
    threads: Option<usize>,
    repeat: usize,
    dump: bool,
    json: Option<String>,
) {
    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        // the pool may already exist (e.g. under a test harness); not fatal
        log::warn!("could not size the global thread pool: {}", e);
    }

    let mut sv = match StateVector::new(qubits) {
        Ok(sv) => sv,
        Err(e) => fail_usage(&e),
    };
    info!(
        "filling {} amplitudes across {} workers",
        sv.size(),
        threads
    );
    sv.fill_random(threads);

    let started = Instant::now();
    for _ in 0..repeat {
        if let Err(e) = sv.transform(bit) {
            fail_usage(&e);
        }
    }
    let elapsed_secs = started.elapsed().as_secs_f64();
    let norm_sqr = sv.norm_sqr_total();

    println!(
        "transform of bit {} on {} qubits, {} application(s): {:.6} s",
        bit, qubits, repeat, elapsed_secs
    );
    info!("total squared magnitude after transform: {}", norm_sqr);

    if dump {
        if let Err(e) = sv.print() {
            eprintln!("error: failed to dump the vector: {}", e);
            process::exit(1);
        }
    }

    if let Some(path) = json {
        let summary = RunSummary {
            qubits,
            bit,
            threads,
            repeat,
            elapsed_secs,
            norm_sqr,
        };
        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error: failed to create {}: {}", path, e);
                process::exit(1);
            }
        };
        if let Err(e) = to_writer_pretty(file, &summary) {
            eprintln!("error: failed to write {}: {}", path, e);
            process::exit(1);
        }
        info!("run summary written to {}", path);
    }
}

// both recoverable variants come from run configuration (qubit count or
// bit position), so Configuration and Range alike exit with EXIT_CONFIG
fn fail_usage(e: &SimError) -> ! {
    match e {
        SimError::Configuration { .. } | SimError::Range { .. } => {
            eprintln!("error: {}", e);
            process::exit(EXIT_CONFIG);
        }
    }
}
