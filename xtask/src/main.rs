use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "headvec workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the vector workload suite once per global allocator and compare
    Bench {
        /// Lower sample size and measurement time
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Only rebuild the report from existing criterion output
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Restrict the run to these allocators (e.g. `system,mimalloc`)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },
}

const ALLOCATORS: &[&str] = &["system", "mimalloc", "snmalloc", "jemalloc"];

const REPORT_PATH: &str = "benchmark_results/report.md";

/// `estimates.json`, as written by criterion.
#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// `benchmark.json`, as written by criterion. Only the throughput matters here.
#[derive(Deserialize)]
struct BenchmarkInfo {
    throughput: Option<ThroughputInfo>,
}

/// Byte throughputs fail to parse and count as one operation per iteration.
#[derive(Deserialize)]
enum ThroughputInfo {
    Elements(u64),
}

/// Operations per second, keyed by workload then allocator.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            only,
        } => {
            let allocators = select_allocators(&only)?;
            if !report_only {
                run_benchmarks(&allocators, quick)?;
            }
            let results = collect_results(Path::new("target/criterion"))?;
            write_report(&results, &allocators, Path::new(REPORT_PATH))?;
        }
    }

    Ok(())
}

fn select_allocators(only: &[String]) -> Result<Vec<&'static str>> {
    if only.is_empty() {
        return Ok(ALLOCATORS.to_vec());
    }
    only.iter()
        .map(|name| {
            ALLOCATORS
                .iter()
                .copied()
                .find(|known| *known == name.as_str())
                .with_context(|| format!("unknown allocator `{name}`, expected one of {ALLOCATORS:?}"))
        })
        .collect()
}

fn run_benchmarks(allocators: &[&str], quick: bool) -> Result<()> {
    println!("Compiling benchmark suite...");
    let status = Command::new("cargo")
        .args(["build", "--bench", "suite", "--release"])
        .status()
        .context("failed to spawn cargo")?;
    if !status.success() {
        bail!("failed to compile the benchmark suite");
    }

    for &allocator in allocators {
        println!("\n>>> Benchmarking with the {allocator} allocator");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0")
            .env("RUSTFLAGS", "-C opt-level=3 -C codegen-units=1")
            .args(["bench", "--bench", "suite", "--no-default-features", "--features"])
            .arg(format!("alloc-{allocator}"))
            // Criterion arguments follow `--`.
            .args(["--", "--save-baseline", allocator]);

        if quick {
            cmd.args(["--measurement-time", "0.1", "--sample-size", "10", "--noplot"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run the suite for {allocator}"))?;
        if status.success() {
            println!("Finished {allocator} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: the suite failed for {allocator}");
        }
    }

    Ok(())
}

/// Walks criterion's output tree. Each `<workload>/<baseline>/estimates.json`
/// contributes one cell of the report.
fn collect_results(root: &Path) -> Result<Results> {
    let mut results = Results::new();
    if !root.exists() {
        eprintln!("No criterion output found at {}", root.display());
        return Ok(results);
    }

    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.file_name().is_some_and(|name| name == "estimates.json") {
                if let Some((workload, baseline, ops)) = read_measurement(&path)? {
                    results.entry(workload).or_default().insert(baseline, ops);
                }
            }
        }
    }

    Ok(results)
}

fn read_measurement(estimates_path: &Path) -> Result<Option<(String, String, f64)>> {
    let Some(baseline_dir) = estimates_path.parent() else {
        return Ok(None);
    };
    let Some(workload_dir) = baseline_dir.parent() else {
        return Ok(None);
    };
    let baseline = file_name(baseline_dir);
    let workload = file_name(workload_dir);
    if baseline == "report" || workload == "report" || !ALLOCATORS.contains(&baseline.as_str()) {
        return Ok(None);
    }

    let estimates: Estimates = serde_json::from_str(&fs::read_to_string(estimates_path)?)
        .with_context(|| format!("parsing {}", estimates_path.display()))?;
    let time_ns = estimates.mean.point_estimate;
    if time_ns <= 0.0 {
        return Ok(None);
    }

    let elements = fs::read_to_string(workload_dir.join("benchmark.json"))
        .ok()
        .and_then(|content| serde_json::from_str::<BenchmarkInfo>(&content).ok())
        .and_then(|info| info.throughput)
        .map_or(1.0, |ThroughputInfo::Elements(n)| n as f64);

    Ok(Some((workload, baseline, elements * 1e9 / time_ns)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

fn write_report(results: &Results, allocators: &[&str], path: &Path) -> Result<()> {
    let mut out = String::from("# headvec Allocator Comparison\n\n");

    out.push_str("| Workload |");
    for allocator in allocators {
        write!(out, " {allocator} (ops/s) | vs system |")?;
    }
    out.push_str("\n|---|");
    for _ in allocators {
        out.push_str("---|---|");
    }
    out.push('\n');

    for (workload, by_allocator) in results {
        write!(out, "| {workload} |")?;
        let system = by_allocator.get("system").copied().unwrap_or(0.0);
        for allocator in allocators {
            match by_allocator.get(*allocator) {
                Some(&ops) => {
                    let relative = if system > 0.0 { ops / system } else { 0.0 };
                    write!(out, " {} | **{relative:.2}x** |", format_ops(ops))?;
                }
                None => out.push_str(" N/A | - |"),
            }
        }
        out.push('\n');
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
