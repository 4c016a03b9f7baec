//! intskey benchmark harness
//!
//! Mengukur latency hot path key:
//! - Encode: pack tiga field (i32, u8, i64)
//! - Decode: baca kembali ketiga field
//! - Compare: memcmp atas key 32 bytes
//! - Sort: urutkan key dengan distribusi Zipfian (skewed)
//!
//! Usage:
//!   cargo run --release --bin intskey_bench -- [OPTIONS]
//!
//! Log level diatur lewat `INTSKEY_LOG` (default: info).

use std::env;
use std::hint::black_box;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Zipf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use intskey::{KeyBuffer, KeyLayout};

/// Ukuran key untuk benchmark (4 words = 32 bytes)
const KEY_WORDS: usize = 4;

type BenchKey = KeyBuffer<KEY_WORDS>;

/// Benchmark configuration
#[derive(Debug, Clone)]
struct BenchConfig {
    iterations: usize,
    key_count: usize,
    theta: f64,
    seed: u64,
    dump: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            key_count: 100_000,
            theta: 0.99,
            seed: 42,
            dump: false,
        }
    }
}

impl BenchConfig {
    /// Default <- environment <- CLI args
    fn load() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.apply_args(env::args().skip(1))?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = env::var("INTSKEY_ITERATIONS") {
            self.iterations = v.parse().context("INTSKEY_ITERATIONS")?;
        }
        if let Ok(v) = env::var("INTSKEY_KEYS") {
            self.key_count = v.parse().context("INTSKEY_KEYS")?;
        }
        if let Ok(v) = env::var("INTSKEY_THETA") {
            self.theta = v.parse().context("INTSKEY_THETA")?;
        }
        if let Ok(v) = env::var("INTSKEY_SEED") {
            self.seed = v.parse().context("INTSKEY_SEED")?;
        }
        Ok(())
    }

    fn apply_args<I: Iterator<Item = String>>(&mut self, mut args: I) -> Result<()> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--iterations" | "-n" => {
                    self.iterations = next_value(&mut args, &arg)?;
                }
                "--keys" | "-k" => {
                    self.key_count = next_value(&mut args, &arg)?;
                }
                "--theta" | "-t" => {
                    self.theta = next_value(&mut args, &arg)?;
                }
                "--seed" | "-s" => {
                    self.seed = next_value(&mut args, &arg)?;
                }
                "--dump" | "-d" => {
                    self.dump = true;
                }
                "--help" | "-h" => {
                    println!("intskey benchmark - order-preserving integer keys\n");
                    println!("Usage: intskey_bench [OPTIONS]\n");
                    println!("Options:");
                    println!("  -n, --iterations <N>  Encode/decode/compare ops (default: 1000000)");
                    println!("  -k, --keys <N>        Keys in the sort workload (default: 100000)");
                    println!("  -t, --theta <F>       Zipfian skew, 0 = uniform (default: 0.99)");
                    println!("  -s, --seed <N>        RNG seed (default: 42)");
                    println!("  -d, --dump            Hex dump a sample key");
                    println!("  -h, --help            Show this help");
                    std::process::exit(0);
                }
                other => bail!("unknown option: {}", other),
            }
        }

        if self.key_count == 0 {
            bail!("--keys must be greater than 0");
        }
        Ok(())
    }
}

fn next_value<T, I>(args: &mut I, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    I: Iterator<Item = String>,
{
    let raw = args
        .next()
        .with_context(|| format!("{} requires a value", flag))?;
    raw.parse()
        .with_context(|| format!("invalid value for {}: {}", flag, raw))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("INTSKEY_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BenchConfig::load()?;
    info!(?config, "starting benchmark");

    println!("🔑 intskey - Order-Preserving Integer Keys");
    println!("==========================================\n");

    // Layout: (a: i32, b: u8, c: i64) berurutan
    let mut builder = KeyLayout::<KEY_WORDS>::builder();
    let a = builder.field::<i32>();
    let b = builder.field::<u8>();
    let c = builder.field::<i64>();
    let layout = builder.build()?;
    debug!(used_bytes = layout.used_bytes(), "layout ready");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples: Vec<(i32, u8, i64)> = (0..1024)
        .map(|_| (rng.random(), rng.random(), rng.random()))
        .collect();

    if config.dump {
        let mut key = BenchKey::new();
        let (va, vb, vc) = samples[0];
        key.put(a, va);
        key.put(b, vb);
        key.put(c, vc);
        println!("Sample key ({}, {}, {}):", va, vb, vc);
        println!("{}", key.raw_dump());
        key.log_raw_data();
    }

    benchmark_encode(&config, &samples);
    benchmark_decode(&config, &samples);
    benchmark_compare(&config, &samples);
    benchmark_sort(&config, &mut rng)?;

    println!("\n✅ All benchmarks complete!");
    Ok(())
}

fn encode_sample(key: &mut BenchKey, (va, vb, vc): (i32, u8, i64)) {
    key.add_integer(va, 0);
    key.add_unsigned_integer(vb, 4);
    key.add_integer(vc, 5);
}

fn report(label: &str, ops: usize, elapsed_ns: f64) {
    let per_op = elapsed_ns / ops as f64;
    println!("  {:<16} {:.2} ns/op ({:.2} M ops/sec)", label, per_op, 1000.0 / per_op);
}

fn benchmark_encode(config: &BenchConfig, samples: &[(i32, u8, i64)]) {
    println!("📊 Encode (i32 + u8 + i64)");
    println!("--------------------------");

    let mut key = BenchKey::new();
    let start = Instant::now();
    for i in 0..config.iterations {
        encode_sample(&mut key, samples[i & (samples.len() - 1)]);
        black_box(&key);
    }
    let elapsed = start.elapsed();

    report("Encode:", config.iterations, elapsed.as_nanos() as f64);
    println!();
}

fn benchmark_decode(config: &BenchConfig, samples: &[(i32, u8, i64)]) {
    println!("📊 Decode (i32 + u8 + i64)");
    println!("--------------------------");

    let keys: Vec<BenchKey> = samples
        .iter()
        .map(|&s| {
            let mut key = BenchKey::new();
            encode_sample(&mut key, s);
            key
        })
        .collect();

    let mut checksum = 0i64;
    let start = Instant::now();
    for i in 0..config.iterations {
        let key = &keys[i & (keys.len() - 1)];
        let va: i32 = key.get_integer(0);
        let vb: u8 = key.get_unsigned_integer(4);
        let vc: i64 = key.get_integer(5);
        checksum = checksum
            .wrapping_add(va as i64)
            .wrapping_add(vb as i64)
            .wrapping_add(vc);
    }
    let elapsed = start.elapsed();
    black_box(checksum);

    report("Decode:", config.iterations, elapsed.as_nanos() as f64);
    println!();
}

fn benchmark_compare(config: &BenchConfig, samples: &[(i32, u8, i64)]) {
    println!("📊 Compare (memcmp, {} bytes)", BenchKey::CAPACITY);
    println!("------------------------------");

    let keys: Vec<BenchKey> = samples
        .iter()
        .map(|&s| {
            let mut key = BenchKey::new();
            encode_sample(&mut key, s);
            key
        })
        .collect();

    let mut less = 0usize;
    let start = Instant::now();
    for i in 0..config.iterations {
        let x = &keys[i & (keys.len() - 1)];
        let y = &keys[(i + 1) & (keys.len() - 1)];
        if KeyBuffer::less_than(x, y) {
            less += 1;
        }
    }
    let elapsed = start.elapsed();
    black_box(less);

    report("Compare:", config.iterations, elapsed.as_nanos() as f64);
    println!();
}

fn benchmark_sort(config: &BenchConfig, rng: &mut StdRng) -> Result<()> {
    println!("📊 Sort (Zipfian, theta = {})", config.theta);
    println!("-----------------------------");

    let zipf = Zipf::new(config.key_count as f64, config.theta)
        .context("invalid zipfian parameters")?;

    let mut keys: Vec<BenchKey> = (0..config.key_count)
        .map(|_| {
            // Zipf menghasilkan [1, key_count]; geser supaya ada nilai negatif
            let rank = zipf.sample(rng) as i64;
            let mut key = BenchKey::new();
            key.add_integer(rank - (config.key_count as i64 / 2), 0);
            key.add_unsigned_integer(rng.random::<u32>(), 8);
            key
        })
        .collect();

    let start = Instant::now();
    keys.sort_unstable();
    let elapsed = start.elapsed();

    let sorted = keys.windows(2).all(|w| {
        let x: i64 = w[0].get_integer(0);
        let y: i64 = w[1].get_integer(0);
        x <= y
    });
    if !sorted {
        bail!("byte order disagrees with numeric order");
    }

    report("Sort:", config.key_count, elapsed.as_nanos() as f64);
    info!(keys = config.key_count, "sort verified");
    Ok(())
}
