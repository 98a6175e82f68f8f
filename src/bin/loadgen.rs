//! Load Generator
//!
//! Concurrent HTTP client exercising a running cachefront server.
//!
//! # Workloads
//! - `put-all`: only writes over sequential keys, database heavy
//! - `get-all`: random reads over the whole keyspace, cache miss heavy
//! - `get-popular`: few keys read repeatedly, cache hit heavy
//! - `mixed`: 50% get / 30% put / 20% delete
//! - `delete-all`: only deletes over random keys

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Traffic shape driven against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Workload {
    PutAll,
    GetAll,
    GetPopular,
    Mixed,
    DeleteAll,
}

#[derive(Debug, Parser)]
#[command(name = "loadgen", about = "Load generator for the cachefront server")]
struct Args {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Number of concurrent client tasks
    #[arg(long, default_value_t = 10)]
    clients: usize,

    /// Test duration in seconds
    #[arg(long, default_value_t = 10)]
    duration: u64,

    /// Number of distinct keys in the keyspace
    #[arg(long, default_value_t = 1000)]
    keyspace: u64,

    /// Number of popular keys for the get-popular workload
    #[arg(long, default_value_t = 10)]
    popular: u64,

    /// Traffic shape
    #[arg(long, value_enum, default_value = "get-popular")]
    workload: Workload,
}

/// Shared request counters, bumped by every client task.
#[derive(Debug, Default)]
struct Counters {
    total: AtomicU64,
    success: AtomicU64,
    failures: AtomicU64,
    latency_ns: AtomicU64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Seed the popular keys so get-popular measures hits, not misses
    if args.workload == Workload::GetPopular {
        println!("Warmup: inserting popular keys into server...");
        warmup(&args).await;
        println!("Warmup done.");
    }

    let counters = Arc::new(Counters::default());
    // Sequential key allocator shared by put-all clients
    let key_counter = Arc::new(AtomicU64::new(0));
    let deadline = Instant::now() + Duration::from_secs(args.duration);

    println!(
        "Starting load generator with {} clients for {} seconds...",
        args.clients, args.duration
    );

    let mut handles = Vec::with_capacity(args.clients);
    for _ in 0..args.clients {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(5))
            .build()?;
        let args = ClientArgs::from(&args);
        let counters = Arc::clone(&counters);
        let key_counter = Arc::clone(&key_counter);

        handles.push(tokio::spawn(run_client(
            client,
            args,
            counters,
            key_counter,
            deadline,
        )));
    }

    for handle in handles {
        handle.await?;
    }

    print_results(&counters, args.duration);
    Ok(())
}

/// Per-task copy of the workload parameters.
#[derive(Debug, Clone)]
struct ClientArgs {
    url: String,
    keyspace: u64,
    popular: u64,
    workload: Workload,
}

impl From<&Args> for ClientArgs {
    fn from(args: &Args) -> Self {
        Self {
            url: args.url.clone(),
            keyspace: args.keyspace,
            popular: args.popular,
            workload: args.workload,
        }
    }
}

/// Inserts the popular keys before a get-popular run.
async fn warmup(args: &Args) {
    let client = reqwest::Client::new();
    for i in 0..args.popular {
        let key = format!("popular_{}", i);
        let value = format!("popular_value_{}", i);
        let result = client
            .put(format!("{}/kv/{}", args.url, key))
            .body(value)
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => {}
            _ => eprintln!("Warmup PUT failed for key {}", key),
        }
    }
}

/// Issues requests until the deadline, recording latency and outcome.
async fn run_client(
    client: reqwest::Client,
    args: ClientArgs,
    counters: Arc<Counters>,
    key_counter: Arc<AtomicU64>,
    deadline: Instant,
) {
    let mut rng = StdRng::from_entropy();

    while Instant::now() < deadline {
        let started = Instant::now();
        let ok = issue_request(&client, &args, &mut rng, &key_counter).await;
        let elapsed = started.elapsed().as_nanos() as u64;

        counters.total.fetch_add(1, Ordering::Relaxed);
        counters.latency_ns.fetch_add(elapsed, Ordering::Relaxed);
        if ok {
            counters.success.fetch_add(1, Ordering::Relaxed);
        } else {
            counters.failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Sends one request according to the workload, returning success.
async fn issue_request(
    client: &reqwest::Client,
    args: &ClientArgs,
    rng: &mut StdRng,
    key_counter: &AtomicU64,
) -> bool {
    let result = match args.workload {
        Workload::PutAll => {
            // Sequential index wrapped to the keyspace; values stay random
            let idx = key_counter.fetch_add(1, Ordering::Relaxed) % args.keyspace;
            let key = format!("k{}", idx);
            let value = format!("v{}", rng.gen::<u64>());
            client.put(format!("{}/kv/{}", args.url, key)).body(value).send().await
        }
        Workload::GetAll => {
            let key = format!("k{}", rng.gen_range(0..args.keyspace));
            client.get(format!("{}/kv/{}", args.url, key)).send().await
        }
        Workload::GetPopular => {
            let key = format!("popular_{}", rng.gen_range(0..args.popular));
            client.get(format!("{}/kv/{}", args.url, key)).send().await
        }
        Workload::DeleteAll => {
            let key = format!("k{}", rng.gen_range(0..args.keyspace));
            client.delete(format!("{}/kv/{}", args.url, key)).send().await
        }
        Workload::Mixed => {
            let p: f64 = rng.gen();
            let key = format!("k{}", rng.gen_range(0..args.keyspace));
            if p < 0.5 {
                client.get(format!("{}/kv/{}", args.url, key)).send().await
            } else if p < 0.8 {
                let value = format!("v{}", rng.gen::<u64>());
                client.put(format!("{}/kv/{}", args.url, key)).body(value).send().await
            } else {
                client.delete(format!("{}/kv/{}", args.url, key)).send().await
            }
        }
    };

    match result {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Prints the aggregate results block.
fn print_results(counters: &Counters, duration_secs: u64) {
    let total = counters.total.load(Ordering::Relaxed);
    let success = counters.success.load(Ordering::Relaxed);
    let failures = counters.failures.load(Ordering::Relaxed);
    let latency_ns = counters.latency_ns.load(Ordering::Relaxed);

    let throughput = success as f64 / duration_secs as f64;
    let avg_latency_ms = if success > 0 {
        (latency_ns as f64 / success as f64) / 1e6
    } else {
        0.0
    };

    println!("\n===== RESULTS =====");
    println!("Total Requests:      {}", total);
    println!("Successful Requests: {}", success);
    println!("Failed Requests:     {}", failures);
    println!("Throughput (req/s):  {:.2}", throughput);
    println!("Avg Latency (ms):    {:.3}", avg_latency_ms);
    println!("====================");
}
