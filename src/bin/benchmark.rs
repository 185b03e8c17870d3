//! Performance benchmark comparing stepping implementations across mesh sizes

use std::time::Instant;

use mesh_life::{AdjacencyGraph, AdjacencyPolicy, Engine, LifeRule, TriangleMesh};
use tracing_subscriber::EnvFilter;

fn build_engine(order: u32) -> (Engine, f64) {
    let mesh = TriangleMesh::icosphere(order);

    let start = Instant::now();
    let graph = AdjacencyGraph::build(
        &mesh.faces,
        mesh.num_vertices(),
        AdjacencyPolicy::SharedVertex,
    )
    .expect("generated icosphere is a valid mesh");
    let build_ms = start.elapsed().as_secs_f64() * 1000.0;

    (Engine::new(graph, LifeRule::conway()), build_ms)
}

fn benchmark_serial(engine: &mut Engine, iterations: u32) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        engine.next_generation();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_parallel(engine: &mut Engine, iterations: u32) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        engine.next_generation_parallel();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Mesh Life Performance Benchmark ===\n");

    let orders = [2u32, 3, 4, 5, 6];
    let iterations = 50;

    println!(
        "{:>8} {:>10} {:>12} {:>12} {:>12} {:>10}",
        "Order", "Cells", "Build", "Serial", "Parallel", "Speedup"
    );
    println!("{:-<70}", "");

    for order in orders {
        let (mut engine, build_ms) = build_engine(order);
        engine.randomize(0.3).expect("0.3 is a valid probability");

        let serial_ms = benchmark_serial(&mut engine, iterations);
        let parallel_ms = benchmark_parallel(&mut engine, iterations);

        println!(
            "{:>8} {:>10} {:>10.2}ms {:>10.3}ms {:>10.3}ms {:>9.1}x",
            order,
            engine.num_cells(),
            build_ms,
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Throughput at order 6 ===\n");

    let (mut engine, _) = build_engine(6);
    engine.randomize(0.3).expect("0.3 is a valid probability");
    let cells = engine.num_cells();

    let serial_ms = benchmark_serial(&mut engine, iterations);
    let parallel_ms = benchmark_parallel(&mut engine, iterations);

    println!(
        "Serial:    {:.3} ms/gen, {:.1}M cells/sec",
        serial_ms,
        cells as f64 / (serial_ms / 1000.0) / 1_000_000.0
    );
    println!(
        "Parallel:  {:.3} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        cells as f64 / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
