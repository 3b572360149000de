//! I use it with `cargo run --example palm_tree -- assets/graph.in | dot -Tsvg > palm.svg`

use tracing_subscriber::EnvFilter;
use triconnectivity::input::from_file;
use triconnectivity::palm_tree_dot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/graph.in".to_string());
    let graph = from_file(&path)?;

    print!("{}", palm_tree_dot(&graph, 0)?);
    Ok(())
}
