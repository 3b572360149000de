/// Draws the triconnected components of an edge-list file.
/// I use it with `cargo run --example split_components -- assets/tricon.in | dot -Tsvg > split_components.svg`
///
/// Set `RUST_LOG=triconnectivity=debug` to see the phases on stderr.
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;
use triconnectivity::input::from_file;
use triconnectivity::{get_triconnected_components, visualize_decomposition};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/tricon.in".to_string());

    let graph = match from_file(&path) {
        Ok(graph) => graph,
        Err(e) => {
            error!(%path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    match get_triconnected_components(&graph) {
        Ok(decomposition) => {
            print!("{}", visualize_decomposition(&decomposition));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%path, "{e}");
            ExitCode::FAILURE
        }
    }
}
