//! Elabgraph - netlist checker
//!
//! Builds an elaboration graph from a netlist file, validates it and
//! prints the resulting nodes.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug elabgraph design.net --strict
//! ```

use std::path::PathBuf;

use clap::Parser;
use elab_graph::{
    dsl,
    error::Result,
    graph::{validate_graph, Graph, GraphConfig},
};

/// Hardware netlist graph builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist description file
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Reject second drivers and unresolved parameters
    #[arg(long)]
    strict: bool,

    /// Only validate, don't print the node listing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if args.strict {
        GraphConfig::strict()
    } else {
        GraphConfig::default()
    };

    // Parse the netlist file
    let ast = dsl::parse_file(&args.netlist_file)?;

    // Build and validate the graph
    let graph = Graph::from_ast(ast, config)?;
    validate_graph(&graph)?;

    if !args.quiet {
        print_listing(&graph);
    }

    Ok(())
}

fn print_listing(graph: &Graph) {
    println!(
        "graph {}: {} nodes, {} edges",
        graph.name(),
        graph.num_nodes(),
        graph.num_edges()
    );
    for node in graph.nodes() {
        let driver = graph
            .driver(node.id())
            .and_then(|id| graph.node(id).ok())
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10} {:<20} {:<10} <- {:<20} fan-out {}",
            node.tag(),
            node.name(),
            node.ty(),
            driver,
            node.outputs().len()
        );
    }
}
