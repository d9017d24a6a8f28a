//! Reads a graph, tree or treegraph document (or stdin) and prints a summary.
//!
//! Usage:
//!   cargo run --example graph_summary -- path/to/doc.txt
//!   cat path/to/doc.txt | cargo run --example graph_summary
//!   cargo run --example graph_summary -- - --export
//!
//! Set `RUST_LOG=debug` to see what the parser resolved and substituted.

#[cfg(feature = "tracing")]
mod inner {
    use std::fs;
    use std::io::{self, Read};
    use std::process;

    use arborgraph::{
        EdgeRef, NodeRef,
        prelude::*,
        record::{HasAdjacency, NodeRecord},
        tracing_support::{dump_span_timings, init_tracing},
    };
    use clap::Parser;

    /// Read a document or stdin, validate it, and print a summary.
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Input file path (use '-' or omit to read from stdin)
        input: Option<String>,

        /// Max number of nodes and edges to print in the summary
        #[arg(long, default_value_t = 10)]
        sample_nodes: usize,

        /// Write the parsed document back out instead of summarizing it
        #[arg(long)]
        export: bool,

        /// Print time spent in each parser stage
        #[arg(long)]
        timings: bool,
    }

    pub fn run() {
        init_tracing();
        let args = Args::parse();

        let input = match args.input.as_deref() {
            Some("-") | None => read_stdin_or_exit(),
            Some(path) => read_file_or_exit(path),
        };

        let config = ParserConfig::default();
        let imported = match read_str(&input, &config) {
            Ok(imported) => imported,
            Err(err) => {
                eprintln!("Invalid input: {err}");
                process::exit(1);
            }
        };

        if args.export {
            print!("{}", imported.export(&config));
        } else {
            print_summary(&imported, args.sample_nodes);
        }
        if args.timings {
            dump_span_timings();
        }
    }

    fn read_stdin_or_exit() -> String {
        let mut buffer = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Failed to read stdin: {err}");
            process::exit(1);
        }
        buffer
    }

    fn read_file_or_exit(path: &str) -> String {
        match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("Failed to read '{path}': {err}");
                process::exit(1);
            }
        }
    }

    fn print_summary(imported: &Imported, sample_nodes: usize) {
        println!("Document parsed successfully.");
        println!("Dialect: {}", imported.dialect());
        match imported {
            Imported::Graph(graph) => {
                println!("Nodes: {}", graph.size());
                println!("Edges: {}", graph.edges().len());
                println!("Roots: {}", graph.roots().len());
                print_samples(&graph.nodes(), &graph.edges(), sample_nodes);
            }
            Imported::Tree(tree) => {
                println!("Nodes: {}", tree.size());
                println!("Max depth: {}", tree.max_depth());
                print_root(tree.root().map(|r| r.to_short_string()));
                print_nodes(&tree.nodes(), sample_nodes);
            }
            Imported::TreeGraph(tree_graph) => {
                println!("Nodes: {}", tree_graph.size());
                println!("Cross-links: {}", tree_graph.edges().len());
                println!("Max depth: {}", tree_graph.max_depth());
                print_root(tree_graph.root().map(|r| r.to_short_string()));
                print_samples(&tree_graph.nodes(), &tree_graph.edges(), sample_nodes);
            }
        }
    }

    fn print_root(root: Option<String>) {
        match root {
            Some(root) => println!("Root: {root}"),
            None => println!("Root: (none, the tree is empty or a forest)"),
        }
    }

    fn print_nodes<R: NodeRecord>(nodes: &[NodeRef<R>], sample_nodes: usize) {
        if sample_nodes == 0 || nodes.is_empty() {
            return;
        }
        println!("\nSample nodes (up to {sample_nodes}):");
        for node in nodes.iter().take(sample_nodes) {
            match node.properties() {
                Some(props) if !props.is_empty() => {
                    let parts: Vec<String> = props.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    println!("  {node} [{}]", parts.join(", "));
                }
                _ => println!("  {node}"),
            }
        }
    }

    fn print_samples<R: HasAdjacency>(nodes: &[NodeRef<R>], edges: &[EdgeRef<R>], sample_nodes: usize) {
        print_nodes(nodes, sample_nodes);
        let edge_count = edges.len().min(sample_nodes);
        if edge_count > 0 {
            println!("\nSample edges (up to {sample_nodes}):");
            for edge in edges.iter().take(edge_count) {
                println!("  {edge}");
            }
        }
    }
}

#[cfg(feature = "tracing")]
fn main() {
    inner::run();
}

#[cfg(not(feature = "tracing"))]
fn main() {
    println!("This example requires the 'tracing' feature to be enabled.");
    println!("Run with: cargo run --example graph_summary --features tracing");
}
