use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "dxgraph",
    version,
    about = "Knowledge-graph differential diagnosis for breast imaging findings",
    long_about = "Reads a diagnosis request as JSON and prints the assessment as JSON.\n\n\
        The request has the shape:\n\
        \n  {\"imaging_result\": {\"mass_size\": \"large\", \"density\": \"high\", \"calcifications\": \"micro\"},\
        \n   \"clinical_text\": \"Palpable lump. Family history of breast cancer.\"}\n\n\
        When OPENROUTER_API_KEY is set the final assessment comes from the LLM;\n\
        otherwise it is derived from the top knowledge-graph match.\n\n\
        EXAMPLES:\n\
        \n  dxgraph request.json                 Diagnose a request file\n\
        \n  cat request.json | dxgraph --kg-only  Graph evidence without the LLM\n\
        \n  dxgraph --sample malignant_idc       Run a bundled sample case\n\
        \n  dxgraph --save-graph graph.bin        Export the built-in graph"
)]
pub struct Cli {
    /// Request JSON file (reads from stdin if not provided)
    #[arg(value_name = "FILE", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Skip the LLM; print the graph context with the rule-based assessment
    #[arg(long)]
    pub kg_only: bool,

    /// Use a bundled sample case as the request
    #[arg(long, value_name = "NAME")]
    pub sample: Option<String>,

    /// Print the bundled sample case names and exit
    #[arg(long)]
    pub list_samples: bool,

    /// Load the knowledge graph from FILE instead of the default location
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Write the built-in knowledge graph to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub save_graph: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_read_stdin_with_llm() {
        let cli = Cli::try_parse_from(["dxgraph"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.kg_only);
        assert!(cli.save_graph.is_none());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "dxgraph",
            "--kg-only",
            "--graph",
            "/tmp/g.bin",
            "req.json",
        ])
        .unwrap();
        assert!(cli.kg_only);
        assert_eq!(cli.graph, Some(PathBuf::from("/tmp/g.bin")));
        assert_eq!(cli.input, Some(PathBuf::from("req.json")));
    }

    #[test]
    fn sample_conflicts_with_input_file() {
        assert!(Cli::try_parse_from(["dxgraph", "--sample", "cyst", "req.json"]).is_err());
    }

    #[test]
    fn save_graph_takes_a_path() {
        let cli = Cli::try_parse_from(["dxgraph", "--save-graph", "out.bin"]).unwrap();
        assert_eq!(cli.save_graph, Some(PathBuf::from("out.bin")));
        assert!(Cli::try_parse_from(["dxgraph", "--save-graph"]).is_err());
    }
}
