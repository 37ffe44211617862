//! Command-line arguments

use algoscope::config::PlaybackConfig;
use algoscope::error::InputError;
use algoscope::model::hash::Strategy;
use algoscope::model::tree::TreeKind;
use algoscope::runners::graph::GraphAlgorithm;
use algoscope::runners::pathfinding::PathAlgorithm;
use algoscope::runners::sorting::SortAlgorithm;
use algoscope::runners::tree::TraversalOrder;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Grid used by `path` when no layout is given. Rows are separated by `/`.
pub const DEFAULT_GRID: &str = "S...#..../.##.#.##./...3#..../#.#...#.#/....#...F";

/// Step-through algorithm visualizer
#[derive(Parser, Debug)]
#[command(name = "algoscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub playback: PlaybackArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct PlaybackArgs {
    /// Speed multiplier (0.01 to 100) applied to autoplay and paced delays
    #[arg(long, global = true, default_value = "1.0", allow_hyphen_values = true)]
    pub speed: f64,

    /// Autoplay interval at 1x speed, in milliseconds
    #[arg(long, global = true, default_value = "1000")]
    pub interval_ms: u64,

    /// Delay between published steps of tree, hash and list operations at 1x
    #[arg(long, global = true, default_value = "800")]
    pub pace_ms: u64,

    /// Start playing as soon as a timeline is ready
    #[arg(long, global = true)]
    pub autoplay: bool,

    /// Print every step as plain text instead of opening the terminal UI
    #[arg(long, global = true)]
    pub print: bool,

    /// Write logs to this file while the terminal UI is open
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl PlaybackArgs {
    pub fn config(&self) -> Result<PlaybackConfig, InputError> {
        let base = if self.print {
            PlaybackConfig::batch()
        } else {
            PlaybackConfig::default()
        };
        let config = PlaybackConfig {
            base_interval: Duration::from_millis(self.interval_ms),
            speed: self.speed,
            pace_delay: Duration::from_millis(self.pace_ms),
            autoplay: self.autoplay,
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort a list of integers
    Sort {
        #[arg(short, long, value_enum, default_value_t = SortAlgorithm::Bubble)]
        algorithm: SortAlgorithm,
        /// Comma-separated values
        #[arg(long, default_value = "38,27,43,3,9,82,10")]
        values: String,
    },

    /// Binary search over ascending values
    Search {
        #[arg(long, default_value = "5,12,19,23,41,58,67")]
        values: String,
        #[arg(short, long, default_value = "41", allow_hyphen_values = true)]
        target: String,
    },

    /// Binary search tree or AVL tree operations
    Tree {
        #[arg(long, value_enum, default_value_t = TreeKind::Avl)]
        kind: TreeKind,
        /// Values inserted without narration before the operation
        #[arg(long, default_value = "")]
        values: String,
        #[arg(value_enum)]
        action: TreeAction,
        /// Operand of insert, search and remove
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
        #[arg(long, value_enum, default_value_t = TraversalOrder::InOrder)]
        order: TraversalOrder,
    },

    /// Graph traversal and shortest paths
    Graph {
        #[arg(short, long, value_enum, default_value_t = GraphAlgorithm::Bfs)]
        algorithm: GraphAlgorithm,
        /// Node count for --edges (labels A, B, C, ...)
        #[arg(long, default_value = "6")]
        nodes: usize,
        /// Edges as `A-B:4, B-C`; the six-node sample graph when omitted
        #[arg(long)]
        edges: Option<String>,
        #[arg(long)]
        directed: bool,
        #[arg(long, default_value = "A")]
        start: String,
        #[arg(long)]
        target: Option<String>,
    },

    /// Hash table with chaining or linear probing
    Hash {
        #[arg(long, value_enum, default_value_t = Strategy::Chaining)]
        strategy: Strategy,
        #[arg(long, default_value = "10")]
        size: usize,
        /// Keys inserted without narration before the operation
        #[arg(long, default_value = "")]
        keys: String,
        #[arg(value_enum)]
        action: HashAction,
        key: String,
    },

    /// Dynamic programming tables
    Dp {
        #[command(subcommand)]
        problem: DpProblem,
    },

    /// Shortest path on a weighted grid
    Path {
        #[arg(short, long, value_enum, default_value_t = PathAlgorithm::AStar)]
        algorithm: PathAlgorithm,
        /// Rows separated by `/`: S start, F finish, # wall, . empty, 1-9 weight
        #[arg(long, default_value = DEFAULT_GRID)]
        layout: String,
    },

    /// Fixed-capacity stack
    Stack {
        #[command(flatten)]
        bounded: BoundedArgs,
        #[arg(value_enum)]
        action: StackAction,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Fixed-capacity queue
    Queue {
        #[command(flatten)]
        bounded: BoundedArgs,
        #[arg(value_enum)]
        action: QueueAction,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },

    /// Singly linked list
    List {
        #[arg(long, default_value = "")]
        values: String,
        #[arg(value_enum)]
        action: ListAction,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Position for insert-at
        #[arg(long, default_value = "0")]
        index: usize,
    },
}

#[derive(Args, Debug)]
pub struct BoundedArgs {
    #[arg(long, default_value = "5")]
    pub capacity: usize,
    /// Items present before the operation
    #[arg(long, default_value = "")]
    pub values: String,
}

#[derive(Subcommand, Debug)]
pub enum DpProblem {
    /// Longest common subsequence of two strings
    Lcs { a: String, b: String },
    /// 0/1 knapsack
    Knapsack {
        /// Items as `weight:value`, comma-separated
        #[arg(long, default_value = "1:1, 3:4, 4:5, 5:7")]
        items: String,
        #[arg(long, default_value = "7")]
        capacity: usize,
    },
    /// Fibonacci numbers bottom-up
    Fib {
        #[arg(allow_hyphen_values = true)]
        n: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAction {
    Insert,
    Search,
    Remove,
    Traverse,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAction {
    Insert,
    Search,
    Remove,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    Push,
    Pop,
    Peek,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAction {
    Enqueue,
    Dequeue,
    Peek,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    InsertHead,
    InsertTail,
    InsertAt,
    Remove,
    Search,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_mode_disables_pacing() {
        let cli = Cli::parse_from(["algoscope", "--print", "--speed", "2", "sort"]);
        let config = cli.playback.config().unwrap();
        assert!(!config.paced);
        assert_eq!(config.speed, 2.0);
    }

    #[test]
    fn test_out_of_range_speed_is_rejected() {
        for speed in ["0", "-1", "1e-20", "inf"] {
            let cli = Cli::parse_from(["algoscope", "--speed", speed, "--autoplay", "sort"]);
            assert!(
                matches!(cli.playback.config(), Err(InputError::InvalidSpeed(_))),
                "{}",
                speed
            );
        }
    }

    #[test]
    fn test_tree_arguments() {
        let cli = Cli::parse_from(["algoscope", "tree", "--values", "1,2", "insert", "3"]);
        match cli.command {
            Command::Tree {
                kind,
                action,
                value,
                ..
            } => {
                assert_eq!(kind, TreeKind::Avl);
                assert_eq!(action, TreeAction::Insert);
                assert_eq!(value.as_deref(), Some("3"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
