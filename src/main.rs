// algoscope: step-through algorithm visualizer

mod cli;

use std::error::Error;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use algoscope::config::PlaybackConfig;
use algoscope::error::{parse_value, parse_values};
use algoscope::model::array::{ArrayState, SearchState};
use algoscope::model::dp::DpGrid;
use algoscope::model::graph::GraphState;
use algoscope::model::grid::GridState;
use algoscope::model::linear::{BoundedKind, LinkedListState};
use algoscope::model::tree::TreeState;
use algoscope::playback::Session;
use algoscope::snapshot::DomainState;
use algoscope::ui::App;
use algoscope::{commands, commands::graph as graph_commands};

use cli::{Cli, Command, DpProblem, HashAction, ListAction, QueueAction, StackAction, TreeAction};

type AnyResult<T> = Result<T, Box<dyn Error>>;

fn main() -> AnyResult<()> {
    let cli = Cli::parse();
    init_logging(cli.playback.print, cli.playback.log_file.as_deref())?;

    let config = match cli.playback.config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid playback options");
            return Err(e.into());
        }
    };
    info!(?config, "starting");

    let res = run_command(cli.command, config, cli.playback.print);
    if let Err(e) = &res {
        error!(error = %e, "command failed");
    }
    res
}

/// Logs go to stderr in print mode and to `--log-file` (if any) when the
/// terminal UI owns the screen.
fn init_logging(print: bool, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "algoscope=info".into());
    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(File::create(path)?)),
        ),
        None => None,
    };
    let stderr_layer = print.then(|| fmt::layer().with_writer(io::stderr));
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

/// Parse the optional operand of an action that needs one
fn operand(value: Option<&str>, action: &str) -> AnyResult<i64> {
    match value {
        Some(v) => Ok(parse_value(v)?),
        None => Err(format!("{} needs a value", action).into()),
    }
}

fn run_command(command: Command, config: PlaybackConfig, print: bool) -> AnyResult<()> {
    match command {
        Command::Sort { algorithm, values } => {
            let mut session = Session::new(ArrayState::new(Vec::new()), config);
            session.reset(&parse_values(&values)?)?;
            session.sort(algorithm)?;
            present(session, algorithm.name(), print)
        }
        Command::Search { values, target } => {
            let mut session = Session::new(SearchState::new(Vec::new(), 0), config);
            session.reset(&parse_values(&values)?)?;
            session.search(parse_value(&target)?)?;
            present(session, "binary search", print)
        }
        Command::Tree {
            kind,
            values,
            action,
            value,
            order,
        } => {
            let mut session = Session::new(TreeState::new(kind), config);
            session.build(&parse_values(&values)?)?;
            let value = value.as_deref();
            match action {
                TreeAction::Insert => session.insert(operand(value, "insert")?)?,
                TreeAction::Search => session.search(operand(value, "search")?)?,
                TreeAction::Remove => session.remove(operand(value, "remove")?)?,
                TreeAction::Traverse => session.traverse(order)?,
            }
            present(session, &format!("{:?} {:?}", kind, action), print)
        }
        Command::Graph {
            algorithm,
            nodes,
            edges,
            directed,
            start,
            target,
        } => {
            let graph = match edges {
                Some(list) => {
                    graph_commands::parse_edges(nodes, &list, directed, config.max_elements)?
                }
                None => GraphState::sample(),
            };
            let start = graph_commands::parse_node(&graph, &start)?;
            let target = target
                .map(|t| graph_commands::parse_node(&graph, &t))
                .transpose()?;
            let mut session = Session::new(GraphState::sample(), config);
            session.load(graph)?;
            session.run(algorithm, start, target)?;
            present(session, algorithm.name(), print)
        }
        Command::Hash {
            strategy,
            size,
            keys,
            action,
            key,
        } => {
            let table = commands::hash::table(strategy, size, config.max_elements)?;
            let mut session = Session::new(table, config);
            let prefill: Vec<&str> = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .collect();
            session.fill(&prefill)?;
            match action {
                HashAction::Insert => session.insert(&key)?,
                HashAction::Search => session.search(&key)?,
                HashAction::Remove => session.remove(&key)?,
            }
            present(session, &format!("{:?}", strategy), print)
        }
        Command::Dp { problem } => {
            let mut session = Session::new(DpGrid::new("", Vec::new(), Vec::new()), config);
            let title = match problem {
                DpProblem::Lcs { a, b } => {
                    session.lcs(&a, &b)?;
                    "LCS"
                }
                DpProblem::Knapsack { items, capacity } => {
                    session.knapsack(&commands::dp::parse_items(&items)?, capacity)?;
                    "0/1 knapsack"
                }
                DpProblem::Fib { n } => {
                    session.fibonacci(n)?;
                    "Fibonacci"
                }
            };
            present(session, title, print)
        }
        Command::Path { algorithm, layout } => {
            let layout = layout.replace('/', "\n");
            let mut session = Session::new(GridState::parse(&layout)?, config);
            session.load(&layout)?;
            session.run(algorithm)?;
            present(session, algorithm.name(), print)
        }
        Command::Stack {
            bounded,
            action,
            value,
        } => {
            let state = commands::linear::bounded(
                BoundedKind::Stack,
                bounded.capacity,
                config.max_elements,
            )?;
            let mut session = Session::new(state, config);
            session.fill(&parse_values(&bounded.values)?)?;
            match action {
                StackAction::Push => session.push(operand(value.as_deref(), "push")?)?,
                StackAction::Pop => session.pop()?,
                StackAction::Peek => session.peek()?,
            }
            present(session, "stack", print)
        }
        Command::Queue {
            bounded,
            action,
            value,
        } => {
            let state = commands::linear::bounded(
                BoundedKind::Queue,
                bounded.capacity,
                config.max_elements,
            )?;
            let mut session = Session::new(state, config);
            session.fill(&parse_values(&bounded.values)?)?;
            match action {
                QueueAction::Enqueue => session.enqueue(operand(value.as_deref(), "enqueue")?)?,
                QueueAction::Dequeue => session.dequeue()?,
                QueueAction::Peek => session.peek()?,
            }
            present(session, "queue", print)
        }
        Command::List {
            values,
            action,
            value,
            index,
        } => {
            let mut session = Session::new(LinkedListState::new(), config);
            session.reset(&parse_values(&values)?)?;
            let value = parse_value(&value)?;
            match action {
                ListAction::InsertHead => session.insert_head(value)?,
                ListAction::InsertTail => session.insert_tail(value)?,
                ListAction::InsertAt => session.insert_at(index, value)?,
                ListAction::Remove => session.remove(value)?,
                ListAction::Search => session.search(value)?,
            }
            present(session, "linked list", print)
        }
    }
}

/// Hand a session to the chosen consumer
fn present<S: DomainState>(session: Session<S>, title: &str, print: bool) -> AnyResult<()> {
    if print {
        print_timeline(&session);
        Ok(())
    } else {
        run_tui(session, title)
    }
}

/// Dump every step of the installed timeline as plain text
fn print_timeline<S: DomainState>(session: &Session<S>) {
    let Some(timeline) = session.controller().timeline() else {
        for line in session.committed().describe() {
            println!("{}", line);
        }
        return;
    };
    println!("{} ({} steps)", timeline.kind(), timeline.len());
    for (i, step) in timeline.steps().iter().enumerate() {
        println!();
        println!("[{}/{}] {}", i + 1, timeline.len(), step.message());
        for line in step.snapshot().describe() {
            println!("    {}", line);
        }
        if let Some(result) = step.result() {
            println!("    => {}", result);
        }
    }
}

fn run_tui<S: DomainState>(session: Session<S>, title: &str) -> AnyResult<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session, title);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
