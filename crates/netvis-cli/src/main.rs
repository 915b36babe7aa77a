use futures::executor::block_on;
use netvis::{
    EdgeValueFilter, FocusOutcome, GraphData, HeadlessHost, ViewConfig, VisGraph,
    distribute_radially, expand_node, initial_threshold, resolve_graph_overlaps, show_subgraph,
    slider_scale,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::io::{IsTerminal, Read};
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Netvis(netvis::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Netvis(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<netvis::Error> for CliError {
    fn from(value: netvis::Error) -> Self {
        Self::Netvis(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Resolve,
    Radial,
    Expand,
    Focus,
    Filter,
    Scale,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    with_meta: bool,
    node: Option<String>,
    nodes: Option<Vec<String>>,
    min_distance: Option<f64>,
    max_distance: Option<f64>,
    timeout_ms: Option<u64>,
    max_passes: Option<u64>,
    radius: Option<f64>,
    min_edge_value: Option<f64>,
    threshold: Option<f64>,
    query: Option<String>,
    stored: Option<String>,
}

#[derive(Serialize)]
struct GraphOut<'a> {
    meta: Value,
    graph: &'a GraphData,
}

fn usage() -> &'static str {
    "netvis-cli\n\
\n\
USAGE:\n\
  netvis-cli [resolve] [--min-distance <n>] [--max-distance <n>] [--timeout-ms <n>] [--max-passes <n>] [--nodes <id,id,...>] [<path>|-]\n\
  netvis-cli radial --node <center-id> [--radius <n>] [<path>|-]\n\
  netvis-cli expand --node <id> [--min-edge-value <n>] [<path>|-]\n\
  netvis-cli focus --node <id> [<path>|-]\n\
  netvis-cli filter [--threshold <n>] [<path>|-]\n\
  netvis-cli scale [--query <value>] [--stored <value>] [<path>|-]\n\
\n\
COMMON FLAGS:\n\
  --config <path>   JSON config merged over the defaults\n\
  --pretty          pretty-print JSON output\n\
  --meta            wrap the output graph as {\"meta\": ..., \"graph\": ...}\n\
\n\
NOTES:\n\
  - Input is a vis DataSet-shaped graph: {\"nodes\": [...], \"edges\": [...]}.\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Diagnostics go to stderr; set NETVIS_LOG (e.g. NETVIS_LOG=debug) to change verbosity.\n\
"
}

fn flag_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn flag_num<'a, T: FromStr>(it: &mut impl Iterator<Item = &'a String>) -> Result<T, CliError> {
    flag_value(it)?
        .parse::<T>()
        .map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "resolve" => args.command = Command::Resolve,
            "radial" => args.command = Command::Radial,
            "expand" => args.command = Command::Expand,
            "focus" => args.command = Command::Focus,
            "filter" => args.command = Command::Filter,
            "scale" => args.command = Command::Scale,
            "--pretty" => args.pretty = true,
            "--meta" => args.with_meta = true,
            "--config" => args.config = Some(flag_value(&mut it)?.clone()),
            "--node" => args.node = Some(flag_value(&mut it)?.clone()),
            "--nodes" => {
                let raw = flag_value(&mut it)?;
                let ids: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if ids.is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.nodes = Some(ids);
            }
            "--min-distance" => args.min_distance = Some(flag_num(&mut it)?),
            "--max-distance" => args.max_distance = Some(flag_num(&mut it)?),
            "--timeout-ms" => args.timeout_ms = Some(flag_num(&mut it)?),
            "--max-passes" => args.max_passes = Some(flag_num(&mut it)?),
            "--radius" => args.radius = Some(flag_num(&mut it)?),
            "--min-edge-value" => args.min_edge_value = Some(flag_num(&mut it)?),
            "--threshold" => args.threshold = Some(flag_num(&mut it)?),
            "--query" => args.query = Some(flag_value(&mut it)?.clone()),
            "--stored" => args.stored = Some(flag_value(&mut it)?.clone()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_graph(graph: &VisGraph, meta: Value, args: &Args) -> Result<(), CliError> {
    let data = graph.to_data();
    if args.with_meta {
        write_json(&GraphOut { meta, graph: &data }, args.pretty)
    } else {
        write_json(&data, args.pretty)
    }
}

fn load_config(args: &Args) -> Result<ViewConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => ViewConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ViewConfig::default(),
    };
    if let Some(v) = args.min_distance {
        cfg.set_value("overlap.minDistance", json!(v));
    }
    if let Some(v) = args.max_distance {
        cfg.set_value("overlap.maxDistance", json!(v));
    }
    if let Some(v) = args.timeout_ms {
        cfg.set_value("overlap.timeoutMs", json!(v));
    }
    if let Some(v) = args.max_passes {
        cfg.set_value("overlap.maxPasses", json!(v));
    }
    if let Some(v) = args.radius {
        cfg.set_value("radial.radius", json!(v));
    }
    if let Some(v) = args.min_edge_value {
        cfg.set_value("slider.minEdgeValue", json!(v));
    }
    Ok(cfg)
}

fn required_node(args: &Args) -> Result<&str, CliError> {
    args.node.as_deref().ok_or(CliError::Usage(usage()))
}

fn run(args: Args) -> Result<(), CliError> {
    let cfg = load_config(&args)?;
    let text = read_input(args.input.as_deref())?;
    let data: GraphData = serde_json::from_str(&text)?;
    let mut graph = VisGraph::from_data(data).map_err(netvis::Error::from)?;
    tracing::debug!(
        command = ?args.command,
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "graph loaded"
    );

    match args.command {
        Command::Resolve => {
            let opts = cfg.overlap_options()?;
            let res = resolve_graph_overlaps(&mut graph, args.nodes.as_deref(), &opts)?;
            let meta = json!({
                "passes": res.passes,
                "adjustments": res.adjustments,
                "converged": res.converged(),
            });
            write_graph(&graph, meta, &args)
        }
        Command::Radial => {
            let center = required_node(&args)?;
            let radius = cfg.radial_radius()?;
            let neighbors = graph
                .connected_nodes(center)
                .map_err(netvis::Error::from)?;
            let mut host = HeadlessHost::new();
            let placed = distribute_radially(&mut graph, &mut host, center, &neighbors, radius)?;
            write_graph(&graph, json!({ "placed": placed }), &args)
        }
        Command::Expand => {
            let node = required_node(&args)?;
            let out = expand_node(&mut graph, node, cfg.min_edge_value()?)?;
            let meta = json!({
                "shownNodes": out.shown_nodes,
                "hiddenNodes": out.hidden_nodes,
                "shownEdges": out.shown_edges,
                "hiddenEdges": out.hidden_edges,
            });
            write_graph(&graph, meta, &args)
        }
        Command::Focus => {
            let node = required_node(&args)?;
            let repulsion = cfg.repulsion()?;
            let mut host = HeadlessHost::new();
            let Some(focus) = show_subgraph(&mut graph, &mut host, &[node], &repulsion)? else {
                return Err(CliError::Usage(usage()));
            };
            let removed = focus.removed().nodes.len();
            // No simulation runs headless, so the layout is stable as soon as it is set up.
            host.stabilize();
            let outcome = block_on(focus.settle(&mut graph, &mut host));
            let meta = json!({
                "removedNodes": removed,
                "restored": matches!(outcome, FocusOutcome::Restored { .. }),
                "physics": host.physics_history(),
            });
            write_graph(&graph, meta, &args)
        }
        Command::Filter => {
            let mut filter = EdgeValueFilter::new();
            let threshold = match args.threshold {
                Some(t) => t,
                None => {
                    let max = filter
                        .value_range(&graph)
                        .map_or(f64::INFINITY, |(_, max)| max);
                    initial_threshold(None, None, cfg.min_edge_value()?, max)
                }
            };
            let change = filter.apply(&mut graph, threshold)?;
            let cached: Vec<&str> = filter.cached().iter().map(|e| e.id.as_str()).collect();
            let meta = json!({
                "threshold": threshold,
                "removed": change.removed,
                "cached": cached,
            });
            write_graph(&graph, meta, &args)
        }
        Command::Scale => {
            let filter = EdgeValueFilter::new();
            let out = match filter.value_range(&graph) {
                None => json!({ "range": null }),
                Some((min, max)) => {
                    let scale = slider_scale(min, max);
                    let initial = initial_threshold(
                        args.query.as_deref(),
                        args.stored.as_deref(),
                        cfg.min_edge_value()?,
                        max,
                    );
                    json!({
                        "range": [min, max],
                        "step": scale.step,
                        "ticks": scale.ticks,
                        "initial": initial,
                    })
                }
            };
            write_json(&out, args.pretty)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NETVIS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
