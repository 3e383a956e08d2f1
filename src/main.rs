//! railbaron -- route and toll explorer.
//!
//! Loads a JSON map, lists the candidate routes between two cities and
//! simulates what each costs in tolls under random rolls.
//!
//! Usage:
//!   railbaron --map FILE --from CITY --to CITY [OPTIONS]
//!
//! Options:
//!   --engine NAME   basic, express or superchief (default: basic)
//!   --trials N      Simulated rides per route (default: 1000)
//!   --flex N        Extra hops beyond the shortest route (default: 0)
//!   --own NAME      Railroad owned by the rider (repeatable)
//!   --rival NAME    Railroad owned by an opponent (repeatable)
//!   --config FILE   Advisor settings as JSON
//!   --rules FILE    Fee schedule as JSON
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --json          Print the report as JSON

use std::env;
use std::fs;
use std::process;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use railbaron::advisor::AdvisorConfig;
use railbaron::board::{EngineTier, NetworkGraph, Ownership, PointId, Rules, SegmentLedger};
use railbaron::fees::TollContext;
use railbaron::protocol::load_network;
use railbaron::search::{reduce_paths, shortest_paths, Path};
use railbaron::sim::{risk_cost, CostModel};

const RIDER: usize = 0;
const RIVAL: usize = 1;

struct Options {
    map: Option<String>,
    from: Option<String>,
    to: Option<String>,
    engine: EngineTier,
    trials: usize,
    flex: usize,
    own: Vec<String>,
    rival: Vec<String>,
    config: Option<String>,
    rules: Option<String>,
    seed: u64,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            map: None,
            from: None,
            to: None,
            engine: EngineTier::Basic,
            trials: 1_000,
            flex: 0,
            own: Vec::new(),
            rival: Vec::new(),
            config: None,
            rules: None,
            seed: 0,
            json: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct RouteReport {
    stops: Vec<String>,
    railroads: Vec<String>,
    mean: i64,
    median: i64,
    p90: i64,
    worst: i64,
}

#[derive(Debug, Serialize)]
struct Report {
    from: String,
    to: String,
    engine: EngineTier,
    trials: usize,
    routes: Vec<RouteReport>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => fail(format!("{} needs a value", flag)),
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--map" | "--from" | "--to" | "--config" | "--rules" | "--own" | "--rival" => {
                i += 1;
                let v = value(args, i, flag).to_string();
                match flag {
                    "--map" => opts.map = Some(v),
                    "--from" => opts.from = Some(v),
                    "--to" => opts.to = Some(v),
                    "--config" => opts.config = Some(v),
                    "--rules" => opts.rules = Some(v),
                    "--own" => opts.own.push(v),
                    _ => opts.rival.push(v),
                }
            }
            "--engine" => {
                i += 1;
                let v = value(args, i, flag);
                opts.engine = EngineTier::from_name(v).unwrap_or_else(|| fail(format!("unknown engine '{}'", v)));
            }
            "--trials" => {
                i += 1;
                opts.trials = value(args, i, flag).parse().unwrap_or_else(|_| fail("invalid --trials value"));
            }
            "--flex" => {
                i += 1;
                opts.flex = value(args, i, flag).parse().unwrap_or_else(|_| fail("invalid --flex value"));
            }
            "--seed" => {
                i += 1;
                opts.seed = value(args, i, flag).parse().unwrap_or_else(|_| fail("invalid --seed value"));
            }
            "--json" => opts.json = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    opts
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let text = fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read {}: {}", path, e)));
    serde_json::from_str(&text).unwrap_or_else(|e| fail(format!("{}: {}", path, e)))
}

fn city(graph: &NetworkGraph, name: &str) -> PointId {
    graph.lookup_city(name).unwrap_or_else(|| fail(format!("unknown city '{}'", name)))
}

fn describe(graph: &NetworkGraph, from: PointId, path: &Path, costs: &[i64]) -> RouteReport {
    let stops = std::iter::once(from)
        .chain(path.iter().map(|wp| wp.to))
        .map(|p| graph.point(p).display_name())
        .collect();
    let railroads = path.iter().map(|wp| graph.railroad(wp.railroad).short_name.clone()).collect();
    let mean = if costs.is_empty() { 0 } else { costs.iter().sum::<i64>() / costs.len() as i64 };
    RouteReport {
        stops,
        railroads,
        mean,
        median: risk_cost(costs, 0.5),
        p90: risk_cost(costs, 0.1),
        worst: costs.last().copied().unwrap_or(0),
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    let map_path = opts.map.as_deref().unwrap_or_else(|| fail("--map is required"));
    let text = fs::read_to_string(map_path).unwrap_or_else(|e| fail(format!("cannot read {}: {}", map_path, e)));
    let graph = load_network(&text).unwrap_or_else(|e| fail(e));
    let config: AdvisorConfig = opts.config.as_deref().map(read_json).unwrap_or_default();
    let rules: Rules = opts.rules.as_deref().map(read_json).unwrap_or_default();

    let from_name = opts.from.as_deref().unwrap_or_else(|| fail("--from is required"));
    let to_name = opts.to.as_deref().unwrap_or_else(|| fail("--to is required"));
    let from = city(&graph, from_name);
    let to = city(&graph, to_name);

    let mut ownership = Ownership::new(graph.railroads().len());
    for (names, owner) in [(&opts.own, RIDER), (&opts.rival, RIVAL)] {
        for name in names {
            let rr = graph
                .railroad_by_name(name)
                .unwrap_or_else(|| fail(format!("unknown railroad '{}'", name)));
            ownership.set_owner(rr, Some(owner));
        }
    }

    let mut rng = if opts.seed != 0 {
        SmallRng::seed_from_u64(opts.seed)
    } else {
        SmallRng::from_entropy()
    };

    let paths = shortest_paths(&graph, from, to, &SegmentLedger::new(), opts.flex);
    if paths.is_empty() {
        fail(format!("no route from {} to {}", from_name, to_name));
    }
    let paths = reduce_paths(paths, config.max_paths, &[], &mut rng);

    let model = CostModel::new(TollContext::new(&ownership, &rules, RIDER, 2), opts.engine);
    let mut routes: Vec<RouteReport> = paths
        .iter()
        .map(|path| {
            let costs = model.simulate_rolls(path, None, None, opts.trials, &mut rng);
            describe(&graph, from, path, &costs)
        })
        .collect();
    routes.sort_by_key(|r| (r.mean, r.stops.len()));

    let report = Report {
        from: graph.point(from).display_name(),
        to: graph.point(to).display_name(),
        engine: opts.engine,
        trials: opts.trials,
        routes,
    };

    if opts.json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => fail(e),
        }
        return;
    }

    println!(
        "{} -> {}: {} routes, {} rides each ({:?})",
        report.from,
        report.to,
        report.routes.len(),
        report.trials,
        report.engine
    );
    for (n, r) in report.routes.iter().enumerate() {
        let mut legs = r.stops[0].clone();
        for (rr, stop) in r.railroads.iter().zip(&r.stops[1..]) {
            legs.push_str(&format!(" -{}-> {}", rr, stop));
        }
        println!(
            "{:>3}. mean {:>6}  median {:>6}  90% {:>6}  worst {:>6}  {}",
            n + 1,
            r.mean,
            r.median,
            r.p90,
            r.worst,
            legs
        );
    }
}

fn print_usage() {
    eprintln!("Usage: railbaron --map FILE --from CITY --to CITY [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --engine NAME   basic, express or superchief (default: basic)");
    eprintln!("  --trials N      Simulated rides per route (default: 1000)");
    eprintln!("  --flex N        Extra hops beyond the shortest route (default: 0)");
    eprintln!("  --own NAME      Railroad owned by the rider (repeatable)");
    eprintln!("  --rival NAME    Railroad owned by an opponent (repeatable)");
    eprintln!("  --config FILE   Advisor settings as JSON");
    eprintln!("  --rules FILE    Fee schedule as JSON");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --json          Print the report as JSON");
}
