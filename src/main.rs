use std::path::PathBuf;
use std::time::Instant;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use mazeroute::{
    GeneratorConfig, MazeGenerator, UniquenessGate, bench, io, logging, render,
    solvers::{self, Solver},
};

fn coordinate_arg(name: &'static str, default: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("ROW,COL")
        .help(format!("{} cell as ROW,COL", name))
        .default_value(default)
}

fn make_parser() -> Command {
    let size_args = [
        Arg::new("width")
            .long("width")
            .value_parser(value_parser!(usize))
            .default_value("20"),
        Arg::new("height")
            .long("height")
            .value_parser(value_parser!(usize))
            .default_value("20"),
        coordinate_arg("start", "0,0"),
        coordinate_arg("dest", "19,19"),
    ];

    Command::new("mazeroute")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate density-controlled mazes and list every shortest route")
        .subcommand_required(true)
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Write logs to FILE instead of stderr"),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate mazes and write each to a new file")
                .args(size_args.clone())
                .arg(
                    Arg::new("density")
                        .short('d')
                        .long("density")
                        .value_parser(value_parser!(u8))
                        .default_value("30")
                        .help("Obstacle percentage"),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_parser(value_parser!(usize))
                        .default_value("1"),
                )
                .arg(Arg::new("seed").long("seed").value_parser(value_parser!(u64)))
                .arg(
                    Arg::new("unique")
                        .long("unique")
                        .value_parser(["reference", "always", "never"])
                        .default_value("reference")
                        .help("When to require a single shortest route"),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .default_value(".")
                        .help("Directory for the generated files"),
                ),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve a maze file and draw every shortest route")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .args(size_args.into_iter().skip(2))
                .arg(
                    Arg::new("exhaustive")
                        .long("exhaustive")
                        .action(ArgAction::SetTrue)
                        .help("Use the slow forward-expansion solver"),
                ),
        )
        .subcommand(
            Command::new("bench")
                .about("Time batch generation and solving over the profiled densities")
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_parser(value_parser!(usize))
                        .default_value("100"),
                ),
        )
}

fn parse_coordinate(matches: &ArgMatches, name: &str) -> Result<(usize, usize), String> {
    let raw = matches.get_one::<String>(name).cloned().unwrap_or_default();
    let (row, col) = raw
        .split_once(',')
        .ok_or_else(|| format!("--{} expects ROW,COL, got {:?}", name, raw))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("--{}: {}", name, e))
    };
    Ok((parse(row)?, parse(col)?))
}

fn run_generate(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let width = *matches.get_one::<usize>("width").unwrap_or(&20);
    let height = *matches.get_one::<usize>("height").unwrap_or(&20);
    let density = *matches.get_one::<u8>("density").unwrap_or(&30);
    let count = *matches.get_one::<usize>("count").unwrap_or(&1);
    let out = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let uniqueness = match matches.get_one::<String>("unique").map(String::as_str) {
        Some("always") => UniquenessGate::Always,
        Some("never") => UniquenessGate::Never,
        _ => UniquenessGate::Reference,
    };
    let config = GeneratorConfig {
        seed: matches.get_one::<u64>("seed").copied(),
        uniqueness,
        max_attempts: None,
    };

    let start = parse_coordinate(matches, "start")?;
    let dest = parse_coordinate(matches, "dest")?;
    let mut generator = MazeGenerator::with_config(width, height, density, start, dest, config)?;

    let mazes = generator.generate_many(count)?;
    for (i, maze) in mazes.iter().enumerate() {
        let path = out.join(format!("Maze{}_{}.txt", density, i));
        io::save_maze(maze, &path)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run_solve(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let file = matches
        .get_one::<PathBuf>("file")
        .ok_or("missing maze file")?;
    let start = parse_coordinate(matches, "start")?;
    let dest = parse_coordinate(matches, "dest")?;
    let maze = io::load_maze(file, start, dest)?;
    let solver = if matches.get_flag("exhaustive") {
        Solver::Exhaustive
    } else {
        Solver::AllShortest
    };

    let timer = Instant::now();
    let routes = solvers::solve_maze(&maze, solver);
    let elapsed = timer.elapsed();

    print!("{}", maze);
    if routes.is_empty() {
        println!("No route from start to destination.");
        return Ok(());
    }
    println!(
        "{} shortest routes found with {} in {:?}:",
        routes.len(),
        solver,
        elapsed
    );
    let mut stdout = std::io::stdout();
    for route in &routes {
        println!();
        render::print_route(&mut stdout, &maze, route)?;
        println!("Route length: {}", route.len());
    }
    Ok(())
}

fn run_bench(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let count = *matches.get_one::<usize>("count").unwrap_or(&100);
    for timing in bench::profile(count)? {
        println!("{}", timing);
    }
    Ok(())
}

fn main() {
    let matches = make_parser().get_matches();
    let log_file = matches.get_one::<PathBuf>("log-file");
    let _guard = match logging::init_tracing(log_file.map(PathBuf::as_path)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: cannot open log file: {}", e);
            std::process::exit(1);
        }
    };

    let result = match matches.subcommand() {
        Some(("generate", sub)) => run_generate(sub),
        Some(("solve", sub)) => run_solve(sub),
        Some(("bench", sub)) => run_bench(sub),
        _ => Ok(()),
    };
    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
