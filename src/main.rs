use std::io::{self, BufRead, Write};
use std::time::Instant;

use chessmate::chess_board::perft::perft_divide;
use chessmate::chess_board::{ChessField, GameState, GameStatistics, Player};
use chessmate::config::{SearchConfig, SelfPlayConfig, DEFAULT_DEPTH};
use chessmate::engines::{AlphaBetaEngine, ChessEngine, MinimaxEngine};
use chessmate::session::{GameMode, GameSession};
use chessmate::{ChessError, ChessResult};

use clap::{arg, command, ArgMatches, Command};
use log::{error, info, LevelFilter};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tabled::settings::Style;
use tabled::{Table, Tabled};

fn main() {
    let depth_arg = || {
        arg!(-x --depth <d> "Search depth in plies")
            .default_value("3")
            .value_parser(clap::value_parser!(u32))
    };
    let matches = command!()
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play against the computer on the terminal")
                .arg(depth_arg())
                .arg(
                    arg!(-c --computer <side> "Side played by the computer: white, black or none")
                        .default_value("black")
                        .value_parser(["white", "black", "none"]),
                ),
        )
        .subcommand(
            Command::new("selfplay")
                .about("Let the computer play against itself")
                .arg(depth_arg())
                .arg(
                    arg!(-m --"max-plies" <plies> "Stop the game after this many plies")
                        .default_value("200")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-r --"random-plies" <plies> "Number of random opening plies")
                        .default_value("0")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-s --seed <seed> "Seed for the random opening")
                        .default_value("42")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Compare minimax and alpha-beta on the start position")
                .arg(depth_arg()),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(depth_arg())
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves played before counting"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .get_matches();

    init_logging(matches.get_flag("debug"));

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches),
        Some(("selfplay", arg_matches)) => self_play(&self_play_config(arg_matches)),
        Some(("benchmark", arg_matches)) => {
            benchmark(depth(arg_matches));
            Ok(())
        }
        Some(("perft", arg_matches)) => {
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .filter(|&v| !v.is_empty())
                .collect::<Vec<_>>();
            perft(moves, depth(arg_matches))
        }
        _ => play_in_terminal(GameMode::VersusComputer { computer: Player::Black }, SearchConfig::default()),
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn depth(matches: &ArgMatches) -> u32 {
    matches.get_one::<u32>("depth").copied().unwrap_or(DEFAULT_DEPTH)
}

fn self_play_config(matches: &ArgMatches) -> SelfPlayConfig {
    let defaults = SelfPlayConfig::default();
    SelfPlayConfig {
        search: SearchConfig::with_depth(depth(matches)),
        max_plies: matches.get_one::<usize>("max-plies").copied().unwrap_or(defaults.max_plies),
        random_plies: matches
            .get_one::<usize>("random-plies")
            .copied()
            .unwrap_or(defaults.random_plies),
        seed: matches.get_one::<u64>("seed").copied().unwrap_or(defaults.seed),
    }
}

fn play(matches: &ArgMatches) -> ChessResult<()> {
    let mode = match matches.get_one::<String>("computer").map(String::as_str) {
        Some("white") => GameMode::VersusComputer { computer: Player::White },
        Some("none") => GameMode::TwoPlayer,
        _ => GameMode::VersusComputer { computer: Player::Black },
    };
    play_in_terminal(mode, SearchConfig::with_depth(depth(matches)))
}

/// Reads moves such as `e2e4` from stdin. `u` undoes one ply, `r` restarts
/// and `q` quits.
fn play_in_terminal(mode: GameMode, config: SearchConfig) -> ChessResult<()> {
    let mut session = GameSession::new(mode, config);
    if session.computer_to_move() {
        session.play_computer_move()?;
    }
    println!("{}", session.state());

    let stdin = io::stdin();
    loop {
        print!("> ");
        if let Err(err) = io::stdout().flush() {
            error!("could not flush the prompt: {}", err);
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("could not read from stdin: {}", err);
                break;
            }
        }

        match line.trim() {
            "q" => break,
            "u" => {
                session.undo();
                if session.computer_to_move() {
                    session.play_computer_move()?;
                }
            }
            "r" => {
                session.reset();
                if session.computer_to_move() {
                    session.play_computer_move()?;
                }
            }
            text => match parse_move(text) {
                Ok((from, to)) => match session.submit_move(from, to) {
                    Ok(_) => {}
                    Err(err @ ChessError::GameOver { .. }) => println!("{}, press r to restart", err),
                    Err(err) => println!("{}", err),
                },
                Err(err) => println!("{}", err),
            },
        }
        println!("{}", session.state());
        if session.status().is_over() {
            println!("{}", session.status());
        }
    }
    print_statistics(&session.statistics());
    Ok(())
}

fn parse_move(text: &str) -> ChessResult<(ChessField, ChessField)> {
    match (text.get(0..2), text.get(2..4), text.len()) {
        (Some(from), Some(to), 4) => Ok((ChessField::from_algebraic(from)?, ChessField::from_algebraic(to)?)),
        _ => Err(ChessError::InvalidAlgebraic { text: text.to_string() }),
    }
}

fn self_play(config: &SelfPlayConfig) -> ChessResult<()> {
    let mut session = GameSession::new(GameMode::ComputerOnly, config.search);
    let mut rng = Pcg64::seed_from_u64(config.seed);

    for _ in 0..config.random_plies {
        if session.status().is_over() {
            break;
        }
        let mv = session.play_random_move(&mut rng)?;
        info!("random opening move {}", mv);
    }

    let start_time = Instant::now();
    while !session.status().is_over() && session.state().move_log().len() < config.max_plies {
        let mv = session.play_computer_move()?;
        info!("ply {}: {}", session.state().move_log().len(), mv);
    }

    println!("{}", session.state());
    if session.status().is_over() {
        println!("Result: {}", session.status());
    } else {
        println!("Stopped after {} plies", config.max_plies);
    }
    println!("Elapsed: {:.2}s", start_time.elapsed().as_secs_f32());
    print_statistics(&session.statistics());
    Ok(())
}

#[derive(Tabled)]
struct StatisticsRow {
    player: String,
    checks: usize,
    intact_plies: String,
    knight_moves: usize,
    material_captured: i32,
}

fn print_statistics(stats: &GameStatistics) {
    let rows: Vec<StatisticsRow> = [Player::White, Player::Black]
        .into_iter()
        .map(|player| StatisticsRow {
            player: player.to_string(),
            checks: stats.checks_given_by(player),
            intact_plies: format!("{} / {}", stats.intact_plies(player), stats.plies),
            knight_moves: stats.knight_moves_by(player),
            material_captured: stats.material_captured[player.index()],
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::modern()));
}

#[derive(Tabled)]
struct BenchmarkRow {
    engine: String,
    ply: u32,
    score: i32,
    node_count: u64,
    elapsed_time: f32,
    knodes_per_sec: f32,
    best_move: String,
}

fn benchmark(max_depth: u32) {
    let mut table_rows = Vec::new();
    let mut engines: Vec<Box<dyn ChessEngine>> = vec![Box::new(MinimaxEngine::new()), Box::new(AlphaBetaEngine::new())];
    for depth in 1..=max_depth {
        for engine in engines.iter_mut() {
            let mut state = GameState::new();
            let start_time = Instant::now();
            match engine.search(&mut state, &SearchConfig::with_depth(depth), Player::White) {
                Ok(outcome) => {
                    let elapsed = start_time.elapsed().as_secs_f32();
                    table_rows.push(BenchmarkRow {
                        engine: engine.name().to_string(),
                        ply: depth,
                        score: outcome.value,
                        node_count: outcome.nodes,
                        elapsed_time: elapsed,
                        knodes_per_sec: outcome.nodes as f32 / elapsed.max(f32::EPSILON) / 1000f32,
                        best_move: format!("{}{}", outcome.best_move.0, outcome.best_move.1),
                    });
                }
                Err(err) => error!("{} failed at depth {}: {}", engine.name(), depth, err),
            }
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
}

fn perft(moves: Vec<&String>, depth: u32) -> ChessResult<()> {
    println!("Perft test after moves {:?} with depth {}", moves, depth);
    let mut state = GameState::new();
    for m in moves {
        let (from, to) = parse_move(m)?;
        state.move_piece(from, to, false)?;
    }

    let mut result_moves = perft_divide(&mut state, depth.min(u8::MAX as u32) as u8)?;
    result_moves.sort();

    let mut num_nodes = 0;
    for (m, c) in result_moves {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}
