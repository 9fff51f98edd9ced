// td — offline, deterministic command-line demo of the truth-discovery
// engine. No network, no OS RNG: the tie-breaker is seeded explicitly.

mod args;

use std::fs;
use std::process::ExitCode;

use args::{parse_and_validate, parse_iterator_spec, parse_seed_u64, AlgorithmChoice, Args};
use td_algo::{Iterator, RunState};
use td_core::TieRng;
use td_engine::Algorithm;
use td_report::{Result as RunResult, SupervisedData};

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("td: error: {e}");
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("td: error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|e| format!("cannot read {}: {e}", args.input.display()))?;

    let seed = parse_seed_u64(&args.seed).map_err(|e| e.to_string())?;
    let mut rng = TieRng::from_seed_u64(seed);

    let algorithm = to_algorithm(args.algorithm);
    let mut iterator = match &args.iterator {
        Some(spec) => Iterator::new(parse_iterator_spec(spec).map_err(|e| e.to_string())?),
        None => Iterator::new(algorithm.default_stopping_rule()),
    };

    let state = if args.supervised {
        let (truth, dataset) =
            td_io::parse_supervised(&text).map_err(|e| format!("parsing input: {e}"))?;
        let (result, state) = td_engine::run(&dataset, algorithm, &mut iterator)
            .map_err(|e| format!("engine: {e}"))?;
        print_result(&result, args.quiet);

        let supervised = SupervisedData::new(&dataset, truth);
        match supervised.accuracy(&result, &mut rng) {
            Ok(acc) => println!("td: accuracy={acc:.4}"),
            Err(e) => eprintln!("td: warning: could not score accuracy: {e}"),
        }
        state
    } else {
        let dataset =
            td_io::parse_dataset(&text).map_err(|e| format!("parsing input: {e}"))?;
        let (result, state) = td_engine::run(&dataset, algorithm, &mut iterator)
            .map_err(|e| format!("engine: {e}"))?;
        print_result(&result, args.quiet);
        state
    };

    if !args.quiet && state == RunState::EarlyStop {
        println!("td: note: run stopped early (numerical early-stop); result reflects the latest vectors");
    }
    Ok(ExitCode::from(0))
}

fn to_algorithm(choice: AlgorithmChoice) -> Algorithm {
    match choice {
        AlgorithmChoice::Voting => Algorithm::Voting,
        AlgorithmChoice::Sums => Algorithm::Sums,
        AlgorithmChoice::AverageLog => Algorithm::AverageLog,
        AlgorithmChoice::Investment => Algorithm::investment(),
        AlgorithmChoice::PooledInvestment => Algorithm::pooled_investment(),
        AlgorithmChoice::TruthFinder => Algorithm::truth_finder(),
    }
}

fn print_result(result: &RunResult<usize, usize, String>, quiet: bool) {
    if quiet {
        return;
    }
    let mut vars: Vec<usize> = result.belief.keys().copied().collect();
    vars.sort_unstable();
    for var in vars {
        let mut vals: Vec<String> = result.most_believed_values(&var).into_iter().collect();
        vals.sort();
        println!("variable {var}: {}", vals.join(" | "));
    }

    let (mean, stddev) = result.trust_stats();
    println!("trust mean={mean:.4} stddev={stddev:.4}");
    if let Some(iters) = result.iterations {
        println!("iterations={iters}");
    }
}
