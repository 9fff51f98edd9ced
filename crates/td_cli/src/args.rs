// Deterministic, offline CLI argument parsing & validation.
// - No networked paths (reject http/https schemes)
// - Input file must be a local, existing file
// - Optional seed parsing (u64 decimal or 0x-hex up to 16 nybbles)

use clap::{Parser, ValueEnum};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    Voting,
    Sums,
    AverageLog,
    Investment,
    PooledInvestment,
    TruthFinder,
}

#[derive(Debug, Parser)]
pub struct Args {
    /// CSV file: one source per row, variables as columns, empty cells mean
    /// no claim.
    #[arg(long)]
    pub input: PathBuf,

    /// Treat the first row of `--input` as ground truth and report accuracy
    /// against it instead of only printing the result.
    #[arg(long)]
    pub supervised: bool,

    #[arg(long, value_enum, default_value = "sums")]
    pub algorithm: AlgorithmChoice,

    /// `fixed-N`, or `<measure>-convergence-<threshold>[-limit-N]` with
    /// `measure` one of `l1`, `l2`, `l_inf`, `cosine`. Defaults to the
    /// chosen algorithm's own stopping rule when omitted.
    #[arg(long)]
    pub iterator: Option<String>,

    /// Seed for the accuracy tie-breaker; accepts decimal u64 or
    /// 0x-prefixed hex (at most 16 hex digits).
    #[arg(long, default_value = "0")]
    pub seed: String,

    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    BadSeed(String),
    BadIterator(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadSeed(s) => write!(f, "invalid seed: {s}"),
            BadIterator(s) => write!(f, "invalid --iterator: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();

    ensure_local_exists(&args.input, "--input")?;
    args.input = normalize_path(&args.input);

    let _ = parse_seed_u64(&args.seed)?;
    if let Some(spec) = &args.iterator {
        let _ = parse_iterator_spec(spec)?;
    }

    Ok(args)
}

fn ensure_local_exists(p: &PathBuf, label: &'static str) -> Result<(), CliError> {
    let s = p.to_string_lossy().to_string();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(format!("{label} {s}")));
    }
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {s}")))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {s}")));
    }
    Ok(())
}

fn normalize_path(p: &PathBuf) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.clone()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

fn has_scheme(s: &str) -> bool {
    s.contains("://") || s.starts_with("http:") || s.starts_with("https:")
}

/// Parse seed as u64: decimal or 0x-hex (1..=16 nybbles).
pub fn parse_seed_u64(s: &str) -> Result<u64, CliError> {
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CliError::BadSeed(s.to_string()));
        }
        u64::from_str_radix(rest, 16).map_err(|_| CliError::BadSeed(s.to_string()))
    } else {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(CliError::BadSeed(s.to_string()));
        }
        s.parse::<u64>().map_err(|_| CliError::BadSeed(s.to_string()))
    }
}

/// Parse the `fixed-N` / `<measure>-convergence-<threshold>[-limit-N]`
/// vocabulary into a [`td_algo::StoppingRule`].
pub fn parse_iterator_spec(spec: &str) -> Result<td_algo::StoppingRule, CliError> {
    use td_algo::{DistanceMeasure, StoppingRule};

    if let Some(n) = spec.strip_prefix("fixed-") {
        let limit = n.parse().map_err(|_| CliError::BadIterator(spec.to_string()))?;
        return Ok(StoppingRule::Fixed { limit });
    }

    let tokens: Vec<&str> = spec.split('-').collect();
    let bad = || CliError::BadIterator(spec.to_string());
    if tokens.len() != 3 && tokens.len() != 5 {
        return Err(bad());
    }
    let measure = match tokens[0] {
        "l1" => DistanceMeasure::L1,
        "l2" => DistanceMeasure::L2,
        "l_inf" => DistanceMeasure::LInf,
        "cosine" => DistanceMeasure::Cosine,
        _ => return Err(bad()),
    };
    if tokens[1] != "convergence" {
        return Err(bad());
    }
    let threshold: f64 = tokens[2].parse().map_err(|_| bad())?;

    if tokens.len() == 3 {
        return Ok(StoppingRule::metric(measure, threshold));
    }
    if tokens[3] != "limit" {
        return Err(bad());
    }
    let limit: u64 = tokens[4].parse().map_err(|_| bad())?;
    Ok(StoppingRule::Metric { measure, threshold, limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_decimal_ok() {
        assert_eq!(parse_seed_u64("12345").unwrap(), 12_345u64);
    }

    #[test]
    fn seed_hex_ok() {
        assert_eq!(parse_seed_u64("0xDEADBEEFCAFE1234").unwrap(), 0xDEADBEEFCAFE1234u64);
    }

    #[test]
    fn seed_bad() {
        assert!(parse_seed_u64("0x").is_err());
        assert!(parse_seed_u64("0xZZ").is_err());
        assert!(parse_seed_u64("-1").is_err());
        assert!(parse_seed_u64("").is_err());
    }

    #[test]
    fn non_local_path_detection() {
        assert!(has_scheme("http://x"));
        assert!(has_scheme("scheme://x"));
        assert!(!has_scheme(r"/tmp/file.csv"));
    }

    #[test]
    fn fixed_iterator_spec() {
        let rule = parse_iterator_spec("fixed-20").unwrap();
        assert!(matches!(rule, td_algo::StoppingRule::Fixed { limit: 20 }));
    }

    #[test]
    fn metric_iterator_spec_with_default_limit() {
        let rule = parse_iterator_spec("l2-convergence-0.000001").unwrap();
        assert!(matches!(
            rule,
            td_algo::StoppingRule::Metric { measure: td_algo::DistanceMeasure::L2, limit: 1_000_000, .. }
        ));
    }

    #[test]
    fn metric_iterator_spec_with_explicit_limit() {
        let rule = parse_iterator_spec("cosine-convergence-0.001-limit-200").unwrap();
        assert!(matches!(
            rule,
            td_algo::StoppingRule::Metric { measure: td_algo::DistanceMeasure::Cosine, limit: 200, .. }
        ));
    }

    #[test]
    fn bad_iterator_spec_is_rejected() {
        assert!(parse_iterator_spec("nonsense").is_err());
        assert!(parse_iterator_spec("l2-convergence-not-a-number").is_err());
    }
}
