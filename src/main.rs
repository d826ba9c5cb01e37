use fortune_wheel::{range_labels, FortuneWheel, WheelConfig};
use log::debug;
use std::env;
use std::process;

const USAGE: &str = "usage: fortune-wheel [--range MIN MAX STEP] [--seed N] [--size PX] [LABEL ...]

Spins a wheel over the given labels (2 to 20 of them), or over the numbers
MIN, MIN+STEP, ... MAX. Defaults to the numbers 1 to 8.
Click the wheel or press Space to spin.";

struct Args {
    labels: Vec<String>,
    range: Option<(i64, i64, i64)>,
    seed: Option<u64>,
    size: Option<usize>,
}

fn parse_args() -> Result<Args, String> {
    let mut parsed = Args {
        labels: Vec::new(),
        range: None,
        seed: None,
        size: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "--range" => {
                let mut next = || -> Result<i64, String> {
                    let value = args.next().ok_or("--range needs MIN MAX STEP")?;
                    value
                        .parse::<i64>()
                        .map_err(|_| format!("--range expects integers, got {value:?}"))
                };
                parsed.range = Some((next()?, next()?, next()?));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed {value:?}"))?;
                parsed.seed = Some(seed);
            }
            "--size" => {
                let value = args.next().ok_or("--size needs a value")?;
                let size = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid size {value:?}"))?;
                parsed.size = Some(size);
            }
            "--" => parsed.labels.extend(args.by_ref()),
            _ => parsed.labels.push(arg),
        }
    }
    Ok(parsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let default_log_level = "info";
    let env = env_logger::Env::default().filter_or("RUST_LOG", default_log_level);
    env_logger::init_from_env(env);

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            process::exit(2);
        }
    };

    let labels = match (args.range, args.labels.is_empty()) {
        (Some(_), false) => {
            eprintln!("pass either --range or labels, not both\n\n{USAGE}");
            process::exit(2);
        }
        (Some((min, max, step)), true) => {
            range_labels(min, max, step).map_err(|report| format!("{report:?}"))?
        }
        (None, true) => range_labels(1, 8, 1).map_err(|report| format!("{report:?}"))?,
        (None, false) => args.labels,
    };
    debug!("labels: {labels:?}");

    let size = args.size.unwrap_or(640);
    let config = WheelConfig::builder()
        .window_width(size)
        .window_height(size)
        .maybe_seed(args.seed)
        .build();

    let wheel = match FortuneWheel::new(config, labels) {
        Ok(wheel) => wheel,
        Err(report) => {
            eprintln!("{}\n\n{USAGE}", report.current_context());
            process::exit(2);
        }
    };
    wheel.show()
}
