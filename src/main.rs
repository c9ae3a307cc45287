use rayon::prelude::*;

use pasforto::{config, output, Estimator};

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut password: Option<String> = None;
    let mut batch_file: Option<String> = None;
    let mut user_inputs: Vec<String> = Vec::new();
    let mut json = false;
    let mut min_score: Option<u8> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return 0;
            }
            "--json" => json = true,
            "--batch" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("[ERROR] --batch requires a file path");
                    return 2;
                }
                batch_file = Some(args[i].clone());
            }
            "--user" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("[ERROR] --user requires a value");
                    return 2;
                }
                user_inputs.push(args[i].clone());
            }
            "--min-score" => {
                i += 1;
                let parsed = args.get(i).and_then(|v| v.parse::<u8>().ok());
                match parsed {
                    Some(n) if n <= 4 => min_score = Some(n),
                    _ => {
                        eprintln!("[ERROR] --min-score requires a number 0..4");
                        return 2;
                    }
                }
            }
            other if other.starts_with("--") => {
                eprintln!("[ERROR] unknown flag: {}", other);
                eprintln!();
                print_usage();
                return 2;
            }
            other => {
                if password.is_some() {
                    eprintln!("[ERROR] more than one password argument");
                    return 2;
                }
                password = Some(other.to_string());
            }
        }
        i += 1;
    }

    // config file from the current directory, if any
    let cwd = std::env::current_dir().ok();
    let project = match config::load_config(cwd.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };
    user_inputs.extend(project.user_inputs.iter().cloned());

    let estimator = match Estimator::with_params(project.threat.clone()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("[ERROR] failed to initialize: {}", e);
            return 2;
        }
    };

    let user_refs: Vec<&str> = user_inputs.iter().map(|s| s.as_str()).collect();

    match (password, batch_file) {
        (Some(pw), None) => run_single(&estimator, &pw, &user_refs, json, min_score),
        (None, Some(path)) => run_batch(&estimator, &path, &user_refs, json, min_score),
        (Some(_), Some(_)) => {
            eprintln!("[ERROR] choose either a password argument or --batch");
            2
        }
        (None, None) => {
            print_usage();
            2
        }
    }
}

fn print_usage() {
    eprintln!("pasforto - password strength estimator");
    eprintln!();
    eprintln!("usage:");
    eprintln!("  pasforto <password>       estimate one password");
    eprintln!("  pasforto --batch <file>   estimate every line of a file");
    eprintln!("  pasforto --help           show this help");
    eprintln!();
    eprintln!("flags:");
    eprintln!("  --user <word>             user-specific input (repeatable)");
    eprintln!("  --json                    emit json instead of text");
    eprintln!("  --min-score <0..4>        exit 1 if any password scores below");
    eprintln!();
    eprintln!("a .pasforto.toml in the current directory may override the");
    eprintln!("threat model and add standing user inputs.");
}

fn run_single(
    estimator: &Estimator,
    password: &str,
    user_inputs: &[&str],
    json: bool,
    min_score: Option<u8>,
) -> i32 {
    let estimate = estimator.estimate(password, user_inputs);
    if json {
        match output::render_json(&estimate) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                return 2;
            }
        }
    } else {
        print!("{}", output::render_text(&estimate));
    }
    match min_score {
        Some(min) if estimate.score < min => 1,
        _ => 0,
    }
}

fn run_batch(
    estimator: &Estimator,
    path: &str,
    user_inputs: &[&str],
    json: bool,
    min_score: Option<u8>,
) -> i32 {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] failed to read {}: {}", path, e);
            return 2;
        }
    };
    let passwords: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();

    // the estimator is immutable, so lines fan out across threads
    let estimates: Vec<_> = passwords
        .par_iter()
        .map(|pw| estimator.estimate(pw, user_inputs))
        .collect();

    let mut below = 0usize;
    for estimate in &estimates {
        if json {
            match serde_json::to_string(estimate) {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("[ERROR] failed to serialize: {}", e);
                    return 2;
                }
            }
        } else {
            println!(
                "{}  {:.3} bits  {:<12} {}",
                estimate.score, estimate.entropy, estimate.crack_time_display, estimate.password
            );
        }
        if min_score.is_some_and(|min| estimate.score < min) {
            below += 1;
        }
    }

    if let Some(min) = min_score {
        if below > 0 {
            eprintln!();
            eprintln!("{} password(s) below score {}", below, min);
            return 1;
        }
    }
    0
}
