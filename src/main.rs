// src/main.rs
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use log::{error, info};

use tweetprep::{prep_file, prep_lines, ActionSpec, ParseConfig, TextParser, TokenizerChoice};

fn usage(program: &str) -> ! {
    eprintln!("--- tweetprep: social media text preprocessing ---");
    eprintln!("Usage: {} <input> [output] [option=value ...]", program);
    eprintln!("Options:");
    eprintln!("  tokenizer=social_media|naive|weibo|weibo_segment_hashtag|chinese|japanese|thai");
    eprintln!("  lang=<code>          language of the text (stop words)");
    eprintln!("  <category>=<action>  e.g. urls=remove emojis=demojize mentions=tag");
    process::exit(1);
}

/// Split `key=value` arguments into a config.
fn build_config(options: &[String]) -> tweetprep::Result<ParseConfig> {
    let mut config = ParseConfig::default();
    let mut action_pairs: Vec<(&str, &str)> = Vec::new();
    for option in options {
        let (key, value) = option.split_once('=').unwrap_or((option.as_str(), ""));
        match key {
            "tokenizer" => config.tokenizer = value.parse::<TokenizerChoice>()?,
            "lang" => config.language = Some(value.to_string()),
            _ => action_pairs.push((key, value)),
        }
    }
    config.actions = ActionSpec::from_pairs(&action_pairs)?;
    config.validate()?;
    Ok(config)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }
    let input = Path::new(&args[1]);
    let (output, options) = match args.get(2) {
        Some(arg) if !arg.contains('=') => (Some(Path::new(arg)), &args[3..]),
        _ => (None, &args[2..]),
    };

    let config = match build_config(options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid option: {}", e);
            usage(&args[0]);
        }
    };

    let init_start = Instant::now();
    let parser = match TextParser::new() {
        Ok(parser) => parser,
        Err(e) => {
            error!("parser init failed: {}", e);
            process::exit(1);
        }
    };
    info!("Parser initialized. (Took {:?})", init_start.elapsed());

    let start_time = Instant::now();
    match output {
        Some(output) => match prep_file(&parser, input, output, &config) {
            Ok(count) => println!("{} line(s) preprocessed into {} (Took {:?})", count, output.display(), start_time.elapsed()),
            Err(e) => {
                eprintln!("Error preprocessing '{}': {}", input.display(), e);
                process::exit(1);
            }
        },
        None => {
            let bytes = match fs::read(input) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("Error reading file '{}': {}", input.display(), e);
                    process::exit(1);
                }
            };
            let content = String::from_utf8_lossy(&bytes);
            let lines: Vec<&str> = content.lines().collect();
            match prep_lines(&parser, &lines, &config) {
                Ok(processed) => {
                    for line in &processed {
                        println!("{}", line);
                    }
                    info!("{} line(s) preprocessed. (Took {:?})", processed.len(), start_time.elapsed());
                }
                Err(e) => {
                    eprintln!("Error preprocessing '{}': {}", input.display(), e);
                    process::exit(1);
                }
            }
        }
    }
}
