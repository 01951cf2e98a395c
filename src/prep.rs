// src/prep.rs

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use fancy_regex::Regex;
use log::{info, warn};
use rayon::prelude::*;

use crate::config::ParseConfig;
use crate::error::Result;
use crate::parser::TextParser;
use crate::pattern::{APOSTROPHES_PAT, QUOTES_PAT, REDUNDANT_SPACES_PAT, RT_MENTION_PAT, URL_SCAN_PAT};

/// Single quotes and apostrophes to `'`.
pub fn normalize_apostrophes(text: &str) -> String {
    APOSTROPHES_PAT.replace_all(text, "'").into_owned()
}

/// Double quotes to `"`.
pub fn normalize_quotes(text: &str) -> String {
    QUOTES_PAT.replace_all(text, "\"").into_owned()
}

pub fn remove_redundant_spaces(text: &str) -> String {
    REDUNDANT_SPACES_PAT.replace_all(text, " ").trim().to_string()
}

/// Strip the `RT @user: ` marker of a retweet without comment.
pub fn remove_rt_mention(text: &str) -> String {
    RT_MENTION_PAT.replace(text, "").into_owned()
}

pub fn remove_urls(text: &str) -> String {
    replace_all_fancy(&URL_SCAN_PAT, text, "")
}

fn replace_all_fancy(pattern: &Regex, text: &str, with: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    for found in pattern.find_iter(text) {
        match found {
            Ok(mat) => {
                out.push_str(&text[last_end..mat.start()]);
                out.push_str(with);
                last_end = mat.end();
            }
            Err(e) => {
                warn!("url scan gave up ({}), leaving the rest of the text as is", e);
                break;
            }
        }
    }
    out.push_str(&text[last_end..]);
    out
}

/// Preprocess independent lines in parallel. Output order follows input order.
pub fn prep_lines<S>(parser: &TextParser, lines: &[S], config: &ParseConfig) -> Result<Vec<String>>
where
    S: AsRef<str> + Sync,
{
    config.validate()?;
    lines
        .par_iter()
        .map(|line| parser.prep(line.as_ref(), config))
        .collect()
}

/// Preprocess `input` line by line into `output`, one result per line.
/// Invalid UTF-8 in the input is replaced, not rejected.
pub fn prep_file(parser: &TextParser, input: &Path, output: &Path, config: &ParseConfig) -> Result<usize> {
    let bytes = fs::read(input)?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.lines().collect();
    let processed = prep_lines(parser, &lines, config)?;

    let mut writer = BufWriter::new(fs::File::create(output)?);
    for line in &processed {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    info!("{} line(s) written to {}", processed.len(), output.display());
    Ok(processed.len())
}
