//! Digit Span Report - offline summary of persisted result records
//!
//! Reads every `<id>_<phase>_test.txt` file under the data directory and
//! prints one row per subject with pre/post scores and the combined-score
//! difference. Downstream statistics happen elsewhere; this only marshals
//! the records.

use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "Digit Span Report")]
#[command(about = "Summarize persisted digit span test records")]
struct Args {
    /// Directory holding result records
    #[arg(short, long, default_value = "data")]
    data_dir: String,

    /// Emit rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pre,
    Post,
}

/// One persisted record
#[derive(Clone, Debug, Serialize)]
struct Scores {
    forward: usize,
    backward: usize,
    combined: usize,
}

/// Per-subject report row
#[derive(Clone, Debug, Serialize)]
struct Row {
    subject_id: String,
    pre: Option<Scores>,
    post: Option<Scores>,
    /// post combined - pre combined, when both phases exist
    diff: Option<i64>,
}

/// Split `<id>_<phase>_test.txt` into subject id and phase
fn parse_file_name(name: &str) -> Option<(&str, Phase)> {
    let stem = name.strip_suffix("_test.txt")?;
    if let Some(id) = stem.strip_suffix("_pre") {
        return Some((id, Phase::Pre));
    }
    if let Some(id) = stem.strip_suffix("_post") {
        return Some((id, Phase::Post));
    }
    None
}

/// Parse the single `forward,backward,combined` record line
fn parse_record_line(line: &str) -> Option<Scores> {
    let mut parts = line.trim().split(',');
    let forward = parts.next()?.parse().ok()?;
    let backward = parts.next()?.parse().ok()?;
    let combined = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Scores {
        forward,
        backward,
        combined,
    })
}

/// Collect rows from every parseable record file, sorted by subject id
fn load_rows(data_dir: &Path) -> Result<Vec<Row>, Box<dyn Error>> {
    let mut by_subject: BTreeMap<String, (Option<Scores>, Option<Scores>)> = BTreeMap::new();

    for dir_entry in fs::read_dir(data_dir)? {
        let dir_entry = dir_entry?;
        let file_name = dir_entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some((subject_id, phase)) = parse_file_name(name) else {
            continue;
        };

        let content = fs::read_to_string(dir_entry.path())?;
        let Some(line) = content.lines().next() else {
            eprintln!("skipping empty record file: {}", name);
            continue;
        };
        let Some(scores) = parse_record_line(line) else {
            eprintln!("skipping malformed record file: {}", name);
            continue;
        };

        let slot = by_subject.entry(subject_id.to_string()).or_default();
        match phase {
            Phase::Pre => slot.0 = Some(scores),
            Phase::Post => slot.1 = Some(scores),
        }
    }

    let rows = by_subject
        .into_iter()
        .map(|(subject_id, (pre, post))| {
            let diff = match (&pre, &post) {
                (Some(p), Some(q)) => Some(q.combined as i64 - p.combined as i64),
                _ => None,
            };
            Row {
                subject_id,
                pre,
                post,
                diff,
            }
        })
        .collect();
    Ok(rows)
}

fn format_scores(scores: &Option<Scores>) -> String {
    match scores {
        Some(s) => format!("{}/{}/{}", s.forward, s.backward, s.combined),
        None => "-".to_string(),
    }
}

fn print_table(rows: &[Row]) {
    println!(
        "{:<16} {:>12} {:>12} {:>10}",
        "Subject", "Pre (F/B/C)", "Post (F/B/C)", "Diff"
    );
    for row in rows {
        let diff = row
            .diff
            .map(|d| format!("{:+}", d))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:>12} {:>12} {:>10}",
            row.subject_id,
            format_scores(&row.pre),
            format_scores(&row.post),
            diff
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let data_dir = Path::new(&args.data_dir);

    if !data_dir.is_dir() {
        return Err(format!("data directory not found: {}", args.data_dir).into());
    }

    let rows = load_rows(data_dir)?;
    if rows.is_empty() {
        println!("No result records in {}", args.data_dir);
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_name() {
        assert_eq!(parse_file_name("s01_pre_test.txt"), Some(("s01", Phase::Pre)));
        assert_eq!(
            parse_file_name("subject_42_post_test.txt"),
            Some(("subject_42", Phase::Post))
        );
        assert_eq!(parse_file_name("notes.txt"), None);
        assert_eq!(parse_file_name("s01_mid_test.txt"), None);
    }

    #[test]
    fn test_parse_record_line() {
        let scores = parse_record_line("5,3,8\n").unwrap();
        assert_eq!(scores.forward, 5);
        assert_eq!(scores.backward, 3);
        assert_eq!(scores.combined, 8);

        assert!(parse_record_line("5,3").is_none());
        assert!(parse_record_line("5,3,8,1").is_none());
        assert!(parse_record_line("a,b,c").is_none());
    }

    #[test]
    fn test_load_rows_pairs_phases_and_diffs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("s01_pre_test.txt"), "4,3,7\n").unwrap();
        fs::write(dir.path().join("s01_post_test.txt"), "6,4,10\n").unwrap();
        fs::write(dir.path().join("s02_pre_test.txt"), "5,5,10\n").unwrap();
        fs::write(dir.path().join("README.md"), "not a record").unwrap();

        let rows = load_rows(dir.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject_id, "s01");
        assert_eq!(rows[0].diff, Some(3));
        assert_eq!(rows[1].subject_id, "s02");
        assert!(rows[1].post.is_none());
        assert_eq!(rows[1].diff, None);
    }
}
