use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct DiffArgs {
    /// An input WAD file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input WAD file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,
}

fn indent(depth: usize, line: &str) -> String {
    String::from_iter(std::iter::repeat("  ").take(depth).chain([line]))
}

/// Lay out a text map with one statement per line and indented blocks
pub(crate) fn split_statements(textmap: &str) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quoted = false;

    for c in textmap.chars() {
        if quoted {
            current.push(c);
            quoted = c != '"';
            continue;
        }

        match c {
            '"' => {
                current.push(c);
                quoted = true;
            }
            '{' => {
                current.push(c);
                lines.push(indent(depth, current.trim()));
                current.clear();
                depth += 1;
            }
            '}' => {
                if !current.trim().is_empty() {
                    lines.push(indent(depth, current.trim()));
                    current.clear();
                }
                depth = depth.saturating_sub(1);
                lines.push(indent(depth, "}"));
            }
            ';' => {
                current.push(c);
                lines.push(indent(depth, current.trim()));
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() {
        lines.push(indent(depth, current.trim()));
    }

    lines.iter().join("\n")
}

impl DiffArgs {
    pub fn handle(&self) -> Result<()> {
        info!(
            "comparing {} to {}",
            self.left.display(),
            self.right.display()
        );

        let left = split_statements(&super::read_textmap(&self.left)?);
        let right = split_statements(&super::read_textmap(&self.right)?);

        if left == right {
            println!("text maps are identical");
            return Ok(());
        }

        let diff = TextDiff::from_lines(&left, &right);
        for change in diff.iter_all_changes() {
            let line = change.to_string_lossy();
            let line = line.trim_end();
            match change.tag() {
                ChangeTag::Delete => println!("{}", format!("-{line}").red()),
                ChangeTag::Insert => println!("{}", format!("+{line}").green()),
                ChangeTag::Equal => println!(" {line}"),
            }
        }

        Ok(())
    }
}
