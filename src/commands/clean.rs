use std::io::{self, Write};

use anyhow::{Context, Result};
use lectio::{Reference, parse_references};
use serde::Serialize;
use tracing::info;

use crate::cli::CleanArgs;

#[derive(Debug, Serialize)]
struct CleanedReference {
    input: String,
    canonical: String,
    references: Vec<Reference>,
}

pub fn run(args: CleanArgs) -> Result<()> {
    let cleaned = normalize_all(&args.references)?;
    info!(count = cleaned.len(), "normalized references");

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &cleaned)
            .context("failed to serialize clean json output")?;
        writeln!(output)?;
    } else {
        for entry in &cleaned {
            writeln!(output, "{}", entry.canonical)?;
        }
    }
    output.flush()?;
    Ok(())
}

fn normalize_all(inputs: &[String]) -> Result<Vec<CleanedReference>> {
    inputs
        .iter()
        .map(|input| {
            let references = parse_references(input)
                .with_context(|| format!("failed to normalize `{input}`"))?;
            let canonical = references
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join("; ");

            Ok(CleanedReference {
                input: input.clone(),
                canonical,
                references,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lectio::ReferenceError;

    use super::*;

    #[test]
    fn normalize_all_keeps_input_order() {
        let inputs = vec!["1st john 4:8-9".to_string(), "gen 1:4,6; ps 23".to_string()];
        let cleaned = normalize_all(&inputs).expect("references should normalize");

        let canonical = cleaned
            .iter()
            .map(|entry| entry.canonical.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(canonical, vec!["1 John 4:8-9", "Genesis 1:4,6; Psalms 23"]);
        assert_eq!(cleaned[1].references.len(), 2);
    }

    #[test]
    fn normalize_all_reports_the_failing_input() {
        let inputs = vec!["gen 1".to_string(), "2nd Luke 9".to_string()];
        let err = normalize_all(&inputs).expect_err("ineligible prefix should fail");

        assert_eq!(err.to_string(), "failed to normalize `2nd Luke 9`");
        let cause = err
            .downcast_ref::<ReferenceError>()
            .expect("cause should be a reference error");
        assert_eq!(cause.index, 0);
    }
}
