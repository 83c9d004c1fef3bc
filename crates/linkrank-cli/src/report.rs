//! CSV reports written by `linkrank compare --out DIR`.
//!
//! - `rankings.csv`: `dataset,method,k,rank,node,score`, one row per
//!   entry of every top-k list.
//! - `jaccard.csv`: `dataset,k` followed by one column per method pair,
//!   in comparison order. A pair that was not computed leaves its cell
//!   empty.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use linkrank_core::NodeId;
use linkrank_rank::compare::PAIRS;
use linkrank_rank::pipeline::DatasetReport;
use serde::Serialize;

pub const RANKINGS_FILE: &str = "rankings.csv";
pub const JACCARD_FILE: &str = "jaccard.csv";

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    dataset: &'a str,
    method: &'static str,
    k: usize,
    rank: usize,
    node: NodeId,
    score: f64,
}

/// Write every top-k list of every report.
///
/// # Errors
///
/// Fails on any write error.
pub fn write_rankings<W: io::Write>(w: W, reports: &[DatasetReport]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);
    for report in reports {
        for (method, lists) in &report.rankings {
            for (&k, list) in lists {
                for (i, entry) in list.iter().enumerate() {
                    writer.serialize(RankingRow {
                        dataset: &report.name,
                        method: method.slug(),
                        k,
                        rank: i + 1,
                        node: entry.node,
                        score: entry.score,
                    })?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write one Jaccard row per dataset and k.
///
/// # Errors
///
/// Fails on any write error.
pub fn write_jaccard<W: io::Write>(w: W, reports: &[DatasetReport]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(w);

    let mut header = vec!["dataset".to_string(), "k".to_string()];
    header.extend(PAIRS.iter().map(|p| p.label()));
    writer.write_record(&header)?;

    for report in reports {
        for row in &report.jaccard {
            let mut record = vec![report.name.clone(), row.k.to_string()];
            for pair in PAIRS {
                let cell = row
                    .pairs
                    .iter()
                    .find(|p| p.pair == pair)
                    .map(|p| p.score.to_string())
                    .unwrap_or_default();
                record.push(cell);
            }
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write both CSV files into `dir`, creating it if needed.
///
/// # Errors
///
/// Fails if the directory or either file cannot be written.
pub fn write_reports(dir: &Path, reports: &[DatasetReport]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let rankings = dir.join(RANKINGS_FILE);
    let file = fs::File::create(&rankings)
        .with_context(|| format!("Failed to create {}", rankings.display()))?;
    write_rankings(file, reports).with_context(|| format!("Failed to write {}", rankings.display()))?;

    let jaccard = dir.join(JACCARD_FILE);
    let file = fs::File::create(&jaccard)
        .with_context(|| format!("Failed to create {}", jaccard.display()))?;
    write_jaccard(file, reports).with_context(|| format!("Failed to write {}", jaccard.display()))?;

    Ok(vec![rankings, jaccard])
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrank_core::EdgeList;
    use linkrank_core::config::RunConfig;
    use linkrank_rank::pipeline::rank_edges;

    fn report() -> DatasetReport {
        let config = RunConfig {
            top_k: vec![1, 2],
            ..RunConfig::default()
        };
        rank_edges(
            "cycle",
            EdgeList::from_pairs([(0, 1), (1, 2), (2, 0)]),
            &config,
        )
        .expect("ranks")
    }

    #[test]
    fn rankings_have_one_row_per_entry() {
        let mut buf = Vec::new();
        write_rankings(&mut buf, &[report()]).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("dataset,method,k,rank,node,score"));
        // 4 methods × (1 + 2) entries
        assert_eq!(lines.count(), 12);
        assert!(text.contains("cycle,hits_authority,2,2,"));
    }

    #[test]
    fn jaccard_header_lists_pairs_in_order() {
        let mut buf = Vec::new();
        write_jaccard(&mut buf, &[report()]).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "dataset,k,InDegree VS HITS (authority),InDegree VS HITS (hub),\
                 InDegree VS PageRank,PageRank VS HITS (authority),\
                 PageRank VS HITS (hub),HITS (authority) VS HITS (hub)"
            )
        );
        assert_eq!(lines.next(), Some("cycle,1,1,1,1,1,1,1"));
        assert_eq!(lines.next(), Some("cycle,2,1,1,1,1,1,1"));
    }

    #[test]
    fn reports_land_in_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("nested/out");
        let written = write_reports(&out, &[report()]).expect("write");
        assert_eq!(written.len(), 2);
        assert!(out.join(RANKINGS_FILE).is_file());
        assert!(out.join(JACCARD_FILE).is_file());
    }
}
