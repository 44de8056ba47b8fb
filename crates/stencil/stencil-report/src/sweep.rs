//! Plain-text summaries printed by the CLI: clustering statistics and the
//! threshold sweep.

use stencil_clustering::{ClusterStats, Exploration};

const RULE_WIDTH: usize = 80;

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("{rule}\n{title}\n{rule}\n"));
}

/// Statistics for one clustering run.
pub fn render_stats(stats: &ClusterStats) -> String {
    let mut out = String::new();
    banner(&mut out, "CLUSTERING STATISTICS");
    out.push_str(&format!("Total messages:      {}\n", stats.total_messages));
    out.push_str(&format!("Number of clusters:  {}\n", stats.cluster_count));
    if let Some(sizes) = &stats.sizes {
        out.push_str(&format!("Avg cluster size:    {:.1}\n", sizes.mean));
        out.push_str(&format!("Median cluster size: {:.0}\n", sizes.median));
        out.push_str(&format!("Min cluster size:    {}\n", sizes.min));
        out.push_str(&format!("Max cluster size:    {}\n", sizes.max));
    }
    out.push_str("\nCluster size distribution:\n");
    for (size, clusters) in &stats.distribution {
        out.push_str(&format!("  Size {size}: {clusters} clusters\n"));
    }
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

/// The full sweep: per-threshold statistics, a summary table, and the
/// recommendation.
pub fn render_sweep(exploration: &Exploration) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total messages: {}\n", exploration.total_messages));
    out.push_str(&format!("Unique skeletons: {}\n\n", exploration.distinct_skeletons));

    banner(&mut out, "TESTING DIFFERENT THRESHOLDS");
    for row in &exploration.rows {
        out.push_str(&format!("\nThreshold: {:.2}\n", row.threshold));
        out.push_str(&format!("  Clusters: {}\n", row.cluster_count));
        if let Some(sizes) = &row.sizes {
            out.push_str(&format!("  Avg size: {:.1}\n", sizes.mean));
            out.push_str(&format!("  Median size: {:.0}\n", sizes.median));
            out.push_str(&format!("  Min: {}, Max: {}\n", sizes.min, sizes.max));
        }
        out.push_str(&format!(
            "  Top {} cluster sizes: {:?}\n",
            row.top_sizes.len(),
            row.top_sizes
        ));
    }

    out.push('\n');
    banner(&mut out, "SUMMARY");
    out.push_str("\nThreshold vs Cluster Count:\n");
    for row in &exploration.rows {
        out.push_str(&format!(
            "  {:.2} -> {:>3} clusters\n",
            row.threshold, row.cluster_count
        ));
    }

    out.push('\n');
    banner(&mut out, "RECOMMENDATIONS");
    let (min, max) = exploration.target_band;
    match &exploration.recommendation {
        Some(r) if r.in_band => {
            out.push_str(&format!("\nRecommended threshold: {:.2}\n", r.threshold));
            out.push_str(&format!(
                "  (Produces {} clusters, target {min}-{max})\n",
                r.cluster_count
            ));
        }
        Some(r) => {
            out.push_str(&format!("\nRecommended threshold: {:.2}\n", r.threshold));
            out.push_str(&format!(
                "  (Produces {} clusters; no threshold landed in {min}-{max})\n",
                r.cluster_count
            ));
        }
        None => {
            out.push_str(&format!(
                "\nNo threshold produced fewer than {max} clusters; try higher thresholds.\n"
            ));
        }
    }
    out
}
