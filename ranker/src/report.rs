use std::fmt::{self, Write as _};

use decision_ranking::{
    dataset::Dataset, sensitivity::Stability, Comparison, SawResult, Scored, WpResult,
};

fn name_width<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names
        .into_iter()
        .map(|n| n.chars().count())
        .chain(["Alternative".len()])
        .max()
        .unwrap_or_default()
}

pub fn saw(result: &SawResult) -> Result<String, fmt::Error> {
    let width = name_width(result.ranking.iter().map(|r| r.alternative()));
    let mut out = String::new();
    write!(out, "{:<width$}", "Alternative")?;
    for criterion in &result.criteria {
        write!(out, "  {criterion:>12}")?;
    }
    writeln!(out, "  {:>11}  {:>4}", "Total Score", "Rank")?;
    for row in &result.ranking {
        write!(out, "{:<width$}", row.alternative)?;
        for contribution in &row.contributions {
            write!(out, "  {contribution:>12.4}")?;
        }
        writeln!(out, "  {:>11.4}  {:>4}", *row.total_score, row.rank)?;
    }
    let winner = result.winner();
    writeln!(
        out,
        "\nWinner: {} (Score: {:.4})",
        winner.alternative, *winner.total_score
    )?;
    Ok(out)
}

pub fn wp(result: &WpResult) -> Result<String, fmt::Error> {
    let width = name_width(result.ranking.iter().map(|r| r.alternative()));
    let mut out = String::new();
    let weights: Vec<String> = result
        .weights
        .iter()
        .map(|(criterion, weight)| format!("{criterion} = {:.4}", weight.as_f64()))
        .collect();
    writeln!(out, "Normalized weights: {}\n", weights.join(", "))?;
    writeln!(
        out,
        "{:<width$}  {:>12}  {:>8}  {:>4}",
        "Alternative", "S Value", "V Value", "Rank"
    )?;
    for row in &result.ranking {
        writeln!(
            out,
            "{:<width$}  {:>12.4}  {:>8.4}  {:>4}",
            row.alternative,
            *row.s_value,
            row.v_value.as_f64(),
            row.rank
        )?;
    }
    let winner = result.winner();
    writeln!(
        out,
        "\nWinner: {} (V Value: {:.4})",
        winner.alternative,
        winner.v_value.as_f64()
    )?;
    Ok(out)
}

pub fn comparison(comparison: &Comparison) -> Result<String, fmt::Error> {
    let width = name_width(comparison.ranks.iter().map(|p| p.alternative.as_str()));
    let mut out = String::new();
    writeln!(
        out,
        "{:<width$}  {:>11}  {:>8}    {:<width$}  {:>8}  {:>8}",
        "SAW", "Total Score", "Rank", "WP", "V Value", "Rank"
    )?;
    for (saw, wp) in comparison.saw.ranking.iter().zip(&comparison.wp.ranking) {
        writeln!(
            out,
            "{:<width$}  {:>11.4}  {:>8}    {:<width$}  {:>8.4}  {:>8}",
            saw.alternative,
            *saw.total_score,
            saw.rank,
            wp.alternative,
            wp.v_value.as_f64(),
            wp.rank
        )?;
    }
    writeln!(out)?;
    writeln!(out, "SAW winner:     {}", comparison.saw_winner)?;
    writeln!(out, "WP winner:      {}", comparison.wp_winner)?;
    writeln!(out, "Agreement:      {:?}", comparison.agreement)?;
    writeln!(
        out,
        "Matching ranks: {}/{}",
        comparison.matching_ranks(),
        comparison.ranks.len()
    )?;
    Ok(out)
}

pub fn stability(stability: &Stability) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{} winner {} kept first place in {}/{} trials ({:.1}%)",
        stability.method,
        stability.baseline_winner,
        stability.retained,
        stability.trials,
        stability.retention.as_f64() * 100.0
    )?;
    if stability.failed > 0 {
        writeln!(out, "{} trials could not be scored", stability.failed)?;
    }
    let mut winners: Vec<(&String, &usize)> = stability.winners.iter().collect();
    winners.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (alternative, wins) in winners {
        writeln!(out, "  {alternative}: {wins}")?;
    }
    Ok(out)
}

pub fn dataset(name: &str, data: &Dataset) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{name}")?;
    for criterion in data.matrix.criteria() {
        let kind = data
            .types
            .get(criterion)
            .map(|k| k.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "  {criterion} ({kind}, SAW {}, WP {})",
            data.saw_weights.get(criterion).as_f64(),
            data.wp_weights.get(criterion).as_f64()
        )?;
    }
    writeln!(out, "  alternatives: {}", data.matrix.alternatives().join(", "))?;
    Ok(out)
}

#[cfg(test)]
mod test {
    use decision_ranking::{compare, dataset, score_saw, score_wp};

    #[test]
    fn saw_report_names_winner() {
        let data = dataset::hosting().unwrap();
        let result = score_saw(&data.matrix, &data.saw_weights, &data.types).unwrap();
        let report = super::saw(&result).unwrap();
        assert!(report.contains("Total Score"));
        assert!(report.contains("C3 Bandwidth"));
        assert!(report.contains("Winner: Qwords (Score: 0.9265)"));
    }

    #[test]
    fn wp_report_names_winner() {
        let data = dataset::hosting().unwrap();
        let result = score_wp(&data.matrix, &data.wp_weights, &data.types).unwrap();
        let report = super::wp(&result).unwrap();
        assert!(report.contains("C1 Harga = 0.2000"));
        assert!(report.contains("Winner: Qwords (V Value: "));
    }

    #[test]
    fn comparison_report_summarizes_agreement() {
        let data = dataset::hosting().unwrap();
        let comparison =
            compare(&data.matrix, &data.saw_weights, &data.wp_weights, &data.types).unwrap();
        let report = super::comparison(&comparison).unwrap();
        assert!(report.contains("Agreement:      Same"));
        assert!(report.contains("Matching ranks: 5/5"));
    }

    #[test]
    fn stability_report_mentions_failed_trials() {
        use decision_ranking::{sensitivity::Stability, Method, Normalized};

        let stability = Stability {
            method: Method::Wp,
            baseline_winner: "B".into(),
            trials: 10,
            retained: 7,
            failed: 3,
            retention: Normalized::ratio(7, 10),
            winners: [("B".to_owned(), 7)].into_iter().collect(),
        };
        let report = super::stability(&stability).unwrap();
        assert!(report.starts_with("WP winner B kept first place in 7/10 trials (70.0%)"));
        assert!(report.contains("3 trials could not be scored"));
        assert!(report.contains("  B: 7"));
    }

    #[test]
    fn dataset_listing() {
        let data = dataset::hosting().unwrap();
        let listing = super::dataset("hosting", &data).unwrap();
        assert!(listing.contains("C1 Harga (Cost, SAW 0.2, WP 5)"));
        assert!(listing.contains("Hostinger, Niagahoster"));
    }
}
