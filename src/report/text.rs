use crate::report::{CohortSummary, ReportContext, format_f64_6};

pub fn render_report_text(ctx: &ReportContext) -> String {
    let mut out = String::new();

    out.push_str("Morphotype Topology & Evolutionary Tipping-Point Report\n");
    out.push_str("=======================================================\n\n");

    out.push_str("1. Cohort assignment\n");
    out.push_str(&format!("Smooth cohort: {} samples\n", ctx.smooth.n_samples));
    out.push_str(&format!("Rough cohort: {} samples\n", ctx.rough.n_samples));
    if ctx.fallback_split {
        out.push_str("Assignment: positional midpoint fallback (no morphotype keywords matched)\n");
    } else {
        out.push_str("Assignment: morphotype keyword match\n");
        if ctx.unassigned_count > 0 {
            out.push_str(&format!(
                "Unassigned columns (no keyword match): {}\n",
                ctx.unassigned_count
            ));
        }
    }
    out.push('\n');

    out.push_str("2. Topological robustness (degree-1 loops)\n");
    out.push_str(&cohort_line(&ctx.smooth));
    out.push_str(&cohort_line(&ctx.rough));
    out.push_str(&format!("Verdict: {}\n\n", ctx.verdict.statement()));

    out.push_str("3. Metabolic cost\n");
    out.push_str(&format!(
        "Total ATP per virulence unit: {}\n",
        format_f64_6(ctx.total_atp)
    ));
    out.push_str(&format!(
        "Derived evolutionary cost (c): {}\n\n",
        format_f64_6(ctx.derived_cost)
    ));

    out.push_str("4. Tipping point\n");
    out.push_str(&format!(
        "Collapse zone: benefit <= {}\n",
        format_f64_6(ctx.derived_cost)
    ));
    match ctx.first_coexistence_benefit {
        Some(b) => out.push_str(&format!(
            "First coexistence benefit in sweep: {}\n\n",
            format_f64_6(b)
        )),
        None => out.push_str("The swept benefit range never escapes the collapse zone.\n\n"),
    }

    out.push_str("5. Biofilm invasion timeline\n");
    for line in &ctx.snapshots {
        out.push_str(&format!(
            "T={}: {} risk ({}), smooth fraction {}\n",
            line.generation,
            line.risk,
            line.caption,
            format_f64_6(line.smooth_fraction)
        ));
    }
    out.push_str(&format!(
        "Final smooth fraction after {} generations: {}\n",
        ctx.generations,
        format_f64_6(ctx.final_smooth_fraction)
    ));
    out.push_str(&format!(
        "Methods note: the invasion probability ({}) is a fixed constant and is not derived from the metabolic cost c.\n",
        format_f64_6(ctx.invasion_prob)
    ));

    out
}

fn cohort_line(cohort: &CohortSummary) -> String {
    match (&cohort.score, &cohort.error) {
        (Some(score), _) => format!(
            "{} robustness: {} ({} finite loops, {} essential)\n",
            cohort.label,
            format_f64_6(*score),
            cohort.finite_loops,
            cohort.essential_loops
        ),
        (None, Some(err)) => format!("{} robustness: unavailable ({})\n", cohort.label, err),
        (None, None) => format!("{} robustness: unavailable\n", cohort.label),
    }
}
