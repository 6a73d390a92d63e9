use std::fmt::Write;

use crate::report::{CohortSummary, SummaryData, format_f64_6};

pub fn render_summary_json(data: &SummaryData) -> String {
    let mut out = String::new();
    out.push('{');

    push_kv_str(&mut out, "tool", "morphoscape");
    out.push(',');

    out.push_str("\"input\":{");
    push_kv_str(&mut out, "path", &data.input_path);
    out.push(',');
    push_kv_int(&mut out, "n_genes", data.n_genes);
    out.push(',');
    push_kv_int(&mut out, "n_samples", data.n_samples);
    out.push(',');
    push_kv_int(&mut out, "top_genes_used", data.top_genes_used);
    out.push_str("},");

    out.push_str("\"cohorts\":{");
    push_kv_bool(&mut out, "fallback_split", data.fallback_split);
    out.push(',');
    out.push_str("\"unassigned\":[");
    for (i, label) in data.unassigned.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_str_val(&mut out, label);
    }
    out.push_str("],");
    push_cohort(&mut out, "smooth", &data.smooth);
    out.push(',');
    push_cohort(&mut out, "rough", &data.rough);
    out.push_str("},");

    push_kv_str(&mut out, "verdict", data.verdict.key());
    out.push(',');

    out.push_str("\"game\":{");
    push_kv_num(&mut out, "total_atp", data.total_atp);
    out.push(',');
    push_kv_num(&mut out, "cost_scaling", data.cost_scaling);
    out.push(',');
    push_kv_num(&mut out, "derived_cost", data.derived_cost);
    out.push_str("},");

    out.push_str("\"sweeps\":{");
    out.push_str("\"tipping\":{");
    push_kv_num(&mut out, "benefit_min", data.benefit_min);
    out.push(',');
    push_kv_num(&mut out, "benefit_max", data.benefit_max);
    out.push(',');
    push_kv_int(&mut out, "steps", data.benefit_steps);
    out.push_str("},");
    out.push_str("\"phase_space\":{");
    push_axis(&mut out, "b", data.phase_b);
    out.push(',');
    push_axis(&mut out, "c", data.phase_c);
    out.push_str("}},");

    out.push_str("\"simulation\":{");
    push_kv_int(&mut out, "grid_size", data.grid_size);
    out.push(',');
    push_kv_int(&mut out, "generations", data.generations);
    out.push(',');
    push_kv_num(&mut out, "smooth_init_prob", data.smooth_init_prob);
    out.push(',');
    push_kv_num(&mut out, "invasion_prob", data.invasion_prob);
    out.push(',');
    out.push_str("\"rng_seed\":");
    match data.rng_seed {
        Some(seed) => {
            let _ = write!(out, "{seed}");
        }
        None => out.push_str("null"),
    }
    out.push(',');
    push_kv_num(&mut out, "final_smooth_fraction", data.final_smooth_fraction);
    out.push(',');
    out.push_str("\"snapshot_generations\":[");
    for (i, g) in data.snapshot_generations.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{g}");
    }
    out.push_str("]},");

    out.push_str("\"tool_meta\":{");
    push_kv_str(&mut out, "name", &data.tool_name);
    out.push(',');
    push_kv_str(&mut out, "version", &data.tool_version);
    out.push(',');
    out.push_str("\"git_hash\":");
    match &data.git_hash {
        Some(h) => push_str_val(&mut out, h),
        None => out.push_str("null"),
    }
    out.push('}');

    out.push('}');
    out
}

fn push_cohort(out: &mut String, key: &str, cohort: &CohortSummary) {
    push_str_key(out, key);
    out.push_str(":{");
    push_kv_int(out, "n_samples", cohort.n_samples);
    out.push(',');
    out.push_str("\"score\":");
    match cohort.score {
        Some(score) => {
            let _ = write!(out, "{}", format_f64_6(score));
        }
        None => out.push_str("null"),
    }
    out.push(',');
    push_kv_int(out, "finite_loops", cohort.finite_loops);
    out.push(',');
    push_kv_int(out, "essential_loops", cohort.essential_loops);
    out.push(',');
    out.push_str("\"error\":");
    match &cohort.error {
        Some(err) => push_str_val(out, err),
        None => out.push_str("null"),
    }
    out.push('}');
}

fn push_axis(out: &mut String, key: &str, (min, max, steps): (f64, f64, usize)) {
    push_str_key(out, key);
    out.push_str(":{");
    push_kv_num(out, "min", min);
    out.push(',');
    push_kv_num(out, "max", max);
    out.push(',');
    push_kv_int(out, "steps", steps);
    out.push('}');
}

fn push_kv_str(out: &mut String, key: &str, value: &str) {
    push_str_key(out, key);
    out.push(':');
    push_str_val(out, value);
}

fn push_kv_num(out: &mut String, key: &str, value: f64) {
    push_str_key(out, key);
    out.push(':');
    let _ = write!(out, "{}", format_f64_6(value));
}

fn push_kv_int(out: &mut String, key: &str, value: usize) {
    push_str_key(out, key);
    out.push(':');
    let _ = write!(out, "{value}");
}

fn push_kv_bool(out: &mut String, key: &str, value: bool) {
    push_str_key(out, key);
    out.push(':');
    out.push_str(if value { "true" } else { "false" });
}

fn push_str_key(out: &mut String, key: &str) {
    out.push('"');
    out.push_str(&escape_json(key));
    out.push('"');
}

fn push_str_val(out: &mut String, value: &str) {
    out.push('"');
    out.push_str(&escape_json(value));
    out.push('"');
}

fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
