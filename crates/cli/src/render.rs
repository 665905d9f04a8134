//! Plain-text cut list rendering.

use std::fmt::Write;

use rebar_cut_core::api::{ErrorResponse, OptimizeResponse};
use rebar_cut_core::{CutPlan, ScrapReport, SegmentKind};

fn segment_label(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Part => "part",
        SegmentKind::KeepRemnant => "keep",
        SegmentKind::Waste => "waste",
    }
}

fn write_plan(out: &mut String, plan: &CutPlan) -> std::fmt::Result {
    let mut current_spec: Option<&str> = None;

    for allocation in &plan.allocations {
        if current_spec != Some(allocation.spec_key.as_str()) {
            writeln!(out, "\n[{}]", allocation.spec_key)?;
            writeln!(out, "{:-<60}", "")?;
            current_spec = Some(allocation.spec_key.as_str());
        }

        writeln!(
            out,
            "{}#{}  {:.3}in",
            allocation.stock_id, allocation.stock_unit_index, allocation.original_length_in
        )?;
        for cut in &allocation.cuts {
            writeln!(
                out,
                "  {:>3}. {:<24} {:>10.3}in",
                cut.cut_index, cut.part_id, cut.make_length_in
            )?;
        }
        writeln!(
            out,
            "       {:<24} {:>10.3}in",
            allocation.remainder.kind.as_str(),
            allocation.remainder.length_in
        )?;

        let layout: Vec<String> = allocation
            .segments()
            .iter()
            .map(|s| format!("{}:{:.3}", segment_label(s.kind), s.length_in))
            .collect();
        writeln!(out, "       | {} |", layout.join(" | "))?;
    }

    writeln!(out, "\nSummary")?;
    writeln!(out, "{:-<60}", "")?;
    writeln!(out, "  stock units used   {}", plan.stock_units_used())?;
    writeln!(out, "  cuts               {}", plan.cut_count())?;
    writeln!(out, "  utilization        {}", plan.utilization_percent())?;
    writeln!(out, "  kept remnants      {:.3}in", plan.summary.kept_remnant_in)?;
    writeln!(out, "  waste              {:.3}in", plan.summary.waste_in)?;
    Ok(())
}

fn write_scrap(out: &mut String, scrap: &ScrapReport) -> std::fmt::Result {
    writeln!(
        out,
        "  scrap              {:.2}% of {:.3}in (threshold {:.2}%, {})",
        scrap.scrap_percent,
        scrap.stock_used_in,
        scrap.threshold_percent,
        if scrap.is_scrap_free {
            "scrap-free"
        } else {
            "over threshold"
        }
    )
}

fn write_error(out: &mut String, error: &ErrorResponse) -> std::fmt::Result {
    writeln!(out, "error [{}/{}]: {}", error.kind, error.class, error.message)?;
    if let Some(spec_key) = &error.spec_key {
        writeln!(out, "  spec   {}", spec_key)?;
    }
    if let Some(part_id) = &error.part_id {
        writeln!(out, "  part   {}", part_id)?;
    }
    if let Some(stock_id) = &error.stock_id {
        writeln!(out, "  stock  {}", stock_id)?;
    }
    if let Some(length_in) = error.length_in {
        writeln!(out, "  length {:.3}in", length_in)?;
    }
    Ok(())
}

/// Renders a response as a human-readable cut list.
pub fn table(response: &OptimizeResponse) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    if let Some(plan) = &response.plan {
        write_plan(&mut out, plan)?;
    }
    if let Some(scrap) = &response.scrap {
        write_scrap(&mut out, scrap)?;
    }
    if let Some(error) = &response.error {
        write_error(&mut out, error)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebar_cut_core::api::optimize_json;

    #[test]
    fn test_table_lists_every_cut() {
        crate::logging::init_test();
        let response = optimize_json(crate::SAMPLE_REQUEST);
        let text = table(&response).unwrap();

        assert!(text.contains("[G60]"));
        assert!(text.contains("stock-b#1"));
        assert!(text.contains("part-2"));
        assert!(text.contains("KEEP_REMNANT"));
        assert!(text.contains("utilization"));
        assert!(text.contains("scrap-free"));
    }

    #[test]
    fn test_table_reports_error() {
        let response = optimize_json("[]");
        let text = table(&response).unwrap();
        assert!(text.starts_with("error [INVALID_REQUEST/client]"));
    }
}
