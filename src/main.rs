use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use football_health_dashboard::config::DashboardArgs;
use football_health_dashboard::data::views::{
    compliance_distribution, melt_for_comparison, sorted_by_injury_risk_desc,
    top_n_by_injury_risk, ComparisonField,
};
use football_health_dashboard::report::{metric_cards, render_table, NO_DATA_MESSAGE};
use football_health_dashboard::state::AppState;
use football_health_dashboard::DatasetStore;

fn main() -> Result<()> {
    env_logger::init();

    let args = DashboardArgs::parse();

    let store = DatasetStore::new(&args.data);
    let dataset = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;

    let mut state = AppState::new(dataset).with_strict_positions(args.strict_position);
    state
        .set_spec(args.filter_spec())
        .context("applying filters")?;

    if args.json {
        print_json(&state, args.top)?;
    } else {
        print_text(&state, args.top);
    }

    if let Some(path) = &args.export {
        let bytes = state
            .export_csv(args.export_order())
            .context("serialising current view")?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} players to {}", state.view.len(), path.display());
    }

    Ok(())
}

fn print_text(state: &AppState, top: usize) {
    println!("Football Health Analytics Dashboard");
    println!(
        "Filters: position={} high_risk={} non_compliant={}",
        state.spec.position, state.spec.min_injury_risk_only, state.spec.non_compliant_only
    );
    println!();

    for card in metric_cards(&state.view.stats) {
        println!("{:<22} {}", card.label, card.value);
    }

    println!("\nCompliance Status Distribution");
    let slices = compliance_distribution(&state.view);
    if slices.is_empty() {
        println!("{NO_DATA_MESSAGE}");
    }
    for (status, count) in slices {
        let share = 100.0 * count as f64 / state.view.len() as f64;
        println!("  {status:<14} {count:>4}  ({share:.1}%)");
    }

    println!("\nTop {top} Injury Risk");
    let leaders = top_n_by_injury_risk(&state.view, top);
    if leaders.is_empty() {
        println!("{NO_DATA_MESSAGE}");
    }
    for (rank, record) in leaders.iter().enumerate() {
        println!("  {:>2}. {:<24} {:>6.1}", rank + 1, record.player_name, record.injury_risk);
    }

    println!("\nPlayer Data (sorted by Injury Risk)");
    print!("{}", render_table(sorted_by_injury_risk_desc(&state.view)));
    if state.view.is_empty() {
        println!();
    }
}

fn print_json(state: &AppState, top: usize) -> Result<()> {
    let distribution: Vec<_> = compliance_distribution(&state.view)
        .into_iter()
        .map(|(status, count)| json!({ "compliance_status": status, "count": count }))
        .collect();

    let report = json!({
        "filters": state.spec,
        "stats": state.view.stats,
        "metrics": metric_cards(&state.view.stats),
        "compliance_distribution": distribution,
        "top_injury_risk": top_n_by_injury_risk(&state.view, top),
        "comparison": melt_for_comparison(&state.view, &ComparisonField::DEFAULT),
        "rows": sorted_by_injury_risk_desc(&state.view),
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encoding JSON report")?
    );
    Ok(())
}
