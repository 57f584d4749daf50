use clap::Args;
use std::path::PathBuf;

use leasefinder::catalog::LeaseFeedImporter;
use leasefinder::config::AppConfig;
use leasefinder::configurator::{
    ConfigurationState, Dimension, LeaseOption, ListingCatalog, ListingId, ListingSnapshot,
    ScoreCalculator,
};
use leasefinder::error::AppError;

use crate::routes::score_report;

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// Dealer feed CSV export for one listing
    #[arg(long)]
    pub(crate) feed_csv: PathBuf,
    /// Include every option in the output instead of the top five
    #[arg(long)]
    pub(crate) all_options: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional dealer feed CSV export; a built-in sample listing is used
    /// when omitted.
    #[arg(long)]
    pub(crate) feed_csv: Option<PathBuf>,
}

pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs {
        feed_csv,
        all_options,
    } = args;

    let config = AppConfig::load()?;
    let calculator = ScoreCalculator::new(config.scoring.score_config());

    let import = LeaseFeedImporter::from_path(feed_csv)?;
    let report = score_report(&import.catalog, &calculator);
    let snapshot = &import.catalog.snapshot;

    println!(
        "Lease score report for {} ({} {})",
        report.listing_id, snapshot.make, snapshot.model
    );
    println!(
        "- {} options imported | {} of {} rows skipped",
        report.summary.option_count, import.skipped_rows, import.total_rows
    );
    match snapshot.retail_price {
        Some(price) => println!("- retail price {price} kr."),
        None => println!("- retail price unknown; options cannot be ranked"),
    }
    if let Some(from_price) = report.summary.from_price {
        println!("- from {from_price} kr./md.");
    }

    println!("Ranked options:");
    let shown = if all_options {
        report.ranked_options.len()
    } else {
        report.ranked_options.len().min(5)
    };
    for entry in &report.ranked_options[..shown] {
        println!("  {} | {}", describe(&entry.option), score_label(entry.lease_score));
    }
    if shown < report.ranked_options.len() {
        println!(
            "  ... {} more (use --all-options to list them)",
            report.ranked_options.len() - shown
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { feed_csv } = args;

    let config = AppConfig::load()?;
    let catalog = match feed_csv {
        Some(path) => {
            let import = LeaseFeedImporter::from_path(path)?;
            if import.skipped_rows > 0 {
                println!(
                    "(skipped {} of {} feed rows)",
                    import.skipped_rows, import.total_rows
                );
            }
            import.catalog
        }
        None => sample_catalog(),
    };

    println!("Lease configurator demo");
    let snapshot = &catalog.snapshot;
    println!(
        "Listing {}: {} {} {}",
        snapshot.listing_id,
        snapshot.make,
        snapshot.model,
        snapshot.variant.as_deref().unwrap_or("")
    );

    let mut state = ConfigurationState::new(catalog, config.scoring.score_config());
    if !state.is_ready() {
        println!("No published options; nothing to configure.");
        return Ok(());
    }

    println!(
        "Dimensions: {:?} km/år | {:?} mdr. | {:?} kr. upfront",
        state.index().available_mileages(),
        state.index().available_periods(),
        state.index().available_upfronts()
    );
    print_selected("Opened at the cheapest option", &state);

    println!("\nMileage previews from here:");
    print_impacts(&state, Dimension::Mileage);

    println!("\nPicking 15000 km/år (the stored combination keeps the mileage and drops the deposit):");
    state.set_mileage(15_000);
    print_selected("Landed on", &state);

    println!("\nJumping to the best value-for-money option:");
    state.select_best_score();
    print_selected("Landed on", &state);

    println!("\nBack to the cheapest option:");
    state.reset_to_cheapest();
    print_selected("Landed on", &state);

    Ok(())
}

fn print_selected(prefix: &str, state: &ConfigurationState) {
    if let Some(option) = state.selected_option() {
        println!(
            "- {}: {} | {}",
            prefix,
            describe(option),
            score_label(state.selected_score())
        );
    }
}

fn print_impacts(state: &ConfigurationState, dimension: Dimension) {
    let current = state
        .selection()
        .map(|selection| selection.value(dimension));
    for (value, impact) in state.impacts(dimension) {
        let marker = if Some(*value) == current {
            "selected"
        } else if impact.is_available {
            "exact"
        } else {
            "approximate"
        };
        println!(
            "  {:>6} -> {:+} kr./md. ({:+.1}%) [{}]",
            value, impact.delta_kr, impact.delta_percent, marker
        );
    }
}

fn describe(option: &LeaseOption) -> String {
    format!(
        "{} km/år | {} mdr. | {} kr. upfront | {} kr./md.",
        option.mileage_per_year, option.period_months, option.first_payment, option.monthly_price
    )
}

fn score_label(score: Option<u8>) -> String {
    match score {
        Some(score) => format!("score {score}/100"),
        None => "unscored".to_string(),
    }
}

fn sample_catalog() -> ListingCatalog {
    let option = |mileage, period, upfront, monthly| LeaseOption {
        mileage_per_year: mileage,
        period_months: period,
        first_payment: upfront,
        monthly_price: monthly,
    };

    ListingCatalog {
        snapshot: ListingSnapshot {
            listing_id: ListingId("L-2041".to_string()),
            make: "Peugeot".to_string(),
            model: "208".to_string(),
            variant: Some("Active".to_string()),
            retail_price: Some(189_995),
            available_from: None,
        },
        options: vec![
            option(12_000, 12, 0, 3000),
            option(12_000, 24, 0, 2500),
            option(15_000, 24, 0, 2400),
            option(20_000, 24, 5000, 2300),
        ],
    }
}
