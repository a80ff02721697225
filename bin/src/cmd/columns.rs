//! Column listing command implementation.

use anyhow::Result;
use fundus_features::registry::{available_columns, columns_by_category};
use fundus_features::{Cadence, ColumnCategory, FeatureConfig};

/// List catalogued metric columns, optionally filtered by category.
pub(crate) fn list_columns(
    category: Option<String>,
    verbose: bool,
    config: &FeatureConfig,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Columns                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let categories = [
        (ColumnCategory::Income, "Income"),
        (ColumnCategory::BalanceSheet, "Balance sheet"),
        (ColumnCategory::CashFlow, "Cash flow"),
        (ColumnCategory::Ratio, "Ratio"),
        (ColumnCategory::Market, "Market"),
    ];

    for (cat, cat_name) in categories {
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let cat_columns = columns_by_category(&cat);
        if cat_columns.is_empty() {
            continue;
        }

        println!("{cat_name}:");
        println!("{}", "-".repeat(60));

        for column in cat_columns {
            let active = match column.cadence {
                Cadence::Quarterly => config.quarter_columns.iter().any(|c| c == column.name),
                Cadence::Daily => config.daily_columns.iter().any(|c| c == column.name),
            };
            let marker = if active { "*" } else { " " };

            if verbose {
                println!(
                    "{marker} {:16} - {} ({:?})",
                    column.name, column.description, column.cadence
                );
            } else {
                println!("{marker} {}", column.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for column descriptions.");
    }
    println!("* = processed by the active configuration");
    println!(
        "Quarterly windows: {:?}  Daily windows: {:?}  Back quarters: [{}, {})",
        config.quarter_windows,
        config.daily_windows,
        config.min_back_quarter,
        config.max_back_quarter
    );

    let catalogue = available_columns();
    let unknown: Vec<&str> = config
        .quarter_columns
        .iter()
        .chain(&config.daily_columns)
        .map(String::as_str)
        .filter(|name| !catalogue.iter().any(|c| c.name == *name))
        .collect();
    if !unknown.is_empty() {
        println!("Uncatalogued configured columns: {}", unknown.join(", "));
    }
    println!();

    Ok(())
}
