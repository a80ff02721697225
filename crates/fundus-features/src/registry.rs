//! Column registry for discovering the metrics features are computed over.
//!
//! This module provides metadata for every quarterly fundamental and daily
//! market aggregate the default configuration processes.

use serde::{Deserialize, Serialize};

/// Metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnCategory {
    /// Income statement lines
    Income,
    /// Balance sheet lines
    BalanceSheet,
    /// Cash flow statement lines
    CashFlow,
    /// Derived ratios
    Ratio,
    /// Daily market aggregates
    Market,
}

impl ColumnCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Income => "Income statement metrics",
            Self::BalanceSheet => "Balance sheet metrics",
            Self::CashFlow => "Cash flow statement metrics",
            Self::Ratio => "Per-share and liquidity ratios",
            Self::Market => "Daily market aggregates",
        }
    }
}

/// Cadence of the table a column lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    /// Quarterly fundamentals
    Quarterly,
    /// Daily market data
    Daily,
}

/// Metadata about a metric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name as it appears in the source table
    pub name: &'static str,

    /// Category classification
    pub category: ColumnCategory,

    /// Table cadence
    pub cadence: Cadence,

    /// Human-readable description
    pub description: &'static str,
}

const fn quarterly(
    name: &'static str,
    category: ColumnCategory,
    description: &'static str,
) -> ColumnInfo {
    ColumnInfo {
        name,
        category,
        cadence: Cadence::Quarterly,
        description,
    }
}

/// Get information about all catalogued columns.
#[must_use]
pub fn available_columns() -> Vec<ColumnInfo> {
    use ColumnCategory::*;

    vec![
        quarterly("revenue", Income, "Total revenue"),
        quarterly("netinc", Income, "Net income"),
        quarterly("ebitda", Income, "Earnings before interest, taxes, depreciation and amortization"),
        quarterly("gp", Income, "Gross profit"),
        quarterly("rnd", Income, "Research and development expense"),
        quarterly("sgna", Income, "Selling, general and administrative expense"),
        quarterly("netinccmn", Income, "Net income to common stockholders"),
        quarterly("assets", BalanceSheet, "Total assets"),
        quarterly("debt", BalanceSheet, "Total debt"),
        quarterly("workingcapital", BalanceSheet, "Working capital"),
        quarterly("cashneq", BalanceSheet, "Cash and equivalents"),
        quarterly("ncf", CashFlow, "Net cash flow"),
        quarterly("fcf", CashFlow, "Free cash flow"),
        quarterly("ncfx", CashFlow, "Effect of exchange rate changes on cash"),
        quarterly("divyield", Ratio, "Dividend yield"),
        quarterly("currentratio", Ratio, "Current assets over current liabilities"),
        ColumnInfo {
            name: "marketcap",
            category: Market,
            cadence: Cadence::Daily,
            description: "Market capitalization",
        },
        ColumnInfo {
            name: "pe",
            category: Market,
            cadence: Cadence::Daily,
            description: "Price to earnings ratio",
        },
    ]
}

/// Get all columns in a specific category.
#[must_use]
pub fn columns_by_category(category: &ColumnCategory) -> Vec<ColumnInfo> {
    available_columns()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Names of all columns of the given cadence, in catalogue order.
#[must_use]
pub fn column_names(cadence: Cadence) -> Vec<String> {
    available_columns()
        .into_iter()
        .filter(|info| info.cadence == cadence)
        .map(|info| info.name.to_string())
        .collect()
}

/// Get information about a specific column by name.
#[must_use]
pub fn get_column_info(name: &str) -> Option<ColumnInfo> {
    available_columns().into_iter().find(|info| info.name == name)
}
