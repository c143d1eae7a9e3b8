//! Trade statistics and account balance engine for the trading journal.
//!
//! Stored records enter through [`ingest`], are narrowed with
//! [`analytics::apply_filters`], and are folded by the stats and balance
//! calculators. Everything past ingestion is pure and total.

pub mod analytics;
pub mod error;
pub mod ingest;
pub mod models;

pub use analytics::{
    account_balance, apply_filters, compute_stats, compute_stats_with, equity_curve,
    portfolio_balance, trade_profit, trade_profit_percentage, trade_profit_percentage_with,
    AccountBalance, DateRangePreset, EquityCurvePoint, PortfolioBalance, TradeStats,
};
pub use error::JournalError;
pub use ingest::{ingest_trades, without_placeholders, IngestReport, JournalSnapshot};
pub use models::{
    CreateAccountInput, DateRange, Direction, FilterCriteria, Outcome, Settings, StrategyType,
    Trade, TradingAccount,
};
