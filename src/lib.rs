//! # Portfolio Insights
//!
//! A library for turning a raw CSV time series of portfolio values (with an
//! optional market-index column) into chart-ready derived data.
//!
//! ## Core Concepts
//!
//! - **Series Parser**: converts newline-delimited text into an ordered,
//!   typed sequence of [`DataPoint`]s, tolerating malformed rows
//! - **Growth Aggregator**: collapses the point series into one
//!   [`MonthlyGrowth`] record per calendar month present in the data, each
//!   month's baseline chained to the previous month's closing value
//!
//! Both stages are pure functions of the input text, so the whole pipeline is
//! cheap to re-run from scratch on every upload, re-filter or date-range
//! change; nothing is cached between invocations.
//!
//! ## Example
//!
//! ```rust
//! use portfolio_insights::InsightsEngine;
//!
//! let engine = InsightsEngine::new();
//! let data = engine
//!     .derive("Date,Value\n2024/01/01,1000\n2024/02/01,\"1,100\"\n")
//!     .unwrap();
//!
//! assert_eq!(data.points.len(), 2);
//! assert_eq!(data.monthly_growth[1].growth, 100);
//! ```

pub mod error;
pub mod format;
pub mod growth;
pub mod parser;

pub use error::{InsightsError, Result};
pub use format::{format_compact, format_currency, format_percent};
pub use growth::{month_key, GrowthAggregator, MonthlyGrowth};
pub use parser::{DataPoint, ParseMode, SeriesParser};

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One full recomputation of the derived data: the parsed point series plus
/// the monthly growth records.
///
/// This is the entire contract exposed to rendering and assistant-context
/// collaborators; they read it, they never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub points: Vec<DataPoint>,
    pub monthly_growth: Vec<MonthlyGrowth>,
}

impl DashboardData {
    /// Serializes the snapshot for collaborators that consume derived data as
    /// text, such as a conversational assistant grounding its answers in the
    /// current statistics.
    pub fn to_context_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parser and aggregator wired behind one explicitly constructed entry point,
/// so lifecycle and test substitution stay with the caller.
pub struct InsightsEngine {
    parser: SeriesParser,
    aggregator: GrowthAggregator,
}

impl InsightsEngine {
    pub fn new() -> Self {
        Self::with_mode(ParseMode::Lenient)
    }

    pub fn with_mode(mode: ParseMode) -> Self {
        Self {
            parser: SeriesParser::with_mode(mode),
            aggregator: GrowthAggregator::new(),
        }
    }

    /// Recomputes both derived sequences from scratch.
    ///
    /// In lenient mode this never fails for textual input; an empty or
    /// header-only blob yields an empty but valid [`DashboardData`]. In
    /// strict mode the first malformed row aborts with
    /// [`InsightsError::MalformedLine`].
    pub fn derive(&self, raw_text: &str) -> Result<DashboardData> {
        info!(
            "Deriving dashboard data from {} bytes of input",
            raw_text.len()
        );

        let points = self.parser.parse(raw_text)?;
        let monthly_growth = self.aggregator.aggregate(&points);

        debug!(
            "Derived {} data points across {} months",
            points.len(),
            monthly_growth.len()
        );

        Ok(DashboardData {
            points,
            monthly_growth,
        })
    }
}

impl Default for InsightsEngine {
    fn default() -> Self {
        Self::new()
    }
}
