//! Cross-source compliance reporting.

mod aggregator;
mod source;

pub use aggregator::ReportAggregator;
pub use source::{
    CommissionSource, InMemorySource, PROFIT_COMPLIANCE_LABEL, PROFIT_RANGE_LABEL,
    SALE_COMPLIANCE_LABEL, SALE_RANGE_LABEL, StoreManagerSource,
};
