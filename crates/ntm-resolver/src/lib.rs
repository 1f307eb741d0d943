mod report;
mod resolve;
mod types;

pub use report::{build_report, UpgradeReport};
pub use resolve::resolve;
pub use types::{MatchResult, Strategy};

#[cfg(test)]
mod tests;
