pub mod assumptions;
pub mod report;
