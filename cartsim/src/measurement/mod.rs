pub mod record;
pub mod ledger;
pub mod grading;
