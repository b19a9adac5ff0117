pub mod json;
pub mod markdown;
pub mod terminal;

use crate::aggregator::AuditResult;

pub trait Reporter {
    fn report(&self, result: &AuditResult) -> String;
}
