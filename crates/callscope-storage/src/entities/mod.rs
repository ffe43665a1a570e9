pub mod alert;
pub mod call_analysis;
pub mod rule_configuration;
