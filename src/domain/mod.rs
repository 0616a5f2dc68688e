// Domain layer - Dashboard model and the pure population logic
pub mod arn;
pub mod channel;
pub mod console;
pub mod dashboard;
pub mod metrics;
pub mod populator;
pub mod template;
