pub mod cli;
pub mod input;
pub mod math;
pub mod model;
pub mod panels;
pub mod pipeline;
pub mod report;
pub mod tracing;
