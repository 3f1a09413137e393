pub mod correlation;
pub mod differential;
pub mod flags;
pub mod groups;
pub mod ratios;
pub mod thresholds;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
