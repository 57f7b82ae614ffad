//! examples of usage of RustedFinOps
/// cost minimization, energy accumulation, quadrature and chart export walkthroughs
pub mod finops_examples;
