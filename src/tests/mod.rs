pub mod support;

mod lifecycle_scenarios;
