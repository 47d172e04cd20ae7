//! Declarative monitor configuration
//!
//! Monitored expressions are code, but where and when a monitor writes its
//! records (prefix and schedule) can come from YAML.

mod monitor;

pub use monitor::MonitorConfig;
