pub mod array;
pub mod buildcore;
pub mod config;
pub mod linked;
pub mod log;
pub mod node;
pub mod queue;
pub mod stress;
