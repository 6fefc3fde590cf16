pub mod delay;
pub mod logger;
pub mod memory;
pub mod startup;
