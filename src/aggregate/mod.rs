pub mod correlation;
pub mod distribution;
pub mod levels;
pub mod ranking;
pub mod temporal;
