pub mod start_stop;
pub mod usecase;
