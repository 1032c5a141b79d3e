pub mod ppqn;
pub mod signal_chain;
