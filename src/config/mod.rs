pub mod compute;

pub use compute::ComputeConfig;
