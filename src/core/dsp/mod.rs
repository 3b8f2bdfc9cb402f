//! Digital Signal Processing utilities

pub mod stats;

pub use stats::{
    max_value, mean_std, squared, trailing_mean, trailing_mean_of_squares, trailing_sum,
};
