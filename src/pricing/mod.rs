//! Slice pricers, density evaluator and their configuration.

pub mod config;
pub mod density;
pub mod implied;
pub mod slice;
pub mod types;

pub use config::FourierConfig;
pub use density::pdf_with_mgf_grid;
pub use implied::{implied_vol, implied_vols_from_prices};
pub use slice::{slice_pricer_with_mgf_grid, slice_qvar_pricer_with_mgf_grid};
pub use types::{Measure, OptionSlice, OptionType, QuadratureRule, VariableType};
