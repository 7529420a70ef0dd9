//! Contours for the transform variables and the quadrature over them.

pub mod grid;
pub mod quadrature;

pub use grid::{
    linspace, phi_grid, psi_grid, theta_grid, transform_var_grid, transform_var_grid_by_name,
    Contour, TransformGrids,
};
pub use quadrature::{integration_weights, nan_sum};
