//! Fixture maps for the harness runner.

pub mod islands;
pub mod single_node;
pub mod street_grid;
pub mod unit_square;

pub use islands::Islands;
pub use single_node::SingleNode;
pub use street_grid::StreetGrid;
pub use unit_square::UnitSquare;
