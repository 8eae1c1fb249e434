pub mod aggregate;
pub mod app;
pub mod portfolio;
pub mod ui;
pub mod utils;

pub use app::App;
pub use portfolio::Portfolio;
