mod aggregate;
mod api;
mod utils;
