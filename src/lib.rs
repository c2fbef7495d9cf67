pub mod api;
pub mod cli;
pub mod inbox;
pub mod io;
pub mod model;
pub mod tui;
pub mod util;
