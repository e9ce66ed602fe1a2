pub mod cli;
pub mod form;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
pub mod tui;
pub mod util;
