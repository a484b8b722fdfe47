mod analysis;
mod cli;
mod convert;
mod entry;
mod handlers;
mod state;
mod text;

pub use entry::run;
