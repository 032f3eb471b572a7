pub(super) use start::start;

mod cli;
mod points;
mod server;
mod start;
