pub(crate) use server::{ServerOptions, start_server};

mod app_state;
mod server;
mod tile_route;
