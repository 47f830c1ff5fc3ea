pub mod forms;
pub mod handlers;
pub mod helpers;
pub mod middleware;
pub mod nav;
pub mod session;
pub mod state;
pub mod templates;

#[cfg(test)]
mod testing;

pub use state::AppState;
