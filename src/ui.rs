mod game;
mod hud;
mod modal;
mod notify;
mod render;
mod session;
pub use game::game;
