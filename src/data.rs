pub mod action;
pub mod element;
pub mod state;
