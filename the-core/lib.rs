//! Text primitives shared by the menu engine and its frontends.

pub mod chars;
pub mod width;
