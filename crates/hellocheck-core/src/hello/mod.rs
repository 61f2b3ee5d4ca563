pub mod clienthello;
pub mod cursor;
pub mod dedup;
pub mod encode;
pub mod types;
