pub mod cache;
pub mod cases;
pub mod icons;
pub mod page;
pub mod submissions;
