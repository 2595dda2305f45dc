pub mod html;
pub mod jwt;
