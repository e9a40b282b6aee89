pub mod citations;
pub mod classify;
pub mod inspect;
