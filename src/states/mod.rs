pub mod debounce;
pub mod document;
