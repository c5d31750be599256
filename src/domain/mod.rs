pub mod chunk;
pub mod commit;
pub mod event;
pub mod summary;
