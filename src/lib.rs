pub mod arena;
pub mod skiplist;
