pub mod feed;
pub mod network;
pub mod pool;
pub mod resolver;
pub mod sink;
