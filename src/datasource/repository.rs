pub mod episode;
pub mod link;
pub mod seed;
pub mod stats;
