pub mod assets;
pub mod episodes;
pub mod links;
pub mod pages;
pub mod stats;
