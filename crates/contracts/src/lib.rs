//! Wire contract between the page bar and the servers it talks to.

pub mod shared;
