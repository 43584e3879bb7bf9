pub mod cli;
pub mod error;

pub mod commands {
    pub mod consolidate;
}

pub mod core {
    pub mod coordinate;
    pub mod event;
    pub mod graph;
    pub mod node;
    pub mod svtype;
}

pub mod io {
    pub mod adapters;
    pub mod call_writer;
    pub mod readers;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
