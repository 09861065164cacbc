//! Message types generated from `schemas/*.umsg` by the build script, plus a
//! minimal hash-checked envelope showing how the schema hash is meant to be
//! used on the receiving side.

pub mod envelope;

pub mod demo {
    include!(concat!(env!("OUT_DIR"), "/demo/AllTypes.rs"));

    pub mod led {
        include!(concat!(env!("OUT_DIR"), "/demo/led/LedCommand.rs"));
    }

    pub mod names {
        include!(concat!(env!("OUT_DIR"), "/demo/names/Writer.rs"));
    }
}

pub mod ping {
    include!(concat!(env!("OUT_DIR"), "/Ping.rs"));
}

pub mod blob {
    include!(concat!(env!("OUT_DIR"), "/Blob.rs"));
}

pub use blob::Blob;
pub use demo::led::LedCommand;
pub use demo::AllTypes;
pub use ping::Ping;
