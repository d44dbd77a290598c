//! Integration tests for the RLP encoder.

mod derive;
mod props;
mod stream;
