//! `chromasaver` is the Rust crate implementing the core features of the chromasaver
//! color screensaver daemon: periodic random-color lookups against a remote color
//! naming service, a bounded color history with CSV export, color classification
//! with psychology metadata, and a line-delimited JSON control protocol.

#[macro_use]
extern crate async_trait;
#[macro_use]
extern crate tracing;

pub mod color;
pub mod history;
pub mod lookup;
pub mod models;
pub mod screensaver;
pub mod servers;
