mod decode;
mod forwarder;

pub use decode::Utf8Decoder;
pub use forwarder::{LineForwarder, OutputHook};
