//! Circbuf — a fixed-capacity circular buffer with overwrite-on-full
//! semantics, guarded by a single internal lock.
//!
//! The core type is [`RingBuffer`]: a bounded FIFO container over a
//! contiguous backing store, indexed by head/tail cursors modulo the
//! capacity. Writing to a full buffer silently evicts the oldest element;
//! reading from an empty buffer returns `None`. No operation blocks beyond
//! the briefly-held internal mutex and no operation returns an error, which
//! makes the buffer suitable for telemetry and streaming paths where
//! availability beats strict completeness.
//!
//! Companion modules: [`config`] for a serde-backed configuration type and
//! [`log`] for an injectable diagnostics capability. The buffer itself
//! depends on neither.

pub mod config;
pub mod log;
pub mod ringbuf;

pub use config::{BufferConfig, ConfigError};
pub use log::{Level, Logger, NullLogger, StderrLogger};
pub use ringbuf::{RingBuffer, DEFAULT_CAPACITY};
