//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements   | Connects to                         |
//! |------------|--------------|-------------------------------------|
//! | `hal_port` | DigitalPort  | Any embedded-hal 1.0 GPIO pins      |
//! | `log_sink` | EventSink    | `log` facade / serial console       |

pub mod hal_port;
pub mod log_sink;
