//! Host identification adapters.

mod fixed;
mod uname;

pub use fixed::FixedHostProbe;
pub use uname::UnameProbe;
