mod format_received;
mod link_received;

pub use format_received::format_received;
pub use link_received::link_received;
