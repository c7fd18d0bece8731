pub mod pointer;
pub mod resize;
pub mod subscription;

pub use pointer::wire_pointer_handlers;
pub use resize::wire_resize;
pub use subscription::EventSubscription;
