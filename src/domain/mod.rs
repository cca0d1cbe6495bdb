pub mod item;
pub mod subscription;
pub mod window;

pub use item::FeedItem;
pub use subscription::Subscription;
pub use window::{Clock, TimeWindow};
