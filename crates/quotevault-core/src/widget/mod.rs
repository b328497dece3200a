pub mod bridge;
pub mod renderer;

pub use bridge::{FeaturedQuoteRecord, WidgetDataBridge, WIDGET_DATA_FILE};
pub use renderer::{deep_link_uri, WidgetSnapshot};
