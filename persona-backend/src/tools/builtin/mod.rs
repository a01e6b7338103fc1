//! Built-in tools. All of them return static or trivially computed data.

mod current_time;
mod menu;
mod stock_price;
mod translate_text;
mod weather;

pub use current_time::CurrentTimeTool;
pub use menu::{MenuTool, MENU};
pub use stock_price::StockPriceTool;
pub use translate_text::TranslateTextTool;
pub use weather::WeatherTool;
