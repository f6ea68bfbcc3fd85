//! Terminal rendering of quotes and messages.

use quotebook_core::{Quote, RenderTarget, NO_QUOTES_MESSAGE};

#[derive(Debug, Default)]
pub struct ConsoleTarget;

impl RenderTarget for ConsoleTarget {
    fn render_quote(&mut self, quote: &Quote) {
        println!("{}", quote.display_line());
    }

    fn render_no_quotes(&mut self) {
        println!("{NO_QUOTES_MESSAGE}");
    }

    fn notify(&mut self, message: &str) {
        println!("[notice] {message}");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}
