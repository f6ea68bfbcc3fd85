//! Display seam between core components and a presentation surface.
//!
//! Core code never writes to a terminal or window directly; it calls a
//! `RenderTarget` supplied by the shell.

use crate::model::quote::Quote;

/// Message rendered when the active filter matches no quotes.
pub const NO_QUOTES_MESSAGE: &str = "No quotes available.";

/// Presentation surface driven by the filter controller and the shell.
pub trait RenderTarget {
    /// Shows one quote in the main display area.
    fn render_quote(&mut self, quote: &Quote);
    /// Shows the empty-candidate message in the main display area.
    fn render_no_quotes(&mut self);
    /// Transient, non-blocking status message.
    fn notify(&mut self, message: &str);
    /// Blocking message that requires user attention.
    fn alert(&mut self, message: &str);
}
