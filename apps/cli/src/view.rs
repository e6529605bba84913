//! # Product List View
//!
//! Text rendering of the product list, in the same three columns the
//! inventory screen shows:
//!
//! ```text
//! ID  Product  Quantity
//! 1   Widget   10
//! 2   Gadget   5
//! ```

use std::fmt::Write as _;
use std::sync::Arc;

use stockroom_core::Product;
use stockroom_db::Snapshot;

const ID_HEADER: &str = "ID";
const NAME_HEADER: &str = "Product";
const QUANTITY_HEADER: &str = "Quantity";

/// Renders products as an aligned table.
pub fn render_table(products: &[Product]) -> String {
    let id_width = products
        .iter()
        .map(|p| p.id.to_string().len())
        .chain(std::iter::once(ID_HEADER.len()))
        .max()
        .unwrap_or(ID_HEADER.len());
    let name_width = products
        .iter()
        .map(|p| p.name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {}",
        ID_HEADER, NAME_HEADER, QUANTITY_HEADER
    );

    if products.is_empty() {
        out.push_str("(no products)\n");
        return out;
    }

    for p in products {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {}",
            p.id, p.name, p.quantity
        );
    }

    out
}

/// Which observer slot the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    AllProducts,
    SearchResults,
}

impl ViewMode {
    fn title(self) -> &'static str {
        match self {
            ViewMode::AllProducts => "All products",
            ViewMode::SearchResults => "Search results",
        }
    }
}

/// Turns observer updates into screen frames, skipping repeats.
///
/// Several notifications can describe the same screen (for example a
/// search publish followed by the mode switch it triggered); only the first
/// produces output.
#[derive(Debug, Default)]
pub struct Renderer {
    last: Option<(ViewMode, Snapshot)>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    /// Returns the frame to print, or `None` when it would repeat the last one.
    pub fn frame(&mut self, mode: ViewMode, all: &Snapshot, search: &Snapshot) -> Option<String> {
        let shown = match mode {
            ViewMode::AllProducts => all,
            ViewMode::SearchResults => search,
        };

        if let Some((last_mode, last_snapshot)) = &self.last {
            if *last_mode == mode && Arc::ptr_eq(last_snapshot, shown) {
                return None;
            }
        }

        self.last = Some((mode, Arc::clone(shown)));
        Some(format!("── {} ──\n{}", mode.title(), render_table(shown)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, quantity: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(&[product(1, "Widget", 10), product(12, "Blue Widget", 5)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID  Product      Quantity");
        assert_eq!(lines[1], "1   Widget       10");
        assert_eq!(lines[2], "12  Blue Widget  5");
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_table(&[]), "ID  Product  Quantity\n(no products)\n");
    }

    #[test]
    fn test_renderer_skips_repeated_frames() {
        let all: Snapshot = Arc::new(vec![product(1, "Widget", 10)]);
        let search: Snapshot = Arc::new(Vec::new());
        let mut renderer = Renderer::new();

        let first = renderer.frame(ViewMode::AllProducts, &all, &search).unwrap();
        assert!(first.starts_with("── All products ──"));
        assert!(renderer.frame(ViewMode::AllProducts, &all, &search).is_none());

        // Same data, different slot: new frame
        let second = renderer.frame(ViewMode::SearchResults, &all, &search).unwrap();
        assert!(second.contains("(no products)"));

        // Equal contents but a fresh publish: new frame
        let republished: Snapshot = Arc::new(vec![product(1, "Widget", 10)]);
        assert!(renderer.frame(ViewMode::AllProducts, &all, &search).is_some());
        assert!(renderer
            .frame(ViewMode::AllProducts, &republished, &search)
            .is_some());
    }
}
