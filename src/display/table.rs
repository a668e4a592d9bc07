use crate::api::models::{Item, SearchResponse};
use crate::utils::text::fit_item_name;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

const NAME_WIDTH: usize = 48;

pub struct ListingsTable {
    marketplace_id: String,
    use_colors: bool,
}

impl ListingsTable {
    pub fn new(marketplace_id: impl Into<String>) -> Self {
        Self {
            marketplace_id: marketplace_id.into(),
            use_colors: true,
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str) -> Cell {
        let cell = Cell::new(text).add_attribute(Attribute::Bold);
        if self.use_colors { cell.fg(Color::Cyan) } else { cell }
    }

    fn issue_cell(&self, item: &Item) -> Cell {
        let errors = item
            .issues
            .iter()
            .filter(|issue| issue.severity == "ERROR")
            .count();
        let cell = Cell::new(item.issues.len().to_string());
        match (self.use_colors, errors) {
            (true, 0) => cell,
            (true, _) => cell.fg(Color::Red),
            (false, _) => cell,
        }
    }

    pub fn render(&self, response: &SearchResponse) -> String {
        if response.items.is_empty() {
            return "No listings items matched the search.".to_string();
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(
            ["SKU", "ASIN", "Status", "Item Name", "Issues"]
                .iter()
                .map(|h| self.bold_header(h))
                .collect::<Vec<_>>(),
        );

        for item in &response.items {
            let summary = item.summary_for(&self.marketplace_id);
            let asin = summary.and_then(|s| s.asin.as_deref()).unwrap_or("-");
            let status = summary
                .map(|s| s.status.join(", "))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "-".to_string());
            let name = summary.and_then(|s| s.item_name.as_deref()).unwrap_or("-");

            table.add_row(vec![
                Cell::new(&item.sku),
                Cell::new(asin),
                Cell::new(status),
                Cell::new(fit_item_name(name, NAME_WIDTH)),
                self.issue_cell(item),
            ]);
        }

        let mut output = table.to_string();
        output.push_str(&format!(
            "\n{} of {} listings items",
            response.items.len(),
            response.number_of_results
        ));
        if let Some(token) = response.next_token() {
            output.push_str(&format!("\nNext page: --page-token {}", token));
        }
        output
    }
}
