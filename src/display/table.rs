use crate::api::models::{Customer, CustomerRequest, CustomerTier, ValidationError};
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        let is_tty = atty::is(atty::Stream::Stdout);
        Self {
            max_width: if is_tty {
                Self::detect_terminal_width()
            } else {
                None
            },
            use_colors: is_tty,
        }
    }

    /// No colors and no width limit, for piped output and tests
    pub fn plain() -> Self {
        Self {
            max_width: None,
            use_colors: false,
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => {
                let width = cols as usize;
                Some(width.clamp(40, 200))
            }
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str], color: Color) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        if let Some(width) = self.max_width {
            let width = if width > 20 { width - 6 } else { width.max(40) };
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_width(width as u16);
        }
        let cells: Vec<Cell> = headers.iter().map(|h| self.bold_header(h, color)).collect();
        table.set_header(cells);
        table
    }

    pub fn render_customer_list(&self, customers: &[Customer]) -> String {
        if customers.is_empty() {
            return "No customers found".to_string();
        }

        let mut table = self.new_table(
            &["ID", "Name", "Email", "Annual Spend", "Last Purchase", "Tier"],
            Color::Cyan,
        );

        for customer in customers {
            table.add_row(vec![
                self.colored_cell(&customer.id, Color::Cyan),
                Cell::new(&customer.name),
                Cell::new(&customer.email),
                Cell::new(format_spend(customer.annual_spend)),
                Cell::new(format_date(customer.last_purchase_date)),
                self.tier_cell(customer),
            ]);
        }

        format!("{}\n{} customer(s)", table, customers.len())
    }

    pub fn render_customer_detail(&self, customer: &Customer) -> String {
        let mut table = self.new_table(&["Field", "Value"], Color::Cyan);
        table.add_row(vec![Cell::new("ID"), self.colored_cell(&customer.id, Color::Cyan)]);
        table.add_row(vec![Cell::new("Name"), Cell::new(&customer.name)]);
        table.add_row(vec![Cell::new("Email"), Cell::new(&customer.email)]);
        table.add_row(vec![
            Cell::new("Annual Spend"),
            Cell::new(format_spend(customer.annual_spend)),
        ]);
        table.add_row(vec![
            Cell::new("Last Purchase"),
            Cell::new(format_date(customer.last_purchase_date)),
        ]);
        table.add_row(vec![Cell::new("Tier"), self.tier_cell(customer)]);
        table.to_string()
    }

    /// Fields a create/update sends, as the form would show them
    pub fn render_request_fields(&self, request: &CustomerRequest) -> String {
        let mut table = self.new_table(&["Field", "Value"], Color::Green);
        table.add_row(vec!["name".to_string(), request.name.clone()]);
        table.add_row(vec!["email".to_string(), request.email.clone()]);
        table.add_row(vec![
            "annual-spend".to_string(),
            format_spend(request.annual_spend),
        ]);
        table.add_row(vec![
            "last-purchase-date".to_string(),
            format_date(request.last_purchase_date),
        ]);
        table.to_string()
    }

    pub fn render_validation_errors(&self, errors: &[ValidationError]) -> String {
        let mut table = self.new_table(&["Field", "Message"], Color::Red);
        for error in errors {
            table.add_row(vec![
                self.colored_cell(&error.field, Color::Yellow),
                Cell::new(&error.message),
            ]);
        }
        table.to_string()
    }

    fn tier_cell(&self, customer: &Customer) -> Cell {
        match customer.tier {
            Some(tier) => {
                let color = match tier {
                    CustomerTier::Platinum => Color::Magenta,
                    CustomerTier::Gold => Color::Yellow,
                    CustomerTier::Silver => Color::Grey,
                };
                self.colored_cell(tier.as_str(), color)
            }
            None => self.colored_cell("-", Color::DarkGrey),
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_spend(spend: Option<f64>) -> String {
    match spend {
        Some(value) => format!("{:.2}", value),
        None => "-".to_string(),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            annual_spend: Some(1234.5),
            last_purchase_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            tier: Some(CustomerTier::Gold),
        }
    }

    #[test]
    fn test_table_display_creation() {
        let display = TableDisplay::new().with_max_width(80).with_colors(false);
        assert_eq!(display.max_width, Some(80));
        assert!(!display.use_colors);

        let display = TableDisplay::plain();
        assert_eq!(display.max_width, None);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_spend(Some(1500.0)), "1500.00");
        assert_eq!(format_spend(Some(99.999)), "100.00");
        assert_eq!(format_spend(None), "-");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 1, 5)), "2024-01-05");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_render_customer_list() {
        let display = TableDisplay::plain();
        let customers = vec![
            create_test_customer("c-1", "Ada"),
            create_test_customer("c-2", "Grace"),
        ];

        let table_str = display.render_customer_list(&customers);
        assert!(table_str.contains("ada@example.com"));
        assert!(table_str.contains("grace@example.com"));
        assert!(table_str.contains("1234.50"));
        assert!(table_str.contains("2024-02-29"));
        assert!(table_str.contains("GOLD"));
        assert!(table_str.ends_with("2 customer(s)"));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(
            TableDisplay::plain().render_customer_list(&[]),
            "No customers found"
        );
    }

    #[test]
    fn test_render_customer_detail_without_optional_fields() {
        let mut customer = create_test_customer("c-3", "Linus");
        customer.annual_spend = None;
        customer.last_purchase_date = None;
        customer.tier = None;

        let detail = TableDisplay::plain().render_customer_detail(&customer);
        assert!(detail.contains("c-3"));
        assert!(detail.contains("Last Purchase"));
        assert!(!detail.contains("GOLD"));
    }

    #[test]
    fn test_render_validation_errors() {
        let errors = vec![ValidationError {
            field: "email".to_string(),
            message: "invalid format".to_string(),
        }];

        let rendered = TableDisplay::plain().render_validation_errors(&errors);
        assert!(rendered.contains("email"));
        assert!(rendered.contains("invalid format"));
    }

    #[test]
    fn test_render_request_fields() {
        let request = CustomerRequest::from(&create_test_customer("c-4", "Ken"));
        let rendered = TableDisplay::plain().render_request_fields(&request);
        assert!(rendered.contains("ken@example.com"));
        assert!(rendered.contains("annual-spend"));
    }
}
