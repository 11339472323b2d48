use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    /// Stored shape `(###)###-####`.
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Every column separated by a space, address padding trimmed.
    pub fn display_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.id,
            self.fname.trim(),
            self.lname.trim(),
            self.phone.trim(),
            self.address.trim()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    pub experience: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub id: i64,
    pub customer_id: i64,
    pub car_vin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: i64,
    pub customer_id: i64,
    pub car_vin: String,
    pub date: NaiveDate,
    pub odometer: i64,
    pub complaint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedRequest {
    pub id: i64,
    pub request_id: i64,
    pub mechanic_id: i64,
    pub date: NaiveDate,
    pub comment: String,
    pub bill: i64,
}

/// Named identifier counters, one per table with a generated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Customer,
    Mechanic,
    Ownership,
    ServiceRequest,
    ClosedRequest,
}

impl Sequence {
    pub fn name(&self) -> &'static str {
        match self {
            Sequence::Customer => "customer",
            Sequence::Mechanic => "mechanic",
            Sequence::Ownership => "ownership",
            Sequence::ServiceRequest => "service_request",
            Sequence::ClosedRequest => "closed_request",
        }
    }

    /// Table and key column the sequence feeds.
    pub fn target(&self) -> (&'static str, &'static str) {
        match self {
            Sequence::Customer => ("Customer", "id"),
            Sequence::Mechanic => ("Mechanic", "id"),
            Sequence::Ownership => ("Owns", "ownership_id"),
            Sequence::ServiceRequest => ("Service_Request", "rid"),
            Sequence::ClosedRequest => ("Closed_Request", "wid"),
        }
    }
}

/// Tabular result of a reporting query, every cell already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Padded columns, a dashed rule under the header and a row count.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:width$}", c, width = *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join(" "));
        out.push('\n');

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:width$}", c, width = *w))
                .collect();
            out.push_str(line.join(" ").trim_end());
            out.push('\n');
        }

        out.push_str(&format!("Rows: {}", self.rows.len()));
        out
    }
}
