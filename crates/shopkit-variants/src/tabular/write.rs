//! Tabular serialization.
//!
//! Inverse of [`parse`](crate::tabular::parse). The header layout is fixed:
//! `SKU,<attribute names…>,Price,Compare Price,Stock,Images,Is Active`.
//! Output re-parses to the same decoded values; bytes are not guaranteed to
//! match the text a row came from (quoting style and column order may
//! differ).

use crate::tabular::ImportRow;

/// Serialize rows against the given attribute column order.
///
/// A row missing one of `attribute_names` gets a blank cell there, which a
/// later parse omits again. Row order is preserved.
pub fn serialize(rows: &[ImportRow], attribute_names: &[String]) -> String {
    let mut out = String::new();

    let mut header: Vec<&str> = Vec::with_capacity(attribute_names.len() + 6);
    header.push("SKU");
    header.extend(attribute_names.iter().map(String::as_str));
    header.extend(["Price", "Compare Price", "Stock", "Images", "Is Active"]);
    push_record(&mut out, header.into_iter());

    for row in rows {
        let mut fields: Vec<String> = Vec::with_capacity(attribute_names.len() + 6);
        fields.push(row.sku.clone());
        for name in attribute_names {
            fields.push(row.attribute(name).unwrap_or_default().to_string());
        }
        fields.push(format_number(row.price));
        fields.push(row.compare_price.map(format_number).unwrap_or_default());
        fields.push(row.stock.to_string());
        fields.push(row.images.join(","));
        fields.push(if row.is_active { "true" } else { "false" }.to_string());
        push_record(&mut out, fields.iter().map(String::as_str));
    }

    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        push_field(out, field);
    }
    out.push('\n');
}

/// Write one field, quoting when it contains a separator, quote, or newline.
fn push_field(out: &mut String, field: &str) {
    let needs_quoting = field.contains([',', '"', '\n', '\r']);
    if !needs_quoting {
        out.push_str(field);
        return;
    }
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Decimal rendering without a forced precision, so `20.0` stays `20` and
/// `19.99` stays `19.99`.
fn format_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn sample_row() -> ImportRow {
        ImportRow {
            sku: "A1".to_string(),
            price: 19.99,
            compare_price: Some(25.0),
            stock: 5,
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            is_active: true,
            attributes: vec![
                ("Color".to_string(), "Red".to_string()),
                ("Size".to_string(), "S".to_string()),
            ],
        }
    }

    #[test]
    fn test_header_layout() {
        let text = serialize(&[], &names(&["Color", "Size"]));
        assert_eq!(
            text.lines().next().unwrap(),
            "SKU,Color,Size,Price,Compare Price,Stock,Images,Is Active"
        );
    }

    #[test]
    fn test_row_rendering() {
        let text = serialize(&[sample_row()], &names(&["Color", "Size"]));
        let data_line = text.lines().nth(1).unwrap();
        assert_eq!(data_line, "A1,Red,S,19.99,25,5,\"a.jpg,b.jpg\",true");
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        let row = ImportRow {
            sku: "B1".to_string(),
            price: 10.0,
            attributes: vec![("Material".to_string(), "Wool, \"merino\"".to_string())],
            ..ImportRow::default()
        };
        let text = serialize(&[row.clone()], &names(&["Material"]));
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed[0].attribute("Material"), Some("Wool, \"merino\""));
    }

    #[test]
    fn test_round_trip_preserves_decoded_values() {
        let rows = vec![
            sample_row(),
            ImportRow {
                sku: "A2".to_string(),
                price: 21.0,
                compare_price: None,
                stock: 0,
                images: Vec::new(),
                is_active: false,
                attributes: vec![
                    ("Color".to_string(), "Blue".to_string()),
                    ("Size".to_string(), "M".to_string()),
                ],
            },
        ];
        let text = serialize(&rows, &names(&["Color", "Size"]));
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, rows);
    }

    #[test]
    fn test_missing_attribute_round_trips_as_omitted() {
        let row = ImportRow {
            sku: "C1".to_string(),
            price: 9.5,
            attributes: vec![("Color".to_string(), "Red".to_string())],
            ..ImportRow::default()
        };
        let text = serialize(&[row], &names(&["Color", "Size"]));
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed[0].attribute("Color"), Some("Red"));
        assert_eq!(reparsed[0].attribute("Size"), None);
        assert_eq!(reparsed[0].attributes.len(), 1);
    }
}
