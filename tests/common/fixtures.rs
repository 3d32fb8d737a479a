use serde_json::{json, Value};

/// A nested document mixing scalars, an object, a record table and a chart.
pub fn invoice() -> Value {
    json!({
        "invoiceNumber": "INV-1",
        "customer": {
            "name": "ACME",
            "city": "Oslo"
        },
        "items": [
            { "sku": "A", "qty": 2, "price": 9.5 },
            { "sku": "B", "qty": 1, "price": 20 }
        ],
        "sales": {
            "chartType": "bar",
            "title": "Monthly sales",
            "data": [
                { "month": "Jan", "total": 10 },
                { "month": "Feb", "total": 20 }
            ]
        }
    })
}

/// Order records in no particular region order.
pub fn orders() -> Value {
    json!([
        { "region": "North", "customer": "Alpha", "amount": 100 },
        { "region": "South", "customer": "Bravo", "amount": 50.5 },
        { "region": "North", "customer": "Charlie", "amount": 200 }
    ])
}

/// A budget using the alternate key vocabulary, with a parent whose
/// amounts come from its children.
pub fn budget() -> Value {
    json!({
        "struktura": [
            {
                "kod": "1",
                "nazwa": "Infrastructure",
                "plan": 0,
                "wykonanie": null,
                "dzieci": [
                    { "kod": "1.1", "nazwa": "Roads", "plan": "1 200,50", "wykonanie": 1000 },
                    { "kod": "1.2", "nazwa": "Bridges", "plan": 300, "wykonanie": 150 }
                ]
            },
            { "kod": "2", "nazwa": "Education", "plan": 1000, "wykonanie": 850 }
        ]
    })
}

/// An object with `count` scalar keys, enough to span several pages.
pub fn long_object(count: usize) -> Value {
    let map: serde_json::Map<String, Value> = (1..=count)
        .map(|i| (format!("key{:03}", i), json!(format!("value {}", i))))
        .collect();
    Value::Object(map)
}
