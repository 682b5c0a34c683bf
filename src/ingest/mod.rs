//! Fetch boundary: validated parsing of API payloads
//!
//! List responses are accepted as a bare array or as a paginated
//! `{count, next, previous, results}` envelope. Each record is converted on
//! its own, so a single bad row never sinks the whole payload:
//!
//! - malformed or missing amounts become zero (with a warning);
//! - records without a usable id, date, name or type are skipped (with a
//!   warning);
//! - a transaction's category may be an id, an embedded object, or absent.
//!
//! Only structural problems (not JSON, not a list) are errors.

pub mod fields;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Budget, BudgetId, Category, CategoryId, Listing, Transaction, TransactionId,
};

/// Parse a transaction list payload
pub fn parse_transactions(json: &str) -> BudgetResult<Vec<Transaction>> {
    let records = parse_listing(json, "transactions")?;
    Ok(convert_all(records, "transaction", transaction_from_value))
}

/// Parse a category list payload
pub fn parse_categories(json: &str) -> BudgetResult<Vec<Category>> {
    let records = parse_listing(json, "categories")?;
    Ok(convert_all(records, "category", category_from_value))
}

/// Parse a budget list payload
pub fn parse_budgets(json: &str) -> BudgetResult<Vec<Budget>> {
    let records = parse_listing(json, "budgets")?;
    Ok(convert_all(records, "budget", budget_from_value))
}

/// Fill in missing category labels from the category list
///
/// Labels already present are left alone: a transaction whose category was
/// renamed or deleted keeps the label it was recorded with.
pub fn resolve_category_names(transactions: &mut [Transaction], categories: &[Category]) {
    for txn in transactions.iter_mut().filter(|t| t.category_name.is_none()) {
        if let Some(id) = txn.category {
            txn.category_name = categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone());
        }
    }
}

fn parse_listing(json: &str, what: &str) -> BudgetResult<Vec<Value>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| BudgetError::Import(format!("{} payload is not valid JSON: {}", what, e)))?;

    if value.is_object() && !value.as_object().is_some_and(|o| o.contains_key("results")) {
        return Err(BudgetError::Import(format!(
            "{} payload is neither a list nor a paginated envelope",
            what
        )));
    }

    let listing: Listing<Value> = serde_json::from_value(value).map_err(|e| {
        BudgetError::Import(format!(
            "{} payload is neither a list nor a paginated envelope: {}",
            what, e
        ))
    })?;

    if listing.is_partial() {
        warn!(%what, "Payload is one page of a larger result set; totals cover this page only.");
    }

    let items = listing.into_items();
    debug!(%what, count = items.len(), "Parsed list payload.");
    Ok(items)
}

fn convert_all<T>(
    records: Vec<Value>,
    entity: &str,
    convert: impl Fn(&Map<String, Value>, &str) -> Option<T>,
) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let label = record_label(entity, index, value);
            match value.as_object() {
                Some(object) => convert(object, &label),
                None => {
                    warn!(record = %label, "Skipping record that is not an object.");
                    None
                }
            }
        })
        .collect()
}

fn record_label(entity: &str, index: usize, value: &Value) -> String {
    match fields::id(value.get("id")) {
        Some(id) => format!("{} {}", entity, id),
        None => format!("{} #{}", entity, index),
    }
}

fn transaction_from_value(object: &Map<String, Value>, label: &str) -> Option<Transaction> {
    let Some(id) = fields::id(object.get("id")) else {
        warn!(record = %label, "Skipping transaction without an id.");
        return None;
    };

    let Some(date) = fields::date(object.get("date")) else {
        warn!(record = %label, "Skipping transaction without a valid date.");
        return None;
    };

    let nested = object
        .get("category")
        .and_then(Value::as_object)
        .or_else(|| object.get("category_details").and_then(Value::as_object));

    let Some(kind) = fields::kind(object.get("type"))
        .or_else(|| nested.and_then(|c| fields::kind(c.get("type"))))
    else {
        warn!(record = %label, "Skipping transaction without a type.");
        return None;
    };

    let category = match object.get("category") {
        Some(Value::Object(c)) => fields::id(c.get("id")),
        other => fields::id(other),
    }
    .or_else(|| nested.and_then(|c| fields::id(c.get("id"))))
    .map(CategoryId::new);

    let category_name = fields::text(object.get("category_name"))
        .or_else(|| nested.and_then(|c| fields::text(c.get("name"))));

    Some(Transaction {
        id: TransactionId::new(id),
        kind,
        amount: fields::amount(object.get("amount"), label),
        description: fields::text(object.get("description")).unwrap_or_default(),
        date,
        category,
        category_name,
    })
}

fn category_from_value(object: &Map<String, Value>, label: &str) -> Option<Category> {
    let id = fields::id(object.get("id"));
    let name = fields::text(object.get("name"));
    let kind = fields::kind(object.get("type"));

    match (id, name, kind) {
        (Some(id), Some(name), Some(kind)) => Some(Category::new(CategoryId::new(id), name, kind)),
        _ => {
            warn!(record = %label, "Skipping category without id, name and type.");
            None
        }
    }
}

fn budget_from_value(object: &Map<String, Value>, label: &str) -> Option<Budget> {
    let Some(id) = fields::id(object.get("id")) else {
        warn!(record = %label, "Skipping budget without an id.");
        return None;
    };

    let Some(month) = fields::month(object.get("month")) else {
        warn!(record = %label, "Skipping budget without a valid month.");
        return None;
    };

    let category = match object.get("category") {
        Some(Value::Object(c)) => fields::id(c.get("id")),
        other => fields::id(other),
    }
    .map(CategoryId::new);

    Some(Budget {
        id: BudgetId::new(id),
        amount: fields::amount(object.get("amount"), label),
        month,
        category,
    })
}
