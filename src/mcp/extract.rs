//! Post-processing of (already enhanced) list responses

use crate::enhance::is_truthy;
use serde_json::Value;

/// Locates the item list in a response
///
/// Checked in order: a top-level array, a `data` array, the
/// `content["application/json"].data` array.
pub fn extract_list(response: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(items) = response {
        return Some(items);
    }
    if let Some(Value::Array(items)) = response.get("data") {
        return Some(items);
    }
    match response
        .get("content")
        .and_then(|c| c.get("application/json"))
        .and_then(|j| j.get("data"))
    {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn items(response: &Value) -> impl Iterator<Item = &Value> {
    extract_list(response).into_iter().flatten()
}

/// True when `field` is truthy on the entry or on its nested `token` object
fn flag_set(entry: &Value, field: &str) -> bool {
    entry.get(field).is_some_and(is_truthy)
        || entry
            .get("token")
            .and_then(|t| t.get(field))
            .is_some_and(is_truthy)
}

/// Entries flagged as favorites
pub fn favorite_entries(response: &Value) -> Vec<Value> {
    items(response)
        .filter(|e| flag_set(e, "favorite"))
        .cloned()
        .collect()
}

/// Entries carrying a liquidity position
pub fn liquidity_entries(response: &Value) -> Vec<Value> {
    items(response)
        .filter(|e| flag_set(e, "liquidity"))
        .cloned()
        .collect()
}

/// First balance entry for `token_id`, matching either `token` or `token.id`
pub fn token_balance_entry(response: &Value, token_id: &str) -> Option<Value> {
    items(response)
        .find(|entry| match entry.get("token") {
            Some(Value::String(id)) => id == token_id,
            Some(token) => token.get("id").and_then(Value::as_str) == Some(token_id),
            None => false,
        })
        .cloned()
}

/// Tokens whose name, ticker or rune contains `query`, or whose id equals it
///
/// Case-insensitive; `query` is trimmed.
pub fn tokens_matching_name(response: &Value, query: &str) -> Vec<Value> {
    let needle = query.trim().to_lowercase();
    let field = |token: &Value, key: &str| {
        token
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_lowercase)
            .unwrap_or_default()
    };

    items(response)
        .filter(|token| token.is_object())
        .filter(|token| {
            field(token, "name").contains(&needle)
                || field(token, "ticker").contains(&needle)
                || field(token, "rune").contains(&needle)
                || field(token, "id") == needle
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_list_shapes() {
        let top = json!([1, 2]);
        let data = json!({"data": [3], "count": 1});
        let envelope = json!({"content": {"application/json": {"data": [4, 5, 6]}}});

        assert_eq!(extract_list(&top).map(Vec::len), Some(2));
        assert_eq!(extract_list(&data).map(Vec::len), Some(1));
        assert_eq!(extract_list(&envelope).map(Vec::len), Some(3));
        assert!(extract_list(&json!({"data": {"id": 1}})).is_none());
        assert!(extract_list(&json!("x")).is_none());
    }

    #[test]
    fn test_favorites_and_liquidity() {
        let response = json!({"data": [
            {"token": {"id": "a", "favorite": true}},
            {"token": {"id": "b"}, "favorite": 0, "liquidity": "1000"},
            {"token": {"id": "c", "liquidity": true}, "favorite": 1}
        ]});

        let favorites = favorite_entries(&response);
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0]["token"]["id"], json!("a"));
        assert_eq!(favorites[1]["token"]["id"], json!("c"));

        let liquidity = liquidity_entries(&response);
        assert_eq!(liquidity.len(), 2);
        assert_eq!(liquidity[0]["token"]["id"], json!("b"));
    }

    #[test]
    fn test_non_list_response_filters_to_empty() {
        assert!(favorite_entries(&json!({"error": "x"})).is_empty());
        assert!(liquidity_entries(&json!(null)).is_empty());
    }

    #[test]
    fn test_token_balance_entry() {
        let response = json!([
            {"token": "btc", "balance": 1},
            {"token": {"id": "2jjj"}, "balance": 2},
            {"token": {"id": "2jjj"}, "balance": 3}
        ]);
        assert_eq!(token_balance_entry(&response, "btc").unwrap()["balance"], json!(1));
        assert_eq!(token_balance_entry(&response, "2jjj").unwrap()["balance"], json!(2));
        assert!(token_balance_entry(&response, "zzzz").is_none());
    }

    #[test]
    fn test_tokens_matching_name() {
        let response = json!({"data": [
            {"id": "2jjj", "name": "ODIN•DOG", "ticker": "ODOG"},
            {"id": "2k6r", "name": "Satoshi", "ticker": "SATS", "rune": "DOGWIFSAT"},
            {"id": "dog", "name": "Other", "ticker": "OTH"},
            "not a token"
        ]});

        let ids = |q: &str| -> Vec<String> {
            tokens_matching_name(&response, q)
                .iter()
                .map(|t| t["id"].as_str().unwrap().to_string())
                .collect()
        };

        assert_eq!(ids(" dog "), vec!["2jjj", "2k6r", "dog"]);
        assert_eq!(ids("SATS"), vec!["2k6r"]);
        assert_eq!(ids("2jj"), Vec::<String>::new());
        assert_eq!(ids("2JJJ"), vec!["2jjj"]);
    }
}
