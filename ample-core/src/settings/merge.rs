use serde_json::Value;

/// Layer a stored settings value over the default tree.
///
/// Objects merge key by key, recursively. At a leaf the stored value wins.
/// Keys only in `defaults` are filled in, keys only in `stored` are kept.
/// A stored non-object where the defaults hold an object is discarded in
/// favour of the default subtree.
pub fn merge_defaults(defaults: Value, stored: Value) -> Value {
    match (defaults, stored) {
        (Value::Object(mut merged), Value::Object(stored)) => {
            for (key, stored_value) in stored {
                let value = match merged.remove(&key) {
                    Some(default_value) => merge_defaults(default_value, stored_value),
                    None => stored_value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (defaults @ Value::Object(_), _) => defaults,
        (_, stored) => stored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stored_leaf_wins() {
        let merged = merge_defaults(json!({"a": 1, "b": 2}), json!({"b": 5}));
        assert_eq!(merged, json!({"a": 1, "b": 5}));
    }

    #[test]
    fn nested_defaults_fill_missing_leaves() {
        let defaults = json!({
            "Notifications": {
                "GainTagsMissing": {"isEnabled": false, "isSilent": false},
                "LyricsMissing": {"isEnabled": false, "isSilent": false}
            }
        });
        let stored = json!({
            "Notifications": {"GainTagsMissing": {"isEnabled": true}}
        });

        assert_eq!(
            merge_defaults(defaults, stored),
            json!({
                "Notifications": {
                    "GainTagsMissing": {"isEnabled": true, "isSilent": false},
                    "LyricsMissing": {"isEnabled": false, "isSilent": false}
                }
            })
        );
    }

    #[test]
    fn stored_only_keys_are_kept() {
        let merged = merge_defaults(json!({"a": 1}), json!({"z": "new"}));
        assert_eq!(merged, json!({"a": 1, "z": "new"}));
    }

    #[test]
    fn stored_null_overrides_scalar_default() {
        let merged = merge_defaults(json!({"Language": "en"}), json!({"Language": null}));
        assert_eq!(merged, json!({"Language": null}));
    }

    #[test]
    fn stored_value_replaces_null_default() {
        let merged = merge_defaults(json!({"smartlist": null}), json!({"smartlist": 42}));
        assert_eq!(merged, json!({"smartlist": 42}));
    }

    #[test]
    fn scalar_cannot_replace_default_object() {
        let merged = merge_defaults(json!({"Theme": {"hue1": 60}}), json!({"Theme": 3}));
        assert_eq!(merged, json!({"Theme": {"hue1": 60}}));
    }

    #[test]
    fn stored_arrays_replace_wholesale() {
        let merged = merge_defaults(json!({"list": [1, 2, 3]}), json!({"list": [9]}));
        assert_eq!(merged, json!({"list": [9]}));
    }

    #[test]
    fn free_form_object_merges_stored_entries() {
        let merged = merge_defaults(
            json!({"LastSession": {}}),
            json!({"LastSession": {"queue": ["1", "2"], "position": 12}}),
        );
        assert_eq!(
            merged,
            json!({"LastSession": {"queue": ["1", "2"], "position": 12}})
        );
    }
}
