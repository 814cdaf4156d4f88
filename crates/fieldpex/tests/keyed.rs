//! Records tagged with keyed (`role:flags`) permission specifiers.

#![allow(clippy::unwrap_used)]

use fieldpex::{Action, Field, FieldSpec, Filter, FilterConfig, Record, Role, Value};

struct Invoice {
    number: String,
    amount: i64,
    notes: String,
}

impl Record for Invoice {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(FieldSpec::new("number"), &self.number),
            Field::new(
                FieldSpec::new("amount").permission("admin:rw,clerk:r"),
                &self.amount,
            ),
            Field::new(
                FieldSpec::new("notes").permission("admin:rw, clerk:w"),
                &self.notes,
            ),
        ]
    }
}

fieldpex::impl_record_extract!(Invoice);

fn invoice() -> Invoice {
    Invoice {
        number: "INV-1".to_string(),
        amount: 1200,
        notes: "net 30".to_string(),
    }
}

fn filter() -> Filter {
    let config = FilterConfig::from_toml_str("[roles]\nguest = 0\nclerk = 1\nadmin = 2\n").unwrap();
    Filter::new(config)
}

#[test]
fn test_keyed_roles_resolved_by_name() {
    let filter = filter();
    let clerk = filter.role("clerk").unwrap();

    let read = filter.extract(&invoice(), &clerk, Action::Read);
    assert_eq!(read.get("amount"), Some(&Value::Int(1200)));
    assert!(read.get("notes").is_none());

    let write = filter.extract(&invoice(), &clerk, Action::Write);
    assert!(write.get("amount").is_none());
    assert_eq!(write.get("notes").and_then(Value::as_str), Some("net 30"));
}

#[test]
fn test_unlisted_role_denied() {
    let filter = filter();
    let guest = filter.role("guest").unwrap();
    for action in Action::ALL {
        let value = filter.extract(&invoice(), &guest, action);
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("number"));
    }
}

#[test]
fn test_unnamed_role_denied() {
    let value = filter().extract(&invoice(), &Role::new(2), Action::Read);
    assert!(value.get("amount").is_none());
}
