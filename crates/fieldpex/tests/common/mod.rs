//! Shared record fixtures for fieldpex integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fieldpex::{Field, FieldSpec, Record, Role};
use serde::{Deserialize, Serialize};

/// Role with read-only access in [`Labeled`]'s specifiers.
pub fn reader() -> Role {
    Role::named(1, "reader")
}

/// Role with read/write access everywhere.
pub fn admin() -> Role {
    Role::named(2, "admin")
}

/// Role with no access to tagged fields.
pub fn guest() -> Role {
    Role::named(0, "guest")
}

/// `{Number int "role-read", Text string "role-read, serialized-as Label"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labeled {
    #[serde(rename = "Number")]
    pub number: i64,
    #[serde(rename = "Label")]
    pub text: String,
}

impl Record for Labeled {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(FieldSpec::new("Number").permission("013"), &self.number),
            Field::new(
                FieldSpec::new("Text").permission("013").rename("Label,omitempty"),
                &self.text,
            ),
        ]
    }
}

/// Common audit columns, embedded into other records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

impl Record for Audit {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(
                FieldSpec::new("created_at").export_as("Created"),
                &self.created_at,
            ),
            Field::new(
                FieldSpec::new("created_by").permission("013").export_as("-"),
                &self.created_by,
            ),
        ]
    }
}

/// An employee record mixing every kind of field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub audit: Audit,
    pub id: u64,
    pub name: String,
    pub salary: Option<f64>,
    pub active: bool,
    pub hired_on: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub manager: Option<Box<Labeled>>,
    #[serde(skip)]
    pub password_hash: String,
    pub display_name: String,
}

impl Record for Employee {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new(FieldSpec::new("Audit").embedded(), &self.audit),
            Field::new(FieldSpec::new("id").export_as("ID"), &self.id),
            Field::new(FieldSpec::new("name").permission("133").export_as("Name"), &self.name),
            Field::new(FieldSpec::new("salary").permission("003"), &self.salary),
            Field::new(FieldSpec::new("active").permission("113").export_as("Active"), &self.active),
            Field::new(FieldSpec::new("hired_on").permission("013").export_as("Hired"), &self.hired_on),
            Field::new(FieldSpec::new("skills").permission("133"), &self.skills),
            Field::new(FieldSpec::new("manager").permission("013").export_as("-"), &self.manager),
            Field::new(FieldSpec::private("password_hash"), &self.password_hash),
            Field::new(FieldSpec::new("display_name").derived(), &self.display_name),
        ]
    }
}

fieldpex::impl_record_extract!(Labeled, Audit, Employee);

/// A fully populated employee.
pub fn employee() -> Employee {
    Employee {
        audit: Audit {
            created_at: Some(Utc.with_ymd_and_hms(2021, 6, 1, 9, 30, 0).unwrap()),
            created_by: "hr-bot".to_string(),
        },
        id: 42,
        name: "Grace Hopper".to_string(),
        salary: Some(125_000.5),
        active: true,
        hired_on: NaiveDate::from_ymd_opt(2020, 2, 29),
        skills: vec!["cobol".to_string(), "compilers".to_string()],
        manager: Some(Box::new(Labeled {
            number: 7,
            text: "boss".to_string(),
        })),
        password_hash: "$argon2id$...".to_string(),
        display_name: "G. Hopper".to_string(),
    }
}
