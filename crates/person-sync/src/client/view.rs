//! # Person View
//!
//! Renders persons into a [`Document`] and reads candidate payloads back out of its forms.
//! Nothing here talks to the network; [`ClientSyncAgent`](crate::client::ClientSyncAgent)
//! decides when a view may change.
//!
//! Every person lives under the key `resource-<id>`, either as a read-only `<article>` or
//! as an edit `<form>` in the same slot. Form inputs are scoped by their form's key
//! (`resource-3-name`, `create-name`, ...), so an edit form and the create form can be
//! open side by side.

use crate::client::dom::{Document, Element};
use crate::client::error::FormError;
use crate::model::{dom_key, normalize_name, Person, PersonFields, PersonId};
use chrono::{Local, NaiveDate};

pub const CREATE_CONTAINER_ID: &str = "create-form-container";
pub const CREATE_FORM_ID: &str = "create-form";
const CREATE_SCOPE: &str = "create";

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATE_DISPLAY_FORMAT: &str = "%-d.%-m.%Y";

/// Id of a form input, e.g. `resource-3-age` or `create-age`.
pub fn input_id(scope: &str, field: &str) -> String {
    format!("{scope}-{field}")
}

/// Shows `person` read-only. An existing node with the same key is replaced in place,
/// otherwise the node is inserted before `#bottom`.
pub fn render(doc: &mut Document, person: &Person) {
    let key = person.dom_key();
    let element = display(person);
    match doc.position(&key) {
        Some(_) => {
            doc.replace(&key, element);
        }
        None => doc.insert_before_bottom(element),
    }
}

/// Swaps the display node of `person` for a pre-filled edit form.
/// Returns `false` (and changes nothing) when the person is not rendered.
pub fn render_edit_form(doc: &mut Document, person: &Person) -> bool {
    let key = person.dom_key();
    if doc.position(&key).is_none() {
        return false;
    }
    let form = Element::new("form")
        .with_id(key.clone())
        .with_child(Element::new("h2").with_text(format!("Edit {}", person.name)));
    let age = person.age.to_string();
    let form = field_inputs(form, &key, &person.name, &age, person.is_active, person.created_at)
        .with_child(button("save", person.id, "Save"))
        .with_child(button("cancel", person.id, "Cancel"));
    doc.replace(&key, form)
}

/// Opens an empty create form before `#bottom`, with the date set to today.
pub fn render_create_form(doc: &mut Document) {
    let form = Element::new("form")
        .with_id(CREATE_FORM_ID)
        .with_child(Element::new("h2").with_text("Create New Person"));
    let today = Local::now().date_naive();
    let form = field_inputs(form, CREATE_SCOPE, "", "", false, today).with_child(
        Element::new("button")
            .with_attr("type", "button")
            .with_attr("data-action", "create")
            .with_text("Create"),
    );
    let container = Element::new("div")
        .with_id(CREATE_CONTAINER_ID)
        .with_child(form);

    match doc.position(CREATE_CONTAINER_ID) {
        Some(_) => {
            doc.replace(CREATE_CONTAINER_ID, container);
        }
        None => doc.insert_before_bottom(container),
    }
}

/// Detaches the node with `key`. Absent keys are ignored.
pub fn remove(doc: &mut Document, key: &str) {
    doc.remove(key);
}

pub fn remove_create_form(doc: &mut Document) {
    doc.remove(CREATE_CONTAINER_ID);
}

/// Reads the edit form of person `id`.
pub fn read_edit_form(doc: &Document, id: PersonId) -> Result<PersonFields, FormError> {
    read_form(doc, &dom_key(id))
}

pub fn read_create_form(doc: &Document) -> Result<PersonFields, FormError> {
    read_form(doc, CREATE_SCOPE)
}

fn display(person: &Person) -> Element {
    Element::new("article")
        .with_id(person.dom_key())
        .with_child(Element::new("h2").with_text(format!("Name: {}", person.name)))
        .with_child(Element::new("p").with_text(format!("Age: {}", person.age)))
        .with_child(Element::new("p").with_text(format!(
            "Active: {}",
            if person.is_active { "Yes" } else { "No" }
        )))
        .with_child(Element::new("p").with_text(format!(
            "Created: {}",
            person.created_at.format(DATE_DISPLAY_FORMAT)
        )))
        .with_child(button("edit", person.id, "Edit"))
        .with_child(button("remove", person.id, "Remove"))
}

fn button(action: &str, id: PersonId, label: &str) -> Element {
    Element::new("button")
        .with_attr("type", "button")
        .with_attr("data-action", action)
        .with_attr("data-id", id.to_string())
        .with_text(label)
}

fn field_inputs(
    form: Element,
    scope: &str,
    name: &str,
    age: &str,
    active: bool,
    date: NaiveDate,
) -> Element {
    let mut active_input = Element::new("input")
        .with_id(input_id(scope, "active"))
        .with_attr("type", "checkbox");
    if active {
        active_input.set_attr("checked", "checked");
    }

    form.with_child(labelled(
        "Name",
        Element::new("input")
            .with_id(input_id(scope, "name"))
            .with_attr("type", "text")
            .with_attr("value", name),
    ))
    .with_child(labelled(
        "Age",
        Element::new("input")
            .with_id(input_id(scope, "age"))
            .with_attr("type", "number")
            .with_attr("min", "0")
            .with_attr("value", age),
    ))
    .with_child(labelled("Active", active_input))
    .with_child(labelled(
        "Created",
        Element::new("input")
            .with_id(input_id(scope, "date"))
            .with_attr("type", "date")
            .with_attr("value", date.format(DATE_INPUT_FORMAT).to_string()),
    ))
}

fn labelled(text: &str, input: Element) -> Element {
    let target = input.id().unwrap_or_default().to_string();
    Element::new("label")
        .with_attr("for", target)
        .with_text(text)
        .with_child(input)
}

fn read_form(doc: &Document, scope: &str) -> Result<PersonFields, FormError> {
    let name = input(doc, scope, "name")?;
    if normalize_name(name).is_none() {
        return Err(FormError::EmptyName);
    }

    let raw_age = input(doc, scope, "age")?;
    let age = raw_age
        .trim()
        .parse::<u32>()
        .map_err(|_| FormError::InvalidAge(raw_age.to_string()))?;

    let active_id = input_id(scope, "active");
    let is_active = doc
        .is_checked(&active_id)
        .ok_or(FormError::MissingInput(active_id))?;

    let raw_date = input(doc, scope, "date")?;
    let created_at = NaiveDate::parse_from_str(raw_date.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| FormError::InvalidDate(raw_date.to_string()))?;

    Ok(PersonFields {
        name: name.to_string(),
        age,
        is_active,
        created_at: Some(created_at),
    })
}

fn input<'a>(doc: &'a Document, scope: &str, field: &str) -> Result<&'a str, FormError> {
    let id = input_id(scope, field);
    doc.input_value(&id).ok_or(FormError::MissingInput(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::dom::BOTTOM_ID;

    fn ana() -> Person {
        Person {
            id: PersonId(1),
            name: "Ana".into(),
            age: 30,
            is_active: true,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn display_shows_formatted_fields() {
        let mut doc = Document::new();
        render(&mut doc, &ana());

        let article = doc.get("resource-1").unwrap();
        assert_eq!(article.tag(), "article");
        assert_eq!(
            article.text_content(),
            "Name: AnaAge: 30Active: YesCreated: 5.1.2024EditRemove"
        );
    }

    #[test]
    fn render_is_idempotent() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        let once = doc.to_html();
        render(&mut doc, &ana());

        assert_eq!(doc.to_html(), once);
        assert_eq!(doc.keys(), vec!["resource-1", BOTTOM_ID]);
    }

    #[test]
    fn edit_form_replaces_display_in_place() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        let mut bo = ana();
        bo.id = PersonId(2);
        render(&mut doc, &bo);

        assert!(render_edit_form(&mut doc, &ana()));
        assert_eq!(doc.position("resource-1"), Some(0));
        assert_eq!(doc.get("resource-1").unwrap().tag(), "form");
        assert_eq!(doc.input_value("resource-1-name"), Some("Ana"));
        assert_eq!(doc.input_value("resource-1-date"), Some("2024-01-05"));
        assert_eq!(doc.is_checked("resource-1-active"), Some(true));

        let mut ghost = ana();
        ghost.id = PersonId(9);
        assert!(!render_edit_form(&mut doc, &ghost));
    }

    #[test]
    fn edit_form_reads_back_its_values() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        render_edit_form(&mut doc, &ana());

        let fields = read_edit_form(&doc, PersonId(1)).unwrap();
        assert_eq!(fields, ana().fields());
    }

    #[test]
    fn form_values_are_never_coerced() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        render_edit_form(&mut doc, &ana());

        doc.set_value("resource-1-age", "not-a-number");
        assert_eq!(
            read_edit_form(&doc, PersonId(1)),
            Err(FormError::InvalidAge("not-a-number".into()))
        );

        doc.set_value("resource-1-age", "-4");
        assert!(matches!(
            read_edit_form(&doc, PersonId(1)),
            Err(FormError::InvalidAge(_))
        ));

        doc.set_value("resource-1-age", "31");
        doc.set_value("resource-1-date", "05.01.2024");
        assert!(matches!(
            read_edit_form(&doc, PersonId(1)),
            Err(FormError::InvalidDate(_))
        ));

        doc.set_value("resource-1-name", "   ");
        assert_eq!(read_edit_form(&doc, PersonId(1)), Err(FormError::EmptyName));
    }

    #[test]
    fn create_form_is_scoped_and_defaults_to_today() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        render_edit_form(&mut doc, &ana());
        render_create_form(&mut doc);

        assert_eq!(doc.keys(), vec!["resource-1", CREATE_CONTAINER_ID, BOTTOM_ID]);
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(doc.input_value("create-date"), Some(today.as_str()));
        assert_eq!(doc.input_value("create-name"), Some(""));
        assert_eq!(doc.input_value("resource-1-name"), Some("Ana"));
        assert_eq!(read_create_form(&doc), Err(FormError::EmptyName));

        remove_create_form(&mut doc);
        assert!(!doc.contains(CREATE_CONTAINER_ID));
        assert!(doc.contains("resource-1"));
    }

    #[test]
    fn remove_ignores_absent_keys() {
        let mut doc = Document::new();
        render(&mut doc, &ana());
        remove(&mut doc, "resource-7");
        remove(&mut doc, "resource-1");
        assert_eq!(doc.keys(), vec![BOTTOM_ID]);
    }
}
