//! Flattening of one event subtree into the fixed CSV schema.

use crate::model::XmlElement;

use std::collections::HashMap;

/// CSV header, in the exact column order every output file uses.
pub const EVENT_FIELD_NAMES: [&str; 10] = [
    "TimeCreated",
    "ProviderName",
    "EventID",
    "Level",
    "Task",
    "Keywords",
    "Computer",
    "RecordId",
    "Message",
    "Data",
];

/// One flattened event.
///
/// Every field is always present; anything missing from the source element
/// degrades to an empty string, never an error. For single-valued fields the
/// first matching element wins and later duplicates are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub time_created: String,
    pub provider_name: String,
    pub event_id: String,
    pub level: String,
    pub task: String,
    pub keywords: String,
    pub computer: String,
    pub record_id: String,
    pub message: String,
    pub data: String,
}

type ByLocalName<'a> = HashMap<&'a str, Vec<&'a XmlElement>>;

impl EventRecord {
    pub fn from_element(event: &XmlElement) -> Self {
        let mut by_name: ByLocalName<'_> = HashMap::new();
        for element in event.descendants() {
            by_name.entry(element.local_name()).or_default().push(element);
        }

        EventRecord {
            time_created: first_attribute(&by_name, "TimeCreated", "SystemTime"),
            provider_name: first_attribute(&by_name, "Provider", "Name"),
            event_id: first_text(&by_name, "EventID"),
            level: first_text(&by_name, "Level"),
            task: first_text(&by_name, "Task"),
            keywords: first_text(&by_name, "Keywords"),
            computer: first_text(&by_name, "Computer"),
            record_id: first_text(&by_name, "RecordId"),
            message: first_text(&by_name, "Message"),
            data: data_items(&by_name),
        }
    }

    /// Field values in [`EVENT_FIELD_NAMES`] order.
    pub fn fields(&self) -> [&str; 10] {
        [
            &self.time_created,
            &self.provider_name,
            &self.event_id,
            &self.level,
            &self.task,
            &self.keywords,
            &self.computer,
            &self.record_id,
            &self.message,
            &self.data,
        ]
    }
}

fn first<'a>(by_name: &ByLocalName<'a>, name: &str) -> Option<&'a XmlElement> {
    by_name.get(name).and_then(|elements| elements.first().copied())
}

fn first_text(by_name: &ByLocalName<'_>, name: &str) -> String {
    first(by_name, name)
        .map(|element| element.trimmed_text().to_owned())
        .unwrap_or_default()
}

fn first_attribute(by_name: &ByLocalName<'_>, name: &str, attribute: &str) -> String {
    first(by_name, name)
        .and_then(|element| element.attribute(attribute))
        .unwrap_or_default()
        .to_owned()
}

/// Every `Data` element in document order, rendered `Name=Text` when a
/// `Name` attribute is present and as bare text otherwise, joined with `;`.
fn data_items(by_name: &ByLocalName<'_>) -> String {
    let Some(elements) = by_name.get("Data") else {
        return String::new();
    };

    let items: Vec<String> = elements
        .iter()
        .map(|element| match element.attribute("Name") {
            Some(name) => format!("{name}={}", element.trimmed_text()),
            None => element.trimmed_text().to_owned(),
        })
        .collect();

    items.join(";")
}
