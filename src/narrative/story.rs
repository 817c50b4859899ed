//! Property stories: one short paragraph per feature.

use crate::config::FieldMap;
use crate::record::Feature;
use crate::values::{parse_integer, parse_number, with_thousands};
use serde_json::Value;
use tracing::debug;

/// Longest legal description quoted verbatim in a story.
pub const LEGAL_EXCERPT_LEN: usize = 100;

/// Renders stories from the fields named in a [`FieldMap`].
#[derive(Clone, Copy, Debug)]
pub struct StoryBuilder<'f> {
    fields: &'f FieldMap,
}

impl<'f> StoryBuilder<'f> {
    #[must_use]
    pub const fn new(fields: &'f FieldMap) -> Self {
        Self { fields }
    }

    /// The story for `feature`: sentences joined by `". "`, ending in `"."`.
    ///
    /// Absent and blank fields are left out. A numeric field that does not
    /// parse is quoted as recorded instead of dropping the record.
    #[must_use]
    pub fn story(&self, feature: &Feature) -> String {
        let f = self.fields;
        let text = |key: &str| feature.non_empty_text(key);
        let mut parts: Vec<String> = Vec::new();

        let address = text(&f.address);
        let mut opening = address
            .as_ref()
            .map_or_else(|| "This property".to_string(), |a| format!("The property located at {a}"));
        let location: Vec<String> = [
            text(&f.municipality).map(|m| format!("in {m}")),
            text(&f.neighborhood).map(|n| format!("within the {n} neighborhood")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !location.is_empty() {
            opening.push_str(" is situated ");
            opening.push_str(&location.join(" "));
            opening.push_str(" and");
        }
        match text(&f.owner) {
            Some(owner) => opening.push_str(&format!(" is currently owned by {owner}")),
            None => opening.push_str(" has no current owner listed"),
        }
        parts.push(opening);

        if let Some(zoning) = text(&f.zoning) {
            let mut sentence = format!("The property is zoned as {zoning}");
            if let Some(secondary) = text(&f.secondary_zoning) {
                sentence.push_str(&format!(" with secondary zoning of {secondary}"));
            }
            parts.push(sentence);
        }

        if let Some(raw) = feature.property(&f.lot_size).filter(|v| is_present(v)) {
            parts.push(match number(&f.lot_size, raw) {
                Some(v) => format!("The lot size is {} square feet", with_thousands(v, 0)),
                None => format!("The lot size is recorded as {} square feet", trimmed(raw)),
            });
        }

        if let Some(raw) = feature.property(&f.year_built).filter(|v| is_present(v)) {
            parts.push(match parse_integer(raw) {
                Ok(year) => format!("The building was constructed in {year}"),
                Err(err) => {
                    debug!(field = %f.year_built, %err, "year not an integer");
                    format!("The building construction year is recorded as {}", trimmed(raw))
                }
            });
        }

        let simple: [(&String, &str, &str); 6] = [
            (&f.route, "Trash collection is handled via route ", ""),
            (&f.recycling, "Recycling is scheduled for ", ""),
            (&f.garbage_days, "Garbage collection occurs on ", ""),
            (&f.property_type, "The property type is ", ""),
            (&f.square_feet, "The building size is ", " square feet"),
            (&f.units, "The property has ", " units"),
        ];
        for (field, before, after) in simple {
            if let Some(v) = text(field) {
                parts.push(format!("{before}{v}{after}"));
            }
        }

        if text(&f.condo_flag).as_deref() == Some("Y") {
            parts.push("This is a condominium property".into());
        }
        if text(&f.historical).as_deref() == Some("Yes") {
            parts.push("This property has historical designation".into());
        }

        for (field, label) in [
            (&f.total_value, "total property value"),
            (&f.land_value, "land value"),
            (&f.building_value, "building value"),
        ] {
            if let Some(raw) = feature.property(field).filter(|v| is_present(v)) {
                parts.push(match number(field, raw) {
                    Some(v) => format!("The {label} is ${}", with_thousands(v, 0)),
                    None => format!("The {label} is recorded as {}", trimmed(raw)),
                });
            }
        }

        if let Some(mailing) = text(&f.mailing_address)
            && address.as_deref() != Some(mailing.as_str())
        {
            parts.push(format!("The mailing address is {mailing}"));
        }

        if let Some((lon, lat)) = feature.lon_lat() {
            parts.push(format!(
                "The property is located at coordinates {lat:.6}, {lon:.6}"
            ));
        }

        if let Some(legal) = text(&f.legal) {
            parts.push(format!("The legal description is {}", excerpt(&legal, LEGAL_EXCERPT_LEN)));
        }

        let mut story = parts.join(". ");
        story.push('.');
        story
    }
}

fn number(field: &str, raw: &Value) -> Option<f64> {
    match parse_number(raw) {
        Ok(v) => Some(v),
        Err(err) => {
            debug!(field, %err, "rendering non-numeric value as recorded");
            None
        }
    }
}

fn is_present(value: &Value) -> bool {
    !trimmed(value).is_empty()
}

fn trimmed(value: &Value) -> String {
    crate::values::canonical(value)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// First `max` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut out: String = text.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}
