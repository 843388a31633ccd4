use serde::Deserialize;
use serde_json::{Map, Value};

use super::ProfileRecord;
use crate::Diagnostics;

#[derive(Deserialize)]
struct RawLocation {
    name: String,
    #[serde(default)]
    details: Option<String>,
    services: Vec<Value>,
}

#[derive(Deserialize)]
struct RawService {
    platform: String,
    programmers: Vec<Value>,
}

#[derive(Deserialize)]
struct RawProgrammer {
    name: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Location parsed from the profile document, along with the programmers at
/// that location grouped by platform.
///
/// This only exists during parsing.
#[derive(Debug)]
pub(super) struct Location {
    pub name: String,
    pub details: String,
    pub services: Vec<(String, Vec<ProfileRecord>)>,
}
impl Location {
    /// Parses a location, skipping any services or programmers that are
    /// malformed. Returns `None` if the location itself is malformed.
    pub fn parse(index: usize, value: &Value, diagnostics: &Diagnostics) -> Option<Self> {
        let raw = match RawLocation::deserialize(value) {
            Ok(raw) => raw,
            Err(e) => {
                diagnostics.field_missing(format!("skipping location #{index}: {e}"));
                return None;
            }
        };

        let mut location = Location {
            name: raw.name,
            details: raw.details.unwrap_or_default(),
            services: vec![],
        };

        for (i, service) in raw.services.iter().enumerate() {
            let service = match RawService::deserialize(service) {
                Ok(service) => service,
                Err(e) => {
                    diagnostics.field_missing(format!(
                        "skipping service #{i} in location {:?}: {e}",
                        location.name,
                    ));
                    continue;
                }
            };

            let records = service
                .programmers
                .iter()
                .enumerate()
                .filter_map(|(j, programmer)| {
                    match RawProgrammer::deserialize(programmer) {
                        Ok(raw) => Some(location.record(&service.platform, raw)),
                        Err(e) => {
                            diagnostics.field_missing(format!(
                                "skipping programmer #{j} on platform {:?} in location {:?}: {e}",
                                service.platform, location.name,
                            ));
                            None
                        }
                    }
                })
                .collect();
            location.services.push((service.platform, records));
        }

        Some(location)
    }

    fn record(&self, platform: &str, raw: RawProgrammer) -> ProfileRecord {
        ProfileRecord {
            name: raw.name,
            platform: platform.to_owned(),
            location_name: self.name.clone(),
            location_details: self.details.clone(),
            extra: raw.extra,
            placeholder: false,
        }
    }

    /// Flattens the location into profile records, in document order.
    pub fn into_records(self) -> impl Iterator<Item = ProfileRecord> {
        self.services
            .into_iter()
            .flat_map(|(_platform, records)| records)
    }
}
