// Key-value decoder: block body lines -> field map plus correlation fields

use crate::models::FieldMap;

/// Body of one block after `key=value` decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBlock {
    pub fields: FieldMap,
    pub host_name: Option<String>,
    pub service_description: Option<String>,
}

/// Decodes body lines. `host_name` and `service_description` are lifted out
/// of the field map; any other line becomes `key -> value` where the value is
/// everything after the first `=`. Later duplicates overwrite earlier ones.
pub fn decode_body<S: AsRef<str>>(body: &[S]) -> DecodedBlock {
    let mut decoded = DecodedBlock::default();
    for line in body {
        let line = line.as_ref().trim_matches([' ', '\t']);
        if line.contains("host_name") {
            decoded.host_name = Some(value_of(line).to_string());
        } else if line.contains("service_description") {
            decoded.service_description = Some(value_of(line).to_string());
        } else {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let value = if key.is_empty() { "" } else { value };
            decoded.fields.insert(key.to_string(), value.to_string());
        }
    }
    decoded
}

fn value_of(line: &str) -> &str {
    line.split_once('=').map(|(_, v)| v).unwrap_or_default()
}
