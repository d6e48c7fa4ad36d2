use crate::{ComparisonResult, Result};

use super::ReportSerializer;

/// Pretty-printed JSON with camelCase field names.
pub struct JsonSerializer;

impl ReportSerializer for JsonSerializer {
    fn serialize(&self, result: &ComparisonResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::fixture;

    #[test]
    fn output_parses_back_to_the_same_result() {
        let result = fixture::result();

        let json = JsonSerializer.serialize(&result).expect("serializes");
        let parsed: ComparisonResult = serde_json::from_str(&json).expect("parses");

        assert_eq!(parsed, result);
    }

    #[test]
    fn field_names_are_camel_case() {
        let json = JsonSerializer.serialize(&fixture::result()).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses");

        assert_eq!(value["versionA"], "1.2.0");
        assert_eq!(value["filesAdded"][0], "src/promo.x");
        assert_eq!(value["apiChanges"][0]["changeType"], "Added");
        assert_eq!(value["changeReport"]["summary"]["riskLevel"], "Critical");
        assert_eq!(value["versionComparison"]["result"], "Greater");
    }
}
