use serde_json::Value;

use crate::errors::ServiceError;

/// Accepted `type` values. "DRAGO" (not "DRAGON") is intentional: the client
/// suites this server exists for assert against exactly this list.
pub const POKEMON_TYPES: [&str; 18] = [
    "NORMAL", "FIRE", "FIGHTING", "WATER", "FLYING", "GRASS", "POISON", "ELECTRIC", "GROUND",
    "PSYCHIC", "ROCK", "ICE", "BUG", "DRAGO", "GHOST", "DARK", "STEEL", "FAIRY",
];

/// Shape check applied before every write: `name` a string, `level` a
/// non-negative integer, `type` one of [`POKEMON_TYPES`]. Unknown extra
/// fields are allowed and stored untouched.
pub fn validate_payload(payload: &Value) -> Result<(), ServiceError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ServiceError::Validation("payload must be a JSON object".into()))?;

    match obj.get("name") {
        None => return Err(ServiceError::Validation("name is required".into())),
        Some(v) if !v.is_string() => {
            return Err(ServiceError::Validation("name must be a string".into()))
        }
        _ => {}
    }

    // as_i64 is None for floats and strings, so "1" and 1.5 both fail here
    match obj.get("level") {
        None => return Err(ServiceError::Validation("level is required".into())),
        Some(v) => match v.as_i64() {
            None => return Err(ServiceError::Validation("level must be an integer".into())),
            Some(n) if n < 0 => {
                return Err(ServiceError::Validation("level must be >= 0".into()))
            }
            _ => {}
        },
    }

    match obj.get("type") {
        None => Err(ServiceError::Validation("type is required".into())),
        Some(v) => match v.as_str() {
            None => Err(ServiceError::Validation("type must be a string".into())),
            Some(t) if POKEMON_TYPES.contains(&t) => Ok(()),
            Some(t) => Err(ServiceError::Validation(format!(
                "type {} is not a known pokemon type",
                t
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_payload() {
        let p = json!({"name": "charmander", "type": "FIRE", "level": 1});
        assert!(validate_payload(&p).is_ok());
    }

    #[test]
    fn extra_fields_are_allowed() {
        let p = json!({"name": "eevee", "type": "NORMAL", "level": 3, "trainer": "red"});
        assert!(validate_payload(&p).is_ok());
    }

    #[test]
    fn rejects_missing_required_fields() {
        for p in [
            json!({"type": "FIRE", "level": 1}),
            json!({"name": "charmander", "level": 1}),
            json!({"name": "charmander", "type": "FIRE"}),
        ] {
            assert!(matches!(validate_payload(&p), Err(ServiceError::Validation(_))));
        }
    }

    #[test]
    fn rejects_negative_level() {
        let p = json!({"name": "charmander", "type": "FIRE", "level": -1});
        assert!(matches!(validate_payload(&p), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn rejects_non_integer_level() {
        let as_string = json!({"name": "charmander", "type": "FIRE", "level": "1"});
        assert!(validate_payload(&as_string).is_err());
        let as_float = json!({"name": "charmander", "type": "FIRE", "level": 1.5});
        assert!(validate_payload(&as_float).is_err());
    }

    #[test]
    fn level_zero_is_valid() {
        let p = json!({"name": "magikarp", "type": "WATER", "level": 0});
        assert!(validate_payload(&p).is_ok());
    }

    #[test]
    fn rejects_out_of_enum_type() {
        // the list carries DRAGO, so the canonical spelling must fail
        let p = json!({"name": "dratini", "type": "DRAGON", "level": 10});
        assert!(validate_payload(&p).is_err());
        let p = json!({"name": "dratini", "type": "DRAGO", "level": 10});
        assert!(validate_payload(&p).is_ok());
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(validate_payload(&json!([1, 2, 3])).is_err());
        assert!(validate_payload(&json!("charmander")).is_err());
    }
}
